pub mod m202608150001_create_users;
pub mod m202608150002_create_tasks;
pub mod m202608150003_create_forms;
pub mod m202608150004_create_errors;
pub mod m202608150005_create_checks;
pub mod m202608150006_create_planned_checks;
