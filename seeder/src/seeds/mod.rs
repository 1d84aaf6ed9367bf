pub mod form;
pub mod planned_check;
pub mod task;
pub mod user;
