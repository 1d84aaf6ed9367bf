pub mod check;
pub mod error_record;
pub mod form;
pub mod planned_check;
pub mod task;
pub mod user;

pub use check::Entity as Check;
pub use error_record::Entity as ErrorRecord;
pub use form::Entity as Form;
pub use planned_check::Entity as PlannedCheck;
pub use task::Entity as Task;
pub use user::Entity as User;
