pub mod catalog;
pub mod check_store;
pub mod directory;
pub mod error;
pub mod error_store;
pub mod planning;
pub mod run;

pub use error::ServiceError;
pub use run::{CheckRun, Grade, Inspector, RunStep, TaskView};
