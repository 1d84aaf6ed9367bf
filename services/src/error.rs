use sea_orm::DbErr;
use thiserror::Error;

/// Failures surfaced by the service layer.
///
/// None of these are fatal beyond the run in which they occur: validation
/// and sequencing errors leave the run state untouched, lookup errors let
/// the caller retry at the same step, and database errors are retryable with
/// no partial row left behind.
#[derive(Debug, Error)]
pub enum ServiceError {
    // --- input validation ---
    #[error("comment must be at least {min} characters")]
    CommentTooShort { min: u64 },

    // --- sequencing (rejected as no-ops) ---
    #[error("action does not match the current task")]
    TaskMismatch,
    #[error("run is already complete")]
    RunComplete,
    #[error("no failure is awaiting details")]
    NoPendingFailure,
    #[error("a failure is awaiting resolution")]
    FailurePending,

    // --- lookups ---
    #[error("reviewer is not permitted to conduct checks")]
    NotPermitted,
    #[error("reviewer has no production area assigned")]
    NotAssigned,
    #[error("no form is bound to area '{0}'")]
    NoFormForArea(String),
    #[error("the form has no tasks")]
    NoTasksInForm,
    #[error("task {0} not found")]
    TaskNotFound(i64),
    #[error("{0} not found")]
    NotFound(&'static str),

    // --- finalization ---
    #[error("run still has unchecked tasks")]
    IncompleteRun,
    #[error("run has no grades to store")]
    EmptyGrades,

    // --- persistence ---
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}
