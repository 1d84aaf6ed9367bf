//! The inspection run state machine.
//!
//! A [`CheckRun`] is one reviewer's walk through a form's task list. It is a
//! plain owned value: created by [`Inspector::start_run`], advanced one
//! external event at a time, and either finalized into exactly one check row
//! or dropped. Where it lives between events (a chat session, an HTTP
//! session, a test local) is the caller's concern; it is never shared
//! between reviewers.
//!
//! Transitions that need no I/O are synchronous methods on `CheckRun`;
//! everything that touches a collaborator service goes through
//! [`Inspector`], which receives the directory, catalog, error store and
//! check store by constructor injection.
//!
//! Every task-addressed transition takes the task id the caller believes it
//! is acting on and fails with `TaskMismatch` when it does not equal the
//! task at the cursor. A duplicated or stale UI action therefore lands on a
//! run that has already advanced and is rejected as a no-op, never applied
//! twice.

use serde::Serialize;
use validator::Validate;

use crate::catalog::Catalog;
use crate::check_store::{CheckStore, NewCheck};
use crate::directory::Directory;
use crate::error::ServiceError;
use crate::error_store::ErrorStore;
use db::grade::CheckStats;
use db::models::user::AccessLevel;

const MIN_COMMENT_LEN: u64 = 3;

/// Per-task verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Pass,
    Fail,
}

impl Grade {
    /// Stored form: 1 for pass, 0 for fail.
    pub fn as_int(self) -> i64 {
        match self {
            Grade::Pass => 1,
            Grade::Fail => 0,
        }
    }
}

/// Scratch state for the failure-detail sub-flow. Exists only while the run
/// phase is `FailPending`, so a pending error outside a failure is
/// unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingError {
    pub task_id: i64,
    pub comment: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum RunPhase {
    /// The task at the cursor awaits a verdict.
    Presenting,
    /// The task at the cursor was failed; details may be attached before the
    /// failure is resolved with or without an error record.
    FailPending(PendingError),
    /// Every task has a grade.
    Completed,
}

#[derive(Validate)]
struct CommentInput<'a> {
    #[validate(length(min = MIN_COMMENT_LEN))]
    text: &'a str,
}

/// One reviewer's in-progress inspection of a form.
#[derive(Debug, Clone)]
pub struct CheckRun {
    reviewer_id: i64,
    form_id: i64,
    area: String,
    /// Snapshot of the form's ordered task list taken at run start; later
    /// form edits do not affect this run.
    task_ids: Vec<i64>,
    cursor: usize,
    grades: Vec<Grade>,
    error_ids: Vec<i64>,
    phase: RunPhase,
}

/// What the reviewer should see next.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RunStep {
    Task(TaskView),
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskView {
    pub task_id: i64,
    pub info: String,
    /// 1-based position within the run.
    pub position: usize,
    pub total: usize,
}

impl CheckRun {
    fn new(reviewer_id: i64, form_id: i64, area: String, task_ids: Vec<i64>) -> Self {
        debug_assert!(!task_ids.is_empty());
        CheckRun {
            reviewer_id,
            form_id,
            area,
            task_ids,
            cursor: 0,
            grades: Vec::new(),
            error_ids: Vec::new(),
            phase: RunPhase::Presenting,
        }
    }

    pub fn reviewer_id(&self) -> i64 {
        self.reviewer_id
    }

    pub fn form_id(&self) -> i64 {
        self.form_id
    }

    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn total_tasks(&self) -> usize {
        self.task_ids.len()
    }

    /// Task the run is currently on, or `None` once complete.
    pub fn current_task_id(&self) -> Option<i64> {
        self.task_ids.get(self.cursor).copied()
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, RunPhase::Completed)
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    /// Grades in their stored integer form.
    pub fn grade_ints(&self) -> Vec<i64> {
        self.grades.iter().map(|g| g.as_int()).collect()
    }

    pub fn error_ids(&self) -> &[i64] {
        &self.error_ids
    }

    /// The pending failure detail, if the run is in the failure sub-flow.
    pub fn pending_error(&self) -> Option<&PendingError> {
        match &self.phase {
            RunPhase::FailPending(pending) => Some(pending),
            _ => None,
        }
    }

    /// Statistics over the grades recorded so far.
    pub fn stats(&self) -> CheckStats {
        CheckStats::from_grades(&self.grade_ints())
    }

    /// Verify that `task_id` addresses the task at the cursor.
    fn expect_current(&self, task_id: i64) -> Result<(), ServiceError> {
        match self.current_task_id() {
            None => Err(ServiceError::RunComplete),
            Some(current) if current == task_id => Ok(()),
            Some(_) => Err(ServiceError::TaskMismatch),
        }
    }

    /// Record a grade for the current task and move the cursor forward.
    fn advance(&mut self, grade: Grade) {
        self.grades.push(grade);
        self.cursor += 1;
        self.phase = if self.cursor == self.task_ids.len() {
            RunPhase::Completed
        } else {
            RunPhase::Presenting
        };
        debug_assert_eq!(self.grades.len(), self.cursor);
    }

    /// Mark the current task as passed and advance.
    pub fn record_pass(&mut self, task_id: i64) -> Result<(), ServiceError> {
        self.expect_current(task_id)?;
        match self.phase {
            RunPhase::Presenting => {
                self.advance(Grade::Pass);
                Ok(())
            }
            RunPhase::FailPending(_) => Err(ServiceError::FailurePending),
            RunPhase::Completed => Err(ServiceError::RunComplete),
        }
    }

    /// Mark the current task as failed and enter the failure-detail
    /// sub-flow. No grade is recorded until the failure is resolved.
    pub fn record_fail(&mut self, task_id: i64) -> Result<(), ServiceError> {
        self.expect_current(task_id)?;
        match self.phase {
            RunPhase::Presenting => {
                self.phase = RunPhase::FailPending(PendingError {
                    task_id,
                    comment: None,
                    photo_url: None,
                });
                Ok(())
            }
            RunPhase::FailPending(_) => Err(ServiceError::FailurePending),
            RunPhase::Completed => Err(ServiceError::RunComplete),
        }
    }

    /// Attach a comment to the pending failure. May be called before or
    /// after [`CheckRun::attach_photo`]; the last comment wins. Does not
    /// advance the run.
    pub fn attach_comment(&mut self, text: &str) -> Result<(), ServiceError> {
        // Length is checked on the text as given; whitespace counts.
        if (CommentInput { text }).validate().is_err() {
            return Err(ServiceError::CommentTooShort {
                min: MIN_COMMENT_LEN,
            });
        }
        match &mut self.phase {
            RunPhase::FailPending(pending) => {
                pending.comment = Some(text.to_string());
                Ok(())
            }
            _ => Err(ServiceError::NoPendingFailure),
        }
    }

    /// Attach a photo reference to the pending failure. Does not advance
    /// the run.
    pub fn attach_photo(&mut self, photo_url: &str) -> Result<(), ServiceError> {
        match &mut self.phase {
            RunPhase::FailPending(pending) => {
                pending.photo_url = Some(photo_url.to_string());
                Ok(())
            }
            _ => Err(ServiceError::NoPendingFailure),
        }
    }

    /// Resolve the pending failure without saving any detail: record a fail
    /// grade, discard the scratch state, advance.
    pub fn resolve_fail_without_error(&mut self, task_id: i64) -> Result<(), ServiceError> {
        self.pending_for(task_id)?;
        self.advance(Grade::Fail);
        Ok(())
    }

    /// Drop back from the failure-detail sub-flow to a fresh pending
    /// failure, discarding any attached comment/photo.
    pub fn reset_pending_error(&mut self, task_id: i64) -> Result<(), ServiceError> {
        self.pending_for(task_id)?;
        self.phase = RunPhase::FailPending(PendingError {
            task_id,
            comment: None,
            photo_url: None,
        });
        Ok(())
    }

    /// Discard the run. Nothing was persisted by the machine itself, so
    /// cancellation is just consumption.
    pub fn cancel(self) {}

    /// Validate that a pending failure exists for `task_id` and return a
    /// copy of it.
    fn pending_for(&self, task_id: i64) -> Result<PendingError, ServiceError> {
        self.expect_current(task_id)?;
        match &self.phase {
            RunPhase::FailPending(pending) => Ok(pending.clone()),
            _ => Err(ServiceError::NoPendingFailure),
        }
    }

    /// Apply a persisted error record to the pending failure: remember the
    /// id, record a fail grade, discard the scratch state, advance. Called
    /// only after the store write succeeded.
    fn apply_saved_error(&mut self, error_id: i64) {
        self.error_ids.push(error_id);
        self.advance(Grade::Fail);
    }
}

/// Orchestrates runs against the collaborator services.
pub struct Inspector<D, C, E, K> {
    directory: D,
    catalog: C,
    errors: E,
    checks: K,
}

impl<D, C, E, K> Inspector<D, C, E, K>
where
    D: Directory,
    C: Catalog,
    E: ErrorStore,
    K: CheckStore,
{
    pub fn new(directory: D, catalog: C, errors: E, checks: K) -> Self {
        Inspector {
            directory,
            catalog,
            errors,
            checks,
        }
    }

    /// Begin a run for a reviewer: resolve their area, look up the form
    /// bound to it, and snapshot its ordered task list.
    pub async fn start_run(&self, reviewer_id: i64) -> Result<CheckRun, ServiceError> {
        let profile = self
            .directory
            .profile(reviewer_id)
            .await?
            .ok_or(ServiceError::NotFound("reviewer"))?;

        if profile.access_level != AccessLevel::OfficeWorker || !profile.available {
            return Err(ServiceError::NotPermitted);
        }

        let area = profile.part_name.ok_or(ServiceError::NotAssigned)?;

        let form = self
            .catalog
            .form_by_area(&area)
            .await?
            .ok_or_else(|| ServiceError::NoFormForArea(area.clone()))?;

        if form.task_ids.is_empty() {
            return Err(ServiceError::NoTasksInForm);
        }

        log::info!(
            "reviewer {} started a check of '{}' ({} tasks)",
            reviewer_id,
            area,
            form.task_ids.len()
        );
        Ok(CheckRun::new(reviewer_id, form.id, area, form.task_ids))
    }

    /// What the reviewer should see now: the current task, or the
    /// completion signal once every task has a grade.
    pub async fn present(&self, run: &CheckRun) -> Result<RunStep, ServiceError> {
        let Some(task_id) = run.current_task_id() else {
            return Ok(RunStep::Completed);
        };

        let task = self
            .catalog
            .task(task_id)
            .await?
            .ok_or(ServiceError::TaskNotFound(task_id))?;

        Ok(RunStep::Task(TaskView {
            task_id,
            info: task.info,
            position: run.cursor + 1,
            total: run.task_ids.len(),
        }))
    }

    /// Resolve the pending failure by persisting its detail as an error
    /// record. The record is written first; the run advances only after the
    /// store reports success, so a failed write leaves the run unchanged and
    /// retryable. Returns the new error id.
    pub async fn resolve_fail_with_error(
        &self,
        run: &mut CheckRun,
        task_id: i64,
    ) -> Result<i64, ServiceError> {
        let pending = run.pending_for(task_id)?;

        let error_id = self
            .errors
            .create(pending.comment.as_deref(), pending.photo_url.as_deref())
            .await?;

        run.apply_saved_error(error_id);
        Ok(error_id)
    }

    /// Finalize a completed run into one check row. Borrows the run: on
    /// failure the grades and error ids are intact and `finalize` can simply
    /// be called again; on success the caller drops the run.
    pub async fn finalize(&self, run: &CheckRun) -> Result<i64, ServiceError> {
        if !run.is_complete() {
            return Err(ServiceError::IncompleteRun);
        }
        if run.grades.is_empty() {
            // Unreachable through start_run, which rejects forms with no
            // tasks; guards the grades column contract.
            return Err(ServiceError::EmptyGrades);
        }

        self.checks
            .insert(NewCheck {
                form_id: run.form_id,
                grades: run.grade_ints(),
                error_ids: run.error_ids.clone(),
                reviewer_id: run.reviewer_id,
                addition: None,
            })
            .await
    }
}
