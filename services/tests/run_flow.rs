//! End-to-end inspection-run scenarios over a real (in-memory) database.

use sea_orm::DatabaseConnection;

use db::models::user::AccessLevel;
use db::models::{check, error_record, form, task, user};
use db::test_utils::setup_test_db;
use services::catalog::DbCatalog;
use services::check_store::DbCheckStore;
use services::directory::DbDirectory;
use services::error_store::DbErrorStore;
use services::{Inspector, RunStep, ServiceError};

type DbInspector = Inspector<DbDirectory, DbCatalog, DbErrorStore, DbCheckStore>;

fn inspector(db: &DatabaseConnection) -> DbInspector {
    Inspector::new(
        DbDirectory::new(db.clone()),
        DbCatalog::new(db.clone()),
        DbErrorStore::new(db.clone()),
        DbCheckStore::new(db.clone()),
    )
}

/// Reviewer + three-task form bound to the "assembly" area.
async fn seed_assembly(db: &DatabaseConnection) -> (i64, Vec<i64>) {
    let reviewer = user::Model::create(db, "inspector", AccessLevel::OfficeWorker, Some("assembly"))
        .await
        .unwrap();

    let mut task_ids = Vec::new();
    for info in ["Guards mounted", "Floor markings intact", "Tools stored"] {
        task_ids.push(task::Model::create(db, info).await.unwrap().id);
    }
    form::Model::create(db, "assembly", &task_ids, None)
        .await
        .unwrap();

    (reviewer.id, task_ids)
}

#[tokio::test]
async fn pass_fail_with_comment_pass() {
    let db = setup_test_db().await;
    let (reviewer_id, tasks) = seed_assembly(&db).await;
    let inspector = inspector(&db);

    let mut run = inspector.start_run(reviewer_id).await.unwrap();
    assert_eq!(run.total_tasks(), 3);

    // T1: pass.
    let RunStep::Task(view) = inspector.present(&run).await.unwrap() else {
        panic!("expected a task");
    };
    assert_eq!(view.task_id, tasks[0]);
    assert_eq!(view.info, "Guards mounted");
    assert_eq!((view.position, view.total), (1, 3));
    run.record_pass(tasks[0]).unwrap();

    // T2: fail with a comment, no photo.
    run.record_fail(tasks[1]).unwrap();
    run.attach_comment("missing guard").unwrap();
    let error_id = inspector
        .resolve_fail_with_error(&mut run, tasks[1])
        .await
        .unwrap();

    // T3: pass.
    run.record_pass(tasks[2]).unwrap();
    assert_eq!(inspector.present(&run).await.unwrap(), RunStep::Completed);

    assert_eq!(run.grade_ints(), vec![1, 0, 1]);
    assert_eq!(run.error_ids(), &[error_id]);

    let check_id = inspector.finalize(&run).await.unwrap();
    run.cancel();

    let stored = check::Model::get_by_id(&db, check_id).await.unwrap().unwrap();
    assert_eq!(stored.grades, "1, 0, 1");
    assert_eq!(stored.errors_ids, error_id.to_string());
    assert_eq!(stored.reviewer_id, reviewer_id);

    let stats = stored.stats();
    assert!((stats.percentage - 66.7).abs() < 0.1);
    assert_eq!(stats.score, 4.0);
    assert_eq!(stats.band.to_string(), "medium");

    let record = error_record::Model::get_by_id(&db, error_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.comment, "missing guard");
    assert_eq!(record.photo_url, None);
}

#[tokio::test]
async fn skip_without_details_creates_no_error_record() {
    let db = setup_test_db().await;
    let (reviewer_id, tasks) = seed_assembly(&db).await;
    let inspector = inspector(&db);

    let mut run = inspector.start_run(reviewer_id).await.unwrap();
    run.record_pass(tasks[0]).unwrap();
    run.record_fail(tasks[1]).unwrap();
    run.resolve_fail_without_error(tasks[1]).unwrap();
    run.record_pass(tasks[2]).unwrap();

    inspector.finalize(&run).await.unwrap();

    assert!(error_record::Model::get_all(&db).await.unwrap().is_empty());
    let checks = check::Model::get_all(&db).await.unwrap();
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0].errors_ids, "");
    assert_eq!(checks[0].error_ids(), Vec::<i64>::new());
}

#[tokio::test]
async fn cancel_mid_run_persists_nothing() {
    let db = setup_test_db().await;
    let (reviewer_id, tasks) = seed_assembly(&db).await;
    let inspector = inspector(&db);

    let mut run = inspector.start_run(reviewer_id).await.unwrap();
    run.record_pass(tasks[0]).unwrap();
    run.record_fail(tasks[1]).unwrap();
    run.attach_comment("torn cable sheath").unwrap();
    run.cancel();

    assert!(check::Model::get_all(&db).await.unwrap().is_empty());
    assert!(error_record::Model::get_all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn placeholder_comment_when_failure_saved_without_text() {
    let db = setup_test_db().await;
    let (reviewer_id, tasks) = seed_assembly(&db).await;
    let inspector = inspector(&db);

    let mut run = inspector.start_run(reviewer_id).await.unwrap();
    run.record_pass(tasks[0]).unwrap();
    run.record_fail(tasks[1]).unwrap();
    run.attach_photo("photos/cable.jpg").unwrap();
    let error_id = inspector
        .resolve_fail_with_error(&mut run, tasks[1])
        .await
        .unwrap();

    let record = error_record::Model::get_by_id(&db, error_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.comment, error_record::PLACEHOLDER_COMMENT);
    assert_eq!(record.photo_url.as_deref(), Some("photos/cable.jpg"));
}

#[tokio::test]
async fn finalize_rejects_incomplete_run_and_writes_nothing() {
    let db = setup_test_db().await;
    let (reviewer_id, tasks) = seed_assembly(&db).await;
    let inspector = inspector(&db);

    let mut run = inspector.start_run(reviewer_id).await.unwrap();
    run.record_pass(tasks[0]).unwrap();

    let err = inspector.finalize(&run).await.unwrap_err();
    assert!(matches!(err, ServiceError::IncompleteRun));
    assert!(check::Model::get_all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn start_run_requires_permitted_assigned_reviewer() {
    let db = setup_test_db().await;
    let inspector = inspector(&db);

    // Unknown reviewer.
    let err = inspector.start_run(999).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("reviewer")));

    // Wrong access level.
    let worker = user::Model::create(&db, "line worker", AccessLevel::Worker, Some("assembly"))
        .await
        .unwrap();
    let err = inspector.start_run(worker.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotPermitted));

    // Correct level but marked unavailable.
    let away = user::Model::create(&db, "away", AccessLevel::OfficeWorker, Some("assembly"))
        .await
        .unwrap();
    user::Model::set_available(&db, away.id, false).await.unwrap();
    let err = inspector.start_run(away.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotPermitted));

    // No area assigned.
    let unassigned = user::Model::create(&db, "floating", AccessLevel::OfficeWorker, None)
        .await
        .unwrap();
    let err = inspector.start_run(unassigned.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotAssigned));

    // Area with no form.
    let lost = user::Model::create(&db, "lost", AccessLevel::OfficeWorker, Some("welding"))
        .await
        .unwrap();
    let err = inspector.start_run(lost.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NoFormForArea(area) if area == "welding"));

    // Form with an empty task list.
    form::Model::create(&db, "paint shop", &[], None).await.unwrap();
    let idle = user::Model::create(&db, "idle", AccessLevel::OfficeWorker, Some("paint shop"))
        .await
        .unwrap();
    let err = inspector.start_run(idle.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NoTasksInForm));
}

#[tokio::test]
async fn form_edits_do_not_affect_a_running_check() {
    let db = setup_test_db().await;
    let (reviewer_id, tasks) = seed_assembly(&db).await;
    let inspector = inspector(&db);

    let mut run = inspector.start_run(reviewer_id).await.unwrap();

    // Shrink the form mid-run; the snapshot keeps all three tasks.
    let stored_form = form::Model::get_by_name(&db, "assembly").await.unwrap().unwrap();
    form::Model::edit_tasks(&db, stored_form.id, &tasks[..1]).await.unwrap();

    run.record_pass(tasks[0]).unwrap();
    run.record_pass(tasks[1]).unwrap();
    run.record_pass(tasks[2]).unwrap();
    assert!(run.is_complete());
    assert_eq!(run.grade_ints(), vec![1, 1, 1]);
}
