use build_stage_store::handle_message;
use build_stage_store::report::{FailureKind, Outcome};
use sqlx::PgPool;

mod common;

use common::{count_all, count_rows};

#[sqlx::test(migrations = "./migrations")]
async fn done_stage_event_is_persisted(db: PgPool) {
    let outcome = handle_message(&db, r#"{"stageId":"abc","status":"DONE"}"#).await;

    assert!(matches!(outcome, Outcome::Persisted { ref stage_id } if stage_id == "abc"));
    assert_eq!(count_rows(&db, "abc").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn redelivered_message_is_rejected_as_duplicate(db: PgPool) {
    let payload = r#"{"stageId":"abc","status":"DONE"}"#;

    let first = handle_message(&db, payload).await;
    let second = handle_message(&db, payload).await;

    assert!(matches!(first, Outcome::Persisted { .. }));
    assert!(matches!(second, Outcome::DuplicateRejected { ref stage_id } if stage_id == "abc"));
    assert_eq!(count_rows(&db, "abc").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn empty_payload_is_skipped(db: PgPool) {
    let outcome = handle_message(&db, "").await;

    assert!(matches!(outcome, Outcome::Skipped));
    assert_eq!(count_all(&db).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn heartbeat_is_skipped(db: PgPool) {
    let outcome = handle_message(&db, r#"{"type":"heartbeat"}"#).await;

    assert!(matches!(outcome, Outcome::Skipped));
    assert_eq!(count_all(&db).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn garbage_payload_fails_as_malformed(db: PgPool) {
    let outcome = handle_message(&db, "definitely not json").await;

    assert!(matches!(
        outcome,
        Outcome::Failed(FailureKind::Malformed(_))
    ));
    assert_eq!(count_all(&db).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn storage_failure_leaves_no_partial_state(db: PgPool) {
    sqlx::query("ALTER TABLE build_stage_record RENAME TO build_stage_record_unreachable")
        .execute(&db)
        .await
        .unwrap();

    let outcome = handle_message(&db, r#"{"stageId":"abc","status":"DONE"}"#).await;
    assert!(matches!(outcome, Outcome::Failed(FailureKind::Storage(_))));

    sqlx::query("ALTER TABLE build_stage_record_unreachable RENAME TO build_stage_record")
        .execute(&db)
        .await
        .unwrap();
    assert_eq!(count_all(&db).await, 0);
}
