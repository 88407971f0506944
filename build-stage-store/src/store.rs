use sqlx::types::Json;
use sqlx::{Error as SqlxError, PgPool};

use crate::types::BuildStageRecord;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PersistResult {
    Committed,
    DuplicateConflict,
}

/// Insert one record inside its own transaction. A uniqueness violation on the
/// stage id reports as `DuplicateConflict`; any other failure rolls back and
/// surfaces as `Err`. Retrying is the transport's job, never done here.
pub async fn persist(
    pool: &PgPool,
    record: &BuildStageRecord,
) -> Result<PersistResult, SqlxError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO build_stage_record
            (stage_id, status, build_id, event_timestamp, duration_millis, metadata)
        VALUES ($1, $2, $3, $4, $5, $6)"#,
    )
    .bind(&record.stage_id)
    .bind(&record.status)
    .bind(&record.build_id)
    .bind(record.timestamp)
    .bind(record.duration_millis)
    .bind(Json(&record.metadata))
    .execute(&mut *tx)
    .await;

    match result {
        Ok(_) => {
            tx.commit().await?;
            Ok(PersistResult::Committed)
        }
        // Dropping the transaction rolls it back, so the duplicate row attempt
        // leaves no state behind
        Err(e) if is_unique_violation(&e) => Ok(PersistResult::DuplicateConflict),
        Err(e) => Err(e),
    }
}

/// Determines if a sqlx::Error represents a uniqueness constraint violation
pub fn is_unique_violation(error: &SqlxError) -> bool {
    match error {
        SqlxError::Database(db_error) => {
            // Class 23 — Integrity Constraint Violation; 23505 = unique_violation
            // See: https://www.postgresql.org/docs/current/errcodes-appendix.html
            if let Some(code) = db_error.code() {
                code.as_ref() == "23505"
            } else {
                let msg = db_error.message().to_lowercase();
                msg.contains("duplicate key value") || msg.contains("unique constraint")
            }
        }
        _ => false,
    }
}
