use std::sync::Arc;
use std::time::Instant;

use sqlx::PgPool;

use crate::app_context::AppContext;
use crate::metrics_consts::{MESSAGES_RECEIVED, PERSIST_TIME};
use crate::report::{report, FailureKind, Outcome};
use crate::store::{persist, PersistResult};
use crate::types::{decode, Decoded};

pub mod app_context;
pub mod config;
pub mod error;
pub mod health;
pub mod kafka;
pub mod metrics_consts;
pub mod report;
pub mod server;
pub mod store;
pub mod types;

/// Run one payload through decode -> persist -> report, returning the outcome
/// that was reported. Every failure is classified and absorbed here; the
/// caller can rely on this never panicking and never returning an error.
///
/// Takes the pool rather than the full app context so tests can drive the
/// whole pipeline against a bare database.
pub async fn handle_message(pool: &PgPool, payload: &str) -> Outcome {
    let outcome = match decode(payload) {
        Ok(Decoded::Absent) => Outcome::Skipped,
        Ok(Decoded::Record(record)) => {
            let start = Instant::now();
            let result = persist(pool, &record).await;
            metrics::histogram!(PERSIST_TIME).record(start.elapsed().as_millis() as f64);

            match result {
                Ok(PersistResult::Committed) => Outcome::Persisted {
                    stage_id: record.stage_id,
                },
                Ok(PersistResult::DuplicateConflict) => Outcome::DuplicateRejected {
                    stage_id: record.stage_id,
                },
                Err(e) => Outcome::Failed(FailureKind::Storage(e)),
            }
        }
        Err(e) => Outcome::Failed(FailureKind::Malformed(e)),
    };

    report(&outcome);
    outcome
}

/// Pull messages one at a time and feed them through the pipeline, storing
/// each offset only after its message has been handled. A crash mid-message
/// leads to redelivery, which the persister absorbs as a duplicate conflict.
pub async fn consumer_loop(context: Arc<AppContext>) {
    loop {
        context.worker_liveness.report_healthy().await;

        let (payload, offset) = match context.kafka_consumer.text_recv().await {
            Ok(r) => r,
            Err(e) => {
                // We just panic if we fail to recv from kafka, if it's down, we're down
                panic!("Kafka error: {e:?}");
            }
        };
        metrics::counter!(MESSAGES_RECEIVED).increment(1);

        handle_message(&context.pool, &payload).await;

        // Panicking on offset store failure, same reasoning as the panic above
        offset.store().expect("Failed to store offset");
    }
}
