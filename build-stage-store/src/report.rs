use tracing::{debug, error, info};

use crate::metrics_consts::{PIPELINE_ERRORS, RECORDS_STORED};
use crate::types::DecodeError;

/// Terminal classification of one pipeline invocation. Computed per message,
/// never stored.
#[derive(Debug)]
pub enum Outcome {
    Persisted { stage_id: String },
    Skipped,
    DuplicateRejected { stage_id: String },
    Failed(FailureKind),
}

#[derive(Debug)]
pub enum FailureKind {
    Malformed(DecodeError),
    Storage(sqlx::Error),
}

impl Outcome {
    /// The error counter label for this outcome, if it counts as an error.
    /// Duplicates are counted even though they are expected under
    /// at-least-once delivery.
    pub fn error_reason(&self) -> Option<&'static str> {
        match self {
            Outcome::Persisted { .. } | Outcome::Skipped => None,
            Outcome::DuplicateRejected { .. } => Some("duplicate"),
            Outcome::Failed(FailureKind::Malformed(_)) => Some("malformed"),
            Outcome::Failed(FailureKind::Storage(_)) => Some("storage"),
        }
    }
}

/// Emit the counter and log line for an outcome. Total over every variant and
/// infallible — this is the terminal boundary of the pipeline, nothing may
/// escape past it.
pub fn report(outcome: &Outcome) {
    if let Some(reason) = outcome.error_reason() {
        metrics::counter!(PIPELINE_ERRORS, &[("reason", reason)]).increment(1);
    }

    match outcome {
        Outcome::Skipped => {
            debug!("message carried no stage record, skipping");
        }
        Outcome::Persisted { stage_id } => {
            metrics::counter!(RECORDS_STORED).increment(1);
            info!(stage_id, "stored build stage record");
        }
        Outcome::DuplicateRejected { stage_id } => {
            error!(
                stage_id,
                "receiving duplicate build stage messages, insert rejected"
            );
        }
        Outcome::Failed(FailureKind::Malformed(e)) => {
            error!("failed to decode message: {e}");
        }
        Outcome::Failed(FailureKind::Storage(e)) => {
            error!("failed to store build stage record: {e}");
        }
    }
}
