use rdkafka::error::KafkaError;
use thiserror::Error;

/// Startup-level failures. Pipeline failures never reach this type — they are
/// classified into an `Outcome` and reported in place.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    ConfigError(#[from] envconfig::Error),
    #[error("Kafka error: {0}")]
    KafkaError(#[from] KafkaError),
    #[error("Sqlx error: {0}")]
    SqlxError(#[from] sqlx::Error),
}
