pub const MESSAGES_RECEIVED: &str = "build_stage_store_messages_received";
pub const RECORDS_STORED: &str = "build_stage_store_records_stored";
pub const PIPELINE_ERRORS: &str = "build_stage_store_errors";
pub const PERSIST_TIME: &str = "build_stage_store_persist_time_ms";
