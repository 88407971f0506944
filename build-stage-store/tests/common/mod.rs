use build_stage_store::types::BuildStageRecord;
use serde_json::Map;
use sqlx::PgPool;

#[allow(dead_code)] // not every test binary uses every helper
pub fn stage_record(stage_id: &str, status: &str) -> BuildStageRecord {
    BuildStageRecord {
        stage_id: stage_id.to_string(),
        status: status.to_string(),
        build_id: None,
        timestamp: None,
        duration_millis: None,
        metadata: Map::new(),
    }
}

pub async fn count_rows(pool: &PgPool, stage_id: &str) -> i64 {
    sqlx::query_scalar("SELECT count(*) FROM build_stage_record WHERE stage_id = $1")
        .bind(stage_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn count_all(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT count(*) FROM build_stage_record")
        .fetch_one(pool)
        .await
        .unwrap()
}
