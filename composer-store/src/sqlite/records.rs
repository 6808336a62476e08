use chrono::Utc;
use sqlx::SqlitePool;

use crate::store::{NewRunRecord, RunRecord, StoreError};

pub async fn insert_record(pool: &SqlitePool, record: NewRunRecord) -> Result<i64, StoreError> {
    let result = sqlx::query(
        r#"
INSERT INTO workflows (goal, plan_summary, apis_used, status, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&record.goal)
    .bind(&record.plan_summary)
    .bind(&record.apis_used)
    .bind(record.status.as_str())
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn fetch_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<RunRecord>, StoreError> {
    let rows = sqlx::query_as::<_, RunRecord>(
        r#"
SELECT id, goal, plan_summary, apis_used, status, created_at
FROM workflows
ORDER BY id DESC
LIMIT ?1
        "#,
    )
    .bind(limit.max(0))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
