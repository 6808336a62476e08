use sqlx::SqlitePool;

use crate::store::StoreError;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StoreError> {
    let migrator = sqlx::migrate!("./migrations");
    migrator.run(pool).await?;
    Ok(())
}
