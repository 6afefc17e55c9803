use anyhow::Result;
use dotenv::from_filename;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::schema::{initialize_database, PlatformTable};

/// A pool pinned to a throwaway schema, so tests can run in parallel
/// against one database.
pub struct TestDb {
    pub pool: PgPool,
    pub schema: String,
    admin: PgPool,
}

/// Returns `None` when no test database is configured.
pub async fn setup_test_db() -> Result<Option<TestDb>> {
    // Load test environment variables
    from_filename(".env.test").ok();

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping database test because DATABASE_URL is not set");
            return Ok(None);
        }
    };

    let admin = PgPool::connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    let schema = format!("catalog_test_{}", uuid::Uuid::new_v4().simple());
    sqlx::query(&format!("CREATE SCHEMA {}", schema))
        .execute(&admin)
        .await?;

    let search_path = format!("SET search_path TO {}", schema);
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .after_connect(move |conn, _meta| {
            let sql = search_path.clone();
            Box::pin(async move {
                sqlx::query(&sql).execute(&mut *conn).await?;
                Ok(())
            })
        })
        .connect(&database_url)
        .await?;

    Ok(Some(TestDb { pool, schema, admin }))
}

/// Like [`setup_test_db`], with the catalog tables already created.
pub async fn setup_catalog(platforms: PlatformTable) -> Result<Option<TestDb>> {
    let Some(db) = setup_test_db().await? else {
        return Ok(None);
    };
    initialize_database(&db.pool, platforms).await?;
    Ok(Some(db))
}

pub async fn cleanup_test_db(db: TestDb) -> Result<()> {
    db.pool.close().await;

    sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", db.schema))
        .execute(&db.admin)
        .await?;
    db.admin.close().await;

    Ok(())
}
