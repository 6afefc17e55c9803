pub mod models;
pub mod queries;
pub mod schema;

#[cfg(test)]
mod test_helpers;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::CatalogError;

pub use schema::{initialize_database, PlatformTable};

/// Opens the single-connection pool every loader runs on.
pub async fn connect(connection_string: &str) -> Result<PgPool, CatalogError> {
    PgPoolOptions::new()
        .max_connections(1)
        .connect(connection_string)
        .await
        .map_err(CatalogError::Connect)
}
