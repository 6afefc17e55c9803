use clap::ValueEnum;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::error::CatalogError;

/// Naming of the second lookup table and its join table. The seed data calls
/// it `platforms`; older schema scripts created `categories` for the same
/// role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlatformTable {
    #[default]
    Platforms,
    Categories,
}

impl PlatformTable {
    pub fn table(self) -> &'static str {
        match self {
            PlatformTable::Platforms => "platforms",
            PlatformTable::Categories => "categories",
        }
    }

    pub fn join_table(self) -> &'static str {
        match self {
            PlatformTable::Platforms => "games_platforms",
            PlatformTable::Categories => "games_categories",
        }
    }

    pub fn join_column(self) -> &'static str {
        match self {
            PlatformTable::Platforms => "platforms_id",
            PlatformTable::Categories => "categories_id",
        }
    }
}

/// Table names in creation order. Deletion runs in reverse.
pub fn table_names(platforms: PlatformTable) -> [&'static str; 6] {
    [
        "developers",
        "games",
        "genres",
        platforms.table(),
        "games_genres",
        platforms.join_table(),
    ]
}

/// `CREATE TABLE IF NOT EXISTS` statements, parents before children.
pub fn schema_statements(platforms: PlatformTable) -> Vec<String> {
    vec![
        "CREATE TABLE IF NOT EXISTS developers (
            id INTEGER PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
            name VARCHAR ( 255 ) UNIQUE NOT NULL,
            description TEXT NOT NULL,
            followers INTEGER DEFAULT 0 CHECK (followers >= 0),
            founding_date DATE DEFAULT CURRENT_DATE CHECK (founding_date <= CURRENT_DATE)
        )"
        .to_string(),
        "CREATE TABLE IF NOT EXISTS games (
            id INTEGER PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
            title VARCHAR ( 255 ) UNIQUE NOT NULL,
            release_date TIMESTAMPTZ DEFAULT NOW(),
            description TEXT,
            rating DECIMAL(2, 1) CHECK (rating >= 0 AND rating <= 5),
            price DECIMAL (10, 2),
            created_at TIMESTAMPTZ DEFAULT NOW(),
            updated_at TIMESTAMPTZ DEFAULT NOW(),
            developer_id INTEGER NOT NULL REFERENCES developers (id)
        )"
        .to_string(),
        "CREATE TABLE IF NOT EXISTS genres (
            id INTEGER PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
            type VARCHAR ( 255 ) NOT NULL UNIQUE
        )"
        .to_string(),
        format!(
            "CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
            type VARCHAR ( 255 ) NOT NULL UNIQUE
        )",
            table = platforms.table()
        ),
        "CREATE TABLE IF NOT EXISTS games_genres (
            game_id INTEGER NOT NULL REFERENCES games (id),
            genres_id INTEGER NOT NULL REFERENCES genres (id),
            PRIMARY KEY (game_id, genres_id)
        )"
        .to_string(),
        format!(
            "CREATE TABLE IF NOT EXISTS {join} (
            game_id INTEGER NOT NULL REFERENCES games (id),
            {column} INTEGER NOT NULL REFERENCES {table} (id),
            PRIMARY KEY (game_id, {column})
        )",
            join = platforms.join_table(),
            column = platforms.join_column(),
            table = platforms.table()
        ),
    ]
}

/// Creates the catalog tables. Safe to run against an initialized database.
/// All statements share one transaction, so a failure leaves no partial schema.
pub async fn initialize_database(pool: &PgPool, platforms: PlatformTable) -> Result<(), CatalogError> {
    let mut tx = pool.begin().await.map_err(CatalogError::Connect)?;

    for statement in schema_statements(platforms) {
        debug!("Executing: {}", statement);
        sqlx::query(&statement)
            .execute(&mut *tx)
            .await
            .map_err(|e| CatalogError::statement("creating schema", statement.as_str(), e))?;
    }

    tx.commit()
        .await
        .map_err(|e| CatalogError::statement("committing schema", "COMMIT", e))?;

    info!(
        "Schema ready: {}",
        table_names(platforms).join(", ")
    );
    Ok(())
}
