//! Entry points shared by the `game-catalog-db`, `init_db` and `seed_db` binaries.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use sqlx::PgPool;
use tracing::info;

use crate::config::{redact, resolve_connection_string};
use crate::db::{self, queries, PlatformTable};
use crate::error::CatalogError;
use crate::seed::{seed_database, Dataset};

#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Postgres connection string; when omitted it is assembled from
    /// DB_USER, DB_PASSWORD, DB_HOST, DB_PORT and DB_NAME
    pub connection_string: Option<String>,

    /// Name of the platform lookup table and its join table
    #[arg(long, value_enum, default_value_t = PlatformTable::Platforms)]
    pub platform_table: PlatformTable,
}

#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// YAML file replacing the built-in catalog
    #[arg(long)]
    pub dataset: Option<PathBuf>,
}

impl DatasetArgs {
    /// Loads and validates the dataset before any connection is opened.
    pub fn load(&self) -> Result<Dataset, CatalogError> {
        let dataset = match &self.dataset {
            Some(path) => {
                info!("Loading dataset from {}", path.display());
                Dataset::from_yaml_file(path)?
            }
            None => Dataset::builtin(),
        };
        dataset.validate(Utc::now().date_naive())?;
        Ok(dataset)
    }
}

// Emits the structured error event before the error reaches anyhow.
fn logged<T>(result: Result<T, CatalogError>) -> Result<T, CatalogError> {
    result.map_err(|e| {
        e.log();
        e
    })
}

fn connection_string(args: &ConnectionArgs) -> Result<String, CatalogError> {
    logged(
        resolve_connection_string(args.connection_string.clone())
            .map_err(|e| CatalogError::Config(format!("{:#}", e))),
    )
}

async fn open(args: &ConnectionArgs) -> Result<PgPool> {
    let connection_string = connection_string(args)?;
    info!("Connecting to {}", redact(&connection_string));

    let pool = logged(db::connect(&connection_string).await)?;
    info!("Successfully connected to database");
    Ok(pool)
}

// The connection is released whether or not the run succeeded.
async fn finish<T>(pool: PgPool, result: Result<T, CatalogError>) -> Result<T> {
    pool.close().await;
    info!("Database connection closed");
    Ok(logged(result)?)
}

pub async fn init(args: &ConnectionArgs) -> Result<()> {
    let pool = open(args).await?;
    let result = db::initialize_database(&pool, args.platform_table).await;
    finish(pool, result).await?;
    info!("Database initialized successfully");
    Ok(())
}

pub async fn seed(args: &ConnectionArgs, dataset: &DatasetArgs) -> Result<()> {
    let dataset = logged(dataset.load())?;
    let pool = open(args).await?;
    let result = seed_database(&pool, &dataset, args.platform_table).await;
    finish(pool, result).await?;
    info!("Database seeded successfully");
    Ok(())
}

pub async fn setup(args: &ConnectionArgs, dataset: &DatasetArgs) -> Result<()> {
    let dataset = logged(dataset.load())?;
    let pool = open(args).await?;
    let result = match db::initialize_database(&pool, args.platform_table).await {
        Ok(()) => seed_database(&pool, &dataset, args.platform_table).await,
        Err(e) => Err(e),
    };
    finish(pool, result).await?;
    info!("Database initialized and seeded successfully");
    Ok(())
}

pub async fn status(args: &ConnectionArgs) -> Result<()> {
    let pool = open(args).await?;
    let result = queries::table_counts(&pool, args.platform_table).await;
    let counts = finish(pool, result).await?;

    let platforms = args.platform_table;
    println!("developers: {}", counts.developers);
    println!("games: {}", counts.games);
    println!("genres: {}", counts.genres);
    println!("{}: {}", platforms.table(), counts.platforms);
    println!("games_genres: {}", counts.game_genres);
    println!("{}: {}", platforms.join_table(), counts.game_platforms);
    Ok(())
}

pub async fn show(args: &ConnectionArgs, title: &str) -> Result<()> {
    let pool = open(args).await?;
    let result = queries::fetch_game_profile(&pool, title, args.platform_table).await;

    match finish(pool, result).await? {
        Some(profile) => {
            let game = &profile.game;
            println!("{} (#{})", game.title, game.id);
            println!("  developer: {}", profile.developer.name);
            if let Some(rating) = game.rating {
                println!("  rating: {}", rating);
            }
            if let Some(price) = game.price {
                println!("  price: {}", price);
            }
            println!("  genres: {}", profile.genres.join(", "));
            println!("  platforms: {}", profile.platforms.join(", "));
            Ok(())
        }
        None => Err(anyhow::anyhow!("No game titled {:?}", title)),
    }
}
