pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod seed;

pub use crate::config::DatabaseSettings;
pub use crate::db::{initialize_database, PlatformTable};
pub use crate::error::CatalogError;
pub use crate::seed::{seed_database, Dataset, SeedSummary};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
