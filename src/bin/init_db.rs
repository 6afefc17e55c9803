use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;

use game_catalog_db::cli::{self, ConnectionArgs};

/// Create the game catalog tables
#[derive(Parser)]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    game_catalog_db::init_tracing();

    cli::init(&args.connection).await
}
