use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;

use game_catalog_db::cli::{self, ConnectionArgs, DatasetArgs};

/// Reset the game catalog tables and insert the seed dataset
#[derive(Parser)]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,
    #[command(flatten)]
    dataset: DatasetArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    game_catalog_db::init_tracing();

    cli::seed(&args.connection, &args.dataset).await
}
