use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;

use game_catalog_db::cli::{self, ConnectionArgs, DatasetArgs};

#[derive(Parser)]
#[command(about = "Create and seed the game catalog database")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the catalog tables if they do not exist
    Init {
        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Replace all catalog rows with the seed dataset
    Seed {
        #[command(flatten)]
        connection: ConnectionArgs,
        #[command(flatten)]
        dataset: DatasetArgs,
    },
    /// Run init followed by seed
    Setup {
        #[command(flatten)]
        connection: ConnectionArgs,
        #[command(flatten)]
        dataset: DatasetArgs,
    },
    /// Print row counts for every catalog table
    Status {
        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Print a game with its developer, genres and platforms
    Show {
        /// Game title, matched exactly
        title: String,
        #[command(flatten)]
        connection: ConnectionArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let args = Args::parse();

    game_catalog_db::init_tracing();

    match args.command {
        Command::Init { connection } => cli::init(&connection).await,
        Command::Seed { connection, dataset } => cli::seed(&connection, &dataset).await,
        Command::Setup { connection, dataset } => cli::setup(&connection, &dataset).await,
        Command::Status { connection } => cli::status(&connection).await,
        Command::Show { title, connection } => cli::show(&connection, &title).await,
    }
}
