mod client;
mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::client::ApiClient;
use crate::commands::{DbCommands, ReviewArgs, SearchArgs};

#[derive(Debug, Parser)]
#[command(name = "gurume")]
#[command(about = "Restaurant search and staff reviews from the command line")]
struct Cli {
    /// Host of a running gurume-server (e.g. localhost:3000)
    #[arg(long, env = "GURUME_API_HOST", global = true)]
    host: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search shops and page through the results
    Search(SearchArgs),
    /// Show one shop with its staff reviews
    Shop {
        /// Upstream shop identifier (e.g. J001234567)
        id: String,
    },
    /// Record a staff review for a shop
    Review(ReviewArgs),
    /// List genre, budget, amenity and scene options
    Options,
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(std::env::var("GURUME_LOG_LEVEL").unwrap_or_else(|_| "warn".into()))
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search(args)) => {
            let client = ApiClient::new(cli.host.as_deref())?;
            commands::run_search(&client, args).await?;
        }
        Some(Commands::Shop { id }) => {
            let client = ApiClient::new(cli.host.as_deref())?;
            commands::run_shop(&client, &id).await?;
        }
        Some(Commands::Review(args)) => {
            let client = ApiClient::new(cli.host.as_deref())?;
            commands::run_review(&client, args).await?;
        }
        Some(Commands::Options) => commands::run_options(),
        Some(Commands::Db { command }) => commands::run_db(command).await?,
        None => println!("gurume: pass --help to list commands"),
    }

    Ok(())
}
