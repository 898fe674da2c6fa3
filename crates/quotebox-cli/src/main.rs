mod quotes;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "quotebox-cli")]
#[command(about = "quotebox command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the quote store and apply migrations (safe to repeat)
    Init,
    /// Store a single quote
    Add {
        /// Quote text; blank text is stored as the empty-text sentinel
        text: String,
    },
    /// Import quotes from a file in one atomic batch
    Import {
        /// JSON file holding `{"text": ...}` or `[{"text": ...}, ...]`
        file: PathBuf,

        /// Treat the file as plain text with one quote per non-blank line
        #[arg(long)]
        lines: bool,
    },
    /// List every stored quote
    List,
    /// Show one quote by id
    Get {
        id: i64,

        /// Also score the quote's sentiment
        #[arg(long)]
        score: bool,
    },
    /// Show a random quote
    Random {
        /// Also score the quote's sentiment
        #[arg(long)]
        score: bool,
    },
    /// Score arbitrary text without touching the store
    Score { text: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = quotebox_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(!config.env.is_production())
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("quotebox-cli ready; run with --help for commands");
        return Ok(());
    };

    match command {
        Commands::Init => quotes::run_init(&config).await,
        Commands::Add { text } => quotes::run_add(&config, text).await,
        Commands::Import { file, lines } => quotes::run_import(&config, &file, lines).await,
        Commands::List => quotes::run_list(&config).await,
        Commands::Get { id, score } => quotes::run_get(&config, id, score).await,
        Commands::Random { score } => quotes::run_random(&config, score).await,
        Commands::Score { text } => {
            quotes::print_sentiment(&text);
            Ok(())
        }
    }
}
