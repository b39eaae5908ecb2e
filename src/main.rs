use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use artisan_crm::config::AppConfig;
use artisan_crm::core::logging;
use artisan_crm::core::search::{SearchOptions, UniversalSearchEngine};
use artisan_crm::database::Database;

#[derive(Parser)]
#[command(name = "artisan-crm", version, about = "Artisan CRM universal search")]
struct Cli {
    /// Path to the SQLite database (overrides configuration)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search artisans and interventions with one query
    Search {
        /// Free-text query
        query: String,

        /// Maximum artisan results
        #[arg(long)]
        artisan_limit: Option<usize>,

        /// Maximum intervention results
        #[arg(long)]
        intervention_limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let db_path = cli.db.unwrap_or(config.database.path.clone());

    info!("artisan-crm v{} starting", artisan_crm::VERSION);

    let database = Database::new(&db_path).await?;
    let engine = UniversalSearchEngine::new(Arc::new(database), config.search.clone());

    match cli.command {
        Command::Search {
            query,
            artisan_limit,
            intervention_limit,
        } => {
            let options = SearchOptions {
                artisan_limit,
                intervention_limit,
            };
            let results = engine.universal_search(&query, options).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}
