mod collect;
mod report;
mod search;

use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use talentdb_core::AppConfig;
use talentdb_pipeline::{Analyzer, Collector, PacingPolicy, PgStore, TokioPacer};
use talentdb_torre::TorreClient;
use tracing_subscriber::EnvFilter;

use crate::collect::CollectCommands;

type CliCollector = Collector<TorreClient, PgStore, TokioPacer>;

#[derive(Debug, Parser)]
#[command(name = "talentdb-cli")]
#[command(about = "talentdb command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Collect people and profiles from Torre
    Collect {
        #[command(subcommand)]
        command: CollectCommands,
    },
    /// Derive skills, languages, and experience for unprocessed profiles
    Process,
    /// Show how many people still lack a stored profile
    Status,
    /// Print every analytical aggregate as JSON
    Insights,
    /// Print data quality metrics as JSON
    Stats,
    /// Print raw Torre profiles as JSON without storing them
    Fetch {
        #[arg(required = true, num_args = 1..)]
        usernames: Vec<String>,
    },
    /// Search Torre without storing anything
    Search {
        /// Free-text search query
        #[arg(long)]
        query: String,
        /// Maximum number of people to return
        #[arg(long, default_value = "5")]
        limit: u32,
        /// Only return verified people
        #[arg(long)]
        verified: bool,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("talentdb-cli: no command given; run with --help for usage");
        return Ok(());
    };

    let config = talentdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Db { command } => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    talentdb_db::ping(&pool).await?;
                    println!("database reachable");
                }
                DbCommands::Migrate => {
                    let applied = talentdb_db::run_migrations(&pool).await?;
                    tracing::info!(applied, "database migrations up to date");
                    println!("migrations applied: {applied}");
                }
            }
        }
        Commands::Collect { command } => {
            let collector = build_collector(&config, connect(&config).await?)?;
            collect::run_collect(&collector, command).await?;
        }
        Commands::Process => {
            let store = PgStore::new(connect(&config).await?);
            let summary = talentdb_pipeline::process_profiles(&store).await?;
            println!(
                "found {} unprocessed profiles: processed {}, errors {}",
                summary.found, summary.processed, summary.errors
            );
        }
        Commands::Status => {
            let collector = build_collector(&config, connect(&config).await?)?;
            report::run_status(&collector).await?;
        }
        Commands::Insights => {
            report::run_insights(&Analyzer::new(connect(&config).await?)).await?;
        }
        Commands::Stats => report::run_stats(&Analyzer::new(connect(&config).await?)).await?,
        Commands::Fetch { usernames } => {
            let pool = PgPoolOptions::new().connect_lazy(&config.database_url)?;
            let collector = build_collector(&config, pool)?;
            let profiles = collector.fetch_profiles(&usernames).await;
            tracing::info!(
                requested = usernames.len(),
                fetched = profiles.len(),
                "bulk profile fetch complete"
            );
            println!("{}", serde_json::to_string_pretty(&profiles)?);
        }
        Commands::Search {
            query,
            limit,
            verified,
        } => {
            let torre = torre_client(&config)?;
            search::run_search(&torre, &query, limit, verified).await?;
        }
    }

    Ok(())
}

async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = talentdb_db::PoolConfig::from_app_config(config);
    Ok(talentdb_db::connect_pool(&config.database_url, pool_config).await?)
}

fn torre_client(config: &AppConfig) -> anyhow::Result<TorreClient> {
    Ok(TorreClient::with_base_url(
        &config.torre_base_url,
        config.torre_request_timeout_secs,
        &config.torre_user_agent,
    )?)
}

fn build_collector(config: &AppConfig, pool: sqlx::PgPool) -> anyhow::Result<CliCollector> {
    Ok(Collector::new(
        torre_client(config)?,
        PgStore::new(pool),
        TokioPacer,
        PacingPolicy::from_app_config(config),
    ))
}
