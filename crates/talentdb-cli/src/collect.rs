//! Collection command handlers for the CLI.
//!
//! Per-item failures are counted in the printed summary; only a failure of
//! the whole run (bad input, search outage, unreadable pending set) is
//! returned as an error.

use clap::Subcommand;

use crate::CliCollector;

/// Sub-commands available under `collect`.
#[derive(Debug, Subcommand)]
pub enum CollectCommands {
    /// Search Torre and store every person found
    People {
        /// Free-text search query, recorded on each stored person
        #[arg(long)]
        query: String,
        /// Maximum number of people to request (1-100, defaults to 20)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Fetch and store full profiles for the given usernames
    Profiles {
        #[arg(required = true, num_args = 1..)]
        usernames: Vec<String>,
    },
    /// Fetch profiles for every stored person that has none yet
    Pending,
}

/// Runs a `collect` sub-command and prints its summary.
///
/// # Errors
///
/// Returns an error if the run as a whole fails.
pub(crate) async fn run_collect(
    collector: &CliCollector,
    command: CollectCommands,
) -> anyhow::Result<()> {
    match command {
        CollectCommands::People { query, limit } => {
            let summary = collector.collect_people(&query, limit).await?;
            println!(
                "query '{query}': found {}, saved {}, duplicates {}, errors {}",
                summary.found, summary.saved, summary.duplicates, summary.errors
            );
        }
        CollectCommands::Profiles { usernames } => {
            let summary = collector.collect_profiles(&usernames).await?;
            println!(
                "requested {}: saved {}, duplicates {}, errors {}",
                summary.requested, summary.saved, summary.duplicates, summary.errors
            );
        }
        CollectCommands::Pending => {
            let summary = collector.collect_pending_profiles().await?;
            if summary.pending == 0 {
                println!("all profiles have already been collected");
            } else {
                println!(
                    "pending {}: saved {}, errors {}",
                    summary.pending, summary.saved, summary.errors
                );
            }
        }
    }
    Ok(())
}
