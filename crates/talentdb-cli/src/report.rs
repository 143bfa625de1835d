//! Read-only reporting commands.

use talentdb_pipeline::Analyzer;

use crate::CliCollector;

/// Prints collection progress.
///
/// # Errors
///
/// Returns an error if the counts cannot be read.
pub(crate) async fn run_status(collector: &CliCollector) -> anyhow::Result<()> {
    let status = collector.pending_profiles_status().await?;

    println!("{:<18}{}", "TOTAL PEOPLE", status.total_people);
    println!("{:<18}{}", "TOTAL PROFILES", status.total_profiles);
    println!("{:<18}{}", "PENDING", status.pending_profiles);
    println!("{:<18}{}%", "COMPLETED", status.completion_rate);
    Ok(())
}

/// Prints all aggregates as pretty JSON. Failed aggregates print as empty.
///
/// # Errors
///
/// Returns an error only if serialization fails.
pub(crate) async fn run_insights(analyzer: &Analyzer) -> anyhow::Result<()> {
    let insights = analyzer.insights().await;
    println!("{}", serde_json::to_string_pretty(&insights)?);
    Ok(())
}

/// Prints data quality metrics as pretty JSON.
///
/// # Errors
///
/// Returns an error only if serialization fails.
pub(crate) async fn run_stats(analyzer: &Analyzer) -> anyhow::Result<()> {
    let metrics = analyzer.data_quality_metrics().await;
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}
