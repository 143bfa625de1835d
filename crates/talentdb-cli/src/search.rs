use talentdb_torre::TorreClient;

const MAX_SEARCH_LIMIT: u32 = 100;

/// Searches Torre and prints one row per candidate. Nothing is stored.
///
/// # Errors
///
/// Returns an error if the arguments are out of range or the search fails.
pub(crate) async fn run_search(
    torre: &TorreClient,
    query: &str,
    limit: u32,
    verified: bool,
) -> anyhow::Result<()> {
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("query must be a non-empty string");
    }
    if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
        anyhow::bail!("limit must be between 1 and {MAX_SEARCH_LIMIT}");
    }

    let people = if verified {
        torre.search_verified_people(query, limit).await?
    } else {
        torre.search_people(query, limit).await?
    };

    if people.is_empty() {
        println!("no people found for '{query}'");
        return Ok(());
    }

    println!("{:<22}{:<11}{:<10}NAME", "USERNAME", "COMPLETE", "VERIFIED");
    for person in &people {
        println!(
            "{:<22}{:<11}{:<10}{}",
            person.username,
            format!("{}%", person.completion_percentage()),
            if person.verified { "yes" } else { "no" },
            person.name
        );
    }
    Ok(())
}
