//! Live integration tests for talentdb-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/talentdb-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use chrono::Utc;
use serde_json::json;
use talentdb_db::{
    count_people, count_profiles, get_person_by_external_id, get_profile_by_username,
    insert_person, insert_profile, language_distribution, list_pending_people,
    list_processed_experience_years, list_unprocessed_profiles, mark_profile_processed,
    profile_exists, quality_counts, search_query_stats, top_people_by_completion, top_skills,
    DbError, NewPerson,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn person<'a>(external_id: i64, username: &'a str, completion: f64, verified: bool) -> NewPerson<'a> {
    NewPerson {
        external_id,
        source_graph_id: "gg",
        display_name: username,
        username,
        headline: "Engineer",
        image_url: None,
        completion,
        verified,
        rank: 1.0,
        search_query: Some("rust"),
        collected_at: Utc::now(),
    }
}

async fn insert_processed_profile(
    pool: &sqlx::PgPool,
    username: &str,
    skills: &[&str],
    languages: &[&str],
    years: i32,
) {
    insert_profile(pool, username, &json!({}))
        .await
        .expect("insert_profile failed");
    let row = get_profile_by_username(pool, username)
        .await
        .expect("get_profile_by_username failed")
        .expect("profile must exist");
    let skills: Vec<String> = skills.iter().map(ToString::to_string).collect();
    let languages: Vec<String> = languages.iter().map(ToString::to_string).collect();
    mark_profile_processed(pool, row.id, &skills, &languages, years)
        .await
        .expect("mark_profile_processed failed");
}

// ---------------------------------------------------------------------------
// People
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn insert_person_reports_duplicate_external_id(pool: sqlx::PgPool) {
    assert!(insert_person(&pool, &person(1, "ada", 0.5, false))
        .await
        .expect("first insert"));
    assert!(!insert_person(&pool, &person(1, "ada", 0.5, false))
        .await
        .expect("second insert"));

    assert_eq!(count_people(&pool).await.expect("count"), 1);
    let row = get_person_by_external_id(&pool, 1)
        .await
        .expect("lookup")
        .expect("row exists");
    assert_eq!(row.username, "ada");
    assert_eq!(row.search_query.as_deref(), Some("rust"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn insert_person_surfaces_username_conflict(pool: sqlx::PgPool) {
    insert_person(&pool, &person(1, "ada", 0.5, false))
        .await
        .expect("first insert");

    let err = insert_person(&pool, &person(2, "ada", 0.5, false))
        .await
        .expect_err("username clash must fail");

    assert!(
        matches!(&err, DbError::Conflict { constraint } if constraint == "people_username_key"),
        "got: {err:?}"
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn completion_outside_unit_range_is_rejected(pool: sqlx::PgPool) {
    let err = insert_person(&pool, &person(1, "ada", 1.5, false))
        .await
        .expect_err("check constraint must fail");
    assert!(matches!(err, DbError::Sqlx(_)), "got: {err:?}");
}

#[sqlx::test(migrations = "../../migrations")]
async fn pending_people_excludes_collected_usernames(pool: sqlx::PgPool) {
    insert_person(&pool, &person(1, "ada", 0.5, false)).await.expect("insert");
    insert_person(&pool, &person(2, "grace", 0.5, false)).await.expect("insert");
    insert_person(&pool, &person(3, "linus", 0.5, false)).await.expect("insert");
    insert_profile(&pool, "grace", &json!({})).await.expect("profile");

    let pending = list_pending_people(&pool).await.expect("pending");
    let names: Vec<_> = pending.iter().map(|p| p.username.as_str()).collect();
    assert_eq!(names, vec!["ada", "linus"]);
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn insert_profile_is_suppressed_on_existing_username(pool: sqlx::PgPool) {
    assert!(insert_profile(&pool, "ada", &json!({"v": 1})).await.expect("insert"));
    assert!(!insert_profile(&pool, "ada", &json!({"v": 2})).await.expect("insert"));
    assert!(profile_exists(&pool, "ada").await.expect("exists"));
    assert!(!profile_exists(&pool, "grace").await.expect("exists"));

    let row = get_profile_by_username(&pool, "ada")
        .await
        .expect("lookup")
        .expect("row exists");
    assert_eq!(row.raw_payload, json!({"v": 1}));
    assert!(!row.processed);
    assert_eq!(count_profiles(&pool).await.expect("count"), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn mark_processed_flips_exactly_once(pool: sqlx::PgPool) {
    insert_profile(&pool, "ada", &json!({})).await.expect("insert");
    let pending = list_unprocessed_profiles(&pool).await.expect("list");
    assert_eq!(pending.len(), 1);
    let id = pending[0].id;

    let skills = vec!["Rust".to_string()];
    let languages = vec!["English".to_string()];
    assert!(mark_profile_processed(&pool, id, &skills, &languages, 4)
        .await
        .expect("first mark"));
    assert!(!mark_profile_processed(&pool, id, &[], &[], 9)
        .await
        .expect("second mark"));

    let row = get_profile_by_username(&pool, "ada")
        .await
        .expect("lookup")
        .expect("row exists");
    assert!(row.processed);
    assert!(row.processed_at.is_some());
    assert_eq!(row.skills, skills);
    assert_eq!(row.experience_years, 4);
    assert!(list_unprocessed_profiles(&pool).await.expect("list").is_empty());
}

// ---------------------------------------------------------------------------
// Read model
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn read_model_aggregates_seeded_corpus(pool: sqlx::PgPool) {
    insert_person(&pool, &person(1, "ada", 0.9, true)).await.expect("insert");
    insert_person(&pool, &person(2, "grace", 0.5, false)).await.expect("insert");
    insert_person(&pool, &person(3, "linus", 0.2, false)).await.expect("insert");

    insert_processed_profile(&pool, "ada", &["Rust", "SQL"], &["English"], 12).await;
    insert_processed_profile(&pool, "grace", &["SQL", "Go"], &["English", "Spanish"], 3).await;
    insert_profile(&pool, "linus", &json!({})).await.expect("insert");

    let skills = top_skills(&pool, 10).await.expect("top_skills");
    let labels: Vec<_> = skills.iter().map(|r| (r.label.as_str(), r.count)).collect();
    assert_eq!(labels, vec![("SQL", 2), ("Go", 1), ("Rust", 1)]);

    let languages = language_distribution(&pool).await.expect("languages");
    assert_eq!(languages[0].label, "English");
    assert_eq!(languages[0].count, 2);

    let mut years = list_processed_experience_years(&pool).await.expect("years");
    years.sort_unstable();
    assert_eq!(years, vec![3, 12]);

    let top = top_people_by_completion(&pool, 2).await.expect("top");
    assert_eq!(top[0].username, "ada");
    assert_eq!(top.len(), 2);

    let counts = quality_counts(&pool).await.expect("counts");
    assert_eq!(counts.total_people, 3);
    assert_eq!(counts.total_profiles, 3);
    assert_eq!(counts.verified_people, 1);
    assert_eq!(counts.processed_profiles, 2);

    let stats = search_query_stats(&pool, 10).await.expect("stats");
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].search_query, "rust");
    assert_eq!(stats[0].count, 3);
    assert_eq!(stats[0].verified_count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn top_skills_breaks_ties_by_name_and_truncates(pool: sqlx::PgPool) {
    insert_processed_profile(&pool, "ada", &["Rust", "Go", "Zig"], &[], 1).await;
    insert_processed_profile(&pool, "grace", &["Rust", "Elixir", "Ada"], &[], 1).await;

    let skills = top_skills(&pool, 3).await.expect("top_skills");
    let labels: Vec<_> = skills.iter().map(|r| (r.label.as_str(), r.count)).collect();

    assert_eq!(labels, vec![("Rust", 2), ("Ada", 1), ("Elixir", 1)]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn search_query_stats_keeps_the_largest_queries(pool: sqlx::PgPool) {
    let queries: Vec<String> = (0..12).map(|i| format!("query-{i:02}")).collect();
    let mut external_id = 0;
    for (i, query) in queries.iter().enumerate() {
        // query-00 gets one person, query-11 gets twelve.
        for _ in 0..=i {
            external_id += 1;
            let username = format!("user-{external_id}");
            let new_person = NewPerson {
                search_query: Some(query.as_str()),
                ..person(external_id, &username, 0.5, false)
            };
            insert_person(&pool, &new_person).await.expect("insert");
        }
    }

    let stats = search_query_stats(&pool, 10).await.expect("stats");

    assert_eq!(stats.len(), 10);
    assert_eq!(stats[0].search_query, "query-11");
    assert_eq!(stats[0].count, 12);
    assert_eq!(stats[9].search_query, "query-02");
    assert!(stats.iter().all(|s| s.search_query != "query-00"));
}
