// tests/pipeline.rs
//! End-to-end checks: CSV export on disk -> join -> aggregate -> rank.

use anyhow::Result;
use clap::Parser;
use octorank::cli::{self, Cli};
use octorank::config::StoreConfig;
use octorank::output::Reporter;
use octorank::{ActivityAnalyzer, Config, EntityKind, RankingError, RecordStore, SortKey};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// --- Helpers ---

fn write_csv(dir: &Path, name: &str, header: &str, rows: &[&str]) -> Result<()> {
    let mut body = String::from(header);
    body.push('\n');
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    fs::write(dir.join(name), body)?;
    Ok(())
}

/// Five actors, three repos. `dave` and `erin` tie on every counter.
fn sample_export() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let p = dir.path();

    write_csv(
        p,
        "actors.csv",
        "id,username",
        &["1,alice", "2,bob", "3,carol", "4,dave", "5,erin"],
    )?;
    write_csv(p, "repos.csv", "id,name", &["10,org/core", "11,org/web", "12,org/docs"])?;
    write_csv(
        p,
        "events.csv",
        "id,type,actor_id,repo_id",
        &[
            "100,PullRequestEvent,1,10",
            "101,PullRequestEvent,1,10",
            "102,PushEvent,1,11",
            "103,PullRequestEvent,2,10",
            "104,PullRequestEvent,2,11",
            "105,PullRequestEvent,2,11",
            "106,WatchEvent,3,12",
            "107,WatchEvent,4,12",
            "108,WatchEvent,5,12",
            "109,PushEvent,99,11",
            "110,ForkEvent,3,",
        ],
    )?;
    write_csv(
        p,
        "commits.csv",
        "sha,message,event_id",
        &[
            "a1,\"feat: parser, lexer\",100",
            "a2,fix,100",
            "a3,docs,101",
            "a4,wip,102",
            "a5,wip,102",
            "b1,init,103",
            "b2,more,104",
            "b3,more,105",
            "x1,ghost push,109",
            "x2,ghost push,109",
            "z9,lost,404",
        ],
    )?;

    Ok(dir)
}

fn ids(entries: &[&octorank::EntityStats]) -> Vec<String> {
    entries.iter().map(|e| e.id.clone()).collect()
}

// --- Scenarios ---

#[test]
fn ranks_users_by_pull_requests_then_commits() -> Result<()> {
    let dir = sample_export()?;
    let store = RecordStore::load(dir.path(), &StoreConfig::default())?;
    let analyzer = ActivityAnalyzer::new(&store, false);

    let top = analyzer.top_actors(&SortKey::parse(&["PullRequestEvent", "Commits"])?, 2);
    assert_eq!(ids(&top), vec!["2", "1"]);

    let top = analyzer.top_actors(&SortKey::parse(&["Commits"])?, 1);
    assert_eq!(ids(&top), vec!["1"]);
    assert_eq!(top[0].commit_count, 5);
    Ok(())
}

#[test]
fn dangling_actor_counts_only_for_repository() -> Result<()> {
    let dir = sample_export()?;
    let store = RecordStore::load(dir.path(), &StoreConfig::default())?;
    let analyzer = ActivityAnalyzer::new(&store, false);

    assert!(!analyzer.actors().contains_key("99"));
    let web = &analyzer.repos()["11"];
    assert_eq!(web.event_count("PushEvent"), 2);
    assert_eq!(web.commit_count, 6);

    // Event 110 has no repo but still belongs to carol.
    assert_eq!(analyzer.actors()["3"].event_count("ForkEvent"), 1);

    let report = analyzer.join_report();
    assert_eq!(report.dangling_actor_refs, 1);
    assert_eq!(report.dangling_repo_refs, 1);
    assert_eq!(report.orphan_commits, 1);
    Ok(())
}

#[test]
fn orphan_commits_never_reach_aggregates() -> Result<()> {
    let dir = sample_export()?;
    let store = RecordStore::load(dir.path(), &StoreConfig::default())?;
    let analyzer = ActivityAnalyzer::new(&store, false);

    let repo_commits: usize = analyzer.repos().values().map(|r| r.commit_count).sum();
    let actor_commits: usize = analyzer.actors().values().map(|a| a.commit_count).sum();
    assert_eq!(repo_commits, store.commits.len() - 1);
    assert_eq!(actor_commits, store.commits.len() - 3);
    Ok(())
}

#[test]
fn tied_entries_fill_their_slots() -> Result<()> {
    let dir = sample_export()?;
    let store = RecordStore::load(dir.path(), &StoreConfig::default())?;
    let analyzer = ActivityAnalyzer::new(&store, false);

    let top = analyzer.top_actors(&SortKey::parse(&["WatchEvent"])?, 3);
    let got: HashSet<_> = ids(&top).into_iter().collect();
    let want: HashSet<_> = ["3", "4", "5"].iter().map(|s| s.to_string()).collect();
    assert_eq!(got, want);
    Ok(())
}

#[test]
fn limit_boundaries() -> Result<()> {
    let dir = sample_export()?;
    let store = RecordStore::load(dir.path(), &StoreConfig::default())?;
    let analyzer = ActivityAnalyzer::new(&store, true);
    let key = SortKey::commits();

    assert!(analyzer.top_repos(&key, 0).is_empty());
    let all = analyzer.top_repos(&key, 50);
    assert_eq!(ids(&all), vec!["11", "10", "12"]);
    Ok(())
}

#[test]
fn invalid_selector_fails_before_ranking() {
    let err = SortKey::parse(&["PullRequestEvent", "stars"]).unwrap_err();
    assert_eq!(err, RankingError::InvalidField("stars".to_string()));
}

#[test]
fn invalid_selector_fails_before_loading() -> Result<()> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("no-such-export");
    let cli = Cli::try_parse_from([
        "octorank",
        "--data",
        missing.to_str().unwrap(),
        "users",
        "--sort",
        "stars",
    ])?;

    let err = cli::run(&cli, &Config::default()).unwrap_err();

    assert_eq!(
        err.downcast_ref::<RankingError>(),
        Some(&RankingError::InvalidField("stars".to_string()))
    );
    assert!(!err.to_string().contains("does not exist"));
    Ok(())
}

#[test]
fn repos_without_sort_rank_by_commits() -> Result<()> {
    let dir = sample_export()?;
    let report = dir.path().join("repos");
    let cli = Cli::try_parse_from([
        "octorank",
        "--data",
        dir.path().to_str().unwrap(),
        "--output",
        "json",
        "--output-file",
        report.to_str().unwrap(),
        "repos",
    ])?;

    cli::run(&cli, &Config::default())?;

    let json = fs::read_to_string(dir.path().join("repos.json"))?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value[0]["sort_fields"], serde_json::json!(["Commits"]));

    let commits: Vec<u64> = value[0]["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["commit_count"].as_u64().unwrap())
        .collect();
    assert!(!commits.is_empty());
    assert!(commits.windows(2).all(|w| w[0] >= w[1]), "{commits:?}");
    Ok(())
}

#[test]
fn summary_renders_as_json() -> Result<()> {
    let dir = sample_export()?;
    let store = RecordStore::load(dir.path(), &StoreConfig::default())?;
    let analyzer = ActivityAnalyzer::new(&store, false);

    let sections = analyzer.summary(1);
    let json = Reporter::new("json", None).render(&sections)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;

    assert_eq!(value.as_array().map(Vec::len), Some(3));
    assert_eq!(value[0]["entries"][0]["id"], "2");
    assert_eq!(value[1]["entries"][0]["name"], "org/web");
    assert_eq!(value[2]["entries"][0]["name"], "org/docs");
    assert_eq!(sections[0].kind, EntityKind::Actor);
    Ok(())
}
