use super::aggregator::{index_by_actor_parallel, index_by_repo_parallel};
use super::*;
use crate::events::{build_enriched_events_with_report, JoinReport};
use crate::ranking::{top_n, SortKey, WATCH_EVENT};
use crate::store::RecordStore;
use tracing::{debug, info, warn};

/// One query session over a loaded export: the actor and repository tables
/// folded from its joined events.
pub struct ActivityAnalyzer {
    actors: StatsTable,
    repos: StatsTable,
    join_report: JoinReport,
}

impl ActivityAnalyzer {
    pub fn new(store: &RecordStore, parallel: bool) -> Self {
        let (events, join_report) = build_enriched_events_with_report(
            &store.actors,
            &store.commits,
            &store.events,
            &store.repos,
        );

        debug!(
            "Joined {} events with {} commits",
            join_report.events, join_report.attached_commits
        );
        if join_report.has_gaps() {
            warn!(
                "Unresolved references: {} events without actor, {} events without repo, {} commits without event",
                join_report.dangling_actor_refs,
                join_report.dangling_repo_refs,
                join_report.orphan_commits
            );
        }

        let (actors, repos) = if parallel {
            rayon::join(
                || index_by_actor_parallel(&events),
                || index_by_repo_parallel(&events),
            )
        } else {
            (index_by_actor(&events), index_by_repo(&events))
        };

        info!(
            "Aggregated activity for {} actors and {} repos",
            actors.len(),
            repos.len()
        );

        Self {
            actors,
            repos,
            join_report,
        }
    }

    pub fn actors(&self) -> &StatsTable {
        &self.actors
    }

    pub fn repos(&self) -> &StatsTable {
        &self.repos
    }

    pub fn join_report(&self) -> JoinReport {
        self.join_report
    }

    pub fn top_actors(&self, key: &SortKey, limit: usize) -> Vec<&ActorStats> {
        rank(&self.actors, key, limit)
    }

    pub fn top_repos(&self, key: &SortKey, limit: usize) -> Vec<&RepoStats> {
        rank(&self.repos, key, limit)
    }

    pub fn rank_section(&self, kind: EntityKind, key: &SortKey, limit: usize) -> RankedSection<'_> {
        let entries = match kind {
            EntityKind::Actor => self.top_actors(key, limit),
            EntityKind::Repo => self.top_repos(key, limit),
        };
        RankedSection::new(kind, limit, key, entries)
    }

    /// Top contributors by pull requests then commits, top repositories by
    /// commits, and top repositories by watch events.
    pub fn summary(&self, limit: usize) -> Vec<RankedSection<'_>> {
        vec![
            self.rank_section(EntityKind::Actor, &SortKey::top_contributors(), limit),
            self.rank_section(EntityKind::Repo, &SortKey::commits(), limit),
            self.rank_section(EntityKind::Repo, &SortKey::event(WATCH_EVENT), limit),
        ]
    }
}

fn rank<'t>(table: &'t StatsTable, key: &SortKey, limit: usize) -> Vec<&'t EntityStats> {
    let ranked = top_n(table.values(), limit, |a, b| key.compare(a, b));
    debug!("Ranked {} of {} entries by {}", ranked.len(), table.len(), key);
    ranked
}
