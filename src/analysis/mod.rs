use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub mod aggregator;
pub mod analyzer;

pub use aggregator::{index_by_actor, index_by_repo, StatsTable};
pub use analyzer::ActivityAnalyzer;

use crate::ranking::SortKey;
use crate::store::RecordId;

/// Running totals for one actor or repository.
///
/// Event types are kept sorted so serialized reports are stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStats {
    pub id: RecordId,
    pub name: String,
    pub commit_count: usize,
    pub event_type_counts: BTreeMap<String, usize>,
}

pub type ActorStats = EntityStats;
pub type RepoStats = EntityStats;

impl EntityStats {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            commit_count: 0,
            event_type_counts: BTreeMap::new(),
        }
    }

    /// Counts one event of `event_type` carrying `commits` commits.
    pub fn record(&mut self, event_type: &str, commits: usize) {
        self.commit_count += commits;
        *self
            .event_type_counts
            .entry(event_type.to_string())
            .or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: &EntityStats) {
        self.commit_count += other.commit_count;
        for (event_type, count) in &other.event_type_counts {
            *self.event_type_counts.entry(event_type.clone()).or_insert(0) += count;
        }
    }

    pub fn event_count(&self, event_type: &str) -> usize {
        self.event_type_counts.get(event_type).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Actor,
    Repo,
}

impl EntityKind {
    pub fn plural_label(&self) -> &'static str {
        match self {
            EntityKind::Actor => "Users",
            EntityKind::Repo => "Repos",
        }
    }

    pub fn name_label(&self) -> &'static str {
        match self {
            EntityKind::Actor => "Username",
            EntityKind::Repo => "Name",
        }
    }
}

/// One ranked answer, ready for a reporter.
#[derive(Debug, Clone, Serialize)]
pub struct RankedSection<'a> {
    pub kind: EntityKind,
    pub limit: usize,
    pub sort_fields: Vec<String>,
    pub entries: Vec<&'a EntityStats>,
    #[serde(skip)]
    pub sort_key: SortKey,
}

impl<'a> RankedSection<'a> {
    pub fn new(kind: EntityKind, limit: usize, sort_key: &SortKey, entries: Vec<&'a EntityStats>) -> Self {
        Self {
            kind,
            limit,
            sort_fields: sort_key.field_names(),
            entries,
            sort_key: sort_key.clone(),
        }
    }

    pub fn title(&self) -> String {
        format!(
            "Top {} {} by {}",
            self.limit,
            self.kind.plural_label(),
            self.sort_key
        )
    }
}
