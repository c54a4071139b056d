use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod loader;

/// Identifier shared by actors, events and repositories in the export
pub type RecordId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: RecordId,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    pub event_id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub event_type: String,
    pub actor_id: Option<RecordId>,
    pub repo_id: Option<RecordId>,
}

/// The four record collections of an export, keyed by natural identifier.
///
/// Fully populated before any join runs and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    pub actors: HashMap<RecordId, Actor>,
    pub commits: HashMap<String, Commit>,
    pub events: HashMap<RecordId, Event>,
    pub repos: HashMap<RecordId, Repo>,
}

impl RecordStore {
    /// Builds a store from already materialized records. Later duplicates win,
    /// the same way a reloaded CSV row would.
    pub fn from_records(
        actors: impl IntoIterator<Item = Actor>,
        commits: impl IntoIterator<Item = Commit>,
        events: impl IntoIterator<Item = Event>,
        repos: impl IntoIterator<Item = Repo>,
    ) -> Self {
        Self {
            actors: actors.into_iter().map(|a| (a.id.clone(), a)).collect(),
            commits: commits.into_iter().map(|c| (c.sha.clone(), c)).collect(),
            events: events.into_iter().map(|e| (e.id.clone(), e)).collect(),
            repos: repos.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
