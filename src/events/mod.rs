use crate::store::{Actor, Commit, Repo};
use serde::Serialize;

pub mod join;

pub use join::{build_enriched_events, build_enriched_events_with_report};

/// An event joined with its resolved actor, repository and commits.
///
/// Borrows from the record store it was built from; a `None` reference means
/// the foreign key did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedEvent<'a> {
    pub id: &'a str,
    pub event_type: &'a str,
    pub actor: Option<&'a Actor>,
    pub repo: Option<&'a Repo>,
    pub commits: Vec<&'a Commit>,
}

/// Resolution gaps observed while joining. None of them are errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JoinReport {
    pub events: usize,
    pub attached_commits: usize,
    pub dangling_actor_refs: usize,
    pub dangling_repo_refs: usize,
    pub orphan_commits: usize,
}

impl JoinReport {
    pub fn has_gaps(&self) -> bool {
        self.dangling_actor_refs + self.dangling_repo_refs + self.orphan_commits > 0
    }
}
