use super::*;
use crate::store::{Event, RecordId};
use std::collections::HashMap;
use tracing::debug;

/// Joins events with their actor, repository and commits.
pub fn build_enriched_events<'a>(
    actors: &'a HashMap<RecordId, Actor>,
    commits: &'a HashMap<String, Commit>,
    events: &'a HashMap<RecordId, Event>,
    repos: &'a HashMap<RecordId, Repo>,
) -> HashMap<&'a str, EnrichedEvent<'a>> {
    build_enriched_events_with_report(actors, commits, events, repos).0
}

/// Same as [`build_enriched_events`], also counting the foreign keys that
/// did not resolve.
pub fn build_enriched_events_with_report<'a>(
    actors: &'a HashMap<RecordId, Actor>,
    commits: &'a HashMap<String, Commit>,
    events: &'a HashMap<RecordId, Event>,
    repos: &'a HashMap<RecordId, Repo>,
) -> (HashMap<&'a str, EnrichedEvent<'a>>, JoinReport) {
    let mut report = JoinReport {
        events: events.len(),
        ..JoinReport::default()
    };

    // Every event must exist before commits attach, since neither map has a
    // stable iteration order.
    let mut enriched: HashMap<&'a str, EnrichedEvent<'a>> = HashMap::with_capacity(events.len());
    for event in events.values() {
        let actor = event.actor_id.as_ref().and_then(|id| actors.get(id));
        let repo = event.repo_id.as_ref().and_then(|id| repos.get(id));

        if actor.is_none() {
            report.dangling_actor_refs += 1;
        }
        if repo.is_none() {
            report.dangling_repo_refs += 1;
        }

        let joined = EnrichedEvent {
            id: event.id.as_str(),
            event_type: event.event_type.as_str(),
            actor,
            repo,
            commits: Vec::new(),
        };
        enriched.insert(joined.id, joined);
    }

    for commit in commits.values() {
        match enriched.get_mut(commit.event_id.as_str()) {
            Some(event) => {
                event.commits.push(commit);
                report.attached_commits += 1;
            }
            None => {
                debug!("Dropping commit {} for unknown event {}", commit.sha, commit.event_id);
                report.orphan_commits += 1;
            }
        }
    }

    (enriched, report)
}
