use super::*;
use crate::events::EnrichedEvent;
use rayon::prelude::*;

pub type StatsTable = HashMap<RecordId, EntityStats>;

type EventMap<'a> = HashMap<&'a str, EnrichedEvent<'a>>;

fn actor_of<'a>(event: &EnrichedEvent<'a>) -> Option<(&'a str, &'a str)> {
    event.actor.map(|a| (a.id.as_str(), a.username.as_str()))
}

fn repo_of<'a>(event: &EnrichedEvent<'a>) -> Option<(&'a str, &'a str)> {
    event.repo.map(|r| (r.id.as_str(), r.name.as_str()))
}

pub fn index_by_actor(events: &EventMap<'_>) -> StatsTable {
    index_by(events, actor_of)
}

pub fn index_by_repo(events: &EventMap<'_>) -> StatsTable {
    index_by(events, repo_of)
}

pub fn index_by_actor_parallel(events: &EventMap<'_>) -> StatsTable {
    par_index_by(events, actor_of)
}

pub fn index_by_repo_parallel(events: &EventMap<'_>) -> StatsTable {
    par_index_by(events, repo_of)
}

/// Folds events into one table keyed by whatever entity `entity_of` resolves.
/// Events it resolves to `None` are skipped.
fn index_by<'a, F>(events: &EventMap<'a>, entity_of: F) -> StatsTable
where
    F: Fn(&EnrichedEvent<'a>) -> Option<(&'a str, &'a str)>,
{
    let mut table = StatsTable::new();
    for event in events.values() {
        update_stats(&mut table, event, &entity_of);
    }
    table
}

fn par_index_by<'a, F>(events: &EventMap<'a>, entity_of: F) -> StatsTable
where
    F: Fn(&EnrichedEvent<'a>) -> Option<(&'a str, &'a str)> + Sync,
{
    events
        .par_iter()
        .fold(StatsTable::new, |mut table, (_, event)| {
            update_stats(&mut table, event, &entity_of);
            table
        })
        .reduce(StatsTable::new, merge_tables)
}

fn update_stats<'a, F>(table: &mut StatsTable, event: &EnrichedEvent<'a>, entity_of: &F)
where
    F: Fn(&EnrichedEvent<'a>) -> Option<(&'a str, &'a str)>,
{
    let Some((id, name)) = entity_of(event) else {
        return;
    };

    table
        .entry(id.to_string())
        .or_insert_with(|| EntityStats::new(id, name))
        .record(event.event_type, event.commits.len());
}

fn merge_tables(mut left: StatsTable, right: StatsTable) -> StatsTable {
    if left.len() < right.len() {
        return merge_tables(right, left);
    }
    for (id, stats) in right {
        match left.get_mut(&id) {
            Some(existing) => existing.merge(&stats),
            None => {
                left.insert(id, stats);
            }
        }
    }
    left
}
