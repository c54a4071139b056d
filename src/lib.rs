//! OctoRank joins a relational GitHub activity export (actors, repositories,
//! events, commits), folds it into per-actor and per-repository counters and
//! answers top-N queries under composite ranking rules.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod events;
pub mod output;
pub mod ranking;
pub mod store;

pub use analysis::{ActivityAnalyzer, EntityKind, EntityStats, RankedSection};
pub use config::Config;
pub use ranking::{top_n, RankingError, SortField, SortKey};
pub use store::RecordStore;
