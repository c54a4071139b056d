use crate::analysis::EntityStats;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

pub mod top_n;

pub use top_n::top_n;

pub const PULL_REQUEST_EVENT: &str = "PullRequestEvent";
pub const WATCH_EVENT: &str = "WatchEvent";
pub const PUSH_EVENT: &str = "PushEvent";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    #[error("invalid sort field {0:?}: expected \"Commits\" or an event type such as \"PullRequestEvent\"")]
    InvalidField(String),

    #[error("at least one sort field is required")]
    EmptySortKey,
}

/// A single numeric column of an aggregate that rankings can read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortField {
    Commits,
    EventType(String),
}

impl SortField {
    pub fn event(tag: impl Into<String>) -> Self {
        SortField::EventType(tag.into())
    }

    /// Parses one selector. Event types are open vocabulary, so anything
    /// shaped like `FooEvent` is accepted even if it never occurs.
    pub fn parse(raw: &str) -> Result<Self, RankingError> {
        let name = raw.trim();
        match name.to_ascii_lowercase().as_str() {
            "commits" | "commit" | "commit_count" => return Ok(SortField::Commits),
            "prs" => return Ok(SortField::event(PULL_REQUEST_EVENT)),
            "watches" => return Ok(SortField::event(WATCH_EVENT)),
            "pushes" => return Ok(SortField::event(PUSH_EVENT)),
            _ => {}
        }

        if event_tag_pattern().is_match(name) {
            Ok(SortField::event(name))
        } else {
            Err(RankingError::InvalidField(raw.to_string()))
        }
    }

    pub fn value(&self, stats: &EntityStats) -> usize {
        match self {
            SortField::Commits => stats.commit_count,
            SortField::EventType(tag) => stats.event_count(tag),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Commits => f.write_str("Commits"),
            SortField::EventType(tag) => f.write_str(tag),
        }
    }
}

fn event_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9]*Event$").expect("event tag pattern is valid")
    })
}

/// Lexicographic ranking rule over aggregates.
///
/// Fields are checked left to right; the first field on which two entries
/// differ decides, and the larger value ranks higher. Entries equal on every
/// field are tied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    fields: Vec<SortField>,
}

impl SortKey {
    pub fn new(fields: Vec<SortField>) -> Result<Self, RankingError> {
        if fields.is_empty() {
            return Err(RankingError::EmptySortKey);
        }
        Ok(Self { fields })
    }

    /// Builds a key from selector names. Entries may themselves be comma
    /// separated, so `["prs,commits"]` and `["prs", "commits"]` are the same.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, RankingError> {
        let fields = names
            .iter()
            .flat_map(|n| n.as_ref().split(','))
            .filter(|n| !n.trim().is_empty())
            .map(SortField::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(fields)
    }

    /// Pull requests first, commits as tie-breaker.
    pub fn top_contributors() -> Self {
        Self {
            fields: vec![SortField::event(PULL_REQUEST_EVENT), SortField::Commits],
        }
    }

    pub fn commits() -> Self {
        Self {
            fields: vec![SortField::Commits],
        }
    }

    pub fn event(tag: impl Into<String>) -> Self {
        Self {
            fields: vec![SortField::event(tag)],
        }
    }

    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(ToString::to_string).collect()
    }

    /// `Greater` means `a` ranks above `b`.
    pub fn compare(&self, a: &EntityStats, b: &EntityStats) -> Ordering {
        for field in &self.fields {
            match field.value(a).cmp(&field.value(b)) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        Ordering::Equal
    }

    pub fn is_higher_priority(&self, a: &EntityStats, b: &EntityStats) -> bool {
        self.compare(a, b) == Ordering::Greater
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.field_names().join(", "))
    }
}
