use super::*;
use crate::config::StoreConfig;
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

impl RecordStore {
    /// Reads the four CSV files of an export from `dir`.
    pub fn load(dir: &Path, cfg: &StoreConfig) -> Result<Self> {
        if !dir.is_dir() {
            bail!("Data directory {} does not exist", dir.display());
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));

        pb.set_message(format!("Loading {}", cfg.actors_file));
        let actors = read_records(&dir.join(&cfg.actors_file), cfg, |a: &Actor| a.id.clone())?;

        pb.set_message(format!("Loading {}", cfg.commits_file));
        let commits = read_records(&dir.join(&cfg.commits_file), cfg, |c: &Commit| c.sha.clone())?;

        pb.set_message(format!("Loading {}", cfg.events_file));
        let events = read_records(&dir.join(&cfg.events_file), cfg, |e: &Event| e.id.clone())?;

        pb.set_message(format!("Loading {}", cfg.repos_file));
        let repos = read_records(&dir.join(&cfg.repos_file), cfg, |r: &Repo| r.id.clone())?;

        pb.finish_and_clear();

        info!(
            "Loaded {} actors, {} commits, {} events, {} repos from {}",
            actors.len(),
            commits.len(),
            events.len(),
            repos.len(),
            dir.display()
        );

        Ok(Self {
            actors,
            commits,
            events,
            repos,
        })
    }
}

/// Reads one CSV file into a map keyed by `key`. Columns are matched by
/// position, so the header names themselves are not significant.
fn read_records<T, K>(path: &Path, cfg: &StoreConfig, key: K) -> Result<HashMap<String, T>>
where
    T: DeserializeOwned,
    K: Fn(&T) -> String,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(cfg.has_headers)
        .delimiter(cfg.delimiter_byte()?)
        .flexible(false)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut records = HashMap::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("Malformed row in {}", path.display()))?;
        let record: T = row.deserialize(None).with_context(|| {
            format!(
                "Failed to parse record {} in {}",
                line + 1,
                path.display()
            )
        })?;
        records.insert(key(&record), record);
    }

    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_export(dir: &Path) {
        fs::write(dir.join("actors.csv"), "id,username\n111,Actor1\n112,Actor2\n").unwrap();
        fs::write(
            dir.join("commits.csv"),
            "sha,message,event_id\n221,\"Fix parser, again\",331\n222,Message 2,332\n",
        )
        .unwrap();
        fs::write(
            dir.join("events.csv"),
            "id,type,actor_id,repo_id\n331,PushEvent,111,441\n332,CreateEvent,,442\n",
        )
        .unwrap();
        fs::write(dir.join("repos.csv"), "id,name\n441,org/one\n442,org/two\n").unwrap();
    }

    #[test]
    fn loads_all_collections() {
        let dir = TempDir::new().unwrap();
        write_export(dir.path());

        let store = RecordStore::load(dir.path(), &StoreConfig::default()).unwrap();

        assert_eq!(store.actors.len(), 2);
        assert_eq!(store.commits["221"].message, "Fix parser, again");
        assert_eq!(store.events["331"].event_type, "PushEvent");
        assert_eq!(store.events["332"].actor_id, None);
        assert_eq!(store.events["332"].repo_id.as_deref(), Some("442"));
        assert_eq!(store.repos["441"].name, "org/one");
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        write_export(dir.path());
        fs::remove_file(dir.path().join("repos.csv")).unwrap();

        let err = RecordStore::load(dir.path(), &StoreConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("repos.csv"));
    }

    #[test]
    fn missing_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(RecordStore::load(&missing, &StoreConfig::default()).is_err());
    }

    #[test]
    fn honours_custom_delimiter_without_headers() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("actors.csv"), "111;Actor1\n").unwrap();
        fs::write(dir.path().join("commits.csv"), "221;msg;331\n").unwrap();
        fs::write(dir.path().join("events.csv"), "331;PushEvent;111;441\n").unwrap();
        fs::write(dir.path().join("repos.csv"), "441;org/one\n").unwrap();

        let cfg = StoreConfig {
            has_headers: false,
            delimiter: ";".to_string(),
            ..StoreConfig::default()
        };
        let store = RecordStore::load(dir.path(), &cfg).unwrap();

        assert_eq!(store.actors["111"].username, "Actor1");
        assert_eq!(store.commits["221"].event_id, "331");
    }
}
