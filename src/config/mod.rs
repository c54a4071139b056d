use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const ENV_PREFIX: &str = "OCTORANK";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub actors_file: String,
    pub commits_file: String,
    pub events_file: String,
    pub repos_file: String,
    pub has_headers: bool,
    pub delimiter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub default_limit: usize,
    /// Ranking used by `users` when no `--sort` is given
    pub default_sort: Vec<String>,
    /// Ranking used by `repos` when no `--sort` is given
    pub default_repo_sort: Vec<String>,
    pub parallel_processing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: String,
    pub color_output: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            actors_file: "actors.csv".to_string(),
            commits_file: "commits.csv".to_string(),
            events_file: "events.csv".to_string(),
            repos_file: "repos.csv".to_string(),
            has_headers: true,
            delimiter: ",".to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            default_sort: vec!["PullRequestEvent".to_string(), "Commits".to_string()],
            default_repo_sort: vec!["Commits".to_string()],
            parallel_processing: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            color_output: true,
        }
    }
}

impl StoreConfig {
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => bail!(
                "Delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ),
        }
    }
}

impl Config {
    /// Layers built-in defaults, an optional TOML/YAML/JSON file and
    /// `OCTORANK_*` environment variables, in that order.
    ///
    /// Nested keys use a double underscore, e.g.
    /// `OCTORANK_ANALYSIS__DEFAULT_LIMIT=25`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = ::config::Config::try_from(&Self::default())
            .context("Failed to seed configuration defaults")?;

        let mut builder = ::config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("analysis.default_sort")
                .with_list_parse_key("analysis.default_repo_sort"),
        );

        let config: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| match path {
                Some(p) => format!("Failed to load configuration from {}", p.display()),
                None => "Failed to load configuration".to_string(),
            })?;

        config.store.delimiter_byte()?;
        Ok(config)
    }
}
