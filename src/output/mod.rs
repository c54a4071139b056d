use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod reporter;
pub mod text;

pub use reporter::Reporter;

use crate::analysis::RankedSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "text" => OutputFormat::Text,
            _ => OutputFormat::Text,
        }
    }
}

pub fn add_file_extension(path: &str, format: &OutputFormat) -> String {
    let extension = match format {
        OutputFormat::Text => ".txt",
        OutputFormat::Json => ".json",
    };

    if path.ends_with(extension) {
        path.to_string()
    } else {
        format!("{}{}", path, extension)
    }
}

pub trait OutputGenerator {
    fn generate(&self, sections: &[RankedSection<'_>]) -> Result<String>;
}
