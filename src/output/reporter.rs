use super::*;
use crate::analysis::RankedSection;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use super::text::TextGenerator;

/// Writes ranked sections to stdout or, when given, to a file.
///
/// Files are always written without escape codes.
pub struct Reporter {
    format: OutputFormat,
    output_path: Option<PathBuf>,
    color: bool,
}

impl Reporter {
    pub fn new(format: &str, output_path: Option<&str>) -> Self {
        let format = OutputFormat::from(format);
        let output_path = output_path.map(|p| PathBuf::from(super::add_file_extension(p, &format)));

        Self {
            format,
            output_path,
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn render(&self, sections: &[RankedSection<'_>]) -> Result<String> {
        match self.format {
            OutputFormat::Text => {
                TextGenerator::new(self.color && self.output_path.is_none()).generate(sections)
            }
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(sections)?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    pub fn generate_report(&self, sections: &[RankedSection<'_>]) -> Result<()> {
        let content = self.render(sections)?;

        match &self.output_path {
            Some(path) => {
                fs::write(path, content)
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
                info!("Report saved to {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}
