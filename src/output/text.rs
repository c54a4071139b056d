use super::*;
use crate::analysis::EntityStats;
use colored::*;
use std::fmt::Write;

/// Plain listing, one line per ranked entry with the values it was ranked by.
///
/// With `color` off no escape codes are written, whatever `colored` detects.
pub struct TextGenerator {
    color: bool,
}

impl TextGenerator {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: ColoredString) -> ColoredString {
        if self.color {
            text
        } else {
            text.clear()
        }
    }

    fn render_entry(
        &self,
        out: &mut String,
        rank: usize,
        section: &RankedSection<'_>,
        entry: &EntityStats,
    ) -> std::fmt::Result {
        write!(out, "{:>3}. ", rank)?;
        for field in section.sort_key.fields() {
            write!(
                out,
                "{}:{} ",
                self.paint(field.to_string().cyan()),
                self.paint(field.value(entry).to_string().bright_white().bold())
            )?;
        }
        writeln!(
            out,
            "ID:{} {}:{}",
            entry.id,
            section.kind.name_label(),
            self.paint(entry.name.green())
        )
    }
}

impl Default for TextGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl OutputGenerator for TextGenerator {
    fn generate(&self, sections: &[RankedSection<'_>]) -> Result<String> {
        let mut out = String::new();
        for section in sections {
            writeln!(out, "{}", self.paint(section.title().bright_cyan().bold()))?;
            writeln!(out, "---")?;
            if section.entries.is_empty() {
                writeln!(out, "{}", self.paint("(no entries)".dimmed()))?;
            }
            for (i, entry) in section.entries.iter().enumerate() {
                self.render_entry(&mut out, i + 1, section, entry)?;
            }
            writeln!(out, "---")?;
        }
        Ok(out)
    }
}
