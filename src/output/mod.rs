pub mod formatter;

pub use formatter::{
    format_csv, format_json, format_markdown, format_table, format_toml, format_value,
    should_use_colors, short_names,
};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;

use crate::model::NamedBuild;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns, colored on a terminal
    #[default]
    Table,
    Csv,
    Json,
    JsonPretty,
    Markdown,
    Toml,
}

/// Render builds in the requested format. Colors only apply to `Table`.
pub fn render(builds: &[NamedBuild], format: OutputFormat, use_colors: bool) -> Result<String> {
    let rendered = match format {
        OutputFormat::Table => format_table(builds, use_colors),
        OutputFormat::Csv => format_csv(builds),
        OutputFormat::Json => format_json(builds, false).context("Failed to serialize JSON")?,
        OutputFormat::JsonPretty => {
            format_json(builds, true).context("Failed to serialize JSON")?
        }
        OutputFormat::Markdown => format_markdown(builds),
        OutputFormat::Toml => format_toml(builds).context("Failed to serialize TOML")?,
    };
    Ok(rendered)
}

/// Write rendered output to a file atomically
///
/// The file is either fully replaced or left untouched.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    crate::config::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    if !content.ends_with('\n') {
        file.write_all(b"\n")
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_render_empty_json() {
        assert_eq!(render(&[], OutputFormat::Json, false).unwrap(), "[]");
    }

    #[test]
    fn test_render_table_ignores_colors_when_disabled() {
        let result = render(&[], OutputFormat::Table, false).unwrap();
        assert_eq!(result, "No builds found.");
    }

    #[test]
    fn test_write_output_replaces_file() {
        let path = env::temp_dir().join("kart_ranker_test_output.csv");
        let _ = fs::remove_file(&path);

        write_output(&path, "first").unwrap();
        write_output(&path, "second\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");

        let _ = fs::remove_file(&path);
    }
}
