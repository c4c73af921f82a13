use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;

use crate::model::{Attribute, Category, NamedBuild};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a stat or score with at most two decimals, trailing zeros trimmed
/// ("3.75", "4", "0.5").
pub fn format_value(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

fn format_score_dev(value: Option<f64>) -> String {
    value.map(format_value).unwrap_or_default()
}

/// Compact name list for the table: first name, plus a count of the others
/// sharing the same stats.
pub fn short_names(names: &[String]) -> String {
    match names {
        [] => "-".to_string(),
        [only] => only.clone(),
        [first, rest @ ..] => format!("{} (+{})", first, rest.len()),
    }
}

fn joined_names(names: &[String]) -> String {
    names.join(" / ")
}

fn headers() -> Vec<String> {
    let mut headers = vec!["score".to_string(), "score_dev".to_string()];
    headers.extend(Category::ALL.iter().map(|c| c.as_str().to_string()));
    headers.extend(Attribute::ALL.iter().map(|a| a.as_str().to_string()));
    headers
}

fn stat_cells(build: &NamedBuild) -> impl Iterator<Item = String> + '_ {
    Attribute::ALL.iter().map(|a| format_value(build.stats[*a]))
}

/// Aligned table, one row per build, with a 1-based index column.
pub fn format_table(builds: &[NamedBuild], use_colors: bool) -> String {
    if builds.is_empty() {
        return "No builds found.".to_string();
    }

    let mut header = vec!["#".to_string()];
    header.extend(headers());

    let rows: Vec<Vec<String>> = builds
        .iter()
        .enumerate()
        .map(|(idx, build)| {
            let mut row = vec![
                format!("{}.", idx + 1),
                format_value(build.score),
                format_score_dev(build.score_dev),
            ];
            row.extend(Category::ALL.iter().map(|c| short_names(build.names(*c))));
            row.extend(stat_cells(build));
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|r| r[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    // Names are left-aligned, numbers right-aligned.
    let name_cols = 3..3 + Category::ALL.len();
    let pad = |col: usize, cell: &str| {
        if name_cols.contains(&col) {
            format!("{:<width$}", cell, width = widths[col])
        } else {
            format!("{:>width$}", cell, width = widths[col])
        }
    };

    let header_line = header
        .iter()
        .enumerate()
        .map(|(col, cell)| pad(col, cell))
        .collect::<Vec<_>>()
        .join("  ");

    let mut lines = Vec::with_capacity(rows.len() + 1);
    if use_colors {
        lines.push(header_line.bold().to_string());
    } else {
        lines.push(header_line);
    }

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let padded = pad(col, cell);
                if !use_colors {
                    return padded;
                }
                match col {
                    0 => padded.dimmed().to_string(),
                    1 => padded.bold().to_string(),
                    c if name_cols.contains(&c) => padded.cyan().to_string(),
                    _ => padded,
                }
            })
            .collect();
        lines.push(cells.join("  "));
    }

    lines.join("\n")
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Export row for csv and markdown. Values are written at full precision.
fn flat_row(build: &NamedBuild) -> Vec<String> {
    let mut row = vec![
        build.score.to_string(),
        build.score_dev.map(|v| v.to_string()).unwrap_or_default(),
    ];
    row.extend(Category::ALL.iter().map(|c| joined_names(build.names(*c))));
    row.extend(Attribute::ALL.iter().map(|a| build.stats[*a].to_string()));
    row
}

/// Comma-separated values with a header row. Name lists are joined with " / ".
pub fn format_csv(builds: &[NamedBuild]) -> String {
    std::iter::once(headers())
        .chain(builds.iter().map(flat_row))
        .map(|row| {
            row.iter()
                .map(|f| csv_field(f))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// GitHub-flavored markdown table.
pub fn format_markdown(builds: &[NamedBuild]) -> String {
    let header = headers();
    let mut lines = vec![
        format!("| {} |", header.join(" | ")),
        format!("|{}", "---|".repeat(header.len())),
    ];
    for build in builds {
        let cells: Vec<String> = flat_row(build)
            .into_iter()
            .map(|c| c.replace('|', "\\|"))
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }
    lines.join("\n")
}

pub fn format_json(builds: &[NamedBuild], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(builds)
    } else {
        serde_json::to_string(builds)
    }
}

#[derive(Serialize)]
struct TomlDocument<'a> {
    builds: &'a [NamedBuild],
}

/// TOML document with one `[[builds]]` table per build.
pub fn format_toml(builds: &[NamedBuild]) -> Result<String, toml::ser::Error> {
    toml::to_string(&TomlDocument { builds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Build, Stats};
    use crate::scoring::Weights;

    fn sample_build() -> NamedBuild {
        let stats = Stats::from_pairs([
            (Attribute::GroundSpeed, 4.25),
            (Attribute::Acceleration, 2.5),
        ]);
        let mut weights = Weights::default();
        weights.set(Attribute::GroundSpeed, 1.0);
        weights.set(Attribute::Acceleration, 1.0);
        NamedBuild::project(
            &Build::complete(0, 0, 0, 0, stats),
            [
                vec!["Mario".to_string(), "Tanooki Mario".to_string()],
                vec!["Pipe Frame".to_string()],
                vec!["Roller".to_string()],
                vec!["Cloud Glider, Parafoil".to_string()],
            ],
            &weights,
        )
    }

    fn unweighted_build() -> NamedBuild {
        NamedBuild::project(
            &Build::complete(0, 0, 0, 0, Stats::zero()),
            [
                vec!["Toad".to_string()],
                vec!["Standard Kart".to_string()],
                vec!["Standard".to_string()],
                vec!["Super Glider".to_string()],
            ],
            &Weights::default(),
        )
    }

    #[test]
    fn test_format_value_trims_zeros() {
        assert_eq!(format_value(3.75), "3.75");
        assert_eq!(format_value(4.0), "4");
        assert_eq!(format_value(0.5), "0.5");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(-0.001), "0");
    }

    #[test]
    fn test_short_names() {
        assert_eq!(short_names(&[]), "-");
        assert_eq!(short_names(&["Toad".to_string()]), "Toad");
        assert_eq!(
            short_names(&["Mario".to_string(), "Tanooki Mario".to_string()]),
            "Mario (+1)"
        );
    }

    #[test]
    fn test_format_table_empty() {
        assert_eq!(format_table(&[], false), "No builds found.");
    }

    #[test]
    fn test_format_table_rows() {
        let result = format_table(&[sample_build(), unweighted_build()], false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("score_dev"));
        assert!(lines[0].contains("invincibility"));
        assert!(lines[1].trim_start().starts_with("1."));
        assert!(lines[1].contains("Mario (+1)"));
        assert!(lines[1].contains("6.75"));
        assert!(lines[2].trim_start().starts_with("2."));
        // Every row is padded to the same width.
        assert_eq!(lines[1].chars().count(), lines[2].chars().count());
    }

    #[test]
    fn test_format_csv() {
        let result = format_csv(&[sample_build(), unweighted_build()]);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("score,score_dev,driver,vehicle,tyre,glider,ground_speed,"));
        let dev = sample_build().score_dev.unwrap();
        assert!(lines[1].starts_with(&format!(
            "6.75,{},Mario / Tanooki Mario,Pipe Frame,Roller,\"Cloud Glider, Parafoil\",4.25,",
            dev
        )));
        // Undefined deviation is an empty cell.
        assert!(lines[2].starts_with("0,,Toad,"));
    }

    #[test]
    fn test_exports_keep_full_precision() {
        let stats = Stats::from_pairs([
            (Attribute::GroundSpeed, 1.004),
            (Attribute::Weight, 0.004),
        ]);
        let mut weights = Weights::default();
        weights.set(Attribute::GroundSpeed, 1.0);
        weights.set(Attribute::Acceleration, 1.0);
        let build = NamedBuild::project(
            &Build::complete(0, 0, 0, 0, stats),
            [
                vec!["a".to_string()],
                vec!["b".to_string()],
                vec!["c".to_string()],
                vec!["d".to_string()],
            ],
            &weights,
        );
        let dev = build.score_dev.unwrap().to_string();

        let csv = format_csv(&[build.clone()]);
        let row = csv.lines().nth(1).unwrap();
        assert!(
            row.starts_with(&format!("1.004,{},a,b,c,d,1.004,0,0,0,0,0.004,", dev)),
            "{}",
            row
        );

        let markdown = format_markdown(&[build.clone()]);
        assert!(markdown.contains("| 1.004 |"));
        assert!(markdown.contains("| 0.004 |"));

        // The table stays rounded for display.
        let table = format_table(&[build], false);
        assert!(!table.contains("1.004"));
        assert!(!table.contains("0.004"));
    }

    #[test]
    fn test_format_csv_empty_has_header() {
        assert_eq!(format_csv(&[]).lines().count(), 1);
    }

    #[test]
    fn test_format_markdown() {
        let result = format_markdown(&[sample_build()]);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("| score | score_dev |"));
        assert!(lines[1].starts_with("|---|---|"));
        assert!(lines[2].contains("| Mario / Tanooki Mario |"));
    }

    #[test]
    fn test_format_json() {
        let result = format_json(&[sample_build()], false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        let first = &value[0];
        assert_eq!(first["score"], 6.75);
        assert_eq!(first["driver"][1], "Tanooki Mario");
        assert_eq!(first["ground_speed"], 4.25);
        assert!(first.get("driver_id").is_none());

        let pretty = format_json(&[unweighted_build()], true).unwrap();
        assert!(pretty.contains('\n'));
        assert!(!pretty.contains("score_dev"));
    }

    #[test]
    fn test_format_toml() {
        let result = format_toml(&[sample_build(), unweighted_build()]).unwrap();
        assert_eq!(result.matches("[[builds]]").count(), 2);
        assert!(result.contains("ground_speed = 4.25"));
        assert!(result.contains("driver = [\"Mario\", \"Tanooki Mario\"]"));
    }
}
