//! CLI command implementations
//!
//! Each submodule builds a serialisable report; [`render`] turns it into a
//! table or JSON document.

pub mod european;
pub mod lattice;
pub mod price;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// A command result that can be printed as a table
pub trait Report: Serialize {
    /// Label/value rows of the table view
    fn rows(&self) -> Vec<(&'static str, String)>;
}

/// Render a report in the requested format
pub fn render<R: Report>(report: &R, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(table(&report.rows())),
    }
}

fn table(rows: &[(&'static str, String)]) -> String {
    let key_width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, v)| v.chars().count())
        .max()
        .unwrap_or(0);

    let border = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}",
            left,
            "─".repeat(key_width + 2),
            mid,
            "─".repeat(value_width + 2),
            right
        )
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(border("┌", "┬", "┐"));
    for (key, value) in rows {
        lines.push(format!(
            "│ {:<kw$} │ {:>vw$} │",
            key,
            value,
            kw = key_width,
            vw = value_width
        ));
    }
    lines.push(border("└", "┴", "┘"));
    lines.join("\n")
}

fn fmt_price(value: f64) -> String {
    format!("{:.6}", value)
}

fn fmt_seed(seed: Option<u64>) -> String {
    seed.map_or_else(|| "entropy".to_string(), |s| s.to_string())
}
