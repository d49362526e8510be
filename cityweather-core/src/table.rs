use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::{fmt::Write as _, str::FromStr};

use crate::{error::WeatherError, report::RowValue};

const COLUMN_GAP: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// Parse an optional stored setting; absent or blank means text.
    pub fn from_setting(value: Option<&str>) -> Result<Self, WeatherError> {
        match value.map(str::trim) {
            None | Some("") => Ok(OutputFormat::Text),
            Some(v) => v.parse(),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = WeatherError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(WeatherError::usage(format!(
                "unsupported output format '{value}'. Supported formats: text, json, csv."
            ))),
        }
    }
}

/// Rows of cells under a fixed set of headings.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headings: Vec<String>,
    rows: Vec<Vec<RowValue>>,
}

impl Table {
    pub fn new(headings: &[&str]) -> Self {
        Self {
            headings: headings.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; short rows are padded with empty cells, extra cells dropped.
    pub fn add_row(&mut self, mut cells: Vec<RowValue>) {
        cells.resize(self.headings.len(), RowValue::Text(String::new()));
        self.rows.push(cells);
    }

    pub fn rows(&self) -> &[Vec<RowValue>] {
        &self.rows
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.render_text(),
            OutputFormat::Json => self.render_json(),
            OutputFormat::Csv => self.render_csv(),
        }
    }

    fn render_text(&self) -> String {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();

        let widths: Vec<usize> = self
            .headings
            .iter()
            .enumerate()
            .map(|(col, heading)| {
                cells
                    .iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(heading.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let underline: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        let mut out = String::new();
        push_text_line(&mut out, self.headings.as_slice(), &widths);
        push_text_line(&mut out, underline.as_slice(), &widths);
        for row in &cells {
            push_text_line(&mut out, row.as_slice(), &widths);
        }
        out
    }

    fn render_json(&self) -> String {
        // Serializing plain strings and numbers cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default() + "\n"
    }

    fn render_csv(&self) -> String {
        let mut out = String::new();
        push_csv_line(&mut out, self.headings.iter().map(String::as_str));
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            push_csv_line(&mut out, cells.iter().map(String::as_str));
        }
        out
    }
}

/// A JSON array of objects keyed by heading, in column order.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Row<'a>(&'a [String], &'a [RowValue]);

        impl Serialize for Row<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (heading, value) in self.0.iter().zip(self.1) {
                    map.serialize_entry(heading, value)?;
                }
                map.end()
            }
        }

        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&Row(&self.headings, row))?;
        }
        seq.end()
    }
}

fn push_text_line<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let mut line = String::new();
    for (idx, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if idx > 0 {
            line.push_str(COLUMN_GAP);
        }
        let _ = write!(line, "{:<width$}", cell.as_ref(), width = *width);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn push_csv_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    let line: Vec<String> = cells.map(csv_field).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

fn csv_field(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
