use crate::error::{MetaError, Result};
use crate::fetch::read_source;
use crate::model::LineEdit;
use crate::util::{parse_offset, parse_timestamp, utc_offset};
use chrono::{DateTime, FixedOffset, TimeZone};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::io::Read;
use tracing::{debug, info};

/// Raw CSV record. Every column is optional here so that missing values are
/// reported by name instead of as an opaque deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
    commit: Option<String>,
    file: Option<String>,
    line: Option<String>,
    #[serde(rename = "type")]
    language: Option<String>,
    depth: Option<String>,
    length: Option<String>,
    author: Option<String>,
    date: Option<String>,
    time: Option<String>,
    timezone: Option<String>,
    datetime: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_count(row: usize, field: &'static str, value: Option<String>) -> Result<u32> {
    match non_empty(value) {
        None => Ok(0),
        Some(v) => v.parse::<u32>().map_err(|_| MetaError::InvalidField {
            row,
            field,
            value: v,
        }),
    }
}

impl RawRow {
    fn into_line_edit(self, row: usize) -> Result<LineEdit> {
        let commit = non_empty(self.commit).ok_or(MetaError::MissingField { row, field: "commit" })?;
        let raw_datetime =
            non_empty(self.datetime).ok_or(MetaError::MissingField { row, field: "datetime" })?;

        let timezone = non_empty(self.timezone).unwrap_or_default();
        let offset = if timezone.is_empty() {
            utc_offset()
        } else {
            parse_offset(&timezone).ok_or_else(|| MetaError::InvalidField {
                row,
                field: "timezone",
                value: timezone.clone(),
            })?
        };

        let datetime = parse_timestamp(&raw_datetime, offset).ok_or(MetaError::InvalidField {
            row,
            field: "datetime",
            value: raw_datetime,
        })?;

        let date = match non_empty(self.date) {
            Some(d) => {
                let combined = format!("{d}T00:00");
                parse_timestamp(&combined, offset).ok_or(MetaError::InvalidField {
                    row,
                    field: "date",
                    value: d,
                })?
            }
            None => midnight_of(&datetime),
        };

        Ok(LineEdit {
            commit,
            file: non_empty(self.file).unwrap_or_default(),
            line: parse_count(row, "line", self.line)?,
            language: non_empty(self.language).unwrap_or_default(),
            depth: parse_count(row, "depth", self.depth)?,
            length: parse_count(row, "length", self.length)?,
            author: non_empty(self.author).unwrap_or_default(),
            date,
            time: non_empty(self.time).unwrap_or_default(),
            timezone,
            datetime,
        })
    }
}

fn midnight_of(dt: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    dt.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| dt.offset().from_local_datetime(&naive).single())
        .unwrap_or(*dt)
}

/// Parse the whole export. The first malformed row aborts the load: aggregates
/// downstream assume a complete dataset.
pub fn parse_line_edits<R: Read>(reader: R) -> Result<Vec<LineEdit>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    let mut edits = Vec::new();
    for (idx, record) in rdr.deserialize::<RawRow>().enumerate() {
        let raw = record?;
        edits.push(raw.into_line_edit(idx + 1)?);
    }
    debug!(rows = edits.len(), "parsed line edits");
    Ok(edits)
}

/// Load the dataset from a path or URL, optionally with a spinner on stderr.
pub fn load_line_edits(source: &str, show_progress: bool) -> Result<Vec<LineEdit>> {
    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Loading {source}..."));
        Some(pb)
    } else {
        None
    };

    let text = read_source(source)?;
    let edits = parse_line_edits(text.as_bytes());

    if let Some(pb) = pb {
        match &edits {
            Ok(e) => pb.finish_with_message(format!("Loaded {} line edits", e.len())),
            Err(_) => pb.abandon_with_message("Load failed"),
        }
    }
    if let Ok(e) = &edits {
        info!(source, rows = e.len(), "dataset loaded");
    }
    edits
}
