use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::breakdown::{Breakdown, FileEntry};
use crate::profile::GitHubProfile;
use crate::projects::{PieSlice, Project};
use crate::story::StoryStep;

pub const SCHEMA_VERSION: u32 = 1;

/// One row of the line-history export: a single line touched by a single commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineEdit {
    pub commit: String,
    pub file: String,
    pub line: u32,
    #[serde(rename = "type")]
    pub language: String,
    pub depth: u32,
    pub length: u32,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
}

/// Per-commit aggregate. `lines` holds the detail rows and is left out of
/// serialization and equality, so the summary can be emitted on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    #[serde(skip)]
    pub lines: Vec<LineEdit>,
}

impl PartialEq for Commit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.url == other.url
            && self.author == other.author
            && self.date == other.date
            && self.time == other.time
            && self.timezone == other.timezone
            && self.datetime == other.datetime
            && self.hour_frac == other.hour_frac
            && self.total_lines == other.total_lines
    }
}

impl Commit {
    /// Number of distinct files touched, in the order the rows list them.
    pub fn file_count(&self) -> usize {
        let mut seen: Vec<&str> = Vec::new();
        for line in &self.lines {
            if !seen.contains(&line.file.as_str()) {
                seen.push(&line.file);
            }
        }
        seen.len()
    }

    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.id.to_lowercase().contains(&query)
            || self.author.to_lowercase().contains(&query)
            || self
                .lines
                .iter()
                .any(|l| l.file.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub commits: usize,
    pub total_loc: usize,
    pub avg_loc_per_commit: u64,
    pub files: usize,
    pub max_depth: u32,
    pub avg_depth: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub stats: DatasetStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub until: Option<String>,
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub mode: String,
    pub visible_count: usize,
    pub selection_count: usize,
    pub selection_label: String,
    pub fallback_to_full_dataset: bool,
    pub breakdown: Breakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub until: Option<String>,
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub steps: Vec<StoryStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub profile: Option<GitHubProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub query: Option<String>,
    pub year: Option<String>,
    pub projects: Vec<Project>,
    pub slices: Vec<PieSlice>,
}
