//! Project list: loading with fallbacks, year ordering, and the per-year pie.

use serde::{Deserialize, Deserializer, Serialize};
use std::f64::consts::TAU;

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_YEAR: &str = "Unknown";
pub const PLACEHOLDER_IMAGE: &str = "images/empty.svg";
pub const NO_DESCRIPTION: &str = "No description available.";

/// Years show up as numbers or strings in hand-written project files.
fn year_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawProject {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, deserialize_with = "year_as_string")]
    year: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub year: String,
    pub image: String,
    pub description: String,
}

fn filled(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

impl From<RawProject> for Project {
    fn from(raw: RawProject) -> Self {
        Self {
            title: filled(raw.title, UNTITLED),
            year: filled(raw.year, UNKNOWN_YEAR),
            image: filled(raw.image, PLACEHOLDER_IMAGE),
            description: filled(raw.description, NO_DESCRIPTION),
        }
    }
}

fn year_key(year: &str) -> Option<i64> {
    year.parse::<i64>().ok()
}

/// Newest first; unparseable years sink to the end, ties keep file order.
pub fn sort_by_year_desc(projects: &mut [Project]) {
    projects.sort_by(|a, b| match (year_key(&a.year), year_key(&b.year)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Parse a project list document. Anything that is not an array of objects
/// yields an empty list.
pub fn projects_from_json(value: serde_json::Value) -> Vec<Project> {
    let raws: Vec<RawProject> = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    };
    let mut projects: Vec<Project> = raws.into_iter().map(Project::from).collect();
    sort_by_year_desc(&mut projects);
    projects
}

/// Fetch a project list; failures are logged by the fetcher and give an empty list.
pub fn load_projects(source: &str) -> Vec<Project> {
    crate::fetch::fetch_json::<serde_json::Value>(source)
        .map(projects_from_json)
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: String,
}

pub const PASTEL1: [&str; 9] = [
    "#fbb4ae", "#b3cde3", "#ccebc5", "#decbe4", "#fed9a6", "#ffffcc", "#e5d8bd", "#fddaec",
    "#f2f2f2",
];

/// Count projects per year in first-seen order, then lay out slice angles
/// with the largest counts first (ties by position). Slices stay in
/// first-seen order in the returned list; colours follow that order.
pub fn year_pie(projects: &[Project]) -> Vec<PieSlice> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for p in projects {
        match counts.iter_mut().find(|(y, _)| *y == p.year) {
            Some((_, n)) => *n += 1,
            None => counts.push((p.year.clone(), 1)),
        }
    }

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|&a, &b| counts[b].1.cmp(&counts[a].1).then(a.cmp(&b)));

    let mut angles = vec![(0.0, 0.0); counts.len()];
    let mut at = 0.0;
    for idx in order {
        let sweep = if total == 0 {
            0.0
        } else {
            counts[idx].1 as f64 / total as f64 * TAU
        };
        angles[idx] = (at, at + sweep);
        at += sweep;
    }

    counts
        .into_iter()
        .zip(angles)
        .enumerate()
        .map(|(i, ((label, value), (start_angle, end_angle)))| PieSlice {
            label,
            value,
            start_angle,
            end_angle,
            color: PASTEL1[i % PASTEL1.len()].to_string(),
        })
        .collect()
}

/// Search query and selected pie slice, applied together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub query: String,
    pub year: Option<String>,
}

impl ProjectFilter {
    /// Clicking the selected slice again clears the year.
    pub fn toggle_year(&mut self, year: &str) {
        if self.year.as_deref() == Some(year) {
            self.year = None;
        } else {
            self.year = Some(year.to_string());
        }
    }

    pub fn apply(&self, projects: &[Project]) -> Vec<Project> {
        let query = self.query.to_lowercase();
        projects
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&query))
            .filter(|p| self.year.as_deref().map_or(true, |y| p.year == y))
            .cloned()
            .collect()
    }
}

pub fn heading(count: usize) -> String {
    format!("Projects ({count})")
}
