use crate::model::{Commit, DatasetStats, LineEdit};
use chrono::Timelike;
use std::collections::{HashMap, HashSet};

/// Group line edits by commit id, keeping the order in which ids first appear.
///
/// Summary fields (author, date, time, timezone, datetime) come from the first
/// row of each group; rows of one commit are assumed to agree on them.
pub fn group_commits(edits: &[LineEdit], url_base: Option<&str>) -> Vec<Commit> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<LineEdit>> = Vec::new();

    for edit in edits {
        match index.get(edit.commit.as_str()) {
            Some(&i) => groups[i].push(edit.clone()),
            None => {
                index.insert(&edit.commit, groups.len());
                groups.push(vec![edit.clone()]);
            }
        }
    }

    groups
        .into_iter()
        .filter_map(|lines| {
            let first = lines.first()?.clone();
            Some(Commit {
                url: url_base.map(|base| commit_url(base, &first.commit)),
                hour_frac: hour_frac(&first),
                total_lines: lines.len(),
                id: first.commit,
                author: first.author,
                date: first.date,
                time: first.time,
                timezone: first.timezone,
                datetime: first.datetime,
                lines,
            })
        })
        .collect()
}

fn hour_frac(edit: &LineEdit) -> f64 {
    edit.datetime.hour() as f64 + edit.datetime.minute() as f64 / 60.0
}

pub fn commit_url(base: &str, id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), id)
}

/// Display order: ascending datetime, ties keep their grouping order.
pub fn sorted_by_datetime(commits: &[Commit]) -> Vec<Commit> {
    let mut sorted = commits.to_vec();
    sorted.sort_by(|a, b| a.datetime.cmp(&b.datetime));
    sorted
}

pub fn dataset_stats(edits: &[LineEdit], commits: &[Commit]) -> DatasetStats {
    if edits.is_empty() {
        return DatasetStats {
            commits: commits.len(),
            ..DatasetStats::default()
        };
    }

    let files: HashSet<&str> = edits.iter().map(|e| e.file.as_str()).collect();
    let max_depth = edits.iter().map(|e| e.depth).max().unwrap_or(0);
    let depth_sum: u64 = edits.iter().map(|e| e.depth as u64).sum();
    let avg_depth = depth_sum as f64 / edits.len() as f64;
    let avg_loc = if commits.is_empty() {
        0
    } else {
        (edits.len() as f64 / commits.len() as f64).round() as u64
    };

    DatasetStats {
        commits: commits.len(),
        total_loc: edits.len(),
        avg_loc_per_commit: avg_loc,
        files: files.len(),
        max_depth,
        avg_depth: (avg_depth * 10.0).round() / 10.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_line_edits;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<LineEdit> {
        let csv = "commit,file,line,type,depth,length,author,date,time,timezone,datetime\n\
b2,style.css,1,css,1,10,kim,2024-01-02,15:30,Z,2024-01-02T15:30\n\
a1,main.ts,1,ts,2,20,kim,2024-01-01,09:00,Z,2024-01-01T09:00\n\
a1,main.ts,2,ts,3,30,kim,2024-01-01,09:00,Z,2024-01-01T09:00\n";
        parse_line_edits(csv.as_bytes()).unwrap()
    }

    #[test]
    fn groups_in_first_seen_order() {
        let commits = group_commits(&sample(), None);
        let ids: Vec<&str> = commits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b2", "a1"]);
        assert_eq!(commits[1].total_lines, 2);
        assert_eq!(commits[1].lines.len(), 2);
        assert_eq!(commits[0].hour_frac, 15.5);
        assert_eq!(commits[1].hour_frac, 9.0);
    }

    #[test]
    fn sorting_is_by_datetime() {
        let sorted = sorted_by_datetime(&group_commits(&sample(), None));
        assert_eq!(sorted[0].id, "a1");
        assert_eq!(sorted[1].id, "b2");
    }

    #[test]
    fn url_is_joined_onto_base() {
        let commits = group_commits(&sample(), Some("https://github.com/me/site/commit/"));
        assert_eq!(
            commits[0].url.as_deref(),
            Some("https://github.com/me/site/commit/b2")
        );
    }

    #[test]
    fn serialized_summary_omits_line_detail() {
        let commits = group_commits(&sample(), None);
        let json = serde_json::to_value(&commits[1]).unwrap();
        assert!(json.get("lines").is_none());
        assert_eq!(json["total_lines"], 2);
    }

    #[test]
    fn stats_summarize_dataset() {
        let edits = sample();
        let commits = group_commits(&edits, None);
        let stats = dataset_stats(&edits, &commits);
        assert_eq!(
            stats,
            DatasetStats {
                commits: 2,
                total_loc: 3,
                avg_loc_per_commit: 2,
                files: 2,
                max_depth: 3,
                avg_depth: 2.0,
            }
        );
    }

    #[test]
    fn empty_dataset_stats_are_zero() {
        assert_eq!(dataset_stats(&[], &[]), DatasetStats::default());
    }
}
