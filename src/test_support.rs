use crate::aggregate::group_commits;
use crate::model::{Commit, LineEdit};
use chrono::DateTime;

pub(crate) fn edit(commit: &str, ts: &str, file: &str, language: &str) -> LineEdit {
    let datetime = DateTime::parse_from_rfc3339(ts).unwrap();
    LineEdit {
        commit: commit.to_string(),
        file: file.to_string(),
        line: 1,
        language: language.to_string(),
        depth: 0,
        length: 10,
        author: "kim".to_string(),
        date: datetime,
        time: datetime.format("%H:%M:%S").to_string(),
        timezone: datetime.format("%:z").to_string(),
        datetime,
    }
}

/// A commit touching `lines` lines of one Rust file.
pub(crate) fn commit_at(id: &str, ts: &str, lines: usize) -> Commit {
    let edits: Vec<LineEdit> = (0..lines).map(|_| edit(id, ts, "src/lib.rs", "rs")).collect();
    match group_commits(&edits, None).pop() {
        Some(c) => c,
        None => {
            let datetime = DateTime::parse_from_rfc3339(ts).unwrap();
            Commit {
                id: id.to_string(),
                url: None,
                author: "kim".to_string(),
                date: datetime,
                time: String::new(),
                timezone: String::new(),
                hour_frac: 0.0,
                datetime,
                total_lines: 0,
                lines: Vec::new(),
            }
        }
    }
}

/// The three-row dataset: `a1` (two ts lines, 09:00) and `b2` (one css line, 15:30).
pub(crate) fn three_line_dataset() -> Vec<Commit> {
    let edits = vec![
        edit("a1", "2024-01-01T09:00:00Z", "src/main.ts", "ts"),
        edit("a1", "2024-01-01T09:00:00Z", "src/main.ts", "ts"),
        edit("b2", "2024-01-02T15:30:00Z", "style.css", "css"),
    ];
    group_commits(&edits, None)
}
