use crate::model::Commit;
use crate::util::{format_full_date, format_short_time};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One step of the scroll narrative. Entering the step moves the cursor to
/// `cursor`, the step's commit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryStep {
    pub index: usize,
    pub commit_id: String,
    pub url: Option<String>,
    pub cursor: DateTime<FixedOffset>,
    pub total_lines: usize,
    pub files: usize,
    pub text: String,
}

/// Build the narrative from commits in display (datetime) order.
pub fn build_story(sorted: &[Commit]) -> Vec<StoryStep> {
    sorted
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let files = c.file_count();
            let what = if i > 0 {
                "another glorious commit"
            } else {
                "my first commit, and it was glorious"
            };
            let text = format!(
                "On {} at {}, I made {}. I edited {} lines across {} files. \
                 Then I looked over all I had made, and I saw that it was very good.",
                format_full_date(&c.datetime),
                format_short_time(&c.datetime),
                what,
                c.total_lines,
                files,
            );
            StoryStep {
                index: i,
                commit_id: c.id.clone(),
                url: c.url.clone(),
                cursor: c.datetime,
                total_lines: c.total_lines,
                files,
                text,
            }
        })
        .collect()
}
