use crate::breakdown::{Breakdown, FileEntry};
use crate::model::{
    BreakdownOutput, Commit, CommitsOutput, DatasetStats, FilesOutput, ProfileOutput,
    ProjectsOutput, StatsOutput, StoryOutput, SCHEMA_VERSION,
};
use crate::profile::GitHubProfile;
use crate::projects::{heading, PieSlice, Project};
use crate::story::StoryStep;
use crate::sync::RenderFrame;
use crate::util::{format_percent, format_short_time};
use anyhow::Result;
use chrono::Utc;
use console::style;
use serde::Serialize;

fn print_pretty<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn output_ndjson<T: Serialize>(items: &[T]) -> Result<()> {
    for item in items {
        println!("{}", serde_json::to_string(item)?);
    }
    Ok(())
}

pub fn stats_json(source: &str, stats: &DatasetStats) -> Result<()> {
    print_pretty(&StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        stats: stats.clone(),
    })
}

pub fn stats_table(stats: &DatasetStats) {
    println!("{}", style("Summary").bold());
    println!("{}", "─".repeat(32));
    let rows = [
        ("Commits", stats.commits.to_string()),
        ("Total LOC", stats.total_loc.to_string()),
        ("Avg LOC per commit", stats.avg_loc_per_commit.to_string()),
        ("Files", stats.files.to_string()),
        ("Max depth", stats.max_depth.to_string()),
        ("Avg depth", format!("{:.1}", stats.avg_depth)),
    ];
    for (label, value) in rows {
        println!("{:<20} {}", style(label).dim(), style(value).cyan());
    }
}

pub fn commits_json(source: &str, until: Option<&str>, commits: &[&Commit]) -> Result<()> {
    print_pretty(&CommitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        until: until.map(str::to_string),
        commits: commits.iter().map(|c| (*c).clone()).collect(),
    })
}

pub fn commits_table(commits: &[&Commit]) {
    if commits.is_empty() {
        println!("No commits to display");
        return;
    }
    println!(
        "{:<12} {:<16} {:<28} {:>9} {:>6}",
        style("Commit").bold(),
        style("Author").bold(),
        style("When").bold(),
        style("Lines").bold(),
        style("Hour").bold()
    );
    println!("{}", "─".repeat(76));
    for c in commits {
        let short: String = c.id.chars().take(10).collect();
        let when = format!(
            "{} {}",
            c.datetime.format("%Y-%m-%d"),
            format_short_time(&c.datetime)
        );
        println!(
            "{:<12} {:<16} {:<28} {:>9} {:>6.2}",
            style(short).yellow(),
            truncate(&c.author, 16),
            when,
            style(c.total_lines).green(),
            c.hour_frac
        );
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

pub fn breakdown_json(source: &str, frame: &RenderFrame) -> Result<()> {
    print_pretty(&BreakdownOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        mode: frame.mode.name().to_string(),
        visible_count: frame.visible_count,
        selection_count: frame.selection_count,
        selection_label: frame.selection_label.clone(),
        fallback_to_full_dataset: frame.breakdown_is_fallback,
        breakdown: frame.breakdown.clone(),
    })
}

pub fn breakdown_table(frame: &RenderFrame) {
    println!("{}", style(&frame.selection_label).bold());
    if frame.breakdown_is_fallback {
        println!("{}", style("(showing all commits)").dim());
    }
    print_breakdown(&frame.breakdown);
}

fn print_breakdown(breakdown: &Breakdown) {
    if breakdown.is_empty() {
        println!("No lines to break down");
        return;
    }
    for share in &breakdown.languages {
        let bar_len = (share.proportion * 30.0).round() as usize;
        println!(
            "{:<10} {:>7} lines {:>7}  {}",
            share.language,
            share.count,
            format_percent(share.proportion),
            style("█".repeat(bar_len)).blue()
        );
    }
}

pub fn files_json(source: &str, until: Option<&str>, files: &[FileEntry]) -> Result<()> {
    print_pretty(&FilesOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        until: until.map(str::to_string),
        files: files.to_vec(),
    })
}

pub fn files_table(files: &[FileEntry]) {
    if files.is_empty() {
        println!("No files to display");
        return;
    }
    for file in files {
        let langs = file
            .languages
            .iter()
            .map(|(lang, n)| format!("{lang} {n}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:<40} {:>7} lines  {}",
            style(&file.name).cyan(),
            file.lines,
            style(langs).dim()
        );
    }
}

pub fn story_json(source: &str, steps: &[StoryStep]) -> Result<()> {
    print_pretty(&StoryOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        steps: steps.to_vec(),
    })
}

pub fn story_text(steps: &[StoryStep]) {
    if steps.is_empty() {
        println!("No commits, no story");
        return;
    }
    for step in steps {
        println!(
            "{} {}",
            style(format!("{:>3}.", step.index + 1)).dim(),
            step.text
        );
        if let Some(url) = &step.url {
            println!("     {}", style(url).underlined());
        }
    }
}

pub fn projects_json(
    source: &str,
    query: Option<&str>,
    year: Option<&str>,
    projects: &[Project],
    slices: &[PieSlice],
) -> Result<()> {
    print_pretty(&ProjectsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        query: query.map(str::to_string),
        year: year.map(str::to_string),
        projects: projects.to_vec(),
        slices: slices.to_vec(),
    })
}

pub fn projects_table(projects: &[Project], slices: &[PieSlice], selected_year: Option<&str>) {
    println!("{}", style(heading(projects.len())).bold());
    println!("{}", "─".repeat(40));
    for p in projects {
        println!("{} {}", style(&p.title).cyan().bold(), style(&p.year).dim());
        println!("  {}", p.description);
        println!("  {}", style(&p.image).dim());
    }

    if slices.is_empty() {
        return;
    }
    println!("\n{}", style("Legend").bold());
    for slice in slices {
        let marker = if selected_year == Some(slice.label.as_str()) {
            "●"
        } else {
            "○"
        };
        println!("  {} {} ({})", marker, slice.label, slice.value);
    }
}

pub fn profile_json(source: &str, profile: Option<&GitHubProfile>) -> Result<()> {
    print_pretty(&ProfileOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        profile: profile.cloned(),
    })
}

pub fn profile_table(profile: Option<&GitHubProfile>) {
    let Some(p) = profile else {
        println!("Profile unavailable");
        return;
    };
    println!("{}", style(p.name.as_deref().unwrap_or(p.login.as_str())).bold());
    println!("{}", "─".repeat(32));
    let rows = [
        ("Public repos", p.public_repos),
        ("Public gists", p.public_gists),
        ("Followers", p.followers),
        ("Following", p.following),
    ];
    for (label, value) in rows {
        println!("{:<20} {}", style(label).dim(), style(value).cyan());
    }
}
