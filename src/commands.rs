use crate::aggregate::{dataset_stats, group_commits};
use crate::cli::{CommonArgs, ViewArgs};
use crate::config::{load_config, save_theme, ColorScheme, MetaConfig};
use crate::error::MetaError;
use crate::loader::load_line_edits;
use crate::model::LineEdit;
use crate::output;
use crate::profile::{fetch_profile, profile_source};
use crate::projects::{load_projects, year_pie, ProjectFilter};
use crate::selection::select_until;
use crate::story::build_story;
use crate::svg::render_svg;
use crate::sync::{reduce_all, render, Dataset, Event, FilterInput, RenderFrame, ViewState};
use crate::util::{parse_timestamp, utc_offset};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use console::style;
use std::path::Path;
use tracing::info;

struct Loaded {
    config: MetaConfig,
    edits: Vec<LineEdit>,
    dataset: Dataset,
}

fn load(common: &CommonArgs) -> Result<Loaded> {
    let config = load_config(common.config.as_deref()).context("Failed to load config")?;
    let edits = load_line_edits(&common.data, common.progress)
        .with_context(|| format!("Failed to load line data from {}", common.data))?;
    let commits = group_commits(&edits, config.site.commit_url_base.as_deref());
    let dataset = Dataset::new(commits, config.plot.area());
    Ok(Loaded {
        config,
        edits,
        dataset,
    })
}

fn parse_until(until: &str) -> Result<DateTime<FixedOffset>> {
    parse_timestamp(until, utc_offset())
        .ok_or_else(|| MetaError::InvalidDate(until.to_string()))
        .context("Failed to parse --until")
}

/// Turn command-line view filters into the event sequence the explorer would
/// have produced: filters, then the scroll cursor, then the brush.
pub fn view_events(view: &ViewArgs) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    if let Some(query) = &view.search {
        events.push(Event::SearchOrSlider(FilterInput::Search(query.clone())));
    }
    if let Some(progress) = view.slider {
        events.push(Event::SearchOrSlider(FilterInput::Slider(progress)));
    }
    if let Some(until) = &view.until {
        events.push(Event::ScrollStep(parse_until(until)?));
    }
    if let Some(corners) = view.brush {
        events.push(Event::Brush(corners.rect()));
    }
    Ok(events)
}

fn frame_for(dataset: &Dataset, events: &[Event]) -> RenderFrame {
    let state = reduce_all(ViewState::default(), events);
    render(&state, dataset)
}

pub fn stats(common: &CommonArgs, json: bool) -> Result<()> {
    let loaded = load(common)?;
    let stats = dataset_stats(&loaded.edits, loaded.dataset.commits());
    if json {
        output::stats_json(&common.data, &stats)
    } else {
        output::stats_table(&stats);
        Ok(())
    }
}

pub fn commits(common: &CommonArgs, until: Option<&str>, json: bool, ndjson: bool) -> Result<()> {
    let loaded = load(common)?;
    let all: Vec<_> = loaded.dataset.commits().iter().collect();
    let shown = match until {
        Some(u) => select_until(&all, &parse_until(u)?),
        None => all,
    };

    if json {
        output::commits_json(&common.data, until, &shown)
    } else if ndjson {
        output::output_ndjson(&shown)
    } else {
        output::commits_table(&shown);
        Ok(())
    }
}

pub fn breakdown(common: &CommonArgs, view: &ViewArgs, json: bool) -> Result<()> {
    let loaded = load(common)?;
    let frame = frame_for(&loaded.dataset, &view_events(view)?);
    if json {
        output::breakdown_json(&common.data, &frame)
    } else {
        output::breakdown_table(&frame);
        Ok(())
    }
}

pub fn plot(
    common: &CommonArgs,
    view: &ViewArgs,
    hover: Option<String>,
    theme: Option<ColorScheme>,
    out: Option<&Path>,
) -> Result<()> {
    let loaded = load(common)?;
    let mut events = view_events(view)?;
    if hover.is_some() {
        events.push(Event::Hover(hover));
    }
    let frame = frame_for(&loaded.dataset, &events);
    let scheme = theme.unwrap_or(loaded.config.theme);
    let svg = render_svg(&frame, loaded.dataset.area(), scheme);

    match out {
        Some(path) => {
            std::fs::write(path, svg)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), points = frame.points.len(), "plot written");
            eprintln!(
                "{} {} ({} commits, {})",
                style("Wrote").green(),
                path.display(),
                frame.visible_count,
                frame.selection_label
            );
            if let Some(tip) = &frame.tooltip {
                eprintln!(
                    "  {} by {} on {} at {} ({} lines)",
                    tip.id, tip.author, tip.date, tip.time, tip.lines_edited
                );
            }
        }
        None => print!("{svg}"),
    }
    Ok(())
}

pub fn story(common: &CommonArgs, json: bool) -> Result<()> {
    let loaded = load(common)?;
    let steps = build_story(loaded.dataset.commits());
    if json {
        output::story_json(&common.data, &steps)
    } else {
        output::story_text(&steps);
        Ok(())
    }
}

pub fn files(common: &CommonArgs, view: &ViewArgs, json: bool, ndjson: bool) -> Result<()> {
    let loaded = load(common)?;
    let frame = frame_for(&loaded.dataset, &view_events(view)?);
    if json {
        output::files_json(&common.data, view.until.as_deref(), &frame.files)
    } else if ndjson {
        output::output_ndjson(&frame.files)
    } else {
        output::files_table(&frame.files);
        Ok(())
    }
}

pub fn explore(common: &CommonArgs) -> Result<()> {
    let loaded = load(common)?;
    crate::tui::run(loaded.dataset, loaded.config, common.config.clone())
        .context("Explorer exited with an error")
}

pub fn projects(source: &str, query: Option<&str>, year: Option<&str>, json: bool) -> Result<()> {
    let all = load_projects(source);
    let filter = ProjectFilter {
        query: query.unwrap_or_default().to_string(),
        year: year.map(str::to_string),
    };
    let shown = filter.apply(&all);
    // The pie follows the search but not the year pick, so every year stays clickable.
    let searched = ProjectFilter {
        query: filter.query.clone(),
        year: None,
    }
    .apply(&all);
    let slices = year_pie(&searched);

    if json {
        output::projects_json(source, query, year, &shown, &slices)
    } else {
        output::projects_table(&shown, &slices, year);
        Ok(())
    }
}

pub fn profile(username: &str, api: &str, json: bool) -> Result<()> {
    let fetched = fetch_profile(api, username);
    if json {
        output::profile_json(&profile_source(api, username), fetched.as_ref())
    } else {
        output::profile_table(fetched.as_ref());
        Ok(())
    }
}

pub fn theme(common: &CommonArgs, scheme: Option<ColorScheme>) -> Result<()> {
    match scheme {
        Some(scheme) => {
            let path = save_theme(common.config.as_deref(), scheme)
                .context("Failed to save theme")?;
            println!(
                "{} {} ({})",
                style("Theme set to").green(),
                scheme.label(),
                path.display()
            );
        }
        None => {
            let config = load_config(common.config.as_deref()).context("Failed to load config")?;
            println!("{}", config.theme.key());
        }
    }
    Ok(())
}
