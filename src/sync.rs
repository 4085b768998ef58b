//! View synchronization: a pure `reduce(state, event)` transition plus a pure
//! `render(state, dataset)` step producing everything a display surface draws.
//!
//! Brush and scroll cursor are mutually exclusive modes; whichever fired last
//! owns the selection. Search and slider input narrow the visible collection
//! under either mode. The projection is always computed against the visible
//! collection, never the whole dataset.

use crate::aggregate::sorted_by_datetime;
use crate::breakdown::{
    breakdown_with_fallback, file_entries, legend, Breakdown, FileEntry, LineSwatch, OrdinalColors,
};
use crate::model::Commit;
use crate::projection::{compute_projection, PlotArea, ProgressScale, Projection, Tick};
use crate::selection::{select_brushed, select_until, BrushRect};
use crate::util::{format_full_date, format_short_time};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The loaded commits in display order, plus the fixed inputs every render needs.
#[derive(Debug, Clone)]
pub struct Dataset {
    commits: Vec<Commit>,
    progress: ProgressScale,
    area: PlotArea,
}

impl Dataset {
    pub fn new(commits: Vec<Commit>, area: PlotArea) -> Self {
        let commits = sorted_by_datetime(&commits);
        let progress = ProgressScale::new(&commits);
        Self {
            commits,
            progress,
            area,
        }
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn area(&self) -> &PlotArea {
        &self.area
    }

    pub fn progress(&self) -> &ProgressScale {
        &self.progress
    }

    pub fn find(&self, id: &str) -> Option<&Commit> {
        self.commits.iter().find(|c| c.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Idle,
    /// Brush is the live mode; `None` means the brush was cleared.
    Brush { rect: Option<BrushRect> },
    Cursor { at: DateTime<FixedOffset> },
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Brush { .. } => "brush",
            Mode::Cursor { .. } => "cursor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewFilter {
    pub query: String,
    /// Time slider position in `[0, 100]`; `None` shows the full range.
    pub slider: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterInput {
    Search(String),
    Slider(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Brush(Option<BrushRect>),
    ScrollStep(DateTime<FixedOffset>),
    SearchOrSlider(FilterInput),
    Hover(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub mode: Mode,
    pub filter: ViewFilter,
    pub hover: Option<String>,
}

pub fn reduce(state: ViewState, event: &Event) -> ViewState {
    trace!(?event, "reduce");
    match event {
        Event::Brush(rect) => ViewState {
            mode: Mode::Brush { rect: *rect },
            ..state
        },
        Event::ScrollStep(at) => ViewState {
            mode: Mode::Cursor { at: *at },
            ..state
        },
        Event::SearchOrSlider(FilterInput::Search(query)) => ViewState {
            filter: ViewFilter {
                query: query.clone(),
                ..state.filter
            },
            ..state
        },
        Event::SearchOrSlider(FilterInput::Slider(progress)) => ViewState {
            filter: ViewFilter {
                slider: Some(progress.clamp(0.0, 100.0)),
                ..state.filter
            },
            ..state
        },
        Event::Hover(id) => ViewState {
            hover: id.clone(),
            ..state
        },
    }
}

pub fn reduce_all<'a, I>(state: ViewState, events: I) -> ViewState
where
    I: IntoIterator<Item = &'a Event>,
{
    events.into_iter().fold(state, reduce)
}

/// Commits passing the search/slider filter and, in cursor mode, the cursor.
pub fn visible_commits<'a>(state: &ViewState, dataset: &'a Dataset) -> Vec<&'a Commit> {
    let slider_max = state
        .filter
        .slider
        .and_then(|p| dataset.progress.cursor_at(p));
    let cursor = match state.mode {
        Mode::Cursor { at } => Some(at),
        _ => None,
    };

    let filtered: Vec<&Commit> = dataset
        .commits
        .iter()
        .filter(|c| c.matches_query(&state.filter.query))
        .filter(|c| slider_max.map_or(true, |max| c.datetime <= max))
        .collect();

    match cursor {
        Some(at) => select_until(&filtered, &at),
        None => filtered,
    }
}

/// The live selection over `visible`: brushed commits, the cursor set, or nothing.
pub fn active_selection<'a>(
    state: &ViewState,
    visible: &[&'a Commit],
    projection: &Projection,
) -> Vec<&'a Commit> {
    match &state.mode {
        Mode::Idle => Vec::new(),
        Mode::Brush { rect } => select_brushed(visible, rect.as_ref(), projection),
        Mode::Cursor { .. } => visible.to_vec(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub id: String,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub selected: bool,
    pub hovered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub id: String,
    pub url: Option<String>,
    pub author: String,
    pub date: String,
    pub time: String,
    pub lines_edited: usize,
}

impl Tooltip {
    pub fn for_commit(commit: &Commit) -> Self {
        Self {
            id: commit.id.clone(),
            url: commit.url.clone(),
            author: commit.author.clone(),
            date: format_full_date(&commit.datetime),
            time: format_short_time(&commit.datetime),
            lines_edited: commit.total_lines,
        }
    }
}

/// Everything a display surface needs for one update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub mode: Mode,
    pub visible_count: usize,
    /// Largest commits first so smaller dots are drawn on top.
    pub points: Vec<PlotPoint>,
    pub selection_count: usize,
    pub selection_label: String,
    pub breakdown: Breakdown,
    pub breakdown_is_fallback: bool,
    /// Colour per breakdown language, matching the file strip swatches.
    pub legend: Vec<LineSwatch>,
    pub files: Vec<FileEntry>,
    pub tooltip: Option<Tooltip>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub slider_max: Option<DateTime<FixedOffset>>,
}

pub fn selection_label(count: usize) -> String {
    if count == 0 {
        "No commits selected".to_string()
    } else {
        format!("{count} commits selected")
    }
}

pub fn render(state: &ViewState, dataset: &Dataset) -> RenderFrame {
    let visible = visible_commits(state, dataset);
    let projection = compute_projection(visible.iter().copied(), &dataset.area);
    let selection = active_selection(state, &visible, &projection);
    let (breakdown, breakdown_is_fallback) = breakdown_with_fallback(&selection, &dataset.commits);
    let mut colors = OrdinalColors::for_languages(&dataset.commits);
    let files = file_entries(visible.iter().copied(), &mut colors);
    let legend = legend(&breakdown, &mut colors);

    let mut ordered = visible.clone();
    ordered.sort_by(|a, b| b.total_lines.cmp(&a.total_lines));
    let points = ordered
        .iter()
        .map(|c| {
            let (cx, cy) = projection.project(c);
            PlotPoint {
                id: c.id.clone(),
                cx,
                cy,
                r: projection.radius(c),
                selected: selection.iter().any(|s| s.id == c.id),
                hovered: state.hover.as_deref() == Some(c.id.as_str()),
            }
        })
        .collect();

    let tooltip = state
        .hover
        .as_deref()
        .and_then(|id| dataset.find(id))
        .map(Tooltip::for_commit);

    RenderFrame {
        mode: state.mode,
        visible_count: visible.len(),
        points,
        selection_count: selection.len(),
        selection_label: selection_label(selection.len()),
        breakdown,
        breakdown_is_fallback,
        legend,
        files,
        tooltip,
        x_ticks: projection.x_ticks(),
        y_ticks: projection.y_ticks(),
        slider_max: state
            .filter
            .slider
            .and_then(|p| dataset.progress.cursor_at(p)),
    }
}

/// Single writer of view state: applies events in order and keeps the latest frame.
#[derive(Debug)]
pub struct Synchronizer {
    dataset: Dataset,
    state: ViewState,
    frame: RenderFrame,
}

impl Synchronizer {
    pub fn new(dataset: Dataset) -> Self {
        let state = ViewState::default();
        let frame = render(&state, &dataset);
        Self {
            dataset,
            state,
            frame,
        }
    }

    pub fn dispatch(&mut self, event: Event) -> &RenderFrame {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, &event);
        self.frame = render(&self.state, &self.dataset);
        &self.frame
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn projection(&self) -> Projection {
        let visible = visible_commits(&self.state, &self.dataset);
        compute_projection(visible.iter().copied(), &self.dataset.area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{commit_at, three_line_dataset};
    use chrono::DateTime;

    fn dataset() -> Dataset {
        Dataset::new(three_line_dataset(), PlotArea::default())
    }

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn idle_state_selects_nothing_and_falls_back() {
        let frame = render(&ViewState::default(), &dataset());
        assert_eq!(frame.selection_count, 0);
        assert_eq!(frame.selection_label, "No commits selected");
        assert!(frame.breakdown_is_fallback);
        assert_eq!(frame.breakdown.total_lines, 3);
        assert_eq!(frame.points.len(), 2);
    }

    #[test]
    fn cursor_before_everything_is_empty_with_full_breakdown() {
        let state = reduce(
            ViewState::default(),
            &Event::ScrollStep(ts("2023-12-31T00:00:00Z")),
        );
        let frame = render(&state, &dataset());
        assert_eq!(frame.visible_count, 0);
        assert!(frame.points.is_empty());
        assert_eq!(frame.selection_count, 0);
        assert!(frame.breakdown_is_fallback);
        assert_eq!(frame.breakdown.total_lines, 3);
    }

    #[test]
    fn cursor_after_everything_selects_all() {
        let state = reduce(
            ViewState::default(),
            &Event::ScrollStep(ts("2030-01-01T00:00:00Z")),
        );
        let frame = render(&state, &dataset());
        assert_eq!(frame.selection_count, 2);
        assert!(!frame.breakdown_is_fallback);
    }

    #[test]
    fn brush_after_cursor_takes_over() {
        let ds = dataset();
        let area = *ds.area();
        let full = BrushRect::from_corners((0.0, 0.0), (area.width, area.height));
        let state = reduce_all(
            ViewState::default(),
            &[
                Event::ScrollStep(ts("2024-01-01T12:00:00Z")),
                Event::Brush(full),
            ],
        );
        assert_eq!(state.mode.name(), "brush");
        let frame = render(&state, &ds);
        assert_eq!(frame.visible_count, 2);
        assert_eq!(frame.selection_count, 2);
    }

    #[test]
    fn zero_width_brush_selects_nothing() {
        let rect = BrushRect::from_corners((500.0, 0.0), (500.0, 600.0));
        let state = reduce(ViewState::default(), &Event::Brush(rect));
        let frame = render(&state, &dataset());
        assert_eq!(frame.selection_count, 0);
        assert!(frame.points.iter().all(|p| !p.selected));
    }

    #[test]
    fn search_narrows_visible_commits() {
        let state = reduce(
            ViewState::default(),
            &Event::SearchOrSlider(FilterInput::Search("STYLE".into())),
        );
        let frame = render(&state, &dataset());
        assert_eq!(frame.visible_count, 1);
        assert_eq!(frame.points[0].id, "b2");
        assert_eq!(frame.files.len(), 1);
        let css = frame.legend.iter().find(|s| s.language == "css").unwrap();
        assert_eq!(frame.files[0].swatches[0].color, css.color);
    }

    #[test]
    fn slider_at_zero_keeps_only_the_first_commit() {
        let state = reduce(
            ViewState::default(),
            &Event::SearchOrSlider(FilterInput::Slider(0.0)),
        );
        let frame = render(&state, &dataset());
        assert_eq!(frame.visible_count, 1);
        assert_eq!(frame.points[0].id, "a1");
    }

    #[test]
    fn hover_is_independent_of_selection() {
        let state = reduce_all(
            ViewState::default(),
            &[
                Event::ScrollStep(ts("2023-01-01T00:00:00Z")),
                Event::Hover(Some("b2".into())),
            ],
        );
        let frame = render(&state, &dataset());
        let tip = frame.tooltip.unwrap();
        assert_eq!(tip.id, "b2");
        assert_eq!(tip.lines_edited, 1);
        assert_eq!(tip.time, "3:30 PM");
    }

    #[test]
    fn cursor_narrowing_rescales_projection() {
        let ds = Dataset::new(
            vec![
                commit_at("a1", "2024-01-01T09:00:00Z", 1),
                commit_at("b2", "2024-01-05T09:00:00Z", 2),
                commit_at("c3", "2024-01-10T09:00:00Z", 4),
            ],
            PlotArea::default(),
        );
        let area = *ds.area();
        let point = |frame: &RenderFrame| {
            frame
                .points
                .iter()
                .find(|p| p.id == "b2")
                .cloned()
                .unwrap()
        };

        let full = point(&render(&ViewState::default(), &ds));
        let state = reduce(
            ViewState::default(),
            &Event::ScrollStep(ts("2024-01-05T09:00:00Z")),
        );
        let narrowed_frame = render(&state, &ds);
        assert_eq!(narrowed_frame.visible_count, 2);
        let narrowed = point(&narrowed_frame);

        // b2 is the latest visible commit, so it sits inside the 2% right pad.
        let right_edge = area.left() + area.usable_width() * 1.02 / 1.04;
        assert!((narrowed.cx - right_edge).abs() < 1e-6, "cx {}", narrowed.cx);
        assert!(full.cx < narrowed.cx);

        // Radius domain shrinks from 1..=4 lines to 1..=2, making b2 the largest dot.
        assert!((full.r - (2.0 + (2f64.sqrt() - 1.0) * 28.0)).abs() < 1e-9);
        assert_eq!(narrowed.r, 30.0);
    }

    #[test]
    fn points_are_largest_first() {
        let frame = render(&ViewState::default(), &dataset());
        assert_eq!(frame.points[0].id, "a1");
        assert!(frame.points[0].r > frame.points[1].r);
    }

    #[test]
    fn synchronizer_keeps_latest_frame() {
        let mut sync = Synchronizer::new(dataset());
        sync.dispatch(Event::ScrollStep(ts("2024-01-01T10:00:00Z")));
        assert_eq!(sync.frame().selection_count, 1);
        sync.dispatch(Event::Brush(None));
        assert_eq!(sync.frame().selection_count, 0);
        assert_eq!(sync.frame().visible_count, 2);
    }
}
