use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::config::ColorScheme;
use crate::selection::BrushRect;
use crate::story::{build_story, StoryStep};
use crate::sync::{Dataset, Event, FilterInput, PlotPoint, RenderFrame, Synchronizer};

/// Slider movement per `[` / `]` press, in percent.
pub const SLIDER_STEP: f64 = 5.0;
const STATUS_TTL: Duration = Duration::from_secs(3);
/// Hover snaps to the nearest dot within this many cells.
const HOVER_REACH_CELLS: f64 = 2.0;

pub struct ExplorerState {
    pub sync: Synchronizer,
    pub story: Vec<StoryStep>,
    pub story_index: Option<usize>,
    pub scheme: ColorScheme,
    pub config_path: Option<PathBuf>,
    pub show_help: bool,
    pub search_mode: bool,
    pub search_query: String,
    pub status_message: Option<(String, Instant)>,
    /// Inner area of the plot widget from the last draw, in terminal cells.
    pub plot_rect: Rect,
    /// Brush start corner in plot pixels while the left button is held.
    pub drag_anchor: Option<(f64, f64)>,
}

impl ExplorerState {
    pub fn new(dataset: Dataset, scheme: ColorScheme, config_path: Option<PathBuf>) -> Self {
        let story = build_story(dataset.commits());
        Self {
            sync: Synchronizer::new(dataset),
            story,
            story_index: None,
            scheme,
            config_path,
            show_help: false,
            search_mode: false,
            search_query: String::new(),
            status_message: None,
            plot_rect: Rect::default(),
            drag_anchor: None,
        }
    }

    pub fn frame(&self) -> &RenderFrame {
        self.sync.frame()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Current status text, dropping it once it has been shown long enough.
    pub fn status(&mut self) -> Option<&str> {
        if let Some((_, at)) = &self.status_message {
            if at.elapsed() > STATUS_TTL {
                self.status_message = None;
            }
        }
        self.status_message.as_ref().map(|(m, _)| m.as_str())
    }

    /// Move through the story and put the cursor on the new step's commit.
    pub fn step_story(&mut self, delta: isize) {
        if self.story.is_empty() {
            return;
        }
        let last = self.story.len() - 1;
        let next = match self.story_index {
            None => 0,
            Some(i) => (i as isize + delta).clamp(0, last as isize) as usize,
        };
        self.story_index = Some(next);
        let at = self.story[next].cursor;
        self.sync.dispatch(Event::ScrollStep(at));
    }

    pub fn current_step(&self) -> Option<&StoryStep> {
        self.story_index.and_then(|i| self.story.get(i))
    }

    pub fn slider(&self) -> f64 {
        self.sync.state().filter.slider.unwrap_or(100.0)
    }

    pub fn nudge_slider(&mut self, delta: f64) {
        let next = (self.slider() + delta).clamp(0.0, 100.0);
        self.sync
            .dispatch(Event::SearchOrSlider(FilterInput::Slider(next)));
    }

    pub fn push_search(&mut self) {
        let query = self.search_query.clone();
        self.sync
            .dispatch(Event::SearchOrSlider(FilterInput::Search(query)));
    }

    /// Terminal cell to plot pixel coordinates, `None` outside the plot.
    pub fn cell_to_plot(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let r = self.plot_rect;
        if r.width == 0
            || r.height == 0
            || column < r.x
            || row < r.y
            || column >= r.x + r.width
            || row >= r.y + r.height
        {
            return None;
        }
        let area = self.sync.dataset().area();
        let fx = (f64::from(column - r.x) + 0.5) / f64::from(r.width);
        let fy = (f64::from(row - r.y) + 0.5) / f64::from(r.height);
        Some((fx * area.width, fy * area.height))
    }

    /// Plot pixels covered by one terminal cell, horizontally and vertically.
    fn cell_size(&self) -> (f64, f64) {
        let area = self.sync.dataset().area();
        let r = self.plot_rect;
        (
            area.width / f64::from(r.width.max(1)),
            area.height / f64::from(r.height.max(1)),
        )
    }

    pub fn begin_brush(&mut self, at: (f64, f64)) {
        self.drag_anchor = Some(at);
    }

    pub fn drag_brush(&mut self, to: (f64, f64)) {
        if let Some(anchor) = self.drag_anchor {
            self.sync.dispatch(Event::Brush(BrushRect::from_corners(anchor, to)));
        }
    }

    pub fn end_brush(&mut self, to: Option<(f64, f64)>) {
        if let Some(to) = to {
            self.drag_brush(to);
        }
        self.drag_anchor = None;
    }

    pub fn clear_brush(&mut self) {
        self.drag_anchor = None;
        self.sync.dispatch(Event::Brush(None));
    }

    pub fn hover_at(&mut self, at: (f64, f64)) {
        let (cw, ch) = self.cell_size();
        let nearest = nearest_point(&self.frame().points, at, (cw, ch))
            .filter(|(_, d)| *d <= HOVER_REACH_CELLS)
            .map(|(p, _)| p.id.clone());
        if nearest != self.sync.state().hover {
            self.sync.dispatch(Event::Hover(nearest));
        }
    }

    /// Walk the hover left or right through the dots in x order.
    pub fn cycle_hover(&mut self, delta: isize) {
        let mut points: Vec<&PlotPoint> = self.frame().points.iter().collect();
        if points.is_empty() {
            return;
        }
        points.sort_by(|a, b| a.cx.total_cmp(&b.cx));
        let current = self
            .sync
            .state()
            .hover
            .as_deref()
            .and_then(|id| points.iter().position(|p| p.id == id));
        let next = match current {
            Some(i) => (i as isize + delta).rem_euclid(points.len() as isize) as usize,
            None if delta < 0 => points.len() - 1,
            None => 0,
        };
        let id = points[next].id.clone();
        self.sync.dispatch(Event::Hover(Some(id)));
    }

    /// URL to copy: the hovered commit, else the current story step.
    pub fn focused_url(&self) -> Option<String> {
        let hovered = self.frame().tooltip.as_ref().and_then(|t| t.url.clone());
        hovered.or_else(|| self.current_step().and_then(|s| s.url.clone()))
    }
}

/// Nearest dot to `at`, with its distance measured in terminal cells.
fn nearest_point<'a>(
    points: &'a [PlotPoint],
    at: (f64, f64),
    cell: (f64, f64),
) -> Option<(&'a PlotPoint, f64)> {
    points
        .iter()
        .map(|p| {
            let dx = (p.cx - at.0) / cell.0;
            let dy = (p.cy - at.1) / cell.1;
            (p, (dx * dx + dy * dy).sqrt())
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::PlotArea;
    use crate::test_support::three_line_dataset;

    fn state() -> ExplorerState {
        let dataset = Dataset::new(three_line_dataset(), PlotArea::default());
        let mut s = ExplorerState::new(dataset, ColorScheme::Auto, None);
        s.plot_rect = Rect::new(0, 0, 100, 30);
        s
    }

    #[test]
    fn story_steps_move_the_cursor() {
        let mut s = state();
        s.step_story(1);
        assert_eq!(s.story_index, Some(0));
        assert_eq!(s.frame().selection_count, 1);
        s.step_story(1);
        assert_eq!(s.frame().selection_count, 2);
        s.step_story(5);
        assert_eq!(s.story_index, Some(1));
    }

    #[test]
    fn cells_map_to_plot_pixels() {
        let s = state();
        let (x, y) = s.cell_to_plot(0, 0).unwrap();
        assert!((x - 5.0).abs() < 1e-9);
        assert!((y - 10.0).abs() < 1e-9);
        assert!(s.cell_to_plot(100, 0).is_none());
    }

    #[test]
    fn drag_brushes_everything() {
        let mut s = state();
        s.begin_brush((0.0, 0.0));
        s.end_brush(Some((1000.0, 600.0)));
        assert_eq!(s.frame().selection_count, 2);
        assert!(s.drag_anchor.is_none());
        s.clear_brush();
        assert_eq!(s.frame().selection_count, 0);
    }

    #[test]
    fn hover_cycles_in_x_order() {
        let mut s = state();
        s.cycle_hover(1);
        assert_eq!(s.sync.state().hover.as_deref(), Some("a1"));
        s.cycle_hover(1);
        assert_eq!(s.sync.state().hover.as_deref(), Some("b2"));
        s.cycle_hover(1);
        assert_eq!(s.sync.state().hover.as_deref(), Some("a1"));
    }

    #[test]
    fn slider_nudges_stay_in_range() {
        let mut s = state();
        s.nudge_slider(SLIDER_STEP);
        assert_eq!(s.slider(), 100.0);
        for _ in 0..30 {
            s.nudge_slider(-SLIDER_STEP);
        }
        assert_eq!(s.slider(), 0.0);
        assert_eq!(s.frame().visible_count, 1);
    }
}
