//! Scales mapping commit attributes onto plot coordinates.
//!
//! A [`Projection`] is an immutable value computed from whichever commits are
//! currently visible; it is rebuilt whenever that collection changes instead of
//! being adjusted in place.

use crate::model::Commit;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub const RADIUS_RANGE: (f64, f64) = (2.0, 30.0);
const TIME_PADDING_RATIO: f64 = 0.02;
const SINGLE_INSTANT_PADDING_MS: f64 = 3_600_000.0;
const X_TICK_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 10.0,
            bottom: 30.0,
            left: 20.0,
        }
    }
}

/// Pixel-space rectangle the scatter plot is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for PlotArea {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: Margin::default(),
        }
    }
}

impl PlotArea {
    pub fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self { width, height, margin }
    }

    pub fn left(&self) -> f64 {
        self.margin.left
    }

    pub fn right(&self) -> f64 {
        self.width - self.margin.right
    }

    pub fn top(&self) -> f64 {
        self.margin.top
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.margin.bottom
    }

    pub fn usable_width(&self) -> f64 {
        self.right() - self.left()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// A degenerate domain maps everything to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 || !(d1 - d0).is_finite() {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// Square-root scale: the area of a circle with this radius grows linearly
/// with the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    inner: LinearScale,
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new((domain.0.max(0.0).sqrt(), domain.1.max(0.0).sqrt()), range),
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        self.inner.apply(value.max(0.0).sqrt())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain_ms: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new(domain_ms, range),
        }
    }

    pub fn domain_ms(&self) -> (f64, f64) {
        self.inner.domain
    }

    pub fn apply(&self, dt: &DateTime<FixedOffset>) -> f64 {
        self.inner.apply(dt.timestamp_millis() as f64)
    }

    pub fn invert(&self, px: f64) -> Option<DateTime<FixedOffset>> {
        instant_from_millis(self.inner.invert(px))
    }
}

fn instant_from_millis(ms: f64) -> Option<DateTime<FixedOffset>> {
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms.round() as i64).map(|dt| dt.fixed_offset())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// x: commit time, y: hour of day (0 at the bottom), r: lines touched.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub area: PlotArea,
    pub x: TimeScale,
    pub y: LinearScale,
    pub r: SqrtScale,
    empty: bool,
}

pub fn compute_projection<'a, I>(commits: I, area: &PlotArea) -> Projection
where
    I: IntoIterator<Item = &'a Commit>,
{
    let mut time_extent: Option<(i64, i64)> = None;
    let mut lines_extent: Option<(usize, usize)> = None;

    for commit in commits {
        let t = commit.datetime.timestamp_millis();
        time_extent = Some(match time_extent {
            None => (t, t),
            Some((lo, hi)) => (lo.min(t), hi.max(t)),
        });
        let n = commit.total_lines;
        lines_extent = Some(match lines_extent {
            None => (n, n),
            Some((lo, hi)) => (lo.min(n), hi.max(n)),
        });
    }

    let time_domain = match time_extent {
        None => (0.0, 0.0),
        Some((lo, hi)) => {
            let (lo, hi) = (lo as f64, hi as f64);
            let pad = if hi > lo {
                (hi - lo) * TIME_PADDING_RATIO
            } else {
                SINGLE_INSTANT_PADDING_MS
            };
            (lo - pad, hi + pad)
        }
    };
    let lines_domain = lines_extent
        .map(|(lo, hi)| (lo as f64, hi as f64))
        .unwrap_or((0.0, 0.0));

    Projection {
        area: *area,
        x: TimeScale::new(time_domain, (area.left(), area.right())),
        y: LinearScale::new((0.0, 24.0), (area.bottom(), area.top())),
        r: SqrtScale::new(lines_domain, RADIUS_RANGE),
        empty: time_extent.is_none(),
    }
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn project(&self, commit: &Commit) -> (f64, f64) {
        (self.x.apply(&commit.datetime), self.y.apply(commit.hour_frac))
    }

    pub fn radius(&self, commit: &Commit) -> f64 {
        self.r.apply(commit.total_lines as f64)
    }

    /// Every two hours, labelled `HH:00`.
    pub fn y_ticks(&self) -> Vec<Tick> {
        (0..=24)
            .step_by(2)
            .map(|h| Tick {
                position: self.y.apply(h as f64),
                label: crate::util::hour_label(h),
            })
            .collect()
    }

    pub fn x_ticks(&self) -> Vec<Tick> {
        if self.empty {
            return Vec::new();
        }
        let (lo, hi) = self.x.domain_ms();
        let step = (hi - lo) / (X_TICK_COUNT as f64 - 1.0);
        (0..X_TICK_COUNT)
            .filter_map(|i| {
                let ms = lo + step * i as f64;
                let at = instant_from_millis(ms)?;
                Some(Tick {
                    position: self.x.inner.apply(ms),
                    label: at.format("%b %-d").to_string(),
                })
            })
            .collect()
    }
}

/// Maps the full dataset's time extent onto a 0-100 slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressScale {
    inner: Option<LinearScale>,
}

impl ProgressScale {
    pub fn new(commits: &[Commit]) -> Self {
        let min = commits.iter().map(|c| c.datetime.timestamp_millis()).min();
        let max = commits.iter().map(|c| c.datetime.timestamp_millis()).max();
        let inner = match (min, max) {
            (Some(lo), Some(hi)) => Some(LinearScale::new((lo as f64, hi as f64), (0.0, 100.0))),
            _ => None,
        };
        Self { inner }
    }

    /// Latest instant shown at the given slider position; `None` without data.
    pub fn cursor_at(&self, progress: f64) -> Option<DateTime<FixedOffset>> {
        let scale = self.inner?;
        let progress = progress.clamp(0.0, 100.0);
        if scale.domain.0 == scale.domain.1 {
            return instant_from_millis(scale.domain.1);
        }
        instant_from_millis(scale.invert(progress))
    }

    pub fn progress_of(&self, dt: &DateTime<FixedOffset>) -> Option<f64> {
        self.inner.map(|s| s.apply(dt.timestamp_millis() as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::commit_at;

    #[test]
    fn hour_axis_is_inverted() {
        let area = PlotArea::default();
        let commits = vec![commit_at("a", "2024-01-01T09:00:00Z", 3)];
        let p = compute_projection(&commits, &area);
        assert_eq!(p.y.apply(0.0), area.bottom());
        assert_eq!(p.y.apply(24.0), area.top());
    }

    #[test]
    fn time_domain_is_padded_so_extremes_are_not_flush() {
        let area = PlotArea::default();
        let commits = vec![
            commit_at("a", "2024-01-01T09:00:00Z", 1),
            commit_at("b", "2024-01-05T09:00:00Z", 1),
        ];
        let p = compute_projection(&commits, &area);
        let (xa, _) = p.project(&commits[0]);
        let (xb, _) = p.project(&commits[1]);
        assert!(xa > area.left());
        assert!(xb < area.right());
        assert!(xa < xb);
    }

    #[test]
    fn single_commit_sits_in_the_middle() {
        let area = PlotArea::default();
        let commits = vec![commit_at("a", "2024-01-01T09:00:00Z", 5)];
        let p = compute_projection(&commits, &area);
        let (x, _) = p.project(&commits[0]);
        assert!((x - (area.left() + area.right()) / 2.0).abs() < 1e-6);
        assert_eq!(p.radius(&commits[0]), 16.0);
    }

    #[test]
    fn radius_area_is_linear_in_lines() {
        let area = PlotArea::default();
        let commits = vec![
            commit_at("a", "2024-01-01T09:00:00Z", 0),
            commit_at("b", "2024-01-02T09:00:00Z", 100),
        ];
        let p = compute_projection(&commits, &area);
        assert_eq!(p.radius(&commits[0]), 2.0);
        assert_eq!(p.radius(&commits[1]), 30.0);
        let quarter = p.r.apply(25.0);
        assert!((quarter - 16.0).abs() < 1e-9);
    }

    #[test]
    fn empty_collection_does_not_panic() {
        let p = compute_projection(std::iter::empty::<&Commit>(), &PlotArea::default());
        assert!(p.is_empty());
        assert!(p.x_ticks().is_empty());
        assert_eq!(p.y_ticks().len(), 13);
    }

    #[test]
    fn progress_scale_round_trips_endpoints() {
        let commits = vec![
            commit_at("a", "2024-01-01T00:00:00Z", 1),
            commit_at("b", "2024-01-11T00:00:00Z", 1),
        ];
        let scale = ProgressScale::new(&commits);
        assert_eq!(scale.cursor_at(0.0), Some(commits[0].datetime));
        assert_eq!(scale.cursor_at(100.0), Some(commits[1].datetime));
        assert_eq!(scale.progress_of(&commits[1].datetime), Some(100.0));
        assert!(ProgressScale::new(&[]).cursor_at(50.0).is_none());
    }
}
