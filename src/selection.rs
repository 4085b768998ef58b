use crate::model::Commit;
use crate::projection::Projection;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Brush rectangle in plot pixel space, normalized so `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    /// Build from two corners in any order. A zero-area rectangle is no
    /// selection at all, so it yields `None`.
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Option<Self> {
        let rect = Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        };
        if rect.x1 - rect.x0 <= 0.0 || rect.y1 - rect.y0 <= 0.0 {
            return None;
        }
        Some(rect)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// Raw `--brush x0,y0,x1,y1` corners. Zero area is a valid input and maps to
/// a cleared brush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushCorners {
    pub a: (f64, f64),
    pub b: (f64, f64),
}

impl BrushCorners {
    pub fn rect(&self) -> Option<BrushRect> {
        BrushRect::from_corners(self.a, self.b)
    }
}

impl std::str::FromStr for BrushCorners {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| format!("invalid brush '{s}': {e}"))?;
        match parts.as_slice() {
            [x0, y0, x1, y1] if parts.iter().all(|v| v.is_finite()) => Ok(Self {
                a: (*x0, *y0),
                b: (*x1, *y1),
            }),
            [_, _, _, _] => Err(format!("brush '{s}' must be finite")),
            _ => Err(format!("brush '{s}' needs four numbers: x0,y0,x1,y1")),
        }
    }
}

/// Whether `commit`, placed by `projection`, falls inside the brush. No brush
/// selects nothing.
pub fn is_commit_selected(brush: Option<&BrushRect>, projection: &Projection, commit: &Commit) -> bool {
    match brush {
        None => false,
        Some(rect) => {
            let (x, y) = projection.project(commit);
            rect.contains(x, y)
        }
    }
}

pub fn select_brushed<'a>(
    commits: &[&'a Commit],
    brush: Option<&BrushRect>,
    projection: &Projection,
) -> Vec<&'a Commit> {
    if brush.is_none() {
        return Vec::new();
    }
    commits
        .iter()
        .copied()
        .filter(|c| is_commit_selected(brush, projection, c))
        .collect()
}

pub fn select_until<'a>(commits: &[&'a Commit], cursor: &DateTime<FixedOffset>) -> Vec<&'a Commit> {
    commits
        .iter()
        .copied()
        .filter(|c| c.datetime <= *cursor)
        .collect()
}
