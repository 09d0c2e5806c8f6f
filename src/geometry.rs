//! Page geometry: points, bounding boxes and transform anchors
//!
//! Page coordinates follow the print convention: x grows to the right and
//! y grows *upward*, so a box's `top` is numerically larger than its `bottom`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Move by `(dx, dy)`.
    pub fn translated(self, dx: f64, dy: f64) -> Point {
        Point { x: self.x + dx, y: self.y + dy }
    }

    /// Rotate counter-clockwise by `degrees` around `origin`.
    pub fn rotated_about(self, origin: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let rx = self.x - origin.x;
        let ry = self.y - origin.y;
        Point { x: origin.x + rx * cos - ry * sin, y: origin.y + rx * sin + ry * cos }
    }
}

/// Axis-aligned bounding box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Smallest box containing every point. Returns `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Bounds> {
        let first = points.first()?;
        let mut bounds = Bounds::new(first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            bounds.left = bounds.left.min(p.x);
            bounds.right = bounds.right.max(p.x);
            bounds.top = bounds.top.max(p.y);
            bounds.bottom = bounds.bottom.min(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            left: self.left.min(other.left),
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }

    /// The point of this box named by `anchor`.
    pub fn anchor_point(&self, anchor: Anchor) -> Point {
        let cx = (self.left + self.right) / 2.0;
        let cy = (self.top + self.bottom) / 2.0;
        match anchor {
            Anchor::Center => Point::new(cx, cy),
            Anchor::TopLeft => Point::new(self.left, self.top),
            Anchor::Top => Point::new(cx, self.top),
            Anchor::TopRight => Point::new(self.right, self.top),
            Anchor::Right => Point::new(self.right, cy),
            Anchor::BottomRight => Point::new(self.right, self.bottom),
            Anchor::Bottom => Point::new(cx, self.bottom),
            Anchor::BottomLeft => Point::new(self.left, self.bottom),
            Anchor::Left => Point::new(self.left, cy),
        }
    }
}

/// Error returned when an anchor name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown anchor '{0}' (expected center, top-left, top, top-right, right, bottom-right, bottom, bottom-left or left)")]
pub struct ParseAnchorError(pub String);

/// Reference point for rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    #[default]
    Center,
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::Center,
        Anchor::TopLeft,
        Anchor::Top,
        Anchor::TopRight,
        Anchor::Right,
        Anchor::BottomRight,
        Anchor::Bottom,
        Anchor::BottomLeft,
        Anchor::Left,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Anchor::Center => "center",
            Anchor::TopLeft => "top-left",
            Anchor::Top => "top",
            Anchor::TopRight => "top-right",
            Anchor::Right => "right",
            Anchor::BottomRight => "bottom-right",
            Anchor::Bottom => "bottom",
            Anchor::BottomLeft => "bottom-left",
            Anchor::Left => "left",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Anchor {
    type Err = ParseAnchorError;

    /// Accepts `top-left`, `top_left`, `Top Left` and `TOPLEFT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        Anchor::ALL
            .iter()
            .copied()
            .find(|anchor| anchor.name().replace('-', "") == key)
            .ok_or_else(|| ParseAnchorError(s.to_string()))
    }
}
