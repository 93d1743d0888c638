//! Geometry primitives shared by auto-placement and attachment re-anchoring
//!
//! All coordinates use a top-left origin with y pointing down, matching the
//! SVG canvas the diagrams are rendered on.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when geometry input violates a precondition
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Bounds with zero (or non-finite) width or height cannot be used as a scale reference
    #[error("degenerate bounds: width={width}, height={height}")]
    DegenerateBounds { width: f64, height: f64 },
}

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Round both coordinates to the nearest integer
    pub fn round(self) -> Self {
        round_point(self)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle describing the spatial extent of a shape
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds of the given size whose center lies on `center`
    pub fn centered_at(center: Point, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Top-left corner
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Edge view of these bounds
    pub fn trbl(&self) -> Trbl {
        Trbl {
            top: self.y,
            right: self.right(),
            bottom: self.bottom(),
            left: self.x,
        }
    }

    /// Same size, moved by `delta`
    pub fn translate(&self, delta: Point) -> Bounds {
        Bounds::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Whether width or height is zero or not a finite number
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width == 0.0 || self.height == 0.0
    }

    /// Fail with [`GeometryError::DegenerateBounds`] if these bounds cannot act as a scale reference
    pub fn ensure_non_degenerate(&self) -> Result<(), GeometryError> {
        if self.is_degenerate() {
            return Err(GeometryError::DegenerateBounds {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Check if this rectangle contains a point (edges inclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }
}

impl From<Point> for Bounds {
    /// A zero-sized rectangle at `point`
    fn from(point: Point) -> Self {
        Bounds::new(point.x, point.y, 0.0, 0.0)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={} y={} w={} h={}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Read-only edge view of a [`Bounds`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trbl {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Qualitative position of one rectangle relative to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Intersect,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Top => "top",
            Orientation::Right => "right",
            Orientation::Bottom => "bottom",
            Orientation::Left => "left",
            Orientation::TopLeft => "top-left",
            Orientation::TopRight => "top-right",
            Orientation::BottomLeft => "bottom-left",
            Orientation::BottomRight => "bottom-right",
            Orientation::Intersect => "intersect",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-side tolerance used by [`orientation`]
///
/// A positive value on a side demands that much clearance before that side
/// is reported instead of [`Orientation::Intersect`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same padding on every side
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// `x` for left/right, `y` for top/bottom
    pub fn axes(x: f64, y: f64) -> Self {
        Self::new(y, x, y, x)
    }
}

impl From<f64> for Padding {
    fn from(value: f64) -> Self {
        Padding::uniform(value)
    }
}

/// Center of a rectangle
pub fn center(bounds: &Bounds) -> Point {
    bounds.center()
}

/// Component-wise `a - b`
pub fn delta(a: Point, b: Point) -> Point {
    a - b
}

/// Round both coordinates to the nearest integer
pub fn round_point(point: Point) -> Point {
    Point::new(point.x.round(), point.y.round())
}

/// Compute where `rect` lies relative to `reference`.
///
/// `Top` means `rect` sits entirely above `reference`, `BottomRight` means it
/// is below and to the right, and so on. When the two overlap (after applying
/// `padding`) the result is [`Orientation::Intersect`]. Passing a [`Point`] as
/// reference (via `Bounds::from`) asks where `rect` lies relative to that point.
pub fn orientation(rect: &Bounds, reference: &Bounds, padding: impl Into<Padding>) -> Orientation {
    let padding = padding.into();
    let r = rect.trbl();
    let o = reference.trbl();

    let top = r.bottom + padding.top <= o.top;
    let right = r.left - padding.right >= o.right;
    let bottom = r.top - padding.bottom >= o.bottom;
    let left = r.right + padding.left <= o.left;

    let vertical = if top {
        Some(Orientation::Top)
    } else if bottom {
        Some(Orientation::Bottom)
    } else {
        None
    };

    let horizontal = if left {
        Some(Orientation::Left)
    } else if right {
        Some(Orientation::Right)
    } else {
        None
    };

    match (vertical, horizontal) {
        (Some(Orientation::Top), Some(Orientation::Left)) => Orientation::TopLeft,
        (Some(Orientation::Top), Some(_)) => Orientation::TopRight,
        (Some(_), Some(Orientation::Left)) => Orientation::BottomLeft,
        (Some(_), Some(_)) => Orientation::BottomRight,
        (Some(v), None) => v,
        (None, Some(h)) => h,
        (None, None) => Orientation::Intersect,
    }
}
