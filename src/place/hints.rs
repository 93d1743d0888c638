//! Per-call placement hints

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Point;
use crate::model::{AppendHints, Connection, ShapeId};

/// Side of the source shape a new shape is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "n", alias = "north")]
    North,
    #[default]
    #[serde(rename = "e", alias = "east")]
    East,
    #[serde(rename = "s", alias = "south")]
    South,
    #[serde(rename = "w", alias = "west")]
    West,
}

impl Direction {
    /// Whether placement in this direction moves along the x axis
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "n",
            Direction::East => "e",
            Direction::South => "s",
            Direction::West => "w",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction '{0}' (expected one of: n, e, s, w)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "e" | "east" => Ok(Direction::East),
            "s" | "south" => Ok(Direction::South),
            "w" | "west" => Ok(Direction::West),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Which edge of the far shape a connection's length is measured to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reference {
    /// The near edge: the gap between the two shapes
    #[default]
    Start,
    /// The far shape's center
    Center,
    /// The far edge: gap plus the far shape's extent
    End,
}

/// Predicate selecting the connections distance inference looks at
pub type ConnectionFilter = Box<dyn Fn(&Connection) -> bool>;

/// Weight of a connection in distance inference
pub type ConnectionWeight = Box<dyn Fn(&Connection) -> f64>;

/// Options for a single placement
///
/// Every field is optional; unset fields fall back to the
/// [`AutoPlaceConfig`](super::AutoPlaceConfig) in use.
#[derive(Default)]
pub struct PlacementHints {
    /// Connect the new shape to this shape
    pub connection_target: Option<ShapeId>,
    /// Connect this shape to the new shape
    pub connection_source: Option<ShapeId>,
    /// Create the new shape without connecting it (default: connect)
    pub detached: bool,
    /// Measure and place relative to this shape instead of the append source;
    /// listeners see it as the event source. The connection still uses the
    /// append source.
    pub source: Option<ShapeId>,
    /// Fixed center for the new shape; skips position computation
    pub position: Option<Point>,
    /// Side to place the new shape on
    pub direction: Option<Direction>,
    /// Edge connection lengths are measured to
    pub reference: Option<Reference>,
    /// Only connections passing this predicate are measured
    pub filter: Option<ConnectionFilter>,
    /// Overrides the default weighting (`+1` outgoing, `-1` incoming)
    pub get_weight: Option<ConnectionWeight>,
    /// Distance used when no connection can be measured
    pub default_distance: Option<f64>,
    /// Shortest distance accepted from a connection
    pub min_distance: Option<f64>,
    /// Longest distance accepted from a connection
    pub max_distance: Option<f64>,
}

impl PlacementHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connection_target(mut self, target: impl Into<ShapeId>) -> Self {
        self.connection_target = Some(target.into());
        self
    }

    pub fn with_connection_source(mut self, source: impl Into<ShapeId>) -> Self {
        self.connection_source = Some(source.into());
        self
    }

    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }

    pub fn with_source(mut self, source: impl Into<ShapeId>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_filter(mut self, filter: impl Fn(&Connection) -> bool + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn with_weight(mut self, get_weight: impl Fn(&Connection) -> f64 + 'static) -> Self {
        self.get_weight = Some(Box::new(get_weight));
        self
    }

    pub fn with_default_distance(mut self, distance: f64) -> Self {
        self.default_distance = Some(distance);
        self
    }

    pub fn with_min_distance(mut self, distance: f64) -> Self {
        self.min_distance = Some(distance);
        self
    }

    pub fn with_max_distance(mut self, distance: f64) -> Self {
        self.max_distance = Some(distance);
        self
    }

    /// The subset understood by [`Modeling::append_shape`](crate::model::Modeling::append_shape)
    pub fn append_hints(&self) -> AppendHints {
        AppendHints {
            connection_target: self.connection_target.clone(),
            connection_source: self.connection_source.clone(),
        }
    }
}

impl fmt::Debug for PlacementHints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacementHints")
            .field("connection_target", &self.connection_target)
            .field("connection_source", &self.connection_source)
            .field("detached", &self.detached)
            .field("source", &self.source)
            .field("position", &self.position)
            .field("direction", &self.direction)
            .field("reference", &self.reference)
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .field("get_weight", &self.get_weight.as_ref().map(|_| "<fn>"))
            .field("default_distance", &self.default_distance)
            .field("min_distance", &self.min_distance)
            .field("max_distance", &self.max_distance)
            .finish()
    }
}
