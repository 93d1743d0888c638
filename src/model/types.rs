//! Shapes, connections and their identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};

/// Identifier of a shape in a [`Diagram`](super::Diagram)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub String);

impl ShapeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a connection in a [`Diagram`](super::Diagram)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub String);

impl ConnectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A shape on the canvas
///
/// `incoming`, `outgoing` and `attachers` are maintained by the diagram; any
/// values present when a shape is inserted are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub bounds: Bounds,
    /// Containing shape, if any
    pub parent: Option<ShapeId>,
    /// Shape this one is attached to (e.g. a label glued to a task)
    pub host: Option<ShapeId>,
    /// Shapes attached to this one, in attach order
    pub attachers: Vec<ShapeId>,
    pub incoming: Vec<ConnectionId>,
    pub outgoing: Vec<ConnectionId>,
}

impl Shape {
    pub fn new(id: impl Into<ShapeId>, bounds: Bounds) -> Self {
        Self {
            id: id.into(),
            bounds,
            parent: None,
            host: None,
            attachers: vec![],
            incoming: vec![],
            outgoing: vec![],
        }
    }

    /// A not-yet-placed shape of the given size at the origin
    pub fn sized(id: impl Into<ShapeId>, width: f64, height: f64) -> Self {
        Self::new(id, Bounds::new(0.0, 0.0, width, height))
    }

    pub fn with_parent(mut self, parent: impl Into<ShapeId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<ShapeId>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn width(&self) -> f64 {
        self.bounds.width
    }

    pub fn height(&self) -> f64 {
        self.bounds.height
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }
}

impl From<String> for ShapeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A directed connection between two shapes
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub source: ShapeId,
    pub target: ShapeId,
    pub waypoints: Vec<Point>,
}

impl Connection {
    /// The endpoint that is not `shape`, or `None` if `shape` is not an endpoint
    pub fn other_end(&self, shape: &ShapeId) -> Option<&ShapeId> {
        if &self.source == shape {
            Some(&self.target)
        } else if &self.target == shape {
            Some(&self.source)
        } else {
            None
        }
    }

    /// First waypoint
    pub fn start(&self) -> Option<Point> {
        self.waypoints.first().copied()
    }

    /// Last waypoint
    pub fn end(&self) -> Option<Point> {
        self.waypoints.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_sized() {
        let s = Shape::sized("task", 100.0, 80.0);
        assert_eq!(s.id.as_str(), "task");
        assert_eq!(s.center(), Point::new(50.0, 40.0));
        assert!(s.parent.is_none());
    }

    #[test]
    fn test_other_end() {
        let c = Connection {
            id: ConnectionId::new("c1"),
            source: ShapeId::new("a"),
            target: ShapeId::new("b"),
            waypoints: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
        };
        assert_eq!(c.other_end(&"a".into()), Some(&ShapeId::new("b")));
        assert_eq!(c.other_end(&"b".into()), Some(&ShapeId::new("a")));
        assert_eq!(c.other_end(&"z".into()), None);
        assert_eq!(c.start(), Some(Point::new(0.0, 0.0)));
        assert_eq!(c.end(), Some(Point::new(10.0, 0.0)));
    }
}
