//! In-memory scene graph and its modeling operations

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::geometry::{Bounds, Point};

use super::error::ModelError;
use super::types::{Connection, ConnectionId, Shape, ShapeId};

/// Hints understood by [`Modeling::append_shape`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppendHints {
    /// Connect the appended shape *to* this shape instead of from the source
    pub connection_target: Option<ShapeId>,
    /// Connect the appended shape *from* this shape instead of from the source
    pub connection_source: Option<ShapeId>,
}

/// Model mutation collaborator
///
/// Every operation either applies completely or returns an error and leaves
/// the model unchanged.
pub trait Modeling {
    /// Read access to the current model
    fn diagram(&self) -> &Diagram;

    /// Add `shape` with its center at `position` below `parent`
    fn create_shape(
        &mut self,
        shape: Shape,
        position: Point,
        parent: Option<&ShapeId>,
    ) -> Result<ShapeId, ModelError>;

    /// Add `shape` centered at `position` next to `source` and connect the two
    ///
    /// The new shape joins `source`'s parent. Without hints the connection runs
    /// from `source` to the new shape; see [`AppendHints`] for the alternatives.
    fn append_shape(
        &mut self,
        source: &ShapeId,
        shape: Shape,
        position: Point,
        hints: &AppendHints,
    ) -> Result<ShapeId, ModelError>;

    /// Connect `source` to `target`
    fn connect(&mut self, source: &ShapeId, target: &ShapeId) -> Result<ConnectionId, ModelError>;

    /// Move a shape by `delta`
    fn move_shape(&mut self, id: &ShapeId, delta: Point) -> Result<(), ModelError>;

    /// Replace a shape's bounds; attachers are left where they are
    fn resize_shape(&mut self, id: &ShapeId, bounds: Bounds) -> Result<(), ModelError>;
}

/// Shapes and connections of a diagram
///
/// Shapes and connections keep their insertion order, which is also the
/// order of each shape's `incoming`/`outgoing` lists.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    shapes: HashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
    connections: HashMap<ConnectionId, Connection>,
    connection_order: Vec<ConnectionId>,
    next_connection: usize,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    /// Look up a shape
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Look up a shape, failing with [`ModelError::UnknownShape`]
    pub fn get(&self, id: &ShapeId) -> Result<&Shape, ModelError> {
        self.shapes.get(id).ok_or_else(|| ModelError::unknown_shape(id))
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    /// Look up a connection, failing with [`ModelError::UnknownConnection`]
    pub fn get_connection(&self, id: &ConnectionId) -> Result<&Connection, ModelError> {
        self.connections
            .get(id)
            .ok_or_else(|| ModelError::UnknownConnection { id: id.clone() })
    }

    /// All shapes in insertion order
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// All connections in insertion order
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connection_order
            .iter()
            .filter_map(|id| self.connections.get(id))
    }

    /// Connections ending at `id`
    pub fn incoming<'a>(&'a self, id: &ShapeId) -> impl Iterator<Item = &'a Connection> + 'a {
        self.shapes
            .get(id)
            .into_iter()
            .flat_map(|s| s.incoming.iter())
            .filter_map(|c| self.connections.get(c))
    }

    /// Connections starting at `id`
    pub fn outgoing<'a>(&'a self, id: &ShapeId) -> impl Iterator<Item = &'a Connection> + 'a {
        self.shapes
            .get(id)
            .into_iter()
            .flat_map(|s| s.outgoing.iter())
            .filter_map(|c| self.connections.get(c))
    }

    /// Shapes attached to `id`
    pub fn attachers<'a>(&'a self, id: &ShapeId) -> impl Iterator<Item = &'a Shape> + 'a {
        self.shapes
            .get(id)
            .into_iter()
            .flat_map(|s| s.attachers.iter())
            .filter_map(|a| self.shapes.get(a))
    }

    /// The shape `id` is attached to
    pub fn host(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes
            .get(id)
            .and_then(|s| s.host.as_ref())
            .and_then(|h| self.shapes.get(h))
    }

    /// Resolve the end of `connection` that is not `shape`
    pub fn other_end(&self, connection: &Connection, shape: &ShapeId) -> Option<&Shape> {
        connection
            .other_end(shape)
            .and_then(|id| self.shapes.get(id))
    }

    /// Whether a connection from `source` to `target` exists
    pub fn is_connected(&self, source: &ShapeId, target: &ShapeId) -> bool {
        self.outgoing(source).any(|c| &c.target == target)
    }

    /// Insert a shape at its current bounds
    ///
    /// Parent and host must already be in the diagram. The host, if any,
    /// records the new shape as one of its attachers.
    pub fn add_shape(&mut self, mut shape: Shape) -> Result<&Shape, ModelError> {
        if self.shapes.contains_key(&shape.id) {
            return Err(ModelError::duplicate_shape(&shape.id));
        }
        for reference in shape.parent.iter().chain(shape.host.iter()) {
            if !self.shapes.contains_key(reference) {
                return Err(ModelError::unknown_shape(reference));
            }
        }

        shape.incoming.clear();
        shape.outgoing.clear();
        shape.attachers.clear();

        if let Some(host) = shape.host.as_ref().and_then(|h| self.shapes.get_mut(h)) {
            host.attachers.push(shape.id.clone());
        }

        trace!(shape = %shape.id, bounds = %shape.bounds, "add shape");

        let id = shape.id.clone();
        self.order.push(id.clone());
        Ok(self.shapes.entry(id).or_insert(shape))
    }

    fn check_connectable(&self, source: &ShapeId, target: &ShapeId) -> Result<(), ModelError> {
        self.get(source)?;
        self.get(target)?;
        if source == target {
            return Err(ModelError::SelfConnection { id: source.clone() });
        }
        Ok(())
    }

    fn insert_connection(&mut self, source: &ShapeId, target: &ShapeId) -> ConnectionId {
        self.next_connection += 1;
        let id = ConnectionId::new(format!("connection_{}", self.next_connection));
        let waypoints = self.waypoints_between(source, target);

        if let Some(s) = self.shapes.get_mut(source) {
            s.outgoing.push(id.clone());
        }
        if let Some(t) = self.shapes.get_mut(target) {
            t.incoming.push(id.clone());
        }

        self.connections.insert(
            id.clone(),
            Connection {
                id: id.clone(),
                source: source.clone(),
                target: target.clone(),
                waypoints,
            },
        );
        self.connection_order.push(id.clone());
        id
    }

    /// Straight center-to-center route
    fn waypoints_between(&self, source: &ShapeId, target: &ShapeId) -> Vec<Point> {
        [source, target]
            .into_iter()
            .filter_map(|id| self.shapes.get(id))
            .map(Shape::center)
            .collect()
    }

    fn relayout_connections(&mut self, id: &ShapeId) {
        let Some(shape) = self.shapes.get(id) else {
            return;
        };
        let ids: Vec<ConnectionId> = shape
            .incoming
            .iter()
            .chain(shape.outgoing.iter())
            .cloned()
            .collect();

        for cid in ids {
            let Some((source, target)) = self
                .connections
                .get(&cid)
                .map(|c| (c.source.clone(), c.target.clone()))
            else {
                continue;
            };
            let waypoints = self.waypoints_between(&source, &target);
            if let Some(c) = self.connections.get_mut(&cid) {
                c.waypoints = waypoints;
            }
        }
    }
}

impl Modeling for Diagram {
    fn diagram(&self) -> &Diagram {
        self
    }

    fn create_shape(
        &mut self,
        mut shape: Shape,
        position: Point,
        parent: Option<&ShapeId>,
    ) -> Result<ShapeId, ModelError> {
        shape.bounds = Bounds::centered_at(position, shape.width(), shape.height());
        shape.parent = parent.cloned();
        let id = shape.id.clone();
        self.add_shape(shape)?;
        Ok(id)
    }

    fn append_shape(
        &mut self,
        source: &ShapeId,
        shape: Shape,
        position: Point,
        hints: &AppendHints,
    ) -> Result<ShapeId, ModelError> {
        let parent = self.get(source)?.parent.clone();
        if self.contains(&shape.id) {
            return Err(ModelError::duplicate_shape(&shape.id));
        }
        for reference in [&hints.connection_target, &hints.connection_source]
            .into_iter()
            .flatten()
        {
            self.get(reference)?;
        }

        let id = self.create_shape(shape, position, parent.as_ref())?;

        match (&hints.connection_target, &hints.connection_source) {
            (None, None) => {
                if !self.is_connected(source, &id) {
                    self.insert_connection(source, &id);
                }
            }
            (target, origin) => {
                if let Some(target) = target {
                    if !self.is_connected(&id, target) {
                        self.insert_connection(&id, target);
                    }
                }
                if let Some(origin) = origin {
                    if !self.is_connected(origin, &id) {
                        self.insert_connection(origin, &id);
                    }
                }
            }
        }

        Ok(id)
    }

    fn connect(&mut self, source: &ShapeId, target: &ShapeId) -> Result<ConnectionId, ModelError> {
        self.check_connectable(source, target)?;
        Ok(self.insert_connection(source, target))
    }

    fn move_shape(&mut self, id: &ShapeId, delta: Point) -> Result<(), ModelError> {
        let shape = self
            .shapes
            .get_mut(id)
            .ok_or_else(|| ModelError::unknown_shape(id))?;
        shape.bounds = shape.bounds.translate(delta);
        trace!(shape = %id, %delta, "move shape");
        self.relayout_connections(id);
        Ok(())
    }

    fn resize_shape(&mut self, id: &ShapeId, bounds: Bounds) -> Result<(), ModelError> {
        let shape = self
            .shapes
            .get_mut(id)
            .ok_or_else(|| ModelError::unknown_shape(id))?;
        shape.bounds = bounds;
        trace!(shape = %id, %bounds, "resize shape");
        self.relayout_connections(id);
        Ok(())
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for shape in self.shapes() {
            writeln!(f, "shape {} {}", shape.id, shape.bounds)?;
        }
        for connection in self.connections() {
            writeln!(
                f,
                "connection {} {} -> {}",
                connection.id, connection.source, connection.target
            )?;
        }
        Ok(())
    }
}
