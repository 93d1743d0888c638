//! Auto-place orchestration: appending a new shape next to an existing one
//!
//! Placement runs in phases:
//!
//! 1. **start**: every [`PlacementListener::on_start`] is told about the
//!    placement; any of them may veto it.
//! 2. **compute**: listeners are asked for a center position in registration
//!    order; the first answer wins. Without an answer the built-in
//!    [`default_position`] is used.
//! 3. **mutate**: the shape is created (and connected) through [`Modeling`].
//! 4. **end**: every [`PlacementListener::on_end`] sees the placed shape.
//!
//! Finally the new shape is selected if the configuration asks for it.

use tracing::{debug, debug_span, warn};

use crate::geometry::{round_point, Point};
use crate::model::{Diagram, Modeling, Selection, Shape, ShapeId};

use super::config::AutoPlaceConfig;
use super::distance::connected_distance_with;
use super::error::PlaceError;
use super::hints::{Direction, PlacementHints};
use super::search::{find_free_position_with, generate_next_position, SearchLimits};

/// What a placement is about
#[derive(Debug, Clone, Copy)]
pub struct PlaceEvent<'a> {
    /// The shape being placed
    pub shape: &'a Shape,
    /// The shape it is placed next to (`hints.source` when set, in every phase)
    pub source: &'a Shape,
}

/// Whether a placement may go ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Veto,
}

/// Hooks into the placement phases
///
/// All methods have no-op defaults, so implementors only override the phases
/// they care about.
pub trait PlacementListener {
    /// Called before anything is computed; return [`Flow::Veto`] to cancel
    fn on_start(&self, _event: &PlaceEvent<'_>) -> Flow {
        Flow::Continue
    }

    /// Propose a center position for the new shape
    fn compute(&self, _event: &PlaceEvent<'_>) -> Option<Point> {
        None
    }

    /// Called after the shape was placed; `event.shape` is the placed shape
    fn on_end(&self, _event: &PlaceEvent<'_>) {}
}

/// A [`PlacementListener`] that only answers the compute phase
pub struct ComputeFn<F>(pub F);

impl<F> PlacementListener for ComputeFn<F>
where
    F: Fn(&PlaceEvent<'_>) -> Option<Point>,
{
    fn compute(&self, event: &PlaceEvent<'_>) -> Option<Point> {
        (self.0)(event)
    }
}

/// Center position for `shape` next to `source` without any listener input
///
/// The shape is put on the `direction` side of `source` at the inferred
/// connected distance, centered on `source`'s cross axis, and then moved
/// along the cross axis until it no longer overlaps a shape already
/// connected to `source`.
pub fn default_position(
    diagram: &Diagram,
    source: &Shape,
    shape: &Shape,
    hints: &PlacementHints,
    config: &AutoPlaceConfig,
) -> Result<Point, PlaceError> {
    let distance = connected_distance_with(diagram, &source.id, hints, config)?;
    let direction = hints.direction.unwrap_or(config.direction);

    let bounds = source.bounds;
    let center = bounds.center();

    let position = match direction {
        Direction::East => Point::new(bounds.right() + distance + shape.width() / 2.0, center.y),
        Direction::West => Point::new(bounds.x - distance - shape.width() / 2.0, center.y),
        Direction::South => Point::new(center.x, bounds.bottom() + distance + shape.height() / 2.0),
        Direction::North => Point::new(center.x, bounds.y - distance - shape.height() / 2.0),
    };

    let limits = SearchLimits {
        detection_padding: config.detection_padding,
        max_steps: config.max_search_steps,
    };

    find_free_position_with(
        diagram,
        &source.id,
        shape,
        position,
        generate_next_position(config.next_position_directions(direction)),
        limits,
    )
}

/// Places new shapes next to existing ones
#[derive(Default)]
pub struct AutoPlace {
    config: AutoPlaceConfig,
    listeners: Vec<Box<dyn PlacementListener>>,
}

impl AutoPlace {
    pub fn new(config: AutoPlaceConfig) -> Self {
        Self {
            config,
            listeners: vec![],
        }
    }

    pub fn config(&self) -> &AutoPlaceConfig {
        &self.config
    }

    /// Register a listener; listeners are consulted in registration order
    pub fn add_listener(&mut self, listener: impl PlacementListener + 'static) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Builder-style [`add_listener`](Self::add_listener)
    pub fn with_listener(mut self, listener: impl PlacementListener + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Center position the new shape would get, without placing it
    ///
    /// Runs the compute phase only: listeners first, then the built-in
    /// default. The result is rounded.
    pub fn next_position(
        &self,
        diagram: &Diagram,
        source: &ShapeId,
        shape: &Shape,
        hints: &PlacementHints,
    ) -> Result<Point, PlaceError> {
        let anchor = diagram.get(hints.source.as_ref().unwrap_or(source))?;

        if let Some(position) = hints.position {
            return Ok(round_point(position));
        }

        let event = PlaceEvent {
            shape,
            source: anchor,
        };

        for listener in &self.listeners {
            match listener.compute(&event) {
                Some(position) if position.is_finite() => {
                    debug!(%position, "position from listener");
                    return Ok(round_point(position));
                }
                Some(position) => {
                    warn!(%position, shape = %shape.id, "ignoring non-finite position from listener");
                }
                None => {}
            }
        }

        let position = default_position(diagram, anchor, shape, hints, &self.config)?;
        Ok(round_point(position))
    }

    /// Append `shape` next to `source`.
    ///
    /// Returns the identifier of the placed shape, or `None` if a listener
    /// vetoed the placement. Errors from the modeling collaborator abort the
    /// placement and are returned unchanged; nothing is selected then.
    pub fn append<M, S>(
        &self,
        modeling: &mut M,
        selection: &mut S,
        source: &ShapeId,
        shape: Shape,
        hints: &PlacementHints,
    ) -> Result<Option<ShapeId>, PlaceError>
    where
        M: Modeling + ?Sized,
        S: Selection + ?Sized,
    {
        let _span = debug_span!("auto_place", %source, shape = %shape.id).entered();

        let anchor_id = hints.source.as_ref().unwrap_or(source);
        let diagram = modeling.diagram();
        let source_shape = diagram.get(source)?;
        let event = PlaceEvent {
            shape: &shape,
            source: diagram.get(anchor_id)?,
        };

        if self
            .listeners
            .iter()
            .any(|listener| listener.on_start(&event) == Flow::Veto)
        {
            debug!("placement vetoed");
            return Ok(None);
        }

        let position = self.next_position(diagram, source, &shape, hints)?;
        debug!(%position, "placing shape");

        let id = if hints.detached {
            let parent = source_shape.parent.clone();
            modeling.create_shape(shape, position, parent.as_ref())?
        } else {
            modeling.append_shape(source, shape, position, &hints.append_hints())?
        };

        let diagram = modeling.diagram();
        let event = PlaceEvent {
            shape: diagram.get(&id)?,
            source: diagram.get(anchor_id)?,
        };
        for listener in &self.listeners {
            listener.on_end(&event);
        }

        if self.config.select_on_append {
            selection.select(&id);
        }

        Ok(Some(id))
    }
}
