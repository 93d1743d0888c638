//! Search for a position not occupied by shapes already connected to the source

use tracing::trace;

use crate::geometry::{orientation, Bounds, Orientation, Point};
use crate::model::{Diagram, ModelError, Shape, ShapeId};

use super::config::{
    AxisStep, NextPositionDirections, DEFAULT_MAX_SEARCH_STEPS, PLACEMENT_DETECTION_PAD,
};
use super::error::PlaceError;

/// Limits applied to a free-position search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    /// Clearance around connected shapes that still counts as occupied
    pub detection_padding: f64,
    /// Number of steps after which the search fails
    pub max_steps: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            detection_padding: PLACEMENT_DETECTION_PAD,
            max_steps: DEFAULT_MAX_SEARCH_STEPS,
        }
    }
}

/// Shapes connected to `source`, its host and its attachers
///
/// Targets come before sources for each shape. A shape connected more than
/// once is listed more than once.
pub fn auto_place_closure<'a>(
    diagram: &'a Diagram,
    source: &ShapeId,
) -> Result<Vec<&'a Shape>, ModelError> {
    let shape = diagram.get(source)?;

    let mut anchors: Vec<&ShapeId> = vec![&shape.id];
    anchors.extend(shape.host.iter());
    anchors.extend(shape.attachers.iter());

    let mut connected = Vec::new();
    for anchor in anchors {
        connected.extend(diagram.outgoing(anchor).filter_map(|c| diagram.shape(&c.target)));
        connected.extend(diagram.incoming(anchor).filter_map(|c| diagram.shape(&c.source)));
    }

    Ok(connected)
}

/// A shape connected to `source` that overlaps `element` centered at `position`
///
/// `element` itself is never reported. Shapes closer than `padding` to the
/// candidate bounds count as overlapping.
pub fn connected_at_position_with<'a>(
    diagram: &'a Diagram,
    source: &ShapeId,
    position: Point,
    element: &Shape,
    padding: f64,
) -> Result<Option<&'a Shape>, ModelError> {
    let bounds = Bounds::centered_at(position, element.width(), element.height());

    Ok(auto_place_closure(diagram, source)?
        .into_iter()
        .filter(|candidate| candidate.id != element.id)
        .find(|candidate| {
            orientation(&candidate.bounds, &bounds, padding) == Orientation::Intersect
        }))
}

/// [`connected_at_position_with`] using the default detection padding
pub fn connected_at_position<'a>(
    diagram: &'a Diagram,
    source: &ShapeId,
    position: Point,
    element: &Shape,
) -> Result<Option<&'a Shape>, ModelError> {
    connected_at_position_with(diagram, source, position, element, PLACEMENT_DETECTION_PAD)
}

/// Walk from `position` using `next_position` until no connected shape of
/// `source` occupies it
///
/// `next_position` receives the element being placed, the occupied
/// candidate and the shape occupying it.
pub fn find_free_position<F>(
    diagram: &Diagram,
    source: &ShapeId,
    element: &Shape,
    position: Point,
    next_position: F,
) -> Result<Point, PlaceError>
where
    F: Fn(&Shape, Point, &Shape) -> Point,
{
    find_free_position_with(
        diagram,
        source,
        element,
        position,
        next_position,
        SearchLimits::default(),
    )
}

/// [`find_free_position`] with explicit limits
///
/// Fails with [`PlaceError::NotProgressing`] if a step returns the same (or a
/// non-finite) position and with [`PlaceError::SearchExhausted`] after
/// `limits.max_steps` steps.
pub fn find_free_position_with<F>(
    diagram: &Diagram,
    source: &ShapeId,
    element: &Shape,
    mut position: Point,
    next_position: F,
    limits: SearchLimits,
) -> Result<Point, PlaceError>
where
    F: Fn(&Shape, Point, &Shape) -> Point,
{
    let mut steps = 0;

    while let Some(occupied) =
        connected_at_position_with(diagram, source, position, element, limits.detection_padding)?
    {
        if steps >= limits.max_steps {
            return Err(PlaceError::SearchExhausted {
                steps,
                at: position,
            });
        }

        let next = next_position(element, position, occupied);
        trace!(%position, occupied = %occupied.id, %next, "position taken");

        if !next.is_finite() || next == position {
            return Err(PlaceError::NotProgressing { at: position });
        }

        position = next;
        steps += 1;
    }

    Ok(position)
}

fn step_axis(
    step: &AxisStep,
    previous: f64,
    occupied_start: f64,
    occupied_extent: f64,
    size: f64,
) -> f64 {
    if step.margin < 0.0 {
        (occupied_start + step.margin - size / 2.0)
            .min(previous - step.min_distance + step.margin)
    } else {
        (occupied_start + occupied_extent + step.margin + size / 2.0)
            .max(previous + step.min_distance + step.margin)
    }
}

/// Build a stepping function for [`find_free_position`]
///
/// On each configured axis the candidate jumps past the occupying shape
/// (plus `margin`, keeping the element's own size in mind) but always by at
/// least `min_distance + margin`. A negative margin steps towards smaller
/// coordinates. Axes without a step keep their coordinate.
pub fn generate_next_position(
    directions: NextPositionDirections,
) -> impl Fn(&Shape, Point, &Shape) -> Point {
    move |element: &Shape, previous: Point, occupied: &Shape| {
        let mut next = previous;

        if let Some(step) = &directions.x {
            next.x = step_axis(
                step,
                previous.x,
                occupied.bounds.x,
                occupied.bounds.width,
                element.width(),
            );
        }
        if let Some(step) = &directions.y {
            next.y = step_axis(
                step,
                previous.y,
                occupied.bounds.y,
                occupied.bounds.height,
                element.height(),
            );
        }

        next
    }
}
