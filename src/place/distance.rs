//! Inference of the typical spacing around a shape from its connections

use tracing::debug;

use crate::geometry::Bounds;
use crate::model::{Connection, Diagram, ModelError, ShapeId};

use super::config::AutoPlaceConfig;
use super::hints::{Direction, PlacementHints, Reference};

/// One measured connection
#[derive(Debug, Clone, PartialEq)]
struct Sample<'a> {
    far: &'a ShapeId,
    distance: f64,
    weight: f64,
}

fn default_weight(shape: &ShapeId, connection: &Connection) -> f64 {
    if &connection.source == shape {
        1.0
    } else {
        -1.0
    }
}

/// Distance from `a` to `b` measured in `direction`
///
/// Positive when `b` lies ahead of `a`. `reference` selects which part of `b`
/// is measured to.
pub fn directional_distance(
    direction: Direction,
    reference: Reference,
    a: &Bounds,
    b: &Bounds,
) -> f64 {
    let a = a.trbl();
    let b_center = b.center();
    let b = b.trbl();

    match (direction, reference) {
        (Direction::East, Reference::Start) => b.left - a.right,
        (Direction::East, Reference::Center) => b_center.x - a.right,
        (Direction::East, Reference::End) => b.right - a.right,
        (Direction::West, Reference::Start) => a.left - b.right,
        (Direction::West, Reference::Center) => a.left - b_center.x,
        (Direction::West, Reference::End) => a.left - b.left,
        (Direction::South, Reference::Start) => b.top - a.bottom,
        (Direction::South, Reference::Center) => b_center.y - a.bottom,
        (Direction::South, Reference::End) => b.bottom - a.bottom,
        (Direction::North, Reference::Start) => a.top - b.bottom,
        (Direction::North, Reference::Center) => a.top - b_center.y,
        (Direction::North, Reference::End) => a.top - b.top,
    }
}

/// Infer the spacing already used around `shape`, with library defaults
///
/// See [`connected_distance_with`].
pub fn connected_distance(
    diagram: &Diagram,
    shape: &ShapeId,
    hints: &PlacementHints,
) -> Result<f64, ModelError> {
    connected_distance_with(diagram, shape, hints, &AutoPlaceConfig::default())
}

/// Infer the spacing already used around `shape`.
///
/// Every incoming and outgoing connection (passing `hints.filter`) is
/// measured along the placement direction and votes for its distance with
/// its weight. By default outgoing connections weigh `+1` and incoming ones
/// `-1`; the sign also decides the measuring direction, so a positive weight
/// measures from `shape` to the far shape and a negative one the other way
/// round. Several connections to the same far shape with the same weight
/// count once. Distances outside `[min_distance, max_distance]` are ignored.
/// The distance with the greatest total weight wins, the first one seen on
/// ties.
///
/// Falls back to the default distance, unbounded, when nothing can be
/// measured or every weight is zero. An inferred distance always lies within
/// the accepted range.
pub fn connected_distance_with(
    diagram: &Diagram,
    shape: &ShapeId,
    hints: &PlacementHints,
    config: &AutoPlaceConfig,
) -> Result<f64, ModelError> {
    let bounds = diagram.get(shape)?.bounds;

    let direction = hints.direction.unwrap_or(config.direction);
    let reference = hints.reference.unwrap_or_default();
    let default_distance = hints.default_distance.unwrap_or(config.default_distance);
    let min_distance = hints.min_distance.unwrap_or(config.min_distance);
    let max_distance = hints.max_distance.unwrap_or(config.max_distance);

    let mut samples: Vec<Sample<'_>> = Vec::new();

    for connection in diagram.incoming(shape).chain(diagram.outgoing(shape)) {
        if let Some(filter) = &hints.filter {
            if !filter(connection) {
                continue;
            }
        }

        let far_id = connection
            .other_end(shape)
            .ok_or_else(|| ModelError::unknown_shape(shape))?;
        let far = diagram.get(far_id)?;

        let weight = match &hints.get_weight {
            Some(get_weight) => get_weight(connection),
            None => default_weight(shape, connection),
        };

        let distance = if weight < 0.0 {
            directional_distance(direction, reference, &far.bounds, &bounds)
        } else {
            directional_distance(direction, reference, &bounds, &far.bounds)
        };

        match samples
            .iter_mut()
            .find(|s| s.far == far_id && s.weight == weight)
        {
            Some(existing) => existing.distance = distance,
            None => samples.push(Sample {
                far: far_id,
                distance,
                weight,
            }),
        }
    }

    let accepted: Vec<&Sample<'_>> = samples
        .iter()
        .filter(|s| s.distance >= min_distance && s.distance <= max_distance)
        .collect();

    let inferred = if accepted.iter().all(|s| s.weight == 0.0) {
        None
    } else {
        vote(&accepted)
    };

    let distance = match inferred {
        Some(inferred) => inferred.max(min_distance).min(max_distance),
        None => default_distance,
    };

    debug!(
        %shape,
        connections = samples.len(),
        accepted = accepted.len(),
        inferred = ?inferred,
        distance,
        "connected distance"
    );

    Ok(distance)
}

/// Pick the distance with the highest accumulated weight
fn vote(samples: &[&Sample<'_>]) -> Option<f64> {
    let mut totals: Vec<(f64, f64)> = Vec::new();
    let mut best: Option<usize> = None;

    for sample in samples {
        let index = match totals.iter().position(|(d, _)| *d == sample.distance) {
            Some(index) => index,
            None => {
                totals.push((sample.distance, 0.0));
                totals.len() - 1
            }
        };
        totals[index].1 += sample.weight;

        match best {
            Some(b) if totals[b].1 >= totals[index].1 => {}
            _ => best = Some(index),
        }
    }

    best.map(|b| totals[b].0)
}
