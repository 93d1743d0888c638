//! Re-anchoring of attached shapes when their host changes bounds.
//!
//! An attachment (a label, a boundary marker) keeps its offset from the
//! host's center, scaled by how much the host grew or shrank on each axis:
//!
//! ```text
//! new = center(new_host) + (old - center(old_host)) * (new_host.size / old_host.size)
//! ```
//!
//! Whether an attached *shape* moves at all is decided by [`should_be_moved`]:
//! an attachment sitting beside the host only follows when the host edge it
//! is glued to moves.

use thiserror::Error;
use tracing::trace;

use crate::geometry::{orientation, round_point, Bounds, GeometryError, Orientation, Point};
use crate::model::{Diagram, ModelError, Modeling, ShapeId};

/// Errors raised while re-anchoring the attachers of a host
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttachError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Scale an offset from the old host center to the new host size
fn scale_offset(offset: Point, old_bounds: &Bounds, new_bounds: &Bounds) -> Point {
    Point::new(
        offset.x * (new_bounds.width / old_bounds.width),
        offset.y * (new_bounds.height / old_bounds.height),
    )
}

/// Absolute position of `point` after its host moved from `old_bounds` to `new_bounds`
///
/// Fails if `old_bounds` has no area, since the scale factor is undefined.
pub fn new_attach_point(
    point: Point,
    old_bounds: &Bounds,
    new_bounds: &Bounds,
) -> Result<Point, GeometryError> {
    old_bounds.ensure_non_degenerate()?;

    let old_delta = point - old_bounds.center();
    let new_delta = scale_offset(old_delta, old_bounds, new_bounds);

    Ok(round_point(new_bounds.center() + new_delta))
}

/// Delta to add to an attached shape's position after its host moved from
/// `old_bounds` to `new_bounds`
///
/// Returns `(0, 0)` when [`should_be_moved`] says the shape stays put.
pub fn new_attach_shape_delta(
    shape: &Bounds,
    old_bounds: &Bounds,
    new_bounds: &Bounds,
) -> Result<Point, GeometryError> {
    old_bounds.ensure_non_degenerate()?;

    let shape_center = shape.center();
    if !should_be_moved(shape_center, old_bounds, new_bounds) {
        return Ok(Point::zero());
    }

    let corner_offset = shape.origin() - shape_center;
    let center_offset = shape_center - old_bounds.center();
    let new_shape_center = new_bounds.center() + scale_offset(center_offset, old_bounds, new_bounds);

    Ok(round_point(new_shape_center + corner_offset - shape.origin()))
}

/// Whether an attachment centered at `attachment` must follow its host.
///
/// Orientation here is the host's position relative to the attachment: `Top`
/// means the host lies above it, so the attachment is glued to the host's
/// bottom edge.
///
/// 1. If the attachment now sits inside the host, or on another side than
///    before, it moves.
/// 2. If it stays on the same side, it moves only when the edge facing it
///    moved.
/// 3. Corners always move.
pub fn should_be_moved(attachment: Point, old_bounds: &Bounds, new_bounds: &Bounds) -> bool {
    let point = Bounds::from(attachment);
    let old_orientation = orientation(old_bounds, &point, 0.0);
    let new_orientation = orientation(new_bounds, &point, 0.0);

    if new_orientation == Orientation::Intersect || new_orientation != old_orientation {
        return true;
    }

    let old = old_bounds.trbl();
    let new = new_bounds.trbl();

    match old_orientation {
        Orientation::Top => old.bottom != new.bottom,
        Orientation::Right => old.left != new.left,
        Orientation::Bottom => old.top != new.top,
        Orientation::Left => old.right != new.right,
        _ => true,
    }
}

/// Deltas for every attacher of `host`, in attach order
///
/// Attachers that stay in place are reported with a zero delta.
pub fn attacher_deltas(
    diagram: &Diagram,
    host: &ShapeId,
    old_bounds: &Bounds,
    new_bounds: &Bounds,
) -> Result<Vec<(ShapeId, Point)>, AttachError> {
    diagram.get(host)?;

    diagram
        .attachers(host)
        .map(|attacher| {
            let delta = new_attach_shape_delta(&attacher.bounds, old_bounds, new_bounds)?;
            Ok((attacher.id.clone(), delta))
        })
        .collect()
}

/// Move the attachers of `host`, whose bounds used to be `old_bounds`, to
/// follow its current bounds
///
/// Returns the deltas that were applied (zero deltas are skipped).
pub fn reanchor_attachers<M: Modeling + ?Sized>(
    modeling: &mut M,
    host: &ShapeId,
    old_bounds: &Bounds,
) -> Result<Vec<(ShapeId, Point)>, AttachError> {
    let new_bounds = modeling.diagram().get(host)?.bounds;
    let deltas: Vec<_> = attacher_deltas(modeling.diagram(), host, old_bounds, &new_bounds)?
        .into_iter()
        .filter(|(_, delta)| *delta != Point::zero())
        .collect();

    for (id, delta) in &deltas {
        trace!(attacher = %id, %host, %delta, "re-anchor attacher");
        modeling.move_shape(id, *delta)?;
    }

    Ok(deltas)
}

/// Resize `host` to `new_bounds` and move its attachers along
pub fn resize_with_attachers<M: Modeling + ?Sized>(
    modeling: &mut M,
    host: &ShapeId,
    new_bounds: Bounds,
) -> Result<Vec<(ShapeId, Point)>, AttachError> {
    let old_bounds = modeling.diagram().get(host)?.bounds;
    new_bounds.ensure_non_degenerate()?;
    old_bounds.ensure_non_degenerate()?;

    modeling.resize_shape(host, new_bounds)?;
    reanchor_attachers(modeling, host, &old_bounds)
}
