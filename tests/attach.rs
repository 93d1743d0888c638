//! Integration tests for re-anchoring attached shapes

use diagram_autoplace::{
    attacher_deltas, resize_with_attachers, AttachError, Bounds, Diagram, GeometryError,
    Modeling, Point, Shape, ShapeId,
};
use pretty_assertions::assert_eq;

fn id(s: &str) -> ShapeId {
    ShapeId::new(s)
}

/// A 100x100 task with a boundary marker on its right edge and a label below
fn task_with_attachers() -> Diagram {
    let mut diagram = Diagram::new();
    diagram
        .add_shape(Shape::new("task", Bounds::new(0.0, 0.0, 100.0, 100.0)))
        .expect("Should add task");
    diagram
        .add_shape(Shape::new("marker", Bounds::new(90.0, 40.0, 20.0, 20.0)).with_host("task"))
        .expect("Should add marker");
    diagram
        .add_shape(Shape::new("label", Bounds::new(40.0, 110.0, 20.0, 20.0)).with_host("task"))
        .expect("Should add label");
    diagram
}

fn bounds_of(diagram: &Diagram, shape: &str) -> Bounds {
    diagram.shape(&id(shape)).expect("Should exist").bounds
}

#[test]
fn test_widen_moves_boundary_marker_only() {
    let mut diagram = task_with_attachers();

    let applied = resize_with_attachers(&mut diagram, &id("task"), Bounds::new(0.0, 0.0, 200.0, 100.0))
        .expect("Should resize");

    assert_eq!(applied, vec![(id("marker"), Point::new(100.0, 0.0))]);
    assert_eq!(bounds_of(&diagram, "task"), Bounds::new(0.0, 0.0, 200.0, 100.0));
    assert_eq!(bounds_of(&diagram, "marker"), Bounds::new(190.0, 40.0, 20.0, 20.0));
    assert_eq!(bounds_of(&diagram, "label"), Bounds::new(40.0, 110.0, 20.0, 20.0));
}

#[test]
fn test_heighten_swallows_label() {
    let mut diagram = task_with_attachers();

    let applied = resize_with_attachers(&mut diagram, &id("task"), Bounds::new(0.0, 0.0, 100.0, 200.0))
        .expect("Should resize");

    // the label ends up inside the task and is pushed along the stretch
    assert_eq!(applied, vec![(id("label"), Point::new(0.0, 120.0))]);
    assert_eq!(bounds_of(&diagram, "label"), Bounds::new(40.0, 230.0, 20.0, 20.0));
    assert_eq!(bounds_of(&diagram, "marker"), Bounds::new(90.0, 40.0, 20.0, 20.0));
}

#[test]
fn test_move_keeps_relative_positions() {
    let diagram = task_with_attachers();
    let moved = Bounds::new(300.0, 200.0, 100.0, 100.0);

    let deltas = attacher_deltas(&diagram, &id("task"), &Bounds::new(0.0, 0.0, 100.0, 100.0), &moved)
        .expect("Should compute deltas");

    assert_eq!(
        deltas,
        vec![
            (id("marker"), Point::new(300.0, 200.0)),
            (id("label"), Point::new(300.0, 200.0)),
        ]
    );
}

#[test]
fn test_degenerate_resize_is_rejected() {
    let mut diagram = task_with_attachers();

    let result = resize_with_attachers(&mut diagram, &id("task"), Bounds::new(0.0, 0.0, 0.0, 100.0));

    assert_eq!(
        result,
        Err(AttachError::Geometry(GeometryError::DegenerateBounds {
            width: 0.0,
            height: 100.0
        }))
    );
    assert_eq!(bounds_of(&diagram, "task"), Bounds::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_connections_follow_reanchored_attacher() {
    let mut diagram = task_with_attachers();
    diagram
        .create_shape(Shape::sized("end", 40.0, 40.0), Point::new(400.0, 50.0), None)
        .expect("Should create end");
    let connection = diagram
        .connect(&id("marker"), &id("end"))
        .expect("Should connect");

    resize_with_attachers(&mut diagram, &id("task"), Bounds::new(0.0, 0.0, 200.0, 100.0))
        .expect("Should resize");

    let start = diagram
        .connection(&connection)
        .and_then(|c| c.start());
    assert_eq!(start, Some(Point::new(200.0, 50.0)));
}
