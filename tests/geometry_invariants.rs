//! Property-based invariant tests for attach and placement geometry.
//!
//! 1. Re-anchoring with unchanged host bounds is the identity, for points
//!    and for attached shapes.
//! 2. Re-anchoring scales offsets proportionally to the host size.
//! 3. An attachment whose side of the host changes always moves.
//! 4. An attachment below the host stays when the bottom edge is kept.
//! 5. The free-position search ends on a position nothing occupies.
//! 6. Orientation is mirrored when rect and reference are swapped.
//! 7. Looking up the connected shape at a position is idempotent.

use diagram_autoplace::geometry::orientation;
use diagram_autoplace::place::{
    connected_at_position, find_free_position, generate_next_position, AxisStep,
    NextPositionDirections,
};
use diagram_autoplace::{
    new_attach_point, new_attach_shape_delta, should_be_moved, Bounds, Diagram, Modeling,
    Orientation, Point, Shape, ShapeId,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn bounds_strategy() -> impl Strategy<Value = Bounds> {
    (-500i32..=500, -500i32..=500, 1i32..=300, 1i32..=300)
        .prop_map(|(x, y, w, h)| Bounds::new(x as f64, y as f64, w as f64, h as f64))
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-1000i32..=1000, -1000i32..=1000).prop_map(|(x, y)| Point::new(x as f64, y as f64))
}

fn mirrored(orientation: Orientation) -> Orientation {
    match orientation {
        Orientation::Top => Orientation::Bottom,
        Orientation::Bottom => Orientation::Top,
        Orientation::Left => Orientation::Right,
        Orientation::Right => Orientation::Left,
        Orientation::TopLeft => Orientation::BottomRight,
        Orientation::TopRight => Orientation::BottomLeft,
        Orientation::BottomLeft => Orientation::TopRight,
        Orientation::BottomRight => Orientation::TopLeft,
        Orientation::Intersect => Orientation::Intersect,
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Identity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn attach_point_identity(host in bounds_strategy(), p in point_strategy()) {
        prop_assert_eq!(new_attach_point(p, &host, &host), Ok(p));
    }

    #[test]
    fn attach_shape_delta_identity(host in bounds_strategy(), attached in bounds_strategy()) {
        prop_assert_eq!(
            new_attach_shape_delta(&attached, &host, &host),
            Ok(Point::zero())
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Proportional scaling
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn attach_point_scales_with_host(
        host in bounds_strategy(),
        dx in -300i32..=300,
        dy in -300i32..=300,
        kx in 1i32..=4,
        ky in 1i32..=4,
    ) {
        let scaled = Bounds::new(
            host.x,
            host.y,
            host.width * kx as f64,
            host.height * ky as f64,
        );
        let p = Point::new(host.x + dx as f64, host.y + dy as f64);
        let expected = Point::new(host.x + (dx * kx) as f64, host.y + (dy * ky) as f64);

        prop_assert_eq!(new_attach_point(p, &host, &scaled), Ok(expected));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Changed side ⇒ moved
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn changed_orientation_moves(
        old in bounds_strategy(),
        new in bounds_strategy(),
        p in point_strategy(),
    ) {
        let point = Bounds::from(p);
        let before = orientation(&old, &point, 0.0);
        let after = orientation(&new, &point, 0.0);
        prop_assume!(before != after);

        prop_assert!(should_be_moved(p, &old, &new));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Kept bottom edge ⇒ label below stays
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn label_below_stays_when_bottom_kept(
        host in bounds_strategy(),
        gap in 1i32..=100,
        grow in -50i32..=300,
    ) {
        let grow = (grow as f64).max(1.0 - host.height);
        let resized = Bounds::new(host.x, host.y - grow, host.width, host.height + grow);
        let label = Point::new(host.x + host.width / 2.0, host.bottom() + gap as f64);

        prop_assert!(!should_be_moved(label, &host, &resized));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Free-position search ends on a free position
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn free_position_is_free(offsets in prop::collection::vec(-200i32..=600, 0..6)) {
        let mut diagram = Diagram::new();
        diagram
            .add_shape(Shape::new("source", Bounds::new(0.0, 0.0, 100.0, 100.0)))
            .unwrap();
        for (i, offset) in offsets.iter().enumerate() {
            let target = diagram
                .create_shape(
                    Shape::sized(format!("target_{}", i), 100.0, 100.0),
                    Point::new(200.0, *offset as f64),
                    None,
                )
                .unwrap();
            diagram.connect(&ShapeId::new("source"), &target).unwrap();
        }

        let element = Shape::sized("new", 100.0, 100.0);
        let start = Point::new(200.0, 50.0);
        let next = generate_next_position(NextPositionDirections::y(AxisStep::new(30.0, 80.0)));

        let free = find_free_position(&diagram, &ShapeId::new("source"), &element, start, next)
            .unwrap();

        prop_assert_eq!(free.x, start.x);
        prop_assert!(free.y >= start.y);
        prop_assert!(connected_at_position(&diagram, &ShapeId::new("source"), free, &element)
            .unwrap()
            .is_none());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Orientation symmetry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn orientation_mirrors(a in bounds_strategy(), b in bounds_strategy()) {
        prop_assert_eq!(orientation(&a, &b, 0.0), mirrored(orientation(&b, &a, 0.0)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Connected-at-position idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn connected_at_position_idempotent(target in bounds_strategy(), p in point_strategy()) {
        let mut diagram = Diagram::new();
        diagram
            .add_shape(Shape::new("source", Bounds::new(0.0, 0.0, 100.0, 100.0)))
            .unwrap();
        diagram.add_shape(Shape::new("target", target)).unwrap();
        diagram
            .connect(&ShapeId::new("source"), &ShapeId::new("target"))
            .unwrap();

        let element = Shape::sized("new", 50.0, 50.0);
        let source = ShapeId::new("source");
        let first = connected_at_position(&diagram, &source, p, &element)
            .unwrap()
            .map(|s| s.id.clone());
        let second = connected_at_position(&diagram, &source, p, &element)
            .unwrap()
            .map(|s| s.id.clone());

        prop_assert_eq!(first, second);
    }
}
