//! Diagram auto-placement
//!
//! This library finds a position for a shape appended next to an existing
//! one, keeping the spacing already used around the source and stepping
//! away from shapes it is connected to. It also re-anchors attached shapes
//! (labels, boundary markers) when their host is resized.
//!
//! # Example
//!
//! ```rust
//! use diagram_autoplace::{auto_place_scene, AutoPlaceConfig, PlacementHints, Shape};
//!
//! let scene = r#"
//! [[shape]]
//! id = "start"
//! x = 0
//! y = 0
//! width = 100
//! height = 100
//! "#;
//!
//! let toml = auto_place_scene(
//!     scene,
//!     &"start".into(),
//!     Shape::sized("next", 100.0, 100.0),
//!     &PlacementHints::new(),
//!     AutoPlaceConfig::default(),
//! )
//! .unwrap();
//!
//! assert!(toml.contains("id = \"next\""));
//! assert!(toml.contains("source = \"start\""));
//! ```

pub mod attach;
pub mod error;
pub mod geometry;
pub mod model;
pub mod place;
pub mod scene;

pub use attach::{
    attacher_deltas, new_attach_point, new_attach_shape_delta, reanchor_attachers,
    resize_with_attachers, should_be_moved, AttachError,
};
pub use error::AutoPlaceError;
pub use geometry::{Bounds, GeometryError, Orientation, Padding, Point};
pub use model::{
    AppendHints, Connection, ConnectionId, Diagram, ModelError, Modeling, Selection,
    SelectionSet, Shape, ShapeId,
};
pub use place::{
    AutoPlace, AutoPlaceConfig, ComputeFn, Direction, Flow, PlaceError, PlaceEvent,
    PlacementHints, PlacementListener, Reference,
};
pub use scene::{Scene, SceneError};

use tracing::info;

/// Append `shape` next to `source` in a TOML scene and return the new scene
///
/// Runs the built-in placement without listeners and without a selection.
pub fn auto_place_scene(
    scene: &str,
    source: &ShapeId,
    shape: Shape,
    hints: &PlacementHints,
    config: AutoPlaceConfig,
) -> Result<String, AutoPlaceError> {
    let mut diagram = Scene::from_str(scene)?.into_diagram()?;
    let mut selection = SelectionSet::new();

    let auto_place = AutoPlace::new(config.with_select_on_append(false));
    if let Some(id) = auto_place.append(&mut diagram, &mut selection, source, shape, hints)? {
        if let Some(placed) = diagram.shape(&id) {
            info!(shape = %id, bounds = %placed.bounds, "placed shape");
        }
    }

    Ok(Scene::from_diagram(&diagram).to_toml_string()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"
[[shape]]
id = "start"
x = 0
y = 0
width = 100
height = 100
"#;

    #[test]
    fn test_auto_place_scene() {
        let toml = auto_place_scene(
            SCENE,
            &"start".into(),
            Shape::sized("next", 100.0, 100.0),
            &PlacementHints::new(),
            AutoPlaceConfig::default(),
        )
        .unwrap();

        let diagram = Scene::from_str(&toml).unwrap().into_diagram().unwrap();
        let next = diagram.shape(&"next".into()).unwrap();
        assert_eq!(next.bounds, Bounds::new(150.0, 0.0, 100.0, 100.0));
        assert!(diagram.is_connected(&"start".into(), &"next".into()));
    }

    #[test]
    fn test_auto_place_scene_unknown_source() {
        let result = auto_place_scene(
            SCENE,
            &"missing".into(),
            Shape::sized("next", 100.0, 100.0),
            &PlacementHints::new(),
            AutoPlaceConfig::default(),
        );
        assert!(matches!(
            result,
            Err(AutoPlaceError::Place(PlaceError::Model(ModelError::UnknownShape { .. })))
        ));
    }

    #[test]
    fn test_invalid_scene() {
        let result = auto_place_scene(
            "[[shape]]\nid = 3",
            &"a".into(),
            Shape::sized("next", 10.0, 10.0),
            &PlacementHints::new(),
            AutoPlaceConfig::default(),
        );
        assert!(matches!(result, Err(AutoPlaceError::Scene(SceneError::ParseError(_)))));
    }
}
