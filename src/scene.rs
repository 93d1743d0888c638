//! TOML scene files
//!
//! A scene lists shapes and connections:
//!
//! ```toml
//! [[shape]]
//! id = "start"
//! x = 0
//! y = 0
//! width = 100
//! height = 80
//!
//! [[shape]]
//! id = "label"
//! x = 40
//! y = 70
//! width = 20
//! height = 20
//! host = "start"
//!
//! [[connection]]
//! source = "start"
//! target = "end"
//! ```
//!
//! Shapes referring to a parent or host must come after it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Bounds;
use crate::model::{Diagram, ModelError, Modeling, Shape, ShapeId};

/// Errors that can occur when loading or writing a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write scene TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("invalid scene: {0}")]
    Model(#[from] ModelError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneShape {
    pub id: ShapeId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ShapeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<ShapeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConnection {
    pub source: ShapeId,
    pub target: ShapeId,
}

/// Serializable snapshot of a [`Diagram`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, rename = "shape")]
    pub shapes: Vec<SceneShape>,
    #[serde(default, rename = "connection")]
    pub connections: Vec<SceneConnection>,
}

impl Scene {
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, SceneError> {
        Ok(toml::to_string(self)?)
    }

    /// Build a diagram, inserting shapes and connections in file order
    pub fn into_diagram(self) -> Result<Diagram, SceneError> {
        let mut diagram = Diagram::new();

        for entry in self.shapes {
            let mut shape = Shape::new(
                entry.id,
                Bounds::new(entry.x, entry.y, entry.width, entry.height),
            );
            shape.parent = entry.parent;
            shape.host = entry.host;
            diagram.add_shape(shape)?;
        }

        for connection in &self.connections {
            diagram.connect(&connection.source, &connection.target)?;
        }

        Ok(diagram)
    }

    pub fn from_diagram(diagram: &Diagram) -> Self {
        let shapes = diagram
            .shapes()
            .map(|shape| SceneShape {
                id: shape.id.clone(),
                x: shape.bounds.x,
                y: shape.bounds.y,
                width: shape.bounds.width,
                height: shape.bounds.height,
                parent: shape.parent.clone(),
                host: shape.host.clone(),
            })
            .collect();

        let connections = diagram
            .connections()
            .map(|connection| SceneConnection {
                source: connection.source.clone(),
                target: connection.target.clone(),
            })
            .collect();

        Self {
            shapes,
            connections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCENE: &str = r#"
[[shape]]
id = "start"
x = 0
y = 0
width = 100
height = 80

[[shape]]
id = "end"
x = 200
y = 0
width = 100
height = 80

[[shape]]
id = "label"
x = 40
y = 70
width = 20
height = 20
host = "start"

[[connection]]
source = "start"
target = "end"
"#;

    #[test]
    fn test_load_scene() {
        let diagram = Scene::from_str(SCENE).unwrap().into_diagram().unwrap();

        assert_eq!(diagram.len(), 3);
        assert!(diagram.is_connected(&"start".into(), &"end".into()));

        let label = diagram.shape(&"label".into()).unwrap();
        assert_eq!(label.bounds, Bounds::new(40.0, 70.0, 20.0, 20.0));
        let attachers: Vec<&str> = diagram
            .attachers(&"start".into())
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(attachers, vec!["label"]);
    }

    #[test]
    fn test_dump_keeps_order_and_references() {
        let scene = Scene::from_str(SCENE).unwrap();
        let diagram = scene.clone().into_diagram().unwrap();

        let dumped = Scene::from_diagram(&diagram);
        assert_eq!(dumped, scene);

        let reparsed = Scene::from_str(&dumped.to_toml_string().unwrap()).unwrap();
        assert_eq!(reparsed, scene);
    }

    #[test]
    fn test_empty_scene() {
        let diagram = Scene::from_str("").unwrap().into_diagram().unwrap();
        assert!(diagram.is_empty());
    }

    #[test]
    fn test_host_must_come_first() {
        let content = r#"
[[shape]]
id = "label"
x = 0
y = 0
width = 10
height = 10
host = "task"
"#;
        let result = Scene::from_str(content).unwrap().into_diagram();
        assert!(matches!(
            result,
            Err(SceneError::Model(ModelError::UnknownShape { .. }))
        ));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let content = "[[shape]]\nid = \"a\"\nx = 0\ny = 0\nwidth = 1\nheight = 1\ncolor = \"red\"\n";
        assert!(matches!(
            Scene::from_str(content),
            Err(SceneError::ParseError(_))
        ));
    }
}
