//! Error types for the diagram model

use thiserror::Error;

use super::types::{ConnectionId, ShapeId};

/// Errors raised by diagram reads and modeling operations
///
/// Modeling operations validate everything up front, so an error always
/// means the diagram was left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Reference to a shape that is not in the diagram
    #[error("unknown shape '{id}'")]
    UnknownShape { id: ShapeId },

    /// A shape with this identifier already exists
    #[error("shape '{id}' already exists")]
    DuplicateShape { id: ShapeId },

    /// Reference to a connection that is not in the diagram
    #[error("unknown connection '{id}'")]
    UnknownConnection { id: ConnectionId },

    /// Connections must join two different shapes
    #[error("cannot connect shape '{id}' to itself")]
    SelfConnection { id: ShapeId },
}

impl ModelError {
    pub fn unknown_shape(id: &ShapeId) -> Self {
        Self::UnknownShape { id: id.clone() }
    }

    pub fn duplicate_shape(id: &ShapeId) -> Self {
        Self::DuplicateShape { id: id.clone() }
    }

    /// The shape the error is about, if any
    pub fn shape(&self) -> Option<&ShapeId> {
        match self {
            Self::UnknownShape { id } | Self::DuplicateShape { id } | Self::SelfConnection { id } => {
                Some(id)
            }
            Self::UnknownConnection { .. } => None,
        }
    }
}
