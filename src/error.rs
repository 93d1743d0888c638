//! Top-level error type for the scene pipeline

use thiserror::Error;

use crate::place::{ConfigError, PlaceError};
use crate::scene::SceneError;

/// Errors that can occur while auto-placing into a scene
#[derive(Debug, Error)]
pub enum AutoPlaceError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("placement error: {0}")]
    Place(#[from] PlaceError),
}
