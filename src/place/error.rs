//! Error types for auto-placement

use thiserror::Error;

use crate::geometry::Point;
use crate::model::ModelError;

/// Errors that can occur while placing a shape
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaceError {
    /// The modeling collaborator rejected a read or a mutation
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The free-position search ran out of steps
    #[error("no free position found after {steps} steps (last tried {at})")]
    SearchExhausted { steps: usize, at: Point },

    /// The stepping function did not move away from an occupied position
    #[error("position search stuck at {at}")]
    NotProgressing { at: Point },
}

impl PlaceError {
    /// Whether the error comes from a misconfigured search rather than the model
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::SearchExhausted { .. } | Self::NotProgressing { .. }
        )
    }
}
