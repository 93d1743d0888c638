//! Automatic placement of appended shapes
//!
//! - [`distance`] infers the spacing already used around a shape
//! - [`search`] walks away from occupied positions
//! - [`engine`] ties both together behind [`AutoPlace`]

pub mod config;
pub mod distance;
pub mod engine;
pub mod error;
pub mod hints;
pub mod search;

pub use config::{
    AutoPlaceConfig, AxisStep, ConfigError, NextPositionDirections, DEFAULT_DISTANCE,
    DEFAULT_MAX_DISTANCE, DEFAULT_MAX_SEARCH_STEPS, PLACEMENT_DETECTION_PAD,
};
pub use distance::{connected_distance, connected_distance_with, directional_distance};
pub use engine::{default_position, AutoPlace, ComputeFn, Flow, PlaceEvent, PlacementListener};
pub use error::PlaceError;
pub use hints::{
    ConnectionFilter, ConnectionWeight, Direction, ParseDirectionError, PlacementHints, Reference,
};
pub use search::{
    auto_place_closure, connected_at_position, connected_at_position_with, find_free_position,
    find_free_position_with, generate_next_position, SearchLimits,
};
