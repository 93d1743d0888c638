//! Configuration for auto-placement

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::hints::Direction;

/// Distance kept between a source and an appended shape when nothing better is known
pub const DEFAULT_DISTANCE: f64 = 50.0;

/// Longest connection taken into account when inferring a distance
pub const DEFAULT_MAX_DISTANCE: f64 = 250.0;

/// Extra clearance required around connected shapes when checking occupancy
pub const PLACEMENT_DETECTION_PAD: f64 = 10.0;

/// Upper bound on free-position search steps
pub const DEFAULT_MAX_SEARCH_STEPS: usize = 1000;

/// Errors that can occur when loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid config value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// How far to step along one axis when a candidate position is taken
///
/// A negative `margin` steps towards smaller coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AxisStep {
    pub margin: f64,
    pub min_distance: f64,
}

impl AxisStep {
    pub fn new(margin: f64, min_distance: f64) -> Self {
        Self {
            margin,
            min_distance,
        }
    }
}

/// Axes the free-position search may move along
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NextPositionDirections {
    pub x: Option<AxisStep>,
    pub y: Option<AxisStep>,
}

impl NextPositionDirections {
    pub fn x(step: AxisStep) -> Self {
        Self {
            x: Some(step),
            y: None,
        }
    }

    pub fn y(step: AxisStep) -> Self {
        Self {
            x: None,
            y: Some(step),
        }
    }
}

/// Configuration options for auto-placement
#[derive(Debug, Clone, PartialEq)]
pub struct AutoPlaceConfig {
    /// Distance used when no connection can be measured
    pub default_distance: f64,

    /// Shortest connection distance taken into account
    pub min_distance: f64,

    /// Longest connection distance taken into account
    pub max_distance: f64,

    /// Default side for new shapes
    pub direction: Direction,

    /// Step used across the placement direction when a position is taken
    pub step: AxisStep,

    /// Clearance around connected shapes when checking occupancy
    pub detection_padding: f64,

    /// Steps after which the free-position search gives up
    pub max_search_steps: usize,

    /// Select the new shape after appending it
    pub select_on_append: bool,
}

impl Default for AutoPlaceConfig {
    fn default() -> Self {
        Self {
            default_distance: DEFAULT_DISTANCE,
            min_distance: 0.0,
            max_distance: DEFAULT_MAX_DISTANCE,
            direction: Direction::East,
            step: AxisStep::new(30.0, 80.0),
            detection_padding: PLACEMENT_DETECTION_PAD,
            max_search_steps: DEFAULT_MAX_SEARCH_STEPS,
            select_on_append: true,
        }
    }
}

/// TOML structure for deserializing a configuration
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    default_distance: Option<f64>,
    min_distance: Option<f64>,
    max_distance: Option<f64>,
    direction: Option<Direction>,
    step: Option<AxisStep>,
    detection_padding: Option<f64>,
    max_search_steps: Option<usize>,
    select_on_append: Option<bool>,
}

impl AutoPlaceConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let config = Self {
            default_distance: parsed.default_distance.unwrap_or(defaults.default_distance),
            min_distance: parsed.min_distance.unwrap_or(defaults.min_distance),
            max_distance: parsed.max_distance.unwrap_or(defaults.max_distance),
            direction: parsed.direction.unwrap_or(defaults.direction),
            step: parsed.step.unwrap_or(defaults.step),
            detection_padding: parsed.detection_padding.unwrap_or(defaults.detection_padding),
            max_search_steps: parsed.max_search_steps.unwrap_or(defaults.max_search_steps),
            select_on_append: parsed.select_on_append.unwrap_or(defaults.select_on_append),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_distance > self.max_distance {
            return Err(ConfigError::InvalidValue {
                key: "min_distance",
                reason: format!(
                    "{} is greater than max_distance {}",
                    self.min_distance, self.max_distance
                ),
            });
        }
        if self.step.min_distance < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "step.min_distance",
                reason: "must not be negative".to_string(),
            });
        }
        if self.max_search_steps == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_search_steps",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Set the fallback distance
    pub fn with_default_distance(mut self, distance: f64) -> Self {
        self.default_distance = distance;
        self
    }

    /// Set the accepted range of connection distances
    pub fn with_distance_range(mut self, min: f64, max: f64) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Set the default placement direction
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the cross-axis search step
    pub fn with_step(mut self, margin: f64, min_distance: f64) -> Self {
        self.step = AxisStep::new(margin, min_distance);
        self
    }

    /// Disable or enable selecting appended shapes
    pub fn with_select_on_append(mut self, select: bool) -> Self {
        self.select_on_append = select;
        self
    }

    /// Search axes used by the built-in placement for `direction`
    ///
    /// Shapes placed east or west are shifted vertically, shapes placed north
    /// or south horizontally.
    pub fn next_position_directions(&self, direction: Direction) -> NextPositionDirections {
        if direction.is_horizontal() {
            NextPositionDirections::y(self.step)
        } else {
            NextPositionDirections::x(self.step)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AutoPlaceConfig::default();
        assert_eq!(config.default_distance, 50.0);
        assert_eq!(config.min_distance, 0.0);
        assert_eq!(config.max_distance, 250.0);
        assert_eq!(config.direction, Direction::East);
        assert_eq!(config.step, AxisStep::new(30.0, 80.0));
        assert_eq!(config.detection_padding, 10.0);
        assert_eq!(config.max_search_steps, 1000);
        assert!(config.select_on_append);
    }

    #[test]
    fn test_builder_pattern() {
        let config = AutoPlaceConfig::new()
            .with_default_distance(80.0)
            .with_direction(Direction::South)
            .with_step(-20.0, 40.0);

        assert_eq!(config.default_distance, 80.0);
        assert_eq!(config.direction, Direction::South);
        assert_eq!(config.step, AxisStep::new(-20.0, 40.0));
    }

    #[test]
    fn test_from_str_partial() {
        let config = AutoPlaceConfig::from_str(
            r#"
default_distance = 75
direction = "s"

[step]
margin = 20
min_distance = 60
"#,
        )
        .unwrap();

        assert_eq!(config.default_distance, 75.0);
        assert_eq!(config.direction, Direction::South);
        assert_eq!(config.step, AxisStep::new(20.0, 60.0));
        assert_eq!(config.max_distance, DEFAULT_MAX_DISTANCE);
    }

    #[test]
    fn test_from_str_rejects_unknown_keys() {
        let result = AutoPlaceConfig::from_str("spacing = 10");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_from_str_rejects_inverted_range() {
        let result = AutoPlaceConfig::from_str("min_distance = 300\nmax_distance = 200");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: "min_distance",
                ..
            })
        ));
    }

    #[test]
    fn test_next_position_directions() {
        let config = AutoPlaceConfig::default();
        assert_eq!(
            config.next_position_directions(Direction::East),
            NextPositionDirections::y(config.step)
        );
        assert_eq!(
            config.next_position_directions(Direction::North),
            NextPositionDirections::x(config.step)
        );
    }
}
