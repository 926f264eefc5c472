//! Configuration for the bundled constraint solver
//!
//! Loadable from TOML:
//!
//! ```toml
//! [solver]
//! edit_strength = 1000000.0
//! strength_per_priority = 1000.0
//!
//! [safe_area]
//! top = 44
//! bottom = 34
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::types::EdgeInsets;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration options for constraint solving
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Strength of suggested frames and safe-area insets
    pub edit_strength: f64,

    /// Solver strength per unit of non-required priority
    pub strength_per_priority: f64,

    /// Insets used for a view's safe area until set explicitly
    pub safe_area_insets: EdgeInsets,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            edit_strength: 1_000_000.0,
            strength_per_priority: 1_000.0,
            safe_area_insets: EdgeInsets::zero(),
        }
    }
}

/// TOML structure for deserializing configuration
#[derive(Deserialize)]
struct TomlConfig {
    solver: Option<TomlSolver>,
    safe_area: Option<EdgeInsets>,
}

#[derive(Deserialize)]
struct TomlSolver {
    edit_strength: Option<f64>,
    strength_per_priority: Option<f64>,
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string; missing keys keep defaults
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(solver) = parsed.solver {
            if let Some(strength) = solver.edit_strength {
                config.edit_strength = strength;
            }
            if let Some(scale) = solver.strength_per_priority {
                config.strength_per_priority = scale;
            }
        }
        if let Some(insets) = parsed.safe_area {
            config.safe_area_insets = insets;
        }

        Ok(config)
    }

    /// Set the strength of suggested frames and insets
    pub fn with_edit_strength(mut self, strength: f64) -> Self {
        self.edit_strength = strength;
        self
    }

    /// Set the solver strength per unit of priority
    pub fn with_strength_per_priority(mut self, scale: f64) -> Self {
        self.strength_per_priority = scale;
        self
    }

    /// Set the default safe-area insets
    pub fn with_safe_area_insets(mut self, insets: EdgeInsets) -> Self {
        self.safe_area_insets = insets;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.edit_strength, 1_000_000.0);
        assert_eq!(config.strength_per_priority, 1_000.0);
        assert_eq!(config.safe_area_insets, EdgeInsets::zero());
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_edit_strength(500.0)
            .with_safe_area_insets(EdgeInsets::new(20.0, 0.0, 0.0, 0.0));

        assert_eq!(config.edit_strength, 500.0);
        assert_eq!(config.safe_area_insets.top, 20.0);
    }

    #[test]
    fn test_parse_toml() {
        let config = LayoutConfig::from_toml(
            r#"
[solver]
strength_per_priority = 10.0

[safe_area]
top = 44
bottom = 34
"#,
        )
        .expect("Should parse");
        assert_eq!(config.strength_per_priority, 10.0);
        assert_eq!(config.edit_strength, 1_000_000.0);
        assert_eq!(config.safe_area_insets, EdgeInsets::new(44.0, 0.0, 34.0, 0.0));
    }

    #[test]
    fn test_empty_toml_keeps_defaults() {
        let config = LayoutConfig::from_toml("").expect("Should parse");
        assert_eq!(config, LayoutConfig::default());
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = LayoutConfig::from_toml("this is not valid toml {{{{");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
