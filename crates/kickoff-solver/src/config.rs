// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Configuration for the optimizer.
//!
//! Configuration is read from TOML. Every field has a default, so an empty
//! file is a valid configuration.
//!
//! # Examples
//!
//! ```
//! use kickoff_model::objective::{CategoryLimit, ObjectiveMode};
//! use kickoff_solver::config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     objective = "skills"
//!     category_limit = 2
//!
//!     [termination]
//!     millis_spent_limit = 500
//! "#).unwrap();
//!
//! assert_eq!(config.objective, ObjectiveMode::Skills);
//! assert_eq!(config.category_limit, CategoryLimit::AtMost(2));
//! assert_eq!(config.time_limit(), Some(Duration::from_millis(500)));
//! ```
//!
//! Fall back to defaults when the file is missing:
//!
//! ```
//! use kickoff_solver::config::SolverConfig;
//!
//! let config = SolverConfig::load("kickoff.toml").unwrap_or_default();
//! assert_eq!(config.restricted_marker, "GK");
//! ```

use kickoff_bnb::memo::DEFAULT_MEMO_CAPACITY;
use kickoff_model::{
    inventory::{Inventory, InventoryBounds, InventoryError},
    objective::{CategoryLimit, DEFAULT_RESTRICTED_MARKER, ObjectiveMode},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path, time::Duration};
use thiserror::Error;

/// The wall-clock budget used when no termination limit is configured.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(10);

/// The progress logging interval used when none is configured.
pub const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 1_000;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid inventory: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main optimizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// What to maximize.
    #[serde(default)]
    pub objective: ObjectiveMode,

    /// Cap on restricted-category copies, `"none"` or an integer.
    #[serde(default)]
    pub category_limit: CategoryLimit,

    /// Case-insensitive substring that marks a category as restricted.
    #[serde(default = "default_restricted_marker")]
    pub restricted_marker: String,

    #[serde(default)]
    pub termination: TerminationConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub inventory: InventoryConfig,
}

fn default_restricted_marker() -> String {
    DEFAULT_RESTRICTED_MARKER.to_string()
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            objective: ObjectiveMode::default(),
            category_limit: CategoryLimit::default(),
            restricted_marker: default_restricted_marker(),
            termination: TerminationConfig::default(),
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
            inventory: InventoryConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Checks the cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inventory.min_count > self.inventory.max_count {
            return Err(ConfigError::Invalid(format!(
                "inventory.min_count {} is greater than inventory.max_count {}",
                self.inventory.min_count, self.inventory.max_count
            )));
        }
        if self.logging.progress_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "logging.progress_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the objective.
    pub fn with_objective(mut self, objective: ObjectiveMode) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the restricted-category limit.
    pub fn with_category_limit(mut self, limit: CategoryLimit) -> Self {
        self.category_limit = limit;
        self
    }

    /// Sets the termination time limit in milliseconds. Zero disables it.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = TerminationConfig {
            seconds_spent_limit: None,
            millis_spent_limit: Some(millis),
            ..self.termination
        };
        self
    }

    /// Sets the node budget.
    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.termination.node_limit = Some(nodes);
        self
    }

    /// Returns the wall-clock budget.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.time_limit()
    }

    /// Returns the node budget, if configured.
    pub fn node_limit(&self) -> Option<u64> {
        self.termination.node_limit
    }

    /// Returns the bounds inventory input must respect.
    pub fn inventory_bounds(&self) -> InventoryBounds {
        InventoryBounds::new(self.inventory.min_count, self.inventory.max_count)
    }

    /// Returns the interval between progress log events.
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.logging.progress_interval_ms)
    }
}

/// Termination configuration.
///
/// Leaving both time fields unset applies `DEFAULT_TIME_LIMIT`. Setting them
/// to a total of zero disables the deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the seconds.
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of explored nodes.
    pub node_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        if self.seconds_spent_limit.is_none() && self.millis_spent_limit.is_none() {
            return Some(DEFAULT_TIME_LIMIT);
        }
        let millis = self
            .seconds_spent_limit
            .unwrap_or(0)
            .saturating_mul(1_000)
            .saturating_add(self.millis_spent_limit.unwrap_or(0));
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}

/// Search engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Maximum number of memoized residual states. Zero disables the memo.
    #[serde(default = "default_memo_capacity")]
    pub memo_capacity: usize,
}

fn default_memo_capacity() -> usize {
    DEFAULT_MEMO_CAPACITY
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            memo_capacity: DEFAULT_MEMO_CAPACITY,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,
}

fn default_progress_interval_ms() -> u64 {
    DEFAULT_PROGRESS_INTERVAL_MS
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            progress_interval_ms: DEFAULT_PROGRESS_INTERVAL_MS,
        }
    }
}

/// Accepted range of per-card inventory counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InventoryConfig {
    #[serde(default)]
    pub min_count: u32,
    #[serde(default = "default_max_count")]
    pub max_count: u32,
}

fn default_max_count() -> u32 {
    InventoryBounds::default().max
}

impl Default for InventoryConfig {
    fn default() -> Self {
        let bounds = InventoryBounds::default();
        Self {
            min_count: bounds.min,
            max_count: bounds.max,
        }
    }
}

/// Parses an inventory from a TOML table of `"Card name" = count` pairs,
/// checking every count against `bounds`.
pub fn inventory_from_toml_str(s: &str, bounds: InventoryBounds) -> Result<Inventory, ConfigError> {
    let raw: BTreeMap<String, i64> = toml::from_str(s)?;
    let mut inventory = Inventory::new();
    for (name, count) in raw {
        inventory.set_bounded(name, count, bounds)?;
    }
    Ok(inventory)
}

/// Loads an inventory file. See `inventory_from_toml_str`.
pub fn inventory_from_toml_file(
    path: impl AsRef<Path>,
    bounds: InventoryBounds,
) -> Result<Inventory, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    inventory_from_toml_str(&contents, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SolverConfig::from_toml_str("").unwrap();
        assert_eq!(config, SolverConfig::default());
        assert_eq!(config.objective, ObjectiveMode::Cards);
        assert_eq!(config.category_limit, CategoryLimit::Unlimited);
        assert_eq!(config.restricted_marker, "GK");
        assert_eq!(config.time_limit(), Some(Duration::from_secs(10)));
        assert_eq!(config.node_limit(), None);
        assert_eq!(config.search.memo_capacity, 1_000_000);
        assert_eq!(config.progress_interval(), Duration::from_millis(1_000));
        assert_eq!(config.inventory_bounds(), InventoryBounds::new(0, 10));
    }

    #[test]
    fn test_full_document() {
        let toml = r#"
            objective = "skills"
            category_limit = "3"
            restricted_marker = "Keeper"

            [termination]
            seconds_spent_limit = 2
            millis_spent_limit = 250
            node_limit = 5000

            [search]
            memo_capacity = 0

            [logging]
            progress_interval_ms = 200

            [inventory]
            max_count = 99
        "#;

        let config = SolverConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.objective, ObjectiveMode::Skills);
        assert_eq!(config.category_limit, CategoryLimit::AtMost(3));
        assert_eq!(config.restricted_marker, "Keeper");
        assert_eq!(config.time_limit(), Some(Duration::from_millis(2_250)));
        assert_eq!(config.node_limit(), Some(5_000));
        assert_eq!(config.search.memo_capacity, 0);
        assert_eq!(config.progress_interval(), Duration::from_millis(200));
        assert_eq!(config.inventory_bounds(), InventoryBounds::new(0, 99));
    }

    #[test]
    fn test_zero_time_limit_disables_deadline() {
        let config = SolverConfig::from_toml_str("[termination]\nseconds_spent_limit = 0\n").unwrap();
        assert_eq!(config.time_limit(), None);

        let config = SolverConfig::new().with_termination_millis(0);
        assert_eq!(config.time_limit(), None);
    }

    #[test]
    fn test_category_limit_validation() {
        let config = SolverConfig::from_toml_str("category_limit = \"none\"").unwrap();
        assert_eq!(config.category_limit, CategoryLimit::Unlimited);

        let config = SolverConfig::from_toml_str("category_limit = 0").unwrap();
        assert_eq!(config.category_limit, CategoryLimit::AtMost(0));

        assert!(matches!(
            SolverConfig::from_toml_str("category_limit = -1"),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            SolverConfig::from_toml_str("category_limit = \"two\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_unknown_objective_is_rejected() {
        assert!(matches!(
            SolverConfig::from_toml_str("objective = \"goals\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_invalid_cross_field_values() {
        let err = SolverConfig::from_toml_str("[inventory]\nmin_count = 5\nmax_count = 2\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SolverConfig::from_toml_str("[logging]\nprogress_interval_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_round_trip() {
        let config = SolverConfig::new()
            .with_objective(ObjectiveMode::Skills)
            .with_category_limit(CategoryLimit::AtMost(1))
            .with_termination_millis(750)
            .with_node_limit(42);

        let text = config.to_toml_string().unwrap();
        let parsed = SolverConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);

        let default_text = SolverConfig::default().to_toml_string().unwrap();
        assert_eq!(
            SolverConfig::from_toml_str(&default_text).unwrap(),
            SolverConfig::default()
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SolverConfig::load("/definitely/not/here/kickoff.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_inventory_from_toml() {
        let toml = r#"
            Running = 3
            "Place Kicks" = 2
            Judo = 0
        "#;
        let inventory = inventory_from_toml_str(toml, InventoryBounds::default()).unwrap();
        assert_eq!(inventory.count("Running"), 3);
        assert_eq!(inventory.count("Place Kicks"), 2);
        assert_eq!(inventory.count("Judo"), 0);
        assert_eq!(inventory.count("Spa"), 0);
    }

    #[test]
    fn test_inventory_counts_are_bounded() {
        let err = inventory_from_toml_str("Running = 11", InventoryBounds::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Inventory(InventoryError::OutOfBounds { count: 11, .. })
        ));

        let err = inventory_from_toml_str("Running = -1", InventoryBounds::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Inventory(_)));

        let inventory = inventory_from_toml_str("Running = 11", InventoryBounds::new(0, 20)).unwrap();
        assert_eq!(inventory.count("Running"), 11);
    }
}
