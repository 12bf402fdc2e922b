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

//! # Combo Optimizer
//!
//! The high-level entry point. `ComboOptimizer` preprocesses a catalog and
//! an inventory into a `Model`, assembles the monitor stack from its limits
//! and runs the branch-and-bound engine.
//!
//! ## Termination
//!
//! - A wall-clock deadline (`TimeLimitMonitor`), 10 s unless configured.
//! - An optional node budget (`NodeLimitMonitor`).
//! - Progress events every `progress_interval` (`LogTreeSearchMonitor`).
//!
//! Hitting a limit never loses the result: the best assignment found so far
//! is returned with an `Aborted` termination reason.
//!
//! ## Usage
//!
//! ```rust
//! use kickoff_model::{catalog::Catalog, combo::ComboDefinition, inventory::Inventory};
//! use kickoff_solver::solver::ComboOptimizer;
//!
//! let catalog: Catalog = vec![
//!     ComboDefinition::new("X", "FW").with_slot(0, "A").with_slot(1, "B"),
//!     ComboDefinition::new("Y", "FW").with_slot(0, "A"),
//! ]
//! .into_iter()
//! .collect();
//! let inventory = Inventory::new().with("A", 2).with("B", 1);
//!
//! let optimization = ComboOptimizer::builder().build().optimize(&catalog, &inventory);
//! assert!(optimization.is_optimal());
//! assert_eq!(optimization.score(), 3);
//! ```

use crate::config::{DEFAULT_TIME_LIMIT, SolverConfig};
use kickoff_bnb::{
    bnb::BnbSolver,
    memo::DEFAULT_MEMO_CAPACITY,
    monitor::{
        composite::CompositeTreeSearchMonitor, log::LogTreeSearchMonitor,
        node_limit::NodeLimitMonitor, time_limit::TimeLimitMonitor,
    },
    result::{BnbSolverOutcome, TerminationReason},
    stats::BnbSolverStatistics,
};
use kickoff_model::{
    catalog::Catalog,
    combo::ComboDefinition,
    inventory::Inventory,
    model::{Model, ModelBuilder},
    objective::{CategoryLimit, DEFAULT_RESTRICTED_MARKER, ObjectiveMode, Score},
    solution::Solution,
};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Clock reads of the progress logger happen every 4,096 nodes.
const PROGRESS_CLOCK_CHECK_MASK: u64 = 4_095;

/// Finds the best set of combos for an inventory.
#[derive(Debug, Clone)]
pub struct ComboOptimizer {
    objective: ObjectiveMode,
    category_limit: CategoryLimit,
    restricted_marker: String,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    memo_capacity: usize,
    progress_interval: Duration,
}

impl Default for ComboOptimizer {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ComboOptimizer {
    /// Creates an optimizer from a configuration.
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            objective: config.objective,
            category_limit: config.category_limit,
            restricted_marker: config.restricted_marker.clone(),
            time_limit: config.time_limit(),
            node_limit: config.node_limit(),
            memo_capacity: config.search.memo_capacity,
            progress_interval: config.progress_interval(),
        }
    }

    #[inline]
    pub fn builder() -> ComboOptimizerBuilder {
        ComboOptimizerBuilder::new()
    }

    #[inline]
    pub fn objective(&self) -> ObjectiveMode {
        self.objective
    }

    #[inline]
    pub fn category_limit(&self) -> CategoryLimit {
        self.category_limit
    }

    #[inline]
    pub fn restricted_marker(&self) -> &str {
        &self.restricted_marker
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn node_limit(&self) -> Option<u64> {
        self.node_limit
    }

    #[inline]
    pub fn memo_capacity(&self) -> usize {
        self.memo_capacity
    }

    /// Builds the model for `catalog` and `inventory` with this optimizer's
    /// objective and restriction settings.
    pub fn build_model(&self, catalog: &Catalog, inventory: &Inventory) -> Model {
        ModelBuilder::new(catalog, inventory)
            .objective(self.objective)
            .category_limit(self.category_limit)
            .restricted_marker(self.restricted_marker.as_str())
            .build()
    }

    /// Runs the optimization. Always returns a feasible assignment.
    pub fn optimize(&self, catalog: &Catalog, inventory: &Inventory) -> Optimization {
        let start = Instant::now();
        let model = self.build_model(catalog, inventory);

        info!(
            event = "optimize_started",
            combos = catalog.len(),
            entries = model.num_entries(),
            makeable = model.num_makeable(),
            resources = model.num_resources(),
            objective = %self.objective,
            limit = %self.category_limit,
        );
        debug!(
            event = "optimize_limits",
            time_limit_ms = self.time_limit.map(|d| d.as_millis() as u64),
            node_limit = self.node_limit,
            memo_capacity = self.memo_capacity,
        );

        let mut monitor = CompositeTreeSearchMonitor::with_capacity(3);
        monitor.add_monitor(LogTreeSearchMonitor::new(
            self.progress_interval,
            PROGRESS_CLOCK_CHECK_MASK,
        ));
        if let Some(limit) = self.time_limit {
            monitor.add_monitor(TimeLimitMonitor::with_default_check_interval(limit));
        }
        if let Some(limit) = self.node_limit {
            monitor.add_monitor(NodeLimitMonitor::new(limit));
        }

        let outcome = BnbSolver::with_memo_capacity(self.memo_capacity).solve(&model, monitor);

        info!(
            event = "optimize_finished",
            score = outcome.score(),
            combos = outcome.solution().total_copies(),
            nodes = outcome.statistics().nodes_explored,
            termination = %outcome.termination_reason(),
            elapsed = ?start.elapsed(),
        );

        Optimization { model, outcome }
    }
}

/// Configures a `ComboOptimizer`.
#[derive(Debug, Clone)]
pub struct ComboOptimizerBuilder {
    objective: ObjectiveMode,
    category_limit: CategoryLimit,
    restricted_marker: String,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    memo_capacity: usize,
    progress_interval: Duration,
}

impl Default for ComboOptimizerBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ComboOptimizerBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            objective: ObjectiveMode::default(),
            category_limit: CategoryLimit::Unlimited,
            restricted_marker: DEFAULT_RESTRICTED_MARKER.to_string(),
            time_limit: Some(DEFAULT_TIME_LIMIT),
            node_limit: None,
            memo_capacity: DEFAULT_MEMO_CAPACITY,
            progress_interval: Duration::from_secs(1),
        }
    }

    #[inline]
    pub fn objective(mut self, objective: ObjectiveMode) -> Self {
        self.objective = objective;
        self
    }

    #[inline]
    pub fn category_limit(mut self, limit: CategoryLimit) -> Self {
        self.category_limit = limit;
        self
    }

    #[inline]
    pub fn restricted_marker<S>(mut self, marker: S) -> Self
    where
        S: Into<String>,
    {
        self.restricted_marker = marker.into();
        self
    }

    /// Sets the wall-clock budget. `None` searches until optimality is proven.
    #[inline]
    pub fn time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    #[inline]
    pub fn node_limit(mut self, limit: Option<u64>) -> Self {
        self.node_limit = limit;
        self
    }

    #[inline]
    pub fn memo_capacity(mut self, capacity: usize) -> Self {
        self.memo_capacity = capacity;
        self
    }

    #[inline]
    pub fn progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    #[inline]
    pub fn build(self) -> ComboOptimizer {
        ComboOptimizer {
            objective: self.objective,
            category_limit: self.category_limit,
            restricted_marker: self.restricted_marker,
            time_limit: self.time_limit,
            node_limit: self.node_limit,
            memo_capacity: self.memo_capacity,
            progress_interval: self.progress_interval,
        }
    }
}

/// The result of `ComboOptimizer::optimize`.
#[derive(Debug, Clone)]
pub struct Optimization {
    model: Model,
    outcome: BnbSolverOutcome,
}

impl Optimization {
    #[inline]
    pub fn solution(&self) -> &Solution {
        self.outcome.solution()
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.outcome.score()
    }

    /// Returns the selected combos with their copy counts.
    #[inline]
    pub fn assignment<'c>(&self, catalog: &'c Catalog) -> Vec<(&'c ComboDefinition, u32)> {
        self.solution().assignment(catalog)
    }

    /// Returns one catalog reference per selected copy.
    #[inline]
    pub fn expanded<'c>(&self, catalog: &'c Catalog) -> Vec<&'c ComboDefinition> {
        self.solution().expanded(catalog)
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        self.outcome.termination_reason()
    }

    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        self.outcome.statistics()
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        self.outcome.is_optimal()
    }

    /// Returns the model the search ran on.
    #[inline]
    pub fn model(&self) -> &Model {
        &self.model
    }

    #[inline]
    pub fn outcome(&self) -> &BnbSolverOutcome {
        &self.outcome
    }
}

impl std::fmt::Display for Optimization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on {}", self.outcome, self.model)
    }
}
