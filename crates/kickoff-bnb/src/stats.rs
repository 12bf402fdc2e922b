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

use kickoff_core::num::ops::saturating_arithmetic::SaturatingAddVal;
use kickoff_model::objective::Score;
use std::time::Duration;

/// Statistics collected during a branch-and-bound search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverStatistics {
    /// Total nodes visited.
    pub nodes_explored: u64,
    /// Total returns from a child node to its parent.
    pub backtracks: u64,
    /// Total copy counts tried across all nodes.
    pub takes_tried: u64,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Nodes pruned because their upper bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Copy loops cut short because no smaller take could beat the incumbent.
    pub prunings_dominance: u64,
    /// Nodes skipped because their residual state was already expanded.
    pub memo_hits: u64,
    /// Residual states stored when the search ended.
    pub memo_size: u64,
    /// Total improving solutions found, the seed included.
    pub solutions_found: u64,
    /// Loop iterations, as seen by the monitors.
    pub steps: u64,
    /// Score of the greedy seed.
    pub seed_score: Score,
    /// Upper bound at the root node.
    pub root_upper_bound: Score,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl Default for BnbSolverStatistics {
    fn default() -> Self {
        Self {
            nodes_explored: 0,
            backtracks: 0,
            takes_tried: 0,
            max_depth: 0,
            prunings_bound: 0,
            prunings_dominance: 0,
            memo_hits: 0,
            memo_size: 0,
            solutions_found: 0,
            steps: 0,
            seed_score: 0,
            root_upper_bound: 0,
            time_total: Duration::ZERO,
        }
    }
}

impl BnbSolverStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add_val(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add_val(1);
    }

    #[inline]
    pub fn on_take_tried(&mut self) {
        self.takes_tried = self.takes_tried.saturating_add_val(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add_val(1);
    }

    #[inline]
    pub fn on_pruning_dominance(&mut self) {
        self.prunings_dominance = self.prunings_dominance.saturating_add_val(1);
    }

    #[inline]
    pub fn on_memo_hit(&mut self) {
        self.memo_hits = self.memo_hits.saturating_add_val(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add_val(1);
    }

    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add_val(1);
    }

    #[inline]
    pub fn set_memo_size(&mut self, size: usize) {
        self.memo_size = size as u64;
    }

    #[inline]
    pub fn set_seed_score(&mut self, score: Score) {
        self.seed_score = score;
    }

    #[inline]
    pub fn set_root_upper_bound(&mut self, bound: Score) {
        self.root_upper_bound = bound;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Kickoff-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:            {}", self.backtracks)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Takes tried:           {}", self.takes_tried)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (dominance):  {}", self.prunings_dominance)?;
        writeln!(f, "  Memo hits:             {}", self.memo_hits)?;
        writeln!(f, "  Memo size:             {}", self.memo_size)?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        writeln!(f, "  Seed score:            {}", self.seed_score)?;
        writeln!(f, "  Root upper bound:      {}", self.root_upper_bound)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_saturate() {
        let mut stats = BnbSolverStatistics {
            nodes_explored: u64::MAX,
            ..Default::default()
        };
        stats.on_node_explored();
        assert_eq!(stats.nodes_explored, u64::MAX);
    }

    #[test]
    fn test_depth_keeps_maximum() {
        let mut stats = BnbSolverStatistics::default();
        stats.on_depth_update(4);
        stats.on_depth_update(2);
        assert_eq!(stats.max_depth, 4);
    }

    #[test]
    fn test_display_lists_counters() {
        let mut stats = BnbSolverStatistics::default();
        stats.on_memo_hit();
        stats.set_seed_score(7);
        let text = stats.to_string();
        assert!(text.contains("Memo hits:             1"));
        assert!(text.contains("Seed score:            7"));
    }
}
