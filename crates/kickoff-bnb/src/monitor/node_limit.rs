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

use crate::{
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use kickoff_model::{model::Model, objective::Score};

/// Stops the search once a number of nodes has been explored.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NodeLimitMonitor {
    node_limit: u64,
}

impl NodeLimitMonitor {
    /// Creates a new `NodeLimitMonitor` that stops after `node_limit` nodes.
    #[inline]
    pub fn new(node_limit: u64) -> Self {
        Self { node_limit }
    }

    #[inline]
    pub fn node_limit(&self) -> u64 {
        self.node_limit
    }
}

impl TreeSearchMonitor for NodeLimitMonitor {
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn on_enter_search(&mut self, _model: &Model, _statistics: &BnbSolverStatistics) {}

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}

    fn search_command(
        &mut self,
        _state: &SearchState,
        statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        if statistics.nodes_explored >= self.node_limit {
            return SearchCommand::Terminate(format!(
                "Node limit of {} nodes exceeded",
                self.node_limit
            ));
        }
        SearchCommand::Continue
    }

    fn on_step(&mut self, _state: &SearchState, _statistics: &BnbSolverStatistics) {}

    fn on_prune(
        &mut self,
        _state: &SearchState,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_descend(&mut self, _state: &SearchState, _take: u32, _statistics: &BnbSolverStatistics) {}

    fn on_backtrack(&mut self, _state: &SearchState, _statistics: &BnbSolverStatistics) {}

    fn on_solution_found(&mut self, _score: Score, _statistics: &BnbSolverStatistics) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use kickoff_model::{catalog::Catalog, inventory::Inventory, model::ModelBuilder};

    #[test]
    fn test_terminates_at_limit() {
        let catalog = Catalog::default();
        let inventory = Inventory::new();
        let model = ModelBuilder::new(&catalog, &inventory).build();
        let state = SearchState::new(&model, 0);
        let mut monitor = NodeLimitMonitor::new(10);
        let mut stats = BnbSolverStatistics::default();

        stats.nodes_explored = 9;
        assert_eq!(monitor.search_command(&state, &stats), SearchCommand::Continue);
        stats.nodes_explored = 10;
        assert_eq!(
            monitor.search_command(&state, &stats),
            SearchCommand::Terminate("Node limit of 10 nodes exceeded".to_string())
        );
    }
}
