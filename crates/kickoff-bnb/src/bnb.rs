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

//! The branch-and-bound driver.
//!
//! The search walks the copy-count tree depth first without recursion. Each
//! open node owns a `Frame` on an explicit stack that iterates its copy count
//! from the largest feasible value down to zero; every take is applied
//! through the `SearchTrail` and undone before the next one is tried.
//!
//! On entering a node the session:
//! 1. records a terminal node as a candidate solution,
//! 2. prunes the node if `score + fractional_bound <= best`,
//! 3. records the node itself (all deeper counts zero) if it improves,
//! 4. skips the node if its residual state was already expanded with a
//!    score at least as high,
//! 5. opens a frame with the maximal take and the bound of the deeper
//!    entries at the node's inventory.
//!
//! After take `t` returns, smaller takes are abandoned once
//! `best >= score + (t - 1) * value + rest_bound`: the deeper bound only
//! shrinks as fewer copies are taken, so no smaller take can do better.

use crate::{
    assembler::assemble,
    bound::fractional_bound,
    greedy::GreedySeed,
    incumbent::Incumbent,
    memo::{DEFAULT_MEMO_CAPACITY, MemoTable, StateKey},
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    plan::SearchPlan,
    result::{BnbSolverOutcome, TerminationReason},
    state::SearchState,
    stats::BnbSolverStatistics,
    trail::SearchTrail,
};
use kickoff_core::num::ops::saturating_arithmetic::{SaturatingAddVal, SaturatingMulVal};
use kickoff_model::{index::EntryIndex, model::Model, objective::Score};
use tracing::debug;

/// An exact branch-and-bound solver.
///
/// The solver owns the reusable buffers of the search. Running it several
/// times reuses their allocations.
#[derive(Clone, Debug)]
pub struct BnbSolver {
    trail: SearchTrail,
    frames: Vec<Frame>,
    memo: MemoTable,
}

impl Default for BnbSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BnbSolver {
    /// Creates a new solver with the default memo capacity.
    #[inline]
    pub fn new() -> Self {
        Self::with_memo_capacity(DEFAULT_MEMO_CAPACITY)
    }

    /// Creates a new solver whose memo table stores at most `capacity`
    /// residual states. A capacity of 0 disables memoization.
    #[inline]
    pub fn with_memo_capacity(capacity: usize) -> Self {
        Self {
            trail: SearchTrail::new(),
            frames: Vec::new(),
            memo: MemoTable::new(capacity),
        }
    }

    /// Returns the memo capacity.
    #[inline]
    pub fn memo_capacity(&self) -> usize {
        self.memo.capacity()
    }

    /// Solves `model`, reporting to `monitor`.
    ///
    /// Always returns a solution. It is proven optimal unless the monitor
    /// terminated the search, in which case it is the best one found.
    pub fn solve<S>(&mut self, model: &Model, mut monitor: S) -> BnbSolverOutcome
    where
        S: TreeSearchMonitor,
    {
        let session = BnbSolverSearchSession::new(self, model, &mut monitor);
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Clears the trail, the frame stack and the memo, keeping allocations.
    #[inline]
    fn reset(&mut self) {
        self.trail.reset();
        self.frames.clear();
        self.memo.clear();
    }
}

/// An open node of the search tree.
#[derive(Clone, Copy, Debug)]
struct Frame {
    base_score: Score,
    value: Score,
    rest_bound: Score,
    entry: EntryIndex,
    depth: usize,
    next_take: Option<u32>,
    last_take: u32,
    applied: bool,
}

struct BnbSolverSearchSession<'a, S>
where
    S: TreeSearchMonitor,
{
    solver: &'a mut BnbSolver,
    model: &'a Model,
    monitor: &'a mut S,
    plan: SearchPlan,
    restricted_suffix: Vec<bool>,
    state: SearchState,
    incumbent: Incumbent,
    stats: BnbSolverStatistics,
    start_time: std::time::Instant,
}

impl<'a, S> std::fmt::Debug for BnbSolverSearchSession<'a, S>
where
    S: TreeSearchMonitor,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("plan", &self.plan)
            .field("state", &self.state)
            .field("incumbent", &self.incumbent)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, S> BnbSolverSearchSession<'a, S>
where
    S: TreeSearchMonitor,
{
    fn new(solver: &'a mut BnbSolver, model: &'a Model, monitor: &'a mut S) -> Self {
        let plan = SearchPlan::new(model);
        let restricted_suffix = (0..=plan.len())
            .map(|depth| plan.has_restricted_suffix(model, depth))
            .collect();
        let state = SearchState::new(model, plan.len());
        let incumbent = Incumbent::empty(plan.len());

        Self {
            solver,
            model,
            monitor,
            plan,
            restricted_suffix,
            state,
            incumbent,
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> BnbSolverOutcome {
        self.monitor.on_enter_search(self.model, &self.stats);
        self.initialize();

        let termination_reason = loop {
            self.monitor.on_step(&self.state, &self.stats);
            self.stats.on_step();

            if let SearchCommand::Terminate(msg) =
                self.monitor.search_command(&self.state, &self.stats)
            {
                break TerminationReason::Aborted(msg);
            }

            match self.solver.frames.len().checked_sub(1) {
                Some(top) => self.step(top),
                None => break TerminationReason::OptimalityProven,
            }
        };

        self.stats.set_memo_size(self.solver.memo.len());
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result(termination_reason)
    }

    /// Seeds the incumbent and opens the root node.
    fn initialize(&mut self) {
        self.solver.trail.ensure_capacity(self.plan.len());
        self.solver.frames.reserve(self.plan.len() + 1);

        let seed = GreedySeed::build(self.model, &self.plan);
        self.stats.set_seed_score(seed.score());
        if self.incumbent.try_update(seed.score(), seed.copies()) {
            self.stats.on_solution_found();
            self.monitor.on_solution_found(seed.score(), &self.stats);
        }

        let root_bound = fractional_bound(
            self.model,
            &self.plan,
            0,
            self.state.inventory(),
            self.state.headroom(),
        );
        self.stats.set_root_upper_bound(root_bound);

        debug!(
            event = "search_plan",
            depth = self.plan.len(),
            dropped = self.model.num_entries() - self.plan.len(),
            seed_score = seed.score(),
            root_upper_bound = root_bound,
        );

        self.enter_node();
    }

    /// Evaluates the node the state currently sits at and opens a frame
    /// for it unless it is terminal or pruned.
    fn enter_node(&mut self) {
        self.stats.on_node_explored();
        let depth = self.state.depth();
        self.stats.on_depth_update(depth as u64);

        if depth == self.plan.len() {
            self.record_if_better();
            return;
        }

        let score = self.state.score();
        let bound = fractional_bound(
            self.model,
            &self.plan,
            depth,
            self.state.inventory(),
            self.state.headroom(),
        );
        if score.saturating_add_val(bound) <= self.incumbent.score() {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
            return;
        }

        self.record_if_better();

        let key = StateKey::from_state(
            &self.plan,
            &self.state,
            depth,
            self.restricted_suffix[depth],
        );
        if self.solver.memo.check_and_record(key, score) {
            self.stats.on_memo_hit();
            self.monitor
                .on_prune(&self.state, PruneReason::MemoDominated, &self.stats);
            return;
        }

        let entry_index = self.plan.entry_at(depth);
        let entry = self.model.entry(entry_index);
        let max_take = entry.max_copies(self.state.inventory(), self.state.headroom());
        let rest_bound = fractional_bound(
            self.model,
            &self.plan,
            depth + 1,
            self.state.inventory(),
            self.state.headroom(),
        );

        self.solver.frames.push(Frame {
            base_score: score,
            value: entry.per_copy_value(),
            rest_bound,
            entry: entry_index,
            depth,
            next_take: Some(max_take),
            last_take: 0,
            applied: false,
        });
    }

    /// Advances the frame at `top`: undoes its previous take, then either
    /// applies the next take or closes the frame.
    fn step(&mut self, top: usize) {
        let mut frame = self.solver.frames[top];

        if frame.applied {
            self.solver.trail.backtrack(self.model, &mut self.state);
            frame.applied = false;
            self.stats.on_backtrack();
            self.monitor.on_backtrack(&self.state, &self.stats);

            if frame.next_take.is_some() && frame.last_take > 0 {
                let ceiling = frame
                    .base_score
                    .saturating_add_val(
                        frame
                            .value
                            .saturating_mul_val(Score::from(frame.last_take - 1)),
                    )
                    .saturating_add_val(frame.rest_bound);
                if self.incumbent.score() >= ceiling {
                    frame.next_take = None;
                    self.stats.on_pruning_dominance();
                    self.monitor
                        .on_prune(&self.state, PruneReason::TakeDominated, &self.stats);
                }
            }
        }

        let Some(take) = frame.next_take else {
            self.solver.frames.pop();
            return;
        };

        frame.next_take = take.checked_sub(1);
        frame.last_take = take;
        frame.applied = true;
        self.solver.frames[top] = frame;

        self.solver.trail.push_frame();
        self.solver
            .trail
            .apply_take(self.model, &mut self.state, frame.depth, frame.entry, take);
        self.stats.on_take_tried();
        self.monitor.on_descend(&self.state, take, &self.stats);

        self.enter_node();
    }

    #[inline]
    fn record_if_better(&mut self) {
        let score = self.state.score();
        if self.incumbent.try_update(score, self.state.copies()) {
            self.stats.on_solution_found();
            self.monitor.on_solution_found(score, &self.stats);
        }
    }

    fn finalize_result(self, reason: TerminationReason) -> BnbSolverOutcome {
        let score = self.incumbent.score();
        let copies = self.incumbent.into_copies();
        let solution = assemble(self.model, &self.plan, &copies, score);

        match reason {
            TerminationReason::OptimalityProven => BnbSolverOutcome::optimal(solution, self.stats),
            TerminationReason::Aborted(msg) => BnbSolverOutcome::aborted(solution, msg, self.stats),
        }
    }
}
