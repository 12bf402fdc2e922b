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

//! The mutable state of one search.
//!
//! `SearchState` is an index-addressed snapshot: the residual inventory, the
//! remaining restricted-category headroom, the score accumulated so far and
//! the copy count decided at every depth. It is only ever mutated through the
//! search trail, which records enough to restore it exactly.

use kickoff_core::num::ops::saturating_arithmetic::{
    SaturatingAddVal, SaturatingMulVal, SaturatingSubVal,
};
use kickoff_model::{index::ResourceIndex, model::{Model, RequirementVector}, objective::Score};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    inventory: Vec<u32>,
    copies: Vec<u32>,
    score: Score,
    headroom: Option<u32>,
    depth: usize,
}

impl SearchState {
    /// Creates the root state: the model's inventory, its category limit as
    /// headroom, score 0 and no decisions for `num_levels` depths.
    #[inline]
    pub fn new(model: &Model, num_levels: usize) -> Self {
        Self {
            inventory: model.inventory().to_vec(),
            copies: vec![0; num_levels],
            score: 0,
            headroom: model.category_limit().headroom(),
            depth: 0,
        }
    }

    /// The residual inventory, indexed by `ResourceIndex`.
    #[inline]
    pub fn inventory(&self) -> &[u32] {
        &self.inventory
    }

    /// Returns the residual count of `resource`.
    #[inline]
    pub fn remaining(&self, resource: ResourceIndex) -> u32 {
        self.inventory[resource.get()]
    }

    /// The copy counts decided so far, indexed by depth.
    #[inline]
    pub fn copies(&self) -> &[u32] {
        &self.copies
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    /// Remaining restricted copies, `None` if unconstrained.
    #[inline]
    pub fn headroom(&self) -> Option<u32> {
        self.headroom
    }

    /// The number of decided levels.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Consumes `take` copies of `entry` at `depth`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `depth` is not the current depth or if the
    /// take exceeds the inventory or the headroom.
    #[inline]
    pub(crate) fn consume(&mut self, depth: usize, entry: &RequirementVector, take: u32) {
        debug_assert_eq!(
            depth, self.depth,
            "called `SearchState::consume` at depth {} but the state is at depth {}",
            depth, self.depth
        );
        debug_assert!(
            take <= entry.max_copies(&self.inventory, self.headroom),
            "called `SearchState::consume` with take {} exceeding the available copies",
            take
        );

        for &(resource, need) in entry.needs() {
            let slot = &mut self.inventory[resource.get()];
            *slot = slot.saturating_sub_val(need.saturating_mul_val(take));
        }
        if entry.is_restricted()
            && let Some(headroom) = self.headroom.as_mut()
        {
            *headroom = headroom.saturating_sub_val(take);
        }
        self.score = self
            .score
            .saturating_add_val(entry.per_copy_value().saturating_mul_val(Score::from(take)));
        self.copies[depth] = take;
        self.depth = depth + 1;
    }

    /// Gives `take` copies of `entry` back and restores the previous score
    /// and headroom.
    #[inline]
    pub(crate) fn restore(
        &mut self,
        depth: usize,
        entry: &RequirementVector,
        take: u32,
        old_score: Score,
        old_headroom: Option<u32>,
    ) {
        debug_assert_eq!(
            depth + 1,
            self.depth,
            "called `SearchState::restore` for depth {} but the state is at depth {}",
            depth,
            self.depth
        );

        for &(resource, need) in entry.needs() {
            let slot = &mut self.inventory[resource.get()];
            *slot = slot.saturating_add_val(need.saturating_mul_val(take));
        }
        self.headroom = old_headroom;
        self.score = old_score;
        self.copies[depth] = 0;
        self.depth = depth;
    }
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headroom = match self.headroom {
            Some(h) => h.to_string(),
            None => "none".to_string(),
        };
        write!(
            f,
            "SearchState(depth: {}, score: {}, headroom: {})",
            self.depth, self.score, headroom
        )
    }
}
