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

//! Residual-state memoization.
//!
//! Two nodes at the same depth with the same headroom and the same residual
//! counts of every resource the remaining entries can use have identical
//! subtrees. Once such a state was expanded with some score, revisiting it
//! with a score that is not higher cannot improve the incumbent.

use crate::{plan::SearchPlan, state::SearchState};
use kickoff_model::objective::Score;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// The memo capacity used when none is configured.
pub const DEFAULT_MEMO_CAPACITY: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    depth: u32,
    headroom: Option<u32>,
    residual: SmallVec<[u32; 16]>,
}

impl StateKey {
    /// Projects `state` onto the resources that matter below `depth`.
    ///
    /// The headroom is dropped when no remaining entry is restricted.
    pub fn from_state(plan: &SearchPlan, state: &SearchState, depth: usize, restricted_suffix: bool) -> Self {
        let residual = plan
            .suffix_list(depth)
            .iter()
            .map(|&r| state.remaining(r))
            .collect();
        Self {
            depth: depth as u32,
            headroom: if restricted_suffix { state.headroom() } else { None },
            residual,
        }
    }
}

/// A bounded map from residual states to the best score they were expanded
/// with.
#[derive(Debug, Clone)]
pub struct MemoTable {
    map: FxHashMap<StateKey, Score>,
    capacity: usize,
}

impl Default for MemoTable {
    fn default() -> Self {
        Self::new(DEFAULT_MEMO_CAPACITY)
    }
}

impl MemoTable {
    /// Creates a table that stores at most `capacity` states.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::default(),
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if `key` was already expanded with a score of at least
    /// `score`. Otherwise records `score` for `key` and returns `false`.
    ///
    /// Once the table is full, new keys are no longer stored but existing
    /// keys are still answered and raised.
    pub fn check_and_record(&mut self, key: StateKey, score: Score) -> bool {
        if let Some(seen) = self.map.get_mut(&key) {
            if *seen >= score {
                return true;
            }
            *seen = score;
            return false;
        }
        if self.map.len() < self.capacity {
            self.map.insert(key, score);
        }
        false
    }

    /// Removes every stored state.
    #[inline]
    pub fn clear(&mut self) {
        self.map.clear();
    }
}
