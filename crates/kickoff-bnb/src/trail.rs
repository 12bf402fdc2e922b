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

use crate::state::SearchState;
use kickoff_model::{index::EntryIndex, model::Model, objective::Score};

/// One applied take, with what is needed to undo it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct TrailEntry {
    old_score: Score,
    old_headroom: Option<u32>,
    entry: EntryIndex,
    depth: usize,
    take: u32,
}

/// The undo log of the search.
///
/// Every decision level opens a frame; `backtrack` undoes every take applied
/// since the last frame was pushed, newest first.
#[derive(Debug, Clone, Default)]
pub struct SearchTrail {
    /// The linear history of all takes applied to the state.
    entries: Vec<TrailEntry>,
    /// `frames[i]` stores the index in `entries` where frame `i` began.
    frames: Vec<usize>,
}

impl SearchTrail {
    /// Creates a new, empty `SearchTrail`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Ensures the trail has capacity for `num_levels` decisions.
    pub fn ensure_capacity(&mut self, num_levels: usize) {
        if self.entries.capacity() < num_levels {
            self.entries.reserve(num_levels - self.entries.len());
        }
        if self.frames.capacity() < num_levels + 1 {
            self.frames.reserve((num_levels + 1) - self.frames.len());
        }
    }

    #[cfg(test)]
    fn num_entries(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Pushes a new frame, marking the start of a decision.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Applies `take` copies of `entry` at `depth` to `state` and records the
    /// change.
    ///
    /// # Panics
    ///
    /// Panics if `entry` is out of bounds for `model`, or in debug builds if
    /// no frame is open or the take is not available.
    pub fn apply_take(
        &mut self,
        model: &Model,
        state: &mut SearchState,
        depth: usize,
        entry: EntryIndex,
        take: u32,
    ) {
        debug_assert!(
            !self.frames.is_empty(),
            "called `SearchTrail::apply_take` without an open frame"
        );

        self.entries.push(TrailEntry {
            old_score: state.score(),
            old_headroom: state.headroom(),
            entry,
            depth,
            take,
        });
        state.consume(depth, model.entry(entry), take);
    }

    /// Undoes every take of the most recent frame and pops it.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if no frame is open.
    pub fn backtrack(&mut self, model: &Model, state: &mut SearchState) {
        debug_assert!(
            !self.frames.is_empty(),
            "called `SearchTrail::backtrack` without an open frame"
        );

        let start = self.frames.pop().unwrap_or(0);
        while self.entries.len() > start {
            if let Some(e) = self.entries.pop() {
                state.restore(
                    e.depth,
                    model.entry(e.entry),
                    e.take,
                    e.old_score,
                    e.old_headroom,
                );
            }
        }
    }

    /// Clears all entries and frames, keeping the allocations.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }
}

impl std::fmt::Display for SearchTrail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchTrail(entries: {}, frames: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kickoff_model::{
        catalog::Catalog, combo::ComboDefinition, inventory::Inventory, model::ModelBuilder,
        objective::CategoryLimit,
    };

    fn model() -> Model {
        let catalog: Catalog = vec![
            ComboDefinition::new("Wall", "GK")
                .with_slot(0, "A")
                .with_slot(1, "A")
                .with_slot(2, "B"),
            ComboDefinition::new("Run", "MF").with_slot(0, "B"),
        ]
        .into_iter()
        .collect();
        let inventory = Inventory::new().with("A", 6).with("B", 5);
        ModelBuilder::new(&catalog, &inventory)
            .category_limit(CategoryLimit::AtMost(3))
            .build()
    }

    #[test]
    fn test_apply_updates_state() {
        let model = model();
        let mut state = SearchState::new(&model, 2);
        let mut trail = SearchTrail::new();
        trail.ensure_capacity(2);

        trail.push_frame();
        trail.apply_take(&model, &mut state, 0, EntryIndex::new(0), 2);

        assert_eq!(state.inventory(), &[2, 3]);
        assert_eq!(state.headroom(), Some(1));
        assert_eq!(state.score(), 6);
        assert_eq!(state.copies(), &[2, 0]);
        assert_eq!(state.depth(), 1);
        assert_eq!(trail.num_entries(), 1);
    }

    #[test]
    fn test_backtrack_restores_state_exactly() {
        let model = model();
        let mut state = SearchState::new(&model, 2);
        let root = state.clone();
        let mut trail = SearchTrail::new();

        trail.push_frame();
        trail.apply_take(&model, &mut state, 0, EntryIndex::new(0), 3);
        let after_first = state.clone();

        trail.push_frame();
        trail.apply_take(&model, &mut state, 1, EntryIndex::new(1), 2);
        assert_eq!(state.inventory(), &[0, 0]);
        assert_eq!(state.score(), 11);

        trail.backtrack(&model, &mut state);
        assert_eq!(state, after_first);

        trail.backtrack(&model, &mut state);
        assert_eq!(state, root);
        assert!(trail.is_empty());
        assert_eq!(trail.num_entries(), 0);
    }

    #[test]
    fn test_zero_take_is_symmetric() {
        let model = model();
        let mut state = SearchState::new(&model, 2);
        let root = state.clone();
        let mut trail = SearchTrail::new();

        trail.push_frame();
        trail.apply_take(&model, &mut state, 0, EntryIndex::new(0), 0);
        assert_eq!(state.depth(), 1);
        assert_eq!(state.inventory(), root.inventory());

        trail.backtrack(&model, &mut state);
        assert_eq!(state, root);
    }

    #[test]
    fn test_repeated_apply_backtrack_does_not_drift() {
        let model = model();
        let mut state = SearchState::new(&model, 2);
        let root = state.clone();
        let mut trail = SearchTrail::new();

        for take in (0..=3).rev() {
            trail.push_frame();
            trail.apply_take(&model, &mut state, 0, EntryIndex::new(0), take);
            for inner in (0..=state.inventory()[1]).rev() {
                trail.push_frame();
                trail.apply_take(&model, &mut state, 1, EntryIndex::new(1), inner);
                trail.backtrack(&model, &mut state);
            }
            trail.backtrack(&model, &mut state);
            assert_eq!(state, root);
        }
    }

    #[test]
    fn test_reset_clears_open_frames_for_reuse() {
        let model = model();
        let mut state = SearchState::new(&model, 2);
        let mut trail = SearchTrail::new();

        trail.push_frame();
        trail.apply_take(&model, &mut state, 0, EntryIndex::new(0), 1);
        trail.push_frame();
        trail.reset();
        assert!(trail.is_empty());
        assert_eq!(trail.num_entries(), 0);
        assert_eq!(trail.to_string(), "SearchTrail(entries: 0, frames: 0)");

        let mut fresh = SearchState::new(&model, 2);
        let root = fresh.clone();
        trail.push_frame();
        trail.apply_take(&model, &mut fresh, 0, EntryIndex::new(0), 2);
        trail.backtrack(&model, &mut fresh);
        assert_eq!(fresh, root);
    }
}
