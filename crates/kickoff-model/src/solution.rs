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
    catalog::Catalog,
    combo::ComboDefinition,
    index::{ComboIndex, EntryIndex},
    model::Model,
    objective::Score,
};
use kickoff_core::num::ops::saturating_arithmetic::{SaturatingAddVal, SaturatingMulVal};

/// A combo chosen `copies` times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    entry: EntryIndex,
    combo: ComboIndex,
    copies: u32,
}

impl Selection {
    /// Constructs a new `Selection`.
    ///
    /// # Panics
    ///
    /// Panics if `copies` is zero.
    #[inline]
    pub fn new(entry: EntryIndex, combo: ComboIndex, copies: u32) -> Self {
        assert!(
            copies > 0,
            "called `Selection::new` with zero copies for entry {}",
            entry
        );
        Self {
            entry,
            combo,
            copies,
        }
    }

    #[inline]
    pub fn entry(&self) -> EntryIndex {
        self.entry
    }

    #[inline]
    pub fn combo(&self) -> ComboIndex {
        self.combo
    }

    #[inline]
    pub fn copies(&self) -> u32 {
        self.copies
    }
}

/// The result of a search: the achieved score and the chosen copy counts.
///
/// Selections only hold positive copy counts and keep the order in which the
/// search ranked their entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    score: Score,
    selections: Vec<Selection>,
}

impl Solution {
    /// Constructs a new `Solution`.
    #[inline]
    pub fn new(score: Score, selections: Vec<Selection>) -> Self {
        Self { score, selections }
    }

    /// The empty assignment, scoring 0.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Total number of combo copies selected.
    pub fn total_copies(&self) -> u64 {
        self.selections
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add_val(u64::from(s.copies)))
    }

    /// Returns the copies chosen for `combo`, 0 if it was not selected.
    pub fn copies_of(&self, combo: ComboIndex) -> u32 {
        self.selections
            .iter()
            .filter(|s| s.combo == combo)
            .map(|s| s.copies)
            .sum()
    }

    /// Pairs every selected combo with its copy count.
    ///
    /// # Panics
    ///
    /// Panics if a selection refers to a combo outside `catalog`.
    pub fn assignment<'c>(&self, catalog: &'c Catalog) -> Vec<(&'c ComboDefinition, u32)> {
        self.selections
            .iter()
            .map(|s| (catalog.combo(s.combo), s.copies))
            .collect()
    }

    /// Flattens the assignment, repeating each combo once per copy.
    ///
    /// # Panics
    ///
    /// Panics if a selection refers to a combo outside `catalog`.
    pub fn expanded<'c>(&self, catalog: &'c Catalog) -> Vec<&'c ComboDefinition> {
        self.selections
            .iter()
            .flat_map(|s| std::iter::repeat_n(catalog.combo(s.combo), s.copies as usize))
            .collect()
    }

    /// Recomputes the score of the selections under `model`.
    pub fn evaluate(&self, model: &Model) -> Score {
        self.selections.iter().fold(0, |acc: Score, s| {
            let value = model.entry(s.entry).per_copy_value();
            acc.saturating_add_val(value.saturating_mul_val(Score::from(s.copies)))
        })
    }

    /// Returns `true` if the selections fit the model's inventory and
    /// category limit.
    pub fn is_feasible(&self, model: &Model) -> bool {
        let mut used = vec![0u64; model.num_resources()];
        let mut restricted = 0u64;

        for selection in &self.selections {
            if selection.entry.get() >= model.num_entries() {
                return false;
            }
            let entry = model.entry(selection.entry);
            if entry.combo() != selection.combo {
                return false;
            }
            let copies = u64::from(selection.copies);
            for &(resource, need) in entry.needs() {
                let slot = &mut used[resource.get()];
                *slot = slot.saturating_add_val(copies.saturating_mul_val(u64::from(need)));
            }
            if entry.is_restricted() {
                restricted = restricted.saturating_add_val(copies);
            }
        }

        let within_inventory = used
            .iter()
            .zip(model.inventory())
            .all(|(&u, &available)| u <= u64::from(available));

        within_inventory && model.category_limit().allows(restricted)
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution (score: {})", self.score)?;
        for selection in &self.selections {
            writeln!(
                f,
                "  {} -> {} x{}",
                selection.entry, selection.combo, selection.copies
            )?;
        }
        Ok(())
    }
}
