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

//! The greedy seed.
//!
//! One forward pass over the plan: every entry that still fits takes exactly
//! one copy. The result is feasible by construction and gives the search a
//! lower bound before the first node is expanded.

use crate::plan::SearchPlan;
use kickoff_core::num::ops::saturating_arithmetic::{SaturatingAddVal, SaturatingSubVal};
use kickoff_model::{model::Model, objective::Score};

/// A feasible assignment built without backtracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreedySeed {
    score: Score,
    copies: Vec<u32>,
}

impl GreedySeed {
    /// Runs the greedy pass over `plan`.
    pub fn build(model: &Model, plan: &SearchPlan) -> Self {
        let mut inventory = model.inventory().to_vec();
        let mut headroom = model.category_limit().headroom();
        let mut copies = vec![0u32; plan.len()];
        let mut score: Score = 0;

        for (depth, &entry_index) in plan.order().iter().enumerate() {
            let entry = model.entry(entry_index);
            if entry.max_copies(&inventory, headroom) == 0 {
                continue;
            }

            for &(resource, need) in entry.needs() {
                let slot = &mut inventory[resource.get()];
                *slot = slot.saturating_sub_val(need);
            }
            if entry.is_restricted()
                && let Some(h) = headroom.as_mut()
            {
                *h = h.saturating_sub_val(1);
            }
            score = score.saturating_add_val(entry.per_copy_value());
            copies[depth] = 1;
        }

        Self { score, copies }
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    /// The copy count per plan depth, each 0 or 1.
    #[inline]
    pub fn copies(&self) -> &[u32] {
        &self.copies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kickoff_model::{
        catalog::Catalog, combo::ComboDefinition, inventory::Inventory, model::ModelBuilder,
        objective::CategoryLimit,
    };

    #[test]
    fn test_takes_one_copy_per_feasible_entry() {
        let catalog: Catalog = vec![
            ComboDefinition::new("X", "FW").with_slot(0, "A").with_slot(1, "B"),
            ComboDefinition::new("Y", "FW").with_slot(0, "A"),
            ComboDefinition::new("Z", "FW").with_slot(0, "B"),
        ]
        .into_iter()
        .collect();
        let inventory = Inventory::new().with("A", 5).with("B", 1);
        let model = ModelBuilder::new(&catalog, &inventory).build();
        let plan = SearchPlan::new(&model);
        let seed = GreedySeed::build(&model, &plan);

        // X first (value 2), then Y; Z finds B exhausted.
        assert_eq!(seed.score(), 3);
        assert_eq!(seed.copies().iter().sum::<u32>(), 2);
    }

    #[test]
    fn test_respects_category_limit() {
        let catalog: Catalog = vec![
            ComboDefinition::new("K1", "GK").with_slot(0, "A").with_slot(1, "A"),
            ComboDefinition::new("K2", "GK").with_slot(0, "B"),
            ComboDefinition::new("F", "FW").with_slot(0, "C"),
        ]
        .into_iter()
        .collect();
        let inventory = Inventory::new().with("A", 2).with("B", 1).with("C", 1);
        let model = ModelBuilder::new(&catalog, &inventory)
            .category_limit(CategoryLimit::AtMost(1))
            .build();
        let plan = SearchPlan::new(&model);
        let seed = GreedySeed::build(&model, &plan);

        assert_eq!(seed.score(), 3);
    }

    #[test]
    fn test_empty_plan() {
        let catalog = Catalog::default();
        let inventory = Inventory::new();
        let model = ModelBuilder::new(&catalog, &inventory).build();
        let plan = SearchPlan::new(&model);
        let seed = GreedySeed::build(&model, &plan);

        assert_eq!(seed.score(), 0);
        assert!(seed.copies().is_empty());
    }
}
