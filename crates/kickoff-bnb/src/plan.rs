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

//! Entry ranking and the per-depth search plan.

use fixedbitset::FixedBitSet;
use kickoff_model::{
    index::{EntryIndex, ResourceIndex},
    model::{Model, RequirementVector},
};
use std::cmp::Ordering;

/// Compares two entries by value density, highest first.
///
/// Densities `v / u` are compared exactly through cross multiplication.
/// Ties fall back to the larger absolute value, then to the combo name.
#[inline]
fn compare_desirability(a: &RequirementVector, b: &RequirementVector) -> Ordering {
    let lhs = i128::from(a.per_copy_value()) * i128::from(b.units_per_copy());
    let rhs = i128::from(b.per_copy_value()) * i128::from(a.units_per_copy());
    rhs.cmp(&lhs)
        .then_with(|| {
            b.per_copy_value()
                .unsigned_abs()
                .cmp(&a.per_copy_value().unsigned_abs())
        })
        .then_with(|| a.name().cmp(b.name()))
}

/// Returns every entry of `model` in ranked order.
///
/// The order is total and deterministic: entries that compare equal on
/// density, value and name keep their model order.
pub fn rank_entries(model: &Model) -> Vec<EntryIndex> {
    let mut order: Vec<EntryIndex> = (0..model.num_entries()).map(EntryIndex::new).collect();
    order.sort_by(|&a, &b| {
        compare_desirability(model.entry(a), model.entry(b)).then_with(|| a.cmp(&b))
    });
    order
}

/// The fixed branching order of one search.
///
/// Depth `d` of the search tree decides the copy count of `entry_at(d)`.
/// For every depth the plan also knows which resources the entries from that
/// depth onward can still consume.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    order: Vec<EntryIndex>,
    suffix_lists: Vec<Vec<ResourceIndex>>,
}

impl SearchPlan {
    /// Ranks the entries of `model` and keeps those the root inventory can
    /// make at least once.
    pub fn new(model: &Model) -> Self {
        let order: Vec<EntryIndex> = rank_entries(model)
            .into_iter()
            .filter(|&e| model.max_copies(e) > 0)
            .collect();

        // Walk the order backwards, growing one set and snapshotting it per depth.
        let mut seen = FixedBitSet::with_capacity(model.num_resources());
        let mut suffix_lists = vec![Vec::new(); order.len() + 1];
        for depth in (0..order.len()).rev() {
            for &(resource, _) in model.entry(order[depth]).needs() {
                seen.insert(resource.get());
            }
            suffix_lists[depth] = seen.ones().map(ResourceIndex::new).collect();
        }

        Self {
            order,
            suffix_lists,
        }
    }

    /// Number of decision levels, i.e. the depth of a terminal node.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[inline]
    pub fn order(&self) -> &[EntryIndex] {
        &self.order
    }

    /// Returns the entry decided at `depth`.
    ///
    /// # Panics
    ///
    /// Panics if `depth >= self.len()`.
    #[inline]
    pub fn entry_at(&self, depth: usize) -> EntryIndex {
        assert!(
            depth < self.len(),
            "called `SearchPlan::entry_at` with depth out of bounds: the len is {} but the depth is {}",
            self.len(),
            depth
        );
        self.order[depth]
    }

    /// Resources used by the entries at `depth` or deeper, sorted by index.
    ///
    /// # Panics
    ///
    /// Panics if `depth > self.len()`.
    #[inline]
    pub fn suffix_list(&self, depth: usize) -> &[ResourceIndex] {
        &self.suffix_lists[depth]
    }

    /// Returns `true` if any entry at `depth` or deeper is restricted.
    pub fn has_restricted_suffix(&self, model: &Model, depth: usize) -> bool {
        self.order[depth.min(self.len())..]
            .iter()
            .any(|&e| model.entry(e).is_restricted())
    }
}

impl std::fmt::Display for SearchPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchPlan(depth: {}, order: [", self.len())?;
        for (i, entry) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", entry.get())?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kickoff_model::{
        catalog::Catalog, combo::ComboDefinition, inventory::Inventory, model::ModelBuilder,
        objective::CategoryLimit,
    };

    fn combo(name: &str, cards: &[&str]) -> ComboDefinition {
        cards
            .iter()
            .enumerate()
            .fold(ComboDefinition::new(name, "FW"), |c, (i, card)| c.with_slot(i, *card))
    }

    fn names(model: &Model, order: &[EntryIndex]) -> Vec<String> {
        order.iter().map(|&e| model.entry(e).name().to_string()).collect()
    }

    #[test]
    fn test_ranking_ties_break_by_value_then_name() {
        // Cards mode: density is always 1, so value and then name decide.
        let catalog: Catalog = vec![
            combo("Zed", &["A"]),
            combo("Alpha", &["A"]),
            combo("Triple", &["A", "B", "C"]),
            combo("Pair", &["A", "B"]),
        ]
        .into_iter()
        .collect();
        let inventory = Inventory::new().with("A", 1);
        let model = ModelBuilder::new(&catalog, &inventory).build();

        assert_eq!(
            names(&model, &rank_entries(&model)),
            vec!["Triple", "Pair", "Alpha", "Zed"]
        );
    }

    #[test]
    fn test_ranking_is_deterministic_for_identical_entries() {
        let catalog: Catalog = vec![combo("Same", &["A"]), combo("Same", &["A"])]
            .into_iter()
            .collect();
        let inventory = Inventory::new().with("A", 1);
        let model = ModelBuilder::new(&catalog, &inventory).build();

        for _ in 0..10 {
            assert_eq!(
                rank_entries(&model),
                vec![EntryIndex::new(0), EntryIndex::new(1)]
            );
        }
    }

    #[test]
    fn test_ranking_by_density_in_skills_mode() {
        use kickoff_model::{combo::AttributeValue, objective::ObjectiveMode};

        let catalog: Catalog = vec![
            combo("Dense", &["A"]).with_skill("Speed", AttributeValue::Integer(3)),
            combo("Big", &["A", "B", "C"]).with_skill("Speed", AttributeValue::Integer(6)),
            combo("Zero", &["B"]),
        ]
        .into_iter()
        .collect();
        let inventory = Inventory::new().with("A", 1).with("B", 1).with("C", 1);
        let model = ModelBuilder::new(&catalog, &inventory)
            .objective(ObjectiveMode::Skills)
            .build();

        assert_eq!(
            names(&model, &rank_entries(&model)),
            vec!["Dense", "Big", "Zero"]
        );
    }

    #[test]
    fn test_plan_drops_unmakeable_entries() {
        let catalog: Catalog = vec![
            combo("Needs C", &["C"]),
            combo("Double A", &["A", "A"]),
            combo("A", &["A"]),
        ]
        .into_iter()
        .collect();
        let inventory = Inventory::new().with("A", 1);
        let model = ModelBuilder::new(&catalog, &inventory).build();
        let plan = SearchPlan::new(&model);

        assert_eq!(plan.len(), 1);
        assert_eq!(model.entry(plan.entry_at(0)).name(), "A");
    }

    #[test]
    fn test_plan_drops_restricted_entries_when_limit_is_zero() {
        let catalog: Catalog = vec![
            ComboDefinition::new("Keeper", "GK").with_slot(0, "A"),
            combo("Field", &["A"]),
        ]
        .into_iter()
        .collect();
        let inventory = Inventory::new().with("A", 3);
        let model = ModelBuilder::new(&catalog, &inventory)
            .category_limit(CategoryLimit::AtMost(0))
            .build();
        let plan = SearchPlan::new(&model);

        assert_eq!(plan.len(), 1);
        assert!(!plan.has_restricted_suffix(&model, 0));
    }

    #[test]
    fn test_suffix_resources() {
        let catalog: Catalog = vec![combo("AB", &["A", "B"]), combo("C", &["C"])]
            .into_iter()
            .collect();
        let inventory = Inventory::new().with("A", 1).with("B", 1).with("C", 1);
        let model = ModelBuilder::new(&catalog, &inventory).build();
        let plan = SearchPlan::new(&model);

        // Ranked: AB (value 2) before C (value 1).
        assert_eq!(plan.suffix_list(0).len(), 3);
        assert_eq!(plan.suffix_list(1), &[ResourceIndex::new(2)]);
        assert!(plan.suffix_list(2).is_empty());
    }

    #[test]
    fn test_suffix_lists_shrink_with_depth_and_stay_sorted() {
        let catalog: Catalog = vec![
            combo("ABC", &["A", "B", "C"]),
            combo("CA", &["C", "A"]),
            combo("B", &["B"]),
        ]
        .into_iter()
        .collect();
        let inventory = Inventory::new().with("A", 2).with("B", 2).with("C", 2);
        let model = ModelBuilder::new(&catalog, &inventory).build();
        let plan = SearchPlan::new(&model);
        assert_eq!(plan.len(), 3);

        for depth in 0..=plan.len() {
            let list = plan.suffix_list(depth);
            assert!(list.windows(2).all(|w| w[0] < w[1]));
            if depth < plan.len() {
                assert!(plan.suffix_list(depth + 1).iter().all(|r| list.contains(r)));
                for &(resource, _) in model.entry(plan.entry_at(depth)).needs() {
                    assert!(list.contains(&resource));
                }
            }
        }
        assert_eq!(plan.suffix_list(2).len(), 1);
        assert!(plan.suffix_list(plan.len()).is_empty());
    }
}
