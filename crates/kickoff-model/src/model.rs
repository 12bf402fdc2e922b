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

//! The preprocessed, immutable problem instance.
//!
//! `ModelBuilder` is the preprocessor: it drops combos without usable card
//! slots, collapses repeated slots into per-copy need counts, resolves the
//! restricted-category flag and evaluates the per-copy value under the active
//! objective. The resulting `Model` is never mutated; every search works on its
//! own copy of the inventory vector.

use crate::{
    catalog::Catalog,
    combo::MAX_SLOTS,
    index::{ComboIndex, EntryIndex, ResourceIndex},
    inventory::Inventory,
    objective::{CategoryLimit, DEFAULT_RESTRICTED_MARKER, ObjectiveMode, Score},
};
use smallvec::SmallVec;
use std::collections::{BTreeMap, BTreeSet};

/// Represents the theoretical search space size of the allocation problem.
///
/// Every entry may be taken between `0` and its root `max_copies` times, so
/// the number of leaves is $\prod_i (m_i + 1)$. Since this overflows quickly,
/// the value is stored in **logarithmic space** ($\log_{10}$).
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Complexity {
    log_val: f64,
}

impl Complexity {
    /// Calculates the complexity from the per-entry copy ranges.
    pub fn new<I>(max_copies: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let log_val = max_copies
            .into_iter()
            .map(|m| (f64::from(m) + 1.0).log10())
            .sum();
        Complexity { log_val }
    }

    /// Returns the percentage of the search space that was actually explored.
    /// Returns `Some(0.0)` when the space is too large for the ratio to matter.
    pub fn coverage(&self, nodes_explored: u64) -> Option<f64> {
        if self.log_val > 15.0 {
            return Some(0.0);
        }

        let total_size = 10.0_f64.powf(self.log_val);
        if total_size == 0.0 {
            return None;
        }

        Some((nodes_explored as f64 / total_size) * 100.0)
    }

    /// Returns the exponent (order of magnitude).
    #[inline]
    pub fn exponent(&self) -> u64 {
        self.log_val.floor() as u64
    }

    /// Returns the mantissa (coefficient).
    #[inline]
    pub fn mantissa(&self) -> f64 {
        let fractional_part = self.log_val - self.log_val.floor();
        10.0_f64.powf(fractional_part)
    }

    /// Returns the raw log10 value.
    #[inline]
    pub fn raw(&self) -> f64 {
        self.log_val
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} × 10^{}", self.mantissa(), self.exponent())
    }
}

impl std::fmt::Debug for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Complexity(log10={:.4})", self.log_val)
    }
}

/// The normalized requirements of one combo.
///
/// `needs` is sorted by resource index and holds each resource once, with the
/// number of units one copy consumes. It is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementVector {
    combo: ComboIndex,
    name: String,
    needs: SmallVec<[(ResourceIndex, u32); MAX_SLOTS]>,
    units_per_copy: u32,
    restricted: bool,
    per_copy_value: Score,
}

impl RequirementVector {
    /// The catalog combo this entry was built from.
    #[inline]
    pub fn combo(&self) -> ComboIndex {
        self.combo
    }

    /// The name of the combo this entry was built from.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn needs(&self) -> &[(ResourceIndex, u32)] {
        &self.needs
    }

    /// Total number of resource units one copy consumes.
    #[inline]
    pub fn units_per_copy(&self) -> u32 {
        self.units_per_copy
    }

    #[inline]
    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    #[inline]
    pub fn per_copy_value(&self) -> Score {
        self.per_copy_value
    }

    /// Returns how many copies `inventory` can supply, additionally capped by
    /// `headroom` when this entry is restricted.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if a needed resource index is out of bounds for
    /// `inventory`.
    #[inline]
    pub fn max_copies(&self, inventory: &[u32], headroom: Option<u32>) -> u32 {
        let by_resources = self
            .needs
            .iter()
            .map(|&(resource, need)| {
                debug_assert!(
                    resource.get() < inventory.len(),
                    "called `RequirementVector::max_copies` with resource index out of bounds: the len is {} but the index is {}",
                    inventory.len(),
                    resource.get()
                );
                inventory[resource.get()] / need
            })
            .min()
            .unwrap_or(0);

        match headroom {
            Some(h) if self.restricted => by_resources.min(h),
            _ => by_resources,
        }
    }
}

/// The immutable problem instance consumed by the search engine.
///
/// Resources are the distinct cards referenced by surviving combos, sorted by
/// name and addressed by `ResourceIndex`. Entries are the surviving combos in
/// catalog order, addressed by `EntryIndex`.
#[derive(Clone)]
pub struct Model {
    resource_names: Vec<String>,
    inventory: Vec<u32>,
    entries: Vec<RequirementVector>,
    category_limit: CategoryLimit,
    objective: ObjectiveMode,
}

impl Model {
    #[inline]
    pub fn num_resources(&self) -> usize {
        self.resource_names.len()
    }

    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn resource_names(&self) -> &[String] {
        &self.resource_names
    }

    /// Returns the name of `resource`.
    ///
    /// # Panics
    ///
    /// Panics if `resource` is out of bounds.
    #[inline]
    pub fn resource_name(&self, resource: ResourceIndex) -> &str {
        let index = resource.get();
        assert!(
            index < self.num_resources(),
            "called `Model::resource_name` with resource index out of bounds: the len is {} but the index is {}",
            self.num_resources(),
            index
        );
        &self.resource_names[index]
    }

    /// Looks up a resource by exact name.
    pub fn resource_index(&self, name: &str) -> Option<ResourceIndex> {
        self.resource_names
            .binary_search_by(|n| n.as_str().cmp(name))
            .ok()
            .map(ResourceIndex::new)
    }

    /// The root inventory, indexed by `ResourceIndex`.
    #[inline]
    pub fn inventory(&self) -> &[u32] {
        &self.inventory
    }

    #[inline]
    pub fn entries(&self) -> &[RequirementVector] {
        &self.entries
    }

    /// Returns the entry at `entry`.
    ///
    /// # Panics
    ///
    /// Panics if `entry` is out of bounds.
    #[inline]
    pub fn entry(&self, entry: EntryIndex) -> &RequirementVector {
        let index = entry.get();
        assert!(
            index < self.num_entries(),
            "called `Model::entry` with entry index out of bounds: the len is {} but the index is {}",
            self.num_entries(),
            index
        );
        &self.entries[index]
    }

    /// Returns the entry built from `combo`, or `None` if the combo was dropped.
    pub fn entry_for_combo(&self, combo: ComboIndex) -> Option<EntryIndex> {
        self.entries
            .iter()
            .position(|e| e.combo == combo)
            .map(EntryIndex::new)
    }

    #[inline]
    pub fn category_limit(&self) -> CategoryLimit {
        self.category_limit
    }

    #[inline]
    pub fn objective(&self) -> ObjectiveMode {
        self.objective
    }

    /// Returns how many copies of `entry` the root inventory and the category
    /// limit allow on their own.
    #[inline]
    pub fn max_copies(&self, entry: EntryIndex) -> u32 {
        self.entry(entry)
            .max_copies(&self.inventory, self.category_limit.headroom())
    }

    /// Returns the number of entries that can be made at least once.
    pub fn num_makeable(&self) -> usize {
        (0..self.num_entries())
            .filter(|&i| self.max_copies(EntryIndex::new(i)) > 0)
            .count()
    }

    /// Estimates the size of the copy-count search space.
    pub fn complexity(&self) -> Complexity {
        Complexity::new((0..self.num_entries()).map(|i| self.max_copies(EntryIndex::new(i))))
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("resource_names", &self.resource_names)
            .field("inventory", &self.inventory)
            .field("entries", &self.entries)
            .field("category_limit", &self.category_limit)
            .field("objective", &self.objective)
            .finish()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model(entries: {}, resources: {}, objective: {}, limit: {})",
            self.num_entries(),
            self.num_resources(),
            self.objective,
            self.category_limit
        )
    }
}

/// Builds a `Model` from a catalog and an inventory.
///
/// ```
/// use kickoff_model::{
///     catalog::Catalog,
///     combo::ComboDefinition,
///     inventory::Inventory,
///     model::ModelBuilder,
///     index::EntryIndex,
///     objective::ObjectiveMode,
/// };
///
/// let catalog: Catalog = vec![
///     ComboDefinition::new("Double", "FW").with_slot(0, "A").with_slot(1, "A"),
/// ]
/// .into_iter()
/// .collect();
/// let inventory = Inventory::new().with("A", 5);
///
/// let model = ModelBuilder::new(&catalog, &inventory)
///     .objective(ObjectiveMode::Cards)
///     .build();
/// assert_eq!(model.num_entries(), 1);
/// assert_eq!(model.entries()[0].units_per_copy(), 2);
/// assert_eq!(model.max_copies(EntryIndex::new(0)), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder<'a> {
    catalog: &'a Catalog,
    inventory: &'a Inventory,
    objective: ObjectiveMode,
    category_limit: CategoryLimit,
    restricted_marker: String,
}

impl<'a> ModelBuilder<'a> {
    /// Creates a builder with the `cards` objective, no category limit and the
    /// default restricted marker.
    pub fn new(catalog: &'a Catalog, inventory: &'a Inventory) -> Self {
        Self {
            catalog,
            inventory,
            objective: ObjectiveMode::default(),
            category_limit: CategoryLimit::Unlimited,
            restricted_marker: DEFAULT_RESTRICTED_MARKER.to_string(),
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

    /// Sets the category substring that marks a combo as restricted.
    /// An empty marker restricts nothing.
    #[inline]
    pub fn restricted_marker<S>(mut self, marker: S) -> Self
    where
        S: Into<String>,
    {
        self.restricted_marker = marker.into();
        self
    }

    /// Runs the preprocessing and returns the immutable model.
    pub fn build(self) -> Model {
        let resource_names: Vec<String> = self
            .catalog
            .combos()
            .iter()
            .flat_map(|c| c.required_resources())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let index_of = |name: &str| -> ResourceIndex {
            let position = resource_names
                .binary_search_by(|n| n.as_str().cmp(name))
                .unwrap_or_else(|_| unreachable!("every slot value was collected above"));
            ResourceIndex::new(position)
        };

        let mut entries = Vec::with_capacity(self.catalog.len());
        for (combo_index, combo) in self.catalog.iter() {
            let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
            for resource in combo.required_resources() {
                *counts.entry(resource).or_insert(0) += 1;
            }
            if counts.is_empty() {
                continue;
            }

            let needs: SmallVec<[(ResourceIndex, u32); MAX_SLOTS]> = counts
                .iter()
                .map(|(name, &need)| (index_of(name), need))
                .collect();
            let units_per_copy = needs.iter().map(|&(_, need)| need).sum();
            let per_copy_value = self.objective.per_copy_value(combo, units_per_copy);

            entries.push(RequirementVector {
                combo: combo_index,
                name: combo.name().to_string(),
                needs,
                units_per_copy,
                restricted: combo.is_restricted(&self.restricted_marker),
                per_copy_value,
            });
        }

        let inventory = resource_names
            .iter()
            .map(|name| self.inventory.count(name))
            .collect();

        Model {
            resource_names,
            inventory,
            entries,
            category_limit: self.category_limit,
            objective: self.objective,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combo::{AttributeValue, ComboDefinition};

    fn catalog() -> Catalog {
        vec![
            ComboDefinition::new("Power Shot", "FW")
                .with_slot(0, "Shooting")
                .with_slot(1, "Weights")
                .with_slot(2, "Shooting")
                .with_skill("Kicking", AttributeValue::Integer(3))
                .with_skill("Technique", AttributeValue::Text("+2 / -1".into())),
            ComboDefinition::new("Empty", "MF").with_slot(1, "  "),
            ComboDefinition::new("Dive", "GK Special")
                .with_slot(0, "Agility")
                .with_skill("Jumping", AttributeValue::Integer(-4)),
            ComboDefinition::new("Sprint", "MF")
                .with_slot(0, " Running ")
                .with_skill("Speed", AttributeValue::Text("n/a".into())),
        ]
        .into_iter()
        .collect()
    }

    fn inventory() -> Inventory {
        Inventory::new()
            .with("Shooting", 5)
            .with("Weights", 1)
            .with("Agility", 3)
            .with("Unused", 9)
    }

    #[test]
    fn test_drops_combos_without_slots() {
        let catalog = catalog();
        let inventory = inventory();
        let model = ModelBuilder::new(&catalog, &inventory).build();

        assert_eq!(model.num_entries(), 3);
        assert_eq!(model.entry_for_combo(ComboIndex::new(1)), None);
        assert_eq!(model.entry_for_combo(ComboIndex::new(2)), Some(EntryIndex::new(1)));
    }

    #[test]
    fn test_resources_are_sorted_and_referenced_only() {
        let catalog = catalog();
        let inventory = inventory();
        let model = ModelBuilder::new(&catalog, &inventory).build();

        assert_eq!(
            model.resource_names(),
            &["Agility", "Running", "Shooting", "Weights"]
        );
        assert_eq!(model.inventory(), &[3, 0, 5, 1]);
        assert_eq!(model.resource_index("Shooting"), Some(ResourceIndex::new(2)));
        assert_eq!(model.resource_index("Unused"), None);
        assert_eq!(model.resource_name(ResourceIndex::new(1)), "Running");
    }

    #[test]
    fn test_collapses_duplicate_slots() {
        let catalog = catalog();
        let inventory = inventory();
        let model = ModelBuilder::new(&catalog, &inventory).build();

        let shot = &model.entries()[0];
        assert_eq!(
            shot.needs(),
            &[(ResourceIndex::new(2), 2), (ResourceIndex::new(3), 1)]
        );
        assert_eq!(shot.units_per_copy(), 3);
        assert_eq!(shot.per_copy_value(), 3);
    }

    #[test]
    fn test_skills_values_are_floored_at_zero() {
        let catalog = catalog();
        let inventory = inventory();
        let model = ModelBuilder::new(&catalog, &inventory)
            .objective(ObjectiveMode::Skills)
            .build();

        let values: Vec<Score> = model.entries().iter().map(|e| e.per_copy_value()).collect();
        assert_eq!(values, vec![4, 0, 0]);
    }

    #[test]
    fn test_restricted_flag_uses_marker() {
        let catalog = catalog();
        let inventory = inventory();

        let model = ModelBuilder::new(&catalog, &inventory).build();
        let flags: Vec<bool> = model.entries().iter().map(|e| e.is_restricted()).collect();
        assert_eq!(flags, vec![false, true, false]);

        let model = ModelBuilder::new(&catalog, &inventory)
            .restricted_marker("mf")
            .build();
        let flags: Vec<bool> = model.entries().iter().map(|e| e.is_restricted()).collect();
        assert_eq!(flags, vec![false, false, true]);

        let model = ModelBuilder::new(&catalog, &inventory)
            .restricted_marker("")
            .build();
        assert!(model.entries().iter().all(|e| !e.is_restricted()));
    }

    #[test]
    fn test_max_copies_respects_inventory_and_headroom() {
        let catalog = catalog();
        let inventory = inventory();
        let model = ModelBuilder::new(&catalog, &inventory)
            .category_limit(CategoryLimit::AtMost(2))
            .build();

        assert_eq!(model.max_copies(EntryIndex::new(0)), 1);
        assert_eq!(model.max_copies(EntryIndex::new(1)), 2);
        assert_eq!(model.max_copies(EntryIndex::new(2)), 0);
        assert_eq!(model.num_makeable(), 2);

        let dive = model.entry(EntryIndex::new(1));
        assert_eq!(dive.max_copies(model.inventory(), None), 3);
        assert_eq!(dive.max_copies(model.inventory(), Some(0)), 0);
    }

    #[test]
    fn test_complexity_counts_leaves() {
        let catalog = catalog();
        let inventory = inventory();
        let model = ModelBuilder::new(&catalog, &inventory).build();

        // (1 + 1) * (3 + 1) * (0 + 1) = 8 leaves
        let complexity = model.complexity();
        assert!((complexity.raw() - 8f64.log10()).abs() < 1e-9);
        assert_eq!(complexity.exponent(), 0);
        assert!((complexity.mantissa() - 8.0).abs() < 1e-9);
        let coverage = complexity.coverage(4).unwrap();
        assert!((coverage - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        let inventory = Inventory::new();
        let model = ModelBuilder::new(&catalog, &inventory).build();

        assert_eq!(model.num_entries(), 0);
        assert_eq!(model.num_resources(), 0);
        assert_eq!(model.complexity().raw(), 0.0);
        assert_eq!(
            model.to_string(),
            "Model(entries: 0, resources: 0, objective: cards, limit: none)"
        );
    }
}
