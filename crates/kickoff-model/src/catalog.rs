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

//! The ordered, immutable list of combo definitions.

use crate::{combo::ComboDefinition, index::ComboIndex};
use std::collections::BTreeSet;

/// An ordered collection of combo definitions addressed by `ComboIndex`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    combos: Vec<ComboDefinition>,
}

impl Catalog {
    /// Creates a catalog from combos in source order.
    #[inline]
    pub fn new(combos: Vec<ComboDefinition>) -> Self {
        Self { combos }
    }

    /// Returns the number of combos.
    #[inline]
    pub fn len(&self) -> usize {
        self.combos.len()
    }

    /// Returns `true` if the catalog holds no combos.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    /// Returns the combo at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn combo(&self, index: ComboIndex) -> &ComboDefinition {
        let i = index.get();
        assert!(
            i < self.combos.len(),
            "called `Catalog::combo` with combo index out of bounds: the len is {} but the index is {}",
            self.combos.len(),
            i
        );
        &self.combos[i]
    }

    /// Returns the combo at `index`, if any.
    #[inline]
    pub fn get(&self, index: ComboIndex) -> Option<&ComboDefinition> {
        self.combos.get(index.get())
    }

    /// Returns all combos in source order.
    #[inline]
    pub fn combos(&self) -> &[ComboDefinition] {
        &self.combos
    }

    /// Iterates `(index, combo)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (ComboIndex, &ComboDefinition)> {
        self.combos
            .iter()
            .enumerate()
            .map(|(i, c)| (ComboIndex::new(i), c))
    }

    /// Returns the index of the first combo called `name`, if any.
    pub fn find(&self, name: &str) -> Option<ComboIndex> {
        self.combos
            .iter()
            .position(|c| c.name() == name)
            .map(ComboIndex::new)
    }

    /// Returns the sorted set of distinct card names used by any combo.
    pub fn resource_names(&self) -> BTreeSet<&str> {
        self.combos
            .iter()
            .flat_map(|c| c.required_resources())
            .collect()
    }
}

impl FromIterator<ComboDefinition> for Catalog {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = ComboDefinition>,
    {
        Self {
            combos: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Catalog(combos: {}, cards: {})",
            self.combos.len(),
            self.resource_names().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_iter([
            ComboDefinition::new("Sprint", "FW")
                .with_slot(0, "Running")
                .with_slot(1, "Sprinting"),
            ComboDefinition::new("Through Ball", "MF")
                .with_slot(0, " Passing")
                .with_slot(1, "Running"),
            ComboDefinition::new("Empty", "MF"),
        ])
    }

    #[test]
    fn test_resource_names_are_distinct_trimmed_and_sorted() {
        let catalog = catalog();
        let names: Vec<&str> = catalog.resource_names().into_iter().collect();
        assert_eq!(names, vec!["Passing", "Running", "Sprinting"]);
    }

    #[test]
    fn test_find_and_index_access() {
        let catalog = catalog();
        let index = catalog.find("Through Ball").expect("combo exists");
        assert_eq!(index.get(), 1);
        assert_eq!(catalog.combo(index).category(), "MF");
        assert!(catalog.find("Missing").is_none());
        assert!(catalog.get(ComboIndex::new(10)).is_none());
    }

    #[test]
    #[should_panic(expected = "combo index out of bounds")]
    fn test_combo_panics_out_of_bounds() {
        let _ = catalog().combo(ComboIndex::new(3));
    }

    #[test]
    fn test_display_counts() {
        assert_eq!(catalog().to_string(), "Catalog(combos: 3, cards: 3)");
    }
}
