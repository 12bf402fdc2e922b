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

//! Card inventory and input bounds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// The error type for inventory input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// A count lies outside the configured bounds.
    #[error("count {count} for '{name}' is outside the allowed range {min}..={max}")]
    OutOfBounds {
        name: String,
        count: i64,
        min: u32,
        max: u32,
    },
    /// An entry was not of the form `name=count`.
    #[error("malformed inventory entry '{0}', expected NAME=COUNT")]
    MalformedEntry(String),
}

/// The inclusive range an inventory input surface accepts per card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryBounds {
    pub min: u32,
    pub max: u32,
}

impl Default for InventoryBounds {
    fn default() -> Self {
        Self { min: 0, max: 10 }
    }
}

impl InventoryBounds {
    /// Creates bounds `min..=max`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn new(min: u32, max: u32) -> Self {
        assert!(
            min <= max,
            "called `InventoryBounds::new` with min {} greater than max {}",
            min,
            max
        );
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, count: i64) -> bool {
        count >= i64::from(self.min) && count <= i64::from(self.max)
    }
}

/// Card counts by name. Names are trimmed; missing names count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    counts: BTreeMap<String, u32>,
}

impl Inventory {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the count of `name`, replacing any previous value.
    pub fn set<S>(&mut self, name: S, count: u32) -> &mut Self
    where
        S: AsRef<str>,
    {
        self.counts.insert(name.as_ref().trim().to_string(), count);
        self
    }

    /// Builder form of [`Inventory::set`].
    pub fn with<S>(mut self, name: S, count: u32) -> Self
    where
        S: AsRef<str>,
    {
        self.set(name, count);
        self
    }

    /// Sets the count of `name` after checking it against `bounds`.
    pub fn set_bounded<S>(
        &mut self,
        name: S,
        count: i64,
        bounds: InventoryBounds,
    ) -> Result<(), InventoryError>
    where
        S: AsRef<str>,
    {
        let name = name.as_ref().trim();
        if !bounds.contains(count) {
            return Err(InventoryError::OutOfBounds {
                name: name.to_string(),
                count,
                min: bounds.min,
                max: bounds.max,
            });
        }
        // `contains` guarantees `0 <= count <= u32::MAX`.
        self.set(name, count as u32);
        Ok(())
    }

    /// Parses a `name=count` entry into its parts.
    pub fn parse_entry(entry: &str) -> Result<(String, i64), InventoryError> {
        let (name, count) = entry
            .split_once('=')
            .ok_or_else(|| InventoryError::MalformedEntry(entry.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(InventoryError::MalformedEntry(entry.to_string()));
        }
        let count = count
            .trim()
            .parse::<i64>()
            .map_err(|_| InventoryError::MalformedEntry(entry.to_string()))?;
        Ok((name.to_string(), count))
    }

    /// Returns the count of `name`, zero when absent.
    #[inline]
    pub fn count(&self, name: &str) -> u32 {
        self.counts.get(name.trim()).copied().unwrap_or(0)
    }

    /// Iterates `(name, count)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Returns the total number of cards on hand.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Returns `true` if no card has a positive count.
    pub fn is_empty(&self) -> bool {
        self.counts.values().all(|&c| c == 0)
    }

    /// Sets every count to zero.
    pub fn reset(&mut self) {
        for count in self.counts.values_mut() {
            *count = 0;
        }
    }

    /// Checks every stored count against `bounds`.
    pub fn validate(&self, bounds: InventoryBounds) -> Result<(), InventoryError> {
        for (name, &count) in &self.counts {
            if !bounds.contains(i64::from(count)) {
                return Err(InventoryError::OutOfBounds {
                    name: name.clone(),
                    count: i64::from(count),
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }
        Ok(())
    }
}

impl<S> FromIterator<(S, u32)> for Inventory
where
    S: AsRef<str>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
    {
        let mut inventory = Inventory::new();
        for (name, count) in iter {
            inventory.set(name, count);
        }
        inventory
    }
}

impl std::fmt::Display for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries: Vec<String> = self
            .counts
            .iter()
            .filter(|(_, c)| **c > 0)
            .map(|(n, c)| format!("{}: {}", n, c))
            .collect();
        write!(f, "Inventory({})", entries.join(", "))
    }
}
