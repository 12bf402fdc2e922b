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

//! Combo definitions.
//!
//! A combo consumes up to three cards and grants skill points. The schema is
//! explicit: identity (`name`), `category`, card `slots`, and `skills`. Only
//! the skill fields ever contribute to the skills objective, so identity and
//! category text can never leak numbers into a score.

use kickoff_core::num::ops::saturating_arithmetic::SaturatingAddVal;
use regex::Regex;
use std::sync::LazyLock;

/// The number of card slots a combo definition carries.
pub const MAX_SLOTS: usize = 3;

static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+-]?\d+").expect("integer pattern is a valid regex"));

/// The value of a skill field as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    /// A plain integer cell.
    Integer(i64),
    /// Any other text, e.g. `"+2"` or `"3 (x2)"`.
    Text(String),
}

impl AttributeValue {
    /// Interprets a raw cell. Blank cells carry no value.
    pub fn from_cell(cell: &str) -> Option<Self> {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<i64>() {
            Ok(value) => Some(AttributeValue::Integer(value)),
            Err(_) => Some(AttributeValue::Text(trimmed.to_string())),
        }
    }

    /// Returns the sum of every signed integer found in the value.
    ///
    /// Integers that do not fit an `i64` contribute 0. Text without digits
    /// contributes 0.
    pub fn integer_sum(&self) -> i64 {
        match self {
            AttributeValue::Integer(value) => *value,
            AttributeValue::Text(text) => INTEGER_PATTERN
                .find_iter(text)
                .map(|m| m.as_str().parse::<i64>().unwrap_or(0))
                .fold(0i64, |acc, v| acc.saturating_add_val(v)),
        }
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Integer(value) => write!(f, "{}", value),
            AttributeValue::Text(text) => f.write_str(text),
        }
    }
}

/// A named skill gain of a combo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SkillField {
    name: String,
    value: AttributeValue,
}

impl SkillField {
    #[inline]
    pub fn new<S>(name: S, value: AttributeValue) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            value,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &AttributeValue {
        &self.value
    }
}

/// An immutable combo definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComboDefinition {
    name: String,
    category: String,
    slots: [Option<String>; MAX_SLOTS],
    skills: Vec<SkillField>,
    declared_total: Option<AttributeValue>,
}

impl ComboDefinition {
    /// Creates a combo with no slots and no skills.
    pub fn new<N, C>(name: N, category: C) -> Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        Self {
            name: name.into(),
            category: category.into(),
            slots: Default::default(),
            skills: Vec::new(),
            declared_total: None,
        }
    }

    /// Sets card slot `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= MAX_SLOTS`.
    pub fn with_slot<S>(mut self, slot: usize, card: S) -> Self
    where
        S: Into<String>,
    {
        assert!(
            slot < MAX_SLOTS,
            "called `ComboDefinition::with_slot` with slot out of bounds: the len is {} but the slot is {}",
            MAX_SLOTS,
            slot
        );
        self.slots[slot] = Some(card.into());
        self
    }

    /// Appends a skill field.
    pub fn with_skill<S>(mut self, name: S, value: AttributeValue) -> Self
    where
        S: Into<String>,
    {
        self.skills.push(SkillField::new(name, value));
        self
    }

    /// Sets the declared skill total shown by the source.
    pub fn with_declared_total(mut self, value: AttributeValue) -> Self {
        self.declared_total = Some(value);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[inline]
    pub fn slots(&self) -> &[Option<String>; MAX_SLOTS] {
        &self.slots
    }

    #[inline]
    pub fn skills(&self) -> &[SkillField] {
        &self.skills
    }

    #[inline]
    pub fn declared_total(&self) -> Option<&AttributeValue> {
        self.declared_total.as_ref()
    }

    /// Returns the value of the skill called `name`, if present.
    pub fn skill(&self, name: &str) -> Option<&AttributeValue> {
        self.skills
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| &s.value)
    }

    /// Iterates the trimmed, non-blank card names in slot order.
    /// Duplicates are yielded once per slot.
    pub fn required_resources(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Returns `true` if at least one slot names a card.
    #[inline]
    pub fn has_requirements(&self) -> bool {
        self.required_resources().next().is_some()
    }

    /// Returns `true` if the category contains `marker`, ignoring case.
    pub fn is_restricted(&self, marker: &str) -> bool {
        if marker.is_empty() {
            return false;
        }
        self.category
            .to_lowercase()
            .contains(&marker.to_lowercase())
    }

    /// Returns the raw skill points of one copy.
    ///
    /// Sums the integers of every skill field. When the combo carries no
    /// skill fields, the declared total stands in for them. The result may be
    /// negative; objectives floor it.
    pub fn skill_points(&self) -> i64 {
        if self.skills.is_empty() {
            return self
                .declared_total
                .as_ref()
                .map(AttributeValue::integer_sum)
                .unwrap_or(0);
        }
        self.skills
            .iter()
            .map(|s| s.value.integer_sum())
            .fold(0i64, |acc, v| acc.saturating_add_val(v))
    }
}

impl std::fmt::Display for ComboDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.category)
    }
}
