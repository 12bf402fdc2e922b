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

//! Objective modes and the restricted-category limit.
//!
//! Both types are validated at the boundary: parsing rejects anything the
//! search core is not prepared to handle, so the core only ever sees a known
//! objective and either no limit or a non-negative cap.

use crate::combo::ComboDefinition;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// The scalar type of objective values.
///
/// Both objectives are integer valued, so the search runs in exact integer
/// arithmetic.
pub type Score = i64;

/// The category marker used when none is configured.
pub const DEFAULT_RESTRICTED_MARKER: &str = "GK";

/// What the optimizer maximizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveMode {
    /// Maximize the number of cards consumed.
    #[default]
    Cards,
    /// Maximize the total skill points gained.
    Skills,
}

impl ObjectiveMode {
    /// Returns the value of a single copy of `combo` under this objective.
    ///
    /// `units_per_copy` is the number of cards one copy consumes. The result
    /// is never negative.
    #[inline]
    pub fn per_copy_value(&self, combo: &ComboDefinition, units_per_copy: u32) -> Score {
        match self {
            ObjectiveMode::Cards => Score::from(units_per_copy),
            ObjectiveMode::Skills => combo.skill_points().max(0),
        }
    }

    /// Returns the lowercase name used in configuration and on the command line.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveMode::Cards => "cards",
            ObjectiveMode::Skills => "skills",
        }
    }
}

impl std::fmt::Display for ObjectiveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when an objective name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown objective mode '{0}', expected 'cards' or 'skills'")]
pub struct ObjectiveModeError(pub String);

impl FromStr for ObjectiveMode {
    type Err = ObjectiveModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cards" => Ok(ObjectiveMode::Cards),
            "skills" => Ok(ObjectiveMode::Skills),
            _ => Err(ObjectiveModeError(s.to_string())),
        }
    }
}

/// The cap on selected copies of restricted-category combos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CategoryLimitRepr", into = "CategoryLimitRepr")]
pub enum CategoryLimit {
    /// No cap.
    #[default]
    Unlimited,
    /// At most this many restricted copies in total.
    AtMost(u32),
}

impl CategoryLimit {
    /// Returns the initial headroom, `None` meaning unconstrained.
    #[inline]
    pub fn headroom(&self) -> Option<u32> {
        match self {
            CategoryLimit::Unlimited => None,
            CategoryLimit::AtMost(limit) => Some(*limit),
        }
    }

    /// Returns `true` if `count` restricted copies respect this limit.
    #[inline]
    pub fn allows(&self, count: u64) -> bool {
        match self {
            CategoryLimit::Unlimited => true,
            CategoryLimit::AtMost(limit) => count <= u64::from(*limit),
        }
    }
}

impl std::fmt::Display for CategoryLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryLimit::Unlimited => write!(f, "none"),
            CategoryLimit::AtMost(limit) => write!(f, "{}", limit),
        }
    }
}

/// The error returned when a category limit fails boundary validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryLimitError {
    /// The limit was a negative number.
    #[error("category limit must not be negative, got {0}")]
    Negative(i64),
    /// The limit was neither `none` nor an integer.
    #[error("category limit must be 'none' or a non-negative integer, got '{0}'")]
    NotANumber(String),
    /// The limit does not fit the supported range.
    #[error("category limit {0} is too large")]
    TooLarge(i64),
}

impl TryFrom<i64> for CategoryLimit {
    type Error = CategoryLimitError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(CategoryLimitError::Negative(value));
        }
        u32::try_from(value)
            .map(CategoryLimit::AtMost)
            .map_err(|_| CategoryLimitError::TooLarge(value))
    }
}

impl FromStr for CategoryLimit {
    type Err = CategoryLimitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("none") {
            return Ok(CategoryLimit::Unlimited);
        }
        let value: i64 = trimmed
            .parse()
            .map_err(|_| CategoryLimitError::NotANumber(s.to_string()))?;
        CategoryLimit::try_from(value)
    }
}

/// Wire form accepted in configuration files: `"none"`, `"2"` or `2`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum CategoryLimitRepr {
    Count(i64),
    Text(String),
}

impl TryFrom<CategoryLimitRepr> for CategoryLimit {
    type Error = CategoryLimitError;

    fn try_from(repr: CategoryLimitRepr) -> Result<Self, Self::Error> {
        match repr {
            CategoryLimitRepr::Count(value) => CategoryLimit::try_from(value),
            CategoryLimitRepr::Text(text) => text.parse(),
        }
    }
}

impl From<CategoryLimit> for CategoryLimitRepr {
    fn from(limit: CategoryLimit) -> Self {
        match limit {
            CategoryLimit::Unlimited => CategoryLimitRepr::Text("none".to_string()),
            CategoryLimit::AtMost(limit) => CategoryLimitRepr::Count(i64::from(limit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combo::{AttributeValue, ComboDefinition};

    #[test]
    fn test_objective_mode_parses_case_insensitively() {
        assert_eq!("cards".parse::<ObjectiveMode>(), Ok(ObjectiveMode::Cards));
        assert_eq!(" Skills ".parse::<ObjectiveMode>(), Ok(ObjectiveMode::Skills));
        assert!("points".parse::<ObjectiveMode>().is_err());
    }

    #[test]
    fn test_category_limit_accepts_none_and_non_negative_integers() {
        assert_eq!("none".parse::<CategoryLimit>(), Ok(CategoryLimit::Unlimited));
        assert_eq!("NONE".parse::<CategoryLimit>(), Ok(CategoryLimit::Unlimited));
        assert_eq!("0".parse::<CategoryLimit>(), Ok(CategoryLimit::AtMost(0)));
        assert_eq!(" 3 ".parse::<CategoryLimit>(), Ok(CategoryLimit::AtMost(3)));
    }

    #[test]
    fn test_category_limit_rejects_negative_and_non_numeric() {
        assert_eq!(
            "-1".parse::<CategoryLimit>(),
            Err(CategoryLimitError::Negative(-1))
        );
        assert!(matches!(
            "two".parse::<CategoryLimit>(),
            Err(CategoryLimitError::NotANumber(_))
        ));
        assert!(matches!(
            "99999999999".parse::<CategoryLimit>(),
            Err(CategoryLimitError::TooLarge(_))
        ));
    }

    #[test]
    fn test_category_limit_headroom_and_allows() {
        assert_eq!(CategoryLimit::Unlimited.headroom(), None);
        assert_eq!(CategoryLimit::AtMost(2).headroom(), Some(2));
        assert!(CategoryLimit::Unlimited.allows(1_000));
        assert!(CategoryLimit::AtMost(2).allows(2));
        assert!(!CategoryLimit::AtMost(2).allows(3));
    }

    #[derive(Debug, Deserialize)]
    struct LimitHolder {
        limit: CategoryLimit,
    }

    #[test]
    fn test_category_limit_deserializes_from_string_or_integer() {
        let holder: LimitHolder = toml::from_str("limit = \"none\"").unwrap();
        assert_eq!(holder.limit, CategoryLimit::Unlimited);
        let holder: LimitHolder = toml::from_str("limit = 2").unwrap();
        assert_eq!(holder.limit, CategoryLimit::AtMost(2));
        let holder: LimitHolder = toml::from_str("limit = \"1\"").unwrap();
        assert_eq!(holder.limit, CategoryLimit::AtMost(1));
        assert!(toml::from_str::<LimitHolder>("limit = -4").is_err());
    }

    #[test]
    fn test_per_copy_value_by_mode() {
        let combo = ComboDefinition::new("Overlap", "FW")
            .with_slot(0, "Running")
            .with_slot(1, "Passing")
            .with_skill("Speed", AttributeValue::Integer(4))
            .with_skill("Stamina", AttributeValue::Text("-9".to_string()));

        assert_eq!(ObjectiveMode::Cards.per_copy_value(&combo, 2), 2);
        // Negative skill sums floor at zero.
        assert_eq!(ObjectiveMode::Skills.per_copy_value(&combo, 2), 0);
    }
}
