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

//! Catalog loader for delimited combo tables.
//!
//! This module turns a delimited text stream with a header row into a
//! `Catalog`. Columns are located by header name, so their order does not
//! matter, and every column except the combo name is optional: a table
//! without skill columns still loads, it just scores zero in skills mode.
//!
//! Fields may be wrapped in double quotes to carry the delimiter; a doubled
//! quote inside a quoted field stands for one quote character. Rows with a
//! blank combo name and blank lines are skipped rather than reported, which
//! matches how spreadsheet exports pad their tails.
//!
//! The loader accepts any `BufRead`, file path, raw reader, or string slice.

use crate::{
    catalog::Catalog,
    combo::{AttributeValue, ComboDefinition, MAX_SLOTS},
};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};
use thiserror::Error;

/// The individual skill columns a catalog may carry, in display order.
pub const SKILL_COLUMNS: [&str; 7] = [
    "Kicking",
    "Speed",
    "Stamina",
    "Technique",
    "Toughness",
    "Jumping",
    "Willpower",
];

const NAME_HEADERS: [&str; 2] = ["combo name", "comboname"];
const TOTAL_HEADERS: [&str; 3] = ["total skill up", "totalskillup", "total_skill_up"];
const SLOT_HEADERS: [&str; MAX_SLOTS] = ["card1", "card2", "card3"];

/// The error type for catalog loading.
#[derive(Debug, Error)]
pub enum CatalogLoaderError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input contained no header row.
    #[error("catalog is empty, expected a header row")]
    MissingHeader,
    /// The header row has no combo name column.
    #[error("catalog header has no combo name column (expected 'Combo Name' or 'ComboName')")]
    MissingNameColumn,
    /// A quoted field was not closed before the end of its line.
    #[error("unterminated quoted field on line {line}")]
    UnterminatedQuote { line: usize },
}

/// What a header column feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Category,
    Slot(usize),
    Skill(&'static str),
    DeclaredTotal,
    Ignored,
}

impl Column {
    fn from_header(header: &str) -> Self {
        let key = header.trim().to_ascii_lowercase();
        if NAME_HEADERS.contains(&key.as_str()) {
            return Column::Name;
        }
        if key == "category" {
            return Column::Category;
        }
        if let Some(slot) = SLOT_HEADERS.iter().position(|h| *h == key) {
            return Column::Slot(slot);
        }
        if TOTAL_HEADERS.contains(&key.as_str()) {
            return Column::DeclaredTotal;
        }
        if let Some(skill) = SKILL_COLUMNS
            .iter()
            .find(|s| s.eq_ignore_ascii_case(&key))
        {
            return Column::Skill(skill);
        }
        Column::Ignored
    }
}

/// A configurable loader for combo tables.
///
/// The expected header names are matched case-insensitively:
///
/// ```raw
/// Combo Name,Category,card1,card2,card3,Kicking,Speed,Stamina,Technique,Toughness,Jumping,Willpower,Total skill up
/// ```
///
/// # Configuration
/// * `delimiter`: the field separator, `,` by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLoader {
    delimiter: char,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl CatalogLoader {
    /// Creates a new `CatalogLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field delimiter.
    ///
    /// # Panics
    ///
    /// Panics if `delimiter` is a double quote.
    #[inline]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        assert!(
            delimiter != '"',
            "called `CatalogLoader::delimiter` with the quote character"
        );
        self.delimiter = delimiter;
        self
    }

    /// Loads a catalog from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Catalog, CatalogLoaderError> {
        let mut lines = rdr.lines().enumerate();

        let columns = loop {
            match lines.next() {
                None => return Err(CatalogLoaderError::MissingHeader),
                Some((number, line)) => {
                    let line = line?;
                    let line = line.trim_start_matches('\u{feff}');
                    if line.trim().is_empty() {
                        continue;
                    }
                    let headers = self.split_record(line, number + 1)?;
                    break headers
                        .iter()
                        .map(|h| Column::from_header(h))
                        .collect::<Vec<_>>();
                }
            }
        };

        if !columns.contains(&Column::Name) {
            return Err(CatalogLoaderError::MissingNameColumn);
        }

        let mut combos = Vec::new();
        for (number, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = self.split_record(&line, number + 1)?;
            if let Some(combo) = Self::build_combo(&columns, &fields) {
                combos.push(combo);
            }
        }

        Ok(Catalog::new(combos))
    }

    /// Loads a catalog from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Catalog, CatalogLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a catalog from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Catalog, CatalogLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a catalog from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Catalog, CatalogLoaderError> {
        self.from_reader(s.as_bytes())
    }

    /// Builds a combo from one record. Returns `None` for rows without a name.
    fn build_combo(columns: &[Column], fields: &[String]) -> Option<ComboDefinition> {
        let cell = |column: Column| -> Option<&str> {
            columns
                .iter()
                .position(|c| *c == column)
                .and_then(|i| fields.get(i))
                .map(|s| s.trim())
        };

        let name = cell(Column::Name).filter(|n| !n.is_empty())?;
        let category = cell(Column::Category).unwrap_or("");
        let mut combo = ComboDefinition::new(name, category);

        for (column, field) in columns.iter().zip(fields.iter()) {
            match *column {
                Column::Slot(slot) => {
                    let card = field.trim();
                    if !card.is_empty() {
                        combo = combo.with_slot(slot, card);
                    }
                }
                Column::Skill(skill) => {
                    if let Some(value) = AttributeValue::from_cell(field) {
                        combo = combo.with_skill(skill, value);
                    }
                }
                Column::DeclaredTotal => {
                    if let Some(value) = AttributeValue::from_cell(field) {
                        combo = combo.with_declared_total(value);
                    }
                }
                Column::Name | Column::Category | Column::Ignored => {}
            }
        }

        Some(combo)
    }

    /// Splits one line into fields, honouring double quotes.
    fn split_record(&self, line: &str, line_number: usize) -> Result<Vec<String>, CatalogLoaderError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            if in_quotes {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        field.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    field.push(c);
                }
            } else if c == '"' {
                in_quotes = true;
            } else if c == self.delimiter {
                fields.push(std::mem::take(&mut field));
            } else {
                field.push(c);
            }
        }

        if in_quotes {
            return Err(CatalogLoaderError::UnterminatedQuote { line: line_number });
        }
        fields.push(field);
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Combo Name,Category,card1,card2,card3,Kicking,Speed,Stamina,Technique,Toughness,Jumping,Willpower,Total skill up
Power Shot,FW,Shooting,Weights,,3,,,1,,,,4
Safe Hands,GK,Judo,Heading,Agility,,,,,2,3,,5
,MF,Running,,,,,,,,,,
\"Run, Pass\",MF,Running,Passing,,,2,1,,,,,3
";

    #[test]
    fn test_loads_combos_and_skips_nameless_rows() {
        let catalog = CatalogLoader::new().from_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);

        let shot = &catalog.combos()[0];
        assert_eq!(shot.name(), "Power Shot");
        assert_eq!(shot.category(), "FW");
        assert_eq!(
            shot.required_resources().collect::<Vec<_>>(),
            vec!["Shooting", "Weights"]
        );
        assert_eq!(shot.skill("Kicking"), Some(&AttributeValue::Integer(3)));
        assert_eq!(shot.skill_points(), 4);
        assert_eq!(shot.declared_total(), Some(&AttributeValue::Integer(4)));
    }

    #[test]
    fn test_quoted_fields_keep_delimiters() {
        let catalog = CatalogLoader::new().from_str(SAMPLE).unwrap();
        assert_eq!(catalog.combos()[2].name(), "Run, Pass");
        assert_eq!(catalog.combos()[2].skill_points(), 3);
    }

    #[test]
    fn test_missing_optional_columns_are_tolerated() {
        let input = "ComboName,card1,card2\nSprint,Running,Sprinting\n";
        let catalog = CatalogLoader::new().from_str(input).unwrap();
        assert_eq!(catalog.len(), 1);
        let combo = &catalog.combos()[0];
        assert_eq!(combo.category(), "");
        assert_eq!(combo.skill_points(), 0);
        assert!(combo.has_requirements());
    }

    #[test]
    fn test_short_rows_read_missing_cells_as_blank() {
        let input = "Combo Name,Category,card1,card2,card3,Speed\nShort,MF,Running\n";
        let catalog = CatalogLoader::new().from_str(input).unwrap();
        let combo = &catalog.combos()[0];
        assert_eq!(combo.required_resources().collect::<Vec<_>>(), vec!["Running"]);
        assert!(combo.skills().is_empty());
    }

    #[test]
    fn test_declared_total_only_catalog_scores_from_total() {
        let input = "Combo Name,card1,Total skill up\nSolo,Running,7\n";
        let catalog = CatalogLoader::new().from_str(input).unwrap();
        assert_eq!(catalog.combos()[0].skill_points(), 7);
    }

    #[test]
    fn test_custom_delimiter_and_crlf() {
        let input = "Combo Name;Category;card1\r\nDive;GK;Agility\r\n";
        let catalog = CatalogLoader::new().delimiter(';').from_str(input).unwrap();
        assert_eq!(catalog.combos()[0].name(), "Dive");
        assert_eq!(
            catalog.combos()[0].required_resources().collect::<Vec<_>>(),
            vec!["Agility"]
        );
    }

    #[test]
    fn test_header_byte_order_mark_is_ignored() {
        let input = "\u{feff}Combo Name,card1\nDive,Agility\n";
        let catalog = CatalogLoader::new().from_str(input).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_escaped_quotes() {
        let input = "Combo Name,card1\n\"The \"\"Wall\"\"\",Marking\n";
        let catalog = CatalogLoader::new().from_str(input).unwrap();
        assert_eq!(catalog.combos()[0].name(), "The \"Wall\"");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            CatalogLoader::new().from_str("\n\n"),
            Err(CatalogLoaderError::MissingHeader)
        ));
        assert!(matches!(
            CatalogLoader::new().from_str("Category,card1\nGK,Judo\n"),
            Err(CatalogLoaderError::MissingNameColumn)
        ));
        assert!(matches!(
            CatalogLoader::new().from_str("Combo Name,card1\n\"Open,Judo\n"),
            Err(CatalogLoaderError::UnterminatedQuote { line: 2 })
        ));
    }
}
