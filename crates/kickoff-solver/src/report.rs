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

//! Text rendering of optimization results and of the catalog.
//!
//! `ResultReport` groups the selected copies of each combo into one line
//! (`Name ×count`), totals the individual skill columns and prints a summary
//! matching the objective. `CatalogListing` prints every combo in
//! alphabetical or skill-total order.

use crate::solver::Optimization;
use kickoff_core::num::ops::saturating_arithmetic::SaturatingAddVal;
use kickoff_model::{
    catalog::Catalog,
    combo::{AttributeValue, ComboDefinition},
    family::ResourceFamily,
    index::ComboIndex,
    loading::SKILL_COLUMNS,
    objective::{ObjectiveMode, Score},
};
use std::fmt::Write;

/// Message rendered when the assignment is empty.
pub const EMPTY_RESULT_MESSAGE: &str = "No full combos can be made with your current cards.";

/// Message rendered when the catalog has no combos.
pub const EMPTY_CATALOG_MESSAGE: &str = "No combos found in catalog.";

/// Formats a skill cell, prefixing positive integers with `+`.
fn signed(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Integer(v) if *v > 0 => format!("+{}", v),
        other => other.to_string(),
    }
}

fn write_combo_details<W: Write>(
    out: &mut W,
    combo: &ComboDefinition,
    with_families: bool,
) -> std::fmt::Result {
    let cards: Vec<String> = combo
        .required_resources()
        .map(|card| {
            if with_families {
                format!("{} [{}]", card, ResourceFamily::classify(card))
            } else {
                card.to_string()
            }
        })
        .collect();
    writeln!(out, "  Cards: {}", cards.join(", "))?;
    if let Some(total) = combo.declared_total() {
        writeln!(out, "  Total Skill Up: {}", total)?;
    }
    let skills: Vec<String> = SKILL_COLUMNS
        .iter()
        .filter_map(|&name| combo.skill(name).map(|v| format!("{}: {}", name, signed(v))))
        .collect();
    if !skills.is_empty() {
        writeln!(out, "  {}", skills.join(", "))?;
    }
    Ok(())
}

/// One grouped line of a `ResultReport`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReportLine {
    combo: ComboIndex,
    per_copy_value: Score,
    copies: u32,
}

/// A rendered view of an optimization result.
///
/// The objective and the per-copy values come from the model the search ran
/// on, so the summary total of an untouched report equals the score.
/// Removing a combo from the report only changes what is displayed. The
/// optimizer is not consulted again.
#[derive(Debug, Clone)]
pub struct ResultReport<'c> {
    catalog: &'c Catalog,
    mode: ObjectiveMode,
    lines: Vec<ReportLine>,
}

impl<'c> ResultReport<'c> {
    pub fn new(catalog: &'c Catalog, optimization: &Optimization) -> Self {
        let model = optimization.model();
        let mut lines: Vec<ReportLine> = Vec::new();
        for selection in optimization.solution().selections() {
            match lines.iter_mut().find(|l| l.combo == selection.combo()) {
                Some(line) => line.copies += selection.copies(),
                None => lines.push(ReportLine {
                    combo: selection.combo(),
                    per_copy_value: model.entry(selection.entry()).per_copy_value(),
                    copies: selection.copies(),
                }),
            }
        }
        Self {
            catalog,
            mode: model.objective(),
            lines,
        }
    }

    /// Returns the objective the search optimized.
    #[inline]
    pub fn mode(&self) -> ObjectiveMode {
        self.mode
    }

    /// Returns the grouped lines as combo and copy count.
    pub fn lines(&self) -> impl Iterator<Item = (&'c ComboDefinition, u32)> + '_ {
        self.lines
            .iter()
            .map(|l| (self.catalog.combo(l.combo), l.copies))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of selected copies.
    pub fn total_combos(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.copies)).sum()
    }

    /// Returns the objective value of the listed copies: cards consumed in
    /// cards mode, skill points in skills mode.
    pub fn objective_total(&self) -> Score {
        self.lines.iter().fold(0, |acc: Score, l| {
            acc.saturating_add_val(l.per_copy_value.saturating_mul(Score::from(l.copies)))
        })
    }

    /// Returns the positive per-skill totals in column order.
    pub fn skill_totals(&self) -> Vec<(&'static str, i64)> {
        SKILL_COLUMNS
            .iter()
            .map(|&name| {
                let total = self.lines().fold(0i64, |acc, (combo, copies)| {
                    let value = combo.skill(name).map(AttributeValue::integer_sum).unwrap_or(0);
                    acc.saturating_add_val(value.saturating_mul(i64::from(copies)))
                });
                (name, total)
            })
            .filter(|&(_, total)| total > 0)
            .collect()
    }

    /// Removes one copy of the combo called `name`. Returns `false` if no
    /// such combo is part of the report.
    pub fn remove(&mut self, name: &str) -> bool {
        let name = name.trim();
        let Some(position) = self
            .lines
            .iter()
            .position(|l| self.catalog.combo(l.combo).name() == name)
        else {
            return false;
        };
        if self.lines[position].copies > 1 {
            self.lines[position].copies -= 1;
        } else {
            self.lines.remove(position);
        }
        true
    }

    /// Returns the summary sentence for the current mode.
    pub fn summary(&self) -> String {
        match self.mode {
            ObjectiveMode::Skills => format!(
                "Best combo set gives a total of {} skill points across {} combos.",
                self.objective_total(),
                self.total_combos()
            ),
            ObjectiveMode::Cards => format!(
                "Best combo set uses {} cards across {} combos.",
                self.objective_total(),
                self.total_combos()
            ),
        }
    }

    /// Renders the full report.
    #[inline]
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_into<W: Write>(&self, out: &mut W) -> std::fmt::Result {
        if self.is_empty() {
            return writeln!(out, "{}", EMPTY_RESULT_MESSAGE);
        }
        for (combo, copies) in self.lines() {
            if copies > 1 {
                writeln!(out, "{} ×{} ({})", combo.name(), copies, combo.category())?;
            } else {
                writeln!(out, "{} ({})", combo.name(), combo.category())?;
            }
            write_combo_details(out, combo, false)?;
        }
        writeln!(out)?;
        writeln!(out, "{}", self.summary())?;
        let totals: Vec<String> = self
            .skill_totals()
            .iter()
            .map(|(name, total)| format!("{}: +{}", name, total))
            .collect();
        writeln!(out, "Total skill increases: {}", totals.join(", "))
    }
}

impl std::fmt::Display for ResultReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_into(f)
    }
}

/// Sort order of a `CatalogListing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogOrder {
    /// By name, ignoring case.
    #[default]
    Alphabetical,
    /// By skill points, highest first.
    SkillTotal,
}

impl CatalogOrder {
    fn caption(&self) -> &'static str {
        match self {
            CatalogOrder::Alphabetical => "A–Z",
            CatalogOrder::SkillTotal => "by Total Skill Up",
        }
    }
}

/// Every combo of a catalog in a chosen order. Ties keep catalog order.
#[derive(Debug, Clone)]
pub struct CatalogListing<'c> {
    order: CatalogOrder,
    combos: Vec<&'c ComboDefinition>,
}

impl<'c> CatalogListing<'c> {
    pub fn new(catalog: &'c Catalog, order: CatalogOrder) -> Self {
        let mut combos: Vec<&ComboDefinition> = catalog.combos().iter().collect();
        match order {
            CatalogOrder::Alphabetical => {
                combos.sort_by_cached_key(|c| c.name().to_lowercase());
            }
            CatalogOrder::SkillTotal => {
                combos.sort_by_key(|c| std::cmp::Reverse(c.skill_points().max(0)));
            }
        }
        Self { order, combos }
    }

    #[inline]
    pub fn order(&self) -> CatalogOrder {
        self.order
    }

    #[inline]
    pub fn combos(&self) -> &[&'c ComboDefinition] {
        &self.combos
    }

    #[inline]
    pub fn footer(&self) -> String {
        format!(
            "{} combos listed ({})",
            self.combos.len(),
            self.order.caption()
        )
    }

    #[inline]
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_into<W: Write>(&self, out: &mut W) -> std::fmt::Result {
        if self.combos.is_empty() {
            return writeln!(out, "{}", EMPTY_CATALOG_MESSAGE);
        }
        for combo in &self.combos {
            writeln!(out, "{} ({})", combo.name(), combo.category())?;
            write_combo_details(out, combo, true)?;
        }
        writeln!(out)?;
        writeln!(out, "{}", self.footer())
    }
}

impl std::fmt::Display for CatalogListing<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_into(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::ComboOptimizer;
    use kickoff_model::inventory::Inventory;

    fn catalog() -> Catalog {
        vec![
            ComboDefinition::new("Sprint Drill", "FW")
                .with_slot(0, "Running")
                .with_slot(1, "Sprinting")
                .with_skill("Speed", AttributeValue::Integer(3))
                .with_skill("Stamina", AttributeValue::Integer(1))
                .with_declared_total(AttributeValue::Integer(4)),
            ComboDefinition::new("keeper focus", "GK")
                .with_slot(0, "Judo")
                .with_skill("Toughness", AttributeValue::Integer(5))
                .with_skill("Speed", AttributeValue::Integer(-1)),
            ComboDefinition::new("Analysis Camp", "MF")
                .with_slot(0, "Analysis")
                .with_slot(1, "Mini-Camp")
                .with_skill("Technique", AttributeValue::Integer(2)),
        ]
        .into_iter()
        .collect()
    }

    fn optimize(catalog: &Catalog, inventory: &Inventory, mode: ObjectiveMode) -> Optimization {
        ComboOptimizer::builder()
            .objective(mode)
            .build()
            .optimize(catalog, inventory)
    }

    #[test]
    fn test_groups_duplicate_copies() {
        let catalog = catalog();
        let inventory = Inventory::new()
            .with("Running", 2)
            .with("Sprinting", 2)
            .with("Judo", 1);
        let optimization = optimize(&catalog, &inventory, ObjectiveMode::Cards);
        let report = ResultReport::new(&catalog, &optimization);

        let lines: Vec<(&str, u32)> = report.lines().map(|(c, n)| (c.name(), n)).collect();
        assert_eq!(lines, vec![("Sprint Drill", 2), ("keeper focus", 1)]);
        assert_eq!(report.total_combos(), 3);
        assert_eq!(report.mode(), ObjectiveMode::Cards);
        assert_eq!(report.objective_total(), 5);

        let text = report.render();
        assert!(text.contains("Sprint Drill ×2 (FW)"));
        assert!(text.contains("keeper focus (GK)"));
        assert!(text.contains("  Cards: Running, Sprinting"));
        assert!(text.contains("  Total Skill Up: 4"));
        assert!(text.contains("  Speed: -1, Toughness: +5"));
        assert!(text.contains("Best combo set uses 5 cards across 3 combos."));
    }

    #[test]
    fn test_skill_totals_show_positive_only() {
        let catalog = catalog();
        let inventory = Inventory::new()
            .with("Running", 1)
            .with("Sprinting", 1)
            .with("Judo", 1);
        let optimization = optimize(&catalog, &inventory, ObjectiveMode::Skills);
        let report = ResultReport::new(&catalog, &optimization);

        // Speed: 3 - 1 = 2, Stamina 1, Toughness 5.
        assert_eq!(
            report.skill_totals(),
            vec![("Speed", 2), ("Stamina", 1), ("Toughness", 5)]
        );
        assert_eq!(report.mode(), ObjectiveMode::Skills);
        assert_eq!(report.objective_total(), 8);
        assert_eq!(report.objective_total(), optimization.score());
        assert!(
            report
                .render()
                .contains("Best combo set gives a total of 8 skill points across 2 combos.")
        );
        assert!(
            report
                .render()
                .ends_with("Total skill increases: Speed: +2, Stamina: +1, Toughness: +5\n")
        );
    }

    #[test]
    fn test_empty_result_message() {
        let catalog = catalog();
        let optimization = optimize(&catalog, &Inventory::new(), ObjectiveMode::Cards);
        let report = ResultReport::new(&catalog, &optimization);
        assert!(report.is_empty());
        assert_eq!(report.render(), format!("{}\n", EMPTY_RESULT_MESSAGE));
    }

    #[test]
    fn test_remove_only_changes_report() {
        let catalog = catalog();
        let inventory = Inventory::new().with("Running", 2).with("Sprinting", 2);
        let optimization = optimize(&catalog, &inventory, ObjectiveMode::Cards);
        let mut report = ResultReport::new(&catalog, &optimization);

        assert!(report.remove("Sprint Drill"));
        assert_eq!(report.total_combos(), 1);
        assert_eq!(report.objective_total(), 2);
        assert!(report.render().contains("Best combo set uses 2 cards across 1 combos."));

        assert!(report.remove(" Sprint Drill "));
        assert!(report.is_empty());
        assert!(!report.remove("Sprint Drill"));
        assert!(!report.remove("Unknown"));

        assert_eq!(optimization.score(), 4);
        assert_eq!(optimization.solution().total_copies(), 2);
    }

    #[test]
    fn test_summary_follows_the_model_objective() {
        let catalog = catalog();
        let inventory = Inventory::new()
            .with("Running", 2)
            .with("Sprinting", 2)
            .with("Judo", 2)
            .with("Analysis", 1)
            .with("Mini-Camp", 1);

        for mode in [ObjectiveMode::Cards, ObjectiveMode::Skills] {
            let optimization = optimize(&catalog, &inventory, mode);
            let mut report = ResultReport::new(&catalog, &optimization);
            assert_eq!(report.mode(), optimization.model().objective());
            assert_eq!(report.objective_total(), optimization.score());
            assert_eq!(
                report.objective_total(),
                optimization.solution().evaluate(optimization.model())
            );

            // Dropping a copy lowers the total by that copy's model value.
            let name = report.lines().next().unwrap().0.name().to_string();
            let combo = catalog.find(&name).unwrap();
            let entry = optimization.model().entry_for_combo(combo).unwrap();
            let value = optimization.model().entry(entry).per_copy_value();
            assert!(report.remove(&name));
            assert_eq!(report.objective_total(), optimization.score() - value);
        }
    }

    #[test]
    fn test_listing_alphabetical_ignores_case() {
        let catalog = catalog();
        let listing = CatalogListing::new(&catalog, CatalogOrder::Alphabetical);
        let names: Vec<&str> = listing.combos().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Analysis Camp", "keeper focus", "Sprint Drill"]);
        assert_eq!(listing.footer(), "3 combos listed (A–Z)");
    }

    #[test]
    fn test_listing_by_skill_total() {
        let catalog = catalog();
        let listing = CatalogListing::new(&catalog, CatalogOrder::SkillTotal);
        let names: Vec<&str> = listing.combos().iter().map(|c| c.name()).collect();
        // Skill points: Sprint Drill 4, keeper focus 4, Analysis Camp 2.
        assert_eq!(names, vec!["Sprint Drill", "keeper focus", "Analysis Camp"]);

        let text = listing.render();
        assert!(text.contains("  Cards: Analysis [tactical], Mini-Camp [support]"));
        assert!(text.ends_with("3 combos listed (by Total Skill Up)\n"));
    }

    #[test]
    fn test_listing_empty_catalog() {
        let catalog = Catalog::default();
        let listing = CatalogListing::new(&catalog, CatalogOrder::Alphabetical);
        assert_eq!(listing.render(), format!("{}\n", EMPTY_CATALOG_MESSAGE));
    }
}
