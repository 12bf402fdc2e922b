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

//! The fractional upper bound.
//!
//! The remaining decisions are relaxed into a bounded fractional knapsack:
//! the residual units of every resource the remaining entries use are pooled
//! into one capacity, each entry may take at most as many copies as the real
//! inventory and the category headroom allow on their own, and the last copy
//! that does not fit may be taken fractionally. Every feasible completion is
//! feasible for the relaxation, so the bound never under-estimates.
//!
//! Entries are visited in plan order, which is density order, so the greedy
//! fill is the exact optimum of the relaxation. Fractional parts are floored
//! since every reachable score is an integer.

use crate::plan::SearchPlan;
use kickoff_core::num::ops::saturating_arithmetic::{SaturatingAddVal, SaturatingMulVal};
use kickoff_model::{model::Model, objective::Score};

/// Returns an upper bound on the score the entries at `depth` and deeper can
/// still add from `inventory` with `headroom` restricted copies left.
pub fn fractional_bound(
    model: &Model,
    plan: &SearchPlan,
    depth: usize,
    inventory: &[u32],
    headroom: Option<u32>,
) -> Score {
    let mut capacity: u64 = plan
        .suffix_list(depth)
        .iter()
        .map(|&r| u64::from(inventory[r.get()]))
        .sum();

    let mut bound: Score = 0;
    for &entry_index in &plan.order()[depth..] {
        if capacity == 0 {
            break;
        }

        let entry = model.entry(entry_index);
        let value = entry.per_copy_value();
        if value <= 0 {
            // Density order puts every remaining entry at zero as well.
            break;
        }

        let cap = u64::from(entry.max_copies(inventory, headroom));
        if cap == 0 {
            continue;
        }

        let units = u64::from(entry.units_per_copy());
        let whole = cap.min(capacity / units);
        bound = bound.saturating_add_val(value.saturating_mul_val(whole as Score));
        capacity -= whole * units;

        if whole < cap {
            let fraction = i128::from(value) * i128::from(capacity) / i128::from(units);
            bound = bound.saturating_add_val(Score::try_from(fraction).unwrap_or(Score::MAX));
            break;
        }
    }

    bound
}
