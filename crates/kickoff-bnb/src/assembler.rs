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

//! Turns a per-depth copy vector into a `Solution`.

use crate::plan::SearchPlan;
use kickoff_model::{
    model::Model,
    objective::Score,
    solution::{Selection, Solution},
};

/// Builds the solution for `copies`, one count per plan depth.
///
/// Levels with zero copies are skipped; the rest keep plan order.
///
/// # Panics
///
/// Panics if `copies` is longer than the plan.
pub fn assemble(model: &Model, plan: &SearchPlan, copies: &[u32], score: Score) -> Solution {
    assert!(
        copies.len() <= plan.len(),
        "called `assemble` with {} copy counts for a plan of depth {}",
        copies.len(),
        plan.len()
    );

    let selections = copies
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c > 0)
        .map(|(depth, &c)| {
            let entry = plan.entry_at(depth);
            Selection::new(entry, model.entry(entry).combo(), c)
        })
        .collect();

    Solution::new(score, selections)
}
