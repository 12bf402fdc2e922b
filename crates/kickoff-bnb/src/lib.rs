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

//! # Kickoff Branch-and-Bound
//!
//! An exact, depth-first branch-and-bound engine for the combo allocation
//! problem: choose how many copies of every combo to make so that the card
//! inventory and the restricted-category cap are respected and the objective
//! is maximal.
//!
//! ## Search outline
//!
//! 1. `plan` ranks the model entries by value density and drops entries the
//!    root inventory cannot make even once.
//! 2. `greedy` takes one copy of every feasible entry in ranked order to seed
//!    the incumbent.
//! 3. `bnb` walks the copy-count tree iteratively. Each node is pruned by the
//!    fractional upper bound of `bound`, by the memo table, and by take
//!    dominance inside its copy loop.
//! 4. `assembler` turns the winning copy vector into a `Solution`.
//!
//! Every state change goes through the undo trail, so backtracking restores
//! the inventory, the category headroom and the score exactly.
//!
//! Search limits are expressed as `TreeSearchMonitor`s. When a monitor
//! terminates the search, the best solution found so far is returned as a
//! feasible, unproven result.

pub mod assembler;
pub mod bnb;
pub mod bound;
pub mod greedy;
pub mod incumbent;
pub mod memo;
pub mod monitor;
pub mod plan;
pub mod result;
pub mod state;
pub mod stats;
mod trail;
