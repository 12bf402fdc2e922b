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

//! # Kickoff Model
//!
//! Domain data for the combo allocation problem: which combos exist, which
//! cards are on hand, and the preprocessed, immutable `Model` the search
//! engine consumes.
//!
//! ## Modules
//!
//! - `combo`: `ComboDefinition` with an explicit schema separating identity,
//!   category, card slots and skill fields.
//! - `catalog`: the ordered, immutable combo list.
//! - `inventory`: card counts by name, with input bounds.
//! - `objective`: objective modes, the restricted-category limit and `Score`.
//! - `family`: card family classification for display.
//! - `loading`: delimited text loader producing a `Catalog`.
//! - `model`: the preprocessor (`ModelBuilder`) and its output (`Model`).
//! - `solution`: the assembled result of a search.
//! - `index`: typed indices for resources, catalog combos and model entries.

pub mod catalog;
pub mod combo;
pub mod family;
pub mod index;
pub mod inventory;
pub mod loading;
pub mod model;
pub mod objective;
pub mod solution;
