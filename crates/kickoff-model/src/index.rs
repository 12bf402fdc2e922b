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

use kickoff_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for resource (card) indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ResourceIndexTag;

impl TypedIndexTag for ResourceIndexTag {
    const NAME: &'static str = "ResourceIndex";
}

/// A typed index into the resource table of a `Model`.
pub type ResourceIndex = TypedIndex<ResourceIndexTag>;

/// A tag type for catalog combo indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ComboIndexTag;

impl TypedIndexTag for ComboIndexTag {
    const NAME: &'static str = "ComboIndex";
}

/// A typed index into a `Catalog`.
pub type ComboIndex = TypedIndex<ComboIndexTag>;

/// A tag type for model entry indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EntryIndexTag;

impl TypedIndexTag for EntryIndexTag {
    const NAME: &'static str = "EntryIndex";
}

/// A typed index into the requirement vectors of a `Model`.
pub type EntryIndex = TypedIndex<EntryIndexTag>;
