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

use kickoff_model::objective::Score;

/// The best assignment found so far.
///
/// Starts as the empty assignment with score 0, which is always feasible.
/// Only strictly better scores replace it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incumbent {
    score: Score,
    copies: Vec<u32>,
}

impl Incumbent {
    /// Creates the empty incumbent for `num_levels` decision levels.
    #[inline]
    pub fn empty(num_levels: usize) -> Self {
        Self {
            score: 0,
            copies: vec![0; num_levels],
        }
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    /// The copy count per plan depth.
    #[inline]
    pub fn copies(&self) -> &[u32] {
        &self.copies
    }

    /// Replaces the incumbent if `score` is strictly better. Levels beyond
    /// `copies` are taken as zero.
    pub fn try_update(&mut self, score: Score, copies: &[u32]) -> bool {
        if score <= self.score {
            return false;
        }
        debug_assert!(
            copies.len() <= self.copies.len(),
            "called `Incumbent::try_update` with {} levels but the incumbent has {}",
            copies.len(),
            self.copies.len()
        );
        self.score = score;
        self.copies.fill(0);
        self.copies[..copies.len()].copy_from_slice(copies);
        true
    }

    /// Consumes the incumbent and returns its copy vector.
    #[inline]
    pub fn into_copies(self) -> Vec<u32> {
        self.copies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let incumbent = Incumbent::empty(3);
        assert_eq!(incumbent.score(), 0);
        assert_eq!(incumbent.copies(), &[0, 0, 0]);
    }

    #[test]
    fn test_only_strict_improvements_replace() {
        let mut incumbent = Incumbent::empty(3);
        assert!(!incumbent.try_update(0, &[1, 0, 0]));
        assert!(incumbent.try_update(4, &[1, 2, 0]));
        assert!(!incumbent.try_update(4, &[0, 0, 4]));
        assert_eq!(incumbent.copies(), &[1, 2, 0]);
        assert!(incumbent.try_update(5, &[0, 1]));
        assert_eq!(incumbent.into_copies(), vec![0, 1, 0]);
    }
}
