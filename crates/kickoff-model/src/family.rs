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

//! Card families used to colour cards in listings.

const TACTICAL: &[&str] = &[
    "Analysis",
    "Marking",
    "Pressuring",
    "Countering",
    "Mini-Game",
    "Line Control",
    "Set Plays",
];
const TECHNICAL: &[&str] = &[
    "Dribbling",
    "Place Kicks",
    "Shooting",
    "Sliding",
    "Passing",
    "Freestyling",
    "Heading",
];
const PHYSICAL: &[&str] = &[
    "Running",
    "Sprinting",
    "Weights",
    "Agility",
    "Kicking",
    "Aerobics",
    "Stretching",
];
const SUPPORT: &[&str] = &[
    "Oil Therapy",
    "Meditation",
    "Signing",
    "PK Practice",
    "Judo",
    "Visualising",
    "Meeting",
    "Spa",
    "Mini-Camp",
    "Gaming",
    "Karaoke",
];

/// The family a training card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceFamily {
    Tactical,
    Technical,
    Physical,
    Support,
    Uncategorized,
}

/// Background and text colours of a family, as hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyColors {
    pub background: &'static str,
    pub text: &'static str,
}

impl ResourceFamily {
    /// Classifies a card by its trimmed name.
    pub fn classify(card: &str) -> Self {
        let name = card.trim();
        if TACTICAL.contains(&name) {
            ResourceFamily::Tactical
        } else if TECHNICAL.contains(&name) {
            ResourceFamily::Technical
        } else if PHYSICAL.contains(&name) {
            ResourceFamily::Physical
        } else if SUPPORT.contains(&name) {
            ResourceFamily::Support
        } else {
            ResourceFamily::Uncategorized
        }
    }

    pub fn colors(&self) -> FamilyColors {
        match self {
            ResourceFamily::Tactical => FamilyColors {
                background: "#c9f5c4",
                text: "#2f5b2f",
            },
            ResourceFamily::Technical => FamilyColors {
                background: "#ffcaca",
                text: "#661a1a",
            },
            ResourceFamily::Physical => FamilyColors {
                background: "#cae1ff",
                text: "#1a3b66",
            },
            ResourceFamily::Support => FamilyColors {
                background: "#fff5c2",
                text: "#665c1a",
            },
            ResourceFamily::Uncategorized => FamilyColors {
                background: "#eaeaea",
                text: "#333",
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceFamily::Tactical => "tactical",
            ResourceFamily::Technical => "technical",
            ResourceFamily::Physical => "physical",
            ResourceFamily::Support => "support",
            ResourceFamily::Uncategorized => "other",
        }
    }
}

impl std::fmt::Display for ResourceFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_cards() {
        assert_eq!(ResourceFamily::classify("Marking"), ResourceFamily::Tactical);
        assert_eq!(ResourceFamily::classify(" Heading "), ResourceFamily::Technical);
        assert_eq!(ResourceFamily::classify("Aerobics"), ResourceFamily::Physical);
        assert_eq!(ResourceFamily::classify("Karaoke"), ResourceFamily::Support);
        assert_eq!(
            ResourceFamily::classify("Chess"),
            ResourceFamily::Uncategorized
        );
    }

    #[test]
    fn test_colors_and_labels() {
        assert_eq!(ResourceFamily::Physical.colors().background, "#cae1ff");
        assert_eq!(ResourceFamily::Uncategorized.colors().text, "#333");
        assert_eq!(ResourceFamily::Support.to_string(), "support");
    }
}
