//! Per-character conditional score adjustments, kept as a declarative table
//! rather than branching logic so new special cases are additive entries.
//! Each entry names a character, an optional Support-role gate, a predicate
//! over the team's element head-counts, and a score delta.

use crate::data::character::Element;

/// Predicate over per-element head-counts within one team.
#[derive(Debug, Clone, PartialEq)]
pub enum CountPredicate {
    /// Sum of the named elements' counts is at least the threshold.
    SumAtLeast(Vec<Element>, usize),
    /// Sum of the named elements' counts is strictly below the threshold.
    SumBelow(Vec<Element>, usize),
}

impl CountPredicate {
    pub fn evaluate(&self, count_of: impl Fn(Element) -> usize) -> bool {
        match self {
            CountPredicate::SumAtLeast(elements, threshold) => {
                elements.iter().map(|e| count_of(*e)).sum::<usize>() >= *threshold
            }
            CountPredicate::SumBelow(elements, threshold) => {
                elements.iter().map(|e| count_of(*e)).sum::<usize>() < *threshold
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalAdjustment {
    /// Normalized character identifier the entry applies to.
    pub character: &'static str,
    /// When true, the entry only fires if the character holds the Support role.
    pub support_only: bool,
    pub predicate: CountPredicate,
    pub delta: i64,
}

/// The built-in adjustment table. Enabler supports are heavily penalized when
/// their enabling element's head-count is unmet; fischl (any role) is demoted
/// and kuki-shinobu (as Support) promoted in hyperbloom-leaning
/// (Hydro+Dendro) lineups.
pub fn default_adjustments() -> Vec<ConditionalAdjustment> {
    use CountPredicate::{SumAtLeast, SumBelow};
    use Element::{Anemo, Cryo, Dendro, Electro, Geo, Hydro, Pyro};

    vec![
        ConditionalAdjustment {
            character: "fischl",
            support_only: false,
            predicate: SumAtLeast(vec![Hydro, Dendro], 2),
            delta: -20,
        },
        ConditionalAdjustment {
            character: "chevreuse",
            support_only: true,
            predicate: SumBelow(vec![Pyro, Electro], 3),
            delta: -50,
        },
        ConditionalAdjustment {
            character: "kujou-sara",
            support_only: true,
            predicate: SumBelow(vec![Electro], 2),
            delta: -100,
        },
        ConditionalAdjustment {
            character: "shenhe",
            support_only: true,
            predicate: SumBelow(vec![Cryo], 2),
            delta: -100,
        },
        ConditionalAdjustment {
            character: "faruzan",
            support_only: true,
            predicate: SumBelow(vec![Anemo], 2),
            delta: -100,
        },
        ConditionalAdjustment {
            character: "gorou",
            support_only: true,
            predicate: SumBelow(vec![Geo], 2),
            delta: -100,
        },
        ConditionalAdjustment {
            character: "kuki-shinobu",
            support_only: true,
            predicate: SumAtLeast(vec![Hydro, Dendro], 2),
            delta: 100,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::{default_adjustments, CountPredicate};
    use crate::data::character::Element;

    fn counts(pairs: &[(Element, usize)]) -> impl Fn(Element) -> usize + '_ {
        move |element| pairs.iter().find(|(e, _)| *e == element).map_or(0, |(_, n)| *n)
    }

    #[test]
    fn sum_at_least_counts_across_elements() {
        let predicate = CountPredicate::SumAtLeast(vec![Element::Hydro, Element::Dendro], 2);
        assert!(predicate.evaluate(counts(&[(Element::Hydro, 1), (Element::Dendro, 1)])));
        assert!(!predicate.evaluate(counts(&[(Element::Hydro, 1)])));
    }

    #[test]
    fn sum_below_is_strict() {
        let predicate = CountPredicate::SumBelow(vec![Element::Electro], 2);
        assert!(predicate.evaluate(counts(&[(Element::Electro, 1)])));
        assert!(!predicate.evaluate(counts(&[(Element::Electro, 2)])));
    }

    #[test]
    fn table_uses_normalized_identifiers() {
        for entry in default_adjustments() {
            assert_eq!(entry.character, entry.character.to_lowercase());
            assert!(!entry.character.contains(' '));
        }
    }
}
