//! Segment classification from score pairs
//!
//! The (recency_score, frequency_score) pair is matched against an ordered
//! rule list; the first matching rule wins. The rules are not mutually
//! exclusive by construction, so their order is part of the contract: "44"
//! must resolve to loyal_customers even though later rules would also accept
//! a 4 in the first position.

use crate::scoring::ScoredCustomer;
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

/// Named marketing segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Hibernating,
    AtRisk,
    CantLoose,
    AboutToSleep,
    NeedAttention,
    LoyalCustomers,
    Promising,
    NewCustomers,
    PotentialLoyalists,
    Champions,
    /// Sentinel for a score key no rule covers
    Unclassified,
}

impl Segment {
    /// All segments in rule-table order, with the sentinel last.
    pub const ALL: [Segment; 11] = [
        Segment::Hibernating,
        Segment::AtRisk,
        Segment::CantLoose,
        Segment::AboutToSleep,
        Segment::NeedAttention,
        Segment::LoyalCustomers,
        Segment::Promising,
        Segment::NewCustomers,
        Segment::PotentialLoyalists,
        Segment::Champions,
        Segment::Unclassified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Hibernating => "hibernating",
            Segment::AtRisk => "at_risk",
            Segment::CantLoose => "cant_loose",
            Segment::AboutToSleep => "about_to_sleep",
            Segment::NeedAttention => "need_attention",
            Segment::LoyalCustomers => "loyal_customers",
            Segment::Promising => "promising",
            Segment::NewCustomers => "new_customers",
            Segment::PotentialLoyalists => "potential_loyalists",
            Segment::Champions => "champions",
            Segment::Unclassified => "unclassified",
        }
    }

    /// Parse a segment from its canonical name, e.g. for CLI selection.
    pub fn from_name(name: &str) -> Option<Segment> {
        Segment::ALL.iter().copied().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classification rule: inclusive digit ranges for both scores.
struct SegmentRule {
    recency: RangeInclusive<u8>,
    frequency: RangeInclusive<u8>,
    segment: Segment,
}

/// Ordered rule table. First match wins; do not reorder.
const SEGMENT_RULES: [SegmentRule; 10] = [
    SegmentRule { recency: 1..=2, frequency: 1..=2, segment: Segment::Hibernating },
    SegmentRule { recency: 1..=2, frequency: 3..=4, segment: Segment::AtRisk },
    SegmentRule { recency: 1..=2, frequency: 5..=5, segment: Segment::CantLoose },
    SegmentRule { recency: 3..=3, frequency: 1..=2, segment: Segment::AboutToSleep },
    SegmentRule { recency: 3..=3, frequency: 3..=3, segment: Segment::NeedAttention },
    SegmentRule { recency: 3..=4, frequency: 4..=5, segment: Segment::LoyalCustomers },
    SegmentRule { recency: 4..=4, frequency: 1..=1, segment: Segment::Promising },
    SegmentRule { recency: 5..=5, frequency: 1..=1, segment: Segment::NewCustomers },
    SegmentRule { recency: 4..=5, frequency: 2..=3, segment: Segment::PotentialLoyalists },
    SegmentRule { recency: 5..=5, frequency: 4..=5, segment: Segment::Champions },
];

/// A scored customer with its assigned segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedCustomer {
    pub scored: ScoredCustomer,
    pub segment: Segment,
}

/// Map a (recency_score, frequency_score) pair to its segment.
pub fn classify(recency_score: u8, frequency_score: u8) -> Segment {
    SEGMENT_RULES
        .iter()
        .find(|rule| {
            rule.recency.contains(&recency_score) && rule.frequency.contains(&frequency_score)
        })
        .map(|rule| rule.segment)
        .unwrap_or(Segment::Unclassified)
}

/// Attach a segment to every scored customer.
pub fn classify_customers(scored: Vec<ScoredCustomer>) -> Vec<SegmentedCustomer> {
    scored
        .into_iter()
        .map(|scored| {
            let segment = classify(scored.recency_score, scored.frequency_score);
            SegmentedCustomer { scored, segment }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_winners() {
        assert_eq!(classify(4, 4), Segment::LoyalCustomers);
        assert_eq!(classify(5, 5), Segment::Champions);
        assert_eq!(classify(1, 1), Segment::Hibernating);
        assert_eq!(classify(5, 1), Segment::NewCustomers);
        assert_eq!(classify(4, 1), Segment::Promising);
    }

    #[test]
    fn test_rule_order_beats_later_rules() {
        // loyal_customers is checked before champions and potential_loyalists,
        // so a 4 in the recency slot never falls through to them
        assert_eq!(classify(4, 5), Segment::LoyalCustomers);
        assert_eq!(classify(3, 4), Segment::LoyalCustomers);
        assert_eq!(classify(5, 4), Segment::Champions);
    }

    #[test]
    fn test_classification_is_total_over_all_keys() {
        for recency in 1..=5u8 {
            for frequency in 1..=5u8 {
                let segment = classify(recency, frequency);
                assert_ne!(
                    segment,
                    Segment::Unclassified,
                    "key {}{} fell through the rule table",
                    recency,
                    frequency
                );
            }
        }
    }

    #[test]
    fn test_out_of_range_key_is_unclassified() {
        assert_eq!(classify(0, 3), Segment::Unclassified);
        assert_eq!(classify(6, 6), Segment::Unclassified);
    }

    #[test]
    fn test_segment_names_round_trip() {
        for segment in Segment::ALL {
            assert_eq!(Segment::from_name(segment.as_str()), Some(segment));
        }
        assert_eq!(Segment::from_name("at_Risk"), None);
        assert_eq!(Segment::from_name("whales"), None);
    }
}
