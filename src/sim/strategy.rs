//! Strategy modifier table
//!
//! A strategy is a manager-selected bias applied to outcome probabilities.
//! `Balanced` is the neutral baseline: unmanaged play must be statistically
//! unbiased, so every `Balanced` modifier is exactly 1.0.

use serde::{Deserialize, Serialize};

/// Manager strategy for a team (or a single pinch hitter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Strategy {
    #[default]
    Balanced,
    Aggressive,
    Patient,
    Contact,
    Power,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Balanced,
        Strategy::Aggressive,
        Strategy::Patient,
        Strategy::Contact,
        Strategy::Power,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Balanced => "balanced",
            Strategy::Aggressive => "aggressive",
            Strategy::Patient => "patient",
            Strategy::Contact => "contact",
            Strategy::Power => "power",
        }
    }
}

/// Probability dimensions a strategy can bias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Walk,
    Strikeout,
    Homerun,
    Contact,
    Steal,
    Advance,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Walk,
        Stat::Strikeout,
        Stat::Homerun,
        Stat::Contact,
        Stat::Steal,
        Stat::Advance,
    ];
}

/// Probability multiplier for a (strategy, stat) pair.
///
/// Always finite and positive; pairs with no special-cased behavior are 1.0.
pub fn modifier(strategy: Strategy, stat: Stat) -> f64 {
    // Variants stay fully qualified: both enums carry a `Contact`.
    match (strategy, stat) {
        (Strategy::Balanced, _) => 1.0,

        (Strategy::Aggressive, Stat::Homerun) => 1.2,
        (Strategy::Aggressive, Stat::Steal) => 1.3,
        (Strategy::Aggressive, Stat::Advance) => 1.25,
        (Strategy::Aggressive, Stat::Walk) => 0.75,

        (Strategy::Patient, Stat::Walk) => 1.4,
        (Strategy::Patient, Stat::Steal) => 0.8,
        (Strategy::Patient, Stat::Strikeout) => 0.85,

        (Strategy::Contact, Stat::Strikeout) => 0.7,
        (Strategy::Contact, Stat::Homerun) => 0.75,
        (Strategy::Contact, Stat::Contact) => 1.25,

        (Strategy::Power, Stat::Homerun) => 1.6,
        (Strategy::Power, Stat::Contact) => 0.8,

        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_is_neutral() {
        for stat in Stat::ALL {
            assert_eq!(modifier(Strategy::Balanced, stat), 1.0);
        }
    }

    #[test]
    fn test_reference_fixtures() {
        assert_eq!(modifier(Strategy::Aggressive, Stat::Steal), 1.3);
        assert_eq!(modifier(Strategy::Patient, Stat::Walk), 1.4);
        assert_eq!(modifier(Strategy::Power, Stat::Homerun), 1.6);
        assert_eq!(modifier(Strategy::Contact, Stat::Strikeout), 0.7);
    }

    #[test]
    fn test_contact_pairs_resolve_per_table() {
        // The strategy and the stat are distinct axes even where the names
        // collide: contact hitters trade power for bat-on-ball.
        assert_eq!(modifier(Strategy::Contact, Stat::Contact), 1.25);
        assert_eq!(modifier(Strategy::Contact, Stat::Walk), 1.0);
        assert_eq!(modifier(Strategy::Power, Stat::Contact), 0.8);
        assert_eq!(modifier(Strategy::Aggressive, Stat::Contact), 1.0);
    }

    #[test]
    fn test_all_pairs_finite_positive() {
        for strategy in Strategy::ALL {
            for stat in Stat::ALL {
                let m = modifier(strategy, stat);
                assert!(m.is_finite() && m > 0.0, "{strategy:?}/{stat:?} -> {m}");
            }
        }
    }

    #[test]
    fn test_shape_matches_intent() {
        // Aggressive trades walks for power and running
        assert!(modifier(Strategy::Aggressive, Stat::Homerun) > 1.0);
        assert!(modifier(Strategy::Aggressive, Stat::Advance) > 1.0);
        assert!(modifier(Strategy::Aggressive, Stat::Walk) < 1.0);
        // Patient works the count
        assert!(modifier(Strategy::Patient, Stat::Steal) < 1.0);
        // Contact trades power for bat-on-ball
        assert!(modifier(Strategy::Contact, Stat::Homerun) < 1.0);
        assert!(modifier(Strategy::Contact, Stat::Contact) > 1.0);
        // Power trades contact for home runs
        assert!(modifier(Strategy::Power, Stat::Contact) < 1.0);
    }
}
