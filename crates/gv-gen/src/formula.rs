//! Dice formula parsing.
//!
//! Formulas use the canonical `NdM` notation: N dice of M sides, summed.
//! A trailing `+K` or `-K` constant is accepted; runtime modifiers (ability
//! scores, class bonuses) are passed separately to the roller.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

/// A parsed dice formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceFormula {
    /// Number of dice rolled and summed.
    pub count: u32,
    /// Sides per die.
    pub sides: u32,
    /// Constant added to the sum.
    pub modifier: i32,
}

impl DiceFormula {
    /// Parse a formula like `3d6`, `d20`, or `2d4+1`.
    pub fn parse(input: &str) -> GenResult<Self> {
        let compact: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        let malformed = || GenError::MalformedFormula(input.to_string());

        let d = compact.find('d').ok_or_else(malformed)?;
        let count_part = &compact[..d];
        let count: u32 = if count_part.is_empty() {
            1
        } else {
            count_part.parse().map_err(|_| malformed())?
        };

        let rest = &compact[d + 1..];
        let (sides_part, modifier) = match rest.find(['+', '-']) {
            Some(at) => {
                let modifier: i32 = rest[at..].parse().map_err(|_| malformed())?;
                (&rest[..at], modifier)
            }
            None => (rest, 0),
        };
        let sides: u32 = sides_part.parse().map_err(|_| malformed())?;

        if count == 0 || sides == 0 {
            return Err(malformed());
        }

        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Smallest total this formula can produce.
    pub fn min(&self) -> i32 {
        self.count as i32 + self.modifier
    }

    /// Largest total this formula can produce.
    pub fn max(&self) -> i32 {
        (self.count * self.sides) as i32 + self.modifier
    }

    /// Whether the formula, with an extra modifier applied, can produce any
    /// total other than `forbidden`. Used to refuse excluded-value rerolls
    /// that could never terminate.
    pub fn can_produce_other(&self, extra_modifier: i32, forbidden: i32) -> bool {
        self.min() + extra_modifier != forbidden || self.max() + extra_modifier != forbidden
    }
}

impl FromStr for DiceFormula {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parse_simple() {
        let f = DiceFormula::parse("3d6").unwrap();
        assert_eq!(f.count, 3);
        assert_eq!(f.sides, 6);
        assert_eq!(f.modifier, 0);
    }

    #[test]
    fn parse_implicit_count() {
        let f = DiceFormula::parse("d20").unwrap();
        assert_eq!(f.count, 1);
        assert_eq!(f.sides, 20);
    }

    #[test]
    fn parse_with_constant() {
        assert_eq!(DiceFormula::parse("2d4+1").unwrap().modifier, 1);
        assert_eq!(DiceFormula::parse("1d8-2").unwrap().modifier, -2);
    }

    #[test]
    fn parse_tolerates_spacing_and_case() {
        let f = DiceFormula::parse(" 2 D 6 + 3 ").unwrap();
        assert_eq!((f.count, f.sides, f.modifier), (2, 6, 3));
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "d", "3d", "0d6", "3d0", "six dice", "3x6", "1d6+", "1d6+x"] {
            assert!(
                matches!(DiceFormula::parse(bad), Err(GenError::MalformedFormula(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn bounds() {
        let f = DiceFormula::parse("3d6+2").unwrap();
        assert_eq!(f.min(), 5);
        assert_eq!(f.max(), 20);
    }

    #[test]
    fn can_produce_other_detects_degenerate_range() {
        // 1d1 always rolls 1: excluding 1 can never settle
        let f = DiceFormula::parse("1d1").unwrap();
        assert!(!f.can_produce_other(0, 1));
        assert!(f.can_produce_other(0, 2));
        // 2d1 with a +3 runtime modifier always totals 5
        let f = DiceFormula::parse("2d1").unwrap();
        assert!(!f.can_produce_other(3, 5));

        let f = DiceFormula::parse("1d6").unwrap();
        assert!(f.can_produce_other(0, 4));
    }

    #[test]
    fn display_round_trip() {
        for text in ["3d6", "1d20", "2d4+1", "1d8-2"] {
            assert_eq!(DiceFormula::parse(text).unwrap().to_string(), text);
        }
    }

    proptest! {
        #[test]
        fn parse_display_round_trips(count in 1u32..100, sides in 1u32..1000, modifier in -50i32..50) {
            let f = DiceFormula { count, sides, modifier };
            let reparsed = DiceFormula::parse(&f.to_string()).unwrap();
            prop_assert_eq!(f, reparsed);
        }

        #[test]
        fn min_never_exceeds_max(count in 1u32..100, sides in 1u32..1000, modifier in -50i32..50) {
            let f = DiceFormula { count, sides, modifier };
            prop_assert!(f.min() <= f.max());
        }
    }
}
