//! Ability keys and scores.
//!
//! The ruleset uses four abilities. Scores are small signed modifiers
//! (−3 to +3 at creation) rather than raw attribute values.

use serde::{Deserialize, Serialize};

/// The four abilities of the ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityKey {
    /// Raw physical power. Governs melee blows and feats of force.
    Strength,
    /// Speed and precision. Governs defence and ranged attacks.
    Agility,
    /// Willpower and awareness. Governs powers and perception.
    Presence,
    /// Endurance. Governs hit points and resisting harm.
    Toughness,
}

impl AbilityKey {
    /// All keys in canonical order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Strength,
            Self::Agility,
            Self::Presence,
            Self::Toughness,
        ]
    }

    /// Parse a key from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strength" | "str" => Some(Self::Strength),
            "agility" | "agi" => Some(Self::Agility),
            "presence" | "pre" => Some(Self::Presence),
            "toughness" | "tou" => Some(Self::Toughness),
            _ => None,
        }
    }
}

impl std::fmt::Display for AbilityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strength => write!(f, "strength"),
            Self::Agility => write!(f, "agility"),
            Self::Presence => write!(f, "presence"),
            Self::Toughness => write!(f, "toughness"),
        }
    }
}

/// A single ability score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScore {
    /// The score value. Creation produces −3 to +3; level-up drift may
    /// extend the range up to the configured bounds.
    pub value: i32,
}

impl AbilityScore {
    /// Create a score with the given value.
    pub fn new(value: i32) -> Self {
        Self { value }
    }
}

impl std::fmt::Display for AbilityScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value >= 0 {
            write!(f, "+{}", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// The four ability scores of a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    /// Strength score.
    pub strength: AbilityScore,
    /// Agility score.
    pub agility: AbilityScore,
    /// Presence score.
    pub presence: AbilityScore,
    /// Toughness score.
    pub toughness: AbilityScore,
}

impl Abilities {
    /// Get the score for a key.
    pub fn get(&self, key: AbilityKey) -> AbilityScore {
        match key {
            AbilityKey::Strength => self.strength,
            AbilityKey::Agility => self.agility,
            AbilityKey::Presence => self.presence,
            AbilityKey::Toughness => self.toughness,
        }
    }

    /// Get a mutable reference to the score for a key.
    pub fn get_mut(&mut self, key: AbilityKey) -> &mut AbilityScore {
        match key {
            AbilityKey::Strength => &mut self.strength,
            AbilityKey::Agility => &mut self.agility,
            AbilityKey::Presence => &mut self.presence,
            AbilityKey::Toughness => &mut self.toughness,
        }
    }

    /// Iterate over the scores in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (AbilityKey, AbilityScore)> + '_ {
        AbilityKey::all().iter().map(|&key| (key, self.get(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_parse_variants() {
        assert_eq!(AbilityKey::parse("strength"), Some(AbilityKey::Strength));
        assert_eq!(AbilityKey::parse("AGI"), Some(AbilityKey::Agility));
        assert_eq!(AbilityKey::parse(" pre "), Some(AbilityKey::Presence));
        assert_eq!(AbilityKey::parse("tou"), Some(AbilityKey::Toughness));
        assert_eq!(AbilityKey::parse("luck"), None);
    }

    #[test]
    fn key_display() {
        assert_eq!(AbilityKey::Strength.to_string(), "strength");
        assert_eq!(AbilityKey::Toughness.to_string(), "toughness");
    }

    #[test]
    fn score_display_signed() {
        assert_eq!(AbilityScore::new(2).to_string(), "+2");
        assert_eq!(AbilityScore::new(0).to_string(), "+0");
        assert_eq!(AbilityScore::new(-3).to_string(), "-3");
    }

    #[test]
    fn get_and_get_mut() {
        let mut abilities = Abilities::default();
        abilities.get_mut(AbilityKey::Presence).value = 2;
        assert_eq!(abilities.get(AbilityKey::Presence).value, 2);
        assert_eq!(abilities.presence.value, 2);
        assert_eq!(abilities.get(AbilityKey::Strength).value, 0);
    }

    #[test]
    fn iter_canonical_order() {
        let abilities = Abilities {
            strength: AbilityScore::new(1),
            agility: AbilityScore::new(2),
            presence: AbilityScore::new(3),
            toughness: AbilityScore::new(4),
        };
        let values: Vec<i32> = abilities.iter().map(|(_, s)| s.value).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }
}
