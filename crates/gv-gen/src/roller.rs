//! The roller: the engine's sole source of randomness.
//!
//! Every roll flows through [`Roller`], which appends one [`RollLogEntry`]
//! per invocation. Hosts that need to replay a known sequence (tests,
//! transcript verification) inject a [`ScriptedSource`] instead of the
//! seeded default.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GeneratorConfig;
use crate::error::{GenError, GenResult};
use crate::formula::DiceFormula;
use crate::log::{RollBreakdown, RollLog, RollLogEntry};

/// A source of individual die faces.
pub trait DieSource {
    /// Produce one face of a die with the given number of sides (1..=sides).
    fn face(&mut self, sides: u32) -> u32;
}

/// The default source: a seeded pseudo-random stream.
#[derive(Debug)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    /// Create a source seeded for reproducible rolls.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DieSource for SeededSource {
    fn face(&mut self, sides: u32) -> u32 {
        self.rng.random_range(1..=sides)
    }
}

/// A source that replays a fixed sequence of faces.
///
/// Faces are consumed in order regardless of the die being rolled; once the
/// script is exhausted every die shows 1. Intended for deterministic tests
/// and transcript replay.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    faces: std::collections::VecDeque<u32>,
}

impl ScriptedSource {
    /// Create a source from a face sequence.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
        }
    }

    /// How many scripted faces remain.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DieSource for ScriptedSource {
    fn face(&mut self, _sides: u32) -> u32 {
        self.faces.pop_front().unwrap_or(1)
    }
}

/// Rolls dice and records every invocation in a [`RollLog`].
#[derive(Debug)]
pub struct Roller<S = SeededSource> {
    source: S,
    log: RollLog,
    max_rerolls: u32,
}

impl Roller<SeededSource> {
    /// Create a roller seeded from the configuration.
    pub fn new(config: &GeneratorConfig) -> Self {
        Self::with_source(config, SeededSource::new(config.seed))
    }
}

impl<S: DieSource> Roller<S> {
    /// Create a roller with an explicit die source.
    pub fn with_source(config: &GeneratorConfig, source: S) -> Self {
        Self {
            source,
            log: RollLog::new(),
            max_rerolls: config.max_rerolls,
        }
    }

    /// Roll a formula with a runtime modifier, logging the result.
    pub fn roll(
        &mut self,
        name: &str,
        description: &str,
        formula: &str,
        modifier: i32,
    ) -> GenResult<i32> {
        let parsed = DiceFormula::parse(formula)?;
        let (faces, total) = self.throw(parsed, modifier);
        self.log_roll(name, description, parsed, modifier, faces, total);
        Ok(total)
    }

    /// Roll a formula, rerolling until the total differs from `forbidden`.
    ///
    /// Refuses immediately if the formula cannot produce any other value,
    /// and gives up with [`GenError::RerollDeadlock`] after the configured
    /// ceiling. Only the accepted roll is logged.
    pub fn roll_excluding(
        &mut self,
        name: &str,
        description: &str,
        formula: &str,
        modifier: i32,
        forbidden: i32,
    ) -> GenResult<i32> {
        let parsed = DiceFormula::parse(formula)?;
        if !parsed.can_produce_other(modifier, forbidden) {
            return Err(GenError::RerollDeadlock {
                formula: formula.to_string(),
                forbidden,
                attempts: 0,
            });
        }
        for _ in 0..self.max_rerolls {
            let (faces, total) = self.throw(parsed, modifier);
            if total != forbidden {
                self.log_roll(name, description, parsed, modifier, faces, total);
                return Ok(total);
            }
        }
        Err(GenError::RerollDeadlock {
            formula: formula.to_string(),
            forbidden,
            attempts: self.max_rerolls,
        })
    }

    /// Record a step that consumed no randomness.
    pub fn note(&mut self, name: &str, description: &str) {
        self.log.append(RollLogEntry {
            name: name.to_string(),
            description: description.to_string(),
            roll: None,
            timestamp: Utc::now(),
        });
    }

    /// The transcript accumulated so far. Preserved across failures.
    pub fn log(&self) -> &RollLog {
        &self.log
    }

    /// Consume the roller, keeping only its transcript.
    pub fn into_log(self) -> RollLog {
        self.log
    }

    fn throw(&mut self, formula: DiceFormula, modifier: i32) -> (Vec<u32>, i32) {
        let faces: Vec<u32> = (0..formula.count)
            .map(|_| self.source.face(formula.sides))
            .collect();
        let total = faces.iter().sum::<u32>() as i32 + formula.modifier + modifier;
        (faces, total)
    }

    fn log_roll(
        &mut self,
        name: &str,
        description: &str,
        formula: DiceFormula,
        modifier: i32,
        faces: Vec<u32>,
        total: i32,
    ) {
        let merged = DiceFormula {
            modifier: formula.modifier + modifier,
            ..formula
        };
        self.log.append(RollLogEntry {
            name: name.to_string(),
            description: description.to_string(),
            roll: Some(RollBreakdown {
                formula: merged.to_string(),
                raw_results: faces,
                total,
            }),
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roller() -> Roller<SeededSource> {
        Roller::new(&GeneratorConfig::default())
    }

    #[test]
    fn roll_is_in_range_and_logged() {
        let mut r = roller();
        for _ in 0..50 {
            let total = r.roll("Test", "", "3d6", 0).unwrap();
            assert!((3..=18).contains(&total));
        }
        assert_eq!(r.log().len(), 50);
    }

    #[test]
    fn roll_applies_modifier() {
        let mut r = roller();
        let total = r.roll("Test", "", "1d1", 4).unwrap();
        assert_eq!(total, 5);
        let breakdown = r.log().entries()[0].roll.as_ref().unwrap();
        assert_eq!(breakdown.formula, "1d1+4");
        assert_eq!(breakdown.raw_results, vec![1]);
    }

    #[test]
    fn same_seed_same_sequence() {
        let config = GeneratorConfig::default().with_seed(99);
        let mut a = Roller::new(&config);
        let mut b = Roller::new(&config);
        for _ in 0..10 {
            assert_eq!(
                a.roll("Test", "", "1d20", 0).unwrap(),
                b.roll("Test", "", "1d20", 0).unwrap()
            );
        }
    }

    #[test]
    fn scripted_source_replays_faces() {
        let source = ScriptedSource::new([4, 3, 3]);
        let mut r = Roller::with_source(&GeneratorConfig::default(), source);
        assert_eq!(r.roll("Test", "", "3d6", 2).unwrap(), 12);
    }

    #[test]
    fn scripted_source_exhausts_to_ones() {
        let source = ScriptedSource::new([6]);
        let mut r = Roller::with_source(&GeneratorConfig::default(), source);
        assert_eq!(r.roll("Test", "", "1d6", 0).unwrap(), 6);
        assert_eq!(r.roll("Test", "", "2d6", 0).unwrap(), 2);
    }

    #[test]
    fn roll_excluding_avoids_value() {
        let mut r = roller();
        for _ in 0..50 {
            let total = r.roll_excluding("Test", "", "1d6", 0, 4).unwrap();
            assert_ne!(total, 4);
        }
    }

    #[test]
    fn roll_excluding_logs_only_accepted_roll() {
        let source = ScriptedSource::new([4, 4, 2]);
        let mut r = Roller::with_source(&GeneratorConfig::default(), source);
        let total = r.roll_excluding("Test", "", "1d6", 0, 4).unwrap();
        assert_eq!(total, 2);
        assert_eq!(r.log().len(), 1);
    }

    #[test]
    fn roll_excluding_refuses_unreachable_exclusion() {
        let mut r = roller();
        let err = r.roll_excluding("Test", "", "1d1", 0, 1).unwrap_err();
        assert!(matches!(
            err,
            GenError::RerollDeadlock { attempts: 0, .. }
        ));
    }

    #[test]
    fn roll_excluding_gives_up_after_ceiling() {
        // Script always lands on the forbidden value; exhaustion then
        // produces 1, which is also forbidden here via the modifier.
        let config = GeneratorConfig::default().with_max_rerolls(3);
        let source = ScriptedSource::new([1, 1, 1]);
        let mut r = Roller::with_source(&config, source);
        let err = r.roll_excluding("Test", "", "1d6", 0, 1).unwrap_err();
        assert!(matches!(
            err,
            GenError::RerollDeadlock {
                forbidden: 1,
                attempts: 3,
                ..
            }
        ));
        // failed rerolls leave no log entries
        assert!(r.log().is_empty());
    }

    #[test]
    fn malformed_formula_is_fatal() {
        let mut r = roller();
        assert!(matches!(
            r.roll("Test", "", "banana", 0),
            Err(GenError::MalformedFormula(_))
        ));
    }

    #[test]
    fn note_logs_without_roll() {
        let mut r = roller();
        r.note("Class", "Grave Robber (chosen)");
        let entry = &r.log().entries()[0];
        assert!(entry.roll.is_none());
        assert_eq!(entry.description, "Grave Robber (chosen)");
    }
}
