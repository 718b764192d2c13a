//! The die-rolling seam — the engine's only I/O-like dependency.
//!
//! Hosts that own their own dice service implement [`DieRoller`] over it;
//! failures from the roller propagate to the engine's caller unchanged.

use std::collections::VecDeque;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform die results.
pub trait DieRoller {
    /// Draw one uniform integer in `[1, sides]`.
    fn roll(&mut self, sides: u16) -> Result<u16, RollError>;
}

/// Errors a roller can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollError {
    /// A scripted roller ran out of results.
    Exhausted,
    /// A roller produced a value outside `[1, sides]`.
    OutOfRange { value: u16, sides: u16 },
}

impl fmt::Display for RollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollError::Exhausted => write!(f, "roll sequence exhausted"),
            RollError::OutOfRange { value, sides } => {
                write!(f, "roll {} outside 1..={}", value, sides)
            }
        }
    }
}

impl std::error::Error for RollError {}

/// `rand`-backed roller.
pub struct RandRoller {
    rng: StdRng,
}

impl RandRoller {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible roller for replays and headless runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandRoller {
    fn default() -> Self {
        Self::new()
    }
}

impl DieRoller for RandRoller {
    fn roll(&mut self, sides: u16) -> Result<u16, RollError> {
        Ok(self.rng.gen_range(1..=sides))
    }
}

/// Replays a fixed script of results, in order.
///
/// Errors with [`RollError::Exhausted`] once the script runs dry, and
/// rejects scripted values that don't fit the requested die.
#[derive(Debug, Clone, Default)]
pub struct SequenceRoller {
    results: VecDeque<u16>,
}

impl SequenceRoller {
    pub fn new(results: impl IntoIterator<Item = u16>) -> Self {
        Self {
            results: results.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.results.len()
    }
}

impl DieRoller for SequenceRoller {
    fn roll(&mut self, sides: u16) -> Result<u16, RollError> {
        let value = self.results.pop_front().ok_or(RollError::Exhausted)?;
        if value == 0 || value > sides {
            return Err(RollError::OutOfRange { value, sides });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rand_roller_stays_in_range() {
        let mut roller = RandRoller::seeded(7);
        for _ in 0..200 {
            let value = roller.roll(8).unwrap();
            assert!((1..=8).contains(&value));
        }
    }

    #[test]
    fn seeded_rollers_agree() {
        let mut a = RandRoller::seeded(42);
        let mut b = RandRoller::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.roll(12).unwrap(), b.roll(12).unwrap());
        }
    }

    #[test]
    fn sequence_replays_in_order() {
        let mut roller = SequenceRoller::new([3, 1, 8]);
        assert_eq!(roller.roll(8).unwrap(), 3);
        assert_eq!(roller.roll(8).unwrap(), 1);
        assert_eq!(roller.roll(8).unwrap(), 8);
        assert_eq!(roller.roll(8), Err(RollError::Exhausted));
    }

    #[test]
    fn sequence_rejects_misfit_values() {
        let mut roller = SequenceRoller::new([9]);
        assert_eq!(
            roller.roll(8),
            Err(RollError::OutOfRange { value: 9, sides: 8 })
        );
    }
}
