use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum AttemptsError {
    #[error("attempts must be a non-negative multiple of 0.5, got {0}")]
    NotHalfStep(f64),
}

/// Remaining attempts, counted in half steps so 0.5 penalties stay exact.
///
/// Subtraction saturates at zero; there is no negative balance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Attempts {
    halves: u32,
}

impl Attempts {
    pub const ZERO: Self = Self { halves: 0 };
    pub const HALF: Self = Self { halves: 1 };
    pub const ONE: Self = Self { halves: 2 };

    #[must_use]
    pub const fn whole(count: u32) -> Self {
        Self {
            halves: count.saturating_mul(2),
        }
    }

    #[must_use]
    pub const fn from_halves(halves: u32) -> Self {
        Self { halves }
    }

    #[must_use]
    pub fn halves(self) -> u32 {
        self.halves
    }

    #[must_use]
    pub fn is_exhausted(self) -> bool {
        self.halves == 0
    }

    #[must_use]
    pub fn saturating_sub(self, penalty: Self) -> Self {
        Self {
            halves: self.halves.saturating_sub(penalty.halves),
        }
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.halves) / 2.0
    }
}

impl fmt::Debug for Attempts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Attempts({self})")
    }
}

impl fmt::Display for Attempts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.halves / 2;
        if self.halves % 2 == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.5")
        }
    }
}

impl TryFrom<f64> for Attempts {
    type Error = AttemptsError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let doubled = value * 2.0;
        if !doubled.is_finite() || doubled < 0.0 || doubled.fract() != 0.0 || doubled > f64::from(u32::MAX) {
            return Err(AttemptsError::NotHalfStep(value));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let halves = doubled as u32;
        Ok(Self { halves })
    }
}

impl From<Attempts> for f64 {
    fn from(attempts: Attempts) -> Self {
        attempts.as_f64()
    }
}
