//! Consciousness level: the catalog's cosmetic [75, 99] display value.
//!
//! Construction clamps, so the invariant holds by type rather than by
//! every caller remembering the range. Jitter deltas are sampled at the
//! API edge (this crate has no RNG); applying one re-clamps.

use serde::{Deserialize, Serialize};

/// A product's consciousness level, always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsciousnessLevel(u8);

impl ConsciousnessLevel {
    /// Lowest displayed level.
    pub const MIN: u8 = 75;
    /// Highest displayed level.
    pub const MAX: u8 = 99;

    /// Create a level, clamping into the valid range.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value < Self::MIN {
            Self(Self::MIN)
        } else if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    /// The raw value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Apply a display jitter delta, clamping back into range.
    ///
    /// The listing endpoint nudges each level by a value in `-2..=3`
    /// per response; the delta itself comes from the caller.
    #[must_use]
    pub fn jittered(self, delta: i8) -> Self {
        let shifted = i16::from(self.0) + i16::from(delta);
        let clamped = shifted.clamp(i16::from(Self::MIN), i16::from(Self::MAX));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(clamped as u8)
    }
}

impl Default for ConsciousnessLevel {
    fn default() -> Self {
        // Matches the backend's default for newly created products.
        Self(85)
    }
}

impl std::fmt::Display for ConsciousnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_both_ends() {
        assert_eq!(ConsciousnessLevel::new(10).get(), 75);
        assert_eq!(ConsciousnessLevel::new(120).get(), 99);
        assert_eq!(ConsciousnessLevel::new(88).get(), 88);
    }

    #[test]
    fn jitter_stays_in_range() {
        let low = ConsciousnessLevel::new(75);
        assert_eq!(low.jittered(-2).get(), 75);

        let high = ConsciousnessLevel::new(99);
        assert_eq!(high.jittered(3).get(), 99);

        let mid = ConsciousnessLevel::new(90);
        assert_eq!(mid.jittered(3).get(), 93);
        assert_eq!(mid.jittered(-2).get(), 88);
    }
}
