//! Six-line polarity patterns.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A six-line pattern of Yin (0) and Yang (1) lines.
///
/// Bit `i` holds line `i`, where line 0 is the bottom line. The string form
/// follows the same order: the first character is the bottom line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pattern(u8);

impl Pattern {
    /// Number of lines in a hexagram.
    pub const LINES: usize = 6;

    /// Build a pattern from exactly six polarities, bottom line first.
    pub fn from_polarities(yang: [bool; 6]) -> Self {
        let bits = yang
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &is_yang)| acc | (u8::from(is_yang) << i));
        Self(bits)
    }

    /// Raw bits, bottom line in bit 0.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether the line at `position` (0 = bottom) is Yang. Positions past
    /// the top read as Yin.
    pub fn is_yang(self, position: usize) -> bool {
        position < Self::LINES && self.0 & (1 << position) != 0
    }

    /// Line polarities, bottom line first.
    pub fn polarities(self) -> [bool; 6] {
        std::array::from_fn(|i| self.is_yang(i))
    }

    /// Positions (0 = bottom) where the two patterns disagree.
    pub fn differing_positions(self, other: Self) -> Vec<usize> {
        let diff = self.0 ^ other.0;
        (0..Self::LINES).filter(|i| diff & (1 << i) != 0).collect()
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for yang in self.polarities() {
            f.write_str(if yang { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != Self::LINES {
            return Err(CoreError::InvalidPattern(s.to_string()));
        }
        let mut yang = [false; 6];
        for (slot, byte) in yang.iter_mut().zip(bytes) {
            *slot = match byte {
                b'1' => true,
                b'0' => false,
                _ => return Err(CoreError::InvalidPattern(s.to_string())),
            };
        }
        Ok(Self::from_polarities(yang))
    }
}
