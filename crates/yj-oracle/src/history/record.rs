//! A finished divination kept in the history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use yj_core::{Casting, Hexagram, by_number};

use crate::interpretation::Interpretation;

/// One divination: question, lines, hexagrams, and the reading received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivinationRecord {
    /// Unique record id.
    pub id: Uuid,
    /// When the lines were cast.
    pub date: DateTime<Utc>,
    /// The question asked.
    pub question: String,
    /// The six cast lines.
    pub casting: Casting,
    /// King Wen number of the primary hexagram.
    pub primary: u8,
    /// King Wen number of the relating hexagram, if any line changed.
    pub relating: Option<u8>,
    /// The interpretation, if it was awaited.
    pub interpretation: Option<Interpretation>,
}

impl DivinationRecord {
    /// The primary hexagram's table row.
    pub fn primary_hexagram(&self) -> Hexagram {
        by_number(u32::from(self.primary)).unwrap_or(Hexagram::UNKNOWN)
    }

    /// The relating hexagram's table row.
    pub fn relating_hexagram(&self) -> Option<Hexagram> {
        self.relating
            .map(|n| by_number(u32::from(n)).unwrap_or(Hexagram::UNKNOWN))
    }

    /// One-line summary, e.g. `#51 震 → #30 离`.
    pub fn summary(&self) -> String {
        match self.relating_hexagram() {
            Some(relating) => format!("{} → {}", self.primary_hexagram(), relating),
            None => self.primary_hexagram().to_string(),
        }
    }
}
