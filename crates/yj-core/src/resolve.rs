//! Resolution of a casting into its primary and relating hexagrams.

use serde::Serialize;

use crate::cast::Casting;
use crate::table::{Hexagram, lookup_pattern};

/// The hexagrams read from a casting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The hexagram as cast.
    pub primary: Hexagram,
    /// The hexagram after all changes, present only when a line changes.
    pub relating: Option<Hexagram>,
}

impl Resolution {
    /// King Wen number of the relating hexagram, or 0 when there is none.
    pub fn relating_number(&self) -> u8 {
        self.relating.map_or(0, |h| h.number)
    }
}

/// Resolve a casting against the hexagram table.
///
/// The relating hexagram is absent (not merely equal to the primary) when
/// no line is changing.
pub fn resolve(casting: &Casting) -> Resolution {
    let primary = lookup_pattern(casting.primary_pattern());
    let relating = casting
        .has_changing_lines()
        .then(|| lookup_pattern(casting.relating_pattern()));
    Resolution { primary, relating }
}
