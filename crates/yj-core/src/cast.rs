//! Three-coin casting.
//!
//! Each line is three fair coin tosses, so the sums 6, 7, 8 and 9 come up
//! with probabilities 1/8, 3/8, 3/8 and 1/8. A full casting is six lines,
//! tossed bottom to top.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::detail::POSITION_NAMES;
use crate::line::{Coin, LineResult, LineValue};
use crate::pattern::Pattern;

/// Toss three coins and classify the resulting line.
pub fn toss_line<R: Rng + ?Sized>(rng: &mut R) -> LineResult {
    let coins = std::array::from_fn(|_| {
        if rng.random_bool(0.5) {
            Coin::Head
        } else {
            Coin::Tail
        }
    });
    LineResult::from_coins(coins)
}

/// Cast a full hexagram: six lines, bottom line first.
pub fn cast<R: Rng + ?Sized>(rng: &mut R) -> Casting {
    Casting {
        lines: std::array::from_fn(|_| toss_line(&mut *rng)),
    }
}

/// Six cast lines, bottom line first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Casting {
    lines: [LineResult; 6],
}

impl Casting {
    /// Wrap six already-cast lines.
    pub fn from_lines(lines: [LineResult; 6]) -> Self {
        Self { lines }
    }

    /// Build a casting from six line values, using canonical coins.
    pub fn from_values(values: [LineValue; 6]) -> Self {
        Self {
            lines: values.map(LineResult::from_value),
        }
    }

    /// The six lines, bottom first.
    pub fn lines(&self) -> &[LineResult; 6] {
        &self.lines
    }

    /// Pattern of the lines as cast.
    pub fn primary_pattern(&self) -> Pattern {
        Pattern::from_polarities(self.lines.map(|l| l.is_yang()))
    }

    /// Pattern after every changing line has turned. Static lines keep
    /// their polarity.
    pub fn relating_pattern(&self) -> Pattern {
        Pattern::from_polarities(self.lines.map(|l| l.changed_to_yang()))
    }

    /// Whether any line is changing.
    pub fn has_changing_lines(&self) -> bool {
        self.lines.iter().any(|l| l.is_changing())
    }

    /// Positions (0 = bottom) of the changing lines.
    pub fn changing_positions(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_changing())
            .map(|(i, _)| i)
            .collect()
    }

    /// The six sums concatenated bottom first, e.g. `"789786"`.
    pub fn sum_signature(&self) -> String {
        self.lines.iter().map(|l| l.sum().to_string()).collect()
    }

    /// Describe the changing lines, e.g. `初爻动 (老阳)，上爻动 (老阴)`.
    ///
    /// Empty when no line is changing.
    pub fn moving_lines_description(&self) -> String {
        self.changing_positions()
            .into_iter()
            .map(|i| format!("{}爻动 ({})", POSITION_NAMES[i], self.lines[i].value()))
            .collect::<Vec<_>>()
            .join("，")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use LineValue::{OldYang, OldYin, YoungYang, YoungYin};

    #[test]
    fn toss_is_deterministic_for_a_seed() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        assert_eq!(cast(&mut rng1), cast(&mut rng2));
    }

    #[test]
    fn sum_distribution_matches_three_coins() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = 80_000;
        let mut counts = [0u32; 4];
        for _ in 0..samples {
            let line = toss_line(&mut rng);
            counts[usize::from(line.sum() - 6)] += 1;
        }
        let expected = [1.0 / 8.0, 3.0 / 8.0, 3.0 / 8.0, 1.0 / 8.0];
        for (i, (count, p)) in counts.iter().zip(expected).enumerate() {
            let observed = f64::from(*count) / f64::from(samples);
            assert!(
                (observed - p).abs() < 0.01,
                "sum {}: observed {observed:.4}, expected {p:.4}",
                i + 6
            );
        }
    }

    #[test]
    fn signature_and_patterns() {
        let c = Casting::from_values([YoungYang, YoungYin, OldYang, YoungYang, YoungYin, OldYin]);
        assert_eq!(c.sum_signature(), "789786");
        assert_eq!(c.primary_pattern().to_string(), "100100");
        assert_eq!(c.relating_pattern().to_string(), "101101");
        assert_eq!(c.changing_positions(), vec![2, 5]);
    }

    #[test]
    fn moving_lines_description() {
        let c = Casting::from_values([OldYang, YoungYin, YoungYin, YoungYang, YoungYin, OldYin]);
        assert_eq!(c.moving_lines_description(), "初爻动 (老阳)，上爻动 (老阴)");

        let still = Casting::from_values([YoungYang; 6]);
        assert!(still.moving_lines_description().is_empty());
        assert!(!still.has_changing_lines());
    }

    proptest! {
        #[test]
        fn every_toss_is_consistent(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            for line in cast(&mut rng).lines() {
                let sum = line.sum();
                prop_assert!((6..=9).contains(&sum));
                let coin_sum: u8 = line.coins().iter().map(|c| c.value()).sum();
                prop_assert_eq!(coin_sum, sum);
                prop_assert_eq!(line.is_yang(), sum == 7 || sum == 9);
                prop_assert_eq!(line.is_changing(), sum == 6 || sum == 9);
                prop_assert_eq!(line.changed_to_yang(), sum == 6 || sum == 7);
            }
        }

        #[test]
        fn relating_differs_exactly_at_changing_lines(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let c = cast(&mut rng);
            let diff = c.primary_pattern().differing_positions(c.relating_pattern());
            prop_assert_eq!(diff, c.changing_positions());
        }
    }
}
