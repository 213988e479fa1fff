//! Coins, line values, and single-line results.
//!
//! A line is cast with three coins. Heads count 3 (Yang) and tails count 2
//! (Yin), so every line sums to 6, 7, 8 or 9. The sum alone decides the
//! line's polarity and whether it is changing.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// One side of a tossed coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coin {
    /// Yang face, counts 3.
    Head,
    /// Yin face, counts 2.
    Tail,
}

impl Coin {
    /// The numeric value this face contributes to a line sum.
    pub fn value(self) -> u8 {
        match self {
            Self::Head => 3,
            Self::Tail => 2,
        }
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Head => write!(f, "head"),
            Self::Tail => write!(f, "tail"),
        }
    }
}

/// The four classical line values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineValue {
    /// 6: Yin, changing to Yang.
    OldYin,
    /// 7: static Yang.
    YoungYang,
    /// 8: static Yin.
    YoungYin,
    /// 9: Yang, changing to Yin.
    OldYang,
}

impl LineValue {
    /// All values in ascending order of their sums.
    pub fn all() -> &'static [Self] {
        &[Self::OldYin, Self::YoungYang, Self::YoungYin, Self::OldYang]
    }

    /// The coin sum for this value (6-9).
    pub fn sum(self) -> u8 {
        match self {
            Self::OldYin => 6,
            Self::YoungYang => 7,
            Self::YoungYin => 8,
            Self::OldYang => 9,
        }
    }

    /// Classify a coin sum.
    pub fn from_sum(sum: u8) -> CoreResult<Self> {
        match sum {
            6 => Ok(Self::OldYin),
            7 => Ok(Self::YoungYang),
            8 => Ok(Self::YoungYin),
            9 => Ok(Self::OldYang),
            other => Err(CoreError::InvalidLineValue(u32::from(other))),
        }
    }

    /// Whether the line is currently Yang (7 or 9).
    pub fn is_yang(self) -> bool {
        matches!(self, Self::YoungYang | Self::OldYang)
    }

    /// Whether the line is changing (6 or 9).
    pub fn is_changing(self) -> bool {
        matches!(self, Self::OldYin | Self::OldYang)
    }

    /// Polarity after the change is applied. Static lines keep their own
    /// polarity.
    pub fn changed_to_yang(self) -> bool {
        match self {
            Self::OldYin => true,
            Self::YoungYang => true,
            Self::YoungYin => false,
            Self::OldYang => false,
        }
    }

    /// A canonical coin triple producing this value.
    fn canonical_coins(self) -> [Coin; 3] {
        use Coin::{Head, Tail};
        match self {
            Self::OldYin => [Tail, Tail, Tail],
            Self::YoungYang => [Head, Tail, Tail],
            Self::YoungYin => [Head, Head, Tail],
            Self::OldYang => [Head, Head, Head],
        }
    }
}

impl std::fmt::Display for LineValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OldYin => write!(f, "老阴"),
            Self::YoungYang => write!(f, "少阳"),
            Self::YoungYin => write!(f, "少阴"),
            Self::OldYang => write!(f, "老阳"),
        }
    }
}

/// The result of casting a single line.
///
/// Only the coins are stored; everything else is derived, so a line can
/// never disagree with its own coins. Serializes as its three coins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[Coin; 3]", into = "[Coin; 3]")]
pub struct LineResult {
    coins: [Coin; 3],
    value: LineValue,
}

impl LineResult {
    /// Build a line from three tossed coins.
    pub fn from_coins(coins: [Coin; 3]) -> Self {
        let sum: u8 = coins.iter().map(|c| c.value()).sum();
        let value = match sum {
            6 => LineValue::OldYin,
            7 => LineValue::YoungYang,
            8 => LineValue::YoungYin,
            _ => LineValue::OldYang,
        };
        Self { coins, value }
    }

    /// Build a line with a given value from its canonical coin triple.
    pub fn from_value(value: LineValue) -> Self {
        Self::from_coins(value.canonical_coins())
    }

    /// The three coins, in toss order.
    pub fn coins(&self) -> [Coin; 3] {
        self.coins
    }

    /// The classified line value.
    pub fn value(&self) -> LineValue {
        self.value
    }

    /// Sum of the coin values (6-9).
    pub fn sum(&self) -> u8 {
        self.value.sum()
    }

    /// Whether the line is Yang before any change.
    pub fn is_yang(&self) -> bool {
        self.value.is_yang()
    }

    /// Whether the line is changing.
    pub fn is_changing(&self) -> bool {
        self.value.is_changing()
    }

    /// Whether the line is Yang after any change.
    pub fn changed_to_yang(&self) -> bool {
        self.value.changed_to_yang()
    }
}

impl From<[Coin; 3]> for LineResult {
    fn from(coins: [Coin; 3]) -> Self {
        Self::from_coins(coins)
    }
}

impl From<LineResult> for [Coin; 3] {
    fn from(line: LineResult) -> Self {
        line.coins
    }
}

impl std::fmt::Display for LineResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.coins.map(|coin| coin.value());
        write!(f, "{a}+{b}+{c} = {} ({})", self.sum(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Coin::{Head, Tail};

    #[test]
    fn coin_values() {
        assert_eq!(Head.value(), 3);
        assert_eq!(Tail.value(), 2);
    }

    #[test]
    fn sums_from_coins() {
        assert_eq!(LineResult::from_coins([Tail, Tail, Tail]).sum(), 6);
        assert_eq!(LineResult::from_coins([Tail, Head, Tail]).sum(), 7);
        assert_eq!(LineResult::from_coins([Head, Tail, Head]).sum(), 8);
        assert_eq!(LineResult::from_coins([Head, Head, Head]).sum(), 9);
    }

    #[test]
    fn classification_table() {
        // (sum, is_yang, is_changing, changed_to_yang)
        let expected = [
            (6, false, true, true),
            (7, true, false, true),
            (8, false, false, false),
            (9, true, true, false),
        ];
        for (sum, yang, changing, changed) in expected {
            let value = LineValue::from_sum(sum).unwrap();
            let line = LineResult::from_value(value);
            assert_eq!(line.sum(), sum);
            assert_eq!(line.is_yang(), yang, "is_yang for {sum}");
            assert_eq!(line.is_changing(), changing, "is_changing for {sum}");
            assert_eq!(line.changed_to_yang(), changed, "changed_to_yang for {sum}");
        }
    }

    #[test]
    fn from_sum_rejects_out_of_range() {
        assert!(LineValue::from_sum(5).is_err());
        assert!(LineValue::from_sum(10).is_err());
    }

    #[test]
    fn canonical_coins_round_trip_value() {
        for value in LineValue::all() {
            assert_eq!(LineResult::from_value(*value).value(), *value);
        }
    }

    #[test]
    fn serializes_as_coins_only() {
        let line = LineResult::from_value(LineValue::OldYang);
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"["Head","Head","Head"]"#);
        let back: LineResult = serde_json::from_str(r#"["Tail","Head","Tail"]"#).unwrap();
        assert_eq!(back.value(), LineValue::YoungYang);
    }

    #[test]
    fn display() {
        let line = LineResult::from_value(LineValue::OldYin);
        assert_eq!(line.to_string(), "2+2+2 = 6 (老阴)");
    }
}
