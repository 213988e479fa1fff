//! Extended hexagram texts: full judgment, image, and the six line texts.
//!
//! Only a few hexagrams carry authored line texts. Every other number gets a
//! placeholder built from its table row, so [`lookup_detail_by_number`]
//! always succeeds for 1-64. Details are built on first access and kept for
//! the rest of the process.

use std::sync::OnceLock;

use serde::Serialize;

use crate::table::{Hexagram, by_number};

/// Position prefixes for lines 1-6, bottom first.
pub const POSITION_NAMES: [&str; 6] = ["初", "二", "三", "四", "五", "上"];

/// Line text used when no authored text exists.
pub const PLACEHOLDER_LINE_TEXT: &str = "（暂无爻辞数据，请补充）";

/// Suffix appended to the judgment of a placeholder detail.
pub const PLACEHOLDER_JUDGMENT_NOTE: &str = " (此处为示例数据，完整版请连接数据库)";

/// Whether a line is firm (Yang) or yielding (Yin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineNature {
    /// 刚: a Yang line.
    Firm,
    /// 柔: a Yin line.
    Yielding,
}

impl LineNature {
    fn from_yang(yang: bool) -> Self {
        if yang { Self::Firm } else { Self::Yielding }
    }
}

impl std::fmt::Display for LineNature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Firm => write!(f, "刚"),
            Self::Yielding => write!(f, "柔"),
        }
    }
}

/// The text attached to one line of a hexagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineText {
    /// Line position, 1 (bottom) to 6 (top).
    pub position: u8,
    /// Traditional line name, e.g. 初九.
    pub name: String,
    /// The line statement.
    pub text: String,
    /// Small image commentary, if authored.
    pub image: Option<String>,
    /// Firm or yielding.
    pub nature: LineNature,
}

/// A hexagram with its full texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HexagramDetail {
    /// The table row this detail extends.
    #[serde(flatten)]
    pub hexagram: Hexagram,
    /// The complete judgment.
    pub full_judgment: String,
    /// The image commentary.
    pub image: String,
    /// The six line texts, bottom first.
    pub lines: [LineText; 6],
}

impl HexagramDetail {
    /// Whether this detail was synthesized rather than authored.
    pub fn is_placeholder(&self) -> bool {
        self.lines.iter().all(|l| l.text == PLACEHOLDER_LINE_TEXT)
    }

    fn placeholder(hexagram: Hexagram) -> Self {
        let lines = std::array::from_fn(|i| {
            let yang = hexagram.is_yang(i);
            LineText {
                position: position_of(i),
                name: format!("{}{}", POSITION_NAMES[i], if yang { "九" } else { "六" }),
                text: PLACEHOLDER_LINE_TEXT.to_string(),
                image: None,
                nature: LineNature::from_yang(yang),
            }
        });
        Self {
            hexagram,
            full_judgment: format!("{}{}", hexagram.judgment, PLACEHOLDER_JUDGMENT_NOTE),
            image: hexagram.description.to_string(),
            lines,
        }
    }

    fn authored(hexagram: Hexagram, text: &AuthoredText) -> Self {
        let lines = std::array::from_fn(|i| {
            let (name, line, image) = text.lines[i];
            LineText {
                position: position_of(i),
                name: name.to_string(),
                text: line.to_string(),
                image: Some(image.to_string()),
                nature: LineNature::from_yang(hexagram.is_yang(i)),
            }
        });
        Self {
            hexagram,
            full_judgment: text.full_judgment.to_string(),
            image: text.image.to_string(),
            lines,
        }
    }
}

/// Get the detail for a hexagram number.
///
/// Returns `None` only for numbers outside 1-64.
pub fn lookup_detail_by_number(number: u32) -> Option<&'static HexagramDetail> {
    static DETAILS: [OnceLock<HexagramDetail>; 64] = [const { OnceLock::new() }; 64];

    let hexagram = by_number(number)?;
    let slot = DETAILS.get(usize::from(hexagram.number) - 1)?;
    Some(slot.get_or_init(|| match authored_text(hexagram.number) {
        Some(text) => HexagramDetail::authored(hexagram, text),
        None => HexagramDetail::placeholder(hexagram),
    }))
}

fn position_of(index: usize) -> u8 {
    // index is always < 6
    index as u8 + 1
}

struct AuthoredText {
    full_judgment: &'static str,
    image: &'static str,
    /// (name, text, image) per line, bottom first.
    lines: [(&'static str, &'static str, &'static str); 6],
}

fn authored_text(number: u8) -> Option<&'static AuthoredText> {
    match number {
        1 => Some(&QIAN),
        2 => Some(&KUN),
        11 => Some(&TAI),
        _ => None,
    }
}

static QIAN: AuthoredText = AuthoredText {
    full_judgment: "乾：元，亨，利，贞。",
    image: "天行健，君子以自强不息。",
    lines: [
        ("初九", "潜龙，勿用。", "潜龙勿用，阳在下也。"),
        ("九二", "见龙在田，利见大人。", "见龙在田，德施普也。"),
        ("九三", "君子终日乾乾，夕惕若厉，无咎。", "终日乾乾，反复道也。"),
        ("九四", "或跃在渊，无咎。", "或跃在渊，进无咎也。"),
        ("九五", "飞龙在天，利见大人。", "飞龙在天，大人造也。"),
        ("上九", "亢龙，有悔。", "亢龙有悔，盈不可久也。"),
    ],
};

static KUN: AuthoredText = AuthoredText {
    full_judgment: "坤：元，亨，利牝马之贞。君子有攸往，先迷后得主，利西南得朋，东北丧朋。安贞，吉。",
    image: "地势坤，君子以厚德载物。",
    lines: [
        ("初六", "履霜，坚冰至。", "履霜坚冰，阴始凝也。"),
        ("六二", "直，方，大，不习无不利。", "六二之动，直以方也。"),
        ("六三", "含章可贞。或从王事，无成有终。", "含章可贞，以时发也。"),
        ("六四", "括囊，无咎无誉。", "括囊无咎，慎不害也。"),
        ("六五", "黄裳，元吉。", "黄裳元吉，文在中也。"),
        ("上六", "龙战于野，其血玄黄。", "龙战于野，其道穷也。"),
    ],
};

static TAI: AuthoredText = AuthoredText {
    full_judgment: "泰：小往大来，吉，亨。",
    image: "天地交，泰。后以财成天地之道，辅相天地之宜，以左右民。",
    lines: [
        ("初九", "拔茅茹，以其汇，征吉。", "拔茅征吉，志在外也。"),
        (
            "九二",
            "包荒，用冯河，不遐遗，朋亡，得尚于中行。",
            "包荒，得尚于中行，以光大也。",
        ),
        (
            "九三",
            "无平不陂，无往不复，艰贞无咎。勿恤其孚，于食有福。",
            "无往不复，天地际也。",
        ),
        ("六四", "翩翩，不富以其邻，不戒以孚。", "翩翩不富，皆失实也。"),
        ("六五", "帝乙归妹，以祉元吉。", "以祉元吉，中以行愿也。"),
        ("上六", "城复于隍，勿用师。自邑告命，贞吝。", "城复于隍，其命乱也。"),
    ],
};
