//! The King Wen hexagram table.
//!
//! Sixty-four rows in traditional order. Each row's `binary` string lists
//! the lines bottom first, `1` for Yang and `0` for Yin.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::pattern::Pattern;

/// One row of the hexagram table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hexagram {
    /// King Wen number (1-64), or 0 for the unknown sentinel.
    pub number: u8,
    /// Short name, e.g. 乾.
    pub name: &'static str,
    /// Line pattern, bottom line first.
    pub binary: &'static str,
    /// Judgment excerpt.
    pub judgment: &'static str,
    /// Short gloss of the hexagram's character.
    pub nature: &'static str,
    /// Image commentary.
    pub description: &'static str,
}

impl Hexagram {
    /// Sentinel returned when a pattern is missing from the table.
    pub const UNKNOWN: Self = Self {
        number: 0,
        name: "",
        binary: "",
        judgment: "",
        nature: "",
        description: "",
    };

    /// Whether this is the unknown sentinel.
    pub fn is_unknown(&self) -> bool {
        self.number == 0
    }

    /// Whether line `position` (0 = bottom) is Yang.
    pub fn is_yang(&self, position: usize) -> bool {
        self.binary.as_bytes().get(position) == Some(&b'1')
    }
}

impl std::fmt::Display for Hexagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unknown() {
            write!(f, "unknown hexagram")
        } else {
            write!(f, "#{} {}", self.number, self.name)
        }
    }
}

const fn hex(
    number: u8,
    name: &'static str,
    binary: &'static str,
    judgment: &'static str,
    nature: &'static str,
    description: &'static str,
) -> Hexagram {
    Hexagram {
        number,
        name,
        binary,
        judgment,
        nature,
        description,
    }
}

/// The 64 hexagrams in King Wen order.
pub const HEXAGRAMS: [Hexagram; 64] = [
    hex(1, "乾", "111111", "元亨利贞。", "刚健中正", "天行健，君子以自强不息。"),
    hex(2, "坤", "000000", "元亨，利牝马之贞。", "厚德载物", "地势坤，君子以厚德载物。"),
    hex(3, "屯", "100010", "元亨，利贞。", "万物始生", "云雷屯，君子以经纶。"),
    hex(4, "蒙", "010001", "亨。匪我求童蒙，童蒙求我。", "启蒙智慧", "山下出泉，蒙；君子以果行育德。"),
    hex(5, "需", "111010", "有孚，光亨，贞吉。", "饮食宴乐", "云上于天，需；君子以饮食宴乐。"),
    hex(6, "讼", "010111", "有孚，窒惕，中吉。", "慎争戒讼", "天与水违行，讼；君子以作事谋始。"),
    hex(7, "师", "010000", "贞，丈人吉，无咎。", "行军用师", "地中有水，师；君子以容民畜众。"),
    hex(8, "比", "000010", "吉。原筮，元永贞。", "亲密比辅", "地上有水，比；先王以建万国，亲诸侯。"),
    hex(9, "小畜", "111011", "亨。密云不雨。", "蓄养待进", "风行天上，小畜；君子以懿文德。"),
    hex(10, "履", "110111", "履虎尾，不咥人，亨。", "礼仪规范", "上天下泽，履；君子以辨上下，定民志。"),
    hex(11, "泰", "111000", "小往大来，吉，亨。", "通达安泰", "天地交，泰；后以财成天地之道。"),
    hex(12, "否", "000111", "否之匪人，不利君子贞。", "闭塞不通", "天地不交，否；君子以俭德辟难。"),
    hex(13, "同人", "101111", "同人于野，亨。", "上下和同", "天与火，同人；君子以类族辨物。"),
    hex(14, "大有", "111101", "元亨。", "盛大丰有", "火在天上，大有；君子以遏恶扬善。"),
    hex(15, "谦", "001000", "亨，君子有终。", "谦虚受益", "地中有山，谦；君子以裒多益寡。"),
    hex(16, "豫", "000100", "利建侯行师。", "和乐豫悦", "雷出地奋，豫；先王以作乐崇德。"),
    hex(17, "随", "100110", "元亨利贞，无咎。", "随顺时势", "泽中有雷，随；君子以向晦入宴息。"),
    hex(18, "蛊", "011001", "元亨，利涉大川。", "振疲起衰", "山下有风，蛊；君子以振民育德。"),
    hex(19, "临", "110000", "元亨利贞。", "督导亲临", "泽上有地，临；君子以教思无穷。"),
    hex(20, "观", "000011", "盥而不荐，有孚颙若。", "观摩省察", "风行地上，观；先王以省方，观民设教。"),
    hex(21, "噬嗑", "100101", "亨。利用狱。", "刑法整治", "雷电，噬嗑；先王以明罚敕法。"),
    hex(22, "贲", "101001", "亨。小利有攸往。", "文饰美化", "山下有火，贲；君子以明庶政。"),
    hex(23, "剥", "000001", "不利有攸往。", "剥落侵蚀", "山附于地，剥；上以厚下，安宅。"),
    hex(24, "复", "100000", "亨。出入无疾。", "万物复兴", "雷在地中，复；先王以至日闭关。"),
    hex(25, "无妄", "100111", "元亨利贞。", "真实无妄", "天下雷行，物与无妄；先王以茂对时。"),
    hex(26, "大畜", "111001", "利贞。不家食吉。", "大有积蓄", "天在山中，大畜；君子以多识前言。"),
    hex(27, "颐", "100001", "贞吉。观颐，自求口实。", "颐养之道", "山下有雷，颐；君子以慎言语，节饮食。"),
    hex(28, "大过", "011110", "栋桡，利有攸往，亨。", "非常之举", "泽灭木，大过；君子以独立不惧。"),
    hex(29, "坎", "010010", "习坎，有孚，维心亨。", "险阻重重", "水流而不盈，行险而不失其信。"),
    hex(30, "离", "101101", "利贞，亨。", "附丽光明", "明两作，离；大人以继明照于四方。"),
    hex(31, "咸", "001110", "亨，利贞，取女吉。", "感应沟通", "山上有泽，咸；君子以虚受人。"),
    hex(32, "恒", "011100", "亨，无咎，利贞。", "恒久之道", "雷风，恒；君子以立不易方。"),
    hex(33, "遁", "001111", "亨，小利贞。", "退避保身", "天下有山，遁；君子以远小人。"),
    hex(34, "大壮", "111100", "利贞。", "壮大强盛", "雷在天上，大壮；君子以非礼弗履。"),
    hex(35, "晋", "000101", "康侯用锡马蕃庶。", "晋升进取", "明出地上，晋；君子以自昭明德。"),
    hex(36, "明夷", "101000", "利艰贞。", "晦暗蒙难", "明入地中，明夷；君子以莅众，用晦而明。"),
    hex(37, "家人", "101011", "利女贞。", "诚威治业", "风自火出，家人；君子以言有物，行有恒。"),
    hex(38, "睽", "110101", "小事吉。", "乖离异同", "上火下泽，睽；君子以同而异。"),
    hex(39, "蹇", "001010", "利西南，不利东北。", "险阻艰难", "山上有水，蹇；君子以反身修德。"),
    hex(40, "解", "010100", "利西南。", "解除困难", "雷雨作，解；君子以赦过宥罪。"),
    hex(41, "损", "110001", "有孚，元吉，无咎。", "损下益上", "山下有泽，损；君子以惩忿窒欲。"),
    hex(42, "益", "100011", "利有攸往，利涉大川。", "损上益下", "风雷，益；君子以见善则迁，有过则改。"),
    hex(43, "夬", "111110", "扬于王庭，孚号，有厉。", "决断清除", "泽上于天，夬；君子以施禄及下。"),
    hex(44, "姤", "011111", "女壮，勿用取女。", "相遇邂逅", "天下有风，姤；后以施命诰四方。"),
    hex(45, "萃", "000110", "亨。王假有庙。", "聚集精英", "泽上于地，萃；君子以除戎器，戒不虞。"),
    hex(46, "升", "011000", "元亨，用见大人。", "顺势上升", "地中生木，升；君子以顺德，积小以高大。"),
    hex(47, "困", "010110", "亨，贞，大人吉。", "困境磨练", "泽无水，困；君子以致命遂志。"),
    hex(48, "井", "011010", "改邑不改井。", "养贤惠民", "木上有水，井；君子以劳民劝相。"),
    hex(49, "革", "101110", "已日乃孚，元亨。", "顺天应人", "泽中有火，革；君子以治历明时。"),
    hex(50, "鼎", "011101", "元吉，亨。", "稳重图变", "木上有火，鼎；君子以正位凝命。"),
    hex(51, "震", "100100", "亨。震来虩虩。", "临危不乱", "荐雷，震；君子以恐惧修省。"),
    hex(52, "艮", "001001", "艮其背，不获其身。", "动静适时", "兼山，艮；君子以思不出其位。"),
    hex(53, "渐", "001011", "女归吉，利贞。", "循序渐进", "山上有木，渐；君子以居贤德善俗。"),
    hex(54, "归妹", "110100", "征凶，无攸利。", "违反常理", "泽上有雷，归妹；君子以永终知敝。"),
    hex(55, "丰", "101100", "亨，王假之。", "盛大丰满", "雷电皆至，丰；君子以折狱致刑。"),
    hex(56, "旅", "001101", "小亨，旅贞吉。", "依义顺时", "山上有火，旅；君子以明慎用刑。"),
    hex(57, "巽", "011011", "小亨，利有攸往。", "谦逊受益", "随风，巽；君子以申命行事。"),
    hex(58, "兑", "110110", "亨，利贞。", "喜悦沟通", "丽泽，兑；君子以朋友讲习。"),
    hex(59, "涣", "010011", "亨。王假有庙。", "拯救涣散", "风行水上，涣；先王以享于帝立庙。"),
    hex(60, "节", "110010", "亨。苦节不可贞。", "节制调节", "泽上有水，节；君子以制数度，议德行。"),
    hex(61, "中孚", "110011", "豚鱼吉，利涉大川。", "诚信感通", "泽上有风，中孚；君子以议狱缓死。"),
    hex(62, "小过", "001100", "亨，利贞。", "行动有度", "山上有雷，小过；君子以行过乎恭。"),
    hex(63, "既济", "101010", "亨，小利贞。", "盛极将衰", "水在火上，既济；君子以思患而预防之。"),
    hex(64, "未济", "010101", "亨，小狐汔济。", "生生不息", "火在水上，未济；君子以慎辨物居方。"),
];

/// All hexagrams in King Wen order.
pub fn all() -> &'static [Hexagram] {
    &HEXAGRAMS
}

/// Look up a hexagram by its exact binary string.
///
/// Returns [`Hexagram::UNKNOWN`] when no row matches. The table covers all
/// 64 patterns, so a miss on a well-formed pattern means the table itself
/// is broken.
pub fn lookup_by_binary(binary: &str) -> Hexagram {
    match HEXAGRAMS.iter().find(|h| h.binary == binary) {
        Some(found) => *found,
        None => {
            tracing::warn!(binary, "hexagram pattern not found in table");
            Hexagram::UNKNOWN
        }
    }
}

/// Look up the hexagram for a line pattern.
pub fn lookup_pattern(pattern: Pattern) -> Hexagram {
    lookup_by_binary(&pattern.to_string())
}

/// Look up a hexagram by its King Wen number.
pub fn by_number(number: u32) -> Option<Hexagram> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    HEXAGRAMS.get(index).copied()
}

/// Like [`by_number`], but an out-of-range number is an error.
pub fn require_number(number: u32) -> CoreResult<Hexagram> {
    by_number(number).ok_or(CoreError::NumberOutOfRange(number))
}
