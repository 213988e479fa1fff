//! Prompt text sent to the interpretation provider.

use yj_core::{Casting, Hexagram};

/// Build the divination prompt for a question and its hexagrams.
pub fn divination_prompt(
    question: &str,
    primary: &Hexagram,
    relating: Option<&Hexagram>,
    casting: &Casting,
) -> String {
    let moving = casting.moving_lines_description();
    let moving = if moving.is_empty() { "无" } else { moving.as_str() };
    let relating = relating.map_or("无", |h| h.name);

    format!(
        "作为周易大师，请快速解析\"{question}\"。\n\
         本卦:{primary}({nature}), 变卦:{relating}, 动爻:{moving}。\n\
         \n\
         JSON输出，严禁Markdown，内容需简练深刻：\n\
         1.concreteStrategy: 一句具体可行方针。\n\
         2.original: 原文。\n\
         3.vernacular: 白话。\n\
         4.masterQuotes: {{summary:综合断语, advice:核心告诫}}。\n\
         5.traditional: {{description:大象, career:事业, business:经商, fame:求名, love:婚恋, decision:决策}}。\n\
         6.zhangMingren: {{explanation:解释, characteristics:特性, luck:运势, family:家运, sickness:疾病, lost:失物, travel:外出, lawsuit:诉讼, business:买卖}}。\n\
         7.lineAnalysis: 动爻或卦辞精解。\n",
        question = question.trim(),
        primary = primary.name,
        nature = primary.nature,
    )
}

/// Build the library study prompt for one hexagram.
pub fn library_prompt(hexagram: &Hexagram) -> String {
    format!(
        "解析周易第{number}卦：{name}。\n\
         JSON输出：\n\
         1.originalText: 原文与白话。\n\
         2.philosophy: 哲学解析(200字内)。\n\
         3.divinationMeaning: 占卜含义(150字内)。\n",
        number = hexagram.number,
        name = hexagram.name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use yj_core::LineValue::{OldYang, OldYin, YoungYang, YoungYin};
    use yj_core::resolve;

    #[test]
    fn divination_prompt_names_both_hexagrams_and_moving_lines() {
        let casting =
            Casting::from_values([YoungYang, YoungYin, OldYang, YoungYang, YoungYin, OldYin]);
        let r = resolve(&casting);
        let prompt = divination_prompt("  近期事业发展  ", &r.primary, r.relating.as_ref(), &casting);
        assert!(prompt.contains("\"近期事业发展\""));
        assert!(prompt.contains("本卦:震(临危不乱)"));
        assert!(prompt.contains("变卦:离"));
        assert!(prompt.contains("动爻:三爻动 (老阳)，上爻动 (老阴)"));
        assert!(prompt.contains("zhangMingren"));
    }

    #[test]
    fn divination_prompt_without_changes() {
        let casting = Casting::from_values([YoungYang; 6]);
        let r = resolve(&casting);
        let prompt = divination_prompt("q", &r.primary, None, &casting);
        assert!(prompt.contains("变卦:无"));
        assert!(prompt.contains("动爻:无"));
    }

    #[test]
    fn library_prompt_names_hexagram() {
        let h = yj_core::by_number(30).unwrap();
        let prompt = library_prompt(&h);
        assert!(prompt.starts_with("解析周易第30卦：离。"));
    }
}
