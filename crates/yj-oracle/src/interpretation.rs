//! Structured replies produced by the interpretation provider.
//!
//! Each reply type knows the JSON schema the provider must follow and the
//! fixed fallback shown when no real reply is available.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A reply shape the provider can be asked to fill.
pub trait StructuredReply: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Response schema in the provider's schema dialect.
    fn schema() -> Value;

    /// Complete, generic content used whenever no real reply is available.
    fn fallback() -> Self;
}

/// A full reading of one divination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    /// One concrete, actionable line of guidance.
    pub concrete_strategy: String,
    /// The classical text.
    pub original: String,
    /// Vernacular rendering of the classical text.
    pub vernacular: String,
    /// Condensed summary and advice.
    pub master_quotes: MasterQuotes,
    /// Traditional reading by topic.
    pub traditional: TraditionalReading,
    /// Extended commentary by topic.
    #[serde(rename = "zhangMingren")]
    pub commentary: ExtendedCommentary,
    /// Analysis focused on the changing lines.
    pub line_analysis: String,
}

/// Condensed summary and advice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterQuotes {
    /// Overall verdict.
    pub summary: String,
    /// Core warning or advice.
    pub advice: String,
}

/// Traditional reading, one field per topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraditionalReading {
    /// The great image.
    pub description: String,
    /// Career.
    pub career: String,
    /// Business.
    pub business: String,
    /// Reputation.
    pub fame: String,
    /// Relationships.
    pub love: String,
    /// Decisions.
    pub decision: String,
}

/// Extended commentary, one field per topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedCommentary {
    /// Explanation.
    pub explanation: String,
    /// Characteristics.
    pub characteristics: String,
    /// Fortune.
    pub luck: String,
    /// Household.
    pub family: String,
    /// Illness.
    pub sickness: String,
    /// Lost items or people.
    pub lost: String,
    /// Travel.
    pub travel: String,
    /// Lawsuits.
    pub lawsuit: String,
    /// Trade.
    pub business: String,
}

fn string_object(fields: &[&str]) -> Value {
    let properties: serde_json::Map<String, Value> = fields
        .iter()
        .map(|f| ((*f).to_string(), json!({ "type": "STRING" })))
        .collect();
    json!({ "type": "OBJECT", "properties": properties })
}

impl StructuredReply for Interpretation {
    fn schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "concreteStrategy": { "type": "STRING" },
                "original": { "type": "STRING" },
                "vernacular": { "type": "STRING" },
                "masterQuotes": string_object(&["summary", "advice"]),
                "traditional": string_object(&[
                    "description", "career", "business", "fame", "love", "decision",
                ]),
                "zhangMingren": string_object(&[
                    "explanation", "characteristics", "luck", "family", "sickness",
                    "lost", "travel", "lawsuit", "business",
                ]),
                "lineAnalysis": { "type": "STRING" },
            },
            "required": [
                "concreteStrategy", "original", "vernacular", "masterQuotes",
                "traditional", "zhangMingren", "lineAnalysis",
            ],
        })
    }

    fn fallback() -> Self {
        Self {
            concrete_strategy: "时机未到，建议韬光养晦，切勿轻举妄动。".into(),
            original: "乾。元，亨，利，贞。\n象曰：天行健，君子以自强不息。".into(),
            vernacular: "乾卦：大吉大利，吉利的贞卜。\n《象辞》说：天道刚健，运行不已。君子观此卦象，从而以天为法，自强不息。".into(),
            master_quotes: MasterQuotes {
                summary: "刚健旺盛，发育之功；完事顺利，谨防太强。".into(),
                advice: "宜把握机会，争取成果，但忌过于刚直。".into(),
            },
            traditional: TraditionalReading {
                description: "天行刚健，自强不息。".into(),
                career: "大吉大利，万事如意，但阳气已达顶点，盛极必衰。".into(),
                business: "十分顺利，有发展向上的大好机会。".into(),
                fame: "潜在能力尚未充分发挥，只要进一步努力，必成君子之名。".into(),
                love: "阳盛阴衰，但刚柔可相济，形成美满结果。".into(),
                decision: "可成就大的事业。坚持刚健、正直、公允的实质。".into(),
            },
            commentary: ExtendedCommentary {
                explanation: "刚健稳固。".into(),
                characteristics: "积极，刚毅，努力，认真，有耐性。".into(),
                luck: "有地位擢升、名利双收之象。".into(),
                family: "繁昌兴隆，须小心口舌之争。".into(),
                sickness: "病情恶化，宜细心调养。".into(),
                lost: "可望寻回。".into(),
                travel: "利于出行。".into(),
                lawsuit: "宜据理力争。".into(),
                business: "小利可得，大则勿取。".into(),
            },
            line_analysis: "初九：潜龙，勿用。此时应坚定信念，隐忍待机。".into(),
        }
    }
}

/// Study notes for one hexagram, shown in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryCommentary {
    /// Original text with a vernacular rendering.
    pub original_text: String,
    /// Philosophical analysis.
    pub philosophy: String,
    /// Meaning when the hexagram comes up in a divination.
    pub divination_meaning: String,
}

impl StructuredReply for LibraryCommentary {
    fn schema() -> Value {
        let mut schema = string_object(&["originalText", "philosophy", "divinationMeaning"]);
        schema["required"] = json!(["originalText", "philosophy", "divinationMeaning"]);
        schema
    }

    fn fallback() -> Self {
        Self {
            original_text: "数据加载中...".into(),
            philosophy: "AI正在深度解析卦象哲理...".into(),
            divination_meaning: "正在读取占卜含义...".into(),
        }
    }
}

/// Parse provider text into a reply, tolerating a Markdown code fence
/// around the JSON.
pub fn parse_reply<T: StructuredReply>(text: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(strip_code_fence(text))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.strip_prefix("json").unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_serializes_with_wire_names() {
        let value = serde_json::to_value(Interpretation::fallback()).unwrap();
        for key in [
            "concreteStrategy",
            "original",
            "vernacular",
            "masterQuotes",
            "traditional",
            "zhangMingren",
            "lineAnalysis",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value["zhangMingren"]["lawsuit"].is_string());
    }

    #[test]
    fn schema_lists_every_field() {
        let schema = Interpretation::schema();
        assert_eq!(schema["required"].as_array().unwrap().len(), 7);
        assert_eq!(
            schema["properties"]["traditional"]["properties"]
                .as_object()
                .unwrap()
                .len(),
            6
        );
        assert_eq!(
            schema["properties"]["zhangMingren"]["properties"]
                .as_object()
                .unwrap()
                .len(),
            9
        );
    }

    #[test]
    fn parse_accepts_partial_sub_objects() {
        let text = r#"{
            "concreteStrategy": "s", "original": "o", "vernacular": "v",
            "masterQuotes": {"summary": "sum"},
            "traditional": {}, "zhangMingren": {"luck": "good"},
            "lineAnalysis": "l"
        }"#;
        let parsed: Interpretation = parse_reply(text).unwrap();
        assert_eq!(parsed.master_quotes.summary, "sum");
        assert!(parsed.master_quotes.advice.is_empty());
        assert_eq!(parsed.commentary.luck, "good");
    }

    #[test]
    fn parse_rejects_missing_top_level_field() {
        let text = r#"{"concreteStrategy": "s"}"#;
        assert!(parse_reply::<Interpretation>(text).is_err());
    }

    #[test]
    fn parse_strips_code_fence() {
        let text = "```json\n{\"originalText\":\"a\",\"philosophy\":\"b\",\"divinationMeaning\":\"c\"}\n```";
        let parsed: LibraryCommentary = parse_reply(text).unwrap();
        assert_eq!(parsed.philosophy, "b");
    }

    #[test]
    fn library_schema_requires_all_fields() {
        let schema = LibraryCommentary::schema();
        assert_eq!(schema["required"].as_array().unwrap().len(), 3);
    }
}
