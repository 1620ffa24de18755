use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a field but swaps in its default when the backend sent
/// something unusable, so one bad section never sinks the whole response.
fn lenient<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(de)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// The analysis backend's response, as far as the dashboard reads it.
/// Unknown fields stay in the raw stored JSON and are ignored here.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AnalysisResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub analysis: Analysis,
    #[serde(default, deserialize_with = "lenient")]
    pub plan: Vec<PlanDay>,
    #[serde(default, deserialize_with = "lenient")]
    pub recommendations: BTreeMap<String, Vec<Resource>>,
    #[serde(default, deserialize_with = "lenient")]
    pub study_tips: BTreeMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub revision_summary: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub genai_status: Option<GenaiStatus>,
}

impl AnalysisResponse {
    /// The dashboard only renders when the stored payload carries an
    /// `analysis` object; anything else sends the visitor back to upload.
    pub fn has_analysis(raw: &Value) -> bool {
        raw.get("analysis").map(Value::is_object).unwrap_or(false)
    }

    pub fn from_value(raw: &Value) -> Self {
        serde_json::from_value(raw.clone()).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Analysis {
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Summary,
    #[serde(default, deserialize_with = "lenient")]
    pub accuracy_by_difficulty: Vec<DifficultyAccuracy>,
    #[serde(default, deserialize_with = "lenient")]
    pub time_comparison: TimeComparison,
    #[serde(default, deserialize_with = "lenient")]
    pub strength_progression: Vec<ProgressionPoint>,
    #[serde(default, deserialize_with = "lenient")]
    pub subtopic_ranking: Vec<SubtopicStats>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Summary {
    #[serde(default)]
    pub total_attempts: u64,
    #[serde(default)]
    pub overall_accuracy: f64,
    #[serde(default)]
    pub avg_time_correct: f64,
    #[serde(default)]
    pub avg_time_incorrect: f64,
    #[serde(default)]
    pub strength_level: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DifficultyAccuracy {
    #[serde(default)]
    pub difficulty: Label,
    #[serde(default)]
    pub accuracy: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TimeComparison {
    #[serde(default)]
    pub avg_time_correct: f64,
    #[serde(default)]
    pub avg_time_incorrect: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProgressionPoint {
    #[serde(default)]
    pub test_id: Label,
    #[serde(default)]
    pub strength_score: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SubtopicStats {
    #[serde(default)]
    pub subtopic: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub attempts: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub rank: Option<u64>,
    #[serde(default)]
    pub topic_weightage: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PlanDay {
    #[serde(default)]
    pub day: Label,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub focus: Focus,
    #[serde(default, deserialize_with = "lenient")]
    pub study_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub activities: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub goals: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Resource {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GenaiStatus {
    #[serde(default, deserialize_with = "lenient")]
    pub used: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

/// Chart label the backend may send as a number or a string.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum Label {
    Number(f64),
    Text(String),
}

impl Default for Label {
    fn default() -> Self {
        Label::Text(String::new())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{}", *n as i64),
            Label::Number(n) => write!(f, "{n}"),
            Label::Text(text) => f.write_str(text),
        }
    }
}

/// Day focus arrives either as a list of topics or a single topic string.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum Focus {
    Many(Vec<String>),
    One(String),
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Many(Vec::new())
    }
}

impl Focus {
    /// A single empty string counts as no focus at all.
    pub fn items(&self) -> &[String] {
        match self {
            Focus::Many(items) => items,
            Focus::One(single) if single.is_empty() => &[],
            Focus::One(single) => std::slice::from_ref(single),
        }
    }
}
