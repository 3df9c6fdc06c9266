use crate::utils::error::Result;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Entry kind that counts towards statistics. Service entries are skipped.
pub const MESSAGE_KIND: &str = "message";
/// Chat kind of a two-participant conversation.
pub const PERSONAL_CHAT: &str = "personal_chat";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: i64,

    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Only guaranteed for countable messages; service entries may omit it.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub date: Option<DateTime<FixedOffset>>,

    #[serde(rename = "out", default)]
    pub outbound: Option<bool>,

    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub from_id: Option<String>,
}

impl Message {
    pub fn is_countable(&self) -> bool {
        self.kind.as_deref() == Some(MESSAGE_KIND)
    }
}

/// A chat export as written by the messenger's "export chat history" feature.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatExport {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "type", default)]
    pub chat_kind: Option<String>,

    #[serde(rename = "id", default)]
    pub chat_id: Option<i64>,

    #[serde(default)]
    pub messages: Vec<Message>,
}

impl ChatExport {
    /// Parses an export, matching field names case-insensitively.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        let export: Self = serde_json::from_value(lowercase_keys(value))?;
        if let Some(message) = export.countable_messages().find(|m| m.date.is_none()) {
            return Err(serde_json::Error::custom(format!(
                "message {} has no date",
                message.id
            ))
            .into());
        }
        Ok(export)
    }

    pub fn is_personal_chat(&self) -> bool {
        self.chat_kind.as_deref() == Some(PERSONAL_CHAT)
    }

    pub fn countable_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.is_countable())
    }
}

fn lowercase_keys(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(obj) => serde_json::Value::Object(
            obj.into_iter()
                .map(|(key, value)| (key.to_lowercase(), lowercase_keys(value)))
                .collect(),
        ),
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(lowercase_keys).collect())
        }
        other => other,
    }
}

fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_timestamp(&raw).map_err(D::Error::custom))
        .transpose()
}

/// Parses an RFC 3339 timestamp. Values without an offset are local wall-clock time.
pub fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<FixedOffset>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts);
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))?;

    // A wall-clock time skipped by a DST jump has no local instant
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => Ok(local.fixed_offset()),
        None => Ok(naive.and_utc().fixed_offset()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Peak {
    pub date: NaiveDate,
    pub value: u32,
}

/// Totals for one side of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideSummary {
    pub total: u64,
    /// `None` when the side has no messages at all.
    pub peak: Option<Peak>,
    pub average: f64,
}

impl SideSummary {
    pub fn peak_value(&self) -> u32 {
        self.peak.map(|p| p.value).unwrap_or(0)
    }

    /// Peak worth annotating on the chart.
    pub fn annotated_peak(&self) -> Option<Peak> {
        self.peak.filter(|p| p.value > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesData {
    pub label: String,
    pub counts: Vec<u32>,
    pub smoothed: Vec<f64>,
    pub summary: SideSummary,
}

/// Everything a renderer needs: one entry per day for both sides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub days: Vec<NaiveDate>,
    pub window: usize,
    pub mine: SeriesData,
    pub theirs: SeriesData,
}

impl ChartData {
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    pub fn days_span(&self) -> usize {
        self.days.len()
    }
}
