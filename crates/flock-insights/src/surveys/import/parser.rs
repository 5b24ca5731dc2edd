use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::io::Read;

/// One row of a long-format response export: a single answer of a single response.
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseRow {
    #[serde(rename = "Response ID")]
    pub(crate) response_id: String,
    #[serde(rename = "Person ID")]
    pub(crate) person_id: String,
    #[serde(
        rename = "Person Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) person_name: Option<String>,
    #[serde(rename = "Template ID")]
    pub(crate) template_id: String,
    #[serde(
        rename = "Updated At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) updated_at: Option<String>,
    #[serde(
        rename = "Question Code",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) question_code: Option<String>,
    #[serde(rename = "Answer", default, deserialize_with = "empty_string_as_none")]
    pub(crate) answer: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ResponseRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<ResponseRow>().collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}

/// Multi-select cells are exported as `|`-separated option lists.
pub(crate) fn answer_value(raw: Option<&str>) -> Value {
    let Some(raw) = raw else {
        return Value::Null;
    };

    if raw.contains('|') {
        let options = raw
            .split('|')
            .map(str::trim)
            .filter(|option| !option.is_empty())
            .map(|option| Value::String(option.to_string()))
            .collect();
        Value::Array(options)
    } else {
        Value::String(raw.to_string())
    }
}
