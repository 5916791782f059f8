//! Re-keys the raw per-date metrics array into `MetricsByDate`

use crate::types::{MetricsByDate, MetricsError, Result, UsageRecord};
use chrono::NaiveDate;
use serde_json::Value;

/// Build `MetricsByDate` from the decoded API body.
///
/// Each element's `date` becomes the key and the rest of the object is parsed
/// into a [`UsageRecord`]. The input is left untouched.
pub fn index_by_date(body: &Value) -> Result<MetricsByDate> {
    let items = body.as_array().ok_or_else(|| {
        MetricsError::MalformedResponse(format!(
            "expected an array of daily metrics, got {}",
            json_kind(body)
        ))
    })?;

    let mut metrics = MetricsByDate::new();
    for (i, item) in items.iter().enumerate() {
        let (date, record) = parse_record(i, item)?;
        metrics.insert(date, record);
    }

    tracing::debug!(days = metrics.len(), "indexed metrics by date");
    Ok(metrics)
}

fn parse_record(i: usize, item: &Value) -> Result<(NaiveDate, UsageRecord)> {
    let mut object = item
        .as_object()
        .cloned()
        .ok_or_else(|| malformed(i, format!("expected an object, got {}", json_kind(item))))?;

    let date = match object.remove("date") {
        Some(Value::String(s)) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| malformed(i, format!("invalid date {:?}", s)))?,
        Some(other) => return Err(malformed(i, format!("date is {}", json_kind(&other)))),
        None => return Err(malformed(i, "missing date field".to_string())),
    };

    let record: UsageRecord = serde_json::from_value(Value::Object(object))
        .map_err(|e| malformed(i, format!("{}: {}", date, e)))?;

    Ok((date, record))
}

fn malformed(i: usize, detail: String) -> MetricsError {
    MetricsError::MalformedResponse(format!("record {}: {}", i, detail))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
