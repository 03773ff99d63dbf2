/// Utility functions
use chrono::{Datelike, Local, NaiveDate};
use serde_json::Value;

/// Format a calendar date as YYYY-MM-DD with zero-padded month and day
pub fn format_date(date: NaiveDate) -> String {
    format!("{}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Today's date in the local timezone, as YYYY-MM-DD
pub fn today_string() -> String {
    format_date(Local::now().date_naive())
}

/// JSON truthiness: null, false, 0, NaN and "" count as absent
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|x| x != 0.0 && !x.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Display a JSON scalar without the quotes serde_json puts around strings
pub fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
