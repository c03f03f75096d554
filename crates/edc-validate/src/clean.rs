//! Field cleaning: presence, type and choice checks for each submitted value.
//!
//! A field that fails cleaning records its error and yields `None`; the
//! cross-field rules then skip whatever depends on it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use edc_model::{ItemId, ListItem, VocabularyKind, VocabularyRegistry, YesNo};

use crate::errors::FormErrors;
use crate::form_data::FormData;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_DATE: &str = "Enter a valid date.";
pub const INVALID_DATETIME: &str = "Enter a valid date/time.";
pub const INVALID_INTEGER: &str = "Enter a whole number.";
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Reads fields out of [`FormData`], recording cleaning errors.
pub(crate) struct Cleaner<'a> {
    data: &'a FormData,
    errors: &'a mut FormErrors,
}

impl<'a> Cleaner<'a> {
    pub fn new(data: &'a FormData, errors: &'a mut FormErrors) -> Self {
        Self { data, errors }
    }

    /// Clean a required field.
    pub fn required<T>(
        &mut self,
        field: &str,
        parse: impl FnOnce(&Value) -> Result<T, String>,
    ) -> Option<T> {
        let Some(value) = self.data.value(field) else {
            self.errors.add(field, REQUIRED);
            return None;
        };
        self.parse_value(field, value, parse)
    }

    /// Clean an optional field; blank yields `None` without error.
    pub fn optional<T>(
        &mut self,
        field: &str,
        parse: impl FnOnce(&Value) -> Result<T, String>,
    ) -> Option<T> {
        let value = self.data.value(field)?;
        self.parse_value(field, value, parse)
    }

    fn parse_value<T>(
        &mut self,
        field: &str,
        value: &Value,
        parse: impl FnOnce(&Value) -> Result<T, String>,
    ) -> Option<T> {
        match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                self.errors.add(field, message);
                None
            }
        }
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

pub fn parse_text(value: &Value) -> Result<String, String> {
    as_text(value).ok_or_else(|| "Enter a valid value.".to_string())
}

pub fn parse_date(value: &Value) -> Result<NaiveDate, String> {
    let text = as_text(value).ok_or_else(|| INVALID_DATE.to_string())?;
    if let Ok(date) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_datetime_text(&text)
        .map(|datetime| datetime.date_naive())
        .ok_or_else(|| INVALID_DATE.to_string())
}

pub fn parse_datetime(value: &Value) -> Result<DateTime<Utc>, String> {
    let text = as_text(value).ok_or_else(|| INVALID_DATETIME.to_string())?;
    parse_datetime_text(&text).ok_or_else(|| INVALID_DATETIME.to_string())
}

/// RFC 3339, or a naive `YYYY-MM-DD HH:MM[:SS]` taken as UTC.
fn parse_datetime_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.with_timezone(&Utc));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

/// Whole numbers; `3.0` and `"3.0"` are accepted as 3.
pub fn parse_integer(value: &Value) -> Result<i64, String> {
    let invalid = || INVALID_INTEGER.to_string();
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(whole_number))
            .ok_or_else(invalid),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(whole_number))
                .ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

fn whole_number(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

pub fn parse_yes_no(value: &Value) -> Result<YesNo, String> {
    let text = as_text(value).unwrap_or_default();
    text.parse::<YesNo>().map_err(|_| {
        format!("Select a valid choice. {text} is not one of the available choices.")
    })
}

/// Resolve a submitted item id against the field's vocabulary.
pub fn parse_item<'r>(
    registry: &'r VocabularyRegistry,
    kind: VocabularyKind,
    value: &Value,
) -> Result<&'r ListItem, String> {
    let id = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }
    .and_then(|raw| u32::try_from(raw).ok())
    .map(ItemId::new)
    .ok_or_else(|| INVALID_CHOICE.to_string())?;
    registry
        .resolve(kind, id)
        .ok_or_else(|| INVALID_CHOICE.to_string())
}
