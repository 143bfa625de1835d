//! Derivation of normalized analytical fields from raw profile documents.
//!
//! The source payload is semi-structured: any sub-field may be missing, have
//! the wrong JSON type, or carry years as strings. Every extractor here is
//! tolerant of that and degrades to an empty/zero contribution instead of
//! failing. Only a payload that is not a JSON object at all is rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::CoreError;

/// Upper bound on the number of skills kept per profile.
pub const MAX_SKILLS: usize = 10;

/// Marker the source uses for an experience that has not ended.
const PRESENT: &str = "Present";

/// Fields derived from a profile's raw payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedProfile {
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub experience_years: i32,
}

/// Derives skills, languages, and total experience years from a raw payload.
///
/// `current_year` stands in for open-ended (`"Present"` or absent) end years.
/// The result is a pure function of `(raw, current_year)`.
///
/// # Errors
///
/// Returns [`CoreError::MalformedPayload`] if `raw` is not a JSON object.
pub fn derive_profile(raw: &Value, current_year: i32) -> Result<DerivedProfile, CoreError> {
    let Some(doc) = raw.as_object() else {
        return Err(CoreError::MalformedPayload(format!(
            "expected a JSON object, got {}",
            json_type_name(raw)
        )));
    };

    let skills = entries(doc.get("strengths"))
        .take(MAX_SKILLS)
        .filter_map(|s| string_field(s, "name"))
        .collect();

    let languages = entries(doc.get("languages"))
        .filter_map(|l| string_field(l, "language"))
        .collect();

    Ok(DerivedProfile {
        skills,
        languages,
        experience_years: experience_years(doc.get("experiences"), current_year),
    })
}

/// Sums `max(0, toYear - fromYear)` over an `experiences` array.
///
/// Entries without a usable `fromYear`, whose `toYear` does not parse, or
/// whose span overflows `i32` contribute nothing.
#[must_use]
pub fn experience_years(experiences: Option<&Value>, current_year: i32) -> i32 {
    entries(experiences)
        .filter_map(|exp| {
            let from = parse_year(exp.get("fromYear")?)?;
            let to = match exp.get("toYear") {
                None | Some(Value::Null) => current_year,
                Some(Value::String(s)) if s.is_empty() || s == PRESENT => current_year,
                Some(other) => parse_year(other)?,
            };
            Some(to.checked_sub(from)?.max(0))
        })
        .fold(0i32, i32::saturating_add)
}

fn entries(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter())
        .into_iter()
        .flatten()
}

fn string_field(entry: &Value, key: &str) -> Option<String> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Accepts years as JSON numbers or numeric strings (`"2015"`).
fn parse_year(value: &Value) -> Option<i32> {
    match value {
        Value::String(s) => s.trim().parse::<i32>().ok(),
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "profiles_test.rs"]
mod tests;
