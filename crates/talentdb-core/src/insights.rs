//! Read-model shapes and the arithmetic behind corpus insights.
//!
//! Everything here is pure: the database layer supplies raw counts and
//! averages, and these helpers apply rounding, zero-denominator guards, and
//! seniority bucketing. Field names serialize in camelCase because the
//! dashboard consumes these objects verbatim.

use serde::{Deserialize, Serialize};

/// `round(numerator / denominator * 100)`, or `0` when `denominator <= 0`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn round_percent(numerator: i64, denominator: i64) -> i64 {
    if denominator <= 0 {
        return 0;
    }
    ((numerator as f64 / denominator as f64) * 100.0).round() as i64
}

/// Converts a unit fraction (`0.53`) to a rounded percentage (`53`).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
fn unit_to_percent(fraction: f64) -> i64 {
    (fraction * 100.0).round() as i64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeniorityBucket {
    Junior,
    Mid,
    Senior,
    Lead,
}

impl SeniorityBucket {
    /// Boundaries are inclusive on the lower bucket: 2 is junior, 5 is mid,
    /// 10 is senior, anything above 10 is lead.
    #[must_use]
    pub fn from_years(years: i32) -> Self {
        match years {
            i32::MIN..=2 => Self::Junior,
            3..=5 => Self::Mid,
            6..=10 => Self::Senior,
            _ => Self::Lead,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeniorityDistribution {
    pub junior: i64,
    pub mid: i64,
    pub senior: i64,
    pub lead: i64,
}

impl SeniorityDistribution {
    pub fn from_years<I>(years: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        years.into_iter().fold(Self::default(), |mut dist, y| {
            match SeniorityBucket::from_years(y) {
                SeniorityBucket::Junior => dist.junior += 1,
                SeniorityBucket::Mid => dist.mid += 1,
                SeniorityBucket::Senior => dist.senior += 1,
                SeniorityBucket::Lead => dist.lead += 1,
            }
            dist
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProfile {
    pub name: String,
    pub username: String,
    pub completion: f64,
    pub verified: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityMetrics {
    pub total_people: i64,
    pub total_profiles: i64,
    pub verified_people: i64,
    pub processed_profiles: i64,
    pub average_completion: i64,
    pub verification_rate: i64,
    pub processing_rate: i64,
}

impl DataQualityMetrics {
    /// Builds metrics from raw counts. `mean_completion` is `None` when there
    /// are no people to average over.
    #[must_use]
    pub fn from_counts(
        total_people: i64,
        total_profiles: i64,
        verified_people: i64,
        processed_profiles: i64,
        mean_completion: Option<f64>,
    ) -> Self {
        Self {
            total_people,
            total_profiles,
            verified_people,
            processed_profiles,
            average_completion: mean_completion.map_or(0, unit_to_percent),
            verification_rate: round_percent(verified_people, total_people),
            processing_rate: round_percent(processed_profiles, total_profiles),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryStat {
    pub query: String,
    pub count: i64,
    pub avg_completion: i64,
    pub verified_count: i64,
}

impl QueryStat {
    #[must_use]
    pub fn new(
        query: String,
        count: i64,
        mean_completion: Option<f64>,
        verified_count: i64,
    ) -> Self {
        Self {
            query,
            count,
            avg_completion: mean_completion.map_or(0, unit_to_percent),
            verified_count,
        }
    }
}

/// Snapshot of how far profile collection has progressed.
///
/// `pending_profiles` is the raw difference `total_profiles - total_people`.
/// It is not a set difference and can be negative; the pending sweep computes
/// the real unmatched set with a join instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingProfilesStatus {
    pub total_people: i64,
    pub total_profiles: i64,
    pub pending_profiles: i64,
    pub completion_rate: i64,
}

impl PendingProfilesStatus {
    #[must_use]
    pub fn from_counts(total_people: i64, total_profiles: i64) -> Self {
        Self {
            total_people,
            total_profiles,
            pending_profiles: total_profiles - total_people,
            completion_rate: round_percent(total_profiles, total_people),
        }
    }
}
