//! Job records and the corporate/domestic split.
//!
//! A listing is one of two kinds with disjoint field sets, so the kind is a
//! tagged variant rather than a bag of optional columns. Code that needs
//! category-specific data has to match on [`JobDetails`] and cannot read a
//! domestic field off a corporate job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::text;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("unknown job category: {0}")]
    UnknownCategory(String),
    #[error("unknown employment type: {0}")]
    UnknownEmploymentType(String),
    #[error("invalid job: {0}")]
    Invalid(String),
}

/// Top-level job kind. Determines which facet set applies when filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobCategory {
    Corporate,
    Domestic,
}

impl<'de> Deserialize<'de> for JobCategory {
    // Routed through `FromStr` so query strings may carry any casing.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl JobCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            JobCategory::Corporate => "corporate",
            JobCategory::Domestic => "domestic",
        }
    }
}

impl std::fmt::Display for JobCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobCategory {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match text::normalize(s).as_str() {
            "corporate" => Ok(JobCategory::Corporate),
            "domestic" => Ok(JobCategory::Domestic),
            other => Err(JobError::UnknownCategory(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
}

impl EmploymentType {
    /// Stored/wire form, e.g. `"full_time"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full_time",
            EmploymentType::PartTime => "part_time",
        }
    }

    /// Human-facing form, e.g. `"Full Time"`. Filter selections are matched
    /// against this label, which is also what option lists serve.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full Time",
            EmploymentType::PartTime => "Part Time",
        }
    }
}

impl std::fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EmploymentType {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both the stored form and the label.
        match text::normalize(s).as_str() {
            "full_time" | "full time" => Ok(EmploymentType::FullTime),
            "part_time" | "part time" => Ok(EmploymentType::PartTime),
            other => Err(JobError::UnknownEmploymentType(other.to_string())),
        }
    }
}

/// Fields specific to a corporate listing. Money amounts are integer rupees
/// per year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateDetails {
    pub company_name: String,
    /// Stored in `snake_case` (e.g. `"backend_developer"`); see
    /// [`JobRecord::title`] for the display form.
    pub position: String,
    pub salary_range_min: i32,
    pub salary_range_max: i32,
    pub employment_type: EmploymentType,
    /// Bucket label such as `"2-5 years"`.
    pub years_of_experience: String,
}

/// Fields specific to a domestic listing. Wages are integer rupees per hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomesticDetails {
    /// Stored in `snake_case` (e.g. `"elderly_care"`).
    pub work_type: String,
    pub daily_hours: i16,
    pub hourly_wage_min: i32,
    pub hourly_wage_max: i32,
}

/// Category-specific half of a job record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum JobDetails {
    Corporate(CorporateDetails),
    Domestic(DomesticDetails),
}

impl JobDetails {
    #[must_use]
    pub fn category(&self) -> JobCategory {
        match self {
            JobDetails::Corporate(_) => JobCategory::Corporate,
            JobDetails::Domestic(_) => JobCategory::Domestic,
        }
    }
}

/// A published job listing. Immutable from the filtering core's point of
/// view; creation and storage live in the database layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: Uuid,
    pub location: String,
    pub posted_by: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: JobDetails,
}

impl JobRecord {
    #[must_use]
    pub fn category(&self) -> JobCategory {
        self.details.category()
    }

    /// Card headline: the title-cased position or work type.
    #[must_use]
    pub fn title(&self) -> String {
        match &self.details {
            JobDetails::Corporate(details) => text::title_case_words(&details.position),
            JobDetails::Domestic(details) => text::title_case_words(&details.work_type),
        }
    }

    /// Opening message sent when a seeker starts a conversation about this
    /// listing.
    #[must_use]
    pub fn intro_message(&self) -> String {
        match &self.details {
            JobDetails::Corporate(details) => format!(
                "Interested in {} position at {}",
                self.title(),
                details.company_name
            ),
            JobDetails::Domestic(_) => format!("Interested in {} work", self.title()),
        }
    }
}

/// A job submission, validated before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJob {
    pub location: String,
    pub posted_by: Uuid,
    #[serde(flatten)]
    pub details: JobDetails,
}

impl NewJob {
    /// Checks the structural invariants of a submission.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Invalid`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), JobError> {
        if self.location.trim().is_empty() {
            return Err(JobError::Invalid("location must be non-empty".to_string()));
        }
        match &self.details {
            JobDetails::Corporate(details) => validate_corporate(details),
            JobDetails::Domestic(details) => validate_domestic(details),
        }
    }
}

fn validate_corporate(details: &CorporateDetails) -> Result<(), JobError> {
    if details.company_name.trim().is_empty() {
        return Err(JobError::Invalid(
            "company_name must be non-empty".to_string(),
        ));
    }
    if details.position.trim().is_empty() {
        return Err(JobError::Invalid("position must be non-empty".to_string()));
    }
    if details.years_of_experience.trim().is_empty() {
        return Err(JobError::Invalid(
            "years_of_experience must be non-empty".to_string(),
        ));
    }
    if details.salary_range_min < 0 {
        return Err(JobError::Invalid(
            "salary_range_min must not be negative".to_string(),
        ));
    }
    if details.salary_range_min > details.salary_range_max {
        return Err(JobError::Invalid(format!(
            "salary range is inverted: {} > {}",
            details.salary_range_min, details.salary_range_max
        )));
    }
    Ok(())
}

fn validate_domestic(details: &DomesticDetails) -> Result<(), JobError> {
    if details.work_type.trim().is_empty() {
        return Err(JobError::Invalid("work_type must be non-empty".to_string()));
    }
    if !(1..=24).contains(&details.daily_hours) {
        return Err(JobError::Invalid(format!(
            "daily_hours must be between 1 and 24, got {}",
            details.daily_hours
        )));
    }
    if details.hourly_wage_min < 0 {
        return Err(JobError::Invalid(
            "hourly_wage_min must not be negative".to_string(),
        ));
    }
    if details.hourly_wage_min > details.hourly_wage_max {
        return Err(JobError::Invalid(format!(
            "hourly wage range is inverted: {} > {}",
            details.hourly_wage_min, details.hourly_wage_max
        )));
    }
    Ok(())
}
