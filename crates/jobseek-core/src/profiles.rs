//! Account-level enums shared by the store and the API layer.

use serde::{Deserialize, Serialize};

use crate::jobs::JobError;
use crate::text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppRole {
    Admin,
    User,
}

impl AppRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AppRole::Admin => "admin",
            AppRole::User => "user",
        }
    }
}

impl std::fmt::Display for AppRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AppRole {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match text::normalize(s).as_str() {
            "admin" => Ok(AppRole::Admin),
            "user" => Ok(AppRole::User),
            other => Err(JobError::Invalid(format!("unknown role: {other}"))),
        }
    }
}

/// How a seeker's listed skill is grouped on their profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Technical,
    Soft,
    Language,
    Other,
}

impl SkillCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SkillCategory::Technical => "technical",
            SkillCategory::Soft => "soft",
            SkillCategory::Language => "language",
            SkillCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SkillCategory {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match text::normalize(s).as_str() {
            "technical" => Ok(SkillCategory::Technical),
            "soft" => Ok(SkillCategory::Soft),
            "language" => Ok(SkillCategory::Language),
            "other" => Ok(SkillCategory::Other),
            unknown => Err(JobError::Invalid(format!("unknown skill category: {unknown}"))),
        }
    }
}
