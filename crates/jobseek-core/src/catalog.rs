use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::jobs::{JobDetails, JobError, NewJob};
use crate::wage::WageRange;
use crate::ConfigError;

/// An annual salary bracket offered on the posting form, in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub min: i32,
    pub max: i32,
}

impl SalaryBand {
    /// Display form in lakhs, e.g. `"₹3.0L - ₹5.0L"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "₹{:.1}L - ₹{:.1}L",
            f64::from(self.min) / 100_000.0,
            f64::from(self.max) / 100_000.0
        )
    }
}

/// The posting-form option lists, loaded from `catalog.yaml`.
///
/// These are the values offered when creating a listing; the filter facets
/// shown when browsing are derived from the records themselves instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub positions: Vec<String>,
    pub work_types: Vec<String>,
    pub experience_bands: Vec<String>,
    pub salary_bands: Vec<SalaryBand>,
    pub wage_bands: Vec<String>,
}

impl CatalogFile {
    /// Checks that a submission only uses values the catalog offers.
    ///
    /// Runs after [`NewJob::validate`]; structural rules live there, this
    /// covers option-list membership.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Invalid`] naming the value outside the catalog.
    pub fn check_submission(&self, job: &NewJob) -> Result<(), JobError> {
        match &job.details {
            JobDetails::Corporate(details) => {
                if !self.positions.iter().any(|p| p == &details.position) {
                    return Err(JobError::Invalid(format!(
                        "position '{}' is not offered by the catalog",
                        details.position
                    )));
                }
                if !self
                    .experience_bands
                    .iter()
                    .any(|b| b == &details.years_of_experience)
                {
                    return Err(JobError::Invalid(format!(
                        "years_of_experience '{}' is not offered by the catalog",
                        details.years_of_experience
                    )));
                }
                let band_ok = self.salary_bands.iter().any(|band| {
                    band.min == details.salary_range_min && band.max == details.salary_range_max
                });
                if !band_ok {
                    return Err(JobError::Invalid(format!(
                        "salary range {}-{} does not match a posted band",
                        details.salary_range_min, details.salary_range_max
                    )));
                }
            }
            JobDetails::Domestic(details) => {
                if !self.work_types.iter().any(|w| w == &details.work_type) {
                    return Err(JobError::Invalid(format!(
                        "work type '{}' is not offered by the catalog",
                        details.work_type
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Load and validate the option catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<CatalogFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: CatalogFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CatalogParse)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &CatalogFile) -> Result<(), ConfigError> {
    check_names("position", &catalog.positions)?;
    check_names("work type", &catalog.work_types)?;
    check_names("experience band", &catalog.experience_bands)?;

    for band in &catalog.salary_bands {
        if band.min < 0 {
            return Err(ConfigError::Validation(format!(
                "salary band minimum must not be negative, got {}",
                band.min
            )));
        }
        if band.min > band.max {
            return Err(ConfigError::Validation(format!(
                "salary band is inverted: {} > {}",
                band.min, band.max
            )));
        }
    }

    let mut seen_bands = HashSet::new();
    for token in &catalog.wage_bands {
        if WageRange::parse(token).is_none() {
            return Err(ConfigError::Validation(format!(
                "wage band '{token}' is not a valid range token"
            )));
        }
        if !seen_bands.insert(token.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate wage band: '{token}'"
            )));
        }
    }

    Ok(())
}

fn check_names(kind: &str, values: &[String]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for value in values {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{kind} entries must be non-empty"
            )));
        }
        if !seen.insert(value.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate {kind}: '{value}'"
            )));
        }
    }
    Ok(())
}
