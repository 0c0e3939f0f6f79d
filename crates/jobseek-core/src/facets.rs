//! Derives the selectable filter options present in a job set.

use serde::{Deserialize, Serialize};

use crate::jobs::{JobDetails, JobRecord};
use crate::text;

/// Distinct facet values per category, in first-appearance order.
///
/// Corporate lists never contain domestic values and vice versa; a facet
/// dropdown only offers values that at least one record of its own category
/// actually carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSets {
    pub locations: Vec<String>,
    pub companies: Vec<String>,
    pub positions: Vec<String>,
    pub work_types: Vec<String>,
    pub daily_hours: Vec<String>,
}

impl FacetSets {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.companies.is_empty()
            && self.positions.is_empty()
            && self.work_types.is_empty()
            && self.daily_hours.is_empty()
    }
}

/// Scans the record set and collects its distinct facet values.
///
/// Locations are reduced to the leading segment before the first comma,
/// trimmed and capitalized, so `"bangalore, India"` and
/// `"Bangalore, Karnataka"` collapse to one `"Bangalore"` option. All other
/// facets keep the stored value verbatim; daily hours are rendered in their
/// string form for display. Blank values are skipped.
#[must_use]
pub fn extract_facets(jobs: &[JobRecord]) -> FacetSets {
    let mut facets = FacetSets::default();
    for job in jobs {
        match &job.details {
            JobDetails::Corporate(details) => {
                push_unique(&mut facets.locations, location_token(&job.location));
                push_unique(&mut facets.companies, details.company_name.clone());
                push_unique(&mut facets.positions, details.position.clone());
            }
            JobDetails::Domestic(details) => {
                push_unique(&mut facets.work_types, details.work_type.clone());
                push_unique(&mut facets.daily_hours, details.daily_hours.to_string());
            }
        }
    }
    facets
}

fn location_token(location: &str) -> String {
    let leading = location.split(',').next().unwrap_or("").trim();
    text::capitalize_first(leading)
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !value.is_empty() && !values.contains(&value) {
        values.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::{CorporateDetails, DomesticDetails, EmploymentType};
    use chrono::Utc;
    use uuid::Uuid;

    fn corporate(location: &str, company: &str, position: &str) -> JobRecord {
        JobRecord {
            id: Uuid::new_v4(),
            location: location.to_string(),
            posted_by: Uuid::new_v4(),
            created_at: Utc::now(),
            details: JobDetails::Corporate(CorporateDetails {
                company_name: company.to_string(),
                position: position.to_string(),
                salary_range_min: 500_000,
                salary_range_max: 800_000,
                employment_type: EmploymentType::FullTime,
                years_of_experience: "2-5 years".to_string(),
            }),
        }
    }

    fn domestic(location: &str, work_type: &str, daily_hours: i16) -> JobRecord {
        JobRecord {
            id: Uuid::new_v4(),
            location: location.to_string(),
            posted_by: Uuid::new_v4(),
            created_at: Utc::now(),
            details: JobDetails::Domestic(DomesticDetails {
                work_type: work_type.to_string(),
                daily_hours,
                hourly_wage_min: 200,
                hourly_wage_max: 400,
            }),
        }
    }

    #[test]
    fn empty_job_set_yields_empty_facets() {
        let facets = extract_facets(&[]);
        assert!(facets.is_empty());
        assert_eq!(facets, FacetSets::default());
    }

    #[test]
    fn location_tokens_are_capitalized_and_deduplicated() {
        let jobs = vec![
            corporate("bangalore, India", "Acme", "backend_developer"),
            corporate("Bangalore, Karnataka", "Globex", "frontend_developer"),
            corporate("Mumbai", "Initech", "qa_engineer"),
        ];
        let facets = extract_facets(&jobs);
        assert_eq!(facets.locations, vec!["Bangalore", "Mumbai"]);
    }

    #[test]
    fn categories_do_not_leak_into_each_other() {
        let jobs = vec![
            corporate("Bangalore, India", "Acme", "backend_developer"),
            domestic("Mumbai", "gardening", 3),
        ];
        let facets = extract_facets(&jobs);
        // Domestic records contribute no location, company, or position.
        assert_eq!(facets.locations, vec!["Bangalore"]);
        assert_eq!(facets.companies, vec!["Acme"]);
        assert_eq!(facets.positions, vec!["backend_developer"]);
        assert_eq!(facets.work_types, vec!["gardening"]);
        assert_eq!(facets.daily_hours, vec!["3"]);
    }

    #[test]
    fn values_keep_first_appearance_order() {
        let jobs = vec![
            corporate("Delhi", "Globex", "qa_engineer"),
            corporate("Pune", "Acme", "backend_developer"),
            corporate("Delhi", "Globex", "backend_developer"),
        ];
        let facets = extract_facets(&jobs);
        assert_eq!(facets.companies, vec!["Globex", "Acme"]);
        assert_eq!(facets.positions, vec!["qa_engineer", "backend_developer"]);
    }

    #[test]
    fn daily_hours_are_rendered_as_strings() {
        let jobs = vec![
            domestic("Mumbai", "cooking", 8),
            domestic("Pune", "cooking", 4),
            domestic("Delhi", "driving", 8),
        ];
        let facets = extract_facets(&jobs);
        assert_eq!(facets.daily_hours, vec!["8", "4"]);
    }

    #[test]
    fn blank_location_contributes_no_option() {
        let jobs = vec![corporate("   ", "Acme", "backend_developer")];
        let facets = extract_facets(&jobs);
        assert!(facets.locations.is_empty());
        assert_eq!(facets.companies, vec!["Acme"]);
    }
}
