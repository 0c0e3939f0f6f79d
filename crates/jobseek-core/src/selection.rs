//! The current set of chosen filters and its mutation rules.
//!
//! One nullable slot per facet. Slots belonging to the two categories are
//! never jointly meaningful, so changing the category nulls the slots of
//! whichever category is being left.

use serde::{Deserialize, Serialize};

use crate::jobs::JobCategory;

/// Identifies one selection slot, for targeted clearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    JobCategory,
    Location,
    Company,
    Position,
    EmploymentType,
    WorkType,
    HourlyWageRange,
    DailyHours,
}

impl FilterField {
    /// Snake_case slot name, matching the query-parameter spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterField::JobCategory => "category",
            FilterField::Location => "location",
            FilterField::Company => "company",
            FilterField::Position => "position",
            FilterField::EmploymentType => "employment_type",
            FilterField::WorkType => "work_type",
            FilterField::HourlyWageRange => "hourly_wage_range",
            FilterField::DailyHours => "daily_hours",
        }
    }
}

/// One removable badge shown for an active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub field: FilterField,
    pub label: String,
}

/// The user's active filter choices. `None` slots do not filter.
///
/// Facet values are free text compared tolerantly by the filter engine;
/// `daily_hours` and `hourly_wage_range` stay in their string form and are
/// parsed at match time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub job_category: Option<JobCategory>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub employment_type: Option<String>,
    pub work_type: Option<String>,
    pub hourly_wage_range: Option<String>,
    pub daily_hours: Option<String>,
}

impl FilterSelection {
    /// Changes the category and nulls the facets of the category being left.
    ///
    /// Moving between two set categories (including re-selecting the same
    /// one) resets every facet slot; moving from an unset category resets
    /// only the slots of the category not chosen.
    pub fn set_category(&mut self, next: Option<JobCategory>) {
        match (self.job_category, next) {
            (Some(_), Some(_)) => {
                self.clear_corporate_facets();
                self.clear_domestic_facets();
            }
            (None, Some(JobCategory::Corporate)) | (Some(JobCategory::Domestic), None) => {
                self.clear_domestic_facets();
            }
            (None, Some(JobCategory::Domestic)) | (Some(JobCategory::Corporate), None) => {
                self.clear_corporate_facets();
            }
            (None, None) => {}
        }
        self.job_category = next;
    }

    /// Nulls exactly one slot, leaving the rest untouched.
    pub fn clear_one(&mut self, field: FilterField) {
        match field {
            FilterField::JobCategory => self.job_category = None,
            FilterField::Location => self.location = None,
            FilterField::Company => self.company = None,
            FilterField::Position => self.position = None,
            FilterField::EmploymentType => self.employment_type = None,
            FilterField::WorkType => self.work_type = None,
            FilterField::HourlyWageRange => self.hourly_wage_range = None,
            FilterField::DailyHours => self.daily_hours = None,
        }
    }

    /// Nulls every slot, category included.
    pub fn clear_all(&mut self) {
        *self = FilterSelection::default();
    }

    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.job_category.is_some()
            || self.location.is_some()
            || self.company.is_some()
            || self.position.is_some()
            || self.employment_type.is_some()
            || self.work_type.is_some()
            || self.hourly_wage_range.is_some()
            || self.daily_hours.is_some()
    }

    /// One chip per active slot, in display order. Daily hours carry an
    /// `" hours"` suffix; everything else shows the selected value verbatim.
    #[must_use]
    pub fn chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if let Some(category) = self.job_category {
            chips.push(FilterChip {
                field: FilterField::JobCategory,
                label: category.as_str().to_string(),
            });
        }
        let text_slots = [
            (FilterField::Position, &self.position),
            (FilterField::Location, &self.location),
            (FilterField::Company, &self.company),
            (FilterField::EmploymentType, &self.employment_type),
            (FilterField::WorkType, &self.work_type),
            (FilterField::HourlyWageRange, &self.hourly_wage_range),
        ];
        for (field, slot) in text_slots {
            if let Some(value) = slot {
                chips.push(FilterChip {
                    field,
                    label: value.clone(),
                });
            }
        }
        if let Some(hours) = &self.daily_hours {
            chips.push(FilterChip {
                field: FilterField::DailyHours,
                label: format!("{hours} hours"),
            });
        }
        chips
    }

    fn clear_corporate_facets(&mut self) {
        self.location = None;
        self.company = None;
        self.position = None;
        self.employment_type = None;
    }

    fn clear_domestic_facets(&mut self) {
        self.work_type = None;
        self.hourly_wage_range = None;
        self.daily_hours = None;
    }
}
