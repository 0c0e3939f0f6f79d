//! The job filter engine.
//!
//! Pure and total: no selection, however odd, panics or errors. Records are
//! kept or dropped; malformed numeric text on either side of a comparison
//! drops the record from that check instead of aborting the pass.

use crate::jobs::{CorporateDetails, DomesticDetails, JobDetails, JobRecord};
use crate::selection::FilterSelection;
use crate::text;
use crate::wage::WageRange;

/// Returns the records matching every active facet, preserving input order.
///
/// A record is first held against the selected category, then against the
/// facets of its own category only; facets of the other category do not
/// apply to it. `None` slots never filter.
#[must_use]
pub fn filter_jobs<'a>(jobs: &'a [JobRecord], selection: &FilterSelection) -> Vec<&'a JobRecord> {
    jobs.iter()
        .filter(|job| matches_selection(job, selection))
        .collect()
}

fn matches_selection(job: &JobRecord, selection: &FilterSelection) -> bool {
    if let Some(category) = selection.job_category {
        if job.category() != category {
            return false;
        }
    }
    match &job.details {
        JobDetails::Corporate(details) => corporate_matches(&job.location, details, selection),
        JobDetails::Domestic(details) => domestic_matches(details, selection),
    }
}

fn corporate_matches(
    location: &str,
    details: &CorporateDetails,
    selection: &FilterSelection,
) -> bool {
    if let Some(wanted) = &selection.location {
        if !text::contains_normalized(location, wanted) {
            return false;
        }
    }
    if let Some(wanted) = &selection.company {
        if !text::contains_normalized(&details.company_name, wanted) {
            return false;
        }
    }
    if let Some(wanted) = &selection.position {
        if !text::contains_normalized(&details.position, wanted) {
            return false;
        }
    }
    if let Some(wanted) = &selection.employment_type {
        // The record stores `full_time` while option lists serve `Full Time`;
        // accept a selection phrased in either form.
        let matches_label = text::contains_normalized(details.employment_type.label(), wanted);
        let matches_stored = text::contains_normalized(details.employment_type.as_str(), wanted);
        if !matches_label && !matches_stored {
            return false;
        }
    }
    true
}

fn domestic_matches(details: &DomesticDetails, selection: &FilterSelection) -> bool {
    if let Some(wanted) = &selection.work_type {
        if !text::contains_normalized(&details.work_type, wanted) {
            return false;
        }
    }
    if let Some(token) = &selection.hourly_wage_range {
        let in_band = WageRange::parse(token)
            .is_some_and(|range| range.contains(i64::from(details.hourly_wage_min)));
        if !in_band {
            return false;
        }
    }
    if let Some(wanted) = &selection.daily_hours {
        match wanted.trim().parse::<i64>() {
            Ok(hours) if hours == i64::from(details.daily_hours) => {}
            _ => return false,
        }
    }
    true
}
