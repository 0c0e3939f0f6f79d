use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jobseek_core::{
    extract_facets, filter_jobs, EmploymentType, FilterChip, FilterSelection, JobCategory,
    JobDetails, JobRecord, NewJob, SalaryBand,
};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// Flat view of a job record for API consumers. Category-specific fields are
/// null for the other category; `employment_type` carries the display label.
#[derive(Debug, Serialize)]
pub(super) struct JobItem {
    id: Uuid,
    category: JobCategory,
    title: String,
    location: String,
    posted_by: Uuid,
    created_at: DateTime<Utc>,
    company_name: Option<String>,
    position: Option<String>,
    salary_range_min: Option<i32>,
    salary_range_max: Option<i32>,
    employment_type: Option<&'static str>,
    years_of_experience: Option<String>,
    work_type: Option<String>,
    daily_hours: Option<i16>,
    hourly_wage_min: Option<i32>,
    hourly_wage_max: Option<i32>,
}

impl JobItem {
    fn from_record(record: &JobRecord) -> Self {
        let mut item = JobItem {
            id: record.id,
            category: record.category(),
            title: record.title(),
            location: record.location.clone(),
            posted_by: record.posted_by,
            created_at: record.created_at,
            company_name: None,
            position: None,
            salary_range_min: None,
            salary_range_max: None,
            employment_type: None,
            years_of_experience: None,
            work_type: None,
            daily_hours: None,
            hourly_wage_min: None,
            hourly_wage_max: None,
        };
        match &record.details {
            JobDetails::Corporate(details) => {
                item.company_name = Some(details.company_name.clone());
                item.position = Some(details.position.clone());
                item.salary_range_min = Some(details.salary_range_min);
                item.salary_range_max = Some(details.salary_range_max);
                item.employment_type = Some(details.employment_type.label());
                item.years_of_experience = Some(details.years_of_experience.clone());
            }
            JobDetails::Domestic(details) => {
                item.work_type = Some(details.work_type.clone());
                item.daily_hours = Some(details.daily_hours);
                item.hourly_wage_min = Some(details.hourly_wage_min);
                item.hourly_wage_max = Some(details.hourly_wage_max);
            }
        }
        item
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ActiveFilterItem {
    field: &'static str,
    label: String,
}

impl From<FilterChip> for ActiveFilterItem {
    fn from(chip: FilterChip) -> Self {
        Self {
            field: chip.field.as_str(),
            label: chip.label,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct JobListData {
    items: Vec<JobItem>,
    total: usize,
    active_filters: Vec<ActiveFilterItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct PosterSummary {
    id: Uuid,
    username: Option<String>,
    full_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct JobDetailData {
    job: JobItem,
    poster: Option<PosterSummary>,
}

#[derive(Debug, Serialize)]
pub(super) struct FacetsData {
    locations: Vec<String>,
    companies: Vec<String>,
    positions: Vec<String>,
    employment_types: Vec<&'static str>,
    salary_bands: Vec<String>,
    experience_bands: Vec<String>,
    work_types: Vec<String>,
    daily_hours: Vec<String>,
    wage_bands: Vec<String>,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct JobsQuery {
    category: Option<String>,
    location: Option<String>,
    company: Option<String>,
    position: Option<String>,
    employment_type: Option<String>,
    work_type: Option<String>,
    hourly_wage_range: Option<String>,
    daily_hours: Option<String>,
    limit: Option<i64>,
}

impl JobsQuery {
    fn selection(&self, req_id: &str) -> Result<FilterSelection, ApiError> {
        Ok(FilterSelection {
            job_category: parse_category(req_id, self.category.as_deref())?,
            location: self.location.clone(),
            company: self.company.clone(),
            position: self.position.clone(),
            employment_type: self.employment_type.clone(),
            work_type: self.work_type.clone(),
            hourly_wage_range: self.hourly_wage_range.clone(),
            daily_hours: self.daily_hours.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct FacetsQuery {
    category: Option<String>,
}

fn parse_category(req_id: &str, raw: Option<&str>) -> Result<Option<JobCategory>, ApiError> {
    raw.map(|value| {
        value
            .parse::<JobCategory>()
            .map_err(|e| ApiError::new(req_id, "validation_error", e.to_string()))
    })
    .transpose()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Rows that fail the category shape are logged and dropped rather than
/// failing the whole listing.
fn records_from_rows(rows: Vec<jobseek_db::JobRow>) -> Vec<JobRecord> {
    rows.into_iter()
        .filter_map(|row| match row.into_record() {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed job row");
                None
            }
        })
        .collect()
}

fn merge_unique(mut base: Vec<String>, extra: &[String]) -> Vec<String> {
    for value in extra {
        if !base.contains(value) {
            base.push(value.clone());
        }
    }
    base
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs — list jobs, filtered by the query-string selection.
pub(super) async fn list_jobs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<JobsQuery>,
) -> Result<Json<ApiResponse<JobListData>>, ApiError> {
    let selection = query.selection(&req_id.0)?;

    let rows = jobseek_db::list_jobs(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    let records = records_from_rows(rows);

    let matched = filter_jobs(&records, &selection);
    let total = matched.len();
    let limit = normalize_limit(query.limit);
    let items = matched
        .into_iter()
        .take(limit)
        .map(JobItem::from_record)
        .collect();

    Ok(Json(ApiResponse {
        data: JobListData {
            items,
            total,
            active_filters: selection
                .chips()
                .into_iter()
                .map(ActiveFilterItem::from)
                .collect(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// POST /api/v1/jobs — validate and persist a submission.
pub(super) async fn create_job(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<NewJob>,
) -> Result<(StatusCode, Json<ApiResponse<JobItem>>), ApiError> {
    let rid = &req_id.0;

    body.validate()
        .map_err(|e| ApiError::new(rid, "validation_error", e.to_string()))?;
    state
        .catalog
        .check_submission(&body)
        .map_err(|e| ApiError::new(rid, "validation_error", e.to_string()))?;

    let row = jobseek_db::insert_job(&state.pool, &body)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;
    let record = row
        .into_record()
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: JobItem::from_record(&record),
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// GET /api/v1/jobs/:job_id — one job with a summary of its poster.
pub(super) async fn get_job(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ApiResponse<JobDetailData>>, ApiError> {
    let rid = &req_id.0;

    let row = jobseek_db::get_job(&state.pool, job_id)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?
        .ok_or_else(|| ApiError::new(rid, "not_found", format!("no job with id {job_id}")))?;
    let record = row
        .into_record()
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    let poster = jobseek_db::get_profile(&state.pool, record.posted_by)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?
        .map(|profile| PosterSummary {
            id: profile.id,
            username: profile.username,
            full_name: profile.full_name,
        });

    Ok(Json(ApiResponse {
        data: JobDetailData {
            job: JobItem::from_record(&record),
            poster,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/jobs/facets — filter options: values present in live records
/// merged with the static catalog lists.
pub(super) async fn list_facets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FacetsQuery>,
) -> Result<Json<ApiResponse<FacetsData>>, ApiError> {
    let category = parse_category(&req_id.0, query.category.as_deref())?;

    let rows = jobseek_db::list_jobs(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    let derived = extract_facets(&records_from_rows(rows));
    let catalog = state.catalog.as_ref();

    let mut data = FacetsData {
        locations: derived.locations,
        companies: derived.companies,
        positions: merge_unique(derived.positions, &catalog.positions),
        employment_types: vec![
            EmploymentType::FullTime.label(),
            EmploymentType::PartTime.label(),
        ],
        salary_bands: catalog.salary_bands.iter().map(SalaryBand::label).collect(),
        experience_bands: catalog.experience_bands.clone(),
        work_types: merge_unique(derived.work_types, &catalog.work_types),
        daily_hours: derived.daily_hours,
        wage_bands: catalog.wage_bands.clone(),
    };

    match category {
        Some(JobCategory::Corporate) => {
            data.work_types = Vec::new();
            data.daily_hours = Vec::new();
            data.wage_bands = Vec::new();
        }
        Some(JobCategory::Domestic) => {
            data.locations = Vec::new();
            data.companies = Vec::new();
            data.positions = Vec::new();
            data.employment_types = Vec::new();
            data.salary_bands = Vec::new();
            data.experience_bands = Vec::new();
        }
        None => {}
    }

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
