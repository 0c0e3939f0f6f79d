//! Database operations for the `jobs` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use jobseek_core::{CorporateDetails, DomesticDetails, JobDetails, JobRecord, NewJob};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `jobs` table. Category-specific columns are nullable in
/// storage; [`JobRow::into_record`] re-establishes the tagged shape.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub category: String,
    pub location: String,
    pub posted_by: Uuid,
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub salary_range_min: Option<i32>,
    pub salary_range_max: Option<i32>,
    pub employment_type: Option<String>,
    pub years_of_experience: Option<String>,
    pub work_type: Option<String>,
    pub daily_hours: Option<i16>,
    pub hourly_wage_min: Option<i32>,
    pub hourly_wage_max: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRow {
    /// Converts the flat row into the tagged record the filter core consumes.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::MalformedRow`] if the category is unknown or a
    /// column required by the row's category is null.
    pub fn into_record(self) -> Result<JobRecord, DbError> {
        let id = self.id;
        let details = match self.category.as_str() {
            "corporate" => JobDetails::Corporate(CorporateDetails {
                company_name: require(id, "company_name", self.company_name)?,
                position: require(id, "position", self.position)?,
                salary_range_min: require(id, "salary_range_min", self.salary_range_min)?,
                salary_range_max: require(id, "salary_range_max", self.salary_range_max)?,
                employment_type: require(id, "employment_type", self.employment_type)?
                    .parse()
                    .map_err(|e: jobseek_core::JobError| DbError::MalformedRow {
                        id,
                        reason: e.to_string(),
                    })?,
                years_of_experience: require(
                    id,
                    "years_of_experience",
                    self.years_of_experience,
                )?,
            }),
            "domestic" => JobDetails::Domestic(DomesticDetails {
                work_type: require(id, "work_type", self.work_type)?,
                daily_hours: require(id, "daily_hours", self.daily_hours)?,
                hourly_wage_min: require(id, "hourly_wage_min", self.hourly_wage_min)?,
                hourly_wage_max: require(id, "hourly_wage_max", self.hourly_wage_max)?,
            }),
            other => {
                return Err(DbError::MalformedRow {
                    id,
                    reason: format!("unknown category '{other}'"),
                })
            }
        };
        Ok(JobRecord {
            id,
            location: self.location,
            posted_by: self.posted_by,
            created_at: self.created_at,
            details,
        })
    }
}

fn require<T>(id: Uuid, column: &str, value: Option<T>) -> Result<T, DbError> {
    value.ok_or_else(|| DbError::MalformedRow {
        id,
        reason: format!("{column} is null for its category"),
    })
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Inserts a validated submission and returns the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails (including check constraint
/// violations).
pub async fn insert_job(pool: &PgPool, job: &NewJob) -> Result<JobRow, DbError> {
    let mut company_name = None;
    let mut position = None;
    let mut salary_range_min = None;
    let mut salary_range_max = None;
    let mut employment_type = None;
    let mut years_of_experience = None;
    let mut work_type = None;
    let mut daily_hours = None;
    let mut hourly_wage_min = None;
    let mut hourly_wage_max = None;

    match &job.details {
        JobDetails::Corporate(details) => {
            company_name = Some(details.company_name.as_str());
            position = Some(details.position.as_str());
            salary_range_min = Some(details.salary_range_min);
            salary_range_max = Some(details.salary_range_max);
            employment_type = Some(details.employment_type.as_str());
            years_of_experience = Some(details.years_of_experience.as_str());
        }
        JobDetails::Domestic(details) => {
            work_type = Some(details.work_type.as_str());
            daily_hours = Some(details.daily_hours);
            hourly_wage_min = Some(details.hourly_wage_min);
            hourly_wage_max = Some(details.hourly_wage_max);
        }
    }

    let row = sqlx::query_as::<_, JobRow>(
        "INSERT INTO jobs \
           (category, location, posted_by, company_name, position, salary_range_min, \
            salary_range_max, employment_type, years_of_experience, work_type, daily_hours, \
            hourly_wage_min, hourly_wage_max) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
         RETURNING id, category, location, posted_by, company_name, position, salary_range_min, \
                   salary_range_max, employment_type, years_of_experience, work_type, daily_hours, \
                   hourly_wage_min, hourly_wage_max, created_at, updated_at",
    )
    .bind(job.details.category().as_str())
    .bind(&job.location)
    .bind(job.posted_by)
    .bind(company_name)
    .bind(position)
    .bind(salary_range_min)
    .bind(salary_range_max)
    .bind(employment_type)
    .bind(years_of_experience)
    .bind(work_type)
    .bind(daily_hours)
    .bind(hourly_wage_min)
    .bind(hourly_wage_max)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Returns all jobs, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_jobs(pool: &PgPool) -> Result<Vec<JobRow>, DbError> {
    let rows = sqlx::query_as::<_, JobRow>(
        "SELECT id, category, location, posted_by, company_name, position, salary_range_min, \
                salary_range_max, employment_type, years_of_experience, work_type, daily_hours, \
                hourly_wage_min, hourly_wage_max, created_at, updated_at \
         FROM jobs \
         ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single job by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_job(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>, DbError> {
    let row = sqlx::query_as::<_, JobRow>(
        "SELECT id, category, location, posted_by, company_name, position, salary_range_min, \
                salary_range_max, employment_type, years_of_experience, work_type, daily_hours, \
                hourly_wage_min, hourly_wage_max, created_at, updated_at \
         FROM jobs \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
