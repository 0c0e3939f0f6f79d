//! Demo data for local development.

use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

const CORPORATE_EMPLOYER: Uuid = Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0001);
const DOMESTIC_EMPLOYER: Uuid = Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0002);
const SEEKER: Uuid = Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0003);

struct DemoJob {
    category: &'static str,
    location: &'static str,
    posted_by: Uuid,
    company_name: Option<&'static str>,
    position: Option<&'static str>,
    salary_range_min: Option<i32>,
    salary_range_max: Option<i32>,
    employment_type: Option<&'static str>,
    years_of_experience: Option<&'static str>,
    work_type: Option<&'static str>,
    daily_hours: Option<i16>,
    hourly_wage_min: Option<i32>,
    hourly_wage_max: Option<i32>,
}

const fn corporate(
    location: &'static str,
    company_name: &'static str,
    position: &'static str,
    salary_range_min: i32,
    salary_range_max: i32,
    employment_type: &'static str,
    years_of_experience: &'static str,
) -> DemoJob {
    DemoJob {
        category: "corporate",
        location,
        posted_by: CORPORATE_EMPLOYER,
        company_name: Some(company_name),
        position: Some(position),
        salary_range_min: Some(salary_range_min),
        salary_range_max: Some(salary_range_max),
        employment_type: Some(employment_type),
        years_of_experience: Some(years_of_experience),
        work_type: None,
        daily_hours: None,
        hourly_wage_min: None,
        hourly_wage_max: None,
    }
}

const fn domestic(
    location: &'static str,
    work_type: &'static str,
    daily_hours: i16,
    hourly_wage_min: i32,
    hourly_wage_max: i32,
) -> DemoJob {
    DemoJob {
        category: "domestic",
        location,
        posted_by: DOMESTIC_EMPLOYER,
        company_name: None,
        position: None,
        salary_range_min: None,
        salary_range_max: None,
        employment_type: None,
        years_of_experience: None,
        work_type: Some(work_type),
        daily_hours: Some(daily_hours),
        hourly_wage_min: Some(hourly_wage_min),
        hourly_wage_max: Some(hourly_wage_max),
    }
}

fn demo_jobs() -> Vec<DemoJob> {
    vec![
        corporate(
            "Bangalore, India",
            "TechNova Solutions",
            "backend_developer",
            800_000,
            1_200_000,
            "full_time",
            "2-5 years",
        ),
        corporate(
            "Pune, India",
            "BrightHire Labs",
            "frontend_developer",
            500_000,
            800_000,
            "full_time",
            "0-2 years",
        ),
        corporate(
            "Hyderabad, India",
            "TechNova Solutions",
            "data_scientist",
            1_200_000,
            1_800_000,
            "part_time",
            "5-8 years",
        ),
        domestic("Mumbai, India", "gardening", 3, 150, 250),
        domestic("Delhi, India", "cooking", 8, 350, 500),
        domestic("Bangalore, India", "elderly_care", 6, 300, 450),
    ]
}

/// Seed demo profiles and, on a fresh database, demo jobs plus an opening
/// message. Profiles are upserted every run; jobs are only inserted when the
/// table is empty so a reseed does not duplicate listings.
///
/// Returns the number of jobs inserted. Everything runs in one transaction;
/// a failure rolls back the whole batch.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_demo_data(pool: &PgPool) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;

    let demo_profiles: [(Uuid, &str, &str); 3] = [
        (CORPORATE_EMPLOYER, "priya.hr", "Priya Sharma"),
        (DOMESTIC_EMPLOYER, "ramesh.k", "Ramesh Kumar"),
        (SEEKER, "anil.j", "Anil Joshi"),
    ];

    for (id, username, full_name) in demo_profiles {
        sqlx::query(
            "INSERT INTO profiles (id, username, full_name, role) \
             VALUES ($1, $2, $3, 'user') \
             ON CONFLICT (id) DO UPDATE SET \
                 username = EXCLUDED.username, \
                 full_name = EXCLUDED.full_name, \
                 updated_at = NOW()",
        )
        .bind(id)
        .bind(username)
        .bind(full_name)
        .execute(&mut *tx)
        .await?;
    }

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        tx.commit().await?;
        return Ok(0);
    }

    let jobs = demo_jobs();
    let mut first_job_id: Option<Uuid> = None;
    for job in &jobs {
        let job_id: Uuid = sqlx::query_scalar(
            "INSERT INTO jobs \
               (category, location, posted_by, company_name, position, salary_range_min, \
                salary_range_max, employment_type, years_of_experience, work_type, daily_hours, \
                hourly_wage_min, hourly_wage_max) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING id",
        )
        .bind(job.category)
        .bind(job.location)
        .bind(job.posted_by)
        .bind(job.company_name)
        .bind(job.position)
        .bind(job.salary_range_min)
        .bind(job.salary_range_max)
        .bind(job.employment_type)
        .bind(job.years_of_experience)
        .bind(job.work_type)
        .bind(job.daily_hours)
        .bind(job.hourly_wage_min)
        .bind(job.hourly_wage_max)
        .fetch_one(&mut *tx)
        .await?;
        first_job_id.get_or_insert(job_id);
    }

    // One opening message so the conversation views have something to show.
    if let Some(job_id) = first_job_id {
        sqlx::query(
            "INSERT INTO messages (content, sender_id, receiver_id, job_id) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind("Interested in Backend Developer position at TechNova Solutions")
        .bind(SEEKER)
        .bind(CORPORATE_EMPLOYER)
        .bind(job_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(jobs.len())
}
