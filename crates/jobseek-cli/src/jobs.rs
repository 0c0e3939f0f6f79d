//! Job listing command handlers for the CLI.
//!
//! These are called from `main` after the database pool and config are
//! established. `list` and `facets` are read-only; the `post-*` subcommands
//! validate against the core rules and the option catalog before writing.

use anyhow::Context;
use clap::Subcommand;
use uuid::Uuid;

use jobseek_core::{
    extract_facets, filter_jobs, CatalogFile, CorporateDetails, DomesticDetails, EmploymentType,
    FilterSelection, JobDetails, JobRecord, NewJob, SalaryBand,
};

/// Sub-commands available under `jobs`.
#[derive(Debug, Subcommand)]
pub enum JobsCommands {
    /// List jobs, newest first, narrowed by the given facets
    List {
        /// Job category: corporate or domestic
        #[arg(long)]
        category: Option<String>,
        /// Location facet (case-insensitive substring)
        #[arg(long)]
        location: Option<String>,
        /// Company facet (corporate listings)
        #[arg(long)]
        company: Option<String>,
        /// Position facet (corporate listings)
        #[arg(long)]
        position: Option<String>,
        /// Employment type, e.g. "Full Time" or full_time
        #[arg(long)]
        employment_type: Option<String>,
        /// Work type facet (domestic listings)
        #[arg(long)]
        work_type: Option<String>,
        /// Hourly wage band, e.g. "200-400" or "1000+"
        #[arg(long)]
        wage_range: Option<String>,
        /// Exact hours per day (domestic listings)
        #[arg(long)]
        daily_hours: Option<String>,
        /// Maximum number of rows to print
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// Show filter options: values in live listings plus the catalog lists
    Facets,
    /// Post a corporate listing
    PostCorporate {
        /// Listing location, e.g. "Bangalore, India"
        #[arg(long)]
        location: String,
        /// Profile id of the posting employer
        #[arg(long)]
        posted_by: String,
        #[arg(long)]
        company: String,
        /// Position in catalog form, e.g. backend_developer
        #[arg(long)]
        position: String,
        /// Annual salary band minimum in rupees
        #[arg(long)]
        salary_min: i32,
        /// Annual salary band maximum in rupees
        #[arg(long)]
        salary_max: i32,
        /// full_time or part_time
        #[arg(long, default_value = "full_time")]
        employment_type: String,
        /// Experience band, e.g. "2-5 years"
        #[arg(long)]
        experience: String,
    },
    /// Post a domestic listing
    PostDomestic {
        /// Listing location, e.g. "Mumbai, India"
        #[arg(long)]
        location: String,
        /// Profile id of the posting household
        #[arg(long)]
        posted_by: String,
        /// Work type in catalog form, e.g. elderly_care
        #[arg(long)]
        work_type: String,
        /// Working hours per day (1-24)
        #[arg(long)]
        daily_hours: i16,
        /// Hourly wage minimum in rupees
        #[arg(long)]
        wage_min: i32,
        /// Hourly wage maximum in rupees
        #[arg(long)]
        wage_max: i32,
    },
}

pub(crate) async fn run(
    pool: &sqlx::PgPool,
    catalog: &CatalogFile,
    command: JobsCommands,
) -> anyhow::Result<()> {
    match command {
        JobsCommands::List {
            category,
            location,
            company,
            position,
            employment_type,
            work_type,
            wage_range,
            daily_hours,
            limit,
        } => {
            let selection = build_selection(
                category,
                location,
                company,
                position,
                employment_type,
                work_type,
                wage_range,
                daily_hours,
            )?;
            run_jobs_list(pool, &selection, limit).await
        }
        JobsCommands::Facets => run_jobs_facets(pool, catalog).await,
        JobsCommands::PostCorporate {
            location,
            posted_by,
            company,
            position,
            salary_min,
            salary_max,
            employment_type,
            experience,
        } => {
            let job = NewJob {
                location,
                posted_by: parse_profile_id(&posted_by)?,
                details: JobDetails::Corporate(CorporateDetails {
                    company_name: company,
                    position,
                    salary_range_min: salary_min,
                    salary_range_max: salary_max,
                    employment_type: employment_type
                        .parse::<EmploymentType>()
                        .context("`--employment-type` must be full_time or part_time")?,
                    years_of_experience: experience,
                }),
            };
            run_jobs_post(pool, catalog, &job).await
        }
        JobsCommands::PostDomestic {
            location,
            posted_by,
            work_type,
            daily_hours,
            wage_min,
            wage_max,
        } => {
            let job = NewJob {
                location,
                posted_by: parse_profile_id(&posted_by)?,
                details: JobDetails::Domestic(DomesticDetails {
                    work_type,
                    daily_hours,
                    hourly_wage_min: wage_min,
                    hourly_wage_max: wage_max,
                }),
            };
            run_jobs_post(pool, catalog, &job).await
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn build_selection(
    category: Option<String>,
    location: Option<String>,
    company: Option<String>,
    position: Option<String>,
    employment_type: Option<String>,
    work_type: Option<String>,
    wage_range: Option<String>,
    daily_hours: Option<String>,
) -> anyhow::Result<FilterSelection> {
    let job_category = category
        .map(|raw| {
            raw.parse()
                .context("`--category` must be corporate or domestic")
        })
        .transpose()?;
    Ok(FilterSelection {
        job_category,
        location,
        company,
        position,
        employment_type,
        work_type,
        hourly_wage_range: wage_range,
        daily_hours,
    })
}

fn parse_profile_id(raw: &str) -> anyhow::Result<Uuid> {
    raw.parse()
        .with_context(|| format!("`--posted-by` must be a profile UUID, got '{raw}'"))
}

/// Drop rows whose stored shape no longer matches their category instead of
/// aborting the whole listing.
fn usable_records(rows: Vec<jobseek_db::JobRow>) -> Vec<JobRecord> {
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

/// List jobs as a table, applying the current filter selection.
///
/// # Errors
///
/// Returns an error if the database query fails.
async fn run_jobs_list(
    pool: &sqlx::PgPool,
    selection: &FilterSelection,
    limit: usize,
) -> anyhow::Result<()> {
    let rows = jobseek_db::list_jobs(pool).await?;
    let records = usable_records(rows);
    let matched = filter_jobs(&records, selection);

    if matched.is_empty() {
        if selection.has_active_filters() {
            println!("no jobs match the active filters");
        } else {
            println!("no jobs posted yet; run `jobseek-cli seed` first");
        }
        return Ok(());
    }

    if selection.has_active_filters() {
        let active: Vec<String> = selection
            .chips()
            .into_iter()
            .map(|chip| format!("{}={}", chip.field.as_str(), chip.label))
            .collect();
        println!("filters: {}", active.join(", "));
        println!();
    }

    let header = format!(
        "{:<11}{:<24}{:<22}{:<12}DETAILS",
        "CATEGORY", "TITLE", "LOCATION", "POSTED"
    );
    println!("{header}");
    for record in matched.iter().take(limit) {
        println!(
            "{:<11}{:<24}{:<22}{:<12}{}",
            record.category().as_str(),
            clip(&record.title(), 21),
            clip(&record.location, 19),
            record.created_at.format("%Y-%m-%d"),
            detail_line(record),
        );
    }

    if matched.len() > limit {
        println!();
        println!(
            "showing {limit} of {} matching jobs; raise --limit to see more",
            matched.len()
        );
    }

    Ok(())
}

/// Show facet values from live listings alongside the catalog option lists.
///
/// # Errors
///
/// Returns an error if the database query fails.
async fn run_jobs_facets(pool: &sqlx::PgPool, catalog: &CatalogFile) -> anyhow::Result<()> {
    let rows = jobseek_db::list_jobs(pool).await?;
    let facets = extract_facets(&usable_records(rows));

    print_derived("LOCATIONS", &facets.locations);
    print_derived("COMPANIES", &facets.companies);
    print_derived("POSITIONS", &facets.positions);
    print_derived("WORK TYPES", &facets.work_types);
    print_derived("DAILY HOURS", &facets.daily_hours);

    println!("EMPLOYMENT TYPES (catalog)");
    for employment_type in [EmploymentType::FullTime, EmploymentType::PartTime] {
        println!("  {}", employment_type.label());
    }
    println!();

    println!("WAGE BANDS (catalog)");
    for token in &catalog.wage_bands {
        println!("  {token}");
    }
    println!();

    println!("SALARY BANDS (catalog)");
    for band in &catalog.salary_bands {
        println!("  {}", band.label());
    }
    println!();

    println!("EXPERIENCE BANDS (catalog)");
    for band in &catalog.experience_bands {
        println!("  {band}");
    }

    Ok(())
}

/// Validate and persist a listing, then print what was stored.
///
/// # Errors
///
/// Returns an error if validation fails or the insert fails.
async fn run_jobs_post(
    pool: &sqlx::PgPool,
    catalog: &CatalogFile,
    job: &NewJob,
) -> anyhow::Result<()> {
    job.validate()?;
    catalog.check_submission(job)?;

    let row = jobseek_db::insert_job(pool, job).await?;
    let record = row.into_record()?;

    println!(
        "posted {} listing {}",
        record.category().as_str(),
        record.id
    );
    println!("  {} \u{2014} {}", record.title(), record.location);
    Ok(())
}

fn print_derived(heading: &str, values: &[String]) {
    println!("{heading} (from live listings)");
    if values.is_empty() {
        println!("  (none yet)");
    } else {
        for value in values {
            println!("  {value}");
        }
    }
    println!();
}

fn clip(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        format!("{}...", value.chars().take(max).collect::<String>())
    } else {
        value.to_string()
    }
}

fn detail_line(record: &JobRecord) -> String {
    match &record.details {
        JobDetails::Corporate(details) => format!(
            "{} | {} | {} | {}",
            details.company_name,
            details.employment_type.label(),
            SalaryBand {
                min: details.salary_range_min,
                max: details.salary_range_max,
            }
            .label(),
            details.years_of_experience,
        ),
        JobDetails::Domestic(details) => format!(
            "{} h/day | \u{20b9}{}-\u{20b9}{} per hour",
            details.daily_hours, details.hourly_wage_min, details.hourly_wage_max
        ),
    }
}
