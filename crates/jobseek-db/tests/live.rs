//! Live integration tests for jobseek-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/jobseek-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use jobseek_core::{
    AppRole, CorporateDetails, DomesticDetails, EmploymentType, JobDetails, NewJob, SkillCategory,
};
use jobseek_db::{
    add_skill, conversation_exists, count_unread, delete_skill, get_job, get_profile, insert_job,
    insert_message, list_contacts, list_conversation, list_jobs, list_skills,
    mark_conversation_read, seed_demo_data, update_profile, upsert_profile, DbError, ProfileUpdate,
};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Insert a minimal profile row and return its id. Profile ids come from the
/// caller, so the helper generates one.
async fn insert_test_profile(pool: &sqlx::PgPool, username: &str, full_name: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO profiles (id, username, full_name) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(username)
        .bind(full_name)
        .execute(pool)
        .await
        .unwrap_or_else(|e| panic!("insert_test_profile failed for '{username}': {e}"));
    id
}

fn corporate_submission(posted_by: Uuid) -> NewJob {
    NewJob {
        location: "Bangalore, India".to_string(),
        posted_by,
        details: JobDetails::Corporate(CorporateDetails {
            company_name: "TechNova Solutions".to_string(),
            position: "backend_developer".to_string(),
            salary_range_min: 800_000,
            salary_range_max: 1_200_000,
            employment_type: EmploymentType::FullTime,
            years_of_experience: "2-5 years".to_string(),
        }),
    }
}

fn domestic_submission(posted_by: Uuid) -> NewJob {
    NewJob {
        location: "Mumbai, India".to_string(),
        posted_by,
        details: JobDetails::Domestic(DomesticDetails {
            work_type: "gardening".to_string(),
            daily_hours: 3,
            hourly_wage_min: 150,
            hourly_wage_max: 250,
        }),
    }
}

/// Push a job's `created_at` into the past so ordering tests are not at the
/// mercy of timestamp resolution.
async fn backdate_job(pool: &sqlx::PgPool, id: Uuid, hours: i32) {
    sqlx::query("UPDATE jobs SET created_at = created_at - ($2 || ' hours')::interval WHERE id = $1")
        .bind(id)
        .bind(hours.to_string())
        .execute(pool)
        .await
        .expect("backdate_job failed");
}

// ---------------------------------------------------------------------------
// Section 1: Job Postings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn insert_job_round_trips_a_corporate_posting(pool: sqlx::PgPool) {
    let employer = insert_test_profile(&pool, "employer", "Test Employer").await;

    let inserted = insert_job(&pool, &corporate_submission(employer))
        .await
        .expect("insert_job failed");
    assert_eq!(inserted.category, "corporate");
    assert_eq!(inserted.posted_by, employer);

    let fetched = get_job(&pool, inserted.id)
        .await
        .expect("get_job failed")
        .expect("job should exist");
    let record = fetched.into_record().expect("into_record failed");
    assert_eq!(record.location, "Bangalore, India");
    match record.details {
        JobDetails::Corporate(details) => {
            assert_eq!(details.company_name, "TechNova Solutions");
            assert_eq!(details.position, "backend_developer");
            assert_eq!(details.salary_range_min, 800_000);
            assert_eq!(details.salary_range_max, 1_200_000);
            assert_eq!(details.employment_type, EmploymentType::FullTime);
            assert_eq!(details.years_of_experience, "2-5 years");
        }
        JobDetails::Domestic(_) => panic!("expected a corporate record"),
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn insert_job_round_trips_a_domestic_posting(pool: sqlx::PgPool) {
    let employer = insert_test_profile(&pool, "household", "Test Household").await;

    let inserted = insert_job(&pool, &domestic_submission(employer))
        .await
        .expect("insert_job failed");
    assert_eq!(inserted.category, "domestic");
    assert!(inserted.company_name.is_none());

    let record = inserted.into_record().expect("into_record failed");
    match record.details {
        JobDetails::Domestic(details) => {
            assert_eq!(details.work_type, "gardening");
            assert_eq!(details.daily_hours, 3);
            assert_eq!(details.hourly_wage_min, 150);
            assert_eq!(details.hourly_wage_max, 250);
        }
        JobDetails::Corporate(_) => panic!("expected a domestic record"),
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_jobs_returns_newest_first(pool: sqlx::PgPool) {
    let employer = insert_test_profile(&pool, "employer", "Test Employer").await;

    let older = insert_job(&pool, &corporate_submission(employer))
        .await
        .expect("insert_job failed");
    backdate_job(&pool, older.id, 1).await;
    let newer = insert_job(&pool, &domestic_submission(employer))
        .await
        .expect("insert_job failed");

    let rows = list_jobs(&pool).await.expect("list_jobs failed");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, newer.id);
    assert_eq!(rows[1].id, older.id);
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_job_returns_none_for_unknown_id(pool: sqlx::PgPool) {
    let fetched = get_job(&pool, Uuid::new_v4()).await.expect("get_job failed");
    assert!(fetched.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn corporate_posting_without_company_violates_the_pairing_check(pool: sqlx::PgPool) {
    let employer = insert_test_profile(&pool, "employer", "Test Employer").await;

    let result = sqlx::query(
        "INSERT INTO jobs (category, location, posted_by, position, salary_range_min, \
             salary_range_max, employment_type, years_of_experience) \
         VALUES ('corporate', 'Bangalore, India', $1, 'backend_developer', 1, 2, \
             'full_time', '0-2 years')",
    )
    .bind(employer)
    .execute(&pool)
    .await;

    assert!(result.is_err(), "insert without company_name should fail");
}

#[sqlx::test(migrations = "../../migrations")]
async fn domestic_posting_with_zero_hours_violates_the_hours_check(pool: sqlx::PgPool) {
    let employer = insert_test_profile(&pool, "household", "Test Household").await;

    let result = sqlx::query(
        "INSERT INTO jobs (category, location, posted_by, work_type, daily_hours, \
             hourly_wage_min, hourly_wage_max) \
         VALUES ('domestic', 'Mumbai, India', $1, 'cooking', 0, 100, 200)",
    )
    .bind(employer)
    .execute(&pool)
    .await;

    assert!(result.is_err(), "insert with zero daily_hours should fail");
}

// ---------------------------------------------------------------------------
// Section 2: Conversations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn conversation_round_trips_in_both_directions(pool: sqlx::PgPool) {
    let seeker = insert_test_profile(&pool, "seeker", "Test Seeker").await;
    let employer = insert_test_profile(&pool, "employer", "Test Employer").await;
    let job = insert_job(&pool, &corporate_submission(employer))
        .await
        .expect("insert_job failed");

    let before = conversation_exists(&pool, seeker, employer)
        .await
        .expect("conversation_exists failed");
    assert!(!before, "no messages yet");

    insert_message(&pool, seeker, employer, "Interested in this role", Some(job.id))
        .await
        .expect("insert_message failed");
    insert_message(&pool, employer, seeker, "Thanks, let's talk", None)
        .await
        .expect("insert_message failed");

    // The existence check is direction-agnostic.
    for (a, b) in [(seeker, employer), (employer, seeker)] {
        let exists = conversation_exists(&pool, a, b)
            .await
            .expect("conversation_exists failed");
        assert!(exists);
    }

    let thread = list_conversation(&pool, seeker, employer)
        .await
        .expect("list_conversation failed");
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].content, "Interested in this role");
    assert_eq!(thread[0].job_id, Some(job.id));
    assert_eq!(thread[1].sender_id, employer);
    assert!(thread[1].job_id.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn mark_conversation_read_only_touches_the_readers_side(pool: sqlx::PgPool) {
    let seeker = insert_test_profile(&pool, "seeker", "Test Seeker").await;
    let employer = insert_test_profile(&pool, "employer", "Test Employer").await;

    insert_message(&pool, seeker, employer, "First", None)
        .await
        .expect("insert_message failed");
    insert_message(&pool, seeker, employer, "Second", None)
        .await
        .expect("insert_message failed");
    insert_message(&pool, employer, seeker, "Reply", None)
        .await
        .expect("insert_message failed");

    let updated = mark_conversation_read(&pool, employer, seeker)
        .await
        .expect("mark_conversation_read failed");
    assert_eq!(updated, 2);

    let employer_unread = count_unread(&pool, employer).await.expect("count_unread failed");
    assert_eq!(employer_unread, 0);

    // The seeker's inbound reply stays unread.
    let seeker_unread = count_unread(&pool, seeker).await.expect("count_unread failed");
    assert_eq!(seeker_unread, 1);

    let again = mark_conversation_read(&pool, employer, seeker)
        .await
        .expect("mark_conversation_read failed");
    assert_eq!(again, 0, "already-read messages are not updated twice");
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_contacts_orders_by_latest_traffic_and_carries_job_context(pool: sqlx::PgPool) {
    let seeker = insert_test_profile(&pool, "seeker", "Test Seeker").await;
    let corporate = insert_test_profile(&pool, "corp", "Priya Sharma").await;
    let household = insert_test_profile(&pool, "home", "Ramesh Kumar").await;

    let job = insert_job(&pool, &corporate_submission(corporate))
        .await
        .expect("insert_job failed");

    let first = insert_message(&pool, seeker, corporate, "Interested", Some(job.id))
        .await
        .expect("insert_message failed");
    sqlx::query("UPDATE messages SET created_at = created_at - interval '1 hour' WHERE id = $1")
        .bind(first.id)
        .execute(&pool)
        .await
        .expect("backdating message failed");
    insert_message(&pool, household, seeker, "Are you free this week?", None)
        .await
        .expect("insert_message failed");

    let contacts = list_contacts(&pool, seeker).await.expect("list_contacts failed");
    assert_eq!(contacts.len(), 2);

    // Freshest conversation first, regardless of who sent the last message.
    assert_eq!(contacts[0].contact_id, household);
    assert_eq!(contacts[0].full_name.as_deref(), Some("Ramesh Kumar"));
    assert!(contacts[0].job_id.is_none());

    assert_eq!(contacts[1].contact_id, corporate);
    assert_eq!(contacts[1].job_id, Some(job.id));
    assert_eq!(contacts[1].position.as_deref(), Some("backend_developer"));
    assert_eq!(contacts[1].company_name.as_deref(), Some("TechNova Solutions"));
    assert!(contacts[1].work_type.is_none());
}

// ---------------------------------------------------------------------------
// Section 3: Profiles and Skills
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_profile_creates_then_refreshes(pool: sqlx::PgPool) {
    let id = Uuid::new_v4();

    let created = upsert_profile(&pool, id, Some("anil.j"), Some("Anil Joshi"), AppRole::User)
        .await
        .expect("upsert_profile failed");
    assert_eq!(created.username.as_deref(), Some("anil.j"));
    assert_eq!(created.role, "user");

    // A second upsert with partial data keeps what it does not supply.
    let refreshed = upsert_profile(&pool, id, None, Some("Anil K. Joshi"), AppRole::User)
        .await
        .expect("upsert_profile failed");
    assert_eq!(refreshed.username.as_deref(), Some("anil.j"));
    assert_eq!(refreshed.full_name.as_deref(), Some("Anil K. Joshi"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
        .fetch_one(&pool)
        .await
        .expect("count failed");
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_profile_overlays_only_supplied_fields(pool: sqlx::PgPool) {
    let id = insert_test_profile(&pool, "seeker", "Test Seeker").await;

    let update = ProfileUpdate {
        mobile_number: Some("+91 98765 43210".to_string()),
        ..ProfileUpdate::default()
    };
    let updated = update_profile(&pool, id, &update)
        .await
        .expect("update_profile failed");

    assert_eq!(updated.username.as_deref(), Some("seeker"));
    assert_eq!(updated.full_name.as_deref(), Some("Test Seeker"));
    assert_eq!(updated.mobile_number.as_deref(), Some("+91 98765 43210"));

    let fetched = get_profile(&pool, id)
        .await
        .expect("get_profile failed")
        .expect("profile should exist");
    assert_eq!(fetched.mobile_number.as_deref(), Some("+91 98765 43210"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_profile_for_unknown_id_is_not_found(pool: sqlx::PgPool) {
    let err = update_profile(&pool, Uuid::new_v4(), &ProfileUpdate::default())
        .await
        .expect_err("updating a missing profile should fail");
    assert!(matches!(err, DbError::NotFound), "got: {err:?}");
}

#[sqlx::test(migrations = "../../migrations")]
async fn skills_are_scoped_to_their_owner(pool: sqlx::PgPool) {
    let owner = insert_test_profile(&pool, "owner", "Skill Owner").await;
    let other = insert_test_profile(&pool, "other", "Someone Else").await;

    let rust = add_skill(&pool, owner, "Rust", Some(SkillCategory::Technical))
        .await
        .expect("add_skill failed");
    add_skill(&pool, owner, "Hindi", Some(SkillCategory::Language))
        .await
        .expect("add_skill failed");
    add_skill(&pool, other, "Cooking", None)
        .await
        .expect("add_skill failed");

    let skills = list_skills(&pool, owner).await.expect("list_skills failed");
    assert_eq!(skills.len(), 2);
    assert_eq!(skills[0].name, "Rust");
    assert_eq!(skills[0].category.as_deref(), Some("technical"));
    assert_eq!(skills[1].name, "Hindi");

    // Deleting through the wrong owner touches nothing.
    let denied = delete_skill(&pool, other, rust.id)
        .await
        .expect("delete_skill failed");
    assert_eq!(denied, 0);

    let deleted = delete_skill(&pool, owner, rust.id)
        .await
        .expect("delete_skill failed");
    assert_eq!(deleted, 1);

    let remaining = list_skills(&pool, owner).await.expect("list_skills failed");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Hindi");
}

// ---------------------------------------------------------------------------
// Section 4: Demo Seed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn seed_demo_data_populates_a_fresh_database_once(pool: sqlx::PgPool) {
    let inserted = seed_demo_data(&pool).await.expect("seed_demo_data failed");
    assert_eq!(inserted, 6);

    let jobs = list_jobs(&pool).await.expect("list_jobs failed");
    assert_eq!(jobs.len(), 6);
    for row in jobs {
        row.into_record().expect("seeded rows must convert cleanly");
    }

    let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
        .fetch_one(&pool)
        .await
        .expect("count failed");
    assert_eq!(profiles, 3);

    let messages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
        .fetch_one(&pool)
        .await
        .expect("count failed");
    assert_eq!(messages, 1);

    // Reseeding is a no-op for jobs.
    let again = seed_demo_data(&pool).await.expect("seed_demo_data failed");
    assert_eq!(again, 0);
    let jobs_after: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(&pool)
        .await
        .expect("count failed");
    assert_eq!(jobs_after, 6);
}
