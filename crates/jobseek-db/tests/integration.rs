//! Offline unit tests for jobseek-db pool configuration and row types.
//! These tests do not require a live database connection.

use chrono::Utc;
use jobseek_core::{AppConfig, Environment, JobDetails};
use jobseek_db::{DbError, JobRow, PoolConfig};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use uuid::Uuid;

fn corporate_row() -> JobRow {
    JobRow {
        id: Uuid::new_v4(),
        category: "corporate".to_string(),
        location: "Bangalore, India".to_string(),
        posted_by: Uuid::new_v4(),
        company_name: Some("TechNova Solutions".to_string()),
        position: Some("backend_developer".to_string()),
        salary_range_min: Some(800_000),
        salary_range_max: Some(1_200_000),
        employment_type: Some("full_time".to_string()),
        years_of_experience: Some("2-5 years".to_string()),
        work_type: None,
        daily_hours: None,
        hourly_wage_min: None,
        hourly_wage_max: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn domestic_row() -> JobRow {
    JobRow {
        id: Uuid::new_v4(),
        category: "domestic".to_string(),
        location: "Mumbai, India".to_string(),
        posted_by: Uuid::new_v4(),
        company_name: None,
        position: None,
        salary_range_min: None,
        salary_range_max: None,
        employment_type: None,
        years_of_experience: None,
        work_type: Some("gardening".to_string()),
        daily_hours: Some(3),
        hourly_wage_min: Some(150),
        hourly_wage_max: Some(250),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        catalog_path: PathBuf::from("./config/catalog.yaml"),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn corporate_row_converts_to_tagged_record() {
    let row = corporate_row();
    let id = row.id;

    let record = row.into_record().expect("conversion failed");
    assert_eq!(record.id, id);
    assert_eq!(record.location, "Bangalore, India");
    match record.details {
        JobDetails::Corporate(details) => {
            assert_eq!(details.company_name, "TechNova Solutions");
            assert_eq!(details.position, "backend_developer");
            assert_eq!(details.salary_range_min, 800_000);
            assert_eq!(details.employment_type.as_str(), "full_time");
        }
        JobDetails::Domestic(_) => panic!("expected a corporate record"),
    }
}

#[test]
fn domestic_row_converts_to_tagged_record() {
    let record = domestic_row().into_record().expect("conversion failed");
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

#[test]
fn unknown_category_is_a_malformed_row() {
    let mut row = corporate_row();
    row.category = "freelance".to_string();
    let id = row.id;

    let err = row.into_record().expect_err("conversion should fail");
    match err {
        DbError::MalformedRow {
            id: reported,
            reason,
        } => {
            assert_eq!(reported, id);
            assert!(reason.contains("freelance"), "reason: {reason}");
        }
        other => panic!("expected MalformedRow, got {other:?}"),
    }
}

#[test]
fn missing_variant_column_is_a_malformed_row() {
    let mut row = corporate_row();
    row.company_name = None;

    let err = row.into_record().expect_err("conversion should fail");
    assert!(
        matches!(err, DbError::MalformedRow { ref reason, .. } if reason.contains("company_name")),
        "got: {err:?}"
    );
}

#[test]
fn unparseable_employment_type_is_a_malformed_row() {
    let mut row = corporate_row();
    row.employment_type = Some("contract".to_string());

    let err = row.into_record().expect_err("conversion should fail");
    assert!(
        matches!(err, DbError::MalformedRow { ref reason, .. } if reason.contains("contract")),
        "got: {err:?}"
    );
}
