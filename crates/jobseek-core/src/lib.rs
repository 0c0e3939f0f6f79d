//! Domain types and the filtering/faceting core for the jobseek job board.
//!
//! Everything here is synchronous and I/O-free; persistence lives in
//! `jobseek-db` and the HTTP surface in `jobseek-server`.

use thiserror::Error;

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod facets;
pub mod filter;
pub mod jobs;
pub mod profiles;
pub mod selection;
pub mod text;
pub mod wage;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, CatalogFile, SalaryBand};
pub use config::{load_app_config, load_app_config_from_env};
pub use facets::{extract_facets, FacetSets};
pub use filter::filter_jobs;
pub use jobs::{
    CorporateDetails, DomesticDetails, EmploymentType, JobCategory, JobDetails, JobError,
    JobRecord, NewJob,
};
pub use profiles::{AppRole, SkillCategory};
pub use selection::{FilterChip, FilterField, FilterSelection};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read catalog file {path}: {source}")]
    CatalogIo {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse catalog file: {0}")]
    CatalogParse(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}
