mod jobs;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "jobseek-cli")]
#[command(about = "Jobseek command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse, inspect, and post job listings
    Jobs {
        #[command(subcommand)]
        command: jobs::JobsCommands,
    },
    /// Seed demo profiles and listings into an empty database
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = jobseek_core::load_app_config()?;
    let pool_config = jobseek_db::PoolConfig::from_app_config(&config);
    let pool = jobseek_db::connect_pool(&config.database_url, pool_config).await?;
    jobseek_db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Jobs { command } => {
            let catalog = jobseek_core::load_catalog(&config.catalog_path)?;
            jobs::run(&pool, &catalog, command).await
        }
        Commands::Seed => {
            let inserted = jobseek_db::seed_demo_data(&pool).await?;
            if inserted == 0 {
                println!("demo profiles refreshed; jobs already present, nothing inserted");
            } else {
                println!("seeded {inserted} demo listings and their employer profiles");
            }
            Ok(())
        }
    }
}
