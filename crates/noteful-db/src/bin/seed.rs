//! noteful-seed: load the embedded fixture folders and notes into a database.
//!
//! Existing folders and notes are deleted first.

use clap::Parser;
use noteful_core::logging::ERROR_MSG;
use noteful_db::{Database, SeedData};
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "noteful-seed")]
#[command(author, version, about = "Reset a noteful database to the seed fixtures")]
struct Cli {
    /// Database to seed
    #[arg(long, env = "DATABASE_URL", default_value = "postgres://localhost/noteful")]
    database_url: String,

    /// Print what would be written without touching the database
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "noteful_db=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!({ ERROR_MSG } = %e, "Seeding failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.dry_run {
        let data = SeedData::embedded()?;
        println!(
            "Would seed {} folders and {} notes",
            data.folders.len(),
            data.notes.len()
        );
        return Ok(());
    }

    let db = Database::connect(&cli.database_url).await?;
    db.migrate().await?;
    let summary = noteful_db::seed(db.pool()).await?;
    db.close().await;

    println!(
        "Seeded {} folders and {} notes",
        summary.folders, summary.notes
    );
    Ok(())
}
