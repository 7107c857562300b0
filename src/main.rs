use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use ai_secretary::config::AppConfig;
use ai_secretary::db::{Database, EnsureOutcome};
use ai_secretary::llm::MockLlm;
use ai_secretary::logging;
use ai_secretary::routes::configure_routes;

/// AI secretary backend: REST API and chat socket over PostgreSQL
#[derive(Parser)]
#[command(name = "ai_secretary", version, about)]
struct Cli {
    /// Apply migrations and exit
    #[arg(long)]
    migrate_only: bool,

    /// Ensure the default user exists and exit
    #[arg(long)]
    ensure_default_user: bool,

    /// Overwrite username and flags of an existing default user
    #[arg(long, requires = "ensure_default_user")]
    force_update: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "startup failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    logging::init_logging(&config.log_filter);

    let db = Database::new(config.db_config()?).await?;

    let version = db.run_migrations().await?;
    let added = db.ensure_runtime_schema().await?;
    info!(version, added = ?added, "database schema ready");
    if cli.migrate_only {
        return Ok(());
    }

    let outcome = db
        .ensure_default_user(&config.default_user, cli.force_update)
        .await?;
    info!(user_id = %outcome.id(), "default user ready");
    if cli.ensure_default_user {
        match outcome {
            EnsureOutcome::Inserted(id) => println!("default user inserted: {}", id),
            EnsureOutcome::Updated(id) => println!("default user updated: {}", id),
            EnsureOutcome::Existing(id) => println!("default user already exists: {}", id),
        }
        return Ok(());
    }

    let generator = Arc::new(MockLlm::new().with_delay(config.mock_token_delay));
    let routes = configure_routes(db, &config, generator);

    let addr = config.socket_addr();
    info!(%addr, "starting server");
    warp::serve(routes).run(addr).await;

    Ok(())
}
