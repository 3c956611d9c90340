use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{LogFormat, Settings};
use database::connection::{connect, run_migrations};

/// The main entry point for the PV ledger service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if one exists
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_config().context("Failed to load configuration")?;
    cli.apply_overrides(&mut settings);
    // Overrides first, then validation.
    settings.validate()?;

    // The guard flushes the log file on drop, so it lives until main returns.
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve => web_server::run_server(&settings).await,
        Commands::Migrate => handle_migrate(&settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Records photovoltaic installations and their production reports.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Overrides `server.host`.
    #[arg(long, global = true)]
    host: Option<String>,

    /// Overrides `server.port`.
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Overrides `logging.format`.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and serve the HTTP API.
    Serve,
    /// Apply pending database migrations and exit.
    Migrate,
}

impl Cli {
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(format) = self.log_format {
            settings.logging.format = format;
        }
    }
}

async fn handle_migrate(settings: &Settings) -> anyhow::Result<()> {
    let db_pool = connect(&settings.database)
        .await
        .context("Failed to connect to the database")?;
    run_migrations(&db_pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied.");
    Ok(())
}
