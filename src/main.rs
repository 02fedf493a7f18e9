use mimalloc::MiMalloc;
use socialapp_seed::command::{EXIT_SUCCESS, command_error};
use socialapp_seed::config::Config;
use socialapp_seed::db::SocialAppStorage;
use socialapp_seed::notice::Console;
use socialapp_seed::providers::ProcessEnv;
use socialapp_seed::{CredentialSeeder, SeedError, SeedReport};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Seed (create/update) django-allauth SocialApp entries from environment variables.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => return ExitCode::from(command_error(&e, &mut std::io::stderr())),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .init();

    match run(&cfg).await {
        Ok(report) => {
            match serde_json::to_string(&report) {
                Ok(json) => info!(report = %json, "seeding complete"),
                Err(e) => info!(error = %e, "seeding complete; report not serializable"),
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            error!(error = %e, validation = e.is_validation(), "seeding aborted");
            ExitCode::from(command_error(&e, &mut std::io::stderr()))
        }
    }
}

async fn run(cfg: &Config) -> Result<SeedReport, SeedError> {
    let storage = SocialAppStorage::connect(&cfg.database_url).await?;
    info!(database_url = %cfg.database_url, "connected to database");

    let mut console = Console::stdout();
    let report = CredentialSeeder::new(&storage).run(&ProcessEnv, &mut console).await?;
    console.finish()?;
    Ok(report)
}
