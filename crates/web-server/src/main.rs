use anyhow::Context;

// This main function is the entry point when running `cargo run -p web-server`.
// It loads settings, installs logging and hands over to `run_server`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = configuration::load_config().context("Failed to load configuration")?;
    settings.validate()?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;
    web_server::run_server(&settings).await
}
