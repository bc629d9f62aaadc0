use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            tracing::warn!(error = %err, "Ignoring unreadable .env file");
        }
    }

    let config = anyhow::Context::context(
        scriptcue::config::Config::from_env(),
        "Failed to load configuration",
    );

    let outcome = scriptcue::run::run_from(config, None).await?;
    tracing::debug!(?outcome, "Run finished");
    Ok(())
}
