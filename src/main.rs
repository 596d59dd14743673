use anyhow::{Error, Result};
use push_dispatcher::{
    api::{self, AppState},
    config::Config,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // An incomplete environment still serves: every push request is then
    // answered with the missing-env error instead of a dead socket.
    let config = match Config::load() {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(error = %e, "Configuration incomplete; push requests will be rejected");
            None
        }
    };

    api::run_api_server(AppState::new(config)).await?;

    Ok(())
}
