use std::sync::Arc;

use tracing::{info, warn};
use wbor_sms_agent::config::Config;
use wbor_sms_agent::llm::{Agent, LlmClient};
use wbor_sms_agent::server;
use wbor_sms_agent::spins::SpinClient;
use wbor_sms_agent::tools::builtin::CurrentSongTool;
use wbor_sms_agent::tools::ToolRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration; a missing model credential is fatal
    let config = Config::from_env()?;
    check_observability_env(&config);

    let spin_client = SpinClient::new(&config)?;

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CurrentSongTool::new(spin_client)));

    let llm_client = LlmClient::new(&config);
    let agent = Agent::new(llm_client, Arc::new(registry), &config);

    info!("Starting SMS agent on port {}...", config.port);
    server::run(config.port, Arc::new(agent)).await
}

/// Telemetry credentials are consumed by the observability backend, not by
/// this process; flag the inconsistent combinations at startup.
fn check_observability_env(config: &Config) {
    match (config.langsmith_tracing, config.langsmith_api_key.is_some()) {
        (true, false) => warn!(
            "LANGSMITH_TRACING is true, but LANGSMITH_API_KEY is not set. Tracing will likely fail."
        ),
        (false, true) => info!(
            "LANGSMITH_API_KEY is set, but LANGSMITH_TRACING is not 'true'. Tracing may not be active as expected."
        ),
        (false, false) => warn!(
            "LANGSMITH_API_KEY is not set. Tracing will not be available if enabled."
        ),
        (true, true) => {}
    }
}
