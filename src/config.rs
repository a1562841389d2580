use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Clone, Deserialize)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_api_base: Option<String>,
    pub spins_api_url: String,
    pub spins_timeout_secs: u64,
    pub system_prompt: String,
    pub agent_max_iterations: usize,
    pub port: u16,
    // Observability credentials for the hosted backend; diagnosed at startup
    pub langsmith_tracing: bool,
    pub langsmith_api_key: Option<String>,
}

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant for WBOR 91.1 FM at Bowdoin College in \
Brunswick, Maine. Your primary function is to tell users what song is currently playing if they ask. \
Use the 'get_current_song' tool to find this information. If the user asks about something other than \
the current song, politely inform them you can only provide information about the currently playing \
song. If they don't ask a question, tell them thanks for listening and that they can ask. If you don't \
understand them, let them know. If the 'get_current_song' tool encounters an error or returns no \
specific song information, inform the user that you couldn't fetch the song details at this moment and \
suggest they could try again later. Limit excess prose, be direct.";

const DEFAULT_SPINS_API_URL: &str = "https://api-1.wbor.org/api/spins";

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::build()
    }

    fn build() -> anyhow::Result<Self> {
        Ok(Config {
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY must be set"))?,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_api_base: env::var("OPENAI_API_BASE").ok(),
            spins_api_url: env::var("SPINS_API_URL")
                .unwrap_or_else(|_| DEFAULT_SPINS_API_URL.to_string()),
            spins_timeout_secs: env::var("SPINS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3),
            system_prompt: env::var("SYSTEM_PROMPT")
                .unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.to_string()),
            agent_max_iterations: env::var("AGENT_MAX_ITERATIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            langsmith_tracing: env::var("LANGSMITH_TRACING")
                .map(|v| v == "true")
                .unwrap_or(false),
            langsmith_api_key: env::var("LANGSMITH_API_KEY").ok(),
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &"[REDACTED]")
            .field("openai_model", &self.openai_model)
            .field("openai_api_base", &self.openai_api_base)
            .field("spins_api_url", &self.spins_api_url)
            .field("spins_timeout_secs", &self.spins_timeout_secs)
            .field("system_prompt", &self.system_prompt)
            .field("agent_max_iterations", &self.agent_max_iterations)
            .field("port", &self.port)
            .field("langsmith_tracing", &self.langsmith_tracing)
            .field(
                "langsmith_api_key",
                &self.langsmith_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
