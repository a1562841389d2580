use crate::spins::{Spin, SpinClient, SpinError};
use crate::tools::Tool;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Fetches the currently playing song from the station's public API.
///
/// Never returns `Err`: every lookup failure is rendered as an
/// explanatory sentence, since the model can only act on text.
pub struct CurrentSongTool {
    spins: SpinClient,
}

impl CurrentSongTool {
    pub fn new(spins: SpinClient) -> Self {
        Self { spins }
    }

    fn summarize(result: Result<Spin, SpinError>) -> String {
        match result {
            Ok(spin) => format!("Now playing: '{}' by {}.", spin.title, spin.artist),
            Err(SpinError::NoCurrentSpin) => {
                "No song is currently playing; the station may be between tracks or off the air."
                    .to_string()
            }
            Err(SpinError::Unreachable(_)) | Err(SpinError::Status(_)) => {
                "Song information is temporarily unavailable because the station's play history \
                 could not be reached."
                    .to_string()
            }
            Err(SpinError::Malformed(_)) => {
                "The station sent back song information that could not be read.".to_string()
            }
            Err(SpinError::Incomplete) => {
                "Some song information was found, but it looks incomplete.".to_string()
            }
        }
    }
}

#[async_trait]
impl Tool for CurrentSongTool {
    fn name(&self) -> &str {
        "get_current_song"
    }
    fn description(&self) -> &str {
        "Fetches the currently playing song from WBOR 91.1 FM's public API. \
         Use this tool when a user asks what song is currently playing."
    }
    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }
    async fn execute(&self, _params: Value) -> anyhow::Result<String> {
        let result = self.spins.fetch_current_spin().await;
        match &result {
            Ok(spin) => tracing::info!("Fetched current spin: '{}' by {}", spin.title, spin.artist),
            Err(e) => tracing::warn!("Spin lookup failed: {}", e),
        }
        Ok(Self::summarize(result))
    }
}
