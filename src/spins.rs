//! Client for the station's public play-history ("spins") API.

use crate::config::Config;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// One logged play of a track, as exposed by the station's API.
#[derive(Debug, Clone, Deserialize)]
pub struct Spin {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error)]
pub enum SpinError {
    #[error("station API request failed")]
    Unreachable(#[source] reqwest::Error),
    #[error("station API returned HTTP {0}")]
    Status(StatusCode),
    #[error("station has no spin logged")]
    NoCurrentSpin,
    #[error("station API response could not be parsed")]
    Malformed(#[source] serde_json::Error),
    #[error("latest spin is missing a title or artist")]
    Incomplete,
}

pub struct SpinClient {
    http: reqwest::Client,
    api_url: String,
}

impl SpinClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.spins_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_url: config.spins_api_url.clone(),
        })
    }

    /// Fetch the single most recent spin.
    ///
    /// Exactly one outbound request, bounded by the client timeout. No
    /// retries; every failure maps to a distinct [`SpinError`] variant so
    /// callers can pick user-facing wording per condition.
    pub async fn fetch_current_spin(&self) -> Result<Spin, SpinError> {
        let response = self
            .http
            .get(&self.api_url)
            .query(&[("count", "1")])
            .send()
            .await
            .map_err(SpinError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpinError::Status(status));
        }

        let body = response.text().await.map_err(SpinError::Unreachable)?;
        let spins: Vec<Spin> = serde_json::from_str(&body).map_err(SpinError::Malformed)?;

        let spin = spins.into_iter().next().ok_or(SpinError::NoCurrentSpin)?;
        if spin.title.is_empty() || spin.artist.is_empty() {
            return Err(SpinError::Incomplete);
        }
        Ok(spin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_deserializes_full_entry() {
        let json = r#"{
            "title": "Paranoid Android",
            "artist": "Radiohead",
            "album": "OK Computer",
            "start": "2025-06-01T14:30:00Z"
        }"#;
        let spin: Spin = serde_json::from_str(json).unwrap();
        assert_eq!(spin.title, "Paranoid Android");
        assert_eq!(spin.artist, "Radiohead");
        assert_eq!(spin.album.as_deref(), Some("OK Computer"));
        assert!(spin.start.is_some());
    }

    #[test]
    fn test_spin_album_and_start_are_optional() {
        let json = r#"{"title": "Foo", "artist": "Bar"}"#;
        let spin: Spin = serde_json::from_str(json).unwrap();
        assert_eq!(spin.title, "Foo");
        assert_eq!(spin.artist, "Bar");
        assert!(spin.album.is_none());
        assert!(spin.start.is_none());
    }

    #[test]
    fn test_spin_rejects_missing_title() {
        let json = r#"{"artist": "Bar"}"#;
        assert!(serde_json::from_str::<Spin>(json).is_err());
    }

    #[test]
    fn test_spin_start_accepts_offset_timestamps() {
        let json = r#"{"title": "Foo", "artist": "Bar", "start": "2025-06-01T10:30:00-04:00"}"#;
        let spin: Spin = serde_json::from_str(json).unwrap();
        assert_eq!(
            spin.start.unwrap(),
            "2025-06-01T14:30:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }
}
