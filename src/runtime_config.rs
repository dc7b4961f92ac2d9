
use std::env;

use anyhow::{Context, Result};

// All settings are read once at process start; request handlers only ever
// see this struct.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub signing_secret: String,
    pub client_token: String,
    pub channel_id: String,
    pub notes_api_url: String,
    pub notes_api_token: String,
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            signing_secret: env::var("SLACK_SIGNING_SECRET")
                .context("SLACK_SIGNING_SECRET is not set")?,
            client_token: env::var("SLACK_CLIENT_TOKEN")
                .context("SLACK_CLIENT_TOKEN is not set")?,
            channel_id: env::var("SLACK_CHANNEL_ID")
                .context("SLACK_CHANNEL_ID is not set")?,
            notes_api_url: env::var("NOTES_API_URL")
                .context("NOTES_API_URL is not set")?,
            notes_api_token: env::var("NOTES_API_TOKEN")
                .context("NOTES_API_TOKEN is not set")?,
        };
        Ok(config)
    }
}
