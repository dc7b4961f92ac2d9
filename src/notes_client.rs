
use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::{self, Client};
use serde::Serialize;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiceLevel {
    Mild,
    Medium,
    Spicy,
    Nuclear,
}

impl SpiceLevel {
    pub const ALL: [SpiceLevel; 4] =
        [SpiceLevel::Mild, SpiceLevel::Medium, SpiceLevel::Spicy, SpiceLevel::Nuclear];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Medium => "medium",
            Self::Spicy => "spicy",
            Self::Nuclear => "nuclear",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }
}

// One record per modal submission; the note store owns it from here on.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SavedRecord {
    pub opinion: String,
    pub spice_level: SpiceLevel,
    pub submitter: String,
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn save_record(&self, record: &SavedRecord) -> Result<()>;
}

pub struct NotesClient {
    client: Client,
    api_url: String,
    api_token: String,
}

impl NotesClient {
    pub fn new(api_url: String, api_token: String) -> Arc<Self> {
        let client = reqwest::Client::new();
        let this = Self {
            client,
            api_url,
            api_token,
        };
        Arc::new(this)
    }
}

#[async_trait]
impl NoteStore for NotesClient {
    async fn save_record(&self, record: &SavedRecord) -> Result<()> {
        let response = self.client.post(&self.api_url)
            .header("Content-type", "application/json; charset=utf-8")
            .header("Authorization", ["Bearer", &self.api_token].join(" "))
            .json(record)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        info!("notes saveItem response {:?}", text);
        if !status.is_success() {
            bail!("note store rejected record: {}", status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{SavedRecord, SpiceLevel};

    #[test]
    fn spice_levels_parse_and_print_consistently() {
        for level in SpiceLevel::ALL {
            assert_eq!(SpiceLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(SpiceLevel::parse("volcanic"), None);
    }

    #[test]
    fn record_serializes_with_lowercase_spice_level() {
        let record = SavedRecord {
            opinion: "cereal is soup".to_owned(),
            spice_level: SpiceLevel::Nuclear,
            submitter: "roadrunner".to_owned(),
        };
        let value = serde_json::to_value(&record).expect("serializes");
        assert_eq!(
            value,
            serde_json::json!({
                "opinion": "cereal is soup",
                "spice_level": "nuclear",
                "submitter": "roadrunner"
            })
        );
    }
}
