
use std::sync::Arc;

use crate::notes_client::{NoteStore, NotesClient};
use crate::runtime_config::RuntimeConfig;
use crate::slack_client::{SlackClient, SlackGateway};

pub struct RuntimeContext {
    config: RuntimeConfig,
    slack_gateway: Arc<dyn SlackGateway>,
    note_store: Arc<dyn NoteStore>,
}

impl RuntimeContext {
    pub fn new(config: RuntimeConfig) -> Arc<Self> {
        let slack_gateway = SlackClient::new(config.client_token.clone());
        let note_store =
            NotesClient::new(config.notes_api_url.clone(), config.notes_api_token.clone());
        Self::with_collaborators(config, slack_gateway, note_store)
    }

    pub fn with_collaborators(
        config: RuntimeConfig,
        slack_gateway: Arc<dyn SlackGateway>,
        note_store: Arc<dyn NoteStore>,
    ) -> Arc<Self> {
        let context = Self {
            config,
            slack_gateway,
            note_store,
        };
        Arc::new(context)
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn slack_gateway(&self) -> &Arc<dyn SlackGateway> {
        &self.slack_gateway
    }

    pub fn note_store(&self) -> &Arc<dyn NoteStore> {
        &self.note_store
    }
}
