
use std::collections::HashMap;

use serde::Deserialize;
use anyhow::{Context, Result};

// https://api.slack.com/interactivity/slash-commands#app_command_handling
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SlashCommandPayload {
    pub command: String,
    #[serde(default)]
    pub text: String,
    pub trigger_id: String,
}

// https://api.slack.com/reference/interaction-payloads
#[derive(Deserialize, Clone, Debug)]
pub struct InteractivityPayload {
    pub callback_id: Option<String>,
    pub view: Option<SubmittedView>,
    pub user: SlackUser,
    pub channel: Option<SlackChannel>,
    pub message: Option<SlackMessage>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SlackUser {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SlackChannel {
    pub id: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SlackMessage {
    pub ts: String,
    pub thread_ts: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct SubmittedView {
    pub callback_id: Option<String>,
    #[serde(default)]
    pub state: ViewState,
}

// block id -> action id -> submitted field
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ViewState {
    #[serde(default)]
    pub values: HashMap<String, HashMap<String, FieldValue>>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct FieldValue {
    pub value: Option<String>,
    pub selected_option: Option<SelectedOption>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SelectedOption {
    pub value: String,
}

impl InteractivityPayload {
    // The callback id appears at the top level for message actions and
    // under `view` for modal submissions; consult both.
    pub fn callback_id(&self) -> Option<&str> {
        if let Some(callback_id) = self.callback_id.as_deref() {
            return Some(callback_id);
        }
        self.view.as_ref()?.callback_id.as_deref()
    }

    pub fn field_value(&self, block_id: &str, action_id: &str) -> Option<&str> {
        let view = self.view.as_ref()?;
        let field = view.state.values.get(block_id)?.get(action_id)?;
        if let Some(value) = field.value.as_deref() {
            return Some(value);
        }
        field.selected_option.as_ref().map(|option| option.value.as_str())
    }
}

#[derive(Clone, Debug)]
pub enum SlackPayload {
    SlashCommand(SlashCommandPayload),
    Interactivity(InteractivityPayload),
    Unrecognized,
}

pub fn parse_slack_payload(body: &str) -> Result<SlackPayload> {
    let form: HashMap<String, String> = serde_urlencoded::from_str(body).unwrap_or_default();
    if let Some(raw_payload) = form.get("payload") {
        let payload: InteractivityPayload = serde_json::from_str(raw_payload)
            .context("interactivity payload is not valid JSON")?;
        return Ok(SlackPayload::Interactivity(payload));
    }
    if form.contains_key("command") {
        let payload: SlashCommandPayload = serde_urlencoded::from_str(body)
            .context("slash command body is malformed")?;
        return Ok(SlackPayload::SlashCommand(payload));
    }
    Ok(SlackPayload::Unrecognized)
}
