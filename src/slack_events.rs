
use std::sync::Arc;

use lambda_http::{Body, Request, Response};

use serde::Deserialize;
use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::notes_client::{SavedRecord, SpiceLevel};
use crate::runtime_context::RuntimeContext;
use crate::slack_blocks::{self, ModalSpec, OpenModalRequest};
use crate::slack_client::{ApiResponse, OutgoingMessage};
use crate::slack_payloads::{
    parse_slack_payload, InteractivityPayload, SlackPayload, SlashCommandPayload,
};

pub const FOODFIGHT_COMMAND: &str = "/foodfight";
pub const FOODFIGHT_MODAL_CALLBACK: &str = "foodfight-modal";
pub const FOODFIGHT_NUDGE_CALLBACK: &str = "foodfight-nudge";

const OPINION_BLOCK: &str = "opinion";
const SPICE_LEVEL_BLOCK: &str = "spice_level";

pub struct SlackEventHandler {
    runtime_context: Arc<RuntimeContext>,
}

impl SlackEventHandler {
    pub fn new(runtime_context: &Arc<RuntimeContext>) -> Arc<Self> {
        let runtime_context = Arc::clone(runtime_context);
        let handler = Self {
            runtime_context,
        };
        Arc::new(handler)
    }

    pub async fn handle_verified_events(&self, event: Request) -> Result<Response<Body>> {
        let Body::Text(body) = event.body() else {
            bail!("no body");
        };
        match parse_slack_payload(body)? {
            SlackPayload::SlashCommand(payload) => self.handle_slash_command(payload).await,
            SlackPayload::Interactivity(payload) => self.handle_interactivity(payload).await,
            SlackPayload::Unrecognized => handle_unrecognized(body),
        }
    }

    async fn handle_slash_command(&self, payload: SlashCommandPayload) -> Result<Response<Body>> {
        match payload.command.as_str() {
            FOODFIGHT_COMMAND => {
                let request = foodfight_modal(&payload);
                let outcome = self.runtime_context.slack_gateway().open_modal(&request).await;
                log_api_outcome("views.open", outcome);
                plain_response(200, "")
            }
            _ => {
                plain_response(200, &format!("Command {} is not recognized", payload.command))
            }
        }
    }

    async fn handle_interactivity(&self, payload: InteractivityPayload) -> Result<Response<Body>> {
        match payload.callback_id() {
            Some(FOODFIGHT_MODAL_CALLBACK) => self.handle_modal_submission(&payload).await,
            Some(FOODFIGHT_NUDGE_CALLBACK) => self.handle_nudge(&payload).await,
            other => {
                let callback_id = other.unwrap_or("(none)");
                info!("unknown interactivity callback {:?}", callback_id);
                plain_response(400, &format!("unknown callback id: {}", callback_id))
            }
        }
    }

    async fn handle_modal_submission(
        &self,
        payload: &InteractivityPayload,
    ) -> Result<Response<Body>> {
        let Some(opinion) = payload.field_value(OPINION_BLOCK, OPINION_BLOCK) else {
            bail!("modal submission is missing the opinion value");
        };
        let Some(raw_spice_level) = payload.field_value(SPICE_LEVEL_BLOCK, SPICE_LEVEL_BLOCK)
        else {
            bail!("modal submission is missing the spice level value");
        };
        let Some(spice_level) = SpiceLevel::parse(raw_spice_level) else {
            bail!("unrecognized spice level {:?}", raw_spice_level);
        };

        let record = SavedRecord {
            opinion: opinion.to_owned(),
            spice_level,
            submitter: payload.user.name.clone(),
        };
        if let Err(error) = self.runtime_context.note_store().save_record(&record).await {
            warn!("saveItem failed {:?}", error);
        }

        let message = OutgoingMessage {
            channel: self.runtime_context.config().channel_id.clone(),
            text: announcement_text(&payload.user.id, spice_level, opinion),
            thread_ts: None,
        };
        let outcome = self.runtime_context.slack_gateway().post_message(&message).await;
        log_api_outcome("chat.postMessage", outcome);
        plain_response(200, "")
    }

    async fn handle_nudge(&self, payload: &InteractivityPayload) -> Result<Response<Body>> {
        let Some(channel) = &payload.channel else {
            bail!("nudge payload has no channel");
        };
        let Some(message) = &payload.message else {
            bail!("nudge payload has no message");
        };
        // reply in the thread the button was pressed in; a top-level message
        // roots a new thread at its own ts
        let thread_ts = message.thread_ts.clone().unwrap_or_else(|| message.ts.clone());
        let reply = OutgoingMessage {
            channel: channel.id.clone(),
            text: format!(
                "Hey <@{}>! Looking to stir the pot? Run the {} command and say it with your chest.",
                payload.user.id, FOODFIGHT_COMMAND
            ),
            thread_ts: Some(thread_ts),
        };
        let outcome = self.runtime_context.slack_gateway().post_message(&reply).await;
        log_api_outcome("chat.postMessage", outcome);
        plain_response(200, "")
    }
}

fn foodfight_modal(payload: &SlashCommandPayload) -> OpenModalRequest {
    slack_blocks::modal(ModalSpec {
        id: FOODFIGHT_MODAL_CALLBACK.to_owned(),
        title: "Start a food fight!".to_owned(),
        trigger_id: payload.trigger_id.clone(),
        blocks: vec![
            slack_blocks::section(
                "The discourse demands food drama! *Send in your spiciest food takes so we can all argue about them and feel alive.*",
            ),
            slack_blocks::input(
                OPINION_BLOCK,
                "Deposit your controversial food opinions here.",
                "Example: peanut butter and mayonnaise sandwiches are delicious!",
                payload.text.clone(),
                "What do you believe about food that people find appalling? Say it with your chest!",
            ),
            slack_blocks::select(
                SPICE_LEVEL_BLOCK,
                "How spicy is this opinion?",
                "Select a spice level",
                SpiceLevel::ALL
                    .into_iter()
                    .map(|level| slack_blocks::option(level.as_str(), level.as_str()))
                    .collect(),
            ),
        ],
    })
}

fn announcement_text(user_id: &str, spice_level: SpiceLevel, opinion: &str) -> String {
    format!(
        "Someone just rang the dinner bell! :bell:\n\n<@{}> served up a {} take:\n\n*{}*\n\nDiscuss.",
        user_id,
        spice_level.as_str(),
        opinion
    )
}

fn log_api_outcome(method: &str, outcome: Result<ApiResponse>) {
    match outcome {
        Ok(response) if !response.ok => {
            warn!("slack {} returned not ok {:?}", method, response.error);
        }
        Err(error) => {
            warn!("slack {} failed {:?}", method, error);
        }
        Ok(_) => {}
    }
}

// https://api.slack.com/apis/connections/events-api#handshake
#[derive(Deserialize, Debug)]
struct CommonEventContent {
    r#type: String,
}

// https://api.slack.com/apis/connections/events-api#handshake
#[derive(Deserialize, Debug)]
struct Handshake {
    challenge: String,
}

fn handle_unrecognized(body: &str) -> Result<Response<Body>> {
    if let Ok(content) = serde_json::from_str::<CommonEventContent>(body) {
        if content.r#type == "url_verification" {
            let handshake: Handshake = serde_json::from_str(body)?;
            return plain_response(200, &handshake.challenge);
        }
    }
    plain_response(200, "request type is not yet handled")
}

fn plain_response(status: u16, body: &str) -> Result<Response<Body>> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "text/plain")
        .body(body.into())
        .map_err(Box::new)?;
    Ok(response)
}
