
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{self, Client};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::slack_blocks::OpenModalRequest;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub channel: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApiResponse {
    pub ok: bool,
    pub error: Option<String>,
}

#[async_trait]
pub trait SlackGateway: Send + Sync {
    async fn open_modal(&self, request: &OpenModalRequest) -> Result<ApiResponse>;
    async fn post_message(&self, message: &OutgoingMessage) -> Result<ApiResponse>;
}

pub struct SlackClient {
    client: Client,
    client_token: String,
}

// https://api.slack.com/messaging/sending
impl SlackClient {
    pub fn new(client_token: String) -> Arc<Self> {
        let client = reqwest::Client::new();
        let this = Self {
            client,
            client_token,
        };
        Arc::new(this)
    }

    async fn call_api<T: Serialize + ?Sized>(&self, method: &str, body: &T) -> Result<ApiResponse> {
        let url = ["https://slack.com/api/", method].join("");
        let response = self.client.post(url)
            .header("Content-type", "application/json; charset=utf-8")
            .header("Authorization", ["Bearer", &self.client_token].join(" "))
            .json(body)
            .send()
            .await?;
        let text = response.text().await?;
        info!("slack {} response {:?}", method, text);
        let response: ApiResponse = serde_json::from_str(&text)?;
        Ok(response)
    }
}

#[async_trait]
impl SlackGateway for SlackClient {
    // https://api.slack.com/methods/views.open
    async fn open_modal(&self, request: &OpenModalRequest) -> Result<ApiResponse> {
        self.call_api("views.open", request).await
    }

    // https://api.slack.com/methods/chat.postMessage
    async fn post_message(&self, message: &OutgoingMessage) -> Result<ApiResponse> {
        self.call_api("chat.postMessage", message).await
    }
}
