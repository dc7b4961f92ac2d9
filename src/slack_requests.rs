
use std::sync::Arc;

use lambda_http::Error;
use lambda_http::{Body, Request, Response};

use crate::{slack_events::SlackEventHandler, runtime_context::RuntimeContext};
use crate::slack_verification::verify_slack_request;

pub struct SlackRequestHandler {
    runtime_context: Arc<RuntimeContext>,
    event_handler: Arc<SlackEventHandler>,
}

impl SlackRequestHandler {
    pub fn new(runtime_context: &Arc<RuntimeContext>) -> Arc<Self> {
        let event_handler = SlackEventHandler::new(runtime_context);
        let handler = Self {
            runtime_context: Arc::clone(runtime_context),
            event_handler,
        };
        Arc::new(handler)
    }

    // Every path answers with 200 or 400; downstream failures never surface
    // as error statuses to Slack.
    pub async fn handle_slack_request(&self, event: Request) -> Result<Response<Body>, Error> {
        let verification_result = verify_slack_request(&event, self.runtime_context.config());
        match verification_result {
            Ok(()) => {
                let result = self.event_handler.handle_verified_events(event).await;
                match result {
                    Ok(response) => Ok(response),
                    Err(error) => {
                        tracing::info!("/slack/events error {:?}", error);
                        self.invalid_request_response("invalid request body")
                    }
                }
            },
            Err(error) => {
                tracing::info!("/slack/events verification failed {:?}", error);
                self.invalid_request_response("invalid request")
            }
        }
    }

    fn invalid_request_response(&self, body: &str) -> Result<Response<Body>, Error> {
        let response = Response::builder()
            .status(400)
            .header("content-type", "text/plain")
            .body(body.into())
            .map_err(Box::new)?;
        Ok(response)
    }
}
