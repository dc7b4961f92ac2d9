
use std::time::{Duration, SystemTime};

use sha2::Sha256;
use hmac::{Hmac, Mac};
use hex;

use lambda_http::{Request, Body};
use anyhow::{Context, Result, bail};

use crate::runtime_config::RuntimeConfig;

type HmacSha256 = Hmac<Sha256>;

const REPLAY_WINDOW: Duration = Duration::from_secs(5 * 60);

// https://api.slack.com/authentication/verifying-requests-from-slack
pub fn verify_slack_request(request: &Request, config: &RuntimeConfig) -> Result<()> {
    let headers = request.headers();
    let Body::Text(body_text) = request.body() else {
        bail!("no body");
    };
    let slack_signature = headers.get("X-Slack-Signature")
        .context("X-Slack-Signature is empty")?
        .to_str()?;
    let slack_timestamp = headers.get("X-Slack-Request-Timestamp")
        .context("X-Slack-Request-Timestamp is empty")?
        .to_str()?;
    let slack_timestamp_secs: u64 = slack_timestamp.parse()?;
    let now = SystemTime::now();
    let now_secs = now.duration_since(SystemTime::UNIX_EPOCH)?.as_secs();
    // absolute skew so a future-dated timestamp fails the same way a stale
    // one does
    let skew = now_secs.abs_diff(slack_timestamp_secs);
    if skew > REPLAY_WINDOW.as_secs() {
        bail!("The request timestamp is more than five minutes from local time");
    }
    let verification_result =
        signature_matches(&config.signing_secret, slack_timestamp, body_text, slack_signature)?;
    if verification_result {
        Ok(())
    } else {
        bail!("verification failed")
    }
}

// https://api.slack.com/authentication/verifying-requests-from-slack#making__validating-a-request
pub fn expected_signature(signing_secret: &str, timestamp: &str, body: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())?;
    let message = ["v0", timestamp, body].join(":");
    mac.update(message.as_bytes());
    let mac = mac.finalize();
    let signature = hex::encode(mac.into_bytes());
    let signature = ["v0=", signature.as_str()].join("");
    Ok(signature)
}

fn signature_matches(
    signing_secret: &str,
    timestamp: &str,
    body: &str,
    signature_actual: &str,
) -> Result<bool> {
    let signature_expected = expected_signature(signing_secret, timestamp, body)?;
    Ok(constant_time_eq(&signature_expected, signature_actual))
}

fn constant_time_eq(expected: &str, actual: &str) -> bool {
    expected.len() == actual.len()
        && expected
            .as_bytes()
            .iter()
            .zip(actual.as_bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use lambda_http::{http, Body, Request};

    use super::{constant_time_eq, expected_signature, verify_slack_request};
    use crate::runtime_config::RuntimeConfig;

    const SIGNING_SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";

    fn test_config() -> RuntimeConfig {
        RuntimeConfig {
            signing_secret: SIGNING_SECRET.to_owned(),
            client_token: "xoxb-test".to_owned(),
            channel_id: "C0TEST".to_owned(),
            notes_api_url: "http://localhost/notes".to_owned(),
            notes_api_token: "notes-test".to_owned(),
        }
    }

    fn current_timestamp() -> String {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .expect("clock before unix epoch");
        now.as_secs().to_string()
    }

    fn signed_request(timestamp: &str, signature: &str, body: &str) -> Request {
        http::Request::builder()
            .method("POST")
            .uri("/slack/events")
            .header("X-Slack-Signature", signature)
            .header("X-Slack-Request-Timestamp", timestamp)
            .body(Body::Text(body.to_owned()))
            .expect("request builds")
    }

    #[test]
    fn accepts_correctly_signed_request() {
        let body = "command=%2Ffoodfight&text=&trigger_id=12345.98765";
        let timestamp = current_timestamp();
        let signature =
            expected_signature(SIGNING_SECRET, &timestamp, body).expect("signature computes");

        let request = signed_request(&timestamp, &signature, body);
        assert!(verify_slack_request(&request, &test_config()).is_ok());
    }

    #[test]
    fn rejects_tampered_body() {
        let timestamp = current_timestamp();
        let signature = expected_signature(SIGNING_SECRET, &timestamp, "command=%2Ffoodfight")
            .expect("signature computes");

        let request = signed_request(&timestamp, &signature, "command=%2Fsomethingelse");
        assert!(verify_slack_request(&request, &test_config()).is_err());
    }

    #[test]
    fn rejects_missing_signature_header() {
        let request = http::Request::builder()
            .method("POST")
            .uri("/slack/events")
            .header("X-Slack-Request-Timestamp", current_timestamp())
            .body(Body::Text("command=%2Ffoodfight".to_owned()))
            .expect("request builds");
        assert!(verify_slack_request(&request, &test_config()).is_err());
    }

    #[test]
    fn rejects_stale_timestamp() {
        let body = "command=%2Ffoodfight";
        // well outside the five minute replay window
        let timestamp = "1531420618";
        let signature =
            expected_signature(SIGNING_SECRET, timestamp, body).expect("signature computes");

        let request = signed_request(timestamp, &signature, body);
        assert!(verify_slack_request(&request, &test_config()).is_err());
    }

    #[test]
    fn rejects_malformed_timestamp() {
        let body = "command=%2Ffoodfight";
        let signature =
            expected_signature(SIGNING_SECRET, "not-a-number", body).expect("signature computes");

        let request = signed_request("not-a-number", &signature, body);
        assert!(verify_slack_request(&request, &test_config()).is_err());
    }

    #[test]
    fn known_signature_vector_matches() {
        // worked example from the Slack request verification docs
        let timestamp = "1531420618";
        let body = "token=xyzz0WbapA4vBCDEFasx0q6G&team_id=T1DC2JH3J&team_domain=testteamnow&channel_id=G8PSS9T3V&channel_name=foobar&user_id=U2CERLKJA&user_name=roadrunner&command=%2Fwebhook-collect&text=&response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2FT1DC2JH3J%2F397700885554%2F96rGlfmibIGlgcZRskXaIFfN&trigger_id=398738663015.47445629121.803a0bc887a14d10d2c447fce8b6703c";
        let signature =
            expected_signature(SIGNING_SECRET, timestamp, body).expect("signature computes");
        assert_eq!(
            signature,
            "v0=a2114d57b48eac39b9ad189dd8316235a7b4a8d21a10bd27519666489c69b503"
        );
    }

    #[test]
    fn constant_time_eq_requires_equal_length_and_content() {
        assert!(constant_time_eq("v0=abc", "v0=abc"));
        assert!(!constant_time_eq("v0=abc", "v0=abd"));
        assert!(!constant_time_eq("v0=abc", "v0=abcd"));
    }
}
