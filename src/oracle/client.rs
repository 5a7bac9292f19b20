use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::key::ApiKey;
use crate::error::EchoError;
use crate::settings::OracleSettings;
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Pull `candidates[0].content.parts[0].text` out of a response body.
pub fn extract_text(body: &str) -> Result<String, EchoError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| EchoError::ExternalService(format!("malformed response: {e}")))?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| {
            EchoError::ExternalService("response has no candidates[0].content.parts[0].text".into())
        })
}

/// Blocking-from-the-caller's-view bridge to the prompt -> text service.
/// One request per call, no retries.
#[derive(Clone)]
pub struct OracleClient {
    http: Client,
    url: String,
    api_key: ApiKey,
}

impl OracleClient {
    pub fn new(settings: &OracleSettings, api_key: ApiKey) -> Result<Self, EchoError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| EchoError::ExternalService(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: settings.generate_url(),
            api_key,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, EchoError> {
        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        log_info!("Requesting insight ({} prompt chars)", prompt.chars().count());

        let response = self
            .http
            .post(&self.url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                let kind = if e.is_timeout() { "timed out" } else { "request failed" };
                log_warn!("Insight request {kind}: {e}");
                EchoError::ExternalService(format!("{kind}: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            log_warn!("Insight service returned HTTP {}", status.as_u16());
            return Err(EchoError::ExternalService(format!("HTTP {}", status.as_u16())));
        }

        let text = response
            .text()
            .await
            .map_err(|e| EchoError::ExternalService(format!("failed to read body: {}", e.without_url())))?;

        extract_text(&text)
    }
}
