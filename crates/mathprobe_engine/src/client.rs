use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{FailureKind, GenerateError};

#[derive(Debug, Clone)]
pub struct GenerateSettings {
    /// Base URL of the generateContent relay, without a trailing slash.
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Fixed pause inserted before the second and third calls.
    pub stage_pause: Duration,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.videocaptioner.cn/v1".to_string(),
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            stage_pause: Duration::from_secs(1),
        }
    }
}

/// One prompt in, one block of text out. Implemented by the real HTTP
/// client and by test stubs.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    settings: GenerateSettings,
}

impl GeminiGenerator {
    pub fn new(settings: GenerateSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, GenerateError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model,
            self.settings.api_key
        )
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
}

#[async_trait::async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = reqwest::Url::parse(&self.request_url())
            .map_err(|err| GenerateError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            return Err(GenerateError::new(
                FailureKind::HttpStatus(status.as_u16()),
                error_message_from_body(&text).unwrap_or_else(|| status.to_string()),
            ));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|err| GenerateError::new(FailureKind::Decode, err.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(GenerateError::new(
                FailureKind::Api,
                error.message.unwrap_or_else(|| "api error".to_string()),
            ));
        }

        Ok(extract_text(parsed))
    }
}

/// Joins the text parts of the first candidate. A response without any
/// text is a successful empty generation, not an error.
fn extract_text(response: GenerateContentResponse) -> String {
    let Some(candidate) = response
        .candidates
        .into_iter()
        .flatten()
        .next()
    else {
        return String::new();
    };
    candidate
        .content
        .and_then(|content| content.parts)
        .into_iter()
        .flatten()
        .filter_map(|part| part.text)
        .collect()
}

fn error_message_from_body(body: &str) -> Option<String> {
    let parsed: GenerateContentResponse = serde_json::from_str(body).ok()?;
    parsed.error?.message
}

fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        return GenerateError::new(FailureKind::Timeout, err.to_string());
    }
    GenerateError::new(FailureKind::Network, err.to_string())
}
