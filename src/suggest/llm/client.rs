use super::models::{Model, Usage};
use crate::suggest::error::UpstreamError;
use crate::util::truncate_str;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Google Generative Language API
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Maximum length for error content in error messages
const MAX_ERROR_CONTENT_LEN: usize = 200;

pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, UpstreamError>> + Send + 'a>>;

/// Anything that turns a text prompt into reply text.
///
/// Implementations make exactly one attempt per call; retry policy, if any,
/// belongs to the caller.
pub trait GenerationService: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a>;
}

/// Everything `GeminiClient` needs, passed in rather than read from the process
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_key: Option<String>,
    pub model: Model,
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: Model::default(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<Usage>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, all parts concatenated
    fn reply_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Sanitize API response content for error messages to prevent credential leakage.
fn sanitize_api_response(content: &str) -> String {
    const SECRET_PATTERNS: &[&str] = &[
        "api_key",
        "apikey",
        "api key",
        "secret",
        "password",
        "credential",
        "bearer",
        "aiza", // Google API key prefix
    ];

    let truncated = truncate_str(content.trim(), MAX_ERROR_CONTENT_LEN);

    let lower = truncated.to_lowercase();
    if SECRET_PATTERNS.iter().any(|p| lower.contains(p)) {
        return "(response details redacted - may contain sensitive data)".to_string();
    }

    truncated.to_string()
}

/// Client for Gemini's `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: Model,
    api_base: String,
}

impl GeminiClient {
    /// A missing key is not an error here; the first `generate` call reports it.
    pub fn new(settings: ClientSettings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        let api_key = settings.api_key.filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            log::warn!("No Gemini API key configured. Set GEMINI_API_KEY to enable AI suggestions.");
        }

        Ok(Self {
            http,
            api_key,
            model: settings.model,
            api_base: settings.api_base,
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model.id()
        )
    }

    async fn send(&self, prompt: &str) -> Result<String, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::MissingApiKey)?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        log::debug!("Requesting gift ideas from {}", self.model);
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: sanitize_api_response(&text),
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| UpstreamError::InvalidEnvelope(e.to_string()))?;

        if let Some(usage) = &parsed.usage_metadata {
            log::debug!(
                "Gemini usage: {} prompt + {} reply = {} tokens",
                usage.prompt_token_count,
                usage.candidates_token_count,
                usage.total_token_count
            );
        }

        let reply = parsed.reply_text();
        if reply.trim().is_empty() {
            return Err(UpstreamError::EmptyReply);
        }
        Ok(reply)
    }
}

impl GenerationService for GeminiClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(self.send(prompt))
    }
}
