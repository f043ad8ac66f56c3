//! Executive summary generation.
//!
//! # Responsibility
//! - Build the portfolio analysis prompt from the project list.
//! - Call a text generator and hand back its markdown unchanged.
//!
//! # Invariants
//! - Generator output is opaque; only blank output is replaced.
//! - Missing credentials fail before any network traffic.

use crate::model::project::Project;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Shown when the generator returns nothing usable.
pub const EMPTY_SUMMARY_FALLBACK: &str = "Unable to generate an analysis.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub type SummaryResult<T> = Result<T, SummaryError>;

#[derive(Debug)]
pub enum SummaryError {
    /// No API key configured.
    MissingApiKey,
    /// Project list could not be serialized into the prompt.
    Prompt(serde_json::Error),
    /// Transport failure or non-success HTTP status.
    Request(String),
    /// Response body did not have the expected shape.
    InvalidResponse(String),
}

impl Display for SummaryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "summary api key is not configured"),
            Self::Prompt(err) => write!(f, "failed to build summary prompt: {err}"),
            Self::Request(message) => write!(f, "summary request failed: {message}"),
            Self::InvalidResponse(message) => write!(f, "invalid summary response: {message}"),
        }
    }
}

impl Error for SummaryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Prompt(err) => Some(err),
            _ => None,
        }
    }
}

/// Text generation backend.
pub trait SummaryGenerator {
    fn generate(&self, prompt: &str) -> SummaryResult<String>;
}

/// Builds the executive summary prompt with the projects embedded as JSON.
pub fn build_summary_prompt(projects: &[Project]) -> SummaryResult<String> {
    let data = serde_json::to_string(projects).map_err(SummaryError::Prompt)?;
    Ok(format!(
        "You are a senior project manager assistant.\n\
         Analyze the project data below (JSON).\n\
         \n\
         Data:\n\
         {data}\n\
         \n\
         Write an executive summary for leadership in markdown with these sections:\n\
         1. **Overall Health**: a short assessment of portfolio progress.\n\
         2. **Key Risks**: name the projects that are Blocked or Critical and need attention now.\n\
         3. **Budget**: comment on how the budget is allocated.\n\
         4. **Actions**: three concrete bullet points for what to do today.\n\
         \n\
         Keep the tone professional, concise and decisive."
    ))
}

/// Produces the executive summary markdown for `projects`.
pub fn summarize_projects(
    generator: &dyn SummaryGenerator,
    projects: &[Project],
) -> SummaryResult<String> {
    let prompt = build_summary_prompt(projects)?;
    let output = generator.generate(&prompt)?;
    if output.trim().is_empty() {
        warn!("event=summary_generate module=summary status=empty");
        return Ok(EMPTY_SUMMARY_FALLBACK.to_string());
    }
    info!(
        "event=summary_generate module=summary status=ok projects={} chars={}",
        projects.len(),
        output.len()
    );
    Ok(output)
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking client for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

impl ChatCompletionsClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            temperature: 0.3,
            max_tokens: 1024,
        }
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

impl SummaryGenerator for ChatCompletionsClient {
    fn generate(&self, prompt: &str) -> SummaryResult<String> {
        let api_key = self.api_key.as_deref().ok_or(SummaryError::MissingApiKey)?;
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        let response = agent
            .post(&self.url())
            .set("Authorization", &format!("Bearer {api_key}"))
            .set("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|err| {
                warn!(
                    "event=summary_request module=summary status=error model={} error={}",
                    self.model, err
                );
                SummaryError::Request(err.to_string())
            })?;

        let parsed: ChatResponse = response
            .into_json()
            .map_err(|err| SummaryError::InvalidResponse(err.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SummaryError::InvalidResponse("no content in response".to_string()))
    }
}
