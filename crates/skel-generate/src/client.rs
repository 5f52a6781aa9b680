//! Chat-completions HTTP client.
//!
//! Sync client for OpenAI-compatible `/chat/completions` endpoints with
//! bearer authentication.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use skel_config::GeneratorConfig;
use tracing::info;
use ureq::Agent;

use crate::error::GenerateError;
use crate::framework::{Framework, detect_framework};
use crate::prompt::{INSTRUCTION_PROFILE, user_message};
use crate::types::{GenerateRequest, GenerateResponse};
use crate::validate::{validate_component, validate_output};

/// Create an HTTP agent that reports error statuses as responses.
#[must_use]
pub fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Remote skeleton generator.
pub struct GeneratorClient {
    agent: Agent,
    api_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    max_input_chars: usize,
}

impl GeneratorClient {
    /// Create client from config values.
    ///
    /// A missing API key is reported when a generation is attempted.
    #[must_use]
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            agent: create_agent(Duration::from_secs(config.timeout_secs)),
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key().map(str::to_owned),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            top_p: config.top_p,
            max_input_chars: config.max_input_chars,
        }
    }

    /// Model name sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Validate a request, generate a skeleton, and check the result.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Validation`] before any network call if the
    /// component is rejected, and the service or output errors otherwise.
    pub fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, GenerateError> {
        let component = request
            .component
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| GenerateError::Validation("Component structure is required".to_owned()))?;
        validate_component(component, self.max_input_chars)?;

        let framework = detect_framework(component);
        let raw = self.complete(framework, component)?;
        let skeleton_code = validate_output(&raw)?;

        Ok(GenerateResponse {
            skeleton_code,
            framework,
            generated_with: self.model.clone(),
        })
    }

    /// Send one chat completion and return the reply text.
    fn complete(&self, framework: Framework, component: &str) -> Result<String, GenerateError> {
        let api_key = self.api_key.as_deref().ok_or(GenerateError::MissingApiKey)?;
        let url = format!("{}/chat/completions", self.api_url);
        let user = user_message(framework, component);
        let body = self.chat_request(&user);

        info!(
            framework = %framework,
            model = %self.model,
            chars = component.chars().count(),
            "Requesting skeleton generation"
        );

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &format!("Bearer {api_key}"))
            .header("Accept", "application/json")
            .send_json(&body)?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(upstream_error(status, &error_body));
        }

        let text = body_reader.read_to_string()?;
        let content = parse_completion(&text)?;
        info!(bytes = content.len(), "Received generated skeleton");
        Ok(content)
    }

    fn chat_request<'a>(&'a self, user: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: INSTRUCTION_PROFILE,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

/// First choice's reply text; empty when the service returned none.
fn parse_completion(body: &str) -> Result<String, GenerateError> {
    let response: ChatResponse = serde_json::from_str(body)?;
    Ok(response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default())
}

/// Build an error from a failed response, using the service's error body
/// when it has one.
fn upstream_error(status: u16, body: &str) -> GenerateError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => GenerateError::Upstream {
            status,
            kind: parsed.error.kind,
            message: parsed.error.message,
        },
        Err(_) => GenerateError::Upstream {
            status,
            kind: None,
            message: format!("HTTP {status}: {body}"),
        },
    }
}
