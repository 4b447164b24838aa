//! OpenAI-compatible completion client.
//!
//! Works with any endpoint exposing `/v1/chat/completions`: OpenAI, Groq,
//! OpenRouter, Ollama. One request per call, no retries; the client-level
//! timeout is the only bound.

use async_trait::async_trait;
use daybrief_core::completion::{
    ChatRole, CompletionClient, CompletionRequest, CompletionResponse, Usage,
};
use daybrief_core::error::ProviderError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// An OpenAI-compatible chat-completion client.
pub struct OpenAiCompatClient {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiCompatClient {
    /// Create a new client. `base_url` is the API root without a trailing
    /// slash (e.g. `https://api.groq.com/openai/v1`).
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| ProviderError::Unavailable(format!("HTTP client build: {e}")))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        })
    }

    /// Create a Groq client (convenience constructor).
    pub fn groq(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ProviderError> {
        Self::new("groq", "https://api.groq.com/openai/v1", api_key, model)
    }

    fn to_api_messages(request: &CompletionRequest) -> Vec<ApiMessage> {
        request
            .messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    ChatRole::System => "system".into(),
                    ChatRole::User => "user".into(),
                    ChatRole::Assistant => "assistant".into(),
                },
                content: m.content.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompatClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": Self::to_api_messages(&request),
            "temperature": request.temperature,
        });

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        debug!(endpoint = %self.name, model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("network: {e}")))?;

        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return Err(ProviderError::Unavailable(
                "authentication failed: invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Completion endpoint returned error");
            return Err(ProviderError::Unavailable(format!(
                "endpoint returned status {status}: {error_body}"
            )));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("malformed response: {e}")))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Unavailable("no choices in response".into()))?;

        let usage = api_response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(CompletionResponse {
            content: choice.message.content,
            model: api_response.model,
            usage,
        })
    }
}

// --- API types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    model: String,
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybrief_core::completion::ChatMessage;

    #[test]
    fn groq_constructor() {
        let client = OpenAiCompatClient::groq("gsk_test", "llama-3.1-70b-versatile").unwrap();
        assert_eq!(client.name(), "groq");
        assert!(client.base_url.contains("api.groq.com"));
    }

    #[test]
    fn trailing_slash_stripped() {
        let client =
            OpenAiCompatClient::new("local", "http://localhost:11434/v1/", "none", "llama3")
                .unwrap();
        assert_eq!(client.base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn message_conversion() {
        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system("You are a helpful personal assistant."),
                ChatMessage::user("Good morning"),
            ],
            temperature: 0.7,
            max_tokens: Some(1000),
        };
        let api_messages = OpenAiCompatClient::to_api_messages(&request);
        assert_eq!(api_messages.len(), 2);
        assert_eq!(api_messages[0].role, "system");
        assert_eq!(api_messages[1].role, "user");
        assert_eq!(api_messages[1].content, "Good morning");
    }

    #[test]
    fn parse_api_response() {
        let data = r#"{
            "model": "llama-3.1-70b-versatile",
            "choices": [
                {"message": {"role": "assistant", "content": "Here is your briefing."}}
            ],
            "usage": {"prompt_tokens": 120, "completion_tokens": 45, "total_tokens": 165}
        }"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(parsed.choices[0].message.content, "Here is your briefing.");
        assert_eq!(parsed.usage.as_ref().unwrap().total_tokens, 165);
    }

    #[test]
    fn parse_response_without_usage() {
        let data = r#"{
            "model": "llama3",
            "choices": [{"message": {"role": "assistant", "content": "ok"}}]
        }"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert!(parsed.usage.is_none());
    }
}
