//! Fail-soft completion invocation.
//!
//! The assistant must keep talking even when the model endpoint is down,
//! so every failure collapses to a canned apology rather than an error.

use std::sync::Arc;

use daybrief_core::completion::{CompletionClient, CompletionRequest};
use tracing::{debug, warn};

/// Reply returned when the completion endpoint fails for any reason.
pub const FALLBACK_REPLY: &str =
    "I apologize, but I encountered an error. Please try again in a moment.";

/// Wraps a [`CompletionClient`] so that callers always get a reply string.
///
/// Errors are logged and swallowed; there is exactly one attempt per call.
pub struct CompletionInvoker {
    client: Arc<dyn CompletionClient>,
}

impl CompletionInvoker {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Invoke the underlying client. Never fails: any error yields
    /// [`FALLBACK_REPLY`].
    pub async fn invoke(&self, request: CompletionRequest) -> String {
        match self.client.complete(request).await {
            Ok(response) => {
                debug!(
                    endpoint = self.client.name(),
                    model = %response.model,
                    "Completion succeeded"
                );
                response.content
            }
            Err(err) => {
                warn!(
                    endpoint = self.client.name(),
                    error = %err,
                    "Completion failed, returning fallback reply"
                );
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use daybrief_core::completion::{ChatMessage, CompletionResponse};
    use daybrief_core::error::ProviderError;

    struct EchoClient;

    #[async_trait]
    impl CompletionClient for EchoClient {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, ProviderError> {
            Ok(CompletionResponse {
                content: request.messages.last().map(|m| m.content.clone()).unwrap_or_default(),
                model: "echo-1".into(),
                usage: None,
            })
        }
    }

    struct DownClient;

    #[async_trait]
    impl CompletionClient for DownClient {
        fn name(&self) -> &str {
            "down"
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, ProviderError> {
            Err(ProviderError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn invoke_returns_content_on_success() {
        let invoker = CompletionInvoker::new(Arc::new(EchoClient));
        let request = CompletionRequest {
            messages: vec![ChatMessage::user("hello there")],
            temperature: 0.7,
            max_tokens: None,
        };
        assert_eq!(invoker.invoke(request).await, "hello there");
    }

    #[tokio::test]
    async fn invoke_falls_back_on_error() {
        let invoker = CompletionInvoker::new(Arc::new(DownClient));
        let request = CompletionRequest::new("system", "user");
        assert_eq!(invoker.invoke(request).await, FALLBACK_REPLY);
    }
}
