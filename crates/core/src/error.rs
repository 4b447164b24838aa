//! Error types for the daybrief domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Propagation policy:
//! - provider and store errors are caught and degraded at the context
//!   assembler boundary; they never reach the prompt selector
//! - completion errors are caught at the invoker boundary and replaced
//!   with a fixed fallback string
//! - only `ProviderError::Validation` on direct create/update calls is
//!   meant to reach a caller

use thiserror::Error;

/// The top-level error type for all daybrief operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Store errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Template errors ---
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors raised by the calendar, notes, weather, and LLM adapters.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Authentication, network, or upstream outage. Transient and external.
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// The provider does not recognize the given identifier.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller supplied insufficient data to create or update a record.
    /// This is the one provider error that should reach the caller.
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Errors from the task store. The store is expected never to fail
/// observably; these surface as a fatal condition, not a degraded one.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Schema initialization failed: {0}")]
    InitFailed(String),
}

/// A prompt template referenced a placeholder the context cannot supply,
/// or the template syntax itself is malformed. Configuration-time defect.
#[derive(Debug, Clone, Error)]
pub enum TemplateError {
    #[error("Unknown placeholder '{{{0}}}' in template")]
    UnknownPlaceholder(String),

    #[error("Unclosed placeholder starting at byte {0}")]
    UnclosedPlaceholder(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::Unavailable(
            "connection refused to api.openweathermap.org".into(),
        ));
        assert!(err.to_string().contains("unavailable"));
        assert!(err.to_string().contains("openweathermap"));
    }

    #[test]
    fn validation_error_displays_reason() {
        let err = ProviderError::Validation("event title must not be empty".into());
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn template_error_names_placeholder() {
        let err = TemplateError::UnknownPlaceholder("todos".into());
        assert!(err.to_string().contains("{todos}"));
    }
}
