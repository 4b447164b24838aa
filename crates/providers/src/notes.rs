//! HTTP notes adapter.
//!
//! Same shape as the calendar adapter, against `/notes`.

use async_trait::async_trait;
use chrono::NaiveDate;
use daybrief_core::error::ProviderError;
use daybrief_core::provider::NotesProvider;
use daybrief_core::record::{NewNote, Note, NotePatch};
use serde::Deserialize;
use tracing::debug;

pub struct HttpNotesProvider {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

impl HttpNotesProvider {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .map_err(|e| ProviderError::Unavailable(format!("HTTP client build: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    fn map_status(status: u16, id: &str) -> ProviderError {
        match status {
            404 => ProviderError::NotFound(format!("note {id}")),
            401 | 403 => ProviderError::Unavailable("notes authentication failed".into()),
            other => ProviderError::Unavailable(format!("notes service returned status {other}")),
        }
    }
}

#[async_trait]
impl NotesProvider for HttpNotesProvider {
    async fn notes_for(&self, date: NaiveDate) -> Result<Vec<Note>, ProviderError> {
        debug!(%date, "Fetching notes");

        let response = self
            .request(reqwest::Method::GET, "/notes")
            .query(&[("date", date.to_string())])
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("notes network: {e}")))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(Self::map_status(status, "-"));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("notes response: {e}")))
    }

    async fn create_note(&self, note: NewNote) -> Result<String, ProviderError> {
        if note.content.trim().is_empty() {
            return Err(ProviderError::Validation(
                "note content must not be empty".into(),
            ));
        }

        let response = self
            .request(reqwest::Method::POST, "/notes")
            .json(&note)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("notes network: {e}")))?;

        let status = response.status().as_u16();
        if status != 200 && status != 201 {
            return Err(Self::map_status(status, "-"));
        }

        let created: CreatedResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("notes response: {e}")))?;
        Ok(created.id)
    }

    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<(), ProviderError> {
        if patch.title.is_none() && patch.content.is_none() {
            return Ok(());
        }

        let response = self
            .request(reqwest::Method::PATCH, &format!("/notes/{id}"))
            .json(&patch)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("notes network: {e}")))?;

        let status = response.status().as_u16();
        if status != 200 && status != 204 {
            return Err(Self::map_status(status, id));
        }
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<(), ProviderError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/notes/{id}"))
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("notes network: {e}")))?;

        let status = response.status().as_u16();
        if status != 200 && status != 204 {
            return Err(Self::map_status(status, id));
        }
        Ok(())
    }
}
