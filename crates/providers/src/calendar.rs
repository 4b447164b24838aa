//! HTTP calendar adapter.
//!
//! Talks to a REST calendar service exposing `/events`. The service owns
//! event identity; ids returned from `create_event` are opaque strings.

use async_trait::async_trait;
use chrono::NaiveDate;
use daybrief_core::error::ProviderError;
use daybrief_core::provider::CalendarProvider;
use daybrief_core::record::{Event, EventPatch, NewEvent};
use serde::Deserialize;
use tracing::debug;

pub struct HttpCalendarProvider {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

impl HttpCalendarProvider {
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
            404 => ProviderError::NotFound(format!("event {id}")),
            401 | 403 => ProviderError::Unavailable("calendar authentication failed".into()),
            other => ProviderError::Unavailable(format!("calendar returned status {other}")),
        }
    }
}

#[async_trait]
impl CalendarProvider for HttpCalendarProvider {
    async fn events_for(&self, date: NaiveDate) -> Result<Vec<Event>, ProviderError> {
        debug!(%date, "Fetching calendar events");

        let response = self
            .request(reqwest::Method::GET, "/events")
            .query(&[("date", date.to_string())])
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("calendar network: {e}")))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(Self::map_status(status, "-"));
        }

        let mut events: Vec<Event> = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("calendar response: {e}")))?;

        events.sort_by_key(|e| e.start);
        Ok(events)
    }

    async fn create_event(&self, event: NewEvent) -> Result<String, ProviderError> {
        if event.title.trim().is_empty() {
            return Err(ProviderError::Validation(
                "event title must not be empty".into(),
            ));
        }

        let response = self
            .request(reqwest::Method::POST, "/events")
            .json(&event)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("calendar network: {e}")))?;

        let status = response.status().as_u16();
        if status != 200 && status != 201 {
            return Err(Self::map_status(status, "-"));
        }

        let created: CreatedResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("calendar response: {e}")))?;
        Ok(created.id)
    }

    async fn update_event(&self, id: &str, patch: EventPatch) -> Result<(), ProviderError> {
        if patch.is_empty() {
            return Ok(());
        }

        let response = self
            .request(reqwest::Method::PATCH, &format!("/events/{id}"))
            .json(&patch)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("calendar network: {e}")))?;

        let status = response.status().as_u16();
        if status != 200 && status != 204 {
            return Err(Self::map_status(status, id));
        }
        Ok(())
    }

    async fn delete_event(&self, id: &str) -> Result<(), ProviderError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/events/{id}"))
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("calendar network: {e}")))?;

        let status = response.status().as_u16();
        if status != 200 && status != 204 {
            return Err(Self::map_status(status, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn empty_title_rejected_before_network() {
        // Unroutable base URL: a network attempt would error differently.
        let provider = HttpCalendarProvider::new("http://127.0.0.1:1", None).unwrap();
        let event = NewEvent {
            title: "   ".into(),
            start: DateTime::parse_from_rfc3339("2025-06-22T09:00:00+00:00").unwrap(),
            end: DateTime::parse_from_rfc3339("2025-06-22T10:00:00+00:00").unwrap(),
            location: None,
            description: None,
        };
        let err = provider.create_event(event).await.unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
    }

    #[tokio::test]
    async fn empty_patch_is_a_local_no_op() {
        let provider = HttpCalendarProvider::new("http://127.0.0.1:1", None).unwrap();
        provider
            .update_event("ev_1", EventPatch::default())
            .await
            .unwrap();
    }

    #[test]
    fn unknown_id_maps_to_not_found() {
        let err = HttpCalendarProvider::map_status(404, "ev_404");
        assert!(matches!(err, ProviderError::NotFound(_)));
        assert!(err.to_string().contains("ev_404"));
    }

    #[test]
    fn auth_failures_map_to_unavailable() {
        assert!(matches!(
            HttpCalendarProvider::map_status(401, "-"),
            ProviderError::Unavailable(_)
        ));
        assert!(matches!(
            HttpCalendarProvider::map_status(500, "-"),
            ProviderError::Unavailable(_)
        ));
    }
}
