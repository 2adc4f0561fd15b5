use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::{Event, EventDraft, EventKind, Localized};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// An event as the service delivers it. `end` may be absent, in which
/// case the event covers its start date only.
#[derive(Debug, Serialize, Deserialize)]
struct EventPayload {
    id: String,
    title: Localized,
    #[serde(default)]
    description: Localized,
    start: NaiveDate,
    #[serde(default)]
    end: Option<NaiveDate>,
    #[serde(rename = "type")]
    kind: EventKind,
    #[serde(rename = "grade", default)]
    grades: Vec<String>,
    #[serde(default)]
    link: Option<String>,
}

impl EventPayload {
    fn into_event(self) -> Event {
        let end = self.end.map_or(self.start, |end| end.max(self.start));
        Event {
            id: self.id,
            title: self.title,
            description: self.description,
            start: self.start,
            end,
            kind: self.kind,
            grades: self.grades,
            link: self.link,
        }
    }
}

#[derive(Debug, Serialize)]
struct AddEventRequest {
    start: NaiveDate,
    end: NaiveDate,
    title_zh: String,
    title_en: String,
    #[serde(rename = "type")]
    kind: EventKind,
    grade: String,
}

impl AddEventRequest {
    fn from_draft(draft: &EventDraft) -> Self {
        Self {
            start: draft.start,
            end: draft.end,
            title_zh: draft.title.zh.clone(),
            title_en: draft.title.en.clone(),
            kind: draft.kind,
            grade: draft.grades.join(","),
        }
    }
}

#[derive(Debug, Serialize)]
struct UpdateEventRequest {
    id: String,
    start: NaiveDate,
    end: NaiveDate,
    title_zh: String,
    title_en: String,
    #[serde(rename = "type")]
    kind: EventKind,
    grade: String,
}

impl UpdateEventRequest {
    fn from_event(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            start: event.start,
            end: event.end,
            title_zh: event.title.zh.clone(),
            title_en: event.title.en.clone(),
            kind: event.kind,
            grade: event.grades.join(","),
        }
    }
}

#[derive(Debug, Serialize)]
struct DeleteEventRequest {
    id: String,
}

#[async_trait]
pub trait EventsApi {
    async fn fetch_events(&self) -> Result<Vec<Event>, ApiError>;

    async fn create_event(&self, bearer: &str, draft: &EventDraft) -> Result<Event, ApiError>;

    async fn update_event(&self, bearer: &str, event: &Event) -> Result<(), ApiError>;

    async fn delete_event(&self, bearer: &str, event_id: &str) -> Result<(), ApiError>;
}

pub struct EventServiceClient {
    base_url: String,
    client: reqwest::Client,
}

impl EventServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();

        if status == 401 || status == 403 {
            tracing::error!("Event service rejected the bearer token ({})", status);
            return Err(ApiError::AuthenticationFailed);
        }

        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!("Event service error. Status: {}, Body: {}", status, body);
            return Err(ApiError::RequestError(format!("Status {}: {}", status, body)));
        }

        Ok(response)
    }
}

#[async_trait]
impl EventsApi for EventServiceClient {
    async fn fetch_events(&self) -> Result<Vec<Event>, ApiError> {
        let url = format!("{}/api/events", self.base_url);

        tracing::info!("Fetching events from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        tracing::info!("Fetch events response status: {}", status);

        let response = Self::check_status(response).await?;

        let payloads: Vec<EventPayload> = response
            .json()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))?;

        let events: Vec<Event> = payloads.into_iter().map(EventPayload::into_event).collect();

        tracing::info!("Fetched {} events successfully", events.len());
        Ok(events)
    }

    async fn create_event(&self, bearer: &str, draft: &EventDraft) -> Result<Event, ApiError> {
        let url = format!("{}/admin/add", self.base_url);
        let request = AddEventRequest::from_draft(draft);

        tracing::info!("Creating event '{}' on {}", draft.title.zh, draft.start);
        tracing::debug!("POST {} with payload: {:?}", url, request);

        let response = self
            .client
            .post(&url)
            .bearer_auth(bearer)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        tracing::info!("Create event response status: {}", status);

        let response = Self::check_status(response).await?;

        let created: EventPayload = response
            .json()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))?;
        let event = created.into_event();
        tracing::info!("Event created with id {}", event.id);

        Ok(event)
    }

    async fn update_event(&self, bearer: &str, event: &Event) -> Result<(), ApiError> {
        let url = format!("{}/admin/update/save", self.base_url);
        let request = UpdateEventRequest::from_event(event);

        tracing::info!("Updating event {}", event.id);
        tracing::debug!("POST {} with payload: {:?}", url, request);

        let response = self
            .client
            .post(&url)
            .bearer_auth(bearer)
            .json(&request)
            .send()
            .await?;

        tracing::info!("Update event response status: {}", response.status());
        Self::check_status(response).await?;

        tracing::info!("Event {} updated successfully", event.id);
        Ok(())
    }

    async fn delete_event(&self, bearer: &str, event_id: &str) -> Result<(), ApiError> {
        let url = format!("{}/admin/delete", self.base_url);

        tracing::info!("Deleting event {}", event_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(bearer)
            .json(&DeleteEventRequest {
                id: event_id.to_string(),
            })
            .send()
            .await?;

        tracing::info!("Delete event response status: {}", response.status());
        Self::check_status(response).await?;

        Ok(())
    }
}
