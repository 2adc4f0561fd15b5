use thiserror::Error;

use crate::app::{Command, Outcome};
use crate::calendar::{Event, EventDraft};
use crate::session::{AuthError, Authenticator, Session};
use crate::storage::config::Config;
use crate::sync::api::{ApiError, EventServiceClient, EventsApi};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Executes store commands against the Event Service. Reads go out
/// unauthenticated; mutations resolve the persisted session token first
/// and fail before any request leaves when there is none.
pub struct SyncEngine {
    auth: Authenticator,
    client: EventServiceClient,
}

impl SyncEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            auth: Authenticator::new(config),
            client: EventServiceClient::new(config.server.base_url.as_str()),
        }
    }

    pub fn restore_session(&self) -> Session {
        self.auth.restore()
    }

    pub async fn fetch_events(&self) -> Result<Vec<Event>, SyncError> {
        Ok(self.client.fetch_events().await?)
    }

    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event, SyncError> {
        let bearer = self.auth.bearer_token()?;
        Ok(self.client.create_event(&bearer, draft).await?)
    }

    pub async fn update_event(&self, event: &Event) -> Result<(), SyncError> {
        let bearer = self.auth.bearer_token()?;
        Ok(self.client.update_event(&bearer, event).await?)
    }

    pub async fn delete_event(&self, event_id: &str) -> Result<(), SyncError> {
        let bearer = self.auth.bearer_token()?;
        Ok(self.client.delete_event(&bearer, event_id).await?)
    }

    pub async fn execute(&self, command: Command) -> Outcome {
        match command {
            Command::FetchEvents { seq } => Outcome::EventsFetched {
                seq,
                result: self.fetch_events().await,
            },
            Command::CreateEvent { seq, draft } => Outcome::EventCreated {
                seq,
                result: self.create_event(&draft).await,
            },
            Command::UpdateEvent { seq, event } => {
                let result = self.update_event(&event).await.map(|()| event);
                Outcome::EventUpdated { seq, result }
            }
            Command::DeleteEvent { seq, id } => {
                let result = self.delete_event(&id).await.map(|()| id);
                Outcome::EventDeleted { seq, result }
            }
            Command::LogIn { username, password } => {
                Outcome::LoggedIn(self.auth.log_in(&username, &password))
            }
            Command::LogOut => Outcome::LoggedOut(self.auth.log_out()),
        }
    }
}
