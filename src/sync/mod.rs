pub mod api;
pub mod engine;

pub use api::{ApiError, EventServiceClient, EventsApi};
pub use engine::{SyncEngine, SyncError};
