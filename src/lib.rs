pub mod app;
pub mod calendar;
pub mod input;
pub mod session;
pub mod storage;
pub mod sync;
pub mod ui;

pub use app::{Action, AppState, Command, Mode, Outcome, Page, SyncStatus};
pub use calendar::{Event, EventDraft, EventKind, Language, Localized};
pub use session::Session;
