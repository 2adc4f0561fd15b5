pub mod event;
pub mod locale;

pub use event::{Event, EventDraft, EventKind, Localized};
pub use locale::{Language, kind_label};
