pub mod form_mode;
pub mod login_mode;
pub mod normal_mode;
pub mod search_mode;
