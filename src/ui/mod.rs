pub mod month_grid;
pub mod theme;

pub use month_grid::{calculate_layout, MonthLayout};
pub use theme::Theme;
