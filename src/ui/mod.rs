mod app;
mod components;
mod state;

pub use app::ChatApp;
pub use state::{ActivityEntry, UiState};
