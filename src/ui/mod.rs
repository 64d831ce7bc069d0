//! Presentation layer
//!
//! The page is a pure view model:
//! - `markup`: `[[Term]]` parsing into text runs and term triggers
//! - `view`: analysis view, definition drawer, section visibility
//! - `state`: `UiState`, the whole drawable state
//! - `app`: `App`, the controller every user action goes through
//!
//! `input` and `render` are the terminal front end over it.

pub mod app;
pub mod input;
pub mod markup;
pub mod notice;
pub mod render;
pub mod state;
pub mod transcript;
pub mod view;

// Re-exports
pub use app::App;
pub use input::{parse_command, render_help, Command};
pub use markup::{RichText, Segment};
pub use notice::Notice;
pub use state::UiState;
pub use transcript::{ChatRole, ChatTurn, Transcript};
pub use view::{
    render_analysis, search_url, AnalysisView, DefinitionPanel, DefinitionStatus, Sections,
    DEFAULT_SEARCH_URL,
};
