//! UI Module
//!
//! Terminal user interface using ratatui.

pub mod detail_view;
pub mod dialogs;
pub mod statusline;

// Re-exports
pub use detail_view::DetailScreen;
pub use dialogs::ConfirmDialog;
pub use statusline::{HelpBar, MessageType, StatusLine};
