//! Login Detail
//!
//! The view/edit state machine for a single login record: mode transitions,
//! field-to-record binding, and the commit protocol against the store.

pub mod controller;
pub mod rows;

/// Screen mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Read-only display of the record
    Viewing,
    /// Fields open for direct text capture
    Editing,
}

impl Mode {
    /// Mode indicator for the status line
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Viewing => "VIEW",
            Self::Editing => "EDIT",
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing)
    }
}

// Re-exports
pub use controller::{DetailController, StoreEvent};
pub use rows::{Field, InputHint, Redraw, Row, SubmitOutcome};
