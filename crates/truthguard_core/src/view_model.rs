use crate::{AssistMode, MessageEntry};

/// Render-ready snapshot of the assistant state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub mode: AssistMode,
    /// True while an analysis is in flight.
    pub busy: bool,
    /// Current loading status line, when busy.
    pub status_line: Option<String>,
    pub transcript: Vec<MessageEntry>,
    pub dirty: bool,
}
