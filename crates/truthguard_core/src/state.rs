use crate::view_model::AppViewModel;
use crate::{AnalysisPhase, MessageEntry};

pub type RequestId = u64;

/// Assistant mode: open-ended research or claim verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistMode {
    #[default]
    Research,
    Verify,
}

/// The one in-flight analysis, if any.
///
/// At most one exists at a time; a new submission supersedes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAnalysis {
    pub request_id: RequestId,
    pub topic: String,
    pub status_line: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    input: String,
    mode: AssistMode,
    transcript: Vec<MessageEntry>,
    pending: Option<PendingAnalysis>,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            mode: self.mode,
            busy: self.pending.is_some(),
            status_line: self.pending.as_ref().map(|p| p.status_line.clone()),
            transcript: self.transcript.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and resets it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn mode(&self) -> AssistMode {
        self.mode
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn pending(&self) -> Option<&PendingAnalysis> {
        self.pending.as_ref()
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
        self.dirty = true;
    }

    pub(crate) fn set_mode(&mut self, mode: AssistMode) {
        if self.mode != mode {
            self.mode = mode;
            self.dirty = true;
        }
    }

    /// Appends the user entry, clears the input and registers the pending
    /// analysis. Returns the freshly allocated request id.
    pub(crate) fn begin_analysis(&mut self, topic: String, status_line: String) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.transcript.push(MessageEntry::user(topic.clone()));
        self.input.clear();
        self.pending = Some(PendingAnalysis {
            request_id,
            topic,
            status_line,
        });
        self.dirty = true;
        request_id
    }

    /// True if `request_id` matches the pending analysis.
    pub(crate) fn is_current(&self, request_id: RequestId) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.request_id == request_id)
    }

    pub(crate) fn apply_progress(&mut self, request_id: RequestId, phase: AnalysisPhase, progress: &str) {
        if !self.is_current(request_id) {
            return;
        }
        let status_line = match phase {
            AnalysisPhase::Timeline => format!("Phase 1/2: {progress}"),
            AnalysisPhase::Bias => format!("Phase 2/2: {progress}"),
        };
        if let Some(pending) = self.pending.as_mut() {
            pending.status_line = status_line;
            self.dirty = true;
        }
    }

    /// Appends a bot entry. When `concludes` the pending analysis is cleared,
    /// otherwise the status line moves to the next phase.
    pub(crate) fn apply_report(&mut self, entry: MessageEntry, concludes: bool, next_status: &str) {
        self.transcript.push(entry);
        if concludes {
            self.pending = None;
        } else if let Some(pending) = self.pending.as_mut() {
            pending.status_line = next_status.to_string();
        }
        self.dirty = true;
    }

    pub(crate) fn apply_failure(&mut self, error: &str) {
        self.transcript
            .push(MessageEntry::bot(format!("An error occurred: {error}")));
        self.pending = None;
        self.dirty = true;
    }
}
