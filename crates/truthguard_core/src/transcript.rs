/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Bot,
}

/// One entry in the append-only chat transcript.
///
/// Entries are immutable once appended; structured extras beyond the markdown
/// body are optional and filled in by the report formatters.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageEntry {
    pub role: ChatRole,
    pub title: Option<String>,
    pub content: String,
    pub sources: Vec<SourceRef>,
    pub confidence: Option<u8>,
    pub processing_secs: Option<f64>,
    pub claims: Vec<ClaimVerdict>,
}

impl MessageEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            title: None,
            content: content.into(),
            sources: Vec::new(),
            confidence: None,
            processing_secs: None,
            claims: Vec::new(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Bot,
            ..Self::user(content)
        }
    }
}

/// A cited source attached to a bot entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// 0..=100, derived from the backend's bias score.
    pub credibility: u8,
    pub domain: String,
}

/// Per-claim verdict from a verification report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimVerdict {
    pub claim: String,
    pub verdict: String,
    pub confidence: String,
    pub explanation: String,
}
