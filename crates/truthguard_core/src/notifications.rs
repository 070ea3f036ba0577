//! Notification store for the assistant shell.
//!
//! An explicit, injected store rather than ambient global state: callers own
//! an instance and pass it where it is needed. The unread count is always
//! derived from the entries, never cached.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    /// In-app route the notification links to, when it has one.
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationStore {
    entries: Vec<Notification>,
    next_id: u64,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the fixed sample entries the product ships
    /// with. State is in-memory only and resets with the process.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let entries = vec![
            Notification {
                id: 1,
                title: "Analysis Complete".to_string(),
                message: "Your deepfake detection analysis has been completed successfully."
                    .to_string(),
                severity: Severity::Success,
                timestamp: now - Duration::minutes(2),
                read: false,
                action: Some("/deepfake-detection".to_string()),
            },
            Notification {
                id: 2,
                title: "New Trending Topic".to_string(),
                message: "A new misinformation trend has been detected in your monitored topics."
                    .to_string(),
                severity: Severity::Warning,
                timestamp: now - Duration::minutes(15),
                read: false,
                action: Some("/social-trends".to_string()),
            },
            Notification {
                id: 3,
                title: "Weekly Report Ready".to_string(),
                message: "Your weekly fact-checking report is now available for download."
                    .to_string(),
                severity: Severity::Info,
                timestamp: now - Duration::hours(2),
                read: true,
                action: Some("/knowledge-base".to_string()),
            },
            Notification {
                id: 4,
                title: "Security Alert".to_string(),
                message:
                    "Suspicious activity detected in your account. Please review your recent activity."
                        .to_string(),
                severity: Severity::Error,
                timestamp: now - Duration::hours(24),
                read: false,
                action: None,
            },
        ];
        Self {
            entries,
            next_id: 5,
        }
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Count of unread entries, recomputed on every call.
    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    /// Marks one entry read. Idempotent; unknown ids are ignored.
    pub fn mark_read(&mut self, id: u64) {
        if let Some(entry) = self.entries.iter_mut().find(|n| n.id == id) {
            entry.read = true;
        }
    }

    pub fn mark_all_read(&mut self) {
        for entry in &mut self.entries {
            entry.read = true;
        }
    }

    /// Prepends a fresh unread entry timestamped now. Returns its id.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        action: Option<String>,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.insert(
            0,
            Notification {
                id,
                title: title.into(),
                message: message.into(),
                severity,
                timestamp: Utc::now(),
                read: false,
                action,
            },
        );
        id
    }

    /// Removes an entry by id. Unknown ids are ignored.
    pub fn remove(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }
}
