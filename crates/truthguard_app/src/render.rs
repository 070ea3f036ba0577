//! Terminal rendering of transcript entries and notifications.

use chrono::Utc;
use truthguard_core::{ChatRole, MessageEntry, Notification, NotificationStore, Severity};

pub fn message(entry: &MessageEntry) {
    match entry.role {
        ChatRole::User => println!("\nyou> {}", entry.content),
        ChatRole::Bot => bot_message(entry),
    }
}

fn bot_message(entry: &MessageEntry) {
    println!();
    if let Some(title) = &entry.title {
        println!("== {title} ==");
    }
    println!("{}", entry.content);

    for claim in &entry.claims {
        println!(
            "  [{}] {} ({})",
            claim.verdict.to_uppercase(),
            claim.claim,
            claim.confidence
        );
        if !claim.explanation.is_empty() {
            println!("      {}", claim.explanation);
        }
    }

    if !entry.sources.is_empty() {
        println!("\nSources:");
        for source in &entry.sources {
            println!(
                "  - {} ({}% credibility) {}",
                source.title, source.credibility, source.url
            );
            println!("    {}", source.snippet);
        }
    }

    match (entry.confidence, entry.processing_secs) {
        (Some(confidence), Some(secs)) => {
            println!("\n{confidence}% confidence, {secs:.1}s")
        }
        (Some(confidence), None) => println!("\n{confidence}% confidence"),
        (None, Some(secs)) => println!("\n{secs:.1}s"),
        (None, None) => {}
    }
}

pub fn status_line(status: &str) {
    println!("... {status}");
}

pub fn notifications(store: &NotificationStore) {
    if store.entries().is_empty() {
        println!("No notifications.");
        return;
    }
    println!("Notifications ({} unread):", store.unread_count());
    for entry in store.entries() {
        notification(entry);
    }
}

fn notification(entry: &Notification) {
    let marker = if entry.read { ' ' } else { '*' };
    println!(
        "{marker} [{}] #{} {} - {} ({})",
        severity_label(entry.severity),
        entry.id,
        entry.title,
        entry.message,
        age(entry),
    );
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Success => "success",
        Severity::Warning => "warning",
        Severity::Error => "error",
    }
}

fn age(entry: &Notification) -> String {
    let elapsed = Utc::now() - entry.timestamp;
    if elapsed.num_hours() >= 1 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_minutes() >= 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else {
        "just now".to_string()
    }
}
