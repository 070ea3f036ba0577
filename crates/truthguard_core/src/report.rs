//! Report formatters: pure mapping from terminal job payloads to transcript
//! entries. One variant per job kind; missing payloads degrade to a fixed
//! apology sentence instead of erroring.

use std::fmt::Write as _;

use crate::{ClaimVerdict, SourceRef};

const TIMELINE_FALLBACK: &str = "I'm sorry, but I couldn't generate a timeline for that topic.";
const BIAS_FALLBACK: &str = "I'm sorry, but I couldn't retrieve any bias analysis results.";
const FACT_CHECK_FALLBACK: &str = "I couldn't verify this information. Please try again.";

/// Terminal payload of a completed job, tagged by job kind.
///
/// The inner `Option` is `None` when the backend reported `complete` without
/// a results object.
#[derive(Debug, Clone, PartialEq)]
pub enum JobReport {
    Timeline(Option<TimelineOutcome>),
    Bias(Option<BiasOutcome>),
    FactCheck(Option<FactCheckVerdict>),
}

impl JobReport {
    /// Whether appending this report ends the pending analysis.
    ///
    /// A timeline report is phase 1 of 2 in the research flow; bias and
    /// fact-check reports are always the last word.
    pub fn concludes_analysis(&self) -> bool {
        !matches!(self, JobReport::Timeline(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineOutcome {
    pub background: String,
    pub events: Vec<TimelineEvent>,
    pub conclusion: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEvent {
    pub date: String,
    pub event: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiasOutcome {
    pub summary: BiasSummary,
    pub analyses: Vec<BiasAnalysis>,
    pub fact_checks: Vec<FactCheckNote>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BiasSummary {
    pub total_articles_analyzed: u32,
    pub neutral_articles_found: u32,
    pub biased_articles_found: u32,
    pub fact_checks_generated: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiasAnalysis {
    pub source_url: String,
    /// Signed bias score in [-1, 1]; 0 is neutral.
    pub final_score: f64,
    pub judgment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactCheckNote {
    pub misconception: String,
    pub correction: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactCheckVerdict {
    pub overall_verdict: String,
    /// 0..=1 from the backend.
    pub confidence_score: f64,
    pub executive_summary: String,
    pub claims: Vec<ClaimVerdict>,
    pub key_insights: Vec<String>,
}

/// Display-ready pieces of a bot transcript entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormattedMessage {
    pub title: Option<&'static str>,
    pub content: String,
    pub sources: Vec<SourceRef>,
    pub confidence: Option<u8>,
    pub claims: Vec<ClaimVerdict>,
}

pub fn format_report(report: &JobReport) -> FormattedMessage {
    match report {
        JobReport::Timeline(outcome) => format_timeline(outcome.as_ref()),
        JobReport::Bias(outcome) => format_bias(outcome.as_ref()),
        JobReport::FactCheck(verdict) => format_fact_check(verdict.as_ref()),
    }
}

fn format_timeline(outcome: Option<&TimelineOutcome>) -> FormattedMessage {
    let Some(outcome) = outcome else {
        return FormattedMessage {
            content: TIMELINE_FALLBACK.to_string(),
            ..FormattedMessage::default()
        };
    };

    let mut content = format!(
        "### Background\n{}\n\n---\n\n### Timeline of Events\n\n",
        outcome.background
    );
    for item in &outcome.events {
        let _ = writeln!(content, "- **{}:** {}", item.date, item.event);
    }
    let _ = write!(content, "\n---\n\n### Conclusion\n{}", outcome.conclusion);

    FormattedMessage {
        title: Some("Historical Timeline"),
        content,
        ..FormattedMessage::default()
    }
}

fn format_bias(outcome: Option<&BiasOutcome>) -> FormattedMessage {
    let Some(outcome) = outcome else {
        return FormattedMessage {
            content: BIAS_FALLBACK.to_string(),
            ..FormattedMessage::default()
        };
    };

    let summary = &outcome.summary;
    let mut content = format!(
        "### Summary\nI analyzed **{}** articles. Neutral: **{}**, Biased: **{}**.\n\n",
        summary.total_articles_analyzed,
        summary.neutral_articles_found,
        summary.biased_articles_found
    );

    if !outcome.fact_checks.is_empty() {
        content.push_str("---\n\n### Fact-Checks\n\n");
        for (index, check) in outcome.fact_checks.iter().enumerate() {
            let _ = write!(
                content,
                "**{}. Misconception:** *\"{}\"*\n**Correction:** {}\n\n",
                index + 1,
                check.misconception,
                check.correction
            );
        }
    }

    let sources: Vec<SourceRef> = outcome.analyses.iter().map(source_from_analysis).collect();
    let confidence = mean_credibility(&sources);

    FormattedMessage {
        title: Some("Bias & Fact-Check Report"),
        content,
        sources,
        confidence,
        claims: Vec::new(),
    }
}

fn format_fact_check(verdict: Option<&FactCheckVerdict>) -> FormattedMessage {
    let Some(verdict) = verdict else {
        return FormattedMessage {
            content: FACT_CHECK_FALLBACK.to_string(),
            ..FormattedMessage::default()
        };
    };

    let mut content = format!("### Executive Summary\n{}\n\n", verdict.executive_summary);
    if !verdict.key_insights.is_empty() {
        content.push_str("### Key Insights\n");
        for insight in &verdict.key_insights {
            let _ = writeln!(content, "\u{2022} {insight}");
        }
    }

    FormattedMessage {
        title: Some("Verification Report"),
        content,
        sources: Vec::new(),
        confidence: Some(scaled_confidence(verdict.confidence_score)),
        claims: verdict.claims.clone(),
    }
}

fn source_from_analysis(analysis: &BiasAnalysis) -> SourceRef {
    let domain = url::Url::parse(&analysis.source_url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| analysis.source_url.clone());
    let title = domain.strip_prefix("www.").unwrap_or(&domain).to_string();

    SourceRef {
        title,
        url: analysis.source_url.clone(),
        snippet: format!("Bias Assessment: {}", analysis.judgment),
        credibility: credibility_from_score(analysis.final_score),
        domain,
    }
}

/// A neutral score (0.0) maps to 100; maximal bias (|score| >= 1.0) to 0.
fn credibility_from_score(score: f64) -> u8 {
    (((1.0 - score.abs()).clamp(0.0, 1.0)) * 100.0).round() as u8
}

fn mean_credibility(sources: &[SourceRef]) -> Option<u8> {
    if sources.is_empty() {
        return None;
    }
    let total: u32 = sources.iter().map(|s| u32::from(s.credibility)).sum();
    let mean = f64::from(total) / sources.len() as f64;
    Some(mean.round() as u8)
}

fn scaled_confidence(score: f64) -> u8 {
    ((score * 100.0).clamp(0.0, 100.0)).round() as u8
}
