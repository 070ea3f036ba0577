//! TruthGuard core: pure assistant state machine, report formatters and
//! notification store.
mod effect;
mod msg;
mod notifications;
mod report;
mod state;
mod transcript;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{AnalysisPhase, Msg};
pub use notifications::{Notification, NotificationStore, Severity};
pub use report::{
    format_report, BiasAnalysis, BiasOutcome, BiasSummary, FactCheckNote, FactCheckVerdict,
    FormattedMessage, JobReport, TimelineEvent, TimelineOutcome,
};
pub use state::{AppState, AssistMode, PendingAnalysis, RequestId};
pub use transcript::{ChatRole, ClaimVerdict, MessageEntry, SourceRef};
pub use update::update;
pub use view_model::AppViewModel;
