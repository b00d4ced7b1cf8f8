use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the system produces an Event.
/// The presentation layer reacts to them: re-render, persist, prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        focus: String,
        quote: String,
        at: DateTime<Utc>,
    },
    SessionStopped {
        elapsed_seconds: u64,
        /// True when a check-in prompt was open and got abandoned by the stop.
        abandoned_checkin: bool,
        at: DateTime<Utc>,
    },
    /// A 15-minute work multiple was crossed; the interface should present
    /// the self-check prompt.
    CheckinDue {
        elapsed_seconds: u64,
        at: DateTime<Utc>,
    },
    /// A self-check answer was appended to the activity log.
    CheckinRecorded {
        entry_id: i64,
        score: i64,
        at: DateTime<Utc>,
    },
    TargetChanged {
        hours: u32,
        at: DateTime<Utc>,
    },
    FocusChanged {
        focus: String,
        at: DateTime<Utc>,
    },
    TaskListChanged {
        count: usize,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        elapsed_seconds: u64,
        display: String,
        progress: f64,
        focus: String,
        daily_target_hours: u32,
        at: DateTime<Utc>,
    },
}
