//! Session timer implementation.
//!
//! The timer is a tick-driven state machine. It does not use internal
//! threads or sleep on its own - the hosting loop is responsible for calling
//! `tick()` once per wall-clock second while a session is on, and stopping
//! that loop is a cooperative cancellation checked at each cycle boundary.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Working -> AwaitingCheckin -> Working (loop) -> Idle
//! ```
//!
//! Accumulated seconds survive pause/resume within one process run. An open
//! check-in prompt does not stop the clock; time keeps accumulating until
//! the prompt is answered or the session is toggled off.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

/// Seconds of accumulated work between self-check prompts.
pub const CHECKIN_INTERVAL_SECS: u64 = 15 * 60;

/// The daily hour goals the goal selector offers.
pub const ALLOWED_TARGET_HOURS: [u32; 5] = [3, 5, 8, 10, 12];

pub const DEFAULT_TARGET_HOURS: u32 = 10;

pub const DEFAULT_FOCUS: &str = "General Work";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Working,
    /// A self-check prompt is open. The clock keeps running underneath it.
    AwaitingCheckin,
}

/// Result of a `toggle()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleTransition {
    Started {
        at: DateTime<Utc>,
    },
    Stopped {
        elapsed_seconds: u64,
        /// True when an unanswered check-in prompt was abandoned by the stop.
        abandoned_checkin: bool,
        at: DateTime<Utc>,
    },
}

/// Check whether `hours` is one of the allowed daily goals.
pub fn validate_target_hours(hours: u32) -> Result<(), ValidationError> {
    if ALLOWED_TARGET_HOURS.contains(&hours) {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: "daily_target_hours".into(),
            message: format!("{hours} is not one of {ALLOWED_TARGET_HOURS:?}"),
        })
    }
}

/// Core session timer.
///
/// Counts whole seconds of focused work toward a daily hour goal and raises
/// a check-in signal every 15 accumulated minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    phase: Phase,
    elapsed_seconds: u64,
    daily_target_hours: u32,
    current_focus_label: String,
    /// Wall-clock instant the session was last switched on.
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
}

impl SessionTimer {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            elapsed_seconds: 0,
            daily_target_hours: DEFAULT_TARGET_HOURS,
            current_focus_label: DEFAULT_FOCUS.into(),
            started_at: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while the session accumulates time (a pending check-in prompt
    /// counts as working).
    pub fn is_working(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn daily_target_hours(&self) -> u32 {
        self.daily_target_hours
    }

    pub fn focus(&self) -> &str {
        &self.current_focus_label
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// 0.0 .. 1.0 progress toward the daily goal, clamped at 1.0.
    pub fn progress(&self) -> f64 {
        let target_secs = u64::from(self.daily_target_hours) * 3600;
        if target_secs == 0 {
            return 0.0;
        }
        (self.elapsed_seconds as f64 / target_secs as f64).min(1.0)
    }

    /// `HH:MM:SS` display string. Hours are not wrapped at 24.
    pub fn display(&self) -> String {
        let hours = self.elapsed_seconds / 3600;
        let minutes = (self.elapsed_seconds % 3600) / 60;
        let seconds = self.elapsed_seconds % 60;
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            elapsed_seconds: self.elapsed_seconds,
            display: self.display(),
            progress: self.progress(),
            focus: self.current_focus_label.clone(),
            daily_target_hours: self.daily_target_hours,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch the session on or off.
    ///
    /// Starting leaves `elapsed_seconds` untouched so pause/resume never
    /// loses progress. Stopping abandons an open check-in prompt without
    /// writing anything.
    pub fn toggle(&mut self) -> ToggleTransition {
        match self.phase {
            Phase::Idle => {
                let at = Utc::now();
                self.phase = Phase::Working;
                self.started_at = Some(at);
                ToggleTransition::Started { at }
            }
            Phase::Working | Phase::AwaitingCheckin => {
                let abandoned_checkin = self.phase == Phase::AwaitingCheckin;
                self.phase = Phase::Idle;
                self.started_at = None;
                ToggleTransition::Stopped {
                    elapsed_seconds: self.elapsed_seconds,
                    abandoned_checkin,
                    at: Utc::now(),
                }
            }
        }
    }

    /// Advance the clock by one second.
    ///
    /// Returns `Some(Event::CheckinDue)` at the instant a 15-minute multiple
    /// is crossed. The signal is edge-triggered: it cannot re-fire while the
    /// counter rests at a multiple during a pause, and a second multiple
    /// crossed while a prompt is still open does not raise another prompt.
    pub fn tick(&mut self) -> Option<Event> {
        match self.phase {
            Phase::Idle => None,
            Phase::Working => {
                self.elapsed_seconds += 1;
                if self.elapsed_seconds % CHECKIN_INTERVAL_SECS == 0 {
                    self.phase = Phase::AwaitingCheckin;
                    return Some(Event::CheckinDue {
                        elapsed_seconds: self.elapsed_seconds,
                        at: Utc::now(),
                    });
                }
                None
            }
            Phase::AwaitingCheckin => {
                // An open prompt does not stop the clock.
                self.elapsed_seconds += 1;
                None
            }
        }
    }

    /// Resolve an open check-in prompt and return to `Working`.
    ///
    /// Returns false (and changes nothing) when no prompt is open.
    pub fn resolve_checkin(&mut self) -> bool {
        if self.phase != Phase::AwaitingCheckin {
            return false;
        }
        self.phase = Phase::Working;
        true
    }

    /// Change the daily hour goal. Only allowed while the session is off,
    /// and only to one of the enumerated goals; rejection leaves the state
    /// unchanged.
    pub fn set_target(&mut self, hours: u32) -> Result<(), ValidationError> {
        if self.is_working() {
            return Err(ValidationError::InvalidValue {
                field: "daily_target_hours".into(),
                message: "cannot change the goal while a session is on".into(),
            });
        }
        validate_target_hours(hours)?;
        self.daily_target_hours = hours;
        Ok(())
    }

    /// Replace the current focus label. Always allowed, empty allowed.
    pub fn set_focus(&mut self, label: impl Into<String>) {
        self.current_focus_label = label.into();
    }

    /// Force the timer into `Idle`, keeping accumulated seconds.
    ///
    /// Used when resuming a persisted timer: a restored session always comes
    /// back paused, whatever phase it was saved in.
    pub fn park(&mut self) {
        self.phase = Phase::Idle;
        self.started_at = None;
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new()
    }
}
