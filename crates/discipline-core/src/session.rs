//! Command layer over the application state.
//!
//! `AppSession` is the single owner of all mutable state: the session
//! timer, the task checklist, and the database handle. The presentation
//! layer turns user input into [`Command`]s and reacts to the returned
//! [`Event`]s (re-render, prompt, persisted) - no ambient globals, no
//! callback wiring, and handlers are testable without any interface
//! harness.

use chrono::Utc;
use tracing::{debug, info};

use crate::checkin::CheckinAnswer;
use crate::error::CoreError;
use crate::events::Event;
use crate::quotes;
use crate::storage::{Config, Database};
use crate::task::TaskList;
use crate::timer::{SessionTimer, ToggleTransition};

/// kv key under which the serialized timer is stored between runs.
const TIMER_KV_KEY: &str = "session_timer";

/// User-level commands the presentation layer can issue.
#[derive(Debug, Clone)]
pub enum Command {
    Toggle,
    Tick,
    SetTarget(u32),
    SetFocus(String),
    AnswerYes(Option<String>),
    AnswerNo(Option<String>),
    AddTask(String),
    RemoveTask(usize),
    SetTaskDone(usize, bool),
    /// Copy a task's text into the current focus label.
    FocusTask(usize),
}

pub struct AppSession {
    timer: SessionTimer,
    tasks: TaskList,
    db: Database,
}

impl AppSession {
    pub fn new(db: Database, config: &Config) -> Self {
        let mut timer = SessionTimer::new();
        // The config accessor already falls back for out-of-range values.
        let _ = timer.set_target(config.daily_target_hours());
        timer.set_focus(config.timer.default_focus.clone());
        Self {
            timer,
            tasks: TaskList::new(),
            db,
        }
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Apply one command and return the events it produced.
    ///
    /// Invalid configuration (a bad goal value, a goal change during a
    /// session, an empty task) is a silent no-op: the command produces no
    /// events. Only storage faults surface as errors.
    pub fn handle(&mut self, command: Command) -> Result<Vec<Event>, CoreError> {
        match command {
            Command::Toggle => Ok(vec![self.toggle()]),
            Command::Tick => Ok(self.timer.tick().into_iter().collect()),
            Command::SetTarget(hours) => match self.timer.set_target(hours) {
                Ok(()) => Ok(vec![Event::TargetChanged {
                    hours,
                    at: Utc::now(),
                }]),
                Err(e) => {
                    debug!(%e, "goal change rejected");
                    Ok(Vec::new())
                }
            },
            Command::SetFocus(label) => {
                self.timer.set_focus(label.clone());
                Ok(vec![Event::FocusChanged {
                    focus: label,
                    at: Utc::now(),
                }])
            }
            Command::AnswerYes(note) => self.record_answer(CheckinAnswer::yes(note)),
            Command::AnswerNo(note) => self.record_answer(CheckinAnswer::no(note)),
            Command::AddTask(text) => {
                if self.tasks.add(text) {
                    Ok(vec![self.task_list_changed()])
                } else {
                    Ok(Vec::new())
                }
            }
            Command::RemoveTask(index) => {
                if self.tasks.remove(index).is_some() {
                    Ok(vec![self.task_list_changed()])
                } else {
                    Ok(Vec::new())
                }
            }
            Command::SetTaskDone(index, done) => {
                if self.tasks.set_done(index, done) {
                    Ok(vec![self.task_list_changed()])
                } else {
                    Ok(Vec::new())
                }
            }
            Command::FocusTask(index) => match self.tasks.get(index) {
                Some(task) => {
                    let focus = task.text.clone();
                    self.timer.set_focus(focus.clone());
                    Ok(vec![Event::FocusChanged {
                        focus,
                        at: Utc::now(),
                    }])
                }
                None => Ok(Vec::new()),
            },
        }
    }

    fn toggle(&mut self) -> Event {
        match self.timer.toggle() {
            ToggleTransition::Started { at } => {
                let quote = quotes::random_quote();
                info!(focus = self.timer.focus(), "session started");
                Event::SessionStarted {
                    focus: self.timer.focus().to_string(),
                    quote: quote.to_string(),
                    at,
                }
            }
            ToggleTransition::Stopped {
                elapsed_seconds,
                abandoned_checkin,
                at,
            } => {
                info!(elapsed_seconds, "session stopped");
                if abandoned_checkin {
                    debug!("open check-in prompt abandoned, nothing recorded");
                }
                Event::SessionStopped {
                    elapsed_seconds,
                    abandoned_checkin,
                    at,
                }
            }
        }
    }

    fn record_answer(&mut self, answer: CheckinAnswer) -> Result<Vec<Event>, CoreError> {
        if !self.timer.resolve_checkin() {
            return Ok(Vec::new());
        }
        // The prompt is resolved before the write: if the insert fails the
        // entry is lost but the session keeps running.
        let entry_id = self.db.record(&answer.activity_line(), answer.score())?;
        Ok(vec![Event::CheckinRecorded {
            entry_id,
            score: answer.score(),
            at: Utc::now(),
        }])
    }

    fn task_list_changed(&self) -> Event {
        Event::TaskListChanged {
            count: self.tasks.len(),
            at: Utc::now(),
        }
    }

    /// Restore a timer persisted by a previous run, parked in `Idle`.
    /// Returns whether anything was restored.
    pub fn restore_saved_timer(&mut self) -> Result<bool, CoreError> {
        if let Some(json) = self.db.kv_get(TIMER_KV_KEY)? {
            if let Ok(mut timer) = serde_json::from_str::<SessionTimer>(&json) {
                timer.park();
                self.timer = timer;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Persist the timer so the next run can pick the count back up.
    pub fn save_timer(&self) -> Result<(), CoreError> {
        let json = serde_json::to_string(&self.timer)?;
        self.db.kv_set(TIMER_KV_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::QUOTES;
    use crate::timer::{Phase, CHECKIN_INTERVAL_SECS};

    fn session() -> AppSession {
        let db = Database::open_memory().unwrap();
        AppSession::new(db, &Config::default())
    }

    fn tick_until_checkin(session: &mut AppSession) -> Vec<Event> {
        for _ in 0..CHECKIN_INTERVAL_SECS - 1 {
            assert!(session.handle(Command::Tick).unwrap().is_empty());
        }
        session.handle(Command::Tick).unwrap()
    }

    #[test]
    fn toggle_starts_with_a_quote() {
        let mut session = session();
        let events = session.handle(Command::Toggle).unwrap();
        match &events[..] {
            [Event::SessionStarted { focus, quote, .. }] => {
                assert_eq!(focus, "General Work");
                assert!(QUOTES.contains(&quote.as_str()));
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn answer_yes_appends_one_entry() {
        let mut session = session();
        session.handle(Command::Toggle).unwrap();
        let events = tick_until_checkin(&mut session);
        assert!(matches!(&events[..], [Event::CheckinDue { .. }]));

        let events = session
            .handle(Command::AnswerYes(Some("deep in the draft".into())))
            .unwrap();
        assert!(matches!(
            &events[..],
            [Event::CheckinRecorded { score: 1, .. }]
        ));
        assert_eq!(session.timer().phase(), Phase::Working);

        let entries = session.database().entries(None).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].activity, "answer: yes - note: deep in the draft");
        assert_eq!(entries[0].productivity_score, 1);
    }

    #[test]
    fn answer_no_scores_zero() {
        let mut session = session();
        session.handle(Command::Toggle).unwrap();
        tick_until_checkin(&mut session);
        session.handle(Command::AnswerNo(None)).unwrap();
        let entries = session.database().entries(None).unwrap();
        assert_eq!(entries[0].activity, "answer: no");
        assert_eq!(entries[0].productivity_score, 0);
    }

    #[test]
    fn answer_without_open_prompt_records_nothing() {
        let mut session = session();
        session.handle(Command::Toggle).unwrap();
        let events = session.handle(Command::AnswerYes(None)).unwrap();
        assert!(events.is_empty());
        assert!(session.database().entries(None).unwrap().is_empty());
    }

    #[test]
    fn abandoning_a_prompt_records_nothing() {
        let mut session = session();
        session.handle(Command::Toggle).unwrap();
        tick_until_checkin(&mut session);
        let events = session.handle(Command::Toggle).unwrap();
        assert!(matches!(
            &events[..],
            [Event::SessionStopped {
                abandoned_checkin: true,
                ..
            }]
        ));
        assert!(session.database().entries(None).unwrap().is_empty());
    }

    #[test]
    fn goal_change_during_session_is_a_silent_no_op() {
        let mut session = session();
        session.handle(Command::Toggle).unwrap();
        let events = session.handle(Command::SetTarget(8)).unwrap();
        assert!(events.is_empty());
        assert_eq!(session.timer().daily_target_hours(), 10);
    }

    #[test]
    fn empty_task_produces_no_events() {
        let mut session = session();
        let events = session.handle(Command::AddTask(String::new())).unwrap();
        assert!(events.is_empty());
        assert!(session.tasks().is_empty());
    }

    #[test]
    fn focus_task_copies_its_text() {
        let mut session = session();
        session
            .handle(Command::AddTask("Ship the release".into()))
            .unwrap();
        let events = session.handle(Command::FocusTask(0)).unwrap();
        assert!(matches!(&events[..], [Event::FocusChanged { .. }]));
        assert_eq!(session.timer().focus(), "Ship the release");
    }

    #[test]
    fn saved_timer_restores_parked() {
        let mut session = session();
        session.handle(Command::Toggle).unwrap();
        for _ in 0..10 {
            session.handle(Command::Tick).unwrap();
        }
        session.save_timer().unwrap();
        for _ in 0..10 {
            session.handle(Command::Tick).unwrap();
        }
        assert_eq!(session.timer().elapsed_seconds(), 20);

        assert!(session.restore_saved_timer().unwrap());
        assert_eq!(session.timer().elapsed_seconds(), 10);
        assert_eq!(session.timer().phase(), Phase::Idle);
    }
}
