//! Check-in prompt answers.
//!
//! Every 15 accumulated working minutes the interface asks a single binary
//! question ("are you investing your time right now?") with an optional
//! free-text note. The answer becomes one activity-log line.

use serde::{Deserialize, Serialize};

/// A resolved self-check answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinAnswer {
    productive: bool,
    note: Option<String>,
}

impl CheckinAnswer {
    pub fn yes(note: Option<String>) -> Self {
        Self {
            productive: true,
            note: normalize(note),
        }
    }

    pub fn no(note: Option<String>) -> Self {
        Self {
            productive: false,
            note: normalize(note),
        }
    }

    pub fn productive(&self) -> bool {
        self.productive
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Binary productivity score: 1 affirmative, 0 otherwise.
    pub fn score(&self) -> i64 {
        if self.productive {
            1
        } else {
            0
        }
    }

    /// The activity text persisted to the log.
    pub fn activity_line(&self) -> String {
        let answer = if self.productive {
            "answer: yes"
        } else {
            "answer: no"
        };
        match &self.note {
            Some(note) => format!("{answer} - note: {note}"),
            None => answer.to_string(),
        }
    }
}

fn normalize(note: Option<String>) -> Option<String> {
    note.filter(|n| !n.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_scores_one() {
        let answer = CheckinAnswer::yes(None);
        assert_eq!(answer.score(), 1);
        assert_eq!(answer.activity_line(), "answer: yes");
    }

    #[test]
    fn no_scores_zero() {
        let answer = CheckinAnswer::no(None);
        assert_eq!(answer.score(), 0);
        assert_eq!(answer.activity_line(), "answer: no");
    }

    #[test]
    fn note_is_appended() {
        let answer = CheckinAnswer::yes(Some("finished the draft".into()));
        assert_eq!(answer.activity_line(), "answer: yes - note: finished the draft");
    }

    #[test]
    fn blank_note_is_dropped() {
        let answer = CheckinAnswer::no(Some("   ".into()));
        assert_eq!(answer.note(), None);
        assert_eq!(answer.activity_line(), "answer: no");
    }
}
