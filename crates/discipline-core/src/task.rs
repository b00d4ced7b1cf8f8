//! In-memory task checklist.
//!
//! Tasks exist so the user can point the session at one of them; nothing is
//! persisted and insertion order is the only order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskList {
    items: Vec<TaskItem>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TaskItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskItem> {
        self.items.iter()
    }

    /// Append a task. Empty text is a silent no-op; returns whether the
    /// task was added.
    pub fn add(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.is_empty() {
            return false;
        }
        self.items.push(TaskItem { text, done: false });
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<TaskItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Flip the checkbox. Returns false for an out-of-range index.
    pub fn set_done(&mut self, index: usize, done: bool) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.done = done;
                true
            }
            None => false,
        }
    }
}
