//! User-visible notifications ("toasts").

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Pending notices, oldest first. Every pushed notice is also logged.
#[derive(Clone, Debug, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn success(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(%message, "notice");
        self.queue.push_back(Notice {
            level: NoticeLevel::Success,
            message,
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "error notice");
        self.queue.push_back(Notice {
            level: NoticeLevel::Error,
            message,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn last(&self) -> Option<&Notice> {
        self.queue.back()
    }

    /// Take everything shown so far.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.queue.drain(..).collect()
    }
}
