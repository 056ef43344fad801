use log::debug;
use serde::{Deserialize, Serialize};

use std::collections::VecDeque;

pub const DEFAULT_LIFE_MS: u32 = 3000;

/// Undrained toasts kept at most; the oldest go first.
pub const QUEUE_LIMIT: usize = 20;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub life: u32,
}

/// Pending user feedback. Views push, the page render or the toast endpoint drains.
#[derive(Debug, Default)]
pub struct ToastService {
    pending: VecDeque<Toast>,
}

impl ToastService {
    pub fn new() -> ToastService {
        ToastService::default()
    }

    pub fn add(&mut self, severity: Severity, summary: &str, detail: impl Into<String>) {
        let toast = Toast {
            severity,
            summary: summary.to_string(),
            detail: detail.into(),
            life: DEFAULT_LIFE_MS,
        };
        debug!("toast {}: {}", toast.severity.as_str(), toast.summary);

        if self.pending.len() >= QUEUE_LIMIT {
            self.pending.pop_front();
        }
        self.pending.push_back(toast);
    }

    pub fn success(&mut self, summary: &str, detail: impl Into<String>) {
        self.add(Severity::Success, summary, detail);
    }

    pub fn warn(&mut self, summary: &str, detail: impl Into<String>) {
        self.add(Severity::Warn, summary, detail);
    }

    pub fn pending(&self) -> impl Iterator<Item = &Toast> {
        self.pending.iter()
    }

    pub fn drain(&mut self) -> Vec<Toast> {
        self.pending.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
