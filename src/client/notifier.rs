use std::sync::Mutex;

use tracing::warn;

/// Where the views surface blocking, user-facing messages.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Sends alerts to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        warn!("{}", message);
    }
}

/// Keeps every alert, for embedding toolkits that drain them on their own schedule.
#[derive(Debug, Default)]
pub struct QueuedNotifier {
    alerts: Mutex<Vec<String>>,
}

impl QueuedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all pending alerts, oldest first.
    pub fn drain(&self) -> Vec<String> {
        match self.alerts.lock() {
            Ok(mut alerts) => std::mem::take(&mut *alerts),
            Err(_) => Vec::new(),
        }
    }
}

impl Notifier for QueuedNotifier {
    fn alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }
}
