use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient, user-visible message about a finished request.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
    /// How long a consumer should keep the notice on screen.
    pub display_for: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            display_for: Duration::from_secs(2),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            display_for: Duration::from_secs(4),
        }
    }
}

/// Sink for request notifications.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, notice: Notification);
}

fn log_notice(notice: &Notification) {
    match notice.level {
        NoticeLevel::Success => info!(message = %notice.message, "Notice"),
        NoticeLevel::Error => error!(message = %notice.message, "Notice"),
    }
}

/// Writes notices to the log only.
#[derive(Debug, Default, Clone)]
#[allow(dead_code)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notification) {
        log_notice(&notice);
    }
}

/// Fans notices out to any number of UI subscribers and logs them.
///
/// Slow subscribers lose the oldest notices rather than holding up requests.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notice: Notification) {
        log_notice(&notice);
        if self.sender.send(notice).is_err() {
            debug!("No notice subscribers");
        }
    }
}
