use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Success,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Pops up briefly without blocking the user
    Emerge,
    /// Only recorded in the notification list
    Quiet,
}

/// User-visible notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub status: NotificationStatus,
    pub mode: DisplayMode,
}

impl Notification {
    /// Non-blocking failure notice
    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            status: NotificationStatus::Fail,
            mode: DisplayMode::Emerge,
        }
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Sink that collects notifications in memory
#[derive(Debug, Default)]
pub struct InMemoryNotificationSink {
    received: Mutex<Vec<Notification>>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.received.lock().clone()
    }
}

impl NotificationSink for InMemoryNotificationSink {
    fn notify(&self, notification: Notification) {
        self.received.lock().push(notification);
    }
}
