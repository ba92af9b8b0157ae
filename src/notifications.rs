use std::future::Future;
use tracing::debug;

/// Platform service that delivers daily reminders.
pub trait NotificationScheduler: Send + Sync {
    /// Schedules a repeating daily reminder. `None` when permission is denied
    /// or the platform could not schedule it.
    fn schedule(
        &self,
        title: &str,
        body: &str,
        hour: u32,
        minute: u32,
    ) -> impl Future<Output = Option<String>> + Send;

    /// Cancels a previously scheduled reminder. Failures are the scheduler's to log.
    fn cancel(&self, notification_id: &str) -> impl Future<Output = ()> + Send;
}

/// Scheduler for environments without a notification service; every request
/// is treated as denied.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledScheduler;

impl NotificationScheduler for DisabledScheduler {
    async fn schedule(&self, title: &str, _body: &str, hour: u32, minute: u32) -> Option<String> {
        debug!(title, hour, minute, "notifications disabled, reminder not scheduled");
        None
    }

    async fn cancel(&self, notification_id: &str) {
        debug!(notification_id, "notifications disabled, nothing to cancel");
    }
}
