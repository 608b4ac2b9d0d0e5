// Download warning - Leave guard and reminder notices while a job runs

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

use crate::ports::NotifierPort;

/// Shown when the user tries to leave while a job is in flight
pub const LEAVE_WARNING: &str =
    "A download is in progress. Are you sure you want to leave? Your download will be cancelled.";

/// Repeated while a job is in flight
pub const KEEP_OPEN_NOTICE: &str =
    "Please do not close this window. Your download is in progress...";

/// Arms the leave guard and repeats a reminder notice until disabled
#[derive(Clone)]
pub struct DownloadWarning {
    notifier: Arc<dyn NotifierPort>,
    active: Arc<AtomicBool>,
    epoch: Arc<AtomicU64>,
    reminder_interval: Option<Duration>,
}

impl DownloadWarning {
    /// `reminder_interval` of `None` shows the notice once per job
    pub fn new(notifier: Arc<dyn NotifierPort>, reminder_interval: Option<Duration>) -> Self {
        Self {
            notifier,
            active: Arc::new(AtomicBool::new(false)),
            epoch: Arc::new(AtomicU64::new(0)),
            reminder_interval,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Arm the guard. Enabling an already active warning does nothing.
    pub fn enable(&self) {
        if self.active.swap(true, Ordering::SeqCst) {
            return;
        }
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;

        self.notifier.set_leave_guard(Some(LEAVE_WARNING));
        self.notifier.notify_warning(KEEP_OPEN_NOTICE);

        if let (Some(interval), Ok(handle)) =
            (self.reminder_interval, tokio::runtime::Handle::try_current())
        {
            let warning = self.clone();
            handle.spawn(async move { warning.remind(epoch, interval).await });
        }
    }

    /// Disarm the guard. Idempotent.
    pub fn disable(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.notifier.set_leave_guard(None);
    }

    fn still_current(&self, epoch: u64) -> bool {
        self.is_active() && self.epoch.load(Ordering::SeqCst) == epoch
    }

    async fn remind(self, epoch: u64, interval: Duration) {
        loop {
            tokio::time::sleep(interval).await;
            if !self.still_current(epoch) {
                trace!(epoch, "Reminder loop finished");
                return;
            }
            self.notifier.notify_warning(KEEP_OPEN_NOTICE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        warnings: Mutex<Vec<String>>,
        guard: Mutex<Vec<Option<String>>>,
    }

    impl NotifierPort for RecordingNotifier {
        fn notify_warning(&self, message: &str) {
            self.warnings.lock().unwrap().push(message.to_string());
        }

        fn set_leave_guard(&self, message: Option<&str>) {
            self.guard.lock().unwrap().push(message.map(str::to_string));
        }
    }

    #[test]
    fn test_enable_and_disable_are_idempotent() {
        let notifier = Arc::new(RecordingNotifier::default());
        let warning = DownloadWarning::new(notifier.clone(), None);

        warning.enable();
        warning.enable();
        assert!(warning.is_active());
        warning.disable();
        warning.disable();
        assert!(!warning.is_active());

        let guard = notifier.guard.lock().unwrap();
        assert_eq!(
            *guard,
            vec![Some(LEAVE_WARNING.to_string()), None]
        );
        assert_eq!(notifier.warnings.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reminder_repeats_while_active() {
        let notifier = Arc::new(RecordingNotifier::default());
        let warning = DownloadWarning::new(notifier.clone(), Some(Duration::from_secs(5)));

        warning.enable();
        tokio::time::sleep(Duration::from_millis(10_500)).await;
        assert_eq!(notifier.warnings.lock().unwrap().len(), 3);

        warning.disable();
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(notifier.warnings.lock().unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_old_reminder_stops_after_re_enable() {
        let notifier = Arc::new(RecordingNotifier::default());
        let warning = DownloadWarning::new(notifier.clone(), Some(Duration::from_secs(5)));

        warning.enable();
        warning.disable();
        warning.enable();
        tokio::time::sleep(Duration::from_millis(5_500)).await;

        // two initial notices plus one reminder from the live loop only
        assert_eq!(notifier.warnings.lock().unwrap().len(), 3);
    }
}
