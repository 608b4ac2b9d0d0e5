// Tracing notifier adapter - User notices routed through tracing and stderr

use std::sync::Mutex;

use crate::ports::*;
use tracing::{debug, warn};

/// Notifier adapter writing notices to the log and the terminal
pub struct TracingNotifierAdapter {
    leave_message: Mutex<Option<String>>,
    echo_to_stderr: bool,
}

impl TracingNotifierAdapter {
    /// Create a notifier that also prints notices on stderr
    pub fn new() -> Self {
        Self {
            leave_message: Mutex::new(None),
            echo_to_stderr: true,
        }
    }

    /// Create a notifier that only logs
    pub fn quiet() -> Self {
        Self {
            leave_message: Mutex::new(None),
            echo_to_stderr: false,
        }
    }

    /// Message to show when the user tries to leave, if the guard is armed
    pub fn leave_message(&self) -> Option<String> {
        self.leave_message
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Default for TracingNotifierAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifierPort for TracingNotifierAdapter {
    fn notify_warning(&self, message: &str) {
        warn!("{}", message);
        if self.echo_to_stderr {
            eprintln!("! {}", message);
        }
    }

    fn set_leave_guard(&self, message: Option<&str>) {
        debug!(armed = message.is_some(), "Leave guard updated");
        if let Ok(mut guard) = self.leave_message.lock() {
            *guard = message.map(str::to_string);
        }
    }
}
