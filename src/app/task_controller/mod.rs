// Task controller - Drives one clip job from submission to a terminal state

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::download_warning::DownloadWarning;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

const PROCESSING_FAILED: &str = "Download failed during processing";

/// Where the controller stands with its current job
#[derive(Debug, Clone, PartialEq)]
pub enum TaskPhase {
    /// No outstanding job
    Idle,
    /// Creation request sent, waiting for accept or reject
    Submitting,
    /// Job accepted, status checked on a fixed cadence
    Polling { task_id: TaskId },
    /// Job finished; the clip can be fetched from `download_url`
    Completed { task_id: TaskId, download_url: String },
    /// Job failed on the server
    Failed { task_id: TaskId, message: String },
}

impl TaskPhase {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, TaskPhase::Submitting | TaskPhase::Polling { .. })
    }
}

enum PollOutcome {
    Continue,
    Stop,
}

struct ControllerState {
    phase: TaskPhase,
    /// Bumped whenever the current session is torn down or replaced
    generation: u64,
    active_task: Option<TaskId>,
    last_progress: Option<u8>,
    session: Option<JoinHandle<()>>,
    submitted_at: Option<DateTime<Utc>>,
}

struct Shared {
    api: Arc<dyn ClipApiPort>,
    observer: Arc<dyn TaskObserver>,
    warning: DownloadWarning,
    poll_interval: Duration,
    state: Mutex<ControllerState>,
}

/// Owns the lifecycle of at most one clip job at a time.
///
/// Every poll session is tagged with a generation number. Responses are
/// applied only while their generation and task id still match the
/// controller's, so a late answer from a cancelled or superseded session can
/// never reach the observer. Observer callbacks run while the controller's
/// lock is held and must not call back into the controller.
#[derive(Clone)]
pub struct TaskController {
    shared: Arc<Shared>,
}

impl TaskController {
    pub fn new(
        api: Arc<dyn ClipApiPort>,
        observer: Arc<dyn TaskObserver>,
        warning: DownloadWarning,
        poll_interval: Duration,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                api,
                observer,
                warning,
                poll_interval,
                state: Mutex::new(ControllerState {
                    phase: TaskPhase::Idle,
                    generation: 0,
                    active_task: None,
                    last_progress: None,
                    session: None,
                    submitted_at: None,
                }),
            }),
        }
    }

    /// Start a clip job, replacing whatever job was running before.
    ///
    /// An empty or inverted interval is returned as an error without contacting
    /// the service. A rejection or network failure is reported to the observer
    /// once and returned; the controller is then idle again.
    pub async fn submit(
        &self,
        url: &str,
        interval: ClipInterval,
        quality: &str,
    ) -> Result<TaskId, DomainError> {
        interval.validate()?;

        let generation = {
            let mut state = self.shared.lock();
            self.shared.teardown(&mut state);
            state.phase = TaskPhase::Submitting;
            state.submitted_at = Some(Utc::now());
            self.shared.warning.enable();
            state.generation
        };

        info!(%url, %interval, %quality, "Submitting clip job");
        let request = ClipJobRequest {
            url: url.to_string(),
            interval,
            quality: quality.to_string(),
        };
        let result = self.shared.api.create_clip_task(&request).await;

        let mut state = self.shared.lock();
        if state.generation != generation {
            debug!("Submission superseded before the service answered");
            return Err(DomainError::Cancelled(
                "Superseded by a newer request".to_string(),
            ));
        }

        match result {
            Ok(accepted) => {
                let task_id = accepted.task_id;
                info!(task_id = %task_id, estimated_size = ?accepted.estimated_size, "Clip job accepted");
                state.phase = TaskPhase::Polling {
                    task_id: task_id.clone(),
                };
                state.active_task = Some(task_id.clone());
                state.last_progress = None;
                state.session = Some(tokio::spawn(poll_session(
                    Arc::clone(&self.shared),
                    task_id.clone(),
                    generation,
                )));
                Ok(task_id)
            }
            Err(error) => {
                warn!(%error, "Clip job was not accepted");
                state.phase = TaskPhase::Idle;
                state.submitted_at = None;
                self.shared.warning.disable();
                self.shared.observer.on_failed(&failure_message(&error));
                Err(error)
            }
        }
    }

    /// Stop polling and forget the current job. Idempotent.
    pub fn cancel(&self) {
        let mut state = self.shared.lock();
        if state.phase.is_in_flight() {
            info!(task_id = ?state.active_task, "Cancelling clip job");
        }
        self.shared.teardown(&mut state);
        self.shared.warning.disable();
    }

    /// Whether a job is being submitted or polled
    pub fn is_downloading(&self) -> bool {
        self.shared.lock().phase.is_in_flight()
    }

    pub fn phase(&self) -> TaskPhase {
        self.shared.lock().phase.clone()
    }

    pub fn active_task_id(&self) -> Option<TaskId> {
        self.shared.lock().active_task.clone()
    }

    /// Wait until no poll session is running and return the phase reached
    pub async fn wait(&self) -> TaskPhase {
        loop {
            let handle = {
                let mut state = self.shared.lock();
                match state.session.take() {
                    Some(handle) => handle,
                    None => return state.phase.clone(),
                }
            };
            if let Err(error) = handle.await {
                warn!(%error, "Poll session ended abnormally");
            }
        }
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Invalidate the current session and return to idle
    fn teardown(&self, state: &mut ControllerState) {
        state.generation += 1;
        state.active_task = None;
        state.last_progress = None;
        state.session = None;
        state.phase = TaskPhase::Idle;
    }

    fn is_current(state: &ControllerState, generation: u64, task_id: &TaskId) -> bool {
        state.generation == generation && state.active_task.as_ref() == Some(task_id)
    }

    fn still_polling(&self, generation: u64, task_id: &TaskId) -> bool {
        Self::is_current(&self.lock(), generation, task_id)
    }

    fn finish(&self, state: &mut ControllerState, phase: TaskPhase) {
        if let Some(submitted_at) = state.submitted_at.take() {
            let elapsed = Utc::now() - submitted_at;
            info!(elapsed_secs = elapsed.num_seconds(), phase = ?phase, "Clip job finished");
        }
        state.phase = phase;
        state.active_task = None;
        state.session = None;
        self.warning.disable();
    }

    fn apply_poll_result(
        &self,
        generation: u64,
        task_id: &TaskId,
        result: Result<TaskSnapshot, DomainError>,
    ) -> PollOutcome {
        let mut state = self.lock();
        if !Self::is_current(&state, generation, task_id) {
            debug!(task_id = %task_id, "Discarding response from a stale poll session");
            return PollOutcome::Stop;
        }

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(error) => {
                debug!(task_id = %task_id, %error, "Status check failed, retrying on next tick");
                return PollOutcome::Continue;
            }
        };

        if &snapshot.task_id != task_id {
            debug!(expected = %task_id, got = %snapshot.task_id, "Discarding status for another task");
            return PollOutcome::Continue;
        }

        if !snapshot.status.is_terminal() {
            if state.last_progress != Some(snapshot.progress) {
                state.last_progress = Some(snapshot.progress);
                self.observer.on_progress(snapshot.progress);
            }
            return PollOutcome::Continue;
        }

        match snapshot.status {
            TaskStatus::Pending | TaskStatus::Processing => PollOutcome::Continue,
            TaskStatus::Completed => match snapshot.download_url {
                Some(download_url) => {
                    self.finish(
                        &mut state,
                        TaskPhase::Completed {
                            task_id: task_id.clone(),
                            download_url: download_url.clone(),
                        },
                    );
                    self.observer.on_completed(&download_url);
                    PollOutcome::Stop
                }
                None => {
                    warn!(task_id = %task_id, "Job reported completed without a download URL");
                    PollOutcome::Continue
                }
            },
            TaskStatus::Failed => {
                let message = snapshot
                    .error_message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| PROCESSING_FAILED.to_string());
                self.finish(
                    &mut state,
                    TaskPhase::Failed {
                        task_id: task_id.clone(),
                        message: message.clone(),
                    },
                );
                self.observer.on_failed(&message);
                PollOutcome::Stop
            }
        }
    }
}

/// Poll one job until it reaches a terminal status or the session goes stale.
/// The next tick is scheduled only after the previous response was handled.
async fn poll_session(shared: Arc<Shared>, task_id: TaskId, generation: u64) {
    loop {
        tokio::time::sleep(shared.poll_interval).await;
        if !shared.still_polling(generation, &task_id) {
            return;
        }

        let result = shared.api.task_status(&task_id).await;
        if let PollOutcome::Stop = shared.apply_poll_result(generation, &task_id, result) {
            return;
        }
    }
}

fn failure_message(error: &DomainError) -> String {
    match error {
        DomainError::Rejected(_) => error.user_message().to_string(),
        other => other.to_string(),
    }
}
