use std::sync::Arc;

use crate::adapters::{HttpApiAdapter, TracingNotifierAdapter};
use crate::app::clip_interactor::ClipInteractor;
use crate::app::download_warning::DownloadWarning;
use crate::app::task_controller::TaskController;
use crate::config_initialization::Settings;
use crate::domain::errors::DomainError;
use crate::ports::{ClipApiPort, NotifierPort, TaskObserver};

pub trait AppContainer: Send + Sync {
    fn clip_interactor(&self) -> Arc<ClipInteractor>;
    fn notifier(&self) -> Arc<TracingNotifierAdapter>;
}

pub struct DefaultAppContainer {
    clip_interactor: Arc<ClipInteractor>,
    notifier: Arc<TracingNotifierAdapter>,
}

impl DefaultAppContainer {
    /// Wire the HTTP client and the terminal notifier from resolved settings
    pub fn new(settings: &Settings, observer: Arc<dyn TaskObserver>) -> Result<Self, DomainError> {
        let api = Arc::new(HttpApiAdapter::new(
            &settings.server_url,
            &settings.api_prefix,
            &settings.user_agent,
        )?);
        Ok(Self::with_ports(
            settings,
            api,
            Arc::new(TracingNotifierAdapter::new()),
            observer,
        ))
    }

    /// Wire the application around caller-supplied ports
    pub fn with_ports(
        settings: &Settings,
        api: Arc<dyn ClipApiPort>,
        notifier: Arc<TracingNotifierAdapter>,
        observer: Arc<dyn TaskObserver>,
    ) -> Self {
        let warning = DownloadWarning::new(
            Arc::clone(&notifier) as Arc<dyn NotifierPort>,
            Some(settings.reminder_interval),
        );
        let controller = TaskController::new(
            Arc::clone(&api),
            observer,
            warning,
            settings.poll_interval,
        );
        let clip_interactor = Arc::new(ClipInteractor::new(
            api,
            controller,
            settings.min_clip_seconds,
        ));

        Self {
            clip_interactor,
            notifier,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn clip_interactor(&self) -> Arc<ClipInteractor> {
        Arc::clone(&self.clip_interactor)
    }

    fn notifier(&self) -> Arc<TracingNotifierAdapter> {
        Arc::clone(&self.notifier)
    }
}
