// Application layer - Use case interactors

pub mod clip_interactor;
pub mod container;
pub mod download_warning;
pub mod range_selector;
pub mod task_controller;

// Re-export interactors
pub use clip_interactor::ClipInteractor;
pub use download_warning::DownloadWarning;
pub use range_selector::RangeSelector;
pub use task_controller::{TaskController, TaskPhase};
