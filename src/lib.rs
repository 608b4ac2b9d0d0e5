//! ClipX CLI Library
//!
//! Client side of a "trim and download a video clip" service: keeps a
//! start/end time selection valid for a video's duration and drives the
//! remote clip job from submission to completion by polling its status.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{ClipInteractor, RangeSelector, TaskController, TaskPhase};
pub use domain::errors::DomainError;
pub use domain::model::{ClipInterval, TaskId, TaskSnapshot, TaskStatus, TimeSelection, VideoInfo};
pub use error::{ClipXError, ClipXResult};
