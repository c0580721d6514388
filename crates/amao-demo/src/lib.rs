//! # AMAO Demo
//!
//! Interactive showcase session tying the viewers together.
//!
//! ## Features
//! - Preset selection and simulated uploads
//! - Pipeline playback (play, pause, stop, reset)
//! - Before/after viewports with auto-rotation, wireframe and a comparison split
//! - Per-update [`Frame`] snapshots for any front end

pub mod session;
pub mod viewport;

pub use session::{DemoSession, Frame, SessionSource};
pub use viewport::{ViewMode, ViewportConfig};

use amao_core::CoreError;
use amao_metrics::MetricsError;
use thiserror::Error;

/// Session errors
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("Configuration error: {0}")]
    Config(#[from] CoreError),
}

/// Result type for session operations
pub type DemoResult<T> = Result<T, DemoError>;
