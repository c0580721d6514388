//! # AMAO Metrics
//!
//! Simulated optimization metrics behind the showcase cards.
//!
//! ## Features
//! - Static analysis results per preset (`character`, `scene`, `product`)
//! - Per-preset pipeline stage tables
//! - Simulated upload analysis with seeded random polygon counts
//! - Guarded percentages and human-readable number formatting
//! - Registry for extra presets loaded from JSON

pub mod analysis;
pub mod format;
pub mod registry;
pub mod stages;
pub mod upload;

pub use analysis::{AnalysisResult, Issue, PresetKey, Severity, analysis_for};
pub use format::{format_file_size, format_mb, format_polygons, reduction_pct};
pub use registry::{PresetEntry, PresetRegistry};
pub use stages::{analysis_stages, stages_for, upload_stages};
pub use upload::{ModelFormat, UploadAnalysis, create_rng, simulate_upload};

use amao_pipeline::PipelineError;
use thiserror::Error;

/// Metrics errors
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid stage table: {0}")]
    InvalidStages(#[from] PipelineError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;
