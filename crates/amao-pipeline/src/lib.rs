//! # AMAO Pipeline
//!
//! The staged "optimization pipeline" shown by every viewer.
//!
//! - **Stages**: named steps with before/after numbers, validated as a sequence
//! - **Animator**: clock-driven state machine stepping through the stages

pub mod animator;
pub mod stage;

pub use animator::{Animator, AnimatorEvent, AnimatorState};
pub use stage::{Stage, StageSequence};

use thiserror::Error;

/// Pipeline errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Stage sequence is empty")]
    EmptySequence,

    #[error("Stage {index}: polygon count increases from {previous} to {current}")]
    PolygonCountIncreased { index: usize, previous: u64, current: u64 },

    #[error("Stage {index}: file size increases from {previous} MB to {current} MB")]
    FileSizeIncreased { index: usize, previous: f64, current: f64 },

    #[error("Stage {index}: quality drops from {previous} to {current}")]
    QualityDecreased { index: usize, previous: u8, current: u8 },

    #[error("Stage {index}: quality score {score} exceeds 100")]
    QualityOutOfRange { index: usize, score: u8 },

    #[error("Stage {index}: file size must be finite and non-negative")]
    InvalidFileSize { index: usize },
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
