//! Pipeline stages
//!
//! A stage carries the numbers a viewer shows while the pipeline sits on it.
//! Sequences only ever get smaller and better: polygon count and file size
//! never increase, quality never drops.

use amao_core::DetailLevel;
use serde::{Deserialize, Serialize};

use crate::{PipelineError, PipelineResult};

/// One named pipeline step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub description: String,
    pub polygon_count: u64,
    pub file_size_mb: f64,
    /// Quality score, 0 to 100
    pub quality_score: u8,
    /// Accent color used by the stage card
    pub color_theme: String,
}

impl Stage {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        polygon_count: u64,
        file_size_mb: f64,
        quality_score: u8,
        color_theme: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            polygon_count,
            file_size_mb,
            quality_score,
            color_theme: color_theme.into(),
        }
    }
}

/// Validated, non-empty, ordered list of stages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSequence {
    stages: Vec<Stage>,
}

impl StageSequence {
    /// Validate and wrap a list of stages
    pub fn new(stages: Vec<Stage>) -> PipelineResult<Self> {
        if stages.is_empty() {
            return Err(PipelineError::EmptySequence);
        }

        for (index, stage) in stages.iter().enumerate() {
            if stage.quality_score > 100 {
                return Err(PipelineError::QualityOutOfRange {
                    index,
                    score: stage.quality_score,
                });
            }
            if !stage.file_size_mb.is_finite() || stage.file_size_mb < 0.0 {
                return Err(PipelineError::InvalidFileSize { index });
            }
        }

        for (index, pair) in stages.windows(2).enumerate() {
            let (previous, current) = (&pair[0], &pair[1]);
            let index = index + 1;
            if current.polygon_count > previous.polygon_count {
                return Err(PipelineError::PolygonCountIncreased {
                    index,
                    previous: previous.polygon_count,
                    current: current.polygon_count,
                });
            }
            if current.file_size_mb > previous.file_size_mb {
                return Err(PipelineError::FileSizeIncreased {
                    index,
                    previous: previous.file_size_mb,
                    current: current.file_size_mb,
                });
            }
            if current.quality_score < previous.quality_score {
                return Err(PipelineError::QualityDecreased {
                    index,
                    previous: previous.quality_score,
                    current: current.quality_score,
                });
            }
        }

        Ok(Self { stages })
    }

    /// Number of stages (at least one)
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Index of the final stage
    pub fn last_index(&self) -> usize {
        self.stages.len() - 1
    }

    /// Stage at `index`, clamped to the last stage
    pub fn get(&self, index: usize) -> &Stage {
        &self.stages[index.min(self.last_index())]
    }

    /// First stage (raw input)
    pub fn first(&self) -> &Stage {
        &self.stages[0]
    }

    /// Last stage (final output)
    pub fn last(&self) -> &Stage {
        &self.stages[self.last_index()]
    }

    /// Detail level a viewer uses while on stage `index`
    pub fn detail_for(&self, index: usize) -> DetailLevel {
        DetailLevel::for_stage(index, self.len())
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stage> {
        self.stages.iter()
    }
}

#[cfg(test)]
pub(crate) fn sample_sequence() -> StageSequence {
    StageSequence::new(vec![
        Stage::new("Raw Input", "Original upload", 250_000, 48.0, 42, "#ef4444"),
        Stage::new("Analysis", "Topology scan", 250_000, 48.0, 55, "#f59e0b"),
        Stage::new("Retopology", "Quad rebuild", 90_000, 20.5, 78, "#3b82f6"),
        Stage::new("Final Output", "Ready to ship", 60_000, 12.0, 94, "#22c55e"),
    ])
    .unwrap()
}
