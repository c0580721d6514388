//! # AMAO Core
//!
//! Shared foundation for the AMAO showcase engine.
//!
//! This crate provides the pieces every other crate builds on:
//! - **Detail levels**: the tessellation selector driving procedural models
//! - **Time**: injected clocks, an owned fixed-interval ticker, turntable rotation
//! - **Config**: the demo configuration layer loaded from JSON

pub mod config;
pub mod time;

pub use config::{DemoConfig, StepFunction};
pub use time::{Clock, DeltaTime, ManualClock, SystemClock, Ticker, Turntable};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Tessellation detail selector.
///
/// Level 0 is the fully optimized (coarsest) rendition, level 4 the original
/// full-detail model. Values outside the range are clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DetailLevel(u8);

impl DetailLevel {
    /// Coarsest level
    pub const MIN: Self = Self(0);
    /// Finest level
    pub const MAX: Self = Self(4);
    /// Alias used by the before/after views
    pub const ORIGINAL: Self = Self::MAX;
    /// Alias used by the before/after views
    pub const OPTIMIZED: Self = Self::MIN;

    /// Create a detail level, clamping into `MIN..=MAX`
    pub fn new(level: u8) -> Self {
        Self(level.min(Self::MAX.0))
    }

    /// Map the boolean `optimized` toggle onto a level
    pub fn from_optimized(optimized: bool) -> Self {
        if optimized { Self::OPTIMIZED } else { Self::ORIGINAL }
    }

    /// Detail level for stage `index` of a sequence with `count` stages.
    ///
    /// Stage 0 gets full detail and the last stage is fully optimized.
    pub fn for_stage(index: usize, count: usize) -> Self {
        if count <= 1 {
            return Self::MAX;
        }
        let index = index.min(count - 1) as f32;
        let span = (count - 1) as f32;
        let drop = (index * Self::MAX.0 as f32 / span).round() as u8;
        Self(Self::MAX.0 - drop.min(Self::MAX.0))
    }

    /// Raw level value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Iterate all levels from coarsest to finest
    pub fn all() -> impl Iterator<Item = DetailLevel> {
        (Self::MIN.0..=Self::MAX.0).map(Self)
    }
}

impl Default for DetailLevel {
    fn default() -> Self {
        Self::ORIGINAL
    }
}

impl TryFrom<u8> for DetailLevel {
    type Error = CoreError;

    fn try_from(value: u8) -> CoreResult<Self> {
        if value > Self::MAX.0 {
            return Err(CoreError::InvalidConfig(format!(
                "detail level {} exceeds maximum {}",
                value,
                Self::MAX.0
            )));
        }
        Ok(Self(value))
    }
}

impl From<DetailLevel> for u8 {
    fn from(level: DetailLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LOD{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_clamps() {
        assert_eq!(DetailLevel::new(9), DetailLevel::MAX);
        assert_eq!(DetailLevel::new(2).value(), 2);
    }

    #[test]
    fn test_detail_from_optimized() {
        assert_eq!(DetailLevel::from_optimized(true), DetailLevel::OPTIMIZED);
        assert_eq!(DetailLevel::from_optimized(false), DetailLevel::ORIGINAL);
    }

    #[test]
    fn test_detail_for_stage() {
        assert_eq!(DetailLevel::for_stage(0, 5), DetailLevel::MAX);
        assert_eq!(DetailLevel::for_stage(2, 5).value(), 2);
        assert_eq!(DetailLevel::for_stage(4, 5), DetailLevel::MIN);
        assert_eq!(DetailLevel::for_stage(0, 1), DetailLevel::MAX);
        // Out-of-range index lands on the last stage
        assert_eq!(DetailLevel::for_stage(10, 3), DetailLevel::MIN);
    }

    #[test]
    fn test_detail_for_stage_is_non_increasing() {
        for count in 1..8 {
            let levels: Vec<_> = (0..count).map(|i| DetailLevel::for_stage(i, count)).collect();
            assert!(levels.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn test_detail_serde_rejects_out_of_range() {
        let level: DetailLevel = serde_json::from_str("3").unwrap();
        assert_eq!(level.value(), 3);
        assert!(serde_json::from_str::<DetailLevel>("7").is_err());
    }

    #[test]
    fn test_detail_all() {
        let all: Vec<_> = DetailLevel::all().collect();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0], DetailLevel::MIN);
        assert_eq!(all[4], DetailLevel::MAX);
    }
}
