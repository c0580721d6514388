//! Preset analysis results
//!
//! The analysis card numbers are fixed per preset; nothing here looks at
//! geometry.

use std::str::FromStr;

use amao_scene::ModelKind;
use serde::{Deserialize, Serialize};

use crate::MetricsError;
use crate::format::reduction_pct;

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A reported problem with its suggested fix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub issue: String,
    pub fix: String,
}

impl Issue {
    pub fn new(severity: Severity, issue: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            severity,
            issue: issue.into(),
            fix: fix.into(),
        }
    }
}

/// Analysis card contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall health, 0 to 100
    pub health_score: u8,
    pub ngon_count: u32,
    /// UV space coverage in percent
    pub uv_coverage: f32,
    pub density_issues: u32,
    pub inverted_normals: u32,
    pub original_polys: u64,
    pub optimized_polys: u64,
    pub file_size_reduction_pct: f32,
    pub issues: Vec<Issue>,
}

impl AnalysisResult {
    /// Polygon reduction in percent, 0 when undefined
    pub fn polygon_reduction_pct(&self) -> f64 {
        reduction_pct(self.original_polys as f64, self.optimized_polys as f64)
    }

    /// Issues ordered most severe first
    pub fn issues_by_severity(&self) -> Vec<&Issue> {
        let mut issues: Vec<_> = self.issues.iter().collect();
        issues.sort_by_key(|issue| issue.severity);
        issues
    }

    /// Count of issues at a severity
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

/// Built-in preset keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKey {
    Character,
    Scene,
    Product,
}

impl PresetKey {
    pub const ALL: [PresetKey; 3] = [Self::Character, Self::Scene, Self::Product];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Scene => "scene",
            Self::Product => "product",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Character => "Game Character",
            Self::Scene => "Environment Scene",
            Self::Product => "Product Visualization",
        }
    }

    /// Model shown in the preset's viewer
    pub fn model_kind(&self) -> ModelKind {
        match self {
            Self::Character => ModelKind::Character,
            Self::Scene => ModelKind::House,
            Self::Product => ModelKind::Bottle,
        }
    }
}

impl std::fmt::Display for PresetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PresetKey {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| MetricsError::UnknownPreset(s.to_string()))
    }
}

/// Analysis card for a preset
pub fn analysis_for(preset: PresetKey) -> AnalysisResult {
    match preset {
        PresetKey::Character => AnalysisResult {
            health_score: 72,
            ngon_count: 1_240,
            uv_coverage: 68.5,
            density_issues: 14,
            inverted_normals: 37,
            original_polys: 245_000,
            optimized_polys: 61_250,
            file_size_reduction_pct: 74.8,
            issues: vec![
                Issue::new(
                    Severity::Critical,
                    "1,240 n-gons on the face and hands",
                    "Triangulate or retopologize to quads before rigging",
                ),
                Issue::new(
                    Severity::Warning,
                    "37 inverted normals around the collar",
                    "Recalculate normals outside",
                ),
                Issue::new(
                    Severity::Warning,
                    "Dense topology on the boots",
                    "Decimate flat regions to match the torso density",
                ),
                Issue::new(
                    Severity::Info,
                    "UV islands use 68% of texture space",
                    "Repack islands with 4px padding",
                ),
            ],
        },
        PresetKey::Scene => AnalysisResult {
            health_score: 58,
            ngon_count: 8_920,
            uv_coverage: 54.2,
            density_issues: 41,
            inverted_normals: 112,
            original_polys: 1_850_000,
            optimized_polys: 420_000,
            file_size_reduction_pct: 77.3,
            issues: vec![
                Issue::new(
                    Severity::Critical,
                    "8,920 n-gons on architectural surfaces",
                    "Triangulate walls and floors",
                ),
                Issue::new(
                    Severity::Critical,
                    "Hidden interior faces behind walls",
                    "Remove faces that are never visible",
                ),
                Issue::new(
                    Severity::Warning,
                    "112 inverted normals on roof tiles",
                    "Recalculate normals outside",
                ),
                Issue::new(
                    Severity::Warning,
                    "Foliage uses unique meshes per instance",
                    "Convert repeated props to instances",
                ),
                Issue::new(
                    Severity::Info,
                    "Overlapping UVs on tiling materials",
                    "Overlap is fine for tiling; bake lightmaps to a second UV set",
                ),
            ],
        },
        PresetKey::Product => AnalysisResult {
            health_score: 86,
            ngon_count: 312,
            uv_coverage: 91.0,
            density_issues: 3,
            inverted_normals: 8,
            original_polys: 98_000,
            optimized_polys: 24_500,
            file_size_reduction_pct: 68.4,
            issues: vec![
                Issue::new(
                    Severity::Warning,
                    "312 n-gons on the cap thread",
                    "Convert thread to a normal map",
                ),
                Issue::new(
                    Severity::Info,
                    "8 inverted normals on the label seam",
                    "Recalculate normals outside",
                ),
                Issue::new(
                    Severity::Info,
                    "High density on hidden bottom face",
                    "Collapse the base to a single fan",
                ),
            ],
        },
    }
}
