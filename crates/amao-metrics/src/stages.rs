//! Pipeline stage tables
//!
//! Every preset and upload plays the same five stages. Numbers interpolate
//! from the "before" to the "after" values of the analysis card.

use amao_pipeline::{Stage, StageSequence};

use crate::MetricsResult;
use crate::analysis::{AnalysisResult, PresetKey, analysis_for};
use crate::upload::UploadAnalysis;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Quality reached by the final stage
const TARGET_QUALITY: u8 = 96;

struct StageTemplate {
    name: &'static str,
    description: &'static str,
    color_theme: &'static str,
    /// Share of the polygon and size reduction applied so far
    reduction: f64,
    /// Share of the quality gain applied so far
    quality: f64,
}

const TEMPLATES: [StageTemplate; 5] = [
    StageTemplate {
        name: "Raw Input",
        description: "Original asset as uploaded",
        color_theme: "#ef4444",
        reduction: 0.0,
        quality: 0.0,
    },
    StageTemplate {
        name: "Topology Analysis",
        description: "Scanning for n-gons, flipped normals and density spikes",
        color_theme: "#f59e0b",
        reduction: 0.0,
        quality: 0.25,
    },
    StageTemplate {
        name: "Retopology",
        description: "Rebuilding clean quad flow and collapsing flat regions",
        color_theme: "#3b82f6",
        reduction: 0.65,
        quality: 0.6,
    },
    StageTemplate {
        name: "UV Optimization",
        description: "Repacking islands and removing stretched seams",
        color_theme: "#8b5cf6",
        reduction: 0.9,
        quality: 0.85,
    },
    StageTemplate {
        name: "Final Output",
        description: "Game-ready asset with baked detail maps",
        color_theme: "#22c55e",
        reduction: 1.0,
        quality: 1.0,
    },
];

fn build(
    original_polys: u64,
    optimized_polys: u64,
    original_mb: f64,
    optimized_mb: f64,
    start_quality: u8,
) -> MetricsResult<StageSequence> {
    let optimized_polys = optimized_polys.min(original_polys);
    let optimized_mb = optimized_mb.min(original_mb);
    let start_quality = start_quality.min(100);
    let target_quality = TARGET_QUALITY.max(start_quality);

    let poly_drop = original_polys - optimized_polys;
    let mb_drop = original_mb - optimized_mb;
    let quality_gain = (target_quality - start_quality) as f64;

    let stages = TEMPLATES
        .iter()
        .map(|t| {
            // f64 loses precision past 2^53, so the rounded drop can overshoot
            let dropped = ((poly_drop as f64 * t.reduction).round() as u64).min(poly_drop);
            Stage::new(
                t.name,
                t.description,
                original_polys - dropped,
                original_mb - mb_drop * t.reduction,
                start_quality + (quality_gain * t.quality).round() as u8,
                t.color_theme,
            )
        })
        .collect();

    Ok(StageSequence::new(stages)?)
}

/// Original file size shown for each preset, in MB
pub fn preset_file_size_mb(preset: PresetKey) -> f64 {
    match preset {
        PresetKey::Character => 48.6,
        PresetKey::Scene => 312.0,
        PresetKey::Product => 18.4,
    }
}

/// Stage table for a built-in preset
pub fn stages_for(preset: PresetKey) -> MetricsResult<StageSequence> {
    analysis_stages(&analysis_for(preset), preset_file_size_mb(preset))
}

/// Stage table running from an analysis card's "before" to its "after"
pub fn analysis_stages(analysis: &AnalysisResult, original_mb: f64) -> MetricsResult<StageSequence> {
    let keep = 1.0 - (analysis.file_size_reduction_pct as f64 / 100.0).clamp(0.0, 1.0);
    build(
        analysis.original_polys,
        analysis.optimized_polys,
        original_mb,
        original_mb * keep,
        analysis.health_score,
    )
}

/// Stage table for a simulated upload
pub fn upload_stages(upload: &UploadAnalysis) -> MetricsResult<StageSequence> {
    build(
        upload.original_polys,
        upload.optimized_polys,
        upload.file_size_bytes as f64 / BYTES_PER_MB,
        upload.optimized_size_bytes as f64 / BYTES_PER_MB,
        // Uploads start from an unknown, middling quality
        50,
    )
}
