//! Text output for the terminal

use std::io::{self, Write};

use amao_core::DetailLevel;
use amao_demo::{Frame, ViewMode};
use amao_metrics::{
    AnalysisResult, PresetEntry, UploadAnalysis, format_file_size, format_mb, format_polygons,
};
use amao_pipeline::Stage;
use amao_scene::{ModelKind, SceneDescription};

pub fn write_models(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{:<12} {:>5} {:>9} {:>9}  DESCRIPTION", "MODEL", "PARTS", "LOD0", "LOD4")?;
    for kind in ModelKind::ALL {
        let spec = kind.spec();
        writeln!(
            out,
            "{:<12} {:>5} {:>9} {:>9}  {}",
            kind.name(),
            spec.root.primitive_count(),
            format_polygons(spec.triangle_count(DetailLevel::MIN)),
            format_polygons(spec.triangle_count(DetailLevel::MAX)),
            kind.description()
        )?;
    }
    Ok(())
}

pub fn write_description(out: &mut impl Write, desc: &SceneDescription) -> io::Result<()> {
    let stats = &desc.stats;
    writeln!(out, "{} ({}) at {}", desc.model, desc.model.description(), desc.detail)?;
    if !desc.flags.is_empty() {
        writeln!(out, "  flags      {:?}", desc.flags)?;
    }
    writeln!(out, "  parts      {}", stats.primitive_count)?;
    writeln!(out, "  triangles  {}", stats.triangle_count)?;
    writeln!(out, "  vertices   {}", stats.vertex_count)?;
    writeln!(
        out,
        "  bounds     [{:.2}, {:.2}, {:.2}] .. [{:.2}, {:.2}, {:.2}]",
        stats.bounds.min.x,
        stats.bounds.min.y,
        stats.bounds.min.z,
        stats.bounds.max.x,
        stats.bounds.max.y,
        stats.bounds.max.z
    )?;
    writeln!(out)?;
    for placed in &desc.primitives {
        writeln!(
            out,
            "  {:<28} {:<12} {:>3} seg {:>7} tris  {}",
            placed.path,
            placed.kind.name(),
            placed.segments,
            placed.triangles,
            placed.material.color_css()
        )?;
    }
    Ok(())
}

pub fn write_presets<'a>(
    out: &mut impl Write,
    presets: impl IntoIterator<Item = (&'a str, &'a PresetEntry)>,
) -> io::Result<()> {
    writeln!(out, "{:<12} {:<24} {:<10} {:>17} HEALTH", "PRESET", "TITLE", "MODEL", "POLYGONS")?;
    for (name, entry) in presets {
        let polys = format!(
            "{} -> {}",
            format_polygons(entry.analysis.original_polys),
            format_polygons(entry.analysis.optimized_polys)
        );
        writeln!(
            out,
            "{:<12} {:<24} {:<10} {:>17} {:>6}",
            name,
            entry.title,
            entry.model.name(),
            polys,
            entry.analysis.health_score
        )?;
    }
    Ok(())
}

pub fn write_analysis(out: &mut impl Write, title: &str, analysis: &AnalysisResult) -> io::Result<()> {
    writeln!(out, "{}", title)?;
    writeln!(out, "  Health score      {}/100", analysis.health_score)?;
    writeln!(out, "  N-gons            {}", analysis.ngon_count)?;
    writeln!(out, "  UV coverage       {:.1}%", analysis.uv_coverage)?;
    writeln!(out, "  Density issues    {}", analysis.density_issues)?;
    writeln!(out, "  Inverted normals  {}", analysis.inverted_normals)?;
    writeln!(
        out,
        "  Polygons          {} -> {} (-{:.1}%)",
        format_polygons(analysis.original_polys),
        format_polygons(analysis.optimized_polys),
        analysis.polygon_reduction_pct()
    )?;
    writeln!(out, "  File size         -{:.1}%", analysis.file_size_reduction_pct)?;
    writeln!(out)?;
    for issue in analysis.issues_by_severity() {
        writeln!(out, "  [{:<8}] {}", issue.severity.label(), issue.issue)?;
        writeln!(out, "             fix: {}", issue.fix)?;
    }
    Ok(())
}

pub fn write_upload(out: &mut impl Write, upload: &UploadAnalysis) -> io::Result<()> {
    let format = upload
        .format
        .map(|f| f.extension().to_ascii_uppercase())
        .unwrap_or_else(|| String::from("unsupported"));
    writeln!(out, "{} ({})", upload.file_name, format)?;
    writeln!(
        out,
        "  File size  {} -> {}",
        format_file_size(upload.file_size_bytes),
        format_file_size(upload.optimized_size_bytes)
    )?;
    writeln!(
        out,
        "  Polygons   {} -> {} (-{:.1}%)",
        format_polygons(upload.original_polys),
        format_polygons(upload.optimized_polys),
        upload.reduction_pct
    )?;
    writeln!(out, "  Preview    {}", upload.preview_model())?;
    Ok(())
}

pub fn write_stage(
    out: &mut impl Write,
    index: usize,
    count: usize,
    stage: &Stage,
    detail: DetailLevel,
) -> io::Result<()> {
    writeln!(
        out,
        "[{}/{}] {:<18} {}  {:>6} polys  {:>9}  quality {:>3}",
        index + 1,
        count,
        stage.name,
        detail,
        format_polygons(stage.polygon_count),
        format_mb(stage.file_size_mb),
        stage.quality_score
    )
}

/// Before/after line for the comparison view
pub fn write_comparison(out: &mut impl Write, frame: &Frame) -> io::Result<()> {
    if frame.mode != ViewMode::Comparison {
        return Ok(());
    }
    writeln!(
        out,
        "       before {} tris | after {} tris  (split {:.0}%)",
        frame.before.stats.triangle_count,
        frame.after.stats.triangle_count,
        frame.split * 100.0
    )
}

pub fn write_summary(out: &mut impl Write, original_polys: u64, frame: &Frame) -> io::Result<()> {
    writeln!(
        out,
        "Complete: {} -> {} polygons, viewer {} -> {} triangles (-{:.1}%)",
        format_polygons(original_polys),
        format_polygons(frame.stage.polygon_count),
        frame.before.stats.triangle_count,
        frame.after.stats.triangle_count,
        frame.triangle_reduction_pct()
    )
}
