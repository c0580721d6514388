//! Simulated upload analysis
//!
//! Uploaded files are never opened. Polygon counts and reduction ratios come
//! from a seeded PCG32 stream, so the same seed always produces the same
//! card for the same file.

use std::path::Path;

use amao_scene::ModelKind;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::format::reduction_pct;

/// Lowest simulated polygon count (inclusive)
pub const MIN_UPLOAD_POLYS: u64 = 100_000;
/// Highest simulated polygon count (exclusive)
pub const MAX_UPLOAD_POLYS: u64 = 400_000;

/// Recognized 3D file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    Glb,
    Gltf,
    Obj,
    Fbx,
    Stl,
    Ply,
}

impl ModelFormat {
    pub const ALL: [ModelFormat; 6] = [
        Self::Glb,
        Self::Gltf,
        Self::Obj,
        Self::Fbx,
        Self::Stl,
        Self::Ply,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Glb => "glb",
            Self::Gltf => "gltf",
            Self::Obj => "obj",
            Self::Fbx => "fbx",
            Self::Stl => "stl",
            Self::Ply => "ply",
        }
    }

    /// Detect a format from a file name's extension
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL.into_iter().find(|format| format.extension() == ext)
    }
}

/// Analysis card for an uploaded file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadAnalysis {
    pub file_name: String,
    /// Detected format; `None` for unsupported extensions
    pub format: Option<ModelFormat>,
    pub file_size_bytes: u64,
    pub optimized_size_bytes: u64,
    pub original_polys: u64,
    pub optimized_polys: u64,
    pub reduction_pct: f64,
}

impl UploadAnalysis {
    /// Whether the extension is one of the recognized formats
    pub fn is_supported(&self) -> bool {
        self.format.is_some()
    }

    /// Model shown in the upload viewer.
    ///
    /// File content is never parsed, so every upload previews as the
    /// placeholder.
    pub fn preview_model(&self) -> ModelKind {
        ModelKind::Placeholder
    }

    /// File size reduction in percent
    pub fn size_reduction_pct(&self) -> f64 {
        reduction_pct(self.file_size_bytes as f64, self.optimized_size_bytes as f64)
    }
}

/// Deterministic generator for simulated values
pub fn create_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Fabricate an analysis for an uploaded file. Never fails.
pub fn simulate_upload<R: Rng>(file_name: &str, file_size_bytes: u64, rng: &mut R) -> UploadAnalysis {
    let format = ModelFormat::from_file_name(file_name);
    if format.is_none() {
        log::warn!("Unsupported upload '{}'; previewing placeholder geometry", file_name);
    }

    let original_polys = rng.gen_range(MIN_UPLOAD_POLYS..MAX_UPLOAD_POLYS);
    let reduction: f64 = rng.gen_range(0.60..0.80);
    let keep = 1.0 - reduction;
    let optimized_polys = (original_polys as f64 * keep).round() as u64;
    let optimized_size_bytes = (file_size_bytes as f64 * keep).round() as u64;

    log::debug!(
        "Simulated upload '{}': {} -> {} polygons",
        file_name,
        original_polys,
        optimized_polys
    );

    UploadAnalysis {
        file_name: file_name.to_string(),
        format,
        file_size_bytes,
        optimized_size_bytes,
        original_polys,
        optimized_polys,
        reduction_pct: reduction_pct(original_polys as f64, optimized_polys as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(ModelFormat::from_file_name("hero.GLB"), Some(ModelFormat::Glb));
        assert_eq!(ModelFormat::from_file_name("dir/scene.v2.fbx"), Some(ModelFormat::Fbx));
        assert_eq!(ModelFormat::from_file_name("notes.txt"), None);
        assert_eq!(ModelFormat::from_file_name("no_extension"), None);
        assert_eq!(ModelFormat::from_file_name(""), None);
    }

    #[test]
    fn test_upload_polygons_in_range() {
        let mut rng = create_rng(1);
        for i in 0..2_000u64 {
            let result = simulate_upload("model.obj", i * 1_000, &mut rng);
            assert!(result.original_polys >= MIN_UPLOAD_POLYS);
            assert!(result.original_polys < MAX_UPLOAD_POLYS);
            assert!(result.optimized_polys < result.original_polys);
            assert!(result.reduction_pct > 59.9 && result.reduction_pct < 80.1);
        }
    }

    #[test]
    fn test_any_file_name_is_accepted() {
        let mut rng = create_rng(5);
        for name in ["", "README", "weird..name.", "ünïcödé.glb", "archive.tar.gz"] {
            let result = simulate_upload(name, 0, &mut rng);
            assert!((MIN_UPLOAD_POLYS..MAX_UPLOAD_POLYS).contains(&result.original_polys));
            assert_eq!(result.preview_model(), ModelKind::Placeholder);
            assert_eq!(result.size_reduction_pct(), 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = simulate_upload("a.stl", 4096, &mut create_rng(42));
        let b = simulate_upload("a.stl", 4096, &mut create_rng(42));
        assert_eq!(a, b);
        assert!(a.is_supported());
    }

    #[test]
    fn test_size_shrinks_with_polygons() {
        let result = simulate_upload("car.gltf", 10 * 1024 * 1024, &mut create_rng(3));
        assert!(result.optimized_size_bytes < result.file_size_bytes);
        let size_pct = result.size_reduction_pct();
        assert!((size_pct - result.reduction_pct).abs() < 1.0);
    }
}
