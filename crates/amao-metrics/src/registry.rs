//! Preset registry
//!
//! Holds the built-in presets plus any loaded from JSON. Lookups are by
//! lowercase name.

use std::collections::BTreeMap;

use ahash::AHashMap;
use amao_pipeline::StageSequence;
use amao_scene::ModelKind;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisResult, PresetKey, analysis_for};
use crate::stages::{analysis_stages, preset_file_size_mb};
use crate::{MetricsError, MetricsResult};

/// A preset as the viewer needs it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetEntry {
    pub title: String,
    /// Model shown in the viewer
    pub model: ModelKind,
    /// Original file size in MB
    pub file_size_mb: f64,
    pub analysis: AnalysisResult,
}

impl PresetEntry {
    /// Entry for a built-in preset
    pub fn builtin(preset: PresetKey) -> Self {
        Self {
            title: preset.title().to_string(),
            model: preset.model_kind(),
            file_size_mb: preset_file_size_mb(preset),
            analysis: analysis_for(preset),
        }
    }

    /// Stage table for this preset
    pub fn stages(&self) -> MetricsResult<StageSequence> {
        analysis_stages(&self.analysis, self.file_size_mb)
    }
}

/// Named presets, shared across threads
pub struct PresetRegistry {
    presets: RwLock<AHashMap<String, PresetEntry>>,
}

impl PresetRegistry {
    /// Registry holding the built-in presets
    pub fn new() -> Self {
        let registry = Self::empty();
        for preset in PresetKey::ALL {
            registry.register(preset.name(), PresetEntry::builtin(preset));
        }
        registry
    }

    /// Registry with no presets
    pub fn empty() -> Self {
        Self {
            presets: RwLock::new(AHashMap::new()),
        }
    }

    /// Register or replace a preset
    pub fn register(&self, name: &str, entry: PresetEntry) {
        let key = normalize(name);
        if self.presets.write().insert(key.clone(), entry).is_some() {
            log::info!("Replaced preset '{}'", key);
        }
    }

    /// Look up a preset by name
    pub fn get(&self, name: &str) -> Option<PresetEntry> {
        self.presets.read().get(&normalize(name)).cloned()
    }

    /// Look up a preset, failing on unknown names
    pub fn require(&self, name: &str) -> MetricsResult<PresetEntry> {
        self.get(name)
            .ok_or_else(|| MetricsError::UnknownPreset(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.read().contains_key(&normalize(name))
    }

    /// Sorted preset names
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.presets.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.presets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.read().is_empty()
    }

    /// Load presets from a JSON object of `name -> entry`.
    ///
    /// Every entry must produce a valid stage table; nothing is registered
    /// when any entry fails. Returns the number of presets loaded.
    pub fn load_json(&self, json: &str) -> MetricsResult<usize> {
        let entries: BTreeMap<String, PresetEntry> = serde_json::from_str(json)?;
        for entry in entries.values() {
            entry.stages()?;
        }

        let count = entries.len();
        let mut presets = self.presets.write();
        for (name, entry) in entries {
            presets.insert(normalize(&name), entry);
        }
        log::debug!("Loaded {} presets from JSON", count);
        Ok(count)
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOM: &str = r#"{
        "Drone": {
            "title": "Delivery Drone",
            "model": "rocket",
            "file_size_mb": 22.5,
            "analysis": {
                "health_score": 64,
                "ngon_count": 410,
                "uv_coverage": 71.0,
                "density_issues": 6,
                "inverted_normals": 12,
                "original_polys": 150000,
                "optimized_polys": 40000,
                "file_size_reduction_pct": 70.0,
                "issues": [
                    { "severity": "warning", "issue": "Dense rotor blades", "fix": "Use a card with alpha" }
                ]
            }
        }
    }"#;

    #[test]
    fn test_builtins_registered() {
        let registry = PresetRegistry::new();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.names(), ["character", "product", "scene"]);
        assert_eq!(
            registry.get("Character").unwrap().analysis,
            analysis_for(PresetKey::Character)
        );
    }

    #[test]
    fn test_unknown_preset() {
        let registry = PresetRegistry::new();
        assert!(registry.get("vehicle").is_none());
        assert!(matches!(
            registry.require("vehicle"),
            Err(MetricsError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_builtin_stages_match_stage_table() {
        let registry = PresetRegistry::new();
        let entry = registry.get("scene").unwrap();
        assert_eq!(
            entry.stages().unwrap(),
            crate::stages::stages_for(PresetKey::Scene).unwrap()
        );
    }

    #[test]
    fn test_load_json() {
        let registry = PresetRegistry::new();
        assert_eq!(registry.load_json(CUSTOM).unwrap(), 1);
        assert!(registry.contains("drone"));

        let entry = registry.get("drone").unwrap();
        assert_eq!(entry.model, ModelKind::Rocket);
        let stages = entry.stages().unwrap();
        assert_eq!(stages.first().polygon_count, 150_000);
        assert_eq!(stages.last().polygon_count, 40_000);
    }

    #[test]
    fn test_load_json_rejects_bad_entries() {
        let registry = PresetRegistry::empty();
        let negative_size = CUSTOM.replace("22.5", "-1.0");
        assert!(matches!(
            registry.load_json(&negative_size),
            Err(MetricsError::InvalidStages(_))
        ));
        assert!(matches!(
            registry.load_json("[1, 2, 3]"),
            Err(MetricsError::SerializationError(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_json_huge_polygon_counts() {
        let registry = PresetRegistry::empty();
        for original in ["18014398509481987", "18446744073709551615"] {
            let json = CUSTOM
                .replace("150000", original)
                .replace("\"optimized_polys\": 40000", "\"optimized_polys\": 0");
            assert_eq!(registry.load_json(&json).unwrap(), 1);

            let stages = registry.get("drone").unwrap().stages().unwrap();
            assert_eq!(stages.first().polygon_count, original.parse::<u64>().unwrap());
            assert_eq!(stages.last().polygon_count, 0);
        }
    }

    #[test]
    fn test_register_replaces() {
        let registry = PresetRegistry::new();
        let mut entry = PresetEntry::builtin(PresetKey::Product);
        entry.title = "Perfume Bottle".to_string();
        registry.register("PRODUCT", entry);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("product").unwrap().title, "Perfume Bottle");
    }
}
