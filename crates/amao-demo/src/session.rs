//! Showcase session
//!
//! Owns everything one showcase page shows: the selected preset or upload,
//! the pipeline animator and the viewport. Front ends call [`DemoSession::update`]
//! once per frame and render the returned [`Frame`].

use std::sync::Arc;
use std::time::Duration;

use amao_core::{Clock, DemoConfig, DetailLevel, StepFunction};
use amao_metrics::{
    AnalysisResult, PresetEntry, PresetRegistry, UploadAnalysis, create_rng, simulate_upload,
    upload_stages,
};
use amao_pipeline::{Animator, AnimatorEvent, AnimatorState, Stage, StageSequence};
use amao_scene::{ModelKind, ModelSpec, SceneDescription};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::DemoResult;
use crate::viewport::{ViewMode, ViewportConfig};

/// What the session is currently showing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SessionSource {
    Preset { name: String, entry: PresetEntry },
    Upload(UploadAnalysis),
}

impl SessionSource {
    /// Model drawn in the viewers
    pub fn model(&self) -> ModelKind {
        match self {
            Self::Preset { entry, .. } => entry.model,
            Self::Upload(upload) => upload.preview_model(),
        }
    }

    /// Analysis card, only for presets
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Preset { entry, .. } => Some(&entry.analysis),
            Self::Upload(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Preset { entry, .. } => &entry.title,
            Self::Upload(upload) => &upload.file_name,
        }
    }
}

/// Everything a front end needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub status: AnimatorState,
    pub stage_index: usize,
    pub stage_count: usize,
    pub stage: Stage,
    /// Progress across all stages, 0 to 100
    pub overall_progress: f32,
    /// Events raised since the previous frame
    pub events: Vec<AnimatorEvent>,
    /// Model at full detail
    pub before: SceneDescription,
    /// Model at the detail of the current stage
    pub after: SceneDescription,
    pub analysis: Option<AnalysisResult>,
    pub upload: Option<UploadAnalysis>,
    /// Turntable angle in radians
    pub angle: f32,
    pub split: f32,
    pub mode: ViewMode,
}

impl Frame {
    /// Triangle reduction between the two viewers, in percent
    pub fn triangle_reduction_pct(&self) -> f64 {
        amao_metrics::reduction_pct(
            self.before.stats.triangle_count as f64,
            self.after.stats.triangle_count as f64,
        )
    }

    pub fn is_complete(&self) -> bool {
        self.status == AnimatorState::Complete
    }
}

/// One interactive showcase
pub struct DemoSession {
    config: DemoConfig,
    registry: Arc<PresetRegistry>,
    source: SessionSource,
    spec: ModelSpec,
    animator: Animator,
    viewport: ViewportConfig,
    upload_rng: Pcg32,
    last_update: Option<Duration>,
}

impl DemoSession {
    /// Create a session showing the configured default preset
    pub fn new(config: DemoConfig, registry: Arc<PresetRegistry>) -> DemoResult<Self> {
        config.validate()?;

        let entry = registry.require(&config.default_preset)?;
        let animator = Animator::from_config(entry.stages()?, &config);
        let spec = entry.model.spec();

        let mut viewport = ViewportConfig::default();
        viewport.wireframe = config.wireframe;
        viewport.turntable.speed = config.auto_rotate_speed;
        viewport.frame_bounds(&spec.describe(DetailLevel::ORIGINAL, viewport.render_flags()).stats.bounds);

        log::info!("Session started on preset '{}'", config.default_preset);

        Ok(Self {
            upload_rng: create_rng(config.seed),
            source: SessionSource::Preset {
                name: config.default_preset.trim().to_ascii_lowercase(),
                entry,
            },
            config,
            registry,
            spec,
            animator,
            viewport,
            last_update: None,
        })
    }

    /// Switch presets. The pipeline returns to idle at stage 0.
    pub fn select_preset(&mut self, name: &str) -> DemoResult<()> {
        let entry = self.registry.require(name)?;
        let stages = entry.stages()?;
        self.load(stages, self.config.step, entry.model);
        self.source = SessionSource::Preset {
            name: name.trim().to_ascii_lowercase(),
            entry,
        };
        log::info!("Selected preset '{}'", name);
        Ok(())
    }

    /// Simulate an upload and show it. The file content is never read.
    pub fn load_upload(&mut self, file_name: &str, file_size_bytes: u64) -> DemoResult<UploadAnalysis> {
        let upload = simulate_upload(file_name, file_size_bytes, &mut self.upload_rng);
        let stages = upload_stages(&upload)?;
        let step = StepFunction::Jitter {
            max: self.config.step.max_step(),
        };
        self.load(stages, step, upload.preview_model());
        self.source = SessionSource::Upload(upload.clone());
        log::info!("Loaded upload '{}'", file_name);
        Ok(upload)
    }

    fn load(&mut self, stages: StageSequence, step: StepFunction, model: ModelKind) {
        let config = DemoConfig {
            step,
            ..self.config.clone()
        };
        self.animator = Animator::from_config(stages, &config);
        self.spec = model.spec();
        let bounds = self
            .spec
            .describe(DetailLevel::ORIGINAL, self.viewport.render_flags())
            .stats
            .bounds;
        self.viewport.frame_bounds(&bounds);
    }

    /// Start the pipeline, or resume it when paused
    pub fn play<C: Clock + ?Sized>(&mut self, clock: &C) -> bool {
        if matches!(self.animator.state(), AnimatorState::Paused { .. }) {
            self.animator.resume(clock)
        } else {
            self.animator.start(clock)
        }
    }

    /// Freeze the pipeline in place
    pub fn pause(&mut self) -> bool {
        self.animator.pause()
    }

    /// Abort the pipeline; progress is lost
    pub fn stop(&mut self) -> bool {
        self.animator.stop()
    }

    /// Return the pipeline and the turntable to their initial state
    pub fn reset(&mut self) {
        self.animator.reset();
        self.viewport.turntable.reset();
    }

    /// Flip wireframe rendering; returns the new state
    pub fn toggle_wireframe(&mut self) -> bool {
        self.viewport.wireframe = !self.viewport.wireframe;
        self.viewport.wireframe
    }

    pub fn set_split(&mut self, split: f32) {
        self.viewport.set_split(split);
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.viewport.mode = mode;
    }

    /// Advance time and build the next frame
    pub fn update<C: Clock + ?Sized>(&mut self, clock: &C) -> Frame {
        let now = clock.now();
        let delta = self
            .last_update
            .map(|last| now.saturating_sub(last))
            .unwrap_or_default();
        self.last_update = Some(now);

        self.viewport.advance(delta.into());
        let events = self.animator.update(clock);
        self.frame(events)
    }

    fn frame(&self, events: Vec<AnimatorEvent>) -> Frame {
        let flags = self.viewport.render_flags();
        let after_detail = match self.viewport.mode {
            ViewMode::Pipeline => self.animator.detail(),
            ViewMode::Comparison => DetailLevel::OPTIMIZED,
        };

        Frame {
            status: self.animator.state(),
            stage_index: self.animator.stage_index(),
            stage_count: self.animator.sequence().len(),
            stage: self.animator.current_stage().clone(),
            overall_progress: self.animator.overall_progress(),
            events,
            before: self.spec.describe(DetailLevel::ORIGINAL, flags),
            after: self.spec.describe(after_detail, flags),
            analysis: self.source.analysis().cloned(),
            upload: match &self.source {
                SessionSource::Upload(upload) => Some(upload.clone()),
                SessionSource::Preset { .. } => None,
            },
            angle: self.viewport.angle(),
            split: self.viewport.split(),
            mode: self.viewport.mode,
        }
    }

    pub fn source(&self) -> &SessionSource {
        &self.source
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn registry(&self) -> &PresetRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amao_core::ManualClock;

    fn session() -> DemoSession {
        DemoSession::new(DemoConfig::default(), Arc::new(PresetRegistry::new())).unwrap()
    }

    fn run(session: &mut DemoSession, clock: &ManualClock, updates: usize) -> Frame {
        let mut frame = session.update(clock);
        for _ in 0..updates {
            clock.advance(Duration::from_millis(100));
            frame = session.update(clock);
        }
        frame
    }

    #[test]
    fn test_new_session() {
        let mut session = session();
        let frame = session.update(&ManualClock::new());
        assert_eq!(frame.status, AnimatorState::Idle);
        assert_eq!(frame.stage_index, 0);
        assert_eq!(frame.stage_count, 5);
        assert_eq!(frame.before.model, ModelKind::Character);
        assert_eq!(frame.analysis.unwrap().health_score, 72);
        assert!(frame.upload.is_none());
    }

    #[test]
    fn test_unknown_default_preset() {
        let config = DemoConfig {
            default_preset: "vehicle".into(),
            ..DemoConfig::default()
        };
        assert!(DemoSession::new(config, Arc::new(PresetRegistry::new())).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DemoConfig {
            tick_interval_ms: 0,
            ..DemoConfig::default()
        };
        assert!(matches!(
            DemoSession::new(config, Arc::new(PresetRegistry::new())),
            Err(crate::DemoError::Config(_))
        ));
    }

    #[test]
    fn test_select_preset_resets_stage_and_progress() {
        let mut session = session();
        let clock = ManualClock::new();
        assert!(session.play(&clock));
        let frame = run(&mut session, &clock, 40);
        assert!(frame.stage_index > 0);

        session.select_preset("scene").unwrap();
        let frame = session.update(&clock);
        assert_eq!(frame.status, AnimatorState::Idle);
        assert_eq!(frame.stage_index, 0);
        assert_eq!(session.animator().progress(), 0.0);
        assert_eq!(frame.before.model, ModelKind::House);
    }

    #[test]
    fn test_unknown_preset_keeps_current() {
        let mut session = session();
        assert!(session.select_preset("vehicle").is_err());
        assert_eq!(session.source().model(), ModelKind::Character);
    }

    #[test]
    fn test_stop_loses_progress() {
        let mut session = session();
        let clock = ManualClock::new();
        session.play(&clock);
        run(&mut session, &clock, 5);
        assert!(session.animator().progress() > 0.0);

        assert!(session.stop());
        let frame = session.update(&clock);
        assert_eq!(frame.status, AnimatorState::Idle);
        assert_eq!(frame.overall_progress, 0.0);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut session = session();
        let clock = ManualClock::new();
        session.play(&clock);
        run(&mut session, &clock, 3);

        assert!(session.pause());
        let paused_at = session.animator().progress();
        run(&mut session, &clock, 10);
        assert_eq!(session.animator().progress(), paused_at);

        assert!(session.play(&clock));
        run(&mut session, &clock, 1);
        assert!(session.animator().progress() > paused_at);
    }

    #[test]
    fn test_runs_to_completion() {
        let mut session = session();
        let clock = ManualClock::new();
        session.play(&clock);

        let mut frame = session.update(&clock);
        for _ in 0..1_000 {
            if frame.is_complete() {
                break;
            }
            clock.advance(Duration::from_millis(100));
            frame = session.update(&clock);
        }
        assert!(frame.is_complete());
        assert_eq!(frame.overall_progress, 100.0);
        assert_eq!(frame.after.detail, DetailLevel::OPTIMIZED);
        assert!(frame.triangle_reduction_pct() > 0.0);
    }

    #[test]
    fn test_wireframe_keeps_counts() {
        let mut session = session();
        let clock = ManualClock::new();
        let solid = session.update(&clock);
        assert!(session.toggle_wireframe());
        let wire = session.update(&clock);

        assert_eq!(solid.before.stats, wire.before.stats);
        assert_eq!(solid.after.stats, wire.after.stats);
        assert!(wire.before.flags.contains(amao_scene::RenderFlags::WIREFRAME));
        assert!(!session.toggle_wireframe());
    }

    #[test]
    fn test_comparison_mode() {
        let mut session = session();
        session.set_mode(ViewMode::Comparison);
        session.set_split(2.0);
        let frame = session.update(&ManualClock::new());
        assert_eq!(frame.after.detail, DetailLevel::OPTIMIZED);
        assert_eq!(frame.before.detail, DetailLevel::ORIGINAL);
        assert_eq!(frame.split, 1.0);
    }

    #[test]
    fn test_turntable_rotates() {
        let mut session = session();
        let clock = ManualClock::new();
        let first = session.update(&clock);
        clock.advance(Duration::from_secs(1));
        let second = session.update(&clock);
        assert_eq!(first.angle, 0.0);
        assert!((second.angle - 0.5).abs() < 1e-5);

        session.reset();
        assert_eq!(session.viewport().angle(), 0.0);
    }

    #[test]
    fn test_upload_previews_placeholder() {
        let mut session = session();
        let upload = session.load_upload("dragon.fbx", 8 * 1024 * 1024).unwrap();
        assert!((100_000..400_000).contains(&upload.original_polys));

        let clock = ManualClock::new();
        let frame = session.update(&clock);
        assert_eq!(frame.before.model, ModelKind::Placeholder);
        assert!(frame.analysis.is_none());
        assert_eq!(frame.upload.as_ref(), Some(&upload));
        assert_eq!(frame.stage.polygon_count, upload.original_polys);

        session.play(&clock);
        let frame = run(&mut session, &clock, 2);
        assert!(frame.overall_progress > 0.0);
    }

    #[test]
    fn test_frame_json() {
        let mut session = session();
        let frame = session.update(&ManualClock::new());
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"state\":\"idle\""));
        assert!(json.contains("\"mode\":\"pipeline\""));
    }
}
