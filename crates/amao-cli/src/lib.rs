//! # AMAO CLI
//!
//! Command-line front end for the AMAO showcase engine.
//!
//! ## Commands
//! - `models` - List catalog models
//! - `build` - Describe a model at a detail level
//! - `presets` - List analysis presets
//! - `analyze` - Show the analysis card for a preset or a file
//! - `run` - Play the optimization pipeline

pub mod render;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use amao_core::{DemoConfig, DetailLevel, ManualClock, SystemClock};
use amao_demo::{DemoSession, Frame, ViewMode};
use amao_metrics::{PresetRegistry, create_rng, simulate_upload};
use amao_pipeline::{AnimatorEvent, Stage};
use amao_scene::{RenderFlags, model_or_placeholder};
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;

/// AMAO showcase engine CLI
#[derive(Parser)]
#[command(name = "amao")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Demo configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Extra presets file (JSON object of name -> preset)
    #[arg(long)]
    pub presets: Option<PathBuf>,

    /// Before/after comparison view
    #[arg(long)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List catalog models with triangle counts
    Models,

    /// Describe a model at a detail level
    Build {
        /// Model name; unknown names use the placeholder
        model: String,

        /// Detail level, 0 (optimized) to 4 (original)
        #[arg(short, long, conflicts_with = "optimized")]
        detail: Option<u8>,

        /// Use the optimized detail level
        #[arg(long)]
        optimized: bool,

        /// Wireframe rendering
        #[arg(long)]
        wireframe: bool,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// List analysis presets
    Presets,

    /// Show an analysis card
    Analyze {
        /// Preset name
        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        preset: Option<String>,

        /// File to simulate an upload for; only its size is read
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Seed for simulated values (defaults to the config seed)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Play the optimization pipeline
    Run {
        /// Preset name (defaults to the config preset)
        #[arg(short, long, conflicts_with = "file")]
        preset: Option<String>,

        /// File to simulate an upload for; only its size is read
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Play at wall-clock speed; Ctrl-C stops
        #[arg(long)]
        realtime: bool,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
}

/// Execute the CLI command
pub fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

/// Execute the CLI command, writing results to `out`
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let registry = Arc::new(PresetRegistry::new());
    if let Some(path) = &cli.presets {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read presets from {}", path.display()))?;
        let count = registry
            .load_json(&text)
            .with_context(|| format!("Invalid presets in {}", path.display()))?;
        log::info!("Loaded {} presets from {}", count, path.display());
    }

    match cli.command {
        Commands::Models => render::write_models(out)?,

        Commands::Build {
            model,
            detail,
            optimized,
            wireframe,
            json,
        } => {
            let kind = model_or_placeholder(&model);
            let detail = match detail {
                Some(level) => DetailLevel::new(level),
                None => DetailLevel::from_optimized(optimized),
            };
            let flags = if wireframe || config.wireframe {
                RenderFlags::WIREFRAME
            } else {
                RenderFlags::empty()
            };

            let desc = kind.spec().describe(detail, flags);
            if json {
                writeln!(out, "{}", desc.to_json()?)?;
            } else {
                render::write_description(out, &desc)?;
            }
        }

        Commands::Presets => {
            let entries: Vec<_> = registry
                .names()
                .into_iter()
                .filter_map(|name| registry.get(&name).map(|entry| (name, entry)))
                .collect();
            render::write_presets(out, entries.iter().map(|(name, entry)| (name.as_str(), entry)))?;
        }

        Commands::Analyze {
            preset,
            file,
            seed,
            json,
        } => {
            if let Some(path) = file {
                let (name, size) = file_metadata(&path)?;
                let mut rng = create_rng(seed.unwrap_or(config.seed));
                let upload = simulate_upload(&name, size, &mut rng);
                if json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&upload)?)?;
                } else {
                    render::write_upload(out, &upload)?;
                }
            } else {
                let name = preset.unwrap_or_else(|| config.default_preset.clone());
                let entry = registry.require(&name)?;
                if json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&entry.analysis)?)?;
                } else {
                    render::write_analysis(out, &entry.title, &entry.analysis)?;
                }
            }
        }

        Commands::Run {
            preset,
            file,
            realtime,
            json,
        } => {
            let mut session = DemoSession::new(config.clone(), registry.clone())?;
            if let Some(path) = file {
                let (name, size) = file_metadata(&path)?;
                session.load_upload(&name, size)?;
            } else if let Some(preset) = preset {
                session.select_preset(&preset)?;
            }
            if cli.demo {
                session.set_mode(ViewMode::Comparison);
            }

            let report = if realtime {
                run_realtime(&mut session, out, json)?
            } else {
                run_instant(&mut session, out, json)?
            };
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    match path {
        Some(path) => DemoConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(DemoConfig::default()),
    }
}

/// File name and size; the content is never opened
fn file_metadata(path: &Path) -> Result<(String, u64)> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a file", path.display());
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok((name, metadata.len()))
}

/// Outcome of a pipeline run
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub source: String,
    pub completed: bool,
    pub stages: Vec<Stage>,
    pub events: Vec<AnimatorEvent>,
    pub before_triangles: u64,
    pub after_triangles: u64,
}

/// Print stage transitions and collect the run's events
struct Recorder {
    json: bool,
    events: Vec<AnimatorEvent>,
    original_polys: u64,
}

impl Recorder {
    fn new(session: &DemoSession, json: bool) -> Self {
        Self {
            json,
            events: Vec::new(),
            original_polys: session.animator().sequence().first().polygon_count,
        }
    }

    fn record(&mut self, session: &DemoSession, frame: &Frame, out: &mut impl Write) -> Result<()> {
        for event in &frame.events {
            if !self.json {
                match *event {
                    AnimatorEvent::StageEntered { stage, detail } => {
                        let sequence = session.animator().sequence();
                        render::write_stage(out, stage, sequence.len(), sequence.get(stage), detail)?;
                        render::write_comparison(out, frame)?;
                    }
                    AnimatorEvent::Completed => {
                        render::write_summary(out, self.original_polys, frame)?;
                    }
                    _ => {}
                }
            }
        }
        self.events.extend(frame.events.iter().copied());
        Ok(())
    }

    fn finish(self, session: &DemoSession, frame: &Frame) -> RunReport {
        RunReport {
            source: session.source().label().to_string(),
            completed: frame.is_complete(),
            stages: session.animator().sequence().stages().to_vec(),
            events: self.events,
            before_triangles: frame.before.stats.triangle_count,
            after_triangles: frame.after.stats.triangle_count,
        }
    }
}

/// Upper bound on updates for an instant run
const MAX_INSTANT_UPDATES: usize = 100_000;

/// Drive the session with a manual clock as fast as possible
fn run_instant(session: &mut DemoSession, out: &mut impl Write, json: bool) -> Result<RunReport> {
    let clock = ManualClock::new();
    let tick = session.config().tick_interval();
    let mut recorder = Recorder::new(session, json);

    session.play(&clock);
    let mut frame = session.update(&clock);
    recorder.record(session, &frame, out)?;

    for _ in 0..MAX_INSTANT_UPDATES {
        if frame.is_complete() {
            break;
        }
        clock.advance(tick);
        frame = session.update(&clock);
        recorder.record(session, &frame, out)?;
    }
    if !frame.is_complete() {
        bail!("Pipeline did not complete after {} updates", MAX_INSTANT_UPDATES);
    }

    Ok(recorder.finish(session, &frame))
}

/// Drive the session in real time until it completes or Ctrl-C
fn run_realtime(session: &mut DemoSession, out: &mut impl Write, json: bool) -> Result<RunReport> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    runtime.block_on(async {
        let clock = SystemClock::new();
        let mut interval = tokio::time::interval(session.config().tick_interval());
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut recorder = Recorder::new(session, json);

        session.play(&clock);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let frame = session.update(&clock);
                    recorder.record(session, &frame, out)?;
                    if frame.is_complete() {
                        return Ok(recorder.finish(session, &frame));
                    }
                }
                result = &mut ctrl_c => {
                    result.context("Failed to listen for Ctrl-C")?;
                    session.stop();
                    log::info!("Interrupted; pipeline stopped");
                    let frame = session.update(&clock);
                    recorder.record(session, &frame, out)?;
                    return Ok(recorder.finish(session, &frame));
                }
            }
        }
    })
}
