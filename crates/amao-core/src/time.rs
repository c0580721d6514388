//! Time Management
//!
//! Time sources and timers for the showcase:
//! - Injected clocks (wall clock or manually advanced)
//! - Owned fixed-interval ticker replacing ad-hoc interval callbacks
//! - Turntable rotation for auto-rotating viewers

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Delta time wrapper for type safety
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaTime(pub f64);

impl DeltaTime {
    /// Create a new delta time from seconds
    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// Create a new delta time from milliseconds
    pub fn from_millis(millis: f64) -> Self {
        Self(millis / 1000.0)
    }

    /// Get the delta time in seconds
    pub fn as_secs(&self) -> f64 {
        self.0
    }

    /// Get the delta time as f32 (commonly needed for graphics)
    pub fn as_secs_f32(&self) -> f32 {
        self.0 as f32
    }
}

impl Default for DeltaTime {
    fn default() -> Self {
        Self(1.0 / 60.0)
    }
}

impl From<Duration> for DeltaTime {
    fn from(duration: Duration) -> Self {
        Self(duration.as_secs_f64())
    }
}

/// Monotonic time source.
///
/// `now` returns the time elapsed since the clock's own origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced clock.
///
/// Clones share the same time value, so a test or a headless driver can
/// keep one handle while the session holds another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward
    pub fn advance(&self, delta: Duration) {
        let nanos = delta.as_nanos().min(u64::MAX as u128) as u64;
        self.nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    /// Jump to an absolute time; moving backwards is ignored
    pub fn set(&self, time: Duration) {
        let nanos = time.as_nanos().min(u64::MAX as u128) as u64;
        self.nanos.fetch_max(nanos, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Relaxed))
    }
}

/// Fixed-interval ticker.
///
/// Converts elapsed clock time into a count of whole ticks. The remainder is
/// carried over so uneven polling never loses time.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    accumulator: Duration,
    last_poll: Option<Duration>,
    running: bool,
}

impl Ticker {
    /// Shortest accepted interval
    pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Create a stopped ticker
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Self::MIN_INTERVAL),
            accumulator: Duration::ZERO,
            last_poll: None,
            running: false,
        }
    }

    /// Start ticking from `now`
    pub fn start(&mut self, now: Duration) {
        self.running = true;
        self.accumulator = Duration::ZERO;
        self.last_poll = Some(now);
    }

    /// Stop ticking and drop any partial interval
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = Duration::ZERO;
        self.last_poll = None;
    }

    /// Drop any partial interval; a running ticker re-anchors on the next poll
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
        self.last_poll = None;
    }

    /// Number of whole ticks due since the previous poll
    pub fn poll(&mut self, now: Duration) -> u32 {
        if !self.running {
            return 0;
        }

        let Some(last) = self.last_poll.replace(now) else {
            return 0;
        };

        self.accumulator += now.saturating_sub(last);
        let ticks = self.accumulator.as_nanos() / self.interval.as_nanos();
        let ticks = ticks.min(u32::MAX as u128) as u32;
        self.accumulator -= self.interval * ticks;
        ticks
    }

    /// Check if the ticker is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tick interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Progress toward the next tick (0.0 to 1.0)
    pub fn phase(&self) -> f32 {
        (self.accumulator.as_secs_f32() / self.interval.as_secs_f32()).min(1.0)
    }
}

/// Continuous rotation around the vertical axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turntable {
    /// Current angle in radians, kept in `0..TAU`
    angle: f32,
    /// Angular speed in radians per second
    pub speed: f32,
    /// Whether rotation advances
    pub enabled: bool,
}

impl Turntable {
    pub fn new(speed: f32) -> Self {
        Self {
            angle: 0.0,
            speed: if speed.is_finite() { speed } else { 0.0 },
            enabled: true,
        }
    }

    /// Advance rotation by a frame delta
    pub fn advance(&mut self, delta: DeltaTime) {
        if !self.enabled {
            return;
        }
        let step = self.speed * delta.as_secs_f32();
        if step.is_finite() {
            self.angle = (self.angle + step).rem_euclid(std::f32::consts::TAU);
        }
    }

    /// Current angle in radians
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn reset(&mut self) {
        self.angle = 0.0;
    }
}

impl Default for Turntable {
    fn default() -> Self {
        Self::new(0.5)
    }
}
