//! Viewer configuration

use amao_core::{DeltaTime, Turntable};
use amao_scene::{Aabb, RenderFlags};
use glam::Vec3;
use serde::Serialize;

/// How the two viewports are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Side-by-side viewers; the "after" model follows the pipeline stage
    #[default]
    Pipeline,
    /// One viewer split by a slider; the "after" model is fully optimized
    Comparison,
}

/// Viewport configuration
#[derive(Debug, Clone, Serialize)]
pub struct ViewportConfig {
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    #[serde(skip)]
    pub turntable: Turntable,
    pub wireframe: bool,
    /// Comparison slider position, 0 (all "before") to 1 (all "after")
    split: f32,
    pub mode: ViewMode,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            camera_position: Vec3::new(0.0, 1.5, 5.0),
            camera_target: Vec3::new(0.0, 1.0, 0.0),
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            turntable: Turntable::default(),
            wireframe: false,
            split: 0.5,
            mode: ViewMode::Pipeline,
        }
    }
}

impl ViewportConfig {
    pub fn split(&self) -> f32 {
        self.split
    }

    /// Move the comparison slider; clamped to `0..=1`, non-finite becomes 0
    pub fn set_split(&mut self, split: f32) {
        self.split = if split.is_finite() { split.clamp(0.0, 1.0) } else { 0.0 };
    }

    /// Render flags for the current mode
    pub fn render_flags(&self) -> RenderFlags {
        if self.wireframe {
            RenderFlags::WIREFRAME
        } else {
            RenderFlags::empty()
        }
    }

    /// Advance auto-rotation
    pub fn advance(&mut self, delta: DeltaTime) {
        self.turntable.advance(delta);
    }

    /// Current model rotation in radians
    pub fn angle(&self) -> f32 {
        self.turntable.angle()
    }

    /// Aim the camera so the whole box is visible
    pub fn frame_bounds(&mut self, bounds: &Aabb) {
        if bounds.is_empty() {
            return;
        }
        let center = bounds.center();
        let radius = (bounds.size().length() * 0.5).max(0.1);
        let half_fov = (self.fov.to_radians() * 0.5).max(0.01);
        let distance = radius / half_fov.sin() * 1.1;

        self.camera_target = center;
        self.camera_position = center + Vec3::new(0.0, radius * 0.3, distance);
        self.far = self.far.max(distance + radius * 2.0);
    }

    /// Distance from camera to target
    pub fn camera_distance(&self) -> f32 {
        self.camera_position.distance(self.camera_target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_clamped() {
        let mut viewport = ViewportConfig::default();
        assert_eq!(viewport.split(), 0.5);
        viewport.set_split(1.7);
        assert_eq!(viewport.split(), 1.0);
        viewport.set_split(-3.0);
        assert_eq!(viewport.split(), 0.0);
        viewport.set_split(0.25);
        assert_eq!(viewport.split(), 0.25);
        viewport.set_split(f32::NAN);
        assert_eq!(viewport.split(), 0.0);
    }

    #[test]
    fn test_render_flags() {
        let mut viewport = ViewportConfig::default();
        assert!(viewport.render_flags().is_empty());
        viewport.wireframe = true;
        assert_eq!(viewport.render_flags(), RenderFlags::WIREFRAME);
    }

    #[test]
    fn test_frame_bounds() {
        let mut viewport = ViewportConfig::default();
        let bounds = Aabb::from_center_half_extents(Vec3::new(0.0, 2.0, 0.0), Vec3::splat(2.0));
        viewport.frame_bounds(&bounds);

        assert_eq!(viewport.camera_target, Vec3::new(0.0, 2.0, 0.0));
        let radius = bounds.size().length() * 0.5;
        assert!(viewport.camera_distance() > radius);
        assert!(viewport.far > viewport.camera_distance());
    }

    #[test]
    fn test_empty_bounds_leave_camera() {
        let mut viewport = ViewportConfig::default();
        let before = viewport.camera_position;
        viewport.frame_bounds(&Aabb::EMPTY);
        assert_eq!(viewport.camera_position, before);
    }
}
