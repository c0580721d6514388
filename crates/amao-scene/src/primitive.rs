//! Primitive shapes
//!
//! Each primitive pairs a shape kind with a segment range. The range maps a
//! detail level to a concrete segment count; tessellation statistics follow
//! the usual WebGL parametric generators (sphere, box, cylinder, ...).

use amao_core::DetailLevel;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::material::Material;
use crate::transform::Aabb;

/// Primitive shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    /// Unit-radius UV sphere
    Sphere,
    /// Unit cube
    Box,
    /// Unit-radius, unit-height capped cylinder
    Cylinder,
    /// Unit-radius, unit-height cone
    Cone,
    /// Unit-radius capsule with a unit-length middle section
    Capsule,
    /// Unit-radius torus with a 0.4 tube, lying in the XY plane
    Torus,
    /// Unit-radius geodesic icosahedron
    Icosahedron,
    /// Unit plane in the XY plane
    Plane,
}

impl PrimitiveKind {
    /// Every kind, in declaration order
    pub const ALL: [PrimitiveKind; 8] = [
        Self::Sphere,
        Self::Box,
        Self::Cylinder,
        Self::Cone,
        Self::Capsule,
        Self::Torus,
        Self::Icosahedron,
        Self::Plane,
    ];

    /// Default segment constants for this kind
    pub const fn segment_range(&self) -> Segments {
        match self {
            Self::Sphere => Segments::new(8, 64),
            Self::Box => Segments::new(1, 8),
            Self::Cylinder => Segments::new(6, 48),
            Self::Cone => Segments::new(6, 48),
            Self::Capsule => Segments::new(4, 32),
            Self::Torus => Segments::new(8, 64),
            Self::Icosahedron => Segments::new(0, 4),
            Self::Plane => Segments::new(1, 16),
        }
    }

    /// Smallest segment count the generator accepts
    const fn min_segments(&self) -> u32 {
        match self {
            Self::Sphere | Self::Cylinder | Self::Cone | Self::Torus => 3,
            Self::Capsule | Self::Box | Self::Plane => 1,
            Self::Icosahedron => 0,
        }
    }

    /// Triangle count for a given segment count
    pub fn triangle_count(&self, segments: u32) -> u64 {
        let s = segments.max(self.min_segments()) as u64;
        match self {
            Self::Sphere => {
                let (w, h) = sphere_grid(s);
                2 * w * (h - 1)
            }
            Self::Box => 12 * s * s,
            // Sides plus two caps
            Self::Cylinder => 2 * s + 2 * s,
            // Sides collapse to single triangles at the apex, one cap
            Self::Cone => s + s,
            Self::Capsule => {
                let cap = capsule_cap_segments(s);
                2 * s * (2 * cap + 1)
            }
            Self::Torus => {
                let (radial, tubular) = torus_grid(s);
                2 * radial * tubular
            }
            Self::Icosahedron => 20 * (s + 1) * (s + 1),
            Self::Plane => 2 * s * s,
        }
    }

    /// Vertex count for a given segment count
    pub fn vertex_count(&self, segments: u32) -> u64 {
        let s = segments.max(self.min_segments()) as u64;
        match self {
            Self::Sphere => {
                let (w, h) = sphere_grid(s);
                (w + 1) * (h + 1)
            }
            Self::Box => 6 * (s + 1) * (s + 1),
            Self::Cylinder => 2 * (s + 1) + 2 * (2 * s + 1),
            Self::Cone => 2 * (s + 1) + (2 * s + 1),
            Self::Capsule => {
                let cap = capsule_cap_segments(s);
                (s + 1) * (2 * cap + 2)
            }
            Self::Torus => {
                let (radial, tubular) = torus_grid(s);
                (radial + 1) * (tubular + 1)
            }
            // Non-indexed
            Self::Icosahedron => 3 * self.triangle_count(segments),
            Self::Plane => (s + 1) * (s + 1),
        }
    }

    /// Local bounds of the unit shape
    pub fn local_bounds(&self) -> Aabb {
        let half = match self {
            Self::Sphere | Self::Icosahedron => Vec3::ONE,
            Self::Box => Vec3::splat(0.5),
            Self::Cylinder | Self::Cone => Vec3::new(1.0, 0.5, 1.0),
            Self::Capsule => Vec3::new(1.0, 1.5, 1.0),
            Self::Torus => Vec3::new(1.4, 1.4, 0.4),
            Self::Plane => Vec3::new(0.5, 0.5, 0.0),
        };
        Aabb::from_center_half_extents(Vec3::ZERO, half)
    }

    /// Lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Box => "box",
            Self::Cylinder => "cylinder",
            Self::Cone => "cone",
            Self::Capsule => "capsule",
            Self::Torus => "torus",
            Self::Icosahedron => "icosahedron",
            Self::Plane => "plane",
        }
    }
}

/// Width and height segments of a sphere
fn sphere_grid(segments: u64) -> (u64, u64) {
    (segments, (segments / 2).max(2))
}

/// Radial and tubular segments of a torus
fn torus_grid(segments: u64) -> (u64, u64) {
    ((segments / 2).max(3), segments)
}

/// Cap segments of a capsule for a given radial count
fn capsule_cap_segments(radial: u64) -> u64 {
    (radial / 4).max(1)
}

/// Segment constants for the coarsest and finest detail levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segments {
    low: u32,
    high: u32,
}

impl Segments {
    /// Create a range; a reversed range is swapped so detail stays monotone
    pub const fn new(low: u32, high: u32) -> Self {
        if low <= high {
            Self { low, high }
        } else {
            Self { low: high, high: low }
        }
    }

    /// Same segment count at every detail level
    pub const fn fixed(count: u32) -> Self {
        Self {
            low: count,
            high: count,
        }
    }

    /// Segments at `DetailLevel::MIN`
    pub fn low(&self) -> u32 {
        self.low.min(self.high)
    }

    /// Segments at `DetailLevel::MAX`
    pub fn high(&self) -> u32 {
        self.low.max(self.high)
    }

    /// Segment count at a detail level
    pub fn at(&self, detail: DetailLevel) -> u32 {
        // Deserialized ranges bypass `new`, so order them here too
        let (low, high) = (self.low(), self.high());
        let span = (high - low) as u64;
        let step = span * detail.value() as u64 / DetailLevel::MAX.value() as u64;
        low + step as u32
    }
}

/// A single shape with its segment range and material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub segments: Segments,
    pub material: Material,
}

impl Primitive {
    /// Create a primitive with the kind's default segment range
    pub fn new(kind: PrimitiveKind, material: Material) -> Self {
        Self {
            kind,
            segments: kind.segment_range(),
            material,
        }
    }

    /// Override the segment range
    pub fn with_segments(mut self, segments: Segments) -> Self {
        self.segments = segments;
        self
    }

    /// Segment count at a detail level, never below the kind's minimum
    pub fn segments_at(&self, detail: DetailLevel) -> u32 {
        self.segments.at(detail).max(self.kind.min_segments())
    }

    /// Triangle count at a detail level
    pub fn triangle_count(&self, detail: DetailLevel) -> u64 {
        self.kind.triangle_count(self.segments_at(detail))
    }

    /// Vertex count at a detail level
    pub fn vertex_count(&self, detail: DetailLevel) -> u64 {
        self.kind.vertex_count(self.segments_at(detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_interpolate() {
        let seg = Segments::new(8, 64);
        assert_eq!(seg.at(DetailLevel::MIN), 8);
        assert_eq!(seg.at(DetailLevel::new(2)), 36);
        assert_eq!(seg.at(DetailLevel::MAX), 64);
    }

    #[test]
    fn test_segments_reversed_range_is_swapped() {
        let seg = Segments::new(32, 4);
        assert_eq!(seg, Segments::new(4, 32));
    }

    #[test]
    fn test_segments_fixed() {
        let seg = Segments::fixed(4);
        for detail in DetailLevel::all() {
            assert_eq!(seg.at(detail), 4);
        }
    }

    #[test]
    fn test_known_triangle_counts() {
        // 32x16 sphere
        assert_eq!(PrimitiveKind::Sphere.triangle_count(32), 2 * 32 * 15);
        assert_eq!(PrimitiveKind::Box.triangle_count(1), 12);
        assert_eq!(PrimitiveKind::Cylinder.triangle_count(8), 32);
        assert_eq!(PrimitiveKind::Cone.triangle_count(8), 16);
        assert_eq!(PrimitiveKind::Icosahedron.triangle_count(0), 20);
        assert_eq!(PrimitiveKind::Icosahedron.triangle_count(1), 80);
        assert_eq!(PrimitiveKind::Plane.triangle_count(2), 8);
        assert_eq!(PrimitiveKind::Torus.triangle_count(16), 2 * 8 * 16);
        assert_eq!(PrimitiveKind::Capsule.triangle_count(8), 2 * 8 * 5);
    }

    #[test]
    fn test_degenerate_segments_are_raised() {
        assert_eq!(
            PrimitiveKind::Sphere.triangle_count(0),
            PrimitiveKind::Sphere.triangle_count(3)
        );
        assert!(PrimitiveKind::Box.triangle_count(0) > 0);
    }

    #[test]
    fn test_higher_detail_never_decreases_counts() {
        for kind in PrimitiveKind::ALL {
            let prim = Primitive::new(kind, Material::default());
            let levels: Vec<_> = DetailLevel::all().collect();
            for pair in levels.windows(2) {
                assert!(prim.segments_at(pair[0]) <= prim.segments_at(pair[1]), "{:?}", kind);
                assert!(prim.triangle_count(pair[0]) <= prim.triangle_count(pair[1]), "{:?}", kind);
                assert!(prim.vertex_count(pair[0]) <= prim.vertex_count(pair[1]), "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_reversed_segments() {
        let swapped = Segments::new(10, 2);
        assert_eq!((swapped.low(), swapped.high()), (2, 10));

        let parsed: Segments = serde_json::from_str(r#"{ "low": 10, "high": 2 }"#).unwrap();
        assert_eq!(parsed.at(DetailLevel::MIN), 2);
        assert_eq!(parsed.at(DetailLevel::MAX), 10);
        assert_eq!(parsed.at(DetailLevel::new(2)), swapped.at(DetailLevel::new(2)));
    }

    #[test]
    fn test_local_bounds_not_empty() {
        for kind in PrimitiveKind::ALL {
            assert!(!kind.local_bounds().is_empty());
        }
    }
}
