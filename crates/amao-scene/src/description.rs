//! Scene descriptions
//!
//! A model tree evaluated at one detail level: a flat list of positioned
//! primitives with resolved segment counts, ready for a renderer.

use amao_core::DetailLevel;
use glam::Mat4;
use serde::Serialize;

use crate::SceneResult;
use crate::catalog::{ModelKind, ModelNode, ModelSpec};
use crate::material::{Material, RenderFlags};
use crate::primitive::PrimitiveKind;
use crate::transform::{Aabb, Transform};

/// One primitive placed in world space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedPrimitive {
    /// Slash-separated node path, e.g. `root/head/eye_left`
    pub path: String,
    pub kind: PrimitiveKind,
    pub segments: u32,
    pub triangles: u64,
    pub vertices: u64,
    pub world: Transform,
    pub material: Material,
}

/// Aggregate statistics of a description
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneStats {
    pub primitive_count: usize,
    pub triangle_count: u64,
    pub vertex_count: u64,
    pub bounds: Aabb,
}

/// A model evaluated at a detail level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDescription {
    pub model: ModelKind,
    pub detail: DetailLevel,
    pub flags: RenderFlags,
    pub primitives: Vec<PlacedPrimitive>,
    pub stats: SceneStats,
}

impl SceneDescription {
    /// Serialize for a renderer
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a primitive by node path
    pub fn find(&self, path: &str) -> Option<&PlacedPrimitive> {
        self.primitives.iter().find(|p| p.path == path)
    }
}

impl ModelSpec {
    /// Evaluate the tree at a detail level with extra render flags
    pub fn describe(&self, detail: DetailLevel, flags: RenderFlags) -> SceneDescription {
        let mut primitives = Vec::with_capacity(self.root.primitive_count());
        collect(&self.root, Mat4::IDENTITY, "", detail, flags, &mut primitives);

        let mut bounds = Aabb::EMPTY;
        let mut triangle_count = 0;
        let mut vertex_count = 0;
        for placed in &primitives {
            let local = placed.kind.local_bounds();
            bounds = bounds.merge(&local.transform(placed.world.local_matrix()));
            triangle_count += placed.triangles;
            vertex_count += placed.vertices;
        }
        if bounds.is_empty() {
            bounds = Aabb::ZERO;
        }

        SceneDescription {
            model: self.kind,
            detail,
            flags,
            stats: SceneStats {
                primitive_count: primitives.len(),
                triangle_count,
                vertex_count,
                bounds,
            },
            primitives,
        }
    }

    /// Total triangles at a detail level
    pub fn triangle_count(&self, detail: DetailLevel) -> u64 {
        let mut total = 0;
        self.root.walk(&mut |node| {
            if let Some(primitive) = &node.primitive {
                total += primitive.triangle_count(detail);
            }
        });
        total
    }
}

fn collect(
    node: &ModelNode,
    parent_world: Mat4,
    parent_path: &str,
    detail: DetailLevel,
    flags: RenderFlags,
    out: &mut Vec<PlacedPrimitive>,
) {
    let world = parent_world * node.transform.local_matrix();
    let path = if parent_path.is_empty() {
        node.name.to_string()
    } else {
        format!("{}/{}", parent_path, node.name)
    };

    if let Some(primitive) = &node.primitive {
        out.push(PlacedPrimitive {
            path: path.clone(),
            kind: primitive.kind,
            segments: primitive.segments_at(detail),
            triangles: primitive.triangle_count(detail),
            vertices: primitive.vertex_count(detail),
            world: Transform::from_matrix(world),
            material: primitive.material.with_flags(flags),
        });
    }

    for child in &node.children {
        collect(child, world, &path, detail, flags, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_describe_flattens_tree() {
        let spec = ModelKind::Character.spec();
        let desc = spec.describe(DetailLevel::MAX, RenderFlags::empty());

        assert_eq!(desc.stats.primitive_count, spec.root.primitive_count());
        let eye = desc.find("root/head/eye_left").unwrap();
        assert_eq!(eye.kind, PrimitiveKind::Sphere);
        // Head group offset is applied to the eye
        assert!((eye.world.position - Vec3::new(-0.1, 1.9, 0.24)).length() < 1e-4);
    }

    #[test]
    fn test_stats_match_sum_of_parts() {
        for kind in ModelKind::ALL {
            let spec = kind.spec();
            for detail in DetailLevel::all() {
                let desc = spec.describe(detail, RenderFlags::empty());
                let sum: u64 = desc.primitives.iter().map(|p| p.triangles).sum();
                assert_eq!(desc.stats.triangle_count, sum);
                assert_eq!(spec.triangle_count(detail), sum);
            }
        }
    }

    #[test]
    fn test_detail_monotonic_per_model() {
        for kind in ModelKind::ALL {
            let spec = kind.spec();
            let counts: Vec<_> = DetailLevel::all().map(|d| spec.triangle_count(d)).collect();
            assert!(counts.windows(2).all(|w| w[0] <= w[1]), "{}: {:?}", kind, counts);
        }
    }

    #[test]
    fn test_optimized_is_smaller_except_placeholder() {
        for kind in ModelKind::ALL {
            let spec = kind.spec();
            let before = spec.triangle_count(DetailLevel::ORIGINAL);
            let after = spec.triangle_count(DetailLevel::OPTIMIZED);
            if kind == ModelKind::Placeholder {
                assert_eq!(before, after);
            } else {
                assert!(after < before, "{}", kind);
            }
        }
    }

    #[test]
    fn test_wireframe_does_not_change_counts() {
        let spec = ModelKind::Robot.spec();
        for detail in DetailLevel::all() {
            let solid = spec.describe(detail, RenderFlags::empty());
            let wire = spec.describe(detail, RenderFlags::WIREFRAME);

            assert_eq!(solid.stats, wire.stats);
            for (a, b) in solid.primitives.iter().zip(&wire.primitives) {
                assert_eq!(a.segments, b.segments);
                assert_eq!(a.triangles, b.triangles);
                assert!(!a.material.is_wireframe());
                assert!(b.material.is_wireframe());
            }
        }
    }

    #[test]
    fn test_bounds_cover_model() {
        let desc = ModelKind::Tree.spec().describe(DetailLevel::MAX, RenderFlags::empty());
        let bounds = desc.stats.bounds;
        assert!(!bounds.is_empty());
        assert!(bounds.min.y <= 0.0 + 1e-4);
        assert!(bounds.max.y > 2.5);
    }

    #[test]
    fn test_json_export() {
        let desc = ModelKind::Placeholder.spec().describe(DetailLevel::MIN, RenderFlags::WIREFRAME);
        let json = desc.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["model"], "placeholder");
        assert_eq!(value["detail"], 0);
        assert_eq!(value["primitives"][0]["kind"], "icosahedron");
        assert_eq!(value["stats"]["triangle_count"], 80);
    }
}
