//! Model catalog
//!
//! Declarative part trees for every showcase model. Trees are plain data:
//! building one allocates nothing beyond the nodes themselves, and the same
//! tree is described at any detail level.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use std::str::FromStr;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::SceneError;
use crate::material::{Material, palette};
use crate::primitive::{Primitive, PrimitiveKind, Segments};
use crate::primitive::PrimitiveKind::{Box as Cuboid, Capsule, Cone, Cylinder, Icosahedron, Plane, Sphere, Torus};
use crate::transform::Transform;

/// Node within a model tree
#[derive(Debug, Clone, PartialEq)]
pub struct ModelNode {
    /// Node name for identification
    pub name: &'static str,
    /// Local transform relative to the parent
    pub transform: Transform,
    /// Shape drawn at this node, if any
    pub primitive: Option<Primitive>,
    /// Child nodes
    pub children: Vec<ModelNode>,
}

impl ModelNode {
    /// Empty grouping node
    pub fn group(name: &'static str, transform: Transform, children: Vec<ModelNode>) -> Self {
        Self {
            name,
            transform,
            primitive: None,
            children,
        }
    }

    /// Leaf node drawing one primitive
    pub fn part(
        name: &'static str,
        kind: PrimitiveKind,
        position: Vec3,
        scale: Vec3,
        material: Material,
    ) -> Self {
        Self {
            name,
            transform: Transform::from_position_scale(position, scale),
            primitive: Some(Primitive::new(kind, material)),
            children: Vec::new(),
        }
    }

    /// Rotate this node
    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// Override the primitive's segment range
    pub fn segments(mut self, segments: Segments) -> Self {
        if let Some(primitive) = self.primitive.as_mut() {
            primitive.segments = segments;
        }
        self
    }

    /// Visit every node depth-first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ModelNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Number of primitives in this subtree
    pub fn primitive_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| {
            if node.primitive.is_some() {
                count += 1;
            }
        });
        count
    }
}

/// A complete model: a named tree of parts
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    pub kind: ModelKind,
    pub root: ModelNode,
}

/// Showcase model catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Character,
    Robot,
    Car,
    Tree,
    House,
    Chair,
    Bottle,
    Sword,
    Rocket,
    Crystal,
    /// Fallback shown whenever nothing better is available
    Placeholder,
}

impl ModelKind {
    /// Every model, in display order
    pub const ALL: [ModelKind; 11] = [
        Self::Character,
        Self::Robot,
        Self::Car,
        Self::Tree,
        Self::House,
        Self::Chair,
        Self::Bottle,
        Self::Sword,
        Self::Rocket,
        Self::Crystal,
        Self::Placeholder,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Robot => "robot",
            Self::Car => "car",
            Self::Tree => "tree",
            Self::House => "house",
            Self::Chair => "chair",
            Self::Bottle => "bottle",
            Self::Sword => "sword",
            Self::Rocket => "rocket",
            Self::Crystal => "crystal",
            Self::Placeholder => "placeholder",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Character => "Stylized humanoid character",
            Self::Robot => "Boxy service robot",
            Self::Car => "Compact sports car",
            Self::Tree => "Layered pine tree",
            Self::House => "Cottage environment piece",
            Self::Chair => "Wooden dining chair",
            Self::Bottle => "Product packshot bottle",
            Self::Sword => "Fantasy longsword",
            Self::Rocket => "Toy rocket",
            Self::Crystal => "Crystal cluster",
            Self::Placeholder => "Generic icosahedron",
        }
    }

    /// Build the part tree for this model
    pub fn spec(&self) -> ModelSpec {
        let root = match self {
            Self::Character => character(),
            Self::Robot => robot(),
            Self::Car => car(),
            Self::Tree => tree(),
            Self::House => house(),
            Self::Chair => chair(),
            Self::Bottle => bottle(),
            Self::Sword => sword(),
            Self::Rocket => rocket(),
            Self::Crystal => crystal(),
            Self::Placeholder => placeholder(),
        };
        ModelSpec { kind: *self, root }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| SceneError::UnknownModel(s.to_string()))
    }
}

fn v(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

fn root(children: Vec<ModelNode>) -> ModelNode {
    ModelNode::group("root", Transform::IDENTITY, children)
}

fn character() -> ModelNode {
    let limb = Segments::new(4, 24);
    root(vec![
        ModelNode::part("torso", Capsule, v(0.0, 1.1, 0.0), v(0.35, 0.3, 0.25), palette::CLOTH_BLUE),
        ModelNode::group(
            "head",
            Transform::from_position(v(0.0, 1.85, 0.0)),
            vec![
                ModelNode::part("skull", Sphere, Vec3::ZERO, Vec3::splat(0.28), palette::SKIN),
                ModelNode::part("eye_left", Sphere, v(-0.1, 0.05, 0.24), Vec3::splat(0.04), palette::EYE)
                    .segments(Segments::new(6, 16)),
                ModelNode::part("eye_right", Sphere, v(0.1, 0.05, 0.24), Vec3::splat(0.04), palette::EYE)
                    .segments(Segments::new(6, 16)),
            ],
        ),
        ModelNode::part("arm_left", Capsule, v(-0.5, 1.15, 0.0), v(0.09, 0.35, 0.09), palette::SKIN)
            .rotated(Quat::from_rotation_z(-0.2))
            .segments(limb),
        ModelNode::part("arm_right", Capsule, v(0.5, 1.15, 0.0), v(0.09, 0.35, 0.09), palette::SKIN)
            .rotated(Quat::from_rotation_z(0.2))
            .segments(limb),
        ModelNode::part("leg_left", Capsule, v(-0.17, 0.4, 0.0), v(0.11, 0.3, 0.11), palette::CLOTH_DARK)
            .segments(limb),
        ModelNode::part("leg_right", Capsule, v(0.17, 0.4, 0.0), v(0.11, 0.3, 0.11), palette::CLOTH_DARK)
            .segments(limb),
    ])
}

fn robot() -> ModelNode {
    root(vec![
        ModelNode::part("chassis", Cuboid, v(0.0, 0.9, 0.0), v(0.9, 0.8, 0.6), palette::GUNMETAL),
        ModelNode::group(
            "head",
            Transform::from_position(v(0.0, 1.6, 0.0)),
            vec![
                ModelNode::part("casing", Cuboid, Vec3::ZERO, v(0.6, 0.45, 0.5), palette::STEEL),
                ModelNode::part("visor", Plane, v(0.0, 0.02, 0.26), v(0.45, 0.15, 1.0), palette::LIGHT),
                ModelNode::part("antenna", Cylinder, v(0.0, 0.4, 0.0), v(0.02, 0.35, 0.02), palette::STEEL)
                    .segments(Segments::new(4, 12)),
                ModelNode::part("antenna_tip", Sphere, v(0.0, 0.6, 0.0), Vec3::splat(0.05), palette::LIGHT)
                    .segments(Segments::new(6, 16)),
            ],
        ),
        ModelNode::part("arm_left", Cylinder, v(-0.58, 0.95, 0.0), v(0.08, 0.7, 0.08), palette::STEEL),
        ModelNode::part("arm_right", Cylinder, v(0.58, 0.95, 0.0), v(0.08, 0.7, 0.08), palette::STEEL),
        ModelNode::part("track_left", Torus, v(-0.3, 0.3, 0.0), Vec3::splat(0.22), palette::RUBBER)
            .rotated(Quat::from_rotation_y(FRAC_PI_2)),
        ModelNode::part("track_right", Torus, v(0.3, 0.3, 0.0), Vec3::splat(0.22), palette::RUBBER)
            .rotated(Quat::from_rotation_y(FRAC_PI_2)),
    ])
}

fn car() -> ModelNode {
    let wheel = |name, x, z| {
        ModelNode::part(name, Cylinder, v(x, 0.32, z), v(0.32, 0.22, 0.32), palette::RUBBER)
            .rotated(Quat::from_rotation_x(FRAC_PI_2))
    };
    root(vec![
        ModelNode::part("body", Cuboid, v(0.0, 0.55, 0.0), v(3.6, 0.5, 1.6), palette::CAR_RED),
        ModelNode::part("cabin", Cuboid, v(-0.2, 1.0, 0.0), v(1.8, 0.45, 1.4), palette::GLASS),
        wheel("wheel_front_left", 1.15, 0.8),
        wheel("wheel_front_right", 1.15, -0.8),
        wheel("wheel_rear_left", -1.15, 0.8),
        wheel("wheel_rear_right", -1.15, -0.8),
        ModelNode::part("headlight_left", Sphere, v(1.8, 0.6, 0.55), Vec3::splat(0.1), palette::LIGHT)
            .segments(Segments::new(6, 16)),
        ModelNode::part("headlight_right", Sphere, v(1.8, 0.6, -0.55), Vec3::splat(0.1), palette::LIGHT)
            .segments(Segments::new(6, 16)),
    ])
}

fn tree() -> ModelNode {
    root(vec![
        ModelNode::part("trunk", Cylinder, v(0.0, 0.5, 0.0), v(0.18, 1.0, 0.18), palette::BARK),
        ModelNode::part("crown_low", Cone, v(0.0, 1.3, 0.0), v(1.0, 1.2, 1.0), palette::LEAF),
        ModelNode::part("crown_mid", Cone, v(0.0, 1.9, 0.0), v(0.78, 1.0, 0.78), palette::LEAF),
        ModelNode::part("crown_top", Cone, v(0.0, 2.45, 0.0), v(0.55, 0.85, 0.55), palette::LEAF),
    ])
}

fn house() -> ModelNode {
    root(vec![
        ModelNode::part("walls", Cuboid, v(0.0, 0.75, 0.0), v(2.4, 1.5, 2.0), palette::WALL),
        ModelNode::part("roof", Cone, v(0.0, 2.0, 0.0), v(1.9, 1.0, 1.9), palette::ROOF)
            .rotated(Quat::from_rotation_y(FRAC_PI_4))
            .segments(Segments::fixed(4)),
        ModelNode::part("chimney", Cuboid, v(0.7, 2.2, 0.3), v(0.25, 0.7, 0.25), palette::STONE),
        ModelNode::part("door", Plane, v(0.0, 0.45, 1.01), v(0.5, 0.9, 1.0), palette::WOOD),
        ModelNode::part("window_left", Plane, v(-0.75, 0.95, 1.01), v(0.4, 0.4, 1.0), palette::GLASS),
        ModelNode::part("window_right", Plane, v(0.75, 0.95, 1.01), v(0.4, 0.4, 1.0), palette::GLASS),
        ModelNode::part("ground", Plane, Vec3::ZERO, v(6.0, 6.0, 1.0), palette::LEAF)
            .rotated(Quat::from_rotation_x(-FRAC_PI_2)),
    ])
}

fn chair() -> ModelNode {
    let leg = |name, x, z| {
        ModelNode::part(name, Cylinder, v(x, 0.22, z), v(0.04, 0.45, 0.04), palette::WOOD)
            .segments(Segments::new(4, 16))
    };
    root(vec![
        ModelNode::part("seat", Cuboid, v(0.0, 0.47, 0.0), v(0.5, 0.05, 0.5), palette::WOOD),
        ModelNode::part("back", Cuboid, v(0.0, 0.8, -0.23), v(0.5, 0.6, 0.04), palette::WOOD),
        ModelNode::part("cushion", Cuboid, v(0.0, 0.51, 0.0), v(0.44, 0.04, 0.44), palette::LEATHER),
        leg("leg_front_left", -0.21, 0.21),
        leg("leg_front_right", 0.21, 0.21),
        leg("leg_back_left", -0.21, -0.21),
        leg("leg_back_right", 0.21, -0.21),
    ])
}

fn bottle() -> ModelNode {
    root(vec![
        ModelNode::part("body", Cylinder, v(0.0, 0.6, 0.0), v(0.35, 1.2, 0.35), palette::PLASTIC_TEAL),
        ModelNode::part("shoulder", Sphere, v(0.0, 1.2, 0.0), v(0.35, 0.2, 0.35), palette::PLASTIC_TEAL),
        ModelNode::part("neck", Cylinder, v(0.0, 1.45, 0.0), v(0.12, 0.3, 0.12), palette::PLASTIC_TEAL),
        ModelNode::part("cap", Cylinder, v(0.0, 1.65, 0.0), v(0.14, 0.12, 0.14), palette::PLASTIC_WHITE),
        ModelNode::part("label", Cylinder, v(0.0, 0.6, 0.0), v(0.36, 0.5, 0.36), palette::PLASTIC_WHITE),
    ])
}

fn sword() -> ModelNode {
    root(vec![
        ModelNode::part("blade", Cuboid, v(0.0, 1.05, 0.0), v(0.12, 1.5, 0.02), palette::STEEL),
        ModelNode::part("tip", Cone, v(0.0, 1.9, 0.0), v(0.085, 0.2, 0.015), palette::STEEL)
            .rotated(Quat::from_rotation_y(FRAC_PI_4))
            .segments(Segments::fixed(4)),
        ModelNode::part("guard", Cuboid, v(0.0, 0.3, 0.0), v(0.5, 0.06, 0.08), palette::GOLD),
        ModelNode::part("grip", Cylinder, v(0.0, 0.12, 0.0), v(0.035, 0.3, 0.035), palette::LEATHER),
        ModelNode::part("pommel", Sphere, v(0.0, -0.06, 0.0), Vec3::splat(0.06), palette::GOLD)
            .segments(Segments::new(6, 24)),
    ])
}

fn rocket() -> ModelNode {
    let fin = |name, angle: f32| {
        let position = Quat::from_rotation_y(angle) * v(0.35, 0.35, 0.0);
        ModelNode::part(name, Cuboid, position, v(0.3, 0.4, 0.04), palette::CAR_RED)
            .rotated(Quat::from_rotation_y(-angle))
    };
    let third = std::f32::consts::TAU / 3.0;
    root(vec![
        ModelNode::part("hull", Cylinder, v(0.0, 1.0, 0.0), v(0.3, 1.6, 0.3), palette::PLASTIC_WHITE),
        ModelNode::part("nose", Cone, v(0.0, 2.1, 0.0), v(0.3, 0.6, 0.3), palette::CAR_RED),
        ModelNode::part("window", Sphere, v(0.0, 1.4, 0.27), Vec3::splat(0.09), palette::GLASS)
            .segments(Segments::new(6, 16)),
        fin("fin_a", 0.0),
        fin("fin_b", third),
        fin("fin_c", 2.0 * third),
        ModelNode::part("exhaust", Cone, v(0.0, 0.05, 0.0), v(0.2, 0.3, 0.2), palette::FLAME)
            .rotated(Quat::from_rotation_x(std::f32::consts::PI)),
    ])
}

fn crystal() -> ModelNode {
    let shard = Segments::new(0, 2);
    root(vec![
        ModelNode::part("base", Cylinder, v(0.0, 0.1, 0.0), v(0.9, 0.2, 0.9), palette::STONE),
        ModelNode::part("shard_main", Icosahedron, v(0.0, 0.9, 0.0), v(0.35, 0.8, 0.35), palette::CRYSTAL)
            .segments(shard),
        ModelNode::part("shard_left", Icosahedron, v(-0.4, 0.55, 0.1), v(0.2, 0.45, 0.2), palette::CRYSTAL)
            .rotated(Quat::from_rotation_z(0.4))
            .segments(shard),
        ModelNode::part("shard_right", Icosahedron, v(0.38, 0.5, -0.1), v(0.18, 0.4, 0.18), palette::CRYSTAL)
            .rotated(Quat::from_rotation_z(-0.35))
            .segments(shard),
    ])
}

fn placeholder() -> ModelNode {
    root(vec![
        ModelNode::part("icosahedron", Icosahedron, Vec3::ZERO, Vec3::ONE, palette::PLACEHOLDER)
            .segments(Segments::fixed(1)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_model_has_primitives() {
        for kind in ModelKind::ALL {
            let spec = kind.spec();
            assert_eq!(spec.kind, kind);
            assert!(spec.root.primitive_count() > 0, "{} has no parts", kind);
        }
    }

    #[test]
    fn test_parse_model_kind() {
        assert_eq!("robot".parse::<ModelKind>().unwrap(), ModelKind::Robot);
        assert_eq!(" Car ".parse::<ModelKind>().unwrap(), ModelKind::Car);
        assert!(matches!(
            "spaceship".parse::<ModelKind>(),
            Err(SceneError::UnknownModel(_))
        ));
    }

    #[test]
    fn test_names_round_trip() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.name().parse::<ModelKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_walk_visits_nested_nodes() {
        let spec = ModelKind::Character.spec();
        let mut names = Vec::new();
        spec.root.walk(&mut |node| names.push(node.name));
        assert!(names.contains(&"head"));
        assert!(names.contains(&"eye_left"));
        assert_eq!(names[0], "root");
    }

    #[test]
    fn test_placeholder_is_single_icosahedron() {
        let spec = ModelKind::Placeholder.spec();
        assert_eq!(spec.root.primitive_count(), 1);
        let part = &spec.root.children[0];
        assert_eq!(part.primitive.unwrap().kind, PrimitiveKind::Icosahedron);
    }

    #[test]
    fn test_segments_override_on_group_is_noop() {
        let group = ModelNode::group("g", Transform::IDENTITY, Vec::new()).segments(Segments::fixed(3));
        assert!(group.primitive.is_none());
    }
}
