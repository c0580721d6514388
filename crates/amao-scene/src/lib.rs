//! # AMAO Scene
//!
//! Procedural model builder for the showcase viewers.
//!
//! Models are declarative trees of primitive shapes. Evaluating a tree at a
//! [`DetailLevel`] resolves every primitive's segment count and yields a
//! flat [`SceneDescription`] with polygon statistics:
//! - **Primitives**: sphere, box, cylinder, cone, capsule, torus, icosahedron, plane
//! - **Catalog**: the showcase models plus the placeholder fallback
//! - **Materials**: flat PBR parameters and render-mode flags

pub mod catalog;
pub mod description;
pub mod material;
pub mod primitive;
pub mod transform;

pub use amao_core::DetailLevel;
pub use catalog::{ModelKind, ModelNode, ModelSpec};
pub use description::{PlacedPrimitive, SceneDescription, SceneStats};
pub use material::{Material, RenderFlags};
pub use primitive::{Primitive, PrimitiveKind, Segments};
pub use transform::{Aabb, Transform};

use thiserror::Error;

/// Scene errors
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Resolve a model name, falling back to the placeholder when unknown
pub fn model_or_placeholder(name: &str) -> ModelKind {
    name.parse().unwrap_or_else(|err| {
        log::warn!("{}; showing placeholder", err);
        ModelKind::Placeholder
    })
}
