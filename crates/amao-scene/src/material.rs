//! Material System
//!
//! Flat PBR parameters for procedural parts plus render-mode flags.

use bitflags::bitflags;
use glam::Vec3;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Render-mode switches applied on top of a material.
    ///
    /// Flags only change how a part is drawn, never its tessellation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct RenderFlags: u8 {
        const WIREFRAME = 1 << 0;
        const FLAT_SHADING = 1 << 1;
        const DOUBLE_SIDED = 1 << 2;
    }
}

/// PBR material parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color as 0xRRGGBB
    pub color_hex: u32,
    /// Metallic factor
    pub metalness: f32,
    /// Roughness factor
    pub roughness: f32,
    /// Emissive color as 0xRRGGBB
    pub emissive_hex: u32,
    /// Render-mode flags
    pub flags: RenderFlags,
}

impl Material {
    /// Create an opaque material
    pub const fn new(color_hex: u32, metalness: f32, roughness: f32) -> Self {
        Self {
            color_hex: color_hex & 0x00FF_FFFF,
            metalness,
            roughness,
            emissive_hex: 0,
            flags: RenderFlags::empty(),
        }
    }

    /// Add an emissive tint
    pub const fn with_emissive(mut self, emissive_hex: u32) -> Self {
        self.emissive_hex = emissive_hex & 0x00FF_FFFF;
        self
    }

    /// Add render flags
    pub const fn with_flags(mut self, flags: RenderFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    /// Base color as a CSS-style string
    pub fn color_css(&self) -> String {
        format!("#{:06x}", self.color_hex)
    }

    /// Base color as linear-ish 0..1 components
    pub fn color_rgb(&self) -> Vec3 {
        hex_to_rgb(self.color_hex)
    }

    /// Whether the part renders as wireframe
    pub fn is_wireframe(&self) -> bool {
        self.flags.contains(RenderFlags::WIREFRAME)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(0xCCCCCC, 0.0, 0.5)
    }
}

/// Convert 0xRRGGBB into 0..1 channels
pub fn hex_to_rgb(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
    let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
    let b = (hex & 0xFF) as f32 / 255.0;
    Vec3::new(r, g, b)
}

/// Shared palette used by the catalog
pub mod palette {
    use super::Material;

    pub const SKIN: Material = Material::new(0xF2C9A0, 0.0, 0.7);
    pub const CLOTH_BLUE: Material = Material::new(0x3B6FD8, 0.0, 0.8);
    pub const CLOTH_DARK: Material = Material::new(0x2A2D3A, 0.0, 0.85);
    pub const EYE: Material = Material::new(0x111111, 0.1, 0.2);
    pub const STEEL: Material = Material::new(0xB8C2CC, 0.9, 0.25);
    pub const GUNMETAL: Material = Material::new(0x4A5058, 0.8, 0.4);
    pub const CAR_RED: Material = Material::new(0xD7263D, 0.6, 0.3);
    pub const GLASS: Material = Material::new(0x9FD3F5, 0.1, 0.05);
    pub const RUBBER: Material = Material::new(0x1C1C1C, 0.0, 0.9);
    pub const LIGHT: Material = Material::new(0xFFF4C2, 0.0, 0.3).with_emissive(0xFFE27A);
    pub const BARK: Material = Material::new(0x6B4226, 0.0, 0.95);
    pub const LEAF: Material = Material::new(0x2E8B57, 0.0, 0.8);
    pub const WALL: Material = Material::new(0xE8DCC4, 0.0, 0.9);
    pub const ROOF: Material = Material::new(0x9E3B2F, 0.0, 0.8);
    pub const WOOD: Material = Material::new(0xA0703C, 0.0, 0.75);
    pub const PLASTIC_WHITE: Material = Material::new(0xF5F5F5, 0.0, 0.4);
    pub const PLASTIC_TEAL: Material = Material::new(0x1FB5A8, 0.0, 0.35);
    pub const GOLD: Material = Material::new(0xD4AF37, 1.0, 0.3);
    pub const LEATHER: Material = Material::new(0x5C3A21, 0.0, 0.7);
    pub const FLAME: Material = Material::new(0xFF7A1A, 0.0, 0.5).with_emissive(0xFF4500);
    pub const CRYSTAL: Material = Material::new(0x8A5CF6, 0.2, 0.1).with_emissive(0x3B1C8C);
    pub const STONE: Material = Material::new(0x7D7D7D, 0.0, 0.95);
    pub const PLACEHOLDER: Material = Material::new(0x6C7A89, 0.3, 0.6);
}
