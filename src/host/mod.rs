//! Injected interfaces to the rendering host.
//!
//! The visualizer never talks to an engine directly; the embedding
//! application implements these traits over whatever scene graph it owns.
//! All of them are simple property contracts, matching what the controllers
//! in [`crate::scene`] forward.

use crate::catalog::{MaterialRef, MeshRef, TextureRef};

/// The staged object the visualizer displays.
pub trait MeshSurface {
    fn set_mesh(&mut self, mesh: &MeshRef);
    fn set_material(&mut self, material: &MaterialRef);
    /// Applies to the material currently on the surface.
    fn set_texture(&mut self, texture: &TextureRef);
}

/// The key light of the staging scene.
pub trait SceneLight {
    /// Color temperature in kelvin. Lower is warmer.
    fn temperature(&self) -> f32;
    fn set_temperature(&mut self, kelvin: f32);
    fn intensity(&self) -> f32;
    fn set_intensity(&mut self, intensity: f32);
    /// Current (elevation, azimuth) in degrees.
    fn rotation(&self) -> (f32, f32);
    fn set_rotation(&mut self, angle_deg: f32, azimuth_deg: f32);
}

/// Post-processing modules the host may or may not carry in its active
/// profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PostEffect {
    Bloom,
    Vignette,
    DepthOfField,
    ChromaticAberration,
    FilmGrain,
    PaniniProjection,
}

impl PostEffect {
    pub const ALL: [PostEffect; 6] = [
        PostEffect::Bloom,
        PostEffect::Vignette,
        PostEffect::DepthOfField,
        PostEffect::ChromaticAberration,
        PostEffect::FilmGrain,
        PostEffect::PaniniProjection,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PostEffect::Bloom => "Bloom",
            PostEffect::Vignette => "Vignette",
            PostEffect::DepthOfField => "Depth of Field",
            PostEffect::ChromaticAberration => "Chromatic Aberration",
            PostEffect::FilmGrain => "Film Grain",
            PostEffect::PaniniProjection => "Panini Projection",
        }
    }
}

/// The host's post-processing stack. Each effect is an independent boolean;
/// modules absent from the active profile report `has_effect == false`.
pub trait PostFxStack {
    fn has_effect(&self, effect: PostEffect) -> bool;
    fn is_active(&self, effect: PostEffect) -> bool;
    fn set_active(&mut self, effect: PostEffect, on: bool);
}
