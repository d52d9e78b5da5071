pub mod settings;

use crate::catalog::{MaterialRef, MeshRef, TextureRef};
use crate::host::{MeshSurface, PostEffect, PostFxStack, SceneLight};
use glam::{EulerRot, Quat, Vec3};

/// How pointer input in the viewport manipulates the staged object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ControlMode {
    Translate,
    Rotate,
    Scale,
    /// Viewport drags do nothing (light / effects panels active).
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TranslationPlane {
    XZ,
    XY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScaleAxis {
    X,
    Y,
    Z,
    Uniform,
}

/// The staged object: forwards resource choices to the host surface and
/// tracks the manipulation mode plus the last applied resource names.
pub struct DisplayMesh {
    surface: Box<dyn MeshSurface>,
    pub control_mode: ControlMode,
    pub translation_plane: TranslationPlane,
    pub rotation_axis: RotationAxis,
    pub scale_axis: ScaleAxis,
    mesh: Option<MeshRef>,
    material: Option<MaterialRef>,
    texture: Option<TextureRef>,
}

impl DisplayMesh {
    pub fn new(surface: Box<dyn MeshSurface>) -> Self {
        Self {
            surface,
            control_mode: ControlMode::Translate,
            translation_plane: TranslationPlane::XZ,
            rotation_axis: RotationAxis::Y,
            scale_axis: ScaleAxis::Uniform,
            mesh: None,
            material: None,
            texture: None,
        }
    }

    pub fn set_mesh(&mut self, mesh: MeshRef) {
        self.surface.set_mesh(&mesh);
        self.mesh = Some(mesh);
    }

    pub fn set_material(&mut self, material: MaterialRef) {
        self.surface.set_material(&material);
        self.material = Some(material);
    }

    pub fn set_texture(&mut self, texture: TextureRef) {
        self.surface.set_texture(&texture);
        self.texture = Some(texture);
    }

    pub fn mesh(&self) -> Option<&MeshRef> {
        self.mesh.as_ref()
    }

    pub fn material(&self) -> Option<&MaterialRef> {
        self.material.as_ref()
    }

    pub fn texture(&self) -> Option<&TextureRef> {
        self.texture.as_ref()
    }
}

/// Controller for the key light.
///
/// Elevation and azimuth are stored locally and only written to the host;
/// reading euler angles back right after writing them is where the original
/// tool grew bugs, so the host is never used as the source of truth after
/// construction.
pub struct LightController {
    light: Box<dyn SceneLight>,
    angle_deg: f32,
    azimuth_deg: f32,
}

impl LightController {
    pub fn new(light: Box<dyn SceneLight>) -> Self {
        let (angle_deg, azimuth_deg) = light.rotation();
        Self {
            light,
            angle_deg,
            azimuth_deg,
        }
    }

    pub fn temperature(&self) -> f32 {
        self.light.temperature()
    }

    pub fn set_temperature(&mut self, kelvin: f32) {
        self.light.set_temperature(kelvin);
    }

    pub fn intensity(&self) -> f32 {
        self.light.intensity()
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.light.set_intensity(intensity);
    }

    pub fn angle(&self) -> f32 {
        self.angle_deg
    }

    /// Elevation angle in degrees; 0 is horizon, 90 straight down.
    pub fn set_angle(&mut self, angle_deg: f32) {
        self.angle_deg = angle_deg;
        self.light.set_rotation(self.angle_deg, self.azimuth_deg);
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth_deg
    }

    pub fn set_azimuth(&mut self, azimuth_deg: f32) {
        self.azimuth_deg = azimuth_deg;
        self.light.set_rotation(self.angle_deg, self.azimuth_deg);
    }

    /// World-space direction the light points, from the stored angles:
    /// yaw about Y by the azimuth, then pitch about X by the elevation,
    /// applied to +Z.
    pub fn direction(&self) -> Vec3 {
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.azimuth_deg.to_radians(),
            self.angle_deg.to_radians(),
            0.0,
        );
        rotation * Vec3::Z
    }
}

/// Controller for the host post-processing stack. Toggling a module the
/// active profile does not carry is a no-op, and such modules read as off.
pub struct EffectsController {
    stack: Box<dyn PostFxStack>,
}

impl EffectsController {
    pub fn new(stack: Box<dyn PostFxStack>) -> Self {
        Self { stack }
    }

    pub fn is_active(&self, effect: PostEffect) -> bool {
        self.stack.has_effect(effect) && self.stack.is_active(effect)
    }

    pub fn set_active(&mut self, effect: PostEffect, on: bool) {
        if !self.stack.has_effect(effect) {
            log::debug!("post effect {effect:?} absent from host profile, ignoring");
            return;
        }
        self.stack.set_active(effect, on);
    }

    /// Flip an effect and return its new state.
    pub fn toggle(&mut self, effect: PostEffect) -> bool {
        let next = !self.is_active(effect);
        self.set_active(effect, next);
        self.is_active(effect)
    }
}

#[cfg(test)]
pub(crate) mod test_hosts {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    pub struct RecordingSurface {
        pub meshes: Vec<String>,
        pub materials: Vec<String>,
        pub textures: Vec<String>,
    }

    impl MeshSurface for RecordingSurface {
        fn set_mesh(&mut self, mesh: &MeshRef) {
            self.meshes.push(mesh.name.clone());
        }

        fn set_material(&mut self, material: &MaterialRef) {
            self.materials.push(material.name.clone());
        }

        fn set_texture(&mut self, texture: &TextureRef) {
            self.textures.push(texture.name.clone());
        }
    }

    pub struct FakeLight {
        pub temperature: f32,
        pub intensity: f32,
        pub rotation: (f32, f32),
    }

    impl Default for FakeLight {
        fn default() -> Self {
            Self {
                temperature: 6500.0,
                intensity: 1.0,
                rotation: (45.0, 0.0),
            }
        }
    }

    impl SceneLight for FakeLight {
        fn temperature(&self) -> f32 {
            self.temperature
        }

        fn set_temperature(&mut self, kelvin: f32) {
            self.temperature = kelvin;
        }

        fn intensity(&self) -> f32 {
            self.intensity
        }

        fn set_intensity(&mut self, intensity: f32) {
            self.intensity = intensity;
        }

        fn rotation(&self) -> (f32, f32) {
            self.rotation
        }

        fn set_rotation(&mut self, angle_deg: f32, azimuth_deg: f32) {
            self.rotation = (angle_deg, azimuth_deg);
        }
    }

    /// Post-fx stack carrying only the modules present in `flags`.
    #[derive(Default)]
    pub struct FakePostFx {
        pub flags: HashMap<PostEffect, bool>,
    }

    impl FakePostFx {
        pub fn with_effects(effects: &[PostEffect]) -> Self {
            Self {
                flags: effects.iter().map(|effect| (*effect, false)).collect(),
            }
        }
    }

    impl PostFxStack for FakePostFx {
        fn has_effect(&self, effect: PostEffect) -> bool {
            self.flags.contains_key(&effect)
        }

        fn is_active(&self, effect: PostEffect) -> bool {
            self.flags.get(&effect).copied().unwrap_or(false)
        }

        fn set_active(&mut self, effect: PostEffect, on: bool) {
            if let Some(flag) = self.flags.get_mut(&effect) {
                *flag = on;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_hosts::*;
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn display_mesh_forwards_and_remembers() {
        let mut display = DisplayMesh::new(Box::new(RecordingSurface::default()));
        display.set_mesh(MeshRef {
            name: "cube".to_string(),
            path: PathBuf::from("meshes/cube.glb"),
        });
        display.set_texture(TextureRef {
            name: "bricks".to_string(),
            path: PathBuf::from("textures/bricks.png"),
        });
        assert_eq!(display.mesh().unwrap().name, "cube");
        assert_eq!(display.texture().unwrap().name, "bricks");
        assert!(display.material().is_none());
    }

    #[test]
    fn light_controller_seeds_angles_from_host_once() {
        let light = FakeLight {
            rotation: (30.0, 120.0),
            ..FakeLight::default()
        };
        let mut controller = LightController::new(Box::new(light));
        assert_eq!(controller.angle(), 30.0);
        assert_eq!(controller.azimuth(), 120.0);

        controller.set_angle(60.0);
        // Azimuth stays what we stored, independent of the host write.
        assert_eq!(controller.azimuth(), 120.0);
        controller.set_azimuth(90.0);
        assert_eq!(controller.angle(), 60.0);
    }

    #[test]
    fn light_direction_points_down_at_ninety_degrees() {
        let light = FakeLight {
            rotation: (90.0, 0.0),
            ..FakeLight::default()
        };
        let controller = LightController::new(Box::new(light));
        let direction = controller.direction();
        assert!(direction.abs_diff_eq(Vec3::NEG_Y, 1e-5), "{direction:?}");
    }

    #[test]
    fn effects_toggle_round_trip() {
        let stack = FakePostFx::with_effects(&PostEffect::ALL);
        let mut effects = EffectsController::new(Box::new(stack));
        assert!(!effects.is_active(PostEffect::Bloom));
        assert!(effects.toggle(PostEffect::Bloom));
        assert!(effects.is_active(PostEffect::Bloom));
        assert!(!effects.toggle(PostEffect::Bloom));
    }

    #[test]
    fn absent_effect_module_degrades_to_off_no_op() {
        let stack = FakePostFx::with_effects(&[PostEffect::Bloom]);
        let mut effects = EffectsController::new(Box::new(stack));
        assert!(!effects.is_active(PostEffect::Vignette));
        effects.set_active(PostEffect::Vignette, true);
        assert!(!effects.is_active(PostEffect::Vignette));
        assert!(!effects.toggle(PostEffect::Vignette));
    }
}
