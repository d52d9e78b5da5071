use crate::host::PostEffect;
use crate::scene::{ControlMode, RotationAxis, ScaleAxis, TranslationPlane};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LightSettings {
    pub angle_deg: f32,
    pub azimuth_deg: f32,
    pub temperature: f32,
    pub intensity: f32,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            angle_deg: 45.0,
            azimuth_deg: 0.0,
            temperature: 6500.0,
            intensity: 1.0,
        }
    }
}

/// Everything the viewer restores between sessions: chosen resource names,
/// light parameters, enabled effects, and the manipulation mode.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewerSettings {
    pub mesh: Option<String>,
    pub material: Option<String>,
    pub texture: Option<String>,
    pub light: LightSettings,
    pub enabled_effects: Vec<PostEffect>,
    pub control_mode: ControlMode,
    pub translation_plane: TranslationPlane,
    pub rotation_axis: RotationAxis,
    pub scale_axis: ScaleAxis,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            mesh: None,
            material: None,
            texture: None,
            light: LightSettings::default(),
            enabled_effects: Vec::new(),
            control_mode: ControlMode::Translate,
            translation_plane: TranslationPlane::XZ,
            rotation_axis: RotationAxis::Y,
            scale_axis: ScaleAxis::Uniform,
        }
    }
}

pub fn save_settings_to_file(settings: &ViewerSettings, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_settings_from_file(path: &Path) -> Result<ViewerSettings> {
    let json = std::fs::read_to_string(path)?;
    let settings: ViewerSettings = serde_json::from_str(&json)?;
    Ok(settings)
}
