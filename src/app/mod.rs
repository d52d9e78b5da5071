use crate::catalog::ResourceKind;
use crate::host::{MeshSurface, PostEffect, PostFxStack, SceneLight};
use crate::scene::settings::{
    load_settings_from_file, save_settings_to_file, LightSettings, ViewerSettings,
};
use crate::scene::{
    ControlMode, DisplayMesh, EffectsController, LightController, RotationAxis, ScaleAxis,
    TranslationPlane,
};
use crate::ui::picker::{Picker, Selection};
use crate::ui::slider::VerticalSlider;
use std::path::PathBuf;

/// Which control group the panel currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    Translate,
    Rotate,
    Scale,
    Light,
    Effects,
}

impl PanelMode {
    pub const ALL: [PanelMode; 5] = [
        PanelMode::Translate,
        PanelMode::Rotate,
        PanelMode::Scale,
        PanelMode::Light,
        PanelMode::Effects,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PanelMode::Translate => "Translate",
            PanelMode::Rotate => "Rotate",
            PanelMode::Scale => "Scale",
            PanelMode::Light => "Light",
            PanelMode::Effects => "Effects",
        }
    }

    fn control_mode(&self) -> ControlMode {
        match self {
            PanelMode::Translate => ControlMode::Translate,
            PanelMode::Rotate => ControlMode::Rotate,
            PanelMode::Scale => ControlMode::Scale,
            PanelMode::Light | PanelMode::Effects => ControlMode::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightParam {
    Temperature,
    Angle,
    Azimuth,
    Intensity,
}

impl LightParam {
    pub const ALL: [LightParam; 4] = [
        LightParam::Temperature,
        LightParam::Angle,
        LightParam::Azimuth,
        LightParam::Intensity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LightParam::Temperature => "Temp",
            LightParam::Angle => "Angle",
            LightParam::Azimuth => "Azimuth",
            LightParam::Intensity => "Intensity",
        }
    }
}

/// Value ranges the normalized [0, 1] sliders map onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRanges {
    pub temperature: (f32, f32),
    pub angle: (f32, f32),
    pub azimuth: (f32, f32),
    pub intensity: (f32, f32),
}

impl Default for LightRanges {
    fn default() -> Self {
        Self {
            temperature: (1500.0, 20_000.0),
            angle: (0.0, 180.0),
            azimuth: (0.0, 360.0),
            intensity: (0.0, 10.0),
        }
    }
}

impl LightRanges {
    fn range(&self, param: LightParam) -> (f32, f32) {
        match param {
            LightParam::Temperature => self.temperature,
            LightParam::Angle => self.angle,
            LightParam::Azimuth => self.azimuth,
            LightParam::Intensity => self.intensity,
        }
    }

    pub fn lerp(&self, param: LightParam, normalized: f32) -> f32 {
        let (min, max) = self.range(param);
        min + (max - min) * normalized.clamp(0.0, 1.0)
    }

    pub fn inverse_lerp(&self, param: LightParam, value: f32) -> f32 {
        let (min, max) = self.range(param);
        if max == min {
            return 0.0;
        }
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }
}

/// Discrete UI actions, dispatched through [`Visualizer::apply`]. The
/// presentation layer turns widget interactions into these values instead of
/// holding a callback per control.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    SelectPanelMode(PanelMode),
    SelectTranslationPlane(TranslationPlane),
    SelectRotationAxis(RotationAxis),
    SelectScaleAxis(ScaleAxis),
    OpenPicker(ResourceKind),
    ClosePicker,
    /// A tap landed on the given carousel slot.
    SelectSlot(usize),
    /// Normalized slider value for one light parameter.
    SetLightSlider(LightParam, f32),
    ToggleEffect(PostEffect),
    SaveSettings(PathBuf),
    LoadSettings(PathBuf),
}

/// What a command did, for observers outside the widget boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    MeshSelected(String),
    MaterialSelected(String),
    TextureSelected(String),
    ControlModeChanged(ControlMode),
    /// Mapped (not normalized) light value after a slider change.
    LightChanged(LightParam, f32),
    EffectToggled(PostEffect, bool),
    SettingsSaved(PathBuf),
    SettingsLoaded(PathBuf),
    SettingsFailed(String),
}

/// Control-panel state: the selected mode and the four light sliders.
/// Exactly one mode is selected at a time; the matching sub-panel is the
/// visible one.
pub struct ControlPanel {
    pub mode: PanelMode,
    temperature_slider: VerticalSlider,
    angle_slider: VerticalSlider,
    azimuth_slider: VerticalSlider,
    intensity_slider: VerticalSlider,
}

impl ControlPanel {
    fn new() -> Self {
        Self {
            mode: PanelMode::Translate,
            temperature_slider: VerticalSlider::default(),
            angle_slider: VerticalSlider::default(),
            azimuth_slider: VerticalSlider::default(),
            intensity_slider: VerticalSlider::default(),
        }
    }

    pub fn slider(&self, param: LightParam) -> &VerticalSlider {
        match param {
            LightParam::Temperature => &self.temperature_slider,
            LightParam::Angle => &self.angle_slider,
            LightParam::Azimuth => &self.azimuth_slider,
            LightParam::Intensity => &self.intensity_slider,
        }
    }

    pub fn slider_mut(&mut self, param: LightParam) -> &mut VerticalSlider {
        match param {
            LightParam::Temperature => &mut self.temperature_slider,
            LightParam::Angle => &mut self.angle_slider,
            LightParam::Azimuth => &mut self.azimuth_slider,
            LightParam::Intensity => &mut self.intensity_slider,
        }
    }
}

/// The visualizer façade: composes the control panel, the picker, and the
/// host-forwarding controllers, and owns the per-frame tick.
pub struct Visualizer {
    panel: ControlPanel,
    picker: Picker,
    display: DisplayMesh,
    light: LightController,
    effects: EffectsController,
    ranges: LightRanges,
    events: Vec<UiEvent>,
}

impl Visualizer {
    pub fn new(
        surface: Box<dyn MeshSurface>,
        light: Box<dyn SceneLight>,
        post_fx: Box<dyn PostFxStack>,
    ) -> Self {
        Self::with_ranges(surface, light, post_fx, LightRanges::default())
    }

    pub fn with_ranges(
        surface: Box<dyn MeshSurface>,
        light: Box<dyn SceneLight>,
        post_fx: Box<dyn PostFxStack>,
        ranges: LightRanges,
    ) -> Self {
        let light = LightController::new(light);
        let mut visualizer = Self {
            panel: ControlPanel::new(),
            picker: Picker::new(),
            display: DisplayMesh::new(surface),
            light,
            effects: EffectsController::new(post_fx),
            ranges,
            events: Vec::new(),
        };
        visualizer.seed_sliders_from_light();
        visualizer
    }

    /// Position the light sliders at the host light's current values
    /// (inverse of the normalized mapping).
    fn seed_sliders_from_light(&mut self) {
        let seeds = [
            (LightParam::Temperature, self.light.temperature()),
            (LightParam::Angle, self.light.angle()),
            (LightParam::Azimuth, self.light.azimuth()),
            (LightParam::Intensity, self.light.intensity()),
        ];
        for (param, value) in seeds {
            let normalized = self.ranges.inverse_lerp(param, value);
            self.panel.slider_mut(param).set_value(normalized);
        }
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut ControlPanel {
        &mut self.panel
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut Picker {
        &mut self.picker
    }

    pub fn display(&self) -> &DisplayMesh {
        &self.display
    }

    pub fn light(&self) -> &LightController {
        &self.light
    }

    pub fn effects(&self) -> &EffectsController {
        &self.effects
    }

    pub fn ranges(&self) -> LightRanges {
        self.ranges
    }

    /// Advance per-frame animation (the carousel settle).
    pub fn tick(&mut self, dt: f32) {
        self.picker.tick(dt);
    }

    /// Events produced since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn apply(&mut self, command: UiCommand) {
        match command {
            UiCommand::SelectPanelMode(mode) => {
                self.panel.mode = mode;
                let control_mode = mode.control_mode();
                self.display.control_mode = control_mode;
                self.events.push(UiEvent::ControlModeChanged(control_mode));
            }
            UiCommand::SelectTranslationPlane(plane) => {
                self.display.translation_plane = plane;
            }
            UiCommand::SelectRotationAxis(axis) => {
                self.display.rotation_axis = axis;
            }
            UiCommand::SelectScaleAxis(axis) => {
                self.display.scale_axis = axis;
            }
            UiCommand::OpenPicker(kind) => {
                self.picker.open(kind);
            }
            UiCommand::ClosePicker => {
                self.picker.close();
            }
            UiCommand::SelectSlot(slot) => {
                if let Some(selection) = self.picker.tap_slot(slot) {
                    self.apply_selection(selection);
                }
            }
            UiCommand::SetLightSlider(param, normalized) => {
                let normalized = self.panel.slider_mut(param).set_value(normalized);
                let value = self.ranges.lerp(param, normalized);
                match param {
                    LightParam::Temperature => self.light.set_temperature(value),
                    LightParam::Angle => self.light.set_angle(value),
                    LightParam::Azimuth => self.light.set_azimuth(value),
                    LightParam::Intensity => self.light.set_intensity(value),
                }
                self.events.push(UiEvent::LightChanged(param, value));
            }
            UiCommand::ToggleEffect(effect) => {
                let on = self.effects.toggle(effect);
                self.events.push(UiEvent::EffectToggled(effect, on));
            }
            UiCommand::SaveSettings(path) => match save_settings_to_file(&self.capture_settings(), &path) {
                Ok(()) => self.events.push(UiEvent::SettingsSaved(path)),
                Err(err) => {
                    log::warn!("failed to save settings to {}: {err}", path.display());
                    self.events.push(UiEvent::SettingsFailed(err.to_string()));
                }
            },
            UiCommand::LoadSettings(path) => match load_settings_from_file(&path) {
                Ok(settings) => {
                    self.apply_settings(&settings);
                    self.events.push(UiEvent::SettingsLoaded(path));
                }
                Err(err) => {
                    log::warn!("failed to load settings from {}: {err}", path.display());
                    self.events.push(UiEvent::SettingsFailed(err.to_string()));
                }
            },
        }
    }

    fn apply_selection(&mut self, selection: Selection) {
        match selection {
            Selection::Mesh(mesh) => {
                let name = mesh.name.clone();
                self.display.set_mesh(mesh);
                self.events.push(UiEvent::MeshSelected(name));
            }
            Selection::Material(material) => {
                let name = material.name.clone();
                self.display.set_material(material);
                self.events.push(UiEvent::MaterialSelected(name));
            }
            Selection::Texture(texture) => {
                let name = texture.name.clone();
                self.display.set_texture(texture);
                self.events.push(UiEvent::TextureSelected(name));
            }
        }
    }

    /// Snapshot the restorable viewer state.
    pub fn capture_settings(&self) -> ViewerSettings {
        ViewerSettings {
            mesh: self.display.mesh().map(|m| m.name.clone()),
            material: self.display.material().map(|m| m.name.clone()),
            texture: self.display.texture().map(|t| t.name.clone()),
            light: LightSettings {
                angle_deg: self.light.angle(),
                azimuth_deg: self.light.azimuth(),
                temperature: self.light.temperature(),
                intensity: self.light.intensity(),
            },
            enabled_effects: PostEffect::ALL
                .into_iter()
                .filter(|effect| self.effects.is_active(*effect))
                .collect(),
            control_mode: self.display.control_mode,
            translation_plane: self.display.translation_plane,
            rotation_axis: self.display.rotation_axis,
            scale_axis: self.display.scale_axis,
        }
    }

    /// Restore a snapshot. Resource names that no registered library can
    /// resolve are skipped, matching the catalog's absent-resource policy.
    pub fn apply_settings(&mut self, settings: &ViewerSettings) {
        if let Some(name) = &settings.mesh {
            match self.picker.load_mesh(name) {
                Some(mesh) => self.apply_selection(Selection::Mesh(mesh)),
                None => log::warn!("saved mesh {name:?} not found in any library"),
            }
        }
        if let Some(name) = &settings.material {
            match self.picker.load_material(name) {
                Some(material) => self.apply_selection(Selection::Material(material)),
                None => log::warn!("saved material {name:?} not found in any library"),
            }
        }
        if let Some(name) = &settings.texture {
            match self.picker.load_texture(name) {
                Some(texture) => self.apply_selection(Selection::Texture(texture)),
                None => log::warn!("saved texture {name:?} not found in any library"),
            }
        }

        self.light.set_temperature(settings.light.temperature);
        self.light.set_intensity(settings.light.intensity);
        self.light.set_angle(settings.light.angle_deg);
        self.light.set_azimuth(settings.light.azimuth_deg);
        self.seed_sliders_from_light();

        for effect in PostEffect::ALL {
            self.effects
                .set_active(effect, settings.enabled_effects.contains(&effect));
        }

        self.display.control_mode = settings.control_mode;
        self.display.translation_plane = settings.translation_plane;
        self.display.rotation_axis = settings.rotation_axis;
        self.display.scale_axis = settings.scale_axis;
        self.panel.mode = match settings.control_mode {
            ControlMode::Translate => PanelMode::Translate,
            ControlMode::Rotate => PanelMode::Rotate,
            ControlMode::Scale => PanelMode::Scale,
            ControlMode::None => self.panel.mode,
        };
    }
}
