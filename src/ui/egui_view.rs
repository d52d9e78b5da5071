//! egui presentation layer: paints the control panel, the resource picker
//! window, and the carousel strip, and turns raw pointer input into
//! [`UiCommand`] values for the [`Visualizer`] façade. All interaction
//! state lives in the widget structs; this module only draws and routes.

use crate::app::{LightParam, PanelMode, UiCommand, Visualizer};
use crate::catalog::{CatalogItem, ResourceKind};
use crate::host::PostEffect;
use crate::scene::{RotationAxis, ScaleAxis, TranslationPlane};
use crate::ui::carousel::{Carousel, CarouselGeometry};
use crate::ui::gesture::GestureClassifier;
use crate::ui::slider::{SliderGeometry, VerticalSlider};
use egui::{Align2, Color32, CornerRadius, FontId, Rect, Sense, Stroke, StrokeKind};
use image::RgbaImage;
use std::collections::HashMap;
use std::path::PathBuf;

const CARD_WIDTH: f32 = 96.0;
const CARD_GAP: f32 = 10.0;
const STRIP_HEIGHT: f32 = 128.0;
const SLIDER_TRACK: f32 = 140.0;
const SLIDER_WIDTH: f32 = 26.0;
const SLIDER_KNOB: f32 = 16.0;

const SETTINGS_FILE: &str = "viewer_settings.json";

/// Uploaded preview textures, keyed by kind and title so reopening the
/// picker reuses the GPU copies.
#[derive(Default)]
pub struct PreviewTextureCache {
    textures: HashMap<String, egui::TextureHandle>,
}

impl PreviewTextureCache {
    pub fn get_or_upload(
        &mut self,
        ctx: &egui::Context,
        key: &str,
        image: &RgbaImage,
    ) -> egui::TextureId {
        if let Some(handle) = self.textures.get(key) {
            return handle.id();
        }
        let size = [image.width() as usize, image.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        let handle = ctx.load_texture(key.to_string(), color_image, egui::TextureOptions::LINEAR);
        let id = handle.id();
        self.textures.insert(key.to_string(), handle);
        id
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

/// The whole visualizer UI for one frame. Per-frame flow: advance the
/// carousel settle animation, draw, then dispatch the frame's commands.
pub struct VisualizerView {
    gesture: GestureClassifier,
    previews: PreviewTextureCache,
    settings_path: PathBuf,
}

impl VisualizerView {
    pub fn new() -> Self {
        Self {
            gesture: GestureClassifier::new(),
            previews: PreviewTextureCache::default(),
            settings_path: PathBuf::from(SETTINGS_FILE),
        }
    }

    pub fn with_settings_path(mut self, path: PathBuf) -> Self {
        self.settings_path = path;
        self
    }

    pub fn show(&mut self, ctx: &egui::Context, visualizer: &mut Visualizer) {
        let dt = ctx.input(|i| i.stable_dt);
        visualizer.tick(dt);

        let mut commands = Vec::new();
        egui::SidePanel::left("control_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.control_panel(ui, visualizer, &mut commands);
            });
        if visualizer.picker().is_visible() {
            self.picker_window(ctx, visualizer, &mut commands);
        }

        for command in commands {
            visualizer.apply(command);
        }
        if !visualizer.picker().carousel().is_settled() {
            ctx.request_repaint();
        }
    }

    fn control_panel(
        &mut self,
        ui: &mut egui::Ui,
        visualizer: &mut Visualizer,
        commands: &mut Vec<UiCommand>,
    ) {
        ui.heading("Asset Visualizer");
        ui.separator();

        ui.horizontal_wrapped(|ui| {
            let current = visualizer.panel().mode;
            for mode in PanelMode::ALL {
                if ui.selectable_label(current == mode, mode.label()).clicked() {
                    commands.push(UiCommand::SelectPanelMode(mode));
                }
            }
        });
        ui.separator();

        match visualizer.panel().mode {
            PanelMode::Translate => {
                ui.label("Drag plane");
                ui.horizontal(|ui| {
                    let current = visualizer.display().translation_plane;
                    for (plane, label) in
                        [(TranslationPlane::XZ, "XZ"), (TranslationPlane::XY, "XY")]
                    {
                        if ui.selectable_label(current == plane, label).clicked() {
                            commands.push(UiCommand::SelectTranslationPlane(plane));
                        }
                    }
                });
            }
            PanelMode::Rotate => {
                ui.label("Rotation axis");
                ui.horizontal(|ui| {
                    let current = visualizer.display().rotation_axis;
                    for (axis, label) in [
                        (RotationAxis::X, "X"),
                        (RotationAxis::Y, "Y"),
                        (RotationAxis::Z, "Z"),
                    ] {
                        if ui.selectable_label(current == axis, label).clicked() {
                            commands.push(UiCommand::SelectRotationAxis(axis));
                        }
                    }
                });
            }
            PanelMode::Scale => {
                ui.label("Scale axis");
                ui.horizontal(|ui| {
                    let current = visualizer.display().scale_axis;
                    for (axis, label) in [
                        (ScaleAxis::X, "X"),
                        (ScaleAxis::Y, "Y"),
                        (ScaleAxis::Z, "Z"),
                        (ScaleAxis::Uniform, "All"),
                    ] {
                        if ui.selectable_label(current == axis, label).clicked() {
                            commands.push(UiCommand::SelectScaleAxis(axis));
                        }
                    }
                });
            }
            PanelMode::Light => {
                light_sliders(ui, visualizer, commands);
            }
            PanelMode::Effects => {
                for effect in PostEffect::ALL {
                    let active = visualizer.effects().is_active(effect);
                    if ui.selectable_label(active, effect.label()).clicked() {
                        commands.push(UiCommand::ToggleEffect(effect));
                    }
                }
            }
        }

        ui.separator();
        ui.label("Resources");
        ui.horizontal(|ui| {
            for kind in ResourceKind::ALL {
                if ui.button(kind.label()).clicked() {
                    commands.push(UiCommand::OpenPicker(kind));
                }
            }
        });

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                commands.push(UiCommand::SaveSettings(self.settings_path.clone()));
            }
            if ui.button("Load").clicked() {
                commands.push(UiCommand::LoadSettings(self.settings_path.clone()));
            }
        });
    }

    fn picker_window(
        &mut self,
        ctx: &egui::Context,
        visualizer: &mut Visualizer,
        commands: &mut Vec<UiCommand>,
    ) {
        let title = visualizer.picker().title().to_string();
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
            .show(ctx, |ui| {
                let strip_width = ui.available_width().max(3.0 * (CARD_WIDTH + CARD_GAP));
                self.carousel_strip(ui, strip_width, visualizer, commands);
                if ui.button("Close").clicked() {
                    commands.push(UiCommand::ClosePicker);
                }
            });
    }

    /// Draw the card strip and route pointer input: confirmed taps become
    /// slot selections, everything past the cancel distance scrolls.
    fn carousel_strip(
        &mut self,
        ui: &mut egui::Ui,
        width: f32,
        visualizer: &mut Visualizer,
        commands: &mut Vec<UiCommand>,
    ) {
        let (rect, _response) =
            ui.allocate_exact_size(egui::vec2(width, STRIP_HEIGHT), Sense::click_and_drag());
        let ctx = ui.ctx().clone();
        let slot_width = CARD_WIDTH + CARD_GAP;

        let picker = visualizer.picker_mut();
        picker.carousel_mut().set_geometry(CarouselGeometry {
            panel_width: rect.width(),
            slot_width,
        });

        let pointer = ui.input(|i| PointerFrame {
            time: i.time,
            position: i.pointer.latest_pos(),
            pressed: i.pointer.primary_pressed(),
            released: i.pointer.primary_released(),
            down: i.pointer.primary_down(),
            delta: i.pointer.delta(),
        });
        self.route_pointer(rect, slot_width, &pointer, picker.carousel_mut(), commands);

        let painter = ui.painter().with_clip_rect(rect);
        painter.rect_filled(rect, CornerRadius::same(4), Color32::from_gray(24));
        let offset = picker.carousel().current_offset();
        let active = picker.carousel().active_index();
        let items: Vec<(String, Option<egui::TextureId>)> = picker
            .items()
            .iter()
            .map(|item| (item.title.clone(), self.upload_preview(&ctx, item)))
            .collect();

        for (slot, (title, texture)) in items.iter().enumerate() {
            let left = rect.left() + offset + slot as f32 * slot_width + CARD_GAP / 2.0;
            let card = Rect::from_min_size(
                egui::pos2(left, rect.top() + 8.0),
                egui::vec2(CARD_WIDTH, STRIP_HEIGHT - 16.0),
            );
            if !rect.intersects(card) {
                continue;
            }
            painter.rect_filled(card, CornerRadius::same(6), Color32::from_gray(48));
            if active == Some(slot) {
                painter.rect_stroke(
                    card,
                    CornerRadius::same(6),
                    Stroke::new(2.0, Color32::LIGHT_BLUE),
                    StrokeKind::Inside,
                );
            }
            if let Some(id) = texture {
                let image_rect = Rect::from_min_size(
                    card.min + egui::vec2(6.0, 6.0),
                    egui::vec2(CARD_WIDTH - 12.0, CARD_WIDTH - 12.0),
                );
                painter.image(
                    *id,
                    image_rect,
                    Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
            painter.text(
                card.center_bottom() - egui::vec2(0.0, 10.0),
                Align2::CENTER_CENTER,
                title,
                FontId::proportional(12.0),
                Color32::GRAY,
            );
        }
    }

    fn upload_preview(&mut self, ctx: &egui::Context, item: &CatalogItem) -> Option<egui::TextureId> {
        let preview = item.preview.as_ref()?;
        let key = format!("{}/{}", item.payload.kind().label(), item.title);
        Some(self.previews.get_or_upload(ctx, &key, preview))
    }

    fn route_pointer(
        &mut self,
        rect: Rect,
        slot_width: f32,
        pointer: &PointerFrame,
        carousel: &mut Carousel,
        commands: &mut Vec<UiCommand>,
    ) {
        if pointer.pressed {
            if let Some(position) = pointer.position {
                if rect.contains(position) {
                    self.gesture
                        .pointer_down(glam::Vec2::new(position.x, position.y), pointer.time);
                }
            }
        }

        if self.gesture.is_pressed() {
            if pointer.down {
                if let Some(position) = pointer.position {
                    let confirmed = self
                        .gesture
                        .pointer_move(glam::Vec2::new(position.x, position.y));
                    if confirmed {
                        carousel.begin_drag();
                    }
                }
                if carousel.is_dragging() {
                    carousel.drag_delta(pointer.delta.x);
                }
            } else {
                // No release event means the press vanished mid-gesture;
                // both paths run the same release handling.
                let tap = if pointer.released {
                    self.gesture.pointer_up(pointer.time)
                } else {
                    self.gesture.capture_lost(pointer.time)
                };
                carousel.end_drag();
                if let Some(tap) = tap {
                    if let Some(slot) = hit_slot(rect, slot_width, carousel, tap.position.x) {
                        commands.push(UiCommand::SelectSlot(slot));
                    }
                }
            }
        }
    }
}

impl Default for VisualizerView {
    fn default() -> Self {
        Self::new()
    }
}

struct PointerFrame {
    time: f64,
    position: Option<egui::Pos2>,
    pressed: bool,
    released: bool,
    down: bool,
    delta: egui::Vec2,
}

/// Map a tap x coordinate to the slot card under it, if any. Cards are
/// painted inset by `CARD_GAP / 2` on each side; taps in the gap margin hit
/// nothing.
fn hit_slot(rect: Rect, slot_width: f32, carousel: &Carousel, x: f32) -> Option<usize> {
    let local = x - rect.left() - carousel.current_offset();
    if local < 0.0 {
        return None;
    }
    let slot = (local / slot_width) as usize;
    let within = local - slot as f32 * slot_width;
    if within < CARD_GAP / 2.0 || within >= slot_width - CARD_GAP / 2.0 {
        return None;
    }
    (slot < carousel.slot_count()).then_some(slot)
}

fn light_sliders(ui: &mut egui::Ui, visualizer: &mut Visualizer, commands: &mut Vec<UiCommand>) {
    let ranges = visualizer.ranges();
    ui.horizontal(|ui| {
        for param in LightParam::ALL {
            ui.vertical(|ui| {
                let value = {
                    let slider = visualizer.panel_mut().slider_mut(param);
                    vertical_slider(ui, slider)
                };
                if let Some(normalized) = value {
                    commands.push(UiCommand::SetLightSlider(param, normalized));
                }
                ui.label(param.label());
                let mapped = ranges.lerp(param, visualizer.panel().slider(param).value());
                ui.label(format!("{mapped:.0}"));
            });
        }
    });
}

/// Track-and-knob vertical slider. Returns the new normalized value when a
/// drag moved the knob this frame.
fn vertical_slider(ui: &mut egui::Ui, slider: &mut VerticalSlider) -> Option<f32> {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(SLIDER_WIDTH, SLIDER_TRACK), Sense::drag());
    slider.set_geometry(SliderGeometry {
        track_length: rect.height(),
        knob_length: SLIDER_KNOB,
    });

    if response.drag_started() {
        slider.begin_drag();
    }
    let changed = if response.dragged() {
        slider.drag_delta(response.drag_delta().y)
    } else {
        None
    };
    if response.drag_stopped() {
        slider.end_drag();
    }

    let painter = ui.painter();
    painter.rect_filled(rect, CornerRadius::same(4), Color32::from_gray(32));
    let knob_top = rect.bottom() - SLIDER_KNOB - slider.knob_position();
    let knob = Rect::from_min_size(
        egui::pos2(rect.left() + 2.0, knob_top),
        egui::vec2(SLIDER_WIDTH - 4.0, SLIDER_KNOB),
    );
    painter.rect_filled(knob, CornerRadius::same(4), Color32::from_gray(160));
    if slider.is_dragging() {
        painter.rect_stroke(
            knob,
            CornerRadius::same(4),
            Stroke::new(1.0, Color32::LIGHT_BLUE),
            StrokeKind::Inside,
        );
    }
    changed
}
