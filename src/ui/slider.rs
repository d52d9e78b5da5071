/// Resolved layout of a slider: knob travel is `track_length - knob_length`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderGeometry {
    pub track_length: f32,
    pub knob_length: f32,
}

impl SliderGeometry {
    pub fn travel(&self) -> f32 {
        self.track_length - self.knob_length
    }
}

/// Vertical drag slider over a normalized [0, 1] value.
///
/// The 1-D continuous analog of the carousel's gesture handling: the knob
/// follows the pointer 1:1 with no damping and no snapping. Values are
/// clamped on every write, and the knob position is always recomputed from
/// the stored value so layout changes cannot desync visual and logical state.
pub struct VerticalSlider {
    value: f32,
    dragging: bool,
    geometry: Option<SliderGeometry>,
}

impl VerticalSlider {
    pub fn new(value: f32) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            dragging: false,
            geometry: None,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Clamp and store a value. Returns the stored value.
    pub fn set_value(&mut self, value: f32) -> f32 {
        self.value = value.clamp(0.0, 1.0);
        self.value
    }

    /// Report resolved layout. Degenerate geometry (no knob travel) is kept
    /// but makes drags a no-op rather than dividing by zero.
    pub fn set_geometry(&mut self, geometry: SliderGeometry) {
        self.geometry = Some(geometry);
    }

    pub fn geometry(&self) -> Option<SliderGeometry> {
        self.geometry
    }

    /// Knob offset from the bottom of the track, derived from the value so
    /// it survives any resize.
    pub fn knob_position(&self) -> f32 {
        match self.geometry {
            Some(geometry) if geometry.travel() > 0.0 => geometry.travel() * self.value,
            _ => 0.0,
        }
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Treated identically to ending the drag.
    pub fn capture_lost(&mut self) {
        self.end_drag();
    }

    /// Apply a vertical pointer delta (screen convention, +y down) while
    /// dragging. Returns the new value when the update is accepted.
    pub fn drag_delta(&mut self, dy: f32) -> Option<f32> {
        if !self.dragging {
            return None;
        }
        let geometry = self.geometry?;
        let travel = geometry.travel();
        if travel <= 0.0 {
            return None;
        }
        Some(self.set_value(self.value - dy / travel))
    }
}

impl Default for VerticalSlider {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_value_round_trips_in_range() {
        let mut slider = VerticalSlider::new(0.0);
        for value in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_eq!(slider.set_value(value), value);
            assert_eq!(slider.value(), value);
        }
    }

    #[test]
    fn out_of_range_values_are_clamped_on_input() {
        let mut slider = VerticalSlider::new(0.5);
        assert_eq!(slider.set_value(1.5), 1.0);
        assert_eq!(slider.set_value(-0.3), 0.0);
        assert_eq!(VerticalSlider::new(7.0).value(), 1.0);
    }

    #[test]
    fn drag_maps_delta_over_knob_travel() {
        let mut slider = VerticalSlider::new(0.5);
        slider.set_geometry(SliderGeometry {
            track_length: 120.0,
            knob_length: 20.0,
        });
        slider.begin_drag();
        // 100 px of travel; 25 px upward is +0.25.
        assert_eq!(slider.drag_delta(-25.0), Some(0.75));
        assert_eq!(slider.drag_delta(50.0), Some(0.25));
    }

    #[test]
    fn drag_clamps_at_the_ends() {
        let mut slider = VerticalSlider::new(0.9);
        slider.set_geometry(SliderGeometry {
            track_length: 120.0,
            knob_length: 20.0,
        });
        slider.begin_drag();
        assert_eq!(slider.drag_delta(-50.0), Some(1.0));
        assert_eq!(slider.drag_delta(500.0), Some(0.0));
    }

    #[test]
    fn drag_without_press_or_geometry_is_rejected() {
        let mut slider = VerticalSlider::new(0.5);
        // Not dragging.
        assert_eq!(slider.drag_delta(-10.0), None);
        // Dragging but no geometry yet.
        slider.begin_drag();
        assert_eq!(slider.drag_delta(-10.0), None);
        assert_eq!(slider.value(), 0.5);
    }

    #[test]
    fn degenerate_geometry_is_a_no_op() {
        let mut slider = VerticalSlider::new(0.5);
        slider.set_geometry(SliderGeometry {
            track_length: 20.0,
            knob_length: 20.0,
        });
        slider.begin_drag();
        assert_eq!(slider.drag_delta(-10.0), None);
        assert_eq!(slider.knob_position(), 0.0);
    }

    #[test]
    fn knob_position_tracks_value_across_resizes() {
        let mut slider = VerticalSlider::new(0.5);
        slider.set_geometry(SliderGeometry {
            track_length: 120.0,
            knob_length: 20.0,
        });
        assert_eq!(slider.knob_position(), 50.0);
        slider.set_geometry(SliderGeometry {
            track_length: 220.0,
            knob_length: 20.0,
        });
        assert_eq!(slider.knob_position(), 100.0);
        assert_eq!(slider.value(), 0.5);
    }

    #[test]
    fn capture_lost_ends_the_drag() {
        let mut slider = VerticalSlider::new(0.5);
        slider.set_geometry(SliderGeometry {
            track_length: 120.0,
            knob_length: 20.0,
        });
        slider.begin_drag();
        slider.capture_lost();
        assert!(!slider.is_dragging());
        assert_eq!(slider.drag_delta(-10.0), None);
    }
}
