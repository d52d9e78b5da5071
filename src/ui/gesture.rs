use glam::Vec2;

/// Displacement from the press origin (logical px) beyond which a press can
/// no longer be a tap.
pub const DEFAULT_CANCEL_DISTANCE: f32 = 10.0;
/// Longest press (seconds) that still counts as a tap on release.
pub const DEFAULT_MAX_PRESS_DURATION: f64 = 0.15;

#[derive(Debug, Clone, Copy)]
struct Press {
    time: f64,
    position: Vec2,
    candidate_tap: bool,
}

/// Result of releasing a press that was still a tap candidate in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tap {
    /// Where the press started, for hit-testing the tapped element.
    pub position: Vec2,
    /// Press-to-release duration in seconds.
    pub duration: f64,
}

/// Classifies a pointer-down / move / up sequence as a tap or a drag.
///
/// The carousel cards and the slider knob share this: the consumer routes
/// raw pointer events in and gets back "drag confirmed" exactly once when
/// displacement exceeds the cancel distance, or a [`Tap`] on a quick release.
/// Capture-lost must be fed through [`GestureClassifier::capture_lost`] so a
/// press never outlives the pointer.
pub struct GestureClassifier {
    cancel_distance: f32,
    max_press_duration: f64,
    press: Option<Press>,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::with_thresholds(DEFAULT_CANCEL_DISTANCE, DEFAULT_MAX_PRESS_DURATION)
    }

    pub fn with_thresholds(cancel_distance: f32, max_press_duration: f64) -> Self {
        Self {
            cancel_distance,
            max_press_duration,
            press: None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Begin tracking a press. A down while already pressed restarts tracking.
    pub fn pointer_down(&mut self, position: Vec2, time: f64) {
        self.press = Some(Press {
            time,
            position,
            candidate_tap: true,
        });
    }

    /// Feed a pointer position while pressed. Returns `true` exactly once,
    /// when displacement from the press origin first exceeds the cancel
    /// distance and the press becomes a confirmed drag.
    ///
    /// Only displacement from the origin counts; a path that wanders and
    /// returns under the threshold stays a tap candidate.
    pub fn pointer_move(&mut self, position: Vec2) -> bool {
        let Some(press) = self.press.as_mut() else {
            return false;
        };
        if !press.candidate_tap {
            return false;
        }
        if position.distance(press.position) > self.cancel_distance {
            press.candidate_tap = false;
            return true;
        }
        false
    }

    /// End the press. Emits a [`Tap`] iff the press is still a tap candidate
    /// and was released within the max press duration.
    pub fn pointer_up(&mut self, time: f64) -> Option<Tap> {
        let press = self.press.take()?;
        let duration = time - press.time;
        if press.candidate_tap && duration < self.max_press_duration {
            return Some(Tap {
                position: press.position,
                duration,
            });
        }
        None
    }

    /// The host lost pointer capture mid-press. Treated identically to a
    /// release so the press state cannot get stuck.
    pub fn capture_lost(&mut self, time: f64) -> Option<Tap> {
        self.pointer_up(time)
    }

    pub fn reset(&mut self) {
        self.press = None;
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn quick_press_release_is_a_tap() {
        let mut gesture = GestureClassifier::new();
        gesture.pointer_down(vec2(50.0, 50.0), 1.0);
        let tap = gesture.pointer_up(1.1).expect("expected a tap");
        assert_eq!(tap.position, vec2(50.0, 50.0));
        assert!(!gesture.is_pressed());
    }

    #[test]
    fn slow_release_is_not_a_tap() {
        let mut gesture = GestureClassifier::new();
        gesture.pointer_down(vec2(0.0, 0.0), 0.0);
        assert_eq!(gesture.pointer_up(0.5), None);
    }

    #[test]
    fn release_at_exact_duration_is_not_a_tap() {
        // Strict `<` on the duration comparison.
        let mut gesture = GestureClassifier::new();
        gesture.pointer_down(vec2(0.0, 0.0), 0.0);
        assert_eq!(gesture.pointer_up(DEFAULT_MAX_PRESS_DURATION), None);
    }

    #[test]
    fn movement_beyond_cancel_distance_confirms_drag_once() {
        let mut gesture = GestureClassifier::new();
        gesture.pointer_down(vec2(0.0, 0.0), 0.0);
        assert!(!gesture.pointer_move(vec2(5.0, 0.0)));
        assert!(gesture.pointer_move(vec2(15.0, 0.0)));
        // Confirmed exactly once; further moves are plain drag deltas.
        assert!(!gesture.pointer_move(vec2(30.0, 0.0)));
        assert_eq!(gesture.pointer_up(0.05), None);
    }

    #[test]
    fn cancel_boundary_is_strictly_greater_than() {
        // Three +5 px deltas: 5 and 10 px stay under (10 is not > 10),
        // the third move at 15 px cancels the tap.
        let mut gesture = GestureClassifier::new();
        gesture.pointer_down(vec2(0.0, 0.0), 0.0);
        assert!(!gesture.pointer_move(vec2(5.0, 0.0)));
        assert!(!gesture.pointer_move(vec2(10.0, 0.0)));
        assert!(gesture.pointer_move(vec2(15.0, 0.0)));
    }

    #[test]
    fn wandering_path_that_returns_to_origin_still_taps() {
        let mut gesture = GestureClassifier::new();
        gesture.pointer_down(vec2(100.0, 100.0), 0.0);
        // Long path, never more than 10 px from the origin.
        for step in 0..20 {
            let angle = step as f32 * 0.7;
            let offset = vec2(angle.cos(), angle.sin()) * 9.0;
            assert!(!gesture.pointer_move(vec2(100.0, 100.0) + offset));
        }
        assert!(gesture.pointer_up(0.1).is_some());
    }

    #[test]
    fn drag_cancellation_is_permanent() {
        let mut gesture = GestureClassifier::new();
        gesture.pointer_down(vec2(0.0, 0.0), 0.0);
        assert!(gesture.pointer_move(vec2(20.0, 0.0)));
        // Returning to the origin does not restore tap candidacy.
        assert!(!gesture.pointer_move(vec2(0.0, 0.0)));
        assert_eq!(gesture.pointer_up(0.05), None);
    }

    #[test]
    fn capture_lost_behaves_like_release() {
        let mut gesture = GestureClassifier::new();
        gesture.pointer_down(vec2(0.0, 0.0), 0.0);
        assert!(gesture.capture_lost(0.05).is_some());
        assert!(!gesture.is_pressed());

        gesture.pointer_down(vec2(0.0, 0.0), 0.0);
        gesture.pointer_move(vec2(40.0, 0.0));
        assert_eq!(gesture.capture_lost(0.05), None);
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut gesture = GestureClassifier::new();
        assert!(!gesture.pointer_move(vec2(500.0, 500.0)));
        assert_eq!(gesture.pointer_up(1.0), None);
    }
}
