/// Damping time constant for the settle animation, in seconds.
const CAROUSEL_SMOOTH_TIME: f32 = 0.1;
/// Offset/velocity magnitudes below this count as settled.
const SETTLE_EPSILON: f32 = 0.01;

/// Resolved layout of the carousel strip. Offsets cannot be computed until
/// the host has measured the panel and one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselGeometry {
    /// Width of the visible strip.
    pub panel_width: f32,
    /// Rendered width of a single card, including its share of spacing.
    pub slot_width: f32,
}

/// Drag-to-scroll, snap-to-index carousel engine.
///
/// Owns a continuous scroll offset over N discrete slots. While dragging the
/// offset follows the pointer 1:1; on release the nearest slot becomes the
/// target, biased one slot further in the fling direction when the nearest
/// one would require moving against the last drag delta. Between drags,
/// [`Carousel::tick`] smooth-damps the offset toward the target.
///
/// Slot setup requires resolved geometry; `set_slots` before the first
/// [`Carousel::set_geometry`] is deferred and applied when geometry arrives.
pub struct Carousel {
    slot_count: usize,
    active_index: Option<usize>,
    current_offset: f32,
    target_offset: f32,
    velocity: f32,
    dragging: bool,
    geometry: Option<CarouselGeometry>,
    init_pending: bool,
}

impl Carousel {
    pub fn new() -> Self {
        Self {
            slot_count: 0,
            active_index: None,
            current_offset: 0.0,
            target_offset: 0.0,
            velocity: 0.0,
            dragging: false,
            geometry: None,
            init_pending: false,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn current_offset(&self) -> f32 {
        self.current_offset
    }

    pub fn target_offset(&self) -> f32 {
        self.target_offset
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_settled(&self) -> bool {
        !self.dragging && self.current_offset == self.target_offset
    }

    /// Replace the slot list. Centers the active index on `ceil(n/2) - 1`
    /// and snaps the offset there with no animation. If geometry is not yet
    /// resolved, the initialization runs once geometry arrives.
    pub fn set_slots(&mut self, count: usize) {
        self.slot_count = count;
        self.active_index = None;
        self.velocity = 0.0;
        self.dragging = false;
        if self.geometry.is_some() {
            self.initialize_index();
        } else {
            self.init_pending = true;
        }
    }

    /// Report resolved layout. The first call after `set_slots` plays the
    /// role of the host's one-shot geometry-ready signal and runs the
    /// deferred index initialization; later calls re-center the target on
    /// the active index so resizes keep the active slot centered.
    pub fn set_geometry(&mut self, geometry: CarouselGeometry) {
        let changed = self.geometry != Some(geometry);
        self.geometry = Some(geometry);
        if self.init_pending {
            self.init_pending = false;
            self.initialize_index();
        } else if changed {
            if let Some(index) = self.active_index {
                self.target_offset = self.offset_for_slot(index).unwrap_or(self.target_offset);
            }
        }
    }

    pub fn geometry(&self) -> Option<CarouselGeometry> {
        self.geometry
    }

    /// Centering offset for a slot: the left-most slot sits at
    /// `panel_width/2 - slot_width/2`, each further slot one slot width to
    /// the left. `None` until geometry is resolved or when out of range.
    pub fn offset_for_slot(&self, index: usize) -> Option<f32> {
        let geometry = self.geometry?;
        if index >= self.slot_count {
            return None;
        }
        let leftmost = geometry.panel_width / 2.0 - geometry.slot_width / 2.0;
        Some(leftmost - index as f32 * geometry.slot_width)
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Apply a horizontal pointer delta while dragging. The last delta is
    /// kept as the velocity so release carries momentum into the snap.
    pub fn drag_delta(&mut self, dx: f32) {
        if !self.dragging {
            return;
        }
        self.current_offset += dx;
        self.velocity = dx;
    }

    /// End the drag and pick the snap target.
    pub fn end_drag(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        self.snap_to_nearest();
    }

    /// Lost pointer capture mid-drag: run the same release path as a normal
    /// pointer-up so the widget cannot stay stuck in the dragging state.
    pub fn capture_lost(&mut self) {
        self.end_drag();
    }

    /// Advance the settle animation. While not dragging, smooth-damps the
    /// offset toward the target; a settled carousel stays bit-identical
    /// under repeated ticks.
    pub fn tick(&mut self, dt: f32) {
        if self.dragging || dt <= 0.0 {
            return;
        }
        if self.current_offset == self.target_offset && self.velocity == 0.0 {
            return;
        }
        self.current_offset = smooth_damp(
            self.current_offset,
            self.target_offset,
            &mut self.velocity,
            CAROUSEL_SMOOTH_TIME,
            dt,
        );
        if (self.current_offset - self.target_offset).abs() < SETTLE_EPSILON
            && self.velocity.abs() < SETTLE_EPSILON
        {
            self.current_offset = self.target_offset;
            self.velocity = 0.0;
        }
    }

    fn initialize_index(&mut self) {
        if self.slot_count == 0 {
            self.active_index = None;
            self.current_offset = 0.0;
            self.target_offset = 0.0;
            return;
        }
        // Center card: ceil(n/2) - 1.
        let index = (self.slot_count + 1) / 2 - 1;
        self.set_index(index);
        self.current_offset = self.target_offset;
    }

    fn set_index(&mut self, index: usize) {
        self.active_index = Some(index);
        if let Some(offset) = self.offset_for_slot(index) {
            self.target_offset = offset;
        }
    }

    fn snap_to_nearest(&mut self) {
        if self.slot_count == 0 || self.geometry.is_none() {
            return;
        }
        let mut min_distance = f32::MAX;
        let mut min_index = 0usize;
        for index in 0..self.slot_count {
            let Some(offset) = self.offset_for_slot(index) else {
                continue;
            };
            let distance = offset - self.current_offset;
            if distance.abs() < min_distance.abs() {
                min_distance = distance;
                min_index = index;
            }
        }

        // Favor the slot in the direction of the fling: if reaching the
        // nearest slot would move against the release velocity, advance one
        // slot further along the fling instead.
        if self.velocity != 0.0 && min_distance.signum() != self.velocity.signum() {
            let shifted = min_index as i64 + min_distance.signum() as i64;
            min_index = shifted.clamp(0, self.slot_count as i64 - 1) as usize;
        }

        self.set_index(min_index);
    }
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new()
    }
}

/// Critically-damped spring step toward `target` (the classic smooth-damp
/// approximation). `velocity` is carried spring state; overshoot past the
/// target is clamped.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let omega = 2.0 / smooth_time.max(1e-4);
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    output
}
