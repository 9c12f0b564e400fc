//! Per-tick animation parameters of the landscape.

/// Radians added to the rotation angle every tick.
pub const ROTATION_SPEED: f32 = 0.01;
/// Boat displacement per tick, in clip-space units.
pub const TRANSLATION_SPEED: f32 = 0.003;
/// Boats turn around once `|translation_x|` exceeds this.
pub const TRANSLATION_RANGE: f32 = 0.7;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationState {
    /// Sun rays spin by `+angle`, windmill blades by `-angle`. Never wrapped.
    pub angle: f32,
    pub translation_x: f32,
    /// `1.0` or `-1.0`.
    pub direction: f32,
}

impl AnimationState {
    pub const fn new() -> Self {
        Self {
            angle: 0.0,
            translation_x: 0.0,
            direction: 1.0,
        }
    }

    /// Advances one tick. The direction flips after the step that leaves the range, so the
    /// boats overshoot by at most one step.
    pub fn tick(&mut self) {
        self.angle += ROTATION_SPEED;
        self.translation_x += TRANSLATION_SPEED * self.direction;
        if self.translation_x.abs() > TRANSLATION_RANGE {
            self.direction = -self.direction;
        }
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}
