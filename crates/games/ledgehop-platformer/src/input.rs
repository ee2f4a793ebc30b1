use serde::{Deserialize, Serialize};

/// Horizontal movement intent for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalIntent {
    Left,
    Right,
    #[default]
    None,
}

impl HorizontalIntent {
    /// -1, 0, or +1 along x.
    pub fn direction(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
            Self::None => 0.0,
        }
    }
}

/// Input for a single tick.
///
/// `jump_pressed` and `cycle_shape` are edges: true only on the tick the key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformerInput {
    pub horizontal: HorizontalIntent,
    pub jump_pressed: bool,
    pub cycle_shape: bool,
}

/// Raw held-key state polled from a device once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub cycle_shape: bool,
}

/// Turns held keys into per-tick intent, detecting press edges.
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    prev: HeldKeys,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample this tick's keys. Left wins when both directions are held.
    pub fn sample(&mut self, held: HeldKeys) -> PlatformerInput {
        let horizontal = if held.left {
            HorizontalIntent::Left
        } else if held.right {
            HorizontalIntent::Right
        } else {
            HorizontalIntent::None
        };
        let input = PlatformerInput {
            horizontal,
            jump_pressed: held.jump && !self.prev.jump,
            cycle_shape: held.cycle_shape && !self.prev.cycle_shape,
        };
        self.prev = held;
        input
    }
}
