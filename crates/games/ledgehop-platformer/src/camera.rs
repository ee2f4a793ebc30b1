use serde::{Deserialize, Serialize};

/// Top-left of the visible window in world coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

/// What the camera follows and what bounds it.
#[derive(Debug, Clone, Copy)]
pub struct CameraTarget {
    pub center_x: f32,
    pub center_y: f32,
    pub level_width: i32,
    pub level_height: i32,
    pub screen_width: i32,
    pub screen_height: i32,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ease toward centering the target, then clamp to the level.
    ///
    /// An axis where the level is not larger than the screen is only clamped at 0.
    pub fn update(&mut self, target: &CameraTarget, follow_speed: f32) {
        let goal_x = target.center_x - target.screen_width as f32 / 2.0;
        let goal_y = target.center_y - target.screen_height as f32 / 2.0;
        self.x += (goal_x - self.x) * follow_speed;
        self.y += (goal_y - self.y) * follow_speed;

        self.x = self.x.max(0.0);
        self.y = self.y.max(0.0);
        let max_x = (target.level_width - target.screen_width) as f32;
        if max_x > 0.0 && self.x > max_x {
            self.x = max_x;
        }
        let max_y = (target.level_height - target.screen_height) as f32;
        if max_y > 0.0 && self.y > max_y {
            self.y = max_y;
        }
    }

    /// World to screen pixels, truncated.
    pub fn world_to_screen(&self, wx: f32, wy: f32) -> (i32, i32) {
        ((wx - self.x) as i32, (wy - self.y) as i32)
    }
}
