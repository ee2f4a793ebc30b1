use serde::{Deserialize, Serialize};

/// Presentation-only player shape. Physics never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerShape {
    #[default]
    Circle,
    Triangle,
    Hexagon,
}

impl PlayerShape {
    pub fn next(self) -> Self {
        match self {
            Self::Circle => Self::Triangle,
            Self::Triangle => Self::Hexagon,
            Self::Hexagon => Self::Circle,
        }
    }
}

/// Render-side state carried alongside the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub shape: PlayerShape,
    /// Rolling angle in radians.
    pub rotation: f32,
}

impl Appearance {
    /// Roll by the distance travelled this tick, as a wheel of `radius`.
    pub fn roll(&mut self, vx: f32, dt: f32, radius: f32) {
        self.rotation += vx * dt / radius;
    }
}
