use serde::{Deserialize, Serialize};

use ledgehop_core::geom::Rect;

use crate::input::HorizontalIntent;

/// Gravity acceleration (units/s^2, y-down so positive pulls toward the floor).
pub const GRAVITY: f32 = 980.0;
/// Horizontal move speed (units/s).
pub const MOVE_SPEED: f32 = 280.0;
/// Jump initial velocity (negative is upward).
pub const JUMP_VELOCITY: f32 = -420.0;
/// Body radius; the AABB is a square of twice this size.
pub const BODY_RADIUS: i32 = 14;
/// Grace period after leaving the ground during which a jump still fires.
pub const COYOTE_TIME_MAX: f32 = 0.12;
/// How long an early jump press is remembered.
pub const JUMP_BUFFER_MAX: f32 = 0.1;
/// Collision resolution passes per tick.
pub const MAX_PASSES: u32 = 4;
/// Simulation rate.
pub const TICK_RATE_HZ: f32 = 60.0;
/// Logical screen size the level tables scale from.
pub const SCREEN_WIDTH: i32 = 1280;
pub const SCREEN_HEIGHT: i32 = 720;
/// Camera lerp factor per tick.
pub const CAMERA_FOLLOW_SPEED: f32 = 0.12;
/// Largest accepted magnitude for gravity, move speed, and jump velocity.
/// Keeps per-tick displacement far inside the integer world range.
pub const MAX_PHYSICS_MAGNITUDE: f32 = 100_000.0;

const CONFIG_ENV_VAR: &str = "LEDGEHOP_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/platformer.toml";

/// Configurable physics parameters, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub move_speed: f32,
    pub jump_velocity: f32,
    pub body_width: i32,
    pub body_height: i32,
    pub coyote_time_max: f32,
    pub jump_buffer_max: f32,
    pub max_passes: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_speed: MOVE_SPEED,
            jump_velocity: JUMP_VELOCITY,
            body_width: BODY_RADIUS * 2,
            body_height: BODY_RADIUS * 2,
            coyote_time_max: COYOTE_TIME_MAX,
            jump_buffer_max: JUMP_BUFFER_MAX,
            max_passes: MAX_PASSES,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("gravity", self.gravity),
            ("move_speed", self.move_speed),
            ("jump_velocity", self.jump_velocity),
            ("coyote_time_max", self.coyote_time_max),
            ("jump_buffer_max", self.jump_buffer_max),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("physics.{name} must be finite")));
        }
        let bounded = [
            ("gravity", self.gravity),
            ("move_speed", self.move_speed),
            ("jump_velocity", self.jump_velocity),
        ];
        if let Some((name, _)) = bounded
            .iter()
            .find(|(_, v)| v.abs() > MAX_PHYSICS_MAGNITUDE)
        {
            return Err(ConfigError::Invalid(format!(
                "physics.{name} must be within ±{MAX_PHYSICS_MAGNITUDE}"
            )));
        }
        if self.body_width <= 0 || self.body_height <= 0 {
            return Err(ConfigError::Invalid(
                "physics body dimensions must be positive".to_string(),
            ));
        }
        if self.coyote_time_max < 0.0 || self.jump_buffer_max < 0.0 {
            return Err(ConfigError::Invalid(
                "physics jump-assist windows must not be negative".to_string(),
            ));
        }
        if self.max_passes == 0 {
            return Err(ConfigError::Invalid(
                "physics.max_passes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Half the body width, used for the rolling animation.
    pub fn body_radius(&self) -> f32 {
        self.body_width as f32 / 2.0
    }
}

/// Top-level platformer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerConfig {
    pub physics: PhysicsConfig,
    pub screen_width: i32,
    pub screen_height: i32,
    pub tick_rate_hz: f32,
    pub camera_follow_speed: f32,
}

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_rate_hz: TICK_RATE_HZ,
            camera_follow_speed: CAMERA_FOLLOW_SPEED,
        }
    }
}

impl PlatformerConfig {
    /// Load config from the file named by `LEDGEHOP_CONFIG`, or
    /// `config/platformer.toml`. Falls back to defaults if the file is missing
    /// or invalid.
    pub fn load() -> Self {
        let path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to load {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return Err(ConfigError::Invalid(
                "screen dimensions must be positive".to_string(),
            ));
        }
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(ConfigError::Invalid(
                "tick_rate_hz must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.camera_follow_speed) {
            return Err(ConfigError::Invalid(
                "camera_follow_speed must be within [0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    /// Fixed timestep in seconds.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(m) => write!(f, "invalid TOML: {m}"),
            Self::Invalid(m) => write!(f, "invalid config: {m}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Kinematic state of the player body.
///
/// `x`/`y` is the top-left corner of the AABB. `grounded` is recomputed by the
/// resolver every tick; only the two timers carry ground contact across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
    pub coyote_time: f32,
    pub jump_buffer: f32,
}

impl Body {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    /// AABB in integer world units. The position is truncated toward zero.
    pub fn aabb(&self, physics: &PhysicsConfig) -> Rect {
        Rect::from_origin(
            self.x as i32,
            self.y as i32,
            physics.body_width,
            physics.body_height,
        )
    }

    pub fn center_x(&self, physics: &PhysicsConfig) -> f32 {
        self.x + physics.body_width as f32 / 2.0
    }

    pub fn center_y(&self, physics: &PhysicsConfig) -> f32 {
        self.y + physics.body_height as f32 / 2.0
    }

    /// Move to `(x, y)` and clear velocity, contact, and both timers.
    pub fn respawn(&mut self, x: f32, y: f32) {
        *self = Self::new(x, y);
    }
}

/// Apply horizontal intent and gravity, then advance the position.
///
/// Semi-implicit Euler: the updated `vy` moves `y`. No collision awareness.
pub fn integrate(body: &mut Body, intent: HorizontalIntent, physics: &PhysicsConfig, dt: f32) {
    body.vx = intent.direction() * physics.move_speed;
    body.vy += physics.gravity * dt;
    body.x += body.vx * dt;
    body.y += body.vy * dt;
}
