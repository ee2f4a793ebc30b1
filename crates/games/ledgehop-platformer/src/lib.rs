pub mod appearance;
pub mod camera;
pub mod collision;
pub mod input;
pub mod jump;
pub mod level;
pub mod physics;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use ledgehop_core::game_trait::{GameEvent, GameMetadata, SteppedGame};
use ledgehop_core::stepped_game_boilerplate;

use appearance::Appearance;
use camera::{Camera, CameraTarget};
use input::PlatformerInput;
use level::{LEVEL_COUNT, Level, LevelError, level_table};
use physics::{Body, ConfigError, PlatformerConfig};

/// Whether the session still accepts updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Playing,
    /// The last goal was reached. Updates are ignored.
    Completed,
}

/// Serializable session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformerState {
    /// 1-based index into the session's level list.
    pub level_number: u8,
    pub level: Level,
    pub body: Body,
    pub appearance: Appearance,
    pub camera: Camera,
    pub phase: SessionPhase,
    pub ticks: u64,
    pub deaths: u32,
}

/// Drives one body through an ordered list of levels.
pub struct PlatformerSession {
    config: PlatformerConfig,
    levels: Vec<Level>,
    state: PlatformerState,
    paused: bool,
}

impl PlatformerSession {
    /// Session over the three baked levels, sized for `config`'s screen.
    pub fn new(config: PlatformerConfig) -> Result<Self, SessionError> {
        let levels = (1..=LEVEL_COUNT)
            .map(|n| level_table(n, config.screen_width, config.screen_height))
            .collect::<Result<Vec<_>, _>>()?;
        Self::with_levels(config, levels)
    }

    /// Session over a custom level list. Every level is validated up front.
    pub fn with_levels(config: PlatformerConfig, levels: Vec<Level>) -> Result<Self, SessionError> {
        config.validate()?;
        for level in &levels {
            level.validate(config.physics.body_width, config.physics.body_height)?;
        }
        let first = levels.first().cloned().ok_or(SessionError::NoLevels)?;
        let body = Body::new(first.start_x(), first.start_y());
        tracing::debug!(levels = levels.len(), "Platformer session created");
        Ok(Self {
            config,
            levels,
            state: PlatformerState {
                level_number: 1,
                level: first,
                body,
                appearance: Appearance::default(),
                camera: Camera::new(),
                phase: SessionPhase::Playing,
                ticks: 0,
                deaths: 0,
            },
            paused: false,
        })
    }

    pub fn state(&self) -> &PlatformerState {
        &self.state
    }

    pub fn config(&self) -> &PlatformerConfig {
        &self.config
    }

    pub fn level(&self) -> &Level {
        &self.state.level
    }

    pub fn body(&self) -> &Body {
        &self.state.body
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Teleport the body, keeping its velocity and timers.
    pub fn place_body(&mut self, x: f32, y: f32) {
        self.state.body.x = x;
        self.state.body.y = y;
    }

    /// Jump to level `number` (1-based): body at spawn, fresh camera, session playing.
    pub fn load_level(&mut self, number: u8) -> Result<(), LevelError> {
        let level = usize::from(number)
            .checked_sub(1)
            .and_then(|i| self.levels.get(i))
            .cloned()
            .ok_or(LevelError::UnknownLevel(number))?;
        self.enter_level(number, level);
        Ok(())
    }

    /// Advance one tick at the configured rate.
    pub fn tick(&mut self, input: &PlatformerInput) -> Vec<GameEvent> {
        let dt = self.config.dt();
        self.update(dt, input)
    }

    fn enter_level(&mut self, number: u8, level: Level) {
        tracing::debug!(level = number, "Loading level");
        self.state
            .body
            .respawn(level.start_x(), level.start_y());
        self.state.level = level;
        self.state.level_number = number;
        self.state.camera = Camera::new();
        self.state.phase = SessionPhase::Playing;
    }

    fn reach_goal(&mut self, events: &mut Vec<GameEvent>) {
        let finished = self.state.level_number;
        tracing::debug!(
            level = finished,
            ticks = self.state.ticks,
            "Goal reached"
        );
        events.push(GameEvent::LevelComplete { level: finished });
        // Level numbers are 1-based, so the next level sits at index `finished`.
        match self.levels.get(usize::from(finished)).cloned() {
            Some(next) => self.enter_level(finished + 1, next),
            None => {
                tracing::info!(
                    ticks = self.state.ticks,
                    deaths = self.state.deaths,
                    "All levels complete"
                );
                self.state.phase = SessionPhase::Completed;
                events.push(GameEvent::SessionComplete);
            },
        }
    }
}

impl SteppedGame for PlatformerSession {
    type Input = PlatformerInput;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Ledgehop".to_string(),
            description: "Roll, hop, and reach the goal of every level.".to_string(),
            level_count: LEVEL_COUNT,
            estimated_duration: Duration::from_secs(300),
        }
    }

    fn tick_rate(&self) -> f32 {
        self.config.tick_rate_hz
    }

    fn update(&mut self, dt: f32, input: &PlatformerInput) -> Vec<GameEvent> {
        if self.paused || self.state.phase == SessionPhase::Completed {
            return Vec::new();
        }

        let mut events = Vec::new();
        let physics = &self.config.physics;
        let state = &mut self.state;
        state.ticks += 1;

        if input.cycle_shape {
            state.appearance.shape = state.appearance.shape.next();
        }

        jump::buffer_jump_intent(&mut state.body, input.jump_pressed, physics, dt);
        physics::integrate(&mut state.body, input.horizontal, physics, dt);
        state
            .appearance
            .roll(state.body.vx, dt, physics.body_radius());

        collision::resolve_body(&mut state.body, state.level.platforms(), physics);
        jump::update_coyote(&mut state.body, physics, dt);
        if jump::try_jump(&mut state.body, physics) {
            tracing::debug!(x = state.body.x, y = state.body.y, "Jump");
            events.push(GameEvent::Jumped);
        }

        if state.body.y > state.level.death_y() {
            tracing::debug!(
                level = state.level_number,
                x = state.body.x,
                "Fell past the death plane, respawning"
            );
            state
                .body
                .respawn(state.level.start_x(), state.level.start_y());
            state.deaths += 1;
            events.push(GameEvent::Died {
                level: state.level_number,
            });
        }

        if state.level.in_goal(&state.body.aabb(physics)) {
            self.reach_goal(&mut events);
        }

        let physics = &self.config.physics;
        let state = &mut self.state;
        let target = CameraTarget {
            center_x: state.body.center_x(physics),
            center_y: state.body.center_y(physics),
            level_width: state.level.width(),
            level_height: state.level.height(),
            screen_width: self.config.screen_width,
            screen_height: self.config.screen_height,
        };
        state
            .camera
            .update(&target, self.config.camera_follow_speed);

        events
    }

    stepped_game_boilerplate!(state_type: PlatformerState);

    fn is_complete(&self) -> bool {
        self.state.phase == SessionPhase::Completed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    Config(ConfigError),
    Level(LevelError),
    NoLevels,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Level(e) => write!(f, "{e}"),
            Self::NoLevels => write!(f, "a session needs at least one level"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<LevelError> for SessionError {
    fn from(e: LevelError) -> Self {
        Self::Level(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HorizontalIntent;
    use ledgehop_core::test_helpers::{
        contract_bad_state_ignored, contract_pause_stops_updates,
        contract_state_roundtrip_preserves, contract_update_advances_state, run_idle_ticks,
    };

    fn session() -> PlatformerSession {
        PlatformerSession::new(PlatformerConfig::default()).unwrap()
    }

    fn idle() -> PlatformerInput {
        PlatformerInput::default()
    }

    #[test]
    fn starts_at_first_spawn() {
        let game = session();
        let level = level_table(1, 1280, 720).unwrap();
        assert_eq!(game.state.level_number, 1);
        assert_eq!(game.state.body, Body::new(level.start_x(), level.start_y()));
        assert_eq!(game.state.phase, SessionPhase::Playing);
        assert_eq!(game.level_count(), 3);
    }

    #[test]
    fn settles_on_first_step() {
        let mut game = session();
        run_idle_ticks(&mut game, 60);
        // Spawn hovers 4 units above the step at y=1352.
        assert_eq!(game.state.body.y, 1352.0 - 28.0);
        assert!(game.state.body.grounded);
        assert!(game.state.body.coyote_time > 0.0);
    }

    #[test]
    fn grounded_press_jumps() {
        let mut game = session();
        run_idle_ticks(&mut game, 60);
        let events = game.tick(&PlatformerInput {
            jump_pressed: true,
            ..Default::default()
        });
        assert_eq!(events, vec![GameEvent::Jumped]);
        assert_eq!(game.state.body.vy, physics::JUMP_VELOCITY);
        assert!(!game.state.body.grounded);

        let events = game.tick(&idle());
        assert!(events.is_empty(), "A single press jumps once");
        assert!(game.state.body.y < 1324.0, "Body rises after the jump");
    }

    #[test]
    fn falling_past_death_plane_respawns() {
        let mut game = session();
        game.state.body.vx = 50.0;
        game.state.body.vy = 300.0;
        // A pending buffer without coyote time cannot fire, so only the death is reported.
        game.state.body.jump_buffer = 0.05;
        let death_y = game.state.level.death_y();
        game.place_body(700.0, death_y + 1.0);

        let events = game.tick(&idle());

        assert_eq!(events, vec![GameEvent::Died { level: 1 }]);
        let body = game.state.body;
        assert_eq!((body.x, body.y), (64.0, 1320.0));
        assert_eq!((body.vx, body.vy), (0.0, 0.0));
        assert_eq!((body.coyote_time, body.jump_buffer), (0.0, 0.0));
        assert!(!body.grounded);
        assert_eq!(game.state.deaths, 1);
    }

    #[test]
    fn goal_advances_to_next_level() {
        let mut game = session();
        // Standing on the goal deck (top 1192) inside the goal box.
        game.place_body(5030.0, 1192.0 - 28.0);

        let events = game.tick(&idle());

        assert_eq!(events, vec![GameEvent::LevelComplete { level: 1 }]);
        assert_eq!(game.state.level_number, 2);
        let level2 = level_table(2, 1280, 720).unwrap();
        assert_eq!(game.state.level, level2);
        assert_eq!(
            (game.state.body.x, game.state.body.y),
            (level2.start_x(), level2.start_y())
        );
        // Camera restarts at the origin, then eases once toward the new spawn.
        let cfg = &game.config.physics;
        let mut expected = Camera::new();
        expected.update(
            &CameraTarget {
                center_x: game.state.body.center_x(cfg),
                center_y: game.state.body.center_y(cfg),
                level_width: level2.width(),
                level_height: level2.height(),
                screen_width: 1280,
                screen_height: 720,
            },
            physics::CAMERA_FOLLOW_SPEED,
        );
        assert_eq!(game.state.camera, expected);
    }

    #[test]
    fn last_goal_completes_session_and_freezes() {
        let mut game = session();
        game.load_level(3).unwrap();
        // Goal block top is 1282.
        game.place_body(5030.0, 1282.0 - 28.0);

        let events = game.tick(&idle());
        assert_eq!(
            events,
            vec![
                GameEvent::LevelComplete { level: 3 },
                GameEvent::SessionComplete
            ]
        );
        assert!(game.is_complete());

        let frozen = game.serialize_state();
        let events = game.tick(&PlatformerInput {
            horizontal: HorizontalIntent::Right,
            jump_pressed: true,
            cycle_shape: true,
        });
        assert!(events.is_empty());
        assert_eq!(frozen, game.serialize_state(), "Completed session is frozen");
    }

    #[test]
    fn load_level_rejects_unknown_numbers() {
        let mut game = session();
        assert_eq!(game.load_level(0), Err(LevelError::UnknownLevel(0)));
        assert_eq!(game.load_level(4), Err(LevelError::UnknownLevel(4)));
        assert_eq!(game.state.level_number, 1);
    }

    #[test]
    fn load_level_resets_body_and_camera() {
        let mut game = session();
        run_idle_ticks(&mut game, 30);
        game.state.camera = Camera { x: 10.0, y: 20.0 };
        game.load_level(2).unwrap();
        assert_eq!(game.state.level_number, 2);
        assert_eq!(game.state.camera, Camera::new());
        assert_eq!(game.state.body.vy, 0.0);
    }

    #[test]
    fn shape_cycles_without_touching_physics() {
        let mut a = session();
        let mut b = session();
        let cycle = PlatformerInput {
            cycle_shape: true,
            ..Default::default()
        };
        a.tick(&cycle);
        b.tick(&idle());
        assert_eq!(a.state.appearance.shape, appearance::PlayerShape::Triangle);
        assert_eq!(a.state.body, b.state.body);
    }

    #[test]
    fn empty_level_list_rejected() {
        let err = PlatformerSession::with_levels(PlatformerConfig::default(), vec![])
            .err()
            .unwrap();
        assert_eq!(err, SessionError::NoLevels);
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = PlatformerConfig::default();
        config.physics.max_passes = 0;
        assert!(matches!(
            PlatformerSession::new(config),
            Err(SessionError::Config(_))
        ));
    }

    #[test]
    fn runaway_gravity_rejected() {
        let mut config = PlatformerConfig::default();
        config.physics.gravity = 1.0e38;
        assert!(matches!(
            PlatformerSession::new(config),
            Err(SessionError::Config(_))
        ));
    }

    #[test]
    fn strongest_allowed_gravity_never_panics() {
        let mut config = PlatformerConfig::default();
        config.physics.gravity = physics::MAX_PHYSICS_MAGNITUDE;
        config.physics.move_speed = physics::MAX_PHYSICS_MAGNITUDE;
        let mut game = PlatformerSession::new(config).unwrap();
        let right = PlatformerInput {
            horizontal: HorizontalIntent::Right,
            ..Default::default()
        };
        for _ in 0..120 {
            game.tick(&right);
            assert!(game.state.body.y <= game.state.level.death_y());
        }
    }

    #[test]
    fn tick_rate_follows_config() {
        let game = session();
        assert_eq!(game.tick_rate(), 60.0);
        assert_eq!(game.metadata().level_count, 3);
    }

    // ================================================================
    // SteppedGame contract tests
    // ================================================================

    #[test]
    fn contract_update_advances() {
        contract_update_advances_state(&mut session());
    }

    #[test]
    fn contract_roundtrip() {
        let mut game = session();
        run_idle_ticks(&mut game, 10);
        contract_state_roundtrip_preserves(&mut game);
    }

    #[test]
    fn contract_bad_state() {
        contract_bad_state_ignored(&mut session());
    }

    #[test]
    fn contract_pause() {
        contract_pause_stops_updates(&mut session());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_input() -> impl Strategy<Value = PlatformerInput> {
            (0u8..3, any::<bool>(), any::<bool>()).prop_map(|(dir, jump_pressed, cycle_shape)| {
                PlatformerInput {
                    horizontal: match dir {
                        0 => HorizontalIntent::Left,
                        1 => HorizontalIntent::Right,
                        _ => HorizontalIntent::None,
                    },
                    jump_pressed,
                    cycle_shape,
                }
            })
        }

        proptest! {
            #[test]
            fn body_stays_above_death_plane(
                level in 1u8..=3,
                inputs in proptest::collection::vec(arb_input(), 50..300)
            ) {
                let mut game = session();
                game.load_level(level).unwrap();
                for input in &inputs {
                    game.tick(input);
                    let body = game.state.body;
                    prop_assert!(body.x.is_finite() && body.y.is_finite());
                    prop_assert!(body.y <= game.state.level.death_y());
                    prop_assert!(body.coyote_time >= 0.0 && body.jump_buffer >= 0.0);
                    prop_assert!((1..=3).contains(&game.state.level_number));
                }
            }

            #[test]
            fn snapshot_replay_is_deterministic(
                inputs in proptest::collection::vec(arb_input(), 20..120)
            ) {
                let mut a = session();
                let mut b = session();
                let (first, second) = inputs.split_at(inputs.len() / 2);
                for input in first {
                    a.tick(input);
                }
                b.apply_state(&a.serialize_state());
                for input in second {
                    a.tick(input);
                    b.tick(input);
                }
                prop_assert_eq!(a.state(), b.state());
            }
        }
    }
}
