use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Core trait for a single-body game advanced at a fixed timestep.
///
/// The host owns the clock and input devices; the game only handles
/// simulation and exposes its state as an opaque snapshot.
pub trait SteppedGame {
    /// Per-tick intent consumed by `update`.
    type Input;

    /// Game metadata for menus and logs.
    fn metadata(&self) -> GameMetadata;

    /// Called once per tick with the fixed timestep and this tick's intent.
    fn update(&mut self, dt: f32, input: &Self::Input) -> Vec<GameEvent>;

    /// Serialize the full simulation state.
    fn serialize_state(&self) -> Vec<u8>;

    /// Restore a snapshot produced by `serialize_state`. Undecodable bytes are ignored.
    fn apply_state(&mut self, state: &[u8]);

    /// Simulation tick rate in Hz.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    /// Freeze updates until `resume`.
    fn pause(&mut self);

    fn resume(&mut self);

    /// Whether the session has reached its terminal state.
    fn is_complete(&self) -> bool;
}

/// Game metadata for menus and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub level_count: u8,
    pub estimated_duration: Duration,
}

/// Events emitted by a game during update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The body left the ground with jump velocity.
    Jumped,
    /// The body fell past the death plane and was returned to spawn.
    Died { level: u8 },
    /// The goal of `level` was reached. Followed by `SessionComplete` after the last level.
    LevelComplete { level: u8 },
    /// The goal of the last level was reached; updates are frozen from now on.
    SessionComplete,
}

/// Generates the `SteppedGame` methods that are identical across games:
/// `serialize_state`, `apply_state`, `pause`, `resume`.
///
/// Requires the implementing struct to have `state: $StateType` and `paused: bool` fields.
#[macro_export]
macro_rules! stepped_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("game state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            match rmp_serde::from_slice::<$StateType>(state) {
                Ok(s) => self.state = s,
                Err(e) => tracing::warn!("Ignoring undecodable state snapshot: {e}"),
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }
    };
}
