pub mod game_trait;
pub mod geom;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game_trait::{GameEvent, SteppedGame};

    /// Fixed timestep used by the contract tests.
    pub const TEST_DT: f32 = 1.0 / 60.0;

    /// Run N ticks with default input, returning all accumulated events.
    pub fn run_idle_ticks<G>(game: &mut G, n: usize) -> Vec<GameEvent>
    where
        G: SteppedGame,
        G::Input: Default,
    {
        let idle = G::Input::default();
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(TEST_DT, &idle));
        }
        all_events
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Every SteppedGame implementation should pass these. Game crates call
    // them from their own tests with a freshly constructed game.

    /// update() with dt>0 and idle input must change the simulation state.
    pub fn contract_update_advances_state<G>(game: &mut G)
    where
        G: SteppedGame,
        G::Input: Default,
    {
        let before = game.serialize_state();
        run_idle_ticks(game, 1);
        let after = game.serialize_state();
        assert_ne!(before, after, "update(dt>0) must advance game state");
    }

    /// serialize → apply → serialize must be stable.
    pub fn contract_state_roundtrip_preserves<G: SteppedGame>(game: &mut G) {
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        assert_eq!(
            state_a, state_b,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// Garbage snapshots must be ignored rather than corrupting state.
    pub fn contract_bad_state_ignored<G: SteppedGame>(game: &mut G) {
        let before = game.serialize_state();
        game.apply_state(&[0xc1, 0xff, 0x00]);
        assert_eq!(before, game.serialize_state());
    }

    /// pause() must freeze updates, resume() must unfreeze them.
    pub fn contract_pause_stops_updates<G>(game: &mut G)
    where
        G: SteppedGame,
        G::Input: Default,
    {
        game.pause();
        let before = game.serialize_state();
        let events = run_idle_ticks(game, 3);
        assert!(events.is_empty(), "No events may be emitted while paused");
        assert_eq!(
            before,
            game.serialize_state(),
            "State must not change while paused"
        );

        game.resume();
        run_idle_ticks(game, 1);
        assert_ne!(
            before,
            game.serialize_state(),
            "State must change after resume"
        );
    }
}
