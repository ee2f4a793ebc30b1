mod autopilot;

use std::time::Duration;

use serde::Serialize;
use tracing_subscriber::EnvFilter;

use ledgehop_core::game_trait::{GameEvent, SteppedGame};
use ledgehop_core::time::FixedTimestep;
use ledgehop_platformer::PlatformerSession;
use ledgehop_platformer::input::InputSampler;
use ledgehop_platformer::physics::PlatformerConfig;

use autopilot::Autopilot;

/// Simulated seconds to run when no argument is given.
const DEFAULT_RUN_SECS: u64 = 120;
/// Frame lengths cycled through to exercise the fixed-timestep accumulator.
const FRAME_PATTERN_MS: [u64; 4] = [16, 17, 16, 33];
/// Catch-up ticks allowed per frame before the backlog is dropped.
const MAX_TICKS_PER_FRAME: u32 = 3;

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    frames: u64,
    ticks: u64,
    jumps: u32,
    deaths: u32,
    levels_completed: u8,
    final_level: u8,
    completed: bool,
    final_x: f32,
    final_y: f32,
    /// Where a renderer would draw the body, in screen pixels.
    final_screen: (i32, i32),
    /// Leftover fraction of a tick at the end of the run.
    interpolation_alpha: f32,
}

impl RunSummary {
    fn record(&mut self, event: GameEvent) {
        match event {
            GameEvent::Jumped => self.jumps += 1,
            GameEvent::Died { level } => {
                self.deaths += 1;
                tracing::info!(level, "Died");
            },
            GameEvent::LevelComplete { level } => {
                self.levels_completed += 1;
                tracing::info!(level, "Level complete");
            },
            GameEvent::SessionComplete => tracing::info!("Session complete"),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let run_secs = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_RUN_SECS);

    let config = PlatformerConfig::load();
    let mut session = match PlatformerSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Cannot start session: {e}");
            std::process::exit(1);
        },
    };
    tracing::info!(run_secs, "Ledgehop headless run starting");

    let mut timestep =
        FixedTimestep::new(session.tick_rate()).with_max_ticks_per_frame(MAX_TICKS_PER_FRAME);
    let mut sampler = InputSampler::new();
    let mut pilot = Autopilot::new();
    let mut summary = RunSummary::default();
    let budget = Duration::from_secs(run_secs);
    let mut elapsed = Duration::ZERO;

    'frames: for frame_ms in FRAME_PATTERN_MS.iter().cycle() {
        if elapsed >= budget {
            break;
        }
        let frame = Duration::from_millis(*frame_ms);
        elapsed += frame;
        summary.frames += 1;

        for _ in 0..timestep.advance(frame) {
            let input = sampler.sample(pilot.keys(session.body()));
            for event in session.update(timestep.dt(), &input) {
                summary.record(event);
            }
            if session.is_complete() {
                break 'frames;
            }
        }
    }

    let state = session.state();
    summary.ticks = state.ticks;
    summary.final_level = state.level_number;
    summary.completed = session.is_complete();
    summary.final_x = state.body.x;
    summary.final_y = state.body.y;
    summary.final_screen = state.camera.world_to_screen(state.body.x, state.body.y);
    summary.interpolation_alpha = timestep.alpha();

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!("Failed to encode run summary: {e}"),
    }
}
