use ledgehop_platformer::input::HeldKeys;
use ledgehop_platformer::physics::Body;

/// Ticks without forward progress before the autopilot hops.
const STALL_TICKS: u32 = 3;
/// How long the jump key stays down per hop.
const JUMP_HOLD_TICKS: u32 = 18;
/// Cycle the player shape this often.
const SHAPE_CYCLE_TICKS: u64 = 600;

/// Scripted held-key source: run right, hop when progress stalls.
#[derive(Debug, Default)]
pub struct Autopilot {
    last_x: f32,
    stalled_ticks: u32,
    jump_hold: u32,
    ticks: u64,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&mut self, body: &Body) -> HeldKeys {
        self.ticks += 1;
        if body.x <= self.last_x {
            self.stalled_ticks += 1;
        } else {
            self.stalled_ticks = 0;
        }
        self.last_x = body.x;

        if self.jump_hold > 0 {
            self.jump_hold -= 1;
        } else if body.grounded && self.stalled_ticks >= STALL_TICKS {
            self.jump_hold = JUMP_HOLD_TICKS;
            self.stalled_ticks = 0;
        }

        HeldKeys {
            left: false,
            right: true,
            jump: self.jump_hold > 0,
            cycle_shape: self.ticks % SHAPE_CYCLE_TICKS == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded_at(x: f32) -> Body {
        Body {
            grounded: true,
            ..Body::new(x, 0.0)
        }
    }

    #[test]
    fn runs_right_while_progressing() {
        let mut pilot = Autopilot::new();
        for i in 1..=20 {
            let keys = pilot.keys(&grounded_at(i as f32 * 4.0));
            assert!(keys.right && !keys.left);
            assert!(!keys.jump);
        }
    }

    #[test]
    fn hops_when_blocked() {
        let mut pilot = Autopilot::new();
        pilot.keys(&grounded_at(100.0));
        let held: Vec<bool> = (0..STALL_TICKS + 1)
            .map(|_| pilot.keys(&grounded_at(100.0)).jump)
            .collect();
        assert_eq!(held.last(), Some(&true), "Stalled on the ground, so jump");
    }

    #[test]
    fn jump_key_is_released_between_hops() {
        let mut pilot = Autopilot::new();
        let mut saw_release = false;
        let mut was_held = false;
        for _ in 0..100 {
            let jump = pilot.keys(&grounded_at(50.0)).jump;
            if was_held && !jump {
                saw_release = true;
            }
            was_held = jump;
        }
        assert!(saw_release, "Held jump must end so the next hop is a fresh edge");
    }

    #[test]
    fn no_hop_while_airborne() {
        let mut pilot = Autopilot::new();
        for _ in 0..10 {
            assert!(!pilot.keys(&Body::new(0.0, 0.0)).jump);
        }
    }
}
