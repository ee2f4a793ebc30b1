//! Jump assist: coyote time and jump buffering layered over `Body::grounded`.
//!
//! Per tick the controller calls, in order: [`buffer_jump_intent`] before
//! integration, [`update_coyote`] after collision resolution, then [`try_jump`].

use crate::physics::{Body, PhysicsConfig};

/// Record a jump press edge and age the buffer by one tick.
///
/// A press refills the buffer, so a jump pressed shortly before landing still
/// fires on the landing tick.
pub fn buffer_jump_intent(body: &mut Body, jump_pressed: bool, physics: &PhysicsConfig, dt: f32) {
    if jump_pressed {
        body.jump_buffer = physics.jump_buffer_max;
    }
    body.jump_buffer = (body.jump_buffer - dt).max(0.0);
}

/// Refill coyote time while grounded, otherwise drain it.
pub fn update_coyote(body: &mut Body, physics: &PhysicsConfig, dt: f32) {
    if body.grounded {
        body.coyote_time = physics.coyote_time_max;
    } else {
        body.coyote_time = (body.coyote_time - dt).max(0.0);
    }
}

/// Whether a buffered jump would fire right now.
pub fn can_jump(body: &Body) -> bool {
    body.jump_buffer > 0.0 && (body.grounded || body.coyote_time > 0.0)
}

/// Fire a buffered jump if allowed. Consumes both windows, so a single press
/// jumps at most once.
pub fn try_jump(body: &mut Body, physics: &PhysicsConfig) -> bool {
    if !can_jump(body) {
        return false;
    }
    body.vy = physics.jump_velocity;
    body.grounded = false;
    body.coyote_time = 0.0;
    body.jump_buffer = 0.0;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{COYOTE_TIME_MAX, JUMP_VELOCITY};

    const DT: f32 = 1.0 / 60.0;

    /// One tick of the timer machine with the resolver's verdict supplied directly.
    fn tick(body: &mut Body, physics: &PhysicsConfig, grounded: bool, jump_pressed: bool) -> bool {
        buffer_jump_intent(body, jump_pressed, physics, DT);
        body.grounded = grounded;
        update_coyote(body, physics, DT);
        try_jump(body, physics)
    }

    #[test]
    fn grounded_press_jumps_immediately() {
        let physics = PhysicsConfig::default();
        let mut body = Body::new(0.0, 0.0);
        assert!(tick(&mut body, &physics, true, true));
        assert_eq!(body.vy, JUMP_VELOCITY);
        assert!(!body.grounded);
        assert_eq!(body.coyote_time, 0.0);
        assert_eq!(body.jump_buffer, 0.0);
    }

    #[test]
    fn no_press_no_jump() {
        let physics = PhysicsConfig::default();
        let mut body = Body::new(0.0, 0.0);
        for _ in 0..10 {
            assert!(!tick(&mut body, &physics, true, false));
        }
        assert_eq!(body.coyote_time, COYOTE_TIME_MAX);
    }

    #[test]
    fn coyote_window_allows_late_jump() {
        let physics = PhysicsConfig::default();
        let mut body = Body::new(0.0, 0.0);
        tick(&mut body, &physics, true, false);
        // Two airborne ticks after walking off the ledge, then press.
        tick(&mut body, &physics, false, false);
        tick(&mut body, &physics, false, false);
        assert!(body.coyote_time > 0.0);
        assert!(tick(&mut body, &physics, false, true), "Jump inside coyote window");
    }

    #[test]
    fn coyote_window_expires() {
        let physics = PhysicsConfig::default();
        let mut body = Body::new(0.0, 0.0);
        tick(&mut body, &physics, true, false);
        // 0.12 s is 7.2 ticks; ten airborne ticks is well past it.
        for _ in 0..10 {
            tick(&mut body, &physics, false, false);
        }
        assert_eq!(body.coyote_time, 0.0);
        assert!(!tick(&mut body, &physics, false, true), "Coyote window is over");
    }

    #[test]
    fn buffered_press_fires_on_landing() {
        let physics = PhysicsConfig::default();
        let mut body = Body::new(0.0, 0.0);
        assert!(!tick(&mut body, &physics, false, true), "Airborne press alone");
        tick(&mut body, &physics, false, false);
        tick(&mut body, &physics, false, false);
        assert!(body.jump_buffer > 0.0);
        assert!(tick(&mut body, &physics, true, false), "Landing honors the buffer");
        assert_eq!(body.vy, JUMP_VELOCITY);
    }

    #[test]
    fn expired_buffer_does_not_fire_on_landing() {
        let physics = PhysicsConfig::default();
        let mut body = Body::new(0.0, 0.0);
        tick(&mut body, &physics, false, true);
        // 0.1 s is 6 ticks; land on the tenth.
        for _ in 0..9 {
            tick(&mut body, &physics, false, false);
        }
        assert_eq!(body.jump_buffer, 0.0);
        assert!(!tick(&mut body, &physics, true, false));
        assert_eq!(body.vy, 0.0);
    }

    #[test]
    fn jump_is_consumed_once() {
        let physics = PhysicsConfig::default();
        let mut body = Body::new(0.0, 0.0);
        assert!(tick(&mut body, &physics, true, true));
        assert!(!try_jump(&mut body, &physics), "Same tick retry must fail");
        assert!(!tick(&mut body, &physics, false, false), "Next tick must not re-jump");
    }

    #[test]
    fn consumed_jump_does_not_refire_on_ground() {
        let physics = PhysicsConfig::default();
        let mut body = Body::new(0.0, 0.0);
        assert!(tick(&mut body, &physics, true, true));
        // Even if the resolver reports ground again, the buffer is spent.
        assert!(!tick(&mut body, &physics, true, false));
    }

    #[test]
    fn timers_never_go_negative() {
        let physics = PhysicsConfig::default();
        let mut body = Body::new(0.0, 0.0);
        for _ in 0..100 {
            tick(&mut body, &physics, false, false);
        }
        assert_eq!(body.jump_buffer, 0.0);
        assert_eq!(body.coyote_time, 0.0);
    }
}
