//! Multi-pass AABB resolution against static platforms.
//!
//! Each overlap is pushed out along the axis of least penetration (a minimum
//! translation vector, not a swept test), so a body moving faster than a
//! platform is thick can pass through it. Corrections snap to integer
//! platform edges and the output position is always the corrected AABB's
//! min corner.

use serde::{Deserialize, Serialize};

use ledgehop_core::geom::Rect;

use crate::physics::{Body, PhysicsConfig};

/// Corrected kinematic state produced by [`resolve_collisions`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// True if any correction in any pass landed the body on a platform top.
    pub grounded: bool,
    /// Passes actually run, at most the configured maximum.
    pub passes: u32,
    /// True if the final pass found nothing to correct.
    pub converged: bool,
}

/// Which way a single overlap is pushed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Push {
    Left,
    Right,
    Up,
    Down,
}

/// Choose the push for an overlapping pair.
///
/// Horizontal is the default; a vertical overlap wins only when strictly
/// smaller. Within an axis the direction ties go right and down.
fn choose_push(body: &Rect, plat: &Rect) -> Push {
    let overlap_left = body.max_x.saturating_sub(plat.min_x);
    let overlap_right = plat.max_x.saturating_sub(body.min_x);
    let overlap_up = body.max_y.saturating_sub(plat.min_y);
    let overlap_down = plat.max_y.saturating_sub(body.min_y);

    let mut min_overlap = overlap_left;
    let mut vertical = false;
    if overlap_right < min_overlap {
        min_overlap = overlap_right;
    }
    if overlap_up < min_overlap {
        min_overlap = overlap_up;
        vertical = true;
    }
    if overlap_down < min_overlap {
        vertical = true;
    }

    match (vertical, overlap_left < overlap_right, overlap_up < overlap_down) {
        (false, true, _) => Push::Left,
        (false, false, _) => Push::Right,
        (true, _, true) => Push::Up,
        (true, _, false) => Push::Down,
    }
}

/// Zero-depth contact with a platform's top surface while not moving upward.
fn resting_on(body: &Rect, plat: &Rect, vy: f32) -> bool {
    vy >= 0.0 && body.max_y == plat.min_y && body.min_x < plat.max_x && body.max_x > plat.min_x
}

/// Resolve `aabb` against every platform, in stored order, for up to `max_passes`
/// passes. Stops early once a pass corrects nothing. Residual overlap after the
/// last pass is returned as is.
pub fn resolve_collisions(
    platforms: &[Rect],
    aabb: Rect,
    vx: f32,
    vy: f32,
    max_passes: u32,
) -> Resolution {
    let (w, h) = (aabb.width(), aabb.height());
    let (mut x, mut y) = (aabb.min_x, aabb.min_y);
    let (mut vx, mut vy) = (vx, vy);
    let mut grounded = false;
    let mut passes = 0;
    let mut converged = false;

    while passes < max_passes {
        passes += 1;
        let mut any_resolved = false;

        for plat in platforms {
            let rect = Rect::from_origin(x, y, w, h);
            if !rect.overlaps(plat) {
                if resting_on(&rect, plat, vy) {
                    grounded = true;
                }
                continue;
            }

            match choose_push(&rect, plat) {
                Push::Left => {
                    x = plat.min_x.saturating_sub(w);
                    vx = 0.0;
                },
                Push::Right => {
                    x = plat.max_x;
                    vx = 0.0;
                },
                Push::Up => {
                    y = plat.min_y.saturating_sub(h);
                    vy = 0.0;
                    grounded = true;
                },
                Push::Down => {
                    y = plat.max_y;
                    vy = 0.0;
                },
            }
            any_resolved = true;
        }

        if !any_resolved {
            converged = true;
            break;
        }
    }

    Resolution {
        x: x as f32,
        y: y as f32,
        vx,
        vy,
        grounded,
        passes,
        converged,
    }
}

/// Resolve `body` in place against `platforms`, overwriting its position,
/// velocity, and `grounded` flag.
pub fn resolve_body(body: &mut Body, platforms: &[Rect], physics: &PhysicsConfig) -> Resolution {
    let res = resolve_collisions(
        platforms,
        body.aabb(physics),
        body.vx,
        body.vy,
        physics.max_passes,
    );
    body.x = res.x;
    body.y = res.y;
    body.vx = res.vx;
    body.vy = res.vy;
    body.grounded = res.grounded;
    if !res.converged {
        tracing::trace!(
            x = res.x,
            y = res.y,
            passes = res.passes,
            "Collision resolution hit the pass cap"
        );
    }
    res
}
