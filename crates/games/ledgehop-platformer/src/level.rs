use serde::{Deserialize, Serialize};

use ledgehop_core::geom::Rect;

/// Number of baked levels.
pub const LEVEL_COUNT: u8 = 3;

/// Height of the ground slab at the bottom of every baked level.
const FLOOR_THICKNESS: i32 = 48;
/// How far below the floor top the death plane sits.
const DEATH_PLANE_DEPTH: i32 = 100;

/// Static geometry for one level.
///
/// Immutable after construction. Platform order is the resolution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    platforms: Vec<Rect>,
    goal: Rect,
    width: i32,
    height: i32,
    start_x: f32,
    start_y: f32,
    death_y: f32,
}

impl Level {
    pub fn new(
        platforms: Vec<Rect>,
        goal: Rect,
        width: i32,
        height: i32,
        (start_x, start_y): (f32, f32),
        death_y: f32,
    ) -> Self {
        Self {
            platforms,
            goal,
            width,
            height,
            start_x,
            start_y,
            death_y,
        }
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    pub fn goal(&self) -> Rect {
        self.goal
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn start_x(&self) -> f32 {
        self.start_x
    }

    pub fn start_y(&self) -> f32 {
        self.start_y
    }

    /// A body whose `y` exceeds this has fallen out of the world.
    pub fn death_y(&self) -> f32 {
        self.death_y
    }

    /// True if `aabb` strictly overlaps the goal; touching an edge does not count.
    pub fn in_goal(&self, aabb: &Rect) -> bool {
        aabb.overlaps(&self.goal)
    }

    /// Check the level invariants: geometry inside the world (the vertical extent
    /// may reach down to the death plane) and a spawn that overlaps no platform.
    pub fn validate(&self, body_width: i32, body_height: i32) -> Result<(), LevelError> {
        let floor_limit = self.height.max(self.death_y.ceil() as i32);
        let world = Rect::new(0, 0, self.width, floor_limit);

        if let Some((index, _)) = self
            .platforms
            .iter()
            .enumerate()
            .find(|(_, p)| !world.contains_rect(p))
        {
            return Err(LevelError::PlatformOutOfBounds { index });
        }
        if !world.contains_rect(&self.goal) {
            return Err(LevelError::GoalOutOfBounds);
        }

        let spawn = Rect::from_origin(
            self.start_x as i32,
            self.start_y as i32,
            body_width,
            body_height,
        );
        if let Some(index) = self.platforms.iter().position(|p| p.overlaps(&spawn)) {
            return Err(LevelError::SpawnOverlapsPlatform { index });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    PlatformOutOfBounds { index: usize },
    GoalOutOfBounds,
    SpawnOverlapsPlatform { index: usize },
    UnknownLevel(u8),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlatformOutOfBounds { index } => {
                write!(f, "platform {index} lies outside the world bounds")
            },
            Self::GoalOutOfBounds => write!(f, "goal lies outside the world bounds"),
            Self::SpawnOverlapsPlatform { index } => {
                write!(f, "spawn point overlaps platform {index}")
            },
            Self::UnknownLevel(n) => write!(f, "no level numbered {n}"),
        }
    }
}

impl std::error::Error for LevelError {}

/// Build baked level `number` (1-based) for the given screen size.
pub fn level_table(number: u8, screen_w: i32, screen_h: i32) -> Result<Level, LevelError> {
    match number {
        1 => Ok(first_level(screen_w, screen_h)),
        2 => Ok(second_level(screen_w, screen_h)),
        3 => Ok(third_level(screen_w, screen_h)),
        n => Err(LevelError::UnknownLevel(n)),
    }
}

/// World size for a screen: four screens wide, two tall.
fn world_size(screen_w: i32, screen_h: i32) -> (i32, i32) {
    (screen_w * 4, screen_h * 2)
}

/// Obstacle course: steps, a staircase, a narrow ledge, and a raised goal deck.
pub fn first_level(screen_w: i32, screen_h: i32) -> Level {
    let (w, h) = world_size(screen_w, screen_h);
    let fy = h - FLOOR_THICKNESS;

    let platforms = vec![
        // Ground
        Rect::new(0, fy, w, h),
        // Starting area and first obstacles
        Rect::new(80, fy - 40, 200, fy),
        Rect::new(240, fy - 120, 360, fy - 40),
        Rect::new(400, fy - 80, 520, fy),
        Rect::new(560, fy - 160, 640, fy - 80),
        // Gap then platform
        Rect::new(680, fy - 200, 800, fy - 80),
        Rect::new(820, fy - 120, 960, fy),
        // Stairs up
        Rect::new(1000, fy - 40, 1100, fy),
        Rect::new(1080, fy - 100, 1180, fy - 40),
        Rect::new(1160, fy - 160, 1260, fy - 100),
        Rect::new(1240, fy - 220, 1340, fy - 160),
        // Narrow ledge
        Rect::new(1380, fy - 260, 1480, fy - 200),
        // Drop and climb
        Rect::new(1540, fy - 180, 1660, fy - 100),
        Rect::new(1620, fy - 280, 1760, fy - 180),
        // Final approach
        Rect::new(1820, fy - 120, 1980, fy),
        Rect::new(2000, fy - 200, 2120, fy - 80),
        Rect::new(2180, fy - 280, 2300, fy - 160),
        // Goal deck
        Rect::new(2360, fy - 200, w, fy),
    ];

    Level::new(
        platforms,
        Rect::new(w - 120, fy - 220, w - 24, fy - 120),
        w,
        h,
        // Just above the first small step
        (64.0, (fy - 40 - 32) as f32),
        (fy + DEATH_PLANE_DEPTH) as f32,
    )
}

/// Broken ground: four pits, some bridged by stepping stones.
pub fn second_level(screen_w: i32, screen_h: i32) -> Level {
    let (w, h) = world_size(screen_w, screen_h);
    let fy = h - FLOOR_THICKNESS;

    let platforms = vec![
        Rect::new(0, fy, 640, h),
        Rect::new(240, fy - 60, 400, fy - 40),
        Rect::new(480, fy - 120, 600, fy - 100),
        // Pit
        Rect::new(800, fy, 1400, h),
        Rect::new(900, fy - 70, 1040, fy - 50),
        Rect::new(1120, fy - 130, 1260, fy - 110),
        Rect::new(1360, fy - 80, 1480, fy - 60),
        // Pit, walls to hop
        Rect::new(1560, fy, 2300, h),
        Rect::new(1700, fy - 50, 1760, fy),
        Rect::new(1840, fy - 100, 1960, fy),
        // Pit with a stepping stone
        Rect::new(2340, fy - 60, 2460, fy - 40),
        Rect::new(2500, fy, 3400, h),
        Rect::new(2700, fy - 80, 2820, fy - 60),
        Rect::new(2900, fy - 150, 3020, fy - 130),
        Rect::new(3100, fy - 80, 3220, fy - 60),
        // Widest pit
        Rect::new(3460, fy - 40, 3540, fy - 20),
        Rect::new(3600, fy, w, h),
    ];

    Level::new(
        platforms,
        Rect::new(w - 160, fy - 100, w - 64, fy),
        w,
        h,
        (64.0, (fy - 32) as f32),
        (fy + DEATH_PLANE_DEPTH) as f32,
    )
}

/// Two ledge climbs over open air, with a rest stop of solid ground between.
pub fn third_level(screen_w: i32, screen_h: i32) -> Level {
    let (w, h) = world_size(screen_w, screen_h);
    let fy = h - FLOOR_THICKNESS;

    let platforms = vec![
        Rect::new(0, fy, 480, h),
        // First climb
        Rect::new(600, fy - 60, 720, fy - 40),
        Rect::new(820, fy - 130, 940, fy - 110),
        Rect::new(1040, fy - 200, 1160, fy - 180),
        Rect::new(1260, fy - 270, 1380, fy - 250),
        Rect::new(1500, fy - 200, 1620, fy - 180),
        Rect::new(1740, fy - 130, 1860, fy - 110),
        // Rest stop
        Rect::new(1980, fy, 2600, h),
        Rect::new(2200, fy - 40, 2600, fy),
        // Second climb
        Rect::new(2700, fy - 110, 2800, fy - 90),
        Rect::new(2920, fy - 180, 3040, fy - 160),
        Rect::new(3160, fy - 250, 3280, fy - 230),
        Rect::new(3400, fy - 320, 3520, fy - 300),
        Rect::new(3640, fy - 250, 3760, fy - 230),
        Rect::new(3880, fy - 180, 4000, fy - 160),
        // Goal block
        Rect::new(4120, fy - 110, w, fy),
    ];

    Level::new(
        platforms,
        Rect::new(w - 120, fy - 210, w - 24, fy - 110),
        w,
        h,
        (64.0, (fy - 32) as f32),
        (fy + DEATH_PLANE_DEPTH) as f32,
    )
}
