/// Gameplay tunables.  Everything the simulation needs to know about the
/// play field lives here and is handed to a session at construction.

use std::time::Duration;

// ── World geometry (pixels) ──────────────────────────────────────────────────

pub const FIELD_WIDTH: i32 = 1100;
pub const FIELD_HEIGHT: i32 = 600;

/// Top edge of the scrolling track.
pub const TRACK_Y: i32 = 380;

/// Fixed vertical placement of each obstacle kind.
pub const SMALL_OBSTACLE_Y: i32 = 325;
pub const LARGE_OBSTACLE_Y: i32 = 300;
pub const FLYING_OBSTACLE_Y: i32 = 250;

// ── Pacing ───────────────────────────────────────────────────────────────────

pub const TICKS_PER_SECOND: u32 = 30;
pub const BASE_SPEED: i32 = 15;
pub const MAX_SPEED: i32 = 40;
/// Speed goes up by one every time the score reaches a multiple of this.
pub const SPEED_STEP_POINTS: i32 = 100;
pub const COLLISION_PAUSE_MS: u64 = 2000;

// ── Cloud ────────────────────────────────────────────────────────────────────

/// Offset past the right edge for the first appearance.
pub const CLOUD_FIRST_SPAWN: (i32, i32) = (800, 1000);
/// Offset past the right edge for every later respawn.
pub const CLOUD_RESPAWN: (i32, i32) = (2500, 3000);
pub const CLOUD_Y_RANGE: (i32, i32) = (50, 100);

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub field_width: i32,
    pub field_height: i32,
    pub track_y: i32,
    pub small_obstacle_y: i32,
    pub large_obstacle_y: i32,
    pub flying_obstacle_y: i32,
    pub ticks_per_second: u32,
    pub base_speed: i32,
    pub max_speed: i32,
    pub speed_step_points: i32,
    pub collision_pause: Duration,
    pub cloud_first_spawn: (i32, i32),
    pub cloud_respawn: (i32, i32),
    pub cloud_y_range: (i32, i32),
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            track_y: TRACK_Y,
            small_obstacle_y: SMALL_OBSTACLE_Y,
            large_obstacle_y: LARGE_OBSTACLE_Y,
            flying_obstacle_y: FLYING_OBSTACLE_Y,
            ticks_per_second: TICKS_PER_SECOND,
            base_speed: BASE_SPEED,
            max_speed: MAX_SPEED,
            speed_step_points: SPEED_STEP_POINTS,
            collision_pause: Duration::from_millis(COLLISION_PAUSE_MS),
            cloud_first_spawn: CLOUD_FIRST_SPAWN,
            cloud_respawn: CLOUD_RESPAWN,
            cloud_y_range: CLOUD_Y_RANGE,
        }
    }
}

impl GameConfig {
    /// Length of one tick at the configured rate (≈33 ms at 30 Hz).
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(1000 / self.ticks_per_second.max(1) as u64)
    }
}
