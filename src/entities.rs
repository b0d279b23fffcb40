/// All game entity types — pure data, no logic.

use crate::assets::SpriteSet;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A world-space coordinate, in pixels from the top-left of the play field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned box anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Point-in-rectangle test.  The left/top edges are inside, the
    /// right/bottom edges are not.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// Which image an entity is currently showing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageRef {
    pub set: SpriteSet,
    pub index: usize,
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum ObstacleKind {
    Small,
    Large,
    /// Cycles through its image sequence; `frames` counts draws since spawn.
    Flying { frames: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub image: ImageRef,
    pub rect: Rect,
}

// ── Avatar ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AvatarState {
    Running,
    Ducking,
    Jumping,
}

/// The four hit-point coordinates used for collision instead of the sprite box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitPoints {
    pub front: Point,
    pub front_crouching: Point,
    pub bottom: Point,
    pub tail: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Avatar {
    pub state: AvatarState,
    pub image: ImageRef,
    pub rect: Rect,
    /// Vertical velocity while airborne; reset to the launch value on landing.
    pub jump_velocity: f32,
    /// Animation counter, bumped on every state-behaviour call.
    pub step: u32,
    pub hit_points: HitPoints,
}

// ── Scenery ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Cloud {
    pub x: i32,
    pub y: i32,
    pub width: i32,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// The keys the simulation cares about, sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub jump: bool,
    pub duck: bool,
}

// ── Master session state ──────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// The avatar hit an obstacle; the session is over.
    Crashed,
}

/// Everything one play attempt owns.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub avatar: Avatar,
    pub cloud: Cloud,
    /// Active obstacles; a new one is spawned only when this is empty.
    pub obstacles: Vec<Obstacle>,
    pub score: i32,
    pub speed: i32,
    /// Horizontal offset of the tiled track image.
    pub background_x: i32,
    pub status: GameStatus,
    pub frame: u64,
}
