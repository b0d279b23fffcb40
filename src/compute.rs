/// Pure game-logic functions.
///
/// Every public function takes immutable references to the current state and
/// the shared `GameContext` (and, where needed, an RNG handle) and returns a
/// brand-new value.  Side effects are limited to the injected RNG.

use log::debug;
use rand::Rng;

use crate::assets::{AssetTable, GameContext, SpriteSet};
use crate::avatar::{collides_with, new_avatar, update_avatar, FRAME_HOLD};
use crate::config::GameConfig;
use crate::entities::{
    Cloud, Controls, GameStatus, ImageRef, Obstacle, ObstacleKind, Rect, SessionState,
};

// ── Scrolling elements ───────────────────────────────────────────────────────

/// Shift a box left by `amount`.  No lower bound: the caller decides when an
/// element has left the field.
pub fn advance_rect(rect: &Rect, amount: i32) -> Rect {
    Rect {
        x: rect.x - amount as f32,
        ..*rect
    }
}

// ── Obstacles ────────────────────────────────────────────────────────────────

fn obstacle_set(kind: &ObstacleKind) -> SpriteSet {
    match kind {
        ObstacleKind::Small => SpriteSet::SmallObstacle,
        ObstacleKind::Large => SpriteSet::LargeObstacle,
        ObstacleKind::Flying { .. } => SpriteSet::FlyingObstacle,
    }
}

fn obstacle_y(kind: &ObstacleKind, config: &GameConfig) -> i32 {
    match kind {
        ObstacleKind::Small => config.small_obstacle_y,
        ObstacleKind::Large => config.large_obstacle_y,
        ObstacleKind::Flying { .. } => config.flying_obstacle_y,
    }
}

/// Place a new obstacle just past the right edge of the field.
pub fn new_obstacle(kind: ObstacleKind, image_index: usize, ctx: &GameContext) -> Obstacle {
    let set = obstacle_set(&kind);
    let sprite = ctx.assets.sprite(set, image_index);
    let rect = Rect {
        x: ctx.config.field_width as f32,
        y: obstacle_y(&kind, &ctx.config) as f32,
        width: sprite.width as f32,
        height: sprite.height as f32,
    };
    Obstacle {
        kind,
        image: ImageRef {
            set,
            index: image_index % ctx.assets.frames(set).len(),
        },
        rect,
    }
}

/// Pick one of the three kinds with equal probability.  Ground obstacles get a
/// random image; flying ones always start on their first frame.
pub fn spawn_obstacle(ctx: &GameContext, rng: &mut impl Rng) -> Obstacle {
    let obstacle = match rng.gen_range(0..3) {
        0 => {
            let index = rng.gen_range(0..ctx.assets.small_obstacles.len());
            new_obstacle(ObstacleKind::Small, index, ctx)
        }
        1 => {
            let index = rng.gen_range(0..ctx.assets.large_obstacles.len());
            new_obstacle(ObstacleKind::Large, index, ctx)
        }
        _ => new_obstacle(ObstacleKind::Flying { frames: 0 }, 0, ctx),
    };
    debug!("spawned {:?} (image {})", obstacle.kind, obstacle.image.index);
    obstacle
}

/// Step a flying obstacle's wing animation.  The bounding box keeps the size
/// it was spawned with.
pub fn animate_obstacle(obstacle: &Obstacle, assets: &AssetTable) -> Obstacle {
    match obstacle.kind {
        ObstacleKind::Flying { frames } => {
            let frames = frames + 1;
            let count = assets.frames(SpriteSet::FlyingObstacle).len();
            Obstacle {
                kind: ObstacleKind::Flying { frames },
                image: ImageRef {
                    set: SpriteSet::FlyingObstacle,
                    index: (frames / FRAME_HOLD) as usize % count,
                },
                rect: obstacle.rect,
            }
        }
        _ => obstacle.clone(),
    }
}

pub fn advance_obstacle(obstacle: &Obstacle, speed: i32) -> Obstacle {
    Obstacle {
        rect: advance_rect(&obstacle.rect, speed),
        ..obstacle.clone()
    }
}

/// True once the right edge has passed the left edge of the field.
pub fn is_off_screen(obstacle: &Obstacle) -> bool {
    obstacle.rect.right() < 0.0
}

// ── Cloud ────────────────────────────────────────────────────────────────────

fn place_cloud(width: i32, x_range: (i32, i32), config: &GameConfig, rng: &mut impl Rng) -> Cloud {
    Cloud {
        x: config.field_width + rng.gen_range(x_range.0..x_range.1),
        y: rng.gen_range(config.cloud_y_range.0..config.cloud_y_range.1),
        width,
    }
}

/// First appearance uses a closer spawn band than later respawns.
pub fn new_cloud(ctx: &GameContext, rng: &mut impl Rng) -> Cloud {
    let width = ctx.assets.sprite(SpriteSet::Cloud, 0).width;
    place_cloud(width, ctx.config.cloud_first_spawn, &ctx.config, rng)
}

pub fn respawn_cloud(cloud: &Cloud, config: &GameConfig, rng: &mut impl Rng) -> Cloud {
    place_cloud(cloud.width, config.cloud_respawn, config, rng)
}

pub fn advance_cloud(cloud: &Cloud, speed: i32, config: &GameConfig, rng: &mut impl Rng) -> Cloud {
    let moved = Cloud {
        x: cloud.x - speed,
        ..cloud.clone()
    };
    if moved.x < -moved.width {
        respawn_cloud(&moved, config, rng)
    } else {
        moved
    }
}

// ── Track ────────────────────────────────────────────────────────────────────

/// Scroll the tiled track.  Once a full tile has gone by the offset wraps to
/// zero before this tick's scroll is applied.
pub fn advance_background(offset: i32, image_width: i32, speed: i32) -> i32 {
    let offset = if offset <= -image_width { 0 } else { offset };
    offset - speed
}

// ── Score & speed ────────────────────────────────────────────────────────────

/// One point per tick.  Speed rises by one each time the new score reaches a
/// positive multiple of the step, and never exceeds the cap.
pub fn update_score_and_speed(score: i32, speed: i32, config: &GameConfig) -> (i32, i32) {
    let score = score + 1;
    let mut next_speed = speed;
    if score > 0 && score % config.speed_step_points == 0 {
        next_speed += 1;
    }
    let next_speed = next_speed.min(config.max_speed);
    if next_speed != speed {
        debug!("score {} → speed {}", score, next_speed);
    }
    (score, next_speed)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh session: avatar on the ground, no obstacles, base speed.
pub fn init_session(ctx: &GameContext, rng: &mut impl Rng) -> SessionState {
    let (score, speed) = update_score_and_speed(-1, ctx.config.base_speed, &ctx.config);
    SessionState {
        avatar: new_avatar(&ctx.assets),
        cloud: new_cloud(ctx, rng),
        obstacles: Vec::new(),
        score,
        speed,
        background_x: 0,
        status: GameStatus::Playing,
        frame: 0,
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the session by one tick.  All randomness comes through `rng` so
/// callers control determinism (useful for tests with a seeded RNG).
///
/// On a collision the tick stops early: the returned state is `Crashed` and
/// keeps the score it had before this tick.
pub fn tick(
    state: &SessionState,
    controls: &Controls,
    ctx: &GameContext,
    rng: &mut impl Rng,
) -> SessionState {
    if state.status == GameStatus::Crashed {
        return state.clone();
    }
    let frame = state.frame + 1;

    // ── 1. Scenery and avatar ────────────────────────────────────────────────
    let cloud = advance_cloud(&state.cloud, state.speed, &ctx.config, rng);
    let avatar = update_avatar(&state.avatar, controls, &ctx.assets);

    // ── 2. Spawn when the field is clear ─────────────────────────────────────
    let mut obstacles = state.obstacles.clone();
    if obstacles.is_empty() {
        obstacles.push(spawn_obstacle(ctx, rng));
    }

    // ── 3. Move obstacles; drop at most one, stop on the first hit ───────────
    let mut crashed = false;
    let mut i = 0;
    while i < obstacles.len() {
        let moved = advance_obstacle(&animate_obstacle(&obstacles[i], &ctx.assets), state.speed);
        if is_off_screen(&moved) {
            debug!("removed {:?} at x={}", moved.kind, moved.rect.x);
            obstacles.remove(i);
            break;
        }
        let hit = collides_with(&avatar, &moved.rect);
        obstacles[i] = moved;
        if hit {
            crashed = true;
            break;
        }
        i += 1;
    }

    if crashed {
        return SessionState {
            avatar,
            cloud,
            obstacles,
            status: GameStatus::Crashed,
            frame,
            ..state.clone()
        };
    }

    // ── 4. Track, score and speed ────────────────────────────────────────────
    let track_width = ctx.assets.sprite(SpriteSet::Background, 0).width;
    let background_x = advance_background(state.background_x, track_width, state.speed);
    let (score, speed) = update_score_and_speed(state.score, state.speed, &ctx.config);

    SessionState {
        avatar,
        cloud,
        obstacles,
        score,
        speed,
        background_x,
        status: GameStatus::Playing,
        frame,
    }
}
