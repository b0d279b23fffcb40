use dino_runner::assets::*;
use dino_runner::compute::*;
use dino_runner::config::GameConfig;
use dino_runner::entities::*;

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

const IDLE: Controls = Controls { jump: false, duck: false };

fn ctx() -> GameContext {
    GameContext::builtin().unwrap()
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A random source whose every draw is zero.
fn zero_rng() -> StepRng {
    StepRng::new(0, 0)
}

fn make_state(ctx: &GameContext) -> SessionState {
    init_session(ctx, &mut seeded_rng())
}

/// An obstacle of `kind` placed so that after one tick at `speed` its left
/// edge sits at `x`.
fn obstacle_landing_at(kind: ObstacleKind, index: usize, x: f32, speed: i32, ctx: &GameContext) -> Obstacle {
    let mut o = new_obstacle(kind, index, ctx);
    o.rect.x = x + speed as f32;
    o
}

// ── update_score_and_speed ────────────────────────────────────────────────────

#[test]
fn first_score_update_starts_at_zero_without_speed_bump() {
    let c = GameConfig::default();
    assert_eq!(update_score_and_speed(-1, 15, &c), (0, 15));
}

#[test]
fn speed_bumps_when_score_reaches_a_hundred() {
    let c = GameConfig::default();
    assert_eq!(update_score_and_speed(98, 15, &c), (99, 15));
    assert_eq!(update_score_and_speed(99, 15, &c), (100, 16));
    assert_eq!(update_score_and_speed(100, 16, &c), (101, 16));
    assert_eq!(update_score_and_speed(199, 16, &c), (200, 17));
}

#[test]
fn speed_is_capped() {
    let c = GameConfig::default();
    assert_eq!(update_score_and_speed(2499, 40, &c), (2500, 40));
    assert_eq!(update_score_and_speed(2599, 39, &c), (2600, 40));
}

#[test]
fn speed_never_decreases_nor_exceeds_cap() {
    let c = GameConfig::default();
    let (mut score, mut speed) = update_score_and_speed(-1, c.base_speed, &c);
    for _ in 0..5000 {
        let (s, v) = update_score_and_speed(score, speed, &c);
        assert_eq!(s, score + 1);
        assert!(v >= speed);
        assert!(v <= 40);
        assert_eq!(v - speed, if s % 100 == 0 && speed < 40 { 1 } else { 0 });
        score = s;
        speed = v;
    }
    assert_eq!(speed, 40);
}

// ── init_session ──────────────────────────────────────────────────────────────

#[test]
fn init_session_defaults() {
    let ctx = ctx();
    let s = make_state(&ctx);
    assert_eq!(s.score, 0);
    assert_eq!(s.speed, 15);
    assert!(s.obstacles.is_empty());
    assert_eq!(s.background_x, 0);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.frame, 0);
    assert_eq!(s.avatar.state, AvatarState::Running);
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[test]
fn spawn_with_zero_random_source_is_small_at_right_edge() {
    let ctx = ctx();
    let o = spawn_obstacle(&ctx, &mut zero_rng());
    assert_eq!(o.kind, ObstacleKind::Small);
    assert_eq!(o.rect.x, 1100.0);
    assert_eq!(o.rect.y, 325.0);
    assert_eq!(o.image, ImageRef { set: SpriteSet::SmallObstacle, index: 0 });
    assert_eq!((o.rect.width, o.rect.height), (40.0, 71.0));
}

#[test]
fn spawn_covers_all_kinds() {
    let ctx = ctx();
    let mut rng = seeded_rng();
    let (mut small, mut large, mut flying) = (0, 0, 0);
    for _ in 0..300 {
        match spawn_obstacle(&ctx, &mut rng).kind {
            ObstacleKind::Small => small += 1,
            ObstacleKind::Large => large += 1,
            ObstacleKind::Flying { .. } => flying += 1,
        }
    }
    assert!(small > 50 && large > 50 && flying > 50, "{} {} {}", small, large, flying);
}

#[test]
fn obstacle_baselines() {
    let ctx = ctx();
    assert_eq!(new_obstacle(ObstacleKind::Large, 1, &ctx).rect.y, 300.0);
    assert_eq!(new_obstacle(ObstacleKind::Flying { frames: 0 }, 0, &ctx).rect.y, 250.0);
    let large = new_obstacle(ObstacleKind::Large, 1, &ctx);
    assert_eq!(large.rect.width, 99.0);
}

#[test]
fn flying_obstacle_cycles_every_five_draws() {
    let ctx = ctx();
    let mut o = new_obstacle(ObstacleKind::Flying { frames: 0 }, 0, &ctx);
    let size = (o.rect.width, o.rect.height);
    let mut indices = Vec::new();
    for _ in 0..12 {
        o = animate_obstacle(&o, &ctx.assets);
        indices.push(o.image.index);
    }
    assert_eq!(indices, vec![0, 0, 0, 0, 1, 1, 1, 1, 1, 0, 0, 0]);
    assert_eq!(o.kind, ObstacleKind::Flying { frames: 12 });
    assert_eq!((o.rect.width, o.rect.height), size);
}

#[test]
fn ground_obstacles_do_not_animate() {
    let ctx = ctx();
    let o = new_obstacle(ObstacleKind::Small, 2, &ctx);
    assert_eq!(animate_obstacle(&o, &ctx.assets), o);
}

#[test]
fn advance_obstacle_moves_left_by_speed() {
    let ctx = ctx();
    let o = new_obstacle(ObstacleKind::Small, 0, &ctx);
    let moved = advance_obstacle(&o, 17);
    assert_eq!(moved.rect.x, 1083.0);
    assert_eq!(moved.rect.y, o.rect.y);
}

#[test]
fn off_screen_only_when_right_edge_negative() {
    let ctx = ctx();
    let mut o = new_obstacle(ObstacleKind::Small, 0, &ctx); // width 40
    o.rect.x = -40.0; // right edge exactly 0
    assert!(!is_off_screen(&o));
    o.rect.x = -39.0;
    assert!(!is_off_screen(&o));
    o.rect.x = -41.0;
    assert!(is_off_screen(&o));
}

// ── Cloud ─────────────────────────────────────────────────────────────────────

#[test]
fn first_cloud_uses_near_spawn_band() {
    let ctx = ctx();
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let c = new_cloud(&ctx, &mut rng);
        assert!(c.x >= 1900 && c.x < 2100, "x = {}", c.x);
        assert!(c.y >= 50 && c.y < 100);
        assert_eq!(c.width, 84);
    }
}

#[test]
fn respawned_cloud_uses_far_spawn_band() {
    let ctx = ctx();
    let mut rng = seeded_rng();
    let cloud = Cloud { x: -84, y: 60, width: 84 };
    for _ in 0..200 {
        let c = advance_cloud(&cloud, 1, &ctx.config, &mut rng);
        assert!(c.x >= 3600 && c.x < 4100, "x = {}", c.x);
        assert!(c.y >= 50 && c.y < 100);
    }
}

#[test]
fn cloud_drifts_while_partly_visible() {
    let ctx = ctx();
    let cloud = Cloud { x: -70, y: 60, width: 84 };
    let c = advance_cloud(&cloud, 14, &ctx.config, &mut seeded_rng());
    assert_eq!(c, Cloud { x: -84, y: 60, width: 84 });
}

#[test]
fn cloud_with_zero_random_source() {
    let ctx = ctx();
    let c = new_cloud(&ctx, &mut zero_rng());
    assert_eq!((c.x, c.y), (1900, 50));
    let c = respawn_cloud(&c, &ctx.config, &mut zero_rng());
    assert_eq!((c.x, c.y), (3600, 50));
}

// ── Track ─────────────────────────────────────────────────────────────────────

#[test]
fn background_scrolls_by_speed() {
    assert_eq!(advance_background(0, 2404, 15), -15);
    assert_eq!(advance_background(-2403, 2404, 15), -2418);
}

#[test]
fn background_wraps_after_a_full_tile() {
    assert_eq!(advance_background(-2404, 2404, 15), -15);
    assert_eq!(advance_background(-2418, 2404, 20), -20);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_increments_score_frame_and_scroll() {
    let ctx = ctx();
    let s = make_state(&ctx);
    let s2 = tick(&s, &IDLE, &ctx, &mut seeded_rng());
    assert_eq!(s2.score, 1);
    assert_eq!(s2.frame, 1);
    assert_eq!(s2.background_x, -15);
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn tick_spawns_one_obstacle_when_clear() {
    let ctx = ctx();
    let s = make_state(&ctx);
    let s2 = tick(&s, &IDLE, &ctx, &mut zero_rng());
    assert_eq!(s2.obstacles.len(), 1);
    let o = &s2.obstacles[0];
    assert_eq!(o.kind, ObstacleKind::Small);
    assert_eq!(o.rect.x, 1100.0 - 15.0); // spawned then moved this tick
}

#[test]
fn tick_does_not_spawn_while_obstacle_pending() {
    let ctx = ctx();
    let mut s = make_state(&ctx);
    s.obstacles.push(new_obstacle(ObstacleKind::Large, 0, &ctx));
    let s2 = tick(&s, &IDLE, &ctx, &mut seeded_rng());
    assert_eq!(s2.obstacles.len(), 1);
    assert_eq!(s2.obstacles[0].kind, ObstacleKind::Large);
}

#[test]
fn tick_removes_obstacle_past_left_edge() {
    let ctx = ctx();
    let mut s = make_state(&ctx);
    s.obstacles.push(obstacle_landing_at(ObstacleKind::Small, 0, -45.0, s.speed, &ctx));
    let s2 = tick(&s, &IDLE, &ctx, &mut seeded_rng());
    assert!(s2.obstacles.is_empty());
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.score, 1);
}

#[test]
fn tick_keeps_partly_visible_obstacle() {
    let ctx = ctx();
    let mut s = make_state(&ctx);
    s.obstacles.push(obstacle_landing_at(ObstacleKind::Small, 0, -40.0, s.speed, &ctx));
    let s2 = tick(&s, &IDLE, &ctx, &mut seeded_rng());
    assert_eq!(s2.obstacles.len(), 1);
    assert_eq!(s2.obstacles[0].rect.x, -40.0);
}

#[test]
fn tick_crashes_on_front_point_hit() {
    let ctx = ctx();
    let mut s = make_state(&ctx);
    s.score = 57;
    // Large box 110..158 × 300..395 contains the running front point (125, 315)
    s.obstacles.push(obstacle_landing_at(ObstacleKind::Large, 0, 110.0, s.speed, &ctx));
    let s2 = tick(&s, &IDLE, &ctx, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Crashed);
    assert_eq!(s2.score, 57); // no point for the fatal tick
    assert_eq!(s2.background_x, s.background_x);
    assert_eq!(s2.obstacles[0].rect.x, 110.0);
}

#[test]
fn tick_running_ignores_bottom_point() {
    let ctx = ctx();
    let mut s = make_state(&ctx);
    // Small box 80..120 × 325..396 holds bottom (90, 380) and tail (80, 360) but not front
    s.obstacles.push(obstacle_landing_at(ObstacleKind::Small, 0, 80.0, s.speed, &ctx));
    let s2 = tick(&s, &IDLE, &ctx, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn tick_ducking_uses_bottom_point() {
    let ctx = ctx();
    let mut s = make_state(&ctx);
    s.obstacles.push(obstacle_landing_at(ObstacleKind::Small, 0, 80.0, s.speed, &ctx));
    let duck = Controls { jump: false, duck: true };
    let s2 = tick(&s, &duck, &ctx, &mut seeded_rng());
    assert_eq!(s2.avatar.state, AvatarState::Ducking);
    assert_eq!(s2.status, GameStatus::Crashed);
}

#[test]
fn tick_ducking_passes_under_flying_obstacle() {
    let ctx = ctx();
    let mut s = make_state(&ctx);
    // Flying box 100..197 × 250..318 covers the front point but no ducking hit-point
    s.obstacles.push(obstacle_landing_at(ObstacleKind::Flying { frames: 0 }, 0, 100.0, s.speed, &ctx));
    let duck = Controls { jump: false, duck: true };
    let s2 = tick(&s, &duck, &ctx, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Playing);

    let s3 = tick(&s, &IDLE, &ctx, &mut seeded_rng());
    assert_eq!(s3.status, GameStatus::Crashed);
}

#[test]
fn tick_on_crashed_session_is_noop() {
    let ctx = ctx();
    let mut s = make_state(&ctx);
    s.status = GameStatus::Crashed;
    let s2 = tick(&s, &IDLE, &ctx, &mut seeded_rng());
    assert_eq!(s2, s);
}

#[test]
fn tick_speed_steps_at_one_hundred() {
    let ctx = ctx();
    let mut s = make_state(&ctx);
    s.score = 99;
    let s2 = tick(&s, &IDLE, &ctx, &mut seeded_rng());
    assert_eq!((s2.score, s2.speed), (100, 16));
}

#[test]
fn idle_run_scores_one_point_per_tick_until_crash() {
    let ctx = ctx();
    let mut rng = seeded_rng();
    let mut s = init_session(&ctx, &mut rng);
    let mut last_speed = s.speed;
    for n in 1..=2000 {
        let next = tick(&s, &IDLE, &ctx, &mut rng);
        if next.status == GameStatus::Crashed {
            assert_eq!(next.score, s.score);
            return;
        }
        assert_eq!(next.score, n);
        assert!(next.speed >= last_speed && next.speed <= 40);
        assert!(next.obstacles.len() <= 1);
        last_speed = next.speed;
        s = next;
    }
}

#[test]
fn tick_does_not_mutate_original() {
    let ctx = ctx();
    let s = make_state(&ctx);
    let _ = tick(&s, &IDLE, &ctx, &mut seeded_rng());
    assert_eq!(s.score, 0);
    assert!(s.obstacles.is_empty());
}
