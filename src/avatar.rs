/// The runner's state machine.
///
/// `update_avatar` is called once per tick with the current key snapshot and
/// returns the next avatar.  The behaviour of the state the avatar is already
/// in runs first, then the input transition is applied, and a newly entered
/// state runs its behaviour straight away.

use log::debug;

use crate::assets::{AssetTable, SpriteSet};
use crate::entities::{Avatar, AvatarState, Controls, HitPoints, ImageRef, Point, Rect};

// ── Geometry & jump constants ─────────────────────────────────────────────────

pub const AVATAR_X: f32 = 80.0;
pub const AVATAR_Y: f32 = 310.0;
pub const DUCKING_Y: f32 = 340.0;

pub const JUMP_VELOCITY: f32 = 8.5;
pub const JUMP_DECAY: f32 = 0.8;
/// Pixels of displacement per unit of velocity, per tick.
pub const JUMP_SCALE: f32 = 4.0;

/// Each animation image is held for this many behaviour calls.
pub const FRAME_HOLD: u32 = 5;

fn front_point(x: f32, y: f32) -> Point {
    Point { x: x + 45.0, y: y + 5.0 }
}

fn front_crouching_point(x: f32) -> Point {
    // Measured from the standing baseline, not the ducking one.
    Point { x: x + 105.0, y: AVATAR_Y + 40.0 }
}

fn bottom_point(x: f32, y: f32) -> Point {
    Point { x: x + 10.0, y: y + 70.0 }
}

fn tail_point(x: f32, y: f32) -> Point {
    Point { x, y: y + 50.0 }
}

// ── Constructor ───────────────────────────────────────────────────────────────

/// A running avatar standing on the ground.
pub fn new_avatar(assets: &AssetTable) -> Avatar {
    let sprite = assets.sprite(SpriteSet::Running, 0);
    Avatar {
        state: AvatarState::Running,
        image: ImageRef { set: SpriteSet::Running, index: 0 },
        rect: Rect {
            x: AVATAR_X,
            y: AVATAR_Y,
            width: sprite.width as f32,
            height: sprite.height as f32,
        },
        jump_velocity: JUMP_VELOCITY,
        step: 0,
        hit_points: HitPoints {
            front: front_point(AVATAR_X, AVATAR_Y),
            front_crouching: front_crouching_point(AVATAR_X),
            bottom: bottom_point(AVATAR_X, AVATAR_Y),
            tail: tail_point(AVATAR_X, AVATAR_Y),
        },
    }
}

// ── Per-state behaviour ───────────────────────────────────────────────────────

/// Advance the animation counter and show the image it selects from `set`.
fn step_image(avatar: &mut Avatar, assets: &AssetTable, set: SpriteSet) {
    avatar.step = avatar.step.wrapping_add(1);
    let count = assets.frames(set).len();
    let index = (avatar.step / FRAME_HOLD) as usize % count;
    let sprite = assets.sprite(set, index);
    avatar.image = ImageRef { set, index };
    avatar.rect.width = sprite.width as f32;
    avatar.rect.height = sprite.height as f32;
}

fn run(avatar: &mut Avatar, assets: &AssetTable) {
    step_image(avatar, assets, SpriteSet::Running);
    avatar.rect.x = AVATAR_X;
    avatar.rect.y = AVATAR_Y;
    avatar.hit_points.front = front_point(avatar.rect.x, avatar.rect.y);
}

fn duck(avatar: &mut Avatar, assets: &AssetTable) {
    step_image(avatar, assets, SpriteSet::Ducking);
    avatar.rect.x = AVATAR_X;
    avatar.rect.y = DUCKING_Y;
    avatar.hit_points.front_crouching = front_crouching_point(avatar.rect.x);
}

fn jump(avatar: &mut Avatar, assets: &AssetTable) {
    step_image(avatar, assets, SpriteSet::Jumping);

    let rise = avatar.jump_velocity * JUMP_SCALE;
    avatar.rect.y -= rise;
    avatar.hit_points.front.y -= rise;
    avatar.hit_points.bottom.y -= rise;
    avatar.hit_points.tail.y -= rise;
    avatar.jump_velocity -= JUMP_DECAY;

    if avatar.jump_velocity < -JUMP_VELOCITY {
        land(avatar);
    }
}

/// Snap back to the ground geometry and resume running.
fn land(avatar: &mut Avatar) {
    avatar.state = AvatarState::Running;
    avatar.jump_velocity = JUMP_VELOCITY;
    avatar.rect.y = AVATAR_Y;
    avatar.hit_points.front.y = AVATAR_Y + 5.0;
    avatar.hit_points.bottom.y = AVATAR_Y + 70.0;
    avatar.hit_points.tail.y = AVATAR_Y + 50.0;
}

// ── Per-tick update (pure) ────────────────────────────────────────────────────

pub fn update_avatar(avatar: &Avatar, controls: &Controls, assets: &AssetTable) -> Avatar {
    let mut next = avatar.clone();

    match next.state {
        AvatarState::Ducking => duck(&mut next, assets),
        AvatarState::Running => run(&mut next, assets),
        AvatarState::Jumping => jump(&mut next, assets),
    }

    let airborne = next.state == AvatarState::Jumping;
    if controls.jump && !airborne {
        next.state = AvatarState::Jumping;
        jump(&mut next, assets);
    } else if controls.duck && !airborne {
        next.state = AvatarState::Ducking;
        duck(&mut next, assets);
    } else if !airborne {
        next.state = AvatarState::Running;
    }

    next
}

// ── Collision ─────────────────────────────────────────────────────────────────

/// Test the hit-points relevant to the current state against `target`.
pub fn collides_with(avatar: &Avatar, target: &Rect) -> bool {
    let hp = &avatar.hit_points;
    let hit = match avatar.state {
        AvatarState::Ducking => target.contains(hp.bottom) || target.contains(hp.front_crouching),
        AvatarState::Jumping => {
            target.contains(hp.bottom) || target.contains(hp.front) || target.contains(hp.tail)
        }
        AvatarState::Running => target.contains(hp.front),
    };
    if hit {
        debug!("collision while {:?}: hit-points {:?} vs {:?}", avatar.state, hp, target);
    }
    hit
}
