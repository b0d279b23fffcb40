/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// world-pixel state into terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::assets::{GameContext, Sprite, SpriteSet};
use crate::config::GameConfig;
use crate::entities::{GameStatus, ObstacleKind, Point, Rect, SessionState};
use crate::menu::MenuScreen;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_AVATAR: Color = Color::White;
const C_SMALL: Color = Color::Green;
const C_LARGE: Color = Color::DarkGreen;
const C_FLYING: Color = Color::Yellow;
const C_CLOUD: Color = Color::Grey;
const C_TRACK: Color = Color::DarkYellow;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;

// Debug overlay, one colour per hit-point.
const C_HIT_FRONT: Color = Color::Blue;
const C_HIT_CROUCH: Color = Color::Red;
const C_HIT_BOTTOM: Color = Color::Green;
const C_HIT_TAIL: Color = Color::DarkGrey;
const C_DEBUG_BOX: Color = Color::Magenta;

/// Where the score text is centred, in world pixels.
const HUD_ANCHOR: (f32, f32) = (1000.0, 40.0);

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world pixels onto a grid of terminal cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    world_width: f32,
    world_height: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, config: &GameConfig) -> Viewport {
        Viewport {
            cols,
            rows,
            world_width: config.field_width as f32,
            world_height: config.field_height as f32,
        }
    }

    pub fn col(&self, x: f32) -> i32 {
        (x * self.cols as f32 / self.world_width).floor() as i32
    }

    pub fn row(&self, y: f32) -> i32 {
        (y * self.rows as f32 / self.world_height).floor() as i32
    }

    /// World x at the left edge of a column.
    pub fn world_x(&self, col: u16) -> f32 {
        col as f32 * self.world_width / self.cols as f32
    }

    fn visible(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete session frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &SessionState,
    ctx: &GameContext,
    view: &Viewport,
    debug: bool,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let cloud = ctx.assets.sprite(SpriteSet::Cloud, 0);
    out.queue(style::SetForegroundColor(C_CLOUD))?;
    draw_sprite(out, view, cloud, state.cloud.x as f32, state.cloud.y as f32)?;

    draw_track(out, state, ctx, view)?;

    let avatar = &state.avatar;
    let sprite = ctx.assets.sprite(avatar.image.set, avatar.image.index);
    out.queue(style::SetForegroundColor(C_AVATAR))?;
    draw_sprite(out, view, sprite, avatar.rect.x, avatar.rect.y)?;

    for obstacle in &state.obstacles {
        let color = match obstacle.kind {
            ObstacleKind::Small => C_SMALL,
            ObstacleKind::Large => C_LARGE,
            ObstacleKind::Flying { .. } => C_FLYING,
        };
        let sprite = ctx.assets.sprite(obstacle.image.set, obstacle.image.index);
        out.queue(style::SetForegroundColor(color))?;
        draw_sprite(out, view, sprite, obstacle.rect.x, obstacle.rect.y)?;
    }

    if debug {
        draw_debug_overlay(out, state, view)?;
    }

    draw_hud(out, state, view)?;
    draw_controls_hint(out, view)?;

    if state.status == GameStatus::Crashed {
        draw_centered(out, view, view.rows as i32 / 2, "G A M E   O V E R", Color::Red)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Render the start / restart screen.
pub fn render_menu<W: Write>(
    out: &mut W,
    screen: &MenuScreen,
    ctx: &GameContext,
    view: &Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mid_x = ctx.config.field_width as f32 / 2.0;
    let mid_y = ctx.config.field_height as f32 / 2.0;

    let runner = ctx.assets.sprite(SpriteSet::Running, 0);
    out.queue(style::SetForegroundColor(C_AVATAR))?;
    draw_sprite(out, view, runner, mid_x - 20.0, mid_y - 140.0)?;

    let row = view.row(mid_y);
    draw_centered(out, view, row, screen.prompt(), C_TITLE)?;
    if let Some(line) = screen.score_line() {
        draw_centered(out, view, row + 2, &line, C_HUD_SCORE)?;
    }
    draw_centered(
        out,
        view,
        view.rows as i32 - 1,
        "↑ : Jump   ↓ : Duck   SPACE : Start   Q / ESC : Quit",
        C_HINT,
    )?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Primitives ────────────────────────────────────────────────────────────────

/// Draw text art with its top-left at a world position, clipped to the
/// viewport.  Spaces are left transparent.
fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    sprite: &Sprite,
    x: f32,
    y: f32,
) -> std::io::Result<()> {
    let left = view.col(x);
    let top = view.row(y);
    for (dy, line) in sprite.art.iter().enumerate() {
        for (dx, ch) in line.chars().enumerate() {
            let (col, row) = (left + dx as i32, top + dy as i32);
            if ch == ' ' || !view.visible(col, row) {
                continue;
            }
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

fn draw_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: i32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    if row < 0 || row >= view.rows as i32 {
        return Ok(());
    }
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Track ─────────────────────────────────────────────────────────────────────

/// The track tile repeats every `width` world pixels starting at the scroll
/// offset; each column samples the tile pattern at its world x.
fn draw_track<W: Write>(
    out: &mut W,
    state: &SessionState,
    ctx: &GameContext,
    view: &Viewport,
) -> std::io::Result<()> {
    let tile = ctx.assets.sprite(SpriteSet::Background, 0);
    let pattern: Vec<char> = tile.art.first().map(|l| l.chars().collect()).unwrap_or_default();
    if pattern.is_empty() {
        return Ok(());
    }
    let row = view.row(ctx.config.track_y as f32);
    if row < 0 || row >= view.rows as i32 {
        return Ok(());
    }

    let mut line = String::with_capacity(view.cols as usize);
    for col in 0..view.cols {
        let into_tile = (view.world_x(col) as i32 - state.background_x).rem_euclid(tile.width);
        let index = into_tile as usize * pattern.len() / tile.width as usize;
        line.push(pattern[index.min(pattern.len() - 1)]);
    }

    out.queue(cursor::MoveTo(0, row as u16))?;
    out.queue(style::SetForegroundColor(C_TRACK))?;
    out.queue(Print(line))?;
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &SessionState, view: &Viewport) -> std::io::Result<()> {
    let text = format!("Points: {}", state.score);
    let row = view.row(HUD_ANCHOR.1).max(0) as u16;
    let centre = view.col(HUD_ANCHOR.0);
    let col = (centre - text.chars().count() as i32 / 2)
        .min(view.cols as i32 - text.chars().count() as i32)
        .max(0) as u16;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&text))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ : Jump   ↓ : Duck   Q : Quit"))?;
    Ok(())
}

// ── Debug overlay ─────────────────────────────────────────────────────────────

fn draw_hit_point<W: Write>(
    out: &mut W,
    view: &Viewport,
    p: Point,
    color: Color,
) -> std::io::Result<()> {
    let (col, row) = (view.col(p.x), view.row(p.y));
    if view.visible(col, row) {
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print('●'))?;
    }
    Ok(())
}

fn draw_box_corners<W: Write>(out: &mut W, view: &Viewport, rect: &Rect) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_DEBUG_BOX))?;
    let (left, top) = (view.col(rect.x), view.row(rect.y));
    let (right, bottom) = (view.col(rect.right()), view.row(rect.bottom()));
    for (col, row) in [(left, top), (right, top), (left, bottom), (right, bottom)] {
        if view.visible(col, row) {
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print('+'))?;
        }
    }
    Ok(())
}

fn draw_debug_overlay<W: Write>(
    out: &mut W,
    state: &SessionState,
    view: &Viewport,
) -> std::io::Result<()> {
    for obstacle in &state.obstacles {
        draw_box_corners(out, view, &obstacle.rect)?;
    }
    let hp = &state.avatar.hit_points;
    draw_hit_point(out, view, hp.front, C_HIT_FRONT)?;
    draw_hit_point(out, view, hp.front_crouching, C_HIT_CROUCH)?;
    draw_hit_point(out, view, hp.bottom, C_HIT_BOTTOM)?;
    draw_hit_point(out, view, hp.tail, C_HIT_TAIL)?;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(format!(
        "{:?} v={:.1} speed={} frame={}",
        state.avatar.state, state.avatar.jump_velocity, state.speed, state.frame
    )))?;
    Ok(())
}
