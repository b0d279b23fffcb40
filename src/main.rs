use std::error::Error;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use log::{error, info, warn};
use rand::thread_rng;

use dino_runner::assets::GameContext;
use dino_runner::compute::{init_session, tick};
use dino_runner::display::{self, Viewport};
use dino_runner::entities::GameStatus;
use dino_runner::input::{is_quit_key, KeyTracker, Signal};
use dino_runner::logging::{init_log, parse_level, DEFAULT_LOG_FILE};
use dino_runner::menu::{menu_choice, MenuChoice, MenuScreen};

#[derive(Parser, Debug)]
#[command(name = "dino_runner", about = "Jump and duck your way along an endless track")]
struct Cli {
    /// Draw the runner's hit-points and obstacle boxes.
    #[arg(long)]
    debug: bool,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// error, warn, info, debug or trace.
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// How a session handed control back.
enum SessionEnd {
    Crashed { score: i32 },
    Quit,
}

fn viewport(ctx: &GameContext) -> std::io::Result<Viewport> {
    let (cols, rows) = terminal::size()?;
    Ok(Viewport::new(cols, rows, &ctx.config))
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    screen: &MenuScreen,
    ctx: &GameContext,
) -> std::io::Result<MenuChoice> {
    display::render_menu(out, screen, ctx, &viewport(ctx)?)?;

    // Block until the player makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(key)) => {
                if let Some(choice) = menu_choice(&key) {
                    info!("menu: {:?}", choice);
                    return Ok(choice);
                }
            }
            Ok(Event::Resize(..)) => display::render_menu(out, screen, ctx, &viewport(ctx)?)?,
            Ok(_) => {}
            Err(_) => {
                warn!("input channel closed; leaving menu");
                return Ok(MenuChoice::Quit);
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Freeze on the crash frame.  Returns `true` if a quit key arrived meanwhile.
fn collision_pause(rx: &mpsc::Receiver<Event>, length: Duration) -> bool {
    let deadline = Instant::now() + length;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return false;
        }
        match rx.recv_timeout(remaining) {
            Ok(Event::Key(key)) if is_quit_key(&key) => return true,
            Ok(_) => {}
            Err(RecvTimeoutError::Timeout) => return false,
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(remaining);
                return false;
            }
        }
    }
}

fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    ctx: &GameContext,
    debug: bool,
    release_events: bool,
) -> std::io::Result<SessionEnd> {
    let mut rng = thread_rng();
    let mut state = init_session(ctx, &mut rng);
    let mut keys = KeyTracker::new(release_events);
    let frame_length = ctx.config.frame_duration();
    info!("session start: speed {}", state.speed);

    loop {
        let frame_start = Instant::now();
        let frame = state.frame + 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key) = ev {
                if keys.record(&key, frame) == Signal::Quit {
                    info!("quit during session at score {}", state.score);
                    return Ok(SessionEnd::Quit);
                }
            }
        }

        state = tick(&state, &keys.controls(frame), ctx, &mut rng);
        display::render(out, &state, ctx, &viewport(ctx)?, debug)?;

        if state.status == GameStatus::Crashed {
            info!("game over: score {} speed {}", state.score, state.speed);
            if collision_pause(rx, ctx.config.collision_pause) {
                return Ok(SessionEnd::Quit);
            }
            return Ok(SessionEnd::Crashed { score: state.score });
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_length {
            thread::sleep(frame_length - elapsed);
        }
    }
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    ctx: &GameContext,
    debug: bool,
    release_events: bool,
) -> std::io::Result<()> {
    let mut screen = MenuScreen::FirstRun;

    loop {
        match show_menu(out, rx, &screen, ctx)? {
            MenuChoice::Quit => break,
            MenuChoice::Start => match game_loop(out, rx, ctx, debug, release_events)? {
                SessionEnd::Quit => break,
                SessionEnd::Crashed { score } => screen = MenuScreen::GameOver { score },
            },
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_log(parse_level(&cli.log_level), &cli.log_file)?;
    info!("dino_runner start");

    let ctx = GameContext::builtin().map_err(|e| {
        error!("asset check failed: {}", e);
        e
    })?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to press-only.
    // The query must run before the input thread starts reading events.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    info!("key release events: {}", keyboard_enhanced);

    // Blocking event reads live on their own thread so the loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &ctx, cli.debug, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result {
        Ok(()) => {
            info!("dino_runner exit");
            Ok(())
        }
        Err(e) => {
            error!("terminal I/O failed: {}", e);
            Err(e.into())
        }
    }
}
