/// Pre- and post-game screen rules.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::input::is_quit_key;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuScreen {
    /// Nothing has been played yet.
    FirstRun,
    /// A session just ended with this score.
    GameOver { score: i32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Quit,
}

impl MenuScreen {
    pub fn prompt(&self) -> &'static str {
        match self {
            MenuScreen::FirstRun => "Press SPACE to start!",
            MenuScreen::GameOver { .. } => "Press SPACE to start over!",
        }
    }

    pub fn score_line(&self) -> Option<String> {
        match self {
            MenuScreen::FirstRun => None,
            MenuScreen::GameOver { score } => Some(format!("Your score: {}", score)),
        }
    }
}

/// Resolve a key event on the menu.  Only presses count.
pub fn menu_choice(event: &KeyEvent) -> Option<MenuChoice> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    if is_quit_key(event) {
        return Some(MenuChoice::Quit);
    }
    match event.code {
        KeyCode::Char(' ') => Some(MenuChoice::Start),
        _ => None,
    }
}
