/// Sprite tables.
///
/// Every image the game draws is a `Sprite`: a fixed pixel footprint (used by
/// the simulation for bounding boxes) plus a block of text art (used by the
/// terminal renderer).  Sprites are grouped into `SpriteSet` categories and
/// loaded once into an `AssetTable`, which a `GameContext` validates before a
/// session may be created.

use std::fmt;

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteSet {
    Running,
    Ducking,
    Jumping,
    SmallObstacle,
    LargeObstacle,
    FlyingObstacle,
    Cloud,
    Background,
}

impl SpriteSet {
    pub const ALL: [SpriteSet; 8] = [
        SpriteSet::Running,
        SpriteSet::Ducking,
        SpriteSet::Jumping,
        SpriteSet::SmallObstacle,
        SpriteSet::LargeObstacle,
        SpriteSet::FlyingObstacle,
        SpriteSet::Cloud,
        SpriteSet::Background,
    ];
}

impl fmt::Display for SpriteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpriteSet::Running => "running",
            SpriteSet::Ducking => "ducking",
            SpriteSet::Jumping => "jumping",
            SpriteSet::SmallObstacle => "small obstacle",
            SpriteSet::LargeObstacle => "large obstacle",
            SpriteSet::FlyingObstacle => "flying obstacle",
            SpriteSet::Cloud => "cloud",
            SpriteSet::Background => "background",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    /// Footprint in world pixels.
    pub width: i32,
    pub height: i32,
    /// Text art, one string per terminal row.  Spaces are transparent.
    pub art: &'static [&'static str],
}

// ── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum AssetError {
    /// A category has no images at all.
    EmptySet(SpriteSet),
    /// An image has a zero or negative footprint.
    DegenerateSprite(SpriteSet, usize),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::EmptySet(set) => write!(f, "no images loaded for the {} set", set),
            AssetError::DegenerateSprite(set, index) => {
                write!(f, "image {} of the {} set has an empty footprint", index, set)
            }
        }
    }
}

impl std::error::Error for AssetError {}

// ── Table ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct AssetTable {
    pub running: Vec<Sprite>,
    pub ducking: Vec<Sprite>,
    pub jumping: Vec<Sprite>,
    pub small_obstacles: Vec<Sprite>,
    pub large_obstacles: Vec<Sprite>,
    pub flying_obstacles: Vec<Sprite>,
    pub cloud: Vec<Sprite>,
    pub background: Vec<Sprite>,
}

impl AssetTable {
    pub fn frames(&self, set: SpriteSet) -> &[Sprite] {
        match set {
            SpriteSet::Running => &self.running,
            SpriteSet::Ducking => &self.ducking,
            SpriteSet::Jumping => &self.jumping,
            SpriteSet::SmallObstacle => &self.small_obstacles,
            SpriteSet::LargeObstacle => &self.large_obstacles,
            SpriteSet::FlyingObstacle => &self.flying_obstacles,
            SpriteSet::Cloud => &self.cloud,
            SpriteSet::Background => &self.background,
        }
    }

    /// Look up one image.  Indices wrap, so callers may pass raw animation
    /// counters; a validated table never has an empty set.
    pub fn sprite(&self, set: SpriteSet, index: usize) -> &Sprite {
        let frames = self.frames(set);
        &frames[index % frames.len()]
    }

    pub fn validate(&self) -> Result<(), AssetError> {
        for set in SpriteSet::ALL {
            let frames = self.frames(set);
            if frames.is_empty() {
                return Err(AssetError::EmptySet(set));
            }
            if let Some(index) = frames.iter().position(|s| s.width <= 0 || s.height <= 0) {
                return Err(AssetError::DegenerateSprite(set, index));
            }
        }
        Ok(())
    }

    /// The stock sprite sheet bundled with the game.
    pub fn builtin() -> AssetTable {
        AssetTable {
            running: vec![
                Sprite { width: 88, height: 94, art: RUN_1 },
                Sprite { width: 88, height: 94, art: RUN_2 },
            ],
            ducking: vec![
                Sprite { width: 118, height: 60, art: DUCK_1 },
                Sprite { width: 118, height: 60, art: DUCK_2 },
            ],
            jumping: vec![Sprite { width: 88, height: 94, art: JUMP }],
            small_obstacles: vec![
                Sprite { width: 40, height: 71, art: SMALL_1 },
                Sprite { width: 68, height: 71, art: SMALL_2 },
                Sprite { width: 105, height: 71, art: SMALL_3 },
            ],
            large_obstacles: vec![
                Sprite { width: 48, height: 95, art: LARGE_1 },
                Sprite { width: 99, height: 95, art: LARGE_2 },
                Sprite { width: 102, height: 95, art: LARGE_3 },
            ],
            flying_obstacles: vec![
                Sprite { width: 97, height: 68, art: BIRD_1 },
                Sprite { width: 97, height: 68, art: BIRD_2 },
            ],
            cloud: vec![Sprite { width: 84, height: 101, art: CLOUD }],
            background: vec![Sprite { width: 2404, height: 28, art: TRACK }],
        }
    }
}

// ── Context ──────────────────────────────────────────────────────────────────

/// Immutable configuration and sprite tables shared by every session.
#[derive(Clone, Debug)]
pub struct GameContext {
    pub config: GameConfig,
    pub assets: AssetTable,
}

impl GameContext {
    pub fn new(config: GameConfig, assets: AssetTable) -> Result<GameContext, AssetError> {
        assets.validate()?;
        Ok(GameContext { config, assets })
    }

    pub fn builtin() -> Result<GameContext, AssetError> {
        GameContext::new(GameConfig::default(), AssetTable::builtin())
    }
}

// ── Art ──────────────────────────────────────────────────────────────────────

const RUN_1: &[&str] = &[
    r"      ____",
    r"     | o__|",
    r"\____|  ^",
    r"  /  \",
];
const RUN_2: &[&str] = &[
    r"      ____",
    r"     | o__|",
    r"\____|  ^",
    r"   | /",
];
const JUMP: &[&str] = &[
    r"      ____",
    r"     | o__|",
    r"\____|  ^",
    r"  \  \",
];
const DUCK_1: &[&str] = &[
    r"\_________ o__",
    r"   /  \  ^",
];
const DUCK_2: &[&str] = &[
    r"\_________ o__",
    r"    | /  ^",
];
const SMALL_1: &[&str] = &[r" |", r"\|/", r" |"];
const SMALL_2: &[&str] = &[r" | |", r"\|\|/", r" | |"];
const SMALL_3: &[&str] = &[r" | | |", r"\|\|\|/", r" | | |"];
const LARGE_1: &[&str] = &[r" _", r"| |", r"\|/", r" |"];
const LARGE_2: &[&str] = &[r" _  _", r"| || |", r"\|/\|/", r" |  |"];
const LARGE_3: &[&str] = &[r" _ _ _", r"|||||||", r"\|/\|/|", r" | | |"];
const BIRD_1: &[&str] = &[r"\\", r" \\__", r"  (o >", r"   ~~"];
const BIRD_2: &[&str] = &[r"", r"   __", r" _(o >", r"// ~~"];
const CLOUD: &[&str] = &[r"  .--.", r".(    ).", r"(___.__)"];
const TRACK: &[&str] = &[r"______.____,_____-______..____._____,___-_____"];
