//! All game entity types — pure data, no per-frame logic.

use crate::config::Rules;

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned box in logical pixels.  `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of the given size whose centre is `(cx, cy)`.
    pub fn centered_at(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn centerx(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn centery(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Strict overlap: boxes that merely touch along an edge do not collide,
    /// and an empty box collides with nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Sprites ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Stop,
}

/// The cleaner, steered left and right along the bottom of the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal velocity: `-speed`, `0` or `+speed`.
    pub vx: i32,
}

/// A falling cloud of carbon monoxide.
#[derive(Clone, Debug, PartialEq)]
pub struct PollutionCloud {
    pub rect: Rect,
    /// Pixels fallen per frame.  Zero once the game is over.
    pub vy: i32,
}

/// Purified air left behind by a catch.  Cosmetic only.
#[derive(Clone, Debug, PartialEq)]
pub struct CleanCloud {
    pub rect: Rect,
    /// Frames until removal.
    pub ttl: u32,
}

/// Box sizes for each sprite kind.  Bitmaps and procedural fallbacks are
/// drawn at different sizes, so this depends on which assets loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteSizes {
    pub player: (i32, i32),
    pub hazard: (i32, i32),
    pub reward: (i32, i32),
}

impl SpriteSizes {
    pub const BITMAP_PLAYER: (i32, i32) = (60, 60);
    pub const BITMAP_HAZARD: (i32, i32) = (50, 50);
    pub const BITMAP_REWARD: (i32, i32) = (60, 60);
    pub const FALLBACK_PLAYER: (i32, i32) = (50, 50);
    pub const FALLBACK_HAZARD: (i32, i32) = (40, 40);
    pub const FALLBACK_REWARD: (i32, i32) = (50, 50);

    /// Sizes used when no bitmap loaded.
    pub fn fallback() -> Self {
        Self {
            player: Self::FALLBACK_PLAYER,
            hazard: Self::FALLBACK_HAZARD,
            reward: Self::FALLBACK_REWARD,
        }
    }
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self::fallback()
    }
}

// ── Score keeping ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    OutOfLives,
    CriticalPollution,
}

impl GameOverReason {
    pub fn message(&self) -> &'static str {
        match self {
            GameOverReason::OutOfLives => "Out of lives! Game over.",
            GameOverReason::CriticalPollution => "Critical CO level! Game over.",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver(GameOverReason),
}

/// A transient banner shown near the top of the screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub frames_left: u32,
}

/// Educational messages shown at random after a catch.
pub const ALERT_MESSAGES: [&str; 3] = [
    "Clean air! Remember to ventilate indoor spaces.",
    "CO absorbed! Carbon monoxide has no smell and no colour.",
    "Well done! A CO detector saves lives.",
];

/// Score, lives and the pollution meter.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub score: u32,
    /// Raw pollution counter.  Misses push it up without a ceiling; read it
    /// through `pollution_level()` for anything the player sees.
    pub pollution: i32,
    pub max_pollution: i32,
    pub lives: i32,
    pub status: GameStatus,
    pub alert: Option<Alert>,
}

impl GameState {
    pub fn new(lives: i32, max_pollution: i32) -> Self {
        Self {
            score: 0,
            pollution: 0,
            max_pollution,
            lives,
            status: GameStatus::Playing,
            alert: None,
        }
    }

    /// Pollution clamped to `[0, max_pollution]`.
    pub fn pollution_level(&self) -> i32 {
        self.pollution.clamp(0, self.max_pollution)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver(_))
    }

    /// Replace any alert currently showing and restart its countdown.
    pub fn show_alert(&mut self, message: impl Into<String>, frames: u32) {
        self.alert = Some(Alert {
            message: message.into(),
            frames_left: frames,
        });
    }

    /// Message to draw this frame, if any.
    pub fn visible_alert(&self) -> Option<&str> {
        self.alert
            .as_ref()
            .filter(|a| a.frames_left > 0)
            .map(|a| a.message.as_str())
    }
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire simulation.  Cloneable so pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub hazards: Vec<PollutionCloud>,
    pub rewards: Vec<CleanCloud>,
    pub state: GameState,
    pub rules: Rules,
    pub sizes: SpriteSizes,
    pub width: i32,
    pub height: i32,
    pub frame: u64,
}

/// Colour band of the pollution meter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeterBand {
    Low,
    Elevated,
    Critical,
}
