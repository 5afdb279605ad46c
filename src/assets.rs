/// Presentation collaborators: the glyph theme the terminal renderer draws
/// with, and sound playback.
///
/// Both are best-effort.  A missing or broken glyph file falls back to the
/// built-in glyphs with a warning, and sound playback never reports failure
/// to the caller.
use std::io::Write;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::entities::{EnemyKind, PowerUpKind, SoundCue};

// ── Glyphs ───────────────────────────────────────────────────────────────────

/// Terminal "sprites".  Multi-row sprites are stored top row first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlyphTheme {
    pub player: Vec<String>,
    pub shield: String,
    pub enemy_basic: Vec<String>,
    pub enemy_fast: Vec<String>,
    pub enemy_tanky: Vec<String>,
    pub boss: Vec<String>,
    pub player_bullet: String,
    pub enemy_bullet: String,
    pub laser: String,
    pub powerup_health: String,
    pub powerup_shield: String,
    pub powerup_upgrade: String,
    pub powerup_score: String,
    pub particle: String,
}

impl Default for GlyphTheme {
    fn default() -> Self {
        let rows = |rows: &[&str]| -> Vec<String> { rows.iter().map(|r| r.to_string()).collect() };
        GlyphTheme {
            player: rows(&["▲", "/|\\"]),
            shield: "◯".to_string(),
            enemy_basic: rows(&["<▼>", "[_]"]),
            enemy_fast: rows(&["\\▼/"]),
            enemy_tanky: rows(&["[███]", "\\▼▼/"]),
            boss: rows(&["/=======\\", "|(◉) (◉)|", "\\==▼▼▼==/"]),
            player_bullet: "║".to_string(),
            enemy_bullet: "↓".to_string(),
            laser: "┃".to_string(),
            powerup_health: "♥".to_string(),
            powerup_shield: "◎".to_string(),
            powerup_upgrade: "★".to_string(),
            powerup_score: "$".to_string(),
            particle: "*".to_string(),
        }
    }
}

impl GlyphTheme {
    pub fn enemy(&self, kind: EnemyKind) -> &[String] {
        match kind {
            EnemyKind::Basic => &self.enemy_basic,
            EnemyKind::Fast => &self.enemy_fast,
            EnemyKind::Tanky => &self.enemy_tanky,
            EnemyKind::Boss => &self.boss,
        }
    }

    pub fn powerup(&self, kind: PowerUpKind) -> &str {
        match kind {
            PowerUpKind::Health => &self.powerup_health,
            PowerUpKind::Shield => &self.powerup_shield,
            PowerUpKind::WeaponUpgrade => &self.powerup_upgrade,
            PowerUpKind::ScoreBoost => &self.powerup_score,
        }
    }
}

/// Load the glyph theme at `path`, falling back to the built-in theme on
/// any failure.
pub fn load_glyphs(path: &Path) -> GlyphTheme {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "glyph theme unavailable, using built-in glyphs");
            return GlyphTheme::default();
        }
    };
    match toml::from_str::<GlyphTheme>(&contents) {
        Ok(theme) => {
            info!(path = %path.display(), "loaded glyph theme");
            theme
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "bad glyph theme, using built-in glyphs");
            GlyphTheme::default()
        }
    }
}

// ── Sound ────────────────────────────────────────────────────────────────────

pub trait SoundPlayer {
    /// Fire and forget.
    fn play(&mut self, cue: SoundCue);

    fn play_all(&mut self, cues: &[SoundCue]) {
        for &cue in cues {
            self.play(cue);
        }
    }
}

/// Plays nothing.
#[derive(Debug, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Rings the terminal bell for the loud cues (explosions, boss arrival).
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        TerminalBell { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SoundPlayer for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) {
        if !matches!(cue, SoundCue::Explosion | SoundCue::BossArrival) {
            return;
        }
        let rung = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        if let Err(e) = rung {
            debug!(error = %e, ?cue, "bell failed");
        }
    }
}
