/// Runtime configuration loaded from a TOML file (default `shooter.toml`).
///
/// Every key is optional; missing keys fall back to `Default`, so a file can
/// override only what it cares about:
///
/// ```toml
/// frame_rate = 30
/// seed = 7
///
/// [rules]
/// victory_level = 3
/// ```
///
/// A missing file is not an error.  A file that exists but cannot be read,
/// parsed, or validated stops the game before the terminal is taken over.
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::{GameError, GameResult};

pub const DEFAULT_CONFIG_PATH: &str = "shooter.toml";

/// Smallest play area the spawner and boss turn margins fit in.
const MIN_PLAY_SIZE: f32 = 100.0;

/// Gameplay values the simulation reads every tick.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Logical play-area size in pixels.
    pub width: f32,
    pub height: f32,
    pub enemy_bullet_damage: u32,
    pub body_collision_damage: u32,
    /// Defeating a boss at or beyond this level wins the game.
    pub victory_level: u32,
    pub boss_warning_secs: f32,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            width: 800.0,
            height: 600.0,
            enemy_bullet_damage: 10,
            body_collision_damage: 25,
            victory_level: 5,
            boss_warning_secs: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub frame_rate: u32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Ring the terminal bell on explosions and boss arrival.
    pub bell: bool,
    pub log_file: PathBuf,
    /// Glyph theme used by the terminal renderer.
    pub glyphs: PathBuf,
    pub rules: Rules,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            frame_rate: 60,
            seed: None,
            bell: false,
            log_file: PathBuf::from("shooter.log"),
            glyphs: PathBuf::from("assets/glyphs.toml"),
            rules: Rules::default(),
        }
    }
}

impl GameConfig {
    /// Seconds simulated per tick.
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.frame_rate == 0 {
            return Err(GameError::InvalidConfig {
                field: "frame_rate",
                reason: "must be at least 1",
            });
        }
        if !(self.rules.width >= MIN_PLAY_SIZE) {
            return Err(GameError::InvalidConfig {
                field: "rules.width",
                reason: "must be at least 100",
            });
        }
        if !(self.rules.height >= MIN_PLAY_SIZE) {
            return Err(GameError::InvalidConfig {
                field: "rules.height",
                reason: "must be at least 100",
            });
        }
        if self.rules.victory_level < 2 {
            return Err(GameError::InvalidConfig {
                field: "rules.victory_level",
                reason: "the first boss arrives at level 2",
            });
        }
        Ok(())
    }
}

/// Read and validate the config at `path`, or return defaults if the file
/// does not exist.
pub fn load_config(path: &Path) -> GameResult<GameConfig> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        Err(source) => {
            return Err(GameError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config: GameConfig = toml::from_str(&contents).map_err(|source| GameError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}
