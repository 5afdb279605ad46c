/// Values the renderer shows, derived from the world without mutating it.
use crate::compute::GameWorld;
use crate::entities::GameStatus;
use crate::player::PLAYER_MAX_HEALTH;
use crate::shield::SHIELD_MAX_HEALTH;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthBand {
    Green,
    Yellow,
    Red,
}

impl HealthBand {
    pub fn for_fraction(fraction: f32) -> Self {
        if fraction > 0.6 {
            HealthBand::Green
        } else if fraction > 0.3 {
            HealthBand::Yellow
        } else {
            HealthBand::Red
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HudInfo {
    pub score_text: String,
    pub level_text: String,
    pub weapon_text: String,
    /// 0.0 ..= 1.0
    pub health_fraction: f32,
    pub health_band: HealthBand,
    /// 0.0 when the shield is down.
    pub shield_fraction: f32,
    pub boss_warning: bool,
}

impl HudInfo {
    pub fn from_world(world: &GameWorld) -> Self {
        let player = &world.player;
        let health_fraction = player.health as f32 / PLAYER_MAX_HEALTH as f32;
        let shield_fraction = if player.has_shield() {
            player.shield_health() / SHIELD_MAX_HEALTH
        } else {
            0.0
        };
        HudInfo {
            score_text: format!("Score: {}", player.score),
            level_text: format!("Level: {}", world.level.current()),
            weapon_text: format!("Weapon: {}", player.weapon.label()),
            health_fraction,
            health_band: HealthBand::for_fraction(health_fraction),
            shield_fraction,
            boss_warning: world.boss_warning > 0.0,
        }
    }
}

/// What the renderer draws for a given status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Field,
    FieldWithGameOver,
    FieldWithVictory,
}

impl Screen {
    pub fn for_status(status: GameStatus) -> Self {
        match status {
            GameStatus::MainMenu => Screen::Menu,
            GameStatus::Playing | GameStatus::BossFight => Screen::Field,
            GameStatus::GameOver => Screen::FieldWithGameOver,
            GameStatus::Victory => Screen::FieldWithVictory,
        }
    }
}
