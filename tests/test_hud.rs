use std::io::Write;

use space_shooter::assets::*;
use space_shooter::compute::{init_state, start_game, GameWorld};
use space_shooter::config::Rules;
use space_shooter::entities::*;
use space_shooter::hud::*;

fn make_state() -> GameWorld {
    start_game(&init_state(Rules::default()))
}

// ── HUD ───────────────────────────────────────────────────────────────────────

#[test]
fn hud_texts_for_fresh_game() {
    let hud = HudInfo::from_world(&make_state());
    assert_eq!(hud.score_text, "Score: 0");
    assert_eq!(hud.level_text, "Level: 1");
    assert_eq!(hud.weapon_text, "Weapon: Basic");
    assert_eq!(hud.health_fraction, 1.0);
    assert_eq!(hud.health_band, HealthBand::Green);
    assert_eq!(hud.shield_fraction, 0.0);
    assert!(!hud.boss_warning);
}

#[test]
fn hud_tracks_player_state() {
    let mut s = make_state();
    s.player.score = 1234;
    s.player.weapon = WeaponTier::Triple;
    s.player.health = 50;
    s.player.activate_shield();
    s.player.take_damage(25);
    s.boss_warning = 1.5;
    let hud = HudInfo::from_world(&s);
    assert_eq!(hud.score_text, "Score: 1234");
    assert_eq!(hud.weapon_text, "Weapon: Triple");
    assert_eq!(hud.health_band, HealthBand::Yellow);
    assert_eq!(hud.shield_fraction, 0.75);
    assert!(hud.boss_warning);
}

#[test]
fn health_band_thresholds() {
    assert_eq!(HealthBand::for_fraction(0.61), HealthBand::Green);
    assert_eq!(HealthBand::for_fraction(0.6), HealthBand::Yellow);
    assert_eq!(HealthBand::for_fraction(0.31), HealthBand::Yellow);
    assert_eq!(HealthBand::for_fraction(0.3), HealthBand::Red);
    assert_eq!(HealthBand::for_fraction(0.0), HealthBand::Red);
}

#[test]
fn screen_for_each_status() {
    assert_eq!(Screen::for_status(GameStatus::MainMenu), Screen::Menu);
    assert_eq!(Screen::for_status(GameStatus::Playing), Screen::Field);
    assert_eq!(Screen::for_status(GameStatus::BossFight), Screen::Field);
    assert_eq!(
        Screen::for_status(GameStatus::GameOver),
        Screen::FieldWithGameOver
    );
    assert_eq!(
        Screen::for_status(GameStatus::Victory),
        Screen::FieldWithVictory
    );
}

// ── Glyph theme ───────────────────────────────────────────────────────────────

#[test]
fn missing_glyph_file_uses_builtin_theme() {
    let dir = tempfile::tempdir().unwrap();
    let theme = load_glyphs(&dir.path().join("nope.toml"));
    assert_eq!(theme, GlyphTheme::default());
}

#[test]
fn partial_glyph_file_overrides_some_glyphs() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "particle = \"+\"").unwrap();
    writeln!(file, "boss = [\"BOSS\"]").unwrap();
    let theme = load_glyphs(file.path());
    assert_eq!(theme.particle, "+");
    assert_eq!(theme.enemy(EnemyKind::Boss).to_vec(), vec!["BOSS".to_string()]);
    assert_eq!(theme.player, GlyphTheme::default().player);
}

#[test]
fn malformed_glyph_file_uses_builtin_theme() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "particle = [[[").unwrap();
    assert_eq!(load_glyphs(file.path()), GlyphTheme::default());
}

#[test]
fn glyph_lookup_by_kind() {
    let theme = GlyphTheme::default();
    assert_eq!(theme.powerup(PowerUpKind::ScoreBoost), "$");
    assert_eq!(theme.enemy(EnemyKind::Fast), theme.enemy_fast.as_slice());
    assert!(!theme.enemy(EnemyKind::Boss).is_empty());
}

// ── Sound ─────────────────────────────────────────────────────────────────────

#[test]
fn bell_rings_only_for_loud_cues() {
    let mut bell = TerminalBell::new(Vec::new());
    bell.play_all(&[
        SoundCue::Shoot,
        SoundCue::Explosion,
        SoundCue::PowerUp,
        SoundCue::Upgrade,
        SoundCue::BossArrival,
    ]);
    assert_eq!(bell.into_inner(), b"\x07\x07".to_vec());
}

#[test]
fn silent_player_accepts_everything() {
    let mut silent = Silent;
    silent.play_all(&[SoundCue::Explosion, SoundCue::BossArrival]);
}
