use space_shooter::compute::*;
use space_shooter::config::Rules;
use space_shooter::enemy::{BossEnemy, Enemy};
use space_shooter::entities::*;
use space_shooter::level::Level;
use space_shooter::powerup::PowerUp;
use space_shooter::projectile::{Bullet, Laser};

use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

/// A fresh session: player at (400, 550), 50×50 hitbox.
fn make_state() -> GameWorld {
    start_game(&init_state(Rules::default()))
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> InputState {
    InputState::default()
}

fn step(s: &GameWorld) -> GameWorld {
    tick(s, &idle(), DT, &mut seeded_rng())
}

/// A world already in the boss fight for level 2, boss parked at (400, 100).
fn boss_fight_state(level: Level) -> GameWorld {
    let mut s = make_state();
    s.status = GameStatus::BossFight;
    s.level = level;
    s.boss = Some(BossEnemy::new(400.0, 100.0));
    s
}

fn level_with_boss_pending(current: u32) -> Level {
    let mut level = Level::starting_at(current - 1);
    let needed = level.enemies_for_next_level();
    level.update(needed);
    level
}

// ── init_state / start_game ───────────────────────────────────────────────────

#[test]
fn init_state_sits_on_main_menu() {
    let s = init_state(Rules::default());
    assert_eq!(s.status, GameStatus::MainMenu);
    assert_eq!(s.player.position(), Vec2::new(400.0, 550.0));
    assert_eq!(s.player.health, 100);
    assert_eq!(s.level.current(), 1);
}

#[test]
fn start_game_empty_collections() {
    let s = make_state();
    assert_eq!(s.status, GameStatus::Playing);
    assert!(s.bullets.is_empty());
    assert!(s.enemy_bullets.is_empty());
    assert!(s.lasers.is_empty());
    assert!(s.enemies.is_empty());
    assert!(s.powerups.is_empty());
    assert!(s.explosions.is_empty());
    assert!(s.boss.is_none());
    assert_eq!(s.player.score, 0);
}

#[test]
fn start_only_works_from_menu() {
    let menu = init_state(Rules::default());
    assert_eq!(start_pressed(&menu).status, GameStatus::Playing);

    let mut over = make_state();
    over.status = GameStatus::GameOver;
    assert_eq!(start_pressed(&over).status, GameStatus::GameOver);
}

#[test]
fn restart_ignored_on_menu_and_mid_game() {
    let menu = init_state(Rules::default());
    assert_eq!(restart_pressed(&menu).status, GameStatus::MainMenu);

    let mut playing = make_state();
    playing.player.score = 120;
    let s2 = restart_pressed(&playing);
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.player.score, 120);
}

#[test]
fn restart_after_game_over_resets_everything() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.player.health = 0;
    s.player.score = 730;
    s.player.weapon = WeaponTier::Triple;
    s.player.activate_shield();
    s.level.update(20);
    s.enemies.push(Enemy::new(EnemyKind::Fast, 100.0, 100.0));
    s.bullets.push(Bullet::player(10.0, 10.0, 10.0));
    s.enemy_bullets.push(Bullet::enemy(10.0, 10.0));
    s.lasers.push(Laser::new(10.0, 10.0));
    s.powerups.push(PowerUp::new(PowerUpKind::Health, 10.0, 10.0));
    s.boss = Some(BossEnemy::new(400.0, 100.0));
    s.enemy_spawn_timer = 1.2;

    let s2 = restart_pressed(&s);
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.player.health, 100);
    assert_eq!(s2.player.score, 0);
    assert_eq!(s2.player.weapon, WeaponTier::Basic);
    assert!(!s2.player.has_shield());
    assert_eq!(s2.level.current(), 1);
    assert!(!s2.level.is_boss_level());
    assert!(s2.enemies.is_empty());
    assert!(s2.bullets.is_empty());
    assert!(s2.enemy_bullets.is_empty());
    assert!(s2.lasers.is_empty());
    assert!(s2.powerups.is_empty());
    assert!(s2.boss.is_none());
    assert_eq!(s2.enemy_spawn_timer, 0.0);
}

#[test]
fn restart_after_victory() {
    let mut s = make_state();
    s.status = GameStatus::Victory;
    s.player.score = 5000;
    let s2 = restart_pressed(&s);
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.player.score, 0);
}

// ── tick: bookkeeping ────────────────────────────────────────────────────────

#[test]
fn tick_increments_frame() {
    let mut s = make_state();
    s.frame = 5;
    assert_eq!(step(&s).frame, 6);
}

#[test]
fn tick_does_not_mutate_original() {
    let mut s = make_state();
    s.bullets.push(Bullet::player(100.0, 300.0, 10.0));
    let _ = step(&s);
    assert_eq!(s.bullets[0].position().y, 300.0);
}

#[test]
fn tick_on_menu_changes_nothing_but_frame() {
    let mut s = init_state(Rules::default());
    s.enemy_spawn_timer = 1.49;
    let s2 = step(&s);
    assert_eq!(s2.status, GameStatus::MainMenu);
    assert!(s2.enemies.is_empty());
    assert_eq!(s2.enemy_spawn_timer, 1.49);
}

#[test]
fn tick_after_game_over_freezes_field() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.enemies.push(Enemy::new(EnemyKind::Basic, 200.0, 200.0));
    let s2 = step(&s);
    assert_eq!(s2.enemies[0].position().y, 200.0);
}

// ── tick: player & firing ────────────────────────────────────────────────────

#[test]
fn tick_moves_player_with_input() {
    let s = make_state();
    let input = InputState {
        left: true,
        ..InputState::default()
    };
    let s2 = tick(&s, &input, 0.1, &mut seeded_rng());
    assert!((s2.player.position().x - 370.0).abs() < 1e-3);
}

#[test]
fn tick_fire_spawns_bullet_and_cue() {
    let s = make_state();
    let fire = InputState {
        fire: true,
        ..InputState::default()
    };
    let s2 = tick(&s, &fire, DT, &mut seeded_rng());
    assert_eq!(s2.bullets.len(), 1);
    assert!(s2.sounds.contains(&SoundCue::Shoot));

    // Still inside the 0.25 s cooldown
    let s3 = tick(&s2, &fire, DT, &mut seeded_rng());
    assert_eq!(s3.bullets.len(), 1);
    assert!(!s3.sounds.contains(&SoundCue::Shoot));
}

#[test]
fn tick_fire_with_laser_tier_spawns_laser() {
    let mut s = make_state();
    s.player.weapon = WeaponTier::Laser;
    let fire = InputState {
        fire: true,
        ..InputState::default()
    };
    let s2 = tick(&s, &fire, DT, &mut seeded_rng());
    assert_eq!(s2.lasers.len(), 1);
    assert!(s2.bullets.is_empty());
}

// ── tick: player bullets ─────────────────────────────────────────────────────

#[test]
fn tick_player_bullet_moves_up() {
    let mut s = make_state();
    s.bullets.push(Bullet::player(100.0, 300.0, 10.0));
    let s2 = tick(&s, &idle(), 0.1, &mut seeded_rng());
    assert!((s2.bullets[0].position().y - 240.0).abs() < 1e-3);
}

#[test]
fn tick_player_bullet_discarded_off_top() {
    let mut s = make_state();
    s.bullets.push(Bullet::player(100.0, 5.0, 10.0)); // moves to -5
    s.bullets.push(Bullet::player(200.0, 50.0, 10.0)); // moves to 40
    let s2 = step(&s);
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].position().x, 200.0);
}

#[test]
fn tick_bullet_damages_enemy_and_is_consumed() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(EnemyKind::Basic, 200.0, 200.0)); // 20 hp
    s.bullets.push(Bullet::player(200.0, 210.0, 10.0));
    let s2 = step(&s);
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemies[0].health, 10.0);
    assert_eq!(s2.player.score, 0);
}

#[test]
fn tick_bullet_kill_awards_score_explosion_and_level_credit() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(EnemyKind::Basic, 200.0, 200.0));
    s.bullets.push(Bullet::player(200.0, 210.0, 20.0));
    let s2 = step(&s);
    assert!(s2.enemies.is_empty());
    assert_eq!(s2.player.score, 10);
    assert_eq!(s2.explosions.len(), 1);
    assert_eq!(s2.level.defeated(), 1);
    assert!(s2.sounds.contains(&SoundCue::Explosion));
}

#[test]
fn tick_bullet_hits_only_first_overlapping_enemy() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(EnemyKind::Basic, 200.0, 200.0));
    s.enemies.push(Enemy::new(EnemyKind::Basic, 205.0, 200.0));
    s.bullets.push(Bullet::player(200.0, 210.0, 10.0));
    let s2 = step(&s);
    assert_eq!(s2.enemies[0].health, 10.0);
    assert_eq!(s2.enemies[1].health, 20.0);
}

#[test]
fn tick_each_bullet_resolves_independently() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(EnemyKind::Tanky, 200.0, 200.0)); // 40 hp
    for _ in 0..3 {
        s.bullets.push(Bullet::player(200.0, 210.0, 10.0));
    }
    let s2 = step(&s);
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.enemies[0].health, 10.0);
}

#[test]
fn tick_bullet_misses_distant_enemy() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(EnemyKind::Basic, 200.0, 200.0)); // spans x 175..225
    s.bullets.push(Bullet::player(240.0, 210.0, 10.0)); // spans x 235..245
    let s2 = step(&s);
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.enemies[0].health, 20.0);
}

// ── tick: lasers ─────────────────────────────────────────────────────────────

#[test]
fn tick_laser_damages_every_overlapping_enemy_and_survives() {
    let mut s = make_state();
    // Beam is 10×600 centred on (200, 250): y spans -50..550
    s.lasers.push(Laser::new(200.0, 250.0));
    s.enemies.push(Enemy::new(EnemyKind::Tanky, 200.0, 100.0));
    s.enemies.push(Enemy::new(EnemyKind::Tanky, 200.0, 300.0));
    let s2 = step(&s);
    assert_eq!(s2.lasers.len(), 1);
    assert_eq!(s2.enemies[0].health, 39.0);
    assert_eq!(s2.enemies[1].health, 39.0);
}

#[test]
fn tick_laser_expires_after_lifetime() {
    let mut s = make_state();
    s.lasers.push(Laser::new(200.0, 250.0));
    for _ in 0..29 {
        s = step(&s);
    }
    assert_eq!(s.lasers.len(), 1);
    for _ in 0..2 {
        s = step(&s);
    }
    assert!(s.lasers.is_empty());
}

#[test]
fn tick_laser_kill_credits_player() {
    let mut s = make_state();
    s.lasers.push(Laser::new(200.0, 250.0));
    let mut fast = Enemy::new(EnemyKind::Fast, 200.0, 100.0);
    fast.health = 1.0;
    s.enemies.push(fast);
    let s2 = step(&s);
    assert!(s2.enemies.is_empty());
    assert_eq!(s2.player.score, 15);
    assert_eq!(s2.level.defeated(), 1);
}

#[test]
fn tick_laser_damages_boss() {
    let mut s = boss_fight_state(level_with_boss_pending(2));
    s.lasers.push(Laser::new(400.0, 250.0));
    let s2 = step(&s);
    let boss = s2.boss.as_ref().expect("boss still alive");
    assert_eq!(boss.health(), 499.0);
}

// ── tick: enemies ────────────────────────────────────────────────────────────

#[test]
fn tick_enemy_moves_down() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(EnemyKind::Fast, 200.0, 100.0));
    let s2 = tick(&s, &idle(), 0.1, &mut seeded_rng());
    assert!((s2.enemies[0].position().y - 125.0).abs() < 1e-3);
}

#[test]
fn tick_enemy_culled_past_bottom_without_penalty() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(EnemyKind::Basic, 50.0, 599.0)); // far from the player
    let s2 = step(&s);
    assert!(s2.enemies.is_empty());
    assert_eq!(s2.player.health, 100);
    assert_eq!(s2.player.score, 0);
    assert!(s2.explosions.is_empty());
}

#[test]
fn tick_enemy_body_hit_damages_player_and_destroys_enemy() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(EnemyKind::Basic, 400.0, 550.0));
    let s2 = step(&s);
    assert_eq!(s2.player.health, 75);
    assert!(s2.enemies.is_empty());
    assert_eq!(s2.explosions.len(), 1);
    // Ramming is not a kill
    assert_eq!(s2.player.score, 0);
    assert_eq!(s2.level.defeated(), 0);
}

#[test]
fn four_body_hits_end_the_game() {
    let mut s = make_state();
    for _ in 0..3 {
        s.enemies.push(Enemy::new(EnemyKind::Basic, 400.0, 550.0));
        s = step(&s);
    }
    assert_eq!(s.player.health, 25);
    assert_eq!(s.status, GameStatus::Playing);

    let before = s.explosions.len();
    s.enemies.push(Enemy::new(EnemyKind::Basic, 400.0, 550.0));
    s = step(&s);
    assert_eq!(s.player.health, 0);
    assert_eq!(s.status, GameStatus::GameOver);
    // One for the enemy, one for the player
    assert_eq!(s.explosions.len(), before + 2);
}

#[test]
fn shield_absorbs_body_hit() {
    let mut s = make_state();
    s.player.activate_shield();
    s.enemies.push(Enemy::new(EnemyKind::Basic, 400.0, 550.0));
    let s2 = step(&s);
    assert_eq!(s2.player.health, 100);
    assert!(s2.player.shield_health() < 80.0);
    assert!(s2.player.has_shield());
}

// ── tick: enemy bullets ──────────────────────────────────────────────────────

#[test]
fn tick_enemy_bullet_hits_player() {
    let mut s = make_state();
    s.enemy_bullets.push(Bullet::enemy(400.0, 540.0));
    let s2 = step(&s);
    assert_eq!(s2.player.health, 90);
    assert!(s2.enemy_bullets.is_empty());
}

#[test]
fn tick_enemy_bullet_discarded_off_bottom() {
    let mut s = make_state();
    s.enemy_bullets.push(Bullet::enemy(50.0, 599.0));
    s.enemy_bullets.push(Bullet::enemy(50.0, 300.0));
    let s2 = step(&s);
    assert_eq!(s2.enemy_bullets.len(), 1);
    assert_eq!(s2.player.health, 100);
}

#[test]
fn tick_enemy_bullet_can_end_the_game() {
    let mut s = make_state();
    s.player.health = 10;
    s.enemy_bullets.push(Bullet::enemy(400.0, 540.0));
    let s2 = step(&s);
    assert_eq!(s2.player.health, 0);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.explosions.len(), 1);
}

#[test]
fn pickup_cannot_revive_player_killed_this_frame() {
    let mut s = make_state();
    s.player.health = 25;
    s.enemies.push(Enemy::new(EnemyKind::Basic, 400.0, 550.0));
    s.powerups.push(PowerUp::new(PowerUpKind::Health, 400.0, 550.0));
    let s2 = step(&s);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.player.health, 0);
    assert_eq!(s2.powerups.len(), 1);
}

// ── tick: power-ups ──────────────────────────────────────────────────────────

fn collect(kind: PowerUpKind, s: &GameWorld) -> GameWorld {
    let mut s = s.clone();
    s.powerups.push(PowerUp::new(kind, 400.0, 550.0));
    let s2 = step(&s);
    assert!(s2.powerups.is_empty());
    s2
}

#[test]
fn health_pickup_heals_capped() {
    let mut s = make_state();
    s.player.health = 50;
    assert_eq!(collect(PowerUpKind::Health, &s).player.health, 75);
    s.player.health = 90;
    assert_eq!(collect(PowerUpKind::Health, &s).player.health, 100);
}

#[test]
fn shield_pickup_activates_shield() {
    let s2 = collect(PowerUpKind::Shield, &make_state());
    assert!(s2.player.has_shield());
    assert!(s2.sounds.contains(&SoundCue::PowerUp));
}

#[test]
fn weapon_pickup_upgrades() {
    let s2 = collect(PowerUpKind::WeaponUpgrade, &make_state());
    assert_eq!(s2.player.weapon, WeaponTier::Double);
    assert!(s2.sounds.contains(&SoundCue::Upgrade));
}

#[test]
fn score_pickup_adds_fifty() {
    let s2 = collect(PowerUpKind::ScoreBoost, &make_state());
    assert_eq!(s2.player.score, 50);
}

#[test]
fn powerup_falls_and_is_culled() {
    let mut s = make_state();
    s.powerups.push(PowerUp::new(PowerUpKind::Health, 50.0, 100.0));
    s.powerups.push(PowerUp::new(PowerUpKind::Health, 50.0, 599.0));
    let s2 = tick(&s, &idle(), 0.1, &mut seeded_rng());
    assert_eq!(s2.powerups.len(), 1);
    assert!((s2.powerups[0].position().y - 115.0).abs() < 1e-3);
}

// ── tick: spawning ───────────────────────────────────────────────────────────

#[test]
fn tick_enemy_spawns_on_interval() {
    let mut s = make_state();
    s.enemy_spawn_timer = 1.49; // interval at level 1 is 1.5 s
    let s2 = step(&s);
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemy_spawn_timer, 0.0);
    let e = &s2.enemies[0];
    // Level 1 only unlocks the basic kind
    assert_eq!(e.kind, EnemyKind::Basic);
    assert!(e.position().x >= 25.0 && e.position().x < 775.0);
    // Spawned at -50 then advanced this frame
    assert!((e.position().y - (-50.0 + 150.0 * DT)).abs() < 1e-3);
}

#[test]
fn tick_no_spawn_before_interval() {
    let s = make_state();
    let s2 = step(&s);
    assert!(s2.enemies.is_empty());
    assert!((s2.enemy_spawn_timer - DT).abs() < 1e-6);
}

#[test]
fn tick_powerup_spawns_on_interval() {
    let mut s = make_state();
    s.powerup_spawn_timer = 9.99;
    let s2 = step(&s);
    assert_eq!(s2.powerups.len(), 1);
    assert_eq!(s2.powerup_spawn_timer, 0.0);
}

#[test]
fn higher_levels_unlock_tougher_kinds() {
    let mut s = make_state();
    s.level = Level::starting_at(3);
    let mut rng = seeded_rng();
    let mut seen = Vec::new();
    for _ in 0..60 {
        s.enemy_spawn_timer = 10.0;
        s = tick(&s, &idle(), DT, &mut rng);
        let kind = s.enemies.last().expect("spawned").kind;
        if !seen.contains(&kind) {
            seen.push(kind);
        }
        s.enemies.clear();
    }
    assert!(seen.contains(&EnemyKind::Tanky));
    assert!(!seen.contains(&EnemyKind::Boss));
}

#[test]
fn same_seed_same_spawn_sequence() {
    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut s = make_state();
        for _ in 0..200 {
            s = tick(&s, &idle(), DT, &mut rng);
        }
        s.enemies
            .iter()
            .map(|e| (e.kind, e.position().x))
            .collect::<Vec<_>>()
    };
    let a = run(7);
    assert!(!a.is_empty());
    assert_eq!(a, run(7));
}

// ── tick: boss fight ─────────────────────────────────────────────────────────

#[test]
fn boss_flag_starts_boss_fight_with_warning() {
    let mut s = make_state();
    s.level.update(20);
    let s2 = step(&s);
    assert_eq!(s2.status, GameStatus::BossFight);
    assert_eq!(s2.boss_warning, 3.0);
    assert!(s2.boss.is_none());

    let s3 = step(&s2);
    let boss = s3.boss.as_ref().expect("boss spawned");
    assert_eq!(boss.position(), Vec2::new(400.0, -50.0));
    assert!(s3.sounds.contains(&SoundCue::BossArrival));
    assert!(s3.boss_warning < 3.0);
}

#[test]
fn boss_fight_pauses_regular_spawns() {
    let mut s = boss_fight_state(level_with_boss_pending(2));
    s.enemy_spawn_timer = 1.49;
    s.powerup_spawn_timer = 9.99;
    let s2 = step(&s);
    assert!(s2.enemies.is_empty());
    assert!(s2.powerups.is_empty());
}

#[test]
fn boss_fires_spread() {
    let s = boss_fight_state(level_with_boss_pending(2));
    let s2 = step(&s);
    assert_eq!(s2.enemy_bullets.len(), 3);
    assert!(s2
        .enemy_bullets
        .iter()
        .all(|b| b.owner == BulletOwner::Enemy));
}

#[test]
fn boss_destroyed_by_twenty_five_hits() {
    let mut s = boss_fight_state(level_with_boss_pending(2));
    for _ in 0..25 {
        s.bullets.push(Bullet::player(400.0, 100.0, 20.0));
    }
    let s2 = step(&s);
    assert!(s2.boss.is_none());
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.player.score, 500);
    assert_eq!(s2.explosions.len(), 1);
    assert!(!s2.level.is_boss_level());
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn boss_survives_twenty_four_hits() {
    let mut s = boss_fight_state(level_with_boss_pending(2));
    for _ in 0..24 {
        s.bullets.push(Bullet::player(400.0, 100.0, 20.0));
    }
    let s2 = step(&s);
    assert_eq!(s2.boss.as_ref().map(|b| b.health()), Some(20.0));
    assert_eq!(s2.status, GameStatus::BossFight);
    assert_eq!(s2.player.score, 0);
}

#[test]
fn final_boss_brings_victory() {
    let mut s = boss_fight_state(level_with_boss_pending(5));
    assert_eq!(s.level.current(), 5);
    for _ in 0..25 {
        s.bullets.push(Bullet::player(400.0, 100.0, 20.0));
    }
    let s2 = step(&s);
    assert_eq!(s2.status, GameStatus::Victory);
    assert_eq!(s2.player.score, 500);
}

#[test]
fn enemy_at_boss_position_takes_bullet_first() {
    let mut s = boss_fight_state(level_with_boss_pending(2));
    s.enemies.push(Enemy::new(EnemyKind::Tanky, 400.0, 100.0));
    s.bullets.push(Bullet::player(400.0, 100.0, 20.0));
    let s2 = step(&s);
    assert_eq!(s2.enemies[0].health, 20.0);
    assert_eq!(s2.boss.as_ref().map(|b| b.health()), Some(500.0));
}

// ── Score never decreases ─────────────────────────────────────────────────────

#[test]
fn score_is_monotonic_over_a_session() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    let fire = InputState {
        fire: true,
        ..InputState::default()
    };
    let mut last = 0;
    for _ in 0..600 {
        s = tick(&s, &fire, DT, &mut rng);
        assert!(s.player.score >= last);
        last = s.player.score;
    }
}
