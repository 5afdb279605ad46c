/// The simulation loop.
///
/// Every public function takes an immutable reference to the current
/// `GameWorld` (and, where needed, an RNG handle) and returns a brand-new
/// `GameWorld`.  Side effects are limited to the injected RNG.
use std::mem;

use rand::Rng;
use tracing::{debug, info};

use crate::config::Rules;
use crate::enemy::{BossEnemy, Enemy, SPAWNABLE};
use crate::entities::{GameStatus, InputState, PowerUpKind, SoundCue, Vec2, WeaponTier};
use crate::explosion::Explosion;
use crate::level::Level;
use crate::player::Player;
use crate::powerup::{PowerUp, ALL_KINDS};
use crate::projectile::{Bullet, Laser};

/// Healing granted by a health pickup.
pub const HEAL_AMOUNT: u32 = 25;
/// Score granted by a score pickup.
pub const SCORE_BOOST: u32 = 50;
/// Spawned enemies and power-ups start this far above the top edge.
pub const SPAWN_Y: f32 = -50.0;
/// Keeps spawns clear of the side walls.
pub const SPAWN_MARGIN: f32 = 25.0;
pub const BOSS_EXPLOSION_SCALE: f32 = 2.0;

// ── World state ──────────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so `tick` can return a new copy
/// without mutating the original.
#[derive(Clone, Debug)]
pub struct GameWorld {
    pub player: Player,
    /// Upward bullets fired by the player.
    pub bullets: Vec<Bullet>,
    /// Downward bullets fired by the boss.
    pub enemy_bullets: Vec<Bullet>,
    pub lasers: Vec<Laser>,
    pub enemies: Vec<Enemy>,
    pub boss: Option<BossEnemy>,
    pub powerups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    pub level: Level,
    pub status: GameStatus,
    pub enemy_spawn_timer: f32,
    pub powerup_spawn_timer: f32,
    /// Seconds the boss warning banner stays up.
    pub boss_warning: f32,
    /// Sounds triggered during the most recent tick.
    pub sounds: Vec<SoundCue>,
    pub frame: u64,
    pub rules: Rules,
}

// ── Constructors and menu transitions ───────────────────────────────────────

/// A world sitting on the main menu.
pub fn init_state(rules: Rules) -> GameWorld {
    GameWorld {
        player: Player::new(rules.width / 2.0, rules.height - 50.0),
        bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        lasers: Vec::new(),
        enemies: Vec::new(),
        boss: None,
        powerups: Vec::new(),
        explosions: Vec::new(),
        level: Level::default(),
        status: GameStatus::MainMenu,
        enemy_spawn_timer: 0.0,
        powerup_spawn_timer: 0.0,
        boss_warning: 0.0,
        sounds: Vec::new(),
        frame: 0,
        rules,
    }
}

/// Fresh session: full player, empty field, level 1, status `Playing`.
pub fn start_game(state: &GameWorld) -> GameWorld {
    info!("starting new game");
    GameWorld {
        status: GameStatus::Playing,
        ..init_state(state.rules)
    }
}

/// The start key only does something on the main menu.
pub fn start_pressed(state: &GameWorld) -> GameWorld {
    match state.status {
        GameStatus::MainMenu => start_game(state),
        _ => state.clone(),
    }
}

/// The restart key only does something once the session has ended.
pub fn restart_pressed(state: &GameWorld) -> GameWorld {
    match state.status {
        GameStatus::GameOver | GameStatus::Victory => start_game(state),
        _ => state.clone(),
    }
}

// ── Per-frame tick (nearly pure, RNG is injected) ─────────────────────────

/// Advance the simulation by `dt` seconds.  All randomness comes through
/// `rng` so callers control determinism.
pub fn tick(state: &GameWorld, input: &InputState, dt: f32, rng: &mut impl Rng) -> GameWorld {
    let mut next = state.clone();
    next.step(input, dt, rng);
    next
}

impl GameWorld {
    fn step(&mut self, input: &InputState, dt: f32, rng: &mut impl Rng) {
        self.sounds.clear();
        self.frame += 1;

        match self.status {
            GameStatus::MainMenu => {}
            GameStatus::GameOver | GameStatus::Victory => self.update_explosions(dt),
            GameStatus::Playing | GameStatus::BossFight => self.update_field(input, dt, rng),
        }
    }

    fn update_field(&mut self, input: &InputState, dt: f32, rng: &mut impl Rng) {
        // ── 1. Player & firing ───────────────────────────────────────────────
        let bounds = Vec2::new(self.rules.width, self.rules.height);
        self.player.update(dt, input, bounds);
        if input.fire && self.player.can_shoot() {
            self.fire();
        }

        // ── 2. Spawning (regular waves pause while the boss is up) ─────────────
        match self.status {
            GameStatus::Playing => self.advance_spawners(dt, rng),
            GameStatus::BossFight => self.update_boss(dt),
            _ => {}
        }

        // ── 3. Player weapons ────────────────────────────────────────────────
        self.update_bullets(dt, rng);
        self.update_lasers(dt, rng);
        self.check_boss_defeat(rng);

        // ── 4. Threats & pickups ─────────────────────────────────────────────
        self.update_enemy_bullets(dt, rng);
        self.update_enemies(dt, rng);
        if self.status != GameStatus::GameOver {
            self.update_powerups(dt);
        }
        self.update_explosions(dt);

        // ── 5. State transitions ─────────────────────────────────────────────
        match self.status {
            GameStatus::Playing if self.level.is_boss_level() => self.start_boss_fight(),
            GameStatus::BossFight => self.boss_warning = (self.boss_warning - dt).max(0.0),
            _ => {}
        }
    }

    fn fire(&mut self) {
        if self.player.weapon == WeaponTier::Laser {
            if let Some(laser) = self.player.shoot_laser() {
                self.lasers.push(laser);
                self.sounds.push(SoundCue::Shoot);
            }
        } else {
            self.bullets.extend(self.player.shoot());
            self.sounds.push(SoundCue::Shoot);
        }
    }

    // ── Spawning ─────────────────────────────────────────────────────────────

    fn advance_spawners(&mut self, dt: f32, rng: &mut impl Rng) {
        self.enemy_spawn_timer += dt;
        if self.enemy_spawn_timer >= self.level.enemy_spawn_interval() {
            self.spawn_enemy(rng);
            self.enemy_spawn_timer = 0.0;
        }

        self.powerup_spawn_timer += dt;
        if self.powerup_spawn_timer >= self.level.powerup_spawn_interval() {
            self.spawn_powerup(rng);
            self.powerup_spawn_timer = 0.0;
        }
    }

    /// Tougher kinds unlock as the level rises: level 1 only spawns Basic,
    /// level 2 adds Fast, level 3+ adds Tanky.
    fn spawn_enemy(&mut self, rng: &mut impl Rng) {
        let unlocked = (self.level.current() as usize).min(SPAWNABLE.len());
        let kind = SPAWNABLE[rng.gen_range(0..unlocked)];
        let x = self.spawn_x(rng);
        debug!(?kind, x, "spawn enemy");
        self.enemies.push(Enemy::new(kind, x, SPAWN_Y));
    }

    fn spawn_powerup(&mut self, rng: &mut impl Rng) {
        let kind = ALL_KINDS[rng.gen_range(0..ALL_KINDS.len())];
        let x = self.spawn_x(rng);
        debug!(?kind, x, "spawn power-up");
        self.powerups.push(PowerUp::new(kind, x, SPAWN_Y));
    }

    fn spawn_x(&self, rng: &mut impl Rng) -> f32 {
        rng.gen_range(SPAWN_MARGIN..self.rules.width - SPAWN_MARGIN)
    }

    fn spawn_explosion(&mut self, at: Vec2, scale: f32, rng: &mut impl Rng) {
        self.explosions.push(Explosion::new(at, scale, rng));
        self.sounds.push(SoundCue::Explosion);
    }

    // ── Boss ─────────────────────────────────────────────────────────────────

    fn start_boss_fight(&mut self) {
        info!(level = self.level.current(), "boss fight");
        self.status = GameStatus::BossFight;
        self.boss_warning = self.rules.boss_warning_secs;
    }

    /// The boss appears on the first boss-fight frame and acts from the next.
    fn update_boss(&mut self, dt: f32) {
        if self.boss.is_none() {
            info!("boss arrives");
            self.boss = Some(BossEnemy::new(self.rules.width / 2.0, SPAWN_Y));
            self.sounds.push(SoundCue::BossArrival);
            return;
        }
        if let Some(boss) = self.boss.as_mut() {
            boss.update(dt, self.rules.width);
            if boss.can_shoot() {
                self.enemy_bullets.extend(boss.shoot());
            }
        }
    }

    fn check_boss_defeat(&mut self, rng: &mut impl Rng) {
        let boss = match self.boss.take() {
            Some(boss) if boss.is_destroyed() => boss,
            other => {
                self.boss = other;
                return;
            }
        };

        self.spawn_explosion(boss.position(), BOSS_EXPLOSION_SCALE, rng);
        self.player.add_score(boss.score_value());
        self.level.reset_boss_flag();
        self.boss_warning = 0.0;

        if self.level.current() >= self.rules.victory_level {
            info!(score = self.player.score, "final boss defeated, victory");
            self.status = GameStatus::Victory;
        } else {
            info!(level = self.level.current(), "boss defeated");
            self.status = GameStatus::Playing;
        }
    }

    // ── Collision passes ─────────────────────────────────────────────────────
    //
    // Each pass takes its collection out of the world, compacts it in place
    // with `retain_mut` (stable order, every element visited exactly once),
    // and puts it back.

    fn update_bullets(&mut self, dt: f32, rng: &mut impl Rng) {
        let height = self.rules.height;
        let mut bullets = mem::take(&mut self.bullets);
        bullets.retain_mut(|bullet| {
            bullet.update(dt);
            if self.resolve_bullet_hit(bullet, rng) {
                return false;
            }
            !bullet.is_off_screen(height)
        });
        self.bullets = bullets;
    }

    /// Damages the first enemy (in collection order) the bullet overlaps, or
    /// the boss if no enemy was hit.  Returns true if the bullet was consumed.
    fn resolve_bullet_hit(&mut self, bullet: &Bullet, rng: &mut impl Rng) -> bool {
        let bounds = bullet.bounds();
        if let Some(i) = self
            .enemies
            .iter()
            .position(|e| e.bounds().intersects(&bounds))
        {
            self.enemies[i].take_damage(bullet.damage);
            if self.enemies[i].is_destroyed() {
                let enemy = self.enemies.remove(i);
                self.credit_kill(&enemy, rng);
            }
            return true;
        }

        if let Some(boss) = self.boss.as_mut() {
            if boss.bounds().intersects(&bounds) {
                boss.take_damage(bullet.damage);
                return true;
            }
        }
        false
    }

    /// Lasers damage everything they overlap every frame and are only
    /// removed when their lifetime runs out.
    fn update_lasers(&mut self, dt: f32, rng: &mut impl Rng) {
        let mut lasers = mem::take(&mut self.lasers);
        lasers.retain_mut(|laser| {
            laser.update(dt);
            let bounds = laser.bounds();
            let damage = laser.damage;

            let mut enemies = mem::take(&mut self.enemies);
            enemies.retain_mut(|enemy| {
                if !enemy.bounds().intersects(&bounds) {
                    return true;
                }
                enemy.take_damage(damage);
                if enemy.is_destroyed() {
                    self.credit_kill(enemy, rng);
                    return false;
                }
                true
            });
            self.enemies = enemies;

            if let Some(boss) = self.boss.as_mut() {
                if boss.bounds().intersects(&bounds) {
                    boss.take_damage(damage);
                }
            }
            laser.is_active()
        });
        self.lasers = lasers;
    }

    fn credit_kill(&mut self, enemy: &Enemy, rng: &mut impl Rng) {
        debug!(kind = ?enemy.kind, score = enemy.score_value, "enemy destroyed");
        self.spawn_explosion(enemy.position(), 1.0, rng);
        self.player.add_score(enemy.score_value);
        self.level.update(1);
    }

    fn update_enemy_bullets(&mut self, dt: f32, rng: &mut impl Rng) {
        let height = self.rules.height;
        let damage = self.rules.enemy_bullet_damage;
        let mut bullets = mem::take(&mut self.enemy_bullets);
        bullets.retain_mut(|bullet| {
            bullet.update(dt);
            if bullet.bounds().intersects(&self.player.bounds()) {
                self.hit_player(damage, rng);
                return false;
            }
            !bullet.is_off_screen(height)
        });
        self.enemy_bullets = bullets;
    }

    /// Ramming the player destroys the enemy without crediting the kill.
    fn update_enemies(&mut self, dt: f32, rng: &mut impl Rng) {
        let height = self.rules.height;
        let damage = self.rules.body_collision_damage;
        let mut enemies = mem::take(&mut self.enemies);
        enemies.retain_mut(|enemy| {
            enemy.update(dt);
            if enemy.bounds().intersects(&self.player.bounds()) {
                self.spawn_explosion(enemy.position(), 1.0, rng);
                self.hit_player(damage, rng);
                return false;
            }
            !enemy.is_off_screen(height)
        });
        self.enemies = enemies;
    }

    fn hit_player(&mut self, damage: u32, rng: &mut impl Rng) {
        self.player.take_damage(damage);
        if self.player.is_dead() && self.status != GameStatus::GameOver {
            info!(score = self.player.score, level = self.level.current(), "game over");
            self.status = GameStatus::GameOver;
            self.spawn_explosion(self.player.position(), 1.0, rng);
        }
    }

    fn update_powerups(&mut self, dt: f32) {
        let height = self.rules.height;
        let mut powerups = mem::take(&mut self.powerups);
        powerups.retain_mut(|powerup| {
            powerup.update(dt);
            if powerup.bounds().intersects(&self.player.bounds()) {
                self.apply_powerup(powerup.kind);
                return false;
            }
            !powerup.is_off_screen(height)
        });
        self.powerups = powerups;
    }

    fn apply_powerup(&mut self, kind: PowerUpKind) {
        debug!(?kind, "power-up collected");
        let cue = match kind {
            PowerUpKind::Health => {
                self.player.heal(HEAL_AMOUNT);
                SoundCue::PowerUp
            }
            PowerUpKind::Shield => {
                self.player.activate_shield();
                SoundCue::PowerUp
            }
            PowerUpKind::WeaponUpgrade => {
                self.player.upgrade_weapon();
                SoundCue::Upgrade
            }
            PowerUpKind::ScoreBoost => {
                self.player.add_score(SCORE_BOOST);
                SoundCue::PowerUp
            }
        };
        self.sounds.push(cue);
    }

    fn update_explosions(&mut self, dt: f32) {
        self.explosions.retain_mut(|explosion| explosion.update(dt));
    }
}
