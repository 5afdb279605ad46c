/// Enemy ships and the boss phase machine.
use crate::entities::{EnemyKind, Entity, Rect, Vec2};
use crate::projectile::Bullet;

/// Boss stops descending once it reaches this height.
pub const BOSS_CRUISE_Y: f32 = 100.0;
/// Distance from either side wall at which the boss turns around.
pub const BOSS_TURN_MARGIN: f32 = 100.0;
pub const BOSS_PHASE_SECS: f32 = 2.0;
pub const BOSS_STRAFE_FACTOR: f32 = 1.5;
pub const BOSS_SHOT_INTERVAL: f32 = 0.5;

/// Health, speed and score per kind.
pub fn stats_for(kind: EnemyKind) -> (f32, f32, u32) {
    match kind {
        EnemyKind::Basic => (20.0, 150.0, 10),
        EnemyKind::Fast => (10.0, 250.0, 15),
        EnemyKind::Tanky => (40.0, 100.0, 20),
        EnemyKind::Boss => (500.0, 50.0, 500),
    }
}

/// Kinds available to the regular spawner, in draw order.
pub const SPAWNABLE: [EnemyKind; 3] = [EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Tanky];

// ── Enemy ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub entity: Entity,
    pub kind: EnemyKind,
    pub health: f32,
    pub speed: f32,
    pub score_value: u32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32) -> Self {
        let (health, speed, score_value) = stats_for(kind);
        let entity = match kind {
            EnemyKind::Boss => Entity::new(150.0, 150.0),
            // Regular sprites are flipped to face down the screen.
            _ => Entity::new(100.0, 100.0).scaled(0.5, 0.5).rotated(180.0),
        };
        Enemy {
            entity: entity.at(x, y),
            kind,
            health,
            speed,
            score_value,
        }
    }

    /// Straight down at the kind's speed.
    pub fn update(&mut self, dt: f32) {
        self.entity.move_by(0.0, self.speed * dt);
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_off_screen(&self, play_height: f32) -> bool {
        self.entity.position.y > play_height
    }

    pub fn position(&self) -> Vec2 {
        self.entity.position
    }

    pub fn bounds(&self) -> Rect {
        self.entity.bounds()
    }
}

// ── Boss ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPhase {
    Entering,
    MovingLeft,
    MovingRight,
}

#[derive(Clone, Debug)]
pub struct BossEnemy {
    pub enemy: Enemy,
    pub phase: BossPhase,
    /// Seconds spent in the current phase.
    pub phase_time: f32,
    pub shoot_cooldown: f32,
}

impl BossEnemy {
    pub fn new(x: f32, y: f32) -> Self {
        BossEnemy {
            enemy: Enemy::new(EnemyKind::Boss, x, y),
            phase: BossPhase::Entering,
            phase_time: 0.0,
            shoot_cooldown: 0.0,
        }
    }

    /// Advance the phase machine.  The shot timer runs independently.
    pub fn update(&mut self, dt: f32, play_width: f32) {
        self.phase_time += dt;
        self.shoot_cooldown -= dt;

        let speed = self.enemy.speed;
        match self.phase {
            BossPhase::Entering => {
                if self.enemy.entity.position.y < BOSS_CRUISE_Y {
                    self.enemy.entity.move_by(0.0, speed * dt);
                } else {
                    self.enter(BossPhase::MovingLeft);
                }
            }
            BossPhase::MovingLeft => {
                self.enemy.entity.move_by(-speed * BOSS_STRAFE_FACTOR * dt, 0.0);
                let x = self.enemy.entity.position.x;
                if self.phase_time > BOSS_PHASE_SECS || x < BOSS_TURN_MARGIN {
                    self.enter(BossPhase::MovingRight);
                }
            }
            BossPhase::MovingRight => {
                self.enemy.entity.move_by(speed * BOSS_STRAFE_FACTOR * dt, 0.0);
                let x = self.enemy.entity.position.x;
                if self.phase_time > BOSS_PHASE_SECS || x > play_width - BOSS_TURN_MARGIN {
                    self.enter(BossPhase::MovingLeft);
                }
            }
        }
    }

    fn enter(&mut self, phase: BossPhase) {
        self.phase = phase;
        self.phase_time = 0.0;
    }

    /// True once every `BOSS_SHOT_INTERVAL`; the first call fires at once.
    pub fn can_shoot(&mut self) -> bool {
        if self.shoot_cooldown <= 0.0 {
            self.shoot_cooldown = BOSS_SHOT_INTERVAL;
            true
        } else {
            false
        }
    }

    /// Three downward bullets, 30 px apart, just below the hull.
    pub fn shoot(&self) -> Vec<Bullet> {
        let p = self.enemy.entity.position;
        (-1..=1)
            .map(|i| Bullet::enemy(p.x + i as f32 * 30.0, p.y + 50.0))
            .collect()
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.enemy.take_damage(amount);
    }

    pub fn is_destroyed(&self) -> bool {
        self.enemy.is_destroyed()
    }

    pub fn health(&self) -> f32 {
        self.enemy.health
    }

    pub fn score_value(&self) -> u32 {
        self.enemy.score_value
    }

    pub fn position(&self) -> Vec2 {
        self.enemy.position()
    }

    pub fn bounds(&self) -> Rect {
        self.enemy.bounds()
    }
}
