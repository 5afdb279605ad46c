/// The player ship: bounded movement, the weapon tier machine, health,
/// score and the owned shield.
use crate::entities::{Entity, InputState, Rect, Vec2, WeaponTier};
use crate::projectile::{Bullet, Laser};
use crate::shield::Shield;

pub const PLAYER_MAX_HEALTH: u32 = 100;
pub const PLAYER_SPEED: f32 = 300.0;
/// Awarded by `upgrade_weapon` once the tier is already maxed.
pub const MAX_TIER_BONUS: u32 = 50;

// ── Weapon tier table ────────────────────────────────────────────────────────

impl WeaponTier {
    /// Seconds that must pass between two shots.
    pub fn cooldown(self) -> f32 {
        match self {
            WeaponTier::Basic => 0.25,
            WeaponTier::Double => 0.2,
            WeaponTier::Triple => 0.15,
            WeaponTier::Laser => 1.0,
        }
    }

    pub fn next(self) -> Option<WeaponTier> {
        match self {
            WeaponTier::Basic => Some(WeaponTier::Double),
            WeaponTier::Double => Some(WeaponTier::Triple),
            WeaponTier::Triple => Some(WeaponTier::Laser),
            WeaponTier::Laser => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeaponTier::Basic => "Basic",
            WeaponTier::Double => "Double",
            WeaponTier::Triple => "Triple",
            WeaponTier::Laser => "Laser",
        }
    }

    /// Bullet offsets from the player centre and the damage each bullet
    /// deals.  Empty for the laser tier.
    fn spread(self) -> (&'static [(f32, f32)], f32) {
        match self {
            WeaponTier::Basic => (&[(0.0, -30.0)], 10.0),
            WeaponTier::Double => (&[(-20.0, -20.0), (20.0, -20.0)], 15.0),
            WeaponTier::Triple => (&[(0.0, -30.0), (-25.0, -15.0), (25.0, -15.0)], 20.0),
            WeaponTier::Laser => (&[], 0.0),
        }
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub entity: Entity,
    pub health: u32,
    pub score: u32,
    pub weapon: WeaponTier,
    pub shield: Shield,
    /// Seconds since the last successful `can_shoot`.
    since_last_shot: f32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Player {
            entity: Entity::new(100.0, 100.0).scaled(0.5, 0.5).at(x, y),
            health: PLAYER_MAX_HEALTH,
            score: 0,
            weapon: WeaponTier::Basic,
            shield: Shield::default(),
            since_last_shot: f32::INFINITY,
        }
    }

    /// Back to a fresh session's player, placed at `(x, y)`.
    pub fn reset(&mut self, x: f32, y: f32) {
        *self = Player::new(x, y);
    }

    /// Move along the held directions, clamped to `[0, bounds.x] × [0, bounds.y]`,
    /// and advance the shot timer and shield.
    pub fn update(&mut self, dt: f32, input: &InputState, bounds: Vec2) {
        let step = PLAYER_SPEED * dt;
        let mut delta = Vec2::default();
        if input.left {
            delta.x -= step;
        }
        if input.right {
            delta.x += step;
        }
        if input.up {
            delta.y -= step;
        }
        if input.down {
            delta.y += step;
        }
        let next = self.entity.position + delta;
        self.entity
            .set_position(next.x.clamp(0.0, bounds.x), next.y.clamp(0.0, bounds.y));

        self.since_last_shot += dt;

        if self.shield.is_active() {
            self.shield.entity.position = self.entity.position;
            self.shield.update(dt);
        }
    }

    /// True at most once per cooldown window of the current tier.
    /// A true result restarts the window.
    pub fn can_shoot(&mut self) -> bool {
        if self.since_last_shot > self.weapon.cooldown() {
            self.since_last_shot = 0.0;
            true
        } else {
            false
        }
    }

    pub fn shoot(&self) -> Vec<Bullet> {
        let (offsets, damage) = self.weapon.spread();
        let p = self.entity.position;
        offsets
            .iter()
            .map(|&(dx, dy)| Bullet::player(p.x + dx, p.y + dy, damage))
            .collect()
    }

    pub fn shoot_laser(&self) -> Option<Laser> {
        if self.weapon != WeaponTier::Laser {
            return None;
        }
        let p = self.entity.position;
        Some(Laser::new(p.x, p.y - 300.0))
    }

    /// An active shield absorbs the whole hit; nothing overflows to health.
    pub fn take_damage(&mut self, amount: u32) {
        if self.shield.is_active() {
            self.shield.take_damage(amount as f32);
            return;
        }
        self.health = self.health.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(PLAYER_MAX_HEALTH);
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn activate_shield(&mut self) {
        self.shield.entity.position = self.entity.position;
        self.shield.activate();
    }

    pub fn upgrade_weapon(&mut self) {
        match self.weapon.next() {
            Some(tier) => self.weapon = tier,
            None => self.add_score(MAX_TIER_BONUS),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn has_shield(&self) -> bool {
        self.shield.is_active()
    }

    pub fn shield_health(&self) -> f32 {
        self.shield.health()
    }

    pub fn position(&self) -> Vec2 {
        self.entity.position
    }

    pub fn bounds(&self) -> Rect {
        self.entity.bounds()
    }
}
