/// Straight-line projectiles.
use crate::entities::{BulletOwner, Entity, Rect, Vec2};

pub const PLAYER_BULLET_SPEED: f32 = 600.0;
pub const ENEMY_BULLET_SPEED: f32 = 300.0;
pub const BASE_BULLET_DAMAGE: f32 = 10.0;

pub const LASER_LIFETIME: f32 = 0.5;
/// Applied on every frame the beam overlaps a target.
pub const LASER_DAMAGE: f32 = 1.0;

#[derive(Clone, Debug)]
pub struct Bullet {
    pub entity: Entity,
    pub owner: BulletOwner,
    pub damage: f32,
}

impl Bullet {
    /// An upward-travelling player bullet centred on `(x, y)`.
    pub fn player(x: f32, y: f32, damage: f32) -> Self {
        Bullet {
            entity: Entity::new(20.0, 40.0).scaled(0.5, 0.5).at(x, y),
            owner: BulletOwner::Player,
            damage,
        }
    }

    /// A downward-travelling enemy bullet, sprite flipped to face down.
    pub fn enemy(x: f32, y: f32) -> Self {
        Bullet {
            entity: Entity::new(20.0, 40.0)
                .scaled(0.5, 0.5)
                .rotated(180.0)
                .at(x, y),
            owner: BulletOwner::Enemy,
            damage: BASE_BULLET_DAMAGE,
        }
    }

    pub fn update(&mut self, dt: f32) {
        match self.owner {
            BulletOwner::Player => self.entity.move_by(0.0, -PLAYER_BULLET_SPEED * dt),
            BulletOwner::Enemy => self.entity.move_by(0.0, ENEMY_BULLET_SPEED * dt),
        }
    }

    /// Past the edge it is travelling towards.
    pub fn is_off_screen(&self, play_height: f32) -> bool {
        match self.owner {
            BulletOwner::Player => self.entity.position.y < 0.0,
            BulletOwner::Enemy => self.entity.position.y > play_height,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.entity.position
    }

    pub fn bounds(&self) -> Rect {
        self.entity.bounds()
    }
}

/// A stationary beam that lives for `LASER_LIFETIME` seconds and is never
/// consumed by hits.
#[derive(Clone, Debug)]
pub struct Laser {
    pub entity: Entity,
    pub lifetime: f32,
    pub damage: f32,
}

impl Laser {
    pub fn new(x: f32, y: f32) -> Self {
        Laser {
            entity: Entity::new(20.0, 60.0).scaled(0.5, 10.0).at(x, y),
            lifetime: LASER_LIFETIME,
            damage: LASER_DAMAGE,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.lifetime -= dt;
    }

    pub fn is_active(&self) -> bool {
        self.lifetime > 0.0
    }

    pub fn position(&self) -> Vec2 {
        self.entity.position
    }

    pub fn bounds(&self) -> Rect {
        self.entity.bounds()
    }
}
