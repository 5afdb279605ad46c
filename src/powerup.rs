use crate::entities::{Entity, PowerUpKind, Rect, Vec2};

pub const POWERUP_FALL_SPEED: f32 = 150.0;

/// Kinds in spawner draw order.
pub const ALL_KINDS: [PowerUpKind; 4] = [
    PowerUpKind::Health,
    PowerUpKind::Shield,
    PowerUpKind::WeaponUpgrade,
    PowerUpKind::ScoreBoost,
];

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub entity: Entity,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, x: f32, y: f32) -> Self {
        PowerUp {
            entity: Entity::new(60.0, 60.0).scaled(0.5, 0.5).at(x, y),
            kind,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.entity.move_by(0.0, POWERUP_FALL_SPEED * dt);
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
