use crate::entities::Entity;

pub const SHIELD_MAX_HEALTH: f32 = 100.0;
/// Health lost per second while the shield is up.
pub const SHIELD_DECAY_PER_SEC: f32 = 10.0;

#[derive(Clone, Debug)]
pub struct Shield {
    pub entity: Entity,
    health: f32,
    active: bool,
}

impl Default for Shield {
    fn default() -> Self {
        Shield {
            entity: Entity::new(100.0, 100.0).scaled(1.2, 1.2),
            health: SHIELD_MAX_HEALTH,
            active: false,
        }
    }
}

impl Shield {
    pub fn update(&mut self, dt: f32) {
        if self.active {
            self.drain(SHIELD_DECAY_PER_SEC * dt);
        }
    }

    /// Refill to full and raise the shield.
    pub fn activate(&mut self) {
        self.health = SHIELD_MAX_HEALTH;
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.drain(amount);
    }

    fn drain(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, SHIELD_MAX_HEALTH);
        if self.health <= 0.0 {
            self.deactivate();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn health(&self) -> f32 {
        self.health
    }
}
