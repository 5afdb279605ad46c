/// Level progression and spawn pacing.
use tracing::info;

#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    current: u32,
    defeated: u32,
    boss_active: bool,
}

impl Default for Level {
    fn default() -> Self {
        Level {
            current: 1,
            defeated: 0,
            boss_active: false,
        }
    }
}

impl Level {
    /// A level `current` (at least 1) with no kills credited and no boss pending.
    pub fn starting_at(current: u32) -> Self {
        Level {
            current: current.max(1),
            ..Level::default()
        }
    }

    /// Credit `defeated` kills.  Crossing the threshold while no boss is
    /// pending advances the level and raises the boss flag.
    pub fn update(&mut self, defeated: u32) {
        self.defeated += defeated;
        if self.defeated >= self.enemies_for_next_level() && !self.boss_active {
            self.current += 1;
            self.defeated = 0;
            self.boss_active = true;
            info!(level = self.current, "level up, boss incoming");
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn defeated(&self) -> u32 {
        self.defeated
    }

    pub fn is_boss_level(&self) -> bool {
        self.boss_active
    }

    pub fn reset_boss_flag(&mut self) {
        self.boss_active = false;
    }

    pub fn enemies_for_next_level(&self) -> u32 {
        20 + 5 * (self.current - 1)
    }

    /// Seconds between regular enemy spawns, floored at 0.5.
    pub fn enemy_spawn_interval(&self) -> f32 {
        (1.5 - 0.1 * (self.current - 1) as f32).max(0.5)
    }

    /// Seconds between power-up spawns, floored at 5.
    pub fn powerup_spawn_interval(&self) -> f32 {
        (10.0 - 0.5 * (self.current - 1) as f32).max(5.0)
    }

    pub fn reset(&mut self) {
        *self = Level::default();
    }
}
