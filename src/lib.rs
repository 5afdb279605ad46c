pub mod assets;
pub mod compute;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod explosion;
pub mod hud;
pub mod level;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod shield;
