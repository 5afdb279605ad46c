/// Particle bursts spawned on destruction events.
use std::f32::consts::TAU;

use rand::Rng;

use crate::entities::{Rgb, Vec2};

pub const PARTICLES_PER_EXPLOSION: usize = 30;

const ORANGE: Rgb = Rgb(255, 60, 0);
const YELLOW: Rgb = Rgb(255, 200, 0);
const RED: Rgb = Rgb(255, 0, 0);

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Rgb,
    pub lifetime: f32,
    pub max_lifetime: f32,
}

impl Particle {
    pub fn new(position: Vec2, color: Rgb, speed: f32, angle: f32, lifetime: f32) -> Self {
        Particle {
            position,
            velocity: Vec2::new(angle.cos() * speed, angle.sin() * speed),
            color,
            lifetime,
            max_lifetime: lifetime,
        }
    }

    /// Returns false once the particle has burnt out.
    pub fn update(&mut self, dt: f32) -> bool {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            return false;
        }
        self.position += self.velocity * dt;
        true
    }

    /// Fades linearly from 1 to 0 over the particle's life.
    pub fn alpha(&self) -> f32 {
        (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug)]
pub struct Explosion {
    pub origin: Vec2,
    pub particles: Vec<Particle>,
}

impl Explosion {
    /// A burst of `PARTICLES_PER_EXPLOSION` particles flying out from
    /// `origin`.  `scale` multiplies particle speed.
    pub fn new(origin: Vec2, scale: f32, rng: &mut impl Rng) -> Self {
        let particles = (0..PARTICLES_PER_EXPLOSION)
            .map(|i| {
                let angle = rng.gen_range(0.0..TAU);
                let speed = rng.gen_range(50.0_f32..200.0) * scale;
                let lifetime = rng.gen_range(0.5_f32..1.5);
                let color = match i % 3 {
                    0 => ORANGE,
                    1 => YELLOW,
                    _ => RED,
                };
                Particle::new(origin, color, speed, angle, lifetime)
            })
            .collect();
        Explosion { origin, particles }
    }

    /// Returns false once every particle has expired.
    pub fn update(&mut self, dt: f32) -> bool {
        self.particles.retain_mut(|p| p.update(dt));
        !self.particles.is_empty()
    }
}
