/// Shared game vocabulary: geometry, the sprite-like `Entity`, and the
/// closed variant tags every other module matches on.
use std::ops::{Add, AddAssign, Mul, Sub};

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle in world coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        left < right && top < bottom
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

/// A positionable, rotatable, scalable game object.
///
/// The origin sits at the centre of the sprite, so `position` is the centre
/// of `bounds()`.  `size` is the unscaled sprite size in logical pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub position: Vec2,
    /// Degrees, clockwise.
    pub rotation: f32,
    pub scale: Vec2,
    pub size: Vec2,
}

impl Entity {
    pub fn new(width: f32, height: f32) -> Self {
        Entity {
            position: Vec2::default(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            size: Vec2::new(width, height),
        }
    }

    pub fn scaled(mut self, sx: f32, sy: f32) -> Self {
        self.set_scale(sx, sy);
        self
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.set_rotation(degrees);
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.set_position(x, y);
        self
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    pub fn set_scale(&mut self, sx: f32, sy: f32) {
        self.scale = Vec2::new(sx, sy);
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.position += Vec2::new(dx, dy);
    }

    /// Bounding box of the scaled and rotated sprite.
    pub fn bounds(&self) -> Rect {
        let w = self.size.x * self.scale.x.abs();
        let h = self.size.y * self.scale.y.abs();
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let bw = w * cos + h * sin;
        let bh = w * sin + h * cos;
        Rect {
            left: self.position.x - bw / 2.0,
            top: self.position.y - bh / 2.0,
            width: bw,
            height: bh,
        }
    }
}

// ── Variant tags ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    MainMenu,
    Playing,
    BossFight,
    GameOver,
    Victory,
}

/// Weapon upgrade tiers, ordered Basic < Double < Triple < Laser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WeaponTier {
    Basic,
    Double,
    Triple,
    Laser,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tanky,
    Boss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Heals 25 health.
    Health,
    /// Refills and activates the shield.
    Shield,
    /// Advances the weapon tier (score bonus at max tier).
    WeaponUpgrade,
    /// Flat +50 score.
    ScoreBoost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// Fire-and-forget sound triggers produced by a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Shoot,
    Explosion,
    PowerUp,
    Upgrade,
    BossArrival,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Directions and fire button held during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}
