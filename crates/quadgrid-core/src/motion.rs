//! Bouncing, pulsing circle confined to a rectangle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle the circle must stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Rectangle of `width` x `height` centered on the origin, like a canvas rect.
    pub fn from_size(width: f32, height: f32) -> Self {
        let half = Vec2::new(width.abs(), height.abs()) * 0.5;
        Self::new(-half, half)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Sinusoidal radius oscillation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    /// Relative size change (0.2 = +/-20%)
    pub amplitude: f32,
    /// Oscillations per second
    pub frequency: f32,
}

impl Pulse {
    /// Radius multiplier at time `t` seconds, never negative.
    pub fn scale_at(&self, t: f32) -> f32 {
        let phase = std::f32::consts::TAU * self.frequency * t;
        (1.0 + self.amplitude * phase.sin()).max(0.0)
    }
}

/// Which walls were touched during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BounceHits {
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
    pub top: bool,
}

impl BounceHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.bottom || self.top
    }
}

/// A circle moving in a straight line that reflects off the bounds.
#[derive(Debug, Clone)]
pub struct BouncingMover {
    position: Vec2,
    velocity: Vec2,
    base_radius: f32,
    bounds: Bounds,
    pulse: Option<Pulse>,
    elapsed: f32,
}

impl BouncingMover {
    /// Start at the center of `bounds`.
    pub fn new(bounds: Bounds, velocity: Vec2, radius: f32) -> Self {
        Self {
            position: bounds.center(),
            velocity,
            base_radius: radius.max(0.0),
            bounds,
            pulse: None,
            elapsed: 0.0,
        }
    }

    pub fn with_pulse(mut self, pulse: Pulse) -> Self {
        self.pulse = Some(pulse);
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Move by `velocity * dt` and reflect off any wall the circle's edge crossed.
    pub fn tick(&mut self, dt: f32) -> BounceHits {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt;
        self.position += self.velocity * dt;

        let radius = self.radius();
        let mut hits = BounceHits::default();

        let (x, vx, lo, hi) = reflect_axis(
            self.position.x,
            self.velocity.x,
            self.bounds.min.x,
            self.bounds.max.x,
            radius,
        );
        self.position.x = x;
        self.velocity.x = vx;
        hits.left = lo;
        hits.right = hi;

        let (y, vy, lo, hi) = reflect_axis(
            self.position.y,
            self.velocity.y,
            self.bounds.min.y,
            self.bounds.max.y,
            radius,
        );
        self.position.y = y;
        self.velocity.y = vy;
        hits.bottom = lo;
        hits.top = hi;

        if hits.any() {
            log::trace!("Bounce at {:?}: {:?}", self.position, hits);
        }

        hits
    }

    /// Current radius including the pulse.
    pub fn radius(&self) -> f32 {
        match self.pulse {
            Some(pulse) => self.base_radius * pulse.scale_at(self.elapsed),
            None => self.base_radius,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Container resized; the next tick pushes the circle back inside.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }
}

/// Clamp one coordinate so the circle stays inside `[lo, hi]`, flipping velocity
/// toward the interior when a wall is hit.
fn reflect_axis(pos: f32, vel: f32, lo: f32, hi: f32, radius: f32) -> (f32, f32, bool, bool) {
    let min = lo + radius;
    let max = hi - radius;

    if min > max {
        // Narrower than the circle: pin to the middle
        return ((lo + hi) * 0.5, vel, false, false);
    }

    if pos < min {
        (min, vel.abs(), true, false)
    } else if pos > max {
        (max, -vel.abs(), false, true)
    } else {
        (pos, vel, false, false)
    }
}
