use crate::core::Vector2;
use crate::error::{Error, Result};
use log::trace;
use std::f64::consts::PI;

/// Radius given to particles that are not configured otherwise.
pub const DEFAULT_SIZE: f64 = 20.0;

/// Masses are multiplied by this factor inside the collision formula. It cancels out of the
/// exchange algebraically but changes rounding, so trajectories depend on it.
pub const MASS_SCALE: f64 = 100.0;

/// A circular particle in the arena.
///
/// Fields:
/// - `id`: caller-assigned identifier, uniqueness is not enforced
/// - `size`: radius of the circle
/// - `position`: centre in arena coordinates
/// - `movement`: displacement applied on every step
/// - `mass`: validated to be finite and > 0, hence only reachable through accessors
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Caller-assigned identifier.
    pub id: u32,
    /// Radius.
    pub size: f64,
    /// Centre position.
    pub position: Vector2,
    /// Per-step displacement.
    pub movement: Vector2,
    mass: f64,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            id: 0,
            size: DEFAULT_SIZE,
            position: Vector2::ZERO,
            movement: Vector2::ZERO,
            mass: 1.0,
        }
    }
}

impl Particle {
    /// Create a particle with every attribute given up front.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `mass` is non-positive or not finite.
    pub fn new(
        id: u32,
        size: f64,
        position: Vector2,
        movement: Vector2,
        mass: f64,
    ) -> Result<Self> {
        validate_mass(mass)?;
        Ok(Self {
            id,
            size,
            position,
            movement,
            mass,
        })
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_position(mut self, position: Vector2) -> Self {
        self.position = position;
        self
    }

    pub fn with_movement(mut self, movement: Vector2) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Result<Self> {
        self.set_mass(mass)?;
        Ok(self)
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Set mass (validated as finite and > 0).
    pub fn set_mass(&mut self, mass: f64) -> Result<&mut Self> {
        validate_mass(mass)?;
        self.mass = mass;
        Ok(self)
    }

    /// Copy `position` into the particle.
    pub fn set_position(&mut self, position: Vector2) -> &mut Self {
        self.position = position;
        self
    }

    /// Copy `movement` into the particle.
    pub fn set_movement(&mut self, movement: Vector2) -> &mut Self {
        self.movement = movement;
        self
    }

    /// Advance by one step: add the movement to the position, then decay the movement by
    /// `1 - friction`. Friction outside [0, 1) is applied as given.
    pub fn step_move(&mut self, friction: f64) -> &mut Self {
        self.position += self.movement;
        self.movement *= 1.0 - friction;
        self
    }

    /// Mirror the particle back inside `[size, width - size] × [size, height - size]`.
    ///
    /// Each axis is handled independently, so a corner hit reflects on both. Horizontal walls
    /// reflect the movement angle as `π - a`, vertical walls as `-a`.
    pub fn bounce(&mut self, width: f64, height: f64) -> &mut Self {
        let right = width - self.size;
        let left = self.size;
        let bottom = height - self.size;
        let top = self.size;

        if self.position.x() > right {
            self.position.set_x(2.0 * right - self.position.x());
            self.movement.set_a(PI - self.movement.a());
            trace!("particle {} bounced off the right wall", self.id);
        } else if self.position.x() < left {
            self.position.set_x(2.0 * left - self.position.x());
            self.movement.set_a(PI - self.movement.a());
            trace!("particle {} bounced off the left wall", self.id);
        }

        if self.position.y() > bottom {
            self.position.set_y(2.0 * bottom - self.position.y());
            self.movement.set_a(-self.movement.a());
            trace!("particle {} bounced off the bottom wall", self.id);
        } else if self.position.y() < top {
            self.position.set_y(2.0 * top - self.position.y());
            self.movement.set_a(-self.movement.a());
            trace!("particle {} bounced off the top wall", self.id);
        }

        self
    }

    /// Resolve an elastic collision between `self` and `other` if their circles overlap.
    ///
    /// The exchange is one-dimensional along the axis joining the centres: the movement
    /// components parallel to it are swapped according to the masses while the orthogonal
    /// components are kept. Afterwards the lighter particle is placed one unit clear of the
    /// heavier one along the same axis; on equal mass `self` is the one that moves.
    ///
    /// Returns `true` if the pair overlapped and was resolved.
    pub fn collide(&mut self, other: &mut Particle) -> bool {
        let mut collision = other.position - self.position;
        let distance = collision.r();
        let contact = self.size + other.size;
        if distance >= contact {
            return false;
        }

        let col_ang = collision.a();
        let mut v1 = Vector2::new(self.movement.x(), self.movement.y());
        let mut v2 = Vector2::new(other.movement.x(), other.movement.y());
        v1.rotate(-col_ang);
        v2.rotate(-col_ang);

        let m1 = self.mass * MASS_SCALE;
        let m2 = other.mass * MASS_SCALE;
        let total = m1 + m2;

        let (u1, u2) = (v1.x(), v2.x());
        v1.set_x((u1 * (m1 - m2) + 2.0 * m2 * u2) / total);
        v2.set_x((u2 * (m2 - m1) + 2.0 * m1 * u1) / total);

        v1.rotate(col_ang);
        v2.rotate(col_ang);
        self.movement.set_xy(v1.x(), v1.y());
        other.movement.set_xy(v2.x(), v2.y());

        collision.set_r(contact + 1.0);
        if other.mass < self.mass {
            other.position = self.position + collision;
        } else {
            self.position = other.position - collision;
        }

        trace!(
            "collision between particles {} and {} at distance {:.3}",
            self.id,
            other.id,
            distance
        );
        true
    }

    /// Whether `point` lies inside or on the particle's circle.
    #[inline]
    pub fn contains(&self, point: &Vector2) -> bool {
        (self.position - *point).r() <= self.size
    }

    /// Returns the particle's kinetic energy: 1/2 m |movement|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.movement.r() * self.movement.r()
    }

    /// Returns the particle's momentum: m * movement.
    #[inline]
    pub fn momentum(&self) -> Vector2 {
        self.movement * self.mass
    }
}

fn validate_mass(mass: f64) -> Result<()> {
    if !mass.is_finite() || mass <= 0.0 {
        return Err(Error::InvalidParam("mass must be finite and > 0".into()));
    }
    Ok(())
}
