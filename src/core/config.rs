use crate::error::{Error, Result};
use log::warn;

/// Arena dimensions and friction for a [`ParticleSimulation`](crate::core::ParticleSimulation).
///
/// The default is an 800×600 arena without friction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaConfig {
    /// Arena width (> 0).
    pub width: f64,
    /// Arena height (> 0).
    pub height: f64,
    /// Fraction of movement lost per step, normally in [0, 1).
    pub friction: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            friction: 0.0,
        }
    }
}

impl ArenaConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Check the arena invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if a dimension is non-positive or not finite, or friction is not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(Error::InvalidParam("width must be finite and > 0".into()));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(Error::InvalidParam("height must be finite and > 0".into()));
        }
        validate_friction(self.friction)
    }
}

/// Friction only has to be finite; values outside [0, 1) are allowed and make particles gain
/// energy or flip direction every step.
pub(crate) fn validate_friction(friction: f64) -> Result<()> {
    if !friction.is_finite() {
        return Err(Error::InvalidParam("friction must be finite".into()));
    }
    if !(0.0..1.0).contains(&friction) {
        warn!("friction {friction} is outside [0, 1); movement will not decay normally");
    }
    Ok(())
}
