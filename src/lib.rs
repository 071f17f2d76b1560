//! BounceSim: circular particles moving, bouncing off walls and colliding elastically in a
//! rectangular arena.
//!
//! The crate is only the engine. A presentation layer constructs particles, adds them to a
//! [`ParticleSimulation`], calls [`ParticleSimulation::update`] once per frame and reads each
//! particle's `position` and `size` to draw it. With the `python` feature the same surface is
//! exported as a Python extension module.

pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python;

pub use crate::core::{ArenaConfig, Particle, ParticleSimulation, Vector2};
pub use crate::error::{Error, Result};
