//! Core simulation types for BounceSim.
//!
//! A [`ParticleSimulation`] owns an ordered list of [`Particle`]s in a rectangular arena and
//! advances them one discrete step at a time. Positions and movements are [`Vector2`]s that can
//! be read and written in cartesian or polar form.

pub mod config;
pub mod particle;
pub mod sim;
pub mod vector;

pub use config::ArenaConfig;
pub use particle::Particle;
pub use sim::ParticleSimulation;
pub use vector::Vector2;
