use crate::core::config::validate_friction;
use crate::core::{ArenaConfig, Particle, Vector2};
use crate::error::{Error, Result};
use log::debug;
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::TAU;

/// Placement attempts per particle before `scatter` gives up.
const MAX_PLACEMENT_ATTEMPTS: usize = 100_000;

/// A rectangular arena `[0, width] × [0, height]` holding an ordered set of particles.
///
/// Insertion order is significant: it is the order in which particles are moved during a
/// step, which decides who collides with whom at which position.
#[derive(Debug, Clone)]
pub struct ParticleSimulation {
    width: f64,
    height: f64,
    friction: f64,
    particles: Vec<Particle>,
}

impl ParticleSimulation {
    /// Create an empty arena of the given size without friction.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if a dimension is non-positive or not finite.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        Self::from_config(ArenaConfig::new(width, height))
    }

    /// Create an empty arena from a validated configuration.
    pub fn from_config(config: ArenaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            width: config.width,
            height: config.height,
            friction: config.friction,
            particles: Vec::new(),
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    /// Set the fraction of movement lost per step (e.g. 0.1 loses 10% every step).
    pub fn set_friction(&mut self, friction: f64) -> Result<&mut Self> {
        validate_friction(friction)?;
        self.friction = friction;
        Ok(self)
    }

    /// Current arena configuration.
    pub fn config(&self) -> ArenaConfig {
        ArenaConfig {
            width: self.width,
            height: self.height,
            friction: self.friction,
        }
    }

    /// Particles in insertion order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Positions in insertion order.
    pub fn positions(&self) -> Vec<Vector2> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// First particle (in insertion order) whose circle contains `point`.
    pub fn find(&self, point: &Vector2) -> Option<&Particle> {
        self.particles.iter().find(|p| p.contains(point))
    }

    /// Mutable variant of [`find`](Self::find), e.g. for dragging a particle.
    pub fn find_mut(&mut self, point: &Vector2) -> Option<&mut Particle> {
        self.particles.iter_mut().find(|p| p.contains(point))
    }

    /// First particle with the given id.
    pub fn find_by_id(&self, id: u32) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: u32) -> Option<&mut Particle> {
        self.particles.iter_mut().find(|p| p.id == id)
    }

    /// Like [`find_by_id`](Self::find_by_id) but a missing id is an error.
    pub fn particle(&self, id: u32) -> Result<&Particle> {
        self.find_by_id(id)
            .ok_or_else(|| Error::NotFound(format!("particle id {id}")))
    }

    /// Append a particle; it is processed last in the next step.
    pub fn add(&mut self, particle: Particle) -> &mut Self {
        debug!(
            "adding particle {} at {} (size {}, mass {})",
            particle.id,
            particle.position,
            particle.size,
            particle.mass()
        );
        self.particles.push(particle);
        self
    }

    /// Remove the first particle equal to `particle` and return it.
    ///
    /// Removing a particle that is not present is a no-op and returns `None`.
    pub fn remove(&mut self, particle: &Particle) -> Option<Particle> {
        let idx = self.particles.iter().position(|p| p == particle)?;
        Some(self.remove_at(idx))
    }

    /// Remove the first particle with the given id. No-op returning `None` if absent.
    pub fn remove_by_id(&mut self, id: u32) -> Option<Particle> {
        let idx = self.particles.iter().position(|p| p.id == id)?;
        Some(self.remove_at(idx))
    }

    fn remove_at(&mut self, idx: usize) -> Particle {
        let p = self.particles.remove(idx);
        debug!("removed particle {} (index {idx})", p.id);
        p
    }

    /// Advance the simulation by one step.
    ///
    /// Particles are processed in insertion order. Each one is moved and bounced, and then every
    /// particle after it collides against it. A particle is therefore checked against earlier
    /// particles at their new positions and against later ones at their positions from the
    /// start of the step.
    pub fn update(&mut self) -> &mut Self {
        for i in 0..self.particles.len() {
            let (done, rest) = self.particles.split_at_mut(i + 1);
            let p = &mut done[i];
            p.step_move(self.friction);
            p.bounce(self.width, self.height);
            for c in rest.iter_mut() {
                c.collide(p);
            }
        }
        self
    }

    /// Run `steps` consecutive updates.
    pub fn run(&mut self, steps: usize) -> &mut Self {
        for _ in 0..steps {
            self.update();
        }
        self
    }

    /// Add `count` particles of radius `size` at random non-overlapping positions with random
    /// movement of magnitude up to `max_speed`.
    ///
    /// New ids continue after the largest id already present. Passing a `seed` makes the
    /// placement reproducible.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `size` or `max_speed` is invalid, the arena is too small for
    ///   the radius, or a particle cannot be placed without overlap.
    pub fn scatter(
        &mut self,
        count: usize,
        size: f64,
        max_speed: f64,
        seed: Option<u64>,
    ) -> Result<&mut Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(Error::InvalidParam("size must be finite and > 0".into()));
        }
        if !max_speed.is_finite() || max_speed < 0.0 {
            return Err(Error::InvalidParam(
                "max_speed must be finite and >= 0".into(),
            ));
        }
        if self.width <= 2.0 * size || self.height <= 2.0 * size {
            return Err(Error::InvalidParam(
                "arena must be larger than 2 * size in every dimension".into(),
            ));
        }

        let mut rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };

        let mut next_id = self
            .particles
            .iter()
            .map(|p| p.id.saturating_add(1))
            .max()
            .unwrap_or(0);

        for _ in 0..count {
            let mut attempts = 0usize;
            let position = loop {
                if attempts >= MAX_PLACEMENT_ATTEMPTS {
                    return Err(Error::InvalidParam(format!(
                        "failed to place particle {next_id} without overlap; try fewer particles or a smaller size"
                    )));
                }
                attempts += 1;
                let candidate = Vector2::new(
                    rng.random_range(size..=self.width - size),
                    rng.random_range(size..=self.height - size),
                );
                if !self.overlaps_existing(&candidate, size) {
                    break candidate;
                }
            };

            let speed = rng.random_range(0.0..=max_speed);
            let heading = rng.random_range(0.0..TAU);
            let particle = Particle::default()
                .with_id(next_id)
                .with_size(size)
                .with_position(position)
                .with_movement(Vector2::from_polar(speed, heading));
            self.particles.push(particle);
            next_id = next_id.saturating_add(1);
        }

        debug!("scattered {count} particles, {} total", self.particles.len());
        Ok(self)
    }

    /// Total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Total momentum (diagnostic).
    pub fn momentum(&self) -> Vector2 {
        self.particles
            .iter()
            .fold(Vector2::ZERO, |acc, p| acc + p.momentum())
    }

    fn overlaps_existing(&self, position: &Vector2, size: f64) -> bool {
        self.particles
            .iter()
            .any(|p| p.position.distance(position) < p.size + size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn particle(id: u32, x: f64, y: f64) -> Particle {
        Particle::default()
            .with_id(id)
            .with_position(Vector2::new(x, y))
    }

    #[test]
    fn config_round_trips() -> Result<()> {
        let cfg = ArenaConfig::new(320.0, 240.0).with_friction(0.25);
        let mut sim = ParticleSimulation::from_config(cfg)?;
        assert_eq!(sim.config(), cfg);
        sim.set_friction(0.5)?;
        assert_eq!(sim.config(), cfg.with_friction(0.5));
        let copy = ParticleSimulation::from_config(sim.config())?;
        assert_eq!((copy.width(), copy.height(), copy.friction()), (320.0, 240.0, 0.5));
        Ok(())
    }

    #[test]
    fn new_rejects_degenerate_arena() {
        assert!(ParticleSimulation::new(0.0, 10.0).is_err());
        assert!(ParticleSimulation::new(10.0, -1.0).is_err());
    }

    #[test]
    fn add_preserves_order_and_chains() -> Result<()> {
        let mut sim = ParticleSimulation::new(200.0, 200.0)?;
        sim.add(particle(1, 50.0, 50.0)).add(particle(2, 150.0, 150.0));
        let ids: Vec<u32> = sim.particles().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(sim.len(), 2);
        Ok(())
    }

    #[test]
    fn find_returns_first_added_on_overlap() -> Result<()> {
        let mut sim = ParticleSimulation::new(200.0, 200.0)?;
        sim.add(particle(1, 100.0, 100.0)).add(particle(2, 100.0, 100.0));
        let hit = sim.find(&Vector2::new(105.0, 100.0)).map(|p| p.id);
        assert_eq!(hit, Some(1));
        assert!(sim.find(&Vector2::new(0.0, 0.0)).is_none());
        Ok(())
    }

    #[test]
    fn find_by_id_and_strict_lookup() -> Result<()> {
        let mut sim = ParticleSimulation::new(200.0, 200.0)?;
        sim.add(particle(7, 100.0, 100.0));
        assert_eq!(sim.find_by_id(7).map(|p| p.id), Some(7));
        assert!(sim.find_by_id(8).is_none());
        assert!(matches!(sim.particle(8), Err(Error::NotFound(_))));
        Ok(())
    }

    #[test]
    fn remove_missing_is_noop() -> Result<()> {
        let mut sim = ParticleSimulation::new(200.0, 200.0)?;
        let kept = particle(1, 50.0, 50.0);
        sim.add(kept.clone());
        assert!(sim.remove(&particle(2, 10.0, 10.0)).is_none());
        assert!(sim.remove_by_id(42).is_none());
        assert_eq!(sim.len(), 1);
        assert_eq!(sim.remove(&kept), Some(kept));
        assert!(sim.is_empty());
        Ok(())
    }

    #[test]
    fn update_moves_bounces_and_applies_friction() -> Result<()> {
        let mut sim = ParticleSimulation::new(100.0, 100.0)?;
        sim.set_friction(0.5)?;
        sim.add(particle(1, 75.0, 50.0).with_movement(Vector2::new(10.0, 0.0)));
        sim.update();
        let p = sim.particle(1)?;
        // 85 overshoots the wall at 80 by 5 and is mirrored to 75.
        assert!((p.position.x() - 75.0).abs() < TOL);
        assert!((p.movement.x() + 5.0).abs() < TOL);
        assert!(p.movement.y().abs() < TOL);
        Ok(())
    }

    #[test]
    fn later_particle_sees_earlier_post_move_position() -> Result<()> {
        // Particle 1 moves into particle 2 during this step; particle 2 has not moved yet.
        let mut sim = ParticleSimulation::new(1000.0, 1000.0)?;
        sim.add(particle(1, 100.0, 500.0).with_movement(Vector2::new(25.0, 0.0)));
        sim.add(particle(2, 160.0, 500.0));
        sim.update();

        let p1 = sim.particle(1)?;
        let p2 = sim.particle(2)?;
        // Equal masses swap the aligned component: 1 stops, 2 takes the movement.
        assert!(p1.movement.x().abs() < TOL);
        assert!((p2.movement.x() - 25.0).abs() < TOL);
        // Particle 2 (the `self` side, equal mass) is pushed clear to 166, then takes its own move.
        assert!((p2.position.x() - (125.0 + 41.0 + 25.0)).abs() < TOL);
        Ok(())
    }

    #[test]
    fn scatter_places_non_overlapping_particles() -> Result<()> {
        let mut sim = ParticleSimulation::new(800.0, 600.0)?;
        sim.add(particle(10, 400.0, 300.0));
        sim.scatter(20, 10.0, 5.0, Some(1234))?;
        assert_eq!(sim.len(), 21);

        let ps = sim.particles();
        for (i, a) in ps.iter().enumerate() {
            assert!(a.movement.r() <= 5.0 + TOL);
            for b in &ps[i + 1..] {
                assert!(a.position.distance(&b.position) >= a.size + b.size);
            }
        }
        let ids: Vec<u32> = ps[1..].iter().map(|p| p.id).collect();
        assert_eq!(ids, (11..31).collect::<Vec<u32>>());
        Ok(())
    }

    #[test]
    fn scatter_is_reproducible_with_seed() -> Result<()> {
        let mut a = ParticleSimulation::new(500.0, 500.0)?;
        let mut b = ParticleSimulation::new(500.0, 500.0)?;
        a.scatter(8, 12.0, 3.0, Some(99))?;
        b.scatter(8, 12.0, 3.0, Some(99))?;
        assert_eq!(a.positions(), b.positions());
        Ok(())
    }

    #[test]
    fn scatter_rejects_oversized_particles() -> Result<()> {
        let mut sim = ParticleSimulation::new(30.0, 30.0)?;
        let err = sim.scatter(1, 20.0, 1.0, Some(1)).unwrap_err();
        assert!(err.to_string().contains("2 * size"));
        Ok(())
    }
}
