use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{Particle, ParticleSimulation, Vector2};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python-facing wrapper around the Rust ParticleSimulation.
///
/// API:
/// - __new__(width, height, friction=0.0)
/// - add_particle(id, x, y, vx=0.0, vy=0.0, size=20.0, mass=1.0)
/// - remove_particle(id) -> bool
/// - update(steps=1)
/// - find(x, y) -> Optional[int]
/// - set_position(id, x, y) -> bool
/// - scatter(count, size=20.0, max_speed=5.0, seed=None)
/// - kinetic_energy() -> float
/// - get_ids() -> list[int]
/// - get_positions() -> np.ndarray, shape (N, 2)
/// - get_movements() -> np.ndarray, shape (N, 2)
/// - get_sizes() -> np.ndarray, shape (N,)
#[pyclass]
pub struct BounceSim {
    sim: ParticleSimulation,
}

#[pymethods]
impl BounceSim {
    /// Create an empty arena.
    ///
    /// Errors: raises ValueError on a non-positive dimension or non-finite friction.
    #[new]
    #[pyo3(signature = (width, height, friction=0.0))]
    fn new(width: f64, height: f64, friction: f64) -> PyResult<Self> {
        let mut sim = ParticleSimulation::new(width, height).map_err(py_err)?;
        sim.set_friction(friction).map_err(py_err)?;
        Ok(Self { sim })
    }

    #[getter]
    fn get_friction(&self) -> f64 {
        self.sim.friction()
    }

    #[setter]
    fn set_friction(&mut self, friction: f64) -> PyResult<()> {
        self.sim.set_friction(friction).map_err(py_err)?;
        Ok(())
    }

    /// Append a particle. Raises ValueError if mass is not positive.
    #[pyo3(signature = (id, x, y, vx=0.0, vy=0.0, size=20.0, mass=1.0))]
    #[allow(clippy::too_many_arguments)]
    fn add_particle(
        &mut self,
        id: u32,
        x: f64,
        y: f64,
        vx: f64,
        vy: f64,
        size: f64,
        mass: f64,
    ) -> PyResult<()> {
        let p = Particle::new(id, size, Vector2::new(x, y), Vector2::new(vx, vy), mass)
            .map_err(py_err)?;
        self.sim.add(p);
        Ok(())
    }

    /// Remove the first particle with `id`. Returns False if there was none.
    fn remove_particle(&mut self, id: u32) -> bool {
        self.sim.remove_by_id(id).is_some()
    }

    /// Scatter `count` random non-overlapping particles.
    #[pyo3(signature = (count, size=20.0, max_speed=5.0, seed=None))]
    fn scatter(&mut self, count: usize, size: f64, max_speed: f64, seed: Option<u64>) -> PyResult<()> {
        self.sim
            .scatter(count, size, max_speed, seed)
            .map_err(py_err)?;
        Ok(())
    }

    /// Advance `steps` frames (releases the GIL during computation).
    #[pyo3(signature = (steps=1))]
    fn update(&mut self, py: Python<'_>, steps: usize) {
        py.detach(|| {
            self.sim.run(steps);
        });
    }

    /// Id of the first particle containing the point, if any.
    fn find(&self, x: f64, y: f64) -> Option<u32> {
        self.sim.find(&Vector2::new(x, y)).map(|p| p.id)
    }

    /// Move a particle (e.g. while dragging it with the mouse). Returns False if there was none.
    fn set_position(&mut self, id: u32, x: f64, y: f64) -> bool {
        match self.sim.find_by_id_mut(id) {
            Some(p) => {
                p.set_position(Vector2::new(x, y));
                true
            }
            None => false,
        }
    }

    fn __len__(&self) -> usize {
        self.sim.len()
    }

    /// Total kinetic energy.
    fn kinetic_energy(&self) -> f64 {
        self.sim.kinetic_energy()
    }

    /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
    fn get_positions<'py>(&self, py: Python<'py>) -> Py<PyArray2<f64>> {
        self.vectors_to_array(py, |p| p.position)
    }

    /// Return movements as a NumPy array of shape (N, 2), dtype=float64.
    fn get_movements<'py>(&self, py: Python<'py>) -> Py<PyArray2<f64>> {
        self.vectors_to_array(py, |p| p.movement)
    }

    /// Return radii as a NumPy array of shape (N,), dtype=float64.
    fn get_sizes<'py>(&self, py: Python<'py>) -> Py<PyArray1<f64>> {
        let sizes: Array1<f64> = self.sim.particles().iter().map(|p| p.size).collect();
        sizes.into_pyarray(py).unbind()
    }

    /// Return ids in simulation order.
    fn get_ids(&self) -> Vec<u32> {
        self.sim.particles().iter().map(|p| p.id).collect()
    }
}

impl BounceSim {
    fn vectors_to_array<'py>(
        &self,
        py: Python<'py>,
        field: impl Fn(&Particle) -> Vector2,
    ) -> Py<PyArray2<f64>> {
        let particles = self.sim.particles();
        let mut arr = Array2::<f64>::zeros((particles.len(), 2));
        for (i, p) in particles.iter().enumerate() {
            let [x, y] = field(p).to_array();
            arr[[i, 0]] = x;
            arr[[i, 1]] = y;
        }
        arr.into_pyarray(py).unbind()
    }
}

/// The bouncesim Python module entry point.
#[pymodule]
fn bouncesim(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<BounceSim>()?;
    Ok(())
}
