use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2D vector readable and writable both as cartesian `(x, y)` and polar `(r, a)`.
///
/// All four components are stored. Every setter recomputes the other view immediately, so
/// reads never observe a stale value:
/// - `x = r·cos(a)`, `y = r·sin(a)`
/// - `r = |(x, y)| ≥ 0`, `a = atan2(y, x)` in radians
///
/// When the magnitude drops to zero the angle keeps its last value, so scaling a vector
/// down to zero and back up again preserves its direction.
#[derive(Debug, Clone, Copy)]
pub struct Vector2 {
    x: f64,
    y: f64,
    r: f64,
    a: f64,
}

impl Vector2 {
    /// The zero vector, angle 0.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        r: 0.0,
        a: 0.0,
    };

    /// Build from cartesian components.
    pub fn new(x: f64, y: f64) -> Self {
        let mut v = Self::ZERO;
        v.set_xy(x, y);
        v
    }

    /// Build from polar components. A negative radius is folded into the angle so that
    /// `r ≥ 0` always holds.
    pub fn from_polar(r: f64, a: f64) -> Self {
        let mut v = Self::ZERO;
        v.set_polar(r, a);
        v
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Magnitude.
    #[inline]
    pub fn r(&self) -> f64 {
        self.r
    }

    /// Angle in radians.
    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn set_x(&mut self, x: f64) {
        self.set_xy(x, self.y);
    }

    pub fn set_y(&mut self, y: f64) {
        self.set_xy(self.x, y);
    }

    pub fn set_r(&mut self, r: f64) {
        self.set_polar(r, self.a);
    }

    pub fn set_a(&mut self, a: f64) {
        self.set_polar(self.r, a);
    }

    /// Set both cartesian components and recompute the polar view.
    pub fn set_xy(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.r = x.hypot(y);
        if self.r > 0.0 {
            self.a = y.atan2(x);
        }
    }

    /// Set both polar components and recompute the cartesian view.
    pub fn set_polar(&mut self, r: f64, a: f64) {
        let (r, a) = if r < 0.0 { (-r, a + PI) } else { (r, a) };
        self.r = r;
        self.a = a;
        let (sin, cos) = a.sin_cos();
        self.x = r * cos;
        self.y = r * sin;
    }

    /// Rotate by `da` radians, keeping the magnitude.
    pub fn rotate(&mut self, da: f64) {
        self.set_a(self.a + da);
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Cartesian components as an array.
    #[inline]
    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl Default for Vector2 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Equality compares the cartesian view; the angle retained by a zero vector is ignored.
impl PartialEq for Vector2 {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.set_xy(self.x + rhs.x, self.y + rhs.y);
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.set_xy(self.x - rhs.x, self.y - rhs.y);
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;
    fn mul(mut self, k: f64) -> Self {
        self *= k;
        self
    }
}

// Scaling keeps the stored angle, so a vector that decays to zero keeps its heading.
impl MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, k: f64) {
        if self.r == 0.0 {
            return;
        }
        self.set_xy(self.x * k, self.y * k);
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
