/// A point in continuous grid coordinates. Cell `(x, y)` spans `[x, x + 1) x [y, y + 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location2D {
    pub x: f64,
    pub y: f64,
}

impl Location2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Swaps the two coordinates so one stepping routine can serve both axes.
    #[inline]
    pub fn flip(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }

    /// Index of the grid cell containing this point.
    #[inline]
    pub fn cell(self) -> (i64, i64) {
        (self.x.floor() as i64, self.y.floor() as i64)
    }
}

/// Which family of grid lines a step crosses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Vertical lines `x = k`.
    X,
    /// Horizontal lines `y = k`.
    Y,
}

impl Axis {
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// A ray heading with its sine and cosine computed once.
///
/// Angle 0 points along +X, angles grow towards +Y (downwards in row order).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Direction {
    pub angle: f64,
    pub sin: f64,
    pub cos: f64,
}

impl Direction {
    pub fn from_radians(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { angle, sin, cos }
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(degrees.to_radians())
    }

    /// Component of travel along `axis`.
    #[inline]
    pub fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.cos,
            Axis::Y => self.sin,
        }
    }
}
