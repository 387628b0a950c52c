use std::str::FromStr;

use crate::geometry::Location2D;

/// One-cell movement commands issued by the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinal {
    Up,
    Right,
    Down,
    Left,
}

impl Cardinal {
    /// Compass bearing of the move: Up = 0, clockwise.
    pub fn degrees(self) -> f64 {
        match self {
            Cardinal::Up => 0.0,
            Cardinal::Right => 90.0,
            Cardinal::Down => 180.0,
            Cardinal::Left => 270.0,
        }
    }

    /// Grid offset for one step. Rows grow downwards, so Up is `-y`.
    pub fn delta(self) -> (f64, f64) {
        let bearing = self.degrees().to_radians();
        (bearing.sin().round(), -bearing.cos().round())
    }
}

impl FromStr for Cardinal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Cardinal::Up),
            "right" => Ok(Cardinal::Right),
            "down" => Ok(Cardinal::Down),
            "left" => Ok(Cardinal::Left),
            other => Err(format!("unknown direction {other:?}")),
        }
    }
}

/// Viewer-owned camera. The caster only ever reads a copy of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub location: Location2D,
    /// Degrees in `[0, 360)`; 0 looks along +X.
    pub heading: f64,
}

impl Camera {
    pub fn new(location: Location2D, heading: f64) -> Self {
        Self {
            location,
            heading: heading.rem_euclid(360.0),
        }
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.location = Location2D::new(self.location.x + dx, self.location.y + dy);
    }

    pub fn rotate(&mut self, delta_degrees: f64) {
        self.heading = (self.heading + delta_degrees).rem_euclid(360.0);
    }

    pub fn step(&mut self, direction: Cardinal) {
        let (dx, dy) = direction.delta();
        self.move_by(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_steps_move_one_cell() {
        let mut camera = Camera::new(Location2D::new(10.0, 7.0), 0.0);
        camera.step(Cardinal::Up);
        assert_eq!(camera.location, Location2D::new(10.0, 6.0));
        camera.step(Cardinal::Right);
        assert_eq!(camera.location, Location2D::new(11.0, 6.0));
        camera.step(Cardinal::Down);
        camera.step(Cardinal::Down);
        assert_eq!(camera.location, Location2D::new(11.0, 8.0));
        camera.step(Cardinal::Left);
        assert_eq!(camera.location, Location2D::new(10.0, 8.0));
    }

    #[test]
    fn rotation_wraps_heading() {
        let mut camera = Camera::new(Location2D::new(0.0, 0.0), -90.0);
        assert_eq!(camera.heading, 270.0);
        camera.rotate(100.0);
        assert_eq!(camera.heading, 10.0);
        camera.rotate(-20.0);
        assert_eq!(camera.heading, 350.0);
    }

    #[test]
    fn directions_parse_from_labels() {
        assert_eq!("Up".parse::<Cardinal>(), Ok(Cardinal::Up));
        assert_eq!("LEFT".parse::<Cardinal>(), Ok(Cardinal::Left));
        assert!("sideways".parse::<Cardinal>().is_err());
    }
}
