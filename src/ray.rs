//! Grid traversal: a ray advances from one grid-line crossing to the next
//! until it enters a solid cell or runs past the camera range.

use crate::geometry::{Axis, Direction, Location2D};
use crate::world::{Surface, WorldGrid};

/// One recorded grid-line crossing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    pub location: Location2D,
    /// Squared length of the step that produced this sample.
    pub length: f64,
    pub distance_traveled: f64,
    pub surface: Surface,
}

impl SamplePoint {
    pub fn origin(location: Location2D) -> Self {
        Self {
            location,
            length: 0.0,
            distance_traveled: 0.0,
            surface: Surface::NOTHING,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        !self.surface.has_no_height()
    }
}

/// Samples along one cast, origin first. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Ray {
    samples: Vec<SamplePoint>,
}

impl Ray {
    fn starting_at(origin: SamplePoint) -> Self {
        Self {
            samples: vec![origin],
        }
    }

    pub fn samples(&self) -> &[SamplePoint] {
        &self.samples
    }

    /// The sample a renderer consumes: the wall hit, or the last open crossing.
    pub fn last(&self) -> SamplePoint {
        self.samples[self.samples.len() - 1]
    }

    pub fn hit(&self) -> Option<SamplePoint> {
        Some(self.last()).filter(SamplePoint::is_hit)
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Signed offset from `a` to the nearest grid line in the direction of `run`.
fn offset_to_next_line(a: f64, run: f64) -> f64 {
    let step = if run > 0.0 {
        (a + 1.0).floor() - a
    } else {
        (a - 1.0).ceil() - a
    };
    // Only reachable once `a + 1` is no longer representable; never stall.
    if step == 0.0 { run.signum() } else { step }
}

/// Candidate sample where the ray next crosses a grid line of the `axis` family.
///
/// The Y family is computed by flipping coordinates, stepping as if it were X,
/// then flipping back. Returns `None` when the ray runs parallel to those lines.
pub fn next_crossing(from: &SamplePoint, direction: Direction, axis: Axis) -> Option<SamplePoint> {
    let run = direction.along(axis);
    if run == 0.0 {
        return None;
    }
    let rise = direction.along(axis.other());

    let here = match axis {
        Axis::X => from.location,
        Axis::Y => from.location.flip(),
    };
    let stepped_first = offset_to_next_line(here.x, run);
    let stepped_second = stepped_first * (rise / run);

    let stepped = Location2D::new(here.x + stepped_first, here.y + stepped_second);
    let location = match axis {
        Axis::X => stepped,
        Axis::Y => stepped.flip(),
    };

    Some(SamplePoint {
        location,
        length: stepped_first * stepped_first + stepped_second * stepped_second,
        distance_traveled: from.distance_traveled,
        surface: Surface::NOTHING,
    })
}

/// Resolves the surface of the cell entered at `candidate` and accumulates distance.
fn inspect(
    candidate: SamplePoint,
    crossed: Axis,
    previous_distance: f64,
    direction: Direction,
    grid: &WorldGrid,
) -> SamplePoint {
    // Moving towards negative coordinates the entered cell lies one unit back.
    let (dx, dy) = match crossed {
        Axis::X if direction.cos < 0.0 => (1.0, 0.0),
        Axis::Y if direction.sin < 0.0 => (0.0, 1.0),
        _ => (0.0, 0.0),
    };
    let probe = Location2D::new(candidate.location.x - dx, candidate.location.y - dy);
    let (x, y) = probe.cell();

    SamplePoint {
        surface: grid.surface_at(x, y),
        distance_traveled: previous_distance + candidate.length.sqrt(),
        ..candidate
    }
}

/// Next sample after `from`, or `None` if the direction crosses no grid lines at all.
///
/// The strictly nearer X crossing wins; on a tie the Y crossing is taken.
pub fn advance(from: &SamplePoint, direction: Direction, grid: &WorldGrid) -> Option<SamplePoint> {
    let step_x = next_crossing(from, direction, Axis::X);
    let step_y = next_crossing(from, direction, Axis::Y);

    let (candidate, crossed) = match (step_x, step_y) {
        (Some(x), Some(y)) if x.length < y.length => (x, Axis::X),
        (Some(_), Some(y)) => (y, Axis::Y),
        (Some(x), None) => (x, Axis::X),
        (None, Some(y)) => (y, Axis::Y),
        (None, None) => return None,
    };

    Some(inspect(
        candidate,
        crossed,
        from.distance_traveled,
        direction,
        grid,
    ))
}

/// Casts one ray from `origin` until it hits a wall or travels past `max_range`.
///
/// Open crossings are always recorded; the first one beyond `max_range` is the
/// last sample. A wall beyond `max_range` is recorded as open space at its
/// distance, so a ray that finds no wall in range always ends past `max_range`.
pub fn cast(origin: Location2D, direction: Direction, grid: &WorldGrid, max_range: f64) -> Ray {
    let mut ray = Ray::starting_at(SamplePoint::origin(origin));

    if !(direction.sin.is_finite() && direction.cos.is_finite()) {
        tracing::warn!(angle = direction.angle, "non-finite ray direction, not stepping");
        return ray;
    }
    let max_range = if max_range.is_finite() {
        max_range
    } else {
        let diagonal = (grid.width() as f64).hypot(grid.height() as f64);
        tracing::warn!(max_range, diagonal, "non-finite camera range, using world diagonal");
        diagonal
    };

    let mut current = ray.last();
    while let Some(next) = advance(&current, direction, grid) {
        if next.surface.has_no_height() {
            ray.samples.push(next);
            if next.distance_traveled > max_range {
                tracing::trace!(distance = next.distance_traveled, "ray left camera range");
                break;
            }
            current = next;
            continue;
        }
        if next.distance_traveled > max_range {
            tracing::trace!(distance = next.distance_traveled, "wall beyond camera range");
            ray.samples.push(SamplePoint {
                surface: Surface::NOTHING,
                ..next
            });
            break;
        }
        ray.samples.push(next);
        break;
    }
    ray
}
