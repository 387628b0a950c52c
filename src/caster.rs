use std::time::Instant;

use crate::geometry::{Direction, Location2D};
use crate::ray::{self, SamplePoint};
use crate::world::WorldGrid;

/// Ray angle in radians for `column`. Columns span one radian centered on the heading.
#[inline]
pub fn column_angle(heading_degrees: f64, column: usize, column_count: usize) -> f64 {
    let offset = column as f64 / column_count as f64 - 0.5;
    heading_degrees.to_radians() + offset
}

/// Casts one ray per column from `origin` and returns each ray's final sample, left to right.
pub fn cast_rays(
    grid: &WorldGrid,
    origin: Location2D,
    column_count: usize,
    heading_degrees: f64,
    max_range: f64,
) -> Vec<SamplePoint> {
    let started = Instant::now();

    let columns: Vec<SamplePoint> = (0..column_count)
        .map(|column| {
            let direction =
                Direction::from_radians(column_angle(heading_degrees, column, column_count));
            ray::cast(origin, direction, grid, max_range).last()
        })
        .collect();

    tracing::debug!(
        columns = column_count,
        x = origin.x,
        y = origin.y,
        heading = heading_degrees,
        hits = columns.iter().filter(|s| s.is_hit()).count(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "cast rays"
    );
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_result_per_column() {
        let grid = WorldGrid::default_level();
        for count in [0, 1, 7, 320] {
            let columns = cast_rays(&grid, Location2D::new(10.0, 7.0), count, 0.0, 20.0);
            assert_eq!(columns.len(), count);
        }
    }

    #[test]
    fn columns_cover_a_symmetric_field() {
        assert_eq!(column_angle(0.0, 0, 4), -0.5);
        assert_eq!(column_angle(0.0, 2, 4), 0.0);
        assert_eq!(column_angle(0.0, 3, 4), 0.25);
        assert!((column_angle(90.0, 2, 4) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn missing_walls_still_fill_every_column() {
        let grid = WorldGrid::from_rows(["     ", "     ", "     "]).unwrap();
        let columns = cast_rays(&grid, Location2D::new(2.5, 1.5), 16, 0.0, 5.0);
        assert_eq!(columns.len(), 16);
        for sample in columns {
            assert!(!sample.is_hit());
            assert!(sample.distance_traveled > 5.0);
        }
    }

    #[test]
    fn default_level_view_hits_walls() {
        let grid = WorldGrid::default_level();
        let columns = cast_rays(&grid, Location2D::new(10.0, 7.0), 64, 0.0, 40.0);
        assert!(columns.iter().all(SamplePoint::is_hit));
    }
}
