use std::fs;
use std::path::Path;

use crate::error::WorldError;

/// Glyph marking a solid cell.
pub const WALL_GLYPH: char = '#';

/// What a ray finds in a cell. Height 0 means open space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Surface {
    pub height: f64,
}

impl Surface {
    pub const NOTHING: Surface = Surface { height: 0.0 };
    pub const WALL: Surface = Surface { height: 1.0 };

    #[inline]
    pub fn has_no_height(self) -> bool {
        self.height == 0.0
    }
}

/// Immutable tile map indexed `[row][col]`, i.e. `[y][x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldGrid {
    cells: Vec<Vec<char>>,
    width: usize,
}

impl WorldGrid {
    /// Builds a grid from glyph rows, rejecting empty or ragged input.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, WorldError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cells: Vec<Vec<char>> = rows
            .into_iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();

        let width = cells.first().map(Vec::len).ok_or(WorldError::Empty)?;
        for (row, line) in cells.iter().enumerate() {
            if line.is_empty() {
                return Err(WorldError::EmptyRow { row });
            }
            if line.len() != width {
                return Err(WorldError::RaggedRow {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }
        }

        Ok(Self { cells, width })
    }

    /// Parses one row per line. Trailing blank lines and `\r` are ignored.
    pub fn parse(text: &str) -> Result<Self, WorldError> {
        let mut rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        Self::from_rows(rows)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| WorldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let grid = Self::parse(&text)?;
        tracing::info!(
            path = %path.display(),
            width = grid.width(),
            height = grid.height(),
            "loaded world"
        );
        Ok(grid)
    }

    /// The 40x13 walled level with a pillar block, used when no world file is given.
    pub fn default_level() -> Self {
        const LEVEL: [&str; 13] = [
            "########################################",
            "#                                      #",
            "#                      ###             #",
            "#                                      #",
            "#                      ###             #",
            "#                      ###             #",
            "#                                      #",
            "#                                      #",
            "#                                      #",
            "#                                      #",
            "#                                      #",
            "#                                      #",
            "########################################",
        ];
        let cells = LEVEL.iter().map(|r| r.chars().collect()).collect();
        Self {
            cells,
            width: LEVEL[0].len(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Glyph at column `x`, row `y`, or `None` outside the grid.
    pub fn cell(&self, x: i64, y: i64) -> Option<char> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells.get(y as usize)?.get(x as usize).copied()
    }

    /// Surface at column `x`, row `y`.
    ///
    /// Cells outside the grid are open void: the range cutoff ends rays that leave the map.
    pub fn surface_at(&self, x: i64, y: i64) -> Surface {
        match self.cell(x, y) {
            Some(WALL_GLYPH) => Surface::WALL,
            Some(_) => Surface::NOTHING,
            None => {
                tracing::trace!(x, y, "lookup outside world, treating as void");
                Surface::NOTHING
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_and_floor_are_classified() {
        let grid = WorldGrid::from_rows(["###", "# #", "###"]).unwrap();
        assert_eq!(grid.surface_at(0, 0), Surface::WALL);
        assert_eq!(grid.surface_at(1, 1), Surface::NOTHING);
        assert!(grid.surface_at(1, 1).has_no_height());
        assert_eq!((grid.width(), grid.height()), (3, 3));
    }

    #[test]
    fn out_of_bounds_is_void() {
        let grid = WorldGrid::from_rows(["##", "##"]).unwrap();
        assert_eq!(grid.cell(2, 0), None);
        assert_eq!(grid.cell(-1, 0), None);
        assert_eq!(grid.surface_at(5, 5), Surface::NOTHING);
        assert_eq!(grid.surface_at(0, -1), Surface::NOTHING);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = WorldGrid::from_rows(["###", "#", "###"]).unwrap_err();
        assert!(matches!(
            err,
            WorldError::RaggedRow {
                row: 1,
                expected: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            WorldGrid::from_rows(Vec::<String>::new()),
            Err(WorldError::Empty)
        ));
        assert!(matches!(
            WorldGrid::parse("##\n\n##"),
            Err(WorldError::EmptyRow { row: 1 })
        ));
    }

    #[test]
    fn parse_drops_trailing_blank_lines() {
        let grid = WorldGrid::parse("###\r\n# #\r\n###\r\n\n").unwrap();
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.surface_at(2, 2), Surface::WALL);
    }

    #[test]
    fn default_level_is_enclosed() {
        let grid = WorldGrid::default_level();
        assert_eq!((grid.width(), grid.height()), (40, 13));
        assert_eq!(grid.surface_at(10, 7), Surface::NOTHING);
        assert_eq!(grid.surface_at(23, 2), Surface::WALL);
        for x in 0..40 {
            assert_eq!(grid.surface_at(x, 0), Surface::WALL);
            assert_eq!(grid.surface_at(x, 12), Surface::WALL);
        }
    }

    #[test]
    fn load_reports_missing_file() {
        let err = WorldGrid::load("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, WorldError::Io { .. }));
    }
}
