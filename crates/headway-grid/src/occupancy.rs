use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Grid;

/// 2D occupancy map. `true` cells contain an obstacle.
///
/// Cells outside the map are reported as blocked, so callers never need to bounds check before
/// asking about a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: Grid<bool>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map contains no rows")]
    Empty,
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {0} is blank")]
    BlankRow(usize),
    #[error("unexpected cell {cell:?} at column {column} of row {row}")]
    UnknownCell { row: usize, column: usize, cell: char },
    #[error("map dimension {0} exceeds i32::MAX")]
    TooLarge(usize),
}

impl OccupancyGrid {
    /// Creates a map of the given size with every cell free.
    #[track_caller]
    pub fn new(width: i32, height: i32) -> Self {
        OccupancyGrid {
            cells: Grid::new(width, height, |_, _| false),
        }
    }

    /// Builds a map from rows of obstacle flags; `rows[y][x]` is the cell at `(x, y)`.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        for (row, cells) in rows.iter().enumerate() {
            let found = cells.as_ref().len();
            if found != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
        }
        let w = i32::try_from(width).map_err(|_| MapError::TooLarge(width))?;
        let h = i32::try_from(height).map_err(|_| MapError::TooLarge(height))?;
        Ok(OccupancyGrid {
            cells: Grid::new(w, h, |x, y| rows[y as usize].as_ref()[x as usize]),
        })
    }

    #[inline(always)]
    pub fn width(&self) -> i32 {
        self.cells.width()
    }

    #[inline(always)]
    pub fn height(&self) -> i32 {
        self.cells.height()
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.cells.in_bounds(x, y)
    }

    #[inline(always)]
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.cells.get(x, y).copied().unwrap_or(true)
    }

    #[inline(always)]
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        !self.is_blocked(x, y)
    }

    #[track_caller]
    pub fn set_blocked(&mut self, x: i32, y: i32, blocked: bool) {
        self.cells[(x, y)] = blocked;
    }

    pub fn free_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height())
            .flat_map(move |y| (0..self.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_free(x, y))
    }
}

/// Parses a map drawn in ASCII, one line per row starting at `y = 0`.
///
/// `.` is free; `#`, `@` and `T` are obstacles. Trailing blank lines are ignored, but a blank
/// line before the last row is an error.
impl FromStr for OccupancyGrid {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, MapError> {
        let lines: Vec<_> = s.lines().map(str::trim_end).collect();
        let end = lines.iter().rposition(|l| !l.is_empty()).map_or(0, |last| last + 1);
        let mut rows = vec![];
        for (row, line) in lines[..end].iter().enumerate() {
            if line.is_empty() {
                return Err(MapError::BlankRow(row));
            }
            let cells = line
                .chars()
                .enumerate()
                .map(|(column, cell)| match cell {
                    '.' => Ok(false),
                    '#' | '@' | 'T' => Ok(true),
                    _ => Err(MapError::UnknownCell { row, column, cell }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }
        if rows.is_empty() {
            return Err(MapError::Empty);
        }
        OccupancyGrid::from_rows(&rows)
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                f.write_str(if self.is_blocked(x, y) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_is_blocked() {
        let grid = OccupancyGrid::new(2, 2);
        assert!(grid.is_free(1, 1));
        assert!(grid.is_blocked(2, 0));
        assert!(grid.is_blocked(0, -1));
    }

    #[test]
    fn parses_ascii_rows() {
        let grid: OccupancyGrid = "..#\n.@.\n".parse().unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert!(grid.is_blocked(2, 0));
        assert!(grid.is_blocked(1, 1));
        assert!(grid.is_free(0, 1));
        assert_eq!(grid.free_cells().count(), 4);
        assert_eq!(grid.to_string(), "..#\n.#.\n");
    }

    #[test]
    fn rejects_malformed_maps() {
        assert_eq!("".parse::<OccupancyGrid>(), Err(MapError::Empty));
        assert_eq!(
            "...\n..\n".parse::<OccupancyGrid>(),
            Err(MapError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            ".x.".parse::<OccupancyGrid>(),
            Err(MapError::UnknownCell {
                row: 0,
                column: 1,
                cell: 'x'
            })
        );
    }

    #[test]
    fn rows_keep_their_line_numbers() {
        let grid: OccupancyGrid = "..\n.#\n\n\n".parse().unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert!(grid.is_blocked(1, 1));

        assert_eq!("..\n\n..\n".parse::<OccupancyGrid>(), Err(MapError::BlankRow(1)));
        assert_eq!("\n..\n".parse::<OccupancyGrid>(), Err(MapError::BlankRow(0)));
        assert_eq!("\n\n".parse::<OccupancyGrid>(), Err(MapError::Empty));
        assert_eq!(
            "..\n..\n.x\n".parse::<OccupancyGrid>(),
            Err(MapError::UnknownCell {
                row: 2,
                column: 1,
                cell: 'x'
            })
        );
    }

    #[test]
    fn from_rows_indexes_by_row() {
        let grid = OccupancyGrid::from_rows(&[[false, true], [false, false]]).unwrap();
        assert!(grid.is_blocked(1, 0));
        assert!(grid.is_free(1, 1));
    }
}
