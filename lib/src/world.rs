//! The grid.

use crate::{
    cells::{Coord, State, ALIVE, DEAD},
    error::Error,
    topology::Torus,
};
use std::{
    fmt::{self, Display, Formatter},
    ops::{Index, IndexMut},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular grid of cells, stored row-major.
///
/// Its shape never changes. A 1-D row is a grid with a single row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid<T = State> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// A grid filled with the default value.
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid::filled(rows, cols, T::default())
    }
}

impl<T: Copy> Grid<T> {
    /// A grid filled with `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    /// A grid from row-major cells.
    pub fn from_vec(rows: usize, cols: usize, cells: Vec<T>) -> Result<Self, Error> {
        if cells.len() != rows * cols {
            return Err(Error::ShapeError {
                expected: rows * cols,
                found: cells.len(),
            });
        }
        Ok(Grid { rows, cols, cells })
    }

    /// A 1-D grid.
    pub fn row(cells: Vec<T>) -> Self {
        Grid {
            rows: 1,
            cols: cells.len(),
            cells,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The periodic topology of this grid.
    ///
    /// # Panics
    ///
    /// Panics if the grid has no cells.
    pub fn torus(&self) -> Torus {
        Torus::new(self.rows, self.cols).expect("a grid with cells has positive dimensions")
    }

    /// Gets the value of a cell. Returns `None` outside of the grid.
    #[inline]
    pub fn get(&self, (row, col): Coord) -> Option<T> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Sets the value of a cell.
    pub fn set(&mut self, coord: Coord, value: T) -> Result<(), Error> {
        let (row, col) = coord;
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = value;
            Ok(())
        } else {
            Err(Error::SetCellError(coord))
        }
    }

    /// The cells, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Iterates over the cells, row-major.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.cells.iter().copied()
    }

    /// Number of cells satisfying `pred`.
    pub fn count<F: FnMut(T) -> bool>(&self, mut pred: F) -> usize {
        self.cells.iter().filter(|&&c| pred(c)).count()
    }

    /// Consumes the grid, returning its cells.
    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }
}

impl<T> Index<Coord> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): Coord) -> &T {
        debug_assert!(row < self.rows && col < self.cols);
        &self.cells[row * self.cols + col]
    }
}

impl<T> IndexMut<Coord> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): Coord) -> &mut T {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.cells[row * self.cols + col]
    }
}

impl Grid<State> {
    /// Number of non-empty cells.
    ///
    /// Living cells for Life, agents for Schelling.
    pub fn population(&self) -> usize {
        self.count(|c| !c.is_void())
    }

    /// Number of cells in the given state.
    pub fn count_state(&self, state: State) -> usize {
        self.count(|c| c == state)
    }

    /// Parses a pattern in [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
    ///
    /// * `.` is dead (or void);
    /// * `o`, `O` and `*` are alive;
    /// * `A` to `Z` are the states 1 to 26;
    /// * lines starting with `!` are comments.
    ///
    /// Short lines are padded with dead cells.
    pub fn from_plaintext(text: &str) -> Result<Self, Error> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.starts_with('!'))
            .collect();
        let rows = lines.len();
        let cols = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let mut grid = Grid::filled(rows, cols, DEAD);
        for (row, line) in lines.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                grid[(row, col)] = match c {
                    '.' => DEAD,
                    'o' | 'O' | '*' => ALIVE,
                    'A'..='Z' => State(c as u8 - b'A' + 1),
                    _ => return Err(Error::PatternError(c)),
                };
            }
        }
        Ok(grid)
    }
}

/// Displays the grid in [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
///
/// * Empty cells are represented by `.`;
/// * Living cells are represented by `o` when every cell is dead or alive;
/// * Otherwise states are represented by uppercase letters starting from `A`.
impl Display for Grid<State> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let letters = self.iter().any(|c| c > ALIVE);
        for row in self.cells.chunks(self.cols.max(1)) {
            for &state in row {
                let c = match state {
                    DEAD => '.',
                    ALIVE if !letters => 'o',
                    State(i) if i <= 26 => (b'A' + i - 1) as char,
                    _ => '#',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
