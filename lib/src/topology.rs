//! Toroidal topology and neighborhood windows.
//!
//! Every coordinate computation in this crate goes through [`Torus::wrap`]:
//! the absolute coordinate of a neighbor is `((i + Δi) % rows, (j + Δj) % cols)`,
//! where the offset `(Δi, Δj)` has already been reduced modulo the grid size.
//! There is no special case for edges or corners.

use crate::{cells::Coord, error::Error, world::Grid};

/// An offset in a window, already reduced modulo the grid dimensions.
pub type Offset = (usize, usize);

/// The eight signed offsets of the Moore neighborhood, in the canonical order
/// shared by every rule of this crate:
///
/// ```plaintext
/// 0 1 2      NW N NE
/// 3 . 4      W  .  E
/// 5 6 7      SW S SE
/// ```
pub const MOORE: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The shape of a periodic grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Torus {
    rows: usize,
    cols: usize,
}

impl Torus {
    /// A `rows × cols` torus. Both dimensions must be positive.
    pub fn new(rows: usize, cols: usize) -> Result<Self, Error> {
        if rows == 0 || cols == 0 {
            return Err(Error::NonPositiveError);
        }
        Ok(Torus { rows, cols })
    }

    /// A 1-D ring of `len` cells, seen as a single row.
    pub fn ring(len: usize) -> Result<Self, Error> {
        Torus::new(1, len)
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

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// A torus always has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Reduces a signed offset modulo the grid dimensions.
    #[inline]
    pub fn offset(&self, d_row: isize, d_col: isize) -> Offset {
        (
            d_row.rem_euclid(self.rows as isize) as usize,
            d_col.rem_euclid(self.cols as isize) as usize,
        )
    }

    /// Applies a reduced offset to a coordinate, wrapping around the edges.
    #[inline]
    pub fn wrap(&self, (row, col): Coord, (d_row, d_col): Offset) -> Coord {
        debug_assert!(row < self.rows && col < self.cols);
        ((row + d_row) % self.rows, (col + d_col) % self.cols)
    }

    /// Row-major index of a coordinate.
    #[inline]
    pub fn index(&self, (row, col): Coord) -> usize {
        row * self.cols + col
    }

    /// Coordinate of a row-major index.
    #[inline]
    pub fn coord(&self, index: usize) -> Coord {
        (index / self.cols, index % self.cols)
    }

    /// The eight neighbors of a cell, in the order of [`MOORE`].
    pub fn moore(&self, coord: Coord) -> [Coord; 8] {
        MOORE.map(|(d_row, d_col)| self.wrap(coord, self.offset(d_row, d_col)))
    }
}

/// A neighborhood window.
///
/// The offsets are computed once from the shape of the grid and the radius,
/// and reused for every cell of every generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window {
    torus: Torus,
    radius: usize,
    include_center: bool,
    /// Whether the window spans rows too, or only columns.
    square: bool,
    offsets: Box<[Offset]>,
}

impl Window {
    /// A `(2r + 1) × (2r + 1)` window.
    ///
    /// The radius must be positive and smaller than both dimensions.
    pub fn square(torus: Torus, radius: usize, include_center: bool) -> Result<Self, Error> {
        if radius >= torus.rows {
            return Err(Error::WindowTooLarge {
                radius,
                rows: torus.rows,
                cols: torus.cols,
            });
        }
        Window::build(torus, radius, include_center, true)
    }

    /// A `1 × (2r + 1)` window along the columns, for 1-D grids.
    ///
    /// The radius must be positive and smaller than the number of columns.
    pub fn line(torus: Torus, radius: usize, include_center: bool) -> Result<Self, Error> {
        Window::build(torus, radius, include_center, false)
    }

    /// The Moore ring: radius 1, center excluded.
    pub fn moore(torus: Torus) -> Result<Self, Error> {
        Window::square(torus, 1, false)
    }

    fn build(
        torus: Torus,
        radius: usize,
        include_center: bool,
        square: bool,
    ) -> Result<Self, Error> {
        if radius == 0 {
            return Err(Error::NonPositiveError);
        }
        if radius >= torus.cols {
            return Err(Error::WindowTooLarge {
                radius,
                rows: torus.rows,
                cols: torus.cols,
            });
        }
        let r = radius as isize;
        let row_range = if square { -r..=r } else { 0..=0 };

        let mut offsets = Vec::new();
        for d_row in row_range {
            for d_col in -r..=r {
                let offset = torus.offset(d_row, d_col);
                if offset == (0, 0) && !include_center {
                    continue;
                }
                // A window wider than the grid would reach the same cell twice.
                if !offsets.contains(&offset) {
                    offsets.push(offset);
                }
            }
        }

        let window = Window {
            torus,
            radius,
            include_center,
            square,
            offsets: offsets.into_boxed_slice(),
        };
        window.check();
        Ok(window)
    }

    /// Asserts that [`Torus::wrap`] maps the distinct offsets of the window
    /// to distinct coordinates.
    ///
    /// Offsets folding onto the same cell are merged before this check,
    /// so it only fails if the wrap arithmetic itself is wrong.
    fn check(&self) {
        let coords: Vec<Coord> = self.resolve((0, 0)).collect();
        for (i, a) in coords.iter().enumerate() {
            assert!(
                !coords[i + 1..].contains(a),
                "window resolves to duplicate coordinate {:?}",
                a
            );
        }
    }

    /// The shape of the grid this window was built for.
    #[inline]
    pub fn torus(&self) -> Torus {
        self.torus
    }

    /// Radius.
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Whether the center cell is part of the window.
    #[inline]
    pub fn includes_center(&self) -> bool {
        self.include_center
    }

    /// Number of cells in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the window is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The flattened list of offsets, row-major.
    #[inline]
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// The offsets laid out as a `(2r + 1) × (2r + 1)` grid
    /// (or a single row for a line window).
    ///
    /// The excluded center, and positions folded onto an earlier offset
    /// on small grids, are `None`.
    pub fn grid(&self) -> Vec<Vec<Option<Offset>>> {
        let r = self.radius as isize;
        let row_range = if self.square { -r..=r } else { 0..=0 };
        let mut seen = Vec::with_capacity(self.offsets.len());
        row_range
            .map(|d_row| {
                (-r..=r)
                    .map(|d_col| {
                        let offset = self.torus.offset(d_row, d_col);
                        if (offset == (0, 0) && !self.include_center) || seen.contains(&offset) {
                            None
                        } else {
                            seen.push(offset);
                            Some(offset)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// The absolute coordinates of the window around a cell.
    pub fn resolve(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.offsets
            .iter()
            .map(move |&offset| self.torus.wrap(coord, offset))
    }

    /// The absolute coordinate of one slot of the window around a cell.
    #[inline]
    pub fn resolve_slot(&self, coord: Coord, slot: usize) -> Coord {
        self.torus.wrap(coord, self.offsets[slot])
    }

    /// Collects the values of the window around a cell into `buf`.
    ///
    /// The buffer is cleared first, so one buffer can serve a whole scan.
    pub fn gather<T: Copy>(&self, grid: &Grid<T>, coord: Coord, buf: &mut Vec<T>) {
        debug_assert_eq!(grid.torus(), self.torus);
        buf.clear();
        buf.extend(self.resolve(coord).map(|c| grid[c]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_has_eight_distinct_neighbors_everywhere() -> Result<(), Error> {
        for &(rows, cols) in &[(3, 3), (3, 7), (5, 5), (10, 4)] {
            let torus = Torus::new(rows, cols)?;
            let window = Window::moore(torus)?;
            for row in 0..rows {
                for col in 0..cols {
                    let mut coords: Vec<Coord> = window.resolve((row, col)).collect();
                    assert_eq!(coords.len(), 8);
                    assert!(!coords.contains(&(row, col)));
                    coords.sort_unstable();
                    coords.dedup();
                    assert_eq!(coords.len(), 8);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn corner_wraps_around() -> Result<(), Error> {
        let torus = Torus::new(5, 5)?;
        let nbhd = torus.moore((0, 0));
        assert_eq!(nbhd[1], (4, 0));
        assert_eq!(nbhd[3], (0, 4));
        assert_eq!(nbhd[0], (4, 4));
        assert_eq!(nbhd[7], (1, 1));
        Ok(())
    }

    #[test]
    fn moore_window_matches_moore_order() -> Result<(), Error> {
        let torus = Torus::new(6, 4)?;
        let window = Window::moore(torus)?;
        for index in 0..torus.len() {
            let coord = torus.coord(index);
            let from_window: Vec<Coord> = window.resolve(coord).collect();
            assert_eq!(from_window, torus.moore(coord).to_vec());
        }
        Ok(())
    }

    #[test]
    fn center_exclusion_removes_only_the_origin() -> Result<(), Error> {
        let torus = Torus::new(9, 9)?;
        let full = Window::square(torus, 2, true)?;
        let ring = Window::square(torus, 2, false)?;
        assert_eq!(full.len(), 25);
        assert_eq!(ring.len(), 24);
        assert!(full.offsets().contains(&(0, 0)));
        assert!(!ring.offsets().contains(&(0, 0)));
        assert!(ring.offsets().iter().all(|o| full.offsets().contains(o)));
        Ok(())
    }

    #[test]
    fn line_window() -> Result<(), Error> {
        let torus = Torus::ring(10)?;
        let window = Window::line(torus, 3, false)?;
        let cols: Vec<usize> = window.resolve((0, 1)).map(|(_, c)| c).collect();
        assert_eq!(cols, vec![8, 9, 0, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn small_ring_is_not_double_counted() -> Result<(), Error> {
        let torus = Torus::ring(2)?;
        let window = Window::line(torus, 1, false)?;
        assert_eq!(window.offsets(), &[(0, 1)]);
        assert_eq!(window.grid(), vec![vec![Some((0, 1)), None, None]]);
        Ok(())
    }

    #[test]
    fn oversized_radius_is_rejected() -> Result<(), Error> {
        let torus = Torus::new(4, 8)?;
        assert_eq!(
            Window::square(torus, 4, false),
            Err(Error::WindowTooLarge {
                radius: 4,
                rows: 4,
                cols: 8
            })
        );
        assert_eq!(
            Window::line(torus, 0, true),
            Err(Error::NonPositiveError)
        );
        Ok(())
    }

    #[test]
    fn gather_reuses_the_buffer() -> Result<(), Error> {
        let mut grid = Grid::filled(3, 3, 0u8);
        grid[(0, 0)] = 1;
        let window = Window::moore(grid.torus())?;
        let mut buf = vec![9; 20];
        window.gather(&grid, (2, 2), &mut buf);
        assert_eq!(buf, vec![0, 0, 0, 0, 0, 0, 0, 1]);
        Ok(())
    }
}
