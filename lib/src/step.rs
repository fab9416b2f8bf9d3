//! The stepper.

use crate::{cells::Coord, topology::Window, world::Grid};
use educe::Educe;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the cells of one generation see each other.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UpdateScheme {
    /// Every cell sees only the previous generation.
    #[educe(Default)]
    #[cfg_attr(feature = "serde", serde(alias = "sync"))]
    Synchronous,

    /// Cells are updated in place in row-major order,
    /// so a cell sees the cells scanned before it in their new states.
    #[cfg_attr(feature = "serde", serde(alias = "seq"))]
    Sequential,
}

/// Applies `f` to every cell of the grid, row-major, and returns the next grid.
///
/// `f` receives the coordinates of the cell, its value and the values of
/// its window. With [`UpdateScheme::Synchronous`] the window is read from
/// `grid`; with [`UpdateScheme::Sequential`] it is read from the grid being
/// written.
pub fn scan<T, F>(grid: &Grid<T>, window: &Window, scheme: UpdateScheme, mut f: F) -> Grid<T>
where
    T: Copy,
    F: FnMut(Coord, T, &[T]) -> T,
{
    let torus = grid.torus();
    let mut next = grid.clone();
    let mut nbhd = Vec::with_capacity(window.len());
    for index in 0..torus.len() {
        let coord = torus.coord(index);
        let source = match scheme {
            UpdateScheme::Synchronous => grid,
            UpdateScheme::Sequential => &next,
        };
        let cell = source[coord];
        window.gather(source, coord, &mut nbhd);
        next[coord] = f(coord, cell, &nbhd);
    }
    next
}

/// Lets the occupants of the grid move, row-major, and returns the next grid.
///
/// `decide` receives the flat index and coordinates of an occupied cell,
/// its occupant and the values of its window, and returns the slot of the
/// window to move to, if any. Only `vacant` cells can be moved to; the cell
/// left behind becomes `vacant`. Occupants are never created or destroyed.
///
/// With [`UpdateScheme::Synchronous`] every decision is made against `grid`,
/// and a move whose target has already been taken in this generation is
/// dropped. With [`UpdateScheme::Sequential`] the grid is updated in place,
/// so an occupant that moved forward in the scan is visited again.
pub fn relocate<T, F>(
    grid: &Grid<T>,
    window: &Window,
    scheme: UpdateScheme,
    vacant: T,
    mut decide: F,
) -> Grid<T>
where
    T: Copy + PartialEq,
    F: FnMut(usize, Coord, T, &[T]) -> Option<usize>,
{
    let torus = grid.torus();
    let mut next = grid.clone();
    let mut nbhd = Vec::with_capacity(window.len());
    for index in 0..torus.len() {
        let coord = torus.coord(index);
        let source = match scheme {
            UpdateScheme::Synchronous => grid,
            UpdateScheme::Sequential => &next,
        };
        let occupant = source[coord];
        if occupant == vacant {
            continue;
        }
        window.gather(source, coord, &mut nbhd);
        let slot = match decide(index, coord, occupant, &nbhd) {
            Some(slot) => slot,
            None => continue,
        };
        let target = window.resolve_slot(coord, slot);
        assert!(
            nbhd[slot] == vacant,
            "cell {:?} moved to occupied cell {:?}",
            coord,
            target
        );
        if next[target] == vacant {
            next[target] = occupant;
            next[coord] = vacant;
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, topology::Torus};

    #[test]
    fn schemes_differ_on_a_shift() -> Result<(), Error> {
        let torus = Torus::ring(5)?;
        let window = Window::line(torus, 1, false)?;
        let grid = Grid::row(vec![1u32, 0, 0, 0, 0]);

        // Every cell copies its left neighbor.
        let shift = |_: Coord, _: u32, nbhd: &[u32]| nbhd[0];

        let sync = scan(&grid, &window, UpdateScheme::Synchronous, shift);
        assert_eq!(sync.as_slice(), &[0, 1, 0, 0, 0]);

        // The first cell reads the old last cell, then the value runs along the row.
        let seq = scan(&grid, &window, UpdateScheme::Sequential, shift);
        assert_eq!(seq.as_slice(), &[0, 0, 0, 0, 0]);

        let grid = Grid::row(vec![0u32, 0, 0, 0, 1]);
        let seq = scan(&grid, &window, UpdateScheme::Sequential, shift);
        assert_eq!(seq.as_slice(), &[1, 1, 1, 1, 1]);
        Ok(())
    }

    #[test]
    fn visits_row_major() -> Result<(), Error> {
        let grid: Grid<usize> = Grid::new(3, 4);
        let window = Window::moore(grid.torus())?;
        let mut order = Vec::new();
        scan(&grid, &window, UpdateScheme::Synchronous, |coord, _, nbhd| {
            assert_eq!(nbhd.len(), 8);
            order.push(coord);
            0
        });
        let expected: Vec<Coord> = (0..3).flat_map(|i| (0..4).map(move |j| (i, j))).collect();
        assert_eq!(order, expected);
        Ok(())
    }

    #[test]
    fn synchronous_moves_do_not_collide() -> Result<(), Error> {
        let torus = Torus::ring(5)?;
        let window = Window::line(torus, 1, false)?;
        // Both occupants want the vacant cell between them.
        let grid = Grid::row(vec![1u8, 0, 2, 0, 0]);
        let toward_middle = |_: usize, (_, col): Coord, _: u8, _: &[u8]| match col {
            0 => Some(1),
            2 => Some(0),
            _ => None,
        };

        let sync = relocate(&grid, &window, UpdateScheme::Synchronous, 0, toward_middle);
        assert_eq!(sync.as_slice(), &[0, 1, 2, 0, 0]);

        // In place, the second occupant sees the cell already taken.
        let seq = relocate(&grid, &window, UpdateScheme::Sequential, 0, |_, (_, col), _, nbhd| {
            match col {
                0 if nbhd[1] == 0 => Some(1),
                2 if nbhd[0] == 0 => Some(0),
                _ => None,
            }
        });
        assert_eq!(seq.as_slice(), &[0, 1, 2, 0, 0]);
        Ok(())
    }

    #[test]
    fn sequential_revisits_moved_occupants() -> Result<(), Error> {
        let torus = Torus::ring(4)?;
        let window = Window::line(torus, 1, false)?;
        let grid = Grid::row(vec![1u8, 0, 0, 0]);
        let mut visits = 0;
        let step_right = |_: usize, (_, col): Coord, _: u8, nbhd: &[u8]| {
            visits += 1;
            if col < 3 && nbhd[1] == 0 {
                Some(1)
            } else {
                None
            }
        };
        let seq = relocate(&grid, &window, UpdateScheme::Sequential, 0, step_right);
        assert_eq!(seq.as_slice(), &[0, 0, 0, 1]);
        assert_eq!(visits, 4);
        Ok(())
    }
}
