use either::Either;
use serde::{Deserialize, Serialize};
use std::iter;

/// A tuple with the row and column of a square on the board, both counted from `0`
/// at the top left corner.
///
/// # See Also
///
/// * [Board](crate::Board)
/// * [BoardPlacement](crate::BoardPlacement)
pub type Coordinate = (usize, usize);

/// The axis along which the [tiles](crate::Tile) of a word are read.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Left to right along a row.
    Horizontal,
    /// Top to bottom along a column.
    Vertical,
}

impl Direction {
    /// # Returns
    ///
    /// The other [`Direction`].
    #[inline]
    pub fn perpendicular(self) -> Direction {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    /// Whether the [`Direction`] is [vertical](Direction::Vertical).
    #[inline]
    pub fn is_vertical(self) -> bool {
        self == Direction::Vertical
    }

    /// The position of `coordinate` along this axis.
    #[inline]
    pub fn along(self, (row, col): Coordinate) -> usize {
        match self {
            Direction::Horizontal => col,
            Direction::Vertical => row,
        }
    }

    /// # Returns
    ///
    /// The [coordinate](Coordinate) one step after `coordinate` along this axis, or [None] when
    /// the step would leave a board of `rows` by `cols` squares.
    pub fn next(self, (row, col): Coordinate, rows: usize, cols: usize) -> Option<Coordinate> {
        match self {
            Direction::Horizontal if col + 1 < cols => Some((row, col + 1)),
            Direction::Vertical if row + 1 < rows => Some((row + 1, col)),
            _ => None,
        }
    }

    /// # Returns
    ///
    /// The [coordinate](Coordinate) one step before `coordinate` along this axis, or [None] when
    /// the step would leave the board.
    pub fn previous(self, (row, col): Coordinate) -> Option<Coordinate> {
        match self {
            Direction::Horizontal => col.checked_sub(1).map(|col| (row, col)),
            Direction::Vertical => row.checked_sub(1).map(|row| (row, col)),
        }
    }

    /// # Returns
    ///
    /// An [iterator](Iterator) of [coordinates](Coordinate) starting at `start` and walking
    /// forward along this axis until the edge of a board of `rows` by `cols` squares.
    pub fn walk(
        self,
        start: Coordinate,
        rows: usize,
        cols: usize,
    ) -> impl Iterator<Item = Coordinate> {
        let (row, col) = start;
        let in_bounds = row < rows && col < cols;
        match self {
            Direction::Horizontal => Either::Left(
                (col..cols)
                    .take_while(move |_| in_bounds)
                    .map(move |col| (row, col)),
            ),
            Direction::Vertical => Either::Right(
                (row..rows)
                    .take_while(move |_| in_bounds)
                    .map(move |row| (row, col)),
            ),
        }
    }
}

/// Finds the squares next to `coordinate` in the order right, down, up, left, skipping
/// squares outside a board of `rows` by `cols` squares. This is the order used to nudge
/// a [tile](crate::Tile) dropped on an occupied square.
///
/// # Returns
///
/// An [iterator](Iterator) of up to 4 [coordinates](Coordinate).
pub fn nudge_coordinates(
    (row, col): Coordinate,
    rows: usize,
    cols: usize,
) -> impl Iterator<Item = Coordinate> {
    let right = (col + 1 < cols).then_some((row, col + 1));
    let down = (row + 1 < rows).then_some((row + 1, col));
    let up = row.checked_sub(1).map(|row| (row, col));
    let left = col.checked_sub(1).map(|col| (row, col));

    iter::empty::<Coordinate>()
        .chain(right)
        .chain(down)
        .chain(up)
        .chain(left)
}
