use super::*;
use crate::{nudge_coordinates, MoveError};
use std::iter;
use tracing::debug;

impl<T: TilesState> GameState<T> {
    /// Moves one of the player's [tiles](Tile) to another [location](Location). Nothing is
    /// committed.
    ///
    /// * A rack or exchange slot that is taken falls back to the first free slot of the same
    /// area.
    /// * A square that is taken, either on the committed board or by another staged
    /// [tile](Tile), falls back to the first free square to its right, below, above, or to its
    /// left.
    /// * A blank keeps its letter while it moves between squares and loses it when it leaves
    /// the board.
    ///
    /// # Arguments
    ///
    /// * `from`: Where the [tile](Tile) is staged.
    /// * `to`: Where the [tile](Tile) should go.
    /// * `assigned_letter`: The letter for a blank moved onto the board.
    ///
    /// # Errors
    ///
    /// * [`MoveError::NoTileAt`] No [tile](Tile) is staged at `from`.
    /// * [`MoveError::LetterOnNonBlank`] `assigned_letter` is given for a [tile](Tile) that is
    /// not a blank.
    /// * [`MoveError::OutOfRange`] `to` is not a slot or a square of the game.
    /// * [`MoveError::AreaFull`] Every slot of the area of `to` is taken.
    /// * [`MoveError::NoFreeSquare`] `to` and every square next to it are taken.
    ///
    /// # Returns
    ///
    /// Where the [tile](Tile) ended up.
    pub fn move_tile(
        &mut self,
        from: Location,
        to: Location,
        assigned_letter: Option<String>,
    ) -> Result<Location, MoveError> {
        let index = self
            .placements
            .iter()
            .position(|placement| placement.location == from)
            .ok_or(MoveError::NoTileAt(from))?;
        if assigned_letter.is_some() && !self.placements[index].tile.is_blank() {
            return Err(MoveError::LetterOnNonBlank);
        }

        let target = self.free_location(index, to)?;

        let placement = &mut self.placements[index];
        placement.location = target;
        if !target.is_board() {
            placement.assigned_letter = None;
        } else if assigned_letter.is_some() {
            placement.assigned_letter = assigned_letter;
        }
        let tile = placement.tile.clone();

        debug!(%from, %to, %target, "moved tile");
        self.emit(GameEvent::TileMoved {
            from: Some(from),
            to: Some(target),
            tile,
        });

        Ok(target)
    }

    /// # Returns
    ///
    /// Whether a staged [tile](Tile) other than the one at `moving` sits at `location`.
    fn is_taken(&self, location: Location, moving: Option<usize>) -> bool {
        self.placements
            .iter()
            .enumerate()
            .any(|(index, placement)| Some(index) != moving && placement.location == location)
    }

    /// Finds where the [tile](Tile) at index `moving` of the placements may go when sent to
    /// `to`.
    fn free_location(&self, moving: usize, to: Location) -> Result<Location, MoveError> {
        let rack_size = self.settings().rack_size;
        let slot = match to {
            Location::Rack(slot) | Location::Exchange(slot) => slot,
            Location::Board { row, col } => return self.free_square(moving, to, (row, col)),
        };
        if slot >= rack_size {
            return Err(MoveError::OutOfRange(to));
        }

        let same_area = |slot| match to {
            Location::Exchange(_) => Location::Exchange(slot),
            _ => Location::Rack(slot),
        };
        iter::once(slot)
            .chain(0..rack_size)
            .map(same_area)
            .find(|&location| !self.is_taken(location, Some(moving)))
            .ok_or(MoveError::AreaFull(to))
    }

    fn free_square(
        &self,
        moving: usize,
        to: Location,
        (row, col): (usize, usize),
    ) -> Result<Location, MoveError> {
        let board = self.board();
        let (rows, cols) = (board.rows(), board.cols());
        if row >= rows || col >= cols {
            return Err(MoveError::OutOfRange(to));
        }

        iter::once((row, col))
            .chain(nudge_coordinates((row, col), rows, cols))
            .find(|&(row, col)| {
                !board.is_occupied((row, col))
                    && !self.is_taken(Location::Board { row, col }, Some(moving))
            })
            .map(|(row, col)| Location::Board { row, col })
            .ok_or(MoveError::NoFreeSquare(to))
    }

    /// # Returns
    ///
    /// The first free rack slot, then the first free exchange slot.
    pub(super) fn first_free_slot(&self) -> Option<Location> {
        let rack_size = self.settings().rack_size;
        (0..rack_size)
            .map(Location::Rack)
            .chain((0..rack_size).map(Location::Exchange))
            .find(|&location| !self.is_taken(location, None))
    }
}
