use crate::{
    default_board, default_players, Board, BoardPlacement, Coordinate, Direction, Tile,
    DEFAULT_LETTERS,
};
use tap::Tap;

impl Board {
    /// Generates an empty classic [Board] for players `"1"` and `"2"`.
    pub fn default_board() -> Board {
        Board::new(&default_board(), &default_players(2))
            .unwrap_or_else(|error| panic!("the default layout is invalid: {error}"))
    }

    /// Places one [tile](Tile) per character of `word` starting at `start`, valued as in
    /// [DEFAULT_LETTERS]. Bypasses the rules of word placement.
    pub fn place_word(&mut self, start: Coordinate, direction: Direction, word: &str) {
        let placements: Vec<BoardPlacement> = direction
            .walk(start, self.rows(), self.cols())
            .zip(word.chars())
            .map(|((row, col), letter)| {
                BoardPlacement::new(row, col, default_tile(&letter.to_string()))
            })
            .collect();

        self.place_tiles(&placements)
            .unwrap_or_else(|error| panic!("cannot place {word}: {error}"));
    }

    /// [Places](Board::place_word) `word` and returns the board.
    pub fn tap_word(self, start: Coordinate, direction: Direction, word: &str) -> Board {
        self.tap_mut(|board| board.place_word(start, direction, word))
    }
}

/// # Returns
///
/// The [tile](Tile) of `letter` valued as in [DEFAULT_LETTERS].
pub fn default_tile(letter: &str) -> Tile {
    let value = DEFAULT_LETTERS
        .iter()
        .find(|&&(default, _, _)| default == letter)
        .map_or(0, |&(_, _, value)| value);

    Tile::new(letter, value)
}
