use crate::{
    BoardPlacement, Coordinate, Direction, PlacementError, Player, PlayerId, Scores,
    SettingsError, Tile, WordPlay,
};
use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
#[cfg(test)]
pub use test_setup::*;
pub use word_placement::*;

#[cfg(test)]
mod test_setup;
mod word_placement;

/// Describes the bonus printed on a [`Square`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, FromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bonus {
    /// `0`. No bonus, written `.`.
    None = 0,
    /// `1`. The letter counts twice, written `d`.
    DoubleLetter = 1,
    /// `2`. The letter counts three times, written `t`.
    TripleLetter = 2,
    /// `3`. The word counts twice, written `D`.
    DoubleWord = 3,
    /// `4`. The word counts three times, written `T`.
    TripleWord = 4,
}

impl Bonus {
    /// The number of [`Bonus`] variants. 5 bonuses.
    pub const BONUSES_LEN: usize = 5;

    /// # Returns
    ///
    /// The [`Bonus`] written as `c` in a board layout, or [None] for an unknown character.
    pub fn from_char(c: char) -> Option<Bonus> {
        match c {
            '.' => Some(Bonus::None),
            'd' => Some(Bonus::DoubleLetter),
            't' => Some(Bonus::TripleLetter),
            'D' => Some(Bonus::DoubleWord),
            'T' => Some(Bonus::TripleWord),
            _ => None,
        }
    }

    /// # Returns
    ///
    /// The character of the [`Bonus`] in a board layout.
    pub fn to_char(self) -> char {
        match self {
            Bonus::None => '.',
            Bonus::DoubleLetter => 'd',
            Bonus::TripleLetter => 't',
            Bonus::DoubleWord => 'D',
            Bonus::TripleWord => 'T',
        }
    }

    /// The factor applied to the value of a letter placed on the square. `1`, `2`, or `3`.
    pub fn letter_multiplier(self) -> u32 {
        match self {
            Bonus::DoubleLetter => 2,
            Bonus::TripleLetter => 3,
            _ => 1,
        }
    }

    /// The factor applied to a word covering a letter placed on the square. `1`, `2`, or `3`.
    pub fn word_multiplier(self) -> u32 {
        match self {
            Bonus::DoubleWord => 2,
            Bonus::TripleWord => 3,
            _ => 1,
        }
    }
}

/// One cell of the [board](Board). The [tile](Tile) of a square is set at most once and
/// never removed.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Square {
    bonus: Bonus,
    tile: Option<Tile>,
    assigned_letter: Option<String>,
}

impl Square {
    /// # Returns
    ///
    /// An empty [`Square`] with `bonus`.
    pub fn new(bonus: Bonus) -> Square {
        Square {
            bonus,
            tile: None,
            assigned_letter: None,
        }
    }

    /// The bonus printed on the square.
    #[inline]
    pub fn bonus(&self) -> Bonus {
        self.bonus
    }

    /// The [tile](Tile) placed on the square.
    #[inline]
    pub fn tile(&self) -> Option<&Tile> {
        self.tile.as_ref()
    }

    /// Whether a [tile](Tile) was placed on the square.
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.tile.is_some()
    }

    /// The letter the square spells: the assigned letter of a blank, the printed letter of any
    /// other [tile](Tile), or [None] for an empty square.
    pub fn letter(&self) -> Option<&str> {
        let tile = self.tile.as_ref()?;
        match &self.assigned_letter {
            Some(letter) if tile.is_blank() => Some(letter),
            _ => Some(tile.letter()),
        }
    }

    /// The points of the placed [tile](Tile) without bonuses, `0` for an empty square.
    pub fn value(&self) -> u32 {
        self.tile.as_ref().map_or(0, Tile::value)
    }
}

/// The grid of [squares](Square) together with the points of every player. Owned by the
/// [shared state](crate::SharedState) and only changed through [`Board::place_tiles`] and
/// [`Board::add_score`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Board {
    squares: Vec<Vec<Square>>,
    scores: Scores,
}

impl Board {
    /// # Arguments
    ///
    /// * `layout`: One string of bonus characters per row.
    /// * `players`: The players whose points start at `0`.
    ///
    /// # Errors
    ///
    /// * [`SettingsError::InvalidBonus`] A character of `layout` is not a bonus.
    ///
    /// # Returns
    ///
    /// An empty [`Board`].
    pub fn new(layout: &[String], players: &[Player]) -> Result<Board, SettingsError> {
        let squares = layout
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .map(|bonus| {
                        Bonus::from_char(bonus)
                            .map(Square::new)
                            .ok_or(SettingsError::InvalidBonus { row, bonus })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let scores = players.iter().map(|player| (player.id.clone(), 0)).collect();

        Ok(Board { squares, scores })
    }

    /// The number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.squares.len()
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.squares.first().map_or(0, Vec::len)
    }

    /// The square every opening word must cover.
    pub fn center(&self) -> Coordinate {
        (self.rows() / 2, self.cols() / 2)
    }

    /// The [square](Square) at `coordinate`, or [None] outside the board.
    pub fn square(&self, (row, col): Coordinate) -> Option<&Square> {
        self.squares.get(row)?.get(col)
    }

    /// The rows of [squares](Square).
    #[inline]
    pub fn squares(&self) -> &[Vec<Square>] {
        &self.squares
    }

    /// Whether the square at `coordinate` holds a [tile](Tile). Squares outside the board
    /// are never occupied.
    pub fn is_occupied(&self, coordinate: Coordinate) -> bool {
        self.square(coordinate).is_some_and(Square::is_occupied)
    }

    /// The number of [tiles](Tile) placed on the board.
    pub fn tile_count(&self) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|square| square.is_occupied())
            .count()
    }

    /// The cumulative points of every player.
    #[inline]
    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// The cumulative points of `player`, `0` for a player who has not scored.
    pub fn score(&self, player: &str) -> u32 {
        self.scores.get(player).copied().unwrap_or(0)
    }

    /// Adds `points` to the cumulative points of `player`.
    pub fn add_score(&mut self, player: &PlayerId, points: u32) {
        let score = self.scores.entry(player.clone()).or_insert(0);
        *score = score.saturating_add(points);
    }

    /// Sets the [tiles](Tile) of `placements` on their squares. Either every placement is
    /// set or none is.
    ///
    /// This does not check the rules of word placement. Call [`Board::check_word_placement`]
    /// first.
    ///
    /// # Errors
    ///
    /// * [`PlacementError::OutOfBounds`] Attempting to place a [tile](Tile) outside the board.
    /// * [`PlacementError::DuplicateSquare`] Attempting to place two [tiles](Tile) on the same
    /// square.
    /// * [`PlacementError::SquareOccupied`] Attempting to place a [tile](Tile) on a square that
    /// already holds one.
    pub fn place_tiles(&mut self, placements: &[BoardPlacement]) -> Result<(), PlacementError> {
        self.check_squares(placements)?;
        for placement in placements {
            if let Some(square) = self
                .squares
                .get_mut(placement.row)
                .and_then(|row| row.get_mut(placement.col))
            {
                square.tile = Some(placement.tile.clone());
                square.assigned_letter = placement
                    .tile
                    .is_blank()
                    .then(|| placement.assigned_letter.clone())
                    .flatten();
            }
        }

        Ok(())
    }

    /// Checks that every placement is inside the board, on a free square, and on a different
    /// square than every other placement.
    fn check_squares(&self, placements: &[BoardPlacement]) -> Result<(), PlacementError> {
        let mut seen = HashSet::with_capacity(placements.len());
        for placement in placements {
            let coordinate = placement.coordinate();
            let square = self
                .square(coordinate)
                .ok_or(PlacementError::OutOfBounds(coordinate))?;
            if !seen.insert(coordinate) {
                return Err(PlacementError::DuplicateSquare(coordinate));
            }
            if square.is_occupied() {
                return Err(PlacementError::SquareOccupied(coordinate));
            }
        }

        Ok(())
    }

    /// Turns a word read from a turn URL into the placements it stands for. Letters on
    /// occupied squares must match the board and are skipped. Letters on free squares become
    /// new [tiles](Tile): blanks when their index is in `blank_indices`, otherwise
    /// [tiles](Tile) worth `tile_value` of their letter.
    ///
    /// # Errors
    ///
    /// * [`PlacementError::EmptyPlacement`] The word covers no free square.
    /// * [`PlacementError::OutOfBounds`] The word runs off the board.
    /// * [`PlacementError::WordMismatch`] A letter disagrees with the board.
    /// * [`PlacementError::SquareOccupied`] A blank is claimed on an occupied square.
    /// * [`PlacementError::UnknownLetter`] A letter is not part of the game.
    pub fn resolve_word_play(
        &self,
        word: &WordPlay,
        tile_value: impl Fn(&str) -> Option<u32>,
    ) -> Result<Vec<BoardPlacement>, PlacementError> {
        let mut placements = Vec::with_capacity(word.letters.len());
        let mut coordinate = Some(word.anchor());

        for (index, letter) in word.letters.iter().enumerate() {
            let (row, col) = match coordinate {
                Some(coordinate) if self.square(coordinate).is_some() => coordinate,
                Some(coordinate) => return Err(PlacementError::OutOfBounds(coordinate)),
                None => return Err(PlacementError::OutOfBounds(word.anchor())),
            };
            let is_blank = word.blank_indices.contains(&index);

            match self.square((row, col)).and_then(Square::letter) {
                Some(_) if is_blank => return Err(PlacementError::SquareOccupied((row, col))),
                Some(found) if found != letter => {
                    return Err(PlacementError::WordMismatch {
                        coordinate: (row, col),
                        expected: letter.clone(),
                        found: found.to_owned(),
                    })
                }
                Some(_) => {}
                None if is_blank => placements.push(BoardPlacement::blank(row, col, letter.clone())),
                None => {
                    let value = tile_value(letter)
                        .ok_or_else(|| PlacementError::UnknownLetter(letter.clone()))?;
                    placements.push(BoardPlacement::new(row, col, Tile::new(letter.clone(), value)));
                }
            }

            coordinate = word.direction.next((row, col), self.rows(), self.cols());
        }

        if placements.is_empty() {
            return Err(PlacementError::EmptyPlacement);
        }

        Ok(placements)
    }

    /// # Returns
    ///
    /// The coordinates of the occupied squares starting next to `coordinate` and walking
    /// backward along `direction`, nearest first.
    fn occupied_before(&self, coordinate: Coordinate, direction: Direction) -> Vec<Coordinate> {
        let mut found = Vec::new();
        let mut current = direction.previous(coordinate);
        while let Some(previous) = current.filter(|&c| self.is_occupied(c)) {
            found.push(previous);
            current = direction.previous(previous);
        }

        found
    }

    /// # Returns
    ///
    /// The coordinates of the occupied squares starting next to `coordinate` and walking
    /// forward along `direction`, nearest first.
    fn occupied_after(&self, coordinate: Coordinate, direction: Direction) -> Vec<Coordinate> {
        direction
            .walk(coordinate, self.rows(), self.cols())
            .skip(1)
            .take_while(|&c| self.is_occupied(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{default_board, default_players};

    #[test]
    fn new_default() {
        let board = Board::new(&default_board(), &default_players(2)).unwrap();

        assert_eq!(15, board.rows());
        assert_eq!(15, board.cols());
        assert_eq!((7, 7), board.center());
        assert_eq!(Bonus::DoubleWord, board.square((7, 7)).unwrap().bonus());
        assert_eq!(Bonus::TripleWord, board.square((0, 0)).unwrap().bonus());
        assert_eq!(Bonus::TripleLetter, board.square((1, 5)).unwrap().bonus());
        assert_eq!(0, board.tile_count());
        assert_eq!(0, board.score("1"));
        assert_eq!(2, board.scores().len());
    }

    #[test]
    fn new_invalid_bonus() {
        let actual_error = Board::new(&["..".to_owned(), ".x".to_owned()], &[]).unwrap_err();

        assert_eq!(SettingsError::InvalidBonus { row: 1, bonus: 'x' }, actual_error);
    }

    #[test]
    fn bonus_chars() {
        for bonus in [
            Bonus::None,
            Bonus::DoubleLetter,
            Bonus::TripleLetter,
            Bonus::DoubleWord,
            Bonus::TripleWord,
        ] {
            assert_eq!(Some(bonus), Bonus::from_char(bonus.to_char()));
        }
        assert_eq!(3, Bonus::TripleLetter.letter_multiplier());
        assert_eq!(1, Bonus::TripleLetter.word_multiplier());
        assert_eq!(2, Bonus::DoubleWord.word_multiplier());
    }

    #[test]
    fn place_tiles() {
        let mut board = Board::default_board();

        board
            .place_tiles(&[
                BoardPlacement::new(7, 7, Tile::new("A", 1)),
                BoardPlacement::blank(7, 8, "T"),
            ])
            .unwrap();

        assert_eq!(2, board.tile_count());
        assert_eq!(Some("A"), board.square((7, 7)).unwrap().letter());
        assert_eq!(Some("T"), board.square((7, 8)).unwrap().letter());
        assert_eq!(0, board.square((7, 8)).unwrap().value());
    }

    #[test]
    fn place_tiles_all_or_nothing() {
        let mut board = Board::default_board();
        board.place_word((7, 7), Direction::Horizontal, "AT");
        let before = board.clone();

        let actual_error = board
            .place_tiles(&[
                BoardPlacement::new(6, 7, Tile::new("B", 3)),
                BoardPlacement::new(7, 7, Tile::new("C", 3)),
            ])
            .unwrap_err();

        assert_eq!(PlacementError::SquareOccupied((7, 7)), actual_error);
        assert_eq!(before, board);
    }

    #[test]
    fn place_tiles_duplicate_and_out_of_bounds() {
        let mut board = Board::default_board();

        assert_eq!(
            Err(PlacementError::DuplicateSquare((7, 7))),
            board.place_tiles(&[
                BoardPlacement::new(7, 7, Tile::new("B", 3)),
                BoardPlacement::new(7, 7, Tile::new("C", 3)),
            ])
        );
        assert_eq!(
            Err(PlacementError::OutOfBounds((7, 15))),
            board.place_tiles(&[BoardPlacement::new(7, 15, Tile::new("B", 3))])
        );
        assert_eq!(0, board.tile_count());
    }

    #[test]
    fn add_score() {
        let mut board = Board::default_board();

        board.add_score(&"1".to_owned(), 10);
        board.add_score(&"1".to_owned(), 5);

        assert_eq!(15, board.score("1"));
        assert_eq!(0, board.score("2"));
    }

    #[test]
    fn resolve_word_play() {
        let mut board = Board::default_board();
        board.place_word((7, 6), Direction::Horizontal, "CAT");
        let word = WordPlay {
            row: 6,
            col: 7,
            direction: Direction::Vertical,
            letters: vec!["B".to_owned(), "A".to_owned(), "D".to_owned()],
            blank_indices: vec![2],
        };

        let placements = board.resolve_word_play(&word, |_| Some(3)).unwrap();

        assert_eq!(
            vec![
                BoardPlacement::new(6, 7, Tile::new("B", 3)),
                BoardPlacement::blank(8, 7, "D"),
            ],
            placements
        );
    }

    #[test]
    fn resolve_word_play_mismatch() {
        let mut board = Board::default_board();
        board.place_word((7, 6), Direction::Horizontal, "CAT");
        let word = WordPlay {
            row: 6,
            col: 7,
            direction: Direction::Vertical,
            letters: vec!["B".to_owned(), "O".to_owned(), "D".to_owned()],
            blank_indices: Vec::new(),
        };

        assert_eq!(
            Err(PlacementError::WordMismatch {
                coordinate: (7, 7),
                expected: "O".to_owned(),
                found: "A".to_owned(),
            }),
            board.resolve_word_play(&word, |_| Some(1))
        );
    }

    #[test]
    fn resolve_word_play_errors() {
        let board = Board::default_board();
        let mut word = WordPlay {
            row: 7,
            col: 13,
            direction: Direction::Horizontal,
            letters: vec!["A".to_owned(), "B".to_owned(), "C".to_owned()],
            blank_indices: Vec::new(),
        };

        assert_eq!(
            Err(PlacementError::OutOfBounds((7, 13))),
            board.resolve_word_play(&word, |_| Some(1))
        );

        word.col = 7;
        assert_eq!(
            Err(PlacementError::UnknownLetter("A".to_owned())),
            board.resolve_word_play(&word, |_| None)
        );
    }
}
