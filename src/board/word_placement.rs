use crate::{Board, BoardPlacement, Coordinate, Direction, PlacementError, WordPlay};
use itertools::Itertools;
use std::collections::HashMap;
use tracing::debug;

/// Characters of a blank's letter that would break the turn URL format.
const RESERVED_ASSIGNED_CHARS: [char; 2] = ['.', '-'];

/// The outcome of a legal placement of [tiles](crate::Tile), computed without changing
/// the [board](Board).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct WordPlacement {
    /// The main word along the direction of play, including [tiles](crate::Tile) already on
    /// the board.
    pub word: WordPlay,
    /// Every word formed: the main word first, then the cross words in board order.
    pub words: Vec<String>,
    /// The points earned by every formed word, without the bingo bonus.
    pub score: u32,
}

impl Board {
    /// Checks whether `placements` form a legal play and scores it. The board is not changed.
    ///
    /// Only newly placed [tiles](crate::Tile) earn letter and word bonuses. [Tiles](crate::Tile)
    /// already on the board count their plain value. A cross word is formed wherever a new
    /// [tile](crate::Tile) touches [tiles](crate::Tile) across the direction of play.
    ///
    /// # Arguments
    ///
    /// * `placements`: The [tiles](crate::Tile) of one move in any order.
    ///
    /// # Errors
    ///
    /// * [`PlacementError::EmptyPlacement`] Attempting to place no [tiles](crate::Tile).
    /// * [`PlacementError::BlankWithoutLetter`] Attempting to place a blank without a letter.
    /// * [`PlacementError::LetterOnNonBlank`] Attempting to give a letter to a
    /// [tile](crate::Tile) that is not a blank.
    /// * [`PlacementError::InvalidAssignedLetter`] Attempting to give a blank a letter
    /// containing `.` or `-`.
    /// * [`PlacementError::OutOfBounds`] Attempting to place outside the board.
    /// * [`PlacementError::DuplicateSquare`] Attempting to place twice on one square.
    /// * [`PlacementError::NotInLine`] Attempting to place off a single row or column.
    /// * [`PlacementError::SquareOccupied`] Attempting to place on an occupied square.
    /// * [`PlacementError::Gap`] Attempting to place with empty squares between
    /// [tiles](crate::Tile).
    /// * [`PlacementError::SingleLetter`] Attempting to form a main word of one letter.
    /// * [`PlacementError::NotConnected`] Attempting to place a word that touches nothing and
    /// misses the center square.
    ///
    /// # Returns
    ///
    /// The [`WordPlacement`] describing the formed words and their points.
    pub fn check_word_placement(
        &self,
        placements: &[BoardPlacement],
    ) -> Result<WordPlacement, PlacementError> {
        if placements.is_empty() {
            return Err(PlacementError::EmptyPlacement);
        }
        check_assigned_letters(placements)?;
        let by_coordinate = self.index_placements(placements)?;
        let direction = self.find_direction(placements)?;

        let first = placements
            .iter()
            .map(BoardPlacement::coordinate)
            .min_by_key(|&coordinate| direction.along(coordinate))
            .ok_or(PlacementError::EmptyPlacement)?;
        let start = self
            .occupied_before(first, direction)
            .last()
            .copied()
            .unwrap_or(first);

        let mut letters = Vec::new();
        let mut blank_indices = Vec::new();
        let mut cross_words = Vec::new();
        let mut main_sum: u32 = 0;
        let mut main_multiplier: u32 = 1;
        let mut cross_score: u32 = 0;
        let mut consumed = 0;

        for coordinate in direction.walk(start, self.rows(), self.cols()) {
            let square = match self.square(coordinate) {
                Some(square) => square,
                None => break,
            };

            match by_coordinate.get(&coordinate) {
                Some(placement) => {
                    if square.is_occupied() {
                        return Err(PlacementError::SquareOccupied(coordinate));
                    }
                    let bonus = square.bonus();
                    let value = placement
                        .tile
                        .value()
                        .saturating_mul(bonus.letter_multiplier());
                    main_sum = main_sum.saturating_add(value);
                    main_multiplier = main_multiplier.saturating_mul(bonus.word_multiplier());
                    if placement.tile.is_blank() {
                        blank_indices.push(letters.len());
                    }
                    letters.push(placement.letter().to_owned());
                    consumed += 1;

                    if let Some((text, points)) =
                        self.cross_word(coordinate, direction.perpendicular(), placement, value)
                    {
                        cross_words.push(text);
                        cross_score = cross_score
                            .saturating_add(points.saturating_mul(bonus.word_multiplier()));
                    }
                }
                None => match square.letter() {
                    Some(letter) => {
                        main_sum = main_sum.saturating_add(square.value());
                        letters.push(letter.to_owned());
                    }
                    None => break,
                },
            }
        }

        if consumed < placements.len() {
            return Err(PlacementError::Gap);
        }
        if letters.len() == 1 {
            return Err(PlacementError::SingleLetter);
        }
        if cross_words.is_empty()
            && letters.len() == placements.len()
            && !by_coordinate.contains_key(&self.center())
        {
            return Err(PlacementError::NotConnected);
        }

        let word = WordPlay {
            row: start.0,
            col: start.1,
            direction,
            letters,
            blank_indices,
        };
        // saturates on extreme letter values
        let score = main_sum
            .saturating_mul(main_multiplier)
            .saturating_add(cross_score);
        let words = std::iter::once(word.word()).chain(cross_words).collect_vec();
        debug!(?words, score, "checked word placement");

        Ok(WordPlacement { word, words, score })
    }

    /// Indexes `placements` by square, rejecting squares outside the board and squares
    /// claimed twice.
    fn index_placements<'a>(
        &self,
        placements: &'a [BoardPlacement],
    ) -> Result<HashMap<Coordinate, &'a BoardPlacement>, PlacementError> {
        let mut by_coordinate = HashMap::with_capacity(placements.len());
        for placement in placements {
            let coordinate = placement.coordinate();
            if self.square(coordinate).is_none() {
                return Err(PlacementError::OutOfBounds(coordinate));
            }
            if by_coordinate.insert(coordinate, placement).is_some() {
                return Err(PlacementError::DuplicateSquare(coordinate));
            }
        }

        Ok(by_coordinate)
    }

    /// A lone [tile](crate::Tile) reads horizontally only when it touches a
    /// [tile](crate::Tile) to its left or right. Otherwise it extends a vertical word.
    fn find_direction(&self, placements: &[BoardPlacement]) -> Result<Direction, PlacementError> {
        let (row, col) = placements[0].coordinate();
        let same_row = placements.iter().all(|placement| placement.row == row);
        let same_col = placements.iter().all(|placement| placement.col == col);

        let touches_row = || {
            Direction::Horizontal
                .previous((row, col))
                .into_iter()
                .chain(Direction::Horizontal.next((row, col), self.rows(), self.cols()))
                .any(|coordinate| self.is_occupied(coordinate))
        };

        if same_row && (placements.len() > 1 || touches_row()) {
            Ok(Direction::Horizontal)
        } else if same_col {
            Ok(Direction::Vertical)
        } else {
            Err(PlacementError::NotInLine)
        }
    }

    /// # Arguments
    ///
    /// * `coordinate`: The square of the new [tile](crate::Tile).
    /// * `direction`: The direction of the cross word.
    /// * `placement`: The new [tile](crate::Tile).
    /// * `value`: The value of the new [tile](crate::Tile) after its letter bonus.
    ///
    /// # Returns
    ///
    /// The text and points before the word bonus of the cross word through `coordinate`, or
    /// [None] when no [tile](crate::Tile) touches `coordinate` along `direction`.
    fn cross_word(
        &self,
        coordinate: Coordinate,
        direction: Direction,
        placement: &BoardPlacement,
        value: u32,
    ) -> Option<(String, u32)> {
        let before = self.occupied_before(coordinate, direction);
        let after = self.occupied_after(coordinate, direction);
        if before.is_empty() && after.is_empty() {
            return None;
        }

        let mut text = String::new();
        let mut points = value;
        for &existing in before.iter().rev() {
            let square = self.square(existing)?;
            text.push_str(square.letter()?);
            points = points.saturating_add(square.value());
        }
        text.push_str(placement.letter());
        for &existing in &after {
            let square = self.square(existing)?;
            text.push_str(square.letter()?);
            points = points.saturating_add(square.value());
        }

        Some((text, points))
    }
}

fn check_assigned_letters(placements: &[BoardPlacement]) -> Result<(), PlacementError> {
    for placement in placements {
        let coordinate = placement.coordinate();
        match (&placement.assigned_letter, placement.tile.is_blank()) {
            (None, true) => return Err(PlacementError::BlankWithoutLetter(coordinate)),
            (Some(letter), true) if letter.is_empty() => {
                return Err(PlacementError::BlankWithoutLetter(coordinate))
            }
            (Some(letter), true) if letter.contains(RESERVED_ASSIGNED_CHARS) => {
                return Err(PlacementError::InvalidAssignedLetter {
                    coordinate,
                    letter: letter.clone(),
                })
            }
            (Some(_), false) => return Err(PlacementError::LetterOnNonBlank(coordinate)),
            _ => {}
        }
    }

    Ok(())
}
