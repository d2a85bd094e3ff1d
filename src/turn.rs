use crate::{Coordinate, Direction, PlayerId, Tile};
use serde::{Deserialize, Serialize};

/// A [tile](Tile) placed on a square of the board, together with the letter chosen for it
/// when it is a blank.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BoardPlacement {
    /// The row of the square.
    pub row: usize,
    /// The column of the square.
    pub col: usize,
    /// The placed [tile](Tile).
    pub tile: Tile,
    /// The letter chosen for a blank, [None] for every other [tile](Tile).
    pub assigned_letter: Option<String>,
}

impl BoardPlacement {
    /// # Returns
    ///
    /// A [`BoardPlacement`] of a [tile](Tile) that is not a blank.
    pub fn new(row: usize, col: usize, tile: Tile) -> BoardPlacement {
        BoardPlacement {
            row,
            col,
            tile,
            assigned_letter: None,
        }
    }

    /// # Returns
    ///
    /// A [`BoardPlacement`] of a blank playing as `letter`.
    pub fn blank(row: usize, col: usize, letter: impl Into<String>) -> BoardPlacement {
        BoardPlacement {
            row,
            col,
            tile: Tile::blank(),
            assigned_letter: Some(letter.into()),
        }
    }

    /// The square of the placement.
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        (self.row, self.col)
    }

    /// The letter the placement spells: the chosen letter of a blank, the printed letter
    /// otherwise.
    pub fn letter(&self) -> &str {
        match &self.assigned_letter {
            Some(letter) if self.tile.is_blank() => letter,
            _ => self.tile.letter(),
        }
    }
}

/// The main word of a play as it travels in a turn URL: where it starts, which way it reads,
/// every letter including the ones already on the board, and which of the newly placed
/// [tiles](Tile) are blanks.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WordPlay {
    /// The row of the first letter.
    pub row: usize,
    /// The column of the first letter.
    pub col: usize,
    /// The reading direction.
    pub direction: Direction,
    /// The letters of the word, one entry per square.
    pub letters: Vec<String>,
    /// Zero-based indexes into `letters` of the blanks placed by this play.
    pub blank_indices: Vec<usize>,
}

impl WordPlay {
    /// The word spelled by `letters`.
    pub fn word(&self) -> String {
        self.letters.concat()
    }

    /// The square of the first letter.
    #[inline]
    pub fn anchor(&self) -> Coordinate {
        (self.row, self.col)
    }
}

/// What a player did on their turn.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Move {
    /// Placed [tiles](Tile) from the rack on the board.
    PlayTiles(Vec<BoardPlacement>),
    /// Placed the word read from a turn URL. It becomes [`Move::PlayTiles`] once it is
    /// resolved against the board.
    PlayWord(WordPlay),
    /// Returned the [tiles](Tile) at these rack indexes to the bag. No indexes is a pass.
    ExchangeTileIndices(Vec<usize>),
}

/// One player's committed action, tagged with a strictly sequential turn number starting at `1`.
///
/// # See Also
///
/// * [SharedState::play_turns](crate::SharedState::play_turns)
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Turn {
    /// The player who took the turn.
    pub player_id: PlayerId,
    /// The number of the turn.
    pub turn_number: u32,
    /// What the player did.
    #[serde(rename = "move")]
    pub action: Move,
    /// The main word, filled in once a play is applied.
    pub word: Option<WordPlay>,
    /// The points earned, filled in once the turn is applied.
    pub score: u32,
}

impl Turn {
    /// # Returns
    ///
    /// A [`Turn`] placing `placements` on the board.
    pub fn play_tiles(
        player_id: impl Into<PlayerId>,
        turn_number: u32,
        placements: Vec<BoardPlacement>,
    ) -> Turn {
        Turn::new(player_id, turn_number, Move::PlayTiles(placements))
    }

    /// # Returns
    ///
    /// A [`Turn`] placing a word read from a turn URL.
    pub fn play_word(player_id: impl Into<PlayerId>, turn_number: u32, word: WordPlay) -> Turn {
        Turn::new(player_id, turn_number, Move::PlayWord(word))
    }

    /// # Returns
    ///
    /// A [`Turn`] returning the [tiles](Tile) at `indices` of the rack to the bag.
    pub fn exchange(
        player_id: impl Into<PlayerId>,
        turn_number: u32,
        indices: Vec<usize>,
    ) -> Turn {
        Turn::new(player_id, turn_number, Move::ExchangeTileIndices(indices))
    }

    /// # Returns
    ///
    /// A [`Turn`] that does nothing.
    pub fn pass(player_id: impl Into<PlayerId>, turn_number: u32) -> Turn {
        Turn::exchange(player_id, turn_number, Vec::new())
    }

    pub(crate) fn new(player_id: impl Into<PlayerId>, turn_number: u32, action: Move) -> Turn {
        Turn {
            player_id: player_id.into(),
            turn_number,
            action,
            word: None,
            score: 0,
        }
    }

    /// Whether the turn places [tiles](Tile) on the board.
    pub fn is_play(&self) -> bool {
        matches!(self.action, Move::PlayTiles(_) | Move::PlayWord(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_json_strict;

    #[test]
    fn placement_letter() {
        assert_eq!("A", BoardPlacement::new(7, 7, Tile::new("A", 1)).letter());
        assert_eq!("E", BoardPlacement::blank(7, 7, "E").letter());
    }

    #[test]
    fn word() {
        let word = WordPlay {
            row: 7,
            col: 6,
            direction: Direction::Horizontal,
            letters: vec!["QU".to_owned(), "I".to_owned(), "T".to_owned()],
            blank_indices: vec![1],
        };

        assert_eq!("QUIT", word.word());
        assert_eq!((7, 6), word.anchor());
    }

    #[test]
    fn pass_is_empty_exchange() {
        let pass = Turn::pass("1", 3);

        assert_eq!(Move::ExchangeTileIndices(Vec::new()), pass.action);
        assert!(!pass.is_play());
        assert_eq!(0, pass.score);
    }

    #[test]
    fn json_round_trip() {
        let turn = Turn::play_tiles(
            "2",
            4,
            vec![
                BoardPlacement::new(7, 7, Tile::new("A", 1)),
                BoardPlacement::blank(7, 8, "T"),
            ],
        );

        let json = serde_json::to_string(&turn).unwrap();

        assert!(json.starts_with(r#"{"playerId":"2","turnNumber":4,"move":{"playTiles":"#));
        assert_eq!(turn, from_json_strict::<Turn>(&json).unwrap());
    }
}
