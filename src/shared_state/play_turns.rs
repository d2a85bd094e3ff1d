use crate::{
    BoardPlacement, Coordinate, Move, SharedState, TilesEvent, TilesState, Turn, TurnError,
};
use itertools::Itertools;
use std::slice;
use tracing::{debug, info};

/// The outcome of [`SharedState::play_turns`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AppliedTurns {
    /// The turns that were applied in order. Plays always hold [`Move::PlayTiles`] together with
    /// their main word and score.
    pub turns: Vec<Turn>,
    /// Every change to a rack caused by the applied turns in order.
    pub tile_events: Vec<TilesEvent>,
}

impl AppliedTurns {
    /// Whether no turn was applied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The number of the last applied turn.
    pub fn last_turn_number(&self) -> Option<u32> {
        self.turns.last().map(|turn| turn.turn_number)
    }
}

/// # Returns
///
/// The squares covered by the [tiles](crate::Tile) `turn` placed, empty for an exchange.
pub fn affected_squares(turn: &Turn) -> Vec<Coordinate> {
    match &turn.action {
        Move::PlayTiles(placements) => placements.iter().map(BoardPlacement::coordinate).collect(),
        _ => Vec::new(),
    }
}

impl<T: TilesState> SharedState<T> {
    /// Validates and applies a batch of turns. Either every accepted turn is applied or nothing
    /// changes.
    ///
    /// * Turns numbered below the next turn number were applied before and are ignored.
    /// * The remaining turns are taken in order of their numbers. The first turn that does not
    /// continue the sequence stops the batch, and it and every later turn are left for a later
    /// call.
    /// * Each accepted turn is checked against the board and the tiles as left by the turns
    /// before it in the same batch.
    /// * Every word formed in the batch is sent to the [dictionary](crate::Dictionary) in one
    /// call, and nothing is applied until it accepts them all.
    ///
    /// A play using every [tile](crate::Tile) of a full rack earns the bingo bonus of the
    /// [settings](crate::Settings).
    ///
    /// # Arguments
    ///
    /// * `turns`: Turns in any order. Plays may hold [`Move::PlayWord`] as read from a turn URL.
    ///
    /// # Errors
    ///
    /// * [`TurnError::DuplicateTurnNumber`] Two turns that were not applied yet share a number.
    /// * [`TurnError::WrongPlayer`] A turn was played by somebody other than its owner.
    /// * [`TurnError::GameOver`] A turn arrived after the game ended.
    /// * [`TurnError::Placement`] A play broke the rules of word placement.
    /// * [`TurnError::Tiles`] The racks or the bag could not satisfy a turn.
    /// * [`TurnError::Dictionary`] The dictionary rejected a word or could not be consulted.
    ///
    /// # Returns
    ///
    /// The [applied turns](AppliedTurns), possibly none.
    pub async fn play_turns(&mut self, turns: Vec<Turn>) -> Result<AppliedTurns, TurnError> {
        let next_turn_number = self.next_turn_number;
        let (fresh, stale): (Vec<Turn>, Vec<Turn>) = turns
            .into_iter()
            .partition(|turn| turn.turn_number >= next_turn_number);
        if !stale.is_empty() {
            debug!(stale = stale.len(), next_turn_number, "ignored applied turns");
        }

        let fresh = fresh
            .into_iter()
            .sorted_by_key(|turn| turn.turn_number)
            .collect_vec();
        if let Some((duplicate, _)) = fresh
            .iter()
            .tuple_windows()
            .find(|(a, b)| a.turn_number == b.turn_number)
        {
            return Err(TurnError::DuplicateTurnNumber(duplicate.turn_number));
        }

        let mut board = self.board.clone();
        let mut tiles_state = self.tiles_state.clone();
        let mut expected = next_turn_number;
        let mut applied = Vec::with_capacity(fresh.len());
        let mut tile_events = Vec::new();
        let mut words = Vec::new();

        for mut turn in fresh {
            if turn.turn_number != expected {
                debug!(
                    turn_number = turn.turn_number,
                    expected, "stopped at a gap in turn numbers"
                );
                break;
            }
            if tiles_state.is_game_over() {
                return Err(TurnError::GameOver(turn.turn_number));
            }
            let owner = self
                .player_for(turn.turn_number)
                .map(|player| player.id.clone())
                .unwrap_or_default();
            if owner != turn.player_id {
                return Err(TurnError::WrongPlayer {
                    turn_number: turn.turn_number,
                    expected: owner,
                    actual: turn.player_id,
                });
            }

            if let Move::PlayWord(word) = &turn.action {
                let placements =
                    board.resolve_word_play(word, |letter| self.settings.tile_value(letter))?;
                turn.action = Move::PlayTiles(placements);
            }

            if let Move::PlayTiles(placements) = &turn.action {
                let placement = board.check_word_placement(placements)?;
                tiles_state.check_turn(&turn)?;

                let mut score = placement.score;
                if placements.len() == self.settings.rack_size {
                    score = score.saturating_add(self.settings.bingo_bonus);
                }
                board.place_tiles(placements)?;
                board.add_score(&turn.player_id, score);
                words.extend(placement.words);
                turn.word = Some(placement.word);
                turn.score = score;
            } else {
                tiles_state.check_turn(&turn)?;
            }

            tile_events.extend(tiles_state.play_turns(slice::from_ref(&turn))?);
            debug!(
                turn_number = turn.turn_number,
                player_id = %turn.player_id,
                score = turn.score,
                "accepted turn"
            );
            applied.push(turn);
            expected += 1;
        }

        if !words.is_empty() {
            self.dictionary.check_words(&words).await?;
        }

        self.board = board;
        self.tiles_state = tiles_state;
        self.next_turn_number = expected;
        if !applied.is_empty() {
            info!(
                game_id = %self.game_id,
                turns = applied.len(),
                next_turn_number = expected,
                "applied turns"
            );
        }

        Ok(AppliedTurns {
            turns: applied,
            tile_events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DictionaryError, Direction, PermissiveDictionary, PlacementError, Settings, Square, Tile,
        TilesError, WordListDictionary, WordPlay,
    };
    use futures::executor::block_on;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn shared_state() -> SharedState {
        SharedState::new("game", Settings::small(), Arc::new(PermissiveDictionary)).unwrap()
    }

    fn a() -> Tile {
        Tile::new("A", 1)
    }

    fn b() -> Tile {
        Tile::new("B", 3)
    }

    /// Player `"2"` holds `BAAA` after dealing.
    fn baaa(turn_number: u32) -> Turn {
        Turn::play_tiles(
            "2",
            turn_number,
            vec![
                BoardPlacement::new(7, 6, b()),
                BoardPlacement::new(7, 7, a()),
                BoardPlacement::new(7, 8, a()),
                BoardPlacement::new(7, 9, a()),
            ],
        )
    }

    #[test]
    fn pass_then_bingo() {
        let mut shared_state = shared_state();

        let applied =
            block_on(shared_state.play_turns(vec![baaa(2), Turn::pass("1", 1)])).unwrap();

        assert_eq!(vec![1, 2], applied.turns.iter().map(|t| t.turn_number).collect_vec());
        assert_eq!(3, shared_state.next_turn_number());
        // (3 + 1 + 1 + 1) * 2 + 50
        assert_eq!(62, shared_state.board().score("2"));
        assert_eq!(62, applied.turns[1].score);
        assert_eq!("BAAA", applied.turns[1].word.as_ref().unwrap().word());
        assert_eq!(0, shared_state.tiles_state().bag_len());
        assert_eq!(4, shared_state.tiles_state().get_tiles("1").unwrap().len());
        assert_eq!(3, shared_state.tiles_state().get_tiles("2").unwrap().len());
        assert_eq!(
            vec![(7, 6), (7, 7), (7, 8), (7, 9)],
            affected_squares(&applied.turns[1])
        );
    }

    #[test]
    fn stale_turns_are_ignored() {
        let mut shared_state = shared_state();
        block_on(shared_state.play_turns(vec![Turn::pass("1", 1)])).unwrap();

        let applied = block_on(shared_state.play_turns(vec![Turn::pass("1", 1)])).unwrap();

        assert!(applied.is_empty());
        assert_eq!(2, shared_state.next_turn_number());
    }

    #[test]
    fn gap_stops_the_batch() {
        let mut shared_state = shared_state();

        let applied =
            block_on(shared_state.play_turns(vec![Turn::pass("1", 1), Turn::pass("1", 3)]))
                .unwrap();

        assert_eq!(Some(1), applied.last_turn_number());
        assert_eq!(2, shared_state.next_turn_number());
    }

    #[test]
    fn gap_before_first_turn_applies_nothing() {
        let mut shared_state = shared_state();

        let applied = block_on(shared_state.play_turns(vec![Turn::pass("2", 2)])).unwrap();

        assert!(applied.is_empty());
        assert_eq!(1, shared_state.next_turn_number());
    }

    #[test]
    fn duplicate_turn_number() {
        let mut shared_state = shared_state();

        assert_eq!(
            Err(TurnError::DuplicateTurnNumber(1)),
            block_on(shared_state.play_turns(vec![Turn::pass("1", 1), Turn::pass("1", 1)]))
        );
        assert_eq!(1, shared_state.next_turn_number());
    }

    #[test]
    fn wrong_player() {
        let mut shared_state = shared_state();

        assert_eq!(
            Err(TurnError::WrongPlayer {
                turn_number: 1,
                expected: "1".to_owned(),
                actual: "2".to_owned(),
            }),
            block_on(shared_state.play_turns(vec![Turn::pass("2", 1)]))
        );
    }

    #[test]
    fn failed_turn_reverts_the_batch() {
        let mut shared_state = shared_state();
        let off_center = Turn::play_tiles(
            "2",
            2,
            vec![BoardPlacement::new(0, 0, b()), BoardPlacement::new(0, 1, a())],
        );

        assert_eq!(
            Err(TurnError::Placement(PlacementError::NotConnected)),
            block_on(shared_state.play_turns(vec![Turn::pass("1", 1), off_center]))
        );
        assert_eq!(1, shared_state.next_turn_number());
        assert_eq!(0, shared_state.board().tile_count());
    }

    /// Every tile of the game, wherever it is: in the bag, in a rack, or on the board.
    fn every_tile(shared_state: &SharedState) -> HashMap<Tile, usize> {
        let tiles_state = shared_state.tiles_state();
        let racked = tiles_state.racks().iter().flatten();
        let bagged = tiles_state.bag().tiles().iter();
        let placed = shared_state
            .board()
            .squares()
            .iter()
            .flatten()
            .filter_map(Square::tile);

        racked.chain(bagged).chain(placed).cloned().counts()
    }

    #[test]
    fn plays_and_exchanges_keep_every_tile() {
        let mut shared_state = shared_state();
        let expected = Settings::small().tiles().into_iter().counts();
        let word = WordPlay {
            row: 5,
            col: 7,
            direction: Direction::Vertical,
            letters: vec!["A".to_owned(), "B".to_owned(), "A".to_owned()],
            blank_indices: Vec::new(),
        };
        let off_center = Turn::play_tiles(
            "2",
            4,
            vec![BoardPlacement::new(0, 0, a()), BoardPlacement::new(0, 1, a())],
        );
        let batches = vec![
            (
                vec![Turn::play_tiles(
                    "1",
                    1,
                    vec![BoardPlacement::new(7, 7, a()), BoardPlacement::new(7, 8, a())],
                )],
                true,
            ),
            (vec![Turn::exchange("2", 2, vec![0])], true),
            (vec![Turn::play_tiles("1", 3, vec![BoardPlacement::new(6, 7, b())])], true),
            (vec![Turn::pass("1", 3), off_center], false),
            (vec![Turn::play_word("2", 4, word)], true),
        ];

        assert_eq!(expected, every_tile(&shared_state));
        for (turns, valid) in batches {
            let before = shared_state.board().tile_count();

            assert_eq!(valid, block_on(shared_state.play_turns(turns)).is_ok());

            assert_eq!(expected, every_tile(&shared_state));
            if !valid {
                assert_eq!(before, shared_state.board().tile_count());
            }
        }
        // AA, B, then the A above it
        assert_eq!(4, shared_state.board().tile_count());
        assert_eq!(5, shared_state.next_turn_number());
    }

    #[test]
    fn tile_not_in_rack() {
        let mut shared_state = shared_state();
        let turn = Turn::play_tiles(
            "1",
            1,
            vec![BoardPlacement::new(7, 7, b()), BoardPlacement::new(7, 8, b())],
        );

        assert!(matches!(
            block_on(shared_state.play_turns(vec![turn])),
            Err(TurnError::Tiles(TilesError::TileNotInRack { .. }))
        ));
    }

    #[test]
    fn dictionary_rejection_reverts_everything() {
        let mut shared_state = SharedState::new(
            "game",
            Settings::small(),
            Arc::new(WordListDictionary::new(["AB"])),
        )
        .unwrap();
        let before_bag = shared_state.tiles_state().clone();

        let actual_error =
            block_on(shared_state.play_turns(vec![Turn::pass("1", 1), baaa(2)])).unwrap_err();

        assert_eq!(
            TurnError::Dictionary(DictionaryError::InvalidWords(vec!["BAAA".to_owned()])),
            actual_error
        );
        assert_eq!(1, shared_state.next_turn_number());
        assert_eq!(0, shared_state.board().tile_count());
        assert_eq!(&before_bag, shared_state.tiles_state());
    }

    #[test]
    fn later_turns_see_earlier_turns() {
        let mut shared_state = shared_state();
        let opening = Turn::play_tiles(
            "1",
            1,
            vec![BoardPlacement::new(7, 7, a()), BoardPlacement::new(7, 8, b())],
        );
        let extension = Turn::play_tiles("2", 2, vec![BoardPlacement::new(8, 7, b())]);

        let applied = block_on(shared_state.play_turns(vec![opening, extension])).unwrap();

        assert_eq!(2, applied.turns.len());
        assert_eq!("AB", applied.turns[1].word.as_ref().unwrap().word());
        assert_eq!(Direction::Vertical, applied.turns[1].word.as_ref().unwrap().direction);
    }

    #[test]
    fn word_from_url_is_resolved() {
        let mut shared_state = shared_state();
        let word = WordPlay {
            row: 7,
            col: 6,
            direction: Direction::Horizontal,
            letters: vec!["B".to_owned(), "A".to_owned(), "A".to_owned(), "A".to_owned()],
            blank_indices: Vec::new(),
        };

        let applied = block_on(
            shared_state.play_turns(vec![Turn::pass("1", 1), Turn::play_word("2", 2, word)]),
        )
        .unwrap();

        assert_eq!(baaa(2).action, applied.turns[1].action);
        assert_eq!(62, applied.turns[1].score);
    }

    #[test]
    fn turns_after_game_over() {
        let mut shared_state = shared_state();
        block_on(shared_state.play_turns(vec![Turn::pass("1", 1), baaa(2)])).unwrap();
        let last = Turn::play_tiles(
            "1",
            3,
            vec![BoardPlacement::new(8, 6, a()), BoardPlacement::new(9, 6, a())],
        );
        // player "1" holds AABA, so after playing AA they hold BA and the bag stays empty
        block_on(shared_state.play_turns(vec![last])).unwrap();
        let rest = Turn::play_tiles(
            "2",
            4,
            shared_state
                .tiles_state()
                .get_tiles("2")
                .unwrap()
                .iter()
                .enumerate()
                .map(|(index, tile)| BoardPlacement::new(10 + index, 6, tile.clone()))
                .collect(),
        );
        block_on(shared_state.play_turns(vec![rest])).unwrap();
        assert!(shared_state.is_game_over());

        assert_eq!(
            Err(TurnError::GameOver(5)),
            block_on(shared_state.play_turns(vec![Turn::pass("1", 5)]))
        );
    }
}
