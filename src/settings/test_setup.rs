use crate::{default_board, default_players, DictionaryType, LetterSpec, Settings};

impl Settings {
    /// Generates [Settings] for a short game between players `"1"` and `"2"` on the classic
    /// board.
    ///
    /// # Returns
    ///
    /// A [Settings] struct with the properties set to the following:
    /// * `players`: `"Player 1"` and `"Player 2"`.
    /// * `letters`: 9 `A`s worth `1` and 2 `B`s worth `3`.
    /// * `rack_size`: `4`.
    /// * `seed`: `"1"`, which deals `AABA` to player `"1"`, `BAAA` to player `"2"`, and leaves
    /// `AAA` in the bag.
    /// * `dictionary_type`: [DictionaryType::Permissive].
    pub fn small() -> Settings {
        Settings {
            version: crate::PROTOCOL_VERSION,
            players: default_players(2),
            board: default_board(),
            bingo_bonus: crate::DEFAULT_BINGO_BONUS,
            letters: vec![LetterSpec::new("A", 9, 1), LetterSpec::new("B", 2, 3)],
            rack_size: 4,
            seed: "1".to_owned(),
            dictionary_type: DictionaryType::Permissive,
            dictionary_settings: None,
        }
    }
}
