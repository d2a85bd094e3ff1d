use crate::{
    parse_seed, Bonus, PlayerId, SettingsError, Tile, DEFAULT_BINGO_BONUS, DEFAULT_BOARD,
    DEFAULT_LETTERS, DEFAULT_PLAYER_COUNT, DEFAULT_RACK_SIZE, GAME_ID_LEN, PROTOCOL_VERSION,
    TILE_LIMIT,
};
use itertools::Itertools;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

#[cfg(test)]
mod test_setup;

/// Characters that separate values in a turn URL and therefore cannot appear in a letter.
const RESERVED_LETTER_CHARS: [char; 2] = ['.', '-'];

/// A participant of the game.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Player {
    /// The identifier of the player.
    pub id: PlayerId,
    /// The name shown to the other players.
    pub name: String,
}

impl Player {
    /// # Returns
    ///
    /// A [`Player`] with the given id and name.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Player {
        Player {
            id: id.into(),
            name: name.into(),
        }
    }

    /// # Arguments
    ///
    /// * `number`: The one-based position of the player.
    ///
    /// # Returns
    ///
    /// A [`Player`] whose id is `number` and whose name is the default name for `number`.
    pub fn numbered(number: usize) -> Player {
        Player::new(number.to_string(), default_player_name(number))
    }
}

/// # Returns
///
/// `Player N` for the one-based position `N`.
pub fn default_player_name(number: usize) -> String {
    format!("Player {number}")
}

/// How many [tiles](Tile) of one letter go into the bag and what each is worth.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LetterSpec {
    /// The letter, empty for a blank.
    pub letter: String,
    /// The number of [tiles](Tile) with this letter.
    pub count: usize,
    /// The points earned by each [tile](Tile) before bonuses.
    pub value: u32,
}

impl LetterSpec {
    /// # Returns
    ///
    /// A [`LetterSpec`] with properties owned from arguments.
    pub fn new(letter: impl Into<String>, count: usize, value: u32) -> LetterSpec {
        LetterSpec {
            letter: letter.into(),
            count,
            value,
        }
    }
}

/// Which dictionary accepts or rejects the words formed during the game.
///
/// Only the choice travels with the game. The [dictionary](crate::Dictionary) itself is
/// supplied by the caller.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DictionaryType {
    /// Every word is accepted.
    #[default]
    Permissive,
    /// A free online dictionary.
    FreeApi,
    /// A dictionary at the address given by
    /// [dictionary_settings](Settings::dictionary_settings).
    Custom,
    /// A word list known to every player by name.
    WordList(String),
}

impl fmt::Display for DictionaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionaryType::Permissive => f.write_str("permissive"),
            DictionaryType::FreeApi => f.write_str("freeapi"),
            DictionaryType::Custom => f.write_str("custom"),
            DictionaryType::WordList(name) => f.write_str(name),
        }
    }
}

impl From<String> for DictionaryType {
    fn from(value: String) -> DictionaryType {
        match value.as_str() {
            "" | "permissive" => DictionaryType::Permissive,
            "freeapi" => DictionaryType::FreeApi,
            "custom" => DictionaryType::Custom,
            _ => DictionaryType::WordList(value),
        }
    }
}

impl From<DictionaryType> for String {
    fn from(value: DictionaryType) -> String {
        value.to_string()
    }
}

/// Everything that stays the same for the whole game. Every player must hold equal settings,
/// so they travel as the game parameters of every turn URL.
///
/// # See Also
///
/// * [encode_turn_url](crate::encode_turn_url)
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    /// The turn URL protocol version.
    pub version: u32,
    /// The players in turn order.
    pub players: Vec<Player>,
    /// One string of bonus characters per row.
    pub board: Vec<String>,
    /// The extra points for playing every tile from a full rack.
    pub bingo_bonus: u32,
    /// The letters in the bag.
    pub letters: Vec<LetterSpec>,
    /// The number of [tiles](Tile) each player holds when the bag allows it.
    pub rack_size: usize,
    /// The seed of the bag, parsed by [parse_seed].
    pub seed: String,
    /// The dictionary used to check words.
    pub dictionary_type: DictionaryType,
    /// The address or other settings of a custom dictionary.
    pub dictionary_settings: Option<String>,
}

impl Default for Settings {
    /// Two players on the classic board with the English letters and a fresh random seed.
    fn default() -> Settings {
        Settings {
            version: PROTOCOL_VERSION,
            players: default_players(DEFAULT_PLAYER_COUNT),
            board: default_board(),
            bingo_bonus: DEFAULT_BINGO_BONUS,
            letters: default_letters(),
            rack_size: DEFAULT_RACK_SIZE,
            seed: random_seed(),
            dictionary_type: DictionaryType::default(),
            dictionary_settings: None,
        }
    }
}

impl Settings {
    /// The number of players.
    #[inline]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// # Returns
    ///
    /// The position of `player` in turn order, or [None] when `player` is not in the game.
    pub fn player_index(&self, player: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player)
    }

    /// The number of rows of the board.
    #[inline]
    pub fn rows(&self) -> usize {
        self.board.len()
    }

    /// The number of columns of the board.
    pub fn cols(&self) -> usize {
        self.board.first().map_or(0, |row| row.chars().count())
    }

    /// The initial state of the bag's [Prng](crate::Prng).
    #[inline]
    pub fn seed_state(&self) -> u32 {
        parse_seed(&self.seed)
    }

    /// # Returns
    ///
    /// The value of a [tile](Tile) with `letter`, or [None] when no such letter is in the bag.
    pub fn tile_value(&self, letter: &str) -> Option<u32> {
        self.letters
            .iter()
            .find(|spec| spec.letter == letter)
            .map(|spec| spec.value)
    }

    /// # Returns
    ///
    /// Every [tile](Tile) of the game, grouped by letter in the order of `letters`.
    pub fn tiles(&self) -> Vec<Tile> {
        self.letters
            .iter()
            .flat_map(|spec| (0..spec.count).map(|_| Tile::new(spec.letter.clone(), spec.value)))
            .collect()
    }

    /// Checks whether the settings can start a game and returns all found errors.
    ///
    /// # Errors
    ///
    /// * [`SettingsError::EmptyPlayers`] Attempting to start with no players.
    /// * [`SettingsError::DuplicatePlayer`] Attempting to start with two players sharing an id.
    /// * [`SettingsError::EmptyBoard`] Attempting to start with a board without squares.
    /// * [`SettingsError::RaggedBoard`] Attempting to start with rows of different lengths.
    /// * [`SettingsError::InvalidBonus`] Attempting to start with an unknown bonus character.
    /// * [`SettingsError::EmptyRacks`] Attempting to start with a rack size of `0`.
    /// * [`SettingsError::EmptyBag`] Attempting to start with an empty bag.
    /// * [`SettingsError::NotEnoughTiles`] Attempting to start with fewer
    /// [tiles](Tile) than the opening racks need.
    /// * [`SettingsError::TooManyTiles`] Attempting to fill the bag with more than [TILE_LIMIT]
    /// [tiles](Tile).
    /// * [`SettingsError::ReservedLetter`] Attempting to use a letter containing `.` or `-`.
    /// * [`SettingsError::MissingDictionarySettings`] Attempting to use a custom dictionary
    /// without settings.
    pub fn check(&self) -> Result<(), BTreeSet<SettingsError>> {
        let mut errors = BTreeSet::new();

        if self.players.is_empty() {
            errors.insert(SettingsError::EmptyPlayers);
        }
        let mut ids = HashSet::with_capacity(self.players.len());
        for player in &self.players {
            if !ids.insert(&player.id) {
                errors.insert(SettingsError::DuplicatePlayer(player.id.clone()));
            }
        }

        let cols = self.cols();
        if cols == 0 {
            errors.insert(SettingsError::EmptyBoard);
        }
        for (row, line) in self.board.iter().enumerate() {
            if line.chars().count() != cols {
                errors.insert(SettingsError::RaggedBoard(row));
            }
            if let Some(bonus) = line.chars().find(|&c| Bonus::from_char(c).is_none()) {
                errors.insert(SettingsError::InvalidBonus { row, bonus });
            }
        }

        if self.rack_size == 0 {
            errors.insert(SettingsError::EmptyRacks);
        }
        let available = self
            .letters
            .iter()
            .try_fold(0usize, |total, spec| total.checked_add(spec.count))
            .filter(|&total| total <= TILE_LIMIT);
        let requested = self.rack_size.saturating_mul(self.players.len());
        match available {
            None => {
                errors.insert(SettingsError::TooManyTiles(TILE_LIMIT));
            }
            Some(0) => {
                errors.insert(SettingsError::EmptyBag);
            }
            Some(available) if requested > available => {
                errors.insert(SettingsError::NotEnoughTiles {
                    requested,
                    available,
                });
            }
            Some(_) => {}
        }
        errors.extend(
            self.letters
                .iter()
                .filter(|spec| spec.letter.contains(RESERVED_LETTER_CHARS))
                .map(|spec| SettingsError::ReservedLetter(spec.letter.clone())),
        );

        if self.dictionary_type == DictionaryType::Custom && self.dictionary_settings.is_none() {
            errors.insert(SettingsError::MissingDictionarySettings);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(())
    }

    /// Whether every player keeps the default id and name for their position and the number
    /// of players is the default.
    pub fn has_default_players(&self) -> bool {
        self.players.len() == DEFAULT_PLAYER_COUNT
            && self
                .players
                .iter()
                .enumerate()
                .all(|(index, player)| *player == Player::numbered(index + 1))
    }
}

/// # Returns
///
/// `count` [numbered](Player::numbered) players.
pub fn default_players(count: usize) -> Vec<Player> {
    (1..=count).map(Player::numbered).collect()
}

/// # Returns
///
/// The rows of [DEFAULT_BOARD].
pub fn default_board() -> Vec<String> {
    DEFAULT_BOARD.iter().map(|&row| row.to_owned()).collect()
}

/// # Returns
///
/// The letters of [DEFAULT_LETTERS].
pub fn default_letters() -> Vec<LetterSpec> {
    DEFAULT_LETTERS
        .iter()
        .map(|&(letter, count, value)| LetterSpec::new(letter, count, value))
        .collect_vec()
}

/// # Returns
///
/// A fresh decimal seed for a new game.
pub fn random_seed() -> String {
    rand::random::<u32>().to_string()
}

/// # Returns
///
/// A fresh identifier of [GAME_ID_LEN] letters and digits for a new game.
pub fn random_game_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GAME_ID_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_json_strict;
    use map_macro::btree_set;

    #[test]
    fn default_is_valid() {
        let settings = Settings::default();

        assert_eq!(Ok(()), settings.check());
        assert_eq!(15, settings.rows());
        assert_eq!(15, settings.cols());
        assert_eq!(100, settings.tiles().len());
        assert!(settings.has_default_players());
    }

    #[test]
    fn default_players_are_numbered() {
        let settings = Settings::default();

        assert_eq!(Player::new("1", "Player 1"), settings.players[0]);
        assert_eq!(Player::new("2", "Player 2"), settings.players[1]);
        assert_eq!(Some(1), settings.player_index("2"));
        assert_eq!(None, settings.player_index("3"));
    }

    #[test]
    fn tile_value() {
        let settings = Settings::default();

        assert_eq!(Some(10), settings.tile_value("Q"));
        assert_eq!(Some(0), settings.tile_value(""));
        assert_eq!(None, settings.tile_value("Ñ"));
    }

    #[test]
    fn tiles_follow_letters() {
        let settings = Settings {
            letters: vec![LetterSpec::new("A", 2, 1), LetterSpec::new("", 1, 0)],
            ..Settings::default()
        };

        assert_eq!(
            vec![Tile::new("A", 1), Tile::new("A", 1), Tile::blank()],
            settings.tiles()
        );
    }

    #[test]
    fn check_collects_every_error() {
        let settings = Settings {
            players: vec![Player::numbered(1), Player::numbered(1)],
            board: vec!["..".to_owned(), "x".to_owned()],
            letters: vec![LetterSpec::new("A.B", 1, 1)],
            rack_size: 4,
            dictionary_type: DictionaryType::Custom,
            ..Settings::default()
        };

        assert_eq!(
            Err(btree_set! {
                SettingsError::DuplicatePlayer("1".to_owned()),
                SettingsError::RaggedBoard(1),
                SettingsError::InvalidBonus { row: 1, bonus: 'x' },
                SettingsError::NotEnoughTiles { requested: 8, available: 1 },
                SettingsError::ReservedLetter("A.B".to_owned()),
                SettingsError::MissingDictionarySettings,
            }),
            settings.check()
        );
    }

    #[test]
    fn check_empty() {
        let settings = Settings {
            players: Vec::new(),
            board: Vec::new(),
            letters: Vec::new(),
            rack_size: 0,
            ..Settings::default()
        };

        assert_eq!(
            Err(btree_set! {
                SettingsError::EmptyPlayers,
                SettingsError::EmptyBoard,
                SettingsError::EmptyRacks,
                SettingsError::EmptyBag,
            }),
            settings.check()
        );
    }

    #[test]
    fn check_tile_limits() {
        let overflowing = Settings {
            letters: vec![LetterSpec::new("A", usize::MAX, 1), LetterSpec::new("B", 2, 3)],
            ..Settings::default()
        };
        let huge_racks = Settings {
            rack_size: usize::MAX,
            ..Settings::default()
        };
        let at_limit = Settings {
            letters: vec![LetterSpec::new("A", TILE_LIMIT, 1)],
            ..Settings::default()
        };
        let over_limit = Settings {
            letters: vec![LetterSpec::new("A", TILE_LIMIT, 1), LetterSpec::new("B", 1, 3)],
            ..Settings::default()
        };

        assert_eq!(
            Err(btree_set! { SettingsError::TooManyTiles(TILE_LIMIT) }),
            overflowing.check()
        );
        assert_eq!(
            Err(btree_set! {
                SettingsError::NotEnoughTiles {
                    requested: usize::MAX,
                    available: 100,
                },
            }),
            huge_racks.check()
        );
        assert_eq!(Ok(()), at_limit.check());
        assert_eq!(
            Err(btree_set! { SettingsError::TooManyTiles(TILE_LIMIT) }),
            over_limit.check()
        );
    }

    #[test]
    fn random_game_ids() {
        let game_id = random_game_id();

        assert_eq!(GAME_ID_LEN, game_id.len());
        assert!(game_id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn dictionary_type_strings() {
        assert_eq!(DictionaryType::Permissive, DictionaryType::from("permissive".to_owned()));
        assert_eq!(DictionaryType::FreeApi, DictionaryType::from("freeapi".to_owned()));
        assert_eq!(DictionaryType::Custom, DictionaryType::from("custom".to_owned()));
        assert_eq!(
            DictionaryType::WordList("wordlist-en".to_owned()),
            DictionaryType::from("wordlist-en".to_owned())
        );
        assert_eq!("wordlist-en", DictionaryType::WordList("wordlist-en".to_owned()).to_string());
    }

    #[test]
    fn json_round_trip() {
        let settings = Settings {
            dictionary_type: DictionaryType::Custom,
            dictionary_settings: Some("https://dictionary.example/check".to_owned()),
            ..Settings::default()
        };

        let json = serde_json::to_string(&settings).unwrap();

        assert!(json.starts_with(r#"{"version":1,"players":[{"id":"1","name":"Player 1"}"#));
        assert_eq!(settings, from_json_strict::<Settings>(&json).unwrap());
    }
}
