//! Error types, one enum per concern.
//!
//! Placement and capacity errors are raised before anything is mutated, so callers can correct
//! their input and retry. [`WireError`] is kept apart from the rest so that bad input from a peer
//! can be told apart from a bug in the local state.

use crate::{Coordinate, PlayerId, Tile};
use std::collections::BTreeSet;

/// Describes the reason why a placement of [tiles](Tile) was rejected by the
/// [board](crate::Board).
#[derive(Debug, Clone, Eq, PartialEq, Hash, thiserror::Error)]
pub enum PlacementError {
    /// Attempting to place no [tiles](Tile).
    #[error("no tiles were placed")]
    EmptyPlacement,
    /// Attempting to place a blank without choosing its letter.
    #[error("the blank at {0:?} needs a letter")]
    BlankWithoutLetter(Coordinate),
    /// Attempting to choose a letter for a [tile](Tile) that is not a blank.
    #[error("only blanks can be given a letter, but the tile at {0:?} is not blank")]
    LetterOnNonBlank(Coordinate),
    /// Attempting to give a blank a letter containing `.` or `-`.
    #[error("the blank at {coordinate:?} cannot play as {letter:?}")]
    InvalidAssignedLetter {
        /// The square of the blank.
        coordinate: Coordinate,
        /// The rejected letter.
        letter: String,
    },
    /// Attempting to place a [tile](Tile) outside the board.
    #[error("the square {0:?} is outside the board")]
    OutOfBounds(Coordinate),
    /// Attempting to place two [tiles](Tile) on the same square.
    #[error("more than one tile was placed on {0:?}")]
    DuplicateSquare(Coordinate),
    /// Attempting to place [tiles](Tile) that do not share a row or a column.
    #[error("the tiles are not in a line")]
    NotInLine,
    /// Attempting to place a [tile](Tile) on a square that already holds one.
    #[error("the square {0:?} is already occupied")]
    SquareOccupied(Coordinate),
    /// Attempting to place [tiles](Tile) in a line with empty squares between them.
    #[error("the tiles must form a single word without gaps")]
    Gap,
    /// Attempting to form a word of a single letter.
    #[error("words must have at least two letters")]
    SingleLetter,
    /// Attempting to place a word that neither touches the [tiles](Tile) on the board nor
    /// covers the center square.
    #[error("the word must touch a tile on the board or cover the center square")]
    NotConnected,
    /// A word read from a turn URL disagrees with a [tile](Tile) already on the board.
    #[error("the word expects {expected:?} at {coordinate:?} but the board holds {found:?}")]
    WordMismatch {
        /// The square holding the conflicting [tile](Tile).
        coordinate: Coordinate,
        /// The letter the word expects.
        expected: String,
        /// The letter on the board.
        found: String,
    },
    /// A word read from a turn URL uses a letter that is not in the bag.
    #[error("the letter {0:?} is not part of this game")]
    UnknownLetter(String),
}

/// Describes the reason why the [bag](crate::TileBag) could not hand out [tiles](Tile).
#[derive(Debug, Clone, Eq, PartialEq, Hash, thiserror::Error)]
pub enum TileBagError {
    /// Attempting to draw or exchange more [tiles](Tile) than the bag holds.
    #[error("cannot take {requested} tiles from a bag of {available}")]
    OutOfRange {
        /// The number of [tiles](Tile) requested.
        requested: usize,
        /// The number of [tiles](Tile) in the bag.
        available: usize,
    },
}

/// Describes the reason why [racks](crate::Rack) or the [bag](crate::TileBag) could not be
/// read or updated.
#[derive(Debug, Clone, Eq, PartialEq, Hash, thiserror::Error)]
pub enum TilesError {
    /// Referring to a player who is not part of the game.
    #[error("unknown player {0:?}")]
    UnknownPlayer(PlayerId),
    /// Creating a game where two players share an id.
    #[error("player {0:?} appears more than once")]
    DuplicatePlayer(PlayerId),
    /// Playing a [tile](Tile) the player does not hold.
    #[error("player {player:?} does not hold the tile {tile}")]
    TileNotInRack {
        /// The player who played the [tile](Tile).
        player: PlayerId,
        /// The missing [tile](Tile).
        tile: Tile,
    },
    /// Exchanging a rack index the player does not hold.
    #[error("player {player:?} has no tile at rack index {index} (rack holds {rack_len})")]
    ExchangeIndexOutOfRange {
        /// The player exchanging [tiles](Tile).
        player: PlayerId,
        /// The offending index.
        index: usize,
        /// The number of [tiles](Tile) in the rack.
        rack_len: usize,
    },
    /// Exchanging the same rack index twice.
    #[error("rack index {0} is exchanged more than once")]
    DuplicateExchangeIndex(usize),
    /// A word read from a turn URL reached the racks before it was matched against the board.
    #[error("turn {0} places a word that was not matched against the board")]
    UnresolvedWord(u32),
    /// The [bag](crate::TileBag) could not hand out [tiles](Tile).
    #[error(transparent)]
    Bag(#[from] TileBagError),
}

/// Describes the reason why a [dictionary](crate::Dictionary) rejected a batch of words.
#[derive(Debug, Clone, Eq, PartialEq, Hash, thiserror::Error)]
pub enum DictionaryError {
    /// One or more words are not in the dictionary.
    #[error("not in the dictionary: {}", .0.join(", "))]
    InvalidWords(Vec<String>),
    /// The dictionary could not be consulted.
    #[error("the dictionary is unavailable: {0}")]
    Unavailable(String),
}

/// Describes the reason why a batch of [turns](crate::Turn) was rejected by the
/// [shared state](crate::SharedState). Nothing is applied when any of these is returned.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum TurnError {
    /// Two turns in one batch share a turn number.
    #[error("turn {0} appears more than once")]
    DuplicateTurnNumber(u32),
    /// A turn was played by somebody other than the player whose turn it was.
    #[error("turn {turn_number} belongs to player {expected:?}, not {actual:?}")]
    WrongPlayer {
        /// The number of the turn.
        turn_number: u32,
        /// The player whose turn it was.
        expected: PlayerId,
        /// The player named by the turn.
        actual: PlayerId,
    },
    /// A turn arrived after the game ended.
    #[error("turn {0} was played after the game ended")]
    GameOver(u32),
    /// A word placement broke the rules.
    #[error(transparent)]
    Placement(#[from] PlacementError),
    /// The racks or the bag could not satisfy the turn.
    #[error(transparent)]
    Tiles(#[from] TilesError),
    /// The dictionary rejected a word.
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

/// Describes the reason why turn URL parameters could not be read.
#[derive(Debug, Clone, Eq, PartialEq, Hash, thiserror::Error)]
pub enum WireError {
    /// The first parameter is not `gid`.
    #[error("a turn URL must start with gid")]
    MissingGameId,
    /// No `tn` parameter was found.
    #[error("a turn URL needs a tn parameter")]
    MissingTurnNumber,
    /// More than one `tn` parameter was found.
    #[error("a turn URL needs exactly one tn parameter")]
    DuplicateTurnNumber,
    /// No `seed` parameter was found.
    #[error("a turn URL needs a seed parameter")]
    MissingSeed,
    /// The protocol version is not understood.
    #[error("protocol version {0:?} is not supported")]
    UnsupportedVersion(String),
    /// A custom dictionary was named without its settings.
    #[error("dt=custom needs a ds parameter")]
    MissingDictionarySettings,
    /// A parameter name is not part of the protocol.
    #[error("unknown parameter {0:?}")]
    UnknownParameter(String),
    /// A game parameter appeared after `tn`.
    #[error("game parameter {0:?} must come before tn")]
    GameParameterAfterTurnNumber(String),
    /// A turn parameter appeared before `tn`.
    #[error("turn parameter {0:?} must come after tn")]
    TurnParameterBeforeTurnNumber(String),
    /// A game parameter appeared twice.
    #[error("game parameter {0:?} appears more than once")]
    DuplicateGameParameter(String),
    /// A `wh`, `wv`, or `bt` parameter appeared outside a word group started by `wl`.
    #[error("parameter {0:?} must follow wl")]
    OutsideMoveGroup(String),
    /// A move group repeated `bt` or named its direction twice.
    #[error("move {move_index} repeats parameter {name:?}")]
    DuplicateMoveParameter {
        /// The zero-based position of the move in the URL.
        move_index: usize,
        /// The repeated parameter.
        name: String,
    },
    /// A move group mixes word and exchange data.
    #[error("move {0} mixes a word and an exchange")]
    WordAndExchange(usize),
    /// A word group has no `wh` or `wv` parameter.
    #[error("move {0} has no word")]
    MissingWord(usize),
    /// A `bt` index does not point at a letter of the word.
    #[error("move {move_index} marks blank {index} but the word has {len} letters")]
    BlankIndexOutOfRange {
        /// The zero-based position of the move in the URL.
        move_index: usize,
        /// The offending index.
        index: usize,
        /// The number of letters in the word.
        len: usize,
    },
    /// Player names are not numbered `1`, `2`, ... without gaps.
    #[error("player names must be numbered from 1 without gaps")]
    NonContiguousPlayers,
    /// The address a turn URL is attached to is not a URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    /// A parameter value could not be parsed.
    #[error("parameter {name:?} has an invalid value {value:?}")]
    InvalidValue {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: String,
    },
}

/// Describes the reason why a persisted record could not be read or written.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The JSON is malformed, has missing or extra keys, or has values of the wrong type.
    #[error("invalid record: {0}")]
    Json(#[from] serde_json::Error),
    /// The keys of an object are not in the expected order.
    #[error("keys at {path} are out of order: expected {expected:?}, found {found:?}")]
    KeyOrder {
        /// A JSON pointer to the object.
        path: String,
        /// The expected keys in order.
        expected: Vec<String>,
        /// The keys found in order.
        found: Vec<String>,
    },
    /// The record was written by an incompatible version.
    #[error("schema version {found} is not supported (expected {expected})")]
    Version {
        /// The supported version.
        expected: u32,
        /// The version in the record.
        found: u32,
    },
    /// The record is well formed but describes an impossible game.
    #[error("inconsistent record: {0}")]
    Inconsistent(String),
}

/// Describes the reason why [settings](crate::Settings) cannot start a game.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, thiserror::Error)]
pub enum SettingsError {
    /// Attempting to start with no players.
    #[error("a game needs at least one player")]
    EmptyPlayers,
    /// Attempting to start with two players sharing an id.
    #[error("player id {0:?} is used more than once")]
    DuplicatePlayer(PlayerId),
    /// Attempting to start with a board without squares.
    #[error("the board has no squares")]
    EmptyBoard,
    /// Attempting to start with rows of different lengths.
    #[error("row {0} of the board has a different length than the first row")]
    RaggedBoard(usize),
    /// Attempting to start with an unknown bonus character.
    #[error("unknown bonus {bonus:?} in row {row}")]
    InvalidBonus {
        /// The row holding the character.
        row: usize,
        /// The character.
        bonus: char,
    },
    /// Attempting to start with racks that hold nothing.
    #[error("the rack size must be positive")]
    EmptyRacks,
    /// Attempting to start with an empty bag.
    #[error("the bag is empty")]
    EmptyBag,
    /// Attempting to start with fewer tiles than the opening racks need.
    #[error("{requested} tiles are needed for the racks but the bag holds {available}")]
    NotEnoughTiles {
        /// The number of [tiles](Tile) needed for every rack.
        requested: usize,
        /// The number of [tiles](Tile) in the bag.
        available: usize,
    },
    /// Attempting to fill the bag with more [tiles](Tile) than the limit.
    #[error("the bag may hold at most {0} tiles")]
    TooManyTiles(usize),
    /// Attempting to use a letter containing a character reserved by the turn URL format.
    #[error("the letter {0:?} contains a reserved character")]
    ReservedLetter(String),
    /// Attempting to use a custom dictionary without settings.
    #[error("a custom dictionary needs settings")]
    MissingDictionarySettings,
}

/// Describes the reason why a staged [tile](Tile) could not be moved.
#[derive(Debug, Clone, Eq, PartialEq, Hash, thiserror::Error)]
pub enum MoveError {
    /// No staged [tile](Tile) sits at the source.
    #[error("there is no tile at {0}")]
    NoTileAt(crate::Location),
    /// The destination slot does not exist.
    #[error("{0} is out of range")]
    OutOfRange(crate::Location),
    /// Every slot of the destination area is taken.
    #[error("there is no free slot for {0}")]
    AreaFull(crate::Location),
    /// The destination square and every square next to it are taken.
    #[error("there is no free square at or next to {0}")]
    NoFreeSquare(crate::Location),
    /// Attempting to choose a letter for a [tile](Tile) that is not a blank.
    #[error("only blanks can be given a letter")]
    LetterOnNonBlank,
}

/// Describes the reason why a [game state](crate::GameState) operation failed. The game state
/// is unchanged whenever one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The turn was rejected.
    #[error(transparent)]
    Turn(#[from] TurnError),
    /// A turn URL could not be read.
    #[error(transparent)]
    Wire(#[from] WireError),
    /// A persisted record could not be read or written.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// A staged [tile](Tile) could not be moved.
    #[error(transparent)]
    Move(#[from] MoveError),
    /// The racks or the bag could not be read.
    #[error(transparent)]
    Tiles(#[from] TilesError),
    /// The settings cannot start a game.
    #[error("invalid settings: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Settings(BTreeSet<SettingsError>),
    /// Attempting to play while it is another player's turn.
    #[error("it is {0:?}'s turn")]
    NotYourTurn(PlayerId),
    /// Attempting to play a word without staging any [tile](Tile) on the board.
    #[error("no tiles are on the board")]
    NothingStaged,
    /// A turn URL belongs to another game.
    #[error("the turn URL is for game {found:?}, not {expected:?}")]
    GameIdMismatch {
        /// The id of this game.
        expected: String,
        /// The id in the turn URL.
        found: String,
    },
    /// Attempting to commit while another commit is in flight.
    #[error("another turn is being committed")]
    CommitInProgress,
    /// The staged [tiles](Tile) no longer match the player's rack after a commit.
    #[error("the staged tiles do not match the rack: {0}")]
    Reconcile(String),
}
