use konst::primitive::parse_usize;
use konst::{option, result};

/// All small, dynamically allocated structs which store player data will be stored on the stack
/// until the number of players becomes greater than `PLAYER_CAPACITY`. When there are more than
/// `PLAYER_CAPACITY` players, player data will be heap allocated. If the environment variable
/// named `PLAYER_CAPACITY` is present at compile time and is able to be parsed into a `usize`,
/// set to the value of the environment variable. Otherwise, it is set to `4`.
///
/// # See Also
///
/// * [Racks](crate::Racks)
/// * [HonorTilesState](crate::HonorTilesState)
pub const PLAYER_CAPACITY: usize = option::unwrap_or!(
    option::and_then!(option_env!("PLAYER_CAPACITY"), |str| result::ok!(
        parse_usize(str)
    )),
    4
);
/// All racks will be stored on the stack until the number of [tiles](crate::Tile) in a rack
/// becomes greater than `RACK_CAPACITY`. If the environment variable named `RACK_CAPACITY` is
/// present at compile time and is able to be parsed into a `usize`, set to the value of
/// the environment variable. Otherwise, it is set to [DEFAULT_RACK_SIZE].
///
/// # See Also
///
/// * [Rack](crate::Rack)
pub const RACK_CAPACITY: usize = option::unwrap_or!(
    option::and_then!(option_env!("RACK_CAPACITY"), |str| result::ok!(
        parse_usize(str)
    )),
    DEFAULT_RACK_SIZE
);
/// The maximum number of [tiles](crate::Tile) allowed in the bag. If the environment variable
/// named `TILE_LIMIT` is present at compile time and is able to be parsed into a `usize`, set to
/// the value of the environment variable. Otherwise, it is set to `10_000`.
///
/// [Settings](crate::Settings) with a larger bag cannot start a game.
///
/// # See Also
///
/// * [Settings::check](crate::Settings::check)
pub const TILE_LIMIT: usize = option::unwrap_or!(
    option::and_then!(option_env!("TILE_LIMIT"), |str| result::ok!(parse_usize(str))),
    10_000
);
const _: () = assert!(RACK_CAPACITY > 0);
const _: () = assert!(TILE_LIMIT >= 100);
const _: () = assert!(PLAYER_CAPACITY > 0);

/// The only turn URL protocol version understood by this crate. `1`.
///
/// # See Also
///
/// * [Settings::version](crate::Settings::version)
/// * [decode_turn_url](crate::decode_turn_url)
pub const PROTOCOL_VERSION: u32 = 1;
/// The number of [tiles](crate::Tile) each player holds when the bag allows it. `7` tiles.
pub const DEFAULT_RACK_SIZE: usize = 7;
/// The extra points for playing every tile from a full rack in one turn. `50` points.
pub const DEFAULT_BINGO_BONUS: u32 = 50;
/// The number of players in a game created without naming any player. `2` players.
pub const DEFAULT_PLAYER_COUNT: usize = 2;
/// The length of a game identifier made by [random_game_id](crate::random_game_id). `12`
/// characters.
pub const GAME_ID_LEN: usize = 12;
/// The version written into and required from every persisted
/// [game state](crate::GameState) record. `1`.
pub const SCHEMA_VERSION: u32 = 1;

/// The classic 15 by 15 board, one string per row.
///
/// * `.`: no bonus
/// * `d`: double letter
/// * `t`: triple letter
/// * `D`: double word
/// * `T`: triple word
pub const DEFAULT_BOARD: [&str; 15] = [
    "T..d...T...d..T",
    ".D...t...t...D.",
    "..D...d.d...D..",
    "d..D...d...D..d",
    "....D.....D....",
    ".t...t...t...t.",
    "..d...d.d...d..",
    "T..d...D...d..T",
    "..d...d.d...d..",
    ".t...t...t...t.",
    "....D.....D....",
    "d..D...d...D..d",
    "..D...d.d...D..",
    ".D...t...t...D.",
    "T..d...T...d..T",
];

/// The English letter distribution as `(letter, count, value)` triples. An empty letter is
/// a blank. 100 tiles in total.
pub const DEFAULT_LETTERS: [(&str, usize, u32); 27] = [
    ("A", 9, 1),
    ("B", 2, 3),
    ("C", 2, 3),
    ("D", 4, 2),
    ("E", 12, 1),
    ("F", 2, 4),
    ("G", 3, 2),
    ("H", 2, 4),
    ("I", 9, 1),
    ("J", 1, 8),
    ("K", 1, 5),
    ("L", 4, 1),
    ("M", 2, 3),
    ("N", 6, 1),
    ("O", 8, 1),
    ("P", 2, 3),
    ("Q", 1, 10),
    ("R", 6, 1),
    ("S", 4, 1),
    ("T", 6, 1),
    ("U", 4, 1),
    ("V", 2, 4),
    ("W", 2, 4),
    ("X", 1, 8),
    ("Y", 2, 4),
    ("Z", 1, 10),
    ("", 2, 0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_letters_hold_one_hundred_tiles() {
        let total: usize = DEFAULT_LETTERS.iter().map(|&(_, count, _)| count).sum();
        assert_eq!(100, total);
    }

    #[test]
    fn default_board_is_square_and_symmetric() {
        for (row, line) in DEFAULT_BOARD.iter().enumerate() {
            assert_eq!(DEFAULT_BOARD.len(), line.len());
            assert_eq!(DEFAULT_BOARD[DEFAULT_BOARD.len() - 1 - row], *line);
            assert_eq!(line.chars().rev().collect::<String>(), *line);
        }
    }
}
