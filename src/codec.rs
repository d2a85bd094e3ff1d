//! The turn URL: an ordered list of query parameters carrying the game settings and the most
//! recent turns.
//!
//! * Game parameters come first, starting with `gid`. Parameters equal to their default are
//! left out, except `gid` and `seed`.
//! * `tn` is the number of the first turn in the URL.
//! * Turn parameters follow `tn`, one group per turn. A group starts with `wl` for a word or
//! `ex` for an exchange or a pass.

use crate::{
    default_board, default_letters, Move, Settings, Turn, UrlParams, WireError, WordPlay,
    DEFAULT_BINGO_BONUS, DEFAULT_RACK_SIZE, PROTOCOL_VERSION,
};
pub use decode::*;
use itertools::Itertools;
use url::{form_urlencoded, Url};

mod decode;

/// The game identifier. Always the first parameter.
pub const GAME_ID_PARAM: &str = "gid";
/// The protocol version.
pub const VERSION_PARAM: &str = "v";
/// The bonus layout of the board, rows separated by `-`.
pub const BOARD_PARAM: &str = "board";
/// The bingo bonus.
pub const BINGO_PARAM: &str = "bingo";
/// The letters of the bag as `letter-count-value` triples separated by `.`.
pub const BAG_PARAM: &str = "bag";
/// The rack size.
pub const RACK_SIZE_PARAM: &str = "racksize";
/// The seed of the bag.
pub const SEED_PARAM: &str = "seed";
/// The dictionary type.
pub const DICTIONARY_TYPE_PARAM: &str = "dt";
/// The dictionary settings.
pub const DICTIONARY_SETTINGS_PARAM: &str = "ds";
/// The number of the first turn in the URL.
pub const TURN_NUMBER_PARAM: &str = "tn";
/// Starts a word group with the `row.col` of its first letter.
pub const WORD_LOCATION_PARAM: &str = "wl";
/// The indexes of the blanks placed by a word.
pub const BLANK_TILES_PARAM: &str = "bt";
/// The letters of a horizontal word.
pub const WORD_HORIZONTAL_PARAM: &str = "wh";
/// The letters of a vertical word.
pub const WORD_VERTICAL_PARAM: &str = "wv";
/// Starts an exchange group with the rack indexes returned to the bag, empty for a pass.
pub const EXCHANGE_PARAM: &str = "ex";

/// The contents of a turn URL.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TurnUrl {
    /// The identifier of the game.
    pub game_id: String,
    /// The settings read from the game parameters.
    pub settings: Settings,
    /// The number of the first turn.
    pub turn_number: u32,
    /// The turns numbered from `turn_number` in order, each owned by the player whose turn it
    /// was. Plays hold [`Move::PlayWord`].
    pub turns: Vec<Turn>,
}

/// # Returns
///
/// The parameter name of player `number`'s name, `p{number}n`.
pub fn player_name_param(number: usize) -> String {
    format!("p{number}n")
}

/// Whether `name` is of the form `p{N}n`.
pub fn is_player_name_param(name: &str) -> bool {
    parse_player_number(name).is_some()
}

/// # Returns
///
/// The one-based player number of a `p{N}n` parameter name.
pub(crate) fn parse_player_number(name: &str) -> Option<usize> {
    let digits = name.strip_prefix('p')?.strip_suffix('n')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Renders the game parameters of `settings` followed by `turns`.
///
/// # Arguments
///
/// * `game_id`: The identifier of the game.
/// * `settings`: The settings of the game. Parameters equal to their default are left out.
/// * `turn_number`: The number of the first turn of `turns`, or the next turn when `turns`
/// is empty.
/// * `turns`: Consecutive turns. Plays must hold their main word.
/// * `extra_params`: Parameters placed right before `tn` unless already written. A player
/// name parameter forces every player name to be written.
///
/// # Errors
///
/// * [`WireError::MissingWord`] A play holds [`Move::PlayTiles`] without its main word.
///
/// # Returns
///
/// The parameters in order.
pub fn encode_turn_url(
    game_id: &str,
    settings: &Settings,
    turn_number: u32,
    turns: &[Turn],
    extra_params: &UrlParams,
) -> Result<UrlParams, WireError> {
    let mut params = UrlParams::new();
    params.push((GAME_ID_PARAM.to_owned(), game_id.to_owned()));

    if settings.version != PROTOCOL_VERSION {
        params.push((VERSION_PARAM.to_owned(), settings.version.to_string()));
    }
    let force_names = extra_params
        .iter()
        .any(|(name, _)| is_player_name_param(name));
    if force_names || !settings.has_default_players() {
        params.extend(
            settings
                .players
                .iter()
                .enumerate()
                .map(|(index, player)| (player_name_param(index + 1), player.name.clone())),
        );
    }
    if settings.board != default_board() {
        params.push((BOARD_PARAM.to_owned(), settings.board.join("-")));
    }
    if settings.bingo_bonus != DEFAULT_BINGO_BONUS {
        params.push((BINGO_PARAM.to_owned(), settings.bingo_bonus.to_string()));
    }
    if settings.letters != default_letters() {
        let bag = settings
            .letters
            .iter()
            .map(|spec| format!("{}-{}-{}", spec.letter, spec.count, spec.value))
            .join(".");
        params.push((BAG_PARAM.to_owned(), bag));
    }
    if settings.rack_size != DEFAULT_RACK_SIZE {
        params.push((RACK_SIZE_PARAM.to_owned(), settings.rack_size.to_string()));
    }
    params.push((SEED_PARAM.to_owned(), settings.seed.clone()));
    if settings.dictionary_type != Default::default() {
        params.push((
            DICTIONARY_TYPE_PARAM.to_owned(),
            settings.dictionary_type.to_string(),
        ));
    }
    if let Some(dictionary_settings) = &settings.dictionary_settings {
        params.push((
            DICTIONARY_SETTINGS_PARAM.to_owned(),
            dictionary_settings.clone(),
        ));
    }

    for (name, value) in extra_params {
        if params.iter().all(|(written, _)| written != name) {
            params.push((name.clone(), value.clone()));
        }
    }

    params.push((TURN_NUMBER_PARAM.to_owned(), turn_number.to_string()));
    for (move_index, turn) in turns.iter().enumerate() {
        encode_move(&mut params, move_index, turn)?;
    }

    Ok(params)
}

fn encode_move(params: &mut UrlParams, move_index: usize, turn: &Turn) -> Result<(), WireError> {
    let word = match (&turn.action, &turn.word) {
        (Move::ExchangeTileIndices(indices), _) => {
            params.push((EXCHANGE_PARAM.to_owned(), indices.iter().join(".")));
            return Ok(());
        }
        (Move::PlayWord(word), _) | (Move::PlayTiles(_), Some(word)) => word,
        (Move::PlayTiles(_), None) => return Err(WireError::MissingWord(move_index)),
    };

    params.push((
        WORD_LOCATION_PARAM.to_owned(),
        format!("{}.{}", word.row, word.col),
    ));
    if !word.blank_indices.is_empty() {
        params.push((
            BLANK_TILES_PARAM.to_owned(),
            word.blank_indices.iter().join("."),
        ));
    }
    let direction = if word.direction.is_vertical() {
        WORD_VERTICAL_PARAM
    } else {
        WORD_HORIZONTAL_PARAM
    };
    params.push((direction.to_owned(), encode_letters(word)));

    Ok(())
}

/// Letters are written back to back, or separated by `.` when any letter has more than one
/// character.
fn encode_letters(word: &WordPlay) -> String {
    if word.letters.iter().all(|letter| letter.chars().count() == 1) {
        word.letters.concat()
    } else {
        word.letters.join(".")
    }
}

/// # Returns
///
/// `params` as `application/x-www-form-urlencoded` text.
pub fn to_query_string(params: &UrlParams) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

/// Reads the parameters of a turn URL. Everything up to the first `#` is skipped when there is
/// one, otherwise everything up to the first `?`, so whole URLs, fragments, and bare query
/// strings are all accepted.
///
/// # Returns
///
/// The parameters in order.
pub fn parse_query_string(text: &str) -> UrlParams {
    let query = match (text.find('#'), text.find('?')) {
        (Some(hash), _) => &text[hash + 1..],
        (None, Some(question)) => &text[question + 1..],
        (None, None) => text,
    };

    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// Attaches `params` to `base` as the fragment, so the parameters never reach a server.
///
/// # Errors
///
/// * [`WireError::InvalidBaseUrl`] `base` is not a URL.
///
/// # Returns
///
/// The turn URL to share with the other players.
pub fn to_fragment_url(base: &str, params: &UrlParams) -> Result<Url, WireError> {
    let mut url =
        Url::parse(base).map_err(|error| WireError::InvalidBaseUrl(error.to_string()))?;
    url.set_fragment(Some(&to_query_string(params)));
    Ok(url)
}
