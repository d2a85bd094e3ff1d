use super::*;
use crate::{
    default_players, Direction, DictionaryType, LetterSpec, Player, DEFAULT_PLAYER_COUNT,
};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

const GAME_PARAMS: [&str; 9] = [
    GAME_ID_PARAM,
    VERSION_PARAM,
    BOARD_PARAM,
    BINGO_PARAM,
    BAG_PARAM,
    RACK_SIZE_PARAM,
    SEED_PARAM,
    DICTIONARY_TYPE_PARAM,
    DICTIONARY_SETTINGS_PARAM,
];
const TURN_PARAMS: [&str; 5] = [
    WORD_LOCATION_PARAM,
    BLANK_TILES_PARAM,
    WORD_HORIZONTAL_PARAM,
    WORD_VERTICAL_PARAM,
    EXCHANGE_PARAM,
];

/// Reads a turn URL.
///
/// # Arguments
///
/// * `params`: The parameters in order, as returned by [parse_query_string].
///
/// # Errors
///
/// Returns the first [`WireError`] found.
///
/// * [`WireError::MissingGameId`] The first parameter is not `gid`.
/// * [`WireError::MissingTurnNumber`] There is no `tn`.
/// * [`WireError::DuplicateTurnNumber`] There is more than one `tn`.
/// * [`WireError::MissingSeed`] There is no `seed`.
/// * [`WireError::UnsupportedVersion`] `v` is not [PROTOCOL_VERSION].
/// * [`WireError::MissingDictionarySettings`] `dt=custom` without `ds`.
/// * [`WireError::UnknownParameter`] A parameter is not part of the protocol.
/// * [`WireError::GameParameterAfterTurnNumber`] A game parameter follows `tn`.
/// * [`WireError::TurnParameterBeforeTurnNumber`] A turn parameter precedes `tn`.
/// * [`WireError::DuplicateGameParameter`] A game parameter appears twice.
/// * [`WireError::NonContiguousPlayers`] Player names skip a number.
/// * [`WireError::OutsideMoveGroup`] `bt`, `wh`, or `wv` before any `wl`.
/// * [`WireError::DuplicateMoveParameter`] A word group repeats `bt` or its direction.
/// * [`WireError::WordAndExchange`] An exchange group holds word parameters.
/// * [`WireError::MissingWord`] A word group has no `wh` or `wv`.
/// * [`WireError::BlankIndexOutOfRange`] A `bt` index is past the end of the word.
/// * [`WireError::InvalidValue`] A value cannot be parsed.
///
/// # Returns
///
/// The [`TurnUrl`]. Its [settings](Settings) are not [checked](Settings::check).
pub fn decode_turn_url(params: &UrlParams) -> Result<TurnUrl, WireError> {
    match params.first() {
        Some((name, _)) if name == GAME_ID_PARAM => {}
        _ => return Err(WireError::MissingGameId),
    }

    let turn_number_at = find_turn_number(params)?;
    let (game_params, turn_params) = params.split_at(turn_number_at);
    let (_, turn_number) = &turn_params[0];
    let turn_number = match parse_decimal::<u32>(TURN_NUMBER_PARAM, turn_number) {
        Ok(turn_number) if turn_number > 0 => turn_number,
        _ => return Err(invalid(TURN_NUMBER_PARAM, turn_number)),
    };

    let (game_id, settings) = decode_game_params(game_params)?;
    let groups = decode_move_groups(&turn_params[1..])?;

    // the last turn must still be numbered within u32
    let last_turn_number = u32::try_from(groups.len().saturating_sub(1))
        .ok()
        .and_then(|offset| turn_number.checked_add(offset))
        .ok_or_else(|| invalid(TURN_NUMBER_PARAM, &turn_number.to_string()))?;

    let count = settings.player_count();
    let turns: Vec<Turn> = groups
        .into_iter()
        .zip(turn_number..=last_turn_number)
        .map(|(action, turn_number)| {
            let player = &settings.players[(turn_number as usize - 1) % count];
            Turn::new(player.id.clone(), turn_number, action)
        })
        .collect();

    debug!(%game_id, turn_number, turns = turns.len(), "decoded turn URL");

    Ok(TurnUrl {
        game_id,
        settings,
        turn_number,
        turns,
    })
}

/// # Returns
///
/// The position of the only `tn`, checking that every game parameter precedes it and every
/// turn parameter follows it.
fn find_turn_number(params: &UrlParams) -> Result<usize, WireError> {
    let mut turn_number_at = None;

    for (index, (name, _)) in params.iter().enumerate() {
        let is_game_param = GAME_PARAMS.contains(&name.as_str()) || is_player_name_param(name);
        let is_turn_param = TURN_PARAMS.contains(&name.as_str());

        match (name.as_str(), turn_number_at) {
            (TURN_NUMBER_PARAM, None) => turn_number_at = Some(index),
            (TURN_NUMBER_PARAM, Some(_)) => return Err(WireError::DuplicateTurnNumber),
            _ if is_game_param && turn_number_at.is_some() => {
                return Err(WireError::GameParameterAfterTurnNumber(name.clone()))
            }
            _ if is_turn_param && turn_number_at.is_none() => {
                return Err(WireError::TurnParameterBeforeTurnNumber(name.clone()))
            }
            _ if is_game_param || is_turn_param => {}
            _ => return Err(WireError::UnknownParameter(name.clone())),
        }
    }

    turn_number_at.ok_or(WireError::MissingTurnNumber)
}

fn decode_game_params(params: &[(String, String)]) -> Result<(String, Settings), WireError> {
    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
    let mut names: BTreeMap<usize, &str> = BTreeMap::new();

    for (name, value) in params {
        let repeated = match parse_player_number(name) {
            Some(number) => names.insert(number, value.as_str()).is_some(),
            None => seen.insert(name.as_str(), value.as_str()).is_some(),
        };
        if repeated {
            return Err(WireError::DuplicateGameParameter(name.clone()));
        }
    }

    if let Some(&version) = seen.get(VERSION_PARAM) {
        if version != PROTOCOL_VERSION.to_string() {
            return Err(WireError::UnsupportedVersion(version.to_owned()));
        }
    }
    let seed = seen.get(SEED_PARAM).ok_or(WireError::MissingSeed)?;

    let players = if names.is_empty() {
        default_players(DEFAULT_PLAYER_COUNT)
    } else if names.keys().copied().eq(1..=names.len()) {
        names
            .into_iter()
            .map(|(number, name)| Player::new(number.to_string(), name))
            .collect()
    } else {
        return Err(WireError::NonContiguousPlayers);
    };

    let dictionary_type = seen
        .get(DICTIONARY_TYPE_PARAM)
        .map(|&value| DictionaryType::from(value.to_owned()))
        .unwrap_or_default();
    let dictionary_settings = seen
        .get(DICTIONARY_SETTINGS_PARAM)
        .map(|&value| value.to_owned());
    if dictionary_type == DictionaryType::Custom && dictionary_settings.is_none() {
        return Err(WireError::MissingDictionarySettings);
    }

    let settings = Settings {
        version: PROTOCOL_VERSION,
        players,
        board: match seen.get(BOARD_PARAM) {
            Some(board) => board.split('-').map(str::to_owned).collect(),
            None => default_board(),
        },
        bingo_bonus: parse_or(&seen, BINGO_PARAM, DEFAULT_BINGO_BONUS)?,
        letters: match seen.get(BAG_PARAM) {
            Some(bag) => decode_bag(bag)?,
            None => default_letters(),
        },
        rack_size: parse_or(&seen, RACK_SIZE_PARAM, DEFAULT_RACK_SIZE)?,
        seed: (*seed).to_owned(),
        dictionary_type,
        dictionary_settings,
    };
    let game_id = seen
        .get(GAME_ID_PARAM)
        .map(|&game_id| game_id.to_owned())
        .unwrap_or_default();

    Ok((game_id, settings))
}

fn parse_or<T: FromStr>(
    seen: &BTreeMap<&str, &str>,
    name: &str,
    default: T,
) -> Result<T, WireError> {
    match seen.get(name) {
        Some(value) => parse_decimal(name, value),
        None => Ok(default),
    }
}

fn decode_bag(bag: &str) -> Result<Vec<LetterSpec>, WireError> {
    bag.split('.')
        .map(|triple| {
            let parts: Vec<&str> = triple.split('-').collect();
            match parts.as_slice() {
                [letter, count, value] => Ok(LetterSpec::new(
                    *letter,
                    parse_decimal(BAG_PARAM, count).map_err(|_| invalid(BAG_PARAM, triple))?,
                    parse_decimal(BAG_PARAM, value).map_err(|_| invalid(BAG_PARAM, triple))?,
                )),
                _ => Err(invalid(BAG_PARAM, triple)),
            }
        })
        .collect()
}

/// A move group being read.
enum MoveGroup {
    Word {
        anchor: (usize, usize),
        blank_indices: Option<Vec<usize>>,
        letters: Option<(Direction, Vec<String>)>,
    },
    Exchange(Vec<usize>),
}

impl MoveGroup {
    fn finish(self, move_index: usize) -> Result<Move, WireError> {
        let (anchor, blank_indices, letters) = match self {
            MoveGroup::Exchange(indices) => return Ok(Move::ExchangeTileIndices(indices)),
            MoveGroup::Word {
                anchor,
                blank_indices,
                letters,
            } => (anchor, blank_indices.unwrap_or_default(), letters),
        };
        let (direction, letters) = letters.ok_or(WireError::MissingWord(move_index))?;

        if let Some(&index) = blank_indices.iter().find(|&&index| index >= letters.len()) {
            return Err(WireError::BlankIndexOutOfRange {
                move_index,
                index,
                len: letters.len(),
            });
        }

        Ok(Move::PlayWord(WordPlay {
            row: anchor.0,
            col: anchor.1,
            direction,
            letters,
            blank_indices,
        }))
    }
}

fn decode_move_groups(params: &[(String, String)]) -> Result<Vec<Move>, WireError> {
    let mut moves = Vec::new();
    let mut group: Option<MoveGroup> = None;

    for (name, value) in params {
        if name == WORD_LOCATION_PARAM || name == EXCHANGE_PARAM {
            if let Some(finished) = group.take() {
                moves.push(finished.finish(moves.len())?);
            }
            group = Some(if name == WORD_LOCATION_PARAM {
                MoveGroup::Word {
                    anchor: decode_anchor(value)?,
                    blank_indices: None,
                    letters: None,
                }
            } else {
                MoveGroup::Exchange(decode_indices(EXCHANGE_PARAM, value)?)
            });
            continue;
        }

        let move_index = moves.len();
        match &mut group {
            None => return Err(WireError::OutsideMoveGroup(name.clone())),
            Some(MoveGroup::Exchange(_)) => return Err(WireError::WordAndExchange(move_index)),
            Some(MoveGroup::Word { blank_indices, .. }) if name == BLANK_TILES_PARAM => {
                if blank_indices.is_some() {
                    return Err(duplicate(move_index, name));
                }
                *blank_indices = Some(decode_indices(BLANK_TILES_PARAM, value)?);
            }
            Some(MoveGroup::Word { letters, .. }) => {
                if letters.is_some() {
                    return Err(duplicate(move_index, name));
                }
                let direction = if name == WORD_VERTICAL_PARAM {
                    Direction::Vertical
                } else {
                    Direction::Horizontal
                };
                *letters = Some((direction, decode_letters(name, value)?));
            }
        }
    }

    if let Some(finished) = group {
        moves.push(finished.finish(moves.len())?);
    }

    Ok(moves)
}

fn decode_anchor(value: &str) -> Result<(usize, usize), WireError> {
    value
        .split_once('.')
        .and_then(|(row, col)| {
            Some((
                parse_decimal(WORD_LOCATION_PARAM, row).ok()?,
                parse_decimal(WORD_LOCATION_PARAM, col).ok()?,
            ))
        })
        .ok_or_else(|| invalid(WORD_LOCATION_PARAM, value))
}

/// Empty for no indexes, otherwise indexes separated by `.`.
fn decode_indices(name: &str, value: &str) -> Result<Vec<usize>, WireError> {
    if value.is_empty() {
        return Ok(Vec::new());
    }
    value
        .split('.')
        .map(|index| parse_decimal(name, index).map_err(|_| invalid(name, value)))
        .collect()
}

/// Parses a number written with ASCII digits only, without a sign or spaces.
fn parse_decimal<T: FromStr>(name: &str, value: &str) -> Result<T, WireError> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid(name, value));
    }
    T::from_str(value).map_err(|_| invalid(name, value))
}

/// Letters separated by `.`, or one letter per character when there is no `.`.
fn decode_letters(name: &str, value: &str) -> Result<Vec<String>, WireError> {
    let letters: Vec<String> = if value.contains('.') {
        value.split('.').map(str::to_owned).collect()
    } else {
        value.chars().map(String::from).collect()
    };

    if letters.is_empty() || letters.iter().any(String::is_empty) {
        return Err(invalid(name, value));
    }

    Ok(letters)
}

fn duplicate(move_index: usize, name: &str) -> WireError {
    WireError::DuplicateMoveParameter {
        move_index,
        name: name.to_owned(),
    }
}

fn invalid(name: &str, value: &str) -> WireError {
    WireError::InvalidValue {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}
