use crate::{Tile, PLAYER_CAPACITY, RACK_CAPACITY};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// The identifier of a player. Players created from a turn URL are numbered `"1"`, `"2"`, ...
///
/// # See Also
///
/// * [Player](crate::Player)
pub type PlayerId = String;
/// A vector of [tiles](Tile) held by one player.
///
/// # See Also
///
/// * [Tile]
/// * [RACK_CAPACITY]
/// * [Racks]
/// * [TilesState::get_tiles](crate::TilesState::get_tiles)
pub type Rack = SmallVec<[Tile; RACK_CAPACITY]>;
/// A vector of racks for each player in player order.
///
/// # See Also
///
/// * [Rack]
/// * [PLAYER_CAPACITY]
/// * [HonorTilesState](crate::HonorTilesState)
pub type Racks = SmallVec<[Rack; PLAYER_CAPACITY]>;
/// A vector of the number of [tiles](Tile) in each player's rack, in player order.
///
/// # See Also
///
/// * [TilesState::count_tiles](crate::TilesState::count_tiles)
pub type RackLens = SmallVec<[usize; PLAYER_CAPACITY]>;
/// A map of players to their cumulative points.
///
/// # See Also
///
/// * [Board::scores](crate::Board::scores)
pub type Scores = BTreeMap<PlayerId, u32>;
/// An ordered list of URL query parameters.
///
/// # See Also
///
/// * [encode_turn_url](crate::encode_turn_url)
/// * [decode_turn_url](crate::decode_turn_url)
pub type UrlParams = Vec<(String, String)>;
