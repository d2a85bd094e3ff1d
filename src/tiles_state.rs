use crate::{PlayerId, Rack, RackLens, Tile, TilesError, Turn};
pub use honor_system::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

mod honor_system;

/// Describes a change to a player's rack caused by an applied [turn](Turn).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum TilesEvent {
    /// [Tiles](Tile) left the rack for the board.
    Played {
        /// The owner of the rack.
        player_id: PlayerId,
        /// The [tiles](Tile) in the order they were played.
        tiles: Vec<Tile>,
    },
    /// [Tiles](Tile) left the rack for the bag.
    Returned {
        /// The owner of the rack.
        player_id: PlayerId,
        /// The [tiles](Tile) in the order they were returned.
        tiles: Vec<Tile>,
    },
    /// [Tiles](Tile) entered the rack from the bag.
    Drawn {
        /// The owner of the rack.
        player_id: PlayerId,
        /// The [tiles](Tile) in the order they were drawn.
        tiles: Vec<Tile>,
    },
}

impl TilesEvent {
    /// The owner of the rack that changed.
    pub fn player_id(&self) -> &PlayerId {
        match self {
            TilesEvent::Played { player_id, .. }
            | TilesEvent::Returned { player_id, .. }
            | TilesEvent::Drawn { player_id, .. } => player_id,
        }
    }
}

/// Keeps the bag and the rack of every player. The [shared state](crate::SharedState) is generic
/// over this trait so that a different way of managing [tiles](Tile), such as one trusting
/// a server, can replace the [honor system](HonorTilesState).
///
/// # See Also
///
/// * [HonorTilesState]
pub trait TilesState: Clone + Debug + Serialize + DeserializeOwned {
    /// # Errors
    ///
    /// * [`TilesError::UnknownPlayer`] `player` is not part of the game.
    ///
    /// # Returns
    ///
    /// The rack of `player`.
    fn get_tiles(&self, player: &str) -> Result<&Rack, TilesError>;

    /// The number of [tiles](Tile) in each rack in player order.
    fn count_tiles(&self) -> RackLens;

    /// The number of [tiles](Tile) left in the bag.
    fn bag_len(&self) -> usize;

    /// The number of [tiles](Tile) each player holds when the bag allows it.
    fn rack_size(&self) -> usize;

    /// Checks whether the racks and the bag can satisfy `turn` without changing anything.
    ///
    /// # Errors
    ///
    /// * [`TilesError::UnknownPlayer`] The player is not part of the game.
    /// * [`TilesError::TileNotInRack`] The player does not hold a played [tile](Tile).
    /// * [`TilesError::ExchangeIndexOutOfRange`] An exchanged index is outside the rack.
    /// * [`TilesError::DuplicateExchangeIndex`] An index is exchanged twice.
    /// * [`TilesError::Bag`] More [tiles](Tile) are exchanged than the bag holds.
    /// * [`TilesError::UnresolvedWord`] The turn still holds a word from a turn URL.
    fn check_turn(&self, turn: &Turn) -> Result<(), TilesError>;

    /// Removes played and exchanged [tiles](Tile) from the racks and refills them from the bag.
    /// Either every turn is applied or none is.
    ///
    /// # Errors
    ///
    /// Every error of [`TilesState::check_turn`].
    ///
    /// # Returns
    ///
    /// The [events](TilesEvent) describing every change to a rack in order.
    fn play_turns(&mut self, turns: &[Turn]) -> Result<Vec<TilesEvent>, TilesError>;

    /// Whether the bag is empty and some player has no [tiles](Tile) left.
    fn is_game_over(&self) -> bool;
}
