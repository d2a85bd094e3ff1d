use crate::events::Listeners;
use crate::{
    Board, BoardPlacement, Dictionary, GameError, GameEvent, HonorTilesState, PlayerId, Settings,
    SharedState, Tile, TilesState, Turn, UrlParams,
};
use futures::channel::mpsc::UnboundedReceiver;
#[cfg(test)]
pub use test_setup::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

mod commit;
mod move_tile;
mod record;
#[cfg(test)]
mod test_setup;
mod turn_url;

/// Where one of the player's [tiles](Tile) sits while they arrange their turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Location {
    /// A slot of the rack.
    Rack(usize),
    /// A slot of the area holding [tiles](Tile) to exchange.
    Exchange(usize),
    /// A square of the board that is not yet committed.
    Board {
        /// The row of the square.
        row: usize,
        /// The column of the square.
        col: usize,
    },
}

impl Location {
    /// Whether the location is a square of the board.
    #[inline]
    pub fn is_board(self) -> bool {
        matches!(self, Location::Board { .. })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Rack(slot) => write!(f, "rack slot {slot}"),
            Location::Exchange(slot) => write!(f, "exchange slot {slot}"),
            Location::Board { row, col } => write!(f, "square ({row}, {col})"),
        }
    }
}

/// One of the player's [tiles](Tile) and where it is staged.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TilePlacement {
    /// Where the [tile](Tile) sits.
    pub location: Location,
    /// The [tile](Tile).
    pub tile: Tile,
    /// The letter chosen for a blank staged on the board.
    pub assigned_letter: Option<String>,
}

/// One player's view of the game: the [shared state](SharedState) every player agrees on, plus
/// the private arrangement of the player's own [tiles](Tile) between the rack, the exchange
/// area, and the board.
///
/// Every [tile](Tile) of the player's rack is staged at exactly one [location](Location), so
/// the staged [tiles](Tile) and the rack always hold the same [tiles](Tile).
///
/// Turns are committed through [`GameState::play_word`], [`GameState::pass_or_exchange`], and
/// [`GameState::apply_turn_url`]. A commit either succeeds as a whole or leaves the state as
/// it was before and emits [`GameEvent::StateChanged`].
#[derive(Debug)]
pub struct GameState<T: TilesState = HonorTilesState> {
    player_id: PlayerId,
    shared: SharedState<T>,
    placements: Vec<TilePlacement>,
    pending_params: UrlParams,
    history: Vec<Turn>,
    committing: Arc<AtomicBool>,
    listeners: Listeners,
}

impl GameState<HonorTilesState> {
    /// Starts a game on the [honor system](HonorTilesState) as `player_id`.
    ///
    /// # Arguments
    ///
    /// * `game_id`: The identifier shared by every player of the game.
    /// * `settings`: The [settings](Settings) of the game.
    /// * `player_id`: The local player.
    /// * `dictionary`: Checks the words formed by every play.
    ///
    /// # Errors
    ///
    /// * [`GameError::Settings`] The settings cannot start a game.
    /// * [`GameError::Tiles`] `player_id` is not part of the game.
    ///
    /// # Returns
    ///
    /// A [`GameState`] before turn `1` with the player's rack staged in the rack slots.
    pub fn new(
        game_id: impl Into<String>,
        settings: Settings,
        player_id: impl Into<PlayerId>,
        dictionary: Arc<dyn Dictionary>,
    ) -> Result<GameState<HonorTilesState>, GameError> {
        let shared = SharedState::new(game_id, settings, dictionary)?;
        GameState::with_shared_state(shared, player_id)
    }
}

impl<T: TilesState> GameState<T> {
    /// Plays an existing [shared state](SharedState) as `player_id`.
    ///
    /// # Errors
    ///
    /// * [`GameError::Tiles`] `player_id` is not part of the game.
    ///
    /// # Returns
    ///
    /// A [`GameState`] with the player's rack staged in the rack slots.
    pub fn with_shared_state(
        shared: SharedState<T>,
        player_id: impl Into<PlayerId>,
    ) -> Result<GameState<T>, GameError> {
        let player_id = player_id.into();
        let placements = shared
            .tiles_state()
            .get_tiles(&player_id)?
            .iter()
            .enumerate()
            .map(|(slot, tile)| TilePlacement {
                location: Location::Rack(slot),
                tile: tile.clone(),
                assigned_letter: None,
            })
            .collect();

        Ok(GameState::from_parts(
            player_id,
            shared,
            placements,
            UrlParams::new(),
            Vec::new(),
        ))
    }

    fn from_parts(
        player_id: PlayerId,
        shared: SharedState<T>,
        placements: Vec<TilePlacement>,
        pending_params: UrlParams,
        history: Vec<Turn>,
    ) -> GameState<T> {
        GameState {
            player_id,
            shared,
            placements,
            pending_params,
            history,
            committing: Arc::new(AtomicBool::new(false)),
            listeners: Listeners::default(),
        }
    }

    /// The local player.
    #[inline]
    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    /// The state every player agrees on.
    #[inline]
    pub fn shared_state(&self) -> &SharedState<T> {
        &self.shared
    }

    /// The [settings](Settings) of the game.
    #[inline]
    pub fn settings(&self) -> &Settings {
        self.shared.settings()
    }

    /// The committed [board](Board).
    #[inline]
    pub fn board(&self) -> &Board {
        self.shared.board()
    }

    /// Every [tile](Tile) of the player's rack and where it is staged.
    #[inline]
    pub fn placements(&self) -> &[TilePlacement] {
        &self.placements
    }

    /// # Returns
    ///
    /// The [tile](Tile) in each rack slot, [None] for an empty slot.
    pub fn rack(&self) -> Vec<Option<&Tile>> {
        self.slots(Location::Rack)
    }

    /// # Returns
    ///
    /// The [tile](Tile) in each exchange slot, [None] for an empty slot.
    pub fn exchange_area(&self) -> Vec<Option<&Tile>> {
        self.slots(Location::Exchange)
    }

    fn slots(&self, slot: fn(usize) -> Location) -> Vec<Option<&Tile>> {
        (0..self.settings().rack_size)
            .map(|index| self.tile_at(slot(index)))
            .collect()
    }

    /// # Returns
    ///
    /// The [tile](Tile) staged at `location`.
    pub fn tile_at(&self, location: Location) -> Option<&Tile> {
        self.placements
            .iter()
            .find(|placement| placement.location == location)
            .map(|placement| &placement.tile)
    }

    /// # Returns
    ///
    /// The [tiles](Tile) staged on the board as the play they would make.
    pub fn staged_play(&self) -> Vec<BoardPlacement> {
        self.placements
            .iter()
            .filter_map(|placement| match placement.location {
                Location::Board { row, col } => Some(BoardPlacement {
                    row,
                    col,
                    tile: placement.tile.clone(),
                    assigned_letter: placement.assigned_letter.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    /// The turns this player has seen applied, oldest first.
    #[inline]
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Parameters waiting to be sent to the other players with the next turn URL.
    #[inline]
    pub fn pending_params(&self) -> &UrlParams {
        &self.pending_params
    }

    /// Whether the next turn belongs to the local player.
    pub fn is_my_turn(&self) -> bool {
        self.shared
            .current_player()
            .map_or(false, |player| player.id == self.player_id)
    }

    /// Whether the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.shared.is_game_over()
    }

    /// # Returns
    ///
    /// A receiver of every [event](GameEvent) emitted from now on. Dropping it unsubscribes.
    pub fn subscribe(&mut self) -> UnboundedReceiver<GameEvent> {
        self.listeners.subscribe()
    }

    fn emit(&mut self, event: GameEvent) {
        self.listeners.emit(event);
    }
}
