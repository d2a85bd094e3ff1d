use crate::{
    Board, Dictionary, GameError, HonorTilesState, Player, PlayerId, Settings, TilesState,
};
pub use play_turns::*;
use std::sync::Arc;

mod play_turns;

/// The canonical game: [settings](Settings), [board](Board), [tiles](TilesState), and the number
/// of the next turn. Every player holds a copy, and the copies stay identical because they apply
/// the same [turns](crate::Turn) in the same order through [`SharedState::play_turns`], the only
/// way to change the board or the tiles.
#[derive(Debug, Clone)]
pub struct SharedState<T: TilesState = HonorTilesState> {
    game_id: String,
    settings: Settings,
    board: Board,
    tiles_state: T,
    next_turn_number: u32,
    dictionary: Arc<dyn Dictionary>,
}

impl SharedState<HonorTilesState> {
    /// Starts a game on the [honor system](HonorTilesState).
    ///
    /// # Arguments
    ///
    /// * `game_id`: The identifier shared by every player of the game.
    /// * `settings`: The [settings](Settings) of the game.
    /// * `dictionary`: Checks the words formed by every play.
    ///
    /// # Errors
    ///
    /// * [`GameError::Settings`] The settings cannot start a game.
    /// * [`GameError::Tiles`] The racks cannot be dealt.
    ///
    /// # Returns
    ///
    /// A [`SharedState`] before turn `1`.
    pub fn new(
        game_id: impl Into<String>,
        settings: Settings,
        dictionary: Arc<dyn Dictionary>,
    ) -> Result<SharedState<HonorTilesState>, GameError> {
        settings.check().map_err(GameError::Settings)?;
        let tiles_state = HonorTilesState::new(&settings)?;
        SharedState::with_tiles_state(game_id, settings, tiles_state, dictionary)
    }
}

impl<T: TilesState> SharedState<T> {
    /// Starts a game with an existing [tiles state](TilesState).
    ///
    /// # Errors
    ///
    /// * [`GameError::Settings`] The settings cannot start a game.
    ///
    /// # Returns
    ///
    /// A [`SharedState`] before turn `1`.
    pub fn with_tiles_state(
        game_id: impl Into<String>,
        settings: Settings,
        tiles_state: T,
        dictionary: Arc<dyn Dictionary>,
    ) -> Result<SharedState<T>, GameError> {
        settings.check().map_err(GameError::Settings)?;
        let board = Board::new(&settings.board, &settings.players)
            .map_err(|error| GameError::Settings([error].into()))?;

        Ok(SharedState::from_parts(
            game_id.into(),
            settings,
            board,
            tiles_state,
            1,
            dictionary,
        ))
    }

    /// Reassembles a [`SharedState`] from persisted parts without checking them.
    pub(crate) fn from_parts(
        game_id: String,
        settings: Settings,
        board: Board,
        tiles_state: T,
        next_turn_number: u32,
        dictionary: Arc<dyn Dictionary>,
    ) -> SharedState<T> {
        SharedState {
            game_id,
            settings,
            board,
            tiles_state,
            next_turn_number,
            dictionary,
        }
    }

    /// The identifier shared by every player of the game.
    #[inline]
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    /// The [settings](Settings) of the game.
    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The [board](Board) with its scores.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The bag and the racks.
    #[inline]
    pub fn tiles_state(&self) -> &T {
        &self.tiles_state
    }

    /// The number of the turn to be played next. `1` before the first turn.
    #[inline]
    pub fn next_turn_number(&self) -> u32 {
        self.next_turn_number
    }

    /// The dictionary checking every play.
    #[inline]
    pub fn dictionary(&self) -> &Arc<dyn Dictionary> {
        &self.dictionary
    }

    /// # Returns
    ///
    /// The player who owns turn `turn_number`, cycling through the players in order starting
    /// with the first player at turn `1`.
    pub fn player_for(&self, turn_number: u32) -> Option<&Player> {
        let count = self.settings.player_count();
        if count == 0 {
            return None;
        }
        let index = (turn_number.saturating_sub(1) as usize) % count;
        self.settings.players.get(index)
    }

    /// The player who owns the next turn.
    pub fn current_player(&self) -> Option<&Player> {
        self.player_for(self.next_turn_number)
    }

    /// Whether the bag is empty and some player has no [tiles](crate::Tile) left.
    pub fn is_game_over(&self) -> bool {
        self.tiles_state.is_game_over()
    }

    /// Changes the name of `player_id`. Names are not part of the game rules, so this is the
    /// one change that does not go through a [turn](crate::Turn).
    ///
    /// # Returns
    ///
    /// Whether the name changed. `false` when the player is unknown or already has `name`.
    pub fn rename_player(&mut self, player_id: &PlayerId, name: &str) -> bool {
        match self
            .settings
            .players
            .iter_mut()
            .find(|player| player.id == *player_id)
        {
            Some(player) if player.name != name => {
                player.name = name.to_owned();
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PermissiveDictionary, SettingsError};

    fn shared_state() -> SharedState {
        SharedState::new("game", Settings::small(), Arc::new(PermissiveDictionary)).unwrap()
    }

    #[test]
    fn new() {
        let shared_state = shared_state();

        assert_eq!("game", shared_state.game_id());
        assert_eq!(1, shared_state.next_turn_number());
        assert_eq!("1", shared_state.current_player().unwrap().id);
        assert_eq!(0, shared_state.board().tile_count());
        assert_eq!(3, shared_state.tiles_state().bag_len());
        assert!(!shared_state.is_game_over());
    }

    #[test]
    fn new_invalid_settings() {
        let settings = Settings {
            rack_size: 0,
            ..Settings::small()
        };

        match SharedState::new("game", settings, Arc::new(PermissiveDictionary)) {
            Err(GameError::Settings(errors)) => {
                assert!(errors.contains(&SettingsError::EmptyRacks))
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn player_for_cycles() {
        let shared_state = shared_state();

        assert_eq!("1", shared_state.player_for(1).unwrap().id);
        assert_eq!("2", shared_state.player_for(2).unwrap().id);
        assert_eq!("1", shared_state.player_for(3).unwrap().id);
        assert_eq!("2", shared_state.player_for(10).unwrap().id);
    }

    #[test]
    fn rename_player() {
        let mut shared_state = shared_state();

        assert!(shared_state.rename_player(&"2".to_owned(), "Ada"));
        assert!(!shared_state.rename_player(&"2".to_owned(), "Ada"));
        assert!(!shared_state.rename_player(&"3".to_owned(), "Bob"));
        assert_eq!("Ada", shared_state.settings().players[1].name);
    }
}
