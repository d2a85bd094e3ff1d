use super::*;
use crate::{
    decode_turn_url, encode_turn_url, parse_query_string, player_name_param, to_fragment_url,
    to_query_string, AppliedTurns,
};
use tracing::{debug, info};
use url::Url;

impl GameState<HonorTilesState> {
    /// Joins the game of a turn URL received from another player and applies its turns.
    ///
    /// # Arguments
    ///
    /// * `query`: The turn URL, its fragment, or its query string.
    /// * `player_id`: The local player.
    /// * `dictionary`: Checks the words formed by every play.
    ///
    /// # Errors
    ///
    /// * [`GameError::Wire`] The turn URL could not be read.
    /// * [`GameError::Settings`] The settings of the turn URL cannot start a game.
    /// * [`GameError::Tiles`] `player_id` is not part of the game.
    /// * [`GameError::Turn`] A turn of the URL was rejected.
    ///
    /// # Returns
    ///
    /// The [`GameState`] after the turns of the URL.
    pub async fn join_from_url(
        query: &str,
        player_id: impl Into<PlayerId>,
        dictionary: Arc<dyn Dictionary>,
    ) -> Result<GameState<HonorTilesState>, GameError> {
        let turn_url = decode_turn_url(&parse_query_string(query))?;
        let mut game_state =
            GameState::new(turn_url.game_id, turn_url.settings, player_id, dictionary)?;
        game_state.commit(turn_url.turns).await?;

        info!(
            game_id = %game_state.shared.game_id(),
            player_id = %game_state.player_id,
            next_turn_number = game_state.shared.next_turn_number(),
            "joined game"
        );
        Ok(game_state)
    }
}

impl<T: TilesState> GameState<T> {
    /// Applies a turn URL received from another player: every turn that was not applied yet,
    /// then the player names. Nothing changes when a turn is rejected. A name the local player
    /// changed and has not sent yet is kept.
    ///
    /// # Arguments
    ///
    /// * `query`: The turn URL, its fragment, or its query string.
    ///
    /// # Errors
    ///
    /// * [`GameError::Wire`] The turn URL could not be read.
    /// * [`GameError::GameIdMismatch`] The turn URL belongs to another game.
    /// * [`GameError::Turn`] A turn was rejected. No turn of the URL is applied.
    /// * [`GameError::CommitInProgress`] Another commit is in flight.
    /// * [`GameError::Reconcile`] The staged [tiles](Tile) could not follow the new rack.
    ///
    /// # Returns
    ///
    /// The turns that were applied, possibly none.
    pub async fn apply_turn_url(&mut self, query: &str) -> Result<AppliedTurns, GameError> {
        let turn_url = decode_turn_url(&parse_query_string(query))?;
        if turn_url.game_id != self.shared.game_id() {
            return Err(GameError::GameIdMismatch {
                expected: self.shared.game_id().to_owned(),
                found: turn_url.game_id,
            });
        }

        let before = self.shared.next_turn_number();
        let applied = self.commit(turn_url.turns).await?;

        for (index, player) in turn_url.settings.players.iter().enumerate() {
            let own_pending = player.id == self.player_id
                && self
                    .pending_params
                    .iter()
                    .any(|(name, _)| *name == player_name_param(index + 1));
            if !own_pending && self.shared.rename_player(&player.id, &player.name) {
                self.emit(GameEvent::PlayerNameChanged {
                    player_id: player.id.clone(),
                    name: player.name.clone(),
                });
            }
        }
        if self.shared.next_turn_number() > before && !self.pending_params.is_empty() {
            debug!(pending = self.pending_params.len(), "cleared sent parameters");
            self.pending_params.clear();
        }

        Ok(applied)
    }

    /// Changes the local player's name. The change is sent with the next turn URL.
    ///
    /// # Returns
    ///
    /// Whether the name changed.
    pub fn change_player_name(&mut self, name: &str) -> bool {
        let Some(index) = self.settings().player_index(&self.player_id) else {
            return false;
        };
        let player_id = self.player_id.clone();
        if !self.shared.rename_player(&player_id, name) {
            return false;
        }

        let param = player_name_param(index + 1);
        match self.pending_params.iter_mut().find(|(key, _)| *key == param) {
            Some((_, value)) => *value = name.to_owned(),
            None => self.pending_params.push((param, name.to_owned())),
        }
        self.emit(GameEvent::PlayerNameChanged {
            player_id,
            name: name.to_owned(),
        });

        true
    }

    /// Renders the turn URL to send to the other players: the game parameters, the pending
    /// parameters, and the last turn of every player, which is enough for each of them to
    /// catch up.
    ///
    /// # Errors
    ///
    /// * [`GameError::Wire`] A turn in the history has lost its word.
    ///
    /// # Returns
    ///
    /// The query string of the turn URL.
    pub fn turn_url(&self) -> Result<String, GameError> {
        Ok(to_query_string(&self.turn_params()?))
    }

    /// [Renders](GameState::turn_url) the turn URL as the fragment of `base`.
    ///
    /// # Errors
    ///
    /// * [`GameError::Wire`] `base` is not a URL or a turn has lost its word.
    pub fn share_url(&self, base: &str) -> Result<Url, GameError> {
        Ok(to_fragment_url(base, &self.turn_params()?)?)
    }

    fn turn_params(&self) -> Result<UrlParams, GameError> {
        let count = self.settings().player_count();
        let recent = &self.history[self.history.len().saturating_sub(count)..];
        let turn_number = recent
            .first()
            .map_or(self.shared.next_turn_number(), |turn| turn.turn_number);

        Ok(encode_turn_url(
            self.shared.game_id(),
            self.settings(),
            turn_number,
            recent,
            &self.pending_params,
        )?)
    }
}
