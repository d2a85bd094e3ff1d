use super::*;
use crate::{from_json_strict, to_json_strict, SchemaError, SCHEMA_VERSION};
use itertools::Itertools;

/// The persisted form of a [game state](GameState). Keys are written in field order and
/// must be read back in the same order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct GameStateRecord<T> {
    schema_version: u32,
    game_id: String,
    player_id: PlayerId,
    settings: Settings,
    board: Board,
    tiles_state: T,
    next_turn_number: u32,
    placements: Vec<TilePlacement>,
    pending_params: UrlParams,
    history: Vec<Turn>,
}

impl<T: TilesState> GameState<T> {
    /// Serializes everything but the dictionary and the subscribers.
    ///
    /// # Errors
    ///
    /// * [`GameError::Schema`] The state could not be serialized.
    ///
    /// # Returns
    ///
    /// A JSON record readable by [`GameState::from_json`].
    pub fn to_json(&self) -> Result<String, GameError> {
        let record = GameStateRecord {
            schema_version: SCHEMA_VERSION,
            game_id: self.shared.game_id().to_owned(),
            player_id: self.player_id.clone(),
            settings: self.settings().clone(),
            board: self.board().clone(),
            tiles_state: self.shared.tiles_state().clone(),
            next_turn_number: self.shared.next_turn_number(),
            placements: self.placements.clone(),
            pending_params: self.pending_params.clone(),
            history: self.history.clone(),
        };

        Ok(to_json_strict(&record)?)
    }

    /// Reads a record written by [`GameState::to_json`].
    ///
    /// # Arguments
    ///
    /// * `json`: The record.
    /// * `dictionary`: Checks the words formed by every play from now on.
    ///
    /// # Errors
    ///
    /// * [`GameError::Schema`] The record is malformed, has missing, extra, or reordered keys,
    /// was written by another schema version, or describes an impossible game.
    ///
    /// # Returns
    ///
    /// The [`GameState`] with no subscribers.
    pub fn from_json(
        json: &str,
        dictionary: Arc<dyn Dictionary>,
    ) -> Result<GameState<T>, GameError> {
        let record: GameStateRecord<T> = from_json_strict(json)?;
        if record.schema_version != SCHEMA_VERSION {
            return Err(SchemaError::Version {
                expected: SCHEMA_VERSION,
                found: record.schema_version,
            }
            .into());
        }
        check_record(&record)?;

        let shared = SharedState::from_parts(
            record.game_id,
            record.settings,
            record.board,
            record.tiles_state,
            record.next_turn_number,
            dictionary,
        );

        Ok(GameState::from_parts(
            record.player_id,
            shared,
            record.placements,
            record.pending_params,
            record.history,
        ))
    }
}

fn check_record<T: TilesState>(record: &GameStateRecord<T>) -> Result<(), SchemaError> {
    if record.next_turn_number == 0 {
        return Err(SchemaError::Inconsistent("turns are numbered from 1".to_owned()));
    }
    let rack = record
        .tiles_state
        .get_tiles(&record.player_id)
        .map_err(|error| SchemaError::Inconsistent(error.to_string()))?;
    let staged = record
        .placements
        .iter()
        .map(|placement| &placement.tile)
        .counts();
    if staged != rack.iter().counts() {
        return Err(SchemaError::Inconsistent(
            "the staged tiles do not match the rack".to_owned(),
        ));
    }
    if !record.placements.iter().map(|placement| placement.location).all_unique() {
        return Err(SchemaError::Inconsistent(
            "two tiles are staged at the same location".to_owned(),
        ));
    }

    Ok(())
}
