use crate::{
    Move, PlayerId, Rack, RackLens, Racks, Settings, Tile, TileBag, TileBagError, TilesError,
    TilesEvent, TilesState, Turn,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Keeps the bag and the racks on every player's device and trusts every player to only look at
/// their own rack.
///
/// Every device holds an identical copy. Applying the same [turns](Turn) in the same order keeps
/// the copies identical, since the bag draws with a seeded [Prng](crate::Prng).
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HonorTilesState {
    players: Vec<PlayerId>,
    racks: Racks,
    bag: TileBag,
    rack_size: usize,
}

impl HonorTilesState {
    /// Fills the bag with every [tile](Tile) of `settings`, shuffles it once, and then draws
    /// a full rack for each player in player order.
    ///
    /// # Errors
    ///
    /// * [`TilesError::DuplicatePlayer`] Two players share an id.
    /// * [`TilesError::Bag`] The bag cannot fill every rack.
    ///
    /// # Returns
    ///
    /// A [`HonorTilesState`] at the start of the game.
    pub fn new(settings: &Settings) -> Result<HonorTilesState, TilesError> {
        let mut seen = HashSet::with_capacity(settings.player_count());
        if let Some(player) = settings.players.iter().find(|player| !seen.insert(&player.id)) {
            return Err(TilesError::DuplicatePlayer(player.id.clone()));
        }

        let mut bag = TileBag::new(settings.tiles(), settings.seed_state());
        bag.shuffle();

        let mut racks = Racks::with_capacity(settings.player_count());
        for _ in &settings.players {
            racks.push(bag.draw(settings.rack_size)?.into_iter().collect());
        }

        Ok(HonorTilesState {
            players: settings.players.iter().map(|player| player.id.clone()).collect(),
            racks,
            bag,
            rack_size: settings.rack_size,
        })
    }

    /// The bag.
    #[inline]
    pub fn bag(&self) -> &TileBag {
        &self.bag
    }

    /// The racks in player order.
    #[inline]
    pub fn racks(&self) -> &Racks {
        &self.racks
    }

    fn player_index(&self, player: &str) -> Result<usize, TilesError> {
        self.players
            .iter()
            .position(|id| id == player)
            .ok_or_else(|| TilesError::UnknownPlayer(player.to_owned()))
    }

    /// Applies one turn that already passed [`TilesState::check_turn`].
    fn play_turn(&mut self, turn: &Turn) -> Result<Vec<TilesEvent>, TilesError> {
        let index = self.player_index(&turn.player_id)?;
        let player_id = turn.player_id.clone();
        let mut events = Vec::with_capacity(2);

        match &turn.action {
            Move::PlayTiles(placements) => {
                let rack = &mut self.racks[index];
                let mut played = Vec::with_capacity(placements.len());
                for placement in placements {
                    let position = rack
                        .iter()
                        .position(|tile| *tile == placement.tile)
                        .ok_or_else(|| TilesError::TileNotInRack {
                            player: player_id.clone(),
                            tile: placement.tile.clone(),
                        })?;
                    played.push(rack.remove(position));
                }
                events.push(TilesEvent::Played {
                    player_id: player_id.clone(),
                    tiles: played,
                });

                let missing = self.rack_size.saturating_sub(self.racks[index].len());
                let drawn = self.bag.draw(missing.min(self.bag.len()))?;
                self.racks[index].extend(drawn.iter().cloned());
                if !drawn.is_empty() {
                    events.push(TilesEvent::Drawn {
                        player_id,
                        tiles: drawn,
                    });
                }
            }
            Move::ExchangeTileIndices(indices) if indices.is_empty() => {}
            Move::ExchangeTileIndices(indices) => {
                let rack = &mut self.racks[index];
                let returned: Vec<Tile> = indices.iter().map(|&i| rack[i].clone()).collect();
                let mut descending = indices.clone();
                descending.sort_unstable_by(|a, b| b.cmp(a));
                for i in descending {
                    rack.remove(i);
                }

                let drawn = self.bag.exchange(returned.clone())?;
                self.racks[index].extend(drawn.iter().cloned());
                events.push(TilesEvent::Returned {
                    player_id: player_id.clone(),
                    tiles: returned,
                });
                events.push(TilesEvent::Drawn {
                    player_id,
                    tiles: drawn,
                });
            }
            Move::PlayWord(_) => return Err(TilesError::UnresolvedWord(turn.turn_number)),
        }

        Ok(events)
    }
}

impl TilesState for HonorTilesState {
    fn get_tiles(&self, player: &str) -> Result<&Rack, TilesError> {
        let index = self.player_index(player)?;
        Ok(&self.racks[index])
    }

    fn count_tiles(&self) -> RackLens {
        self.racks.iter().map(|rack| rack.len()).collect()
    }

    #[inline]
    fn bag_len(&self) -> usize {
        self.bag.len()
    }

    #[inline]
    fn rack_size(&self) -> usize {
        self.rack_size
    }

    fn check_turn(&self, turn: &Turn) -> Result<(), TilesError> {
        let rack = self.get_tiles(&turn.player_id)?;

        match &turn.action {
            Move::PlayTiles(placements) => {
                let mut remaining: Vec<&Tile> = rack.iter().collect();
                for placement in placements {
                    let position = remaining
                        .iter()
                        .position(|&tile| *tile == placement.tile)
                        .ok_or_else(|| TilesError::TileNotInRack {
                            player: turn.player_id.clone(),
                            tile: placement.tile.clone(),
                        })?;
                    remaining.swap_remove(position);
                }
            }
            Move::ExchangeTileIndices(indices) => {
                let mut seen = HashSet::with_capacity(indices.len());
                for &index in indices {
                    if index >= rack.len() {
                        return Err(TilesError::ExchangeIndexOutOfRange {
                            player: turn.player_id.clone(),
                            index,
                            rack_len: rack.len(),
                        });
                    }
                    if !seen.insert(index) {
                        return Err(TilesError::DuplicateExchangeIndex(index));
                    }
                }
                if indices.len() > self.bag.len() {
                    return Err(TileBagError::OutOfRange {
                        requested: indices.len(),
                        available: self.bag.len(),
                    }
                    .into());
                }
            }
            Move::PlayWord(_) => return Err(TilesError::UnresolvedWord(turn.turn_number)),
        }

        Ok(())
    }

    fn play_turns(&mut self, turns: &[Turn]) -> Result<Vec<TilesEvent>, TilesError> {
        let mut next = self.clone();
        let mut events = Vec::with_capacity(turns.len() * 2);
        for turn in turns {
            next.check_turn(turn)?;
            events.extend(next.play_turn(turn)?);
        }

        debug!(
            turns = turns.len(),
            bag_len = next.bag.len(),
            "applied turns to racks"
        );
        *self = next;
        Ok(events)
    }

    fn is_game_over(&self) -> bool {
        self.bag.is_empty() && self.racks.iter().any(|rack| rack.is_empty())
    }
}
