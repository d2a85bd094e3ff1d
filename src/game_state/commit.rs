use super::*;
use crate::{affected_squares, AppliedTurns, TilesEvent};
use itertools::Itertools;
use std::mem;
use std::sync::atomic::Ordering;
use tracing::{info, warn};

/// Marks a commit in flight. Dropping it, even with an abandoned commit future, clears the
/// mark.
struct CommitGuard(Arc<AtomicBool>);

impl CommitGuard {
    fn acquire(committing: &Arc<AtomicBool>) -> Option<CommitGuard> {
        committing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(CommitGuard(Arc::clone(committing)))
    }
}

impl Drop for CommitGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Everything a failed commit has to put back.
struct Snapshot<T: TilesState> {
    shared: SharedState<T>,
    placements: Vec<TilePlacement>,
    history: Vec<Turn>,
}

/// Staged [tiles](Tile) whose location is preferred when a rack change has to be matched,
/// best first.
const PLAYED_FROM: [fn(Location) -> bool; 3] = [Location::is_board, is_exchange, is_rack];
const RETURNED_FROM: [fn(Location) -> bool; 3] = [is_exchange, Location::is_board, is_rack];

fn is_exchange(location: Location) -> bool {
    matches!(location, Location::Exchange(_))
}

fn is_rack(location: Location) -> bool {
    matches!(location, Location::Rack(_))
}

impl<T: TilesState> GameState<T> {
    /// Plays the [tiles](Tile) staged on the board.
    ///
    /// # Errors
    ///
    /// * [`GameError::NotYourTurn`] The next turn belongs to another player.
    /// * [`GameError::NothingStaged`] No [tile](Tile) is staged on the board.
    /// * [`GameError::Turn`] The play broke the rules or the dictionary rejected a word.
    /// * [`GameError::CommitInProgress`] Another commit is in flight.
    /// * [`GameError::Reconcile`] The staged [tiles](Tile) could not follow the new rack.
    ///
    /// # Returns
    ///
    /// The applied turn with its word and score.
    pub async fn play_word(&mut self) -> Result<AppliedTurns, GameError> {
        let turn_number = self.check_my_turn()?;
        let placements = self.staged_play();
        if placements.is_empty() {
            return Err(GameError::NothingStaged);
        }

        let turn = Turn::play_tiles(self.player_id.clone(), turn_number, placements);
        self.commit(vec![turn]).await
    }

    /// Returns the [tiles](Tile) staged in the exchange area to the bag, or passes when the
    /// area is empty.
    ///
    /// # Errors
    ///
    /// * [`GameError::NotYourTurn`] The next turn belongs to another player.
    /// * [`GameError::Turn`] The bag holds fewer [tiles](Tile) than are exchanged.
    /// * [`GameError::CommitInProgress`] Another commit is in flight.
    /// * [`GameError::Reconcile`] The staged [tiles](Tile) could not follow the new rack.
    ///
    /// # Returns
    ///
    /// The applied turn.
    pub async fn pass_or_exchange(&mut self) -> Result<AppliedTurns, GameError> {
        let turn_number = self.check_my_turn()?;
        let indices = self.exchange_indices()?;

        let turn = Turn::exchange(self.player_id.clone(), turn_number, indices);
        self.commit(vec![turn]).await
    }

    fn check_my_turn(&self) -> Result<u32, GameError> {
        let current = self
            .shared
            .current_player()
            .map(|player| player.id.clone())
            .unwrap_or_default();
        if current != self.player_id {
            return Err(GameError::NotYourTurn(current));
        }

        Ok(self.shared.next_turn_number())
    }

    /// # Returns
    ///
    /// The rack indexes of the [tiles](Tile) in the exchange area in slot order. Equal
    /// [tiles](Tile) take the lowest indexes not yet taken.
    fn exchange_indices(&self) -> Result<Vec<usize>, GameError> {
        let rack = self.shared.tiles_state().get_tiles(&self.player_id)?;
        let mut taken = vec![false; rack.len()];

        self.placements
            .iter()
            .filter_map(|placement| match placement.location {
                Location::Exchange(slot) => Some((slot, &placement.tile)),
                _ => None,
            })
            .sorted_by_key(|&(slot, _)| slot)
            .map(|(_, tile)| {
                let index = (0..rack.len())
                    .find(|&index| !taken[index] && rack[index] == *tile)
                    .ok_or_else(|| {
                        GameError::Reconcile(format!("{tile:?} is staged but not in the rack"))
                    })?;
                taken[index] = true;
                Ok(index)
            })
            .collect()
    }

    /// Applies `turns` to the shared state and moves the staged [tiles](Tile) to follow the
    /// new rack. On failure everything is put back as it was and
    /// [`GameEvent::StateChanged`] is emitted.
    pub(super) async fn commit(&mut self, turns: Vec<Turn>) -> Result<AppliedTurns, GameError> {
        let _guard =
            CommitGuard::acquire(&self.committing).ok_or(GameError::CommitInProgress)?;
        let snapshot = Snapshot {
            shared: self.shared.clone(),
            placements: self.placements.clone(),
            history: self.history.clone(),
        };

        match self.try_commit(turns).await {
            Ok((applied, events)) => {
                for event in events {
                    self.emit(event);
                }
                Ok(applied)
            }
            Err(error) => {
                warn!(player_id = %self.player_id, %error, "commit failed, restoring state");
                self.shared = snapshot.shared;
                self.placements = snapshot.placements;
                self.history = snapshot.history;
                self.emit(GameEvent::StateChanged);
                Err(error)
            }
        }
    }

    async fn try_commit(
        &mut self,
        turns: Vec<Turn>,
    ) -> Result<(AppliedTurns, Vec<GameEvent>), GameError> {
        let applied = self.shared.play_turns(turns).await?;
        let mut events = self.reconcile(&applied.tile_events)?;

        self.history.extend(applied.turns.iter().cloned());
        events.extend(applied.turns.iter().map(|turn| GameEvent::TurnCompleted {
            turn: turn.clone(),
            squares: affected_squares(turn),
        }));
        if let Some(turn_number) = applied.last_turn_number() {
            info!(player_id = %self.player_id, turn_number, "committed turns");
        }

        Ok((applied, events))
    }

    /// Moves the staged [tiles](Tile) to follow the changes to the player's rack, and sends
    /// staged [tiles](Tile) whose square was taken back to the rack.
    fn reconcile(&mut self, tile_events: &[TilesEvent]) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();

        for tile_event in tile_events {
            if *tile_event.player_id() != self.player_id {
                continue;
            }
            match tile_event {
                TilesEvent::Played { tiles, .. } => {
                    for tile in tiles {
                        events.push(self.unstage(tile, &PLAYED_FROM)?);
                    }
                }
                TilesEvent::Returned { tiles, .. } => {
                    for tile in tiles {
                        events.push(self.unstage(tile, &RETURNED_FROM)?);
                    }
                }
                TilesEvent::Drawn { tiles, .. } => {
                    for tile in tiles {
                        events.push(self.stage_drawn(tile.clone())?);
                    }
                }
            }
        }

        for index in 0..self.placements.len() {
            let Location::Board { row, col } = self.placements[index].location else {
                continue;
            };
            if !self.board().is_occupied((row, col)) {
                continue;
            }
            let to = self.first_free_slot().ok_or_else(|| {
                GameError::Reconcile("no free slot for a displaced tile".to_owned())
            })?;
            let placement = &mut self.placements[index];
            let from = mem::replace(&mut placement.location, to);
            placement.assigned_letter = None;
            events.push(GameEvent::TileMoved {
                from: Some(from),
                to: Some(to),
                tile: placement.tile.clone(),
            });
        }

        let rack = self.shared.tiles_state().get_tiles(&self.player_id)?;
        let staged = self.placements.iter().map(|placement| &placement.tile).counts();
        if staged != rack.iter().counts() {
            return Err(GameError::Reconcile(format!(
                "staged {staged:?}, rack {rack:?}"
            )));
        }

        Ok(events)
    }

    /// Removes the staged `tile` found first by `preferences`.
    fn unstage(
        &mut self,
        tile: &Tile,
        preferences: &[fn(Location) -> bool],
    ) -> Result<GameEvent, GameError> {
        let index = preferences
            .iter()
            .find_map(|prefers| {
                self.placements.iter().position(|placement| {
                    placement.tile == *tile && prefers(placement.location)
                })
            })
            .ok_or_else(|| GameError::Reconcile(format!("{tile:?} left the rack unstaged")))?;
        let placement = self.placements.remove(index);

        Ok(GameEvent::TileMoved {
            from: Some(placement.location),
            to: None,
            tile: placement.tile,
        })
    }

    fn stage_drawn(&mut self, tile: Tile) -> Result<GameEvent, GameError> {
        let location = self
            .first_free_slot()
            .ok_or_else(|| GameError::Reconcile(format!("no free slot for {tile:?}")))?;
        self.placements.push(TilePlacement {
            location,
            tile: tile.clone(),
            assigned_letter: None,
        });

        Ok(GameEvent::TileMoved {
            from: None,
            to: Some(location),
            tile,
        })
    }
}
