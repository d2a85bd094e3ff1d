use super::*;
use crate::{Dictionary, PermissiveDictionary};
use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;

impl GameState {
    /// A game of [small settings](Settings::small) played by `player_id`. Player `"1"` holds
    /// `AABA`, player `"2"` holds `BAAA`, and the bag holds `AAA`.
    pub fn small(player_id: &str) -> GameState {
        GameState::small_with(player_id, Arc::new(PermissiveDictionary))
    }

    /// [`GameState::small`] with another dictionary.
    pub fn small_with(player_id: &str, dictionary: Arc<dyn Dictionary>) -> GameState {
        GameState::new("game", Settings::small(), player_id, dictionary).unwrap()
    }

    /// Moves the tiles of `rack_slots` onto the squares of row `7` starting at column `col`.
    pub fn stage_row(&mut self, rack_slots: &[usize], col: usize) {
        for (offset, &slot) in rack_slots.iter().enumerate() {
            let to = Location::Board {
                row: 7,
                col: col + offset,
            };
            assert_eq!(to, self.move_tile(Location::Rack(slot), to, None).unwrap());
        }
    }
}

/// # Returns
///
/// Every event already sent to `receiver`.
pub fn drain_events(receiver: &mut UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Some(Some(event)) = futures::FutureExt::now_or_never(receiver.next()) {
        events.push(event);
    }
    events
}
