use crate::{Coordinate, Location, PlayerId, Tile, Turn};
use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};

/// Something that changed in a [game state](crate::GameState) and may need to be shown.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GameEvent {
    /// A [tile](Tile) moved between [locations](Location). `from` is [None] for a tile drawn
    /// from the bag, `to` is [None] for a tile that left the player's possession.
    TileMoved {
        /// Where the [tile](Tile) was.
        from: Option<Location>,
        /// Where the [tile](Tile) is now.
        to: Option<Location>,
        /// The [tile](Tile) that moved.
        tile: Tile,
    },
    /// A turn was applied.
    TurnCompleted {
        /// The applied turn with its word and score.
        turn: Turn,
        /// The squares the turn placed [tiles](Tile) on.
        squares: Vec<Coordinate>,
    },
    /// A player changed their name.
    PlayerNameChanged {
        /// The player.
        player_id: PlayerId,
        /// The new name.
        name: String,
    },
    /// The state was restored after a failed commit. Anything shown may be stale.
    StateChanged,
}

/// The subscribers of one [game state](crate::GameState). Dropped receivers are forgotten on
/// the next event.
#[derive(Debug, Default)]
pub(crate) struct Listeners {
    senders: Vec<UnboundedSender<GameEvent>>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self) -> UnboundedReceiver<GameEvent> {
        let (sender, receiver) = unbounded();
        self.senders.push(sender);
        receiver
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.senders
            .retain(|sender| sender.unbounded_send(event.clone()).is_ok());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }
}
