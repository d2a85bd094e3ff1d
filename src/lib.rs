//! Deterministic rules of a turn-based crossword game played without a server, where players
//! take turns by sending each other turn URLs.
//!
//! ## Summary
//!
//! Every player keeps their own copy of the game. A turn URL carries the settings of the game and
//! the most recent turns, so applying it to any copy replays exactly what the sender did.
//! Copies stay identical because the bag is shuffled and drawn from by a [seeded
//! generator](Prng) and every turn is checked with the same rules in the same order.
//!
//! ## What are the layers of the game?
//!
//! * [Board]: The grid of [squares](Square) with [bonuses](Bonus). Checks where words may be
//! placed and scores them.
//! * [TilesState]: The bag and the racks of every player. [HonorTilesState] keeps everything on
//! every device and trusts each player to only look at their own rack.
//! * [SharedState]: What every player agrees on. Validates [turns](Turn) against the board,
//! the racks, and the [dictionary](Dictionary) and applies them all or not at all.
//! * [GameState]: The view of one player. Adds the [tiles](Tile) they are arranging, the turns
//! they know about, and the names they changed but have not sent yet.
//!
//! ## How is the game created?
//!
//! [GameState::new] starts a game from [Settings] for the local player.
//! [GameState::join_from_url] starts the same game from a turn URL sent by another player.
//!
//! ## How is the game advanced?
//!
//! The local player arranges [tiles](Tile) with [GameState::move_tile] on the board, in the rack,
//! or in the exchange area, and then either [plays a word](GameState::play_word) or
//! [passes or exchanges](GameState::pass_or_exchange) [tiles](Tile). Turns of the other players
//! arrive with [GameState::apply_turn_url]. Turns that were already applied are skipped, so the
//! same URL can be applied more than once.
//!
//! A commit validates every turn first. When any turn is rejected, the [GameState] is restored
//! to what it was before the commit and subscribers are told with [GameEvent::StateChanged].
//!
//! ## How are turns sent?
//!
//! [GameState::turn_url] and [GameState::share_url] render the game parameters and the last turn
//! of every player with [encode_turn_url]. [decode_turn_url] reads them back.
//!
//! ## How are words scored?
//!
//! Each word formed by a play scores the sum of its letter values with letter bonuses of newly
//! covered [squares](Square) applied, multiplied by the word bonuses of newly covered
//! [squares](Square). Playing every [tile](Tile) of a full rack earns the bingo bonus of the
//! [Settings].
//!
//! ## How is the game ended?
//!
//! The game ends when the bag is empty and some player has emptied their rack.
//!
//! ## How is the game saved?
//!
//! [GameState::to_json] writes everything but the [dictionary](Dictionary) and the subscribers.
//! [GameState::from_json] reads it back and rejects records with missing, extra, or reordered
//! keys, as does [from_json_strict] for every persisted type.
//!
//! ## How are changes observed?
//!
//! [GameState::subscribe] returns a channel of [GameEvent]s for every [tile](Tile) that moves,
//! every completed turn, and every renamed player.

// Document!
#![forbid(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::bare_urls
)]
// Don't leave a build in a half finished state!
#![deny(
    warnings,
    future_incompatible,
    nonstandard_style,
    rust_2018_compatibility,
    rust_2018_idioms,
    rust_2021_compatibility,
    unused,
    single_use_lifetimes,
    unreachable_pub,
    missing_debug_implementations,
    unsafe_code
)]

pub use bag::*;
pub use board::*;
pub use codec::*;
pub use consts::*;
pub use coordinate::*;
pub use dictionary::*;
pub use error::*;
pub use events::GameEvent;
pub use game_state::*;
pub use persist::*;
pub use prng::*;
#[cfg(test)]
pub use random::*;
pub use settings::*;
pub use shared_state::*;
pub use tile::*;
pub use tiles_state::*;
pub use turn::*;
pub use types::*;

mod bag;
mod board;
mod codec;
mod consts;
mod coordinate;
mod dictionary;
mod error;
mod events;
mod game_state;
mod persist;
mod prng;
#[cfg(test)]
mod random;
mod settings;
mod shared_state;
mod tile;
mod tiles_state;
mod turn;
mod types;
