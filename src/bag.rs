use crate::{Prng, Tile, TileBagError};
use serde::{Deserialize, Serialize};

/// This is a bag of all the [tiles](Tile) that haven't been drawn yet, together with
/// the seeded [`Prng`] that decides which [tile](Tile) comes out next.
///
/// Every player holds an identical copy of the bag. As long as all copies see the same sequence
/// of [draws](TileBag::draw) and [exchanges](TileBag::exchange), they stay identical.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TileBag {
    tiles: Vec<Tile>,
    prng: Prng,
}

impl TileBag {
    /// # Arguments
    ///
    /// * `tiles`: The [tiles](Tile) in the bag in their initial order.
    /// * `seed`: The initial state of the [`Prng`].
    ///
    /// # Returns
    ///
    /// A [`TileBag`] holding `tiles`, not yet shuffled.
    pub fn new(tiles: Vec<Tile>, seed: u32) -> TileBag {
        TileBag {
            tiles,
            prng: Prng::new(seed),
        }
    }

    /// The number of [tiles](Tile) left in the bag.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no [tiles](Tile) are left in the bag.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The [tiles](Tile) left in the bag in their current order.
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The [`Prng`] of the bag.
    #[inline]
    pub fn prng(&self) -> Prng {
        self.prng
    }

    /// Reorders the bag by [drawing](TileBag::draw) every [tile](Tile) and putting them back in
    /// the order they were drawn.
    pub fn shuffle(&mut self) {
        let len = self.tiles.len();
        self.tiles = self.draw_unchecked(len);
    }

    /// Removes `count` [tiles](Tile) from the bag. Each [tile](Tile) is picked uniformly at
    /// random from the remaining [tiles](Tile), which is equivalent to `count` steps of
    /// a Fisher–Yates shuffle.
    ///
    /// # Errors
    ///
    /// * [`TileBagError::OutOfRange`] Attempting to draw more [tiles](Tile) than the bag holds.
    /// Neither the bag nor the [`Prng`] is changed.
    ///
    /// # Returns
    ///
    /// The drawn [tiles](Tile) in the order they were drawn.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Tile>, TileBagError> {
        self.check_range(count)?;
        Ok(self.draw_unchecked(count))
    }

    /// Draws as many [tiles](Tile) as [`TileBag::draw`] would, then inserts the returned
    /// [tiles](Tile) into the bag one at a time at random positions.
    ///
    /// # Arguments
    ///
    /// * `returned`: The [tiles](Tile) put back into the bag.
    ///
    /// # Errors
    ///
    /// * [`TileBagError::OutOfRange`] Attempting to return more [tiles](Tile) than the bag
    /// holds. Neither the bag nor the [`Prng`] is changed.
    ///
    /// # Returns
    ///
    /// The replacement [tiles](Tile) in the order they were drawn.
    pub fn exchange(&mut self, returned: Vec<Tile>) -> Result<Vec<Tile>, TileBagError> {
        self.check_range(returned.len())?;

        let drawn = self.draw_unchecked(returned.len());
        for tile in returned {
            let index = self.prng.next_index(self.tiles.len() + 1);
            self.tiles.insert(index, tile);
        }

        Ok(drawn)
    }

    fn check_range(&self, requested: usize) -> Result<(), TileBagError> {
        let available = self.tiles.len();
        if requested > available {
            return Err(TileBagError::OutOfRange {
                requested,
                available,
            });
        }

        Ok(())
    }

    fn draw_unchecked(&mut self, count: usize) -> Vec<Tile> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            let index = self.prng.next_index(self.tiles.len());
            drawn.push(self.tiles.remove(index));
        }

        drawn
    }
}
