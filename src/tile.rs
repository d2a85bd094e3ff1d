use serde::{Deserialize, Serialize};
use std::fmt;

/// Describes a tile with a letter and a point value. An empty letter is a blank, which is worth
/// `0` points and takes the letter assigned to it when it is placed on the board.
///
/// Tiles are never mutated after they are created. Moves relocate tiles between the
/// [bag](crate::TileBag), the [racks](crate::Rack), and the [board](crate::Board).
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tile {
    letter: String,
    value: u32,
}

impl Tile {
    /// # Arguments
    ///
    /// * `letter`: One or more characters printed on the tile, or an empty string for a blank.
    /// * `value`: The points earned by the tile before bonuses.
    ///
    /// # Returns
    ///
    /// A new [`Tile`].
    pub fn new(letter: impl Into<String>, value: u32) -> Tile {
        Tile {
            letter: letter.into(),
            value,
        }
    }

    /// # Returns
    ///
    /// A blank [`Tile`] worth `0` points.
    pub fn blank() -> Tile {
        Tile::new("", 0)
    }

    /// The letter printed on the tile, empty for a blank.
    #[inline]
    pub fn letter(&self) -> &str {
        &self.letter
    }

    /// The points earned by the tile before bonuses.
    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Whether the tile is a blank.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.letter.is_empty()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            write!(f, "_")
        } else {
            write!(f, "{}{}", self.letter, self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_json_strict;

    #[test]
    fn blank() {
        let blank = Tile::blank();

        assert!(blank.is_blank());
        assert_eq!("", blank.letter());
        assert_eq!(0, blank.value());
    }

    #[test]
    fn not_blank() {
        let tile = Tile::new("QU", 10);

        assert!(!tile.is_blank());
        assert_eq!("QU", tile.letter());
        assert_eq!(10, tile.value());
    }

    #[test]
    fn display() {
        assert_eq!("A1", Tile::new("A", 1).to_string());
        assert_eq!("_", Tile::blank().to_string());
    }

    #[test]
    fn json_round_trip() {
        let tile = Tile::new("Z", 10);

        let json = serde_json::to_string(&tile).unwrap();

        assert_eq!(r#"{"letter":"Z","value":10}"#, json);
        assert_eq!(tile, from_json_strict::<Tile>(&json).unwrap());
    }

    #[test]
    fn json_rejects_reordered_keys() {
        assert!(from_json_strict::<Tile>(r#"{"value":10,"letter":"Z"}"#).is_err());
    }

    #[test]
    fn json_rejects_extra_and_missing_keys() {
        assert!(from_json_strict::<Tile>(r#"{"letter":"Z","value":10,"x":1}"#).is_err());
        assert!(from_json_strict::<Tile>(r#"{"letter":"Z"}"#).is_err());
        assert!(from_json_strict::<Tile>(r#"{"letter":"Z","value":"10"}"#).is_err());
    }
}
