use crate::{Bonus, LetterSpec, Settings, Turn, PLAYER_CAPACITY};
use rand::distributions::{Alphanumeric, Distribution, Standard, Uniform};
use rand::seq::index;
use rand::Rng;

impl Distribution<Bonus> for Standard {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Bonus {
        let index = rng.gen_range(0..Bonus::BONUSES_LEN);
        num::FromPrimitive::from_usize(index).unwrap_or_else(|| {
            unreachable!(
                "index ({index}) should be matched since bonuses cover all indexes in range \
                0..Bonus::BONUSES_LEN (0..{}).",
                Bonus::BONUSES_LEN
            )
        })
    }
}

/// A board layout of a random, small, odd number of rows and columns with random bonuses.
pub fn random_layout<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let rows = 2 * rng.gen_range(2..8) + 1;
    let cols = 2 * rng.gen_range(2..8) + 1;

    (0..rows)
        .map(|_| (0..cols).map(|_| rng.gen::<Bonus>().to_char()).collect())
        .collect()
}

/// A random, small, non-zero number of distinct upper case letters, each with a random count
/// and value.
pub fn random_letters<R: Rng + ?Sized>(rng: &mut R) -> Vec<LetterSpec> {
    let letters_len = rng.gen_range(3..10);
    let counts = Uniform::from(1..6);
    let values = Uniform::from(0..11);

    index::sample(rng, 26, letters_len)
        .into_iter()
        .map(|letter| {
            LetterSpec::new(
                char::from(b'A' + letter as u8),
                counts.sample(rng),
                values.sample(rng),
            )
        })
        .collect()
}

/// Valid [settings](Settings) with a random number of players, layout, letters, rack size, and
/// seed. The bag always holds enough [tiles](crate::Tile) for the opening racks.
pub fn random_settings<R: Rng + ?Sized>(rng: &mut R) -> Settings {
    let players = rng.gen_range(2..=PLAYER_CAPACITY);
    let rack_size = rng.gen_range(1..=7);
    let mut letters = random_letters(rng);
    letters.push(LetterSpec::new("", players * rack_size, 0));

    Settings {
        players: crate::default_players(players),
        board: random_layout(rng),
        letters,
        rack_size,
        seed: (0..8).map(|_| char::from(rng.sample(Alphanumeric))).collect(),
        ..Settings::default()
    }
}

/// Passes and exchanges of random rack indexes for `turns` turns starting at turn `1`. Every
/// exchange returns fewer [tiles](crate::Tile) than `rack_size`.
pub fn random_exchanges<R: Rng + ?Sized>(
    rng: &mut R,
    settings: &Settings,
    turns: u32,
) -> Vec<Turn> {
    (1..=turns)
        .map(|turn_number| {
            let player = &settings.players[(turn_number as usize - 1) % settings.player_count()];
            let amount = rng.gen_range(0..settings.rack_size);
            let indices = index::sample(rng, settings.rack_size, amount).into_vec();
            Turn::exchange(player.id.clone(), turn_number, indices)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;
    use itertools::Itertools;

    #[test]
    fn random_bonuses_cover_every_bonus() {
        let mut rng = rand::thread_rng();

        let bonuses = (0..1000).map(|_| rng.gen::<Bonus>()).unique().count();

        assert_eq!(Bonus::BONUSES_LEN, bonuses);
    }

    #[test]
    fn random_layout_parses() {
        let mut rng = rand::thread_rng();

        for _ in 0..20 {
            let layout = random_layout(&mut rng);
            let board = Board::new(&layout, &crate::default_players(2)).unwrap();

            assert_eq!(layout.len(), board.rows());
            assert_eq!(layout[0].len(), board.cols());
            for (row, squares) in board.squares().iter().enumerate() {
                let rendered: String = squares.iter().map(|s| s.bonus().to_char()).collect();
                assert_eq!(layout[row], rendered);
            }
        }
    }

    #[test]
    fn random_settings_are_valid() {
        let mut rng = rand::thread_rng();

        for _ in 0..20 {
            let settings = random_settings(&mut rng);

            assert_eq!(Ok(()), settings.check());
        }
    }

    #[test]
    fn random_exchanges_stay_in_the_rack() {
        let mut rng = rand::thread_rng();
        let settings = random_settings(&mut rng);

        for turn in random_exchanges(&mut rng, &settings, 10) {
            let crate::Move::ExchangeTileIndices(indices) = turn.action else {
                panic!("not an exchange: {turn:?}");
            };
            assert!(indices.len() < settings.rack_size);
            assert!(indices.iter().all(|&index| index < settings.rack_size));
            assert!(indices.iter().all_unique());
        }
    }
}
