//! # Digit Transition Table
//!
//! Every glyph is drawn from exactly [`TILES_PER_DIGIT`] square tiles laid out on a
//! 3×5 grid. A [`Transition`] pairs two such layouts: where each tile sits in the
//! lower digit (`source`) and where the same tile lands in the higher digit
//! (`destination`). Glyphs with fewer lit cells than tiles simply stack tiles on top
//! of each other, so the silhouette stays exact while tiles split apart or merge
//! during a morph.
//!
//! ## Table Coverage
//! Only ascending pairs are stored. Descending animations replay the same entry
//! backwards (see [`resolve`]). Present entries:
//! - `n → n+1` for `n` in `0..=8`: the ordinary one-step tick
//! - `0 → 2`, `0 → 3`, `0 → 5`, `0 → 9`: the roll-overs seen when a clock carries
//!   (`23 → 00`, `31 → 01`, `59 → 00`, `09 → 10`)
//!
//! Any other pair has no path and [`resolve`] falls back to a settled glyph.

use embedded_graphics::prelude::Point;

/// Number of tiles every digit glyph is built from.
pub const TILES_PER_DIGIT: usize = 14;

/// Width of a glyph in tiles.
pub const GLYPH_WIDTH: i32 = 3;

/// Height of a glyph in tiles.
pub const GLYPH_HEIGHT: i32 = 5;

/// Two tile layouts describing one morph, in tile units relative to the digit origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Tile positions forming the lower digit
    pub source: [Point; TILES_PER_DIGIT],
    /// Tile positions forming the higher digit
    pub destination: [Point; TILES_PER_DIGIT],
}

/// A transition together with the weights that blend its two layouts for one frame.
///
/// The weights always sum to the digit's tile size, so a blended offset lands on
/// pixel coordinates directly: `source * source_weight + destination * destination_weight`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blend {
    pub transition: &'static Transition,
    pub source_weight: i32,
    pub destination_weight: i32,
    /// True when no stored path existed and a settled glyph was substituted
    pub fallback: bool,
}

impl Blend {
    /// Pixel offset of tile `index` relative to the digit origin.
    pub fn tile_offset(&self, index: usize) -> Point {
        let src = self.transition.source[index];
        let dst = self.transition.destination[index];
        Point::new(
            self.source_weight * src.x + self.destination_weight * dst.x,
            self.source_weight * src.y + self.destination_weight * dst.y,
        )
    }
}

/// Look up the stored transition for an ascending pair of digit values.
///
/// Returns `None` for descending or identical pairs and for jumps the table
/// does not cover.
pub fn lookup(lower: u8, higher: u8) -> Option<&'static Transition> {
    match (lower, higher) {
        (0, 1) => Some(&ZERO_TO_ONE),
        (1, 2) => Some(&ONE_TO_TWO),
        (2, 3) => Some(&TWO_TO_THREE),
        (3, 4) => Some(&THREE_TO_FOUR),
        (4, 5) => Some(&FOUR_TO_FIVE),
        (5, 6) => Some(&FIVE_TO_SIX),
        (6, 7) => Some(&SIX_TO_SEVEN),
        (7, 8) => Some(&SEVEN_TO_EIGHT),
        (8, 9) => Some(&EIGHT_TO_NINE),
        (0, 2) => Some(&ZERO_TO_TWO),
        (0, 3) => Some(&ZERO_TO_THREE),
        (0, 5) => Some(&ZERO_TO_FIVE),
        (0, 9) => Some(&ZERO_TO_NINE),
        _ => None,
    }
}

/// Pick the transition and weights for a digit moving from `previous` to `value`
/// with `progress` frames of `tile_size` already shown.
///
/// Descending moves swap the endpoints and the weights so the ascending entry plays
/// in reverse. When no entry exists the digit is shown settled on `value`: for
/// `value < 9` through the source side of `value → value+1`, for `9` through the
/// destination side of `0 → 9`.
pub fn resolve(previous: u8, value: u8, progress: u8, tile_size: u8) -> Blend {
    let (mut lower, mut higher) = (previous, value);
    let mut destination_weight = i32::from(progress);
    let mut source_weight = i32::from(tile_size) - destination_weight;

    if higher < lower {
        std::mem::swap(&mut lower, &mut higher);
        std::mem::swap(&mut source_weight, &mut destination_weight);
    }

    if let Some(transition) = lookup(lower, higher) {
        return Blend {
            transition,
            source_weight,
            destination_weight,
            fallback: false,
        };
    }

    let full = i32::from(tile_size);
    match value {
        0..=8 => Blend {
            transition: step_up(value),
            source_weight: full,
            destination_weight: 0,
            fallback: true,
        },
        _ => Blend {
            transition: &ZERO_TO_NINE,
            source_weight: 0,
            destination_weight: full,
            fallback: true,
        },
    }
}

fn step_up(value: u8) -> &'static Transition {
    match value {
        0 => &ZERO_TO_ONE,
        1 => &ONE_TO_TWO,
        2 => &TWO_TO_THREE,
        3 => &THREE_TO_FOUR,
        4 => &FOUR_TO_FIVE,
        5 => &FIVE_TO_SIX,
        6 => &SIX_TO_SEVEN,
        7 => &SEVEN_TO_EIGHT,
        _ => &EIGHT_TO_NINE,
    }
}

const fn t(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

#[rustfmt::skip]
static ZERO_TO_ONE: Transition = Transition {
    source: [
        t(0, 0), t(1, 0), t(1, 0), t(2, 0), t(0, 1), t(0, 1), t(2, 1), t(0, 2), t(2, 2), t(0, 3), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
    destination: [
        t(1, 0), t(1, 0), t(1, 0), t(1, 0), t(0, 1), t(0, 1), t(1, 1), t(1, 2), t(1, 2), t(1, 3), t(2, 4), t(0, 4), t(1, 4), t(2, 4),
    ],
};

#[rustfmt::skip]
static ONE_TO_TWO: Transition = Transition {
    source: [
        t(1, 0), t(1, 0), t(1, 0), t(0, 1), t(0, 1), t(1, 1), t(1, 2), t(1, 2), t(1, 2), t(1, 3), t(0, 4), t(0, 4), t(1, 4), t(2, 4),
    ],
    destination: [
        t(1, 0), t(1, 0), t(2, 0), t(0, 0), t(0, 2), t(2, 1), t(1, 2), t(1, 2), t(2, 2), t(0, 3), t(0, 4), t(0, 4), t(1, 4), t(2, 4),
    ],
};

#[rustfmt::skip]
static TWO_TO_THREE: Transition = Transition {
    source: [
        t(0, 0), t(0, 0), t(1, 0), t(1, 0), t(2, 0), t(2, 1), t(0, 2), t(1, 2), t(2, 2), t(2, 2), t(0, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
    destination: [
        t(0, 0), t(0, 0), t(1, 0), t(1, 0), t(2, 0), t(2, 1), t(0, 2), t(1, 2), t(2, 2), t(2, 3), t(0, 4), t(0, 4), t(1, 4), t(2, 4),
    ],
};

#[rustfmt::skip]
static THREE_TO_FOUR: Transition = Transition {
    source: [
        t(0, 0), t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(2, 0), t(2, 1), t(0, 2), t(1, 2), t(2, 2), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
    destination: [
        t(0, 0), t(0, 0), t(0, 1), t(0, 0), t(2, 0), t(2, 0), t(2, 1), t(0, 2), t(1, 2), t(2, 2), t(2, 3), t(2, 4), t(2, 4), t(2, 4),
    ],
};

#[rustfmt::skip]
static FOUR_TO_FIVE: Transition = Transition {
    source: [
        t(0, 0), t(0, 0), t(0, 0), t(2, 0), t(2, 0), t(0, 1), t(2, 1), t(0, 2), t(0, 2), t(1, 2), t(2, 2), t(2, 3), t(2, 4), t(2, 4),
    ],
    destination: [
        t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(2, 0), t(0, 1), t(2, 2), t(0, 2), t(0, 4), t(1, 2), t(2, 2), t(2, 3), t(1, 4), t(2, 4),
    ],
};

#[rustfmt::skip]
static FIVE_TO_SIX: Transition = Transition {
    source: [
        t(0, 0), t(0, 0), t(1, 0), t(1, 0), t(2, 0), t(0, 1), t(0, 2), t(0, 2), t(1, 2), t(2, 2), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
    destination: [
        t(0, 0), t(0, 0), t(1, 0), t(1, 0), t(2, 0), t(0, 1), t(0, 2), t(0, 3), t(1, 2), t(2, 2), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
};

#[rustfmt::skip]
static SIX_TO_SEVEN: Transition = Transition {
    source: [
        t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(2, 0), t(0, 1), t(0, 2), t(1, 2), t(2, 2), t(0, 3), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
    destination: [
        t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(2, 1), t(0, 0), t(2, 2), t(2, 2), t(2, 2), t(2, 3), t(2, 3), t(2, 4), t(2, 4), t(2, 4),
    ],
};

#[rustfmt::skip]
static SEVEN_TO_EIGHT: Transition = Transition {
    source: [
        t(0, 0), t(0, 0), t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(2, 1), t(2, 2), t(2, 2), t(2, 3), t(2, 3), t(2, 4), t(2, 4), t(2, 4),
    ],
    destination: [
        t(0, 0), t(0, 0), t(0, 1), t(0, 2), t(1, 0), t(2, 0), t(2, 1), t(1, 2), t(2, 2), t(0, 3), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
};

#[rustfmt::skip]
static EIGHT_TO_NINE: Transition = Transition {
    source: [
        t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(0, 1), t(2, 1), t(0, 2), t(1, 2), t(2, 2), t(0, 3), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
    destination: [
        t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(0, 1), t(2, 1), t(0, 2), t(1, 2), t(2, 2), t(0, 4), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
};

#[rustfmt::skip]
static ZERO_TO_TWO: Transition = Transition {
    source: [
        t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(0, 1), t(2, 1), t(0, 2), t(0, 2), t(2, 2), t(0, 3), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
    destination: [
        t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(0, 2), t(2, 1), t(0, 2), t(1, 2), t(2, 2), t(0, 3), t(2, 4), t(0, 4), t(1, 4), t(2, 4),
    ],
};

#[rustfmt::skip]
static ZERO_TO_THREE: Transition = Transition {
    source: [
        t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(0, 1), t(2, 1), t(0, 2), t(0, 2), t(2, 2), t(0, 3), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
    destination: [
        t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(0, 2), t(2, 1), t(0, 2), t(1, 2), t(2, 2), t(0, 4), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
};

#[rustfmt::skip]
static ZERO_TO_FIVE: Transition = Transition {
    source: [
        t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(0, 1), t(2, 1), t(0, 2), t(0, 2), t(2, 2), t(0, 3), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
    destination: [
        t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(0, 1), t(2, 2), t(0, 2), t(1, 2), t(2, 2), t(0, 4), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
};

#[rustfmt::skip]
static ZERO_TO_NINE: Transition = Transition {
    source: [
        t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(0, 1), t(2, 1), t(0, 2), t(0, 2), t(2, 2), t(0, 3), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
    destination: [
        t(0, 0), t(0, 0), t(1, 0), t(2, 0), t(0, 1), t(2, 1), t(0, 2), t(1, 2), t(2, 2), t(0, 4), t(2, 3), t(0, 4), t(1, 4), t(2, 4),
    ],
};


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Lit cells of each numeral on the 3×5 grid, row by row.
    const GLYPHS: [[&str; 5]; 10] = [
        ["###", "#.#", "#.#", "#.#", "###"],
        [".#.", "##.", ".#.", ".#.", "###"],
        ["###", "..#", "###", "#..", "###"],
        ["###", "..#", "###", "..#", "###"],
        ["#.#", "#.#", "###", "..#", "..#"],
        ["###", "#..", "###", "..#", "###"],
        ["###", "#..", "###", "#.#", "###"],
        ["###", "..#", "..#", "..#", "..#"],
        ["###", "#.#", "###", "#.#", "###"],
        ["###", "#.#", "###", "..#", "###"],
    ];

    fn glyph_cells(digit: u8) -> BTreeSet<(i32, i32)> {
        let mut cells = BTreeSet::new();
        for (y, row) in GLYPHS[digit as usize].iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    cells.insert((x as i32, y as i32));
                }
            }
        }
        cells
    }

    fn cells(points: &[Point]) -> BTreeSet<(i32, i32)> {
        points.iter().map(|p| (p.x, p.y)).collect()
    }

    fn stored_pairs() -> Vec<(u8, u8)> {
        let mut pairs: Vec<(u8, u8)> = (0..9).map(|n| (n, n + 1)).collect();
        pairs.extend([(0, 2), (0, 3), (0, 5), (0, 9)]);
        pairs
    }

    #[test]
    fn test_every_entry_covers_both_glyphs() {
        for (lower, higher) in stored_pairs() {
            let transition = lookup(lower, higher).unwrap();
            assert_eq!(
                cells(&transition.source),
                glyph_cells(lower),
                "source of {lower}->{higher} should spell {lower}"
            );
            assert_eq!(
                cells(&transition.destination),
                glyph_cells(higher),
                "destination of {lower}->{higher} should spell {higher}"
            );
        }
    }

    #[test]
    fn test_tiles_stay_inside_the_glyph_grid() {
        for (lower, higher) in stored_pairs() {
            let transition = lookup(lower, higher).unwrap();
            for p in transition.source.iter().chain(transition.destination.iter()) {
                assert!((0..GLYPH_WIDTH).contains(&p.x), "{lower}->{higher}: x={}", p.x);
                assert!((0..GLYPH_HEIGHT).contains(&p.y), "{lower}->{higher}: y={}", p.y);
            }
        }
    }

    #[test]
    fn test_lookup_is_ascending_only() {
        assert!(lookup(1, 0).is_none());
        assert!(lookup(9, 0).is_none());
        assert!(lookup(4, 4).is_none());
        assert!(lookup(2, 7).is_none());
        assert_eq!(lookup(0, 9), Some(&ZERO_TO_NINE));
    }

    #[test]
    fn test_resolve_ascending_uses_progress_as_destination_weight() {
        let blend = resolve(3, 4, 2, 7);
        assert!(!blend.fallback);
        assert_eq!(blend.transition, lookup(3, 4).unwrap());
        assert_eq!(blend.destination_weight, 2);
        assert_eq!(blend.source_weight, 5);
    }

    #[test]
    fn test_resolve_descending_plays_entry_backwards() {
        // 9 -> 0 at the first frame still shows the 9
        let blend = resolve(9, 0, 0, 13);
        assert!(!blend.fallback);
        assert_eq!(blend.transition, lookup(0, 9).unwrap());
        assert_eq!(blend.destination_weight, 13);
        assert_eq!(blend.source_weight, 0);

        let done = resolve(9, 0, 13, 13);
        assert_eq!(done.destination_weight, 0);
        assert_eq!(done.source_weight, 13);
    }

    #[test]
    fn test_fallback_below_nine_settles_on_step_up_source() {
        let blend = resolve(2, 7, 0, 7);
        assert!(blend.fallback);
        assert!(std::ptr::eq(blend.transition, lookup(7, 8).unwrap()));
        assert_eq!((blend.source_weight, blend.destination_weight), (7, 0));
    }

    #[test]
    fn test_fallback_at_nine_settles_on_zero_to_nine_destination() {
        let blend = resolve(4, 9, 3, 7);
        assert!(blend.fallback);
        assert!(std::ptr::eq(blend.transition, &ZERO_TO_NINE));
        assert_eq!((blend.source_weight, blend.destination_weight), (0, 7));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        for previous in 0..=9u8 {
            for value in 0..=9u8 {
                for progress in 0..=7u8 {
                    assert_eq!(
                        resolve(previous, value, progress, 7),
                        resolve(previous, value, progress, 7)
                    );
                }
            }
        }
    }

    #[test]
    fn test_weights_always_sum_to_tile_size() {
        for previous in 0..=9u8 {
            for value in 0..=9u8 {
                for progress in 0..=13u8 {
                    let blend = resolve(previous, value, progress, 13);
                    assert_eq!(blend.source_weight + blend.destination_weight, 13);
                }
            }
        }
    }

    #[test]
    fn test_identity_pair_shows_settled_glyph() {
        for value in 0..=9u8 {
            let blend = resolve(value, value, 7, 7);
            let offsets: BTreeSet<(i32, i32)> = (0..TILES_PER_DIGIT)
                .map(|i| blend.tile_offset(i))
                .map(|p| (p.x / 7, p.y / 7))
                .collect();
            assert_eq!(offsets, glyph_cells(value), "settled {value}");
        }
    }
}
