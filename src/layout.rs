//! # Clock Face Layout
//!
//! Pure geometry: given a [`Face`] and the pixel bounds to fill, work out where every
//! displayed digit and separator goes. Nothing here draws or mutates, so layouts can
//! be checked on the host without a display.
//!
//! ## Modes
//! - **Stacked**: large hours on top, smaller minutes centred underneath
//! - **Single row**: `HH:MM` on one line with a two-square colon
//!
//! With the date enabled a small `YYYY-MM-DD` row sits below the time.
//!
//! All digits are 3 tiles wide and 5 tiles tall and advance by 4 tiles, leaving a
//! one-tile gap. Centring uses integer division, so odd leftovers round toward the
//! top-left.

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};
use serde::{Deserialize, Serialize};

use crate::transitions::GLYPH_HEIGHT;

/// Tile size of the date digits.
pub const DATE_TILE_SIZE: u8 = 2;

/// Tile size of every time digit in the single-row layout, and of seconds.
pub const TIME_TILE_SIZE: u8 = 7;

/// Tile size of the hour digits in the stacked layout.
pub const STACKED_HOURS_TILE_SIZE: u8 = 13;

/// Tile size of the minute digits in the stacked layout.
pub const STACKED_MINUTES_TILE_SIZE: u8 = 7;

/// Horizontal advance from one digit origin to the next, in tiles.
const DIGIT_ADVANCE: i32 = 4;

/// Extra downward nudge of the stacked layout, in pixels.
const STACKED_OFFSET_Y: i32 = 6;

/// Width of `HH` in tiles.
const PAIR_TILES: i32 = 7;

/// Width of `HH:MM` in tiles: two pairs, two gaps and the colon column.
const SINGLE_ROW_TILES: i32 = 3 + 1 + 3 + 1 + 1 + 1 + 3 + 1 + 3;

/// Width of `YYYY-MM-DD` in tiles.
const DATE_ROW_TILES: i32 = 15 + 1 + 2 + 1 + 7 + 1 + 2 + 1 + 7;

/// How the hours and minutes are arranged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Hours above minutes, hours drawn larger
    #[default]
    Stacked,
    /// `HH:MM` on a single line
    SingleRow,
}

impl LayoutMode {
    pub fn hours_tile_size(self) -> u8 {
        match self {
            LayoutMode::Stacked => STACKED_HOURS_TILE_SIZE,
            LayoutMode::SingleRow => TIME_TILE_SIZE,
        }
    }

    pub fn minutes_tile_size(self) -> u8 {
        match self {
            LayoutMode::Stacked => STACKED_MINUTES_TILE_SIZE,
            LayoutMode::SingleRow => TIME_TILE_SIZE,
        }
    }
}

/// Everything that decides which digits exist and where they go.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    pub layout: LayoutMode,
    pub with_date: bool,
}

impl Face {
    pub fn new(layout: LayoutMode, with_date: bool) -> Self {
        Self { layout, with_date }
    }
}

/// Names one digit cell of the clock by field and position (0 = most significant).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DigitSlot {
    Hours(usize),
    Minutes(usize),
    Seconds(usize),
    Year(usize),
    Month(usize),
    Day(usize),
}

/// Which palette entry paints an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ink {
    Primary,
    Accent,
}

/// Where one digit is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub slot: DigitSlot,
    pub origin: Point,
    pub ink: Ink,
}

/// A static filled rectangle: colon dots or date dashes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Separator {
    pub area: Rectangle,
    pub ink: Ink,
}

/// Result of laying out a face: digits in reading order plus separators.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceLayout {
    pub digits: Vec<Placement>,
    pub separators: Vec<Separator>,
}

impl FaceLayout {
    pub fn origin_of(&self, slot: DigitSlot) -> Option<Point> {
        self.digits
            .iter()
            .find(|placement| placement.slot == slot)
            .map(|placement| placement.origin)
    }

    fn place(&mut self, slot: DigitSlot, origin: Point, ink: Ink) {
        self.digits.push(Placement { slot, origin, ink });
    }

    fn separate(&mut self, top_left: Point, size: Size, ink: Ink) {
        self.separators.push(Separator {
            area: Rectangle::new(top_left, size),
            ink,
        });
    }
}

/// Compute digit origins and separators for `face` centred in `bounds`.
pub fn layout(face: Face, bounds: Rectangle) -> FaceLayout {
    let w = bounds.size.width as i32;
    let h = bounds.size.height as i32;
    let base = bounds.top_left;
    let mut out = FaceLayout::default();

    let (row_y, row_tile) = match face.layout {
        LayoutMode::Stacked => {
            let hours = i32::from(STACKED_HOURS_TILE_SIZE);
            let minutes = i32::from(STACKED_MINUTES_TILE_SIZE);
            let padding = hours + 2;

            let mut x = (w - PAIR_TILES * hours) / 2;
            let mut y = STACKED_OFFSET_Y
                + (h - GLYPH_HEIGHT * (hours + minutes) - padding) / 2;
            out.place(DigitSlot::Hours(0), base + Point::new(x, y), Ink::Accent);
            x += DIGIT_ADVANCE * hours;
            out.place(DigitSlot::Hours(1), base + Point::new(x, y), Ink::Accent);

            x = (w - PAIR_TILES * minutes) / 2;
            y += GLYPH_HEIGHT * hours + padding;
            out.place(DigitSlot::Minutes(0), base + Point::new(x, y), Ink::Primary);
            x += DIGIT_ADVANCE * minutes;
            out.place(DigitSlot::Minutes(1), base + Point::new(x, y), Ink::Primary);

            (y, minutes)
        }
        LayoutMode::SingleRow => {
            let tile = i32::from(TIME_TILE_SIZE);
            let mut x = (w - SINGLE_ROW_TILES * tile) / 2;
            let y = (h - GLYPH_HEIGHT * tile) / 2;

            out.place(DigitSlot::Hours(0), base + Point::new(x, y), Ink::Primary);
            x += DIGIT_ADVANCE * tile;
            out.place(DigitSlot::Hours(1), base + Point::new(x, y), Ink::Primary);
            x += DIGIT_ADVANCE * tile;

            let dot = Size::new(tile as u32, tile as u32);
            out.separate(base + Point::new(x, y + tile), dot, Ink::Primary);
            out.separate(base + Point::new(x, y + 3 * tile), dot, Ink::Primary);
            x += 2 * tile;

            out.place(DigitSlot::Minutes(0), base + Point::new(x, y), Ink::Primary);
            x += DIGIT_ADVANCE * tile;
            out.place(DigitSlot::Minutes(1), base + Point::new(x, y), Ink::Primary);

            (y, tile)
        }
    };

    if face.with_date {
        layout_date(&mut out, base, w, row_y + GLYPH_HEIGHT * row_tile);
    }

    out
}

/// `YYYY-MM-DD` centred horizontally, two date tiles below `time_bottom`.
fn layout_date(out: &mut FaceLayout, base: Point, width: i32, time_bottom: i32) {
    let tile = i32::from(DATE_TILE_SIZE);
    let mut x = (width - DATE_ROW_TILES * tile) / 2;
    let y = time_bottom + 2 * tile;
    let dash = Size::new(2 * tile as u32, tile as u32);

    let groups: [(fn(usize) -> DigitSlot, usize); 3] =
        [(DigitSlot::Year, 4), (DigitSlot::Month, 2), (DigitSlot::Day, 2)];

    for (group, (slot, count)) in groups.into_iter().enumerate() {
        if group > 0 {
            out.separate(base + Point::new(x, y + 2 * tile), dash, Ink::Primary);
            x += 3 * tile;
        }
        for index in 0..count {
            out.place(slot(index), base + Point::new(x, y), Ink::Primary);
            if index + 1 < count {
                x += DIGIT_ADVANCE * tile;
            }
        }
        x += DIGIT_ADVANCE * tile;
    }
}
