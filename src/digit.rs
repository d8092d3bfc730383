//! # Morphing Digit Cell
//!
//! A [`Digit`] is one character position on the clock face. It remembers the value it
//! is leaving and the value it is heading to, plus an integer cursor that walks from
//! `0` (old glyph) to `tile_size` (new glyph).
//!
//! ## States
//! - **At rest**: `progress == tile_size`; drawing repeats the settled glyph
//! - **Animating**: `progress < tile_size`; every draw paints one blended frame and
//!   advances the cursor by one
//!
//! The tile size doubles as the frame count: large tiles travel further, so they take
//! proportionally more frames.

use crate::transitions::{self, Blend, TILES_PER_DIGIT};
use embedded_graphics::{
    prelude::{DrawTarget, Point, Size},
    primitives::Rectangle,
};

/// One animated character cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digit {
    value: u8,
    previous_value: u8,
    progress: u8,
    tile_size: u8,
}

impl Digit {
    /// A digit at rest showing `0`, built from tiles of `tile_size` pixels.
    pub const fn new(tile_size: u8) -> Self {
        Self {
            value: 0,
            previous_value: 0,
            progress: tile_size,
            tile_size,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn previous_value(&self) -> u8 {
        self.previous_value
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn tile_size(&self) -> u8 {
        self.tile_size
    }

    pub fn is_animating(&self) -> bool {
        self.progress < self.tile_size
    }

    /// Commit a new value.
    ///
    /// A differing value starts a morph from the current one. With `animated == false`
    /// the digit snaps to rest whatever happened before, which is how the first frame
    /// avoids growing out of a blank face.
    pub fn set_value(&mut self, value: u8, animated: bool) {
        debug_assert!(value <= 9, "digit value out of range: {value}");
        if self.value != value {
            self.previous_value = self.value;
            self.value = value;
            self.progress = 0;
        }
        if !animated {
            self.progress = self.tile_size;
        }
    }

    /// Step the animation one frame; no-op at rest.
    pub fn advance_frame(&mut self) {
        if self.progress < self.tile_size {
            self.progress += 1;
        }
    }

    /// Transition and weights for the frame the cursor currently points at.
    pub fn blend(&self) -> Blend {
        transitions::resolve(self.previous_value, self.value, self.progress, self.tile_size)
    }

    /// Screen rectangles of the current frame, without advancing the animation.
    pub fn tiles(&self, origin: Point) -> [Rectangle; TILES_PER_DIGIT] {
        let blend = self.blend();
        let size = Size::new(u32::from(self.tile_size), u32::from(self.tile_size));
        std::array::from_fn(|i| Rectangle::new(origin + blend.tile_offset(i), size))
    }

    /// Paint the current frame at `origin`, then advance the animation.
    ///
    /// Drawing is what drives the morph forward: a host that keeps calling this once
    /// per frame sees the digit settle after `tile_size` calls.
    pub fn draw<D>(
        &mut self,
        target: &mut D,
        origin: Point,
        color: D::Color,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget,
    {
        for tile in self.tiles(origin) {
            target.fill_solid(&tile, color)?;
        }
        self.advance_frame();
        Ok(())
    }
}
