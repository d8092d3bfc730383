//! # Clock Aggregate
//!
//! [`Clock`] owns one [`Digit`] per character cell and routes time updates to them.
//! Seconds are always tracked because the update cascade starts there, but only the
//! digits placed by the current [`Face`] are drawn.

use embedded_graphics::{
    prelude::{DrawTarget, PixelColor},
    primitives::Rectangle,
};
use tracing::{debug, trace};

use crate::{
    digit::Digit,
    layout::{self, DigitSlot, Face, Ink, DATE_TILE_SIZE, TIME_TILE_SIZE},
    TimeFields, TimeUnits,
};

/// Colours the face is painted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette<C> {
    /// Minutes, separators and the date
    pub primary: C,
    /// Hours in the stacked layout
    pub accent: C,
}

impl<C: PixelColor> Palette<C> {
    pub fn new(primary: C, accent: C) -> Self {
        Self { primary, accent }
    }

    /// Same colour for everything.
    pub fn monochrome(color: C) -> Self {
        Self::new(color, color)
    }

    fn ink(&self, ink: Ink) -> C {
        match ink {
            Ink::Primary => self.primary,
            Ink::Accent => self.accent,
        }
    }
}

#[derive(Clone, Debug)]
struct DateDigits {
    year: [Digit; 4],
    month: [Digit; 2],
    day: [Digit; 2],
}

/// All animated digits of one clock face.
#[derive(Clone, Debug)]
pub struct Clock {
    face: Face,
    hours: [Digit; 2],
    minutes: [Digit; 2],
    seconds: [Digit; 2],
    date: Option<DateDigits>,
}

impl Clock {
    /// Build every digit at rest, sized for `face`.
    pub fn new(face: Face) -> Self {
        let hours = Digit::new(face.layout.hours_tile_size());
        let minutes = Digit::new(face.layout.minutes_tile_size());
        let date = face.with_date.then(|| DateDigits {
            year: [Digit::new(DATE_TILE_SIZE); 4],
            month: [Digit::new(DATE_TILE_SIZE); 2],
            day: [Digit::new(DATE_TILE_SIZE); 2],
        });

        Self {
            face,
            hours: [hours; 2],
            minutes: [minutes; 2],
            seconds: [Digit::new(TIME_TILE_SIZE); 2],
            date,
        }
    }

    pub fn face(&self) -> Face {
        self.face
    }

    /// The digit in `slot`, or `None` for date slots on a face without a date.
    pub fn digit(&self, slot: DigitSlot) -> Option<&Digit> {
        match slot {
            DigitSlot::Hours(i) => self.hours.get(i),
            DigitSlot::Minutes(i) => self.minutes.get(i),
            DigitSlot::Seconds(i) => self.seconds.get(i),
            DigitSlot::Year(i) => self.date.as_ref().and_then(|d| d.year.get(i)),
            DigitSlot::Month(i) => self.date.as_ref().and_then(|d| d.month.get(i)),
            DigitSlot::Day(i) => self.date.as_ref().and_then(|d| d.day.get(i)),
        }
    }

    fn digit_mut(&mut self, slot: DigitSlot) -> Option<&mut Digit> {
        match slot {
            DigitSlot::Hours(i) => self.hours.get_mut(i),
            DigitSlot::Minutes(i) => self.minutes.get_mut(i),
            DigitSlot::Seconds(i) => self.seconds.get_mut(i),
            DigitSlot::Year(i) => self.date.as_mut().and_then(|d| d.year.get_mut(i)),
            DigitSlot::Month(i) => self.date.as_mut().and_then(|d| d.month.get_mut(i)),
            DigitSlot::Day(i) => self.date.as_mut().and_then(|d| d.day.get_mut(i)),
        }
    }

    /// Push new time fields into the digits.
    ///
    /// Updates cascade like a carry: minutes are only looked at when seconds changed,
    /// hours only when minutes did, and the date only below a changed hour (day, then
    /// month, then year).
    pub fn set_time(&mut self, time: &TimeFields, changed: TimeUnits, animated: bool) {
        debug!(
            ?changed,
            animated,
            "set time {:02}:{:02}:{:02}",
            time.hour,
            time.minute,
            time.second
        );

        if !changed.contains(TimeUnits::SECOND) {
            return;
        }
        set_pair(&mut self.seconds, time.second, animated);

        if !changed.contains(TimeUnits::MINUTE) {
            return;
        }
        set_pair(&mut self.minutes, time.minute, animated);

        if !changed.contains(TimeUnits::HOUR) {
            return;
        }
        set_pair(&mut self.hours, time.hour, animated);

        if let Some(date) = self.date.as_mut() {
            date.set(time, changed, animated);
        }
    }

    /// True while the slowest digits are still morphing.
    ///
    /// The ones digits of hours and minutes change whenever their tens do and carry the
    /// largest tiles of their row, so they are the last to settle.
    pub fn has_pending_animation(&self) -> bool {
        self.hours[1].is_animating() || self.minutes[1].is_animating()
    }

    /// Paint one frame of the whole face into `bounds` and advance every drawn digit.
    ///
    /// Digits at rest repeat their settled glyph, so calling this with nothing
    /// animating redraws the same picture.
    pub fn draw<D>(
        &mut self,
        target: &mut D,
        bounds: Rectangle,
        palette: &Palette<D::Color>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget,
    {
        let face_layout = layout::layout(self.face, bounds);

        for separator in &face_layout.separators {
            target.fill_solid(&separator.area, palette.ink(separator.ink))?;
        }

        for placement in &face_layout.digits {
            if let Some(digit) = self.digit_mut(placement.slot) {
                digit.draw(target, placement.origin, palette.ink(placement.ink))?;
            }
        }

        trace!(pending = self.has_pending_animation(), "frame drawn");
        Ok(())
    }
}

impl DateDigits {
    fn set(&mut self, time: &TimeFields, changed: TimeUnits, animated: bool) {
        if !changed.contains(TimeUnits::DAY) {
            return;
        }
        set_pair(&mut self.day, time.day, animated);

        if !changed.contains(TimeUnits::MONTH) {
            return;
        }
        set_pair(&mut self.month, time.month, animated);

        if !changed.contains(TimeUnits::YEAR) {
            return;
        }
        let mut year = time.year.rem_euclid(10_000) as u32;
        for digit in self.year.iter_mut().rev() {
            digit.set_value((year % 10) as u8, animated);
            year /= 10;
        }
    }
}

/// Tens into the first digit, ones into the second.
fn set_pair(pair: &mut [Digit; 2], value: u32, animated: bool) {
    pair[0].set_value((value / 10 % 10) as u8, animated);
    pair[1].set_value((value % 10) as u8, animated);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutMode;
    use crate::renderer::AsciiCanvas;
    use embedded_graphics::{
        pixelcolor::BinaryColor,
        prelude::{Point, Size},
    };

    fn bounds() -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(144, 168))
    }

    fn values(clock: &Clock, slots: &[DigitSlot]) -> Vec<u8> {
        slots.iter().map(|&s| clock.digit(s).unwrap().value()).collect()
    }

    #[test]
    fn test_new_clock_is_at_rest_with_role_tile_sizes() {
        let clock = Clock::new(Face::new(LayoutMode::Stacked, true));
        assert!(!clock.has_pending_animation());
        assert_eq!(clock.digit(DigitSlot::Hours(0)).unwrap().tile_size(), 13);
        assert_eq!(clock.digit(DigitSlot::Minutes(1)).unwrap().tile_size(), 7);
        assert_eq!(clock.digit(DigitSlot::Seconds(0)).unwrap().tile_size(), 7);
        assert_eq!(clock.digit(DigitSlot::Year(3)).unwrap().tile_size(), 2);

        let flat = Clock::new(Face::new(LayoutMode::SingleRow, false));
        assert_eq!(flat.digit(DigitSlot::Hours(1)).unwrap().tile_size(), 7);
        assert!(flat.digit(DigitSlot::Day(0)).is_none());
    }

    #[test]
    fn test_initial_unanimated_set_time_is_at_rest() {
        let mut clock = Clock::new(Face::new(LayoutMode::Stacked, true));
        let mut time = TimeFields::hms(21, 26, 10);
        time.year = 2016;
        time.month = 3;
        time.day = 27;
        clock.set_time(&time, TimeUnits::ALL, false);

        assert!(!clock.has_pending_animation());
        assert_eq!(values(&clock, &[DigitSlot::Hours(0), DigitSlot::Hours(1)]), vec![2, 1]);
        assert_eq!(values(&clock, &[DigitSlot::Minutes(0), DigitSlot::Minutes(1)]), vec![2, 6]);
        assert_eq!(
            values(
                &clock,
                &[DigitSlot::Year(0), DigitSlot::Year(1), DigitSlot::Year(2), DigitSlot::Year(3)]
            ),
            vec![2, 0, 1, 6]
        );
        assert_eq!(values(&clock, &[DigitSlot::Month(0), DigitSlot::Month(1)]), vec![0, 3]);
        assert_eq!(values(&clock, &[DigitSlot::Day(0), DigitSlot::Day(1)]), vec![2, 7]);
    }

    #[test]
    fn test_cascade_skips_minutes_without_second_bit() {
        let mut clock = Clock::new(Face::default());
        clock.set_time(&TimeFields::hms(12, 34, 56), TimeUnits::MINUTE | TimeUnits::HOUR, true);
        assert_eq!(values(&clock, &[DigitSlot::Minutes(0), DigitSlot::Minutes(1)]), vec![0, 0]);
        assert_eq!(values(&clock, &[DigitSlot::Hours(0), DigitSlot::Hours(1)]), vec![0, 0]);
        assert!(!clock.has_pending_animation());
    }

    #[test]
    fn test_cascade_stops_at_first_missing_bit() {
        let mut clock = Clock::new(Face::default());
        clock.set_time(&TimeFields::hms(12, 34, 56), TimeUnits::SECOND | TimeUnits::HOUR, true);
        assert_eq!(values(&clock, &[DigitSlot::Seconds(0), DigitSlot::Seconds(1)]), vec![5, 6]);
        assert_eq!(values(&clock, &[DigitSlot::Hours(0), DigitSlot::Hours(1)]), vec![0, 0]);
    }

    #[test]
    fn test_date_needs_hour_bit() {
        let mut clock = Clock::new(Face::new(LayoutMode::Stacked, true));
        let mut time = TimeFields::hms(0, 0, 0);
        time.day = 15;
        clock.set_time(&time, TimeUnits::SECOND | TimeUnits::MINUTE | TimeUnits::DAY, false);
        assert_eq!(values(&clock, &[DigitSlot::Day(0), DigitSlot::Day(1)]), vec![0, 0]);

        clock.set_time(&time, TimeUnits::ALL, false);
        assert_eq!(values(&clock, &[DigitSlot::Day(0), DigitSlot::Day(1)]), vec![1, 5]);
    }

    #[test]
    fn test_pending_tracks_minutes_ones() {
        let mut clock = Clock::new(Face::default());
        clock.set_time(&TimeFields::hms(10, 41, 0), TimeUnits::ALL, false);
        clock.set_time(&TimeFields::hms(10, 42, 0), TimeUnits::SECOND | TimeUnits::MINUTE, true);
        assert!(clock.has_pending_animation());

        let mut canvas = AsciiCanvas::new(Size::new(144, 168));
        let palette = Palette::monochrome(BinaryColor::On);
        for _ in 0..7 {
            assert!(clock.has_pending_animation());
            clock.draw(&mut canvas, bounds(), &palette).unwrap();
        }
        assert!(!clock.has_pending_animation());
    }

    #[test]
    fn test_settled_draw_is_stable() {
        let mut clock = Clock::new(Face::new(LayoutMode::SingleRow, true));
        clock.set_time(&TimeFields::hms(8, 15, 0), TimeUnits::ALL, false);
        let palette = Palette::monochrome(BinaryColor::On);

        let mut first = AsciiCanvas::new(Size::new(144, 168));
        clock.draw(&mut first, bounds(), &palette).unwrap();
        let mut second = AsciiCanvas::new(Size::new(144, 168));
        clock.draw(&mut second, bounds(), &palette).unwrap();

        assert_eq!(first.render(), second.render());
        assert!(first.lit_pixels() > 0);
    }
}
