//! # Morph Clock Core Library
//!
//! A digital clock face whose digits melt from one numeral into the next. Each digit is
//! a handful of solid squares ("tiles"); when a digit changes, every tile slides from
//! its place in the old numeral to its place in the new one, so the silhouette morphs
//! instead of snapping.
//!
//! ## Design Philosophy
//!
//! ### Integer-only rendering
//! - **Tiles, not fonts**: a glyph is 14 squares on a 3×5 grid, so all that is ever
//!   drawn is filled rectangles
//! - **Integer blend**: a tile's position is `source * (size - progress) +
//!   destination * progress`, which is exact in pixels because tile offsets are in
//!   tile units
//!
//! ### Host-driven animation
//! The engine owns no timers. A host feeds it time ticks ([`clock::Clock::set_time`])
//! and keeps calling [`clock::Clock::draw`] at a fixed cadence while
//! [`clock::Clock::has_pending_animation`] holds; every draw advances the morph by one
//! frame. The [`driver`] module is such a host for terminals.
//!
//! ## Core Types
//! - [`TimeFields`]: the broken-down wall-clock time the face displays
//! - [`TimeUnits`]: which of those fields changed since the previous tick

use bitflags::bitflags;
use chrono::{Datelike, Timelike};

// Module declarations
pub mod clock;
pub mod config;
pub mod digit;
pub mod driver;
pub mod layout;
pub mod renderer;
pub mod transitions;

pub use clock::{Clock, Palette};
pub use digit::Digit;
pub use layout::{Face, LayoutMode};

/// Broken-down wall-clock time as shown on the face.
///
/// `month` is 1-based and `hour` uses the 24-hour clock.
///
/// # Example
/// ```
/// use morph_clock_lib::TimeFields;
///
/// let t = TimeFields::hms(23, 59, 59);
/// assert_eq!((t.hour, t.minute, t.second), (23, 59, 59));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeFields {
    /// Take the fields out of any chrono date-time.
    pub fn from_datetime<T: Datelike + Timelike>(dt: &T) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }

    /// A time of day on 2000-01-01.
    pub fn hms(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year: 2000,
            month: 1,
            day: 1,
            hour,
            minute,
            second,
        }
    }
}

bitflags! {
    /// Set of time fields that changed between two ticks.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TimeUnits: u8 {
        const SECOND = 1 << 0;
        const MINUTE = 1 << 1;
        const HOUR = 1 << 2;
        const DAY = 1 << 3;
        const MONTH = 1 << 4;
        const YEAR = 1 << 5;
    }
}

impl TimeUnits {
    /// Every field, as used for the first paint.
    pub const ALL: TimeUnits = TimeUnits::all();

    /// Fields that differ between `prev` and `next`, with carry.
    ///
    /// A coarser field changing marks every finer field too: a new minute means the
    /// seconds rolled over even if the sampled second happens to be equal. This is what
    /// lets the clock cascade reach the coarser digits.
    pub fn changed_between(prev: &TimeFields, next: &TimeFields) -> TimeUnits {
        let fields = [
            (prev.year != next.year, TimeUnits::YEAR),
            (prev.month != next.month, TimeUnits::MONTH),
            (prev.day != next.day, TimeUnits::DAY),
            (prev.hour != next.hour, TimeUnits::HOUR),
            (prev.minute != next.minute, TimeUnits::MINUTE),
            (prev.second != next.second, TimeUnits::SECOND),
        ];

        let mut units = TimeUnits::empty();
        let mut carry = false;
        for (changed, unit) in fields {
            carry |= changed;
            if carry {
                units |= unit;
            }
        }
        units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_from_datetime() {
        let dt = NaiveDate::from_ymd_opt(2016, 3, 27)
            .unwrap()
            .and_hms_opt(21, 26, 10)
            .unwrap();
        let fields = TimeFields::from_datetime(&dt);
        assert_eq!(fields.year, 2016);
        assert_eq!(fields.month, 3);
        assert_eq!(fields.day, 27);
        assert_eq!(fields.hour, 21);
        assert_eq!(fields.minute, 26);
        assert_eq!(fields.second, 10);
    }

    #[test]
    fn test_changed_between_single_second() {
        let units = TimeUnits::changed_between(&TimeFields::hms(10, 0, 1), &TimeFields::hms(10, 0, 2));
        assert_eq!(units, TimeUnits::SECOND);
    }

    #[test]
    fn test_changed_between_carries_down() {
        // a minute jump that lands on the same second still marks seconds
        let units = TimeUnits::changed_between(&TimeFields::hms(10, 5, 30), &TimeFields::hms(11, 6, 30));
        assert_eq!(units, TimeUnits::SECOND | TimeUnits::MINUTE | TimeUnits::HOUR);

        let mut new_year = TimeFields::hms(0, 0, 0);
        new_year.year = 2001;
        let units = TimeUnits::changed_between(&TimeFields::hms(0, 0, 0), &new_year);
        assert_eq!(units, TimeUnits::ALL);
    }

    #[test]
    fn test_changed_between_identical_is_empty() {
        let t = TimeFields::hms(12, 34, 56);
        assert!(TimeUnits::changed_between(&t, &t).is_empty());
    }
}
