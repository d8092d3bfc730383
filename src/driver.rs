//! # Host Event Loop
//!
//! The engine never schedules anything itself. This module is the portable host that
//! does: it samples the wall clock once a second, turns the difference into a
//! [`TimeUnits`] mask, and while digits are morphing runs a fast frame ticker that keeps
//! presenting frames until the clock reports nothing pending.
//!
//! ## Event Model
//! Everything happens on one task. Time ticks, frame ticks and shutdown are multiplexed
//! with `tokio::select!`, so exactly one handler runs at a time and the clock needs no
//! locking.
//!
//! ## Frame Ticker
//! - **Armed** by an animated time update that reaches the minutes
//! - **Fires** every `frame_interval`; each firing presents one frame, which advances
//!   every drawn digit by one step
//! - **Disarmed** as soon as a frame leaves nothing pending; it is not rescheduled
//!   until the next time update

use std::time::Duration;

use chrono::{Local, NaiveDateTime, TimeDelta};
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::{Clock, TimeFields, TimeUnits};

/// Period of the wall-clock sampling tick.
pub const TIME_TICK: Duration = Duration::from_secs(1);

/// Where the current time comes from.
pub trait TimeSource {
    fn now(&mut self) -> NaiveDateTime;
}

/// The local wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalTime;

impl TimeSource for LocalTime {
    fn now(&mut self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Simulated time starting at `origin` and running `scale` times faster than real time.
///
/// Useful to watch minute and hour roll-overs without waiting for them. Real time is
/// measured with tokio's clock, so paused-time tests drive it too.
#[derive(Clone, Copy, Debug)]
pub struct ScaledTime {
    origin: NaiveDateTime,
    started: Instant,
    scale: u32,
}

impl ScaledTime {
    pub fn new(origin: NaiveDateTime, scale: u32) -> Self {
        Self {
            origin,
            started: Instant::now(),
            scale: scale.max(1),
        }
    }
}

impl TimeSource for ScaledTime {
    fn now(&mut self) -> NaiveDateTime {
        let elapsed = self.started.elapsed().saturating_mul(self.scale);
        TimeDelta::from_std(elapsed)
            .ok()
            .and_then(|delta| self.origin.checked_add_signed(delta))
            .unwrap_or(NaiveDateTime::MAX)
    }
}

/// Receives finished frames.
///
/// `present` must draw the clock (through [`Clock::draw`]); drawing is what advances
/// the animation, so a sink that skips it stalls the morph.
pub trait FrameSink {
    fn present(&mut self, clock: &mut Clock) -> anyhow::Result<()>;
}

/// State of the frame ticker, separate from any timer so it can be reasoned about
/// and tested on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameScheduler {
    armed: bool,
}

impl FrameScheduler {
    /// A time update happened; animated updates arm the ticker.
    pub fn on_time_tick(&mut self, animated: bool) {
        if animated {
            self.armed = true;
        }
    }

    /// A frame was presented. Returns whether another one should follow.
    pub fn after_frame(&mut self, pending: bool) -> bool {
        self.armed = pending;
        pending
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Owns a clock and feeds it time and frames.
pub struct Driver<T, S> {
    clock: Clock,
    time: T,
    sink: S,
    scheduler: FrameScheduler,
    frame_interval: Duration,
    last: Option<TimeFields>,
}

impl<T: TimeSource, S: FrameSink> Driver<T, S> {
    pub fn new(clock: Clock, time: T, sink: S, frame_interval: Duration) -> Self {
        Self {
            clock,
            time,
            sink,
            scheduler: FrameScheduler::default(),
            frame_interval,
            last: None,
        }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn scheduler(&self) -> FrameScheduler {
        self.scheduler
    }

    /// Show the current time settled, without animating in from a blank face.
    pub fn start(&mut self) -> anyhow::Result<()> {
        let now = TimeFields::from_datetime(&self.time.now());
        self.clock.set_time(&now, TimeUnits::ALL, false);
        self.last = Some(now);
        info!(
            "clock started at {:02}:{:02}:{:02}",
            now.hour, now.minute, now.second
        );
        self.sink.present(&mut self.clock)
    }

    /// Sample the time source and start morphing whatever changed.
    pub fn tick(&mut self) -> TimeUnits {
        let now = TimeFields::from_datetime(&self.time.now());
        let changed = match &self.last {
            Some(prev) => TimeUnits::changed_between(prev, &now),
            None => TimeUnits::ALL,
        };
        self.last = Some(now);

        if !changed.is_empty() {
            self.clock.set_time(&now, changed, true);
            // Seconds are tracked but never drawn; only a new minute moves the face
            self.scheduler.on_time_tick(changed.contains(TimeUnits::MINUTE));
        }
        changed
    }

    /// Present one frame. Returns whether the ticker stays armed.
    pub fn frame(&mut self) -> anyhow::Result<bool> {
        self.sink.present(&mut self.clock)?;
        let pending = self.clock.has_pending_animation();
        trace!(pending, "frame presented");
        Ok(self.scheduler.after_frame(pending))
    }

    /// Run until Ctrl-C, or until `max_frames` animation frames were presented.
    ///
    /// Returns the number of animation frames presented.
    pub async fn run(&mut self, max_frames: Option<u64>) -> anyhow::Result<u64> {
        self.start()?;

        let mut seconds = interval(TIME_TICK);
        seconds.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut frames = interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Both intervals complete their first tick immediately
        seconds.tick().await;
        frames.tick().await;

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        let mut presented = 0u64;
        loop {
            tokio::select! {
                _ = seconds.tick() => {
                    let was_armed = self.scheduler.is_armed();
                    let changed = self.tick();
                    if !changed.is_empty() {
                        debug!(?changed, "time changed");
                    }
                    if self.scheduler.is_armed() && !was_armed {
                        frames.reset();
                    }
                }
                _ = frames.tick(), if self.scheduler.is_armed() => {
                    self.frame()?;
                    presented += 1;
                    if max_frames.is_some_and(|max| presented >= max) {
                        break;
                    }
                }
                _ = &mut shutdown => {
                    info!("shutting down");
                    break;
                }
            }
        }
        Ok(presented)
    }
}
