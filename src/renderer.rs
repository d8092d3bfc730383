//! # Terminal Rendering
//!
//! Development mode output: the face is drawn into an in-memory monochrome canvas and
//! printed with Unicode half blocks, two pixel rows per text line, so a 144×168 face
//! fits in 84 lines of a terminal.

use std::convert::Infallible;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Pixel, Point, Size},
    primitives::Rectangle,
};

use crate::{clock::Palette, config::Config, driver::FrameSink, Clock};

/// Moves the cursor home so each frame overwrites the previous one.
const CURSOR_HOME: &str = "\x1b[H";

/// Clears the terminal.
const CLEAR_SCREEN: &str = "\x1b[2J";

/// Monochrome frame buffer that renders to text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiCanvas {
    size: Size,
    pixels: Vec<bool>,
}

impl AsciiCanvas {
    /// A blank canvas. A size whose area does not fit in memory yields an empty canvas.
    pub fn new(size: Size) -> Self {
        let size = match pixel_count(size) {
            Some(_) => size,
            None => Size::zero(),
        };
        Self {
            size,
            pixels: vec![false; pixel_count(size).unwrap_or(0)],
        }
    }

    /// Turn every pixel off.
    pub fn clear_all(&mut self) {
        self.pixels.iter_mut().for_each(|p| *p = false);
    }

    pub fn is_on(&self, point: Point) -> bool {
        self.index(point).map(|i| self.pixels[i]).unwrap_or(false)
    }

    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    fn index(&self, point: Point) -> Option<usize> {
        let x = u32::try_from(point.x).ok().filter(|&x| x < self.size.width)?;
        let y = u32::try_from(point.y).ok().filter(|&y| y < self.size.height)?;
        Some(y as usize * self.size.width as usize + x as usize)
    }

    /// The canvas as text, one line per two pixel rows.
    pub fn render(&self) -> String {
        let (w, h) = (self.size.width as i32, self.size.height as i32);
        let lines = (self.size.height as usize).div_ceil(2);
        let mut out = String::with_capacity(lines * (self.size.width as usize + 1) * 3);

        for y in (0..h).step_by(2) {
            for x in 0..w {
                let top = self.is_on(Point::new(x, y));
                let bottom = self.is_on(Point::new(x, y + 1));
                out.push(match (top, bottom) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
            out.push('\n');
        }
        out
    }
}

/// Number of pixels in a canvas of `size`, if every coordinate fits in a [`Point`].
pub fn pixel_count(size: Size) -> Option<usize> {
    let max = i32::MAX as u32;
    if size.width > max || size.height > max {
        return None;
    }
    size.width
        .checked_mul(size.height)
        .and_then(|area| usize::try_from(area).ok())
}

impl OriginDimensions for AsciiCanvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for AsciiCanvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        // Off-canvas pixels are clipped silently
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = color.is_on();
            }
        }
        Ok(())
    }
}

/// Draw one frame of `clock` into a fresh canvas sized from the configuration.
pub fn render_frame(clock: &mut Clock, config: &Config) -> AsciiCanvas {
    let size = Size::new(config.display.width, config.display.height);
    let mut canvas = AsciiCanvas::new(size);
    let bounds = Rectangle::new(Point::zero(), size);
    let palette = Palette::monochrome(BinaryColor::On);

    match clock.draw(&mut canvas, bounds, &palette) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    canvas
}

/// Render one frame of the clock to the terminal.
pub fn draw_ascii(clock: &mut Clock, config: &Config) {
    print!("{}", render_frame(clock, config).render());
}

/// Animated terminal output: every presented frame repaints the screen in place.
pub struct TerminalSink {
    config: Config,
    started: bool,
}

impl TerminalSink {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            started: false,
        }
    }
}

impl FrameSink for TerminalSink {
    fn present(&mut self, clock: &mut Clock) -> anyhow::Result<()> {
        use std::io::Write;

        let frame = render_frame(clock, &self.config).render();
        let mut stdout = std::io::stdout().lock();
        if !self.started {
            write!(stdout, "{CLEAR_SCREEN}")?;
            self.started = true;
        }
        write!(stdout, "{CURSOR_HOME}{frame}")?;
        stdout.flush()?;
        Ok(())
    }
}
