//! "speedtest" animation: a gauge of `=` followed by a spinning `\ | / -` head.
//!
//! The gauge grows by one column every full turn of the head. Past
//! [`MAX_WIDTH`] it drops back to [`RESET_WIDTH`], not to zero, so the gauge
//! never vanishes entirely once it has started.

use std::io::Write;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{clear_line, draw_line, hold};

pub const FRAME_DELAY: Duration = Duration::from_millis(100);

pub const GLYPHS: [char; 4] = ['\\', '|', '/', '-'];

pub const MAX_WIDTH: usize = 50;
pub const RESET_WIDTH: usize = 5;

/// Width counter for the gauge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gauge {
    width: usize,
}

impl Gauge {
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grow by one column, wrapping back to [`RESET_WIDTH`] past [`MAX_WIDTH`].
    pub fn grow(&mut self) {
        self.width += 1;
        if self.width > MAX_WIDTH {
            self.width = RESET_WIDTH;
        }
    }
}

pub fn frame(gauge: Gauge, glyph: char) -> String {
    let mut frame = "=".repeat(gauge.width());
    frame.push(glyph);
    frame
}

pub async fn run<W: Write>(out: &mut W, stop: &CancellationToken) {
    let mut gauge = Gauge::default();
    let mut turn = 0;
    while !stop.is_cancelled() {
        draw_line(out, &frame(gauge, GLYPHS[turn]));
        if hold(stop, FRAME_DELAY).await {
            break;
        }
        turn += 1;
        if turn == GLYPHS.len() {
            turn = 0;
            gauge.grow();
        }
    }
    clear_line(out);
}
