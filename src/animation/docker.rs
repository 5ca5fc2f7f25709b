//! "docker-style" animation: a `|====>     |` bar that fills, blanks, and refills.

use std::io::Write;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{clear_line, draw_line, hold};

pub const FRAME_DELAY: Duration = Duration::from_millis(100);

/// Columns between the `|` brackets, excluding the `>` head.
pub const WIDTH: usize = 50;

/// Bar with `filled` columns of `=` (clamped to [`WIDTH`]).
pub fn frame(filled: usize) -> String {
    let filled = filled.min(WIDTH);
    format!("|{}>{}|", "=".repeat(filled), " ".repeat(WIDTH - filled))
}

pub async fn run<W: Write>(out: &mut W, stop: &CancellationToken) {
    let mut filled = 0;
    while !stop.is_cancelled() {
        draw_line(out, &frame(filled));
        if hold(stop, FRAME_DELAY).await {
            break;
        }
        if filled == WIDTH {
            filled = 0;
            clear_line(out);
        } else {
            filled += 1;
        }
    }
    clear_line(out);
}
