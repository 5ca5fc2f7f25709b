//! "typing" animation: `#`, `##`, ... `#####`, then the line blanks and it restarts.

use std::io::Write;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{clear_line, draw_line, hold};

/// Time each step stays on screen.
pub const FRAME_DELAY: Duration = Duration::from_millis(500);

/// Steps per cycle; step `n` shows `n + 1` markers.
pub const STEPS: usize = 5;

const MARKER: &str = "#";

/// Frame for a step within the cycle.
pub fn frame(step: usize) -> String {
    MARKER.repeat(step % STEPS + 1)
}

pub async fn run<W: Write>(out: &mut W, stop: &CancellationToken) {
    let mut step = 0;
    while !stop.is_cancelled() {
        draw_line(out, &frame(step));
        if hold(stop, FRAME_DELAY).await {
            break;
        }
        step += 1;
        if step == STEPS {
            step = 0;
            clear_line(out);
        }
    }
    clear_line(out);
}
