//! "messenger-typing" animation: a chat-app style "Typing: ● ● ●" bubble.
//!
//! Unlike the single-line styles this one owns a block of
//! [`RESERVED_LINES`] lines. It reserves them up front, redraws the whole
//! block from its top on every frame, and on stop clears the block and leaves
//! the cursor where the run began.

use crossterm::{
    cursor::MoveUp,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::Write;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{emit, hold};

pub const FRAME_DELAY: Duration = Duration::from_millis(250);

/// Height of the block, in lines.
pub const RESERVED_LINES: u16 = 3;

pub const FRAMES: [&str; 8] = [
    "●     ", "● ●   ", "● ● ●", "  ● ●", "    ●", "  ● ●", "● ● ●", "● ●   ",
];

const LABEL: &str = "Typing: ";

fn reserve<W: Write>(out: &mut W) {
    emit(out, |out| {
        for _ in 0..RESERVED_LINES {
            queue!(out, Print('\n'))?;
        }
        Ok(())
    });
}

fn draw<W: Write>(out: &mut W, dots: &str) {
    emit(out, |out| {
        queue!(
            out,
            MoveUp(RESERVED_LINES),
            Print('\r'),
            Print(LABEL),
            Print(dots),
            Clear(ClearType::UntilNewLine)
        )?;
        for _ in 0..RESERVED_LINES {
            queue!(out, Print('\n'))?;
        }
        Ok(())
    });
}

fn release<W: Write>(out: &mut W) {
    emit(out, |out| {
        queue!(
            out,
            MoveUp(RESERVED_LINES),
            Print('\r'),
            Clear(ClearType::FromCursorDown)
        )
    });
}

pub async fn run<W: Write>(out: &mut W, stop: &CancellationToken) {
    reserve(out);
    let mut index = 0;
    while !stop.is_cancelled() {
        draw(out, FRAMES[index]);
        if hold(stop, FRAME_DELAY).await {
            break;
        }
        index = (index + 1) % FRAMES.len();
    }
    release(out);
}
