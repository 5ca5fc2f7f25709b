//! Progress animations shown while a completion request is outstanding.
//!
//! Each style lives in its own module and renders an endless loop of frames
//! until its stop token is cancelled. Frames are drawn with relative cursor
//! movement only, so they overwrite each other in place, and every style erases
//! its last frame before returning.

pub mod controller;
pub mod docker;
pub mod messenger;
pub mod speedtest;
pub mod typing;

#[cfg(test)]
pub(crate) mod screen;

pub use controller::AnimationController;

use crossterm::{
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::fmt;
use std::io::{self, Write};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Enum-based animation styles.
/// Each variant carries no state; a run keeps its frame counters locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    /// Growing row of `#` markers.
    #[default]
    Typing,
    /// Fixed-width `|===>   |` progress bar.
    DockerStyle,
    /// Growing gauge with a rotating indicator.
    Speedtest,
    /// Three-line "Typing: ● ● ●" block.
    MessengerTyping,
}

impl Animation {
    /// Every style, in the order `termchat styles` lists them.
    pub const ALL: [Animation; 4] = [
        Animation::Typing,
        Animation::DockerStyle,
        Animation::Speedtest,
        Animation::MessengerTyping,
    ];

    /// Select a style from a configuration tag.
    ///
    /// Matching ignores case and surrounding whitespace. Unknown tags fall back
    /// to the default style instead of failing.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "typing" => Animation::Typing,
            "docker-style" | "docker" => Animation::DockerStyle,
            "speedtest" => Animation::Speedtest,
            "messenger-typing" | "telegram" => Animation::MessengerTyping,
            _ => Animation::default(),
        }
    }

    /// Get the canonical tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Animation::Typing => "typing",
            Animation::DockerStyle => "docker-style",
            Animation::Speedtest => "speedtest",
            Animation::MessengerTyping => "messenger-typing",
        }
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            Animation::Typing => "a row of # markers growing to five, then restarting",
            Animation::DockerStyle => "a 50-column progress bar, docker pull style",
            Animation::Speedtest => "a growing gauge with a rotating indicator",
            Animation::MessengerTyping => "a three-line 'Typing: ● ● ●' bubble",
        }
    }

    /// How long each frame is held. Also the worst-case stop latency.
    pub fn frame_delay(&self) -> Duration {
        match self {
            Animation::Typing => typing::FRAME_DELAY,
            Animation::DockerStyle => docker::FRAME_DELAY,
            Animation::Speedtest => speedtest::FRAME_DELAY,
            Animation::MessengerTyping => messenger::FRAME_DELAY,
        }
    }

    /// Render frames to `out` until `stop` is cancelled, then erase the last frame.
    pub async fn run<W: Write>(&self, out: &mut W, stop: &CancellationToken) {
        match self {
            Animation::Typing => typing::run(out, stop).await,
            Animation::DockerStyle => docker::run(out, stop).await,
            Animation::Speedtest => speedtest::run(out, stop).await,
            Animation::MessengerTyping => messenger::run(out, stop).await,
        }
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Hold the current frame for `delay`, returning early if `stop` is cancelled.
///
/// Returns `true` once stop has been requested.
pub(crate) async fn hold(stop: &CancellationToken, delay: Duration) -> bool {
    tokio::select! {
        biased;
        _ = stop.cancelled() => true,
        _ = tokio::time::sleep(delay) => stop.is_cancelled(),
    }
}

/// Queue commands on the terminal and flush them.
///
/// Terminal writes are fire-and-forget: a failed frame is skipped, the loop
/// keeps running and still honours the stop token.
pub(crate) fn emit<W, F>(out: &mut W, draw: F)
where
    W: Write,
    F: FnOnce(&mut W) -> io::Result<()>,
{
    if let Err(e) = draw(&mut *out).and_then(|_| out.flush()) {
        trace!("Dropped animation frame: {}", e);
    }
}

/// Overwrite the current line with `frame`.
pub(crate) fn draw_line<W: Write>(out: &mut W, frame: &str) {
    emit(out, |out| {
        queue!(
            out,
            Print('\r'),
            Print(frame),
            Clear(ClearType::UntilNewLine)
        )
    });
}

/// Blank the current line and park the cursor at its start.
pub(crate) fn clear_line<W: Write>(out: &mut W) {
    emit(out, |out| queue!(out, Print('\r'), Clear(ClearType::CurrentLine)));
}
