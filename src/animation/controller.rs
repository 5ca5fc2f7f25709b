//! Lifecycle of a single animation run.
//!
//! The controller owns the terminal writer. Starting a run moves the writer
//! into the animation task; awaiting the stopped run hands it back. While a run
//! is alive the caller has no terminal to write to, so output can never
//! interleave with an animation frame.
//!
//! Log events share the tty through stderr, so nothing here logs between
//! spawning a run and that run erasing its last frame.

use std::future::Future;
use std::io::{self, Stdout, Write};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::Animation;

/// Errors from the animation controller.
#[derive(Debug, Error)]
pub enum AnimationError {
    /// The animation task did not return its terminal.
    #[error("animation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    /// An earlier run never handed the terminal back.
    #[error("terminal is unavailable: an earlier animation run was abandoned")]
    Detached,
}

/// Where a run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Rendering frames.
    Running,
    /// Stop raised, the task has not finished cleaning up yet.
    StopRequested,
    /// The task has returned.
    Stopped,
}

/// Starts animations and waits for them to finish.
pub struct AnimationController<W> {
    terminal: Option<W>,
}

impl AnimationController<Stdout> {
    /// Create a controller drawing on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> AnimationController<W>
where
    W: Write + Send + 'static,
{
    /// Create a controller that draws on `terminal`.
    pub fn new(terminal: W) -> Self {
        Self {
            terminal: Some(terminal),
        }
    }

    /// The terminal, if no run currently holds it.
    pub fn terminal(&mut self) -> Result<&mut W, AnimationError> {
        self.terminal.as_mut().ok_or(AnimationError::Detached)
    }

    /// Launch `animation` on its own task and return immediately.
    ///
    /// The returned handle borrows the controller, so a second run cannot
    /// start until this one has been awaited.
    pub fn start(&mut self, animation: Animation) -> Result<RunHandle<'_, W>, AnimationError> {
        let mut terminal = self.terminal.take().ok_or(AnimationError::Detached)?;
        let stop = CancellationToken::new();
        let abandoned = CancellationToken::new();
        let (token, dropped) = (stop.clone(), abandoned.clone());

        debug!("Starting {} animation", animation);
        let task = tokio::spawn(async move {
            animation.run(&mut terminal, &token).await;
            if dropped.is_cancelled() {
                warn!("{} animation was dropped before it was awaited", animation);
            }
            terminal
        });

        Ok(RunHandle {
            animation,
            stop,
            abandoned,
            task: Some(task),
            slot: &mut self.terminal,
        })
    }

    /// Show `animation` while `work` is pending.
    ///
    /// The animation is stopped and fully cleaned up before this returns,
    /// whatever `work` produced, so the caller can print the outcome straight away.
    ///
    /// Not cancel safe. If the returned future is dropped before it completes,
    /// the run is told to stop and still erases its last frame, but it does so
    /// on its own task and keeps the terminal. The controller then reports
    /// [`AnimationError::Detached`] for good. Callers that race this against
    /// something else should wait for the run to wind down before writing.
    pub async fn run_while<F>(
        &mut self,
        animation: Animation,
        work: F,
    ) -> Result<F::Output, AnimationError>
    where
        F: Future,
    {
        let handle = self.start(animation)?;
        let output = work.await;
        handle.request_stop();
        handle.await_stopped().await?;
        Ok(output)
    }
}

/// A live animation run.
///
/// Dropping the handle without awaiting it still raises the stop signal, but
/// the terminal is then lost to the controller.
pub struct RunHandle<'a, W> {
    animation: Animation,
    stop: CancellationToken,
    abandoned: CancellationToken,
    task: Option<JoinHandle<W>>,
    slot: &'a mut Option<W>,
}

impl<W> RunHandle<'_, W> {
    /// Where the run is right now.
    pub fn state(&self) -> RunState {
        if self.task.as_ref().map_or(true, JoinHandle::is_finished) {
            RunState::Stopped
        } else if self.stop.is_cancelled() {
            RunState::StopRequested
        } else {
            RunState::Running
        }
    }

    /// Ask the animation to stop. Does not wait; calling it again has no effect.
    pub fn request_stop(&self) {
        self.stop.cancel();
    }

    /// Wait until the run has stopped and erased its last frame.
    ///
    /// Only completes after [`RunHandle::request_stop`] has been called.
    pub async fn await_stopped(mut self) -> Result<(), AnimationError> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        let terminal = task.await?;
        *self.slot = Some(terminal);
        debug!("Stopped {} animation", self.animation);
        Ok(())
    }
}

impl<W> Drop for RunHandle<'_, W> {
    fn drop(&mut self) {
        // The task reports the drop itself, once its frame is erased.
        if self.task.is_some() {
            self.abandoned.cancel();
            self.stop.cancel();
        }
    }
}
