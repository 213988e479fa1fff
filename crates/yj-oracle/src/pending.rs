//! Handle to an interpretation that was started before it is needed.

use tokio::task::JoinHandle;

use crate::interpretation::{Interpretation, StructuredReply};

/// An interpretation that may still be in flight.
///
/// Obtained from [`Interpreter::start`](crate::Interpreter::start). Awaiting
/// it never fails; a request task that panicked or was cancelled resolves
/// to the fallback. Dropping the handle detaches the task.
#[derive(Debug)]
pub struct PendingInterpretation {
    state: State,
}

#[derive(Debug)]
enum State {
    Running(JoinHandle<Interpretation>),
    Ready(Box<Interpretation>),
}

impl PendingInterpretation {
    pub(crate) fn spawned(handle: JoinHandle<Interpretation>) -> Self {
        Self {
            state: State::Running(handle),
        }
    }

    pub(crate) fn ready(interpretation: Interpretation) -> Self {
        Self {
            state: State::Ready(Box::new(interpretation)),
        }
    }

    /// Whether awaiting the handle would complete without waiting.
    pub fn is_ready(&self) -> bool {
        match &self.state {
            State::Running(handle) => handle.is_finished(),
            State::Ready(_) => true,
        }
    }

    /// Wait for the interpretation.
    pub async fn wait(self) -> Interpretation {
        match self.state {
            State::Ready(interpretation) => *interpretation,
            State::Running(handle) => match handle.await {
                Ok(interpretation) => interpretation,
                Err(e) => {
                    tracing::warn!(error = %e, "interpretation task did not complete");
                    Interpretation::fallback()
                }
            },
        }
    }
}
