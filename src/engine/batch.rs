//! Batch execution with per-item fault isolation.
//!
//! One user gesture becomes one batch: the operation runs over a snapshot of
//! items in order, and each failure is routed to the escalation channel where
//! the user picks continue-suppressing, skip, or cancel. The suppress flag is
//! scoped to the running batch and resets on the next call.

use super::LockError;

/// User response to a per-item failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptChoice {
    /// Suppress all further errors for the rest of this batch and continue.
    Ignore,
    /// Skip this item, keep going, and ask again on the next failure.
    Skip,
    /// Abort the remaining items immediately.
    Cancel,
}

/// Synchronous escalation channel plus display-update bracketing.
///
/// `begin_update`/`end_update` are called exactly once around each batch so a
/// presenter can buffer intermediate list states; both default to no-ops.
/// `on_failure` blocks until the user answers.
pub trait BatchPrompt {
    fn begin_update(&mut self) {}
    fn end_update(&mut self) {}
    fn on_failure(&mut self, error: &LockError) -> PromptChoice;
}

/// What happened to a batch, for logging and status reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Items whose operation returned success.
    pub succeeded: usize,
    /// Items whose operation failed (whether prompted or suppressed).
    pub failed: usize,
    /// True when the user cancelled before the end of the snapshot.
    pub cancelled: bool,
}

/// Applies `op` to every element in order with per-item fault isolation.
///
/// Successes and skips are silent. On failure the prompt decides how the rest
/// of the batch proceeds; once [`PromptChoice::Ignore`] is chosen no further
/// prompts occur for this batch. Cancellation stops before the next item, it
/// never interrupts an operation already underway.
pub fn repeat<T, I, F>(items: I, mut op: F, prompt: &mut dyn BatchPrompt) -> BatchOutcome
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Result<(), LockError>,
{
    let mut outcome = BatchOutcome::default();
    let mut ignore_rest = false;

    prompt.begin_update();
    for item in items {
        match op(item) {
            Ok(()) => outcome.succeeded += 1,
            Err(error) => {
                outcome.failed += 1;
                if ignore_rest {
                    continue;
                }
                match prompt.on_failure(&error) {
                    PromptChoice::Ignore => ignore_rest = true,
                    PromptChoice::Skip => {}
                    PromptChoice::Cancel => {
                        outcome.cancelled = true;
                        break;
                    }
                }
            }
        }
    }
    prompt.end_update();

    outcome
}
