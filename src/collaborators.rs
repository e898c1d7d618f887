//! The narrow interfaces [`FormController`](crate::sequencer::FormController) is given at
//! construction. Everything behind them (network, toast rendering, list views) lives
//! outside the controller.

use crate::{field_errors::ErrorMap, payload::PayloadError, payload::SubmissionPayload};
use thiserror::Error;

/// How the backend resolved one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    /// The backend refused the record; the map says why, per field.
    Rejected(ErrorMap),
}

/// The attempt never got a verdict from the backend.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    PayloadError(#[from] PayloadError),
    #[error("{0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("unexpected response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("submission was dropped before it resolved")]
    Dropped,
}

pub type SubmissionResult = Result<SubmissionOutcome, SubmitError>;

/// Sends a payload to the backend. One call is one attempt, no retries.
pub trait Submitter: Send + Sync {
    /// # Errors
    /// If the backend couldn't be reached or answered with something that isn't a verdict.
    fn submit(&self, payload: &SubmissionPayload) -> SubmissionResult;
}

/// Shows and hides the transient success message.
pub trait Notifier {
    fn show(&mut self, message: &str);
    fn hide(&mut self);
}

/// The external store behind the dependent list view.
pub trait ListRefresher {
    /// Fire-and-forget refresh of the list the new record will appear in.
    fn refresh(&mut self);

    /// Called when the success notification expires. Stores that expose a polled
    /// "succeeded" flag clear it here so a later success can be observed again.
    fn acknowledge_success(&mut self) {}
}

/// Scrolls the visible form back to its top.
pub trait Viewport {
    fn scroll_to_top(&mut self);
}

impl<F: FnMut()> ListRefresher for F {
    fn refresh(&mut self) {
        self();
    }
}

impl<F: FnMut()> Viewport for F {
    fn scroll_to_top(&mut self) {
        self();
    }
}
