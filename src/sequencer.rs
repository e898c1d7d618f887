//! The form controller: field state, the latest error map, and the submit lifecycle.
//!
//! ```text
//! Idle ──submit()──▶ Submitting ──resolve(Rejected | Err)──▶ Idle
//!                        │
//!                        └──resolve(Success)──▶ Succeeded ──tick(deadline)──▶ Idle
//! ```
//!
//! Time is passed in explicitly (`now`), so the notification timer is just a deadline that
//! [`FormController::tick`] checks. Whatever drives the controller decides how often to tick.

use crate::{
    collaborators::{
        ListRefresher, Notifier, SubmissionOutcome, SubmissionResult, Submitter, Viewport,
    },
    field_errors::ErrorMap,
    form::{Attachment, Field, FormRecord},
    payload::SubmissionPayload,
};
use itertools::Itertools;
use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

pub const SUCCESS_MESSAGE: &str = "Perfume successfully added!";
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// An attempt is in flight.
    Submitting,
    /// The post-success sequence ran; the notification hides at `hide_at`.
    Succeeded { hide_at: Instant },
}

/// What the controller is handed at construction.
pub struct Collaborators {
    pub submitter: Arc<dyn Submitter>,
    pub notifier: Box<dyn Notifier>,
    pub refresher: Box<dyn ListRefresher>,
    pub viewport: Box<dyn Viewport>,
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// A single submission attempt, taken out of the controller so it can run wherever the
/// caller likes (e.g. off the UI thread). Consumed by [`PendingSubmission::run`], so it
/// can't be retried.
pub struct PendingSubmission {
    payload: SubmissionPayload,
    submitter: Arc<dyn Submitter>,
}

impl fmt::Debug for PendingSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSubmission")
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

impl PendingSubmission {
    #[must_use]
    pub fn payload(&self) -> &SubmissionPayload {
        &self.payload
    }

    /// Performs the attempt. Feed the result back through [`FormController::resolve`].
    #[allow(clippy::missing_errors_doc)]
    pub fn run(self) -> SubmissionResult {
        log::info!("Submitting \"{}\"...", self.payload.perfume.title);
        self.submitter.submit(&self.payload)
    }
}

pub struct FormController {
    record: FormRecord,
    errors: ErrorMap,
    phase: Phase,
    notification_visible: bool,
    notification_duration: Duration,
    /// Last value passed to [`Self::observe_success_flag`]. Only that method touches it.
    success_flag_seen: bool,
    torn_down: bool,
    collaborators: Collaborators,
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("record", &self.record)
            .field("errors", &self.errors)
            .field("phase", &self.phase)
            .field("notification_visible", &self.notification_visible)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl FormController {
    #[must_use]
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            record: FormRecord::default(),
            errors: ErrorMap::default(),
            phase: Phase::Idle,
            notification_visible: false,
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
            success_flag_seen: false,
            torn_down: false,
            collaborators,
        }
    }

    #[must_use]
    pub fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }

    #[must_use]
    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    #[must_use]
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// The current error message for `field`, if any.
    #[must_use]
    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors.error_for(field)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The message to show, while the success notification is up.
    #[must_use]
    pub fn notification(&self) -> Option<&'static str> {
        self.notification_visible.then_some(SUCCESS_MESSAGE)
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.record.set_field(field, value);
    }

    pub fn set_rating(&mut self, rating: f64) {
        self.record.set_rating(rating);
    }

    pub fn set_attachment(&mut self, attachment: Option<Attachment>) {
        self.record.set_attachment(attachment);
    }

    /// Starts an attempt with the record as it is now. Nothing is checked locally.
    ///
    /// Returns `None` (and changes nothing) unless the controller is idle.
    pub fn submit(&mut self) -> Option<PendingSubmission> {
        if self.torn_down {
            return None;
        }
        if self.phase != Phase::Idle {
            log::warn!("submit ignored while {:?}", self.phase);
            return None;
        }

        self.phase = Phase::Submitting;
        log::debug!("Idle -> Submitting");
        Some(PendingSubmission {
            payload: SubmissionPayload::from_record(&self.record),
            submitter: Arc::clone(&self.collaborators.submitter),
        })
    }

    /// Applies the backend's verdict on the attempt started by [`Self::submit`].
    ///
    /// A transport error isn't a verdict: it's logged and the record is left as it was.
    pub fn resolve<E: fmt::Display>(
        &mut self,
        result: Result<SubmissionOutcome, E>,
        now: Instant,
    ) {
        if self.torn_down {
            return;
        }
        if self.phase != Phase::Submitting {
            log::warn!("ignoring submission result while {:?}", self.phase);
            return;
        }

        match result {
            Ok(SubmissionOutcome::Success) => self.run_post_success(now),
            Ok(SubmissionOutcome::Rejected(errors)) => {
                log::info!(
                    "Submission rejected, errors on: {}",
                    errors.iter().map(|(field, _)| field).join(", ")
                );
                self.errors = errors;
                self.phase = Phase::Idle;
            }
            Err(err) => {
                log::error!("Submission failed: {err}");
                self.phase = Phase::Idle;
            }
        }
    }

    /// Submits and resolves in one go, blocking on the submitter.
    pub fn submit_blocking(&mut self, now: Instant) {
        if let Some(pending) = self.submit() {
            let result = pending.run();
            self.resolve(result, now);
        }
    }

    /// For stores that only expose a polled "succeeded" flag.
    ///
    /// Runs the post-success sequence on a `false -> true` edge only; seeing `true` again
    /// without a `false` in between does nothing.
    pub fn observe_success_flag(&mut self, succeeded: bool, now: Instant) {
        if self.torn_down {
            return;
        }
        let rising = succeeded && !self.success_flag_seen;
        self.success_flag_seen = succeeded;
        if rising {
            self.run_post_success(now);
        }
    }

    /// Advances the notification timer. Returns `true` if it expired on this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Succeeded { hide_at } if now >= hide_at && !self.torn_down => {
                self.finish_success();
                true
            }
            _ => false,
        }
    }

    /// Cancels the pending notification timer and stops reacting to further events.
    ///
    /// The external success flag is still cleared, so the store isn't left stuck.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        if matches!(self.phase, Phase::Succeeded { .. }) {
            log::debug!("tearing down with notification pending");
            self.finish_success();
        }
        self.phase = Phase::Idle;
        self.torn_down = true;
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn run_post_success(&mut self, now: Instant) {
        if matches!(self.phase, Phase::Succeeded { .. }) {
            log::warn!("success observed again before the last one finished, ignoring");
            return;
        }

        log::info!("Submission succeeded");
        self.errors = ErrorMap::default();

        self.notification_visible = true;
        self.collaborators.notifier.show(SUCCESS_MESSAGE);

        self.record.reset();
        self.collaborators.viewport.scroll_to_top();

        let hide_at = now + self.notification_duration;
        self.phase = Phase::Succeeded { hide_at };
        log::debug!("-> Succeeded, notification hides in {:?}", self.notification_duration);

        self.collaborators.refresher.refresh();
    }

    fn finish_success(&mut self) {
        self.notification_visible = false;
        self.collaborators.notifier.hide();
        self.collaborators.refresher.acknowledge_success();
        self.phase = Phase::Idle;
        log::debug!("Succeeded -> Idle");
    }
}

impl Drop for FormController {
    fn drop(&mut self) {
        self.teardown();
    }
}
