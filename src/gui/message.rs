use crate::{
    collaborators::{SubmissionOutcome, SubmitError},
    form::Field,
};
use iced::time::Instant;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum Message {
    FieldChanged(Field, String),
    RatingChanged(f64),

    // attachment
    AttachmentPathChanged(String),
    Attach,
    Detach,

    Submit,
    SubmissionResolved(Result<SubmissionOutcome, Arc<SubmitError>>),

    /// Drives the success notification timer.
    Tick(Instant),
}
