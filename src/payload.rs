//! Serialization of a [`FormRecord`] into the two-part unit sent to the backend.

use crate::form::{Attachment, FormRecord};
use bytes::Bytes;
use reqwest::blocking::multipart::{Form, Part};
use serde::Serialize;
use thiserror::Error;

/// Name of the binary part.
pub const FILE_PART: &str = "file";
/// Name of the JSON part.
pub const PERFUME_PART: &str = "perfume";

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("{0}")]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("{0}")]
    ReqwestError(#[from] reqwest::Error),
}

/// Every field of the record except the attachment, as the backend expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfumeDocument {
    pub title: String,
    pub brand: String,
    pub year: String,
    pub country: String,
    pub r#type: String,
    pub volume: String,
    pub gender: String,
    pub top_notes: String,
    pub middle_notes: String,
    pub base_notes: String,
    pub price: String,
    pub rating: f64,
}

impl From<&FormRecord> for PerfumeDocument {
    fn from(record: &FormRecord) -> Self {
        use crate::form::Field;

        Self {
            title: record.get(Field::Title).to_owned(),
            brand: record.get(Field::Brand).to_owned(),
            year: record.get(Field::Year).to_owned(),
            country: record.get(Field::Country).to_owned(),
            r#type: record.get(Field::Type).to_owned(),
            volume: record.get(Field::Volume).to_owned(),
            gender: record.get(Field::Gender).to_owned(),
            top_notes: record.get(Field::TopNotes).to_owned(),
            middle_notes: record.get(Field::MiddleNotes).to_owned(),
            base_notes: record.get(Field::BaseNotes).to_owned(),
            price: record.get(Field::Price).to_owned(),
            rating: record.rating(),
        }
    }
}

/// One named part of the multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadPart {
    pub name: &'static str,
    pub file_name: Option<String>,
    pub content_type: String,
    pub body: Bytes,
}

/// Built fresh for every submit, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    pub file: Option<Attachment>,
    pub perfume: PerfumeDocument,
}

impl SubmissionPayload {
    #[must_use]
    pub fn from_record(record: &FormRecord) -> Self {
        Self {
            file: record.attachment().cloned(),
            perfume: PerfumeDocument::from(record),
        }
    }

    /// The `perfume` part's body.
    ///
    /// # Errors
    /// If the document can't be serialized.
    pub fn perfume_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(&self.perfume)?)
    }

    /// Both parts, always in `file`, `perfume` order. A missing attachment still yields a
    /// `file` part, just with an empty body.
    ///
    /// # Errors
    /// See [`Self::perfume_json`].
    pub fn parts(&self) -> Result<[PayloadPart; 2], PayloadError> {
        let file = match &self.file {
            Some(attachment) => PayloadPart {
                name: FILE_PART,
                file_name: Some(attachment.name.clone()),
                content_type: attachment.content_type.clone(),
                body: attachment.content.clone(),
            },
            None => PayloadPart {
                name: FILE_PART,
                file_name: None,
                content_type: String::from("application/octet-stream"),
                body: Bytes::new(),
            },
        };
        let perfume = PayloadPart {
            name: PERFUME_PART,
            file_name: None,
            content_type: String::from("application/json"),
            body: Bytes::from(self.perfume_json()?),
        };

        Ok([file, perfume])
    }

    /// Builds the multipart form for [reqwest].
    ///
    /// # Errors
    /// - See [`Self::perfume_json`]
    /// - If a content type isn't a valid MIME string
    pub fn to_form(&self) -> Result<Form, PayloadError> {
        let mut form = Form::new();
        for part in self.parts()? {
            let mut req_part = Part::bytes(part.body.to_vec()).mime_str(&part.content_type)?;
            if let Some(file_name) = part.file_name {
                req_part = req_part.file_name(file_name);
            }
            form = form.part(part.name, req_part);
        }
        Ok(form)
    }
}
