//! The record being authored and the operations that mutate it.

mod attachment;
pub use attachment::Attachment;

use std::{fmt, str::FromStr};
use thiserror::Error;

/// Every string-valued field of the form.
///
/// Enumerated fields (country, type, volume, gender) are plain strings here too; only the
/// presentation layer knows their option sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Brand,
    Year,
    Country,
    Type,
    Volume,
    Gender,
    TopNotes,
    MiddleNotes,
    BaseNotes,
    Price,
}

impl Field {
    /// All fields, in the order they appear in the submitted document.
    pub const ALL: [Field; 11] = [
        Field::Title,
        Field::Brand,
        Field::Year,
        Field::Country,
        Field::Type,
        Field::Volume,
        Field::Gender,
        Field::TopNotes,
        Field::MiddleNotes,
        Field::BaseNotes,
        Field::Price,
    ];

    /// Key used for this field in the `perfume` JSON part.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Brand => "brand",
            Field::Year => "year",
            Field::Country => "country",
            Field::Type => "type",
            Field::Volume => "volume",
            Field::Gender => "gender",
            Field::TopNotes => "topNotes",
            Field::MiddleNotes => "middleNotes",
            Field::BaseNotes => "baseNotes",
            Field::Price => "price",
        }
    }

    /// Name the backend used for this field before the wire names were shortened.
    /// Its validation errors are still keyed as `<legacy_name>Error`.
    #[must_use]
    pub const fn legacy_name(self) -> &'static str {
        match self {
            Field::Title => "perfumeTitle",
            Field::Brand => "perfumer",
            Field::Year => "year",
            Field::Country => "country",
            Field::Type => "type",
            Field::Volume => "volume",
            Field::Gender => "perfumeGender",
            Field::TopNotes => "fragranceTopNotes",
            Field::MiddleNotes => "fragranceMiddleNotes",
            Field::BaseNotes => "fragranceBaseNotes",
            Field::Price => "price",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Field::Title => "Perfume title",
            Field::Brand => "Brand",
            Field::Year => "Release year",
            Field::Country => "Manufacturer country",
            Field::Type => "Perfume type",
            Field::Volume => "Volume",
            Field::Gender => "Gender",
            Field::TopNotes => "Top notes",
            Field::MiddleNotes => "Heart notes",
            Field::BaseNotes => "Base notes",
            Field::Price => "Price",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts both wire names and legacy names.
    ///
    /// ```
    /// use perfume_form::form::Field;
    ///
    /// assert_eq!("topNotes".parse(), Ok(Field::TopNotes));
    /// assert_eq!("fragranceTopNotes".parse(), Ok(Field::TopNotes));
    /// assert!("colour".parse::<Field>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.wire_name() == s || field.legacy_name() == s)
            .ok_or_else(|| UnknownField(s.to_owned()))
    }
}

/// The in-progress catalog item.
///
/// Every key is always present; "unfilled" just means empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormRecord {
    title: String,
    brand: String,
    year: String,
    country: String,
    r#type: String,
    volume: String,
    gender: String,
    top_notes: String,
    middle_notes: String,
    base_notes: String,
    price: String,
    rating: f64,
    attachment: Option<Attachment>,
}

impl FormRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Brand => &mut self.brand,
            Field::Year => &mut self.year,
            Field::Country => &mut self.country,
            Field::Type => &mut self.r#type,
            Field::Volume => &mut self.volume,
            Field::Gender => &mut self.gender,
            Field::TopNotes => &mut self.top_notes,
            Field::MiddleNotes => &mut self.middle_notes,
            Field::BaseNotes => &mut self.base_notes,
            Field::Price => &mut self.price,
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Brand => &self.brand,
            Field::Year => &self.year,
            Field::Country => &self.country,
            Field::Type => &self.r#type,
            Field::Volume => &self.volume,
            Field::Gender => &self.gender,
            Field::TopNotes => &self.top_notes,
            Field::MiddleNotes => &self.middle_notes,
            Field::BaseNotes => &self.base_notes,
            Field::Price => &self.price,
        }
    }

    /// Replaces exactly one field. Nothing is validated here, the backend decides.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    #[must_use]
    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn set_rating(&mut self, rating: f64) {
        self.rating = rating;
    }

    #[must_use]
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn set_attachment(&mut self, attachment: Option<Attachment>) {
        self.attachment = attachment;
    }

    /// Replaces the whole record with the defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `true` if nothing has been filled in.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
