//! Option sets for the enumerated fields. The core treats these fields as plain strings;
//! only the form offers a closed choice.

use crate::form::Field;

pub static BRANDS: &[&str] = &[
    "Burberry",
    "Bvlgari",
    "Calvin Klein",
    "Carolina Herrera",
    "Chanel",
    "Creed",
    "Dior",
    "Dolce&Gabbana",
    "Gucci",
    "Hugo Boss",
    "Hermes",
    "Lancome",
    "Prada",
    "Jean Paul Gaultier",
];

pub static COUNTRIES: &[&str] = &[
    "USA",
    "Italy",
    "Germany",
    "Great Britain",
    "Spain",
    "France",
    "VietNam",
];

pub static TYPES: &[&str] = &["Eau de Parfum", "Eau de Toilette"];

pub static VOLUMES: &[&str] = &["65", "75", "90", "100", "125", "175", "200"];

pub static GENDERS: &[&str] = &["male", "female"];

/// `None` for free-text fields.
#[must_use]
pub fn options_for(field: Field) -> Option<&'static [&'static str]> {
    match field {
        Field::Brand => Some(BRANDS),
        Field::Country => Some(COUNTRIES),
        Field::Type => Some(TYPES),
        Field::Volume => Some(VOLUMES),
        Field::Gender => Some(GENDERS),
        _ => None,
    }
}
