#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collaborators;
pub mod config;
pub mod field_errors;
pub mod form;
pub mod gui;
pub mod http;
pub mod payload;
pub mod sequencer;
pub mod utils;

mod threading;
use threading::POOL;
