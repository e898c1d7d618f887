mod app;
pub use app::*;

mod message;
pub use message::*;

pub mod options;

mod view_form;
