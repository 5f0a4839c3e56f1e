//! Helper functions shared by the generator and the dev server

mod date;
mod html;

pub use date::*;
pub use html::*;
