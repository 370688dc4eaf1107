//! Collection schema definitions

mod templates;
mod types;

pub use templates::*;
pub use types::*;
