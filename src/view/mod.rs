//! Headless office list screen: list state, forms and banners.

mod banner;
mod form;
mod list;

pub use banner::*;
pub use form::*;
pub use list::*;
