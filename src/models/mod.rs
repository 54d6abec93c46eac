//! Data models for the office locations application.
//!
//! Records serialize with a nested `detail` object; request bodies are flat.

mod envelope;
mod office;

pub use envelope::*;
pub use office::*;
