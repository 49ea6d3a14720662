//! Prompt assembly and text truncation.

mod prompt;
mod truncate;

pub use prompt::*;
pub use truncate::*;
