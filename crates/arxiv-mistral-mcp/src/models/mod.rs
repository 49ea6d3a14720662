//! Data models for papers, chat turns and tool inputs.
//!
//! Models derive `Serialize`/`Deserialize` and use `#[serde(default)]`
//! for optional fields.

mod chat;
mod enums;
mod inputs;
mod paper;

pub use chat::{ChatTurn, Role, system_turns_lead};
pub use enums::SortBy;
pub use inputs::*;
pub use paper::PaperRecord;
