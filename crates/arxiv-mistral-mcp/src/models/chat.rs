//! Chat messages exchanged with the language model.

use serde::{Deserialize, Serialize};

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the conversation.
    System,
    /// Human input.
    User,
    /// Model output.
    Assistant,
}

/// One role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who wrote the message.
    pub role: Role,

    /// Message text.
    pub content: String,
}

impl ChatTurn {
    /// System turn.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    /// User turn.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    /// Assistant turn.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Returns true if no system turn appears after a non-system turn.
#[must_use]
pub fn system_turns_lead(turns: &[ChatTurn]) -> bool {
    turns
        .iter()
        .skip_while(|t| t.role == Role::System)
        .all(|t| t.role != Role::System)
}
