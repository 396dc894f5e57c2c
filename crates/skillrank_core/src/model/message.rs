//! Message domain model.
//!
//! A free-standing text record with generated identity, unrelated to the
//! ranking tables.

use crate::model::validation::ModelValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub i64);

impl Display for MessageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted message record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
}

/// Unsaved message draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub text: String,
}

impl NewMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.text.trim().is_empty() {
            return Err(ModelValidationError::BlankMessageText);
        }
        Ok(())
    }
}
