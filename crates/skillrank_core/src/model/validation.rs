//! Shared validation error for model drafts.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failures raised before a draft is written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// `Person.name` is blank after trim.
    BlankPersonName,
    /// `Skill.name` is blank after trim.
    BlankSkillName,
    /// `Message.text` is blank after trim.
    BlankMessageText,
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankPersonName => write!(f, "person name must not be blank"),
            Self::BlankSkillName => write!(f, "skill name must not be blank"),
            Self::BlankMessageText => write!(f, "message text must not be blank"),
        }
    }
}

impl Error for ModelValidationError {}
