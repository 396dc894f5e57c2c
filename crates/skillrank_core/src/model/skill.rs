//! Skill domain model.
//!
//! # Invariants
//! - Skill rows are not deduplicated by name; every ranking owns its own
//!   skill row.

use crate::model::validation::ModelValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned skill identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub i64);

impl Display for SkillId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted skill record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
}

/// Unsaved skill draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSkill {
    pub name: String,
}

impl NewSkill {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::BlankSkillName);
        }
        Ok(())
    }

    pub fn into_skill(self, id: SkillId) -> Skill {
        Skill {
            id,
            name: self.name,
        }
    }
}
