//! Person domain model.
//!
//! # Responsibility
//! - Represent a subject or observer taking part in rankings.
//!
//! # Invariants
//! - `name` is the lookup key but is not unique in storage.
//! - A person is never mutated or deleted once created.

use crate::model::validation::ModelValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned person identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl Display for PersonId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}

/// Unsaved person draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
}

impl NewPerson {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Rejects blank names.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::BlankPersonName);
        }
        Ok(())
    }

    /// Attaches the identifier assigned by the store.
    pub fn into_person(self, id: PersonId) -> Person {
        Person {
            id,
            name: self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NewPerson, PersonId};
    use crate::model::validation::ModelValidationError;

    #[test]
    fn blank_name_is_rejected() {
        let err = NewPerson::new("   ").validate().unwrap_err();
        assert_eq!(err, ModelValidationError::BlankPersonName);
    }

    #[test]
    fn into_person_keeps_name() {
        let person = NewPerson::new("Drew Lombardo").into_person(PersonId(4));
        assert_eq!(person.id, PersonId(4));
        assert_eq!(person.name, "Drew Lombardo");
    }
}
