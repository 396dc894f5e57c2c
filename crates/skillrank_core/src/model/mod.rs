//! Domain model for people, skills, rankings and messages.
//!
//! # Responsibility
//! - Define the records persisted by the ranking store.
//! - Keep unsaved drafts (`New*`) separate from persisted records.
//!
//! # Invariants
//! - Persisted records always carry a store-assigned identifier.
//! - Identifier newtypes are never mixed across entity kinds.

pub mod message;
pub mod person;
pub mod ranking;
pub mod skill;
pub mod validation;
