//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the store contracts consumed by services.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes validate drafts before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod message_repo;
pub mod ranking_repo;
