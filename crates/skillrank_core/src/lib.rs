//! Core domain logic for SkillRank.
//! This crate is the single source of truth for ranking invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{load_config, ConfigError, DatabaseConfig, LoggingConfig, SkillRankConfig};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingStatus};
pub use model::message::{Message, MessageId, NewMessage};
pub use model::person::{NewPerson, Person, PersonId};
pub use model::ranking::{NewRanking, Ranking, RankingId, RankingSummary};
pub use model::skill::{NewSkill, Skill, SkillId};
pub use model::validation::ModelValidationError;
pub use repo::message_repo::{MessageRepository, SqliteMessageRepository};
pub use repo::ranking_repo::{
    RankingFilter, RankingRepository, RankingStore, RepoError, RepoResult,
    SqliteRankingRepository, SqliteRankingStore,
};
pub use service::message_service::{MessageService, MessageServiceError, MessageServiceResult};
pub use service::ranking_service::{
    RankingService, RankingServiceError, RankingServiceResult, SAMPLE_RANKINGS,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
