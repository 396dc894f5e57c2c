//! Ranking use-case service.
//!
//! # Responsibility
//! - Resolve or create people and skills while recording rankings.
//! - Aggregate matching rankings into summary statistics.
//!
//! # Invariants
//! - Every public operation runs in exactly one store transaction; lookups
//!   that only read use the store's read transaction.
//! - `add_ranking` commits subject, observer, skill and ranking together or
//!   not at all.
//! - People are deduplicated by exact name; skills are not deduplicated.
//! - Averages are truncated toward zero; an empty set is `NoRankings`.

use crate::model::person::{NewPerson, Person};
use crate::model::ranking::{NewRanking, Ranking, RankingId, RankingSummary};
use crate::model::skill::{NewSkill, Skill};
use crate::repo::ranking_repo::{RankingFilter, RankingRepository, RankingStore, RepoError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rankings seeded by [`RankingService::populate_sample_data`], as
/// `(subject, observer, skill, value)`.
pub const SAMPLE_RANKINGS: [(&str, &str, &str, i32); 3] = [
    ("J. C. Smell", "Gene Showrama", "Java", 6),
    ("J. C. Smell", "Scottball Most", "Java", 7),
    ("J. C. Smell", "Drew Lombardo", "Java", 8),
];

/// Service error for ranking use-cases.
#[derive(Debug)]
pub enum RankingServiceError {
    /// No ranking matched the subject/skill pair, so no average exists.
    NoRankings { subject: String, skill: String },
    /// Target ranking does not exist.
    RankingNotFound(RankingId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for RankingServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRankings { subject, skill } => {
                write!(f, "no rankings recorded for `{subject}` in `{skill}`")
            }
            Self::RankingNotFound(id) => write!(f, "ranking not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RankingServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for RankingServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: "ranking",
                id,
            } => Self::RankingNotFound(RankingId(id)),
            other => Self::Repo(other),
        }
    }
}

pub type RankingServiceResult<T> = Result<T, RankingServiceError>;

/// Ranking service facade over an injected store.
pub struct RankingService<S: RankingStore> {
    store: S,
}

impl<S: RankingStore> RankingService<S> {
    /// Creates a service using the provided store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the store, ending the service lifetime.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns the person named `name`, creating it when absent.
    pub fn find_or_create_person(&mut self, name: &str) -> RankingServiceResult<Person> {
        self.store
            .with_transaction(|repo| find_or_create_person_in(repo, name))
    }

    /// Creates a new skill row, even when the name already exists.
    pub fn create_skill(&mut self, name: &str) -> RankingServiceResult<Skill> {
        self.store.with_transaction(|repo| create_skill_in(repo, name))
    }

    /// Records `observer`'s ranking of `subject` in `skill`.
    ///
    /// # Contract
    /// - Subject and observer are resolved by name or created.
    /// - A new skill row is created for this ranking.
    /// - All writes share one transaction.
    pub fn add_ranking(
        &mut self,
        subject: &str,
        observer: &str,
        skill: &str,
        value: i32,
    ) -> RankingServiceResult<Ranking> {
        let ranking = self
            .store
            .with_transaction(|repo| add_ranking_in(repo, subject, observer, skill, value))?;
        info!(
            "event=ranking_add module=service status=ok ranking_id={} subject_id={} observer_id={} skill_id={}",
            ranking.id, ranking.subject.id, ranking.observer.id, ranking.skill.id
        );
        Ok(ranking)
    }

    /// Returns the truncated mean ranking of `subject` in `skill`.
    ///
    /// # Errors
    /// - `NoRankings` when no ranking matches.
    pub fn average_ranking_for(&mut self, subject: &str, skill: &str) -> RankingServiceResult<i32> {
        let summary = self.ranking_summary(subject, skill)?;
        summary
            .average()
            .ok_or_else(|| RankingServiceError::NoRankings {
                subject: subject.to_string(),
                skill: skill.to_string(),
            })
    }

    /// Returns count/sum/min/max over rankings of `subject` in `skill`.
    pub fn ranking_summary(
        &mut self,
        subject: &str,
        skill: &str,
    ) -> RankingServiceResult<RankingSummary> {
        let rankings = self.rankings_for(subject, skill)?;
        let summary = RankingSummary::from_values(rankings.iter().map(|ranking| ranking.value));
        info!(
            "event=ranking_summary module=service status=ok count={} sum={}",
            summary.count, summary.sum
        );
        Ok(summary)
    }

    /// Lists rankings of `subject` in skills named `skill`, ordered by id.
    pub fn rankings_for(&mut self, subject: &str, skill: &str) -> RankingServiceResult<Vec<Ranking>> {
        let filter = RankingFilter::subject_skill(subject, skill);
        self.find_rankings(&filter)
    }

    /// Lists rankings matching an arbitrary filter, ordered by id.
    pub fn find_rankings(&mut self, filter: &RankingFilter) -> RankingServiceResult<Vec<Ranking>> {
        self.store.with_read_transaction(|repo| {
            repo.find_rankings(filter)
                .map_err(RankingServiceError::from)
        })
    }

    /// Finds the ranking `observer` gave `subject` in `skill`.
    ///
    /// When several match, the oldest one is returned.
    pub fn find_ranking(
        &mut self,
        subject: &str,
        observer: &str,
        skill: &str,
    ) -> RankingServiceResult<Option<Ranking>> {
        let filter = RankingFilter {
            subject: Some(subject.to_string()),
            observer: Some(observer.to_string()),
            skill: Some(skill.to_string()),
        };
        let rankings = self.find_rankings(&filter)?;
        Ok(rankings.into_iter().next())
    }

    /// Replaces the value of an existing ranking and returns the new state.
    pub fn change_ranking(&mut self, id: RankingId, value: i32) -> RankingServiceResult<Ranking> {
        let ranking = self.store.with_transaction(|repo| {
            repo.update_ranking_value(id, value)?;
            repo.get_ranking(id)?
                .ok_or(RankingServiceError::RankingNotFound(id))
        })?;
        info!("event=ranking_update module=service status=ok ranking_id={id}");
        Ok(ranking)
    }

    /// Deletes one ranking. People and skills are kept.
    pub fn remove_ranking(&mut self, id: RankingId) -> RankingServiceResult<()> {
        self.store
            .with_transaction(|repo| repo.delete_ranking(id).map_err(RankingServiceError::from))?;
        info!("event=ranking_remove module=service status=ok ranking_id={id}");
        Ok(())
    }

    /// Seeds [`SAMPLE_RANKINGS`] in one transaction.
    pub fn populate_sample_data(&mut self) -> RankingServiceResult<Vec<Ranking>> {
        let rankings = self.store.with_transaction(|repo| {
            SAMPLE_RANKINGS
                .iter()
                .map(|(subject, observer, skill, value)| {
                    add_ranking_in(repo, subject, observer, skill, *value)
                })
                .collect::<RankingServiceResult<Vec<_>>>()
        })?;
        info!(
            "event=ranking_seed module=service status=ok count={}",
            rankings.len()
        );
        Ok(rankings)
    }
}

fn find_or_create_person_in(
    repo: &dyn RankingRepository,
    name: &str,
) -> RankingServiceResult<Person> {
    if let Some(person) = repo.find_person_by_name(name)? {
        return Ok(person);
    }

    let draft = NewPerson::new(name);
    let id = repo.create_person(&draft)?;
    debug!("event=person_create module=service status=ok person_id={id}");
    Ok(draft.into_person(id))
}

fn create_skill_in(repo: &dyn RankingRepository, name: &str) -> RankingServiceResult<Skill> {
    let draft = NewSkill::new(name);
    let id = repo.create_skill(&draft)?;
    Ok(draft.into_skill(id))
}

fn add_ranking_in(
    repo: &dyn RankingRepository,
    subject: &str,
    observer: &str,
    skill: &str,
    value: i32,
) -> RankingServiceResult<Ranking> {
    let subject = find_or_create_person_in(repo, subject)?;
    let observer = find_or_create_person_in(repo, observer)?;
    let skill = create_skill_in(repo, skill)?;

    let id = repo.create_ranking(&NewRanking {
        subject_id: subject.id,
        observer_id: observer.id,
        skill_id: skill.id,
        value,
    })?;

    Ok(Ranking {
        id,
        subject,
        observer,
        skill,
        value,
    })
}
