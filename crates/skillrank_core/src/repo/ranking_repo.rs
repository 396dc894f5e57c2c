//! Ranking store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/find/update/delete over `people`, `skills` and
//!   `rankings` storage.
//! - Demarcate transactions through [`RankingStore`]: write work under an
//!   IMMEDIATE transaction, read-only work under a DEFERRED one.
//! - Keep SQL and row mapping inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate drafts before SQL mutations.
//! - A ranking row references persisted people and skill rows (enforced by
//!   foreign keys).
//! - Work passed to `with_transaction` is committed only when it returns
//!   `Ok`; any error or unwind rolls the whole transaction back.

use crate::db::DbError;
use crate::model::person::{NewPerson, Person, PersonId};
use crate::model::ranking::{NewRanking, Ranking, RankingId};
use crate::model::skill::{NewSkill, Skill, SkillId};
use crate::model::validation::ModelValidationError;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const RANKING_SELECT_SQL: &str = "SELECT
    r.id AS id,
    r.value AS value,
    s.id AS subject_id,
    s.name AS subject_name,
    o.id AS observer_id,
    o.name AS observer_name,
    k.id AS skill_id,
    k.name AS skill_name
FROM rankings r
INNER JOIN people s ON s.id = r.subject_id
INNER JOIN people o ON o.id = r.observer_id
INNER JOIN skills k ON k.id = r.skill_id";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for ranking-store persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: i64 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Predicate for ranking queries. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingFilter {
    pub subject: Option<String>,
    pub observer: Option<String>,
    pub skill: Option<String>,
}

impl RankingFilter {
    /// Matches rankings of `subject` for skills named `skill`.
    pub fn subject_skill(subject: impl Into<String>, skill: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            observer: None,
            skill: Some(skill.into()),
        }
    }
}

/// Operations available inside one store transaction.
pub trait RankingRepository {
    fn create_person(&self, person: &NewPerson) -> RepoResult<PersonId>;
    /// Returns the oldest person with exactly this name.
    fn find_person_by_name(&self, name: &str) -> RepoResult<Option<Person>>;
    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>>;
    fn create_skill(&self, skill: &NewSkill) -> RepoResult<SkillId>;
    fn get_skill(&self, id: SkillId) -> RepoResult<Option<Skill>>;
    fn create_ranking(&self, ranking: &NewRanking) -> RepoResult<RankingId>;
    fn get_ranking(&self, id: RankingId) -> RepoResult<Option<Ranking>>;
    /// Returns all rankings matching `filter`, ordered by id.
    fn find_rankings(&self, filter: &RankingFilter) -> RepoResult<Vec<Ranking>>;
    fn update_ranking_value(&self, id: RankingId, value: i32) -> RepoResult<()>;
    fn delete_ranking(&self, id: RankingId) -> RepoResult<()>;
}

/// Transaction boundary over a ranking store.
pub trait RankingStore {
    /// Runs `work` inside one transaction and commits when it succeeds.
    ///
    /// # Errors
    /// Returns the error produced by `work`, or a store error when the
    /// transaction cannot begin or commit. Nothing is committed on error.
    fn with_transaction<T, E, F>(&mut self, work: F) -> Result<T, E>
    where
        E: From<RepoError>,
        F: FnOnce(&dyn RankingRepository) -> Result<T, E>;

    /// Runs read-only `work` inside one transaction.
    ///
    /// Implementations may avoid taking a write lock. The default delegates
    /// to [`RankingStore::with_transaction`].
    ///
    /// # Errors
    /// Same as [`RankingStore::with_transaction`].
    fn with_read_transaction<T, E, F>(&mut self, work: F) -> Result<T, E>
    where
        E: From<RepoError>,
        F: FnOnce(&dyn RankingRepository) -> Result<T, E>,
    {
        self.with_transaction(work)
    }
}

/// SQLite-backed repository bound to a connection or open transaction.
pub struct SqliteRankingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRankingRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RankingRepository for SqliteRankingRepository<'_> {
    fn create_person(&self, person: &NewPerson) -> RepoResult<PersonId> {
        person.validate()?;
        self.conn.execute(
            "INSERT INTO people (name) VALUES (?1);",
            [person.name.as_str()],
        )?;
        Ok(PersonId(self.conn.last_insert_rowid()))
    }

    fn find_person_by_name(&self, name: &str) -> RepoResult<Option<Person>> {
        let person = self
            .conn
            .query_row(
                "SELECT id, name FROM people WHERE name = ?1 ORDER BY id ASC LIMIT 1;",
                [name],
                |row| {
                    Ok(Person {
                        id: PersonId(row.get("id")?),
                        name: row.get("name")?,
                    })
                },
            )
            .optional()?;
        Ok(person)
    }

    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>> {
        let person = self
            .conn
            .query_row("SELECT id, name FROM people WHERE id = ?1;", [id.0], |row| {
                Ok(Person {
                    id: PersonId(row.get("id")?),
                    name: row.get("name")?,
                })
            })
            .optional()?;
        Ok(person)
    }

    fn create_skill(&self, skill: &NewSkill) -> RepoResult<SkillId> {
        skill.validate()?;
        self.conn.execute(
            "INSERT INTO skills (name) VALUES (?1);",
            [skill.name.as_str()],
        )?;
        Ok(SkillId(self.conn.last_insert_rowid()))
    }

    fn get_skill(&self, id: SkillId) -> RepoResult<Option<Skill>> {
        let skill = self
            .conn
            .query_row("SELECT id, name FROM skills WHERE id = ?1;", [id.0], |row| {
                Ok(Skill {
                    id: SkillId(row.get("id")?),
                    name: row.get("name")?,
                })
            })
            .optional()?;
        Ok(skill)
    }

    fn create_ranking(&self, ranking: &NewRanking) -> RepoResult<RankingId> {
        self.conn.execute(
            "INSERT INTO rankings (subject_id, observer_id, skill_id, value)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                ranking.subject_id.0,
                ranking.observer_id.0,
                ranking.skill_id.0,
                ranking.value,
            ],
        )?;
        let id = RankingId(self.conn.last_insert_rowid());
        debug!("event=ranking_insert module=repo status=ok ranking_id={id}");
        Ok(id)
    }

    fn get_ranking(&self, id: RankingId) -> RepoResult<Option<Ranking>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RANKING_SELECT_SQL} WHERE r.id = ?1;"))?;
        let mut rows = stmt.query([id.0])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_ranking_row(row)?));
        }
        Ok(None)
    }

    fn find_rankings(&self, filter: &RankingFilter) -> RepoResult<Vec<Ranking>> {
        let mut sql = format!("{RANKING_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(subject) = filter.subject.as_ref() {
            sql.push_str(" AND s.name = ?");
            bind_values.push(Value::Text(subject.clone()));
        }
        if let Some(observer) = filter.observer.as_ref() {
            sql.push_str(" AND o.name = ?");
            bind_values.push(Value::Text(observer.clone()));
        }
        if let Some(skill) = filter.skill.as_ref() {
            sql.push_str(" AND k.name = ?");
            bind_values.push(Value::Text(skill.clone()));
        }
        sql.push_str(" ORDER BY r.id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut rankings = Vec::new();
        while let Some(row) = rows.next()? {
            rankings.push(parse_ranking_row(row)?);
        }
        Ok(rankings)
    }

    fn update_ranking_value(&self, id: RankingId, value: i32) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE rankings SET value = ?1 WHERE id = ?2;",
            params![value, id.0],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "ranking",
                id: id.0,
            });
        }
        Ok(())
    }

    fn delete_ranking(&self, id: RankingId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM rankings WHERE id = ?1;", [id.0])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "ranking",
                id: id.0,
            });
        }
        Ok(())
    }
}

/// Ranking store owning one SQLite connection.
///
/// The caller opens the connection (see [`crate::db::open_db`]) and owns the
/// store lifetime; dropping the store closes the connection.
pub struct SqliteRankingStore {
    conn: Connection,
}

impl SqliteRankingStore {
    /// Wraps a migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Read access to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Releases the underlying connection.
    pub fn into_inner(self) -> Connection {
        self.conn
    }

    fn run_in_transaction<T, E, F>(&mut self, behavior: TransactionBehavior, work: F) -> Result<T, E>
    where
        E: From<RepoError>,
        F: FnOnce(&dyn RankingRepository) -> Result<T, E>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(behavior)
            .map_err(RepoError::from)?;
        let repo = SqliteRankingRepository::new(&tx);
        let value = work(&repo)?;
        tx.commit().map_err(RepoError::from)?;
        Ok(value)
    }
}

impl RankingStore for SqliteRankingStore {
    fn with_transaction<T, E, F>(&mut self, work: F) -> Result<T, E>
    where
        E: From<RepoError>,
        F: FnOnce(&dyn RankingRepository) -> Result<T, E>,
    {
        // IMMEDIATE takes the write lock up front so find-then-create steps
        // cannot interleave with another writer on the same database.
        self.run_in_transaction(TransactionBehavior::Immediate, work)
    }

    fn with_read_transaction<T, E, F>(&mut self, work: F) -> Result<T, E>
    where
        E: From<RepoError>,
        F: FnOnce(&dyn RankingRepository) -> Result<T, E>,
    {
        // DEFERRED only takes a shared lock on first read, so readers do not
        // queue behind an open writer.
        self.run_in_transaction(TransactionBehavior::Deferred, work)
    }
}

fn parse_ranking_row(row: &Row<'_>) -> RepoResult<Ranking> {
    let value: i64 = row.get("value")?;
    let value = i32::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!("ranking value `{value}` out of range in rankings.value"))
    })?;

    Ok(Ranking {
        id: RankingId(row.get("id")?),
        subject: Person {
            id: PersonId(row.get("subject_id")?),
            name: row.get("subject_name")?,
        },
        observer: Person {
            id: PersonId(row.get("observer_id")?),
            name: row.get("observer_name")?,
        },
        skill: Skill {
            id: SkillId(row.get("skill_id")?),
            name: row.get("skill_name")?,
        },
        value,
    })
}
