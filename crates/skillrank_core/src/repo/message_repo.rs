//! Message repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths validate drafts before SQL mutations.
//! - Listing order is stable by ascending id.

use crate::model::message::{Message, MessageId, NewMessage};
use crate::repo::ranking_repo::RepoResult;
use rusqlite::{Connection, OptionalExtension, Row};

/// Repository interface for message persistence.
pub trait MessageRepository {
    fn create_message(&self, message: &NewMessage) -> RepoResult<MessageId>;
    fn get_message(&self, id: MessageId) -> RepoResult<Option<Message>>;
    fn list_messages(&self) -> RepoResult<Vec<Message>>;
}

/// SQLite-backed message repository.
pub struct SqliteMessageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMessageRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MessageRepository for SqliteMessageRepository<'_> {
    fn create_message(&self, message: &NewMessage) -> RepoResult<MessageId> {
        message.validate()?;
        self.conn.execute(
            "INSERT INTO messages (text) VALUES (?1);",
            [message.text.as_str()],
        )?;
        Ok(MessageId(self.conn.last_insert_rowid()))
    }

    fn get_message(&self, id: MessageId) -> RepoResult<Option<Message>> {
        let message = self
            .conn
            .query_row(
                "SELECT id, text FROM messages WHERE id = ?1;",
                [id.0],
                parse_message_row,
            )
            .optional()?;
        Ok(message)
    }

    fn list_messages(&self) -> RepoResult<Vec<Message>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, text FROM messages ORDER BY id ASC;")?;
        let messages = stmt
            .query_map([], parse_message_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(messages)
    }
}

fn parse_message_row(row: &Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        id: MessageId(row.get("id")?),
        text: row.get("text")?,
    })
}
