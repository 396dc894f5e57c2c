//! Message use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Validation failures surface as `InvalidText`, not as storage errors.

use crate::model::message::{Message, MessageId, NewMessage};
use crate::model::validation::ModelValidationError;
use crate::repo::message_repo::MessageRepository;
use crate::repo::ranking_repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for message use-cases.
#[derive(Debug)]
pub enum MessageServiceError {
    /// Message text failed validation.
    InvalidText(ModelValidationError),
    /// A just-written message could not be read back.
    MessageNotFound(MessageId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for MessageServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidText(err) => write!(f, "{err}"),
            Self::MessageNotFound(id) => write!(f, "message not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MessageServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidText(err) => Some(err),
            Self::MessageNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for MessageServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidText(err),
            other => Self::Repo(other),
        }
    }
}

pub type MessageServiceResult<T> = Result<T, MessageServiceError>;

/// Use-case service wrapper for message persistence.
pub struct MessageService<R: MessageRepository> {
    repo: R,
}

impl<R: MessageRepository> MessageService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a message and returns it with its assigned id.
    pub fn save_message(&self, text: impl Into<String>) -> MessageServiceResult<Message> {
        let draft = NewMessage::new(text);
        let id = self.repo.create_message(&draft)?;
        info!("event=message_save module=service status=ok message_id={id}");
        self.repo
            .get_message(id)?
            .ok_or(MessageServiceError::MessageNotFound(id))
    }

    pub fn get_message(&self, id: MessageId) -> MessageServiceResult<Option<Message>> {
        Ok(self.repo.get_message(id)?)
    }

    /// Lists all messages ordered by id.
    pub fn list_messages(&self) -> MessageServiceResult<Vec<Message>> {
        Ok(self.repo.list_messages()?)
    }
}
