use skillrank_core::db::open_db_in_memory;
use skillrank_core::{
    Message, MessageId, MessageRepository, MessageService, MessageServiceError, NewMessage,
    RepoResult, SqliteMessageRepository,
};
use std::error::Error;

#[test]
fn save_and_read_back_message() {
    let conn = open_db_in_memory().unwrap();
    let service = MessageService::new(SqliteMessageRepository::new(&conn));

    let saved = service.save_message("Hello World!").unwrap();
    assert_eq!(saved.text, "Hello World!");

    let loaded = service.get_message(saved.id).unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert!(service.get_message(MessageId(999)).unwrap().is_none());
}

#[test]
fn list_messages_is_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let service = MessageService::new(SqliteMessageRepository::new(&conn));

    let first = service.save_message("first").unwrap();
    let second = service.save_message("second").unwrap();

    let listed = service.list_messages().unwrap();
    assert_eq!(listed, vec![first, second]);
}

#[test]
fn blank_message_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = MessageService::new(SqliteMessageRepository::new(&conn));

    let err = service.save_message("   ").unwrap_err();
    assert!(matches!(err, MessageServiceError::InvalidText(_)));
    assert!(err.source().is_some());
    assert!(service.list_messages().unwrap().is_empty());
}

/// Accepts writes but never returns them.
struct LosingRepository;

impl MessageRepository for LosingRepository {
    fn create_message(&self, _message: &NewMessage) -> RepoResult<MessageId> {
        Ok(MessageId(42))
    }

    fn get_message(&self, _id: MessageId) -> RepoResult<Option<Message>> {
        Ok(None)
    }

    fn list_messages(&self) -> RepoResult<Vec<Message>> {
        Ok(Vec::new())
    }
}

#[test]
fn missing_read_back_is_message_not_found() {
    let service = MessageService::new(LosingRepository);

    let err = service.save_message("lost").unwrap_err();
    assert!(matches!(err, MessageServiceError::MessageNotFound(MessageId(42))));
    assert_eq!(err.to_string(), "message not found: 42");
}
