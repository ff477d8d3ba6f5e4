//! Conversation, participant, and message row access.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::storage::database::DatabaseError;
use crate::storage::parse_timestamp;

/// A stored message row.
#[derive(Debug, Clone)]
pub struct MessageRecord {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Identity attributes of a conversation participant, for titling.
#[derive(Debug, Clone)]
pub struct ParticipantInfo {
    pub display_name: Option<String>,
    pub email: String,
}

/// Store for conversations and messages.
pub struct MessagingStore<'a> {
    conn: &'a Connection,
}

impl<'a> MessagingStore<'a> {
    /// Create a new messaging store with the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    // ========== Conversation Operations ==========

    /// Whether a conversation row exists.
    pub fn conversation_exists(&self, conversation_id: &str) -> Result<bool, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM conversations WHERE id = ?1",
                params![conversation_id],
                |row| row.get(0),
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(count > 0)
    }

    /// Insert a conversation row.
    pub fn insert_conversation(
        &self,
        conversation_id: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO conversations (id, created_at) VALUES (?1, ?2)",
                params![conversation_id, created_at.to_rfc3339()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(())
    }

    /// Add a user to a conversation.
    pub fn add_participant(
        &self,
        conversation_id: &str,
        user_id: &str,
    ) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO conversation_participants (conversation_id, user_id)
                 VALUES (?1, ?2)",
                params![conversation_id, user_id],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(inner, _)
                    if inner.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    DatabaseError::ConstraintViolation(e.to_string())
                }
                other => DatabaseError::QueryFailed(other.to_string()),
            })?;
        Ok(())
    }

    /// Whether a user participates in a conversation.
    pub fn is_participant(
        &self,
        conversation_id: &str,
        user_id: &str,
    ) -> Result<bool, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM conversation_participants
                 WHERE conversation_id = ?1 AND user_id = ?2",
                params![conversation_id, user_id],
                |row| row.get(0),
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(count > 0)
    }

    /// Ids of every conversation the user participates in.
    pub fn conversation_ids_for_user(&self, user_id: &str) -> Result<Vec<String>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT conversation_id FROM conversation_participants WHERE user_id = ?1",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?);
        }
        Ok(ids)
    }

    /// Every participant of a conversation except the given user, ordered
    /// by email for deterministic titling.
    pub fn other_participants(
        &self,
        conversation_id: &str,
        user_id: &str,
    ) -> Result<Vec<ParticipantInfo>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT u.display_name, u.email
                 FROM conversation_participants cp
                 JOIN users u ON u.id = cp.user_id
                 WHERE cp.conversation_id = ?1 AND cp.user_id != ?2
                 ORDER BY u.email",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![conversation_id, user_id], |row| {
                Ok(ParticipantInfo {
                    display_name: row.get(0)?,
                    email: row.get(1)?,
                })
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut participants = Vec::new();
        for row in rows {
            participants.push(row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?);
        }
        Ok(participants)
    }

    // ========== Message Operations ==========

    /// Insert a message row.
    pub fn insert_message(&self, message: &MessageRecord) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO messages (id, conversation_id, sender_id, text, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    message.id,
                    message.conversation_id,
                    message.sender_id,
                    message.text,
                    message.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(())
    }

    /// Messages of a conversation, ascending by creation time.
    pub fn list_messages(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<MessageRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, conversation_id, sender_id, text, created_at
                 FROM messages WHERE conversation_id = ?1 ORDER BY created_at ASC",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![conversation_id], |row| {
                let created_str: String = row.get(4)?;
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    created_str,
                ))
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut messages = Vec::new();
        for row in rows {
            let (id, conversation_id, sender_id, text, created_str) =
                row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            messages.push(MessageRecord {
                id,
                conversation_id,
                sender_id,
                text,
                created_at: parse_timestamp(&created_str)?,
            });
        }
        Ok(messages)
    }

    /// Text of the most recent message in a conversation, if any.
    pub fn last_message_text(
        &self,
        conversation_id: &str,
    ) -> Result<Option<String>, DatabaseError> {
        let result = self.conn.query_row(
            "SELECT text FROM messages WHERE conversation_id = ?1
             ORDER BY created_at DESC LIMIT 1",
            params![conversation_id],
            |row| row.get(0),
        );

        match result {
            Ok(text) => Ok(Some(text)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{AccountsStore, Database, UserRecord};
    use uuid::Uuid;

    fn insert_user(db: &Database, email: &str, display_name: Option<&str>) -> String {
        let user = UserRecord {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            display_name: display_name.map(str::to_string),
            created_at: Utc::now(),
        };
        AccountsStore::new(db.connection())
            .insert_user(&user)
            .expect("Failed to insert user");
        user.id
    }

    fn message(conversation_id: &str, sender_id: &str, text: &str) -> MessageRecord {
        MessageRecord {
            id: Uuid::new_v4().to_string(),
            conversation_id: conversation_id.to_string(),
            sender_id: sender_id.to_string(),
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_conversation_membership() {
        let db = Database::open_in_memory().expect("Failed to create database");
        let store = MessagingStore::new(db.connection());
        let alice = insert_user(&db, "alice@example.com", Some("Alice"));
        let bob = insert_user(&db, "bob@example.com", None);

        store
            .insert_conversation("conv-1", Utc::now())
            .expect("Failed to insert conversation");
        store
            .add_participant("conv-1", &alice)
            .expect("Failed to add participant");

        assert!(store.conversation_exists("conv-1").unwrap());
        assert!(store.is_participant("conv-1", &alice).unwrap());
        assert!(!store.is_participant("conv-1", &bob).unwrap());
        assert_eq!(store.conversation_ids_for_user(&alice).unwrap(), ["conv-1"]);
    }

    #[test]
    fn test_duplicate_participant_is_constraint_violation() {
        let db = Database::open_in_memory().expect("Failed to create database");
        let store = MessagingStore::new(db.connection());
        let alice = insert_user(&db, "alice@example.com", None);

        store.insert_conversation("conv-1", Utc::now()).unwrap();
        store.add_participant("conv-1", &alice).unwrap();

        assert!(matches!(
            store.add_participant("conv-1", &alice),
            Err(DatabaseError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn test_messages_ascending_and_last_text() {
        let db = Database::open_in_memory().expect("Failed to create database");
        let store = MessagingStore::new(db.connection());
        let alice = insert_user(&db, "alice@example.com", None);

        store.insert_conversation("conv-1", Utc::now()).unwrap();
        store.add_participant("conv-1", &alice).unwrap();

        store
            .insert_message(&message("conv-1", &alice, "first"))
            .unwrap();
        store
            .insert_message(&message("conv-1", &alice, "second"))
            .unwrap();

        let messages = store.list_messages("conv-1").unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "first");
        assert_eq!(messages[1].text, "second");

        assert_eq!(
            store.last_message_text("conv-1").unwrap().as_deref(),
            Some("second")
        );
        assert!(store.last_message_text("conv-2").unwrap().is_none());
    }

    #[test]
    fn test_other_participants() {
        let db = Database::open_in_memory().expect("Failed to create database");
        let store = MessagingStore::new(db.connection());
        let alice = insert_user(&db, "alice@example.com", Some("Alice"));
        let bob = insert_user(&db, "bob@example.com", Some("Bob"));

        store.insert_conversation("conv-1", Utc::now()).unwrap();
        store.add_participant("conv-1", &alice).unwrap();
        store.add_participant("conv-1", &bob).unwrap();

        let others = store.other_participants("conv-1", &alice).unwrap();
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].display_name.as_deref(), Some("Bob"));
        assert_eq!(others[0].email, "bob@example.com");
    }
}
