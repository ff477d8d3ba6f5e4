//! Conversations and direct messages.
//!
//! Conversations are created lazily: sending to an id that does not exist
//! yet creates the conversation with the sender as its sole participant.
//! Messaging is poll-based; there is no push channel.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::storage::{commit, Database, MessageRecord, MessagingStore, ParticipantInfo, UserRecord};

/// A conversation as shown in the caller's inbox.
#[derive(Debug, Clone)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub last_message: String,
}

/// A message as shown to a specific caller.
#[derive(Debug, Clone)]
pub struct MessageView {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub is_mine: bool,
}

/// List the caller's conversations with a title and last-message preview.
pub fn list_conversations(
    db: &mut Database,
    user: &UserRecord,
) -> Result<Vec<ConversationSummary>, AppError> {
    let tx = db.transaction()?;
    let store = MessagingStore::new(&tx);

    let mut items = Vec::new();
    for conversation_id in store.conversation_ids_for_user(&user.id)? {
        let others = store.other_participants(&conversation_id, &user.id)?;
        let last_message = store
            .last_message_text(&conversation_id)?
            .unwrap_or_default();
        items.push(ConversationSummary {
            id: conversation_id,
            title: conversation_title(&others),
            last_message,
        });
    }

    commit(tx)?;
    Ok(items)
}

/// Title for a conversation from the caller's point of view.
///
/// One other participant: their display name, falling back to email. More
/// than one (group thread): all their names joined. None: the literal
/// "Conversation". Never an arbitrary pick.
fn conversation_title(others: &[ParticipantInfo]) -> String {
    match others {
        [] => "Conversation".to_string(),
        [only] => participant_name(only),
        several => several
            .iter()
            .map(participant_name)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn participant_name(participant: &ParticipantInfo) -> String {
    participant
        .display_name
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| participant.email.clone())
}

/// Messages of a conversation, ascending by creation time, flagged relative
/// to the caller. `Forbidden` when the caller is not a participant - the
/// same error whether or not the conversation exists, so existence is not
/// leaked.
pub fn list_messages(
    db: &mut Database,
    user: &UserRecord,
    conversation_id: &str,
) -> Result<Vec<MessageView>, AppError> {
    let tx = db.transaction()?;
    let store = MessagingStore::new(&tx);

    ensure_participant(&store, conversation_id, &user.id)?;
    let messages = store.list_messages(conversation_id)?;
    commit(tx)?;

    Ok(messages
        .into_iter()
        .map(|message| MessageView {
            id: message.id,
            text: message.text,
            created_at: message.created_at,
            is_mine: message.sender_id == user.id,
        })
        .collect())
}

/// Send a message, lazily creating the conversation when its id is new.
pub fn send_message(
    db: &mut Database,
    user: &UserRecord,
    conversation_id: &str,
    text: &str,
) -> Result<MessageView, AppError> {
    if text.is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }

    let now = Utc::now();
    let tx = db.transaction()?;
    let store = MessagingStore::new(&tx);

    if !store.conversation_exists(conversation_id)? {
        store.insert_conversation(conversation_id, now)?;
        store.add_participant(conversation_id, &user.id)?;
    }

    ensure_participant(&store, conversation_id, &user.id)?;

    let message = MessageRecord {
        id: Uuid::new_v4().to_string(),
        conversation_id: conversation_id.to_string(),
        sender_id: user.id.clone(),
        text: text.to_string(),
        created_at: now,
    };
    store.insert_message(&message)?;
    commit(tx)?;

    Ok(MessageView {
        id: message.id,
        text: message.text,
        created_at: message.created_at,
        is_mine: true,
    })
}

fn ensure_participant(
    store: &MessagingStore<'_>,
    conversation_id: &str,
    user_id: &str,
) -> Result<(), AppError> {
    if store.is_participant(conversation_id, user_id)? {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Not a participant in this conversation".to_string(),
        ))
    }
}
