//! crates/agendas_core/src/repositories/messages.rs
//!
//! Contact-message inbox operations (`messages.json`). Message ids are
//! strings derived from the creation timestamp, unlike the integer ids of
//! the other entities.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};

use crate::domain::{InboxSnapshot, Message, NewMessage};
use crate::ports::{PortError, PortResult, RecordStore};

#[derive(Clone)]
pub struct MessageRepository {
    store: Arc<dyn RecordStore<Message>>,
}

impl MessageRepository {
    pub fn new(store: Arc<dyn RecordStore<Message>>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Vec<Message> {
        self.store.load_all().await
    }

    /// The full collection plus the count of unread messages, recomputed
    /// from storage on every call.
    pub async fn snapshot(&self) -> InboxSnapshot {
        let messages = self.store.load_all().await;
        let unread_count = messages.iter().filter(|m| !m.lu).count();
        InboxSnapshot {
            messages,
            unread_count,
        }
    }

    /// Persists a new, unread message with a timestamp-derived id.
    pub async fn send(&self, data: NewMessage) -> PortResult<Message> {
        let mut messages = self.store.load_all().await;

        let now = Utc::now();
        let message = Message {
            id: now.timestamp_millis().to_string(),
            nom: data.nom,
            email: data.email,
            sujet: data.sujet,
            message: data.message,
            date_envoi: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            lu: false,
        };
        messages.push(message.clone());
        self.store.persist_all(&messages).await?;
        Ok(message)
    }

    pub async fn mark_read(&self, id: &str) -> PortResult<Message> {
        self.set_read(id, true).await
    }

    pub async fn mark_unread(&self, id: &str) -> PortResult<Message> {
        self.set_read(id, false).await
    }

    async fn set_read(&self, id: &str, lu: bool) -> PortResult<Message> {
        let mut messages = self.store.load_all().await;

        let index = messages
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| PortError::NotFound("Message non trouvé".into()))?;

        messages[index].lu = lu;
        let updated = messages[index].clone();
        self.store.persist_all(&messages).await?;
        Ok(updated)
    }

    /// Removes the message and returns it, so the API can echo what was
    /// deleted.
    pub async fn delete(&self, id: &str) -> PortResult<Message> {
        let mut messages = self.store.load_all().await;

        let index = messages
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| PortError::NotFound("Message non trouvé".into()))?;

        let deleted = messages.remove(index);
        self.store.persist_all(&messages).await?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn repo() -> MessageRepository {
        MessageRepository::new(Arc::new(MemoryStore::new()))
    }

    fn new_message(sujet: &str) -> NewMessage {
        NewMessage {
            nom: "Claire Dubois".into(),
            email: "claire@example.com".into(),
            sujet: sujet.into(),
            message: "Bonjour, auriez-vous un créneau samedi ?".into(),
        }
    }

    #[tokio::test]
    async fn send_creates_unread_message_with_timestamp_id() {
        let repo = repo();
        let sent = repo.send(new_message("Demande de créneau")).await.unwrap();

        assert!(!sent.lu);
        assert!(sent.id.parse::<i64>().is_ok());
        assert_eq!(repo.get_all().await, vec![sent]);
    }

    #[tokio::test]
    async fn snapshot_counts_unread_messages() {
        let repo = repo();
        let first = repo.send(new_message("Premier")).await.unwrap();
        repo.send(new_message("Deuxième")).await.unwrap();

        repo.mark_read(&first.id).await.unwrap();

        let snapshot = repo.snapshot().await;
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.unread_count, 1);
    }

    #[tokio::test]
    async fn mark_read_then_unread_restores_flag() {
        let repo = repo();
        let sent = repo.send(new_message("Aller-retour")).await.unwrap();

        let read = repo.mark_read(&sent.id).await.unwrap();
        assert!(read.lu);

        let unread = repo.mark_unread(&sent.id).await.unwrap();
        assert!(!unread.lu);
        assert_eq!(repo.snapshot().await.unread_count, 1);
    }

    #[tokio::test]
    async fn delete_returns_the_removed_message() {
        let repo = repo();
        let sent = repo.send(new_message("À supprimer")).await.unwrap();

        let deleted = repo.delete(&sent.id).await.unwrap();
        assert_eq!(deleted, sent);
        assert!(repo.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn operations_on_unknown_id_report_not_found() {
        let repo = repo();
        assert!(matches!(
            repo.mark_read("123456").await.unwrap_err(),
            PortError::NotFound(_)
        ));
        assert!(matches!(
            repo.delete("123456").await.unwrap_err(),
            PortError::NotFound(_)
        ));
    }
}
