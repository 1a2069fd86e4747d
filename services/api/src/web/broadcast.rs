//! services/api/src/web/broadcast.rs
//!
//! The notification hub keeping real-time subscribers in sync with the
//! message store. Every mutation funnels through here: the write happens
//! first, then the freshly persisted collection is re-read and pushed to all
//! subscribers as a full snapshot with the recomputed unread count.

use tokio::sync::broadcast;

use agendas_core::domain::{InboxSnapshot, Message, NewMessage};
use agendas_core::ports::PortResult;
use agendas_core::repositories::MessageRepository;

const CHANNEL_CAPACITY: usize = 32;

pub struct MessageHub {
    repo: MessageRepository,
    tx: broadcast::Sender<InboxSnapshot>,
}

impl MessageHub {
    pub fn new(repo: MessageRepository) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { repo, tx }
    }

    /// Subscribes a new real-time client. The subscriber only receives
    /// snapshots produced after this call; it can ask for the current state
    /// explicitly via [`MessageHub::snapshot`].
    pub fn subscribe(&self) -> broadcast::Receiver<InboxSnapshot> {
        self.tx.subscribe()
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.repo.get_all().await
    }

    pub async fn snapshot(&self) -> InboxSnapshot {
        self.repo.snapshot().await
    }

    pub async fn send(&self, data: NewMessage) -> PortResult<Message> {
        let message = self.repo.send(data).await?;
        self.broadcast_update().await;
        Ok(message)
    }

    pub async fn mark_read(&self, id: &str) -> PortResult<Message> {
        let message = self.repo.mark_read(id).await?;
        self.broadcast_update().await;
        Ok(message)
    }

    pub async fn mark_unread(&self, id: &str) -> PortResult<Message> {
        let message = self.repo.mark_unread(id).await?;
        self.broadcast_update().await;
        Ok(message)
    }

    pub async fn delete(&self, id: &str) -> PortResult<Message> {
        let message = self.repo.delete(id).await?;
        self.broadcast_update().await;
        Ok(message)
    }

    /// Pushes the current state to every subscriber. A send error only means
    /// nobody is listening right now, which is fine: a client connecting
    /// later gets the real state on its next snapshot.
    async fn broadcast_update(&self) {
        let snapshot = self.repo.snapshot().await;
        let _ = self.tx.send(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agendas_core::memory::MemoryStore;
    use std::sync::Arc;

    fn hub() -> MessageHub {
        MessageHub::new(MessageRepository::new(Arc::new(MemoryStore::new())))
    }

    fn contact(sujet: &str) -> NewMessage {
        NewMessage {
            nom: "Claire Dubois".into(),
            email: "claire@example.com".into(),
            sujet: sujet.into(),
            message: "Bonjour".into(),
        }
    }

    #[tokio::test]
    async fn each_mutation_broadcasts_one_snapshot() {
        let hub = hub();
        let mut rx = hub.subscribe();

        let sent = hub.send(contact("Premier")).await.unwrap();
        let snapshot = rx.try_recv().unwrap();
        assert_eq!(snapshot.messages.len(), 1);
        assert_eq!(snapshot.unread_count, 1);
        // Exactly one event per mutation.
        assert!(rx.try_recv().is_err());

        hub.mark_read(&sent.id).await.unwrap();
        let snapshot = rx.try_recv().unwrap();
        assert_eq!(snapshot.unread_count, 0);
        assert!(rx.try_recv().is_err());

        hub.mark_unread(&sent.id).await.unwrap();
        let snapshot = rx.try_recv().unwrap();
        assert_eq!(snapshot.unread_count, 1);

        hub.delete(&sent.id).await.unwrap();
        let snapshot = rx.try_recv().unwrap();
        assert!(snapshot.messages.is_empty());
        assert_eq!(snapshot.unread_count, 0);
    }

    #[tokio::test]
    async fn failed_mutation_broadcasts_nothing() {
        let hub = hub();
        let mut rx = hub.subscribe();

        assert!(hub.mark_read("123").await.is_err());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn broadcasting_without_subscribers_is_harmless() {
        let hub = hub();
        hub.send(contact("Sans abonnés")).await.unwrap();
        assert_eq!(hub.snapshot().await.unread_count, 1);
    }
}
