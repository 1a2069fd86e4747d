//! crates/agendas_core/src/repositories/clients.rs
//!
//! CRUD operations for the clients collection (`clients.json`). Unlike user
//! accounts, a client email is optional; uniqueness is only enforced when an
//! email is actually present.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{Client, ClientUpdate, NewClient};
use crate::ports::{PortError, PortResult, RecordStore};

#[derive(Clone)]
pub struct ClientRepository {
    store: Arc<dyn RecordStore<Client>>,
}

impl ClientRepository {
    pub fn new(store: Arc<dyn RecordStore<Client>>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Vec<Client> {
        self.store.load_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Option<Client> {
        self.store.load_all().await.into_iter().find(|c| c.id == id)
    }

    pub async fn get_by_email(&self, email: &str) -> Option<Client> {
        self.store
            .load_all()
            .await
            .into_iter()
            .find(|c| c.email == email)
    }

    pub async fn save(&self, data: NewClient) -> PortResult<Client> {
        let mut clients = self.store.load_all().await;

        if !data.email.is_empty() && clients.iter().any(|c| c.email == data.email) {
            return Err(PortError::Conflict(
                "Cet email est déjà utilisé par un autre client".into(),
            ));
        }

        let client = Client {
            id: super::next_id(clients.iter().map(|c| c.id)),
            nom: data.nom,
            prenom: data.prenom,
            email: data.email,
            telephone: data.telephone,
            adresse: data.adresse,
            date_naissance: data.date_naissance,
            notes: data.notes,
            date_creation: data
                .date_creation
                .unwrap_or_else(|| Utc::now().date_naive().to_string()),
            derniere_visite: data.derniere_visite,
            status: data.status.unwrap_or_else(|| "actif".into()),
            total_rendez_vous: data.total_rendez_vous.unwrap_or(0),
        };
        clients.push(client.clone());
        self.store.persist_all(&clients).await?;
        Ok(client)
    }

    pub async fn update(&self, id: i64, data: ClientUpdate) -> PortResult<Client> {
        let mut clients = self.store.load_all().await;

        let index = clients
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| PortError::NotFound("Client non trouvé".into()))?;

        if let Some(email) = &data.email {
            if !email.is_empty()
                && *email != clients[index].email
                && clients.iter().any(|c| c.email == *email && c.id != id)
            {
                return Err(PortError::Conflict(
                    "Cet email est déjà utilisé par un autre client".into(),
                ));
            }
        }

        let client = &mut clients[index];
        if let Some(nom) = data.nom {
            client.nom = nom;
        }
        if let Some(prenom) = data.prenom {
            client.prenom = prenom;
        }
        if let Some(email) = data.email {
            client.email = email;
        }
        if let Some(telephone) = data.telephone {
            client.telephone = telephone;
        }
        if let Some(adresse) = data.adresse {
            client.adresse = adresse;
        }
        if let Some(date_naissance) = data.date_naissance {
            client.date_naissance = Some(date_naissance);
        }
        if let Some(notes) = data.notes {
            client.notes = notes;
        }
        if let Some(date_creation) = data.date_creation {
            client.date_creation = date_creation;
        }
        if let Some(derniere_visite) = data.derniere_visite {
            client.derniere_visite = Some(derniere_visite);
        }
        if let Some(status) = data.status {
            client.status = status;
        }
        if let Some(total) = data.total_rendez_vous {
            client.total_rendez_vous = total;
        }
        let updated = client.clone();

        self.store.persist_all(&clients).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> PortResult<()> {
        let clients = self.store.load_all().await;
        let remaining: Vec<Client> = clients.iter().filter(|c| c.id != id).cloned().collect();

        if remaining.len() == clients.len() {
            return Err(PortError::NotFound("Client non trouvé".into()));
        }

        self.store.persist_all(&remaining).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn repo() -> ClientRepository {
        ClientRepository::new(Arc::new(MemoryStore::new()))
    }

    fn new_client(nom: &str, email: &str) -> NewClient {
        NewClient {
            nom: nom.into(),
            prenom: "Marie".into(),
            email: email.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn save_applies_defaults() {
        let repo = repo();
        let created = repo.save(new_client("Durand", "")).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.status, "actif");
        assert_eq!(created.total_rendez_vous, 0);
        assert_eq!(created.date_creation, Utc::now().date_naive().to_string());
        assert_eq!(created.derniere_visite, None);
    }

    #[tokio::test]
    async fn empty_emails_do_not_collide() {
        let repo = repo();
        repo.save(new_client("Durand", "")).await.unwrap();
        // A second client without an email is fine; only present emails are
        // checked for uniqueness.
        repo.save(new_client("Martin", "")).await.unwrap();
        assert_eq!(repo.get_all().await.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = repo();
        repo.save(new_client("Durand", "marie@example.com"))
            .await
            .unwrap();
        let err = repo
            .save(new_client("Martin", "marie@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Conflict(_)));
        assert_eq!(repo.get_all().await.len(), 1);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let repo = repo();
        let created = repo
            .save(new_client("Durand", "marie@example.com"))
            .await
            .unwrap();

        let updated = repo
            .update(
                created.id,
                ClientUpdate {
                    derniere_visite: Some("2025-03-14".into()),
                    total_rendez_vous: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.derniere_visite.as_deref(), Some("2025-03-14"));
        assert_eq!(updated.total_rendez_vous, 3);
        assert_eq!(updated.nom, created.nom);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.date_creation, created.date_creation);
    }

    #[tokio::test]
    async fn delete_missing_client_is_not_found() {
        let repo = repo();
        repo.save(new_client("Durand", "")).await.unwrap();
        let err = repo.delete(42).await.unwrap_err();
        assert!(matches!(err, PortError::NotFound(_)));
        assert_eq!(repo.get_all().await.len(), 1);
    }
}
