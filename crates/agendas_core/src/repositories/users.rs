//! crates/agendas_core/src/repositories/users.rs
//!
//! CRUD and credential operations for user accounts, backed by the
//! `users.json` collection. Emails are unique across all users; comparisons
//! are case-sensitive exact matches.

use std::sync::Arc;

use crate::domain::{NewUser, User, UserUpdate};
use crate::ports::{PortError, PortResult, RecordStore};

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn RecordStore<User>>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn RecordStore<User>>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Vec<User> {
        self.store.load_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Option<User> {
        self.store.load_all().await.into_iter().find(|u| u.id == id)
    }

    pub async fn get_by_email(&self, email: &str) -> Option<User> {
        self.store
            .load_all()
            .await
            .into_iter()
            .find(|u| u.email == email)
    }

    /// Creates a user. Fails with a conflict when the email is already taken.
    pub async fn save(&self, data: NewUser) -> PortResult<User> {
        let mut users = self.store.load_all().await;

        if users.iter().any(|u| u.email == data.email) {
            return Err(PortError::Conflict("Cet email est déjà utilisé".into()));
        }

        let user = User {
            id: super::next_id(users.iter().map(|u| u.id)),
            nom: data.nom,
            prenom: data.prenom,
            email: data.email,
            password: data.password,
            genre: data.genre,
            adresse: data.adresse,
            phone: data.phone,
        };
        users.push(user.clone());
        self.store.persist_all(&users).await?;
        Ok(user)
    }

    /// Merges the present fields of `data` onto the stored record. When the
    /// email changes it is re-validated for uniqueness against all other
    /// users first.
    pub async fn update(&self, id: i64, data: UserUpdate) -> PortResult<User> {
        let mut users = self.store.load_all().await;

        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| PortError::NotFound("Utilisateur non trouvé".into()))?;

        if let Some(email) = &data.email {
            if *email != users[index].email
                && users.iter().any(|u| u.email == *email && u.id != id)
            {
                return Err(PortError::Conflict("Cet email est déjà utilisé".into()));
            }
        }

        let user = &mut users[index];
        if let Some(nom) = data.nom {
            user.nom = nom;
        }
        if let Some(prenom) = data.prenom {
            user.prenom = prenom;
        }
        if let Some(email) = data.email {
            user.email = email;
        }
        if let Some(genre) = data.genre {
            user.genre = genre;
        }
        if let Some(adresse) = data.adresse {
            user.adresse = adresse;
        }
        if let Some(phone) = data.phone {
            user.phone = phone;
        }
        let updated = user.clone();

        self.store.persist_all(&users).await?;
        Ok(updated)
    }

    /// Overwrites the password of the user with the given email. Refuses the
    /// no-op case where the new password equals the stored one, and performs
    /// no write in that case.
    pub async fn update_password(&self, email: &str, new_password: &str) -> PortResult<()> {
        let mut users = self.store.load_all().await;

        let index = users
            .iter()
            .position(|u| u.email == email)
            .ok_or_else(|| PortError::NotFound("Utilisateur non trouvé".into()))?;

        if users[index].password == new_password {
            return Err(PortError::Conflict(
                "Le nouveau mot de passe doit être différent de l'ancien".into(),
            ));
        }

        users[index].password = new_password.to_string();
        self.store.persist_all(&users).await
    }

    pub async fn delete(&self, id: i64) -> PortResult<()> {
        let users = self.store.load_all().await;
        let remaining: Vec<User> = users.iter().filter(|u| u.id != id).cloned().collect();

        if remaining.len() == users.len() {
            return Err(PortError::NotFound("Utilisateur non trouvé".into()));
        }

        self.store.persist_all(&remaining).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn repo() -> UserRepository {
        UserRepository::new(Arc::new(MemoryStore::new()))
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            nom: "Rakoto".into(),
            prenom: "Jean".into(),
            email: email.into(),
            password: "Secret#123".into(),
            genre: "homme".into(),
            adresse: "12 rue des Lilas".into(),
            phone: "0601020304".into(),
        }
    }

    #[tokio::test]
    async fn save_assigns_id_and_round_trips() {
        let repo = repo();
        let created = repo.save(new_user("jean@example.com")).await.unwrap();
        assert_eq!(created.id, 1);

        let fetched = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn save_rejects_duplicate_email_without_appending() {
        let repo = repo();
        repo.save(new_user("jean@example.com")).await.unwrap();

        let err = repo.save(new_user("jean@example.com")).await.unwrap_err();
        assert!(matches!(err, PortError::Conflict(_)));
        assert_eq!(repo.get_all().await.len(), 1);
    }

    #[tokio::test]
    async fn deleting_highest_id_makes_it_available_again() {
        let repo = repo();
        repo.save(new_user("a@example.com")).await.unwrap();
        let second = repo.save(new_user("b@example.com")).await.unwrap();
        assert_eq!(second.id, 2);

        repo.delete(second.id).await.unwrap();
        let third = repo.save(new_user("c@example.com")).await.unwrap();
        // max+1 assignment, not a persistent counter: the id is reused.
        assert_eq!(third.id, 2);
    }

    #[tokio::test]
    async fn update_preserves_absent_fields() {
        let repo = repo();
        let created = repo.save(new_user("jean@example.com")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UserUpdate {
                    adresse: Some("7 avenue du Port".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.adresse, "7 avenue du Port");
        assert_eq!(updated.nom, created.nom);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.password, created.password);
    }

    #[tokio::test]
    async fn update_rejects_email_taken_by_another_user() {
        let repo = repo();
        repo.save(new_user("jean@example.com")).await.unwrap();
        let other = repo.save(new_user("paul@example.com")).await.unwrap();

        let err = repo
            .update(
                other.id,
                UserUpdate {
                    email: Some("jean@example.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_password_refuses_identical_password() {
        let repo = repo();
        let created = repo.save(new_user("jean@example.com")).await.unwrap();

        let err = repo
            .update_password(&created.email, &created.password)
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Conflict(_)));

        // No write happened: the stored password is unchanged.
        let stored = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(stored.password, created.password);
    }

    #[tokio::test]
    async fn delete_missing_id_reports_not_found_and_leaves_store_untouched() {
        let repo = repo();
        let created = repo.save(new_user("jean@example.com")).await.unwrap();

        let err = repo.delete(999).await.unwrap_err();
        assert!(matches!(err, PortError::NotFound(_)));
        assert_eq!(repo.get_all().await, vec![created]);
    }
}
