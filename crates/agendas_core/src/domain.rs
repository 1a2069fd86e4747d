//! crates/agendas_core/src/domain.rs
//!
//! Defines the core data structures for the application.
//! The serde attributes pin the exact wire/file format: the persisted JSON
//! files and the REST payloads both use the historical French field names
//! with camelCase keys.

use serde::{Deserialize, Serialize};

/// A user account. `password` is stored in clear text, as in the original
/// service; keep it out of API responses via [`PublicUser`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub password: String,
    pub genre: String,
    pub adresse: String,
    pub phone: String,
}

/// The password-free view of a [`User`] returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub genre: String,
    pub adresse: String,
    pub phone: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nom: user.nom,
            prenom: user.prenom,
            email: user.email,
            genre: user.genre,
            adresse: user.adresse,
            phone: user.phone,
        }
    }
}

/// The fields required to create a [`User`]. The repository assigns the id.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub password: String,
    pub genre: String,
    pub adresse: String,
    pub phone: String,
}

/// A partial user update: present fields override, absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub genre: Option<String>,
    pub adresse: Option<String>,
    pub phone: Option<String>,
}

/// A client record of the agenda owner (not to be confused with API callers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    /// Empty string when the client has no email on file.
    pub email: String,
    pub telephone: String,
    pub adresse: String,
    pub date_naissance: Option<String>,
    pub notes: String,
    /// YYYY-MM-DD, set to the creation day by default.
    pub date_creation: String,
    pub derniere_visite: Option<String>,
    pub status: String,
    pub total_rendez_vous: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub nom: String,
    pub prenom: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub adresse: String,
    pub date_naissance: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub date_creation: Option<String>,
    pub derniere_visite: Option<String>,
    pub status: Option<String>,
    pub total_rendez_vous: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpdate {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub date_naissance: Option<String>,
    pub notes: Option<String>,
    pub date_creation: Option<String>,
    pub derniere_visite: Option<String>,
    pub status: Option<String>,
    pub total_rendez_vous: Option<i64>,
}

/// An appointment. `user_id` is a soft reference to the owning [`User`]:
/// it is compared by value when querying, never validated against the
/// user store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub user_id: i64,
    pub statut: String,
    pub nom: String,
    pub prenom: String,
    pub date_naissance: String,
    pub telephone: String,
    pub titre: String,
    pub description: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM
    pub heure: String,
    /// Duration in minutes.
    pub duree: i64,
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub user_id: i64,
    pub statut: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub date_naissance: Option<String>,
    pub telephone: Option<String>,
    pub titre: String,
    pub description: String,
    pub date: String,
    pub heure: String,
    pub duree: i64,
    pub location: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    pub user_id: Option<i64>,
    pub statut: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub date_naissance: Option<String>,
    pub telephone: Option<String>,
    pub titre: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub heure: Option<String>,
    pub duree: Option<i64>,
    pub location: Option<String>,
}

/// A contact message. The id is derived from the creation timestamp
/// (milliseconds since the epoch), so ids are unique by construction and
/// sort chronologically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub nom: String,
    pub email: String,
    pub sujet: String,
    pub message: String,
    pub date_envoi: String,
    pub lu: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub nom: String,
    pub email: String,
    pub sujet: String,
    pub message: String,
}

/// The full inbox state pushed to real-time subscribers after every
/// message mutation. Always a complete snapshot, never a delta.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxSnapshot {
    pub messages: Vec<Message>,
    pub unread_count: usize,
}
