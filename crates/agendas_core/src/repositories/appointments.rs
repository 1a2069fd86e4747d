//! crates/agendas_core/src/repositories/appointments.rs
//!
//! CRUD and query operations for appointments (`appointments.json`):
//! owner-scoped listing, calendar-week ranges and keyword search.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{Appointment, AppointmentUpdate, NewAppointment};
use crate::ports::{PortError, PortResult, RecordStore};

/// Queries shorter than this return nothing; it keeps noisy one- and
/// two-letter scans from matching half the collection.
const MIN_SEARCH_LEN: usize = 3;

#[derive(Clone)]
pub struct AppointmentRepository {
    store: Arc<dyn RecordStore<Appointment>>,
}

impl AppointmentRepository {
    pub fn new(store: Arc<dyn RecordStore<Appointment>>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Vec<Appointment> {
        self.store.load_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Option<Appointment> {
        self.store.load_all().await.into_iter().find(|a| a.id == id)
    }

    pub async fn get_by_user_id(&self, user_id: i64) -> Vec<Appointment> {
        self.store
            .load_all()
            .await
            .into_iter()
            .filter(|a| a.user_id == user_id)
            .collect()
    }

    /// Appointments whose date falls within `[start, end]`, both bounds
    /// inclusive, optionally restricted to one owner. Records with an
    /// unparseable stored date are excluded.
    pub async fn get_by_week(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        user_id: Option<i64>,
    ) -> Vec<Appointment> {
        self.store
            .load_all()
            .await
            .into_iter()
            .filter(|a| {
                let in_range = NaiveDate::parse_from_str(&a.date, "%Y-%m-%d")
                    .map(|date| date >= start && date <= end)
                    .unwrap_or(false);
                in_range && user_id.map_or(true, |id| a.user_id == id)
            })
            .collect()
    }

    /// Case-insensitive substring search over title, description, location
    /// and participant names, optionally scoped to one owner.
    pub async fn search(&self, query: &str, user_id: Option<i64>) -> Vec<Appointment> {
        if query.chars().count() < MIN_SEARCH_LEN {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        self.store
            .load_all()
            .await
            .into_iter()
            .filter(|a| {
                let matches = a.titre.to_lowercase().contains(&needle)
                    || a.description.to_lowercase().contains(&needle)
                    || a.location.to_lowercase().contains(&needle)
                    || a.nom.to_lowercase().contains(&needle)
                    || a.prenom.to_lowercase().contains(&needle);
                matches && user_id.map_or(true, |id| a.user_id == id)
            })
            .collect()
    }

    pub async fn save(&self, data: NewAppointment) -> PortResult<Appointment> {
        let mut appointments = self.store.load_all().await;

        let appointment = Appointment {
            id: super::next_id(appointments.iter().map(|a| a.id)),
            user_id: data.user_id,
            statut: data.statut.unwrap_or_else(|| "validé".into()),
            nom: data.nom.unwrap_or_default(),
            prenom: data.prenom.unwrap_or_default(),
            date_naissance: data.date_naissance.unwrap_or_default(),
            telephone: data.telephone.unwrap_or_default(),
            titre: data.titre,
            description: data.description,
            date: data.date,
            heure: data.heure,
            duree: data.duree,
            location: data.location,
        };
        appointments.push(appointment.clone());
        self.store.persist_all(&appointments).await?;
        Ok(appointment)
    }

    pub async fn update(&self, id: i64, data: AppointmentUpdate) -> PortResult<Appointment> {
        let mut appointments = self.store.load_all().await;

        let index = appointments
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| PortError::NotFound("Rendez-vous non trouvé".into()))?;

        let appointment = &mut appointments[index];
        if let Some(user_id) = data.user_id {
            appointment.user_id = user_id;
        }
        if let Some(statut) = data.statut {
            appointment.statut = statut;
        }
        if let Some(nom) = data.nom {
            appointment.nom = nom;
        }
        if let Some(prenom) = data.prenom {
            appointment.prenom = prenom;
        }
        if let Some(date_naissance) = data.date_naissance {
            appointment.date_naissance = date_naissance;
        }
        if let Some(telephone) = data.telephone {
            appointment.telephone = telephone;
        }
        if let Some(titre) = data.titre {
            appointment.titre = titre;
        }
        if let Some(description) = data.description {
            appointment.description = description;
        }
        if let Some(date) = data.date {
            appointment.date = date;
        }
        if let Some(heure) = data.heure {
            appointment.heure = heure;
        }
        if let Some(duree) = data.duree {
            appointment.duree = duree;
        }
        if let Some(location) = data.location {
            appointment.location = location;
        }
        let updated = appointment.clone();

        self.store.persist_all(&appointments).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> PortResult<()> {
        let appointments = self.store.load_all().await;
        let remaining: Vec<Appointment> = appointments
            .iter()
            .filter(|a| a.id != id)
            .cloned()
            .collect();

        if remaining.len() == appointments.len() {
            return Err(PortError::NotFound("Rendez-vous non trouvé".into()));
        }

        self.store.persist_all(&remaining).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn repo() -> AppointmentRepository {
        AppointmentRepository::new(Arc::new(MemoryStore::new()))
    }

    fn new_appointment(user_id: i64, titre: &str, date: &str) -> NewAppointment {
        NewAppointment {
            user_id,
            statut: None,
            nom: None,
            prenom: None,
            date_naissance: None,
            telephone: None,
            titre: titre.into(),
            description: "Consultation de suivi".into(),
            date: date.into(),
            heure: "14:30".into(),
            duree: 30,
            location: "Cabinet principal".into(),
        }
    }

    #[tokio::test]
    async fn save_applies_status_and_participant_defaults() {
        let repo = repo();
        let created = repo
            .save(new_appointment(1, "Coupe", "2025-06-02"))
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.statut, "validé");
        assert_eq!(created.nom, "");
        assert_eq!(created.telephone, "");
        assert_eq!(repo.get_by_id(1).await.unwrap(), created);
    }

    #[tokio::test]
    async fn week_range_is_inclusive_on_both_bounds() {
        let repo = repo();
        repo.save(new_appointment(1, "Lundi", "2025-06-02")).await.unwrap();
        repo.save(new_appointment(1, "Mercredi", "2025-06-04")).await.unwrap();
        repo.save(new_appointment(1, "Dimanche", "2025-06-08")).await.unwrap();
        repo.save(new_appointment(1, "Hors plage", "2025-06-09")).await.unwrap();

        let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
        let week = repo.get_by_week(start, end, None).await;

        let titres: Vec<&str> = week.iter().map(|a| a.titre.as_str()).collect();
        assert_eq!(titres, vec!["Lundi", "Mercredi", "Dimanche"]);
    }

    #[tokio::test]
    async fn week_range_can_be_scoped_to_one_owner() {
        let repo = repo();
        repo.save(new_appointment(1, "Proprio 1", "2025-06-03")).await.unwrap();
        repo.save(new_appointment(2, "Proprio 2", "2025-06-03")).await.unwrap();

        let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
        let week = repo.get_by_week(start, end, Some(2)).await;

        assert_eq!(week.len(), 1);
        assert_eq!(week[0].titre, "Proprio 2");
    }

    #[tokio::test]
    async fn short_queries_return_nothing() {
        let repo = repo();
        repo.save(new_appointment(1, "Abricot", "2025-06-02")).await.unwrap();

        assert!(repo.search("ab", None).await.is_empty());
        assert_eq!(repo.search("abr", None).await.len(), 1);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_across_fields() {
        let repo = repo();
        let mut data = new_appointment(1, "Coupe et brushing", "2025-06-02");
        data.nom = Some("Lefebvre".into());
        repo.save(data).await.unwrap();

        assert_eq!(repo.search("BRUSHING", None).await.len(), 1);
        assert_eq!(repo.search("lefeb", None).await.len(), 1);
        assert_eq!(repo.search("cabinet", None).await.len(), 1);
        assert!(repo.search("inexistant", None).await.is_empty());
    }

    #[tokio::test]
    async fn search_scoped_to_owner_filters_matches() {
        let repo = repo();
        repo.save(new_appointment(1, "Massage dos", "2025-06-02")).await.unwrap();
        repo.save(new_appointment(2, "Massage visage", "2025-06-03")).await.unwrap();

        let scoped = repo.search("massage", Some(1)).await;
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].user_id, 1);
    }

    #[tokio::test]
    async fn update_merges_partial_fields() {
        let repo = repo();
        let created = repo
            .save(new_appointment(1, "Coupe", "2025-06-02"))
            .await
            .unwrap();

        let updated = repo
            .update(
                created.id,
                AppointmentUpdate {
                    statut: Some("reporté".into()),
                    date: Some("2025-06-10".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.statut, "reporté");
        assert_eq!(updated.date, "2025-06-10");
        assert_eq!(updated.titre, created.titre);
        assert_eq!(updated.heure, created.heure);
        assert_eq!(updated.duree, created.duree);
    }
}
