//! Volunteer store: registration and availability.

use crate::{
    clock::{Clock, SystemClock},
    error::{TriageError, TriageResult},
    store::TriageStore,
    types::{Timestamp, VolunteerId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id:            VolunteerId,
    pub name:          String,
    pub contact:       Option<String>,
    pub skills:        String,
    pub availability:  bool,
    pub registered_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVolunteer {
    pub name:    String,
    pub contact: Option<String>,
    pub skills:  String,
}

pub struct VolunteerStore<'a, C: Clock = SystemClock> {
    store: &'a TriageStore,
    clock: C,
}

impl<'a> VolunteerStore<'a, SystemClock> {
    pub fn new(store: &'a TriageStore) -> Self {
        Self { store, clock: SystemClock }
    }
}

impl<'a, C: Clock> VolunteerStore<'a, C> {
    pub fn with_clock(store: &'a TriageStore, clock: C) -> Self {
        Self { store, clock }
    }

    /// New volunteers start out available.
    pub fn register(&self, registration: NewVolunteer) -> TriageResult<Volunteer> {
        let registered_at = self.clock.now();
        let id = self.store.insert_volunteer(&registration, true, registered_at)?;
        log::info!("volunteer {id} registered: skills=\"{}\"", registration.skills);
        Ok(Volunteer {
            id,
            name: registration.name,
            contact: registration.contact,
            skills: registration.skills,
            availability: true,
            registered_at,
        })
    }

    /// All volunteers in registration order.
    pub fn list_all(&self) -> TriageResult<Vec<Volunteer>> {
        self.store.list_volunteers()
    }

    pub fn get(&self, id: VolunteerId) -> TriageResult<Volunteer> {
        self.store
            .get_volunteer(id)?
            .ok_or_else(|| TriageError::volunteer_not_found(id))
    }

    pub fn set_availability(&self, id: VolunteerId, available: bool) -> TriageResult<Volunteer> {
        if self.store.update_volunteer_availability(id, available)? == 0 {
            return Err(TriageError::volunteer_not_found(id));
        }
        log::info!("volunteer {id} availability -> {available}");
        self.get(id)
    }

    /// Case-insensitive substring match on the skills text, for any script.
    pub fn search_by_skill(&self, skill: &str) -> TriageResult<Vec<Volunteer>> {
        let skill = skill.trim();
        if skill.is_empty() {
            return Err(TriageError::Validation(vec!["Skill is required".into()]));
        }
        self.store.volunteers_with_skill(skill)
    }
}
