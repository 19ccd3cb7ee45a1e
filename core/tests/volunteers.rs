//! Volunteer store tests.
//!
//! Tests cover: registration defaults, listing order, availability
//! round trips, lookup failures, and skill search.

use chrono::{TimeZone, Utc};
use impactbridge_core::{
    clock::FixedClock,
    error::TriageError,
    store::TriageStore,
    volunteer_store::{NewVolunteer, VolunteerStore},
};

fn build() -> TriageStore {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = TriageStore::in_memory().expect("open in-memory store");
    store.migrate().expect("migrate");
    store
}

fn volunteer(name: &str, skills: &str) -> NewVolunteer {
    NewVolunteer {
        name:    name.into(),
        contact: Some(format!("{}@relief.example", name.to_lowercase().replace(' ', "."))),
        skills:  skills.into(),
    }
}

/// New volunteers are available and stamped by the clock.
#[test]
fn register_sets_defaults() {
    let store = build();
    let t = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
    let volunteers = VolunteerStore::with_clock(&store, FixedClock(t));

    let v = volunteers.register(volunteer("Ana Ruiz", "first aid")).unwrap();
    assert!(v.availability);
    assert_eq!(v.registered_at, t);
    assert_eq!(volunteers.get(v.id).unwrap(), v);
}

/// Contact is optional.
#[test]
fn register_without_contact() {
    let store = build();
    let volunteers = VolunteerStore::new(&store);

    let v = volunteers
        .register(NewVolunteer { name: "Sam Okafor".into(), contact: None, skills: "driving".into() })
        .unwrap();
    assert_eq!(volunteers.get(v.id).unwrap().contact, None);
}

/// Listing returns volunteers in registration order.
#[test]
fn list_all_in_registration_order() {
    let store = build();
    let volunteers = VolunteerStore::new(&store);

    let a = volunteers.register(volunteer("Ana Ruiz", "first aid")).unwrap();
    let b = volunteers.register(volunteer("Ben Cho", "radio")).unwrap();
    let c = volunteers.register(volunteer("Cleo Park", "cooking")).unwrap();

    let ids: Vec<_> = volunteers.list_all().unwrap().iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
}

/// Availability off then on reads back as available.
#[test]
fn availability_round_trip() {
    let store = build();
    let volunteers = VolunteerStore::new(&store);
    let v = volunteers.register(volunteer("Ana Ruiz", "first aid")).unwrap();

    let off = volunteers.set_availability(v.id, false).unwrap();
    assert!(!off.availability);
    assert!(!volunteers.get(v.id).unwrap().availability);

    let on = volunteers.set_availability(v.id, true).unwrap();
    assert!(on.availability);
    assert!(volunteers.get(v.id).unwrap().availability);
    assert_eq!(on.registered_at, v.registered_at);
}

/// Unknown ids fail with NotFound.
#[test]
fn unknown_volunteer_is_not_found() {
    let store = build();
    let volunteers = VolunteerStore::new(&store);

    assert!(matches!(
        volunteers.get(5).unwrap_err(),
        TriageError::NotFound { entity: "Volunteer", id: 5 }
    ));
    assert!(volunteers.set_availability(5, false).unwrap_err().is_not_found());
}

/// Skill search is a case-insensitive substring match.
#[test]
fn search_by_skill_matches_substrings() {
    let store = build();
    let volunteers = VolunteerStore::new(&store);

    let medic = volunteers.register(volunteer("Ana Ruiz", "First Aid, triage")).unwrap();
    let _radio = volunteers.register(volunteer("Ben Cho", "ham radio")).unwrap();
    let nurse = volunteers.register(volunteer("Cleo Park", "nursing; first aid instructor")).unwrap();

    let ids: Vec<_> = volunteers
        .search_by_skill("first aid")
        .unwrap()
        .iter()
        .map(|v| v.id)
        .collect();
    assert_eq!(ids, vec![medic.id, nurse.id]);

    assert!(volunteers.search_by_skill("welding").unwrap().is_empty());
    assert!(volunteers.search_by_skill("   ").is_err());
}

/// SQL wildcard characters in the needle are matched literally.
#[test]
fn search_by_skill_escapes_wildcards() {
    let store = build();
    let volunteers = VolunteerStore::new(&store);
    volunteers.register(volunteer("Ana Ruiz", "logistics")).unwrap();

    assert!(volunteers.search_by_skill("%").unwrap().is_empty());
    assert!(volunteers.search_by_skill("log_stics").unwrap().is_empty());
}

/// Case folding covers non-ASCII letters too.
#[test]
fn search_by_skill_folds_unicode_case() {
    let store = build();
    let volunteers = VolunteerStore::new(&store);
    let medic = volunteers.register(volunteer("Élodie Martin", "évacuation médicale")).unwrap();
    volunteers.register(volunteer("Ben Cho", "radio")).unwrap();

    let ids: Vec<_> = volunteers
        .search_by_skill("ÉVAC")
        .unwrap()
        .iter()
        .map(|v| v.id)
        .collect();
    assert_eq!(ids, vec![medic.id]);
}
