//! volunteer table queries.

use super::TriageStore;
use crate::{
    error::TriageResult,
    types::{Timestamp, VolunteerId},
    volunteer_store::{NewVolunteer, Volunteer},
};
use rusqlite::{params, OptionalExtension, Row};

const VOLUNTEER_COLUMNS: &str = "id, name, contact, skills, available, registered_at";

fn volunteer_from_row(r: &Row<'_>) -> rusqlite::Result<Volunteer> {
    Ok(Volunteer {
        id:            r.get(0)?,
        name:          r.get(1)?,
        contact:       r.get(2)?,
        skills:        r.get(3)?,
        availability:  r.get::<_, i32>(4)? != 0,
        registered_at: r.get(5)?,
    })
}

impl TriageStore {
    pub(crate) fn insert_volunteer(
        &self,
        v: &NewVolunteer,
        available: bool,
        registered_at: Timestamp,
    ) -> TriageResult<VolunteerId> {
        self.conn.execute(
            "INSERT INTO volunteer (name, contact, skills, available, registered_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &v.name,
                &v.contact,
                &v.skills,
                if available { 1 } else { 0 },
                registered_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_volunteer(&self, id: VolunteerId) -> TriageResult<Option<Volunteer>> {
        let sql = format!("SELECT {VOLUNTEER_COLUMNS} FROM volunteer WHERE id = ?1");
        let row = self
            .conn
            .query_row(&sql, params![id], volunteer_from_row)
            .optional()?;
        Ok(row)
    }

    pub fn list_volunteers(&self) -> TriageResult<Vec<Volunteer>> {
        let sql = format!("SELECT {VOLUNTEER_COLUMNS} FROM volunteer ORDER BY id ASC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], volunteer_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Case-insensitive substring match over `skills`, registration order.
    /// Folding happens in Rust: SQLite's LIKE and lower() only fold ASCII.
    pub fn volunteers_with_skill(&self, skill: &str) -> TriageResult<Vec<Volunteer>> {
        let needle = skill.to_lowercase();
        let matches = self
            .list_volunteers()?
            .into_iter()
            .filter(|v| v.skills.to_lowercase().contains(&needle))
            .collect();
        Ok(matches)
    }

    pub(crate) fn update_volunteer_availability(
        &self,
        id: VolunteerId,
        available: bool,
    ) -> TriageResult<usize> {
        let n = self.conn.execute(
            "UPDATE volunteer SET available = ?1 WHERE id = ?2",
            params![if available { 1 } else { 0 }, id],
        )?;
        Ok(n)
    }

    pub fn volunteer_count(&self) -> TriageResult<i64> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM volunteer", [], |r| r.get(0))?;
        Ok(n)
    }
}
