use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::error::{PetError, Result};
use crate::models::{DecayCarry, Pet, Species};
use crate::repository::PetRepository;

const PET_COLUMNS: &str = "id, group_id, name, species, level, xp,
                           hunger, hygiene, health, happiness, last_updated,
                           hunger_carry, hygiene_carry, health_carry";

/// SQLite-backed pet store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a SQLite database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        crate::db::schema::create_tables(&conn)?;
        crate::db::schema::migrate_tables(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        crate::db::schema::create_tables(&conn)?;
        crate::db::schema::migrate_tables(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Total number of stored pets.
    pub fn pet_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM pets", [], |row| row.get(0))?;
        Ok(count)
    }

    fn find_one(&self, column: &str, key: Uuid) -> Result<Option<Pet>> {
        let sql = format!("SELECT {} FROM pets WHERE {} = ?1", PET_COLUMNS, column);
        let result = self
            .conn
            .query_row(&sql, params![key.to_string()], row_to_pet);

        match result {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn conversion_error(idx: usize, e: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

fn uuid_column(row: &Row, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text).map_err(|e| conversion_error(idx, e))
}

fn row_to_pet(row: &Row) -> rusqlite::Result<Pet> {
    let species: String = row.get(3)?;
    let last_updated: String = row.get(10)?;
    Ok(Pet {
        id: uuid_column(row, 0)?,
        group_id: uuid_column(row, 1)?,
        name: row.get(2)?,
        species: Species::parse(&species).map_err(|e| conversion_error(3, e))?,
        level: row.get(4)?,
        xp: row.get(5)?,
        hunger: row.get(6)?,
        hygiene: row.get(7)?,
        health: row.get(8)?,
        happiness: row.get(9)?,
        decay_carry: DecayCarry {
            hunger: row.get(11)?,
            hygiene: row.get(12)?,
            health: row.get(13)?,
        },
        last_updated: DateTime::parse_from_rfc3339(&last_updated)
            .map_err(|e| conversion_error(10, e))?
            .with_timezone(&Utc),
    })
}

impl PetRepository for Database {
    fn find_by_group_id(&self, group_id: Uuid) -> Result<Option<Pet>> {
        self.find_one("group_id", group_id)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>> {
        self.find_one("id", id)
    }

    fn list(&self, offset: usize, limit: usize) -> Result<Vec<Pet>> {
        let sql = format!(
            "SELECT {} FROM pets ORDER BY rowid LIMIT ?1 OFFSET ?2",
            PET_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit as i64, offset as i64], row_to_pet)?;

        let mut pets = Vec::new();
        for row in rows {
            match row {
                Ok(p) => pets.push(p),
                Err(e) => log::warn!("Skipping unreadable pet row: {}", e),
            }
        }
        Ok(pets)
    }

    fn save(&self, pet: &Pet) -> Result<()> {
        let result = self.conn.execute(
            "INSERT INTO pets (id, group_id, name, species, level, xp,
                               hunger, hygiene, health, happiness, last_updated,
                               hunger_carry, hygiene_carry, health_carry)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                pet.id.to_string(),
                pet.group_id.to_string(),
                pet.name,
                pet.species.as_str(),
                pet.level,
                pet.xp,
                pet.hunger,
                pet.hygiene,
                pet.health,
                pet.happiness,
                format_timestamp(&pet.last_updated),
                pet.decay_carry.hunger,
                pet.decay_carry.hygiene,
                pet.decay_carry.health,
            ],
        );

        match result {
            Ok(_) => {
                log::debug!("Inserted pet {} for group {}", pet.id, pet.group_id);
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, Some(msg)))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    && msg.contains("pets.group_id") =>
            {
                Err(PetError::Conflict(pet.group_id))
            }
            Err(rusqlite::Error::SqliteFailure(err, msg))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || msg.as_deref().is_some_and(|m| m.contains("pets.id")) =>
            {
                Err(PetError::Data(format!("duplicate pet id {}", pet.id)))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn update(&self, pet: &Pet) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE pets SET name = ?2, level = ?3, xp = ?4,
                             hunger = ?5, hygiene = ?6, health = ?7, happiness = ?8,
                             last_updated = ?9,
                             hunger_carry = ?10, hygiene_carry = ?11, health_carry = ?12
             WHERE id = ?1",
            params![
                pet.id.to_string(),
                pet.name,
                pet.level,
                pet.xp,
                pet.hunger,
                pet.hygiene,
                pet.health,
                pet.happiness,
                format_timestamp(&pet.last_updated),
                pet.decay_carry.hunger,
                pet.decay_carry.hygiene,
                pet.decay_carry.health,
            ],
        )?;
        if changed == 0 {
            return Err(PetError::pet_not_found(pet.id));
        }
        log::debug!("Updated pet {}", pet.id);
        Ok(())
    }
}
