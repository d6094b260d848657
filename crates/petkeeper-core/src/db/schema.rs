use rusqlite::Connection;

use crate::error::Result;

pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS pets (
            id TEXT PRIMARY KEY NOT NULL,
            group_id TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            species TEXT NOT NULL,
            level INTEGER NOT NULL DEFAULT 1,
            xp INTEGER NOT NULL DEFAULT 0,
            hunger INTEGER NOT NULL DEFAULT 100,
            hygiene INTEGER NOT NULL DEFAULT 100,
            health INTEGER NOT NULL DEFAULT 100,
            happiness INTEGER NOT NULL DEFAULT 100,
            hunger_carry REAL NOT NULL DEFAULT 0,
            hygiene_carry REAL NOT NULL DEFAULT 0,
            health_carry REAL NOT NULL DEFAULT 0,
            last_updated TEXT NOT NULL,
            CHECK (hunger BETWEEN 0 AND 100),
            CHECK (hygiene BETWEEN 0 AND 100),
            CHECK (health BETWEEN 0 AND 100),
            CHECK (happiness BETWEEN 0 AND 100)
        );
        ",
    )?;
    Ok(())
}

/// Bring a `pets` table created before the decay carry columns up to date.
pub fn migrate_tables(conn: &Connection) -> Result<()> {
    let migrations = [
        "ALTER TABLE pets ADD COLUMN hunger_carry REAL NOT NULL DEFAULT 0",
        "ALTER TABLE pets ADD COLUMN hygiene_carry REAL NOT NULL DEFAULT 0",
        "ALTER TABLE pets ADD COLUMN health_carry REAL NOT NULL DEFAULT 0",
    ];

    for sql in &migrations {
        match conn.execute(sql, []) {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(_, Some(msg)))
                if msg.contains("duplicate column name") => {}
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
