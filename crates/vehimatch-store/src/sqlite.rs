//! Loads a catalog from the listing-ingestion SQLite database.
//!
//! Expected tables:
//!
//! ```sql
//! CREATE TABLE vehicle (
//!     id INTEGER PRIMARY KEY,
//!     make TEXT, model TEXT, badge TEXT,
//!     transmission_type TEXT, fuel_type TEXT, drive_type TEXT
//! );
//! CREATE TABLE listing (
//!     id TEXT PRIMARY KEY,
//!     vehicle_id TEXT NOT NULL,
//!     url TEXT, price TEXT, kms TEXT
//! );
//! ```
//!
//! The listing table is optional; without it every vehicle has popularity 0.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};
use tracing::info;
use vehimatch_core::{Catalog, VehicleId, VehicleRecord};

use crate::error::{Result, StoreError};

const VEHICLE_QUERY: &str = "SELECT id, make, model, badge, transmission_type, fuel_type, drive_type \
     FROM vehicle";

const LISTING_COUNT_QUERY: &str =
    "SELECT vehicle_id, COUNT(*) FROM listing GROUP BY vehicle_id";

/// Opens `path` read-only and loads every vehicle and listing count.
pub fn load_sqlite<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let conn = Connection::open_with_flags(path.as_ref(), OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    load_from_connection(&conn)
}

/// Loads a catalog through an existing connection.
pub fn load_from_connection(conn: &Connection) -> Result<Catalog> {
    let mut builder = Catalog::builder();

    let mut stmt = conn.prepare(VEHICLE_QUERY)?;
    let mut rows = stmt.query([])?;
    let mut vehicles = 0usize;
    while let Some(row) = rows.next()? {
        builder.insert(vehicle_from_row(row)?)?;
        vehicles += 1;
    }

    let mut listings = 0i64;
    if has_table(conn, "listing")? {
        let mut stmt = conn.prepare(LISTING_COUNT_QUERY)?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let id = id_from_value(row.get_ref(0)?, "listing", "vehicle_id")?;
            let count: i64 = row.get(1)?;
            builder.listing_count(id, count)?;
            listings += count;
        }
    }

    info!(vehicles, listings, "loaded catalog from sqlite");
    Ok(builder.build())
}

fn vehicle_from_row(row: &Row<'_>) -> Result<VehicleRecord> {
    let text = |idx: usize| -> Result<String> {
        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
    };

    Ok(VehicleRecord {
        id: id_from_value(row.get_ref(0)?, "vehicle", "id")?,
        make: text(1)?,
        model: text(2)?,
        badge: text(3)?,
        transmission_type: text(4)?,
        fuel_type: text(5)?,
        drive_type: text(6)?,
    })
}

fn id_from_value(
    value: ValueRef<'_>,
    table: &'static str,
    column: &'static str,
) -> Result<VehicleId> {
    match value {
        ValueRef::Integer(id) => Ok(VehicleId::from(id)),
        ValueRef::Text(bytes) => Ok(VehicleId::from(String::from_utf8_lossy(bytes).into_owned())),
        _ => Err(StoreError::InvalidId { table, column }),
    }
}

fn has_table(conn: &Connection, name: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
