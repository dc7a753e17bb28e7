//! SQLite storage for mechanics, customers, vehicles and service requests.
//!
//! Like the rest of the services, handlers open a short-lived `Connection`
//! per request through `Database::open`. The schema is created at startup by
//! `Database::init`.

use chrono::{DateTime, SecondsFormat, Utc};
use common::model::{Customer, Location, RequestStatus, ServiceRequest, Vehicle};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS mechanics (
    id             TEXT PRIMARY KEY,
    name           TEXT NOT NULL,
    contact_number TEXT NOT NULL DEFAULT '',
    address        TEXT NOT NULL DEFAULT '',
    specialization TEXT NOT NULL DEFAULT '',
    is_active      INTEGER NOT NULL DEFAULT 1,
    rating         REAL NOT NULL DEFAULT 0,
    token          TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS users (
    id            TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    mobile_number TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS vehicles (
    id            TEXT PRIMARY KEY,
    user_id       TEXT REFERENCES users(id) ON DELETE SET NULL,
    make          TEXT NOT NULL DEFAULT '',
    model         TEXT NOT NULL DEFAULT '',
    year          TEXT NOT NULL DEFAULT '',
    license_plate TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS service_requests (
    id           TEXT PRIMARY KEY,
    mechanic_id  TEXT NOT NULL REFERENCES mechanics(id),
    user_id      TEXT REFERENCES users(id) ON DELETE SET NULL,
    vehicle_id   TEXT REFERENCES vehicles(id) ON DELETE SET NULL,
    service_type TEXT NOT NULL DEFAULT '',
    description  TEXT NOT NULL DEFAULT '',
    address      TEXT NOT NULL DEFAULT '',
    lng          REAL NOT NULL DEFAULT 0,
    lat          REAL NOT NULL DEFAULT 0,
    status       TEXT NOT NULL DEFAULT 'Pending',
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_requests_mechanic ON service_requests(mechanic_id);
";

const SELECT_REQUEST: &str = "
SELECT r.id, r.service_type, r.description, r.address, r.lng, r.lat, r.status,
       r.created_at, r.updated_at,
       u.id, u.name, u.mobile_number,
       v.id, v.make, v.model, v.year, v.license_plate
  FROM service_requests r
  LEFT JOIN users u ON u.id = r.user_id
  LEFT JOIN vehicles v ON v.id = r.vehicle_id
";

/// The mechanic a bearer token resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct MechanicRecord {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn open(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    pub fn init(&self) -> rusqlite::Result<()> {
        self.open()?.execute_batch(SCHEMA)
    }

    /// Inserts one mechanic with token `demo-token` and a request in every
    /// state the board knows about. Does nothing if that mechanic exists.
    pub fn seed_demo(&self) -> rusqlite::Result<()> {
        let mut conn = self.open()?;
        if find_mechanic_by_token(&conn, "demo-token")?.is_some() {
            info!("Demo data already present");
            return Ok(());
        }

        let tx = conn.transaction()?;
        let mechanic_id = Uuid::new_v4().to_string();
        tx.execute(
            "INSERT INTO mechanics (id, name, contact_number, address, specialization, rating, token)
             VALUES (?1, 'Demo Mechanic', '555-0100', 'Workshop Street 4', 'General', 4.5, 'demo-token')",
            params![mechanic_id],
        )?;

        let customers = [
            ("Ana Ruiz", "555-0101", ("Toyota", "Corolla", "2019", "AB12 CDE")),
            ("Ben \"Fix\" Okafor", "555-0102", ("Ford", "Focus", "2016", "FO16 KUS")),
            ("Chen Li", "", ("Honda", "Civic", "2021", "HC21 XYZ")),
        ];
        let requests = [
            (0, "Flat tyre", RequestStatus::Pending, "Gran Via 1, Madrid"),
            (1, "Battery jump start", RequestStatus::Accepted, "Calle Mayor 10"),
            (2, "Oil change", RequestStatus::Completed, ""),
            (0, "Brake inspection", RequestStatus::Completed, "Plaza Sol 3"),
            (1, "Towing", RequestStatus::Rejected, "M-30 km 12"),
        ];

        let mut vehicle_ids = Vec::with_capacity(customers.len());
        let mut user_ids = Vec::with_capacity(customers.len());
        for (name, mobile, (make, model, year, plate)) in customers {
            let user_id = Uuid::new_v4().to_string();
            let vehicle_id = Uuid::new_v4().to_string();
            tx.execute(
                "INSERT INTO users (id, name, mobile_number) VALUES (?1, ?2, ?3)",
                params![user_id, name, mobile],
            )?;
            tx.execute(
                "INSERT INTO vehicles (id, user_id, make, model, year, license_plate)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![vehicle_id, user_id, make, model, year, plate],
            )?;
            user_ids.push(user_id);
            vehicle_ids.push(vehicle_id);
        }

        let now = timestamp(Utc::now());
        for (customer, service_type, status, address) in requests {
            tx.execute(
                "INSERT INTO service_requests
                    (id, mechanic_id, user_id, vehicle_id, service_type, address, lng, lat, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, -3.70, 40.41, ?7, ?8, ?8)",
                params![
                    Uuid::new_v4().to_string(),
                    mechanic_id,
                    user_ids[customer],
                    vehicle_ids[customer],
                    service_type,
                    address,
                    status.as_str(),
                    now
                ],
            )?;
        }
        tx.commit()?;
        info!("Seeded demo mechanic with token 'demo-token'");
        Ok(())
    }
}

pub fn find_mechanic_by_token(
    conn: &Connection,
    token: &str,
) -> rusqlite::Result<Option<MechanicRecord>> {
    conn.query_row(
        "SELECT id, name FROM mechanics WHERE token = ?1 AND is_active = 1",
        params![token],
        |row| {
            Ok(MechanicRecord {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
    .optional()
}

/// Requests assigned to `mechanic_id`, newest first.
pub fn list_requests(conn: &Connection, mechanic_id: &str) -> rusqlite::Result<Vec<ServiceRequest>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE r.mechanic_id = ?1 ORDER BY r.created_at DESC, r.rowid DESC",
        SELECT_REQUEST
    ))?;
    let rows = stmt.query_map(params![mechanic_id], map_request)?;
    rows.collect()
}

pub fn get_request(
    conn: &Connection,
    mechanic_id: &str,
    request_id: &str,
) -> rusqlite::Result<Option<ServiceRequest>> {
    conn.query_row(
        &format!("{} WHERE r.mechanic_id = ?1 AND r.id = ?2", SELECT_REQUEST),
        params![mechanic_id, request_id],
        map_request,
    )
    .optional()
}

/// Moves `request_id` from `from` to `to`. Only applies while the stored
/// status is still `from`; returns the number of rows changed (0 or 1).
pub fn set_status(
    conn: &Connection,
    mechanic_id: &str,
    request_id: &str,
    from: RequestStatus,
    to: RequestStatus,
    at: DateTime<Utc>,
) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE service_requests SET status = ?1, updated_at = ?2
         WHERE id = ?3 AND mechanic_id = ?4 AND status = ?5",
        params![to.as_str(), timestamp(at), request_id, mechanic_id, from.as_str()],
    )
}

/// RFC 3339 with milliseconds, the format the dashboard parses.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| match DateTime::parse_from_rfc3339(&s) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            warn!("Ignoring malformed timestamp '{}': {}", s, e);
            None
        }
    })
}

fn map_request(row: &Row<'_>) -> rusqlite::Result<ServiceRequest> {
    let raw_status: String = row.get(6)?;
    let status = raw_status.parse::<RequestStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, e.into())
    })?;

    let customer = match row.get::<_, Option<String>>(9)? {
        Some(id) => Some(Customer {
            id,
            name: row.get(10)?,
            mobile_number: row.get(11)?,
        }),
        None => None,
    };
    let vehicle = match row.get::<_, Option<String>>(12)? {
        Some(_) => Some(Vehicle {
            make: row.get(13)?,
            model: row.get(14)?,
            year: row.get(15)?,
            license_plate: row.get(16)?,
        }),
        None => None,
    };
    let address: String = row.get(3)?;

    Ok(ServiceRequest {
        id: row.get(0)?,
        customer,
        vehicle,
        service_type: row.get(1)?,
        description: row.get(2)?,
        location: Some(Location {
            kind: "Point".to_string(),
            coordinates: vec![row.get(4)?, row.get(5)?],
            address,
        }),
        status,
        created_at: parse_timestamp(row.get(7)?),
        updated_at: parse_timestamp(row.get(8)?),
    })
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn lists_only_own_requests_newest_first() {
        let (db, _dir) = temp_database();
        insert_mechanic(&db, "m1", "t1");
        insert_mechanic(&db, "m2", "t2");
        insert_request(&db, "old", "m1", RequestStatus::Pending, "2024-01-01T08:00:00.000Z");
        insert_request(&db, "new", "m1", RequestStatus::Completed, "2024-02-01T08:00:00.000Z");
        insert_request(&db, "other", "m2", RequestStatus::Pending, "2024-03-01T08:00:00.000Z");

        let conn = db.open().unwrap();
        let requests = list_requests(&conn, "m1").unwrap();
        let ids: Vec<_> = requests.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(requests[0].customer_name(), "Ana Ruiz");
        assert_eq!(requests[0].license_plate(), "AB12");
        assert_eq!(requests[0].address(), "Gran Via 1");
        assert!(requests[0].created_at.is_some());
    }

    #[test]
    fn resolves_tokens_and_updates_status() {
        let (db, _dir) = temp_database();
        insert_mechanic(&db, "m1", "t1");
        insert_request(&db, "r1", "m1", RequestStatus::Pending, "2024-01-01T08:00:00.000Z");

        let conn = db.open().unwrap();
        assert_eq!(find_mechanic_by_token(&conn, "t1").unwrap().unwrap().id, "m1");
        assert!(find_mechanic_by_token(&conn, "nope").unwrap().is_none());

        let at = Utc::now();
        assert_eq!(
            set_status(&conn, "m1", "r1", RequestStatus::Pending, RequestStatus::Accepted, at).unwrap(),
            1
        );
        let request = get_request(&conn, "m1", "r1").unwrap().unwrap();
        assert_eq!(request.status, RequestStatus::Accepted);
        assert_eq!(request.updated_at.map(timestamp), Some(timestamp(at)));
        assert!(get_request(&conn, "m2", "r1").unwrap().is_none());
    }

    #[test]
    fn racing_status_writes_apply_only_once() {
        let (db, _dir) = temp_database();
        insert_mechanic(&db, "m1", "t1");
        insert_request(&db, "r1", "m1", RequestStatus::Pending, "2024-01-01T08:00:00.000Z");

        // Both handlers read Pending before either writes.
        let first = db.open().unwrap();
        let second = db.open().unwrap();
        let seen_a = get_request(&first, "m1", "r1").unwrap().unwrap().status;
        let seen_b = get_request(&second, "m1", "r1").unwrap().unwrap().status;
        assert_eq!((seen_a, seen_b), (RequestStatus::Pending, RequestStatus::Pending));

        let at = Utc::now();
        let rows_a = set_status(&first, "m1", "r1", seen_a, RequestStatus::Accepted, at).unwrap();
        let rows_b = set_status(&second, "m1", "r1", seen_b, RequestStatus::Rejected, at).unwrap();

        assert_eq!(rows_a, 1);
        assert_eq!(rows_b, 0);
        let stored = get_request(&first, "m1", "r1").unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Accepted);
    }

    #[test]
    fn status_write_is_scoped_to_owner() {
        let (db, _dir) = temp_database();
        insert_mechanic(&db, "m1", "t1");
        insert_mechanic(&db, "m2", "t2");
        insert_request(&db, "r1", "m1", RequestStatus::Pending, "2024-01-01T08:00:00.000Z");

        let conn = db.open().unwrap();
        let rows = set_status(&conn, "m2", "r1", RequestStatus::Pending, RequestStatus::Accepted, Utc::now())
            .unwrap();
        assert_eq!(rows, 0);
        assert_eq!(get_request(&conn, "m1", "r1").unwrap().unwrap().status, RequestStatus::Pending);
    }

    #[test]
    fn demo_seed_is_idempotent() {
        let (db, _dir) = temp_database();
        db.seed_demo().unwrap();
        db.seed_demo().unwrap();

        let conn = db.open().unwrap();
        let mechanic = find_mechanic_by_token(&conn, "demo-token").unwrap().unwrap();
        assert_eq!(list_requests(&conn, &mechanic.id).unwrap().len(), 5);
    }
}
