use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDateTime, SubsecRound};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use tracing::debug;
use walkbook_core::{DayRange, NewOrder, Order, OrderId, WALK_TIME_SUBSEC_DIGITS};
use walkbook_storage::OrderStore;

const STORED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const PARSE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub struct SqliteOrderStore {
    conn: Mutex<Connection>,
}

impl SqliteOrderStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create db dir {}", parent.display()))?;
            }
        }
        let conn = Connection::open(db_path)
            .with_context(|| format!("open sqlite db {}", db_path.display()))?;
        debug!(path = %db_path.display(), "opened sqlite order store");
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory sqlite db")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        let init_sql = include_str!("../migrations/0001_init.sql");
        conn.execute_batch(init_sql).context("apply schema")?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("sqlite connection lock poisoned"))
    }

    fn time_to_str(ts: &NaiveDateTime) -> String {
        ts.format(STORED_TIME_FORMAT).to_string()
    }

    fn row_to_order(r: &Row<'_>) -> rusqlite::Result<Order> {
        let raw: String = r.get(4)?;
        let walk_time = NaiveDateTime::parse_from_str(&raw, PARSE_TIME_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
        Ok(Order {
            id: OrderId(r.get(0)?),
            apartment_number: r.get(1)?,
            pet_name: r.get(2)?,
            pet_breed: r.get(3)?,
            walk_time,
        })
    }
}

impl OrderStore for SqliteOrderStore {
    fn insert(&self, mut candidate: NewOrder) -> Result<Order> {
        // column holds microseconds; return what a later read will see
        candidate.walk_time = candidate.walk_time.trunc_subsecs(WALK_TIME_SUBSEC_DIGITS);
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO orders(apartment_number, pet_name, pet_breed, walk_time) VALUES (?1, ?2, ?3, ?4)",
            params![
                candidate.apartment_number,
                candidate.pet_name,
                candidate.pet_breed,
                Self::time_to_str(&candidate.walk_time)
            ],
        )
        .context("insert order")?;
        let id = OrderId(conn.last_insert_rowid());
        Ok(Order::from_new(id, candidate))
    }

    fn query_range(&self, range: &DayRange) -> Result<Vec<Order>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, apartment_number, pet_name, pet_breed, walk_time
             FROM orders WHERE walk_time >= ?1 AND walk_time <= ?2
             ORDER BY walk_time ASC, id ASC",
        )?;
        let rows = stmt.query_map(
            params![Self::time_to_str(&range.start), Self::time_to_str(&range.end)],
            Self::row_to_order,
        )?;

        let mut orders = vec![];
        for row in rows {
            orders.push(row.context("read order row")?);
        }
        Ok(orders)
    }
}
