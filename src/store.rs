use rusqlite::{params, Connection, Row};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::parcel::{Parcel, ParcelStatus};
use crate::schema::parcel_schema;

const SELECT_PARCEL: &str = "SELECT number, client, status, address, created_at FROM parcel";

/// Persistence facade over the `parcel` table.
///
/// Borrows an already-open connection; concurrent callers sharing that
/// connection must serialize access themselves. Updates and deletes do not
/// check that the row exists, and no lifecycle rule is enforced here: see
/// [`ParcelStatus::can_transition_to`] and
/// [`ParcelStatus::allows_address_change`] for callers that want one.
#[derive(Debug, Clone, Copy)]
pub struct ParcelStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ParcelStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Create the `parcel` table and its index if they are missing.
    pub fn init_schema(&self) -> Result<()> {
        for sql in parcel_schema().statements() {
            self.conn.execute(&sql, [])?;
        }
        info!("parcel schema ready");
        Ok(())
    }

    /// Insert `parcel` and return the number assigned to it.
    ///
    /// `parcel.number` is ignored.
    pub fn add(&self, parcel: &Parcel) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO parcel (client, status, address, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                parcel.client,
                parcel.status,
                parcel.address,
                parcel.created_at
            ],
        )?;
        let number = self.conn.last_insert_rowid();
        debug!(number, client = parcel.client, "parcel added");
        Ok(number)
    }

    /// Fetch one parcel. [`StoreError::NotFound`] when no row has this number.
    pub fn get(&self, number: i64) -> Result<Parcel> {
        self.conn
            .query_row(
                &format!("{SELECT_PARCEL} WHERE number = ?1"),
                params![number],
                row_to_parcel,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound(number),
                other => StoreError::Storage(other),
            })
    }

    /// Remove a parcel permanently. Deleting a missing number is not an error.
    pub fn delete(&self, number: i64) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM parcel WHERE number = ?1", params![number])?;
        debug!(number, rows, "parcel deleted");
        Ok(())
    }

    /// Overwrite the address, whatever the current status.
    pub fn set_address(&self, number: i64, address: &str) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE parcel SET address = ?1 WHERE number = ?2",
            params![address, number],
        )?;
        debug!(number, rows, "parcel address set");
        Ok(())
    }

    /// Overwrite the status. No transition check.
    pub fn set_status(&self, number: i64, status: ParcelStatus) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE parcel SET status = ?1 WHERE number = ?2",
            params![status, number],
        )?;
        debug!(number, %status, rows, "parcel status set");
        Ok(())
    }

    /// All parcels of `client`, oldest number first. Empty if there are none.
    pub fn get_by_client(&self, client: i64) -> Result<Vec<Parcel>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_PARCEL} WHERE client = ?1 ORDER BY number ASC"))?;
        let parcels = stmt
            .query_map(params![client], row_to_parcel)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(client, count = parcels.len(), "parcels fetched by client");
        Ok(parcels)
    }
}

fn row_to_parcel(row: &Row<'_>) -> rusqlite::Result<Parcel> {
    Ok(Parcel {
        number: row.get(0)?,
        client: row.get(1)?,
        status: row.get(2)?,
        address: row.get(3)?,
        created_at: row.get(4)?,
    })
}
