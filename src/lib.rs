//! SQLite-backed parcel tracking.
//!
//! # Intention
//!
//! - Own the `parcel` table: its schema, the CRUD operations against it, and
//!   the status vocabulary stored in it.
//! - Work against a caller-supplied [`rusqlite::Connection`]; the store keeps
//!   no state of its own and every call is a direct round-trip.
//!
//! # Architectural Boundaries
//!
//! - Only parcel persistence belongs here.
//! - Lifecycle rules (which status may follow which, when an address may still
//!   change) are exposed as advisory helpers on [`ParcelStatus`]; the store
//!   writes whatever it is given.
//!
//! # Usage
//!
//! ```rust,ignore
//! use parcel_tracker::{Parcel, ParcelStatus, ParcelStore, TrackerConfig};
//!
//! let conn = TrackerConfig::new("tracker.db").open()?;
//! let store = ParcelStore::new(&conn);
//!
//! let number = store.add(&Parcel::new(1000, "test"))?;
//! store.set_status(number, ParcelStatus::Sent)?;
//! let parcels = store.get_by_client(1000)?;
//! ```

pub mod config;
mod error;
pub mod parcel;
pub mod schema;
mod store;

pub use config::TrackerConfig;
pub use error::{Result, StoreError};
pub use parcel::{Parcel, ParcelStatus, UnknownStatus};
pub use store::ParcelStore;
