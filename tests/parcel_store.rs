use anyhow::Result;
use parcel_tracker::{Parcel, ParcelStatus, ParcelStore, StoreError, TrackerConfig};
use rusqlite::Connection;
use std::collections::HashMap;
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// Helper function to create an in-memory database for testing
fn create_test_db() -> Result<Connection> {
    init_tracing();
    Ok(TrackerConfig::open_in_memory()?)
}

fn test_parcel() -> Parcel {
    Parcel::new(1000, "test")
}

#[test]
fn test_add_get_delete() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);
    let mut parcel = test_parcel();

    // add
    parcel.number = store.add(&parcel)?;
    assert_ne!(parcel.number, 0);

    // get
    let stored = store.get(parcel.number)?;
    assert_eq!(stored, parcel);

    // delete
    store.delete(parcel.number)?;
    let err = store.get(parcel.number).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(n) if n == parcel.number));

    Ok(())
}

#[test]
fn test_set_address() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);
    let mut parcel = test_parcel();
    parcel.number = store.add(&parcel)?;

    let new_address = "new test address";
    store.set_address(parcel.number, new_address)?;

    let stored = store.get(parcel.number)?;
    assert_eq!(
        stored,
        Parcel {
            address: new_address.to_string(),
            ..parcel
        }
    );
    Ok(())
}

#[test]
fn test_set_status() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);
    let mut parcel = test_parcel();
    parcel.number = store.add(&parcel)?;

    store.set_status(parcel.number, ParcelStatus::Sent)?;

    let stored = store.get(parcel.number)?;
    assert_eq!(
        stored,
        Parcel {
            status: ParcelStatus::Sent,
            ..parcel
        }
    );
    Ok(())
}

#[test]
fn test_get_by_client() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);
    let client = 4_242_424;

    // a parcel of another client must not show up
    store.add(&test_parcel())?;

    let mut added = HashMap::new();
    for address in ["first street", "second street", "third street"] {
        let mut parcel = Parcel::new(client, address);
        parcel.number = store.add(&parcel)?;
        added.insert(parcel.number, parcel);
    }

    let stored = store.get_by_client(client)?;
    assert_eq!(stored.len(), added.len());
    for parcel in &stored {
        assert_eq!(added.get(&parcel.number), Some(parcel));
    }
    assert!(stored.windows(2).all(|w| w[0].number < w[1].number));

    Ok(())
}

#[test]
fn test_get_by_client_without_parcels() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);

    assert!(store.get_by_client(7)?.is_empty());
    Ok(())
}

#[test]
fn test_file_database_persists_across_connections() -> Result<()> {
    init_tracing();
    let tmp = TempDir::new()?;
    let config = TrackerConfig::new(tmp.path().join("tracker.db"));

    let number = {
        let conn = config.open()?;
        let store = ParcelStore::new(&conn);
        let number = store.add(&test_parcel())?;
        store.set_status(number, ParcelStatus::Sent)?;
        number
    };

    let conn = config.open()?;
    let store = ParcelStore::new(&conn);
    let stored = store.get(number)?;
    assert_eq!(stored.status, ParcelStatus::Sent);
    assert_eq!(stored.client, 1000);

    Ok(())
}

#[test]
fn test_caller_side_lifecycle_rules() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);
    let number = store.add(&test_parcel())?;

    // Walk the lifecycle the way a caller enforcing the rules would.
    let mut current = store.get(number)?.status;
    while let Some(next) = current.next() {
        assert!(current.can_transition_to(next));
        store.set_status(number, next)?;
        current = store.get(number)?.status;
        assert_eq!(current, next);
    }
    assert_eq!(current, ParcelStatus::Delivered);
    assert!(!current.allows_address_change());

    Ok(())
}
