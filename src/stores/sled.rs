use std::fmt::Display;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use sled::{Config, Db};

use super::{fatal, next_id, PuppyStorer};
use crate::{Puppy, Result, StoreError};

/// The `SledStore` persists puppies in a sled database.
///
/// Each puppy is one key/value pair: the key is the id in decimal ASCII, the
/// value is the puppy encoded as JSON. Create, update and delete hold the
/// store's mutex for their whole duration; read goes straight to sled.
///
/// A failure of sled itself (open, insert, remove, flush) is not a
/// [`StoreError`]: it is logged and the calling thread panics with a message
/// starting with `fatal storage failure`.
///
/// Unlike the in-memory stores, `create` consumes an id before validating,
/// so a rejected puppy leaves a gap in the id sequence.
///
/// Update and delete only accept an id that `read` accepts: a record whose
/// bytes no longer parse is reported as not found.
///
/// ```rust
/// # use puppy_store::{Puppy, PuppyStorer, SledStore, Result};
/// # fn try_main() -> Result<()> {
/// let store = SledStore::temporary();
/// let id = store.create(Puppy::new("Retriever", "Golden", 9999.99))?;
/// assert_eq!(store.read(id)?.colour, "Golden");
/// store.close();
/// # Ok(())
/// # }
/// # try_main().unwrap();
/// ```
pub struct SledStore {
    db: Db,
    // last id handed out, also the writer lock
    cur_id: Mutex<u32>,
}

impl SledStore {
    /// create a store over an opened sled database
    ///
    /// The id counter continues after the highest id already stored, so an
    /// existing database is never overwritten by new puppies.
    pub fn new(db: Db) -> SledStore {
        let cur_id = highest_id(&db);
        debug!("sled: opened store, last id {}", cur_id);
        SledStore {
            db,
            cur_id: Mutex::new(cur_id),
        }
    }

    /// open (or create) the database at `path`
    pub fn open(path: impl AsRef<Path>) -> SledStore {
        SledStore::new(expect_db(sled::open(path), "open"))
    }

    /// open a database that is deleted when the store is dropped
    pub fn temporary() -> SledStore {
        SledStore::new(expect_db(Config::new().temporary(true).open(), "open"))
    }

    /// flush outstanding writes and release the database
    pub fn close(self) {
        expect_db(self.db.flush(), "flush");
        debug!("sled: closed store");
    }

    fn lock(&self) -> MutexGuard<'_, u32> {
        self.cur_id.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, op: &str, id: u32, mut puppy: Puppy) -> Result<()> {
        puppy.validate(op, id)?;
        puppy.id = id;
        let value = expect_db(serde_json::to_vec(&puppy), "encode");
        expect_db(self.db.insert(key(id), value), "insert");
        expect_db(self.db.flush(), "flush");
        Ok(())
    }
}

impl PuppyStorer for SledStore {
    fn create(&self, puppy: Puppy) -> Result<u32> {
        let mut cur_id = self.lock();
        let id = next_id(*cur_id);
        *cur_id = id;
        self.write("Create", id, puppy)?;
        debug!("sled: created puppy {}", id);
        Ok(id)
    }

    fn read(&self, id: u32) -> Result<Puppy> {
        let value = match expect_db(self.db.get(key(id)), "get") {
            Some(value) => value,
            None => return Err(StoreError::not_found("Read", id)),
        };
        serde_json::from_slice(&value).map_err(|e| {
            warn!("sled: corrupt record under id {}: {}", id, e);
            StoreError::corrupt(id, e)
        })
    }

    fn update(&self, id: u32, puppy: Puppy) -> Result<()> {
        let _guard = self.lock();
        if self.read(id).is_err() {
            return Err(StoreError::not_found("Update", id));
        }
        self.write("Update", id, puppy)?;
        debug!("sled: updated puppy {}", id);
        Ok(())
    }

    fn delete(&self, id: u32) -> Result<()> {
        let _guard = self.lock();
        if self.read(id).is_err() {
            return Err(StoreError::not_found("Delete", id));
        }
        expect_db(self.db.remove(key(id)), "remove");
        expect_db(self.db.flush(), "flush");
        debug!("sled: deleted puppy {}", id);
        Ok(())
    }
}

fn key(id: u32) -> String {
    id.to_string()
}

// keys that are not decimal ids are skipped
fn highest_id(db: &Db) -> u32 {
    db.iter()
        .keys()
        .filter_map(|key| {
            let key = expect_db(key, "scan");
            std::str::from_utf8(&key).ok()?.parse::<u32>().ok()
        })
        .max()
        .unwrap_or(0)
}

/// Unwrap the result of a sled primitive, or log and panic.
///
/// Storage failures are not something a caller can act on, so they are
/// never turned into a `StoreError`.
fn expect_db<T, E: Display>(res: std::result::Result<T, E>, op: &str) -> T {
    match res {
        Ok(value) => value,
        Err(e) => fatal(format!("sled {} failed: {}", op, e)),
    }
}
