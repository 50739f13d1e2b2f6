use std::sync::{Mutex, MutexGuard, PoisonError};

use crossbeam_skiplist::SkipMap;
use log::debug;

use super::{next_id, PuppyStorer};
use crate::{Puppy, Result, StoreError};

/// The `SyncStore` is the thread-safe in-memory store.
///
/// Puppies live in a lock-free `SkipMap`, so reads never wait. Create, update
/// and delete hold `cur_id`'s mutex for their whole duration, which makes each
/// of them atomic with respect to the others.
///
/// ```rust
/// # use puppy_store::{Puppy, PuppyStorer, SyncStore};
/// let store = SyncStore::new();
/// std::thread::scope(|s| {
///     for _ in 0..4 {
///         s.spawn(|| store.create(Puppy::new("Beagle", "Tricolour", 150.0)).unwrap());
///     }
/// });
/// assert_eq!(store.read(4).unwrap().id, 4);
/// ```
pub struct SyncStore {
    puppies: SkipMap<u32, Puppy>,
    cur_id: Mutex<u32>,
}

impl SyncStore {
    /// an empty store, first id will be 1
    pub fn new() -> SyncStore {
        SyncStore {
            puppies: SkipMap::new(),
            cur_id: Mutex::new(0),
        }
    }

    // The counter is only written after validation, so a guard left behind by
    // a panicking writer is still consistent.
    fn lock(&self) -> MutexGuard<'_, u32> {
        self.cur_id.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SyncStore {
    fn default() -> SyncStore {
        SyncStore::new()
    }
}

impl PuppyStorer for SyncStore {
    fn create(&self, mut puppy: Puppy) -> Result<u32> {
        let mut cur_id = self.lock();
        let id = next_id(*cur_id);
        puppy.validate("Create", id)?;
        *cur_id = id;
        puppy.id = id;
        self.puppies.insert(id, puppy);
        debug!("sync: created puppy {}", id);
        Ok(id)
    }

    fn read(&self, id: u32) -> Result<Puppy> {
        self.puppies
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found("Read", id))
    }

    fn update(&self, id: u32, mut puppy: Puppy) -> Result<()> {
        let _guard = self.lock();
        if !self.puppies.contains_key(&id) {
            return Err(StoreError::not_found("Update", id));
        }
        puppy.validate("Update", id)?;
        puppy.id = id;
        self.puppies.insert(id, puppy);
        debug!("sync: updated puppy {}", id);
        Ok(())
    }

    fn delete(&self, id: u32) -> Result<()> {
        let _guard = self.lock();
        if self.puppies.remove(&id).is_none() {
            return Err(StoreError::not_found("Delete", id));
        }
        debug!("sync: deleted puppy {}", id);
        Ok(())
    }
}
