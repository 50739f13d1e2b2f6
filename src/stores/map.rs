use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use log::debug;

use super::{next_id, PuppyStorer};
use crate::{Puppy, Result, StoreError};

/// The `MapStore` keeps puppies in a `HashMap` keyed by id.
///
/// It is neither `Sync` nor meant to be: wrap it yourself, or use
/// [`SyncStore`](crate::SyncStore), if several threads need it.
///
/// ```rust
/// # use puppy_store::{MapStore, Puppy, PuppyStorer, ErrorCode};
/// let store = MapStore::new();
/// let id = store.create(Puppy::new("Labrador", "Brown", 999.99)).unwrap();
/// store.delete(id).unwrap();
/// assert_eq!(store.read(id).unwrap_err().code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Default)]
pub struct MapStore {
    puppies: RefCell<HashMap<u32, Puppy>>,
    // last id handed out
    cur_id: Cell<u32>,
}

impl MapStore {
    /// an empty store, first id will be 1
    pub fn new() -> MapStore {
        MapStore::default()
    }
}

impl PuppyStorer for MapStore {
    fn create(&self, mut puppy: Puppy) -> Result<u32> {
        let id = next_id(self.cur_id.get());
        puppy.validate("Create", id)?;
        self.cur_id.set(id);
        puppy.id = id;
        self.puppies.borrow_mut().insert(id, puppy);
        debug!("map: created puppy {}", id);
        Ok(id)
    }

    fn read(&self, id: u32) -> Result<Puppy> {
        self.puppies
            .borrow()
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Read", id))
    }

    fn update(&self, id: u32, mut puppy: Puppy) -> Result<()> {
        let mut puppies = self.puppies.borrow_mut();
        if !puppies.contains_key(&id) {
            return Err(StoreError::not_found("Update", id));
        }
        puppy.validate("Update", id)?;
        puppy.id = id;
        puppies.insert(id, puppy);
        debug!("map: updated puppy {}", id);
        Ok(())
    }

    fn delete(&self, id: u32) -> Result<()> {
        if self.puppies.borrow_mut().remove(&id).is_none() {
            return Err(StoreError::not_found("Delete", id));
        }
        debug!("map: deleted puppy {}", id);
        Ok(())
    }
}
