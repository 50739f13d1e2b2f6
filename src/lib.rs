#![deny(missing_docs)]
//! A small record store for puppies.
//!
//! Every backend implements [`PuppyStorer`]:
//! - [`MapStore`] keeps records in a plain map and is for single-threaded use.
//! - [`SyncStore`] keeps records in a concurrent map and serializes writes
//!   behind a mutex.
//! - [`SledStore`] persists records in a sled database on disk.
//!
//! ```rust
//! # use puppy_store::{MapStore, Puppy, PuppyStorer, Result};
//! # fn try_main() -> Result<()> {
//! let store = MapStore::new();
//! let id = store.create(Puppy::new("Retriever", "Golden", 9999.99))?;
//! assert_eq!(id, 1);
//! assert_eq!(store.read(id)?.breed, "Retriever");
//! # Ok(())
//! # }
//! # try_main().unwrap();
//! ```

pub use error::{ErrorCode, Result, StoreError};
pub use puppy::Puppy;
pub use stores::{MapStore, PuppyStorer, SledStore, SyncStore};

mod error;
mod puppy;
mod stores;
