//! This module provides the puppy storage backends.

use std::fmt::Display;
use std::sync::Arc;

use log::error;

use crate::{Puppy, Result};

/// Trait for a puppy store backend
///
/// Methods take `&self`; each backend picks its own interior mutability.
/// Whether a store may be shared between threads follows from its `Sync`
/// bound, not from this trait.
pub trait PuppyStorer {
    /// store a new puppy and return the id assigned to it
    /// ids start at 1 and are never reused, even after delete
    /// a negative value returns `ErrorCode::InvalidInput`
    fn create(&self, puppy: Puppy) -> Result<u32>;
    /// return the puppy stored under `id`, or `ErrorCode::NotFound`
    fn read(&self, id: u32) -> Result<Puppy>;
    /// replace the puppy stored under `id`
    /// the stored record always gets `id`, whatever `puppy.id` says
    fn update(&self, id: u32, puppy: Puppy) -> Result<()>;
    /// if `id` not found, return `ErrorCode::NotFound`
    fn delete(&self, id: u32) -> Result<()>;
}

macro_rules! forward_storer {
    ($($ptr:ty),*) => {$(
        impl<S: PuppyStorer + ?Sized> PuppyStorer for $ptr {
            fn create(&self, puppy: Puppy) -> Result<u32> {
                (**self).create(puppy)
            }
            fn read(&self, id: u32) -> Result<Puppy> {
                (**self).read(id)
            }
            fn update(&self, id: u32, puppy: Puppy) -> Result<()> {
                (**self).update(id, puppy)
            }
            fn delete(&self, id: u32) -> Result<()> {
                (**self).delete(id)
            }
        }
    )*};
}

forward_storer!(&S, Box<S>, Arc<S>);

/// Log and panic: the store cannot carry on after this.
///
/// Used for conditions that are not a caller's mistake and that no
/// `StoreError` code describes.
pub(crate) fn fatal(reason: impl Display) -> ! {
    error!("{}", reason);
    panic!("fatal storage failure: {}", reason);
}

/// the id after `cur_id`; ids are never reused, so running out is fatal
pub(crate) fn next_id(cur_id: u32) -> u32 {
    cur_id
        .checked_add(1)
        .unwrap_or_else(|| fatal("id space exhausted"))
}

mod map;
mod sled;
mod sync;

pub use self::map::MapStore;
pub use self::sled::SledStore;
pub use self::sync::SyncStore;
