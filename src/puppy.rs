use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{Result, StoreError};

/// A puppy record.
///
/// `id` is owned by the store: whatever the caller puts there is replaced by
/// the key the record is stored under.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Puppy {
    /// Store-assigned identifier.
    pub id: u32,
    /// Breed, free text.
    pub breed: String,
    /// Colour, free text.
    pub colour: String,
    /// Monetary value, must not be negative.
    pub value: f64,
}

impl Puppy {
    /// Build a puppy with an unassigned (zero) id.
    pub fn new(breed: impl Into<String>, colour: impl Into<String>, value: f64) -> Puppy {
        Puppy {
            id: 0,
            breed: breed.into(),
            colour: colour.into(),
            value,
        }
    }

    // `op` and `id` only feed the error message.
    pub(crate) fn validate(&self, op: &str, id: u32) -> Result<()> {
        // NaN is not a value either, and serde_json cannot store it.
        if self.value.is_nan() || self.value < 0.0 {
            warn!("{}: rejected puppy {} with value {}", op, id, self.value);
            return Err(StoreError::invalid_input(op, id));
        }
        Ok(())
    }
}

impl fmt::Display for Puppy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{{} {} {} {}}}",
            self.id, self.breed, self.colour, self.value
        )
    }
}
