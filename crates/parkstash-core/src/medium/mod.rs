//! Synchronous string key-value media the store is layered on.
//!
//! A medium behaves like browser local storage: string keys, string
//! values, no transactions. It may be switched off, run out of room or
//! hold text written by someone else.
//!
//! - `MemoryMedium`: in-process map, used by tests and ephemeral sessions
//! - `FileMedium`: one JSON text file per key under an origin directory

pub mod file;
pub mod memory;

pub use file::FileMedium;
pub use memory::MemoryMedium;

use crate::error::MediumError;

pub trait Medium {
    /// Read the raw text stored under `key`, `None` when absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, MediumError>;

    /// Store `value` under `key`, replacing any previous text.
    fn set_item(&self, key: &str, value: &str) -> Result<(), MediumError>;

    /// Delete `key`. Deleting an absent key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), MediumError>;
}
