//! Record store adapters.
//!
//! [`HttpRecordStore`] speaks a PostgREST-style REST dialect against a
//! hosted relational store. [`MemoryRecordStore`] keeps tables as JSON rows
//! in process memory; tests run against it, and the server falls back to it
//! when no store endpoint is configured.

mod http;
mod memory;

pub use self::http::{HttpRecordStore, StoreSettings};
pub use self::memory::MemoryRecordStore;
