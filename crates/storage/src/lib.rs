//! `artglass-storage` — durable records for the state stores.
//!
//! Each store persists exactly one record, addressed by the store's name and
//! treated here as an opaque structured blob. Stores decide what subset of
//! their state is durable; this crate only moves blobs in and out of the
//! host's storage facility.

pub mod backend;

pub use backend::{JsonFileStorage, MemoryStorage, StateStorage};
