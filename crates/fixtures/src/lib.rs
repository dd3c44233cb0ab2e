//! `artglass-fixtures` — static seed data standing in for a remote API.
//!
//! Read-only collections supplied at process start: a 13-artwork catalog and
//! an 8-account user directory. The source implementations can simulate
//! remote-call latency; they always resume and return (no cancellation).

pub mod artworks;
pub mod users;

pub use artworks::{seed_artworks, FixtureCatalog};
pub use users::{seed_users, FixtureDirectory};
