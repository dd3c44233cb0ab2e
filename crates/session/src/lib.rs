//! Session domain module: authentication lifecycle, order history, wishlist.
//!
//! Authentication here is a stub over a user directory — observable state
//! transitions only, no credential validation or token handling.

pub mod directory;
pub mod store;
pub mod user;

pub use directory::UserDirectory;
pub use store::SessionStore;
pub use user::{Order, Role, User, UserPatch};
