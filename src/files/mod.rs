//! File storage backing the `/files/` routes.
//!
//! Handlers address files by bare name only; the store decides where
//! those names live.

pub mod store;

pub use store::{DirectoryStore, FileStore};
