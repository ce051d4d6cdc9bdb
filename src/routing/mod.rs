//! Request dispatch.
//!
//! Each request is classified once by its path into a [`Route`] and handed
//! to the matching handler. Routing holds no per-request state.

pub mod handlers;
pub mod router;

pub use router::{Route, Router};
