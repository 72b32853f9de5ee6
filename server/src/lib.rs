//! HTTP layer of the booking API.
//!
//! Exposed as a library so integration tests can drive the router directly.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;
