//! Domain logic for the broadcast console backend.
//!
//! Pure, IO-free building blocks shared by the store, the engine client,
//! and the HTTP layer: the error type, the credential check, broadcast
//! group validation, and the progress record model.

pub mod auth;
pub mod error;
pub mod group;
pub mod progress;
