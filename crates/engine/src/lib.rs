//! HTTP client for the external workflow engine.
//!
//! The engine is an opaque webhook collaborator: it receives one POST per
//! submission and later reports progress back over our own HTTP surface.
//! This crate owns the outbound call, its timeout and error
//! classification, and the normalization of the engine's historically
//! inconsistent reply shapes into a single execution id.

pub mod api;
pub mod execution;

pub use api::{DispatchAck, DispatchPayload, EngineApi, EngineError, DEFAULT_DISPATCH_TIMEOUT};
pub use execution::{extract_execution_id, fallback_execution_id};
