//! Core business logic - framework-agnostic pantry operations.
//!
//! Nothing in here knows about HTTP. The API layer resolves the caller, then calls into
//! [`service`], which validates and delegates to [`store`]. [`ordering`] is pure and works on
//! whatever the store returned.

/// Caller identity and the authenticator boundary
pub mod auth;
/// Display partitioning and sorting
pub mod ordering;
/// Request validation and ownership checks
pub mod service;
/// Owner-scoped persistence of pantry items
pub mod store;
