//! Workspace placeholder crate.
//!
//! This crate exposes the `desktop-shims` feature that maps onto
//! `core-service`, so a host can depend on `podio-bridge-workspace` and get the
//! Podio bridge service with the reqwest-backed HTTP client without wiring each
//! crate individually.

#[cfg(feature = "desktop-shims")]
pub use core_service::{BridgeService, CoreError};
