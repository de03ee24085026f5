//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the Podio bridge:
//! - Logging and tracing infrastructure
//! - OAuth2 configuration loaded from the process environment
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that other modules depend on. It
//! establishes the logging conventions and the fail-fast configuration rules
//! used throughout the system.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
