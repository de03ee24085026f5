//! # Podio Provider
//!
//! Implements the `ContactAdapter` bridge contract for the Podio CRM.
//!
//! ## Overview
//!
//! This module provides:
//! - Contact listing against `https://api.podio.com/contact`
//! - Normalization of Podio contact records into bridge contacts
//! - A single retry with a refreshed access token when listing fails
//! - The OAuth2 redirect and callback operations, backed by `core-auth`
//!
//! ## Contact handling
//!
//! Records without a phone number are dropped unless
//! [`PhonelessContacts::Keep`] is configured. Every phone number carries the
//! configured label (`WORK` by default).

pub mod adapter;
pub mod config;
pub mod connector;
pub mod error;
pub mod retry;
pub mod types;

pub use adapter::PodioAdapter;
pub use config::{
    podio_oauth_config, ContactOptions, PhonelessContacts, DEFAULT_REQUEST_TIMEOUT,
    PODIO_AUTH_URL, PODIO_CONTACT_URL, PODIO_TOKEN_URL,
};
pub use connector::{normalize_contact, ContactSource, PodioContactConnector};
pub use error::{PodioError, Result};
pub use retry::get_contacts_with_retry;
pub use types::PodioContact;
