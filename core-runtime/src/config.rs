//! # Bridge Configuration
//!
//! Loads the process-wide OAuth2 client configuration.
//!
//! ## Overview
//!
//! The OAuth2 client id, client secret and redirect URL are read once at
//! startup and never change afterwards. Loading fails fast with an error naming
//! the missing variable, so a misconfigured deployment never starts serving.
//!
//! Deployments disagree on variable names, so the naming scheme is an explicit
//! choice:
//!
//! | Setting | [`EnvNaming::Generic`] | [`EnvNaming::ProviderPrefixed`] |
//! |---------|------------------------|---------------------------------|
//! | client id | `CLIENT_ID` | `PODIO_CLIENT_ID` |
//! | client secret | `CLIENT_SECRET` | `PODIO_CLIENT_SECRET` |
//! | redirect URL | `REDIRECT_URL` | `PODIO_REDIRECT_URL` |
//!
//! ## Usage
//!
//! ```no_run
//! use core_runtime::config::{EnvNaming, OAuth2Settings};
//!
//! let settings = OAuth2Settings::from_env(EnvNaming::Generic)
//!     .expect("OAuth2 configuration is incomplete");
//! ```
//!
//! Tests and embedders that do not want to touch the process environment use
//! [`OAuth2Settings::from_lookup`] with their own source.

use crate::error::{Error, Result};
use std::fmt;

/// Prefix used by [`EnvNaming::ProviderPrefixed`].
pub const PROVIDER_PREFIX: &str = "PODIO_";

/// Which environment variable names carry the OAuth2 settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvNaming {
    /// `CLIENT_ID`, `CLIENT_SECRET`, `REDIRECT_URL`
    #[default]
    Generic,
    /// `PODIO_CLIENT_ID`, `PODIO_CLIENT_SECRET`, `PODIO_REDIRECT_URL`
    ProviderPrefixed,
}

impl EnvNaming {
    /// Full variable name for a base name such as `CLIENT_ID`.
    pub fn variable(&self, base: &str) -> String {
        match self {
            EnvNaming::Generic => base.to_string(),
            EnvNaming::ProviderPrefixed => format!("{}{}", PROVIDER_PREFIX, base),
        }
    }

    /// Parse a naming scheme identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use core_runtime::config::EnvNaming;
    ///
    /// assert_eq!(EnvNaming::parse("podio"), Some(EnvNaming::ProviderPrefixed));
    /// assert_eq!(EnvNaming::parse("generic"), Some(EnvNaming::Generic));
    /// assert_eq!(EnvNaming::parse("other"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "generic" | "plain" => Some(EnvNaming::Generic),
            "podio" | "prefixed" | "provider" | "provider_prefixed" => {
                Some(EnvNaming::ProviderPrefixed)
            }
            _ => None,
        }
    }
}

impl fmt::Display for EnvNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvNaming::Generic => f.write_str("generic"),
            EnvNaming::ProviderPrefixed => f.write_str("podio"),
        }
    }
}

/// OAuth2 client configuration shared by every request.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuth2Settings {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Redirect URL registered with the provider
    pub redirect_url: String,
}

impl OAuth2Settings {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url: redirect_url.into(),
        }
    }

    /// Read the settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingVariable`] for the first variable that is unset
    /// or empty, checked in the order client id, client secret, redirect URL.
    pub fn from_env(naming: EnvNaming) -> Result<Self> {
        Self::from_lookup(naming, |name| std::env::var(name).ok())
    }

    /// Read the settings through an arbitrary lookup function.
    pub fn from_lookup<F>(naming: EnvNaming, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |base: &str, description: &'static str| -> Result<String> {
            let variable = naming.variable(base);
            match lookup(&variable) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(Error::MissingVariable {
                    variable,
                    description,
                }),
            }
        };

        let settings = Self {
            client_id: require("CLIENT_ID", "client ID")?,
            client_secret: require("CLIENT_SECRET", "client secret")?,
            redirect_url: require("REDIRECT_URL", "redirect URI")?,
        };

        tracing::debug!(naming = %naming, "Loaded OAuth2 settings from environment");

        Ok(settings)
    }

    /// Validates the settings
    ///
    /// Used for settings built in code rather than loaded from the environment.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(Error::Config("Client ID cannot be empty".to_string()));
        }
        if self.client_secret.trim().is_empty() {
            return Err(Error::Config("Client secret cannot be empty".to_string()));
        }
        if self.redirect_url.trim().is_empty() {
            return Err(Error::Config("Redirect URL cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for OAuth2Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2Settings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_url", &self.redirect_url)
            .finish()
    }
}
