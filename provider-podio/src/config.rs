//! Podio endpoints and per-deployment contact options.

use bridge_traits::contacts::PhoneNumberLabel;
use core_auth::OAuthConfig;
use core_runtime::config::OAuth2Settings;
use std::fmt;
use std::time::Duration;

/// Browser-facing authorization endpoint.
pub const PODIO_AUTH_URL: &str = "https://podio.com/oauth/authorize";

/// Token endpoint for both grant types.
pub const PODIO_TOKEN_URL: &str = "https://podio.com/oauth/token";

/// Contact listing endpoint.
pub const PODIO_CONTACT_URL: &str = "https://api.podio.com/contact";

/// Default bound on every outbound request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// What to do with provider records that carry no phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhonelessContacts {
    /// Leave them out of the result
    #[default]
    Drop,
    /// Return them with an empty phone list
    Keep,
}

impl PhonelessContacts {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "drop" => Some(PhonelessContacts::Drop),
            "keep" => Some(PhonelessContacts::Keep),
            _ => None,
        }
    }
}

impl fmt::Display for PhonelessContacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhonelessContacts::Drop => f.write_str("drop"),
            PhonelessContacts::Keep => f.write_str("keep"),
        }
    }
}

/// How contacts are fetched and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactOptions {
    pub phoneless_contacts: PhonelessContacts,
    /// Label applied to every phone number; `None` leaves them unlabeled
    pub phone_label: Option<PhoneNumberLabel>,
    pub request_timeout: Duration,
}

impl Default for ContactOptions {
    fn default() -> Self {
        Self {
            phoneless_contacts: PhonelessContacts::default(),
            phone_label: Some(PhoneNumberLabel::Work),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ContactOptions {
    pub fn with_phoneless_contacts(mut self, phoneless_contacts: PhonelessContacts) -> Self {
        self.phoneless_contacts = phoneless_contacts;
        self
    }

    pub fn with_phone_label(mut self, phone_label: Option<PhoneNumberLabel>) -> Self {
        self.phone_label = phone_label;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

/// OAuth configuration for Podio's fixed endpoints.
pub fn podio_oauth_config(
    settings: &OAuth2Settings,
    scope: Option<String>,
    request_timeout: Duration,
) -> OAuthConfig {
    OAuthConfig {
        client_id: settings.client_id.clone(),
        client_secret: settings.client_secret.clone(),
        redirect_uri: settings.redirect_url.clone(),
        scope,
        auth_url: PODIO_AUTH_URL.to_string(),
        token_url: PODIO_TOKEN_URL.to_string(),
        request_timeout: Some(request_timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ContactOptions::default();
        assert_eq!(options.phoneless_contacts, PhonelessContacts::Drop);
        assert_eq!(options.phone_label, Some(PhoneNumberLabel::Work));
        assert_eq!(options.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_phoneless_parse() {
        assert_eq!(PhonelessContacts::parse("KEEP"), Some(PhonelessContacts::Keep));
        assert_eq!(PhonelessContacts::parse("drop"), Some(PhonelessContacts::Drop));
        assert_eq!(PhonelessContacts::parse("maybe"), None);
    }

    #[test]
    fn test_podio_oauth_config() {
        let settings = OAuth2Settings::new("c1", "s1", "https://app/cb");
        let config = podio_oauth_config(&settings, None, Duration::from_secs(5));

        assert_eq!(config.client_id, "c1");
        assert_eq!(config.redirect_uri, "https://app/cb");
        assert_eq!(config.auth_url, PODIO_AUTH_URL);
        assert_eq!(config.token_url, PODIO_TOKEN_URL);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }
}
