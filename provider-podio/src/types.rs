//! Podio API response types

use serde::{Deserialize, Serialize};

/// Entry of the `GET /contact` response array.
///
/// Only the fields the bridge maps are declared; everything else Podio sends
/// is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodioContact {
    /// Numeric profile id
    pub profile_id: u64,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Email addresses, primary first
    #[serde(default)]
    pub mail: Option<Vec<String>>,

    /// Phone numbers as free-form strings
    #[serde(default)]
    pub phone: Option<Vec<String>>,

    /// Profile URL in the Podio web app
    #[serde(default)]
    pub link: Option<String>,
}

impl PodioContact {
    pub fn has_phone(&self) -> bool {
        self.phone.as_ref().is_some_and(|phones| !phones.is_empty())
    }

    pub fn primary_email(&self) -> Option<&str> {
        self.mail
            .as_ref()
            .and_then(|mail| mail.first())
            .map(String::as_str)
    }
}
