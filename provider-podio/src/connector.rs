//! Podio contact API connector
//!
//! Fetches the authenticated user's contacts and normalizes them into the
//! bridge's `Contact` shape.

use async_trait::async_trait;
use bridge_traits::contacts::{Contact, PhoneNumber, PhoneNumberLabel};
use bridge_traits::http::HttpClient;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::{ContactOptions, PhonelessContacts, PODIO_CONTACT_URL};
use crate::error::{PodioError, Result};
use crate::types::PodioContact;

/// Something that can list contacts for an access token.
///
/// The retry path is written against this rather than the concrete connector.
#[async_trait]
pub trait ContactSource: Send + Sync {
    async fn list_contacts(&self, access_token: &str) -> Result<Vec<Contact>>;
}

/// Podio contact API connector
///
/// # Behaviour
///
/// - One `GET` per call, bounded by the configured request timeout
/// - Non-2xx responses and transport failures are errors
/// - A body that is not a JSON array yields an empty list
/// - Array entries that do not look like a contact record are skipped
///
/// # Example
///
/// ```ignore
/// use provider_podio::{ContactOptions, ContactSource, PodioContactConnector};
///
/// let connector = PodioContactConnector::new(http_client, ContactOptions::default());
/// let contacts = connector.list_contacts("access-token").await?;
/// ```
pub struct PodioContactConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    options: ContactOptions,

    contact_url: String,
}

impl PodioContactConnector {
    pub fn new(http_client: Arc<dyn HttpClient>, options: ContactOptions) -> Self {
        Self {
            http_client,
            options,
            contact_url: PODIO_CONTACT_URL.to_string(),
        }
    }

    /// Point the connector at a different contact endpoint.
    pub fn with_contact_url(mut self, contact_url: impl Into<String>) -> Self {
        self.contact_url = contact_url.into();
        self
    }

    /// Decode the response body into records, tolerating junk.
    fn parse_records(body: &[u8]) -> Vec<PodioContact> {
        let entries = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Array(entries)) => entries,
            Ok(other) => {
                warn!(
                    kind = json_kind(&other),
                    "Contact response is not an array, returning no contacts"
                );
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Contact response is not JSON, returning no contacts");
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(
                |(index, entry)| match serde_json::from_value::<PodioContact>(entry) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(index, error = %e, "Skipping malformed contact record");
                        None
                    }
                },
            )
            .collect()
    }
}

#[async_trait]
impl ContactSource for PodioContactConnector {
    #[instrument(skip(self, access_token))]
    async fn list_contacts(&self, access_token: &str) -> Result<Vec<Contact>> {
        debug!("Listing contacts from Podio");

        let response = self
            .http_client
            .get_json(
                &self.contact_url,
                access_token,
                Some(self.options.request_timeout),
            )
            .await
            .map_err(|e| PodioError::NetworkError(e.to_string()))?;

        if !response.is_success() {
            // The body stays in the logs; callers only see the status.
            warn!(
                status = response.status,
                body = %String::from_utf8_lossy(&response.body),
                "Contact request failed"
            );
            return Err(PodioError::ApiError {
                status_code: response.status,
            });
        }

        let records = Self::parse_records(&response.body);
        let received = records.len();

        let contacts: Vec<Contact> = records
            .into_iter()
            .filter(|record| {
                self.options.phoneless_contacts == PhonelessContacts::Keep || record.has_phone()
            })
            .map(|record| normalize_contact(record, self.options.phone_label))
            .collect();

        info!(
            received,
            returned = contacts.len(),
            "Listed contacts from Podio"
        );

        Ok(contacts)
    }
}

/// Map a Podio record onto the bridge contact shape.
///
/// Phone strings are passed through in order, unvalidated, each carrying
/// `phone_label`.
pub fn normalize_contact(record: PodioContact, phone_label: Option<PhoneNumberLabel>) -> Contact {
    let email = record.primary_email().map(str::to_string);

    let phone_numbers = record
        .phone
        .unwrap_or_default()
        .into_iter()
        .map(|phone_number| PhoneNumber {
            label: phone_label,
            phone_number,
        })
        .collect();

    Contact {
        id: record.profile_id.to_string(),
        name: record.name,
        first_name: None,
        last_name: None,
        email,
        organization: None,
        contact_url: record.link,
        avatar_url: None,
        phone_numbers,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::http::{HttpRequest, HttpResponse};
    use bytes::Bytes;
    use mockall::mock;
    use std::collections::HashMap;
    use std::time::Duration;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        }
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    fn connector_returning(
        status: u16,
        body: &'static str,
        options: ContactOptions,
    ) -> PodioContactConnector {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(move |_| Ok(response(status, body)));
        PodioContactConnector::new(Arc::new(http), options)
    }

    fn record(profile_id: u64, phone: Option<Vec<&str>>) -> PodioContact {
        PodioContact {
            profile_id,
            name: Some("Jane".to_string()),
            mail: None,
            phone: phone.map(|p| p.into_iter().map(str::to_string).collect()),
            link: Some("u".to_string()),
        }
    }

    #[test]
    fn test_normalize_contact() {
        let mut input = record(42, Some(vec!["123", "+49 30 1234"]));
        input.mail = Some(vec!["jane@example.com".to_string(), "other@example.com".to_string()]);

        let contact = normalize_contact(input, Some(PhoneNumberLabel::Work));

        assert_eq!(contact.id, "42");
        assert_eq!(contact.name.as_deref(), Some("Jane"));
        assert_eq!(contact.email.as_deref(), Some("jane@example.com"));
        assert_eq!(contact.contact_url.as_deref(), Some("u"));
        assert_eq!(contact.first_name, None);
        assert_eq!(contact.last_name, None);
        assert_eq!(contact.organization, None);
        assert_eq!(contact.avatar_url, None);
        assert_eq!(
            contact.phone_numbers,
            vec![
                PhoneNumber {
                    label: Some(PhoneNumberLabel::Work),
                    phone_number: "123".to_string(),
                },
                PhoneNumber {
                    label: Some(PhoneNumberLabel::Work),
                    phone_number: "+49 30 1234".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_normalize_empty_mail_gives_null_email() {
        let mut input = record(1, Some(vec!["1"]));
        input.mail = Some(Vec::new());

        assert_eq!(normalize_contact(input, None).email, None);
    }

    #[test]
    fn test_normalize_unlabeled_phones() {
        let contact = normalize_contact(record(1, Some(vec!["1", "2"])), None);
        assert!(contact.phone_numbers.iter().all(|p| p.label.is_none()));
        assert_eq!(contact.phone_numbers.len(), 2);
    }

    #[tokio::test]
    async fn test_list_contacts_sends_bearer_token() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .withf(|req| {
                req.url == PODIO_CONTACT_URL
                    && req.header_value("Authorization") == Some("Bearer AT1")
                    && req.timeout == Some(Duration::from_secs(30))
            })
            .times(1)
            .returning(|_| Ok(response(200, "[]")));

        let connector = PodioContactConnector::new(Arc::new(http), ContactOptions::default());
        let contacts = connector.list_contacts("AT1").await.unwrap();
        assert!(contacts.is_empty());
    }

    #[tokio::test]
    async fn test_list_contacts_drops_phoneless_records() {
        let body = r#"[
            {"profile_id": 1, "name": "A", "phone": ["111"], "link": "a"},
            {"profile_id": 2, "name": "B", "phone": [], "link": "b"},
            {"profile_id": 3, "name": "C", "link": "c"},
            {"profile_id": 4, "name": "D", "phone": ["444"], "mail": ["d@example.com"], "link": "d"}
        ]"#;

        let connector = connector_returning(200, body, ContactOptions::default());
        let contacts = connector.list_contacts("AT").await.unwrap();

        let ids: Vec<&str> = contacts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(contacts[1].email.as_deref(), Some("d@example.com"));
    }

    #[tokio::test]
    async fn test_list_contacts_keeps_phoneless_records_when_configured() {
        let body = r#"[
            {"profile_id": 1, "name": "A", "phone": ["111"], "link": "a"},
            {"profile_id": 2, "name": "B", "link": "b"}
        ]"#;

        let options = ContactOptions::default().with_phoneless_contacts(PhonelessContacts::Keep);
        let connector = connector_returning(200, body, options);
        let contacts = connector.list_contacts("AT").await.unwrap();

        assert_eq!(contacts.len(), 2);
        assert!(contacts[1].phone_numbers.is_empty());
    }

    #[tokio::test]
    async fn test_list_contacts_non_array_body_is_empty() {
        for body in [r#"{"error":"weird"}"#, "", "not json", "null"] {
            let connector = connector_returning(200, body, ContactOptions::default());
            let contacts = connector.list_contacts("AT").await.unwrap();
            assert!(contacts.is_empty(), "body {body:?} should give no contacts");
        }
    }

    #[tokio::test]
    async fn test_list_contacts_skips_malformed_entries() {
        let body = r#"[
            "garbage",
            {"name": "no id", "phone": ["1"]},
            {"profile_id": 9, "name": "Ok", "phone": ["999"], "link": "ok"}
        ]"#;

        let connector = connector_returning(200, body, ContactOptions::default());
        let contacts = connector.list_contacts("AT").await.unwrap();

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].id, "9");
    }

    #[tokio::test]
    async fn test_list_contacts_unauthorized() {
        let connector = connector_returning(401, "expired", ContactOptions::default());
        let err = connector.list_contacts("AT").await.unwrap_err();

        assert!(matches!(err, PodioError::ApiError { status_code: 401 }));

        let bridge = BridgeError::from(err);
        assert!(!bridge.to_string().contains("expired"));
    }

    #[tokio::test]
    async fn test_list_contacts_network_error() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Err(BridgeError::OperationFailed("Request timed out".to_string())));

        let connector = PodioContactConnector::new(Arc::new(http), ContactOptions::default());
        let err = connector.list_contacts("AT").await.unwrap_err();

        assert!(matches!(err, PodioError::NetworkError(_)));
    }

    #[tokio::test]
    async fn test_custom_contact_url() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .withf(|req| req.url == "http://localhost:9999/contact")
            .times(1)
            .returning(|_| Ok(response(200, "[]")));

        let connector = PodioContactConnector::new(Arc::new(http), ContactOptions::default())
            .with_contact_url("http://localhost:9999/contact");
        connector.list_contacts("AT").await.unwrap();
    }
}
