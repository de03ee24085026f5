//! Contact listing with a single retry after refreshing the access token.
//!
//! ```text
//! Initial --fail--> refresh --ok--> Retried --ok--> Done
//!    |                 |               |
//!    ok              fail            fail
//!    v                 v               v
//!  Done             Failed          Failed
//! ```
//!
//! The stored access token is assumed to be stale at any time, so any failure
//! of the first attempt triggers exactly one refresh. There is no second
//! refresh and no backoff.

use bridge_traits::contacts::Contact;
use core_auth::{AccessTokenRefresher, CredentialPair};
use tracing::{debug, info, instrument, warn};

use crate::connector::ContactSource;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Initial,
    Retried,
}

/// List contacts, refreshing the access token once if the first attempt fails.
///
/// # Errors
///
/// - The refresh error, when the first attempt fails and the refresh fails too
/// - The second listing error, when the retry with the new token also fails
#[instrument(skip_all)]
pub async fn get_contacts_with_retry(
    source: &dyn ContactSource,
    refresher: &dyn AccessTokenRefresher,
    credentials: &CredentialPair,
) -> Result<Vec<Contact>> {
    let mut attempt = Attempt::Initial;
    let mut access_token = credentials.access_token().to_string();

    loop {
        match source.list_contacts(&access_token).await {
            Ok(contacts) => {
                debug!(?attempt, count = contacts.len(), "Contacts listed");
                return Ok(contacts);
            }
            Err(error) => match attempt {
                Attempt::Initial => {
                    warn!(error = %error, "Listing contacts failed, refreshing access token");
                    access_token = refresher
                        .refresh_access_token(credentials.refresh_token())
                        .await?;
                    info!("Access token refreshed, retrying contact listing");
                    attempt = Attempt::Retried;
                }
                Attempt::Retried => {
                    warn!(error = %error, "Listing contacts failed after token refresh");
                    return Err(error);
                }
            },
        }
    }
}
