//! `ContactAdapter` implementation for Podio.

use async_trait::async_trait;
use bridge_traits::contacts::{
    BridgeConfig, Contact, ContactAdapter, OAuth2Callback, OAuth2Credentials,
};
use bridge_traits::error::Result;
use bridge_traits::http::HttpClient;
use core_auth::{CredentialPair, OAuthConfig, OAuthFlowManager};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::ContactOptions;
use crate::connector::PodioContactConnector;
use crate::retry::get_contacts_with_retry;

/// Podio CRM adapter.
///
/// Holds only immutable state, so one instance serves every request.
pub struct PodioAdapter {
    oauth: OAuthFlowManager,
    connector: PodioContactConnector,
}

impl PodioAdapter {
    pub fn new(
        oauth_config: OAuthConfig,
        options: ContactOptions,
        http_client: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            oauth: OAuthFlowManager::new(oauth_config, Arc::clone(&http_client)),
            connector: PodioContactConnector::new(http_client, options),
        }
    }
}

#[async_trait]
impl ContactAdapter for PodioAdapter {
    #[instrument(skip_all)]
    async fn get_contacts(&self, config: &BridgeConfig) -> Result<Vec<Contact>> {
        let credentials = CredentialPair::parse(&config.api_key)?;

        let contacts = get_contacts_with_retry(&self.connector, &self.oauth, &credentials).await?;
        Ok(contacts)
    }

    async fn get_oauth2_redirect_url(&self) -> Result<String> {
        Ok(self.oauth.build_auth_url()?)
    }

    #[instrument(skip_all)]
    async fn handle_oauth2_callback(&self, callback: &OAuth2Callback) -> Result<OAuth2Credentials> {
        let code = callback.code()?;

        let tokens = self.oauth.exchange_code(code).await?;
        info!(expires_at = %tokens.expires_at, "OAuth2 callback completed");

        Ok(OAuth2Credentials {
            api_key: CredentialPair::from(tokens).encode(),
            api_url: String::new(),
        })
    }
}
