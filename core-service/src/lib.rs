//! Core service façade and bootstrap helpers.
//!
//! This crate wires a [`ContactAdapter`] into the HTTP surface the bridge host
//! talks to. Hosts typically enable the `desktop-shims` feature (which depends
//! on `bridge-desktop`) and call [`BridgeService::podio`], which builds the
//! reqwest-backed HTTP client and the Podio adapter from loaded settings.
//! Tests construct the service directly from any adapter.

pub mod error;
pub mod router;

pub use error::{CoreError, Result};
pub use router::{create_router, API_KEY_HEADER, API_URL_HEADER};

use std::sync::Arc;

use axum::Router;
use bridge_traits::contacts::{
    BridgeConfig, Contact, ContactAdapter, OAuth2Callback, OAuth2Credentials,
};
use tracing::{info, instrument};

#[cfg(feature = "desktop-shims")]
use core_runtime::config::OAuth2Settings;
#[cfg(feature = "desktop-shims")]
use provider_podio::ContactOptions;

/// Primary façade exposed to the bridge host.
#[derive(Clone)]
pub struct BridgeService {
    adapter: Arc<dyn ContactAdapter>,
}

impl BridgeService {
    /// Create a new service around the provided adapter.
    pub fn new(adapter: Arc<dyn ContactAdapter>) -> Self {
        Self { adapter }
    }

    /// Build the Podio adapter on top of the desktop HTTP client.
    ///
    /// # Errors
    ///
    /// Fails if the settings are incomplete or the HTTP client cannot be built.
    #[cfg(feature = "desktop-shims")]
    pub fn podio(
        settings: &OAuth2Settings,
        options: ContactOptions,
        oauth_scope: Option<String>,
    ) -> Result<Self> {
        use bridge_desktop::ReqwestHttpClient;
        use bridge_traits::http::HttpClient;
        use provider_podio::{podio_oauth_config, PodioAdapter};

        settings.validate()?;

        let http_client: Arc<dyn HttpClient> = Arc::new(
            ReqwestHttpClient::with_timeout(options.request_timeout)
                .map_err(|e| CoreError::InitializationFailed(e.to_string()))?,
        );

        info!(
            client_id = %settings.client_id,
            redirect_url = %settings.redirect_url,
            phoneless_contacts = %options.phoneless_contacts,
            request_timeout_secs = options.request_timeout.as_secs(),
            "Podio adapter configured"
        );

        let oauth_config = podio_oauth_config(settings, oauth_scope, options.request_timeout);
        let adapter = PodioAdapter::new(oauth_config, options, http_client);

        Ok(Self::new(Arc::new(adapter)))
    }

    /// Access the adapter being used by the service.
    pub fn adapter(&self) -> Arc<dyn ContactAdapter> {
        Arc::clone(&self.adapter)
    }

    /// HTTP router serving the bridge operations.
    pub fn router(&self) -> Router {
        create_router(self.clone())
    }

    #[instrument(skip_all)]
    pub async fn get_contacts(&self, config: &BridgeConfig) -> Result<Vec<Contact>> {
        let contacts = self.adapter.get_contacts(config).await?;
        info!(count = contacts.len(), "Served contacts");
        Ok(contacts)
    }

    pub async fn get_oauth2_redirect_url(&self) -> Result<String> {
        Ok(self.adapter.get_oauth2_redirect_url().await?)
    }

    #[instrument(skip_all)]
    pub async fn handle_oauth2_callback(
        &self,
        callback: &OAuth2Callback,
    ) -> Result<OAuth2Credentials> {
        Ok(self.adapter.handle_oauth2_callback(callback).await?)
    }
}
