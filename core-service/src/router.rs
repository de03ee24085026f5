//! HTTP surface for the bridge operations.
//!
//! | Route | Bridge operation |
//! |-------|------------------|
//! | `GET /contacts` | `getContacts` |
//! | `GET /oauth2/redirect` | `getOAuth2RedirectUrl` |
//! | `GET /oauth2/callback?code=...` | `handleOAuth2Callback` |
//! | `GET /health` | liveness |

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{routing, Json, Router};
use bridge_traits::contacts::{BridgeConfig, Contact, OAuth2Callback, OAuth2Credentials};
use bridge_traits::error::BridgeError;
use serde::Serialize;
use serde_json::json;

use crate::error::Result;
use crate::BridgeService;

/// Header carrying the caller's opaque API key.
pub const API_KEY_HEADER: &str = "x-provider-key";

/// Header carrying the caller's API URL.
pub const API_URL_HEADER: &str = "x-provider-url";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectUrlResponse {
    pub redirect_url: String,
}

pub fn create_router(service: BridgeService) -> Router {
    Router::new()
        .route("/contacts", routing::get(get_contacts))
        .route("/oauth2/redirect", routing::get(oauth2_redirect))
        .route("/oauth2/callback", routing::get(oauth2_callback))
        .route("/health", routing::get(|| async { Json(json!({"status": "ok"})) }))
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Endpoint not found"})),
            )
        })
        .with_state(service)
}

async fn get_contacts(
    State(service): State<BridgeService>,
    headers: HeaderMap,
) -> Result<Json<Vec<Contact>>> {
    let api_key = header_str(&headers, API_KEY_HEADER).ok_or_else(|| {
        BridgeError::Unauthorized("Missing X-Provider-Key header".to_string())
    })?;
    let api_url = header_str(&headers, API_URL_HEADER).unwrap_or_default();

    let config = BridgeConfig::new(api_key, api_url);
    let contacts = service.get_contacts(&config).await?;
    Ok(Json(contacts))
}

async fn oauth2_redirect(State(service): State<BridgeService>) -> Result<Json<RedirectUrlResponse>> {
    let redirect_url = service.get_oauth2_redirect_url().await?;
    Ok(Json(RedirectUrlResponse { redirect_url }))
}

async fn oauth2_callback(
    State(service): State<BridgeService>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<OAuth2Credentials>> {
    let credentials = service
        .handle_oauth2_callback(&OAuth2Callback::new(query))
        .await?;
    Ok(Json(credentials))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
