//! Sync webhook trigger

use crate::config::ClientConfig;
use crate::http::{HttpClient, HttpRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared::error::{ConfigError, TriggerError};
use std::sync::Arc;

/// Path appended to the webhook base
pub const SYNC_PATH: &str = "sync-kiotviet-data";
/// Payload tag naming what to sync
pub const SYNC_TYPE_PRODUCTS: &str = "products";

/// Result of a successful trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    /// Response body verbatim, or the status text when the body is empty
    pub message: String,
}

/// Fires the out-of-process catalog sync
///
/// One POST, no retry. The catalog is not refetched afterwards; callers that
/// want fresh data refresh through the favorite-preserving merge.
#[derive(Clone)]
pub struct SyncTrigger {
    http: Arc<dyn HttpClient>,
    webhook_url: Option<String>,
    secret: Option<String>,
}

impl SyncTrigger {
    pub fn new(http: Arc<dyn HttpClient>, webhook_url: Option<String>, secret: Option<String>) -> Self {
        Self {
            http,
            webhook_url,
            secret,
        }
    }

    pub fn from_config(http: Arc<dyn HttpClient>, config: &ClientConfig) -> Self {
        Self::new(http, config.webhook_url.clone(), config.webhook_secret.clone())
    }

    fn endpoint(&self) -> Result<(String, &str), ConfigError> {
        let base = self
            .webhook_url
            .as_deref()
            .ok_or_else(|| ConfigError::missing(crate::config::WEBHOOK_URL_KEY))?;
        let secret = self
            .secret
            .as_deref()
            .ok_or_else(|| ConfigError::missing(crate::config::WEBHOOK_SECRET_KEY))?;
        Ok((format!("{}/{}", base.trim_end_matches('/'), SYNC_PATH), secret))
    }

    pub async fn trigger_sync(&self) -> Result<SyncOutcome, TriggerError> {
        // Configuration is checked before any request is built
        let (url, secret) = self.endpoint()?;

        let request = HttpRequest::post(url)
            .basic(secret)
            .json(json!({ "type": SYNC_TYPE_PRODUCTS }));

        let reply = self.http.execute(request).await.map_err(|e| {
            tracing::warn!(error = %e, "Sync webhook unreachable");
            TriggerError::Transport(e.to_string())
        })?;

        if !reply.is_success() {
            tracing::warn!(status = reply.status, "Sync webhook rejected the request");
            let message = if reply.body.trim().is_empty() {
                reply.status_text
            } else {
                reply.body
            };
            return Err(TriggerError::RemoteRejected {
                status: reply.status,
                message,
            });
        }

        tracing::info!(status = reply.status, "Sync webhook accepted");
        let message = if reply.body.trim().is_empty() {
            reply.status_text
        } else {
            reply.body
        };
        Ok(SyncOutcome { message })
    }
}
