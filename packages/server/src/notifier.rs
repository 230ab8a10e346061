//! Best-effort announcements of newly created resources.
//!
//! Notifications are dispatched on a detached task after the creating
//! transaction has committed. A failed or slow webhook is logged and
//! otherwise ignored; it never changes the outcome of the request.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::NotificationConfig;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("webhook responded with status {0}")]
    Status(reqwest::StatusCode),
}

/// Facts about a freshly created resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCreated {
    pub resource_id: i32,
    pub resource_name: String,
}

#[async_trait]
pub trait ResourceNotifier: Send + Sync {
    async fn resource_created(&self, event: &ResourceCreated) -> Result<(), NotifyError>;

    /// Whether announcements leave the process at all.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Used when no webhook is configured.
pub struct DisabledNotifier;

#[async_trait]
impl ResourceNotifier for DisabledNotifier {
    async fn resource_created(&self, _event: &ResourceCreated) -> Result<(), NotifyError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Chat-style webhook payload (`{"content": "..."}`).
#[derive(Serialize)]
struct WebhookMessage {
    content: String,
}

/// Posts a short message to a chat webhook.
pub struct WebhookNotifier {
    client: Client,
    url: String,
    frontend_url: String,
}

impl WebhookNotifier {
    pub fn new(url: String, frontend_url: String) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            url,
            frontend_url,
        })
    }

    fn message(&self, event: &ResourceCreated) -> WebhookMessage {
        WebhookMessage {
            content: format!(
                "There's a new resource ({}) on {}!",
                event.resource_name, self.frontend_url
            ),
        }
    }
}

#[async_trait]
impl ResourceNotifier for WebhookNotifier {
    async fn resource_created(&self, event: &ResourceCreated) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(&self.message(event))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::Status(response.status()));
        }
        Ok(())
    }
}

/// Build the notifier described by `config`.
pub fn from_config(config: &NotificationConfig) -> Result<Arc<dyn ResourceNotifier>, NotifyError> {
    match config.webhook_url.as_deref() {
        Some(url) if !url.trim().is_empty() => Ok(Arc::new(WebhookNotifier::new(
            url.trim().to_string(),
            config.frontend_url.clone(),
        )?)),
        _ => Ok(Arc::new(DisabledNotifier)),
    }
}

/// Fire and forget: the returned handle may be dropped.
pub fn dispatch_resource_created(
    notifier: Arc<dyn ResourceNotifier>,
    event: ResourceCreated,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.resource_created(&event).await {
            Ok(()) => debug!(resource_id = event.resource_id, "Resource creation announced"),
            Err(e) => warn!(
                resource_id = event.resource_id,
                "Failed to announce new resource: {}", e
            ),
        }
    })
}
