//! Transfer notifications
//!
//! Fire-and-forget mail dispatch. A notification failure is logged and
//! swallowed; it never fails or delays the transfer that triggered it.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::config::NotifierConfig;

/// Payload handed to the notifier after a completed transfer
#[derive(Debug, Clone, Serialize)]
pub struct TransferNotice {
    pub email: String,
    pub name: String,
    pub counterparty: String,
    pub amount: String,
    pub transaction_id: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn transfer_sent(&self, notice: &TransferNotice);
    async fn transfer_received(&self, notice: &TransferNotice);
}

// ============================================================================
// HttpNotifier: mail relay over HTTP
// ============================================================================

#[derive(Debug, Serialize)]
struct MailMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: String,
    body: String,
}

/// Posts mail messages to the configured relay endpoint
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
    sender: String,
}

impl HttpNotifier {
    pub fn new(config: &NotifierConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: config.endpoint.clone(),
            sender: config.sender.clone(),
        }
    }

    async fn deliver(&self, to: &str, subject: String, body: String) {
        let message = MailMessage {
            from: &self.sender,
            to,
            subject,
            body,
        };

        match self.client.post(&self.endpoint).json(&message).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::debug!(to, "notification delivered");
            }
            Ok(resp) => {
                tracing::warn!(to, status = %resp.status(), "mail relay rejected notification");
            }
            Err(e) => {
                tracing::warn!(to, error = %e, "notification dispatch failed");
            }
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn transfer_sent(&self, notice: &TransferNotice) {
        self.deliver(
            &notice.email,
            format!("You sent {} — {}", notice.amount, notice.transaction_id),
            format!(
                "Hi {}, your transfer of {} to {} is complete. Reference: {}.",
                notice.name, notice.amount, notice.counterparty, notice.transaction_id
            ),
        )
        .await;
    }

    async fn transfer_received(&self, notice: &TransferNotice) {
        self.deliver(
            &notice.email,
            format!("You received {} — {}", notice.amount, notice.transaction_id),
            format!(
                "Hi {}, {} sent you {}. Reference: {}.",
                notice.name, notice.counterparty, notice.amount, notice.transaction_id
            ),
        )
        .await;
    }
}

// ============================================================================
// NoopNotifier
// ============================================================================

/// Used when notifications are disabled in config, and in tests
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn transfer_sent(&self, notice: &TransferNotice) {
        tracing::debug!(transaction_id = %notice.transaction_id, "notifier disabled, skipping sent notice");
    }

    async fn transfer_received(&self, notice: &TransferNotice) {
        tracing::debug!(transaction_id = %notice.transaction_id, "notifier disabled, skipping received notice");
    }
}
