use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::FirebaseConfig;
use crate::error::DispatchError;

/// Per-call delivery outcome as reported by the push service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub success: u64,
    pub failure: u64,
}

impl DispatchReport {
    fn absorb(&mut self, other: DispatchReport) {
        self.success += other.success;
        self.failure += other.failure;
    }
}

/// Delivers push notifications to device channels. Called at most once per notification.
#[async_trait]
pub trait PushNotificationService: Send + Sync {
    async fn send(
        &self,
        channel: &str,
        recipients: &[String],
        title: &str,
        message: &str,
        from: &str,
    ) -> Result<DispatchReport, DispatchError>;
}

#[derive(Clone)]
pub struct FirebaseService {
    client: Client,
    config: FirebaseConfig,
}

impl FirebaseService {
    pub fn new(config: FirebaseConfig) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn build_payload(
        &self,
        channel: &str,
        tokens: &[String],
        title: &str,
        message: &str,
        from: &str,
    ) -> Value {
        json!({
            "registration_ids": tokens,
            "notification": {
                "title": title,
                "body": message,
                "android_channel_id": channel,
            },
            "data": {
                "from": from,
                "channel": channel,
            }
        })
    }

    async fn send_batch(&self, payload: &Value) -> Result<DispatchReport, DispatchError> {
        let response = self.client
            .post(&self.config.send_url)
            .header("Authorization", format!("key={}", self.config.server_key))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        parse_report(&body)
    }
}

#[async_trait]
impl PushNotificationService for FirebaseService {
    async fn send(
        &self,
        channel: &str,
        recipients: &[String],
        title: &str,
        message: &str,
        from: &str,
    ) -> Result<DispatchReport, DispatchError> {
        if recipients.is_empty() {
            log::debug!("No recipients for channel {}, skipping push", channel);
            return Ok(DispatchReport::default());
        }

        let mut report = DispatchReport::default();
        for tokens in recipients.chunks(self.config.max_batch_size.max(1)) {
            let payload = self.build_payload(channel, tokens, title, message, from);
            log::info!("Pushing '{}' to {} device(s) on channel {}", title, tokens.len(), channel);
            report.absorb(self.send_batch(&payload).await?);
        }

        Ok(report)
    }
}

fn parse_report(body: &Value) -> Result<DispatchReport, DispatchError> {
    let success = body["success"]
        .as_u64()
        .ok_or_else(|| DispatchError::MalformedResponse(format!("no success count in {}", body)))?;
    let failure = body["failure"].as_u64().unwrap_or(0);
    Ok(DispatchReport { success, failure })
}
