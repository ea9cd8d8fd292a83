use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

/// Push token of one observer on one channel. (channel_name, observer_id) is the natural key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationRegistration {
    pub channel_name: String,
    pub observer_id: i32,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRegistrationDataCommand {
    #[validate(length(min = 1, message = "Channel name is required"))]
    pub channel_name: String,

    #[validate(range(min = 1, message = "Observer id must be positive"))]
    pub observer_id: i32,

    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub notification_id: String,
    pub title: String,
    pub message: String,
    pub from: String,
    pub channel: String,
    pub recipients: Vec<String>,
    pub sender_admin_id: i32,
    pub inserted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotificationCommand {
    pub title: String,
    pub message: String,
    pub from: String,
    pub channel: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    pub sender_admin_id: i32,
}

impl NotificationRegistration {
    pub fn record_key(&self) -> String {
        registration_key(&self.channel_name, self.observer_id)
    }
}

pub fn registration_key(channel_name: &str, observer_id: i32) -> String {
    format!("{}_{}", observer_id, channel_name)
}

impl From<NotificationRegistrationDataCommand> for NotificationRegistration {
    fn from(command: NotificationRegistrationDataCommand) -> Self {
        Self {
            channel_name: command.channel_name,
            observer_id: command.observer_id,
            token: command.token,
        }
    }
}

impl Notification {
    pub fn new(command: NewNotificationCommand) -> Self {
        Self {
            notification_id: Uuid::new_v4().simple().to_string(),
            title: command.title,
            message: command.message,
            from: command.from,
            channel: command.channel,
            recipients: command.recipients,
            sender_admin_id: command.sender_admin_id,
            inserted_at: Utc::now(),
        }
    }
}
