//! Hand-written fakes for the external collaborators.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{DispatchError, StoreError};
use crate::models::{
    notification::{Notification, NotificationRegistration},
    polling_station::{PollingStation, PollingStationInfo},
};
use crate::services::{DataStore, DispatchReport, PushNotificationService};

#[derive(Debug, Clone, PartialEq)]
pub struct SentPush {
    pub channel: String,
    pub recipients: Vec<String>,
    pub title: String,
    pub message: String,
    pub from: String,
}

#[derive(Default)]
pub struct RecordingPushService {
    sent: Mutex<Vec<SentPush>>,
    fail: bool,
    delay: Option<Duration>,
}

impl RecordingPushService {
    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn slow(delay: Duration) -> Self {
        Self { delay: Some(delay), ..Default::default() }
    }

    pub fn sent(&self) -> Vec<SentPush> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushNotificationService for RecordingPushService {
    async fn send(
        &self,
        channel: &str,
        recipients: &[String],
        title: &str,
        message: &str,
        from: &str,
    ) -> Result<DispatchReport, DispatchError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.sent.lock().unwrap().push(SentPush {
            channel: channel.to_string(),
            recipients: recipients.to_vec(),
            title: title.to_string(),
            message: message.to_string(),
            from: from.to_string(),
        });

        if self.fail {
            return Err(DispatchError::Rejected {
                status: 503,
                body: "push backend down".to_string(),
            });
        }

        Ok(DispatchReport {
            success: recipients.len() as u64,
            failure: 0,
        })
    }
}

/// Store whose every call fails as if the backing connection were gone.
pub struct UnavailableStore;

fn unavailable<T>() -> Result<T, StoreError> {
    Err(StoreError::Unavailable("connection refused".to_string()))
}

#[async_trait]
impl DataStore for UnavailableStore {
    async fn find_notification_registration(
        &self,
        _channel_name: &str,
        _observer_id: i32,
    ) -> Result<Option<NotificationRegistration>, StoreError> {
        unavailable()
    }

    async fn insert_notification_registration(
        &self,
        _registration: &NotificationRegistration,
    ) -> Result<(), StoreError> {
        unavailable()
    }

    async fn update_notification_registration(
        &self,
        _registration: &NotificationRegistration,
    ) -> Result<(), StoreError> {
        unavailable()
    }

    async fn insert_notification(&self, _notification: &Notification) -> Result<(), StoreError> {
        unavailable()
    }

    async fn find_polling_stations_by_id(&self, _id: i32) -> Result<Vec<PollingStation>, StoreError> {
        unavailable()
    }

    async fn find_polling_station_info_by_observer(
        &self,
        _id_observer: i32,
    ) -> Result<Option<PollingStationInfo>, StoreError> {
        unavailable()
    }

    async fn update_polling_station_info(&self, _info: &PollingStationInfo) -> Result<(), StoreError> {
        unavailable()
    }
}

/// Store returning the same polling station twice for any id.
pub struct DuplicateStationStore;

#[async_trait]
impl DataStore for DuplicateStationStore {
    async fn find_notification_registration(
        &self,
        _channel_name: &str,
        _observer_id: i32,
    ) -> Result<Option<NotificationRegistration>, StoreError> {
        Ok(None)
    }

    async fn insert_notification_registration(
        &self,
        _registration: &NotificationRegistration,
    ) -> Result<(), StoreError> {
        Ok(())
    }

    async fn update_notification_registration(
        &self,
        _registration: &NotificationRegistration,
    ) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_notification(&self, _notification: &Notification) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_polling_stations_by_id(&self, id: i32) -> Result<Vec<PollingStation>, StoreError> {
        Ok(vec![PollingStation::new(id, 1, 1), PollingStation::new(id, 2, 2)])
    }

    async fn find_polling_station_info_by_observer(
        &self,
        _id_observer: i32,
    ) -> Result<Option<PollingStationInfo>, StoreError> {
        Ok(None)
    }

    async fn update_polling_station_info(&self, _info: &PollingStationInfo) -> Result<(), StoreError> {
        Ok(())
    }
}
