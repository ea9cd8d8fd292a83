pub mod notification;
pub mod polling_station;

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

use crate::error::{HandlerError, StoreError};
use crate::models::{
    notification::{NewNotificationCommand, NotificationRegistrationDataCommand},
    polling_station::{GetPollingStationById, PollingStationResponse, UpdatePollingStationInfo},
};
use crate::services::{DataStore, PushNotificationService};
use crate::utils::CancellationSignal;

pub use notification::NotificationRegistrationDataHandler;
pub use polling_station::{GetPollingStationByIdHandler, UpdatePollingStationInfoHandler};

/// Every command and query the handler layer accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Request {
    RegisterNotificationChannel(NotificationRegistrationDataCommand),
    NewNotification(NewNotificationCommand),
    GetPollingStationById(GetPollingStationById),
    UpdatePollingStationInfo(UpdatePollingStationInfo),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Unit,
    PollingStation(PollingStationResponse),
}

/// Routes requests to their handler. Holds no state besides the handlers themselves.
pub struct Dispatcher {
    notifications: NotificationRegistrationDataHandler,
    get_polling_station: GetPollingStationByIdHandler,
    update_polling_station_info: UpdatePollingStationInfoHandler,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn DataStore>, push: Arc<dyn PushNotificationService>) -> Self {
        Self {
            notifications: NotificationRegistrationDataHandler::new(store.clone(), push),
            get_polling_station: GetPollingStationByIdHandler::new(store.clone()),
            update_polling_station_info: UpdatePollingStationInfoHandler::new(store),
        }
    }

    pub async fn send(
        &self,
        request: Request,
        cancel: &CancellationSignal,
    ) -> Result<Response, HandlerError> {
        match request {
            Request::RegisterNotificationChannel(command) => {
                self.notifications.handle_registration(command, cancel).await?;
                Ok(Response::Unit)
            }
            Request::NewNotification(command) => {
                self.notifications.handle_new_notification(command, cancel).await?;
                Ok(Response::Unit)
            }
            Request::GetPollingStationById(query) => {
                let station = self.get_polling_station.handle(query, cancel).await?;
                Ok(Response::PollingStation(station))
            }
            Request::UpdatePollingStationInfo(command) => {
                self.update_polling_station_info.handle(command, cancel).await?;
                Ok(Response::Unit)
            }
        }
    }
}

/// Awaits a store call unless the caller cancels first.
pub(crate) async fn run_store_op<F, T>(
    cancel: &CancellationSignal,
    operation: F,
) -> Result<T, HandlerError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match cancel.guard(operation).await {
        Some(result) => Ok(result?),
        None => Err(HandlerError::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::polling_station::{PollingStation, PollingStationInfo};
    use crate::services::DatabaseService;
    use crate::services::testing::RecordingPushService;

    async fn setup() -> (Dispatcher, DatabaseService, Arc<RecordingPushService>) {
        let db = DatabaseService::new("memory://").await.unwrap();
        let push = Arc::new(RecordingPushService::default());
        let dispatcher = Dispatcher::new(Arc::new(db.clone()), push.clone());
        (dispatcher, db, push)
    }

    #[test]
    fn test_request_deserializes_from_tagged_json() {
        let request: Request = serde_json::from_value(serde_json::json!({
            "type": "registerNotificationChannel",
            "channelName": "android",
            "observerId": 5,
            "token": "tok"
        }))
        .unwrap();

        match request {
            Request::RegisterNotificationChannel(command) => {
                assert_eq!(command.channel_name, "android");
                assert_eq!(command.observer_id, 5);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatch_routes_every_request() {
        let (dispatcher, db, push) = setup().await;
        let cancel = CancellationSignal::never();
        db.insert_polling_station(&PollingStation::new(10, 1, 7)).await.unwrap();
        db.insert_polling_station_info(&PollingStationInfo::new(22, 10)).await.unwrap();

        let registered = dispatcher
            .send(
                Request::RegisterNotificationChannel(NotificationRegistrationDataCommand {
                    channel_name: "channel".to_string(),
                    observer_id: 22,
                    token: "token".to_string(),
                }),
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(registered, Response::Unit);

        let notified = dispatcher
            .send(
                Request::NewNotification(NewNotificationCommand {
                    title: "title".to_string(),
                    channel: "channel".to_string(),
                    recipients: vec!["token".to_string()],
                    ..Default::default()
                }),
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(notified, Response::Unit);
        assert_eq!(push.sent().len(), 1);

        let station = dispatcher
            .send(Request::GetPollingStationById(GetPollingStationById { id: 10 }), &cancel)
            .await
            .unwrap();
        match station {
            Response::PollingStation(station) => assert_eq!(station.id, 10),
            other => panic!("unexpected response: {:?}", other),
        }

        let leave_time = Utc::now();
        let updated = dispatcher
            .send(
                Request::UpdatePollingStationInfo(UpdatePollingStationInfo {
                    id_observer: 22,
                    id_polling_station: 10,
                    observer_leave_time: leave_time,
                }),
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(updated, Response::Unit);

        let stats = db.get_statistics().await.unwrap();
        assert_eq!(stats.total_registrations, 1);
        assert_eq!(stats.total_notifications, 1);
    }

    #[tokio::test]
    async fn test_dispatch_surfaces_not_found() {
        let (dispatcher, _db, _push) = setup().await;
        let error = dispatcher
            .send(
                Request::GetPollingStationById(GetPollingStationById { id: 404 }),
                &CancellationSignal::never(),
            )
            .await
            .unwrap_err();
        assert!(error.is_not_found());
    }
}
