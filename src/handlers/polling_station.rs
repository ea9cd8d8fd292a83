use std::sync::Arc;

use crate::error::HandlerError;
use crate::handlers::run_store_op;
use crate::models::polling_station::{
    GetPollingStationById, PollingStationResponse, UpdatePollingStationInfo,
};
use crate::services::DataStore;
use crate::utils::CancellationSignal;

pub struct GetPollingStationByIdHandler {
    store: Arc<dyn DataStore>,
}

impl GetPollingStationByIdHandler {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetPollingStationById,
        cancel: &CancellationSignal,
    ) -> Result<PollingStationResponse, HandlerError> {
        let mut stations = run_store_op(cancel, self.store.find_polling_stations_by_id(query.id)).await?;

        match stations.len() {
            0 => {
                log::warn!("Polling station {} not found", query.id);
                Err(HandlerError::NotFound {
                    entity: "polling station",
                    id: i64::from(query.id),
                })
            }
            1 => Ok(PollingStationResponse::from(stations.remove(0))),
            count => Err(HandlerError::AmbiguousMatch {
                entity: "polling station",
                id: i64::from(query.id),
                count,
            }),
        }
    }
}

/// Records when an observer left a polling station.
///
/// The visit row is located by observer alone; `id_polling_station` from the
/// command is not part of the lookup. A missing row is a successful no-op.
pub struct UpdatePollingStationInfoHandler {
    store: Arc<dyn DataStore>,
}

impl UpdatePollingStationInfoHandler {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        command: UpdatePollingStationInfo,
        cancel: &CancellationSignal,
    ) -> Result<(), HandlerError> {
        let found = run_store_op(
            cancel,
            self.store.find_polling_station_info_by_observer(command.id_observer),
        )
        .await?;

        let Some(mut info) = found else {
            log::info!(
                "No polling station info for observer {}, nothing to update",
                command.id_observer
            );
            return Ok(());
        };

        info.record_leave_time(command.observer_leave_time);
        run_store_op(cancel, self.store.update_polling_station_info(&info)).await?;
        log::info!(
            "Observer {} left polling station {} at {}",
            info.id_observer,
            info.id_polling_station,
            command.observer_leave_time
        );

        Ok(())
    }
}
