use async_trait::async_trait;
use serde::Serialize;
use surrealdb::{Surreal, engine::any::{self, Any}, opt::auth::Root};

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::models::{
    notification::{Notification, NotificationRegistration},
    polling_station::{PollingStation, PollingStationInfo},
};

const REGISTRATIONS: &str = "notification_registrations";
const NOTIFICATIONS: &str = "notifications";
const POLLING_STATIONS: &str = "polling_stations";
const POLLING_STATION_INFOS: &str = "polling_station_infos";

/// Typed data access used by the handlers. One call is one read or one write.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn find_notification_registration(
        &self,
        channel_name: &str,
        observer_id: i32,
    ) -> Result<Option<NotificationRegistration>, StoreError>;

    async fn insert_notification_registration(
        &self,
        registration: &NotificationRegistration,
    ) -> Result<(), StoreError>;

    async fn update_notification_registration(
        &self,
        registration: &NotificationRegistration,
    ) -> Result<(), StoreError>;

    async fn insert_notification(&self, notification: &Notification) -> Result<(), StoreError>;

    /// All polling stations carrying `id`. Callers decide what zero or several matches mean.
    async fn find_polling_stations_by_id(&self, id: i32) -> Result<Vec<PollingStation>, StoreError>;

    async fn find_polling_station_info_by_observer(
        &self,
        id_observer: i32,
    ) -> Result<Option<PollingStationInfo>, StoreError>;

    async fn update_polling_station_info(&self, info: &PollingStationInfo) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct DatabaseService {
    db: Surreal<Any>,
}

impl DatabaseService {
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        let config = DatabaseConfig {
            url: database_url.to_string(),
            ..DatabaseConfig::default()
        };
        Self::connect(&config).await
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let endpoint = if config.url.starts_with("memory://") {
            "mem://".to_string()
        } else {
            config.url.clone()
        };

        let db = any::connect(endpoint).await?;

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            db.signin(Root {
                username: username.as_str(),
                password: password.as_str(),
            })
            .await?;
        }

        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await?;
        log::info!(
            "Connected to data store at {} ({}/{})",
            config.url,
            config.namespace,
            config.database
        );

        let service = Self { db };
        service.initialize_schema().await?;

        Ok(service)
    }

    async fn initialize_schema(&self) -> Result<(), StoreError> {
        self.db
            .query(
                "
            DEFINE TABLE notification_registrations SCHEMALESS;
            DEFINE INDEX unique_channel_observer ON notification_registrations COLUMNS channel_name, observer_id UNIQUE;

            DEFINE TABLE notifications SCHEMALESS;
            DEFINE INDEX notification_sender ON notifications COLUMNS sender_admin_id;

            DEFINE TABLE polling_stations SCHEMALESS;
            DEFINE INDEX unique_station_id ON polling_stations COLUMNS station_id UNIQUE;

            DEFINE TABLE polling_station_infos SCHEMALESS;
            DEFINE INDEX info_observer ON polling_station_infos COLUMNS id_observer;
        ",
            )
            .await?
            .check()?;

        log::info!("Data store schema initialized successfully");
        Ok(())
    }

    async fn create_record<T>(&self, table: &'static str, key: &str, content: &T) -> Result<(), StoreError>
    where
        T: Serialize + serde::de::DeserializeOwned + Send + Sync,
    {
        let created: Option<T> = self.db.create((table, key)).content(content).await?;
        created.map(|_| ()).ok_or_else(|| StoreError::NotWritten {
            entity: table,
            key: key.to_string(),
        })
    }

    async fn update_record<T>(&self, table: &'static str, key: &str, content: &T) -> Result<(), StoreError>
    where
        T: Serialize + serde::de::DeserializeOwned + Send + Sync,
    {
        let updated: Option<T> = self.db.update((table, key)).content(content).await?;
        updated.map(|_| ()).ok_or_else(|| StoreError::NotWritten {
            entity: table,
            key: key.to_string(),
        })
    }

    // Seeding operations; rows created here are outside the handler core
    pub async fn insert_polling_station(&self, station: &PollingStation) -> Result<(), StoreError> {
        self.create_record(POLLING_STATIONS, &station.id.to_string(), station).await
    }

    pub async fn insert_polling_station_info(&self, info: &PollingStationInfo) -> Result<(), StoreError> {
        self.create_record(POLLING_STATION_INFOS, &info.record_key(), info).await
    }

    pub async fn list_notification_registrations(&self) -> Result<Vec<NotificationRegistration>, StoreError> {
        let rows: Vec<NotificationRegistration> = self.db.select(REGISTRATIONS).await?;
        Ok(rows)
    }

    pub async fn list_notifications(&self) -> Result<Vec<Notification>, StoreError> {
        let rows: Vec<Notification> = self.db.select(NOTIFICATIONS).await?;
        Ok(rows)
    }

    pub async fn list_polling_station_infos(&self) -> Result<Vec<PollingStationInfo>, StoreError> {
        let rows: Vec<PollingStationInfo> = self.db.select(POLLING_STATION_INFOS).await?;
        Ok(rows)
    }

    // Utility methods
    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.db.health().await?;
        Ok(())
    }

    pub async fn get_statistics(&self) -> Result<DatabaseStats, StoreError> {
        Ok(DatabaseStats {
            total_registrations: self.count(REGISTRATIONS).await?,
            total_notifications: self.count(NOTIFICATIONS).await?,
            total_polling_stations: self.count(POLLING_STATIONS).await?,
            total_polling_station_infos: self.count(POLLING_STATION_INFOS).await?,
        })
    }

    async fn count(&self, table: &str) -> Result<u64, StoreError> {
        let result: Vec<serde_json::Value> = self
            .db
            .query(format!("SELECT count() FROM {} GROUP ALL", table))
            .await?
            .take(0)?;
        Ok(extract_count(&result))
    }
}

#[async_trait]
impl DataStore for DatabaseService {
    async fn find_notification_registration(
        &self,
        channel_name: &str,
        observer_id: i32,
    ) -> Result<Option<NotificationRegistration>, StoreError> {
        let registration: Option<NotificationRegistration> = self
            .db
            .query("SELECT * FROM notification_registrations WHERE channel_name = $channel_name AND observer_id = $observer_id LIMIT 1")
            .bind(("channel_name", channel_name.to_string()))
            .bind(("observer_id", observer_id))
            .await?
            .take(0)?;
        Ok(registration)
    }

    async fn insert_notification_registration(
        &self,
        registration: &NotificationRegistration,
    ) -> Result<(), StoreError> {
        self.create_record(REGISTRATIONS, &registration.record_key(), registration).await
    }

    async fn update_notification_registration(
        &self,
        registration: &NotificationRegistration,
    ) -> Result<(), StoreError> {
        self.update_record(REGISTRATIONS, &registration.record_key(), registration).await
    }

    async fn insert_notification(&self, notification: &Notification) -> Result<(), StoreError> {
        self.create_record(NOTIFICATIONS, &notification.notification_id, notification).await
    }

    async fn find_polling_stations_by_id(&self, id: i32) -> Result<Vec<PollingStation>, StoreError> {
        let stations: Vec<PollingStation> = self
            .db
            .query("SELECT * FROM polling_stations WHERE station_id = $id")
            .bind(("id", id))
            .await?
            .take(0)?;
        Ok(stations)
    }

    async fn find_polling_station_info_by_observer(
        &self,
        id_observer: i32,
    ) -> Result<Option<PollingStationInfo>, StoreError> {
        let info: Option<PollingStationInfo> = self
            .db
            .query("SELECT * FROM polling_station_infos WHERE id_observer = $id_observer LIMIT 1")
            .bind(("id_observer", id_observer))
            .await?
            .take(0)?;
        Ok(info)
    }

    async fn update_polling_station_info(&self, info: &PollingStationInfo) -> Result<(), StoreError> {
        self.update_record(POLLING_STATION_INFOS, &info.record_key(), info).await
    }
}

#[derive(Debug, Serialize)]
pub struct DatabaseStats {
    pub total_registrations: u64,
    pub total_notifications: u64,
    pub total_polling_stations: u64,
    pub total_polling_station_infos: u64,
}

fn extract_count(result: &[serde_json::Value]) -> u64 {
    result.first()
        .and_then(|v| v.get("count"))
        .and_then(|v| v.as_u64())
        .unwrap_or(0)
}
