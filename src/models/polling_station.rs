use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollingStation {
    #[serde(rename = "station_id")]
    pub id: i32,
    pub id_county: i32,
    pub number: i32,
    pub address: Option<String>,
    pub coordinates: Option<String>,
    pub administrative_territory_code: Option<String>,
    pub territory_code: Option<String>,
}

/// One observer's visit to one polling station.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollingStationInfo {
    pub id_observer: i32,
    pub id_polling_station: i32,
    pub last_modified: DateTime<Utc>,
    pub observer_arrival_time: Option<DateTime<Utc>>,
    pub observer_leave_time: Option<DateTime<Utc>>,
    pub urban_area: Option<bool>,
    pub is_polling_station_president_female: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPollingStationById {
    pub id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePollingStationInfo {
    pub id_observer: i32,
    pub id_polling_station: i32,
    pub observer_leave_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollingStationResponse {
    pub id: i32,
    pub id_county: i32,
    pub number: i32,
    pub address: Option<String>,
    pub coordinates: Option<String>,
    pub administrative_territory_code: Option<String>,
    pub territory_code: Option<String>,
}

impl PollingStation {
    pub fn new(id: i32, id_county: i32, number: i32) -> Self {
        Self {
            id,
            id_county,
            number,
            address: None,
            coordinates: None,
            administrative_territory_code: None,
            territory_code: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

impl PollingStationInfo {
    pub fn new(id_observer: i32, id_polling_station: i32) -> Self {
        Self {
            id_observer,
            id_polling_station,
            last_modified: Utc::now(),
            observer_arrival_time: None,
            observer_leave_time: None,
            urban_area: None,
            is_polling_station_president_female: None,
        }
    }

    pub fn record_key(&self) -> String {
        format!("{}_{}", self.id_observer, self.id_polling_station)
    }

    pub fn record_leave_time(&mut self, leave_time: DateTime<Utc>) {
        self.observer_leave_time = Some(leave_time);
        self.last_modified = Utc::now();
    }
}

impl From<PollingStation> for PollingStationResponse {
    fn from(station: PollingStation) -> Self {
        Self {
            id: station.id,
            id_county: station.id_county,
            number: station.number,
            address: station.address,
            coordinates: station.coordinates,
            administrative_territory_code: station.administrative_territory_code,
            territory_code: station.territory_code,
        }
    }
}
