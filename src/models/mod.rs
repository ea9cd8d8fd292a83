pub mod notification;
pub mod polling_station;
