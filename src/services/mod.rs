pub mod database;
pub mod firebase;

#[cfg(test)]
pub(crate) mod testing;

pub use database::{DataStore, DatabaseService, DatabaseStats};
pub use firebase::{DispatchReport, FirebaseService, PushNotificationService};
