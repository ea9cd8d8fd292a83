//! Command and query handlers for the vote monitoring backend: push token
//! registration, admin notifications, and polling station lookups/updates.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{DispatchError, HandlerError, StoreError};
pub use handlers::{Dispatcher, Request, Response};
