use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub firebase: FirebaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseConfig {
    pub send_url: String,
    pub server_key: String,
    pub max_batch_size: usize,
    pub request_timeout_secs: u64,
}

pub const DEFAULT_FCM_SEND_URL: &str = "https://fcm.googleapis.com/fcm/send";

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "memory://".to_string()),
                namespace: env::var("DATABASE_NAMESPACE")
                    .unwrap_or_else(|_| "vote_monitor".to_string()),
                database: env::var("DATABASE_NAME").unwrap_or_else(|_| "main".to_string()),
                username: env::var("DATABASE_USER").ok(),
                password: env::var("DATABASE_PASSWORD").ok(),
            },

            firebase: FirebaseConfig {
                send_url: env::var("FIREBASE_SEND_URL")
                    .unwrap_or_else(|_| DEFAULT_FCM_SEND_URL.to_string()),
                server_key: env::var("FIREBASE_SERVER_KEY")?,
                max_batch_size: parse_or(env::var("FIREBASE_MAX_BATCH_SIZE").ok(), 1000),
                request_timeout_secs: parse_or(env::var("FIREBASE_TIMEOUT_SECS").ok(), 10),
            },
        })
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "memory://".to_string(),
            namespace: "vote_monitor".to_string(),
            database: "main".to_string(),
            username: None,
            password: None,
        }
    }
}

impl FirebaseConfig {
    pub fn new(server_key: impl Into<String>) -> Self {
        Self {
            send_url: DEFAULT_FCM_SEND_URL.to_string(),
            server_key: server_key.into(),
            max_batch_size: 1000,
            request_timeout_secs: 10,
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
