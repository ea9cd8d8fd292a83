use thiserror::Error;

/// Failures raised by the data store. Always propagated to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Database(#[from] surrealdb::Error),

    #[error("{entity} record {key} was not written")]
    NotWritten { entity: &'static str, key: String },
}

/// Failures raised by the push notification service. Handlers log these and move on.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("push request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("push service rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed push service response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{entity} with id {id} was not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{entity} lookup for id {id} matched {count} rows")]
    AmbiguousMatch {
        entity: &'static str,
        id: i64,
        count: usize,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("operation cancelled")]
    Cancelled,
}

impl HandlerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, HandlerError::NotFound { .. })
    }
}
