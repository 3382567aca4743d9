/// A recognized webhook whose payload is missing data the normalizer needs.
///
/// Distinct from an ignored webhook: these are reported back to the sender
/// as a failed delivery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("Malformed {event_type} payload: missing required field '{field}'")]
    MissingField {
        event_type: &'static str,
        field: String,
    },

    #[error("Malformed {event_type} payload: {message}")]
    InvalidField {
        event_type: &'static str,
        message: String,
    },
}

/// Failure reported by an [`EventStore`](crate::store::EventStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Event store error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Corrupt event record {id}: {message}")]
    Corrupt { id: String, message: String },
}

impl StoreError {
    /// Wrap any backend error (database driver, I/O, ...).
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}
