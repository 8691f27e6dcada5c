use thiserror::Error;

/// Failures reported by a [`Medium`](crate::medium::Medium).
#[derive(Error, Debug)]
pub enum MediumError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Quota exceeded writing {key} (limit {quota} bytes)")]
    QuotaExceeded { key: String, quota: usize },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Medium(#[from] MediumError),

    #[error("Corrupt entry for {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize value for {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to load parks data: {0}")]
    Loader(#[from] LoaderError),
}

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP Error: {status} fetching {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid data format: {0}")]
    InvalidData(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_error_message_mentions_parks() {
        let err = StoreError::from(LoaderError::InvalidData(
            "expected array of parks".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Failed to load parks data: Invalid data format: expected array of parks"
        );
    }
}
