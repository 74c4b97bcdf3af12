//! Engine error types

use shared::LocaleError;
use thiserror::Error;

/// Errors raised by the document and relational store gateways
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store request timed out: {0}")]
    Timeout(String),

    #[error("Store returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode store response: {0}")]
    Decode(String),

    #[error("SQL error: {0}")]
    Sql(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::Timeout(err.to_string())
        } else if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            StoreError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            StoreError::Unavailable(err.to_string())
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => StoreError::Timeout(err.to_string()),
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                StoreError::Unavailable(err.to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Decode(err.to_string())
            }
            other => StoreError::Sql(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid rich text markup: {0}")]
    RichText(String),

    #[error("Malformed record in {collection}: {message}")]
    Record { collection: String, message: String },
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub fn record(collection: impl Into<String>, message: impl std::fmt::Display) -> Self {
        EngineError::Record {
            collection: collection.into(),
            message: message.to_string(),
        }
    }

    /// Caller- or data-contract violations that must reach the caller
    /// instead of degrading an aggregator
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::Locale(_) | EngineError::RichText(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_locale_and_markup_errors_are_fatal() {
        assert!(EngineError::Locale(LocaleError::UnsupportedLocale("xx".into())).is_fatal());
        assert!(EngineError::RichText("unclosed <b>".into()).is_fatal());
        assert!(!EngineError::Store(StoreError::Timeout("slow".into())).is_fatal());
        assert!(!EngineError::record("products", "bad id").is_fatal());
    }

    #[test]
    fn messages_name_the_source() {
        let err = EngineError::record("systemair_ds_products_eng_glo", "invalid type");
        assert_eq!(
            err.to_string(),
            "Malformed record in systemair_ds_products_eng_glo: invalid type"
        );
        let err = StoreError::Status {
            status: 503,
            body: "busy".into(),
        };
        assert_eq!(err.to_string(), "Store returned status 503: busy");
    }
}
