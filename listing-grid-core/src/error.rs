//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use listing_grid_client::ClientError;

/// Missing or unusable host configuration.
///
/// Surfaced as a user-visible message in the content area, never thrown past
/// the widget boundary.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConfigError {
    /// A required configuration field is absent or blank.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => {
                write!(f, "Missing required configuration: {label}.")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Host configuration is incomplete
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Remote endpoint error (converting from library)
    #[error("{0}")]
    Client(#[from] ClientError),
}

impl CoreError {
    /// Whether this is expected behavior (bad host configuration, structured
    /// upstream rejection), used for log level classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Config(_) => true,
            Self::Client(e) => e.is_expected(),
        }
    }

    /// The message shown in place of the widget content when initialization
    /// fails.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(e) => e.to_string(),
            Self::Client(e) => format!("Unable to load data: {e}"),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_field() {
        let e = ConfigError::MissingField {
            field: "apiToken".into(),
            label: "api token".into(),
        };
        assert_eq!(e.to_string(), "Missing required configuration: api token.");
    }

    #[test]
    fn config_error_is_expected() {
        let e = CoreError::Config(ConfigError::MissingField {
            field: "apiToken".into(),
            label: "api token".into(),
        });
        assert!(e.is_expected());
    }

    #[test]
    fn client_error_expectation_delegates() {
        let expected = CoreError::Client(ClientError::RequestFailed {
            endpoint: "search".into(),
            status: 401,
            message: "invalid token".into(),
        });
        assert!(expected.is_expected());

        let unexpected = CoreError::Client(ClientError::NetworkError {
            endpoint: "search".into(),
            detail: "connection refused".into(),
        });
        assert!(!unexpected.is_expected());
    }

    #[test]
    fn user_message_prefixes_client_errors() {
        let e = CoreError::Client(ClientError::RequestFailed {
            endpoint: "search".into(),
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(
            e.user_message(),
            "Unable to load data: [search] Request failed (500): boom"
        );
    }

    #[test]
    fn user_message_for_config_is_bare() {
        let e = CoreError::Config(ConfigError::MissingField {
            field: "templateUrl".into(),
            label: "template URL".into(),
        });
        assert_eq!(
            e.user_message(),
            "Missing required configuration: template URL."
        );
    }

    #[test]
    fn serialize_tags_variants() {
        let e = CoreError::Config(ConfigError::MissingField {
            field: "apiToken".into(),
            label: "api token".into(),
        });
        let json_res = serde_json::to_string(&e);
        assert!(json_res.is_ok(), "to_string failed: {json_res:?}");
        let Ok(json) = json_res else {
            return;
        };
        assert!(json.contains("\"code\":\"Config\""));
    }
}
