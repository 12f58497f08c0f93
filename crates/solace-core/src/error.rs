use thiserror::Error;

/// Top-level error type for the Solace client.
///
/// Subsystem crates define their own error types and implement
/// `From<SolaceError>` so that `?` works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SolaceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown panel: {0}")]
    UnknownTab(String),

    #[error("Invalid metric {field}: {value}")]
    InvalidMetric { field: &'static str, value: String },
}

impl From<toml::de::Error> for SolaceError {
    fn from(err: toml::de::Error) -> Self {
        SolaceError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SolaceError {
    fn from(err: toml::ser::Error) -> Self {
        SolaceError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SolaceError {
    fn from(err: serde_json::Error) -> Self {
        SolaceError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Solace operations.
pub type Result<T> = std::result::Result<T, SolaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let cases: Vec<(SolaceError, &str)> = vec![
            (
                SolaceError::Config("bad key".to_string()),
                "Configuration error: bad key",
            ),
            (
                SolaceError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
            (
                SolaceError::UnknownTab("setings".to_string()),
                "Unknown panel: setings",
            ),
            (
                SolaceError::InvalidMetric {
                    field: "mood_score",
                    value: "101".to_string(),
                },
                "Invalid metric mood_score: 101",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SolaceError = io_err.into();
        assert!(matches!(err, SolaceError::Io(_)));
        assert!(err.to_string().starts_with("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let err: std::result::Result<toml::Value, _> = toml::from_str("invalid = [[[");
        let solace_err: SolaceError = err.unwrap_err().into();
        assert!(matches!(solace_err, SolaceError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope }");
        let solace_err: SolaceError = err.unwrap_err().into();
        assert!(matches!(solace_err, SolaceError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let value = io_result?;
            Ok(value.to_string())
        }

        assert_eq!(inner().unwrap(), "42");
    }
}
