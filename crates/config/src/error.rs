// Error types for config parsing and persistence

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for configuration codec and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file to read does not exist.
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A file system error while opening, creating, or writing a config file.
    #[error("I/O error accessing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An I/O failure while draining a caller-supplied stream.
    #[error("I/O error reading config stream: {0}")]
    Stream(#[from] io::Error),

    /// Malformed JSON, or a value that cannot be coerced to its field type.
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The value could not be serialized to JSON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ConfigError {
    /// True when the failure was a missing file on read.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguishable() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/tmp/missing.json"),
        };
        assert!(err.is_not_found());

        let err = ConfigError::Io {
            path: PathBuf::from("/tmp/denied.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn messages_name_the_path() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/tmp/settings.json"),
        };
        assert!(err.to_string().contains("/tmp/settings.json"));
    }
}
