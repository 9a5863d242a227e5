// JSON settings codec
//
// One fixed formatting policy, applied identically to every call:
// pretty-printed UTF-8 output with enum variants spelled by name,
// timestamps in `datetime::DATETIME_FORMAT`, and default-valued fields
// omitted. Reads additionally tolerate case-insensitive field names and
// trailing commas.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::ConfigError;

/// UTF-8 byte-order mark; tolerated at the start of input, never written.
const BOM: &str = "\u{feff}";

/// Parse a JSON document into `T`.
pub fn from_str<T: DeserializeOwned>(text: &str) -> Result<T, ConfigError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let scrubbed = scrub_trailing_commas(text);
    let value: Value = serde_json::from_str(&scrubbed)?;
    Ok(crate::de::from_value(&value)?)
}

/// Parse a JSON document into `T` from an async byte stream.
///
/// The stream is drained incrementally; the caller does not have to
/// buffer the content beforehand.
pub async fn from_reader<T, R>(mut reader: R) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    let text = std::str::from_utf8(&buf).map_err(|e| {
        ConfigError::Parse(serde::de::Error::custom(format!(
            "config stream is not valid UTF-8: {e}"
        )))
    })?;
    from_str(text)
}

/// Read and parse the JSON file at `path`.
///
/// The file handle is released on every exit path before returning.
pub fn read_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(source) if source.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    from_str(&text)
}

/// Serialize `value` and write it to `path`, replacing prior contents.
pub fn write_file<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    // Serialize first so a serialization failure never touches the file.
    let json = to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `value` as multi-line, indented JSON text.
pub fn to_string_pretty<T: Serialize>(value: &T) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(value).map_err(ConfigError::Serialize)
}

/// Serialization predicate for fields that are omitted while still at
/// their type's default value.
pub fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

// Drops commas that directly precede `}` or `]`, outside string literals.
fn scrub_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    for (i, ch) in text.char_indices() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            ',' => {
                let rest = text[i + 1..].trim_start();
                if !(rest.starts_with('}') || rest.starts_with(']')) {
                    out.push(ch);
                }
            }
            _ => out.push(ch),
        }
    }
    out
}
