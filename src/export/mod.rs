//! Chat export ingestion
//!
//! Reads a Telegram Desktop JSON export (`result.json`) wholesale into
//! memory. Everything downstream works on the parsed [`ChatHistory`].

pub mod types;

pub use types::{ChatHistory, Message, Reaction, ServiceMessage, UserMessage};

use std::path::Path;

use crate::{Error, Result};

/// Load and parse a chat export file
///
/// # Errors
///
/// Returns [`Error::Export`] if the file cannot be read or is not a valid
/// export.
pub fn load_export(path: &Path) -> Result<ChatHistory> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Export(format!("failed to read {}: {e}", path.display())))?;

    let history: ChatHistory = serde_json::from_str(&content)
        .map_err(|e| Error::Export(format!("failed to parse {}: {e}", path.display())))?;

    tracing::info!(
        chat = %history.name,
        messages = history.messages.len(),
        "loaded chat export"
    );

    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_a_minimal_export() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "name": "test chat",
                "type": "private_supergroup",
                "id": 777,
                "messages": [
                    {{"id": 1, "type": "message", "date": "2023-01-01T00:00:00", "from": "A", "text": "hi"}},
                    {{"id": 2, "type": "service", "date": "2023-01-01T00:01:00", "actor": "A", "action": "pin_message"}}
                ]
            }}"#
        )
        .unwrap();

        let history = load_export(file.path()).unwrap();
        assert_eq!(history.name, "test chat");
        assert_eq!(history.messages.len(), 2);
        assert!(history.messages[0].as_user().is_some());
        assert!(history.messages[1].as_user().is_none());
    }

    #[test]
    fn missing_file_is_an_export_error() {
        let err = load_export(Path::new("/nonexistent/result.json")).unwrap_err();
        assert!(matches!(err, Error::Export(_)));
    }

    #[test]
    fn malformed_json_is_an_export_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = load_export(file.path()).unwrap_err();
        assert!(matches!(err, Error::Export(_)));
    }
}
