//! Response envelope shared by every office endpoint.

use serde::{Deserialize, Serialize};

/// `{ code, message, data? }` wrapper returned by the office routes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn new(code: u16, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }
}

/// Messages carried by successful envelopes.
pub mod messages {
    pub const LISTED: &str = "Get Success";
    pub const ADDED: &str = "The location has been added.";
    pub const UPDATED: &str = "The location has been updated.";
    pub const DELETED: &str = "The location has been deleted.";
    pub const INVALID_REQUEST: &str = "Invalid request.";
    pub const NOT_FOUND_FOR_DELETION: &str = "Office not found for deletion.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_omits_missing_data() {
        let envelope: Envelope<()> = Envelope::new(200, messages::UPDATED, None);
        let text = serde_json::to_string(&envelope).unwrap();

        assert_eq!(
            text,
            r#"{"code":200,"message":"The location has been updated."}"#
        );
    }

    #[test]
    fn test_envelope_parses_without_data() {
        let parsed: Envelope<Vec<String>> =
            serde_json::from_str(r#"{"code":400,"message":"Invalid request."}"#).unwrap();

        assert_eq!(parsed.code, 400);
        assert!(parsed.data.is_none());
    }
}
