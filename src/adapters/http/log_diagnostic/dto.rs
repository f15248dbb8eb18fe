//! HTTP DTOs for the log endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::LogEntryId;

/// Note returned with every accepted entry.
pub const LOGGED_NOTE: &str =
    "Data logged to server log. Configure persistent storage for production.";

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of a 200 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogDiagnosticResponse {
    pub success: bool,
    pub id: String,
    pub note: String,
}

impl LogDiagnosticResponse {
    pub fn logged(id: &LogEntryId) -> Self {
        Self {
            success: true,
            id: id.to_string(),
            note: LOGGED_NOTE.to_string(),
        }
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self::new("Method not allowed")
    }

    pub fn malformed_json() -> Self {
        Self::new("Invalid payload: Malformed JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    #[test]
    fn logged_response_carries_entry_id() {
        let id = LogEntryId::generate(Timestamp::now());
        let response = LogDiagnosticResponse::logged(&id);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["id"], id.as_str());
        assert_eq!(json["note"], LOGGED_NOTE);
    }

    #[test]
    fn error_response_has_single_error_field() {
        let json = serde_json::to_value(ErrorResponse::method_not_allowed()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Method not allowed" }));
    }
}
