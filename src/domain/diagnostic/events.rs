//! Values emitted to the rendering layer and downstream integrations.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};

use super::recommendation::RecommendationCategory;
use super::state::DiagnosticState;

/// A screen change produced by a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: DiagnosticState,
    pub to: DiagnosticState,
}

impl StateChange {
    pub fn new(from: DiagnosticState, to: DiagnosticState) -> Self {
        Self { from, to }
    }

    /// False for a jump onto the screen already shown.
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }
}

/// Attribution handed to the booking widget when the CTA is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingHandoff {
    pub session_id: SessionId,
    pub category: RecommendationCategory,
    pub requested_at: Timestamp,
}
