//! Diagnostic Observer Port - Typed callbacks for the rendering layer.
//!
//! One method per event kind, each a no-op by default so observers only
//! implement what they redraw on.

use crate::domain::diagnostic::{Answer, BookingHandoff, DiagnosticState, Recommendation};

/// Receives controller events synchronously, after the change is applied.
pub trait DiagnosticObserver: Send + Sync {
    fn on_state_changed(&self, _from: DiagnosticState, _to: DiagnosticState) {}

    fn on_answer_recorded(&self, _question_id: &str, _answer: &Answer) {}

    fn on_recommendation_ready(&self, _recommendation: &Recommendation) {}

    fn on_booking_requested(&self, _handoff: &BookingHandoff) {}
}
