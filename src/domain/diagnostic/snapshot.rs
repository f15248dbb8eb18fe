//! Persisted session record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{SessionId, Timestamp};

use super::answer::Answer;
use super::recommendation::Recommendation;

/// Plain copy of a session as written to the local store under
/// `diagnostic_session`.
///
/// Loading one back never rehydrates a live controller; it is read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub answers: BTreeMap<String, Answer>,
    pub score: Option<u32>,
    pub recommendation: Option<Recommendation>,
}

impl SessionSnapshot {
    /// Question id → points, the shape the analytics payload uses.
    pub fn points_by_question(&self) -> BTreeMap<String, u8> {
        self.answers
            .iter()
            .map(|(id, answer)| (id.clone(), answer.points))
            .collect()
    }
}
