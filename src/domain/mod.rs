//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, errors, state machine trait)
//! - `diagnostic` - Questionnaire content, scoring, recommendations and the session aggregate

pub mod diagnostic;
pub mod foundation;
