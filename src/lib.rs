//! Claim Readiness Diagnostic
//!
//! A five-question quiz that scores how ready a disability claim is for
//! filing and recommends whether a claim readiness review is worth booking.
//! The crate holds the quiz state machine, the scoring and recommendation
//! engines, local session persistence and the analytics log contract.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
