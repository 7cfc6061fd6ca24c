//! GroupSync Insights - guest insight engine for group travel events
//!
//! Turns a list of guest records into engagement scores, networking groups,
//! pairing suggestions, a mood distribution and a feedback sentiment summary.
//! Every computation is a pure function of its input and an injected clock.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{generate_insights, Clock, CompatibilityScorer, FixedClock, InsightEngine, ScoreStrategy, SystemClock};
pub use error::{InsightError, Result};
pub use models::{GuestRecord, InsightReport, Personality, EnergyLevel, SimpleWeights};
