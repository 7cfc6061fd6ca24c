// Core insight exports
pub mod clock;
pub mod compatibility;
pub mod emotion;
pub mod engagement;
pub mod insights;
pub mod networking;
pub mod pairing;
pub mod sentiment;
pub mod text;

pub use clock::{Clock, FixedClock, SystemClock};
pub use compatibility::{compatibility, match_reasons, Compatibility, CompatibilityScorer, ScoreStrategy};
pub use emotion::{analyze_emotional_states, infer_emotional_state};
pub use engagement::{
    analyze_social_engagement, energy_trend, group_energy_score, guest_engagement_score,
    GroupContext,
};
pub use insights::{generate_insights, EngineSettings, InsightEngine};
pub use networking::{analyze_networking, networking_readiness, suggest_networking_opportunities};
pub use pairing::{guest_matching, rank_matches, suggest_guest_pairings, top_pairings};
pub use sentiment::{analyze_sentiment, guest_sentiment};
