// Model exports
pub mod domain;
pub mod report;
pub mod requests;
pub mod responses;

pub use domain::{
    EnergyLevel, GuestRecord, GuestRef, GuestStatus, Personality, SimpleWeights, TimeSlot,
};
pub use report::{
    Dimension, EmotionCounts, EmotionReport, EmotionalState, EnergyTrend, EnergyTrendUpdate,
    EngagementLevel, FeedbackEntry, GuestEmotion, GuestPair, GuestScore, InsightReport,
    MatchCandidate, MatchStrength, MoodDistribution, NetworkingGroup, NetworkingPotential,
    NetworkingReadiness, NetworkingReport, PairingSuggestion, Sentiment, SentimentCounts,
    SentimentReport, SentimentWindows, SessionType, SocialEngagement,
};
pub use requests::{EnergyTrendRequest, GuestListRequest, MatchRankRequest};
pub use responses::{ApiResponse, ErrorResponse, HealthResponse};
