use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{GuestRef, TimeSlot};

/// Three-band label used by the engagement dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementLevel {
    High,
    Medium,
    Low,
}

impl EngagementLevel {
    /// Label a 0-100 score given the lower bounds of the High and Medium bands
    pub fn from_score(score: f64, high: f64, medium: f64) -> Self {
        if score >= high {
            EngagementLevel::High
        } else if score >= medium {
            EngagementLevel::Medium
        } else {
            EngagementLevel::Low
        }
    }
}

/// A scored group dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub score: f64,
    pub label: EngagementLevel,
}

/// Score attributed to a single guest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestScore {
    #[serde(rename = "guestId")]
    pub guest_id: String,
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialEngagement {
    pub overall_score: f64,
    pub social_openness: Dimension,
    pub interaction_balance: Dimension,
    pub energy_level: Dimension,
    pub risks: Vec<String>,
    pub insights: Vec<String>,
    pub guest_scores: Vec<GuestScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyTrend {
    Rising,
    Falling,
    Stable,
}

/// Result of comparing the current group energy with the caller's previous value
///
/// `current` is what the caller should pass back as `previous` next time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyTrendUpdate {
    pub trend: EnergyTrend,
    pub current: f64,
    pub previous: Option<f64>,
    pub delta: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionType {
    #[serde(rename = "Small Group")]
    SmallGroup,
    #[serde(rename = "Guided Networking")]
    GuidedNetworking,
    #[serde(rename = "Open Mixer")]
    OpenMixer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkingGroup {
    pub interest: String,
    pub members: Vec<GuestRef>,
    pub count: usize,
    pub best_time: TimeSlot,
    pub session_type: SessionType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkingPotential {
    #[serde(rename = "High Networking Potential")]
    High,
    #[serde(rename = "Moderate Networking Potential")]
    Moderate,
    #[serde(rename = "Low Networking Potential")]
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkingReadiness {
    pub score: f64,
    pub label: NetworkingPotential,
    pub guest_scores: Vec<GuestScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkingReport {
    pub groups: Vec<NetworkingGroup>,
    pub readiness: NetworkingReadiness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStrength {
    #[serde(rename = "Strong Match")]
    Strong,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Weak Match")]
    Weak,
}

impl MatchStrength {
    /// Label a 0-1 compatibility score
    pub fn from_fraction(score: f64) -> Self {
        if score >= 0.75 {
            MatchStrength::Strong
        } else if score >= 0.5 {
            MatchStrength::Good
        } else {
            MatchStrength::Weak
        }
    }
}

/// Entry of the all-pairs pairing ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingSuggestion {
    pub guest_a: GuestRef,
    pub guest_b: GuestRef,
    pub score: f64,
    pub strength: MatchStrength,
    pub shared_interests: Vec<String>,
    pub icebreaker: String,
}

/// Pair committed by one of the greedy matchers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestPair {
    pub guest_a: GuestRef,
    pub guest_b: GuestRef,
    pub score: f64,
    pub shared_interests: Vec<String>,
}

/// Candidate returned when ranking matches for a single guest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub guest: GuestRef,
    pub score: f64,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Excited,
    Neutral,
    Tired,
    Disengaged,
    Anxious,
}

impl EmotionalState {
    /// Bucket shown in the four-way distribution; anxious rolls into disengaged
    pub fn display_bucket(self) -> EmotionalState {
        match self {
            EmotionalState::Anxious => EmotionalState::Disengaged,
            other => other,
        }
    }
}

/// Percentage of guests per displayed bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodDistribution {
    pub excited: f64,
    pub neutral: f64,
    pub tired: f64,
    pub disengaged: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCounts {
    pub excited: usize,
    pub neutral: usize,
    pub tired: usize,
    pub disengaged: usize,
    pub anxious: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestEmotion {
    #[serde(rename = "guestId")]
    pub guest_id: String,
    pub name: String,
    pub state: EmotionalState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionReport {
    pub distribution: MoodDistribution,
    pub counts: EmotionCounts,
    pub group_mood: EmotionalState,
    pub recommendations: Vec<String>,
    pub guest_states: Vec<GuestEmotion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Most frequent sentiment; ties resolve positive, neutral, negative
    pub fn dominant(&self) -> Sentiment {
        if self.total() == 0 {
            return Sentiment::Neutral;
        }

        let mut best = (Sentiment::Positive, self.positive);
        for candidate in [
            (Sentiment::Neutral, self.neutral),
            (Sentiment::Negative, self.negative),
        ] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentWindows {
    pub last_30_minutes: SentimentCounts,
    pub previous_30_minutes: SentimentCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    #[serde(rename = "guestId")]
    pub guest_id: String,
    pub name: String,
    pub text: String,
    pub sentiment: Sentiment,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentReport {
    pub counts: SentimentCounts,
    pub dominant: Sentiment,
    pub windows: SentimentWindows,
    pub trend: String,
    pub alerts: Vec<String>,
    pub actions: Vec<String>,
    pub recent_feedback: Vec<FeedbackEntry>,
}

/// Composite output of the insight engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub social_engagement: SocialEngagement,
    pub networking: NetworkingReport,
    pub pairings: Vec<PairingSuggestion>,
    pub emotions: EmotionReport,
    pub sentiment: SentimentReport,
    pub generated_at: DateTime<Utc>,
}
