use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use crate::core::clock::{Clock, SystemClock};
use crate::core::compatibility::CompatibilityScorer;
use crate::core::engagement::{
    analyze_social_engagement, energy_trend_with_threshold, group_energy_score,
    ENERGY_TREND_THRESHOLD,
};
use crate::core::emotion::analyze_emotional_states;
use crate::core::networking::analyze_networking;
use crate::core::pairing::{
    guest_matching, rank_matches, suggest_guest_pairings, top_pairings, DEFAULT_TOP_PAIRINGS,
};
use crate::core::sentiment::{analyze_sentiment_with_limit, DEFAULT_RECENT_FEEDBACK};
use crate::error::Result;
use crate::models::{
    EmotionReport, EnergyTrendUpdate, GuestPair, GuestRecord, InsightReport, MatchCandidate,
    NetworkingReport, PairingSuggestion, SentimentReport, SimpleWeights, SocialEngagement,
};

/// Tunables of the insight engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub simple_weights: SimpleWeights,
    pub top_pairings_limit: usize,
    pub recent_feedback_limit: usize,
    pub energy_trend_threshold: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            simple_weights: SimpleWeights::default(),
            top_pairings_limit: DEFAULT_TOP_PAIRINGS,
            recent_feedback_limit: DEFAULT_RECENT_FEEDBACK,
            energy_trend_threshold: ENERGY_TREND_THRESHOLD,
        }
    }
}

/// Build every report section from the raw guest list
///
/// Sections are computed independently; none reads another's output.
pub fn generate_insights(guests: &[GuestRecord], clock: &dyn Clock) -> InsightReport {
    build_report(guests, clock.now(), &EngineSettings::default())
}

fn build_report(
    guests: &[GuestRecord],
    now: DateTime<Utc>,
    settings: &EngineSettings,
) -> InsightReport {
    InsightReport {
        social_engagement: analyze_social_engagement(guests, now),
        networking: analyze_networking(guests),
        pairings: top_pairings(guests, settings.top_pairings_limit),
        emotions: analyze_emotional_states(guests),
        sentiment: analyze_sentiment_with_limit(guests, now, settings.recent_feedback_limit),
        generated_at: now,
    }
}

/// Insight orchestrator shared by request handlers
///
/// Holds configured weights and limits plus the clock used for recency
/// scoring, feedback windows and the report timestamp.
#[derive(Clone)]
pub struct InsightEngine {
    settings: EngineSettings,
    clock: Arc<dyn Clock>,
}

impl InsightEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    pub fn with_clock(settings: EngineSettings, clock: Arc<dyn Clock>) -> Self {
        Self { settings, clock }
    }

    pub fn with_default_settings() -> Self {
        Self::new(EngineSettings::default())
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    fn simple_scorer(&self) -> CompatibilityScorer {
        CompatibilityScorer::simple(self.settings.simple_weights)
    }

    /// Full report
    pub fn generate_insights(&self, guests: &[GuestRecord]) -> InsightReport {
        let report = build_report(guests, self.clock.now(), &self.settings);

        tracing::debug!(
            "Generated insights for {} guests: overall={}, groups={}, pairings={}",
            guests.len(),
            report.social_engagement.overall_score,
            report.networking.groups.len(),
            report.pairings.len()
        );

        report
    }

    pub fn social_engagement(&self, guests: &[GuestRecord]) -> SocialEngagement {
        analyze_social_engagement(guests, self.clock.now())
    }

    /// Group energy compared with the caller's previous reading
    pub fn energy_trend(&self, guests: &[GuestRecord], previous: Option<f64>) -> EnergyTrendUpdate {
        energy_trend_with_threshold(
            previous,
            group_energy_score(guests),
            self.settings.energy_trend_threshold,
        )
    }

    pub fn networking(&self, guests: &[GuestRecord]) -> NetworkingReport {
        analyze_networking(guests)
    }

    pub fn top_pairings(&self, guests: &[GuestRecord]) -> Vec<PairingSuggestion> {
        top_pairings(guests, self.settings.top_pairings_limit)
    }

    /// Global greedy pairing with the configured simple weights
    pub fn guest_pairings(&self, guests: &[GuestRecord]) -> Result<Vec<GuestPair>> {
        suggest_guest_pairings(guests, &self.simple_scorer())
    }

    /// Sequential greedy pairing with the configured simple weights
    pub fn guest_matching(&self, guests: &[GuestRecord]) -> Result<Vec<GuestPair>> {
        guest_matching(guests, &self.simple_scorer())
    }

    pub fn rank_matches(
        &self,
        target_id: &str,
        guests: &[GuestRecord],
        limit: usize,
    ) -> Result<Vec<MatchCandidate>> {
        rank_matches(target_id, guests, limit)
    }

    pub fn emotions(&self, guests: &[GuestRecord]) -> EmotionReport {
        analyze_emotional_states(guests)
    }

    pub fn sentiment(&self, guests: &[GuestRecord]) -> SentimentReport {
        analyze_sentiment_with_limit(guests, self.clock.now(), self.settings.recent_feedback_limit)
    }
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::with_default_settings()
    }
}

impl fmt::Debug for InsightEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsightEngine")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::models::{EnergyLevel, Personality};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap()
    }

    fn sample_guests() -> Vec<GuestRecord> {
        let mut a = GuestRecord::new("a", "Ana");
        a.interests = vec!["AI".to_string(), "hiking".to_string()];
        a.personality = Some(Personality::Extravert);
        a.energy_level = Some(EnergyLevel::High);
        a.feedback = Some("amazing".to_string());
        a.updated_at = Some(now() - Duration::minutes(10));

        let mut b = GuestRecord::new("b", "Ben");
        b.interests = vec!["ai".to_string()];
        b.personality = Some(Personality::Introvert);
        b.energy_level = Some(EnergyLevel::Low);
        b.is_first_time = true;
        b.feedback = Some("confusing".to_string());

        let mut c = GuestRecord::new("c", "Cy");
        c.interests = vec!["hiking".to_string()];
        c.age = Some(40.0);

        vec![a, b, c]
    }

    #[test]
    fn test_generate_insights_is_deterministic() {
        let guests = sample_guests();
        let clock = FixedClock(now());

        let first = generate_insights(&guests, &clock);
        let second = generate_insights(&guests, &clock);

        assert_eq!(first, second);
        assert_eq!(first.generated_at, now());
    }

    #[test]
    fn test_sections_match_standalone_calls() {
        let guests = sample_guests();
        let report = generate_insights(&guests, &FixedClock(now()));

        assert_eq!(report.social_engagement, analyze_social_engagement(&guests, now()));
        assert_eq!(report.networking, analyze_networking(&guests));
        assert_eq!(report.emotions, analyze_emotional_states(&guests));
        assert_eq!(report.pairings.len(), 3);
        assert_eq!(report.networking.groups.len(), 2);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let guests = sample_guests();
        let snapshot = guests.clone();
        let engine = InsightEngine::with_clock(EngineSettings::default(), Arc::new(FixedClock(now())));

        engine.generate_insights(&guests);
        engine.guest_pairings(&guests).unwrap();
        engine.guest_matching(&guests).unwrap();

        assert_eq!(guests, snapshot);
    }

    #[test]
    fn test_engine_limits() {
        let settings = EngineSettings {
            top_pairings_limit: 1,
            recent_feedback_limit: 1,
            ..EngineSettings::default()
        };
        let engine = InsightEngine::with_clock(settings, Arc::new(FixedClock(now())));

        let report = engine.generate_insights(&sample_guests());

        assert_eq!(report.pairings.len(), 1);
        assert_eq!(report.sentiment.recent_feedback.len(), 1);
    }

    #[test]
    fn test_engine_energy_trend() {
        let engine = InsightEngine::with_clock(EngineSettings::default(), Arc::new(FixedClock(now())));
        let guests = sample_guests();

        // (100 + 30 + 60) / 3 = 63.33 -> 63
        let first = engine.energy_trend(&guests, None);
        assert_eq!(first.current, 63.0);

        let second = engine.energy_trend(&guests[..1], Some(first.current));
        assert_eq!(second.current, 100.0);
        assert_eq!(second.previous, Some(63.0));
    }

    #[test]
    fn test_empty_input_does_not_fail() {
        let report = generate_insights(&[], &FixedClock(now()));

        assert!(report.pairings.is_empty());
        assert!(report.networking.groups.is_empty());
        assert_eq!(report.sentiment.trend, "No feedback yet");
    }
}
