use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};

use crate::core::text::{average, clamp_score, contains_any, ratio};
use crate::models::{
    Dimension, EnergyLevel, EnergyTrend, EnergyTrendUpdate, EngagementLevel, GuestRecord,
    GuestScore, GuestStatus, Personality, SocialEngagement,
};

const BASE_SCORE: f64 = 40.0;

/// Feedback words that nudge the engagement score up
const ENGAGED_WORDS: &[&str] = &["great", "amazing", "excited", "love", "enjoy"];

/// Feedback words that nudge the engagement score down
const DISENGAGED_WORDS: &[&str] = &["bad", "boring", "tired", "confusing", "hate"];

/// Minimum change in group energy reported as a trend
pub const ENERGY_TREND_THRESHOLD: f64 = 5.0;

/// Per-interest and per-city guest counts over one guest list
#[derive(Debug, Clone, Default)]
pub struct GroupContext {
    interest_counts: HashMap<String, usize>,
    city_counts: HashMap<String, usize>,
}

impl GroupContext {
    pub fn new(guests: &[GuestRecord]) -> Self {
        let mut interest_counts: HashMap<String, usize> = HashMap::new();
        let mut city_counts: HashMap<String, usize> = HashMap::new();

        for guest in guests {
            for interest in distinct_interests(guest) {
                *interest_counts.entry(interest).or_default() += 1;
            }
            if let Some(city) = city_key(guest) {
                *city_counts.entry(city).or_default() += 1;
            }
        }

        Self {
            interest_counts,
            city_counts,
        }
    }

    /// Number of guests listing `interest`
    pub fn interest_count(&self, interest: &str) -> usize {
        self.interest_counts
            .get(&interest.trim().to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// How many other guests share each of the guest's interests, summed
    pub fn shared_interest_strength(&self, guest: &GuestRecord) -> usize {
        distinct_interests(guest)
            .iter()
            .map(|interest| self.interest_count(interest).saturating_sub(1))
            .sum()
    }

    /// Size of the most popular interest
    pub fn max_shared_interest_count(&self) -> usize {
        self.interest_counts.values().copied().max().unwrap_or(0)
    }

    pub fn city_count(&self, guest: &GuestRecord) -> usize {
        city_key(guest)
            .and_then(|city| self.city_counts.get(&city).copied())
            .unwrap_or(0)
    }
}

/// Lowercased interests of a guest, each counted once
pub(crate) fn distinct_interests(guest: &GuestRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    guest
        .interests
        .iter()
        .map(|interest| interest.trim().to_lowercase())
        .filter(|interest| !interest.is_empty() && seen.insert(interest.clone()))
        .collect()
}

fn city_key(guest: &GuestRecord) -> Option<String> {
    guest
        .city
        .as_deref()
        .map(|city| city.trim().to_lowercase())
        .filter(|city| !city.is_empty())
}

/// Engagement score (0-100) for one guest within its group
pub fn guest_engagement_score(guest: &GuestRecord, ctx: &GroupContext, now: DateTime<Utc>) -> f64 {
    let mut score = BASE_SCORE;

    score += (guest.interests.len() as f64 * 9.0).min(27.0);
    score += (ctx.shared_interest_strength(guest) as f64 * 2.0).min(14.0);

    score += match guest.personality {
        Some(Personality::Extravert) => 12.0,
        Some(Personality::Ambivert) => 6.0,
        Some(Personality::Introvert) => -8.0,
        None => 0.0,
    };

    if guest.is_first_time {
        score -= 10.0;
    }

    // Missing energy counts as medium
    score += match guest.energy_level.unwrap_or(EnergyLevel::Medium) {
        EnergyLevel::High => 12.0,
        EnergyLevel::Medium => 5.0,
        EnergyLevel::Low => -12.0,
    };

    score += match guest.status() {
        Some(GuestStatus::Confirmed) => 8.0,
        Some(GuestStatus::Pending) => -3.0,
        Some(GuestStatus::Declined) => -25.0,
        _ => 0.0,
    };

    if let Some(feedback) = guest.feedback.as_deref() {
        if contains_any(feedback, ENGAGED_WORDS) {
            score += 7.0;
        }
        if contains_any(feedback, DISENGAGED_WORDS) {
            score -= 10.0;
        }
    }

    score += (10.0 * profile_completeness(guest)).round();
    score += city_bonus(guest, ctx);
    score += recency_bonus(guest.updated_at, now);

    clamp_score(score)
}

/// Fraction of the seven profile fields that are filled in
pub fn profile_completeness(guest: &GuestRecord) -> f64 {
    let filled = [
        guest.age.is_some(),
        guest.budget.is_some(),
        guest.personality.is_some(),
        is_filled(guest.availability.as_deref()),
        guest.energy_level.is_some(),
        is_filled(guest.feedback.as_deref()),
        is_filled(guest.status.as_deref()),
    ];

    ratio(filled.iter().filter(|f| **f).count(), filled.len())
}

#[inline]
fn is_filled(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

fn city_bonus(guest: &GuestRecord, ctx: &GroupContext) -> f64 {
    match ctx.city_count(guest) {
        0 => 0.0,
        1 => 2.0,
        _ => 6.0,
    }
}

fn recency_bonus(updated_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(updated_at) = updated_at else {
        return 0.0;
    };

    let age = now - updated_at;
    if age <= Duration::days(1) {
        6.0
    } else if age <= Duration::days(7) {
        3.0
    } else if age > Duration::days(30) {
        -5.0
    } else {
        0.0
    }
}

/// Per-guest social openness (0-100)
pub fn social_openness_score(guest: &GuestRecord) -> f64 {
    let mut score = match guest.personality {
        Some(Personality::Extravert) => 50.0,
        Some(Personality::Ambivert) => 35.0,
        _ => 20.0,
    };

    if !guest.is_first_time {
        score += 20.0;
    }

    score += match guest.interests.len() {
        0 => 0.0,
        1 => 10.0,
        2 => 20.0,
        _ => 30.0,
    };

    clamp_score(score)
}

/// Per-guest energy value; unknown energy sits at the medium baseline
pub fn energy_value(guest: &GuestRecord) -> f64 {
    match guest.energy_level {
        Some(EnergyLevel::High) => 100.0,
        Some(EnergyLevel::Low) => 30.0,
        Some(EnergyLevel::Medium) | None => 60.0,
    }
}

/// Rounded mean energy of the group
pub fn group_energy_score(guests: &[GuestRecord]) -> f64 {
    let values: Vec<f64> = guests.iter().map(energy_value).collect();
    clamp_score(average(&values).round())
}

fn interaction_balance_score(guests: &[GuestRecord], ctx: &GroupContext) -> f64 {
    if guests.is_empty() {
        return 0.0;
    }

    let mut score = ctx.max_shared_interest_count() as f64 / guests.len() as f64 * 100.0;

    let styles: HashSet<Personality> = guests.iter().filter_map(|g| g.personality).collect();
    if styles.len() == 3 {
        score -= 10.0;
    }

    clamp_score(score).round()
}

/// Group-level engagement: three dimensions, risks and insight messages
///
/// `overall_score` is the rounded mean of the three dimension scores, not of
/// the per-guest engagement scores.
pub fn analyze_social_engagement(guests: &[GuestRecord], now: DateTime<Utc>) -> SocialEngagement {
    let ctx = GroupContext::new(guests);
    let total = guests.len();

    let openness: Vec<f64> = guests.iter().map(social_openness_score).collect();
    let openness_score = clamp_score(average(&openness).round());
    let balance_score = interaction_balance_score(guests, &ctx);
    let energy_score = group_energy_score(guests);

    let overall_score = average(&[openness_score, balance_score, energy_score]).round();

    let first_timers = guests.iter().filter(|g| g.is_first_time).count();
    let first_time_ratio = ratio(first_timers, total);
    let low_energy_ratio = ratio(guests.iter().filter(|g| g.is_low_energy()).count(), total);
    let declined_ratio = ratio(guests.iter().filter(|g| g.is_declined()).count(), total);
    let shared_ratio = ratio(
        guests
            .iter()
            .filter(|g| ctx.shared_interest_strength(g) > 0)
            .count(),
        total,
    );
    let recent_ratio = ratio(
        guests
            .iter()
            .filter(|g| g.updated_at.map_or(false, |at| now - at <= Duration::days(7)))
            .count(),
        total,
    );

    let mut risks = Vec::new();
    if first_time_ratio > 0.5 {
        risks.push("High number of first time guests".to_string());
    }
    if low_energy_ratio > 0.4 {
        risks.push("Low energy trend detected".to_string());
    }
    if overall_score < 45.0 {
        risks.push("Overall engagement is below target".to_string());
    }
    if declined_ratio > 0.3 {
        risks.push("High declined status ratio".to_string());
    }

    let mut insights = Vec::new();
    if shared_ratio >= 0.5 {
        insights.push("Most guests share interests, themed activities should land well".to_string());
    } else {
        insights.push("Few shared interests, favour broad-appeal activities".to_string());
    }
    if first_timers > 0 {
        insights.push(format!(
            "{} first-time guest(s), plan guided icebreakers",
            first_timers
        ));
    }
    if low_energy_ratio > 0.3 {
        insights.push("Many guests report low energy, keep sessions short with breaks".to_string());
    }
    if recent_ratio >= 0.6 {
        insights.push("Most guests updated their details this week".to_string());
    }

    let guest_scores = guests
        .iter()
        .map(|guest| GuestScore {
            guest_id: guest.id.clone(),
            name: guest.name.clone(),
            score: guest_engagement_score(guest, &ctx, now),
        })
        .collect();

    tracing::debug!(
        "Social engagement for {} guests: openness={}, balance={}, energy={}, overall={}",
        total,
        openness_score,
        balance_score,
        energy_score,
        overall_score
    );

    SocialEngagement {
        overall_score,
        social_openness: Dimension {
            score: openness_score,
            label: EngagementLevel::from_score(openness_score, 70.0, 40.0),
        },
        interaction_balance: Dimension {
            score: balance_score,
            label: EngagementLevel::from_score(balance_score, 65.0, 35.0),
        },
        energy_level: Dimension {
            score: energy_score,
            label: EngagementLevel::from_score(energy_score, 70.0, 40.0),
        },
        risks,
        insights,
        guest_scores,
    }
}

/// Compare the current group energy against the caller-held previous value
pub fn energy_trend(previous: Option<f64>, current: f64) -> EnergyTrendUpdate {
    energy_trend_with_threshold(previous, current, ENERGY_TREND_THRESHOLD)
}

pub fn energy_trend_with_threshold(
    previous: Option<f64>,
    current: f64,
    threshold: f64,
) -> EnergyTrendUpdate {
    let delta = previous.map(|prev| current - prev);

    let trend = match delta {
        Some(d) if d > threshold => EnergyTrend::Rising,
        Some(d) if d < -threshold => EnergyTrend::Falling,
        _ => EnergyTrend::Stable,
    };

    EnergyTrendUpdate {
        trend,
        current,
        previous,
        delta,
    }
}
