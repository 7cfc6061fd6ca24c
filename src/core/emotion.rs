use crate::core::sentiment::guest_sentiment;
use crate::core::text::ratio;
use crate::models::{
    EmotionCounts, EmotionReport, EmotionalState, EnergyLevel, GuestEmotion, GuestRecord,
    MoodDistribution, Sentiment,
};

/// Infer a guest's emotional state; the first matching rule wins
///
/// `Anxious` is reported as its own state here. Aggregation rolls it into
/// the disengaged bucket while also counting it separately.
pub fn infer_emotional_state(guest: &GuestRecord) -> EmotionalState {
    if guest.is_declined() {
        return EmotionalState::Disengaged;
    }

    match guest.energy_level {
        Some(EnergyLevel::High) => return EmotionalState::Excited,
        Some(EnergyLevel::Medium) => return EmotionalState::Neutral,
        Some(EnergyLevel::Low) if guest.is_first_time => return EmotionalState::Anxious,
        Some(EnergyLevel::Low) => return EmotionalState::Tired,
        None => {}
    }

    match guest_sentiment(guest) {
        Some(Sentiment::Negative) => return EmotionalState::Disengaged,
        Some(Sentiment::Positive) => return EmotionalState::Excited,
        _ => {}
    }

    if guest.is_first_time {
        EmotionalState::Anxious
    } else {
        EmotionalState::Neutral
    }
}

/// Group mood distribution, counters and recommendations
pub fn analyze_emotional_states(guests: &[GuestRecord]) -> EmotionReport {
    let mut counts = EmotionCounts::default();
    let mut guest_states = Vec::with_capacity(guests.len());

    for guest in guests {
        let state = infer_emotional_state(guest);

        // Anxious guests land in disengaged for display and in their own tally
        match state.display_bucket() {
            EmotionalState::Excited => counts.excited += 1,
            EmotionalState::Neutral => counts.neutral += 1,
            EmotionalState::Tired => counts.tired += 1,
            _ => counts.disengaged += 1,
        }
        if state == EmotionalState::Anxious {
            counts.anxious += 1;
        }

        guest_states.push(GuestEmotion {
            guest_id: guest.id.clone(),
            name: guest.name.clone(),
            state,
        });
    }

    let total = guests.len();
    let percent = |count: usize| (ratio(count, total) * 100.0).round();
    let distribution = MoodDistribution {
        excited: percent(counts.excited),
        neutral: percent(counts.neutral),
        tired: percent(counts.tired),
        disengaged: percent(counts.disengaged),
    };

    let group_mood = group_mood(&distribution, total);
    let recommendations = recommendations(group_mood, ratio(counts.anxious, total));

    tracing::debug!(
        "Emotional states for {} guests: mood={:?}, anxious={}",
        total,
        group_mood,
        counts.anxious
    );

    EmotionReport {
        distribution,
        counts,
        group_mood,
        recommendations,
        guest_states,
    }
}

/// Bucket with the highest share; ties resolve excited, neutral, tired, disengaged
fn group_mood(distribution: &MoodDistribution, total: usize) -> EmotionalState {
    if total == 0 {
        return EmotionalState::Neutral;
    }

    let buckets = [
        (EmotionalState::Excited, distribution.excited),
        (EmotionalState::Neutral, distribution.neutral),
        (EmotionalState::Tired, distribution.tired),
        (EmotionalState::Disengaged, distribution.disengaged),
    ];

    let mut best = buckets[0];
    for bucket in &buckets[1..] {
        if bucket.1 > best.1 {
            best = *bucket;
        }
    }
    best.0
}

fn recommendations(mood: EmotionalState, anxious_ratio: f64) -> Vec<String> {
    let mut recommendations = Vec::new();

    if mood == EmotionalState::Tired {
        recommendations.push("Schedule a rest break before the next activity".to_string());
        recommendations.push("Swap the next session for a low-effort social format".to_string());
    }
    if anxious_ratio > 0.25 {
        recommendations.push("Pair anxious first-time guests with experienced buddies".to_string());
    }
    if mood == EmotionalState::Disengaged {
        recommendations.push("Check in personally with disengaged guests".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push("Group mood is stable, keep the current plan".to_string());
    }

    recommendations
}
