use std::collections::{HashMap, HashSet};

use crate::core::text::{average, clamp_score, ratio};
use crate::models::{
    EnergyLevel, GuestRecord, GuestScore, NetworkingGroup, NetworkingPotential,
    NetworkingReadiness, NetworkingReport, Personality, SessionType, TimeSlot,
};

/// Minimum members for an interest to form a networking group
const MIN_GROUP_SIZE: usize = 2;

/// Build one networking group per interest shared by at least two guests
///
/// A guest can sit in several groups. Interests are matched case-insensitively
/// and displayed with the casing first seen. Groups are ordered by size,
/// largest first; equal sizes keep first-seen order.
pub fn suggest_networking_opportunities(guests: &[GuestRecord]) -> Vec<NetworkingGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut by_interest: HashMap<String, (String, Vec<&GuestRecord>)> = HashMap::new();

    for guest in guests {
        let mut seen = HashSet::new();
        for interest in &guest.interests {
            let key = interest.trim().to_lowercase();
            if key.is_empty() || !seen.insert(key.clone()) {
                continue;
            }

            by_interest
                .entry(key.clone())
                .or_insert_with(|| {
                    order.push(key);
                    (interest.trim().to_string(), Vec::new())
                })
                .1
                .push(guest);
        }
    }

    let mut groups: Vec<NetworkingGroup> = order
        .iter()
        .filter_map(|key| by_interest.get(key))
        .filter(|(_, members)| members.len() >= MIN_GROUP_SIZE)
        .map(|(interest, members)| NetworkingGroup {
            interest: interest.clone(),
            members: members.iter().map(|guest| guest.guest_ref()).collect(),
            count: members.len(),
            best_time: best_time(members),
            session_type: session_type(members),
        })
        .collect();

    groups.sort_by(|a, b| b.count.cmp(&a.count));

    tracing::debug!(
        "Built {} networking groups from {} guests",
        groups.len(),
        guests.len()
    );

    groups
}

/// Most common availability slot; ties go morning, afternoon, evening
///
/// With no usable availability at all this resolves to morning.
pub fn best_time(members: &[&GuestRecord]) -> TimeSlot {
    let mut counts: HashMap<TimeSlot, usize> = HashMap::new();
    for slot in members
        .iter()
        .filter_map(|guest| guest.availability.as_deref())
        .filter_map(TimeSlot::detect)
    {
        *counts.entry(slot).or_default() += 1;
    }

    let mut best = TimeSlot::PRIORITY[0];
    let mut best_count = counts.get(&best).copied().unwrap_or(0);
    for slot in &TimeSlot::PRIORITY[1..] {
        let count = counts.get(slot).copied().unwrap_or(0);
        if count > best_count {
            best = *slot;
            best_count = count;
        }
    }
    best
}

/// Session format for a group; first matching rule wins
pub fn session_type(members: &[&GuestRecord]) -> SessionType {
    let total = members.len();
    let introverts = members
        .iter()
        .filter(|guest| guest.personality == Some(Personality::Introvert))
        .count();
    let first_timers = members.iter().filter(|guest| guest.is_first_time).count();

    if ratio(introverts, total) > 0.5 {
        SessionType::SmallGroup
    } else if ratio(first_timers, total) > 0.4 {
        SessionType::GuidedNetworking
    } else {
        SessionType::OpenMixer
    }
}

/// Per-guest networking score (0-100)
pub fn networking_score(guest: &GuestRecord) -> f64 {
    let mut score = match guest.personality {
        Some(Personality::Extravert) => 40.0,
        Some(Personality::Ambivert) => 25.0,
        _ => 10.0,
    };

    score += match guest.interests.len() {
        0 => 0.0,
        1 => 10.0,
        2 => 20.0,
        _ => 30.0,
    };

    if !guest.is_first_time {
        score += 15.0;
    }
    if guest.energy_level == Some(EnergyLevel::Low) {
        score -= 15.0;
    }

    clamp_score(score)
}

/// Event-level networking readiness
pub fn networking_readiness(guests: &[GuestRecord]) -> NetworkingReadiness {
    let guest_scores: Vec<GuestScore> = guests
        .iter()
        .map(|guest| GuestScore {
            guest_id: guest.id.clone(),
            name: guest.name.clone(),
            score: networking_score(guest),
        })
        .collect();

    let values: Vec<f64> = guest_scores.iter().map(|s| s.score).collect();
    let score = average(&values).round();

    let label = if score >= 70.0 {
        NetworkingPotential::High
    } else if score >= 40.0 {
        NetworkingPotential::Moderate
    } else {
        NetworkingPotential::Low
    };

    NetworkingReadiness {
        score,
        label,
        guest_scores,
    }
}

/// Networking section of the insight report
pub fn analyze_networking(guests: &[GuestRecord]) -> NetworkingReport {
    NetworkingReport {
        groups: suggest_networking_opportunities(guests),
        readiness: networking_readiness(guests),
    }
}
