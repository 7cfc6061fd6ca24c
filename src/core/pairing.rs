use std::cmp::Ordering;

use crate::core::compatibility::{
    compatibility, match_reasons, Compatibility, CompatibilityScorer, ScoreStrategy,
};
use crate::error::{InsightError, Result};
use crate::models::{GuestPair, GuestRecord, MatchCandidate, MatchStrength, PairingSuggestion};

/// Default number of suggestions returned by [`top_pairings`]
pub const DEFAULT_TOP_PAIRINGS: usize = 8;

const MIN_MATCHING_GUESTS: usize = 2;

/// Rank every unordered guest pair by fractional compatibility
///
/// This is a ranking, not a matching: a guest can appear in several
/// suggestions. Equal scores keep pair enumeration order.
pub fn top_pairings(guests: &[GuestRecord], limit: usize) -> Vec<PairingSuggestion> {
    let mut suggestions: Vec<PairingSuggestion> = all_pairs(guests.len())
        .map(|(i, j)| {
            let (a, b) = (&guests[i], &guests[j]);
            let result = compatibility(a, b, ScoreStrategy::Fractional1);

            PairingSuggestion {
                guest_a: a.guest_ref(),
                guest_b: b.guest_ref(),
                score: result.score,
                strength: MatchStrength::from_fraction(result.score),
                icebreaker: icebreaker(a, b, &result.shared_interests),
                shared_interests: result.shared_interests,
            }
        })
        .collect();

    suggestions.sort_by(|a, b| descending(a.score, b.score));
    suggestions.truncate(limit);
    suggestions
}

fn icebreaker(a: &GuestRecord, b: &GuestRecord, shared: &[String]) -> String {
    let topic = shared
        .first()
        .map(String::as_str)
        .unwrap_or("general topics");

    match (a.personality, b.personality) {
        (Some(style), Some(other)) if style == other => format!(
            "Introduce {} and {} over {}; both lean {}",
            a.name, b.name, topic, style
        ),
        _ => format!(
            "Introduce {} and {} over {}; mixed interaction styles, keep it light",
            a.name, b.name, topic
        ),
    }
}

/// Global greedy matching
///
/// Scores every pair, sorts all candidates by score (stable), then accepts
/// each pair whose guests are both still free until `floor(n/2)` pairs are
/// taken or candidates run out.
pub fn suggest_guest_pairings(
    guests: &[GuestRecord],
    scorer: &CompatibilityScorer,
) -> Result<Vec<GuestPair>> {
    ensure_enough_guests(guests)?;

    let mut candidates: Vec<(usize, usize, Compatibility)> = all_pairs(guests.len())
        .map(|(i, j)| (i, j, scorer.score(&guests[i], &guests[j])))
        .collect();
    candidates.sort_by(|a, b| descending(a.2.score, b.2.score));

    let max_pairs = guests.len() / 2;
    let mut used = vec![false; guests.len()];
    let mut pairs = Vec::with_capacity(max_pairs);

    for (i, j, result) in candidates {
        if pairs.len() == max_pairs {
            break;
        }
        if used[i] || used[j] {
            continue;
        }
        used[i] = true;
        used[j] = true;
        pairs.push(guest_pair(&guests[i], &guests[j], result));
    }

    tracing::debug!(
        "Global greedy matching ({:?}) paired {} of {} guests",
        scorer.strategy(),
        pairs.len() * 2,
        guests.len()
    );

    Ok(pairs)
}

/// Sequential greedy matching
///
/// Walks guests in input order; each free guest takes the best-scoring free
/// guest after it (first one wins ties). Order-dependent and not optimal.
/// A guest left without a free candidate stays unpaired.
pub fn guest_matching(
    guests: &[GuestRecord],
    scorer: &CompatibilityScorer,
) -> Result<Vec<GuestPair>> {
    ensure_enough_guests(guests)?;

    let mut used = vec![false; guests.len()];
    let mut pairs = Vec::with_capacity(guests.len() / 2);

    for i in 0..guests.len() {
        if used[i] {
            continue;
        }

        let mut best: Option<(usize, Compatibility)> = None;
        for j in (i + 1)..guests.len() {
            if used[j] {
                continue;
            }
            let result = scorer.score(&guests[i], &guests[j]);
            let better = best
                .as_ref()
                .map_or(true, |(_, current)| result.score > current.score);
            if better {
                best = Some((j, result));
            }
        }

        if let Some((j, result)) = best {
            used[i] = true;
            used[j] = true;
            pairs.push(guest_pair(&guests[i], &guests[j], result));
        }
    }

    tracing::debug!(
        "Sequential matching ({:?}) paired {} of {} guests",
        scorer.strategy(),
        pairs.len() * 2,
        guests.len()
    );

    Ok(pairs)
}

/// Rank all other guests against `target_id` on dietary, interest and
/// accessibility compatibility
pub fn rank_matches(
    target_id: &str,
    guests: &[GuestRecord],
    limit: usize,
) -> Result<Vec<MatchCandidate>> {
    ensure_enough_guests(guests)?;

    let target = guests
        .iter()
        .find(|guest| guest.id == target_id)
        .ok_or_else(|| InsightError::GuestNotFound(target_id.to_string()))?;

    let mut candidates: Vec<MatchCandidate> = guests
        .iter()
        .filter(|guest| guest.id != target.id)
        .map(|guest| MatchCandidate {
            guest: guest.guest_ref(),
            score: compatibility(target, guest, ScoreStrategy::DietInterestAccess).score,
            reasons: match_reasons(target, guest),
        })
        .collect();

    candidates.sort_by(|a, b| descending(a.score, b.score));
    candidates.truncate(limit);
    Ok(candidates)
}

fn ensure_enough_guests(guests: &[GuestRecord]) -> Result<()> {
    if guests.len() < MIN_MATCHING_GUESTS {
        return Err(InsightError::InsufficientGuests {
            required: MIN_MATCHING_GUESTS,
            found: guests.len(),
        });
    }
    Ok(())
}

fn guest_pair(a: &GuestRecord, b: &GuestRecord, result: Compatibility) -> GuestPair {
    GuestPair {
        guest_a: a.guest_ref(),
        guest_b: b.guest_ref(),
        score: result.score,
        shared_interests: result.shared_interests,
    }
}

/// Unordered index pairs `(i, j)` with `i < j`, in lexicographic order
fn all_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
}

#[inline]
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Personality;
    use std::collections::HashSet;

    fn create_guest(id: &str, interests: &[&str], age: f64) -> GuestRecord {
        GuestRecord {
            interests: interests.iter().map(|s| s.to_string()).collect(),
            age: Some(age),
            ..GuestRecord::new(id, id.to_uppercase())
        }
    }

    fn assert_valid_matching(pairs: &[GuestPair], n: usize) {
        assert!(pairs.len() <= n / 2);
        let mut seen = HashSet::new();
        for pair in pairs {
            assert!(seen.insert(pair.guest_a.id.clone()));
            assert!(seen.insert(pair.guest_b.id.clone()));
        }
    }

    #[test]
    fn test_insufficient_guests() {
        let scorer = CompatibilityScorer::default();
        let single = vec![create_guest("a", &[], 30.0)];

        assert_eq!(
            suggest_guest_pairings(&single, &scorer),
            Err(InsightError::InsufficientGuests { required: 2, found: 1 })
        );
        assert!(guest_matching(&[], &scorer).is_err());
    }

    #[test]
    fn test_sequential_is_order_dependent() {
        // a-c: 25, b-c: 70, every other pair 0
        let guests = vec![
            create_guest("a", &["jazz"], 20.0),
            create_guest("b", &["wine", "food"], 40.0),
            create_guest("c", &["jazz", "wine", "food"], 42.0),
            create_guest("d", &[], 60.0),
        ];
        let scorer = CompatibilityScorer::default();

        let sequential = guest_matching(&guests, &scorer).unwrap();
        assert_eq!(sequential.len(), 2);
        assert_eq!((sequential[0].guest_a.id.as_str(), sequential[0].guest_b.id.as_str()), ("a", "c"));
        assert_eq!((sequential[1].guest_a.id.as_str(), sequential[1].guest_b.id.as_str()), ("b", "d"));

        let global = suggest_guest_pairings(&guests, &scorer).unwrap();
        assert_eq!(global.len(), 2);
        assert_eq!((global[0].guest_a.id.as_str(), global[0].guest_b.id.as_str()), ("b", "c"));
        assert_eq!(global[0].score, 70.0);
        assert_eq!((global[1].guest_a.id.as_str(), global[1].guest_b.id.as_str()), ("a", "d"));
    }

    #[test]
    fn test_odd_count_leaves_one_unpaired() {
        let guests: Vec<GuestRecord> = (0..5)
            .map(|i| create_guest(&format!("g{}", i), &["travel"], 30.0 + i as f64))
            .collect();
        let scorer = CompatibilityScorer::default();

        let sequential = guest_matching(&guests, &scorer).unwrap();
        assert_eq!(sequential.len(), 2);
        assert_valid_matching(&sequential, guests.len());

        let global = suggest_guest_pairings(&guests, &scorer).unwrap();
        assert_eq!(global.len(), 2);
        assert_valid_matching(&global, guests.len());
    }

    #[test]
    fn test_ties_resolved_by_input_order() {
        let guests: Vec<GuestRecord> = (0..4)
            .map(|i| create_guest(&format!("g{}", i), &["travel"], 30.0))
            .collect();
        let scorer = CompatibilityScorer::default();

        let global = suggest_guest_pairings(&guests, &scorer).unwrap();
        assert_eq!(global[0].guest_a.id, "g0");
        assert_eq!(global[0].guest_b.id, "g1");
        assert_eq!(global[1].guest_a.id, "g2");
        assert_eq!(global[1].guest_b.id, "g3");

        let sequential = guest_matching(&guests, &scorer).unwrap();
        assert_eq!(sequential, global);
    }

    #[test]
    fn test_top_pairings_ranked_and_capped() {
        let guests: Vec<GuestRecord> = (0..6)
            .map(|i| {
                let interests: &[&str] = if i % 2 == 0 { &["ai"] } else { &[] };
                create_guest(&format!("g{}", i), interests, 30.0)
            })
            .collect();

        let pairings = top_pairings(&guests, DEFAULT_TOP_PAIRINGS);

        assert_eq!(pairings.len(), 8);
        for window in pairings.windows(2) {
            assert!(window[0].score >= window[1].score);
        }
        // even-even pairs share "ai": 0.4 + 0.1 + 0.2
        assert_eq!(pairings[0].score, 0.7);
        assert_eq!(pairings[0].strength, MatchStrength::Good);
        assert_eq!(pairings[0].guest_a.id, "g0");
        assert_eq!(pairings[0].guest_b.id, "g2");
        assert!(pairings[0].icebreaker.contains("ai"));
    }

    #[test]
    fn test_icebreaker_text() {
        let mut a = create_guest("a", &[], 30.0);
        let mut b = create_guest("b", &[], 30.0);
        assert!(icebreaker(&a, &b, &[]).contains("general topics"));
        assert!(icebreaker(&a, &b, &[]).contains("mixed interaction styles"));

        a.personality = Some(Personality::Introvert);
        b.personality = Some(Personality::Introvert);
        let text = icebreaker(&a, &b, &["chess".to_string()]);
        assert!(text.contains("chess"));
        assert!(text.contains("both lean introvert"));
    }

    #[test]
    fn test_rank_matches() {
        let mut target = create_guest("t", &["food", "art"], 30.0);
        target.dietary_requirements = vec!["vegan".to_string()];
        let mut close = create_guest("close", &["food", "art"], 30.0);
        close.dietary_requirements = vec!["vegan".to_string()];
        let far = create_guest("far", &["golf"], 30.0);

        let guests = vec![far, target, close];
        let ranked = rank_matches("t", &guests, 10).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].guest.id, "close");
        assert_eq!(ranked[0].score, 100.0);
        assert_eq!(ranked[1].guest.id, "far");
        // diet 0, interests 0, accessibility equal
        assert_eq!(ranked[1].score, 20.0);

        assert_eq!(
            rank_matches("missing", &guests, 10),
            Err(InsightError::GuestNotFound("missing".to_string()))
        );
    }
}
