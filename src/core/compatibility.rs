use serde::{Deserialize, Serialize};

use crate::core::text::{clamp, overlap_ratio, shared_interests};
use crate::models::{GuestRecord, SimpleWeights};

/// Named compatibility formulas
///
/// - `Simple100`: shared interests, age, budget and style bonuses on a 0-100 scale
/// - `Fractional1`: capped interest term plus style, age and energy on a 0-1 scale
/// - `DietInterestAccess`: dietary overlap (40%), interest overlap (40%) and
///   accessibility equality (20%) on a 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStrategy {
    Simple100,
    Fractional1,
    DietInterestAccess,
}

/// Pairwise compatibility result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compatibility {
    pub score: f64,
    pub shared_interests: Vec<String>,
}

/// Strategy-selectable pairwise scorer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompatibilityScorer {
    strategy: ScoreStrategy,
    weights: SimpleWeights,
}

impl CompatibilityScorer {
    pub fn new(strategy: ScoreStrategy) -> Self {
        Self {
            strategy,
            weights: SimpleWeights::default(),
        }
    }

    /// Simple 0-100 scorer with custom weights
    pub fn simple(weights: SimpleWeights) -> Self {
        Self {
            strategy: ScoreStrategy::Simple100,
            weights,
        }
    }

    pub fn strategy(&self) -> ScoreStrategy {
        self.strategy
    }

    pub fn score(&self, a: &GuestRecord, b: &GuestRecord) -> Compatibility {
        let shared = shared_interests(&a.interests, &b.interests);

        let score = match self.strategy {
            ScoreStrategy::Simple100 => simple_score(a, b, shared.len(), &self.weights),
            ScoreStrategy::Fractional1 => fractional_score(a, b, shared.len()),
            ScoreStrategy::DietInterestAccess => diet_interest_access_score(a, b),
        };

        Compatibility {
            score,
            shared_interests: shared,
        }
    }
}

impl Default for CompatibilityScorer {
    fn default() -> Self {
        Self::new(ScoreStrategy::Simple100)
    }
}

/// Score two guests with one of the preset strategies
pub fn compatibility(a: &GuestRecord, b: &GuestRecord, strategy: ScoreStrategy) -> Compatibility {
    CompatibilityScorer::new(strategy).score(a, b)
}

fn simple_score(a: &GuestRecord, b: &GuestRecord, shared: usize, weights: &SimpleWeights) -> f64 {
    let mut score = shared as f64 * weights.shared_interest;

    if within(a.age, b.age, weights.age_window) {
        score += weights.age_bonus;
    }
    if within(a.budget, b.budget, weights.budget_window) {
        score += weights.budget_bonus;
    }
    if same_style(a, b) {
        score += weights.style_bonus;
    }

    clamp(score, 0.0, 100.0)
}

fn fractional_score(a: &GuestRecord, b: &GuestRecord, shared: usize) -> f64 {
    let mut score = (shared as f64 * 0.4).min(0.4);

    score += if same_style(a, b) { 0.2 } else { 0.1 };

    if within(a.age, b.age, 5.0) {
        score += 0.2;
    }
    if a.energy_level.is_some() && a.energy_level == b.energy_level {
        score += 0.2;
    }

    (clamp(score, 0.0, 1.0) * 100.0).round() / 100.0
}

fn diet_interest_access_score(a: &GuestRecord, b: &GuestRecord) -> f64 {
    let dietary = overlap_ratio(&a.dietary_requirements, &b.dietary_requirements);
    let interests = overlap_ratio(&a.interests, &b.interests);
    let access = if same_accessibility(a, b) { 1.0 } else { 0.0 };

    (dietary * 40.0 + interests * 40.0 + access * 20.0).round()
}

/// Human-readable reasons behind a dietary/interest/accessibility match
pub fn match_reasons(a: &GuestRecord, b: &GuestRecord) -> Vec<String> {
    let mut reasons = Vec::new();

    let shared = shared_interests(&a.interests, &b.interests);
    if !shared.is_empty() {
        reasons.push(format!("Shared interests: {}", shared.join(", ")));
    }

    if !a.dietary_requirements.is_empty()
        && !b.dietary_requirements.is_empty()
        && overlap_ratio(&a.dietary_requirements, &b.dietary_requirements) > 0.0
    {
        reasons.push("Similar dietary requirements".to_string());
    }

    let needs_access = a.wheelchair_accessible || a.mobility_assistance;
    if needs_access && same_accessibility(a, b) {
        reasons.push("Matching accessibility needs".to_string());
    }

    if reasons.is_empty() {
        reasons.push("General compatibility".to_string());
    }

    reasons
}

#[inline]
fn within(a: Option<f64>, b: Option<f64>, window: f64) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).abs() <= window,
        _ => false,
    }
}

#[inline]
fn same_style(a: &GuestRecord, b: &GuestRecord) -> bool {
    a.personality.is_some() && a.personality == b.personality
}

#[inline]
fn same_accessibility(a: &GuestRecord, b: &GuestRecord) -> bool {
    a.wheelchair_accessible == b.wheelchair_accessible
        && a.mobility_assistance == b.mobility_assistance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnergyLevel, Personality};

    fn create_guest(id: &str, interests: &[&str], age: Option<f64>) -> GuestRecord {
        GuestRecord {
            interests: interests.iter().map(|s| s.to_string()).collect(),
            age,
            ..GuestRecord::new(id, format!("Guest {}", id))
        }
    }

    #[test]
    fn test_simple_score() {
        let mut a = create_guest("a", &["hiking", "wine"], Some(30.0));
        let mut b = create_guest("b", &["wine", "hiking", "jazz"], Some(34.0));
        a.budget = Some(2000.0);
        b.budget = Some(6500.0);
        a.personality = Some(Personality::Extravert);
        b.personality = Some(Personality::Extravert);

        let result = compatibility(&a, &b, ScoreStrategy::Simple100);

        // 2 * 25 + 20 + 20 + 10
        assert_eq!(result.score, 100.0);
        assert_eq!(result.shared_interests, vec!["hiking", "wine"]);
    }

    #[test]
    fn test_simple_score_clamped() {
        let interests = ["a", "b", "c", "d", "e"];
        let a = create_guest("a", &interests, Some(30.0));
        let b = create_guest("b", &interests, Some(30.0));

        assert_eq!(compatibility(&a, &b, ScoreStrategy::Simple100).score, 100.0);
    }

    #[test]
    fn test_simple_score_missing_scalars_earn_nothing() {
        let a = create_guest("a", &["jazz"], None);
        let b = create_guest("b", &["jazz"], Some(30.0));

        assert_eq!(compatibility(&a, &b, ScoreStrategy::Simple100).score, 25.0);
    }

    #[test]
    fn test_custom_simple_weights() {
        let weights = SimpleWeights {
            shared_interest: 10.0,
            ..SimpleWeights::default()
        };
        let a = create_guest("a", &["jazz", "wine"], None);
        let b = create_guest("b", &["jazz", "wine"], None);

        assert_eq!(CompatibilityScorer::simple(weights).score(&a, &b).score, 20.0);
    }

    #[test]
    fn test_scorer_strategy_selection() {
        assert_eq!(CompatibilityScorer::default().strategy(), ScoreStrategy::Simple100);
        assert_eq!(
            CompatibilityScorer::simple(SimpleWeights::default()).strategy(),
            ScoreStrategy::Simple100
        );

        let scorer = CompatibilityScorer::new(ScoreStrategy::Fractional1);
        assert_eq!(scorer.strategy(), ScoreStrategy::Fractional1);

        let a = create_guest("a", &[], None);
        let b = create_guest("b", &[], None);
        assert_eq!(scorer.score(&a, &b).score, 0.1);
    }

    #[test]
    fn test_fractional_score() {
        let mut a = create_guest("a", &["AI", "chess"], Some(28.0));
        let mut b = create_guest("b", &["ai"], Some(31.0));
        a.energy_level = Some(EnergyLevel::High);
        b.energy_level = Some(EnergyLevel::High);

        // 0.4 (interest cap) + 0.1 (style differs) + 0.2 (age) + 0.2 (energy)
        let result = compatibility(&a, &b, ScoreStrategy::Fractional1);
        assert_eq!(result.score, 0.9);

        a.personality = Some(Personality::Introvert);
        b.personality = Some(Personality::Introvert);
        assert_eq!(compatibility(&a, &b, ScoreStrategy::Fractional1).score, 1.0);
    }

    #[test]
    fn test_fractional_score_floor() {
        let a = create_guest("a", &[], None);
        let b = create_guest("b", &[], None);

        assert_eq!(compatibility(&a, &b, ScoreStrategy::Fractional1).score, 0.1);
    }

    #[test]
    fn test_diet_interest_access_empty_lists_are_full_match() {
        let a = create_guest("a", &[], None);
        let b = create_guest("b", &[], None);

        assert_eq!(compatibility(&a, &b, ScoreStrategy::DietInterestAccess).score, 100.0);
    }

    #[test]
    fn test_diet_interest_access_partial() {
        let mut a = create_guest("a", &["museums", "food"], None);
        let mut b = create_guest("b", &["food", "surfing"], None);
        a.dietary_requirements = vec!["vegan".to_string()];
        b.dietary_requirements = vec!["halal".to_string()];
        b.wheelchair_accessible = true;

        // diet 0, interests 0.5 * 40, accessibility differs
        assert_eq!(compatibility(&a, &b, ScoreStrategy::DietInterestAccess).score, 20.0);
    }

    #[test]
    fn test_match_reasons() {
        let mut a = create_guest("a", &["food"], None);
        let mut b = create_guest("b", &["Food"], None);
        a.dietary_requirements = vec!["vegan".to_string()];
        b.dietary_requirements = vec!["Vegan".to_string()];
        a.wheelchair_accessible = true;
        b.wheelchair_accessible = true;

        let reasons = match_reasons(&a, &b);
        assert_eq!(
            reasons,
            vec![
                "Shared interests: food".to_string(),
                "Similar dietary requirements".to_string(),
                "Matching accessibility needs".to_string(),
            ]
        );

        let c = create_guest("c", &[], None);
        assert_eq!(match_reasons(&c, &c), vec!["General compatibility".to_string()]);
    }
}
