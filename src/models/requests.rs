use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::GuestRecord;

/// Request carrying a guest list to analyse
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GuestListRequest {
    #[validate(length(max = 1000), custom(function = "validate_guest_ids"))]
    #[serde(default)]
    pub guests: Vec<GuestRecord>,
}

/// Energy trend request; the caller keeps the previous group energy
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EnergyTrendRequest {
    #[validate(length(max = 1000), custom(function = "validate_guest_ids"))]
    #[serde(default)]
    pub guests: Vec<GuestRecord>,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(alias = "previous_energy", rename = "previousEnergy", default)]
    pub previous_energy: Option<f64>,
}

/// Rank every other guest against one target guest
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRankRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "target_id", rename = "targetId")]
    pub target_id: String,
    #[validate(length(max = 1000), custom(function = "validate_guest_ids"))]
    #[serde(default)]
    pub guests: Vec<GuestRecord>,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

fn validate_guest_ids(guests: &Vec<GuestRecord>) -> Result<(), ValidationError> {
    if guests.iter().any(|guest| guest.id.trim().is_empty()) {
        return Err(ValidationError::new("empty_guest_id"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_guest_id_rejected() {
        let req = GuestListRequest {
            guests: vec![GuestRecord::new(" ", "Nameless")],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_previous_energy_range() {
        let req = EnergyTrendRequest {
            guests: vec![],
            previous_energy: Some(140.0),
        };
        assert!(req.validate().is_err());

        let req = EnergyTrendRequest {
            guests: vec![],
            previous_energy: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_match_rank_defaults() {
        let req: MatchRankRequest =
            serde_json::from_value(serde_json::json!({ "targetId": "g1", "guests": [] })).unwrap();
        assert_eq!(req.limit, 10);
        assert!(req.validate().is_ok());
    }
}
