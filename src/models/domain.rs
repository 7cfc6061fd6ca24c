use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Guest record as supplied by the caller
///
/// Only the attributes consumed by the insight engine are modelled; anything
/// else in the payload is ignored. Missing lists deserialize as empty, missing
/// scalars as `None`, and unrecognised enum text as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuestRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "dietaryRequirements", default)]
    pub dietary_requirements: Vec<String>,
    #[serde(
        rename = "preferredInteraction",
        alias = "personalityType",
        default,
        deserialize_with = "lenient"
    )]
    pub personality: Option<Personality>,
    #[serde(rename = "energyLevel", default, deserialize_with = "lenient")]
    pub energy_level: Option<EnergyLevel>,
    #[serde(rename = "isFirstTime", alias = "firstTimeEvent", default)]
    pub is_first_time: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "wheelchairAccessible", default)]
    pub wheelchair_accessible: bool,
    #[serde(rename = "mobilityAssistance", default)]
    pub mobility_assistance: bool,
}

impl GuestRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parsed status, matched case-insensitively
    pub fn status(&self) -> Option<GuestStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn is_declined(&self) -> bool {
        self.status() == Some(GuestStatus::Declined)
    }

    pub fn is_low_energy(&self) -> bool {
        self.energy_level == Some(EnergyLevel::Low)
    }

    /// Feedback text if present and not blank
    pub fn feedback_text(&self) -> Option<&str> {
        self.feedback
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Timestamp of the guest's latest activity, falling back to `fallback`
    pub fn activity_time(&self, fallback: DateTime<Utc>) -> DateTime<Utc> {
        self.updated_at.or(self.created_at).unwrap_or(fallback)
    }

    pub fn guest_ref(&self) -> GuestRef {
        GuestRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Lightweight id/name pair used in report sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRef {
    pub id: String,
    pub name: String,
}

/// Preferred interaction style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    Introvert,
    Extravert,
    Ambivert,
}

impl Personality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::Introvert => "introvert",
            Personality::Extravert => "extravert",
            Personality::Ambivert => "ambivert",
        }
    }
}

impl FromStr for Personality {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "introvert" => Ok(Personality::Introvert),
            "extravert" | "extrovert" => Ok(Personality::Extravert),
            "ambivert" | "balanced" => Ok(Personality::Ambivert),
            other => Err(ParseEnumError::new("personality", other)),
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl FromStr for EnergyLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(EnergyLevel::Low),
            "medium" => Ok(EnergyLevel::Medium),
            "high" => Ok(EnergyLevel::High),
            other => Err(ParseEnumError::new("energy level", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestStatus {
    Invited,
    Pending,
    Confirmed,
    Declined,
    Attended,
}

impl FromStr for GuestStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "invited" => Ok(GuestStatus::Invited),
            "pending" => Ok(GuestStatus::Pending),
            "confirmed" => Ok(GuestStatus::Confirmed),
            "declined" => Ok(GuestStatus::Declined),
            "attended" => Ok(GuestStatus::Attended),
            other => Err(ParseEnumError::new("status", other)),
        }
    }
}

/// Availability slot used when picking a session time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    /// Tie-break priority, highest first
    pub const PRIORITY: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    /// Detect the slot mentioned in free-text availability ("weekday evenings")
    pub fn detect(text: &str) -> Option<Self> {
        let lowered = text.to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|slot| lowered.contains(slot.as_str()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        }
    }
}

/// Unrecognised enum text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Deserialize optional enum text, mapping unknown values to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Weights of the simple 0-100 compatibility strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleWeights {
    pub shared_interest: f64,
    pub age_bonus: f64,
    pub age_window: f64,
    pub budget_bonus: f64,
    pub budget_window: f64,
    pub style_bonus: f64,
}

impl Default for SimpleWeights {
    fn default() -> Self {
        Self {
            shared_interest: 25.0,
            age_bonus: 20.0,
            age_window: 5.0,
            budget_bonus: 20.0,
            budget_window: 5000.0,
            style_bonus: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personality_aliases() {
        let guest: GuestRecord = serde_json::from_value(serde_json::json!({
            "id": "g1",
            "personalityType": "Extrovert"
        }))
        .unwrap();
        assert_eq!(guest.personality, Some(Personality::Extravert));

        let guest: GuestRecord = serde_json::from_value(serde_json::json!({
            "_id": "g2",
            "preferredInteraction": "balanced"
        }))
        .unwrap();
        assert_eq!(guest.id, "g2");
        assert_eq!(guest.personality, Some(Personality::Ambivert));
    }

    #[test]
    fn test_missing_fields_default() {
        let guest: GuestRecord = serde_json::from_value(serde_json::json!({ "id": "g1" })).unwrap();
        assert!(guest.interests.is_empty());
        assert!(guest.dietary_requirements.is_empty());
        assert_eq!(guest.energy_level, None);
        assert!(!guest.is_first_time);
    }

    #[test]
    fn test_unknown_enum_text_is_absent() {
        let guest: GuestRecord = serde_json::from_value(serde_json::json!({
            "id": "g1",
            "energyLevel": "sleepy",
            "firstTimeEvent": true
        }))
        .unwrap();
        assert_eq!(guest.energy_level, None);
        assert!(guest.is_first_time);
    }

    #[test]
    fn test_status_case_insensitive() {
        let mut guest = GuestRecord::new("g1", "Ana");
        guest.status = Some("DECLINED".to_string());
        assert!(guest.is_declined());

        guest.status = Some("maybe".to_string());
        assert_eq!(guest.status(), None);
    }

    #[test]
    fn test_time_slot_detect() {
        assert_eq!(TimeSlot::detect("Weekday Evenings"), Some(TimeSlot::Evening));
        assert_eq!(TimeSlot::detect("morning"), Some(TimeSlot::Morning));
        assert_eq!(TimeSlot::detect("anytime"), None);
    }
}
