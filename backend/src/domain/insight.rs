//! Industry insight aggregate.
//!
//! An insight is a per-industry market snapshot generated once from a text
//! completion and then served as-is; nothing in this service updates or
//! expires an existing record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Industry;

/// One salary band reported for a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRange {
    pub role: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub location: String,
}

/// Hiring-demand classification for an industry.
///
/// Values are stored and transported upper-cased. Strings the model invents
/// beyond the documented set are preserved rather than rejected; only casing
/// is normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemandLevel {
    High,
    Medium,
    Low,
    Other(String),
}

impl DemandLevel {
    /// Upper-case and classify a raw model or storage value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.to_uppercase().as_str() {
            "HIGH" => Self::High,
            "MEDIUM" => Self::Medium,
            "LOW" => Self::Low,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Canonical upper-case representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl Default for DemandLevel {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market-outlook classification for an industry.
///
/// Same normalization contract as [`DemandLevel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketOutlook {
    Positive,
    Neutral,
    Negative,
    Other(String),
}

impl MarketOutlook {
    /// Upper-case and classify a raw model or storage value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.to_uppercase().as_str() {
            "POSITIVE" => Self::Positive,
            "NEUTRAL" => Self::Neutral,
            "NEGATIVE" => Self::Negative,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Canonical upper-case representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Neutral => "NEUTRAL",
            Self::Negative => "NEGATIVE",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl Default for MarketOutlook {
    fn default() -> Self {
        Self::Neutral
    }
}

impl fmt::Display for MarketOutlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cached market analysis for one industry.
///
/// ## Invariants
/// - `next_update` is creation time plus the refresh window; nothing here
///   reads it back, it exists for a future scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryInsight {
    pub industry: Industry,
    pub salary_ranges: Vec<SalaryRange>,
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub top_skills: Vec<String>,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub market_outlook: MarketOutlook,
    pub next_update: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("high", DemandLevel::High)]
    #[case("High", DemandLevel::High)]
    #[case("HIGH", DemandLevel::High)]
    #[case("medium", DemandLevel::Medium)]
    #[case("low", DemandLevel::Low)]
    fn demand_level_parse_normalizes_casing(#[case] raw: &str, #[case] expected: DemandLevel) {
        assert_eq!(DemandLevel::parse(raw), expected);
    }

    #[test]
    fn demand_level_preserves_unrecognized_values_upper_cased() {
        let level = DemandLevel::parse("explosive");
        assert_eq!(level, DemandLevel::Other("EXPLOSIVE".to_owned()));
        assert_eq!(level.as_str(), "EXPLOSIVE");
    }

    #[test]
    fn demand_level_defaults_to_medium() {
        assert_eq!(DemandLevel::default(), DemandLevel::Medium);
    }

    #[rstest]
    #[case("positive", MarketOutlook::Positive)]
    #[case("Neutral", MarketOutlook::Neutral)]
    #[case("NEGATIVE", MarketOutlook::Negative)]
    fn market_outlook_parse_normalizes_casing(#[case] raw: &str, #[case] expected: MarketOutlook) {
        assert_eq!(MarketOutlook::parse(raw), expected);
    }

    #[test]
    fn market_outlook_defaults_to_neutral() {
        assert_eq!(MarketOutlook::default(), MarketOutlook::Neutral);
    }

    #[test]
    fn enum_display_matches_wire_format() {
        assert_eq!(DemandLevel::High.to_string(), "HIGH");
        assert_eq!(MarketOutlook::Negative.to_string(), "NEGATIVE");
    }
}
