//! Insight generation from a text-completion model.
//!
//! Owns the prompt template, code-fence stripping, JSON parsing, and the
//! defensive normalization of whatever the model returns. Transport lives
//! behind the [`CompletionModel`] port so tests substitute canned text.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::domain::ports::{CompletionModel, CompletionModelError};
use crate::domain::{DemandLevel, Industry, MarketOutlook, SalaryRange};

/// Normalized payload produced from one completion.
///
/// Carries everything except the refresh timestamp, which the caller stamps
/// at persistence time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsightPayload {
    pub salary_ranges: Vec<SalaryRange>,
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub top_skills: Vec<String>,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub market_outlook: MarketOutlook,
}

/// Errors surfaced while generating an insight payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsightGenerationError {
    /// The completion request itself failed.
    #[error(transparent)]
    Model(#[from] CompletionModelError),
    /// The completion text is not valid JSON even after fence stripping.
    ///
    /// Terminal: the offending text is logged for diagnosis, never retried.
    #[error("completion output is not valid JSON: {message}")]
    InvalidResponse { message: String },
}

impl InsightGenerationError {
    fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

/// Build the fixed instruction asking the model for a strict-JSON analysis.
fn industry_prompt(industry: &Industry) -> String {
    format!(
        r#"Analyze the current state of the {industry} industry and provide insights in ONLY the following JSON format without any additional notes or explanations:
{{
  "salaryRanges": [
    {{ "role": "string", "min": number, "max": number, "median": number, "location": "string" }}
  ],
  "growthRate": number,
  "demandLevel": "HIGH" | "MEDIUM" | "LOW",
  "topSkills": ["skill1", "skill2"],
  "marketOutlook": "POSITIVE" | "NEUTRAL" | "NEGATIVE",
  "keyTrends": ["trend1", "trend2"],
  "recommendedSkills": ["skill1", "skill2"]
}}

IMPORTANT: Return ONLY the JSON. No markdown, explanations, or extra text.
Include at least 5 roles, 5 skills, and 5 trends."#
    )
}

/// Drop markdown code-fence markers a model may wrap around JSON output
/// despite instructions not to.
fn strip_code_fences(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Lenient mirror of the documented completion schema.
///
/// Every field is optional so partial responses survive parsing; defaults are
/// applied in [`normalize`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInsight {
    #[serde(default)]
    salary_ranges: Vec<RawSalaryRange>,
    #[serde(default)]
    growth_rate: Option<Value>,
    #[serde(default)]
    demand_level: Option<String>,
    #[serde(default)]
    top_skills: Vec<String>,
    #[serde(default)]
    market_outlook: Option<String>,
    #[serde(default)]
    key_trends: Vec<String>,
    #[serde(default)]
    recommended_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSalaryRange {
    #[serde(default)]
    role: String,
    #[serde(default)]
    min: Option<Value>,
    #[serde(default)]
    max: Option<Value>,
    #[serde(default)]
    median: Option<Value>,
    #[serde(default)]
    location: String,
}

/// Coerce a JSON number or numeric string to `f64`, defaulting to 0.
fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(raw)) => raw.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn normalize(raw: RawInsight) -> InsightPayload {
    InsightPayload {
        salary_ranges: raw
            .salary_ranges
            .into_iter()
            .map(|range| SalaryRange {
                role: range.role,
                min: coerce_number(range.min.as_ref()),
                max: coerce_number(range.max.as_ref()),
                median: coerce_number(range.median.as_ref()),
                location: range.location,
            })
            .collect(),
        growth_rate: coerce_number(raw.growth_rate.as_ref()),
        demand_level: raw
            .demand_level
            .as_deref()
            .map(DemandLevel::parse)
            .unwrap_or_default(),
        top_skills: raw.top_skills,
        key_trends: raw.key_trends,
        recommended_skills: raw.recommended_skills,
        market_outlook: raw
            .market_outlook
            .as_deref()
            .map(MarketOutlook::parse)
            .unwrap_or_default(),
    }
}

/// Parse one completion into a normalized payload.
fn parse_completion(text: &str) -> Result<InsightPayload, InsightGenerationError> {
    let cleaned = strip_code_fences(text);
    let raw: RawInsight = serde_json::from_str(cleaned).map_err(|err| {
        error!(completion = %text, "completion output failed to parse as JSON");
        InsightGenerationError::invalid_response(err.to_string())
    })?;
    Ok(normalize(raw))
}

/// Generates normalized insight payloads for an industry.
#[derive(Clone)]
pub struct InsightGenerator {
    model: Arc<dyn CompletionModel>,
}

impl InsightGenerator {
    /// Create a generator over the given completion model.
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    /// Produce a normalized payload for `industry`.
    ///
    /// # Errors
    ///
    /// Propagates completion failures unmodified and raises
    /// [`InsightGenerationError::InvalidResponse`] when the completion text
    /// does not parse as JSON. No retries at this layer.
    pub async fn generate(
        &self,
        industry: &Industry,
    ) -> Result<InsightPayload, InsightGenerationError> {
        let prompt = industry_prompt(industry);
        let text = self.model.complete(&prompt).await?;
        parse_completion(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockCompletionModel;
    use rstest::rstest;

    fn industry() -> Industry {
        Industry::new("finance").expect("industry")
    }

    #[test]
    fn prompt_names_the_industry_and_forbids_markdown() {
        let prompt = industry_prompt(&industry());
        assert!(prompt.contains("the finance industry"));
        assert!(prompt.contains("Return ONLY the JSON"));
        assert!(prompt.contains("at least 5 roles, 5 skills, and 5 trends"));
    }

    #[rstest]
    #[case("{\"growthRate\": 1}")]
    #[case("```json\n{\"growthRate\": 1}\n```")]
    #[case("```\n{\"growthRate\": 1}\n```")]
    #[case("  \n```json\n{\"growthRate\": 1}\n```\n  ")]
    fn fenced_variants_parse(#[case] text: &str) {
        let payload = parse_completion(text).expect("fenced JSON parses");
        assert!((payload.growth_rate - 1.0).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case("this is prose, not JSON")]
    #[case("```json\n{not json}\n```")]
    #[case("")]
    fn invalid_json_raises_invalid_response(#[case] text: &str) {
        let error = parse_completion(text).expect_err("invalid JSON");
        assert!(matches!(
            error,
            InsightGenerationError::InvalidResponse { .. }
        ));
    }

    #[test]
    fn missing_array_fields_default_to_empty() {
        let payload = parse_completion("{}").expect("empty object parses");
        assert!(payload.salary_ranges.is_empty());
        assert!(payload.top_skills.is_empty());
        assert!(payload.key_trends.is_empty());
        assert!(payload.recommended_skills.is_empty());
    }

    #[test]
    fn missing_enums_default_to_medium_and_neutral() {
        let payload = parse_completion("{}").expect("empty object parses");
        assert_eq!(payload.demand_level, DemandLevel::Medium);
        assert_eq!(payload.market_outlook, MarketOutlook::Neutral);
    }

    #[rstest]
    #[case("{\"demandLevel\": \"high\"}", DemandLevel::High)]
    #[case("{\"demandLevel\": \"High\"}", DemandLevel::High)]
    #[case("{\"demandLevel\": \"HIGH\"}", DemandLevel::High)]
    fn demand_level_casing_is_normalized(#[case] text: &str, #[case] expected: DemandLevel) {
        let payload = parse_completion(text).expect("parses");
        assert_eq!(payload.demand_level, expected);
    }

    #[test]
    fn unexpected_enum_values_pass_through_upper_cased() {
        let payload = parse_completion("{\"marketOutlook\": \"cautious\"}").expect("parses");
        assert_eq!(
            payload.market_outlook,
            MarketOutlook::Other("CAUTIOUS".to_owned())
        );
    }

    #[rstest]
    #[case("{\"growthRate\": 12.5}", 12.5)]
    #[case("{\"growthRate\": \"12.5\"}", 12.5)]
    #[case("{\"growthRate\": \"not a number\"}", 0.0)]
    #[case("{\"growthRate\": null}", 0.0)]
    #[case("{\"growthRate\": [1]}", 0.0)]
    fn growth_rate_coercion(#[case] text: &str, #[case] expected: f64) {
        let payload = parse_completion(text).expect("parses");
        assert!((payload.growth_rate - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn salary_numbers_accept_numeric_strings() {
        let text = r#"{
            "salaryRanges": [
                { "role": "Analyst", "min": "60000", "max": 120000, "location": "NYC" }
            ]
        }"#;
        let payload = parse_completion(text).expect("parses");
        let range = payload.salary_ranges.first().expect("one range");
        assert!((range.min - 60_000.0).abs() < f64::EPSILON);
        assert!((range.max - 120_000.0).abs() < f64::EPSILON);
        assert!((range.median - 0.0).abs() < f64::EPSILON);
        assert_eq!(range.role, "Analyst");
    }

    #[tokio::test]
    async fn generate_normalizes_fenced_completion() {
        let mut model = MockCompletionModel::new();
        model.expect_complete().times(1).returning(|_| {
            Ok("```json\n{\"demandLevel\": \"low\", \"growthRate\": \"3.2\"}\n```".to_owned())
        });

        let generator = InsightGenerator::new(Arc::new(model));
        let payload = generator
            .generate(&industry())
            .await
            .expect("generated payload");
        assert_eq!(payload.demand_level, DemandLevel::Low);
        assert!((payload.growth_rate - 3.2).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn generate_propagates_model_failures() {
        let mut model = MockCompletionModel::new();
        model
            .expect_complete()
            .times(1)
            .returning(|_| Err(CompletionModelError::rate_limited("quota")));

        let generator = InsightGenerator::new(Arc::new(model));
        let error = generator
            .generate(&industry())
            .await
            .expect_err("model failure");
        assert!(matches!(
            error,
            InsightGenerationError::Model(CompletionModelError::RateLimited { .. })
        ));
    }
}
