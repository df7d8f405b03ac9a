mod taxable_max;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use taxable_max::{cap_earnings, taxable_maximum};

const RECENT_YEARS_KEPT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarningsEntry {
    pub year: u32,
    pub earnings: f64,
    #[serde(default)]
    pub is_projected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiaRequest {
    pub birth_year: u32,
    pub earnings_history: Vec<EarningsEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendPointBrackets {
    pub first_bracket: f64,
    pub second_bracket: f64,
    pub third_bracket: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiaResponse {
    pub aime: f64,
    pub pia: f64,
    pub pia_year: u32,
    pub years_of_zero_in_top_35: u32,
    #[serde(default)]
    pub top_35_years: Vec<serde_json::Value>,
    pub calculation_details: BendPointBrackets,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub age: f64,
    pub monthly_benefit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyOption {
    #[serde(default)]
    pub strategy: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub claiming_age: f64,
    #[serde(default)]
    pub initial_monthly: Option<f64>,
    pub lifetime_total: f64,
    #[serde(default)]
    pub benefit_timeline: Vec<TimelinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalStrategyResponse {
    #[serde(default)]
    pub optimal_strategy: Option<StrategyOption>,
    #[serde(default)]
    pub all_strategies: Vec<StrategyOption>,
}

impl OptimalStrategyResponse {
    pub fn best(&self) -> Option<&StrategyOption> {
        self.optimal_strategy.as_ref().or_else(|| {
            self.all_strategies
                .iter()
                .max_by(|a, b| a.lifetime_total.total_cmp(&b.lifetime_total))
        })
    }
}

pub fn pia_request(birth_year: u32, history: &[EarningsEntry], current_year: u32) -> PiaRequest {
    let recent_from = current_year.saturating_sub(RECENT_YEARS_KEPT);
    let earnings_history = history
        .iter()
        .filter(|entry| entry.earnings > 0.0 || entry.year >= recent_from)
        .map(|entry| EarningsEntry {
            year: entry.year,
            earnings: cap_earnings(entry.year, entry.earnings),
            is_projected: entry.is_projected,
        })
        .collect::<Vec<_>>();
    log::debug!(
        "PIA request for {birth_year}: {} of {} earnings rows",
        earnings_history.len(),
        history.len()
    );
    PiaRequest {
        birth_year,
        earnings_history,
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("The calculation server could not be reached. Please try again shortly.")]
    Unreachable,

    #[error("The server rejected the inputs: {}", .messages.join(", "))]
    Validation { messages: Vec<String> },

    #[error("Unexpected server error ({status}): {body}")]
    Server { status: u16, body: String },
}

/// Maps a failed round trip to a user-facing error. `status` is `None` when
/// no response arrived at all.
pub fn classify_failure(status: Option<u16>, body: &str) -> BackendError {
    let Some(status) = status else {
        return BackendError::Unreachable;
    };
    if (400..500).contains(&status) {
        if let Some(messages) = detail_messages(body) {
            return BackendError::Validation { messages };
        }
    }
    BackendError::Server {
        status,
        body: body.trim().to_string(),
    }
}

fn detail_messages(body: &str) -> Option<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(msg) => Some(vec![msg.clone()]),
        serde_json::Value::Array(entries) => Some(
            entries
                .iter()
                .map(|entry| match entry.get("msg").and_then(|m| m.as_str()) {
                    Some(msg) => msg.to_string(),
                    None => entry.to_string(),
                })
                .collect(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(year: u32, earnings: f64) -> EarningsEntry {
        EarningsEntry {
            year,
            earnings,
            is_projected: false,
        }
    }

    #[test]
    fn pia_request_caps_and_filters_earnings() {
        let history = [
            entry(1990, 0.0),
            entry(2000, 90_000.0),
            entry(2020, 40_000.0),
            entry(2022, 0.0),
            entry(2026, 0.0),
        ];
        let request = pia_request(1965, &history, 2026);
        assert_eq!(request.birth_year, 1965);
        let years: Vec<u32> = request.earnings_history.iter().map(|e| e.year).collect();
        assert_eq!(years, vec![2000, 2020, 2022, 2026]);
        assert_eq!(request.earnings_history[0].earnings, 76_200.0);
        assert_eq!(request.earnings_history[1].earnings, 40_000.0);
    }

    #[test]
    fn pia_request_serializes_snake_case() {
        let request = pia_request(1960, &[entry(2020, 1_000.0)], 2020);
        let json = serde_json::to_value(&request).expect("serializable");
        assert_eq!(json["birth_year"], 1960);
        assert_eq!(json["earnings_history"][0]["is_projected"], false);
    }

    #[test]
    fn pia_response_parses_backend_payload() {
        let body = r#"{
          "aime": 6123.0,
          "pia": 2890.5,
          "pia_year": 2027,
          "years_of_zero_in_top_35": 2,
          "top_35_years": [{"year": 2019, "indexed_earnings": 100000}],
          "calculation_details": {"first_bracket": 1074.6, "second_bracket": 1500.2, "third_bracket": 315.7}
        }"#;
        let response: PiaResponse = serde_json::from_str(body).expect("valid payload");
        assert_eq!(response.pia_year, 2027);
        assert_eq!(response.years_of_zero_in_top_35, 2);
        assert_eq!(response.top_35_years.len(), 1);
        assert_eq!(response.calculation_details.first_bracket, 1074.6);
    }

    #[test]
    fn strategy_response_falls_back_to_highest_total() {
        let body = r#"{
          "all_strategies": [
            {"strategy": "Own benefit at 62", "type": "own", "claiming_age": 62, "lifetime_total": 500000,
             "benefit_timeline": [{"age": 62, "monthly_benefit": 1500}]},
            {"strategy": "Own benefit at 70", "type": "own", "claiming_age": 70, "lifetime_total": 610000}
          ]
        }"#;
        let response: OptimalStrategyResponse = serde_json::from_str(body).expect("valid payload");
        assert!(response.optimal_strategy.is_none());
        let best = response.best().expect("strategies present");
        assert_eq!(best.claiming_age, 70.0);
        assert_eq!(response.all_strategies[0].benefit_timeline.len(), 1);
        assert_eq!(response.all_strategies[0].kind, "own");
    }

    #[test]
    fn missing_response_is_unreachable() {
        assert_eq!(classify_failure(None, ""), BackendError::Unreachable);
    }

    #[test]
    fn validation_detail_list_is_joined() {
        let body = r#"{"detail": [{"loc": ["body", "own_pia"], "msg": "field required"},
                                  {"loc": ["body", "birth_date"], "msg": "invalid date"}]}"#;
        let err = classify_failure(Some(422), body);
        assert_eq!(
            err,
            BackendError::Validation {
                messages: vec!["field required".to_string(), "invalid date".to_string()]
            }
        );
        assert_eq!(
            err.to_string(),
            "The server rejected the inputs: field required, invalid date"
        );
    }

    #[test]
    fn validation_detail_string_is_kept() {
        let err = classify_failure(Some(400), r#"{"detail": "XML upload failed"}"#);
        assert_eq!(
            err,
            BackendError::Validation {
                messages: vec!["XML upload failed".to_string()]
            }
        );
    }

    #[test]
    fn other_failures_are_server_errors() {
        assert_eq!(
            classify_failure(Some(500), "Internal Server Error\n"),
            BackendError::Server {
                status: 500,
                body: "Internal Server Error".to_string()
            }
        );
        assert!(matches!(
            classify_failure(Some(404), "not json"),
            BackendError::Server { status: 404, .. }
        ));
    }
}
