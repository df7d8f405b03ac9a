use serde::Serialize;

use super::market::StressScenario;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct FullRetirementAge {
    pub years: u32,
    pub months: u32,
}

impl FullRetirementAge {
    pub const fn new(years: u32, months: u32) -> Self {
        Self { years, months }
    }

    pub fn total_months(self) -> u32 {
        self.years * 12 + self.months
    }

    pub fn as_years(self) -> f64 {
        self.years as f64 + self.months as f64 / 12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartStopStartInputs {
    pub pia: f64,
    pub birth_year: u32,
    pub early_filing_age: u32,
    pub suspension_age: u32,
    pub restart_age: u32,
    pub cola_rate: f64,
    pub longevity_age: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBenefit {
    pub age: u32,
    pub monthly_benefit: f64,
    pub annual_benefit: f64,
    pub cumulative_total: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartStopStartResult {
    pub early_reduction: f64,
    pub drc_increase: f64,
    pub final_percentage: f64,
    pub adjusted_pia_at_restart: f64,
    pub early_benefit: f64,
    pub restart_benefit: f64,
    pub total_early_period: f64,
    pub total_suspension_period: f64,
    pub total_restart_period: f64,
    pub lifetime_total: f64,
    pub timeline: Vec<AgeBenefit>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimScenario {
    pub claim_age: u32,
    pub monthly_benefit: f64,
    pub lifetime_total: f64,
    pub timeline: Vec<AgeBenefit>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComparison {
    pub fra: FullRetirementAge,
    pub fra_years: f64,
    pub start_stop_start: StartStopStartResult,
    pub wait_until_70: ClaimScenario,
    pub file_at_62: ClaimScenario,
    pub monthly_advantage: f64,
    pub break_even_age: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleInputs {
    pub pia: f64,
    pub birth_year: u32,
    pub cola_rate: f64,
    pub horizon_age: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimingMonth {
    pub years: u32,
    pub months: u32,
    pub monthly_benefit: f64,
    pub monthly_gain: f64,
    pub cumulative_gain: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimingSchedule {
    pub fra: FullRetirementAge,
    pub fra_months_from_62: u32,
    pub horizon_age: u32,
    pub months: Vec<ClaimingMonth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearReturn {
    pub year: u32,
    #[serde(rename = "return")]
    pub annual_return: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReturnTransform {
    /// Historical returns as they happened.
    Identity,
    /// Losses credited as 0%, gains halved.
    CollarHalveGains,
    /// Losses floored at -10%, gains discounted by a quarter.
    FloorLossDiscountGains,
}

impl ReturnTransform {
    pub fn apply(self, raw: f64) -> f64 {
        match self {
            ReturnTransform::Identity => raw,
            ReturnTransform::CollarHalveGains => {
                if raw < 0.0 {
                    0.0
                } else {
                    raw * 0.5
                }
            }
            ReturnTransform::FloorLossDiscountGains => {
                if raw < -0.10 {
                    -0.10
                } else if raw > 0.0 {
                    raw * 0.75
                } else {
                    raw
                }
            }
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StressOverride {
    pub scenario: StressScenario,
    pub target_year: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceInputs {
    pub initial_balance: f64,
    pub withdrawal_rate: f64,
    pub start_year: u32,
    pub end_year: u32,
    pub stress: Option<StressOverride>,
}

impl SequenceInputs {
    pub fn annual_withdrawal(&self) -> f64 {
        self.initial_balance * self.withdrawal_rate / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceRow {
    pub year: u32,
    pub raw_return: f64,
    pub applied_return: f64,
    pub beginning: f64,
    pub growth: f64,
    pub withdrawal: f64,
    pub ending: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceScenario {
    pub rows: Vec<SequenceRow>,
    pub ending_balance: f64,
    pub total_withdrawn: f64,
}

impl SequenceScenario {
    pub fn balance_series(&self, initial_balance: f64) -> Vec<f64> {
        std::iter::once(initial_balance)
            .chain(self.rows.iter().map(|row| row.ending))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceComparison {
    pub annual_withdrawal: f64,
    pub ordered_returns: Vec<YearReturn>,
    pub historical: SequenceScenario,
    pub strategy_one: SequenceScenario,
    pub strategy_two: SequenceScenario,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Claimant {
    pub pia: f64,
    pub birth_year: u32,
    pub preferred_years: u32,
    pub preferred_months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionInputs {
    pub primary: Claimant,
    pub spouse: Option<Claimant>,
    pub cola_rate: f64,
    /// First calendar year in which only the larger of the two benefits is paid.
    pub death_year: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProjection {
    pub year: u32,
    pub monthly_benefit: f64,
    pub cumulative_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub rows: Vec<YearProjection>,
    pub lifetime_total: f64,
}

impl Projection {
    pub fn from_rows(rows: Vec<YearProjection>) -> Self {
        let lifetime_total = rows.last().map_or(0.0, |row| row.cumulative_total);
        Self {
            rows,
            lifetime_total,
        }
    }

    pub fn monthly_in(&self, year: u32) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.year == year)
            .map(|row| row.monthly_benefit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSet {
    pub age_62: Projection,
    pub preferred: Projection,
    pub age_70: Projection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimantProjection {
    pub birth_year: u32,
    pub fra: FullRetirementAge,
    pub preferred_claim_age: f64,
    pub monthly_at_preferred_claim: f64,
    pub projections: ProjectionSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionReport {
    pub primary: ClaimantProjection,
    pub spouse: Option<ClaimantProjection>,
    pub household: Option<ProjectionSet>,
}
