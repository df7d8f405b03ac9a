mod benefit;
mod claiming;
mod error;
mod market;
mod projection;
mod sequence;
mod strategy;
mod types;

pub use benefit::{
    adjust_pia_for_pre_claim, benefit_after_claim, delayed_retirement_credit_factor,
    drc_increase_from_ages, early_reduction_factor, early_reduction_from_ages, fra_years,
    full_retirement_age, monthly_benefit_at_claim, months_from_fra,
};
pub use claiming::claiming_schedule;
pub use error::{CalcResult, ValidationError};
pub use market::{RETURN_DATA, StressScenario, apply_stress, slice_returns};
pub use projection::{combine_household, project_claim, project_claimant, run_projection};
pub use sequence::{SequenceOrderCache, SpanKey, run_sequence_comparison, simulate_sequence};
pub use strategy::{
    break_even_age, compare_strategies, run_start_stop_start, simulate_single_claim,
    simulate_start_stop_start,
};
pub use types::{
    AgeBenefit, ClaimScenario, Claimant, ClaimantProjection, ClaimingMonth, ClaimingSchedule,
    FullRetirementAge, Projection, ProjectionInputs, ProjectionReport, ProjectionSet,
    ReturnTransform, ScheduleInputs, SequenceComparison, SequenceInputs, SequenceRow,
    SequenceScenario, StartStopStartInputs, StartStopStartResult, StrategyComparison,
    StressOverride, YearProjection, YearReturn,
};
