use super::benefit::{
    EARLIEST_CLAIM_AGE, MAX_CREDIT_AGE, MAX_PLANNING_AGE, drc_increase_from_ages,
    early_reduction_from_ages, full_retirement_age,
};
use super::error::{CalcResult, ValidationError};
use super::types::{ClaimingMonth, ClaimingSchedule, ScheduleInputs};

const SCHEDULE_MONTHS: u32 = (MAX_CREDIT_AGE as u32 - EARLIEST_CLAIM_AGE) * 12;

pub fn claiming_schedule(inputs: &ScheduleInputs) -> CalcResult<ClaimingSchedule> {
    validate_inputs(inputs)?;

    let fra = full_retirement_age(inputs.birth_year);
    let fra_years = fra.as_years();
    let benefits: Vec<f64> = (0..=SCHEDULE_MONTHS)
        .map(|month| benefit_for_month(inputs, fra_years, month))
        .collect();
    let base = benefits[0];

    let months = benefits
        .iter()
        .enumerate()
        .map(|(idx, &monthly_benefit)| {
            let month = idx as u32;
            let years = EARLIEST_CLAIM_AGE + month / 12;
            let months = month % 12;
            let monthly_gain = benefits
                .get(idx + 1)
                .map_or(0.0, |next| next - monthly_benefit);
            let remaining_months =
                (inputs.horizon_age as i64 * 12 - (years as i64 * 12 + months as i64)).max(0);
            ClaimingMonth {
                years,
                months,
                monthly_benefit,
                monthly_gain,
                cumulative_gain: (monthly_benefit - base) * remaining_months as f64,
            }
        })
        .collect();

    Ok(ClaimingSchedule {
        fra,
        fra_months_from_62: fra.total_months().saturating_sub(EARLIEST_CLAIM_AGE * 12),
        horizon_age: inputs.horizon_age,
        months,
    })
}

fn validate_inputs(inputs: &ScheduleInputs) -> CalcResult<()> {
    if !(1937..=2010).contains(&inputs.birth_year) {
        return Err(ValidationError::BirthYear(inputs.birth_year));
    }
    if !inputs.pia.is_finite() || inputs.pia < 0.0 {
        return Err(ValidationError::Pia(inputs.pia));
    }
    if !inputs.cola_rate.is_finite() || inputs.cola_rate <= -1.0 {
        return Err(ValidationError::ColaRate(inputs.cola_rate));
    }
    let required = MAX_CREDIT_AGE as u32;
    if inputs.horizon_age < required {
        return Err(ValidationError::Longevity {
            longevity: inputs.horizon_age,
            required,
        });
    }
    if inputs.horizon_age > MAX_PLANNING_AGE {
        return Err(ValidationError::AgeLimit {
            age: inputs.horizon_age,
            max: MAX_PLANNING_AGE,
        });
    }
    Ok(())
}

fn benefit_for_month(inputs: &ScheduleInputs, fra_years: f64, month: u32) -> f64 {
    let elapsed_years = month as f64 / 12.0;
    let claim_age = EARLIEST_CLAIM_AGE as f64 + elapsed_years;
    let percentage = early_reduction_from_ages(claim_age, fra_years)
        + drc_increase_from_ages(claim_age, fra_years);
    let inflation = (1.0 + inputs.cola_rate).powf(elapsed_years);
    (inputs.pia * percentage * inflation).round()
}
