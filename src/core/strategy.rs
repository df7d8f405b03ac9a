use super::benefit::{
    EARLIEST_CLAIM_AGE, MAX_PLANNING_AGE, adjust_pia_for_pre_claim, cola_growth,
    drc_increase_from_ages, early_reduction_from_ages, full_retirement_age,
};
use super::error::{CalcResult, ValidationError};
use super::types::{
    AgeBenefit, ClaimScenario, StartStopStartInputs, StartStopStartResult, StrategyComparison,
};

const LATEST_CLAIM_AGE: u32 = 70;

pub fn run_start_stop_start(inputs: &StartStopStartInputs) -> CalcResult<StrategyComparison> {
    validate_inputs(inputs)?;
    let comparison = compare_strategies(inputs);
    log::info!(
        "start-stop-start: restart benefit {:.2}, lifetime {:.2}, break-even {:?}",
        comparison.start_stop_start.restart_benefit,
        comparison.start_stop_start.lifetime_total,
        comparison.break_even_age
    );
    Ok(comparison)
}

pub fn validate_inputs(inputs: &StartStopStartInputs) -> CalcResult<()> {
    if !(1937..=2010).contains(&inputs.birth_year) {
        return Err(ValidationError::BirthYear(inputs.birth_year));
    }
    if !inputs.pia.is_finite() || inputs.pia < 0.0 {
        return Err(ValidationError::Pia(inputs.pia));
    }
    if !inputs.cola_rate.is_finite() || inputs.cola_rate <= -1.0 {
        return Err(ValidationError::ColaRate(inputs.cola_rate));
    }
    for age in [
        inputs.early_filing_age,
        inputs.suspension_age,
        inputs.restart_age,
    ] {
        if !(EARLIEST_CLAIM_AGE..=LATEST_CLAIM_AGE).contains(&age) {
            return Err(ValidationError::ClaimingAge { age });
        }
    }
    if inputs.early_filing_age >= inputs.suspension_age
        || inputs.suspension_age >= inputs.restart_age
    {
        return Err(ValidationError::ClaimingOrder {
            early: inputs.early_filing_age,
            suspension: inputs.suspension_age,
            restart: inputs.restart_age,
        });
    }
    let required = inputs.restart_age.max(LATEST_CLAIM_AGE);
    if inputs.longevity_age < required {
        return Err(ValidationError::Longevity {
            longevity: inputs.longevity_age,
            required,
        });
    }
    if inputs.longevity_age > MAX_PLANNING_AGE {
        return Err(ValidationError::AgeLimit {
            age: inputs.longevity_age,
            max: MAX_PLANNING_AGE,
        });
    }
    Ok(())
}

/// File early, suspend, restart later. Delayed credits earned while
/// suspended add to the reduced percentage; they do not multiply it.
pub fn simulate_start_stop_start(inputs: &StartStopStartInputs) -> StartStopStartResult {
    let fra_years = full_retirement_age(inputs.birth_year).as_years();
    let cola = inputs.cola_rate;
    let early_age = inputs.early_filing_age;
    let restart_age = inputs.restart_age;

    let early_reduction = early_reduction_from_ages(early_age as f64, fra_years);
    let early_benefit =
        adjust_pia_for_pre_claim(inputs.pia, early_age as f64, fra_years, cola) * early_reduction;

    let total_early_period: f64 = (early_age..inputs.suspension_age)
        .map(|age| early_benefit * cola_growth(cola, age - early_age) * 12.0)
        .sum();

    let drc_increase = drc_increase_from_ages(restart_age as f64, fra_years);
    let final_percentage = early_reduction + drc_increase;
    let adjusted_pia_at_restart =
        adjust_pia_for_pre_claim(inputs.pia, restart_age as f64, fra_years, cola);
    let restart_benefit = adjusted_pia_at_restart * final_percentage;

    let total_restart_period: f64 = (restart_age..=inputs.longevity_age)
        .map(|age| restart_benefit * cola_growth(cola, age - restart_age) * 12.0)
        .sum();

    let mut total_suspension_period = 0.0;
    let mut monthly_by_age = Vec::new();
    for age in early_age..=inputs.longevity_age {
        let monthly = if age < inputs.suspension_age {
            early_benefit * cola_growth(cola, age - early_age)
        } else if age < restart_age {
            total_suspension_period += early_benefit * cola_growth(cola, age - early_age) * 12.0;
            0.0
        } else {
            restart_benefit * cola_growth(cola, age - restart_age)
        };
        monthly_by_age.push((age, monthly));
    }

    StartStopStartResult {
        early_reduction,
        drc_increase,
        final_percentage,
        adjusted_pia_at_restart,
        early_benefit,
        restart_benefit,
        total_early_period,
        total_suspension_period,
        total_restart_period,
        lifetime_total: total_early_period + total_restart_period,
        timeline: cumulative_timeline(monthly_by_age),
    }
}

pub fn simulate_single_claim(
    inputs: &StartStopStartInputs,
    claim_age: u32,
    chart_start_age: u32,
) -> ClaimScenario {
    let fra_years = full_retirement_age(inputs.birth_year).as_years();
    let cola = inputs.cola_rate;
    let adjusted_pia = adjust_pia_for_pre_claim(inputs.pia, claim_age as f64, fra_years, cola);
    let percentage = early_reduction_from_ages(claim_age as f64, fra_years)
        + drc_increase_from_ages(claim_age as f64, fra_years);
    let monthly_benefit = adjusted_pia * percentage;

    let lifetime_total: f64 = (claim_age..=inputs.longevity_age)
        .map(|age| monthly_benefit * cola_growth(cola, age - claim_age) * 12.0)
        .sum();

    let monthly_by_age = (chart_start_age..=inputs.longevity_age)
        .map(|age| {
            if age < claim_age {
                (age, 0.0)
            } else {
                (age, monthly_benefit * cola_growth(cola, age - claim_age))
            }
        })
        .collect();

    ClaimScenario {
        claim_age,
        monthly_benefit,
        lifetime_total,
        timeline: cumulative_timeline(monthly_by_age),
    }
}

pub fn compare_strategies(inputs: &StartStopStartInputs) -> StrategyComparison {
    let fra = full_retirement_age(inputs.birth_year);
    let start_stop_start = simulate_start_stop_start(inputs);
    let chart_start = inputs.early_filing_age;
    let wait_until_70 = simulate_single_claim(inputs, LATEST_CLAIM_AGE, chart_start);
    let file_at_62 = simulate_single_claim(inputs, EARLIEST_CLAIM_AGE, chart_start);

    let file_at_62_at_restart = file_at_62.monthly_benefit
        * cola_growth(
            inputs.cola_rate,
            inputs.restart_age.saturating_sub(EARLIEST_CLAIM_AGE),
        );
    let monthly_advantage = start_stop_start.restart_benefit - file_at_62_at_restart;
    let break_even_age = break_even_age(
        inputs.restart_age,
        start_stop_start.total_early_period,
        monthly_advantage,
    );

    StrategyComparison {
        fra,
        fra_years: fra.as_years(),
        start_stop_start,
        wait_until_70,
        file_at_62,
        monthly_advantage,
        break_even_age,
    }
}

pub fn break_even_age(
    restart_age: u32,
    total_early_period: f64,
    monthly_advantage: f64,
) -> Option<f64> {
    if monthly_advantage <= 0.0 {
        return None;
    }
    let months_to_break_even = total_early_period / monthly_advantage;
    Some(restart_age as f64 + months_to_break_even / 12.0)
}

fn cumulative_timeline(monthly_by_age: Vec<(u32, f64)>) -> Vec<AgeBenefit> {
    let mut cumulative = 0.0;
    monthly_by_age
        .into_iter()
        .map(|(age, monthly_benefit)| {
            let annual_benefit = monthly_benefit * 12.0;
            cumulative += annual_benefit;
            AgeBenefit {
                age,
                monthly_benefit,
                annual_benefit,
                cumulative_total: cumulative,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assume, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_inputs() -> StartStopStartInputs {
        StartStopStartInputs {
            pia: 3_000.0,
            birth_year: 1960,
            early_filing_age: 62,
            suspension_age: 67,
            restart_age: 70,
            cola_rate: 0.0,
            longevity_age: 70,
        }
    }

    #[test]
    fn worked_example_uses_additive_credits() {
        let result = simulate_start_stop_start(&sample_inputs());
        assert_approx(result.early_reduction, 0.70);
        assert_approx(result.early_benefit, 2_100.0);
        assert_approx(result.drc_increase, 0.24);
        assert_approx(result.final_percentage, 0.94);
        assert_approx(result.restart_benefit, 2_820.0);
    }

    #[test]
    fn worked_example_period_totals() {
        let result = simulate_start_stop_start(&sample_inputs());
        assert_approx(result.total_early_period, 2_100.0 * 12.0 * 5.0);
        assert_approx(result.total_suspension_period, 2_100.0 * 12.0 * 3.0);
        assert_approx(result.total_restart_period, 2_820.0 * 12.0);
        assert_approx(
            result.lifetime_total,
            result.total_early_period + result.total_restart_period,
        );
    }

    #[test]
    fn timeline_zeroes_the_suspended_years() {
        let result = simulate_start_stop_start(&sample_inputs());
        let ages: Vec<u32> = result.timeline.iter().map(|row| row.age).collect();
        assert_eq!(ages, (62..=70).collect::<Vec<_>>());
        for row in &result.timeline {
            match row.age {
                62..=66 => assert_approx(row.monthly_benefit, 2_100.0),
                67..=69 => assert_approx(row.monthly_benefit, 0.0),
                _ => assert_approx(row.monthly_benefit, 2_820.0),
            }
        }
        let last = result.timeline.last().expect("timeline is not empty");
        assert_approx(last.cumulative_total, result.lifetime_total);
    }

    #[test]
    fn cola_grows_benefits_from_claim() {
        let mut inputs = sample_inputs();
        inputs.cola_rate = 0.025;
        inputs.longevity_age = 72;
        let result = simulate_start_stop_start(&inputs);
        assert_approx(result.early_benefit, 2_100.0);
        assert_approx(result.timeline[1].monthly_benefit, 2_100.0 * 1.025);
        let expected_restart = 3_000.0 * 1.025_f64.powf(3.0) * 0.94;
        assert_approx(result.restart_benefit, expected_restart);
        assert_approx(
            result.total_restart_period,
            expected_restart * 12.0 * (1.0 + 1.025 + 1.025 * 1.025),
        );
    }

    #[test]
    fn misordered_ages_produce_empty_periods() {
        let mut inputs = sample_inputs();
        inputs.early_filing_age = 67;
        inputs.suspension_age = 66;
        let result = simulate_start_stop_start(&inputs);
        assert_approx(result.total_early_period, 0.0);
        assert!(result.total_early_period.is_finite());
    }

    #[test]
    fn run_rejects_misordered_ages() {
        let mut inputs = sample_inputs();
        inputs.suspension_age = 71;
        assert_eq!(
            run_start_stop_start(&inputs).unwrap_err(),
            ValidationError::ClaimingAge { age: 71 }
        );

        let mut inputs = sample_inputs();
        inputs.suspension_age = 70;
        assert!(matches!(
            run_start_stop_start(&inputs),
            Err(ValidationError::ClaimingOrder { .. })
        ));
    }

    #[test]
    fn run_rejects_short_longevity_and_bad_pia() {
        let mut inputs = sample_inputs();
        inputs.longevity_age = 69;
        assert_eq!(
            run_start_stop_start(&inputs).unwrap_err(),
            ValidationError::Longevity {
                longevity: 69,
                required: 70
            }
        );

        let mut inputs = sample_inputs();
        inputs.pia = f64::NAN;
        assert!(matches!(
            run_start_stop_start(&inputs),
            Err(ValidationError::Pia(_))
        ));
    }

    #[test]
    fn run_rejects_longevity_past_planning_limit() {
        let mut inputs = sample_inputs();
        inputs.longevity_age = 10_000;
        inputs.cola_rate = 0.10;
        assert_eq!(
            run_start_stop_start(&inputs).unwrap_err(),
            ValidationError::AgeLimit {
                age: 10_000,
                max: 120
            }
        );

        inputs.longevity_age = 120;
        let comparison = run_start_stop_start(&inputs).expect("120 is within the limit");
        assert_eq!(comparison.start_stop_start.timeline.len(), 59);
        assert!(comparison.start_stop_start.lifetime_total.is_finite());
    }

    #[test]
    fn comparators_match_single_claim_rules() {
        let mut inputs = sample_inputs();
        inputs.longevity_age = 90;
        let comparison = compare_strategies(&inputs);
        assert_approx(comparison.wait_until_70.monthly_benefit, 3_720.0);
        assert_approx(comparison.file_at_62.monthly_benefit, 2_100.0);
        assert_approx(
            comparison.wait_until_70.lifetime_total,
            3_720.0 * 12.0 * 21.0,
        );
        assert_approx(comparison.file_at_62.lifetime_total, 2_100.0 * 12.0 * 29.0);
        assert_approx(comparison.wait_until_70.timeline[0].monthly_benefit, 0.0);
    }

    #[test]
    fn break_even_follows_monthly_advantage() {
        let mut inputs = sample_inputs();
        inputs.longevity_age = 95;
        let comparison = compare_strategies(&inputs);
        assert_approx(comparison.monthly_advantage, 720.0);
        let expected = 70.0 + (2_100.0 * 12.0 * 5.0 / 720.0) / 12.0;
        assert_approx(comparison.break_even_age.expect("advantage is positive"), expected);
    }

    #[test]
    fn break_even_is_absent_without_advantage() {
        assert_eq!(break_even_age(70, 100_000.0, 0.0), None);
        assert_eq!(break_even_age(70, 100_000.0, -15.0), None);
    }

    #[test]
    fn fra_with_months_uses_rounded_month_counts() {
        let mut inputs = sample_inputs();
        inputs.birth_year = 1957;
        let result = simulate_start_stop_start(&inputs);
        // 54 months early, 42 months of credit.
        assert_approx(result.early_reduction, 1.0 - 0.20 - 18.0 * 5.0 / 12.0 / 100.0);
        assert_approx(result.drc_increase, 42.0 * 2.0 / 3.0 / 100.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_restart_percentage_is_additive(
            birth_year in 1937u32..1975,
            early in 62u32..69,
            suspension_gap in 1u32..4,
            restart_gap in 1u32..4,
            pia in 100u32..5_000,
            cola_bp in 0u32..600
        ) {
            let suspension = early + suspension_gap;
            let restart = suspension + restart_gap;
            prop_assume!(restart <= 70);
            let inputs = StartStopStartInputs {
                pia: pia as f64,
                birth_year,
                early_filing_age: early,
                suspension_age: suspension,
                restart_age: restart,
                cola_rate: cola_bp as f64 / 10_000.0,
                longevity_age: 95,
            };
            let result = simulate_start_stop_start(&inputs);
            let ratio = result.restart_benefit / result.adjusted_pia_at_restart;
            prop_assert!((ratio - (result.early_reduction + result.drc_increase)).abs() < 1e-9);
            if result.drc_increase > 0.0 && result.early_reduction < 1.0 {
                let multiplicative = result.early_reduction * (1.0 + result.drc_increase);
                prop_assert!((ratio - multiplicative).abs() > 1e-9);
            }
        }

        #[test]
        fn prop_suspension_never_counts_toward_lifetime(
            early in 62u32..67,
            suspension_gap in 1u32..4,
            restart_gap in 1u32..4,
            longevity in 70u32..100,
            cola_bp in 0u32..500
        ) {
            let suspension = early + suspension_gap;
            let restart = (suspension + restart_gap).min(70);
            prop_assume!(restart > suspension);
            let inputs = StartStopStartInputs {
                pia: 2_500.0,
                birth_year: 1960,
                early_filing_age: early,
                suspension_age: suspension,
                restart_age: restart,
                cola_rate: cola_bp as f64 / 10_000.0,
                longevity_age: longevity,
            };
            let result = simulate_start_stop_start(&inputs);
            prop_assert!(result.total_suspension_period > 0.0);
            prop_assert!(
                result.lifetime_total == result.total_early_period + result.total_restart_period
            );
        }
    }
}
