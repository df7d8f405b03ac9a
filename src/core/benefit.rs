use super::types::FullRetirementAge;

pub const MAX_CREDIT_AGE: f64 = 70.0;

pub const EARLIEST_CLAIM_AGE: u32 = 62;

pub const MAX_PLANNING_AGE: u32 = 120;

const FIRST_TIER_MONTHS: u32 = 36;
const FIRST_TIER_RATE: f64 = 5.0 / 9.0 / 100.0;
const SECOND_TIER_RATE: f64 = 5.0 / 12.0 / 100.0;
const CREDIT_RATE: f64 = 2.0 / 3.0 / 100.0;

pub fn full_retirement_age(birth_year: u32) -> FullRetirementAge {
    match birth_year {
        ..=1937 => FullRetirementAge::new(65, 0),
        1938..=1942 => FullRetirementAge::new(65, (birth_year - 1937) * 2),
        1943..=1954 => FullRetirementAge::new(66, 0),
        1955..=1959 => FullRetirementAge::new(66, (birth_year - 1954) * 2),
        _ => FullRetirementAge::new(67, 0),
    }
}

pub fn fra_years(birth_year: u32) -> f64 {
    full_retirement_age(birth_year).as_years()
}

pub fn months_from_fra(claim_age_years: f64, fra_years: f64) -> i32 {
    ((claim_age_years - fra_years) * 12.0).round() as i32
}

pub fn early_reduction_factor(months_before_fra: i32) -> f64 {
    let months = months_before_fra.min(0).unsigned_abs();
    let first_tier = months.min(FIRST_TIER_MONTHS) as f64;
    let second_tier = months.saturating_sub(FIRST_TIER_MONTHS) as f64;
    let reduction = first_tier * FIRST_TIER_RATE + second_tier * SECOND_TIER_RATE;
    (1.0 - reduction).max(0.0)
}

/// Multiplier for claiming `months_after_fra` months late. Negative inputs
/// clamp to zero. The age-70 ceiling is applied by `drc_increase_from_ages`.
pub fn delayed_retirement_credit_factor(months_after_fra: i32) -> f64 {
    1.0 + CREDIT_RATE * months_after_fra.max(0) as f64
}

pub fn early_reduction_from_ages(claim_age_years: f64, fra_years: f64) -> f64 {
    early_reduction_factor(months_from_fra(claim_age_years, fra_years))
}

/// Credit earned over 100% of PIA for claiming at `claim_age_years`.
/// Claim ages past 70 earn the age-70 credit.
pub fn drc_increase_from_ages(claim_age_years: f64, fra_years: f64) -> f64 {
    let capped_age = claim_age_years.min(MAX_CREDIT_AGE);
    let factor = delayed_retirement_credit_factor(months_from_fra(capped_age, fra_years));
    (factor - 1.0).max(0.0)
}

pub fn adjust_pia_for_pre_claim(
    pia_at_fra: f64,
    claim_age_years: f64,
    fra_years: f64,
    cola_rate: f64,
) -> f64 {
    if claim_age_years <= fra_years {
        return pia_at_fra;
    }
    pia_at_fra * (1.0 + cola_rate).powf(claim_age_years - fra_years)
}

pub fn monthly_benefit_at_claim(
    pia_at_fra: f64,
    claim_age_years: f64,
    fra_years: f64,
    cola_rate: f64,
) -> f64 {
    let base = adjust_pia_for_pre_claim(pia_at_fra, claim_age_years, fra_years, cola_rate);
    if months_from_fra(claim_age_years, fra_years) >= 0 {
        base * (1.0 + drc_increase_from_ages(claim_age_years, fra_years))
    } else {
        base * early_reduction_from_ages(claim_age_years, fra_years)
    }
}

pub fn benefit_after_claim(monthly_at_claim: f64, years_after_claim: u32, cola_rate: f64) -> f64 {
    monthly_at_claim * cola_growth(cola_rate, years_after_claim)
}

pub(crate) fn cola_growth(cola_rate: f64, years: u32) -> f64 {
    (1.0 + cola_rate).powi(years as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn fra_table_matches_ssa_schedule() {
        assert_eq!(full_retirement_age(1930), FullRetirementAge::new(65, 0));
        assert_eq!(full_retirement_age(1937), FullRetirementAge::new(65, 0));
        assert_eq!(full_retirement_age(1938), FullRetirementAge::new(65, 2));
        assert_eq!(full_retirement_age(1942), FullRetirementAge::new(65, 10));
        assert_eq!(full_retirement_age(1943), FullRetirementAge::new(66, 0));
        assert_eq!(full_retirement_age(1954), FullRetirementAge::new(66, 0));
        assert_eq!(full_retirement_age(1955), FullRetirementAge::new(66, 2));
        assert_eq!(full_retirement_age(1959), FullRetirementAge::new(66, 10));
        assert_eq!(full_retirement_age(1960), FullRetirementAge::new(67, 0));
        assert_eq!(full_retirement_age(1995), FullRetirementAge::new(67, 0));
    }

    #[test]
    fn fra_years_is_fractional() {
        assert_approx(fra_years(1957), 66.5);
        assert_approx(fra_years(1960), 67.0);
    }

    #[test]
    fn early_reduction_hits_ssa_worked_examples() {
        assert_approx(early_reduction_factor(0), 1.0);
        assert_approx(early_reduction_factor(-36), 0.80);
        assert_approx(early_reduction_factor(-60), 0.70);
        assert_approx(early_reduction_factor(-48), 0.75);
    }

    #[test]
    fn early_reduction_ignores_positive_months() {
        assert_approx(early_reduction_factor(24), 1.0);
    }

    #[test]
    fn early_reduction_never_goes_negative() {
        assert_approx(early_reduction_factor(-10_000), 0.0);
    }

    #[test]
    fn delayed_credit_is_eight_percent_per_year() {
        assert_approx(delayed_retirement_credit_factor(12), 1.08);
        assert_approx(delayed_retirement_credit_factor(36), 1.24);
        assert_approx(delayed_retirement_credit_factor(-5), 1.0);
    }

    #[test]
    fn drc_increase_stops_at_seventy() {
        assert_approx(drc_increase_from_ages(70.0, 67.0), 0.24);
        assert_approx(drc_increase_from_ages(72.0, 67.0), 0.24);
        assert_approx(drc_increase_from_ages(65.0, 67.0), 0.0);
    }

    #[test]
    fn months_from_fra_rounds_to_nearest_month() {
        assert_eq!(months_from_fra(62.0, 66.5), -54);
        assert_eq!(months_from_fra(70.0, 66.0 + 10.0 / 12.0), 38);
    }

    #[test]
    fn pre_claim_cola_only_applies_after_fra() {
        assert_approx(adjust_pia_for_pre_claim(2_000.0, 62.0, 67.0, 0.03), 2_000.0);
        assert_approx(adjust_pia_for_pre_claim(2_000.0, 67.0, 67.0, 0.03), 2_000.0);
        assert_approx(
            adjust_pia_for_pre_claim(2_000.0, 70.0, 67.0, 0.03),
            2_000.0 * 1.03_f64.powi(3),
        );
    }

    #[test]
    fn monthly_benefit_at_claim_picks_reduction_or_credit() {
        assert_approx(monthly_benefit_at_claim(3_000.0, 62.0, 67.0, 0.0), 2_100.0);
        assert_approx(monthly_benefit_at_claim(3_000.0, 67.0, 67.0, 0.0), 3_000.0);
        assert_approx(monthly_benefit_at_claim(3_000.0, 70.0, 67.0, 0.0), 3_720.0);
    }

    #[test]
    fn benefit_after_claim_compounds_yearly() {
        assert_approx(benefit_after_claim(1_000.0, 2, 0.10), 1_210.0);
        assert_approx(benefit_after_claim(1_000.0, 0, 0.10), 1_000.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_fra_is_monotone_in_birth_year(y1 in 1930u32..1970, gap in 0u32..20) {
            let y2 = y1 + gap;
            prop_assert!(
                full_retirement_age(y1).total_months() <= full_retirement_age(y2).total_months()
            );
        }

        #[test]
        fn prop_early_reduction_is_in_unit_interval_and_monotone(months in 0i32..200) {
            let here = early_reduction_factor(-months);
            let earlier = early_reduction_factor(-months - 1);
            prop_assert!((0.0..=1.0).contains(&here));
            prop_assert!(earlier <= here);
        }
    }
}
