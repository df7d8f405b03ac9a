use std::collections::BTreeMap;

use super::benefit::{
    EARLIEST_CLAIM_AGE, benefit_after_claim, full_retirement_age, monthly_benefit_at_claim,
};
use super::error::{CalcResult, ValidationError};
use super::types::{
    Claimant, ClaimantProjection, Projection, ProjectionInputs, ProjectionReport, ProjectionSet,
    YearProjection,
};

const LATEST_CLAIM_AGE: u32 = 70;
const PROJECTION_END_AGE: u32 = 95;

pub fn run_projection(inputs: &ProjectionInputs) -> CalcResult<ProjectionReport> {
    validate_inputs(inputs)?;

    let primary = project_claimant(&inputs.primary, inputs.cola_rate);
    let spouse = inputs
        .spouse
        .map(|spouse| project_claimant(&spouse, inputs.cola_rate));
    let household = spouse.as_ref().map(|spouse| {
        let combine = |own: &Projection, other: &Projection| {
            combine_household(own, other, inputs.death_year)
        };
        ProjectionSet {
            age_62: combine(&primary.projections.age_62, &spouse.projections.age_62),
            preferred: combine(&primary.projections.preferred, &spouse.projections.preferred),
            age_70: combine(&primary.projections.age_70, &spouse.projections.age_70),
        }
    });
    if inputs.death_year.is_some() && spouse.is_none() {
        log::warn!("death year given without a spouse; ignoring it");
    }

    log::info!(
        "projection for {}: preferred lifetime {:.2}, household {:?}",
        inputs.primary.birth_year,
        primary.projections.preferred.lifetime_total,
        household.as_ref().map(|set| set.preferred.lifetime_total)
    );

    Ok(ProjectionReport {
        primary,
        spouse,
        household,
    })
}

pub fn validate_inputs(inputs: &ProjectionInputs) -> CalcResult<()> {
    if !inputs.cola_rate.is_finite() || inputs.cola_rate <= -1.0 {
        return Err(ValidationError::ColaRate(inputs.cola_rate));
    }
    for claimant in std::iter::once(&inputs.primary).chain(inputs.spouse.as_ref()) {
        if !(1937..=2010).contains(&claimant.birth_year) {
            return Err(ValidationError::BirthYear(claimant.birth_year));
        }
        if !claimant.pia.is_finite() || claimant.pia < 0.0 {
            return Err(ValidationError::Pia(claimant.pia));
        }
        if !(EARLIEST_CLAIM_AGE..=LATEST_CLAIM_AGE).contains(&claimant.preferred_years) {
            return Err(ValidationError::ClaimingAge {
                age: claimant.preferred_years,
            });
        }
        if claimant.preferred_months > 11 {
            return Err(ValidationError::ClaimMonth(claimant.preferred_months));
        }
    }
    Ok(())
}

pub fn project_claimant(claimant: &Claimant, cola_rate: f64) -> ClaimantProjection {
    let fra = full_retirement_age(claimant.birth_year);
    let preferred_claim_age =
        claimant.preferred_years as f64 + claimant.preferred_months as f64 / 12.0;
    let project = |years: u32, months: u32| {
        project_claim(claimant.pia, claimant.birth_year, years, months, cola_rate)
    };

    ClaimantProjection {
        birth_year: claimant.birth_year,
        fra,
        preferred_claim_age,
        monthly_at_preferred_claim: round_cents(monthly_benefit_at_claim(
            claimant.pia,
            preferred_claim_age,
            fra.as_years(),
            cola_rate,
        )),
        projections: ProjectionSet {
            age_62: project(EARLIEST_CLAIM_AGE, 0),
            preferred: project(claimant.preferred_years, claimant.preferred_months),
            age_70: project(LATEST_CLAIM_AGE, 0),
        },
    }
}

/// Calendar years from 62 to 95. Benefits start in the calendar year of the
/// claim's whole-year age, and COLA compounds once per year after that.
pub fn project_claim(
    pia: f64,
    birth_year: u32,
    claim_years: u32,
    claim_months: u32,
    cola_rate: f64,
) -> Projection {
    let fra_years = full_retirement_age(birth_year).as_years();
    let claim_age = claim_years as f64 + claim_months as f64 / 12.0;
    let at_claim = monthly_benefit_at_claim(pia, claim_age, fra_years, cola_rate);
    let claim_year = birth_year + claim_years;

    let mut cumulative = 0.0;
    let rows = (birth_year + EARLIEST_CLAIM_AGE..=birth_year + PROJECTION_END_AGE)
        .map(|year| {
            let monthly_benefit = if year >= claim_year {
                round_cents(benefit_after_claim(at_claim, year - claim_year, cola_rate))
            } else {
                0.0
            };
            cumulative = round_cents(cumulative + monthly_benefit * 12.0);
            YearProjection {
                year,
                monthly_benefit,
                cumulative_total: cumulative,
            }
        })
        .collect();
    Projection::from_rows(rows)
}

/// Sums both spouses' benefits per calendar year. From `death_year` on the
/// household keeps only the larger benefit.
pub fn combine_household(
    own: &Projection,
    other: &Projection,
    death_year: Option<u32>,
) -> Projection {
    let mut by_year: BTreeMap<u32, (f64, f64)> = BTreeMap::new();
    for row in &own.rows {
        by_year.entry(row.year).or_default().0 = row.monthly_benefit;
    }
    for row in &other.rows {
        by_year.entry(row.year).or_default().1 = row.monthly_benefit;
    }

    let mut cumulative = 0.0;
    let rows = by_year
        .into_iter()
        .map(|(year, (own_monthly, other_monthly))| {
            let monthly_benefit = if death_year.is_some_and(|death| year >= death) {
                own_monthly.max(other_monthly)
            } else {
                round_cents(own_monthly + other_monthly)
            };
            cumulative = round_cents(cumulative + monthly_benefit * 12.0);
            YearProjection {
                year,
                monthly_benefit,
                cumulative_total: cumulative,
            }
        })
        .collect();
    Projection::from_rows(rows)
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
