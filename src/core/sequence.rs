use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg64Mcg;

use super::error::{CalcResult, ValidationError};
use super::market::{apply_stress, slice_returns};
use super::types::{
    ReturnTransform, SequenceComparison, SequenceInputs, SequenceRow, SequenceScenario,
    StressOverride, YearReturn,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanKey {
    pub bounds: Option<(u32, u32)>,
    pub count: usize,
    pub stress: Option<StressOverride>,
}

impl SpanKey {
    pub fn new(returns: &[YearReturn], stress: Option<StressOverride>) -> Self {
        let bounds = match (returns.first(), returns.last()) {
            (Some(first), Some(last)) => Some((first.year, last.year)),
            _ => None,
        };
        Self {
            bounds,
            count: returns.len(),
            stress,
        }
    }
}

/// Remembers the current return ordering for one session.
///
/// The ordering survives unrelated recalculations and only changes when the
/// span key changes (back to chronological) or a reshuffle is requested.
pub struct SequenceOrderCache {
    order: Option<Vec<YearReturn>>,
    span_key: Option<SpanKey>,
    rng: Pcg64Mcg,
}

impl SequenceOrderCache {
    pub fn new(seed: u64) -> Self {
        Self {
            order: None,
            span_key: None,
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn span_key(&self) -> Option<&SpanKey> {
        self.span_key.as_ref()
    }

    pub fn reset(&mut self) {
        self.order = None;
        self.span_key = None;
    }

    pub fn order(
        &mut self,
        base: &[YearReturn],
        stress: Option<StressOverride>,
        force_random: bool,
    ) -> Vec<YearReturn> {
        let key = SpanKey::new(base, stress);

        if force_random {
            let mut shuffled = base.to_vec();
            shuffled.shuffle(&mut self.rng);
            log::debug!("reshuffled {} returns for {key:?}", shuffled.len());
            self.order = Some(shuffled.clone());
            self.span_key = Some(key);
            return shuffled;
        }

        if self.span_key == Some(key) {
            if let Some(order) = &self.order {
                log::debug!("reusing cached order for {key:?}");
                return order.clone();
            }
        }

        log::debug!("span changed to {key:?}; resetting to chronological order");
        self.order = Some(base.to_vec());
        self.span_key = Some(key);
        base.to_vec()
    }
}

/// Runs a fixed withdrawal through the ordered returns. Balances are not
/// floored, so a depleted portfolio keeps going negative.
pub fn simulate_sequence<F>(
    initial_balance: f64,
    annual_withdrawal: f64,
    ordered_returns: &[YearReturn],
    transform: F,
) -> SequenceScenario
where
    F: Fn(f64) -> f64,
{
    let mut balance = initial_balance;
    let mut rows = Vec::with_capacity(ordered_returns.len());

    for entry in ordered_returns {
        let applied_return = transform(entry.annual_return);
        let beginning = balance;
        let growth = beginning * applied_return;
        balance = beginning + growth - annual_withdrawal;

        rows.push(SequenceRow {
            year: entry.year,
            raw_return: entry.annual_return,
            applied_return,
            beginning,
            growth,
            withdrawal: annual_withdrawal,
            ending: balance,
        });
    }

    SequenceScenario {
        total_withdrawn: annual_withdrawal * rows.len() as f64,
        rows,
        ending_balance: balance,
    }
}

pub fn validate_inputs(inputs: &SequenceInputs) -> CalcResult<()> {
    if !inputs.initial_balance.is_finite() || inputs.initial_balance < 0.0 {
        return Err(ValidationError::InitialBalance(inputs.initial_balance));
    }
    if !(0.0..=100.0).contains(&inputs.withdrawal_rate) {
        return Err(ValidationError::WithdrawalRate(inputs.withdrawal_rate));
    }
    Ok(())
}

pub fn run_sequence_comparison(
    inputs: &SequenceInputs,
    cache: &mut SequenceOrderCache,
    force_random: bool,
) -> CalcResult<SequenceComparison> {
    validate_inputs(inputs)?;

    let base = slice_returns(inputs.start_year, inputs.end_year);
    let base = apply_stress(&base, inputs.stress);
    let ordered_returns = cache.order(&base, inputs.stress, force_random);
    let annual_withdrawal = inputs.annual_withdrawal();

    let run = |transform: ReturnTransform| {
        simulate_sequence(
            inputs.initial_balance,
            annual_withdrawal,
            &ordered_returns,
            |r| transform.apply(r),
        )
    };
    let historical = run(ReturnTransform::Identity);
    let strategy_one = run(ReturnTransform::CollarHalveGains);
    let strategy_two = run(ReturnTransform::FloorLossDiscountGains);

    log::info!(
        "sequence {}-{}: ending balances {:.0} / {:.0} / {:.0}",
        inputs.start_year,
        inputs.end_year,
        historical.ending_balance,
        strategy_one.ending_balance,
        strategy_two.ending_balance
    );

    Ok(SequenceComparison {
        annual_withdrawal,
        ordered_returns,
        historical,
        strategy_one,
        strategy_two,
    })
}
