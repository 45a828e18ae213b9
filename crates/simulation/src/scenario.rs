//! Scenario table generation.
//!
//! This module sweeps prices from `entry * (1 - max%)` to `entry * (1 + max%)`
//! and values the LP position and its short hedge at every point. Liquidity is
//! derived once from the entry parameters and reused for every row.

use crate::summary::ScenarioSummary;
use clmm_hedge_domain::enums::{RangeRegime, StepSize, SweepRange};
use clmm_hedge_domain::hedge::calculate_short_pnl;
use clmm_hedge_domain::math::concentrated_liquidity::Decomposition;
use clmm_hedge_domain::metrics::fees::{AccrualParams, accrued_fees, accrued_funding};
use clmm_hedge_domain::metrics::impermanent_loss::{PositionBaseline, PositionOutcome};
use clmm_hedge_domain::position::PositionParams;
use clmm_hedge_domain::value_objects::price::Price;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Tolerance, in percentage points, for flagging the current-price row.
const CURRENT_PRICE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Configuration of a scenario sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// How far the sweep extends around the entry price.
    pub sweep: SweepRange,
    /// Spacing between price points.
    pub step: StepSize,
    /// Fee and funding accrual over the holding period.
    pub accrual: AccrualParams,
}

impl ScenarioConfig {
    /// Creates a configuration with no accrual.
    #[must_use]
    pub fn new(sweep: SweepRange, step: StepSize) -> Self {
        Self {
            sweep,
            step,
            accrual: AccrualParams::default(),
        }
    }

    /// Sets the accrual parameters.
    #[must_use]
    pub fn with_accrual(mut self, accrual: AccrualParams) -> Self {
        self.accrual = accrual;
        self
    }

    /// Percentage offsets from entry, ascending, both ends included.
    pub fn offsets(&self) -> Vec<Decimal> {
        let max = self.sweep.max_pct();
        let step = self.step.pct();
        let count = ((max * Decimal::TWO) / step).floor().to_u32().unwrap_or(0);

        (0..=count)
            .map(|i| -max + step * Decimal::from(i))
            .collect()
    }
}

/// Outcome of a single price scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    /// Scenario price.
    pub price: Price,
    /// Percentage change from the entry price.
    pub change_pct: Decimal,
    /// Regime of the scenario price relative to the range.
    pub regime: RangeRegime,
    /// LP holdings at the scenario price.
    pub decomposition: Decomposition,
    /// Impermanent loss versus holding the initial split.
    pub impermanent_loss: Decimal,
    /// LP value minus deposit.
    pub lp_pnl: Decimal,
    /// Price-driven P&L of the short.
    pub short_pnl: Decimal,
    /// Funding accrued on the short.
    pub funding: Decimal,
    /// Fees accrued by the LP position.
    pub fees: Decimal,
    /// LP + short + funding + fees.
    pub net_pnl: Decimal,
    /// Net P&L as a percentage of the deposit.
    pub return_pct: Decimal,
    /// Whether this row is the entry-price row.
    pub is_current_price: bool,
}

impl ScenarioRow {
    /// Total short leg: price P&L plus funding.
    pub fn short_total(&self) -> Decimal {
        self.short_pnl.saturating_add(self.funding)
    }
}

/// Ordered scenario rows, ascending by price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTable {
    /// Position the table was generated for.
    pub params: PositionParams,
    /// Short notional used for every row.
    pub short_size: Decimal,
    /// Sweep configuration.
    pub config: ScenarioConfig,
    /// One row per swept price.
    pub rows: Vec<ScenarioRow>,
}

impl ScenarioTable {
    /// Returns the entry-price row, if present.
    pub fn current_row(&self) -> Option<&ScenarioRow> {
        self.rows.iter().find(|r| r.is_current_price)
    }

    /// Summary statistics over all rows.
    #[must_use]
    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary::from_table(self)
    }
}

/// Generates the scenario table for a hedged position.
///
/// Rows never fail individually: a price the engine cannot value (for example
/// zero at the bottom of an extreme sweep) gets the default outcome.
///
/// # Arguments
/// * `params` - Entry price, deposit and range
/// * `short_size` - Short notional in cash units
/// * `config` - Sweep and accrual configuration
pub fn generate_scenarios(
    params: &PositionParams,
    short_size: Decimal,
    config: &ScenarioConfig,
) -> ScenarioTable {
    let deposit = params.deposit_value();
    let baseline = params
        .baseline()
        .inspect_err(|err| warn!(error = %err, "baseline failed, rows use default outcome"))
        .ok();

    let fees = accrued_fees(deposit, &config.accrual);
    let funding = accrued_funding(short_size, &config.accrual);

    let rows: Vec<ScenarioRow> = config
        .offsets()
        .into_iter()
        .map(|offset| {
            let price = params.entry_price.shifted_by_pct(offset);
            let outcome = match &baseline {
                Some(b) => b.outcome_at(price),
                None => PositionOutcome::fallback(price, deposit, &params.range),
            };
            build_row(
                price, offset, &outcome, params, deposit, short_size, fees, funding,
            )
        })
        .collect();

    debug!(
        rows = rows.len(),
        sweep = ?config.sweep,
        step = ?config.step,
        "generated scenario table"
    );

    ScenarioTable {
        params: *params,
        short_size,
        config: *config,
        rows,
    }
}

#[allow(clippy::too_many_arguments)]
fn build_row(
    price: Price,
    offset: Decimal,
    outcome: &PositionOutcome,
    params: &PositionParams,
    deposit: Decimal,
    short_size: Decimal,
    fees: Decimal,
    funding: Decimal,
) -> ScenarioRow {
    let short_pnl = calculate_short_pnl(price, params.entry_price, short_size);
    let lp_pnl = outcome.current.total_value.saturating_sub(deposit);
    let net_pnl = lp_pnl
        .saturating_add(short_pnl.saturating_add(funding))
        .saturating_add(fees);
    // Zero deposit has no meaningful return.
    let return_pct = net_pnl
        .checked_div(deposit)
        .map(|r| r.saturating_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO);

    ScenarioRow {
        price,
        change_pct: offset,
        regime: outcome.regime,
        decomposition: outcome.current,
        impermanent_loss: outcome.impermanent_loss,
        lp_pnl,
        short_pnl,
        funding,
        fees,
        net_pnl,
        return_pct,
        is_current_price: offset.abs() < CURRENT_PRICE_TOLERANCE,
    }
}

/// Values a single price with an existing baseline. Used for ad-hoc lookups
/// outside the sweep grid.
pub fn scenario_at(
    baseline: &PositionBaseline,
    price: Price,
    short_size: Decimal,
    accrual: &AccrualParams,
) -> ScenarioRow {
    let params = PositionParams::new(baseline.entry_price, baseline.deposit_amount, baseline.range);
    let outcome = baseline.outcome_at(price);
    build_row(
        price,
        price.pct_change_from(baseline.entry_price),
        &outcome,
        &params,
        baseline.deposit_amount,
        short_size,
        accrued_fees(baseline.deposit_amount, accrual),
        accrued_funding(short_size, accrual),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clmm_hedge_domain::enums::InputDenomination;
    use clmm_hedge_domain::value_objects::price_range::PriceRange;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn eth_params() -> PositionParams {
        PositionParams::new(
            Price::new(dec!(2000)),
            dec!(10000),
            PriceRange::from_decimals(dec!(1800), dec!(2200)),
        )
    }

    fn close(a: Decimal, b: Decimal, tol: Decimal) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_medium_normal_has_21_symmetric_rows() {
        let table = generate_scenarios(&eth_params(), dec!(0), &ScenarioConfig::default());
        assert_eq!(table.rows.len(), 21);
        assert_eq!(table.rows[0].change_pct, dec!(-50));
        assert_eq!(table.rows[20].change_pct, dec!(50));
        for i in 0..21 {
            assert_eq!(table.rows[i].change_pct, -table.rows[20 - i].change_pct);
        }

        let current: Vec<_> = table.rows.iter().filter(|r| r.is_current_price).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].change_pct, Decimal::ZERO);
        assert_eq!(table.rows[10].price.value, dec!(2000));
    }

    #[test]
    fn test_row_counts_per_class() {
        let p = eth_params();
        let count = |sweep, step| {
            generate_scenarios(&p, dec!(0), &ScenarioConfig::new(sweep, step))
                .rows
                .len()
        };
        assert_eq!(count(SweepRange::Narrow, StepSize::Fine), 21);
        assert_eq!(count(SweepRange::Narrow, StepSize::Coarse), 6);
        assert_eq!(count(SweepRange::Wide, StepSize::Normal), 31);
        assert_eq!(count(SweepRange::Extreme, StepSize::Coarse), 21);
    }

    #[test]
    fn test_offsets_ascending() {
        let offsets = ScenarioConfig::new(SweepRange::Narrow, StepSize::Fine).offsets();
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(offsets.first(), Some(&dec!(-25)));
        assert_eq!(offsets.last(), Some(&dec!(25)));
    }

    #[test]
    fn test_unhedged_current_row_breaks_even() {
        let table = generate_scenarios(&eth_params(), dec!(0), &ScenarioConfig::default());
        let row = table.current_row().unwrap();
        assert!(close(row.decomposition.total_value, dec!(10000), dec!(0.0001)));
        assert!(close(row.net_pnl, Decimal::ZERO, dec!(0.0001)));
        assert!(close(row.impermanent_loss, Decimal::ZERO, dec!(0.0001)));
        assert_eq!(row.regime, RangeRegime::InRange);
    }

    #[test]
    fn test_net_pnl_composition() {
        let accrual = AccrualParams::new(dec!(36.5), dec!(0.01), dec!(30));
        let config = ScenarioConfig::default().with_accrual(accrual);
        let table = generate_scenarios(&eth_params(), dec!(5000), &config);

        for row in &table.rows {
            assert_eq!(row.fees, dec!(300));
            assert_eq!(row.funding, dec!(15));
            assert_eq!(row.net_pnl, row.lp_pnl + row.short_total() + row.fees);
            assert_eq!(row.return_pct, row.net_pnl / dec!(10000) * dec!(100));
        }

        let down = &table.rows[0];
        assert_eq!(down.short_pnl, dec!(2500));
        let up = &table.rows[20];
        assert_eq!(up.short_pnl, dec!(-2500));
    }

    #[test]
    fn test_hedge_reduces_downside() {
        let unhedged = generate_scenarios(&eth_params(), dec!(0), &ScenarioConfig::default());
        let hedged = generate_scenarios(&eth_params(), dec!(5000), &ScenarioConfig::default());
        assert!(hedged.rows[0].net_pnl > unhedged.rows[0].net_pnl);
        assert!(hedged.rows[20].net_pnl < unhedged.rows[20].net_pnl);
    }

    #[test]
    fn test_extreme_sweep_zero_price_row() {
        let config = ScenarioConfig::new(SweepRange::Extreme, StepSize::Normal);
        let table = generate_scenarios(&eth_params(), dec!(1000), &config);
        assert_eq!(table.rows.len(), 41);

        let bottom = &table.rows[0];
        assert_eq!(bottom.price.value, Decimal::ZERO);
        assert_eq!(bottom.decomposition, Decomposition::zero());
        assert_eq!(bottom.lp_pnl, dec!(-10000));
        assert_eq!(bottom.short_pnl, dec!(1000));
    }

    #[test]
    fn test_extreme_table_serializes_to_json() {
        let config = ScenarioConfig::new(SweepRange::Extreme, StepSize::Fine)
            .with_accrual(AccrualParams::new(dec!(25), dec!(0.01), dec!(30)));
        let table = generate_scenarios(&eth_params(), dec!(2500), &config);

        let json = serde_json::to_string(&table).unwrap();
        let parsed: ScenarioTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);
        assert_eq!(parsed.rows[0].price.value, Decimal::ZERO);
    }

    #[test]
    fn test_huge_accrual_saturates_instead_of_panicking() {
        let config = ScenarioConfig::default()
            .with_accrual(AccrualParams::new(Decimal::MAX, Decimal::MAX, dec!(30)));
        let table = generate_scenarios(&eth_params(), dec!(2500), &config);

        assert_eq!(table.rows.len(), 21);
        for row in &table.rows {
            assert_eq!(row.fees, Decimal::MAX);
            assert!(row.net_pnl > Decimal::MAX - dec!(100000));
            assert!(row.return_pct > Decimal::ZERO);
        }
    }

    #[test]
    fn test_invalid_params_produce_default_rows() {
        let params = PositionParams::new(
            Price::new(dec!(2500)),
            dec!(10000),
            PriceRange::from_decimals(dec!(1800), dec!(2200)),
        );
        let table = generate_scenarios(&params, dec!(0), &ScenarioConfig::default());
        assert_eq!(table.rows.len(), 21);
        assert!(table.rows.iter().all(|r| r.lp_pnl == dec!(-10000)));
    }

    #[test]
    fn test_token_denominated_deposit() {
        let params = PositionParams::new(
            Price::new(dec!(2000)),
            dec!(5),
            PriceRange::from_decimals(dec!(1800), dec!(2200)),
        )
        .with_denomination(InputDenomination::Token);
        let table = generate_scenarios(&params, dec!(0), &ScenarioConfig::default());
        let row = table.current_row().unwrap();
        assert!(close(row.decomposition.total_value, dec!(10000), dec!(0.0001)));
    }

    #[test]
    fn test_scenario_at_matches_grid_row() {
        let params = eth_params();
        let config = ScenarioConfig::default();
        let table = generate_scenarios(&params, dec!(2000), &config);
        let baseline = params.baseline().unwrap();
        let row = scenario_at(&baseline, Price::new(dec!(2100)), dec!(2000), &config.accrual);
        let grid = table.rows.iter().find(|r| r.price.value == dec!(2100)).unwrap();
        assert!(close(row.net_pnl, grid.net_pnl, dec!(0.0000001)));
        assert_eq!(row.change_pct, dec!(5));
    }

    proptest! {
        #[test]
        fn prop_current_row_earns_only_accruals(
            lower in 100u32..5_000,
            width in 50u32..5_000,
            frac in 5u32..95,
            short in 0u32..100_000,
            days in 0u32..365,
        ) {
            let lower = Decimal::from(lower);
            let upper = lower + Decimal::from(width);
            let entry = lower + (upper - lower) * Decimal::from(frac) / dec!(100);
            let params = PositionParams::new(
                Price::new(entry),
                dec!(10000),
                PriceRange::from_decimals(lower, upper),
            );
            let accrual = AccrualParams::new(dec!(20), dec!(0.01), Decimal::from(days));
            let config = ScenarioConfig::default().with_accrual(accrual);
            let table = generate_scenarios(&params, Decimal::from(short), &config);

            prop_assert_eq!(table.rows.len(), 21);
            let row = table.current_row().unwrap();
            prop_assert_eq!(row.short_pnl, Decimal::ZERO);
            let expected = row.fees + row.funding;
            prop_assert!((row.net_pnl - expected).abs() < dec!(0.0001));
        }
    }
}
