//! Summary statistics over a scenario table.

use crate::scenario::{ScenarioRow, ScenarioTable};
use clmm_hedge_domain::metrics::fees::calculate_apy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Summary statistics from a scenario sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// Number of scenarios.
    pub total_rows: usize,
    /// Row with the highest net P&L.
    pub best: Option<ScenarioRow>,
    /// Row with the lowest net P&L.
    pub worst: Option<ScenarioRow>,
    /// Scenarios whose price lies strictly inside the range.
    pub in_range_rows: usize,
    /// Scenarios with positive net P&L.
    pub profitable_rows: usize,
    /// Net P&L at the entry price.
    pub current_net_pnl: Decimal,
    /// Annualized return at the entry price, when a holding period is set.
    pub current_annualized_return: Option<Decimal>,
    /// Prices where net P&L crosses zero, linearly interpolated between rows.
    pub breakeven_prices: Vec<Decimal>,
}

impl ScenarioSummary {
    /// Builds the summary for `table`.
    #[must_use]
    pub fn from_table(table: &ScenarioTable) -> Self {
        let rows = &table.rows;

        let best = rows
            .iter()
            .max_by(|a, b| a.net_pnl.cmp(&b.net_pnl))
            .copied();
        let worst = rows
            .iter()
            .min_by(|a, b| a.net_pnl.cmp(&b.net_pnl))
            .copied();

        let current_net_pnl = table
            .current_row()
            .map(|r| r.net_pnl)
            .unwrap_or(Decimal::ZERO);
        let current_annualized_return = calculate_apy(
            current_net_pnl,
            table.params.deposit_value(),
            table.config.accrual.duration_days,
        )
        .ok();

        Self {
            total_rows: rows.len(),
            best,
            worst,
            in_range_rows: rows.iter().filter(|r| r.regime.is_in_range()).count(),
            profitable_rows: rows.iter().filter(|r| r.net_pnl > Decimal::ZERO).count(),
            current_net_pnl,
            current_annualized_return,
            breakeven_prices: breakeven_prices(rows),
        }
    }
}

fn breakeven_prices(rows: &[ScenarioRow]) -> Vec<Decimal> {
    // Rows sitting exactly on zero are break-evens wherever they appear.
    let exact = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| r.net_pnl.is_zero())
        .map(|(i, r)| (i, r.price.value));

    // Strict sign changes between neighbours, linearly interpolated.
    let crossings = rows.windows(2).enumerate().filter_map(|(i, pair)| {
        let (a, b) = (&pair[0], &pair[1]);
        if a.net_pnl.is_zero()
            || b.net_pnl.is_zero()
            || a.net_pnl.is_sign_negative() == b.net_pnl.is_sign_negative()
        {
            return None;
        }
        let weight = a.net_pnl.checked_div(a.net_pnl - b.net_pnl)?;
        Some((i, a.price.value + (b.price.value - a.price.value) * weight))
    });

    let mut found: Vec<(usize, Decimal)> = exact.chain(crossings).collect();
    found.sort_by_key(|(i, _)| *i);
    found.into_iter().map(|(_, price)| price).collect()
}
