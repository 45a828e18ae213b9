//! Command Line Interface for hedged concentrated-liquidity scenario analysis.
use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use clmm_hedge_data::providers::CoinGeckoProvider;
use clmm_hedge_data::{PriceQuoteProvider, QuoteConfig};
use clmm_hedge_domain::entities::token::{Token, TokenCatalog};
use clmm_hedge_domain::enums::{HedgeRegime, InputDenomination, StepSize, SweepRange};
use clmm_hedge_domain::format::{
    format_compact, format_currency, format_percent, format_signed_currency, format_token_amount,
};
use clmm_hedge_domain::hedge::try_calculate_hedge_sizing;
use clmm_hedge_domain::metrics::fees::AccrualParams;
use clmm_hedge_domain::position::PositionParams;
use clmm_hedge_domain::validation::{merge, validate_accrual, validate_inputs};
use clmm_hedge_domain::value_objects::price::Price;
use clmm_hedge_domain::value_objects::price_range::PriceRange;
use clmm_hedge_simulation::scenario::{
    ScenarioConfig, ScenarioTable, generate_scenarios, scenario_at,
};
use dotenv::dotenv;
use prettytable::{Table, row};
use rust_decimal::Decimal;
use tracing::debug;

#[derive(Parser)]
#[command(name = "clmm-hedge")]
#[command(about = "Hedged concentrated-liquidity scenario analyzer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Entry price, deposit and range shared by the position commands.
#[derive(Args, Debug)]
struct PositionArgs {
    /// Entry price (cash per token). Fetched live when omitted and --token is set
    #[arg(long)]
    entry: Option<Decimal>,

    /// Token id or symbol used for a live entry price and labels
    #[arg(short, long)]
    token: Option<String>,

    /// Deposit amount
    #[arg(short, long)]
    deposit: Decimal,

    /// Lower price bound
    #[arg(long)]
    lower: Decimal,

    /// Upper price bound
    #[arg(long)]
    upper: Decimal,

    /// Units of the deposit: token or cash
    #[arg(long, default_value = "cash")]
    denomination: InputDenomination,
}

#[derive(Subcommand)]
enum Commands {
    /// List selectable tokens
    Tokens,
    /// Fetch a live spot price
    Quote {
        /// Token id or symbol (e.g., ETH)
        #[arg(short, long, default_value = "ETH")]
        token: String,
    },
    /// Check inputs and list every violation
    Validate {
        #[arg(long)]
        entry: Decimal,
        #[arg(short, long)]
        deposit: Decimal,
        #[arg(long)]
        lower: Decimal,
        #[arg(long)]
        upper: Decimal,
        /// Short notional in cash units
        #[arg(long, default_value = "0")]
        short: Decimal,
    },
    /// Value the LP position at a single price
    Position {
        #[command(flatten)]
        position: PositionArgs,

        /// Observation price
        #[arg(long)]
        current: Decimal,

        /// Short notional in cash units
        #[arg(long, default_value = "0")]
        short: Decimal,
    },
    /// Recommend short sizes for bull, normal and bear regimes
    Hedge {
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Sweep prices around entry and print the scenario table
    Scenarios {
        #[command(flatten)]
        position: PositionArgs,

        /// Short notional in cash units
        #[arg(long, default_value = "0")]
        short: Decimal,

        /// Sweep width: narrow, medium, wide or extreme
        #[arg(long, default_value = "medium")]
        range: SweepRange,

        /// Step: fine, normal or coarse
        #[arg(long, default_value = "normal")]
        step: StepSize,

        /// LP fee APR in percent
        #[arg(long, default_value = "0")]
        fee_apr: Decimal,

        /// Daily funding rate on the short, in percent
        #[arg(long, default_value = "0")]
        funding_rate: Decimal,

        /// Holding period in days
        #[arg(long, default_value = "0")]
        days: Decimal,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn lookup_token(catalog: &TokenCatalog, key: &str) -> Result<Token> {
    catalog
        .find(key)
        .cloned()
        .ok_or_else(|| anyhow!("Unknown token '{key}'. Run `clmm-hedge tokens` for the list."))
}

async fn fetch_price(token: &Token) -> Result<Price> {
    let provider = CoinGeckoProvider::new(QuoteConfig::from_env())?;
    let quote = provider
        .get_spot_price(token)
        .await
        .with_context(|| format!("fetching {} price", token.symbol))?;
    Ok(quote.price)
}

/// Resolves the token label and entry price, fetching the price when needed.
async fn resolve_params(args: &PositionArgs, catalog: &TokenCatalog) -> Result<(PositionParams, String)> {
    let token = args
        .token
        .as_deref()
        .map(|key| lookup_token(catalog, key))
        .transpose()?;

    let entry = match (args.entry, &token) {
        (Some(entry), _) => Price::new(entry),
        (None, Some(token)) => {
            println!("📡 Fetching live {} price...", token.symbol);
            fetch_price(token).await?
        }
        (None, None) => return Err(anyhow!("Provide --entry or --token")),
    };

    let symbol = token.map(|t| t.symbol).unwrap_or_else(|| "TOKEN".to_string());
    let params = PositionParams::new(
        entry,
        args.deposit,
        PriceRange::from_decimals(args.lower, args.upper),
    )
    .with_denomination(args.denomination);
    debug!(?params, "resolved position parameters");
    Ok((params, symbol))
}

/// Prints every violation and fails when there is at least one.
fn report_validation(
    entry: Decimal,
    deposit: Decimal,
    lower: Decimal,
    upper: Decimal,
    short: Decimal,
) -> Result<()> {
    match validate_inputs(entry, deposit, lower, upper, short) {
        Ok(()) => {
            println!("✅ Inputs are valid");
            Ok(())
        }
        Err(err) => {
            println!("❌ {} problem(s) found:", err.violations.len());
            for v in &err.violations {
                println!("  - {v}");
            }
            Err(anyhow!("invalid inputs: {err}"))
        }
    }
}

fn print_scenarios(table: &ScenarioTable, symbol: &str) {
    let mut out = Table::new();
    out.set_titles(row![
        "Price", "Change", "Range", symbol, "Cash", "LP PnL", "Short PnL", "Fees", "Net PnL",
        "Return"
    ]);

    for r in &table.rows {
        let marker = if r.is_current_price { "▶ " } else { "" };
        out.add_row(row![
            format!("{marker}{}", format_currency(r.price.value)),
            format_percent(r.change_pct),
            r.regime.to_string(),
            format_token_amount(r.decomposition.token_amount, symbol),
            format_currency(r.decomposition.cash_amount),
            format_signed_currency(r.lp_pnl),
            format_signed_currency(r.short_total()),
            format_signed_currency(r.fees),
            format_signed_currency(r.net_pnl),
            format_percent(r.return_pct),
        ]);
    }
    out.printstd();

    let summary = table.summary();
    println!("\n📊 Summary");
    println!("════════════════════════════════════");
    if let (Some(best), Some(worst)) = (&summary.best, &summary.worst) {
        println!(
            "Best case:       {} at {}",
            format_signed_currency(best.net_pnl),
            format_currency(best.price.value)
        );
        println!(
            "Worst case:      {} at {}",
            format_signed_currency(worst.net_pnl),
            format_currency(worst.price.value)
        );
    }
    println!(
        "In range:        {}/{} scenarios",
        summary.in_range_rows, summary.total_rows
    );
    println!(
        "Profitable:      {}/{} scenarios",
        summary.profitable_rows, summary.total_rows
    );
    if let Some(apy) = summary.current_annualized_return {
        println!("Annualized:      {}", format_percent(apy * Decimal::ONE_HUNDRED));
    }
    for p in &summary.breakeven_prices {
        println!("Break-even near: {}", format_currency(*p));
    }
    println!("════════════════════════════════════");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    // Logs go to stderr so `--json` output stays parseable.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let catalog = TokenCatalog::default();

    match &cli.command {
        Commands::Tokens => {
            let mut out = Table::new();
            out.set_titles(row!["Id", "Name", "Symbol"]);
            for t in catalog.tokens() {
                out.add_row(row![t.id, t.name, t.symbol]);
            }
            out.printstd();
        }
        Commands::Quote { token } => {
            let token = lookup_token(&catalog, token)?;
            let price = fetch_price(&token).await?;
            println!("{} ({}): {}", token.name, token.symbol, format_currency(price.value));
        }
        Commands::Validate {
            entry,
            deposit,
            lower,
            upper,
            short,
        } => report_validation(*entry, *deposit, *lower, *upper, *short)?,
        Commands::Position {
            position,
            current,
            short,
        } => {
            let (params, symbol) = resolve_params(position, &catalog).await?;
            params.validate(*short)?;

            let baseline = params.baseline()?;
            let current_price = Price::new(*current);
            let outcome = baseline.try_outcome_at(current_price)?;
            let row = scenario_at(&baseline, current_price, *short, &AccrualParams::default());

            println!("\n📊 Position at {}", format_currency(*current));
            println!("════════════════════════════════════");
            println!("Liquidity:        {:.6}", outcome.liquidity);
            println!("Regime:           {}", outcome.regime);
            println!(
                "Holdings:         {} + {}",
                format_token_amount(outcome.current.token_amount, &symbol),
                format_currency(outcome.current.cash_amount)
            );
            println!("Position value:   {}", format_currency(outcome.current.total_value));
            println!("HODL value:       {}", format_currency(outcome.hodl_value));
            println!(
                "Impermanent loss: {} ({})",
                format_signed_currency(outcome.impermanent_loss),
                format_percent(outcome.impermanent_loss_pct() * Decimal::ONE_HUNDRED)
            );
            println!("LP PnL:           {}", format_signed_currency(row.lp_pnl));
            if !short.is_zero() {
                println!("Short PnL:        {}", format_signed_currency(row.short_total()));
            }
            println!(
                "Net PnL:          {} ({})",
                format_signed_currency(row.net_pnl),
                format_percent(row.return_pct)
            );
            println!("════════════════════════════════════");
        }
        Commands::Hedge { position } => {
            let (params, _) = resolve_params(position, &catalog).await?;
            params.validate(Decimal::ZERO)?;

            let deposit = params.deposit_value();
            let sizing = try_calculate_hedge_sizing(params.entry_price, deposit, &params.range)?;

            let mut out = Table::new();
            out.set_titles(row!["Regime", "Short size", "Of deposit"]);
            for regime in [HedgeRegime::Bull, HedgeRegime::Normal, HedgeRegime::Bear] {
                out.add_row(row![
                    regime.to_string(),
                    format_compact(sizing.for_regime(regime)),
                    format_percent(sizing.hedge_ratio(regime, deposit) * Decimal::ONE_HUNDRED),
                ]);
            }
            out.printstd();
        }
        Commands::Scenarios {
            position,
            short,
            range,
            step,
            fee_apr,
            funding_rate,
            days,
            json,
        } => {
            let (params, symbol) = resolve_params(position, &catalog).await?;
            let accrual = AccrualParams::new(*fee_apr, *funding_rate, *days);
            merge([params.validate(*short), validate_accrual(&accrual)])?;

            let config = ScenarioConfig::new(*range, *step).with_accrual(accrual);
            let table = generate_scenarios(&params, *short, &config);

            if *json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                println!(
                    "🚀 {} scenarios around {}",
                    table.rows.len(),
                    format_currency(params.entry_price.value)
                );
                print_scenarios(&table, &symbol);
            }
        }
    }

    Ok(())
}
