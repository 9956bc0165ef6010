//! Seeded demonstration run over a stock group.
//!
//! All randomness comes from the generator passed in, so a given seed and
//! clock always produce the same trades.

use crate::domain::error::StockError;
use crate::domain::stock_group::StockGroup;
use crate::domain::trade::Direction;
use crate::ports::clock_port::Clock;
use crate::ports::report_port::ReportPort;
use chrono::Duration;
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::Write;

pub const MAX_QUANTITY: u32 = 100;
pub const MAX_PRICE: f64 = 200.0;
/// Recent trades are spread over this much of the trailing window.
pub const RECENT_SPREAD_SECONDS: i64 = 240;
pub const STALE_AGE: Duration = Duration::minutes(6);
pub const SAMPLE_PRICES: [f64; 2] = [30.0, 50.0];
const MISSING_SYMBOL: &str = "TONIC";

/// Outcome of the window sensitivity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCheck {
    /// A trade two minutes old changed some 5-minute price.
    pub recent_changed: bool,
    /// Six-minute-old trades left every 5-minute price alone.
    pub stale_ignored: bool,
    /// A 15-minute window picked the six-minute-old trades up.
    pub widened_changed: bool,
}

impl WindowCheck {
    pub fn passed(&self) -> bool {
        self.recent_changed && self.stale_ignored && self.widened_changed
    }
}

fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    if rng.gen_bool(0.5) {
        Direction::Buy
    } else {
        Direction::Sell
    }
}

/// Add `count` random trades to random stocks, all inside the last
/// [`RECENT_SPREAD_SECONDS`]. About half are stamped "now", the rest backdated.
pub fn generate_recent_trades<R: Rng + ?Sized>(
    group: &mut StockGroup,
    clock: &dyn Clock,
    rng: &mut R,
    count: usize,
) -> Result<(), StockError> {
    let symbols: Vec<String> = group.symbols().map(str::to_string).collect();
    let now = clock.now();

    for _ in 0..count {
        let Some(symbol) = symbols.choose(rng) else {
            return Ok(());
        };
        let quantity = rng.gen_range(1..=MAX_QUANTITY);
        let direction = random_direction(rng);
        let price = rng.gen_range(0.0..MAX_PRICE);
        let record = group.stock_mut(symbol)?.trade_record_mut();

        if rng.gen_bool(0.5) {
            record.append(clock, quantity, direction, price)?;
        } else {
            let offset = Duration::seconds(rng.gen_range(1..=RECENT_SPREAD_SECONDS));
            record.append_at(quantity, direction, price, now - offset)?;
        }
    }
    Ok(())
}

/// One random trade per stock, [`STALE_AGE`] old.
pub fn generate_stale_trades<R: Rng + ?Sized>(
    group: &mut StockGroup,
    clock: &dyn Clock,
    rng: &mut R,
) -> Result<(), StockError> {
    let at = clock.now() - STALE_AGE;
    let symbols: Vec<String> = group.symbols().map(str::to_string).collect();
    for symbol in symbols {
        let quantity = rng.gen_range(1..=MAX_QUANTITY);
        let direction = random_direction(rng);
        let price = rng.gen_range(0.0..MAX_PRICE);
        group
            .stock_mut(&symbol)?
            .trade_record_mut()
            .append_at(quantity, direction, price, at)?;
    }
    Ok(())
}

fn window_prices(group: &StockGroup, clock: &dyn Clock, window: Duration) -> Vec<Option<f64>> {
    group
        .stocks()
        .map(|s| s.trade_record().volume_weighted_price_within(clock, window))
        .collect()
}

/// Add a recent trade to `symbol`, then stale trades everywhere, comparing
/// windowed prices before and after each step.
pub fn check_window_changes<R: Rng + ?Sized>(
    group: &mut StockGroup,
    symbol: &str,
    clock: &dyn Clock,
    rng: &mut R,
) -> Result<WindowCheck, StockError> {
    let five = Duration::minutes(5);
    let fifteen = Duration::minutes(15);

    let before = window_prices(group, clock, five);
    group
        .stock_mut(symbol)?
        .trade_record_mut()
        .append_at(10, Direction::Buy, 20.0, clock.now() - Duration::minutes(2))?;
    let after_recent = window_prices(group, clock, five);
    let wide_before_stale = window_prices(group, clock, fifteen);

    generate_stale_trades(group, clock, rng)?;
    let after_stale = window_prices(group, clock, five);
    let wide_after_stale = window_prices(group, clock, fifteen);

    Ok(WindowCheck {
        recent_changed: before != after_recent,
        stale_ignored: after_recent == after_stale,
        widened_changed: wide_before_stale != wide_after_stale,
    })
}

fn write_prices(
    group: &StockGroup,
    clock: &dyn Clock,
    out: &mut dyn Write,
) -> Result<(), StockError> {
    for stock in group.stocks() {
        match stock.trade_record().volume_weighted_price_within_five_minutes(clock) {
            Some(price) => writeln!(
                out,
                "Found trades for {}. Volume Weighted Stock Price: {:.4}",
                stock.symbol(),
                price
            )?,
            None => writeln!(out, "Found no trades for {}", stock.symbol())?,
        }
    }
    Ok(())
}

fn pass_fail(ok: bool) -> &'static str {
    if ok { "Success" } else { "ERROR" }
}

/// Run the full demonstration, writing a transcript to `out`.
pub fn run_demo<R: Rng + ?Sized>(
    group: &mut StockGroup,
    clock: &dyn Clock,
    rng: &mut R,
    trade_count: usize,
    report: &dyn ReportPort,
    out: &mut dyn Write,
) -> Result<WindowCheck, StockError> {
    writeln!(out, "Stocks:")?;
    for stock in group.stocks() {
        writeln!(out, "  {stock}")?;
    }
    match group.stock(MISSING_SYMBOL) {
        Ok(stock) => writeln!(out, "  {stock}")?,
        Err(e) => writeln!(out, "Caught attempt to access a missing stock: {e}")?,
    }

    writeln!(out, "\nDividend yields:")?;
    for stock in group.stocks() {
        for price in SAMPLE_PRICES {
            writeln!(
                out,
                "  {} at price {}: {:.4}",
                stock.symbol(),
                price,
                stock.dividend_yield(price)?
            )?;
        }
    }

    writeln!(out, "\nP/E ratios:")?;
    for stock in group.stocks() {
        for price in SAMPLE_PRICES {
            writeln!(
                out,
                "  {} at price {}: {:.4}",
                stock.symbol(),
                price,
                stock.pe_ratio(price)
            )?;
        }
    }

    generate_recent_trades(group, clock, rng, trade_count)?;
    writeln!(out)?;
    report.write_group(group, out)?;
    write_prices(group, clock, out)?;

    let first = group.symbols().next().map(str::to_string);
    let check = match first {
        Some(symbol) => {
            let check = check_window_changes(group, &symbol, clock, rng)?;
            writeln!(
                out,
                "\n{}: recent trade changed the 5 minute prices",
                pass_fail(check.recent_changed)
            )?;
            writeln!(
                out,
                "{}: stale trades left the 5 minute prices unchanged",
                pass_fail(check.stale_ignored)
            )?;
            writeln!(
                out,
                "{}: stale trades changed the 15 minute prices",
                pass_fail(check.widened_changed)
            )?;
            check
        }
        None => WindowCheck {
            recent_changed: false,
            stale_ignored: true,
            widened_changed: false,
        },
    };

    writeln!(out)?;
    write_prices(group, clock, out)?;
    writeln!(
        out,
        "\nAll Share Index: {:.4}",
        group.all_share_index_within_five_minutes(clock)
    )?;
    Ok(check)
}
