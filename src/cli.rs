//! CLI definition and dispatch.

use chrono::Duration;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::clock_adapter::{FixedClock, SystemClock};
use crate::adapters::csv_trade_adapter::CsvTradeAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::demo;
use crate::domain::error::StockError;
use crate::domain::market_config::{
    build_market_settings, build_stock_group, default_market, MarketSettings,
};
use crate::domain::stock_group::StockGroup;
use crate::ports::clock_port::Clock;
use crate::ports::report_port::ReportPort;
use crate::ports::trade_port::{SymbolTrade, TradePort};

#[derive(Parser, Debug)]
#[command(name = "stockbook", about = "Stock trade records, VWAP and the All Share Index")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the seeded demonstration
    Demo {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10)]
        trades: usize,
    },
    /// Dividend yield of a stock at a price
    Yield {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        price: f64,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// P/E ratio of a stock at a price
    Pe {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        price: f64,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Volume weighted stock price from a trade file
    Vwap {
        #[arg(short, long)]
        trades: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        window_minutes: Option<i64>,
        /// Evaluate as if "now" were this RFC 3339 instant
        #[arg(long)]
        as_of: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// All Share Index from a trade file
    Index {
        #[arg(short, long)]
        trades: PathBuf,
        #[arg(long)]
        window_minutes: Option<i64>,
        #[arg(long)]
        as_of: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print trade record tables from a trade file
    Report {
        #[arg(short, long)]
        trades: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write random recent trades to a CSV file
    Simulate {
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value_t = 100)]
        count: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Demo {
            config,
            seed,
            trades,
        } => run_demo(config.as_deref(), seed, trades),
        Command::Yield {
            symbol,
            price,
            config,
        } => run_yield(&symbol, price, config.as_deref()),
        Command::Pe {
            symbol,
            price,
            config,
        } => run_pe(&symbol, price, config.as_deref()),
        Command::Vwap {
            trades,
            symbol,
            window_minutes,
            as_of,
            config,
        } => run_vwap(
            &trades,
            symbol.as_deref(),
            window_minutes,
            as_of.as_deref(),
            config.as_deref(),
        ),
        Command::Index {
            trades,
            window_minutes,
            as_of,
            config,
        } => run_index(&trades, window_minutes, as_of.as_deref(), config.as_deref()),
        Command::Report {
            trades,
            symbol,
            config,
        } => run_report(&trades, symbol.as_deref(), config.as_deref()),
        Command::Simulate {
            output,
            count,
            seed,
            config,
        } => run_simulate(&output, count, seed, config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Load the market from an INI file, or the sample market when no file is given.
pub fn load_market(config_path: Option<&Path>) -> Result<(StockGroup, MarketSettings), StockError> {
    match config_path {
        Some(path) => {
            log::info!("Loading market from {}", path.display());
            let adapter = FileConfigAdapter::from_file(path)?;
            let group = build_stock_group(&adapter)?;
            let settings = build_market_settings(&adapter)?;
            Ok((group, settings))
        }
        None => Ok((default_market()?, MarketSettings::default())),
    }
}

/// Record trades from a CSV file. Trades for symbols the market doesn't list
/// are skipped with a warning.
pub fn load_trade_file(group: &mut StockGroup, path: &Path) -> Result<usize, StockError> {
    let rows = CsvTradeAdapter::new(path.to_path_buf()).read_trades()?;
    let total = rows.len();
    let (known, unknown): (Vec<SymbolTrade>, Vec<SymbolTrade>) =
        rows.into_iter().partition(|row| group.has_stock(&row.symbol));

    for row in &unknown {
        log::warn!("skipping trade for unknown stock {}", row.symbol);
    }
    let loaded = group.load_trades(known)?;
    log::info!("Loaded {} of {} trades from {}", loaded, total, path.display());
    Ok(loaded)
}

pub fn resolve_clock(as_of: Option<&str>) -> Result<Box<dyn Clock>, StockError> {
    match as_of {
        Some(value) => FixedClock::parse(value)
            .map(|clock| Box::new(clock) as Box<dyn Clock>)
            .map_err(|e| StockError::InvalidArgument {
                field: "as_of",
                reason: format!("expected an RFC 3339 timestamp ({e})"),
            }),
        None => Ok(Box::new(SystemClock)),
    }
}

pub fn resolve_window(
    window_minutes: Option<i64>,
    settings: &MarketSettings,
) -> Result<Duration, StockError> {
    match window_minutes {
        Some(m) if m <= 0 => Err(StockError::InvalidArgument {
            field: "window_minutes",
            reason: "must be positive".into(),
        }),
        Some(m) => Duration::try_minutes(m).ok_or_else(|| StockError::InvalidArgument {
            field: "window_minutes",
            reason: format!("{m} minutes is out of range"),
        }),
        None => Ok(settings.window),
    }
}

fn run_demo(config: Option<&Path>, seed: Option<u64>, trades: usize) -> Result<(), StockError> {
    let (mut group, settings) = load_market(config)?;
    let seed = seed.unwrap_or(settings.seed);
    log::info!("Running demonstration with seed {seed}");

    let mut rng = StdRng::seed_from_u64(seed);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let check = demo::run_demo(
        &mut group,
        &SystemClock,
        &mut rng,
        trades,
        &TextReportAdapter::new(),
        &mut out,
    )?;
    out.flush()?;

    if !check.passed() {
        log::warn!("window checks did not all pass: {check:?}");
    }
    Ok(())
}

fn run_yield(symbol: &str, price: f64, config: Option<&Path>) -> Result<(), StockError> {
    let (group, _) = load_market(config)?;
    let stock = group.stock(&symbol.to_uppercase())?;
    println!("{:.4}", stock.dividend_yield(price)?);
    Ok(())
}

fn run_pe(symbol: &str, price: f64, config: Option<&Path>) -> Result<(), StockError> {
    let (group, _) = load_market(config)?;
    let stock = group.stock(&symbol.to_uppercase())?;
    println!("{:.4}", stock.pe_ratio(price));
    Ok(())
}

fn run_vwap(
    trades: &Path,
    symbol: Option<&str>,
    window_minutes: Option<i64>,
    as_of: Option<&str>,
    config: Option<&Path>,
) -> Result<(), StockError> {
    let (mut group, settings) = load_market(config)?;
    let window = resolve_window(window_minutes, &settings)?;
    let clock = resolve_clock(as_of)?;
    load_trade_file(&mut group, trades)?;

    let stocks = match symbol {
        Some(s) => vec![group.stock(&s.to_uppercase())?],
        None => group.stocks().collect(),
    };
    for stock in stocks {
        match stock
            .trade_record()
            .volume_weighted_price_within(clock.as_ref(), window)
        {
            Some(price) => println!("{}\t{:.4}", stock.symbol(), price),
            None => println!("{}\t-", stock.symbol()),
        }
    }
    Ok(())
}

fn run_index(
    trades: &Path,
    window_minutes: Option<i64>,
    as_of: Option<&str>,
    config: Option<&Path>,
) -> Result<(), StockError> {
    let (mut group, settings) = load_market(config)?;
    let window = resolve_window(window_minutes, &settings)?;
    let clock = resolve_clock(as_of)?;
    load_trade_file(&mut group, trades)?;

    println!("{:.4}", group.all_share_index_within(clock.as_ref(), window));
    Ok(())
}

fn run_report(trades: &Path, symbol: Option<&str>, config: Option<&Path>) -> Result<(), StockError> {
    let (mut group, _) = load_market(config)?;
    load_trade_file(&mut group, trades)?;

    let report = TextReportAdapter::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match symbol {
        Some(s) => {
            let stock = group.stock(&s.to_uppercase())?;
            report.write(stock.symbol(), stock.trade_record(), &mut out)?;
        }
        None => report.write_group(&group, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn run_simulate(
    output: &Path,
    count: usize,
    seed: Option<u64>,
    config: Option<&Path>,
) -> Result<(), StockError> {
    let (mut group, settings) = load_market(config)?;
    let mut rng = StdRng::seed_from_u64(seed.unwrap_or(settings.seed));
    demo::generate_recent_trades(&mut group, &SystemClock, &mut rng, count)?;

    let written = CsvTradeAdapter::new(output.to_path_buf()).write_trades(&group.all_trades())?;
    log::info!("Wrote {} trades to {}", written, output.display());
    Ok(())
}
