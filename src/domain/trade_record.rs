//! Append-only, time-ordered trade history for one stock.
//!
//! Trades are held in a `Vec` sorted by timestamp. Trades sharing a timestamp
//! keep their insertion order, so the vector behaves as an ordered multiset.
//! Windowed queries walk the vector from the tail and stop at the first trade
//! older than the window start.

use crate::domain::error::StockError;
use crate::domain::trade::{Direction, Trade};
use crate::ports::clock_port::Clock;
use chrono::{DateTime, Duration, Utc};

/// Default window for volume weighted prices.
pub const FIVE_MINUTES: Duration = Duration::minutes(5);

#[derive(Debug, Clone, Default)]
pub struct TradeRecord {
    trades: Vec<Trade>,
}

impl TradeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trade stamped with the clock's current instant.
    ///
    /// The new trade is normally the most recent one, so it is pushed onto the
    /// tail. A clock that reports an instant older than the current tail falls
    /// back to the ordered insert.
    pub fn append(
        &mut self,
        clock: &dyn Clock,
        quantity: u32,
        direction: Direction,
        price: f64,
    ) -> Result<(), StockError> {
        let trade = Trade::stamped(quantity, direction, price, clock)?;
        match self.trades.last() {
            Some(last) if last.timestamp() > trade.timestamp() => self.insert(trade),
            _ => self.trades.push(trade),
        }
        Ok(())
    }

    /// Add a trade at an explicit instant, which may be anywhere in the history.
    pub fn append_at(
        &mut self,
        quantity: u32,
        direction: Direction,
        price: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StockError> {
        let trade = Trade::new(quantity, direction, price, timestamp)?;
        self.insert(trade);
        Ok(())
    }

    /// Add an already-validated trade in timestamp order, after any trades
    /// with an equal timestamp.
    pub fn insert(&mut self, trade: Trade) {
        let ts = trade.timestamp();
        let idx = self.trades.partition_point(|t| t.timestamp() <= ts);
        self.trades.insert(idx, trade);
    }

    /// Volume weighted price of every trade at or after `since`.
    ///
    /// Returns `None` when no trade falls in the window.
    pub fn volume_weighted_price_since(&self, since: DateTime<Utc>) -> Option<f64> {
        let mut found = false;
        let mut quantity_sum = 0.0;
        let mut notional_sum = 0.0;

        for trade in self.trades.iter().rev() {
            if trade.timestamp() < since {
                break;
            }
            found = true;
            quantity_sum += f64::from(trade.quantity());
            notional_sum += trade.notional();
        }

        if !found {
            return None;
        }
        if quantity_sum == 0.0 {
            return Some(0.0);
        }
        Some(notional_sum / quantity_sum)
    }

    /// Volume weighted price over the trailing `window` ending at `clock.now()`.
    ///
    /// A negative window is empty. A window reaching past the earliest
    /// representable instant covers the whole history.
    pub fn volume_weighted_price_within(&self, clock: &dyn Clock, window: Duration) -> Option<f64> {
        if window < Duration::zero() {
            return None;
        }
        let since = clock
            .now()
            .checked_sub_signed(window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.volume_weighted_price_since(since)
    }

    pub fn volume_weighted_price_within_five_minutes(&self, clock: &dyn Clock) -> Option<f64> {
        self.volume_weighted_price_within(clock, FIVE_MINUTES)
    }

    /// All trades, oldest first.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trade> {
        self.trades.iter()
    }

    pub fn latest(&self) -> Option<&Trade> {
        self.trades.last()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

impl<'a> IntoIterator for &'a TradeRecord {
    type Item = &'a Trade;
    type IntoIter = std::slice::Iter<'a, Trade>;

    fn into_iter(self) -> Self::IntoIter {
        self.trades.iter()
    }
}
