//! Individual executed trades.

use crate::domain::error::StockError;
use crate::ports::clock_port::Clock;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Buy,
    Sell,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Buy => write!(f, "Buy"),
            Direction::Sell => write!(f, "Sell"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown trade direction: {0}")]
pub struct DirectionParseError(pub String);

impl FromStr for Direction {
    type Err = DirectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "b" => Ok(Direction::Buy),
            "sell" | "s" => Ok(Direction::Sell),
            _ => Err(DirectionParseError(s.to_string())),
        }
    }
}

/// One executed transaction. Always holds `quantity >= 1` and a finite
/// `price >= 0.0`; there is no way to build one that doesn't.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    quantity: u32,
    direction: Direction,
    price: f64,
    timestamp: DateTime<Utc>,
}

impl Trade {
    pub fn new(
        quantity: u32,
        direction: Direction,
        price: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, StockError> {
        if !price.is_finite() {
            return Err(StockError::invalid_argument("price", "must be a finite number"));
        }
        if price < 0.0 {
            return Err(StockError::invalid_argument("price", "cannot be negative"));
        }
        if quantity < 1 {
            return Err(StockError::invalid_argument("quantity", "must be 1 or more"));
        }
        Ok(Self {
            quantity,
            direction,
            price,
            timestamp,
        })
    }

    /// Build a trade stamped with the clock's current instant.
    pub fn stamped(
        quantity: u32,
        direction: Direction,
        price: f64,
        clock: &dyn Clock,
    ) -> Result<Self, StockError> {
        Self::new(quantity, direction, price, clock.now())
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// price * quantity
    pub fn notional(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
