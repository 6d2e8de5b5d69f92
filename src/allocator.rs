//! Equal-weight allocation.
//!
//! Splits the portfolio value evenly across every quoted symbol and converts
//! each position into whole shares, always rounding down: rounding up would
//! spend more than the position size.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::quotes::QuoteSet;

#[derive(Debug, Error, PartialEq)]
pub enum InvalidInput {
    #[error("no quotes available to allocate across")]
    EmptyQuotes,
    #[error("portfolio value must be positive, got {0}")]
    NonPositiveValue(Decimal),
    #[error("quoted price for {symbol} must be positive, got {price}")]
    NonPositivePrice { symbol: String, price: Decimal },
}

/// A validated portfolio value. Construction rejects non-positive amounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioRequest {
    total_value: Decimal,
}

impl PortfolioRequest {
    pub fn new(total_value: Decimal) -> Result<Self, InvalidInput> {
        if total_value <= Decimal::ZERO {
            return Err(InvalidInput::NonPositiveValue(total_value));
        }
        Ok(Self { total_value })
    }

    pub fn total_value(&self) -> Decimal {
        self.total_value
    }
}

/// One line of the recommendation table
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationRow {
    pub symbol: String,
    pub price: Decimal,
    pub market_cap: Decimal,
    pub shares_to_buy: u64,
}

/// Compute whole-share purchases for an equal-weight allocation.
///
/// Pure function of its inputs. Rows come out in the iteration order of
/// `quotes`, which the fetcher keeps equal to the input symbol order.
pub fn allocate(
    request: &PortfolioRequest,
    quotes: &QuoteSet,
) -> Result<Vec<AllocationRow>, InvalidInput> {
    if quotes.is_empty() {
        return Err(InvalidInput::EmptyQuotes);
    }

    let position_size = request.total_value() / Decimal::from(quotes.len() as u64);

    let mut rows = Vec::with_capacity(quotes.len());
    for quote in quotes.iter() {
        if quote.price <= Decimal::ZERO {
            return Err(InvalidInput::NonPositivePrice {
                symbol: quote.symbol.clone(),
                price: quote.price,
            });
        }

        let shares = (position_size / quote.price).floor();
        // Decimal outranges u64 only for absurd portfolio values; saturate
        let shares_to_buy = shares.to_u64().unwrap_or(u64::MAX);

        rows.push(AllocationRow {
            symbol: quote.symbol.clone(),
            price: quote.price,
            market_cap: quote.market_cap,
            shares_to_buy,
        });
    }

    Ok(rows)
}
