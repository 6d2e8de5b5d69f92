use rust_decimal::Decimal;

/// Parse a portfolio value: must be a finite positive decimal
pub fn parse_portfolio_value(s: &str) -> Result<Decimal, String> {
    let value: Decimal = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value <= Decimal::ZERO {
        return Err(format!("Portfolio value must be positive, got {}", value));
    }

    Ok(value)
}

/// Parse a count argument that must be at least 1 (batch size, concurrency)
pub fn parse_positive_count(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("'{}' is not a positive integer", s)),
    }
}
