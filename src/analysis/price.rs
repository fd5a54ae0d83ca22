use super::PriceBar;

/// Trading days used to annualize daily volatility.
const TRADING_DAYS: f64 = 252.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceStats {
    pub high_52w: f64,
    pub low_52w: f64,
    pub return_1y_pct: f64,
    /// Needs at least two daily returns.
    pub volatility_pct: Option<f64>,
}

/// Summary statistics over the closes of the trailing window.
pub fn price_stats(history: &[PriceBar]) -> Option<PriceStats> {
    let closes: Vec<f64> = history.iter().map(|b| b.close).filter(|c| c.is_finite()).collect();
    let first = *closes.first()?;
    let last = *closes.last()?;

    let high = closes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let low = closes.iter().cloned().fold(f64::INFINITY, f64::min);
    let return_1y_pct = if first != 0.0 {
        (last - first) / first * 100.0
    } else {
        0.0
    };

    Some(PriceStats {
        high_52w: high,
        low_52w: low,
        return_1y_pct,
        volatility_pct: annualized_volatility(&closes),
    })
}

fn annualized_volatility(closes: &[f64]) -> Option<f64> {
    let returns: Vec<f64> = closes
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| w[1] / w[0] - 1.0)
        .collect();
    if returns.len() < 2 {
        return None;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt() * TRADING_DAYS.sqrt() * 100.0)
}
