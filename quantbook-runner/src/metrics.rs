//! Performance metrics: pure functions over return and equity series.
//!
//! No dependencies on the engine: totals or returns in, series or scalars out.

use serde::{Deserialize, Serialize};

/// Per-bar simple returns of a total-value series.
///
/// The first entry is `None` (no prior value). A step whose prior total is
/// zero, or whose result is not finite, is also `None`.
pub fn pct_returns(totals: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(totals.len());
    if totals.is_empty() {
        return out;
    }
    out.push(None);
    for w in totals.windows(2) {
        let (prev, cur) = (w[0], w[1]);
        let r = if prev == 0.0 { f64::NAN } else { cur / prev - 1.0 };
        out.push(r.is_finite().then_some(r));
    }
    out
}

/// Cumulative product of `1 + r` over the defined returns.
///
/// Starts at 1.0; undefined returns leave the curve unchanged for that bar.
pub fn equity_curve(returns: &[Option<f64>]) -> Vec<f64> {
    let mut level = 1.0;
    returns
        .iter()
        .map(|r| {
            if let Some(r) = r {
                level *= 1.0 + r;
            }
            level
        })
        .collect()
}

/// Annualized Sharpe ratio of per-bar returns (zero risk-free rate).
///
/// Sharpe = sqrt(periods) * mean(returns) / stdev(returns), sample stdev.
/// Returns `None` with fewer than two returns or zero dispersion.
pub fn sharpe_ratio(returns: &[f64], periods: f64) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }
    let mean = mean_f64(returns);
    let std = std_dev(returns);
    if std < 1e-15 || !std.is_finite() {
        return None;
    }
    Some(periods.sqrt() * mean / std)
}

/// Drawdown series and its extremes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawdowns {
    /// Fractional decline from the running peak at each point; 0.0 at a peak.
    pub series: Vec<f64>,
    /// Most negative value of `series` (0.0 if equity never declined).
    pub max_drawdown: f64,
    /// Longest run of consecutive points below the running peak.
    pub max_duration: usize,
}

/// Peak-to-trough decline of an equity series.
pub fn drawdowns(equity: &[f64]) -> Drawdowns {
    let mut series = Vec::with_capacity(equity.len());
    let mut peak = f64::NEG_INFINITY;
    let mut max_drawdown = 0.0_f64;
    let mut duration = 0usize;
    let mut max_duration = 0usize;

    for &eq in equity {
        if eq >= peak {
            peak = eq;
        }
        let dd = if peak > 0.0 { (eq / peak - 1.0).min(0.0) } else { 0.0 };
        if dd < 0.0 {
            duration += 1;
            max_duration = max_duration.max(duration);
        } else {
            duration = 0;
        }
        max_drawdown = max_drawdown.min(dd);
        series.push(dd);
    }

    Drawdowns {
        series,
        max_drawdown,
        max_duration,
    }
}

// ─── Helpers ────────────────────────────────────────────────────────

fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator).
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}
