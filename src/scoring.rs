//! Quantile scoring of RFM metrics
//!
//! Converts each metric column into an ordinal score in 1..=5 by cutting the
//! population into quintiles. Scoring is a whole-population batch operation:
//! the cut points depend on every customer at once, so the full metric set
//! must be scored together.

use crate::metrics::CustomerMetrics;

/// Number of quantile groups per metric.
const BINS: usize = 5;

/// CustomerMetrics plus the three ordinal scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCustomer {
    pub metrics: CustomerMetrics,
    /// 5 = purchased most recently, 1 = longest ago
    pub recency_score: u8,
    /// 5 = most distinct invoices, 1 = fewest
    pub frequency_score: u8,
    /// 5 = highest net spend, 1 = lowest
    pub monetary_score: u8,
}

impl ScoredCustomer {
    /// Two-digit key concatenating recency and frequency scores.
    ///
    /// Monetary is scored but deliberately left out of the key: the segment
    /// rule table classifies on recency and frequency only.
    pub fn score_key(&self) -> String {
        format!("{}{}", self.recency_score, self.frequency_score)
    }
}

/// Assign each value to a quintile (1 = smallest values, 5 = largest).
///
/// Values are first ranked with a stable first-seen tie-break: ties keep
/// their input order, so heavily duplicated columns (frequency, where many
/// customers sit at exactly 1 invoice) still split into well-defined groups.
/// The rank axis is then cut at the four interior edges obtained by linear
/// interpolation, `edge_k = (n - 1) * k/5 + 1`. Bins are right-closed: a rank
/// landing exactly on an edge stays in the lower bin. Group sizes differ by
/// at most one; with fewer values than bins some groups come out empty.
///
/// Fails if the edges are not strictly increasing after tie-breaking, which
/// is the degenerate case where no 5-way partition exists at all.
pub fn quintile_ranks(values: &[f64]) -> crate::Result<Vec<u8>> {
    let n = values.len();
    if n == 0 {
        anyhow::bail!("Cannot score an empty customer population");
    }

    let edges: Vec<f64> = (1..BINS)
        .map(|k| (n as f64 - 1.0) * (k as f64 / BINS as f64) + 1.0)
        .collect();
    if edges.windows(2).any(|pair| pair[1] <= pair[0]) {
        anyhow::bail!(
            "Degenerate quantile partition: {} customer(s) cannot be cut into {} groups",
            n,
            BINS
        );
    }

    // stable sort: equal values keep input order, giving first-seen ranks
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut quintiles = vec![0u8; n];
    for (position, &index) in order.iter().enumerate() {
        let rank = (position + 1) as f64;
        let below = edges.iter().filter(|&&edge| rank > edge).count();
        quintiles[index] = below as u8 + 1;
    }

    Ok(quintiles)
}

/// Score the full metric population into the three 1..=5 columns.
///
/// Recency is inverted (a small number of days since the last purchase is
/// the best outcome), frequency and monetary map directly.
pub fn score_customers(metrics: Vec<CustomerMetrics>) -> crate::Result<Vec<ScoredCustomer>> {
    let recency: Vec<f64> = metrics.iter().map(|m| m.recency as f64).collect();
    let frequency: Vec<f64> = metrics.iter().map(|m| m.frequency as f64).collect();
    let monetary: Vec<f64> = metrics.iter().map(|m| m.monetary).collect();

    let recency_quintiles = quintile_ranks(&recency)?;
    let frequency_quintiles = quintile_ranks(&frequency)?;
    let monetary_quintiles = quintile_ranks(&monetary)?;

    Ok(metrics
        .into_iter()
        .enumerate()
        .map(|(i, metrics)| ScoredCustomer {
            metrics,
            recency_score: BINS as u8 + 1 - recency_quintiles[i],
            frequency_score: frequency_quintiles[i],
            monetary_score: monetary_quintiles[i],
        })
        .collect())
}
