//! Per-customer RFM metric aggregation
//!
//! Reduces the cleaned transaction set to one (recency, frequency, monetary)
//! triple per customer, relative to an explicit analysis date.

use crate::data::CleanedTransaction;
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, HashSet};

/// RFM metrics for a single customer.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerMetrics {
    pub customer_id: i64,
    /// Days between the analysis date and the customer's latest invoice
    pub recency: i64,
    /// Count of distinct invoice identifiers
    pub frequency: u64,
    /// Sum of line totals across all of the customer's invoices
    pub monetary: f64,
}

/// Aggregate cleaned transactions into per-customer RFM metrics.
///
/// The analysis date is an explicit configuration value, never "now". It must
/// be on or after every observed invoice date; an earlier analysis date would
/// produce negative recency and silently corrupt quantile scoring downstream,
/// so it is rejected up front. Customers whose net spend is not positive
/// (possible through negative-price adjustment lines) are filtered out.
///
/// # Arguments
/// * `transactions` - Cleaned transaction set
/// * `analysis_date` - Reference date for recency calculation
///
/// # Returns
/// * One `CustomerMetrics` per remaining customer, ordered by customer id
pub fn compute_customer_metrics(
    transactions: &[CleanedTransaction],
    analysis_date: NaiveDateTime,
) -> crate::Result<Vec<CustomerMetrics>> {
    if transactions.is_empty() {
        anyhow::bail!("No transactions left after cleaning");
    }

    if let Some(max_date) = transactions.iter().map(|t| t.invoice_date).max() {
        if analysis_date < max_date {
            anyhow::bail!(
                "Analysis date {} precedes the latest invoice date {}; \
                 recency would be negative",
                analysis_date,
                max_date
            );
        }
    }

    struct Group {
        last_purchase: NaiveDateTime,
        invoices: HashSet<String>,
        monetary: f64,
    }

    // BTreeMap keeps the output ordered by customer id, which makes every
    // downstream stage (and the exported CSV) deterministic across runs.
    let mut groups: BTreeMap<i64, Group> = BTreeMap::new();

    for txn in transactions {
        let group = groups.entry(txn.customer_id).or_insert_with(|| Group {
            last_purchase: txn.invoice_date,
            invoices: HashSet::new(),
            monetary: 0.0,
        });
        group.last_purchase = group.last_purchase.max(txn.invoice_date);
        group.invoices.insert(txn.invoice.clone());
        group.monetary += txn.line_total;
    }

    let metrics: Vec<CustomerMetrics> = groups
        .into_iter()
        .filter(|(_, group)| group.monetary > 0.0)
        .map(|(customer_id, group)| CustomerMetrics {
            customer_id,
            recency: (analysis_date - group.last_purchase).num_days(),
            frequency: group.invoices.len() as u64,
            monetary: group.monetary,
        })
        .collect();

    if metrics.is_empty() {
        anyhow::bail!("No customers with positive net spend");
    }

    Ok(metrics)
}
