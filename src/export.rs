//! CSV export of segmentation results

use crate::segments::{Segment, SegmentedCustomer};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct RfmRow {
    customer_id: i64,
    recency: i64,
    frequency: u64,
    monetary: f64,
    segment: Segment,
}

#[derive(Serialize)]
struct SegmentIdRow {
    customer_id: i64,
}

/// Write the full segmented RFM table.
///
/// Customer ids are written as plain integers, one row per customer, in the
/// pipeline's customer-id order.
pub fn write_rfm_csv<P: AsRef<Path>>(path: P, customers: &[SegmentedCustomer]) -> crate::Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for customer in customers {
        writer.serialize(RfmRow {
            customer_id: customer.scored.metrics.customer_id,
            recency: customer.scored.metrics.recency,
            frequency: customer.scored.metrics.frequency,
            monetary: customer.scored.metrics.monetary,
            segment: customer.segment,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the customer ids belonging to one segment.
pub fn write_segment_ids_csv<P: AsRef<Path>>(
    path: P,
    segment: Segment,
    customers: &[SegmentedCustomer],
) -> crate::Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for customer in customers.iter().filter(|c| c.segment == segment) {
        writer.serialize(SegmentIdRow {
            customer_id: customer.scored.metrics.customer_id,
        })?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::CustomerMetrics;
    use crate::scoring::ScoredCustomer;

    fn customer(customer_id: i64, segment: Segment) -> SegmentedCustomer {
        SegmentedCustomer {
            scored: ScoredCustomer {
                metrics: CustomerMetrics {
                    customer_id,
                    recency: 12,
                    frequency: 3,
                    monetary: 450.5,
                },
                recency_score: 4,
                frequency_score: 3,
                monetary_score: 2,
            },
            segment,
        }
    }

    #[test]
    fn test_write_rfm_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rfm.csv");

        let customers = vec![
            customer(13047, Segment::PotentialLoyalists),
            customer(17850, Segment::Champions),
        ];
        write_rfm_csv(&path, &customers).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "customer_id,recency,frequency,monetary,segment"
        );
        assert_eq!(lines.next().unwrap(), "13047,12,3,450.5,potential_loyalists");
        assert_eq!(lines.next().unwrap(), "17850,12,3,450.5,champions");
    }

    #[test]
    fn test_write_segment_ids_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new_customers.csv");

        let customers = vec![
            customer(13047, Segment::NewCustomers),
            customer(17850, Segment::Champions),
            customer(12345, Segment::NewCustomers),
        ];
        write_segment_ids_csv(&path, Segment::NewCustomers, &customers).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let ids: Vec<&str> = contents.lines().skip(1).collect();
        assert_eq!(ids, vec!["13047", "12345"]);
    }
}
