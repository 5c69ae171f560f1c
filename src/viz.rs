//! Segment reporting: console statistics and chart output using Plotters

use crate::segments::{Segment, SegmentedCustomer};
use plotters::prelude::*;

/// Per-segment aggregate line for the statistics report.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSummary {
    pub segment: Segment,
    pub count: usize,
    pub mean_recency: f64,
    pub mean_frequency: f64,
    pub mean_monetary: f64,
}

/// Aggregate counts and metric means per segment, in rule-table order.
///
/// Segments with no customers are omitted.
pub fn summarize_segments(customers: &[SegmentedCustomer]) -> Vec<SegmentSummary> {
    Segment::ALL
        .iter()
        .filter_map(|&segment| {
            let members: Vec<&SegmentedCustomer> =
                customers.iter().filter(|c| c.segment == segment).collect();
            if members.is_empty() {
                return None;
            }
            let count = members.len() as f64;
            Some(SegmentSummary {
                segment,
                count: members.len(),
                mean_recency: members.iter().map(|c| c.scored.metrics.recency as f64).sum::<f64>() / count,
                mean_frequency: members.iter().map(|c| c.scored.metrics.frequency as f64).sum::<f64>() / count,
                mean_monetary: members.iter().map(|c| c.scored.metrics.monetary).sum::<f64>() / count,
            })
        })
        .collect()
}

/// Print segment statistics to console
pub fn print_segment_statistics(customers: &[SegmentedCustomer]) {
    let summaries = summarize_segments(customers);
    let total = customers.len();

    println!("\n=== Segment Statistics ===");
    println!("Total customers: {}", total);

    println!("\n  Segment             | Count | Share | Avg Recency | Avg Frequency | Avg Monetary");
    println!("  --------------------|-------|-------|-------------|---------------|-------------");
    for summary in &summaries {
        let share = (summary.count as f64 / total as f64) * 100.0;
        println!(
            "  {:19} | {:5} | {:4.1}% | {:11.1} | {:13.2} | {:12.2}",
            summary.segment.as_str(),
            summary.count,
            share,
            summary.mean_recency,
            summary.mean_frequency,
            summary.mean_monetary
        );
    }
}

/// Create a bar chart of customers per segment
///
/// # Arguments
/// * `customers` - Segmented customer table
/// * `output_path` - Path to save the PNG plot
pub fn create_segment_size_chart(
    customers: &[SegmentedCustomer],
    output_path: &str,
) -> crate::Result<()> {
    let summaries = summarize_segments(customers);
    let max_size = summaries.iter().map(|s| s.count).max().unwrap_or(1) as f64;

    let root = BitMapBackend::new(output_path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Customers per Segment", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..(summaries.len() as f64), 0f64..(max_size * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Segment (see legend)")
        .y_desc("Number of Customers")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    // Draw bars for each segment, legend carries the names
    for (index, summary) in summaries.iter().enumerate() {
        let color = Palette99::pick(index);
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [
                    (index as f64 + 0.1, 0.0),
                    (index as f64 + 0.9, summary.count as f64),
                ],
                color.filled(),
            )))?
            .label(summary.segment.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y), (x + 10, y + 10)], Palette99::pick(index).filled())
            });
    }

    chart.configure_series_labels().draw()?;

    root.present()?;
    println!("Segment size chart saved to: {}", output_path);

    Ok(())
}
