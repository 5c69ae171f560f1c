//! SegmentForge: Customer Segmentation CLI using rule-based RFM scoring
//!
//! This is the main entrypoint that orchestrates data loading, cleaning,
//! metric aggregation, quantile scoring, segment classification, and export.

use anyhow::Result;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use clap::Parser;
use segmentforge::{
    classify_customers, clean_records, compute_customer_metrics, export, load_records,
    score_customers, viz, Args, CleanedTransaction, Segment,
};
use std::time::Instant;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    if args.verbose {
        println!("SegmentForge - Customer Segmentation using RFM scoring");
        println!("======================================================\n");
    }

    run_segmentation(&args)
}

/// Run the full segmentation pipeline
fn run_segmentation(args: &Args) -> Result<()> {
    println!("=== RFM Segmentation Pipeline ===\n");

    let start_time = Instant::now();

    // Step 1: Load raw rows
    if args.verbose {
        println!("Step 1: Loading transaction rows");
        println!("  Input file: {}", args.input);
    }

    let load_start = Instant::now();
    let records = load_records(&args.input)?;
    println!("✓ Rows loaded: {}", records.len());
    if args.verbose {
        println!("  Loading time: {:.2}s", load_start.elapsed().as_secs_f64());
    }

    // Step 2: Clean
    let cleaned = clean_records(&records);
    println!(
        "✓ Valid transactions: {} ({} rows dropped)",
        cleaned.len(),
        records.len() - cleaned.len()
    );

    // Step 3: Resolve the analysis date
    let analysis_date = match args.parse_analysis_date()? {
        Some(date) => date,
        None => default_analysis_date(&cleaned)?,
    };
    if args.verbose {
        println!("  Analysis date: {}", analysis_date);
    }

    // Step 4: Aggregate per-customer metrics
    let metrics = compute_customer_metrics(&cleaned, analysis_date)?;
    println!("✓ Customers with positive net spend: {}", metrics.len());

    // Step 5: Quantile scoring (whole population at once)
    let scored = score_customers(metrics)?;

    // Step 6: Segment classification
    let segmented = classify_customers(scored);
    println!("✓ Customers segmented: {}", segmented.len());

    // Step 7: Report
    viz::print_segment_statistics(&segmented);

    // Step 8: Export
    export::write_rfm_csv(&args.output, &segmented)?;
    println!("\n✓ RFM table saved to: {}", args.output);

    if let Some(ref name) = args.segment {
        let segment = Segment::from_name(name).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown segment '{}'; expected one of: {}",
                name,
                Segment::ALL.map(|s| s.as_str()).join(", ")
            )
        })?;
        let path = args.segment_output_path(name);
        export::write_segment_ids_csv(&path, segment, &segmented)?;
        println!("✓ {} customer ids saved to: {}", segment, path);
    }

    if let Some(ref chart_path) = args.chart {
        let chart_start = Instant::now();
        viz::create_segment_size_chart(&segmented, chart_path)?;
        if args.verbose {
            println!("  Chart time: {:.2}s", chart_start.elapsed().as_secs_f64());
        }
    }

    println!("\n=== Pipeline Complete ===");
    println!(
        "Total processing time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Midnight one day after the latest invoice date, so recency stays non-negative.
fn default_analysis_date(cleaned: &[CleanedTransaction]) -> Result<NaiveDateTime> {
    let max_date = cleaned
        .iter()
        .map(|t| t.invoice_date)
        .max()
        .ok_or_else(|| anyhow::anyhow!("No valid transactions to derive an analysis date from"))?;

    Ok(NaiveDateTime::new(
        max_date.date() + Duration::days(1),
        NaiveTime::MIN,
    ))
}
