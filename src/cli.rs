//! Command-line interface definitions and argument parsing

use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;

/// Date formats accepted for --analysis-date.
const ANALYSIS_DATE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Customer segmentation CLI using rule-based RFM scoring
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file
    #[arg(short, long, default_value = "data.csv")]
    pub input: String,

    /// Analysis date for recency calculation (e.g. "2011-12-11" or
    /// "2011-12-11T00:00:00"). Defaults to one day after the latest
    /// invoice date in the dataset.
    #[arg(short, long)]
    pub analysis_date: Option<String>,

    /// Output path for the full RFM table
    #[arg(short, long, default_value = "rfm.csv")]
    pub output: String,

    /// Segment whose customer ids should be exported separately
    /// Example: --segment new_customers
    #[arg(short, long)]
    pub segment: Option<String>,

    /// Output path for the per-segment customer id list
    /// Defaults to "<segment>.csv"
    #[arg(long)]
    pub segment_output: Option<String>,

    /// Output path for the segment size chart (PNG); skipped when absent
    #[arg(long)]
    pub chart: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse the analysis date argument, if one was given.
    ///
    /// A bare date is taken as midnight of that day.
    pub fn parse_analysis_date(&self) -> crate::Result<Option<NaiveDateTime>> {
        let Some(ref raw) = self.analysis_date else {
            return Ok(None);
        };
        let raw = raw.trim();

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(date.and_hms_opt(0, 0, 0));
        }
        for format in ANALYSIS_DATE_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(Some(datetime));
            }
        }

        anyhow::bail!("Invalid analysis date: {}", raw)
    }

    /// Path for the per-segment id list, defaulting to "<segment>.csv".
    pub fn segment_output_path(&self, segment_name: &str) -> String {
        self.segment_output
            .clone()
            .unwrap_or_else(|| format!("{}.csv", segment_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn args(analysis_date: Option<&str>) -> Args {
        Args {
            input: "test.csv".to_string(),
            analysis_date: analysis_date.map(|d| d.to_string()),
            output: "rfm.csv".to_string(),
            segment: None,
            segment_output: None,
            chart: None,
            verbose: false,
        }
    }

    #[test]
    fn test_parse_analysis_date() {
        let parsed = args(Some("2011-12-11")).parse_analysis_date().unwrap().unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2011, 12, 11));
        assert_eq!(parsed.hour(), 0);

        let parsed = args(Some("2011-12-11T08:30:00")).parse_analysis_date().unwrap().unwrap();
        assert_eq!(parsed.hour(), 8);

        let parsed = args(Some("2011-12-11 08:30:00")).parse_analysis_date().unwrap().unwrap();
        assert_eq!(parsed.minute(), 30);

        assert_eq!(args(None).parse_analysis_date().unwrap(), None);
        assert!(args(Some("december 11th")).parse_analysis_date().is_err());
    }

    #[test]
    fn test_segment_output_path() {
        let with_default = args(None);
        assert_eq!(
            with_default.segment_output_path("new_customers"),
            "new_customers.csv"
        );

        let mut explicit = args(None);
        explicit.segment_output = Some("ids.csv".to_string());
        assert_eq!(explicit.segment_output_path("champions"), "ids.csv");
    }
}
