//! Simulation report assembly and output formatting
//!
//! The report carries everything a presentation layer needs to render a
//! study: the layout of one run with its estimates and errors, the pooled
//! average error, the range sweep and the mobility track. Formatting never
//! feeds back into the estimator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{AnchorSet, Estimate, UnknownSet};
use crate::processing::mobility::TrackFrame;
use crate::processing::simulation::LocalizationRun;
use crate::processing::trials::PerformancePoint;
use crate::utils::config::SimulationConfig;
use crate::validation::statistics::{mean_defined, ErrorStatistics};

/// Output format preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown output format '{}' (expected text, json or csv)", other)),
        }
    }
}

/// Everything produced by one study, ready for presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub area_width: f64,
    pub area_height: f64,
    pub comm_range: f64,
    pub noise_stddev: f64,
    pub trial_count: usize,
    pub anchors: AnchorSet,
    pub unknowns: UnknownSet,
    pub estimates: Vec<Estimate>,
    pub errors: Vec<Option<f64>>,
    /// Mean error of the displayed run
    pub mean_error: Option<f64>,
    /// Statistics of the displayed run
    pub run_statistics: Option<ErrorStatistics>,
    /// Mean error pooled over `trial_count` trials
    pub average_error: Option<f64>,
    pub performance_curve: Vec<PerformancePoint>,
    pub mobility_track: Vec<TrackFrame>,
}

impl SimulationReport {
    pub fn new(config: &SimulationConfig, run: LocalizationRun) -> Self {
        let mean_error = run.mean_error();
        let run_statistics = run.statistics();
        Self {
            area_width: config.area_width,
            area_height: config.area_height,
            comm_range: run.comm_range,
            noise_stddev: config.noise_stddev,
            trial_count: config.trial_count,
            anchors: run.anchors,
            unknowns: run.unknowns,
            estimates: run.estimates,
            errors: run.errors,
            mean_error,
            run_statistics,
            average_error: None,
            performance_curve: Vec::new(),
            mobility_track: Vec::new(),
        }
    }

    pub fn with_average_error(mut self, average_error: Option<f64>) -> Self {
        self.average_error = average_error;
        self
    }

    pub fn with_performance_curve(mut self, curve: Vec<PerformancePoint>) -> Self {
        self.performance_curve = curve;
        self
    }

    pub fn with_mobility_track(mut self, track: Vec<TrackFrame>) -> Self {
        self.mobility_track = track;
        self
    }

    /// Mean error over the defined frames of the mobility track
    pub fn mobility_mean_error(&self) -> Option<f64> {
        let errors: Vec<Option<f64>> = self.mobility_track.iter().map(|f| f.error).collect();
        mean_defined(&errors)
    }
}

/// Displays a metre value or "undefined"
struct Meters(Option<f64>, usize);

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{:.*} m", self.1, value),
            None => write!(f, "undefined"),
        }
    }
}

/// Human-readable report
pub struct TextFormatter {
    /// Decimal places for distances
    pub precision: usize,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { precision: 2 }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format_text(&self, report: &SimulationReport) -> String {
        let p = self.precision;
        let mut output = String::new();

        output.push_str("Range-Free Localization (Min-Max)\n");
        output.push_str("=================================\n");
        output.push_str(&format!(
            "Area: {:.1} x {:.1} m, anchors: {}, unknowns: {}, range: {:.1} m\n",
            report.area_width,
            report.area_height,
            report.anchors.len(),
            report.unknowns.len(),
            report.comm_range
        ));

        output.push_str("\nNodes:\n");
        for (i, ((unknown, estimate), error)) in report
            .unknowns
            .iter()
            .zip(&report.estimates)
            .zip(&report.errors)
            .enumerate()
        {
            let estimate_str = match estimate {
                Some(est) => format!("({:.*}, {:.*})", p, est.x, p, est.y),
                None => "undefined".to_string(),
            };
            output.push_str(&format!(
                "  #{:<3} true ({:.*}, {:.*}) -> estimate {}, error {}\n",
                i,
                p,
                unknown.x,
                p,
                unknown.y,
                estimate_str,
                Meters(*error, p)
            ));
        }

        output.push_str(&format!(
            "\nAverage localization error: {}\n",
            Meters(report.mean_error, p)
        ));
        if let Some(stats) = &report.run_statistics {
            output.push_str(&format!(
                "Localized: {}/{}, RMSE: {:.*} m, max: {:.*} m\n",
                stats.localized_count,
                stats.localized_count + stats.unlocalized_count,
                p,
                stats.rmse,
                p,
                stats.max_error
            ));
        }
        output.push_str(&format!(
            "Average error over {} trials: {}\n",
            report.trial_count,
            Meters(report.average_error, p)
        ));

        if !report.performance_curve.is_empty() {
            output.push_str("\nPerformance vs communication range:\n");
            for point in &report.performance_curve {
                output.push_str(&format!(
                    "  {:>8.*} m  {}\n",
                    p,
                    point.comm_range,
                    Meters(point.mean_error, p)
                ));
            }
        }

        if !report.mobility_track.is_empty() {
            output.push_str(&format!(
                "\nMobility track: {} frames, noise sigma {:.*} m, mean error {}\n",
                report.mobility_track.len(),
                p,
                report.noise_stddev,
                Meters(report.mobility_mean_error(), p)
            ));
        }

        output
    }
}

/// JSON report
pub struct JsonFormatter {
    /// Pretty print JSON
    pub pretty: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self { pretty: false }
    }
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Undefined values are emitted as `null`
    pub fn format_json(&self, report: &SimulationReport) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        }
    }
}

/// Per-node CSV rows
pub struct CsvFormatter {
    /// Field separator
    pub separator: char,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self { separator: ',' }
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> String {
        let sep = self.separator.to_string();
        ["node", "true_x", "true_y", "est_x", "est_y", "error"].join(sep.as_str())
    }

    /// One row per unknown node; undefined fields are left empty
    pub fn format_csv(&self, report: &SimulationReport) -> String {
        let sep = self.separator.to_string();
        let mut lines = vec![self.header()];

        for (i, ((unknown, estimate), error)) in report
            .unknowns
            .iter()
            .zip(&report.estimates)
            .zip(&report.errors)
            .enumerate()
        {
            let (est_x, est_y) = match estimate {
                Some(est) => (est.x.to_string(), est.y.to_string()),
                None => (String::new(), String::new()),
            };
            let error = error.map(|e| e.to_string()).unwrap_or_default();
            lines.push(
                [
                    i.to_string(),
                    unknown.x.to_string(),
                    unknown.y.to_string(),
                    est_x,
                    est_y,
                    error,
                ]
                .join(sep.as_str()),
            );
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point;
    use crate::processing::simulation::simulate_localization;

    fn sample_report() -> SimulationReport {
        let anchors = vec![Point::new(0.0, 0.0), Point::new(20.0, 0.0), Point::new(0.0, 20.0)];
        let unknowns = vec![Point::new(5.0, 5.0), Point::new(90.0, 90.0)];
        let run = simulate_localization(anchors, unknowns, 10.0).unwrap();
        SimulationReport::new(&SimulationConfig::default(), run)
            .with_average_error(None)
            .with_performance_curve(vec![
                PerformancePoint { comm_range: 5.0, mean_error: None },
                PerformancePoint { comm_range: 10.0, mean_error: Some(7.5) },
            ])
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("Csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_report_from_run() {
        let report = sample_report();
        assert_eq!(report.comm_range, 10.0);
        assert!((report.mean_error.unwrap() - 50f64.sqrt()).abs() < 1e-10);
        assert_eq!(report.run_statistics.as_ref().unwrap().unlocalized_count, 1);
        assert!(report.mobility_mean_error().is_none());
    }

    #[test]
    fn test_text_output() {
        let text = TextFormatter::new().format_text(&sample_report());

        assert!(text.contains("Average localization error: 7.07 m"));
        assert!(text.contains("estimate undefined, error undefined"));
        assert!(text.contains("Average error over 25 trials: undefined"));
        assert!(text.contains("Performance vs communication range"));
    }

    #[test]
    fn test_json_output_uses_null_for_undefined() {
        let json = JsonFormatter::new().format_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["estimates"][1].is_null());
        assert!(value["errors"][1].is_null());
        assert!(value["average_error"].is_null());
        assert_eq!(value["estimates"][0]["x"], 0.0);
        assert_eq!(value["performance_curve"][1]["mean_error"], 7.5);
    }

    #[test]
    fn test_csv_output() {
        let csv = CsvFormatter::new().format_csv(&sample_report());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "node,true_x,true_y,est_x,est_y,error");
        assert!(lines[1].starts_with("0,5,5,0,0,7.07"));
        assert_eq!(lines[2], "1,90,90,,,");
    }
}
