//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analyzer::AnalysisOutcome;
use crate::cli::args::{OutputFormat, QuerywiseArgs};
use crate::error::Result;
use crate::schema::SearchParameters;
use crate::tracking::TrackedQuery;

/// Result structure for replaying a search log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub lines: usize,
    pub skipped: usize,
    pub quality: usize,
    pub rejected: usize,
    pub degraded: usize,
    pub average_score: f64,
    pub failure_reasons: BTreeMap<String, usize>,
    pub tracked: usize,
    pub top: Vec<TrackedQuery>,
    pub duration_ms: u64,
}

/// Results that know how to print themselves for a terminal.
pub trait HumanReport {
    fn human_lines(&self) -> Vec<String>;
}

impl HumanReport for AnalysisOutcome {
    fn human_lines(&self) -> Vec<String> {
        let metrics = &self.metrics;
        let mut lines = vec![
            format!("Query: {}", metrics.original_query),
            format!(
                "Quality: {} (score {})",
                if metrics.is_quality_query { "yes" } else { "no" },
                metrics.quality_score
            ),
            format!("Results found: {}", metrics.metrics.results_found),
            format!(
                "Token match ratio: {:.2}",
                metrics.metrics.token_match_ratio
            ),
            format!("Fields matched: {}", metrics.metrics.fields_matched),
        ];

        if !metrics.failure_reasons.is_empty() {
            lines.push(String::new());
            lines.push("Failure reasons:".to_string());
            lines.extend(metrics.failure_reasons.iter().map(|r| format!("  - {r}")));
        }

        lines.push(String::new());
        lines.push("Queries to track:".to_string());
        for (i, candidate) in self.queries_to_track.iter().enumerate() {
            match &candidate.doc_type {
                Some(doc_type) => lines.push(format!("  {}. {} [{doc_type}]", i + 1, candidate.query)),
                None => lines.push(format!("  {}. {}", i + 1, candidate.query)),
            }
        }
        lines
    }
}

impl HumanReport for ReplaySummary {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Lines: {}", self.lines),
            format!("Skipped lines: {}", self.skipped),
            format!("Quality queries: {}", self.quality),
            format!("Rejected queries: {}", self.rejected),
            format!("Degraded analyses: {}", self.degraded),
            format!("Average quality score: {:.1}", self.average_score),
            format!("Tracked candidates: {}", self.tracked),
        ];

        if !self.failure_reasons.is_empty() {
            lines.push(String::new());
            lines.push("Failure reasons:".to_string());
            for (reason, count) in &self.failure_reasons {
                lines.push(format!("  {reason}: {count}"));
            }
        }

        if !self.top.is_empty() {
            lines.push(String::new());
            lines.push("Most tracked:".to_string());
            for row in &self.top {
                let doc_type = row.doc_type.as_deref().unwrap_or("-");
                lines.push(format!("  {:>5}  {} [{doc_type}]", row.count, row.query));
            }
        }

        lines.push(String::new());
        lines.push(format!("Replay time: {}ms", self.duration_ms));
        lines
    }
}

impl HumanReport for SearchParameters {
    fn human_lines(&self) -> Vec<String> {
        vec![
            format!("query_by: {}", self.query_by),
            format!("query_by_weights: {}", self.query_by_weights),
        ]
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &QuerywiseArgs) -> Result<()>
where
    T: Serialize + HumanReport,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanReport>(message: &str, result: &T, args: &QuerywiseArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!("{}", "─".repeat(message.chars().count()));
    }
    for line in result.human_lines() {
        println!("{line}");
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &QuerywiseArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}
