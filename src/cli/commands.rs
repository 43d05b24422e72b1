//! Command implementations for the querywise CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use log::{info, warn};
use serde_json::Value;

use crate::analyzer::{AnalysisOutcome, AnalysisRequest, QueryQualityAnalyzer};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::AnalyzerOptions;
use crate::document::SearchResult;
use crate::error::{QuerywiseError, Result};
use crate::quality::FailureReason;
use crate::tracking::{MemorySink, forward};

/// Execute a CLI command.
pub fn execute_command(args: QuerywiseArgs) -> Result<()> {
    let analyzer = build_analyzer(&args)?;
    match &args.command {
        Command::Analyze(analyze_args) => analyze_query(analyze_args, &analyzer, &args),
        Command::Replay(replay_args) => replay_log(replay_args, &analyzer, &args),
        Command::Params => show_params(&analyzer, &args),
    }
}

/// Build the analyzer from the options file, if any, and the collection.
fn build_analyzer(args: &QuerywiseArgs) -> Result<QueryQualityAnalyzer> {
    let options = match &args.options {
        Some(path) => {
            info!("Loading analyzer options from: {}", path.display());
            AnalyzerOptions::from_file(path)?
        }
        None => AnalyzerOptions::default(),
    };
    QueryQualityAnalyzer::for_collection(&options, args.collection.into())
}

/// Analyze one query against a saved search result.
fn analyze_query(
    args: &AnalyzeArgs,
    analyzer: &QueryQualityAnalyzer,
    cli_args: &QuerywiseArgs,
) -> Result<()> {
    let result: Value = serde_json::from_reader(BufReader::new(File::open(&args.result)?))?;
    let outcome = analyzer.safe_analyze_json(&args.query, &result);
    output_result("Query analysis", &outcome, cli_args)
}

/// Replay a search log and report what would have been tracked.
fn replay_log(
    args: &ReplayArgs,
    analyzer: &QueryQualityAnalyzer,
    cli_args: &QuerywiseArgs,
) -> Result<()> {
    let summary = replay(&args.input, args.top, analyzer)?;
    output_result("Replay summary", &summary, cli_args)
}

/// Show the backend search parameters of the analyzer's collection.
fn show_params(analyzer: &QueryQualityAnalyzer, cli_args: &QuerywiseArgs) -> Result<()> {
    let params = analyzer.profile().search_parameters();
    output_result("Search parameters", &params, cli_args)
}

/// Analyze every line of a JSONL search log.
///
/// Each line is an object with a `query` string and a `result` search
/// result. Lines without a query are skipped; lines whose result cannot be
/// parsed are analyzed as degraded.
pub fn replay<P: AsRef<Path>>(
    path: P,
    top: usize,
    analyzer: &QueryQualityAnalyzer,
) -> Result<ReplaySummary> {
    let start = Instant::now();
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut summary = ReplaySummary::default();
    let mut requests = Vec::new();
    let mut unparsed = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        summary.lines += 1;

        match parse_line(&line) {
            Ok(request) => requests.push(request),
            Err(LineError::Degraded(query, e)) => {
                warn!("Line {}: {e}", line_num + 1);
                unparsed.push(query);
            }
            Err(LineError::Skipped(e)) => {
                warn!("Line {}: skipped, {e}", line_num + 1);
                summary.skipped += 1;
            }
        }
    }

    let mut outcomes = analyzer.analyze_batch(&requests);
    outcomes.extend(unparsed.iter().map(|q| AnalysisOutcome::degraded(q)));

    let sink = MemorySink::new();
    let mut score_total = 0u64;
    let internal_error = FailureReason::InternalError.to_string();
    for outcome in &outcomes {
        let metrics = &outcome.metrics;
        if metrics.is_quality_query {
            summary.quality += 1;
            score_total += u64::from(metrics.quality_score);
        } else if metrics.failure_reasons.contains(&internal_error) {
            summary.degraded += 1;
        } else {
            summary.rejected += 1;
        }
        for reason in &metrics.failure_reasons {
            *summary.failure_reasons.entry(reason.clone()).or_insert(0) += 1;
        }
        summary.tracked += forward(outcome, &sink)?;
    }

    if summary.quality > 0 {
        summary.average_score = score_total as f64 / summary.quality as f64;
    }
    summary.top = sink.top(top);
    summary.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Replayed {} lines: {} quality, {} rejected, {} degraded",
        summary.lines, summary.quality, summary.rejected, summary.degraded
    );
    Ok(summary)
}

enum LineError {
    /// The query is known but the result is unusable.
    Degraded(String, QuerywiseError),
    Skipped(QuerywiseError),
}

fn parse_line(line: &str) -> std::result::Result<AnalysisRequest, LineError> {
    let value: Value = serde_json::from_str(line).map_err(|e| LineError::Skipped(e.into()))?;
    let query = value
        .get("query")
        .and_then(Value::as_str)
        .ok_or_else(|| LineError::Skipped(QuerywiseError::malformed("missing \"query\" string")))?
        .to_string();

    let result = match value.get("result") {
        Some(result) => SearchResult::from_value(result),
        None => Err(QuerywiseError::malformed("missing \"result\"")),
    };
    match result {
        Ok(result) => Ok(AnalysisRequest { query, result }),
        Err(e) => Err(LineError::Degraded(query, e)),
    }
}
