use std::sync::Arc;

use querywise::analyzer::{AnalysisOutcome, QueryQualityAnalyzer};
use querywise::config::{AnalyzerConfig, AnalyzerOptions};
use querywise::error::Result;
use querywise::schema::{CollectionKind, CollectionProfile, CollectionSchema};
use querywise::tracking::{MemorySink, forward};
use serde_json::{Value, json};

fn tracked(outcome: &AnalysisOutcome) -> Vec<&str> {
    outcome
        .queries_to_track
        .iter()
        .map(|c| c.query.as_str())
        .collect()
}

fn book_result(found: u64, tokens_matched: u64, document: Value, highlights: Value) -> Value {
    json!({
        "found": found,
        "hits": [{
            "document": document,
            "text_match_info": {"fields_matched": 1, "tokens_matched": tokens_matched},
            "highlights": highlights
        }]
    })
}

#[test]
fn mat_exam_12th_is_repaired_and_tracked() -> Result<()> {
    let analyzer = QueryQualityAnalyzer::new(&AnalyzerOptions::default())?;
    let result = json!({
        "found": 3,
        "hits": [{
            "document": {"type": "book", "title": "Mathematics"},
            "textMatchInfo": {"fieldsMatched": 2, "tokensMatched": 2},
            "highlights": [
                {"field": "title", "snippet": "<mark>Mat</mark>hematics"},
                {"field": "grades", "snippet": "<mark>12</mark>th Grade"}
            ]
        }]
    });

    let outcome = analyzer.analyze_json("Mat exam 12th", &result)?;
    assert!(outcome.metrics.is_quality_query);
    assert!(outcome.metrics.metrics.token_match_ratio > 0.66);
    assert!(tracked(&outcome)[0].starts_with("mathematics exam"));
    assert!(tracked(&outcome)[0].contains("12th grade"));
    assert!(tracked(&outcome).contains(&"mat exam 12th"));

    let sink = MemorySink::new();
    assert_eq!(forward(&outcome, &sink)?, outcome.queries_to_track.len());
    assert_eq!(sink.count("12th grade", Some("book")), 1);
    Ok(())
}

#[test]
fn grade_entity_expands_once() -> Result<()> {
    let analyzer = QueryQualityAnalyzer::new(&AnalyzerOptions::default())?;
    let result = book_result(
        5,
        2,
        json!({"type": "topic", "title": "Physics", "grades": "Grade 12 (Science)"}),
        json!([{"field": "grades", "snippet": "Grade <mark>12</mark> (Science)"}]),
    );

    let outcome = analyzer.analyze_json("grade 12", &result)?;
    let first = tracked(&outcome)[0];
    assert_eq!(first, "grade 12 (science)");
    assert_eq!(first.matches("grade").count(), 1);
    assert_eq!(outcome.queries_to_track[0].doc_type.as_deref(), Some("topic"));
    Ok(())
}

#[test]
fn typo_is_corrected_from_document_vocabulary() -> Result<()> {
    let analyzer = QueryQualityAnalyzer::new(&AnalyzerOptions::default())?;
    let result = book_result(
        1,
        1,
        json!({"type": "book", "title": "Mathematics Workbook"}),
        json!([{"field": "description", "snippet": "A <mark>workbook</mark>"}]),
    );

    let outcome = analyzer.analyze_json("mathematcs workbook", &result)?;
    assert!(outcome.metrics.is_quality_query);
    assert_eq!(tracked(&outcome)[0], "mathematics workbook");
    assert_eq!(tracked(&outcome)[1], "mathematcs workbook");
    Ok(())
}

#[test]
fn rejected_queries_report_every_reason() -> Result<()> {
    let analyzer = QueryQualityAnalyzer::new(&AnalyzerOptions::default())?;
    let outcome = analyzer.analyze_json("?", &json!({"found": 0, "hits": []}))?;

    let reasons = &outcome.metrics.failure_reasons;
    assert!(reasons.contains(&"Query too short".to_string()));
    assert!(reasons.contains(&"No results found".to_string()));
    assert!(reasons.contains(&"Low match ratio: 0%".to_string()));
    assert!(reasons.contains(&"Excluded pattern match".to_string()));
    assert_eq!(outcome.metrics.quality_score, 0);
    assert_eq!(tracked(&outcome), vec!["?"]);
    Ok(())
}

#[test]
fn safe_analyze_survives_malformed_input() {
    let analyzer = QueryQualityAnalyzer::new(&AnalyzerOptions::default()).unwrap();

    let outcome = analyzer.safe_analyze_json("Chemistry", &json!({"found": 0, "hits": []}));
    assert!(!outcome.metrics.is_quality_query);
    assert_eq!(tracked(&outcome), vec!["chemistry"]);

    for bad in [json!(null), json!({"hits": []}), json!({"found": "many"})] {
        let outcome = analyzer.safe_analyze_json(" Chemistry ", &bad);
        assert_eq!(outcome.metrics.original_query, "Chemistry");
        assert_eq!(outcome.metrics.failure_reasons, vec!["Internal Analytics Error"]);
        assert_eq!(tracked(&outcome), vec!["chemistry"]);
        assert!(!outcome.should_track());
    }
}

#[test]
fn options_shape_the_gate() -> Result<()> {
    let options = AnalyzerOptions::from_json_str(
        r#"{"minQueryLength": 5, "minTokenMatchRatio": 0.9, "excludePatterns": ["^test"]}"#,
    )?;
    let analyzer = QueryQualityAnalyzer::new(&options)?;
    let result = book_result(
        1,
        1,
        json!({"type": "book", "title": "Testing"}),
        json!([]),
    );

    let outcome = analyzer.analyze_json("test ab", &result)?;
    let reasons = &outcome.metrics.failure_reasons;
    assert!(reasons.contains(&"Excluded pattern match".to_string()));
    assert!(reasons.contains(&"Low match ratio: 50%".to_string()));
    assert!(!reasons.contains(&"Query too short".to_string()));
    Ok(())
}

#[test]
fn invalid_options_fail_at_construction() {
    let options = AnalyzerOptions::new().exclude_patterns(["(?P<oops"]);
    assert!(QueryQualityAnalyzer::new(&options).is_err());
    let options = AnalyzerOptions::new().min_token_match_ratio(-0.1);
    assert!(QueryQualityAnalyzer::new(&options).is_err());
}

#[test]
fn custom_profile_controls_expansion() -> Result<()> {
    let config = AnalyzerConfig::default();
    let schema = CollectionSchema::new("courses", &["title"], &["level"], &["title"], &config);
    let analyzer = QueryQualityAnalyzer::with_profile(config, Arc::new(schema));
    let result = book_result(
        2,
        2,
        json!({"type": "course", "title": "Spanish", "level": "Level B2 Upper"}),
        json!([
            {"field": "title", "snippet": "<mark>Spanish</mark>"},
            {"field": "level", "snippet": "Level <mark>B2</mark> Upper"}
        ]),
    );

    let outcome = analyzer.analyze_json("spanish b2", &result)?;
    assert_eq!(tracked(&outcome)[0], "spanish level b2 upper");
    assert!(tracked(&outcome).contains(&"level b2 upper"));
    assert_eq!(analyzer.profile().search_parameters().query_by, "title");
    Ok(())
}

#[test]
fn questions_collection_does_not_expand_authors() -> Result<()> {
    let analyzer =
        QueryQualityAnalyzer::for_collection(&AnalyzerOptions::default(), CollectionKind::Questions)?;
    let result = book_result(
        1,
        1,
        json!({"type": "question", "title": "Photosynthesis", "author": "Jane Doe"}),
        json!([{"field": "author", "snippet": "<mark>Jane</mark> Doe"}]),
    );

    let outcome = analyzer.analyze_json("jane", &result)?;
    assert!(!tracked(&outcome).contains(&"jane doe"));
    Ok(())
}

#[test]
fn candidates_are_unique_and_lower_case() -> Result<()> {
    let analyzer = QueryQualityAnalyzer::new(&AnalyzerOptions::default())?;
    let result = book_result(
        4,
        2,
        json!({"type": "note", "title": "Algebra", "tags": ["Algebra", "ALGEBRA I"]}),
        json!([
            {"field": "title", "snippet": "<mark>Algebra</mark>"},
            {"field": "tags", "snippets": ["<mark>Algebra</mark>", "<mark>ALGEBRA</mark> I", "Algebra"]}
        ]),
    );

    let outcome = analyzer.analyze_json("ALGEBRA one", &result)?;
    let queries = tracked(&outcome);
    for (i, q) in queries.iter().enumerate() {
        assert_eq!(*q, q.to_lowercase());
        assert!(!queries[i + 1..].contains(q));
    }
    Ok(())
}
