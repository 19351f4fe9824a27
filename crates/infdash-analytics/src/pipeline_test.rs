use super::*;

use infdash_core::CostEntry;
use infdash_sentiment::{PolarityScorer, SentimentError};

/// Scores `+0.5` for texts mentioning "good", `-0.5` for "bad", else `0`.
struct WordScorer;

impl PolarityScorer for WordScorer {
    fn name(&self) -> &'static str {
        "word"
    }

    fn score(&self, text: &str) -> Result<f64, SentimentError> {
        let lower = text.to_lowercase();
        Ok(if lower.contains("good") {
            0.5
        } else if lower.contains("bad") {
            -0.5
        } else {
            0.0
        })
    }
}

/// Inverts [`WordScorer`] so the two classifiers always disagree on polar text.
struct Contrary;

impl PolarityScorer for Contrary {
    fn name(&self) -> &'static str {
        "contrary"
    }

    fn score(&self, text: &str) -> Result<f64, SentimentError> {
        WordScorer.score(text).map(|s| -s)
    }
}

struct Failing;

impl PolarityScorer for Failing {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn score(&self, _text: &str) -> Result<f64, SentimentError> {
        Err(SentimentError::Scorer {
            scorer: "failing".to_string(),
            reason: "unavailable".to_string(),
        })
    }
}

fn word_engine() -> FusionEngine {
    FusionEngine::new(Box::new(WordScorer), Box::new(WordScorer))
}

fn run(table: Table) -> PipelineOutput {
    run_pipeline(
        table,
        &CostTable::builtin(),
        &word_engine(),
        &PipelineOptions::default(),
    )
    .unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn alice_means_over_two_posts() {
    let out = run(Table::from_rows(
        &["influencer", "comment", "likes", "shares"],
        &[&["alice", "good", "10", "0"], &["alice", "fine", "5", "5"]],
    ));
    assert_eq!(out.records[0].engagement, 10);
    assert_eq!(out.records[1].engagement, 20);
    assert_eq!(out.influencers.len(), 1);
    assert!(close(out.influencers[0].mean_engagement, 15.0));
    assert!(close(out.influencers[0].mean_roi.unwrap(), 0.006));
    let best = out.best.unwrap();
    assert_eq!(best.influencer, "alice");
    assert!(close(best.roi, 0.006));
}

#[test]
fn best_influencer_across_groups() {
    let out = run(Table::from_rows(
        &["influencer", "comment", "likes", "cost"],
        &[&["alice", "x", "15", "2500"], &["bob", "y", "24", "2000"]],
    ));
    let best = out.best.unwrap();
    assert_eq!(best.influencer, "bob");
    assert!(close(best.roi, 0.012));
}

#[test]
fn roi_matches_engagement_over_cost() {
    let out = run(Table::from_rows(
        &["influencer", "comment", "likes", "shares", "cost"],
        &[&["dave", "x", "7", "2", "1300"]],
    ));
    let record = &out.records[0];
    assert_eq!(record.engagement, 13);
    assert!(close(record.roi.unwrap(), 13.0 / 1300.0));
}

#[test]
fn disagreement_resolves_to_first_classifier() {
    let engine = FusionEngine::new(Box::new(WordScorer), Box::new(Contrary));
    let out = run_pipeline(
        Table::from_rows(&["comment"], &[&["good stuff"], &["bad stuff"]]),
        &CostTable::builtin(),
        &engine,
        &PipelineOptions::default(),
    )
    .unwrap();
    assert_eq!(out.records[0].sentiment_vader, Some(Sentiment::Positive));
    assert_eq!(out.records[0].sentiment_textblob, Some(Sentiment::Negative));
    assert_eq!(out.records[0].sentiment, Sentiment::Positive);
    assert_eq!(out.records[1].sentiment, Sentiment::Negative);
}

#[test]
fn trusted_labels_skip_fusion_and_keep_their_cell() {
    let out = run(Table::from_rows(
        &["influencer", "comment", "Sentiment"],
        &[&["alice", "good", "Negative"], &["bob", "good", "ecstatic"]],
    ));
    assert_eq!(out.records[0].sentiment, Sentiment::Negative);
    assert_eq!(out.records[0].sentiment_vader, None);
    assert_eq!(out.records[1].sentiment, Sentiment::Positive);
    assert_eq!(out.records[1].sentiment_vader, Some(Sentiment::Positive));

    assert_eq!(out.table.column("sentiment").unwrap(), vec!["Negative", "positive"]);
    assert_eq!(out.table.column("vader").unwrap(), vec!["", "positive"]);
    assert_eq!(out.fallbacks.sentiment_label, 1);
}

#[test]
fn empty_comment_is_neutral_with_stock_scorers() {
    let out = run_pipeline(
        Table::from_rows(&["influencer", "comment"], &[&["alice", ""]]),
        &CostTable::builtin(),
        &FusionEngine::default(),
        &PipelineOptions::default(),
    )
    .unwrap();
    assert_eq!(out.records[0].sentiment, Sentiment::Neutral);
}

#[test]
fn unknown_influencer_without_cost_column_costs_3000() {
    let out = run(Table::from_rows(&["influencer", "comment"], &[&["zed", "x"]]));
    assert!(close(out.records[0].cost, 3000.0));
    assert_eq!(out.fallbacks.cost, 1);
}

#[test]
fn zero_configured_cost_leaves_roi_undefined() {
    let costs = CostTable::from_entries(
        &[CostEntry {
            name: "freebie".to_string(),
            cost: 0.0,
        }],
        3000.0,
    );
    let out = run_pipeline(
        Table::from_rows(
            &["influencer", "comment", "likes"],
            &[&["freebie", "x", "10"], &["alice", "y", "30"]],
        ),
        &costs,
        &word_engine(),
        &PipelineOptions::default(),
    )
    .unwrap();

    assert_eq!(out.records[0].roi, None);
    assert_eq!(out.fallbacks.roi, 1);
    assert_eq!(out.table.column("roi").unwrap()[0], "");
    // freebie has engagement but no ROI, so alice (fallback cost) is best.
    assert!(close(out.influencers[0].mean_engagement, 10.0));
    assert_eq!(out.influencers[0].mean_roi, None);
    assert_eq!(out.best.unwrap().influencer, "alice");
}

#[test]
fn classifier_failures_are_counted_not_fatal() {
    let engine = FusionEngine::new(Box::new(Failing), Box::new(WordScorer));
    let out = run_pipeline(
        Table::from_rows(&["comment"], &[&["good"], &["meh"]]),
        &CostTable::builtin(),
        &engine,
        &PipelineOptions::default(),
    )
    .unwrap();
    assert_eq!(out.fallbacks.classifier, 2);
    assert!(out
        .records
        .iter()
        .all(|r| r.sentiment_vader == Some(Sentiment::Neutral)));
}

#[test]
fn derived_columns_are_recomputed_not_read() {
    let out = run(Table::from_rows(
        &["influencer", "comment", "likes", "Engagement", "ROI"],
        &[&["alice", "x", "5", "999", "42"]],
    ));
    let headers = out.table.headers();
    assert_eq!(
        headers,
        &[
            "influencer", "comment", "likes", "engagement", "roi", "shares", "cost", "vader",
            "textblob", "sentiment"
        ]
    );
    assert_eq!(out.table.column("engagement").unwrap(), vec!["5"]);
    assert_eq!(out.table.column("roi").unwrap(), vec!["0.002"]);
}

#[test]
fn derived_columns_append_in_order() {
    let out = run(Table::from_rows(&["comment"], &[&["good"]]));
    let headers: Vec<&str> = out.table.headers().iter().map(String::as_str).collect();
    assert_eq!(
        headers,
        vec![
            "comment", "influencer", "likes", "shares", "cost", "vader", "textblob", "sentiment",
            "engagement", "roi"
        ]
    );
    assert_eq!(out.table.cell(0, 7), "positive");
}

#[test]
fn platform_aggregates_only_with_platform_column() {
    let with = run(Table::from_rows(
        &["influencer", "comment", "platform"],
        &[&["alice", "x", "Instagram"], &["bob", "y", "Twitter"]],
    ));
    assert_eq!(with.platforms.as_ref().map(Vec::len), Some(2));

    let without = run(Table::from_rows(&["influencer", "comment"], &[&["alice", "x"]]));
    assert!(without.platforms.is_none());
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let rows: Vec<Vec<String>> = (0..200)
        .map(|i| {
            vec![
                format!("inf{}", i % 7),
                if i % 3 == 0 { "good".into() } else { "bad".into() },
                (i * 2).to_string(),
                (i % 5).to_string(),
            ]
        })
        .collect();
    let build = || {
        let mut table = Table::new(
            ["influencer", "comment", "likes", "shares"]
                .iter()
                .map(|h| (*h).to_string())
                .collect(),
        );
        for row in &rows {
            table.push_row(row.clone());
        }
        table
    };

    let engine = word_engine();
    let costs = CostTable::builtin();
    let parallel = run_pipeline(build(), &costs, &engine, &PipelineOptions::default()).unwrap();
    let sequential = run_pipeline(
        build(),
        &costs,
        &engine,
        &PipelineOptions {
            parallel: false,
            ..PipelineOptions::default()
        },
    )
    .unwrap();

    assert_eq!(parallel.table, sequential.table);
    assert_eq!(parallel.records, sequential.records);
    assert_eq!(parallel.influencers, sequential.influencers);
}

#[test]
fn every_record_has_a_known_label() {
    let out = run_pipeline(
        Table::from_rows(
            &["comment"],
            &[&["I love it"], &[""], &["awful!!!"], &["12345"], &["NOT GOOD"]],
        ),
        &CostTable::builtin(),
        &FusionEngine::default(),
        &PipelineOptions::default(),
    )
    .unwrap();
    assert!(out
        .records
        .iter()
        .all(|r| Sentiment::ALL.contains(&r.sentiment)));
}

#[test]
fn missing_text_column_aborts() {
    let result = run_pipeline(
        Table::from_rows(&["influencer"], &[&["alice"]]),
        &CostTable::builtin(),
        &word_engine(),
        &PipelineOptions::default(),
    );
    assert!(matches!(result, Err(SchemaError::MissingTextColumn { .. })));
}

#[test]
fn fallback_report_counts_rows_once() {
    let out = run(Table::from_rows(
        &["influencer", "comment", "likes", "shares"],
        &[&["zed", "x", "lots", "?"], &["alice", "y", "1", "1"]],
    ));
    assert_eq!(out.fallbacks.rows, 1);
    assert_eq!(out.fallbacks.likes, 1);
    assert_eq!(out.fallbacks.shares, 1);
    assert_eq!(out.fallbacks.cost, 1);
}

#[test]
fn rerunning_on_output_keeps_zero_cost_roi_undefined() {
    let costs = CostTable::from_entries(
        &[CostEntry {
            name: "freebie".to_string(),
            cost: 0.0,
        }],
        3000.0,
    );
    let engine = word_engine();
    let options = PipelineOptions::default();
    let first = run_pipeline(
        Table::from_rows(
            &["influencer", "comment", "likes"],
            &[&["freebie", "x", "500"], &["alice", "y", "30"]],
        ),
        &costs,
        &engine,
        &options,
    )
    .unwrap();
    let second = run_pipeline(first.table.clone(), &costs, &engine, &options).unwrap();

    assert_eq!(second.records[0].roi, None);
    assert_eq!(second.table.column("cost"), first.table.column("cost"));
    assert_eq!(second.table.column("roi"), first.table.column("roi"));
    assert_eq!(second.best.unwrap().influencer, "alice");
}
