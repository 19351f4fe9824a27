//! Markdown and JSON rendering of pipeline results.

use std::path::Path;

use chrono::{DateTime, Utc};
use infdash_analytics::{top_by_roi, FallbackReport, PipelineOutput};
use infdash_core::{BestInfluencer, GroupAggregate, SentimentShare};
use serde::Serialize;

fn roi_cell(roi: Option<f64>) -> String {
    roi.map_or_else(|| "n/a".to_string(), |v| format!("{v:.6}"))
}

fn name_cell(key: &str) -> &str {
    if key.is_empty() {
        "(unknown)"
    } else {
        key
    }
}

/// Markdown table of the `limit` best groups by mean ROI.
pub(crate) fn influencer_table(groups: &[GroupAggregate], limit: usize) -> String {
    grouped_table("Influencer", groups, limit)
}

fn grouped_table(heading: &str, groups: &[GroupAggregate], limit: usize) -> String {
    let mut lines = vec![
        format!("| {heading} | Posts | Mean Engagement | Mean ROI |"),
        "|---|---|---|---|".to_string(),
    ];
    for group in top_by_roi(groups, limit) {
        lines.push(format!(
            "| {} | {} | {:.2} | {} |",
            name_cell(&group.key),
            group.post_count,
            group.mean_engagement,
            roi_cell(group.mean_roi)
        ));
    }
    lines.push(String::new());
    lines.join("\n")
}

pub(crate) fn best_line(best: Option<&BestInfluencer>) -> String {
    match best {
        Some(b) => format!(
            "**Best influencer**: {} (ROI {:.6})",
            name_cell(&b.influencer),
            b.roi
        ),
        None => "**Best influencer**: none (no influencer has a defined ROI)".to_string(),
    }
}

pub(crate) fn fallback_line(report: &FallbackReport) -> String {
    format!(
        "**Fallbacks**: {} rows (likes {}, shares {}, cost {}, sentiment label {}, \
         influencer {}, classifier {}, roi {})",
        report.rows,
        report.likes,
        report.shares,
        report.cost,
        report.sentiment_label,
        report.influencer,
        report.classifier,
        report.roi
    )
}

fn summary_table(summary: &[SentimentShare]) -> String {
    let mut lines = vec![
        "| Sentiment | Posts | Share |".to_string(),
        "|---|---|---|".to_string(),
    ];
    for share in summary {
        lines.push(format!(
            "| {} | {} | {:.1}% |",
            share.label, share.count, share.percent
        ));
    }
    lines.push(String::new());
    lines.join("\n")
}

pub(crate) fn render_markdown(out: &PipelineOutput, input: &Path, top: usize) -> String {
    render_markdown_at(out, input, top, Utc::now())
}

fn render_markdown_at(
    out: &PipelineOutput,
    input: &Path,
    top: usize,
    now: DateTime<Utc>,
) -> String {
    let mut sections = vec![
        "# Influencer Report".to_string(),
        String::new(),
        format!("**Generated**: {}", now.format("%Y-%m-%d %H:%M UTC")),
        format!("**Input**: {}", input.display()),
        format!("**Posts**: {}", out.records.len()),
        String::new(),
        "---".to_string(),
        String::new(),
        "## Sentiment".to_string(),
        String::new(),
        summary_table(&out.summary),
        format!("## Top {top} Influencers by ROI"),
        String::new(),
        influencer_table(&out.influencers, top),
    ];

    if let Some(platforms) = &out.platforms {
        sections.push("## Platforms".to_string());
        sections.push(String::new());
        sections.push(grouped_table("Platform", platforms, usize::MAX));
    }

    sections.push(best_line(out.best.as_ref()));
    sections.push(fallback_line(&out.fallbacks));
    sections.push(String::new());
    sections.join("\n")
}

/// Machine-readable report body for `report --json`.
#[derive(Debug, Serialize)]
pub(crate) struct ReportJson<'a> {
    pub generated_at: DateTime<Utc>,
    pub posts: usize,
    pub sentiment: &'a [SentimentShare],
    pub influencers: Vec<GroupAggregate>,
    pub platforms: Option<&'a [GroupAggregate]>,
    pub best: Option<&'a BestInfluencer>,
    pub fallbacks: FallbackReport,
}

impl<'a> ReportJson<'a> {
    pub(crate) fn new(out: &'a PipelineOutput, top: usize) -> Self {
        Self {
            generated_at: Utc::now(),
            posts: out.records.len(),
            sentiment: &out.summary,
            influencers: top_by_roi(&out.influencers, top),
            platforms: out.platforms.as_deref(),
            best: out.best.as_ref(),
            fallbacks: out.fallbacks,
        }
    }
}
