//! Group-level means, best-influencer selection and the sentiment summary.

use std::cmp::Ordering;
use std::collections::HashMap;

use infdash_core::{BestInfluencer, GroupAggregate, PostRecord, Sentiment, SentimentShare};

#[derive(Debug)]
struct Accumulator {
    key: String,
    posts: usize,
    engagement_sum: u128,
    roi_sum: f64,
    roi_count: usize,
}

impl Accumulator {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            posts: 0,
            engagement_sum: 0,
            roi_sum: 0.0,
            roi_count: 0,
        }
    }

    fn add(&mut self, record: &PostRecord) {
        self.posts += 1;
        self.engagement_sum += u128::from(record.engagement);
        if let Some(roi) = record.roi {
            self.roi_sum += roi;
            self.roi_count += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(self) -> GroupAggregate {
        GroupAggregate {
            mean_engagement: self.engagement_sum as f64 / self.posts as f64,
            mean_roi: (self.roi_count > 0).then(|| self.roi_sum / self.roi_count as f64),
            key: self.key,
            post_count: self.posts,
            roi_count: self.roi_count,
        }
    }
}

/// Group records by `key` (exact string match) and average each group.
///
/// Groups come back in first-encounter order. Records without a defined ROI
/// count toward `mean_engagement` but not toward `mean_roi`.
pub fn aggregate_by<'a, F>(records: &'a [PostRecord], key: F) -> Vec<GroupAggregate>
where
    F: Fn(&'a PostRecord) -> &'a str,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<Accumulator> = Vec::new();

    for record in records {
        let k = key(record);
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push(Accumulator::new(k));
            groups.len() - 1
        });
        groups[slot].add(record);
    }

    groups.into_iter().map(Accumulator::finish).collect()
}

#[must_use]
pub fn influencer_aggregates(records: &[PostRecord]) -> Vec<GroupAggregate> {
    aggregate_by(records, |r| r.influencer.as_str())
}

/// Per-platform means, or `None` unless every record carries a platform.
#[must_use]
pub fn platform_aggregates(records: &[PostRecord]) -> Option<Vec<GroupAggregate>> {
    if records.is_empty() || records.iter().any(|r| r.platform.is_none()) {
        return None;
    }
    Some(aggregate_by(records, |r| r.platform.as_deref().unwrap_or_default()))
}

/// The group with the highest mean ROI; the earliest group wins ties.
#[must_use]
pub fn best_influencer(aggregates: &[GroupAggregate]) -> Option<BestInfluencer> {
    let mut best: Option<(&GroupAggregate, f64)> = None;
    for agg in aggregates {
        let Some(roi) = agg.mean_roi else { continue };
        if best.map_or(true, |(_, top)| roi > top) {
            best = Some((agg, roi));
        }
    }
    best.map(|(agg, roi)| BestInfluencer {
        influencer: agg.key.clone(),
        roi,
    })
}

fn display_order(a: &GroupAggregate, b: &GroupAggregate) -> Ordering {
    match (a.mean_roi, b.mean_roi) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.key.cmp(&b.key))
}

/// Sort by descending mean ROI, then key ascending; groups without ROI last.
pub fn sort_for_display(aggregates: &mut [GroupAggregate]) {
    aggregates.sort_by(display_order);
}

/// The first `n` groups in display order.
#[must_use]
pub fn top_by_roi(aggregates: &[GroupAggregate], n: usize) -> Vec<GroupAggregate> {
    let mut sorted = aggregates.to_vec();
    sort_for_display(&mut sorted);
    sorted.truncate(n);
    sorted
}

/// Label counts and percentages, most frequent first.
///
/// Labels with no records are omitted; equal counts keep the
/// positive, negative, neutral order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sentiment_summary(records: &[PostRecord]) -> Vec<SentimentShare> {
    let total = records.len();
    let mut shares: Vec<SentimentShare> = Sentiment::ALL
        .iter()
        .map(|&label| {
            let count = records.iter().filter(|r| r.sentiment == label).count();
            SentimentShare {
                label,
                count,
                percent: 100.0 * count as f64 / total.max(1) as f64,
            }
        })
        .filter(|s| s.count > 0)
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}
