//! Per-user activity statistics.
//!
//! # Example
//!
//! ```
//! use chatstats::core::stats::{ActivityStats, top_n};
//! use chatstats::core::models::MessageTable;
//! use chatstats::MessageRow;
//!
//! let table = MessageTable::from_rows(vec![
//!     MessageRow::new("U1", "hi", "1"),
//!     MessageRow::new("U2", "hey", "2"),
//!     MessageRow::new("U1", "how are you", "3"),
//! ]);
//!
//! let stats = ActivityStats::from_table(&table);
//! assert_eq!(top_n(&stats.messages, 1), vec![("U1".to_string(), 2)]);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::core::models::MessageTable;
use crate::core::summary::MessageSummary;

/// Counts keyed by user id, ordered by id.
pub type UserCounts = BTreeMap<String, usize>;

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@U\w+").expect("mention pattern is valid"));

/// Per-user counters over one message table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityStats {
    /// Messages written, by author. Rows with a `null` author are not counted.
    pub messages: UserCounts,
    /// Thread replies written, by replying user (from thread roots' `replies`)
    pub replies: UserCounts,
    /// Times mentioned, by mentioned user
    pub mentions: UserCounts,
    /// Links posted, by author (users without links count 0)
    pub links: UserCounts,
}

impl ActivityStats {
    pub fn from_table(table: &MessageTable) -> Self {
        let mut stats = Self::default();

        for row in table {
            if let Some(author) = row.user() {
                *stats.messages.entry(author.to_string()).or_default() += 1;
                *stats.links.entry(author.to_string()).or_default() += row.link_count;
            }

            for user in row.reply_users() {
                *stats.replies.entry(user.to_string()).or_default() += 1;
            }
            for user in row.mentions.iter().flatten() {
                *stats.mentions.entry(user.clone()).or_default() += 1;
            }
        }

        stats
    }

    /// Total messages counted.
    pub fn total_messages(&self) -> usize {
        self.messages.values().sum()
    }
}

/// The `n` largest counts, descending; ties broken by key.
pub fn top_n(counts: &UserCounts, n: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Numeric column of [`MessageSummary`] to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMetric {
    ReplyCount,
    ReplyUsersCount,
}

impl SummaryMetric {
    fn value(self, summary: &MessageSummary) -> u64 {
        match self {
            SummaryMetric::ReplyCount => summary.reply_count,
            SummaryMetric::ReplyUsersCount => summary.reply_users_count,
        }
    }
}

/// Sum of `metric` per sender, descending.
pub fn sum_by_user(summaries: &[MessageSummary], metric: SummaryMetric) -> Vec<(String, u64)> {
    let mut sums: BTreeMap<&str, u64> = BTreeMap::new();
    for s in summaries {
        *sums.entry(s.user.as_str()).or_default() += metric.value(s);
    }

    let mut ranked: Vec<(String, u64)> = sums.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Mean of `metric` per sender, descending.
pub fn mean_by_user(summaries: &[MessageSummary], metric: SummaryMetric) -> Vec<(String, f64)> {
    let mut acc: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for s in summaries {
        let entry = acc.entry(s.user.as_str()).or_default();
        entry.0 += metric.value(s);
        entry.1 += 1;
    }

    let mut ranked: Vec<(String, f64)> = acc
        .into_iter()
        .map(|(user, (total, n))| (user.to_string(), total as f64 / n as f64))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Distinct `@U...` user tags appearing in message texts, first-seen order.
pub fn tagged_users<'a, I>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut tagged = Vec::new();

    for text in texts {
        for m in MENTION_RE.find_iter(text) {
            if seen.insert(m.as_str()) {
                tagged.push(m.as_str().to_string());
            }
        }
    }

    tagged
}
