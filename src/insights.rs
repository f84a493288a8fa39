//! Keyword/regex insights over a normalized thread: the local, reproducible
//! analysis mode. Keywords use case-insensitive substring matching; question
//! and link detection use compiled-once regexes.

use crate::thread::NormalizedData;
use ahash::AHashSet;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const DEFAULT_TOP_COMMENTS: usize = 5;
const EXCERPT_CHARS: usize = 100;

fn question_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\?(\s|$)").unwrap())
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+").unwrap())
}

#[derive(Clone, Debug, Default)]
pub struct InsightOptions {
    /// Matched case-insensitively as substrings of comment bodies.
    pub keywords: Vec<String>,
    /// How many top-scored comments to surface; 0 means the default (5).
    pub top_comments: usize,
}

impl InsightOptions {
    pub fn with_keywords<I, S>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = iter
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        self
    }
    pub fn with_top_comments(mut self, n: usize) -> Self {
        self.top_comments = n;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopComment {
    pub id: String,
    pub author: String,
    pub score: i64,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordHit {
    pub keyword: String,
    /// Number of retained comments whose body mentions the keyword.
    pub comments: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    pub thread_id: String,
    pub total_comments: usize,
    /// Distinct authors among retained comments, pseudo users excluded.
    pub unique_authors: usize,
    pub average_score: f64,
    pub question_count: usize,
    pub link_count: usize,
    pub top_comments: Vec<TopComment>,
    pub keyword_hits: Vec<KeywordHit>,
}

pub fn analyze(data: &NormalizedData, opts: &InsightOptions) -> InsightsReport {
    let comments = &data.comments;

    let mut authors: AHashSet<&str> = AHashSet::new();
    let mut score_sum: i64 = 0;
    let mut question_count = 0usize;
    let mut link_count = 0usize;
    let mut keyword_counts = vec![0usize; opts.keywords.len()];

    for c in comments {
        if c.author != "[deleted]" && c.author != "[removed]" {
            authors.insert(c.author.as_str());
        }
        score_sum += c.score;
        if question_re().is_match(&c.body) {
            question_count += 1;
        }
        if link_re().is_match(&c.body) {
            link_count += 1;
        }
        if !opts.keywords.is_empty() {
            let hay = c.body.to_lowercase();
            for (i, kw) in opts.keywords.iter().enumerate() {
                if hay.contains(kw) {
                    keyword_counts[i] += 1;
                }
            }
        }
    }

    let average_score = if comments.is_empty() {
        0.0
    } else {
        score_sum as f64 / comments.len() as f64
    };

    // Stable sort: ties keep traversal order.
    let mut by_score: Vec<usize> = (0..comments.len()).collect();
    by_score.sort_by(|&a, &b| comments[b].score.cmp(&comments[a].score));
    let top_n = if opts.top_comments == 0 {
        DEFAULT_TOP_COMMENTS
    } else {
        opts.top_comments
    };
    let top_comments = by_score
        .into_iter()
        .take(top_n)
        .map(|i| {
            let c = &comments[i];
            TopComment {
                id: c.id.clone(),
                author: c.author.clone(),
                score: c.score,
                excerpt: excerpt(&c.body),
            }
        })
        .collect();

    let keyword_hits = opts
        .keywords
        .iter()
        .zip(keyword_counts)
        .map(|(kw, n)| KeywordHit {
            keyword: kw.clone(),
            comments: n,
        })
        .collect();

    InsightsReport {
        thread_id: data.thread.id.clone(),
        total_comments: comments.len(),
        unique_authors: authors.len(),
        average_score,
        question_count,
        link_count,
        top_comments,
        keyword_hits,
    }
}

/// Markdown rendering of an insights report.
pub fn render_insights(report: &InsightsReport) -> String {
    let mut out = String::new();
    out.push_str("## Insights\n\n");
    out.push_str(&format!(
        "- Comments analyzed: {}\n- Unique authors: {}\n- Average score: {:.1}\n- Questions: {}\n- Comments with links: {}\n\n",
        report.total_comments,
        report.unique_authors,
        report.average_score,
        report.question_count,
        report.link_count
    ));

    if !report.top_comments.is_empty() {
        out.push_str("### Top comments\n\n");
        for tc in &report.top_comments {
            out.push_str(&format!(
                "- **u/{}** ({} points): {}\n",
                tc.author, tc.score, tc.excerpt
            ));
        }
        out.push('\n');
    }

    if !report.keyword_hits.is_empty() {
        out.push_str("### Keyword mentions\n\n");
        for hit in &report.keyword_hits {
            out.push_str(&format!("- `{}`: {} comments\n", hit.keyword, hit.comments));
        }
        out.push('\n');
    }

    out
}

fn excerpt(body: &str) -> String {
    let flat = body.replace(['\n', '\r'], " ");
    let flat = flat.trim();
    let mut s: String = flat.chars().take(EXCERPT_CHARS).collect();
    if flat.chars().count() > EXCERPT_CHARS {
        s.push('…');
    }
    s
}
