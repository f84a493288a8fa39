//! Markdown rendering of a normalized thread. The comment forest is rebuilt
//! purely from the flat `parent_id` convention: top-level comments carry the
//! `t3_` thread prefix, replies point at `t1_<id>`.

use crate::thread::{NormalizedComment, NormalizedData};
use ahash::AHashMap;

pub fn to_markdown(data: &NormalizedData) -> String {
    let t = &data.thread;
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", t.title));
    out.push_str(&format!(
        "**r/{}** · u/{} · {} points · {:.0}% upvoted · {} comments · {}\n\n",
        t.subreddit,
        t.author,
        t.score,
        t.upvote_ratio * 100.0,
        t.num_comments,
        t.created_at
    ));
    if !t.selftext.is_empty() {
        out.push_str(&t.selftext);
        out.push_str("\n\n");
    }
    if !t.is_self && !t.url.is_empty() {
        out.push_str(&format!("Link: {}\n\n", t.url));
    }
    out.push_str("---\n\n## Comments\n\n");

    // Build the parent -> children index once. Rescanning the flat list per
    // node would be quadratic on large threads; output order is unchanged.
    let mut children: AHashMap<&str, Vec<usize>> = AHashMap::new();
    for (i, c) in data.comments.iter().enumerate() {
        children.entry(c.parent_id.as_str()).or_default().push(i);
    }

    let root_key = format!("t3_{}", t.id);
    if let Some(roots) = children.get(root_key.as_str()) {
        for &i in roots {
            render_comment(&mut out, &data.comments, &children, i);
        }
    }

    out
}

fn render_comment(
    out: &mut String,
    comments: &[NormalizedComment],
    children: &AHashMap<&str, Vec<usize>>,
    idx: usize,
) {
    let c = &comments[idx];
    let prefix = "> ".repeat(c.depth as usize);

    let edited = if c.edited { " · edited" } else { "" };
    out.push_str(&format!(
        "{prefix}**u/{}** · {} points · {}{edited}\n",
        c.author, c.score, c.created_at
    ));
    for line in c.body.lines() {
        out.push_str(&prefix);
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');

    let key = format!("t1_{}", c.id);
    if let Some(kids) = children.get(key.as_str()) {
        for &k in kids {
            render_comment(out, comments, children, k);
        }
    }
}
