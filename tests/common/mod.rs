use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use threadmine::RawListing;

/// A `t3` post node with fixed texture fields; only the bits tests assert on
/// are parameterized.
pub fn post_node(id: &str, title: &str, author: &str, num_comments: i64) -> Value {
    json!({
        "kind": "t3",
        "data": {
            "id": id,
            "title": title,
            "selftext": "",
            "selftext_html": null,
            "author": author,
            "subreddit": "rust",
            "score": 183,
            "upvote_ratio": 0.97,
            "num_comments": num_comments,
            "created_utc": 1136073600.0,
            "permalink": format!("/r/rust/comments/{id}/thread/"),
            "url": format!("https://example.com/{id}"),
            "is_self": true,
            "over_18": false,
            "spoiler": false,
            "locked": false,
            "archived": false,
            "link_flair_text": null,
            "author_flair_text": null
        }
    })
}

/// A `t1` comment node. `replies` renders as the `""` sentinel when empty,
/// matching what the endpoint actually ships for leaf comments.
pub fn comment_node(
    id: &str,
    author: &str,
    body: &str,
    score: i64,
    depth: u32,
    parent_id: &str,
    replies: &[Value],
) -> Value {
    let replies_v = if replies.is_empty() {
        json!("")
    } else {
        json!({"kind": "Listing", "data": {"children": replies}})
    };
    json!({
        "kind": "t1",
        "data": {
            "id": id,
            "author": author,
            "body": body,
            "body_html": null,
            "score": score,
            "created_utc": 1136074600.0,
            "edited": false,
            "parent_id": parent_id,
            "permalink": format!("/r/rust/comments/abc123/thread/{id}/"),
            "depth": depth,
            "is_submitter": false,
            "distinguished": null,
            "stickied": false,
            "score_hidden": false,
            "controversiality": 0,
            "total_awards_received": 0,
            "replies": replies_v
        }
    })
}

/// A `more` node declaring `count` elided comments.
pub fn more_node(count: i64, depth: u32, children: &[&str]) -> Value {
    json!({
        "kind": "more",
        "data": {
            "count": count,
            "depth": depth,
            "id": children.first().copied().unwrap_or("_"),
            "children": children
        }
    })
}

pub fn listing(children: Vec<Value>) -> Value {
    json!({"kind": "Listing", "data": {"children": children}})
}

/// The raw two-listing payload as a JSON value (what a snapshot file holds).
pub fn pair_value(post: Value, comments: Vec<Value>) -> Value {
    json!([listing(vec![post]), listing(comments)])
}

/// Same, decoded into the typed listings the normalizer consumes.
pub fn thread_pair(post: Value, comments: Vec<Value>) -> Vec<RawListing> {
    serde_json::from_value(pair_value(post, comments)).unwrap()
}

/// The worked example thread:
/// - post `abc123`
/// - depth-0 comment `c1` (alice, score 10)
///   - depth-1 reply `c2` (bob, score 1)
///   - `more` node declaring count=5 at depth 1
pub fn example_thread() -> Vec<RawListing> {
    let c2 = comment_node("c2", "bob", "nested reply", 1, 1, "t1_c1", &[]);
    let more = more_node(5, 1, &["m1", "m2"]);
    let c1 = comment_node("c1", "alice", "top comment", 10, 0, "t3_abc123", &[c2, more]);
    thread_pair(post_node("abc123", "Example thread", "alice", 8), vec![c1])
}

/// Write a snapshot payload as plain JSON.
pub fn write_snapshot(path: &Path, v: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_vec(v).unwrap()).unwrap();
}

/// Write a snapshot payload zstd-compressed (the `.json.zst` convention).
pub fn write_snapshot_zst(path: &Path, v: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    enc.write_all(&serde_json::to_vec(v).unwrap()).unwrap();
    enc.finish().unwrap();
}

/// Retained comment ids in output order.
pub fn ids(data: &threadmine::NormalizedData) -> Vec<String> {
    data.comments.iter().map(|c| c.id.clone()).collect()
}
