//! Raw Reddit listing decode: the tagged `t3`/`t1`/`more` node union as the
//! public `.json` thread endpoint ships it. Decoding happens once at the
//! boundary; the walk dispatches on the explicit variants, never on dynamic
//! property probing.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Reddit's paginated container wrapping an ordered sequence of child nodes.
#[derive(Debug, Deserialize)]
pub struct RawListing {
    pub data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<RawNode>,
}

/// One listing entry. Kinds we don't model (live updates, awards, etc.)
/// decode to `Other` and are skipped by the walk.
#[derive(Debug)]
pub enum RawNode {
    Post(PostData),
    Comment(CommentData),
    More(MoreData),
    Other,
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Envelope {
            kind: String,
            #[serde(default)]
            data: Value,
        }
        let env = Envelope::deserialize(d)?;
        match env.kind.as_str() {
            "t3" => serde_json::from_value(env.data)
                .map(RawNode::Post)
                .map_err(de::Error::custom),
            "t1" => serde_json::from_value(env.data)
                .map(RawNode::Comment)
                .map_err(de::Error::custom),
            "more" => serde_json::from_value(env.data)
                .map(RawNode::More)
                .map_err(de::Error::custom),
            _ => Ok(RawNode::Other),
        }
    }
}

/// Submission fields we retain. Extra fields are ignored by serde.
/// `created_utc` arrives as a JSON float holding integral epoch seconds.
#[derive(Debug, Deserialize)]
pub struct PostData {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    pub selftext_html: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub subreddit: String,
    pub score: Option<i64>,
    pub upvote_ratio: Option<f64>,
    pub num_comments: Option<i64>,
    pub created_utc: Option<f64>,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub is_self: bool,
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub spoiler: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub archived: bool,
    pub link_flair_text: Option<String>,
    pub author_flair_text: Option<String>,
}

/// Comment fields we retain.
/// `replies` is either a nested listing or the empty-string sentinel meaning
/// "no replies loaded"; `edited` is `false` or epoch seconds.
#[derive(Debug, Deserialize)]
pub struct CommentData {
    pub id: String,
    pub author: Option<String>,
    pub body: Option<String>,
    pub body_html: Option<String>,
    pub score: Option<i64>,
    pub created_utc: Option<f64>,
    #[serde(default, deserialize_with = "edited_field")]
    pub edited: Edited,
    pub parent_id: Option<String>,
    pub permalink: Option<String>,
    pub depth: Option<u32>,
    #[serde(default)]
    pub is_submitter: bool,
    pub distinguished: Option<String>,
    #[serde(default)]
    pub stickied: bool,
    #[serde(default)]
    pub score_hidden: bool,
    pub controversiality: Option<i64>,
    pub total_awards_received: Option<i64>,
    #[serde(default, deserialize_with = "replies_field")]
    pub replies: Option<RawListing>,
}

/// A listing entry for comments Reddit elided from the response.
/// Never expanded locally; only its declared count matters.
#[derive(Debug, Deserialize)]
pub struct MoreData {
    pub count: Option<i64>,
    #[serde(default)]
    pub children: Vec<String>,
    pub depth: Option<u32>,
    pub id: Option<String>,
}

impl MoreData {
    /// Declared number of elided comments; when the count is absent or zero,
    /// fall back to the length of the elided-id list.
    pub fn declared_count(&self) -> u64 {
        match self.count {
            Some(n) if n > 0 => n as u64,
            _ => self.children.len() as u64,
        }
    }
}

/// Edit state of a comment: the wire value is `false`, `true` (old data with
/// the edit time lost), or epoch seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Edited {
    #[default]
    No,
    Yes,
    At(i64),
}

impl Edited {
    pub fn is_edited(self) -> bool {
        !matches!(self, Edited::No)
    }
    pub fn epoch(self) -> Option<i64> {
        match self {
            Edited::At(ts) => Some(ts),
            _ => None,
        }
    }
}

fn edited_field<'de, D: Deserializer<'de>>(d: D) -> Result<Edited, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Bool(true) => Edited::Yes,
        Value::Number(n) => match n.as_f64() {
            Some(ts) => Edited::At(ts as i64),
            None => Edited::Yes,
        },
        _ => Edited::No,
    })
}

fn replies_field<'de, D: Deserializer<'de>>(d: D) -> Result<Option<RawListing>, D::Error> {
    let v = Value::deserialize(d)?;
    match v {
        Value::Object(_) => serde_json::from_value(v)
            .map(Some)
            .map_err(de::Error::custom),
        // "" sentinel (or null) — no replies loaded.
        _ => Ok(None),
    }
}
