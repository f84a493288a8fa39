//! CSV export: one row per retained comment in a fixed column order, with
//! body newlines collapsed to spaces and standard quoting.

use crate::thread::NormalizedData;

const HEADER: &str = "id,author,body,score,depth,parent_id,created_at,is_op,awards,permalink";

pub fn to_csv(data: &NormalizedData) -> String {
    let mut out = String::with_capacity(data.comments.len() * 128 + HEADER.len());
    out.push_str(HEADER);
    out.push('\n');

    for c in &data.comments {
        let body = collapse_newlines(&c.body);
        let row = [
            csv_field(&c.id),
            csv_field(&c.author),
            csv_field(&body),
            c.score.to_string(),
            c.depth.to_string(),
            csv_field(&c.parent_id),
            csv_field(&c.created_at),
            c.is_op.to_string(),
            c.awards.to_string(),
            csv_field(&c.permalink),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

fn collapse_newlines(s: &str) -> String {
    s.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Wrap in quotes and double embedded quotes when the field contains a
/// comma, quote, or newline.
fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
