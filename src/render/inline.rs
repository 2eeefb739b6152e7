use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static STRONG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

/// A run of text inside a paragraph or list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Inline<'a> {
    Text(&'a str),
    Strong(&'a str),
}

impl<'a> Inline<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Inline::Text(s) | Inline::Strong(s) => s,
        }
    }
}

/// Split `line` on `**bold**` spans, keeping order.
///
/// Concatenating the segments, with `**` restored around strong ones,
/// gives back the original line.
pub fn parse_inline(line: &str) -> Vec<Inline<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for cap in STRONG.captures_iter(line) {
        let (Some(whole), Some(inner)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Inline::Text(&line[last..whole.start()]));
        }
        segments.push(Inline::Strong(inner.as_str()));
        last = whole.end();
    }

    if last < line.len() {
        segments.push(Inline::Text(&line[last..]));
    }
    segments
}
