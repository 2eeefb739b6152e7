use std::iter::FusedIterator;
use std::str::Split;

use serde::Serialize;

use crate::render::inline::{parse_inline, Inline};

/// One classified line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block<'a> {
    Heading { level: u8, text: &'a str },
    Quote { text: &'a str },
    ListItem { content: Vec<Inline<'a>> },
    OrderedItem { index: &'a str, content: Vec<Inline<'a>> },
    Paragraph { content: Vec<Inline<'a>> },
    Blank,
}

/// Lazy block sequence over a body, one block per line.
///
/// A clone carries on independently from the same line. Calling `render`
/// again on the same text yields the same sequence.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    lines: Split<'a, char>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(classify_line)
    }
}

impl FusedIterator for Blocks<'_> {}

pub fn render(body: &str) -> Blocks<'_> {
    Blocks {
        lines: body.split('\n'),
    }
}

/// Classify a single line. First matching rule wins.
pub fn classify_line(line: &str) -> Block<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if let Some(text) = line.strip_prefix("# ") {
        return Block::Heading { level: 1, text };
    }
    if let Some(text) = line.strip_prefix("## ") {
        return Block::Heading { level: 2, text };
    }
    if let Some(text) = line.strip_prefix("### ") {
        return Block::Heading { level: 3, text };
    }
    if let Some(text) = line.strip_prefix("> ") {
        return Block::Quote { text };
    }

    let trimmed = line.trim();
    if let Some(rest) = trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("- "))
    {
        return Block::ListItem {
            content: parse_inline(rest.trim_start()),
        };
    }
    if let Some((index, rest)) = split_ordered(trimmed) {
        return Block::OrderedItem {
            index,
            content: parse_inline(rest.trim_start()),
        };
    }
    if trimmed.is_empty() {
        return Block::Blank;
    }

    Block::Paragraph {
        content: parse_inline(line),
    }
}

/// `12. text` into `("12", "text")`.
fn split_ordered(line: &str) -> Option<(&str, &str)> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix(". ")?;
    Some((&line[..digits], rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_marker_needs_digits_dot_space() {
        assert_eq!(split_ordered("3. x"), Some(("3", "x")));
        assert_eq!(split_ordered("10. y"), Some(("10", "y")));
        assert_eq!(split_ordered("3.x"), None);
        assert_eq!(split_ordered(". x"), None);
        assert_eq!(split_ordered("a. x"), None);
    }

    #[test]
    fn heading_without_space_is_a_paragraph() {
        assert_eq!(
            classify_line("#hashtag"),
            Block::Paragraph {
                content: vec![Inline::Text("#hashtag")]
            }
        );
    }

    #[test]
    fn four_hashes_is_a_paragraph() {
        assert!(matches!(classify_line("#### deep"), Block::Paragraph { .. }));
    }

    #[test]
    fn carriage_return_is_ignored() {
        assert_eq!(
            classify_line("## Sub\r"),
            Block::Heading {
                level: 2,
                text: "Sub"
            }
        );
        assert_eq!(classify_line("\r"), Block::Blank);
    }
}
