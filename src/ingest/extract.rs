use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

use crate::document::{split_tags, DocumentRecord, FrontMatter};
use crate::ingest::frontmatter::parse_frontmatter;
use crate::ingest::policy::{DateSource, ExtractionPolicy, SummaryRule, TagRule, ThumbnailSeed};
use crate::types::identifiers::RecordId;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").unwrap());
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").unwrap());
static TAGS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*tags[ \t]*:(.*)$").unwrap());

// Characters left alone by a URI component encoder.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Turns raw markdown into a `DocumentRecord` under one `ExtractionPolicy`.
///
/// Frontmatter values, when the policy reads them, always win over the
/// heuristics; heuristics only fill what the block leaves out.
#[derive(Debug, Clone)]
pub struct Extractor {
    policy: ExtractionPolicy,
    now: DateTime<Utc>,
}

impl Extractor {
    pub fn new(policy: ExtractionPolicy) -> Self {
        Self {
            policy,
            now: Utc::now(),
        }
    }

    /// Pin the clock used for default dates and generated ids.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn policy(&self) -> &ExtractionPolicy {
        &self.policy
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Extract a record, generating an id when the text carries none.
    pub fn extract(&self, file_name: &str, text: &str) -> DocumentRecord {
        self.build(file_name, text, || RecordId::generate(self.now))
    }

    /// Extract a record, using `fallback` when the text carries no id.
    pub fn extract_with_id(&self, file_name: &str, text: &str, fallback: RecordId) -> DocumentRecord {
        self.build(file_name, text, || fallback)
    }

    fn build(
        &self,
        file_name: &str,
        text: &str,
        fallback_id: impl FnOnce() -> RecordId,
    ) -> DocumentRecord {
        let placeholders = &self.policy.placeholders;

        let (metadata, body) = if self.policy.frontmatter {
            parse_frontmatter(text)
        } else {
            (FrontMatter::new(), text)
        };

        let title = metadata
            .non_empty("title")
            .map(String::from)
            .or_else(|| first_heading(body).map(String::from))
            .or_else(|| file_stem(file_name).map(String::from))
            .unwrap_or_else(|| placeholders.untitled.clone());

        let date = metadata
            .non_empty("date")
            .map(String::from)
            .unwrap_or_else(|| self.derive_date(file_name, text));

        let summary = match metadata.non_empty("summary") {
            Some(explicit) => truncate_chars(explicit, self.policy.summary_cap),
            None => derive_summary(&self.policy.summary, body),
        };
        let summary = if summary.is_empty() {
            placeholders.no_summary.clone()
        } else {
            summary
        };

        let tags = match metadata.get("tags") {
            Some(raw) => split_tags(raw),
            None => self.derive_tags(body),
        };

        let id = metadata
            .non_empty("id")
            .map(RecordId::new)
            .unwrap_or_else(fallback_id);

        let thumbnail_url = metadata
            .non_empty("thumbnailUrl")
            .map(String::from)
            .unwrap_or_else(|| {
                let seed = match self.policy.thumbnail_seed {
                    ThumbnailSeed::Id => id.as_str().to_string(),
                    ThumbnailSeed::Title => utf8_percent_encode(&title, COMPONENT).to_string(),
                };
                placeholders.thumbnail_template.replace("{seed}", &seed)
            });

        let youtube_url = metadata
            .non_empty("youtubeUrl")
            .map(String::from)
            .unwrap_or_else(|| placeholders.youtube_url.clone());

        DocumentRecord {
            id,
            title,
            date,
            thumbnail_url,
            youtube_url,
            tags,
            summary,
            content: body.trim().to_string(),
        }
    }

    fn derive_date(&self, file_name: &str, text: &str) -> String {
        let found = match self.policy.date_source {
            DateSource::Explicit => None,
            DateSource::NameThenContent => find_date(file_name).or_else(|| find_date(text)),
            DateSource::Content => find_date(text),
        };
        found
            .map(String::from)
            .unwrap_or_else(|| self.now.format("%Y-%m-%d").to_string())
    }

    fn derive_tags(&self, body: &str) -> Vec<String> {
        let mut tags: Vec<String> = match &self.policy.tags {
            TagRule::Explicit => return Vec::new(),
            TagRule::TagsLine => TAGS_LINE
                .captures(body)
                .map(|cap| split_tags(&cap[1]))
                .unwrap_or_default(),
            TagRule::Vocabulary(terms) => terms
                .iter()
                .filter(|term| body.contains(term.as_str()))
                .cloned()
                .collect(),
        };
        tags.truncate(self.policy.max_tags);

        if tags.is_empty() {
            if let Some(default) = &self.policy.placeholders.default_tag {
                tags.push(default.clone());
            }
        }
        tags
    }
}

/// Text of the first `# ` heading line, trimmed.
pub fn first_heading(body: &str) -> Option<&str> {
    HEADING
        .captures_iter(body)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim())
        .find(|t| !t.is_empty())
}

/// First `YYYY-MM-DD` substring.
pub fn find_date(text: &str) -> Option<&str> {
    ISO_DATE.find(text).map(|m| m.as_str())
}

/// File name without directories and without its final extension.
fn file_stem(file_name: &str) -> Option<&str> {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Prefix of at most `max` characters.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn is_heading(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

fn derive_summary(rule: &SummaryRule, body: &str) -> String {
    match rule {
        SummaryRule::LeadingLines { lines, max_chars } => {
            let joined = body
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .take(*lines)
                .collect::<Vec<_>>()
                .join(" ");
            truncate_chars(&joined, *max_chars)
        }
        SummaryRule::Excerpt { max_chars, marker } => {
            let without_heading = match HEADING.find(body) {
                Some(m) => format!("{}{}", &body[..m.start()], &body[m.end()..]),
                None => body.to_string(),
            };
            let excerpt = without_heading.trim();
            if excerpt.chars().count() > *max_chars {
                format!("{}{}", truncate_chars(excerpt, *max_chars), marker)
            } else {
                excerpt.to_string()
            }
        }
        SummaryRule::Article {
            lines,
            soft_chars,
            max_chars,
        } => {
            let mut collected: Vec<&str> = Vec::new();
            let mut running = 0;
            for line in body.lines() {
                if is_heading(line) || line.trim().is_empty() || line.starts_with("---") {
                    continue;
                }
                let clean = strip_line_marker(line.trim_start()).trim();
                if clean.is_empty() || clean.starts_with('|') {
                    continue;
                }
                collected.push(clean);
                running += clean.chars().count();
                if collected.len() >= *lines || running > *soft_chars {
                    break;
                }
            }
            truncate_chars(&collected.join(" "), *max_chars)
        }
    }
}

/// Drop one leading bold, list or quote marker.
fn strip_line_marker(line: &str) -> &str {
    ["**", "*", "-", ">"]
        .iter()
        .find_map(|m| line.strip_prefix(m))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_requires_space_after_hash() {
        assert_eq!(first_heading("#tag\n# Real\n"), Some("Real"));
        assert_eq!(first_heading("## Sub\n"), None);
        assert_eq!(first_heading("no heading"), None);
    }

    #[test]
    fn heading_does_not_span_lines() {
        assert_eq!(first_heading("#\nnext line"), None);
    }

    #[test]
    fn date_is_first_iso_substring() {
        assert_eq!(find_date("ep-2024-03-09-final 2025-01-01"), Some("2024-03-09"));
        assert_eq!(find_date("2024/03/09"), None);
    }

    #[test]
    fn stem_strips_extension_and_directories() {
        assert_eq!(file_stem("dir/Notes.MD"), Some("Notes"));
        assert_eq!(file_stem("plain"), Some("plain"));
        assert_eq!(file_stem(""), None);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("比特币价格", 3), "比特币");
    }

    #[test]
    fn line_markers_are_stripped_once() {
        assert_eq!(strip_line_marker("**bold** rest"), "bold** rest");
        assert_eq!(strip_line_marker("- item"), " item");
        assert_eq!(strip_line_marker("> quote"), " quote");
        assert_eq!(strip_line_marker("plain"), "plain");
    }

    #[test]
    fn article_summary_skips_rules_tables_and_headings() {
        let rule = SummaryRule::Article {
            lines: 3,
            soft_chars: 150,
            max_chars: 200,
        };
        let body = "# T\n---\n| a | b |\n\n- one\n> two\n**three**\nfour";
        assert_eq!(derive_summary(&rule, body), "one two three**");
    }

    #[test]
    fn excerpt_marks_truncation() {
        let rule = SummaryRule::Excerpt {
            max_chars: 5,
            marker: "...".into(),
        };
        assert_eq!(derive_summary(&rule, "# Title\nabcdefgh"), "abcde...");
        assert_eq!(derive_summary(&rule, "# Title\nabc"), "abc");
    }
}
