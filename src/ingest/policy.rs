use serde::{Deserialize, Serialize};

pub const DEFAULT_YOUTUBE_URL: &str = "https://www.youtube.com/@CryptoFuture2026";
pub const THUMBNAIL_TEMPLATE: &str = "https://picsum.photos/seed/{seed}/600/400";

/// Topic keywords the bulk loader recognises as tags, in tag order.
pub const TOPIC_VOCABULARY: &[&str] = &[
    "比特币", "以太坊", "加密货币", "监管", "法律", "交易", "投资", "AI", "区块链", "DeFi", "NFT",
];

/// Where a missing `date` is looked for before falling back to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// Only an explicit frontmatter `date`.
    Explicit,
    /// First `YYYY-MM-DD` in the file name, then in the content.
    NameThenContent,
    /// First `YYYY-MM-DD` anywhere in the content.
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum SummaryRule {
    /// First `lines` non-heading, non-empty body lines joined by a space.
    LeadingLines { lines: usize, max_chars: usize },
    /// Body minus its first heading line, trimmed; `marker` is appended when cut.
    Excerpt { max_chars: usize, marker: String },
    /// Cleaned article lines (markers stripped, rules skipped) until `lines`
    /// are collected or the running length passes `soft_chars`.
    Article {
        lines: usize,
        soft_chars: usize,
        max_chars: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "terms")]
pub enum TagRule {
    /// Tags come only from frontmatter; absent means no tags.
    Explicit,
    /// A `tags: a, b` line anywhere in the text.
    TagsLine,
    /// Every vocabulary term contained in the content, in vocabulary order.
    Vocabulary(Vec<String>),
}

/// Seed used to fill the `{seed}` slot of the thumbnail template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbnailSeed {
    Id,
    Title,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholders {
    pub untitled: String,
    pub no_summary: String,
    /// Single tag used when a derived tag list comes out empty.
    pub default_tag: Option<String>,
    pub thumbnail_template: String,
    pub youtube_url: String,
}

impl Placeholders {
    pub fn v0() -> Self {
        Self {
            untitled: "untitled".into(),
            no_summary: "no summary available".into(),
            default_tag: None,
            thumbnail_template: THUMBNAIL_TEMPLATE.into(),
            youtube_url: DEFAULT_YOUTUBE_URL.into(),
        }
    }
}

/// Everything that distinguishes one ingestion path from another.
///
/// The three presets reproduce the upload, heuristic and bulk behaviours;
/// all of them run through the same `Extractor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionPolicy {
    /// Look for a leading `---` block before applying heuristics.
    pub frontmatter: bool,
    pub date_source: DateSource,
    pub summary: SummaryRule,
    /// Cap applied to an explicit frontmatter summary.
    pub summary_cap: usize,
    pub tags: TagRule,
    /// Cap for heuristically derived tags. Explicit tags are not capped.
    pub max_tags: usize,
    pub thumbnail_seed: ThumbnailSeed,
    pub placeholders: Placeholders,
}

impl ExtractionPolicy {
    /// Frontmatter-aware upload parsing.
    pub fn upload() -> Self {
        Self {
            frontmatter: true,
            date_source: DateSource::Explicit,
            summary: SummaryRule::LeadingLines {
                lines: 2,
                max_chars: 100,
            },
            summary_cap: 200,
            tags: TagRule::Explicit,
            max_tags: 5,
            thumbnail_seed: ThumbnailSeed::Id,
            placeholders: Placeholders::v0(),
        }
    }

    /// Unannotated markdown: everything is inferred from the text.
    pub fn heuristic() -> Self {
        Self {
            frontmatter: false,
            date_source: DateSource::NameThenContent,
            summary: SummaryRule::Excerpt {
                max_chars: 200,
                marker: "...".into(),
            },
            summary_cap: 200,
            tags: TagRule::TagsLine,
            max_tags: 5,
            thumbnail_seed: ThumbnailSeed::Id,
            placeholders: Placeholders {
                default_tag: Some("document".into()),
                ..Placeholders::v0()
            },
        }
    }

    /// Longer-form articles discovered by the bulk loader.
    pub fn bulk() -> Self {
        Self {
            frontmatter: false,
            date_source: DateSource::Content,
            summary: SummaryRule::Article {
                lines: 3,
                soft_chars: 150,
                max_chars: 200,
            },
            summary_cap: 200,
            tags: TagRule::Vocabulary(TOPIC_VOCABULARY.iter().map(|t| t.to_string()).collect()),
            max_tags: 5,
            thumbnail_seed: ThumbnailSeed::Title,
            placeholders: Placeholders {
                default_tag: Some("article".into()),
                ..Placeholders::v0()
            },
        }
    }
}
