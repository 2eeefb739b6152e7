use crate::document::FrontMatter;

const DELIMITER: &str = "---";

/// Split a leading `---` block off `text`.
///
/// Returns the parsed key/value pairs and the remaining body. The block must
/// open on the very first line and close on a line that is exactly `---`;
/// anything else means there is no block, the mapping is empty and the whole
/// input is the body. Never fails.
pub fn parse_frontmatter(text: &str) -> (FrontMatter, &str) {
    let no_block = (FrontMatter::new(), text);

    let Some(first_end) = text.find('\n') else {
        return no_block;
    };
    if text[..first_end].trim_end() != DELIMITER {
        return no_block;
    }

    let mut metadata = FrontMatter::new();
    let mut offset = first_end + 1;

    while offset < text.len() {
        let rest = &text[offset..];
        let (line, next) = match rest.find('\n') {
            Some(pos) => (&rest[..pos], offset + pos + 1),
            None => (rest, text.len()),
        };

        if line.trim_end() == DELIMITER {
            return (metadata, &text[next..]);
        }

        if let Some((key, value)) = split_entry(line) {
            metadata.insert(key, value);
        }
        offset = next;
    }

    // Unterminated block
    no_block
}

/// `key: value` split at the first colon. Lines without a key are skipped.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(':')?;
    let key = line[..colon].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, strip_quotes(line[colon + 1..].trim())))
}

/// Remove one matching pair of surrounding single or double quotes.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
