use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key/value pairs read from a leading `---` block.
///
/// Values are kept verbatim apart from trimming and quote stripping; the
/// extractor decides how each recognised key maps onto a record field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter {
    inner: BTreeMap<String, String>,
}

impl FrontMatter {
    pub fn new() -> Self {
        FrontMatter {
            inner: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    /// Like `get`, but an empty value counts as absent.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.inner.iter()
    }
}
