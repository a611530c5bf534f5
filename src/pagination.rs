//! Fixed-size paging over id-ordered result sets.
//!
//! Pages are 1-based. There is no upper bound: a page past the end of the data is
//! simply empty, and callers decide what an empty page means.

use serde::{Deserialize, Deserializer};

/// Number of records on a single page.
pub const QUESTIONS_PER_PAGE: i64 = 10;

// query strings carry every value as text; anything that is not an integer means the first page
fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPage {
        Number(i64),
        Text(String),
    }

    Ok(match RawPage::deserialize(deserializer)? {
        RawPage::Number(page) => page,
        RawPage::Text(text) => text.trim().parse().unwrap_or(1),
    })
}

/// The `page` query parameter, defaulting to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Page {
    #[serde(default = "Page::first", deserialize_with = "deserialize_page")]
    pub page: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self { page: Self::first() }
    }
}

impl Page {
    pub fn new(page: i64) -> Self {
        Self { page }
    }

    fn first() -> i64 {
        1
    }

    /// `(offset, limit)` of this page, or `None` when the page can never hold
    /// any records (page numbers below 1, or offsets that overflow).
    pub fn window(&self) -> Option<(i64, i64)> {
        if self.page < 1 {
            return None;
        }
        let offset = (self.page - 1).checked_mul(QUESTIONS_PER_PAGE)?;
        Some((offset, QUESTIONS_PER_PAGE))
    }

    /// Cut this page out of an already ordered collection.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let Some((offset, limit)) = self.window() else {
            return Vec::new();
        };
        let (Ok(offset), Ok(limit)) = (usize::try_from(offset), usize::try_from(limit)) else {
            return Vec::new();
        };
        items.into_iter().skip(offset).take(limit).collect()
    }
}
