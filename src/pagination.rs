//! Offset/limit pagination over stable id order.

use serde::Deserialize;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PER_PAGE: i64 = 10;

/// Common list-endpoint query parameters.
///
/// `q` is accepted for all list endpoints but currently unused by them.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
    #[serde(default)]
    pub q: Option<String>,
}

impl ListParams {
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.per_page)
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            q: None,
        }
    }
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

/// LIMIT/OFFSET window for a page of results.
///
/// Values below 1 are passed through arithmetically rather than clamped;
/// SQLite then treats a negative LIMIT as unbounded and a negative OFFSET
/// as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl PageWindow {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            limit: per_page,
            offset: page.saturating_sub(1).saturating_mul(per_page),
        }
    }
}
