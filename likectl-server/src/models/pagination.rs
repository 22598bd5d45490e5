//! Offset/limit query parameters

use serde::Deserialize;

use likectl_core::model::DEFAULT_PAGE_LIMIT;
use likectl_core::PageWindow;

/// Query parameters for offset pagination (`?offset=0&limit=10`)
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    /// Number of items to skip from the beginning
    pub offset: Option<u64>,
    /// Number of items to fetch (max 1000)
    pub limit: Option<u32>,
}

impl From<PageParams> for PageWindow {
    fn from(params: PageParams) -> Self {
        PageWindow::new(
            params.offset.unwrap_or(0),
            params.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_ten() {
        let window = PageWindow::from(PageParams::default());
        assert_eq!(window.offset, 0);
        assert_eq!(window.limit, 10);
    }

    #[test]
    fn clamps_limit() {
        let window = PageWindow::from(PageParams {
            offset: Some(30),
            limit: Some(5000),
        });
        assert_eq!(window.offset, 30);
        assert_eq!(window.limit, 1000);
    }
}
