//! Page requests: offset or keyset-cursor positioning plus size and totals.

use crate::cursor::PageCursor;
use crate::errors::Error;

/// Default page size when only a page number is given.
const DEFAULT_SIZE: usize = 10;

/// How a request positions its page.
///
/// Cursor modes carry their cursor structurally; a cursor-positioned request
/// without a cursor is unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageMode {
    /// Numeric offset: page number times size.
    Offset,
    /// Keyset-forward: rows after the cursor's key values.
    After(PageCursor),
    /// Keyset-backward: rows before the cursor's key values.
    Before(PageCursor),
}

/// An immutable request for one page of results.
///
/// Page numbers are 1-based. Under cursor positioning the page number is
/// advisory only — the cursor, not arithmetic, determines the window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: usize,
    request_total: bool,
    mode: PageMode,
}

impl PageRequest {
    /// Request page `page` (1-based) with the default size of 10.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageNumber`] for page 0.
    pub fn of_page(page: u64) -> Result<Self, Error> {
        if page == 0 {
            return Err(Error::InvalidPageNumber);
        }
        Ok(Self {
            page,
            size: DEFAULT_SIZE,
            request_total: false,
            mode: PageMode::Offset,
        })
    }

    /// Request the first page with the given size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageSize`] for size 0.
    pub fn of_size(size: usize) -> Result<Self, Error> {
        if size == 0 {
            return Err(Error::InvalidPageSize);
        }
        Ok(Self {
            page: 1,
            size,
            request_total: false,
            mode: PageMode::Offset,
        })
    }

    /// A keyset-forward request for the rows after `cursor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageNumber`] for page 0 and
    /// [`Error::InvalidPageSize`] for size 0.
    pub fn after(
        cursor: PageCursor,
        page: u64,
        size: usize,
        request_total: bool,
    ) -> Result<Self, Error> {
        Self::positioned(PageMode::After(cursor), page, size, request_total)
    }

    /// A keyset-backward request for the rows before `cursor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageNumber`] for page 0 and
    /// [`Error::InvalidPageSize`] for size 0.
    pub fn before(
        cursor: PageCursor,
        page: u64,
        size: usize,
        request_total: bool,
    ) -> Result<Self, Error> {
        Self::positioned(PageMode::Before(cursor), page, size, request_total)
    }

    fn positioned(
        mode: PageMode,
        page: u64,
        size: usize,
        request_total: bool,
    ) -> Result<Self, Error> {
        if page == 0 {
            return Err(Error::InvalidPageNumber);
        }
        if size == 0 {
            return Err(Error::InvalidPageSize);
        }
        Ok(Self {
            page,
            size,
            request_total,
            mode,
        })
    }

    /// The same request with a different size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageSize`] for size 0.
    pub fn size(mut self, size: usize) -> Result<Self, Error> {
        if size == 0 {
            return Err(Error::InvalidPageSize);
        }
        self.size = size;
        Ok(self)
    }

    /// The same request positioned at a different page number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageNumber`] for page 0.
    pub fn page(mut self, page: u64) -> Result<Self, Error> {
        if page == 0 {
            return Err(Error::InvalidPageNumber);
        }
        self.page = page;
        Ok(self)
    }

    /// Ask the provider to count total elements.
    #[must_use]
    pub fn with_total(mut self) -> Self {
        self.request_total = true;
        self
    }

    /// Skip the (potentially expensive) total count.
    #[must_use]
    pub fn without_total(mut self) -> Self {
        self.request_total = false;
        self
    }

    /// Switch to keyset-forward positioning after `cursor`.
    #[must_use]
    pub fn after_cursor(mut self, cursor: PageCursor) -> Self {
        self.mode = PageMode::After(cursor);
        self
    }

    /// Switch to keyset-backward positioning before `cursor`.
    #[must_use]
    pub fn before_cursor(mut self, cursor: PageCursor) -> Self {
        self.mode = PageMode::Before(cursor);
        self
    }

    #[must_use]
    pub fn page_number(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn requests_total(&self) -> bool {
        self.request_total
    }

    #[must_use]
    pub fn mode(&self) -> &PageMode {
        &self.mode
    }

    /// The cursor, when this request is cursor-positioned.
    #[must_use]
    pub fn cursor(&self) -> Option<&PageCursor> {
        match &self.mode {
            PageMode::Offset => None,
            PageMode::After(cursor) | PageMode::Before(cursor) => Some(cursor),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use datakit_query::Value;

    fn cursor() -> PageCursor {
        PageCursor::new(vec![Value::from(5_i64)]).unwrap()
    }

    #[test]
    fn of_page_uses_the_default_size() {
        let request = PageRequest::of_page(3).unwrap();
        assert_eq!(request.page_number(), 3);
        assert_eq!(request.page_size(), 10);
        assert!(!request.requests_total());
        assert_eq!(request.mode(), &PageMode::Offset);
    }

    #[test]
    fn of_size_starts_at_the_first_page() {
        let request = PageRequest::of_size(25).unwrap();
        assert_eq!(request.page_number(), 1);
        assert_eq!(request.page_size(), 25);
    }

    #[test]
    fn zero_page_and_zero_size_are_rejected() {
        assert_eq!(
            PageRequest::of_page(0).unwrap_err(),
            Error::InvalidPageNumber
        );
        assert_eq!(PageRequest::of_size(0).unwrap_err(), Error::InvalidPageSize);
        assert_eq!(
            PageRequest::of_page(1).unwrap().size(0).unwrap_err(),
            Error::InvalidPageSize
        );
        assert_eq!(
            PageRequest::after(cursor(), 0, 5, false).unwrap_err(),
            Error::InvalidPageNumber
        );
    }

    #[test]
    fn cursor_modes_carry_their_cursor() {
        let request = PageRequest::after(cursor(), 2, 5, true).unwrap();
        assert_eq!(request.cursor(), Some(&cursor()));
        assert!(request.requests_total());

        let request = PageRequest::of_page(1).unwrap().before_cursor(cursor());
        assert!(matches!(request.mode(), PageMode::Before(_)));
        assert_eq!(request.cursor(), Some(&cursor()));
    }

    #[test]
    fn offset_mode_has_no_cursor() {
        assert_eq!(PageRequest::of_page(1).unwrap().cursor(), None);
    }

    #[test]
    fn totals_toggle_round_trips() {
        let request = PageRequest::of_page(1).unwrap().with_total();
        assert!(request.requests_total());
        assert!(!request.without_total().requests_total());
    }

    #[test]
    fn fluent_chain_builds_the_documented_request() {
        let request = PageRequest::of_page(2).unwrap().size(5).unwrap();
        assert_eq!(request.page_number(), 2);
        assert_eq!(request.page_size(), 5);
    }
}
