//! Keyset-cursor pages.
//!
//! A cursored page carries one cursor per content row and derives its
//! next/previous requests from the boundary rows' cursors rather than from
//! page arithmetic. Inserts and deletes between fetches therefore shift the
//! window with the data instead of skewing it; page numbers are advisory
//! only, and a backward traversal may legitimately repeat page number 1.

use crate::cursor::PageCursor;
use crate::errors::Error;
use crate::request::PageRequest;

/// One page of a keyset-paginated result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursoredPage<T> {
    request: PageRequest,
    content: Vec<T>,
    cursors: Vec<PageCursor>,
    total_elements: Option<u64>,
    more_results: bool,
}

impl<T> CursoredPage<T> {
    /// Build a page, inferring more results from a full page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CursorCountMismatch`] unless exactly one cursor is
    /// supplied per content element, in the same order.
    pub fn new(
        request: PageRequest,
        content: Vec<T>,
        cursors: Vec<PageCursor>,
        total_elements: Option<u64>,
    ) -> Result<Self, Error> {
        let more_results = content.len() == request.page_size();
        Self::with_more_results(request, content, cursors, total_elements, more_results)
    }

    /// Build a page with an explicit more-results flag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CursorCountMismatch`] unless exactly one cursor is
    /// supplied per content element, in the same order.
    pub fn with_more_results(
        request: PageRequest,
        content: Vec<T>,
        cursors: Vec<PageCursor>,
        total_elements: Option<u64>,
        more_results: bool,
    ) -> Result<Self, Error> {
        if cursors.len() != content.len() {
            return Err(Error::CursorCountMismatch {
                content: content.len(),
                cursors: cursors.len(),
            });
        }
        Ok(Self {
            request,
            content,
            cursors,
            total_elements,
            more_results,
        })
    }

    #[must_use]
    pub fn page_request(&self) -> &PageRequest {
        &self.request
    }

    /// Read-only view of the page content.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    #[must_use]
    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    /// The cursor positioned at content element `index`.
    #[must_use]
    pub fn cursor_at(&self, index: usize) -> Option<&PageCursor> {
        self.cursors.get(index)
    }

    /// All row cursors, in content order.
    #[must_use]
    pub fn cursors(&self) -> &[PageCursor] {
        &self.cursors
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.more_results && !self.content.is_empty()
    }

    /// Whether a preceding window may exist.
    ///
    /// Under keyset traversal this cannot be decided from arithmetic alone;
    /// a non-empty page conservatively reports a previous window unless it
    /// answers an offset-positioned first-page request.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        !self.content.is_empty()
            && (self.request.cursor().is_some() || self.request.page_number() > 1)
    }

    /// The keyset-forward request for the window after this page's last row.
    ///
    /// The new request carries the last row's cursor; the page number merely
    /// increments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoNextPage`] when the page is empty or nothing
    /// follows.
    pub fn next_page_request(&self) -> Result<PageRequest, Error> {
        if !self.has_next() {
            return Err(Error::NoNextPage);
        }
        let last = self.cursors.last().ok_or(Error::NoNextPage)?;
        PageRequest::after(
            last.clone(),
            self.request.page_number() + 1,
            self.request.page_size(),
            self.request.requests_total(),
        )
    }

    /// The keyset-backward request for the window before this page's first
    /// row.
    ///
    /// The page number saturates at 1 rather than going below it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPreviousPage`] when the page is empty or nothing
    /// precedes it.
    pub fn previous_page_request(&self) -> Result<PageRequest, Error> {
        if !self.has_previous() {
            return Err(Error::NoPreviousPage);
        }
        let first = self.cursors.first().ok_or(Error::NoPreviousPage)?;
        PageRequest::before(
            first.clone(),
            self.request.page_number().saturating_sub(1).max(1),
            self.request.page_size(),
            self.request.requests_total(),
        )
    }

    #[must_use]
    pub fn has_totals(&self) -> bool {
        self.total_elements.is_some()
    }

    /// Total number of elements across all pages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TotalsUnavailable`] when the total was not requested
    /// or not supplied.
    pub fn total_elements(&self) -> Result<u64, Error> {
        self.total_elements.ok_or(Error::TotalsUnavailable)
    }

    /// Total number of pages at this page's size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TotalsUnavailable`] when the total was not requested
    /// or not supplied.
    pub fn total_pages(&self) -> Result<u64, Error> {
        let total = self.total_elements()?;
        Ok(total.div_ceil(self.request.page_size() as u64))
    }
}

impl<'a, T> IntoIterator for &'a CursoredPage<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.iter()
    }
}

impl<T> IntoIterator for CursoredPage<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use datakit_query::Value;

    fn cursor(key: i64) -> PageCursor {
        PageCursor::new(vec![Value::from(key)]).unwrap()
    }

    fn request(page: u64, size: usize) -> PageRequest {
        PageRequest::of_page(page).unwrap().size(size).unwrap()
    }

    #[test]
    fn cursor_count_must_match_content() {
        let err = CursoredPage::new(
            request(1, 2),
            vec!["a", "b"],
            vec![cursor(1)],
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::CursorCountMismatch {
                content: 2,
                cursors: 1
            }
        );
    }

    #[test]
    fn next_request_carries_the_last_rows_cursor() {
        let page = CursoredPage::new(
            request(1, 2),
            vec!["a", "b"],
            vec![cursor(10), cursor(20)],
            None,
        )
        .unwrap();
        assert!(page.has_next());

        let next = page.next_page_request().unwrap();
        assert_eq!(next.cursor(), Some(&cursor(20)));
        assert_eq!(next.page_number(), 2);
        assert_eq!(next.page_size(), 2);
    }

    #[test]
    fn previous_request_carries_the_first_rows_cursor() {
        let origin = PageRequest::after(cursor(5), 2, 2, false).unwrap();
        let page = CursoredPage::new(
            origin,
            vec!["c", "d"],
            vec![cursor(30), cursor(40)],
            None,
        )
        .unwrap();

        let previous = page.previous_page_request().unwrap();
        assert_eq!(previous.cursor(), Some(&cursor(30)));
        assert_eq!(previous.page_number(), 1);
    }

    #[test]
    fn backward_traversal_saturates_page_number_at_one() {
        let origin = PageRequest::before(cursor(9), 1, 2, false).unwrap();
        let page = CursoredPage::new(
            origin,
            vec!["a", "b"],
            vec![cursor(1), cursor(2)],
            None,
        )
        .unwrap();

        let previous = page.previous_page_request().unwrap();
        assert_eq!(previous.page_number(), 1);
    }

    #[test]
    fn partial_page_reports_exhausted_forward_traversal() {
        let page = CursoredPage::new(request(3, 5), vec!["z"], vec![cursor(99)], None).unwrap();
        assert!(!page.has_next());
        assert_eq!(page.next_page_request().unwrap_err(), Error::NoNextPage);
    }

    #[test]
    fn empty_page_navigates_nowhere() {
        let page =
            CursoredPage::new(request(1, 5), Vec::<&str>::new(), Vec::new(), Some(0)).unwrap();
        assert!(!page.has_next());
        assert!(!page.has_previous());
        assert_eq!(page.next_page_request().unwrap_err(), Error::NoNextPage);
        assert_eq!(
            page.previous_page_request().unwrap_err(),
            Error::NoPreviousPage
        );
    }

    #[test]
    fn offset_first_page_has_no_previous() {
        let page = CursoredPage::new(
            request(1, 2),
            vec!["a", "b"],
            vec![cursor(1), cursor(2)],
            None,
        )
        .unwrap();
        assert!(!page.has_previous());
    }

    #[test]
    fn totals_behave_like_offset_pages() {
        let page = CursoredPage::new(
            request(1, 2),
            vec!["a", "b"],
            vec![cursor(1), cursor(2)],
            Some(7),
        )
        .unwrap();
        assert_eq!(page.total_elements().unwrap(), 7);
        assert_eq!(page.total_pages().unwrap(), 4);

        let page = CursoredPage::new(
            request(1, 2),
            vec!["a", "b"],
            vec![cursor(1), cursor(2)],
            None,
        )
        .unwrap();
        assert_eq!(page.total_pages().unwrap_err(), Error::TotalsUnavailable);
    }

    #[test]
    fn cursors_are_exposed_per_row() {
        let page = CursoredPage::new(
            request(1, 2),
            vec!["a", "b"],
            vec![cursor(1), cursor(2)],
            None,
        )
        .unwrap();
        assert_eq!(page.cursor_at(0), Some(&cursor(1)));
        assert_eq!(page.cursor_at(1), Some(&cursor(2)));
        assert_eq!(page.cursor_at(2), None);
        assert_eq!(page.cursors().len(), 2);
    }
}
