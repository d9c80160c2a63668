//! Offset-positioned pages.

use crate::errors::Error;
use crate::request::PageRequest;

/// One page of an offset-paginated result.
///
/// The page owns its content and its originating request, so callers holding
/// the originals cannot alter an issued page; exposed content is read-only.
/// `total_elements` is `None` when the total was not requested or not
/// supplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    request: PageRequest,
    content: Vec<T>,
    total_elements: Option<u64>,
    more_results: bool,
}

impl<T> Page<T> {
    /// Build a page, inferring whether more results follow.
    ///
    /// More results are inferred exactly when the content is a full page and
    /// either the total is unknown or it exceeds the rows covered through
    /// this page.
    #[must_use]
    pub fn new(request: PageRequest, content: Vec<T>, total_elements: Option<u64>) -> Self {
        let full_page = content.len() == request.page_size();
        let covered = request.page_number() * request.page_size() as u64;
        let more_results =
            full_page && total_elements.is_none_or(|total| total > covered);
        Self {
            request,
            content,
            total_elements,
            more_results,
        }
    }

    /// Build a page with an explicit more-results flag.
    #[must_use]
    pub fn with_more_results(
        request: PageRequest,
        content: Vec<T>,
        total_elements: Option<u64>,
        more_results: bool,
    ) -> Self {
        Self {
            request,
            content,
            total_elements,
            more_results,
        }
    }

    /// The request this page answers.
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

    /// Whether a further page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.more_results
    }

    /// Whether a page precedes this one (page numbers are 1-based).
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.request.page_number() > 1
    }

    /// The request for the following page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoNextPage`] when no further page exists.
    pub fn next_page_request(&self) -> Result<PageRequest, Error> {
        if !self.has_next() {
            return Err(Error::NoNextPage);
        }
        self.request.clone().page(self.request.page_number() + 1)
    }

    /// The request for the preceding page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPreviousPage`] on the first page.
    pub fn previous_page_request(&self) -> Result<PageRequest, Error> {
        if !self.has_previous() {
            return Err(Error::NoPreviousPage);
        }
        self.request.clone().page(self.request.page_number() - 1)
    }

    /// Whether total counts are available on this page.
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

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.iter()
    }
}

impl<T> IntoIterator for Page<T> {
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

    fn request(page: u64, size: usize) -> PageRequest {
        PageRequest::of_page(page).unwrap().size(size).unwrap()
    }

    #[test]
    fn full_page_with_larger_total_has_next() {
        let page = Page::new(request(1, 5), vec![1, 2, 3, 4, 5], Some(18));
        assert!(page.has_next());
        assert_eq!(
            page.next_page_request().unwrap(),
            request(2, 5)
        );
        assert_eq!(page.total_pages().unwrap(), 4);
        assert_eq!(page.total_elements().unwrap(), 18);
    }

    #[test]
    fn partial_page_has_no_next() {
        let page = Page::new(request(4, 5), vec![16, 17, 18], Some(18));
        assert!(!page.has_next());
        assert_eq!(page.next_page_request().unwrap_err(), Error::NoNextPage);
    }

    #[test]
    fn full_final_page_with_exact_total_has_no_next() {
        // 10 elements, size 5, page 2: full page but nothing follows.
        let page = Page::new(request(2, 5), vec![6, 7, 8, 9, 10], Some(10));
        assert!(!page.has_next());
    }

    #[test]
    fn unknown_total_infers_next_from_fullness_alone() {
        let page = Page::new(request(1, 3), vec![1, 2, 3], None);
        assert!(page.has_next());
        let page = Page::new(request(1, 3), vec![1, 2], None);
        assert!(!page.has_next());
    }

    #[test]
    fn unknown_total_fails_total_accessors() {
        let page = Page::new(request(1, 5), vec![1, 2, 3, 4, 5], None);
        assert!(!page.has_totals());
        assert_eq!(page.total_elements().unwrap_err(), Error::TotalsUnavailable);
        assert_eq!(page.total_pages().unwrap_err(), Error::TotalsUnavailable);
    }

    #[test]
    fn explicit_flag_overrides_inference() {
        let page = Page::with_more_results(request(1, 5), vec![1, 2], None, true);
        assert!(page.has_next());
    }

    #[test]
    fn first_page_has_no_previous() {
        let page = Page::new(request(1, 5), vec![1], Some(1));
        assert!(!page.has_previous());
        assert_eq!(
            page.previous_page_request().unwrap_err(),
            Error::NoPreviousPage
        );

        let page = Page::new(request(3, 5), Vec::<i32>::new(), Some(11));
        assert_eq!(page.previous_page_request().unwrap(), request(2, 5));
    }

    #[test]
    fn derived_requests_keep_size_and_total_flag() {
        let page = Page::new(
            request(1, 5).with_total(),
            vec![1, 2, 3, 4, 5],
            Some(18),
        );
        let next = page.next_page_request().unwrap();
        assert_eq!(next.page_size(), 5);
        assert!(next.requests_total());
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(request(1, 5), vec![1, 2, 3, 4, 5], Some(16));
        assert_eq!(page.total_pages().unwrap(), 4);
        let page = Page::new(request(1, 5), vec![1, 2, 3, 4, 5], Some(15));
        assert_eq!(page.total_pages().unwrap(), 3);
    }

    #[test]
    fn pages_iterate_over_content() {
        let page = Page::new(request(1, 3), vec![10, 20, 30], None);
        let doubled: Vec<i32> = (&page).into_iter().map(|v| v * 2).collect();
        assert_eq!(doubled, vec![20, 40, 60]);
        assert_eq!(page.into_iter().collect::<Vec<_>>(), vec![10, 20, 30]);
    }
}
