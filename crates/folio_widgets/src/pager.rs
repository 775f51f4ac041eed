//! Windowed pager
//!
//! Tracks the current page of a paginated listing and computes the visible
//! run of page-number controls. When there are more than seven pages the
//! window always holds seven numbered controls, with ellipses standing in
//! for the collapsed runs:
//!
//! ```text
//! current <= 4            1 2 3 4 5 6 … N
//! current >= N - 3        1 … N-5 N-4 N-3 N-2 N-1 N
//! otherwise               1 … c-2 c-1 c c+1 c+2 … N
//! ```
//!
//! The head and tail branches switch over at the point where the centered
//! run would start touching the first or last anchor, so an ellipsis never
//! stands for zero pages.

use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

/// Maximum number of numbered controls in a window
pub const WINDOW_CONTROLS: usize = 7;

/// One slot of the visible window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageSlot {
    Page { number: usize, current: bool },
    Ellipsis,
}

impl PageSlot {
    pub fn page_number(&self) -> Option<usize> {
        match self {
            PageSlot::Page { number, .. } => Some(*number),
            PageSlot::Ellipsis => None,
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, PageSlot::Page { current: true, .. })
    }
}

/// Visible page controls, seven numbers plus up to two ellipses
pub type PageWindow = SmallVec<[PageSlot; 9]>;

/// Inclusive range of article indices shown on one page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
}

impl PageRange {
    /// Number of articles in the range
    pub fn article_count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Rejected jump-to-page input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JumpError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' is not a whole page number")]
    NotAnInteger(String),

    #[error("page {page} is outside 1..={max_page}")]
    OutOfRange { page: i64, max_page: usize },
}

/// Receives the pager's rendering
///
/// Hosts implement this to draw page-number controls and play the jump
/// input's feedback animations.
pub trait PagerView {
    /// Draw the window of page controls
    fn render(&mut self, window: &[PageSlot]);

    /// Jump input was rejected
    fn jump_error(&mut self, _error: &JumpError) {}

    /// Jump input navigated to `page`
    fn jump_success(&mut self, _page: usize) {}
}

/// Pagination state over a fixed number of articles
#[derive(Debug, Clone)]
pub struct Pager {
    total: usize,
    page_size: usize,
    max_page: usize,
    current: usize,
    /// Window last handed to a view
    published: Option<PageWindow>,
}

impl Pager {
    /// Pager positioned on page 1.
    ///
    /// A page size of zero is treated as one article per page.
    pub fn new(total: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let max_page = total.div_ceil(page_size).max(1);
        Self {
            total,
            page_size,
            max_page,
            current: 1,
            published: None,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn max_page(&self) -> usize {
        self.max_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Article range for `page`, `None` when the page holds no articles
    pub fn range_for(&self, page: usize) -> Option<PageRange> {
        if page == 0 || page > self.max_page {
            return None;
        }
        let start = (page - 1) * self.page_size;
        if start >= self.total {
            return None;
        }
        let end = (page * self.page_size - 1).min(self.total - 1);
        Some(PageRange { start, end })
    }

    /// Article range of the current page
    pub fn current_range(&self) -> Option<PageRange> {
        self.range_for(self.current)
    }

    /// Navigate to page `page`.
    ///
    /// Returns the article range to load, or `None` when `page` is out of
    /// bounds or already current.
    pub fn go_to_page(&mut self, page: usize) -> Option<PageRange> {
        if page == 0 || page > self.max_page || page == self.current {
            return None;
        }
        debug!(from = self.current, to = page, "pager navigated");
        self.current = page;
        self.range_for(page)
    }

    pub fn next(&mut self) -> Option<PageRange> {
        self.go_to_page(self.current + 1)
    }

    pub fn previous(&mut self) -> Option<PageRange> {
        self.go_to_page(self.current.saturating_sub(1))
    }

    pub fn first(&mut self) -> Option<PageRange> {
        self.go_to_page(1)
    }

    pub fn last(&mut self) -> Option<PageRange> {
        self.go_to_page(self.max_page)
    }

    /// Parse and validate jump-to-page input without navigating
    pub fn parse_jump(&self, input: &str) -> Result<usize, JumpError> {
        let trimmed = input.trim();
        let page = match trimmed.parse::<i64>() {
            Ok(page) => page,
            Err(_) => {
                let value: f64 = trimmed
                    .parse()
                    .map_err(|_| JumpError::NotANumber(trimmed.to_string()))?;
                if !value.is_finite() {
                    return Err(JumpError::NotANumber(trimmed.to_string()));
                }
                if value.fract() != 0.0 {
                    return Err(JumpError::NotAnInteger(trimmed.to_string()));
                }
                if value < i64::MIN as f64 || value > i64::MAX as f64 {
                    return Err(JumpError::OutOfRange {
                        page: if value < 0.0 { i64::MIN } else { i64::MAX },
                        max_page: self.max_page,
                    });
                }
                value as i64
            }
        };

        if page < 1 || page as u64 > self.max_page as u64 {
            return Err(JumpError::OutOfRange {
                page,
                max_page: self.max_page,
            });
        }
        Ok(page as usize)
    }

    /// Jump to the page typed by the user.
    ///
    /// Invalid input leaves the pager untouched. A jump to the current page
    /// is accepted but yields no range.
    pub fn jump_to(&mut self, input: &str) -> Result<Option<PageRange>, JumpError> {
        match self.parse_jump(input) {
            Ok(page) => Ok(self.go_to_page(page)),
            Err(err) => {
                debug!(%err, "jump rejected");
                Err(err)
            }
        }
    }

    /// [`Pager::jump_to`] with feedback cues played on `view`
    pub fn submit_jump(&mut self, input: &str, view: &mut impl PagerView) -> Option<PageRange> {
        match self.jump_to(input) {
            Ok(Some(range)) => {
                view.jump_success(self.current);
                self.publish(view);
                Some(range)
            }
            Ok(None) => None,
            Err(err) => {
                view.jump_error(&err);
                None
            }
        }
    }

    /// Visible page-number controls for the current page
    pub fn window(&self) -> PageWindow {
        let max = self.max_page;
        let current = self.current;
        let page = |number: usize| PageSlot::Page {
            number,
            current: number == current,
        };

        let mut window = PageWindow::new();
        if max <= WINDOW_CONTROLS {
            window.extend((1..=max).map(page));
        } else if current <= 4 {
            window.extend((1..=6).map(page));
            window.push(PageSlot::Ellipsis);
            window.push(page(max));
        } else if current >= max - 3 {
            window.push(page(1));
            window.push(PageSlot::Ellipsis);
            window.extend((max - 5..=max).map(page));
        } else {
            window.push(page(1));
            window.push(PageSlot::Ellipsis);
            window.extend((current - 2..=current + 2).map(page));
            window.push(PageSlot::Ellipsis);
            window.push(page(max));
        }
        window
    }

    /// Index of the highlighted control among the numbered controls
    pub fn highlighted_index(&self) -> usize {
        self.window()
            .iter()
            .filter(|slot| slot.page_number().is_some())
            .position(PageSlot::is_current)
            .unwrap_or(0)
    }

    /// Hand the window to `view` if it differs from the last one published.
    ///
    /// Returns `true` when the view was re-rendered.
    pub fn publish(&mut self, view: &mut impl PagerView) -> bool {
        let window = self.window();
        if self.published.as_ref() == Some(&window) {
            return false;
        }
        view.render(&window);
        self.published = Some(window);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(window: &[PageSlot]) -> Vec<String> {
        window
            .iter()
            .map(|slot| match slot {
                PageSlot::Page {
                    number,
                    current: true,
                } => format!("[{number}]"),
                PageSlot::Page { number, .. } => number.to_string(),
                PageSlot::Ellipsis => "…".to_string(),
            })
            .collect()
    }

    fn at(page: usize, max_page: usize) -> Vec<String> {
        let mut pager = Pager::new(max_page * 3, 3);
        pager.go_to_page(page);
        assert_eq!(pager.current_page(), page);
        labels(&pager.window())
    }

    #[derive(Default)]
    struct RecordingView {
        renders: Vec<Vec<String>>,
        errors: Vec<JumpError>,
        successes: Vec<usize>,
    }

    impl PagerView for RecordingView {
        fn render(&mut self, window: &[PageSlot]) {
            self.renders.push(labels(window));
        }

        fn jump_error(&mut self, error: &JumpError) {
            self.errors.push(error.clone());
        }

        fn jump_success(&mut self, page: usize) {
            self.successes.push(page);
        }
    }

    #[test]
    fn test_max_page() {
        assert_eq!(Pager::new(0, 5).max_page(), 1);
        assert_eq!(Pager::new(5, 5).max_page(), 1);
        assert_eq!(Pager::new(6, 5).max_page(), 2);
        assert_eq!(Pager::new(47, 5).max_page(), 10);
        assert_eq!(Pager::new(3, 0).max_page(), 3);
    }

    #[test]
    fn test_window_head() {
        assert_eq!(at(1, 10), ["[1]", "2", "3", "4", "5", "6", "…", "10"]);
        assert_eq!(at(4, 10), ["1", "2", "3", "[4]", "5", "6", "…", "10"]);
    }

    #[test]
    fn test_window_tail() {
        assert_eq!(at(10, 10), ["1", "…", "5", "6", "7", "8", "9", "[10]"]);
        // Page 7 of 10 already sits in the tail run
        assert_eq!(at(7, 10), ["1", "…", "5", "6", "[7]", "8", "9", "10"]);
    }

    #[test]
    fn test_window_middle() {
        assert_eq!(at(5, 10), ["1", "…", "3", "4", "[5]", "6", "7", "…", "10"]);
        assert_eq!(at(6, 10), ["1", "…", "4", "5", "[6]", "7", "8", "…", "10"]);
        assert_eq!(at(5, 10)[4], "[5]");
    }

    #[test]
    fn test_window_small_shows_everything() {
        assert_eq!(at(3, 7), ["1", "2", "[3]", "4", "5", "6", "7"]);
        assert_eq!(at(1, 1), ["[1]"]);
    }

    #[test]
    fn test_window_invariants() {
        for max_page in 1..=30 {
            let mut pager = Pager::new(max_page * 2, 2);
            for page in 1..=max_page {
                pager.go_to_page(page);
                let window = pager.window();
                let numbers: Vec<_> = window.iter().filter_map(PageSlot::page_number).collect();

                assert_eq!(window.iter().filter(|s| s.is_current()).count(), 1);
                assert_eq!(numbers.len(), max_page.min(WINDOW_CONTROLS));
                assert!(numbers.windows(2).all(|w| w[0] < w[1]));
                assert_eq!(numbers.first(), Some(&1));
                assert_eq!(numbers.last(), Some(&max_page));
                assert_eq!(numbers[pager.highlighted_index()], page);

                // Every ellipsis hides at least one page
                for (i, slot) in window.iter().enumerate() {
                    if *slot == PageSlot::Ellipsis {
                        let before = window[i - 1].page_number().unwrap();
                        let after = window[i + 1].page_number().unwrap();
                        assert!(after - before >= 2, "{max_page}/{page}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_go_to_page_ranges() {
        let mut pager = Pager::new(23, 5);

        assert_eq!(pager.current_range(), Some(PageRange { start: 0, end: 4 }));
        assert_eq!(pager.go_to_page(2), Some(PageRange { start: 5, end: 9 }));
        assert_eq!(pager.last(), Some(PageRange { start: 20, end: 22 }));
        assert_eq!(pager.last(), None);
        assert_eq!(pager.next(), None);
        assert_eq!(pager.go_to_page(0), None);
        assert_eq!(pager.go_to_page(6), None);
        assert_eq!(pager.current_page(), 5);
        assert_eq!(pager.previous(), Some(PageRange { start: 15, end: 19 }));
        assert_eq!(pager.first(), Some(PageRange { start: 0, end: 4 }));
        assert_eq!(pager.previous(), None);
    }

    #[test]
    fn test_jump_validation() {
        let mut pager = Pager::new(50, 5);

        assert_eq!(
            pager.jump_to("abc"),
            Err(JumpError::NotANumber("abc".to_string()))
        );
        assert_eq!(
            pager.jump_to("0"),
            Err(JumpError::OutOfRange {
                page: 0,
                max_page: 10
            })
        );
        assert_eq!(
            pager.jump_to("3.5"),
            Err(JumpError::NotAnInteger("3.5".to_string()))
        );
        assert_eq!(
            pager.jump_to("11"),
            Err(JumpError::OutOfRange {
                page: 11,
                max_page: 10
            })
        );
        assert_eq!(pager.jump_to(""), Err(JumpError::NotANumber(String::new())));
        assert_eq!(pager.current_page(), 1);

        assert_eq!(
            pager.jump_to(" 5 "),
            Ok(Some(PageRange { start: 20, end: 24 }))
        );
        assert_eq!(pager.current_page(), 5);
        assert_eq!(pager.jump_to("5"), Ok(None));
        assert_eq!(
            pager.jump_to("3.0"),
            Ok(Some(PageRange { start: 10, end: 14 }))
        );
    }

    #[test]
    fn test_publish_only_on_change() {
        let mut pager = Pager::new(15, 5);
        let mut view = RecordingView::default();

        assert!(pager.publish(&mut view));
        assert!(!pager.publish(&mut view));
        pager.next();
        assert!(pager.publish(&mut view));
        assert_eq!(
            view.renders,
            vec![vec!["[1]", "2", "3"], vec!["1", "[2]", "3"]]
        );
    }

    #[test]
    fn test_submit_jump_cues() {
        let mut pager = Pager::new(50, 5);
        let mut view = RecordingView::default();
        pager.publish(&mut view);

        assert_eq!(pager.submit_jump("x", &mut view), None);
        assert_eq!(pager.submit_jump("1", &mut view), None);
        assert_eq!(
            pager.submit_jump("8", &mut view),
            Some(PageRange { start: 35, end: 39 })
        );

        assert_eq!(view.errors.len(), 1);
        assert_eq!(view.successes, vec![8]);
        assert_eq!(view.renders.len(), 2);
    }
}
