/// Simulated document scroll position for hosts without a real page.
///
/// Tracks the offset a browser would report from
/// `document.body.getBoundingClientRect().top`: `0` at the top and down to
/// `-page_height` at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct PageScroll {
    offset: f32,
    page_height: f32,
}

impl PageScroll {
    /// A page of `page_height` scrollable pixels, scrolled to the top.
    #[must_use]
    pub fn new(page_height: f32) -> Self {
        Self {
            offset: 0.0,
            page_height: page_height.max(0.0),
        }
    }

    /// Current offset in whole pixels.
    #[must_use]
    pub fn offset(&self) -> i32 {
        self.offset.round() as i32
    }

    /// Scroll by `pixels` (positive moves down the page). Returns the new
    /// offset if the page actually moved, mirroring a browser that only
    /// fires `scroll` when the position changes.
    pub fn scroll_by(&mut self, pixels: f32) -> Option<i32> {
        self.set(self.offset - pixels)
    }

    /// Jump to the top of the page.
    pub fn to_top(&mut self) -> Option<i32> {
        self.set(0.0)
    }

    /// Jump to the bottom of the page.
    pub fn to_bottom(&mut self) -> Option<i32> {
        self.set(-self.page_height)
    }

    fn set(&mut self, offset: f32) -> Option<i32> {
        let before = self.offset();
        self.offset = offset.clamp(-self.page_height, 0.0);
        let after = self.offset();
        (after != before).then_some(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_top() {
        assert_eq!(PageScroll::new(1000.0).offset(), 0);
    }

    #[test]
    fn scrolling_down_goes_negative() {
        let mut page = PageScroll::new(1000.0);
        assert_eq!(page.scroll_by(120.0), Some(-120));
        assert_eq!(page.scroll_by(80.0), Some(-200));
    }

    #[test]
    fn clamps_to_page_bounds() {
        let mut page = PageScroll::new(500.0);
        assert_eq!(page.scroll_by(10_000.0), Some(-500));
        assert_eq!(page.scroll_by(1.0), None);
        assert_eq!(page.scroll_by(-10_000.0), Some(0));
        assert_eq!(page.scroll_by(-1.0), None);
    }

    #[test]
    fn home_and_end() {
        let mut page = PageScroll::new(750.0);
        assert_eq!(page.to_bottom(), Some(-750));
        assert_eq!(page.to_bottom(), None);
        assert_eq!(page.to_top(), Some(0));
    }

    #[test]
    fn sub_pixel_deltas_accumulate() {
        let mut page = PageScroll::new(100.0);
        assert_eq!(page.scroll_by(0.3), None);
        assert_eq!(page.scroll_by(0.3), Some(-1));
    }
}
