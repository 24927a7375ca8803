//! Input helpers for hosts that have to synthesize page scrolling.

/// Simulated document scroll offset.
pub mod page_scroll;

pub use page_scroll::PageScroll;
