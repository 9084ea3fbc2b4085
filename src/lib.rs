//! Page layout engine for reflowable EPUB chapter content.
//!
//! `epub-pager` takes the ordered content blocks of one chapter (headings,
//! images, styled text runs) and partitions them into fixed-size pages.
//! Text is wrapped word by word with an injected [`TextMeasurer`], long
//! paragraphs are split at word boundaries, and anchor ids can be resolved
//! to the page that holds them.
//!
//! ```rust
//! use epub_pager::{find_page_for_id, ContentBlock, Paginator, TextMetrics};
//!
//! # fn main() -> Result<(), epub_pager::PaginationError> {
//! let paginator = Paginator::new(TextMetrics::for_container(480.0, 720.0));
//! let pages = paginator.calculate_pages(vec![
//!     ContentBlock::heading(1, "Loomings").with_id("ch1"),
//!     ContentBlock::paragraph("Call me Ishmael."),
//! ])?;
//! assert_eq!(pages.len(), 1);
//! assert_eq!(find_page_for_id(&pages, "ch1"), Some(0));
//! # Ok(())
//! # }
//! ```
//!
//! Pagination is deterministic for identical blocks, metrics and measurer.
//! Callers caching page lists should key them by chapter identity and
//! [`TextMetrics::profile_id`].

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod content;
pub mod error;
pub mod measure;
pub mod metrics;
pub mod page;
pub mod paginator;

pub use content::{ContentBlock, HeadingBlock, ImageBlock, RichTextBlock, Segment, SegmentStyle};
pub use error::PaginationError;
pub use measure::{
    text_line_height_px, FontStyle, HeuristicMeasurer, MonospaceMeasurer, TextMeasurer,
    TEXT_BASE_FONT_SIZE_PX, TEXT_LINE_HEIGHT_FACTOR,
};
pub use metrics::{MetricsProfileId, TextMetrics};
pub use page::{heading_height_px, image_height_px, Page, PageResult};
pub use paginator::{find_page_for_id, Paginator};
