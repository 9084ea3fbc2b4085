//! Pagination error types.

use core::fmt;

/// Errors that abort a pagination run.
///
/// A block that does not fit on the current page is not an error; it is
/// reported through [`PageResult::Completed`](crate::PageResult::Completed)
/// and deferred to the next page.
#[derive(Clone, Debug, PartialEq)]
pub enum PaginationError {
    /// Image is taller than a full page even after width-fit downscaling.
    ImageTooLarge {
        /// Image source reference.
        src: String,
        /// Placed height after downscaling, in px.
        height: f32,
        /// Full container height, in px.
        container_height: f32,
    },
    /// Heading is taller than a full page.
    HeadingTooLarge {
        /// Heading level (1-6).
        level: u8,
        /// Computed heading height, in px.
        height: f32,
        /// Full container height, in px.
        container_height: f32,
    },
    /// Text metrics cannot produce a layout.
    InvalidMetrics {
        /// Offending field name.
        field: &'static str,
        /// Offending value.
        value: f32,
    },
    /// A fresh, empty page refused a block.
    ///
    /// Invariant check only: validated metrics, the oversize heading and
    /// image errors, and unconditional acceptance of a first text line on an
    /// empty page leave no input that reaches it.
    NoProgress {
        /// 1-based number of the page that refused the block.
        page_number: usize,
        /// Kind of the refused block.
        block_kind: &'static str,
    },
}

impl fmt::Display for PaginationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageTooLarge {
                src,
                height,
                container_height,
            } => write!(
                f,
                "image '{}' does not fit on any page (height={} container_height={})",
                src, height, container_height
            ),
            Self::HeadingTooLarge {
                level,
                height,
                container_height,
            } => write!(
                f,
                "heading level {} does not fit on any page (height={} container_height={})",
                level, height, container_height
            ),
            Self::InvalidMetrics { field, value } => {
                write!(f, "invalid text metrics: {}={}", field, value)
            }
            Self::NoProgress {
                page_number,
                block_kind,
            } => write!(
                f,
                "empty page {} rejected {} block; pagination cannot progress",
                page_number, block_kind
            ),
        }
    }
}

impl std::error::Error for PaginationError {}
