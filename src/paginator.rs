//! Paginator: drives page creation across a chapter's block sequence.

use core::fmt;
use std::sync::Arc;

use crate::content::ContentBlock;
use crate::error::PaginationError;
use crate::measure::{HeuristicMeasurer, TextMeasurer};
use crate::metrics::{MetricsProfileId, TextMetrics};
use crate::page::{Page, PageResult};

/// Deterministic chapter paginator.
///
/// Holds only immutable configuration; every run keeps its layout state in
/// locals, so one paginator can serve independent runs on separate threads.
#[derive(Clone)]
pub struct Paginator {
    metrics: TextMetrics,
    text_measurer: Arc<dyn TextMeasurer>,
}

impl fmt::Debug for Paginator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl Paginator {
    /// Paginator using the built-in heuristic measurer.
    pub fn new(metrics: TextMetrics) -> Self {
        Self {
            metrics,
            text_measurer: Arc::new(HeuristicMeasurer),
        }
    }

    /// Install a shared text measurer for width fitting.
    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.text_measurer = measurer;
        self
    }

    /// Metrics applied to every page.
    pub fn metrics(&self) -> &TextMetrics {
        &self.metrics
    }

    /// Cache-key fingerprint of the configured metrics.
    pub fn profile_id(&self) -> MetricsProfileId {
        self.metrics.profile_id()
    }

    /// Lay out `blocks` into pages.
    ///
    /// Always yields at least one page. Any error aborts the whole run and
    /// no pages are returned.
    pub fn calculate_pages<I>(&self, blocks: I) -> Result<Vec<Page>, PaginationError>
    where
        I: IntoIterator<Item = ContentBlock>,
    {
        let mut pages = Vec::with_capacity(8);
        self.paginate_with(blocks, |page| pages.push(page))?;
        Ok(pages)
    }

    /// Lay out `blocks` and stream each page as soon as it is sealed.
    ///
    /// Returns the number of pages emitted. On error, pages already handed
    /// to `on_page` belong to a failed run and should be discarded.
    pub fn paginate_with<I, F>(&self, blocks: I, mut on_page: F) -> Result<usize, PaginationError>
    where
        I: IntoIterator<Item = ContentBlock>,
        F: FnMut(Page),
    {
        self.metrics.validate()?;
        let measurer = self.text_measurer.as_ref();
        let mut page = Page::new(1, &self.metrics);
        let mut emitted = 0usize;
        let mut block_count = 0usize;

        for block in blocks {
            block_count += 1;
            let mut pending = block;
            loop {
                match page.try_add_block(pending, &self.metrics, measurer)? {
                    PageResult::HasSpace { .. } => break,
                    PageResult::Completed { remainder } => {
                        if page.is_empty() {
                            return Err(PaginationError::NoProgress {
                                page_number: page.page_number(),
                                block_kind: remainder.kind_name(),
                            });
                        }
                        let next = Page::new(page.page_number() + 1, &self.metrics);
                        let sealed = core::mem::replace(&mut page, next);
                        log::trace!(
                            "sealed page {} with {} blocks ({}px left)",
                            sealed.page_number(),
                            sealed.len(),
                            sealed.remaining_height()
                        );
                        on_page(sealed);
                        emitted += 1;
                        pending = remainder;
                    }
                }
            }
        }

        // The open page was never emitted: sealing always replaces it.
        on_page(page);
        emitted += 1;
        log::debug!(
            "paginated {} blocks into {} pages ({}x{}px)",
            block_count,
            emitted,
            self.metrics.container_width,
            self.metrics.container_height
        );
        Ok(emitted)
    }
}

/// Index of the first page holding anchor `id`, scanning in page order.
pub fn find_page_for_id(pages: &[Page], id: &str) -> Option<usize> {
    pages.iter().position(|page| page.contains_id(id))
}
