//! Page placement: fitting content blocks into one fixed-size page.

use serde::{Deserialize, Serialize};

use crate::content::{ContentBlock, HeadingBlock, ImageBlock, RichTextBlock, Segment};
use crate::error::PaginationError;
use crate::measure::{text_line_height_px, TextMeasurer};
use crate::metrics::TextMetrics;

/// Outcome of a placement attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum PageResult {
    /// The block was fully placed; the page can take more.
    HasSpace {
        /// Height left on the page, in px, after the paragraph spacing that
        /// follows the placed block has been charged. May be negative.
        remaining_height: f32,
    },
    /// The page is full. `remainder` is the part of the block that did not
    /// fit: the whole block, or the tail of a split rich text block.
    Completed {
        /// Unplaced content to carry onto the next page.
        remainder: ContentBlock,
    },
}

/// One physical page of laid-out blocks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page {
    page_number: usize,
    blocks: Vec<ContentBlock>,
    remaining_height: f32,
}

/// Word position a rich text block is split at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SplitPoint {
    segment: usize,
    word: usize,
    offset: usize,
}

impl Page {
    /// Empty page sized to the metrics' container.
    pub fn new(page_number: usize, metrics: &TextMetrics) -> Self {
        Self {
            page_number,
            blocks: Vec::new(),
            remaining_height: metrics.container_height,
        }
    }

    /// 1-based page number within the chapter.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Placed blocks in reading order.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Take ownership of the placed blocks.
    pub fn into_blocks(self) -> Vec<ContentBlock> {
        self.blocks
    }

    /// Number of placed blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when nothing has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Vertical space left, in px. May be negative after the final gap.
    pub fn remaining_height(&self) -> f32 {
        self.remaining_height
    }

    /// True if a placed block or one of its segments carries `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.blocks.iter().any(|block| block.contains_id(id))
    }

    /// Heading and rich text content, one line per block.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            let text = match block {
                ContentBlock::Heading(heading) => heading.text.clone(),
                ContentBlock::RichText(rich) => rich.text(),
                ContentBlock::Image(_) => continue,
            };
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&text);
        }
        out
    }

    /// Try to place `block` on this page.
    ///
    /// Paragraph spacing is charged only when the block landed completely.
    pub fn try_add_block(
        &mut self,
        block: ContentBlock,
        metrics: &TextMetrics,
        measurer: &dyn TextMeasurer,
    ) -> Result<PageResult, PaginationError> {
        if self.remaining_height <= 0.0 {
            return Ok(PageResult::Completed { remainder: block });
        }

        let result = match block {
            ContentBlock::Heading(heading) => self.place_heading(heading, metrics)?,
            ContentBlock::Image(image) => self.place_image(image, metrics)?,
            ContentBlock::RichText(rich) => self.place_rich_text(rich, metrics, measurer),
        };

        match result {
            PageResult::HasSpace { .. } => {
                self.remaining_height -= metrics.paragraph_spacing;
                Ok(PageResult::HasSpace {
                    remaining_height: self.remaining_height,
                })
            }
            completed => Ok(completed),
        }
    }

    fn place_heading(
        &mut self,
        heading: HeadingBlock,
        metrics: &TextMetrics,
    ) -> Result<PageResult, PaginationError> {
        // Headings always open a page.
        if !self.blocks.is_empty() {
            return Ok(PageResult::Completed {
                remainder: ContentBlock::Heading(heading),
            });
        }
        let height = heading_height_px(heading.clamped_level(), metrics);
        if height > metrics.container_height {
            log::warn!(
                "heading level {} needs {}px, page holds {}px",
                heading.level,
                height,
                metrics.container_height
            );
            return Err(PaginationError::HeadingTooLarge {
                level: heading.level,
                height,
                container_height: metrics.container_height,
            });
        }
        if height > self.remaining_height {
            return Ok(PageResult::Completed {
                remainder: ContentBlock::Heading(heading),
            });
        }
        self.remaining_height -= height;
        self.blocks.push(ContentBlock::Heading(heading));
        Ok(PageResult::HasSpace {
            remaining_height: self.remaining_height,
        })
    }

    fn place_image(
        &mut self,
        image: ImageBlock,
        metrics: &TextMetrics,
    ) -> Result<PageResult, PaginationError> {
        let height = image_height_px(&image, metrics);
        if height > metrics.container_height {
            log::warn!(
                "image {} needs {}px, page holds {}px",
                image.src,
                height,
                metrics.container_height
            );
            return Err(PaginationError::ImageTooLarge {
                src: image.src,
                height,
                container_height: metrics.container_height,
            });
        }
        if height > self.remaining_height {
            return Ok(PageResult::Completed {
                remainder: ContentBlock::Image(image),
            });
        }
        self.remaining_height -= height;
        self.blocks.push(ContentBlock::Image(image));
        Ok(PageResult::HasSpace {
            remaining_height: self.remaining_height,
        })
    }

    fn place_rich_text(
        &mut self,
        rich: RichTextBlock,
        metrics: &TextMetrics,
        measurer: &dyn TextMeasurer,
    ) -> PageResult {
        let line_height = text_line_height_px();

        let mut line_width = 0.0f32;
        let mut line_open = false;
        let mut split_at = None;
        let mut spaced = String::with_capacity(32);

        'segments: for (segment_idx, segment) in rich.segments.iter().enumerate() {
            let style = segment.style.font_style();
            for (word_idx, (offset, word)) in word_spans(&segment.text).enumerate() {
                let width = if line_open {
                    spaced.clear();
                    spaced.push(' ');
                    spaced.push_str(word);
                    measurer.measure_text_px(&spaced, style)
                } else {
                    measurer.measure_text_px(word, style)
                };

                if line_open && line_width + width > metrics.container_width {
                    self.remaining_height -= line_height;
                    if self.remaining_height >= line_height {
                        line_width = measurer.measure_text_px(word, style);
                        continue;
                    }
                    split_at = Some(SplitPoint {
                        segment: segment_idx,
                        word: word_idx,
                        offset,
                    });
                    break 'segments;
                }

                line_width += width;
                line_open = true;
            }
        }

        if let Some(point) = split_at {
            let (completed, remainder) = split_rich_text(rich, point);
            log::debug!(
                "page {}: split <{}> at segment {} word {} ({} words carried)",
                self.page_number,
                remainder.tag,
                point.segment,
                point.word,
                remainder.word_count()
            );
            self.blocks.push(ContentBlock::RichText(completed));
            return PageResult::Completed {
                remainder: ContentBlock::RichText(remainder),
            };
        }

        if line_open {
            self.remaining_height -= line_height;
        }
        self.blocks.push(ContentBlock::RichText(rich));
        PageResult::HasSpace {
            remaining_height: self.remaining_height,
        }
    }
}

/// Heading height: larger levels step down by a quarter line each.
pub fn heading_height_px(level: u8, metrics: &TextMetrics) -> f32 {
    let level = level.clamp(1, 6);
    metrics.line_pitch_px() * (2.5 - f32::from(level - 1) * 0.25)
}

/// Placed image height: width-fit downscale only, never upscale.
pub fn image_height_px(image: &ImageBlock, metrics: &TextMetrics) -> f32 {
    match image.natural_size() {
        Some((width, height)) => height * (metrics.container_width / width).min(1.0),
        None => metrics.line_pitch_px() * 2.0,
    }
}

/// Whitespace-delimited words of `text` with their byte offsets.
fn word_spans(text: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    let mut cursor = 0usize;
    core::iter::from_fn(move || {
        let start = cursor + text[cursor..].find(|c: char| !c.is_whitespace())?;
        let len = text[start..]
            .find(char::is_whitespace)
            .unwrap_or(text.len() - start);
        cursor = start + len;
        Some((start, &text[start..cursor]))
    })
}

/// Split `rich` so everything before `at` stays, the rest carries forward.
///
/// The completed half keeps the anchor ids; the remainder starts at the
/// split word with no leading whitespace.
fn split_rich_text(rich: RichTextBlock, at: SplitPoint) -> (RichTextBlock, RichTextBlock) {
    let RichTextBlock {
        tag,
        mut segments,
        id,
    } = rich;
    let mut tail = segments.split_off(at.segment);

    if let Some(first) = tail.first_mut() {
        if at.word > 0 {
            let head = Segment {
                text: first.text[..at.offset].trim_end().to_string(),
                style: first.style,
                id: first.id.take(),
            };
            segments.push(head);
        }
        first.text.replace_range(..at.offset, "");
    }

    let completed = RichTextBlock { tag: tag.clone(), segments, id };
    let remainder = RichTextBlock {
        tag,
        segments: tail,
        id: None,
    };
    (completed, remainder)
}
