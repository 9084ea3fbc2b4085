//! Content block model consumed by the paginator.
//!
//! Blocks arrive already converted from chapter markup: images carry a
//! resolved source reference, inline styling is flattened into
//! [`SegmentStyle`] flags, and anchor ids sit on the nearest block or the
//! segment that owns the inline run.

use serde::{Deserialize, Serialize};

use crate::measure::FontStyle;

/// One semantic unit of chapter content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Section heading.
    Heading(HeadingBlock),
    /// Block-level image.
    Image(ImageBlock),
    /// Paragraph-like run of styled text.
    RichText(RichTextBlock),
}

impl ContentBlock {
    /// Heading block without an anchor id.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading(HeadingBlock {
            text: text.into(),
            level,
            id: None,
        })
    }

    /// Image block with optional natural dimensions.
    pub fn image(src: impl Into<String>, width: Option<u32>, height: Option<u32>) -> Self {
        Self::Image(ImageBlock {
            src: src.into(),
            width,
            height,
            alt: None,
            id: None,
        })
    }

    /// `<p>` block holding a single unstyled segment.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::RichText(RichTextBlock::new("p", vec![Segment::plain(text)]))
    }

    /// Attach a block-level anchor id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = Some(id.into());
        match &mut self {
            Self::Heading(block) => block.id = id,
            Self::Image(block) => block.id = id,
            Self::RichText(block) => block.id = id,
        }
        self
    }

    /// Block-level anchor id, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Heading(block) => block.id.as_deref(),
            Self::Image(block) => block.id.as_deref(),
            Self::RichText(block) => block.id.as_deref(),
        }
    }

    /// True when the block or one of its segments carries `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        if self.id() == Some(id) {
            return true;
        }
        match self {
            Self::RichText(block) => block
                .segments
                .iter()
                .any(|segment| segment.id.as_deref() == Some(id)),
            Self::Heading(_) | Self::Image(_) => false,
        }
    }

    /// Stable variant name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Heading(_) => "heading",
            Self::Image(_) => "image",
            Self::RichText(_) => "rich_text",
        }
    }
}

/// Heading text and level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingBlock {
    /// Plain heading text.
    pub text: String,
    /// Heading level, 1 through 6.
    pub level: u8,
    /// Anchor id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl HeadingBlock {
    /// Level clamped into `1..=6`.
    pub fn clamped_level(&self) -> u8 {
        self.level.clamp(1, 6)
    }
}

/// Image reference and its natural size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBlock {
    /// Resolved image source (archive path or data reference).
    pub src: String,
    /// Natural width in px.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Natural height in px.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Alternate text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Anchor id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ImageBlock {
    /// Natural `(width, height)` when both are known and non-zero.
    pub fn natural_size(&self) -> Option<(f32, f32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w as f32, h as f32)),
            _ => None,
        }
    }
}

/// Inline style flags for one segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentStyle {
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Underline decoration. Has no effect on measurement.
    pub underline: bool,
}

impl SegmentStyle {
    /// Font style handed to the text measurer.
    pub fn font_style(self) -> FontStyle {
        FontStyle {
            weight: if self.bold { 700 } else { 400 },
            italic: self.italic,
        }
    }
}

/// Contiguous styled run of text inside a [`RichTextBlock`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment text, whitespace preserved as authored.
    pub text: String,
    /// Inline style.
    #[serde(default)]
    pub style: SegmentStyle,
    /// Anchor id of the inline run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Segment {
    /// Segment with explicit style.
    pub fn new(text: impl Into<String>, style: SegmentStyle) -> Self {
        Self {
            text: text.into(),
            style,
            id: None,
        }
    }

    /// Unstyled segment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SegmentStyle::default())
    }

    /// Bold segment.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(
            text,
            SegmentStyle {
                bold: true,
                ..SegmentStyle::default()
            },
        )
    }

    /// Italic segment.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(
            text,
            SegmentStyle {
                italic: true,
                ..SegmentStyle::default()
            },
        )
    }

    /// Attach an anchor id to this segment.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Paragraph, list item or other text-bearing block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextBlock {
    /// Source tag name (`p`, `li`, `blockquote`, ...).
    pub tag: String,
    /// Segments in reading order.
    pub segments: Vec<Segment>,
    /// Anchor id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl RichTextBlock {
    /// Rich text block without an anchor id.
    pub fn new(tag: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            tag: tag.into(),
            segments,
            id: None,
        }
    }

    /// Concatenated segment text.
    pub fn text(&self) -> String {
        let len = self.segments.iter().map(|s| s.text.len()).sum();
        let mut out = String::with_capacity(len);
        for segment in &self.segments {
            out.push_str(&segment.text);
        }
        out
    }

    /// Number of whitespace-delimited words across all segments.
    pub fn word_count(&self) -> usize {
        self.segments
            .iter()
            .map(|s| s.text.split_whitespace().count())
            .sum()
    }
}
