use std::path::PathBuf;

use epub_pager::{ContentBlock, RichTextBlock, Segment};

pub const LOOMINGS_FIXTURE: &str = "tests/fixtures/loomings.json";

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push(name);
    path
}

pub fn load_blocks(name: &str) -> Vec<ContentBlock> {
    let path = fixture_path(name);
    let payload = std::fs::read(&path).unwrap_or_else(|e| panic!("read {}: {}", path.display(), e));
    serde_json::from_slice(&payload)
        .unwrap_or_else(|e| panic!("parse {}: {}", path.display(), e))
}

/// Synthetic chapter: a heading every `section_len` blocks, mixed-style
/// paragraphs in between, and an image now and then.
pub fn synthetic_chapter(blocks: usize, section_len: usize) -> Vec<ContentBlock> {
    let mut out = Vec::with_capacity(blocks);
    for i in 0..blocks {
        if i % section_len.max(1) == 0 {
            out.push(ContentBlock::heading(2, format!("Section {}", i / section_len.max(1)))
                .with_id(format!("sec-{}", i)));
            continue;
        }
        if i % 11 == 5 {
            out.push(ContentBlock::image(format!("images/{}.png", i), Some(400), Some(200)));
            continue;
        }
        let words = 12 + (i * 7) % 40;
        let body: Vec<String> = (0..words).map(|w| format!("b{}w{}", i, w)).collect();
        let split = words / 2;
        out.push(ContentBlock::RichText(RichTextBlock::new(
            "p",
            vec![
                Segment::plain(format!("{} ", body[..split].join(" "))),
                Segment::bold(body[split..split + 2].join(" ")).with_id(format!("em-{}", i)),
                Segment::italic(format!(" {}", body[split + 2..].join(" "))),
            ],
        )));
    }
    out
}

/// Every whitespace-delimited word of the rich text and heading blocks.
pub fn block_words(blocks: &[ContentBlock]) -> Vec<String> {
    let mut out = Vec::new();
    for block in blocks {
        let text = match block {
            ContentBlock::Heading(heading) => heading.text.clone(),
            ContentBlock::RichText(rich) => rich.text(),
            ContentBlock::Image(_) => continue,
        };
        out.extend(text.split_whitespace().map(str::to_string));
    }
    out
}
