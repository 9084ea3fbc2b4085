mod common;

use common::budget_alloc::BudgetAlloc;
use common::fixtures::synthetic_chapter;
use epub_pager::{Paginator, TextMetrics};

// A 400-block chapter peaks well under 256KiB above its input; keep a
// guardrail at 1MiB.
const PAGINATE_BUDGET_BYTES: usize = 1024 * 1024;

#[global_allocator]
static ALLOC: BudgetAlloc = BudgetAlloc::new();

#[test]
fn paginate_chapter_under_budget() {
    let paginator = Paginator::new(TextMetrics::for_container(480.0, 800.0));
    let blocks = synthetic_chapter(400, 25);

    let (pages, usage) = ALLOC.measure(|| paginator.calculate_pages(blocks));
    let pages = pages.unwrap_or_else(|e| panic!("paginate synthetic chapter: {}", e));
    assert!(pages.len() > 1);

    assert!(
        usage.peak_bytes <= PAGINATE_BUDGET_BYTES,
        "pagination peak over budget: {} bytes ({:.1}KB), budget: {}KB",
        usage.peak_bytes,
        usage.peak_bytes as f64 / 1024.0,
        PAGINATE_BUDGET_BYTES / 1024
    );
    println!(
        "paginate blocks=400 pages={} peak_kib={:.1} allocs={}",
        pages.len(),
        usage.peak_bytes as f64 / 1024.0,
        usage.allocs
    );
}
